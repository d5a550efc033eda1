//! The fixed date format of generated clients.
//!
//! The runtime encodes and decodes every `Date` as
//! `yyyy-MM-dd'T'HH:mm:ss.SSSZ` in UTC, e.g. `2024-01-15T09:30:00.250+0000`.
//! Use with `#[serde(with = "trpc_swift_transport::date_format")]`, or
//! [`option`] for optional fields.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Deserializer, Serializer, de::Error as _};

/// chrono equivalent of the runtime's date pattern.
pub const FORMAT: &str = "%Y-%m-%dT%H:%M:%S%.3f%z";

/// Render `date` in the wire format.
pub fn format(date: &DateTime<Utc>) -> String {
    date.format(FORMAT).to_string()
}

/// Parse a wire date, accepting any offset and normalizing to UTC.
pub fn parse(text: &str) -> Result<DateTime<Utc>, chrono::ParseError> {
    DateTime::parse_from_str(text, FORMAT).map(|date| date.with_timezone(&Utc))
}

pub fn serialize<S>(date: &DateTime<Utc>, serializer: S) -> Result<S::Ok, S::Error>
where
    S: Serializer,
{
    serializer.serialize_str(&format(date))
}

pub fn deserialize<'de, D>(deserializer: D) -> Result<DateTime<Utc>, D::Error>
where
    D: Deserializer<'de>,
{
    let text = String::deserialize(deserializer)?;
    parse(&text).map_err(|err| D::Error::custom(format_args!("invalid date {text:?}: {err}")))
}

/// The same format for `Option<DateTime<Utc>>` fields.
pub mod option {
    use super::*;

    pub fn serialize<S>(date: &Option<DateTime<Utc>>, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        match date {
            Some(date) => serializer.serialize_some(&super::format(date)),
            None => serializer.serialize_none(),
        }
    }

    pub fn deserialize<'de, D>(deserializer: D) -> Result<Option<DateTime<Utc>>, D::Error>
    where
        D: Deserializer<'de>,
    {
        Option::<String>::deserialize(deserializer)?
            .map(|text| {
                parse(&text)
                    .map_err(|err| D::Error::custom(format_args!("invalid date {text:?}: {err}")))
            })
            .transpose()
    }
}
