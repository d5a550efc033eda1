//! Naming convention utilities for Swift code generation.
//!
//! # Supported Conversions
//!
//! | Input | Function | Output |
//! |-------|----------|--------|
//! | `get-user` | [`to_pascal_case`] | `GetUser` |
//! | `get_user` | [`to_camel_case`] | `getUser` |
//! | `word` | [`capitalize`] | `Word` |
//! | `2fa code` | [`type_name`] | `_2faCode` |
//! | `default` | [`escape_keyword`] | `` `default` `` |

/// Words that need back-ticks when used as a Swift identifier.
const SWIFT_KEYWORDS: &[&str] = &[
    "Any", "Self", "as", "associatedtype", "await", "break", "case", "catch", "class",
    "continue", "default", "defer", "deinit", "do", "else", "enum", "extension", "fallthrough",
    "false", "fileprivate", "for", "func", "guard", "if", "import", "in", "init", "inout",
    "internal", "is", "let", "nil", "open", "operator", "precedencegroup", "private",
    "protocol", "public", "repeat", "rethrows", "return", "self", "static", "struct",
    "subscript", "super", "switch", "throw", "throws", "true", "try", "typealias", "var",
    "where", "while",
];

/// Convert an identifier in any common convention to PascalCase.
///
/// Words are split on every character that is not ASCII alphanumeric; the
/// first letter of each word is upper-cased and the rest is kept.
///
/// # Examples
///
/// ```
/// use trpc_swift_codegen::naming::to_pascal_case;
///
/// assert_eq!(to_pascal_case("get_user"), "GetUser");
/// assert_eq!(to_pascal_case("get-user"), "GetUser");
/// assert_eq!(to_pascal_case("getUser"), "GetUser");
/// ```
pub fn to_pascal_case(s: &str) -> String {
    s.split(|c: char| !c.is_ascii_alphanumeric())
        .map(capitalize)
        .collect()
}

/// Convert an identifier in any common convention to lowerCamelCase.
///
/// # Examples
///
/// ```
/// use trpc_swift_codegen::naming::to_camel_case;
///
/// assert_eq!(to_camel_case("hello_world"), "helloWorld");
/// assert_eq!(to_camel_case("display-name"), "displayName");
/// assert_eq!(to_camel_case("already"), "already");
/// ```
pub fn to_camel_case(s: &str) -> String {
    let pascal = to_pascal_case(s);
    let mut chars = pascal.chars();
    match chars.next() {
        None => String::new(),
        Some(first) => first.to_lowercase().chain(chars).collect(),
    }
}

/// Capitalize the first letter of a string.
pub fn capitalize(s: &str) -> String {
    let mut chars = s.chars();
    match chars.next() {
        None => String::new(),
        Some(first) => first.to_uppercase().chain(chars).collect(),
    }
}

/// Whether `s` can be used verbatim as a Swift identifier (keywords aside).
pub fn is_identifier(s: &str) -> bool {
    let mut chars = s.chars();
    match chars.next() {
        Some(first) if first.is_ascii_alphabetic() || first == '_' => {
            chars.all(|c| c.is_ascii_alphanumeric() || c == '_')
        }
        _ => false,
    }
}

/// Whether `s` is a Swift keyword.
pub fn is_keyword(s: &str) -> bool {
    SWIFT_KEYWORDS.contains(&s)
}

/// Wrap Swift keywords in back-ticks so they can name a member.
pub fn escape_keyword(s: &str) -> String {
    if is_keyword(s) {
        format!("`{s}`")
    } else {
        s.to_string()
    }
}

/// PascalCase type name that is always a valid identifier.
pub fn type_name(s: &str) -> String {
    let name = to_pascal_case(s);
    if name.is_empty() {
        "_".to_string()
    } else if name.starts_with(|c: char| c.is_ascii_digit()) {
        format!("_{name}")
    } else {
        name
    }
}

/// Member (method/property/case) name for a wire key, before keyword escaping.
///
/// Keys that already are identifiers are kept as-is so they match the wire
/// format; anything else is converted to lowerCamelCase.
pub fn member_name(key: &str) -> String {
    if is_identifier(key) {
        return key.to_string();
    }
    let name = to_camel_case(key);
    if name.is_empty() {
        "_".to_string()
    } else if name.starts_with(|c: char| c.is_ascii_digit()) {
        format!("_{name}")
    } else {
        name
    }
}

/// Swift string literal for `s`, quotes included.
pub fn string_literal(s: &str) -> String {
    let mut out = String::with_capacity(s.len() + 2);
    out.push('"');
    for c in s.chars() {
        match c {
            '"' => out.push_str("\\\""),
            '\\' => out.push_str("\\\\"),
            '\n' => out.push_str("\\n"),
            '\r' => out.push_str("\\r"),
            '\t' => out.push_str("\\t"),
            other => out.push(other),
        }
    }
    out.push('"');
    out
}

/// First free name among `desired`, `desired2`, `desired3`, ...
///
/// Returns `None` once `max_attempts` candidates were all taken.
pub fn disambiguate(
    desired: &str,
    max_attempts: usize,
    is_taken: impl Fn(&str) -> bool,
) -> Option<String> {
    if !is_taken(desired) {
        return Some(desired.to_string());
    }
    (2..=max_attempts)
        .map(|n| format!("{desired}{n}"))
        .find(|candidate| !is_taken(candidate))
}
