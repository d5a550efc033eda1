#![allow(non_snake_case)]

use super::*;
use crate::{EmptyObject, TrpcErrorCode};
use serde::Deserialize;

#[derive(Debug, PartialEq, Serialize, Deserialize)]
struct Greeting {
    text: String,
}

// JsonCodec tests

#[test]
fn JsonCodec___encode_call___wraps_input() {
    let codec = JsonCodec::new();

    let body = codec
        .encode_call(Some(&Greeting {
            text: "hi".to_string(),
        }))
        .unwrap();

    assert_eq!(body, br#"{"0":{"json":{"text":"hi"}}}"#);
}

#[test]
fn JsonCodec___encode_call___without_input_omits_json() {
    let codec = JsonCodec::new();

    let body = codec.encode_call::<EmptyObject>(None).unwrap();

    assert_eq!(body, br#"{"0":{}}"#);
}

#[test]
fn JsonCodec___query_parameter___matches_mutation_body() {
    let codec = JsonCodec::new();
    let input = Greeting {
        text: "hi".to_string(),
    };

    let parameter = codec.query_parameter(Some(&input)).unwrap();
    let body = codec.encode_call(Some(&input)).unwrap();

    assert_eq!(parameter.as_bytes(), body.as_slice());
}

#[test]
fn JsonCodec___decode_reply___returns_data() {
    let codec = JsonCodec::new();

    let reply: Option<Greeting> = codec
        .decode_reply(br#"[{"result":{"data":{"json":{"text":"hello"}}}}]"#, true)
        .unwrap();

    assert_eq!(
        reply,
        Some(Greeting {
            text: "hello".to_string()
        })
    );
}

#[test]
fn JsonCodec___decode_reply___surfaces_remote_error() {
    let codec = JsonCodec::new();

    let err = codec
        .decode_reply::<Greeting>(br#"[{"error":{"json":{"code":-32001,"message":"no"}}}]"#, true)
        .unwrap_err();

    match err {
        CodecError::Remote(error) => assert_eq!(error.code, TrpcErrorCode::Unauthorized),
        other => panic!("unexpected error: {other}"),
    }
}

#[test]
fn JsonCodec___decode_reply___malformed_body_is_deserialization_error() {
    let codec = JsonCodec::new();

    let err = codec.decode_reply::<Greeting>(b"{not json", true).unwrap_err();

    assert!(matches!(err, CodecError::Deserialization(_)));
}

#[test]
fn JsonCodec___decode_reply___unknown_error_code_is_deserialization_error() {
    let codec = JsonCodec::new();

    let err = codec
        .decode_reply::<Greeting>(br#"[{"error":{"json":{"code":12345}}}]"#, true)
        .unwrap_err();

    assert!(matches!(err, CodecError::Deserialization(_)));
}
