//! Two-stage decode vector tests.

#![allow(clippy::unwrap_used)]
#![allow(clippy::expect_used)]
#![allow(clippy::panic)]

use wsdial_core::protocol::{Envelope, Payload};
use wsdial_core::{ErrorClass, WsDialError};

use vector_loader::load;

#[test]
fn envelope_vectors() {
    let files = [
        "a_ok.json",
        "a_extra_fields.json",
        "a_missing_place.json",
        "a_bad_content.json",
        "a_null_content.json",
        "a_name_not_string.json",
        "unknown_tag.json",
        "not_json.json",
        "not_utf8.json",
        "missing_type.json",
        "truncated.json",
    ];

    for f in files {
        let v = load(f);
        let raw = v.frame.decode();

        let res = Envelope::from_slice(&raw).and_then(|env| {
            let tag = env.message_type.clone();
            Payload::from_envelope(&env).map(|p| (tag, p))
        });

        if let Some(err) = v.expect_error {
            let e = res.expect_err("expected error");
            assert_eq!(e.class(), ErrorClass::Dropped, "vector={}", v.description);
            match err.stage.as_str() {
                "envelope" => {
                    assert!(matches!(e, WsDialError::Envelope(_)), "vector={}", v.description)
                }
                "payload" => {
                    assert!(matches!(e, WsDialError::Payload { .. }), "vector={}", v.description)
                }
                other => panic!("unknown stage {other}"),
            }
            continue;
        }

        let (tag, payload) = res.expect("expected ok frame");
        let ex = v.expect.expect("missing expect block");
        assert_eq!(tag, ex["message_type"].as_str().unwrap(), "vector={}", v.description);

        match (payload, ex.get("payload")) {
            (Some(Payload::A(a)), Some(p)) => {
                assert_eq!(a.name, p["name"].as_str().unwrap(), "vector={}", v.description);
                assert_eq!(a.place, p["place"].as_str().unwrap(), "vector={}", v.description);
            }
            (None, None) => {}
            (got, want) => panic!("vector={}: got {got:?}, want {want:?}", v.description),
        }
    }
}

#[test]
fn content_stays_raw_until_dispatch() {
    let frame = br#"{"message_type":"Z","content":{"deep":[1,2,{"x":null}]}}"#;
    let env = Envelope::from_slice(frame).unwrap();
    assert_eq!(env.message_type, "Z");
    assert_eq!(env.content_str(), Some(r#"{"deep":[1,2,{"x":null}]}"#));
}
