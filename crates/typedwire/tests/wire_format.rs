#![allow(non_snake_case)]

//! End-to-end checks of the wire document through the facade crate

use std::sync::Arc;
use test_case::test_case;
use typedwire::prelude::*;
use typedwire::{MarshallerConfig, WellKnownProperty};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
struct Invoice {
    number: String,
    total_cents: i64,
    paid: bool,
}

impl Tagged for Invoice {
    const TYPE_TAG: &'static str = "billing.Invoice";
}

fn marshaller() -> JsonMessageMarshaller {
    JsonMessageMarshaller::with_registry(TypeRegistry::new().with::<Invoice>().unwrap())
}

fn invoice() -> Invoice {
    Invoice {
        number: "INV-2026-0001".into(),
        total_cents: 129_900,
        paid: false,
    }
}

#[test]
fn wire___ping_with_priority___exact_document() {
    let text = marshaller()
        .encode(&Message::builder("ping").priority(7).build())
        .unwrap();

    assert_eq!(
        text,
        r#"{"payload":"ping","payloadClazz":"string","headers":{},"properties":{"Priority":"7"}}"#
    );
}

#[test]
fn wire___document___has_exactly_four_members() {
    let text = marshaller()
        .encode(&Message::builder(Value::typed(invoice())).header("k", "v").build())
        .unwrap();

    let wire: serde_json::Value = serde_json::from_str(&text).unwrap();
    let mut keys: Vec<&String> = wire.as_object().unwrap().keys().collect();
    keys.sort();
    assert_eq!(keys, vec!["headers", "payload", "payloadClazz", "properties"]);
}

#[test]
fn wire___all_properties___written_under_well_known_names() {
    let message = Message::builder("x")
        .correlation_id("c")
        .expiration_date(1_700_000_000_000)
        .priority(1)
        .sequence_number(2)
        .sequence_size(3)
        .build();

    let text = marshaller().encode(&message).unwrap();

    let wire: serde_json::Value = serde_json::from_str(&text).unwrap();
    for property in WellKnownProperty::ALL {
        assert!(
            wire["properties"][property.as_str()].is_string(),
            "{property} missing"
        );
    }
    assert_eq!(wire["properties"]["ExpirationDate"], "1700000000000");
}

#[test]
fn wire___decoded_properties___are_typed() {
    let text = r#"{"payload":"x","payloadClazz":"string","headers":{},"properties":{"CorrelationId":"42","ExpirationDate":"1700000000000","SequenceNumber":"-1"}}"#;

    let message = marshaller().decode(text).unwrap();

    assert_eq!(message.properties().correlation_id.as_deref(), Some("42"));
    assert_eq!(message.properties().expiration_date, Some(1_700_000_000_000));
    assert_eq!(message.properties().sequence_number, Some(-1));
    assert_eq!(message.properties().priority, None);
}

#[test_case("hello world")]
#[test_case("<xml/>")]
#[test_case("null")]
fn wire___plain_text___becomes_payload(text: &str) {
    let message = marshaller().decode(text).unwrap();

    assert_eq!(message.payload(), &Value::from(text));
    assert!(message.headers().is_empty());
    assert!(message.properties().is_empty());
}

#[test]
fn wire___invoice_with_typed_headers___roundtrips() {
    let original = Message::builder(Value::typed(invoice()))
        .header("previous", Value::typed(invoice()))
        .header("lines", Value::typed(vec![100i64, 250, 945]))
        .header("ratio", 0.25f64)
        .correlation_id("corr-9")
        .build();
    let m = marshaller();

    let decoded = m.decode(&m.encode(&original).unwrap()).unwrap();

    assert_eq!(decoded, original);
    assert_eq!(decoded.payload().downcast_ref::<Invoice>(), Some(&invoice()));
}

#[test]
fn wire___receiver_without_type___rejects_payload() {
    let text = marshaller()
        .encode(&Message::with_payload(Value::typed(invoice())))
        .unwrap();

    let result = JsonMessageMarshaller::new().decode(&text);

    assert!(matches!(result, Err(MarshallingError::UnknownType(_))));
}

#[test]
fn wire___pretty_config___decodes_with_compact_marshaller() {
    let config = MarshallerConfig::from_json(br#"{"pretty": true}"#).unwrap();
    let pretty = JsonMessageMarshaller::from_config(&config, TypeRegistry::new());
    let original = Message::builder(42i32).header("a", "b").build();

    let text = pretty.encode(&original).unwrap();

    assert_eq!(JsonMessageMarshaller::new().decode(&text).unwrap(), original);
}

#[test]
fn wire___shared_marshaller___concurrent_use() {
    let m: Arc<dyn MessageMarshaller> = Arc::new(marshaller());

    let handles: Vec<_> = (0..4u64)
        .map(|i| {
            let m = Arc::clone(&m);
            std::thread::spawn(move || {
                for n in 0..50u64 {
                    let original = Message::builder(i * 1000 + n)
                        .header("thread", i)
                        .header("invoice", Value::typed(invoice()))
                        .build();
                    let decoded = m.unmarshal(&m.marshal(&original).unwrap()).unwrap();
                    assert_eq!(decoded, original);
                }
            })
        })
        .collect();

    for handle in handles {
        handle.join().unwrap();
    }
}
