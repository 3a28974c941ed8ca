use std::collections::HashMap;

use serde::{Deserialize, Serialize, Serializer};

use super::{Codec, Event, JsonCodec, MsgPackCodec};
use crate::Error;

#[derive(Debug, PartialEq, Serialize, Deserialize)]
struct Reading {
    sensor: String,
    value: i64,
}

/// Value whose `Serialize` impl always fails.
struct Unencodable;

impl Serialize for Unencodable {
    fn serialize<S: Serializer>(&self, _serializer: S) -> Result<S::Ok, S::Error> {
        Err(serde::ser::Error::custom("cannot encode this value"))
    }
}

#[test]
fn test_event_encode_fields() {
    let reading = Reading {
        sensor: "t1".to_string(),
        value: 25,
    };
    let event = Event::encode(&JsonCodec, "agent-1", "sensor.updates", &reading).unwrap();

    assert_eq!(event.publisher(), b"agent-1");
    assert_eq!(event.topic(), b"sensor.updates");
    assert_eq!(event.body(), serde_json::to_vec(&reading).unwrap().as_slice());
    assert!(!event.has_sequence());
}

#[test]
fn test_event_decode_body() {
    let reading = Reading {
        sensor: "t2".to_string(),
        value: -4,
    };
    let event = Event::encode(&JsonCodec, "agent-1", "sensor.updates", &reading).unwrap();
    let decoded: Reading = event.decode(&JsonCodec).unwrap();
    assert_eq!(decoded, reading);
}

#[test]
fn test_event_encode_unserializable_value() {
    let mut value = HashMap::new();
    value.insert((1, 2), "tuple keys are not valid JSON object keys");

    let err = Event::encode(&JsonCodec, "agent-1", "a.b", &value).unwrap_err();
    assert!(matches!(err, Error::Serialization(_)));
}

#[test]
#[should_panic(expected = "Event::sequence called before Event::assign_sequence")]
fn test_sequence_before_assignment_panics() {
    let event = Event::from_parts("agent-1", "a.b", "x");
    let _ = event.sequence();
}

#[test]
#[should_panic(expected = "Event::sequence called before Event::assign_sequence")]
fn test_sequence_number_before_assignment_panics() {
    let event = Event::from_parts("agent-1", "a.b", "x");
    let _ = event.sequence_number();
}

#[test]
fn test_assign_sequence_big_endian() {
    let event = Event::from_parts("agent-1", "a.b", "x");
    event.assign_sequence(0x0102_0304_0506_0708);

    assert!(event.has_sequence());
    assert_eq!(event.sequence(), &[1, 2, 3, 4, 5, 6, 7, 8]);
    assert_eq!(event.sequence_number(), 0x0102_0304_0506_0708);
}

#[test]
fn test_sequence_extremes() {
    for n in [0, 1, u64::MAX] {
        let event = Event::from_parts("agent-1", "a.b", "x");
        event.assign_sequence(n);
        assert_eq!(event.sequence_number(), n);
        assert_eq!(event.sequence().len(), 8);
    }
}

#[test]
fn test_second_assignment_keeps_first() {
    let event = Event::from_parts("agent-1", "a.b", "x");
    event.assign_sequence(7);
    event.assign_sequence(9);
    assert_eq!(event.sequence_number(), 7);
}

#[test]
fn test_json_codec_decode_error() {
    let err = JsonCodec.decode::<Reading>(b"{not json").unwrap_err();
    assert!(matches!(err, Error::Serialization(_)));
}

#[test]
fn test_msgpack_event_round_trip() {
    let reading = Reading {
        sensor: "t3".to_string(),
        value: 1_000_000,
    };
    let event = Event::encode(&MsgPackCodec, "agent-1", "sensor.updates", &reading).unwrap();

    // Structs are written as two-entry maps, not JSON text.
    assert_eq!(event.body()[0], 0x82);
    assert_eq!(event.decode::<_, Reading>(&MsgPackCodec).unwrap(), reading);
}

#[test]
fn test_msgpack_encode_failure() {
    let err = Event::encode(&MsgPackCodec, "agent-1", "a.b", &Unencodable).unwrap_err();
    assert!(matches!(err, Error::Serialization(_)));
    assert!(err.to_string().contains("cannot encode this value"));
}

#[test]
fn test_msgpack_decode_failure() {
    // 0xc1 is reserved and never valid MessagePack.
    let err = MsgPackCodec.decode::<Reading>(&[0xc1]).unwrap_err();
    assert!(matches!(err, Error::Serialization(_)));
}

#[test]
fn test_json_encode_failure() {
    let err = Event::encode(&JsonCodec, "agent-1", "a.b", &Unencodable).unwrap_err();
    assert!(matches!(err, Error::Serialization(_)));
}
