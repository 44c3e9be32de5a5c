//! JSON encoding of event documents.
//!
//! Object ids render as their hex string and datetimes as ISO-8601 UTC text
//! without an offset (`2024-01-02T09:00:00`, with microseconds only when
//! non-zero). JavaScript code renders as its source text, with any scope
//! dropped. Values that have no JSON form (binary, decimal128, regex, BSON
//! timestamps, min/max keys, DB pointers, non-finite doubles) fail the whole
//! encode.

use mongodb::bson::{self, Bson, Document};
use serde::ser::{Error as _, SerializeMap};
use serde::{Serialize, Serializer};
use service_core::json::to_spaced_string;

/// Encode `events` as a JSON array.
pub fn encode_events(events: &[Document]) -> Result<String, serde_json::Error> {
    let encodable: Vec<EncodableDocument<'_>> = events.iter().map(EncodableDocument).collect();
    to_spaced_string(&encodable)
}

pub fn iso8601(datetime: bson::DateTime) -> String {
    let datetime = datetime.to_chrono();
    let format = if datetime.timestamp_subsec_micros() == 0 {
        "%Y-%m-%dT%H:%M:%S"
    } else {
        "%Y-%m-%dT%H:%M:%S%.6f"
    };
    datetime.format(format).to_string()
}

/// Serializes a document field by field, in stored order.
#[derive(Debug, Clone, Copy)]
pub struct EncodableDocument<'a>(pub &'a Document);

/// Serializes a single BSON value with the id/datetime rules applied.
#[derive(Debug, Clone, Copy)]
pub struct EncodableValue<'a>(pub &'a Bson);

impl Serialize for EncodableDocument<'_> {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        let mut map = serializer.serialize_map(Some(self.0.len()))?;
        for (key, value) in self.0 {
            map.serialize_entry(key, &EncodableValue(value))?;
        }
        map.end()
    }
}

impl Serialize for EncodableValue<'_> {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        match self.0 {
            Bson::ObjectId(oid) => serializer.serialize_str(&oid.to_hex()),
            Bson::DateTime(datetime) => serializer.serialize_str(&iso8601(*datetime)),
            Bson::Document(doc) => EncodableDocument(doc).serialize(serializer),
            Bson::Array(items) => serializer.collect_seq(items.iter().map(EncodableValue)),
            Bson::String(value) | Bson::Symbol(value) => serializer.serialize_str(value),
            Bson::JavaScriptCode(code) => serializer.serialize_str(code),
            Bson::JavaScriptCodeWithScope(code) => serializer.serialize_str(&code.code),
            Bson::Boolean(value) => serializer.serialize_bool(*value),
            Bson::Int32(value) => serializer.serialize_i32(*value),
            Bson::Int64(value) => serializer.serialize_i64(*value),
            Bson::Double(value) if value.is_finite() => serializer.serialize_f64(*value),
            Bson::Null | Bson::Undefined => serializer.serialize_unit(),
            other => Err(S::Error::custom(format!(
                "Object of type {:?} is not JSON serializable",
                other.element_type()
            ))),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{TimeZone, Utc};
    use mongodb::bson::{
        doc, oid::ObjectId, spec::BinarySubtype, Binary, Decimal128, JavaScriptCodeWithScope,
    };

    #[test]
    fn test_empty_sequence() {
        assert_eq!(encode_events(&[]).unwrap(), "[]");
    }

    #[test]
    fn test_object_id_and_datetime_render_as_strings() {
        let oid = ObjectId::parse_str("65a1b2c3d4e5f60718293a4b").unwrap();
        let start = Utc.with_ymd_and_hms(2024, 1, 2, 9, 30, 0).unwrap();
        let events = vec![doc! {
            "_id": oid,
            "status": "approved",
            "startTime": bson::DateTime::from_chrono(start),
        }];

        let body = encode_events(&events).unwrap();

        assert_eq!(
            body,
            r#"[{"_id": "65a1b2c3d4e5f60718293a4b", "status": "approved", "startTime": "2024-01-02T09:30:00"}]"#
        );
    }

    #[test]
    fn test_sub_second_datetimes_keep_microsecond_precision() {
        let datetime = bson::DateTime::from_millis(1_704_067_200_123);
        assert_eq!(iso8601(datetime), "2024-01-01T00:00:00.123000");
    }

    #[test]
    fn test_nested_values_are_encoded_recursively() {
        let organizer = ObjectId::new();
        let events = vec![doc! {
            "title": "Launch",
            "attendees": [ { "user": organizer, "rsvp": true }, null ],
            "reminders": { "at": bson::DateTime::from_millis(0), "count": 2_i64 },
            "price": 12.5,
        }];

        let body = encode_events(&events).unwrap();
        let parsed: serde_json::Value = serde_json::from_str(&body).unwrap();

        assert_eq!(parsed[0]["attendees"][0]["user"], organizer.to_hex());
        assert_eq!(parsed[0]["attendees"][0]["rsvp"], true);
        assert!(parsed[0]["attendees"][1].is_null());
        assert_eq!(parsed[0]["reminders"]["at"], "1970-01-01T00:00:00");
        assert_eq!(parsed[0]["reminders"]["count"], 2);
        assert_eq!(parsed[0]["price"], 12.5);
    }

    #[test]
    fn test_field_order_is_preserved() {
        let events = vec![doc! { "z": 1, "a": 2, "m": 3 }];
        assert_eq!(
            encode_events(&events).unwrap(),
            r#"[{"z": 1, "a": 2, "m": 3}]"#
        );
    }

    #[test]
    fn test_decimal128_is_not_encodable() {
        let events = vec![doc! { "price": Decimal128::from_bytes([0u8; 16]) }];

        let err = encode_events(&events).unwrap_err();
        assert!(err.to_string().contains("not JSON serializable"));
    }

    #[test]
    fn test_binary_is_not_encodable() {
        let events = vec![doc! {
            "blob": Binary { subtype: BinarySubtype::Generic, bytes: vec![1, 2, 3] },
        }];

        assert!(encode_events(&events).is_err());
    }

    #[test]
    fn test_javascript_code_renders_as_source_text() {
        let events = vec![doc! {
            "hook": Bson::JavaScriptCode("function() { return 1; }".to_string()),
            "scoped": Bson::JavaScriptCodeWithScope(JavaScriptCodeWithScope {
                code: "x + 1".to_string(),
                scope: doc! { "x": 41 },
            }),
        }];

        assert_eq!(
            encode_events(&events).unwrap(),
            r#"[{"hook": "function() { return 1; }", "scoped": "x + 1"}]"#
        );
    }

    #[test]
    fn test_non_finite_double_is_not_encodable() {
        let events = vec![doc! { "score": f64::NAN }];
        assert!(encode_events(&events).is_err());
    }

    #[test]
    fn test_non_ascii_text_is_escaped() {
        let events = vec![doc! { "venue": "Zürich" }];
        assert_eq!(
            encode_events(&events).unwrap(),
            r#"[{"venue": "Z\u00fcrich"}]"#
        );
    }
}
