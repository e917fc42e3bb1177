//! Decoded beacon record representation.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Field names published by the beacon service.
pub mod field {
    /// Record format version.
    pub const VERSION: &str = "version";
    /// Seconds between records.
    pub const FREQUENCY: &str = "frequency";
    /// Unix timestamp of the record.
    pub const TIMESTAMP: &str = "timeStamp";
    /// Seed value (hex).
    pub const SEED_VALUE: &str = "seedValue";
    /// Output value of the preceding record (hex).
    pub const PREVIOUS_OUTPUT_VALUE: &str = "previousOutputValue";
    /// Signature over the record (hex).
    pub const SIGNATURE_VALUE: &str = "signatureValue";
    /// Output value (hex).
    pub const OUTPUT_VALUE: &str = "outputValue";
    /// Status code, `0` for a normal record.
    pub const STATUS_CODE: &str = "statusCode";
}

/// A single beacon record, decoded into a flat map of field name to text.
///
/// There is no schema: every element in the source document becomes a key.
/// A value of `None` means the element carried no text.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Record {
    fields: BTreeMap<String, Option<String>>,
}

impl Record {
    /// Builds a record from `(name, text)` pairs.
    ///
    /// Pairs are applied in order, so a later pair replaces an earlier one
    /// with the same name.
    pub fn from_fields<K, I>(fields: I) -> Self
    where
        K: Into<String>,
        I: IntoIterator<Item = (K, Option<String>)>,
    {
        let mut map = BTreeMap::new();
        for (name, text) in fields {
            map.insert(name.into(), text);
        }
        Self { fields: map }
    }

    /// Returns the text of a field.
    ///
    /// Returns `None` both when the field is missing and when it has no text;
    /// use [`Record::contains_key`] to tell the two apart.
    #[must_use]
    pub fn get(&self, name: &str) -> Option<&str> {
        self.fields.get(name).and_then(Option::as_deref)
    }

    /// Returns true if the record has a field with this name.
    #[must_use]
    pub fn contains_key(&self, name: &str) -> bool {
        self.fields.contains_key(name)
    }

    /// Returns the number of fields.
    #[must_use]
    pub fn len(&self) -> usize {
        self.fields.len()
    }

    /// Returns true if the record has no fields.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    /// Iterates over `(name, text)` pairs.
    pub fn iter(&self) -> impl Iterator<Item = (&str, Option<&str>)> {
        self.fields
            .iter()
            .map(|(name, text)| (name.as_str(), text.as_deref()))
    }

    /// Consumes the record, returning the underlying map.
    #[must_use]
    pub fn into_inner(self) -> BTreeMap<String, Option<String>> {
        self.fields
    }

    /// Returns the record format version.
    #[must_use]
    pub fn version(&self) -> Option<&str> {
        self.get(field::VERSION)
    }

    /// Returns the publication frequency in seconds.
    #[must_use]
    pub fn frequency(&self) -> Option<u32> {
        self.get(field::FREQUENCY)?.trim().parse().ok()
    }

    /// Returns the record timestamp.
    #[must_use]
    pub fn timestamp(&self) -> Option<DateTime<Utc>> {
        let secs: i64 = self.get(field::TIMESTAMP)?.trim().parse().ok()?;
        DateTime::from_timestamp(secs, 0)
    }

    /// Returns the seed value.
    #[must_use]
    pub fn seed_value(&self) -> Option<&str> {
        self.get(field::SEED_VALUE)
    }

    /// Returns the previous record's output value.
    #[must_use]
    pub fn previous_output_value(&self) -> Option<&str> {
        self.get(field::PREVIOUS_OUTPUT_VALUE)
    }

    /// Returns the signature value.
    #[must_use]
    pub fn signature_value(&self) -> Option<&str> {
        self.get(field::SIGNATURE_VALUE)
    }

    /// Returns the output value.
    #[must_use]
    pub fn output_value(&self) -> Option<&str> {
        self.get(field::OUTPUT_VALUE)
    }

    /// Returns the status code.
    #[must_use]
    pub fn status_code(&self) -> Option<u32> {
        self.get(field::STATUS_CODE)?.trim().parse().ok()
    }
}

impl<K: Into<String>> FromIterator<(K, Option<String>)> for Record {
    fn from_iter<I: IntoIterator<Item = (K, Option<String>)>>(iter: I) -> Self {
        Self::from_fields(iter)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> Record {
        Record::from_fields([
            ("record", None),
            ("version", Some("Version 1.0".to_string())),
            ("frequency", Some("60".to_string())),
            ("timeStamp", Some("1483739640".to_string())),
            ("outputValue", Some("3E3F13AB".to_string())),
            ("statusCode", Some("0".to_string())),
        ])
    }

    #[test]
    fn test_later_field_wins() {
        let record = Record::from_fields([
            ("value", Some("first".to_string())),
            ("value", Some("second".to_string())),
        ]);
        assert_eq!(record.len(), 1);
        assert_eq!(record.get("value"), Some("second"));
    }

    #[test]
    fn test_field_without_text() {
        let record = sample();
        assert!(record.contains_key("record"));
        assert_eq!(record.get("record"), None);
        assert!(!record.contains_key("missing"));
    }

    #[test]
    fn test_typed_accessors() {
        let record = sample();
        assert_eq!(record.version(), Some("Version 1.0"));
        assert_eq!(record.frequency(), Some(60));
        assert_eq!(
            record.timestamp(),
            DateTime::from_timestamp(1_483_739_640, 0)
        );
        assert_eq!(record.output_value(), Some("3E3F13AB"));
        assert_eq!(record.status_code(), Some(0));
        assert_eq!(record.seed_value(), None);
    }

    #[test]
    fn test_unparsable_timestamp() {
        let record = Record::from_fields([("timeStamp", Some("soon".to_string()))]);
        assert_eq!(record.timestamp(), None);
    }

    #[test]
    fn test_serializes_as_flat_map() {
        let record = Record::from_fields([
            ("record", None),
            ("version", Some("Version 1.0".to_string())),
        ]);
        let json = serde_json::to_string(&record).unwrap();
        assert_eq!(json, r#"{"record":null,"version":"Version 1.0"}"#);

        let back: Record = serde_json::from_str(&json).unwrap();
        assert_eq!(back, record);
    }
}
