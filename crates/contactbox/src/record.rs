//! Submitted contact records.
//!
//! A record is an open set of fields keyed by form field name. Four fields
//! are known to the listing; anything else is carried along untouched.
//! Forms only produce text, but a stored value of any JSON type survives a
//! load and save.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Name field.
pub const NOMBRE: &str = "nombre";
/// Email field.
pub const EMAIL: &str = "email";
/// Interest category field.
pub const INTERES: &str = "interes";
/// Free-text message field.
pub const MENSAJE: &str = "mensaje";

/// Field names the listing knows how to display.
pub const KNOWN_FIELDS: [&str; 4] = [NOMBRE, EMAIL, INTERES, MENSAJE];

/// One submitted contact entry.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Record {
    fields: BTreeMap<String, Value>,
}

impl Record {
    /// Create an empty record.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a record from `(name, value)` entries. A repeated name keeps its
    /// last value.
    pub fn from_entries<I, K, V>(entries: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
    {
        let fields = entries
            .into_iter()
            .map(|(k, v)| (k.into(), Value::String(v.into())))
            .collect();
        Self { fields }
    }

    /// Set a field, replacing any previous value.
    pub fn set(&mut self, name: impl Into<String>, value: impl Into<String>) {
        self.fields.insert(name.into(), Value::String(value.into()));
    }

    /// Builder-style [`Record::set`].
    #[must_use]
    pub fn with(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.set(name, value);
        self
    }

    /// Get a text field by name. A field holding any other JSON value reads
    /// as absent.
    #[must_use]
    pub fn get(&self, name: &str) -> Option<&str> {
        self.fields.get(name).and_then(Value::as_str)
    }

    /// Get the raw value of a field.
    #[must_use]
    pub fn value(&self, name: &str) -> Option<&Value> {
        self.fields.get(name)
    }

    /// The `nombre` field.
    #[must_use]
    pub fn nombre(&self) -> Option<&str> {
        self.get(NOMBRE)
    }

    /// The `email` field.
    #[must_use]
    pub fn email(&self) -> Option<&str> {
        self.get(EMAIL)
    }

    /// The `interes` field.
    #[must_use]
    pub fn interes(&self) -> Option<&str> {
        self.get(INTERES)
    }

    /// The `mensaje` field.
    #[must_use]
    pub fn mensaje(&self) -> Option<&str> {
        self.get(MENSAJE)
    }

    /// Fields that are not one of [`KNOWN_FIELDS`].
    pub fn extra_fields(&self) -> impl Iterator<Item = (&str, &Value)> {
        self.fields()
            .filter(|(k, _)| !KNOWN_FIELDS.contains(k))
    }

    /// All fields in name order.
    pub fn fields(&self) -> impl Iterator<Item = (&str, &Value)> {
        self.fields.iter().map(|(k, v)| (k.as_str(), v))
    }

    /// Number of fields present.
    #[must_use]
    pub fn len(&self) -> usize {
        self.fields.len()
    }

    /// Check if the record carries no fields at all.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }
}

/// Distinct `interes` values in first-seen order, skipping absent and empty.
#[must_use]
pub fn distinct_interests(records: &[Record]) -> Vec<String> {
    let mut seen: Vec<String> = Vec::new();
    for value in records.iter().filter_map(Record::interes) {
        if !value.is_empty() && !seen.iter().any(|s| s == value) {
            seen.push(value.to_string());
        }
    }
    seen
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_known_accessors() {
        let record = Record::new()
            .with(NOMBRE, "Ana")
            .with(EMAIL, "ana@example.com")
            .with(INTERES, "retiros")
            .with(MENSAJE, "Hola");

        assert_eq!(record.nombre(), Some("Ana"));
        assert_eq!(record.email(), Some("ana@example.com"));
        assert_eq!(record.interes(), Some("retiros"));
        assert_eq!(record.mensaje(), Some("Hola"));
    }

    #[test]
    fn test_missing_fields_are_absent() {
        let record = Record::new().with(NOMBRE, "Bob");
        assert!(record.interes().is_none());
        assert!(record.mensaje().is_none());
    }

    #[test]
    fn test_from_entries_last_value_wins() {
        let record = Record::from_entries([("nombre", "first"), ("nombre", "second")]);
        assert_eq!(record.nombre(), Some("second"));
        assert_eq!(record.len(), 1);
    }

    #[test]
    fn test_extra_fields_preserved() {
        let record = Record::from_entries([("nombre", "Ana"), ("telefono", "555-0100")]);
        let extras: Vec<_> = record.extra_fields().collect();
        assert_eq!(extras, vec![("telefono", &Value::from("555-0100"))]);
    }

    #[test]
    fn test_serializes_as_flat_object() {
        let record = Record::from_entries([("nombre", "Ana"), ("telefono", "1")]);
        let json = serde_json::to_value(&record).unwrap();
        assert_eq!(json, serde_json::json!({"nombre": "Ana", "telefono": "1"}));
    }

    #[test]
    fn test_deserializes_unknown_fields() {
        let record: Record =
            serde_json::from_str(r#"{"nombre":"Al","origen":"web"}"#).unwrap();
        assert_eq!(record.nombre(), Some("Al"));
        assert_eq!(record.get("origen"), Some("web"));
    }

    #[test]
    fn test_non_text_values_pass_through() {
        let raw = r#"{"nombre":"Ana","edad":30,"activo":true,"tags":["a"]}"#;
        let record: Record = serde_json::from_str(raw).unwrap();

        assert_eq!(record.nombre(), Some("Ana"));
        assert_eq!(record.value("edad"), Some(&serde_json::json!(30)));
        assert!(record.get("edad").is_none());
        assert_eq!(
            serde_json::to_value(&record).unwrap(),
            serde_json::from_str::<Value>(raw).unwrap()
        );
    }

    #[test]
    fn test_non_text_known_field_reads_as_absent() {
        let record: Record = serde_json::from_str(r#"{"nombre":1,"interes":null}"#).unwrap();
        assert!(record.nombre().is_none());
        assert!(record.interes().is_none());
        assert_eq!(record.len(), 2);
    }

    #[test]
    fn test_empty_record() {
        let record = Record::new();
        assert!(record.is_empty());
        assert_eq!(record.fields().count(), 0);
    }

    #[test]
    fn test_distinct_interests() {
        let records = vec![
            Record::new().with(INTERES, "misa"),
            Record::new().with(INTERES, "retiros"),
            Record::new(),
            Record::new().with(INTERES, ""),
            Record::new().with(INTERES, "misa"),
        ];
        assert_eq!(distinct_interests(&records), vec!["misa", "retiros"]);
    }
}
