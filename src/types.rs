use indexmap::IndexMap;
use serde::de::{self, Deserialize, Deserializer, Visitor};
use serde::ser::{Serialize, Serializer};
use std::fmt;

//==============================================================================
// Cell Values
//==============================================================================

/// Largest integer an f64 holds exactly (2^53).
const MAX_EXACT_INTEGER: f64 = 9_007_199_254_740_992.0;

/// A single cell value as reported by the host
#[derive(Debug, Clone, Default, PartialEq)]
pub enum CellValue {
    /// Text cell
    Text(String),
    /// Numeric cell (integers, floats and date serials)
    Number(f64),
    /// Boolean cell
    Boolean(bool),
    /// Blank cell
    #[default]
    Empty,
}

impl CellValue {
    /// Text form used when the value labels a record field.
    pub fn to_label(&self) -> String {
        self.to_string()
    }
}

impl fmt::Display for CellValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CellValue::Text(s) => f.write_str(s),
            CellValue::Number(n) => write!(f, "{}", n),
            CellValue::Boolean(b) => write!(f, "{}", b),
            CellValue::Empty => Ok(()),
        }
    }
}

impl From<&str> for CellValue {
    fn from(s: &str) -> Self {
        CellValue::Text(s.to_string())
    }
}

impl From<String> for CellValue {
    fn from(s: String) -> Self {
        CellValue::Text(s)
    }
}

impl From<f64> for CellValue {
    fn from(n: f64) -> Self {
        CellValue::Number(n)
    }
}

impl From<i64> for CellValue {
    fn from(n: i64) -> Self {
        CellValue::Number(n as f64)
    }
}

impl From<bool> for CellValue {
    fn from(b: bool) -> Self {
        CellValue::Boolean(b)
    }
}

impl Serialize for CellValue {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            CellValue::Text(s) => serializer.serialize_str(s),
            CellValue::Number(n) => {
                // Whole numbers go out as integers (30, not 30.0)
                if n.is_finite() && n.fract() == 0.0 && n.abs() <= MAX_EXACT_INTEGER {
                    serializer.serialize_i64(*n as i64)
                } else {
                    serializer.serialize_f64(*n)
                }
            }
            CellValue::Boolean(b) => serializer.serialize_bool(*b),
            // Hosts report blank cells as empty strings
            CellValue::Empty => serializer.serialize_str(""),
        }
    }
}

struct CellValueVisitor;

impl<'de> Visitor<'de> for CellValueVisitor {
    type Value = CellValue;

    fn expecting(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_str("a string, number, boolean or null")
    }

    fn visit_bool<E: de::Error>(self, v: bool) -> Result<CellValue, E> {
        Ok(CellValue::Boolean(v))
    }

    fn visit_i64<E: de::Error>(self, v: i64) -> Result<CellValue, E> {
        Ok(CellValue::Number(v as f64))
    }

    fn visit_u64<E: de::Error>(self, v: u64) -> Result<CellValue, E> {
        Ok(CellValue::Number(v as f64))
    }

    fn visit_f64<E: de::Error>(self, v: f64) -> Result<CellValue, E> {
        Ok(CellValue::Number(v))
    }

    fn visit_str<E: de::Error>(self, v: &str) -> Result<CellValue, E> {
        if v.is_empty() {
            Ok(CellValue::Empty)
        } else {
            Ok(CellValue::Text(v.to_string()))
        }
    }

    fn visit_unit<E: de::Error>(self) -> Result<CellValue, E> {
        Ok(CellValue::Empty)
    }

    fn visit_none<E: de::Error>(self) -> Result<CellValue, E> {
        Ok(CellValue::Empty)
    }
}

impl<'de> Deserialize<'de> for CellValue {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        deserializer.deserialize_any(CellValueVisitor)
    }
}

//==============================================================================
// Records
//==============================================================================

/// One output row: header label → cell value, in header order.
///
/// Inserting a label that is already present replaces its value but keeps
/// the label at the position where it first appeared.
#[derive(Debug, Clone, Default, serde::Serialize)]
#[serde(transparent)]
pub struct Record {
    fields: IndexMap<String, CellValue>,
}

impl Record {
    pub fn new() -> Self {
        Self::default()
    }

    /// Set `label` to `value`, returning the value it replaced
    pub fn insert(&mut self, label: impl Into<String>, value: CellValue) -> Option<CellValue> {
        self.fields.insert(label.into(), value)
    }

    pub fn get(&self, label: &str) -> Option<&CellValue> {
        self.fields.get(label)
    }

    pub fn len(&self) -> usize {
        self.fields.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    pub fn labels(&self) -> impl Iterator<Item = &str> {
        self.fields.keys().map(String::as_str)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &CellValue)> {
        self.fields.iter().map(|(k, v)| (k.as_str(), v))
    }
}

// Field order is part of a record's identity
impl PartialEq for Record {
    fn eq(&self, other: &Self) -> bool {
        self.fields.iter().eq(other.fields.iter())
    }
}

impl<K: Into<String>> FromIterator<(K, CellValue)> for Record {
    fn from_iter<I: IntoIterator<Item = (K, CellValue)>>(iter: I) -> Self {
        let iter = iter.into_iter();
        let mut record = Record {
            fields: IndexMap::with_capacity(iter.size_hint().0),
        };
        for (label, value) in iter {
            record.insert(label, value);
        }
        record
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_labels_follow_host_text_form() {
        assert_eq!(CellValue::from("Name").to_label(), "Name");
        assert_eq!(CellValue::Number(30.0).to_label(), "30");
        assert_eq!(CellValue::Number(1.5).to_label(), "1.5");
        assert_eq!(CellValue::Boolean(true).to_label(), "true");
        assert_eq!(CellValue::Empty.to_label(), "");
    }

    #[test]
    fn test_whole_numbers_serialize_as_integers() {
        assert_eq!(serde_json::to_string(&CellValue::Number(30.0)).unwrap(), "30");
        assert_eq!(serde_json::to_string(&CellValue::Number(2.25)).unwrap(), "2.25");
        assert_eq!(serde_json::to_string(&CellValue::Empty).unwrap(), "\"\"");
    }

    #[test]
    fn test_deserialize_blank_forms() {
        let values: Vec<CellValue> = serde_json::from_str(r#"["", null, "x", 4, true]"#).unwrap();
        assert_eq!(
            values,
            vec![
                CellValue::Empty,
                CellValue::Empty,
                CellValue::from("x"),
                CellValue::Number(4.0),
                CellValue::Boolean(true),
            ]
        );
    }

    #[test]
    fn test_record_overwrite_keeps_first_position() {
        let mut record = Record::new();
        assert!(record.insert("a", CellValue::from(1)).is_none());
        record.insert("b", CellValue::from(2));
        let previous = record.insert("a", CellValue::from(3));

        assert_eq!(previous, Some(CellValue::Number(1.0)));
        assert_eq!(record.labels().collect::<Vec<_>>(), vec!["a", "b"]);
        assert_eq!(record.get("a"), Some(&CellValue::Number(3.0)));
        assert_eq!(record.len(), 2);
    }

    #[test]
    fn test_record_serializes_in_header_order() {
        let record: Record = vec![
            ("Zeta", CellValue::from("z")),
            ("Alpha", CellValue::from(1)),
        ]
        .into_iter()
        .collect();

        let json = serde_json::to_string(&record).unwrap();
        assert_eq!(json, r#"{"Zeta":"z","Alpha":1}"#);
    }

    #[test]
    fn test_record_equality_is_order_sensitive() {
        let ab: Record = vec![("a", CellValue::from(1)), ("b", CellValue::from(2))]
            .into_iter()
            .collect();
        let ba: Record = vec![("b", CellValue::from(2)), ("a", CellValue::from(1))]
            .into_iter()
            .collect();
        assert_ne!(ab, ba);
        assert_eq!(ab, ab.clone());
    }
}
