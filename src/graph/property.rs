//! Attribute value types for graph nodes and edges
//!
//! Attributes are flat scalars; nested values are rejected at load time.

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Scalar attribute value
///
/// Supports:
/// - String
/// - Integer (i64)
/// - Float (f64)
/// - Boolean
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum PropertyValue {
    Boolean(bool),
    Integer(i64),
    Float(f64),
    String(String),
}

impl fmt::Display for PropertyValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PropertyValue::String(s) => write!(f, "{}", s),
            PropertyValue::Integer(i) => write!(f, "{}", i),
            PropertyValue::Float(fl) => write!(f, "{}", fl),
            PropertyValue::Boolean(b) => write!(f, "{}", b),
        }
    }
}

// Convenience conversions
impl From<String> for PropertyValue {
    fn from(s: String) -> Self {
        PropertyValue::String(s)
    }
}

impl From<&str> for PropertyValue {
    fn from(s: &str) -> Self {
        PropertyValue::String(s.to_string())
    }
}

impl From<i64> for PropertyValue {
    fn from(i: i64) -> Self {
        PropertyValue::Integer(i)
    }
}

impl From<i32> for PropertyValue {
    fn from(i: i32) -> Self {
        PropertyValue::Integer(i as i64)
    }
}

impl From<f64> for PropertyValue {
    fn from(f: f64) -> Self {
        PropertyValue::Float(f)
    }
}

impl From<bool> for PropertyValue {
    fn from(b: bool) -> Self {
        PropertyValue::Boolean(b)
    }
}

/// Insertion-ordered attribute map for nodes, edges and graphs
pub type PropertyMap = IndexMap<String, PropertyValue>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_property_value_conversions() {
        assert_eq!(PropertyValue::from("hello"), PropertyValue::String("hello".to_string()));
        assert_eq!(PropertyValue::from(42i64), PropertyValue::Integer(42));
        assert_eq!(PropertyValue::from(42i32), PropertyValue::Integer(42));
        assert_eq!(PropertyValue::from(2.5), PropertyValue::Float(2.5));
        assert_eq!(PropertyValue::from(true), PropertyValue::Boolean(true));
    }

    #[test]
    fn test_property_value_display() {
        assert_eq!(PropertyValue::from("Tekken").to_string(), "Tekken");
        assert_eq!(PropertyValue::Integer(1994).to_string(), "1994");
        assert_eq!(PropertyValue::Float(2.5).to_string(), "2.5");
        assert_eq!(PropertyValue::Boolean(false).to_string(), "false");
    }

    #[test]
    fn test_property_map_keeps_order() {
        let mut props = PropertyMap::new();
        props.insert("title".to_string(), "Virtua Fighter".into());
        props.insert("year".to_string(), 1993i64.into());
        props.insert("arcade".to_string(), true.into());

        let keys: Vec<_> = props.keys().map(String::as_str).collect();
        assert_eq!(keys, vec!["title", "year", "arcade"]);
        assert_eq!(props.get("year"), Some(&PropertyValue::Integer(1993)));
    }

    #[test]
    fn test_untagged_json() {
        let json = serde_json::to_string(&PropertyValue::Integer(7)).unwrap();
        assert_eq!(json, "7");
        let back: PropertyValue = serde_json::from_str("\"x\"").unwrap();
        assert_eq!(back, PropertyValue::String("x".to_string()));
        let float: PropertyValue = serde_json::from_str("1.5").unwrap();
        assert_eq!(float, PropertyValue::Float(1.5));
    }
}
