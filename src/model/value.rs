//! Generic value type covering the GraphSON tag families.

use std::fmt;

use serde::ser::{SerializeMap, SerializeSeq};
use serde::{Serialize, Serializer};

use super::{Edge, EdgeProperty, Vertex, VertexProperty};

/// Wire tags understood by the decoder.
pub mod tag {
    pub const LIST: &str = "g:List";
    pub const SET: &str = "g:Set";
    pub const MAP: &str = "g:Map";
    pub const VERTEX: &str = "g:Vertex";
    pub const EDGE: &str = "g:Edge";
    pub const VERTEX_PROPERTY: &str = "g:VertexProperty";
    pub const PROPERTY: &str = "g:Property";
    pub const INT32: &str = "g:Int32";
    pub const INT64: &str = "g:Int64";
    pub const FLOAT: &str = "g:Float";
    pub const DOUBLE: &str = "g:Double";
    pub const BOOL: &str = "g:Bool";
    pub const STRING: &str = "g:String";
    /// Not a wire tag: reported for JSON `null`.
    pub const NULL: &str = "null";
}

/// A decoded GraphSON value.
///
/// One variant per tag family. Strings and booleans arrive either bare or
/// enveloped; both decode to the same variant. A bare JSON number has no
/// declared width and decodes as `Double`.
#[derive(Debug, Clone, PartialEq)]
pub enum GenericValue {
    Null,
    Bool(bool),
    Int32(i32),
    Int64(i64),
    Float(f32),
    Double(f64),
    String(String),
    List(Vec<GenericValue>),
    Set(Vec<GenericValue>),
    /// `g:Map` pairs in wire order. Duplicate keys are kept.
    Map(Vec<(String, GenericValue)>),

    // Graph types
    Vertex(Box<Vertex>),
    Edge(Box<Edge>),
    VertexProperty(Box<VertexProperty>),
    Property(Box<EdgeProperty>),

    /// A tag this crate does not interpret, with its payload untouched.
    Unknown { tag: String, payload: serde_json::Value },
}

// ============================================================================
// Type checking
// ============================================================================

impl GenericValue {
    /// The wire tag this value was declared with.
    pub fn tag(&self) -> &str {
        match self {
            GenericValue::Null => tag::NULL,
            GenericValue::Bool(_) => tag::BOOL,
            GenericValue::Int32(_) => tag::INT32,
            GenericValue::Int64(_) => tag::INT64,
            GenericValue::Float(_) => tag::FLOAT,
            GenericValue::Double(_) => tag::DOUBLE,
            GenericValue::String(_) => tag::STRING,
            GenericValue::List(_) => tag::LIST,
            GenericValue::Set(_) => tag::SET,
            GenericValue::Map(_) => tag::MAP,
            GenericValue::Vertex(_) => tag::VERTEX,
            GenericValue::Edge(_) => tag::EDGE,
            GenericValue::VertexProperty(_) => tag::VERTEX_PROPERTY,
            GenericValue::Property(_) => tag::PROPERTY,
            GenericValue::Unknown { tag, .. } => tag,
        }
    }

    pub fn is_null(&self) -> bool { matches!(self, GenericValue::Null) }

    pub fn as_bool(&self) -> Option<bool> {
        match self {
            GenericValue::Bool(b) => Some(*b),
            _ => None,
        }
    }

    /// Only a value declared `g:Int32` qualifies.
    pub fn as_i32(&self) -> Option<i32> {
        match self {
            GenericValue::Int32(i) => Some(*i),
            _ => None,
        }
    }

    /// Only a value declared `g:Int64` qualifies.
    pub fn as_i64(&self) -> Option<i64> {
        match self {
            GenericValue::Int64(i) => Some(*i),
            _ => None,
        }
    }

    pub fn as_f64(&self) -> Option<f64> {
        match self {
            GenericValue::Double(f) => Some(*f),
            GenericValue::Float(f) => Some(f64::from(*f)),
            _ => None,
        }
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            GenericValue::String(s) => Some(s),
            _ => None,
        }
    }

    /// Elements of a `g:List` or `g:Set`.
    pub fn as_list(&self) -> Option<&[GenericValue]> {
        match self {
            GenericValue::List(items) | GenericValue::Set(items) => Some(items),
            _ => None,
        }
    }

    /// Looks up the last pair with `key` in a `g:Map`.
    pub fn map_get(&self, key: &str) -> Option<&GenericValue> {
        match self {
            GenericValue::Map(pairs) => pairs.iter().rev().find(|(k, _)| k == key).map(|(_, v)| v),
            _ => None,
        }
    }

    /// Text form of a scalar. `None` for null, collections and entities.
    pub fn to_scalar_string(&self) -> Option<String> {
        match self {
            GenericValue::Bool(b) => Some(b.to_string()),
            GenericValue::Int32(i) => Some(i.to_string()),
            GenericValue::Int64(i) => Some(i.to_string()),
            GenericValue::Float(f) => Some(f.to_string()),
            GenericValue::Double(f) => Some(f.to_string()),
            GenericValue::String(s) => Some(s.clone()),
            GenericValue::Null
            | GenericValue::List(_)
            | GenericValue::Set(_)
            | GenericValue::Map(_)
            | GenericValue::Vertex(_)
            | GenericValue::Edge(_)
            | GenericValue::VertexProperty(_)
            | GenericValue::Property(_)
            | GenericValue::Unknown { .. } => None,
        }
    }
}

// ============================================================================
// Conversions (From impls)
// ============================================================================

impl From<bool> for GenericValue { fn from(v: bool) -> Self { GenericValue::Bool(v) } }
impl From<i32> for GenericValue { fn from(v: i32) -> Self { GenericValue::Int32(v) } }
impl From<i64> for GenericValue { fn from(v: i64) -> Self { GenericValue::Int64(v) } }
impl From<f64> for GenericValue { fn from(v: f64) -> Self { GenericValue::Double(v) } }
impl From<String> for GenericValue { fn from(v: String) -> Self { GenericValue::String(v) } }
impl From<&str> for GenericValue { fn from(v: &str) -> Self { GenericValue::String(v.to_owned()) } }
impl<T: Into<GenericValue>> From<Vec<T>> for GenericValue {
    fn from(v: Vec<T>) -> Self { GenericValue::List(v.into_iter().map(Into::into).collect()) }
}
impl<T: Into<GenericValue>> From<Option<T>> for GenericValue {
    fn from(v: Option<T>) -> Self { v.map(Into::into).unwrap_or(GenericValue::Null) }
}

// ============================================================================
// Display
// ============================================================================

impl fmt::Display for GenericValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            GenericValue::Null => write!(f, "null"),
            GenericValue::Bool(b) => write!(f, "{b}"),
            GenericValue::Int32(i) => write!(f, "{i}"),
            GenericValue::Int64(i) => write!(f, "{i}"),
            GenericValue::Float(v) => write!(f, "{v}"),
            GenericValue::Double(v) => write!(f, "{v}"),
            GenericValue::String(s) => write!(f, "\"{}\"", s.replace('"', "\\\"")),
            GenericValue::List(items) | GenericValue::Set(items) => {
                write!(f, "[")?;
                for (i, v) in items.iter().enumerate() {
                    if i > 0 { write!(f, ", ")?; }
                    write!(f, "{v}")?;
                }
                write!(f, "]")
            }
            GenericValue::Map(pairs) => {
                write!(f, "{{")?;
                for (i, (k, v)) in pairs.iter().enumerate() {
                    if i > 0 { write!(f, ", ")?; }
                    write!(f, "{k}: {v}")?;
                }
                write!(f, "}}")
            }
            GenericValue::Vertex(v) => write!(f, "v[{}]", v.id),
            GenericValue::Edge(e) => write!(f, "e[{}][{}-{}->{}]", e.id, e.out_v, e.label, e.in_v),
            GenericValue::VertexProperty(p) => write!(f, "vp[{}->{}]", p.label, p.value),
            GenericValue::Property(p) => write!(f, "p[{}->{}]", p.key, p.value),
            GenericValue::Unknown { tag, payload } => write!(f, "{tag}({payload})"),
        }
    }
}

// ============================================================================
// Serialize (plain JSON, no envelopes)
// ============================================================================

impl Serialize for GenericValue {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        match self {
            GenericValue::Null => serializer.serialize_unit(),
            GenericValue::Bool(b) => serializer.serialize_bool(*b),
            GenericValue::Int32(i) => serializer.serialize_i32(*i),
            GenericValue::Int64(i) => serializer.serialize_i64(*i),
            GenericValue::Float(v) => serializer.serialize_f32(*v),
            GenericValue::Double(v) => serializer.serialize_f64(*v),
            GenericValue::String(s) => serializer.serialize_str(s),
            GenericValue::List(items) | GenericValue::Set(items) => {
                let mut seq = serializer.serialize_seq(Some(items.len()))?;
                for item in items {
                    seq.serialize_element(item)?;
                }
                seq.end()
            }
            GenericValue::Map(pairs) => {
                let mut map = serializer.serialize_map(Some(pairs.len()))?;
                for (k, v) in pairs {
                    map.serialize_entry(k, v)?;
                }
                map.end()
            }
            GenericValue::Vertex(v) => v.serialize(serializer),
            GenericValue::Edge(e) => e.serialize(serializer),
            GenericValue::VertexProperty(p) => p.serialize(serializer),
            GenericValue::Property(p) => p.serialize(serializer),
            GenericValue::Unknown { payload, .. } => payload.serialize(serializer),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_value_from() {
        assert_eq!(GenericValue::from("hello"), GenericValue::String("hello".into()));
        assert_eq!(GenericValue::from(42), GenericValue::Int32(42));
        assert_eq!(GenericValue::from(42_i64), GenericValue::Int64(42));
        assert_eq!(GenericValue::from(true), GenericValue::Bool(true));
        assert_eq!(GenericValue::from(None::<i32>), GenericValue::Null);
    }

    #[test]
    fn test_tag_reports_declared_width() {
        assert_eq!(GenericValue::Int32(1).tag(), "g:Int32");
        assert_eq!(GenericValue::Int64(1).tag(), "g:Int64");
        assert_eq!(
            GenericValue::Unknown { tag: "g:UUID".into(), payload: serde_json::json!("x") }.tag(),
            "g:UUID"
        );
    }

    #[test]
    fn test_typed_accessors_do_not_widen() {
        assert_eq!(GenericValue::Int32(7).as_i64(), None);
        assert_eq!(GenericValue::Int64(7).as_i32(), None);
        assert_eq!(GenericValue::Float(1.5).as_f64(), Some(1.5));
    }

    #[test]
    fn test_scalar_string() {
        assert_eq!(GenericValue::Int32(1234).to_scalar_string().as_deref(), Some("1234"));
        assert_eq!(GenericValue::Bool(true).to_scalar_string().as_deref(), Some("true"));
        assert_eq!(GenericValue::Null.to_scalar_string(), None);
        assert_eq!(GenericValue::List(vec![]).to_scalar_string(), None);
    }

    #[test]
    fn test_map_get_last_write_wins() {
        let map = GenericValue::Map(vec![
            ("k".into(), GenericValue::from(1)),
            ("k".into(), GenericValue::from(2)),
        ]);
        assert_eq!(map.map_get("k"), Some(&GenericValue::Int32(2)));
        assert_eq!(map.map_get("missing"), None);
    }

    #[test]
    fn test_serialize_plain_json() {
        let value = GenericValue::Map(vec![
            ("name".into(), GenericValue::from("Ada")),
            ("tags".into(), GenericValue::from(vec![1_i64, 2])),
        ]);
        let json = serde_json::to_value(&value).unwrap();
        assert_eq!(json, serde_json::json!({"name": "Ada", "tags": [1, 2]}));
    }
}
