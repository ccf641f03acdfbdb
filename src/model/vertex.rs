//! Vertex in the property graph, and cardinality-aware property access.

use std::collections::HashMap;

use serde::Serialize;

use super::{GenericValue, VertexPropertyMap};
use super::value::tag;
use crate::{Error, Result};

/// Separator joining several logical labels in one vertex label.
pub const LABEL_SEPARATOR: &str = "::";

/// A decoded `g:Vertex`.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Vertex {
    pub id: GenericValue,
    pub label: String,
    /// Property occurrences keyed by property name, in wire order.
    pub properties: VertexPropertyMap,
}

/// One occurrence of a named property on a vertex (`g:VertexProperty`).
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct VertexProperty {
    pub id: GenericValue,
    pub label: String,
    pub value: GenericValue,
}

impl VertexProperty {
    pub fn new(id: impl Into<GenericValue>, label: impl Into<String>, value: impl Into<GenericValue>) -> Self {
        Self { id: id.into(), label: label.into(), value: value.into() }
    }

    fn string_value(&self) -> Result<String> {
        self.value.to_scalar_string().ok_or_else(|| Error::TypeCoercion {
            label: self.label.clone(),
            expected: "scalar",
            actual: self.value.tag().to_owned(),
        })
    }
}

impl Vertex {
    pub fn new(id: impl Into<GenericValue>, label: impl Into<String>) -> Self {
        Self { id: id.into(), label: label.into(), properties: VertexPropertyMap::new() }
    }

    /// Append an occurrence under `key`. The occurrence keeps its own label,
    /// which differs from `key` for meta-properties.
    pub fn with_property(mut self, key: impl Into<String>, property: VertexProperty) -> Self {
        self.properties.entry(key.into()).or_default().push(property);
        self
    }

    /// The logical labels packed into `label`, split on `::`.
    pub fn labels(&self) -> Vec<&str> {
        self.label.split(LABEL_SEPARATOR).collect()
    }

    pub fn has_label(&self, label: &str) -> bool {
        self.labels().contains(&label)
    }

    fn occurrences(&self, name: &str) -> Result<&[VertexProperty]> {
        match self.properties.get(name) {
            Some(props) if !props.is_empty() => Ok(props),
            _ => Err(Error::PropertyNotFound(name.to_owned())),
        }
    }

    /// Raw values of every occurrence of `name`.
    pub fn property_values(&self, name: &str) -> Result<Vec<&GenericValue>> {
        Ok(self.occurrences(name)?.iter().map(|p| &p.value).collect())
    }

    /// The value of a single-cardinality property, as a string.
    ///
    /// Fails with `PropertyNotFound` when `name` has no occurrences and
    /// `PropertyIsMulti` when it has more than one, whatever their labels.
    pub fn get_property(&self, name: &str) -> Result<String> {
        match self.occurrences(name)? {
            [only] => only.string_value(),
            many => Err(Error::PropertyIsMulti { label: name.to_owned(), count: many.len() }),
        }
    }

    /// Every occurrence of `name` as a string, in wire order.
    pub fn get_multi_property(&self, name: &str) -> Result<Vec<String>> {
        self.occurrences(name)?.iter().map(VertexProperty::string_value).collect()
    }

    /// Occurrences of `name` grouped by their own label.
    ///
    /// Occurrences sharing a sub-label are grouped together, so a
    /// meta-property whose sub-labels collide reads the same as a plain
    /// multi-property.
    pub fn get_meta_property(&self, name: &str) -> Result<HashMap<String, Vec<String>>> {
        let mut meta: HashMap<String, Vec<String>> = HashMap::new();
        for prop in self.occurrences(name)? {
            meta.entry(prop.label.clone()).or_default().push(prop.string_value()?);
        }
        Ok(meta)
    }

    pub fn get_multi_property_i32(&self, name: &str) -> Result<Vec<i32>> {
        self.typed_values(name, tag::INT32, GenericValue::as_i32)
    }

    pub fn get_multi_property_i64(&self, name: &str) -> Result<Vec<i64>> {
        self.typed_values(name, tag::INT64, GenericValue::as_i64)
    }

    pub fn get_multi_property_bool(&self, name: &str) -> Result<Vec<bool>> {
        self.typed_values(name, tag::BOOL, GenericValue::as_bool)
    }

    /// Accepts both `g:Double` and `g:Float` occurrences.
    pub fn get_multi_property_f64(&self, name: &str) -> Result<Vec<f64>> {
        self.typed_values(name, tag::DOUBLE, GenericValue::as_f64)
    }

    fn typed_values<T>(
        &self,
        name: &str,
        expected: &'static str,
        extract: impl Fn(&GenericValue) -> Option<T>,
    ) -> Result<Vec<T>> {
        self.occurrences(name)?
            .iter()
            .map(|prop| {
                extract(&prop.value).ok_or_else(|| Error::TypeCoercion {
                    label: name.to_owned(),
                    expected,
                    actual: prop.value.tag().to_owned(),
                })
            })
            .collect()
    }
}
