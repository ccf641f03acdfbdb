//! Generic value decoding — recursive dispatch on the envelope tag.

use serde_json::{Number, Value};

use super::Decoder;
use super::envelope::{Envelope, json_kind};
use crate::model::{GenericValue, tag};
use crate::{Error, Result};

impl Decoder {
    /// Decode any JSON value: an envelope, a bare scalar, or `null`.
    pub(crate) fn value(&self, raw: &Value, cx: &str) -> Result<GenericValue> {
        match raw {
            Value::Null => Ok(GenericValue::Null),
            Value::Bool(b) => Ok(GenericValue::Bool(*b)),
            Value::String(s) => Ok(GenericValue::String(s.clone())),
            Value::Number(n) => Ok(GenericValue::Double(number_as_f64(n))),
            Value::Array(_) => Err(Error::malformed(cx, "bare JSON array where an envelope was expected")),
            Value::Object(_) => {
                let env = self.envelope(raw, cx)?;
                self.value_from_envelope(&env, cx)
            }
        }
    }

    pub(crate) fn envelope<'a>(&self, raw: &'a Value, cx: &str) -> Result<Envelope<'a>> {
        Envelope::parse(raw, cx, self.config.deny_unknown_fields)
    }

    pub(crate) fn value_from_envelope(&self, env: &Envelope<'_>, cx: &str) -> Result<GenericValue> {
        match env.tag {
            tag::LIST => Ok(GenericValue::List(self.values(env.payload_array(cx)?, cx)?)),
            tag::SET => Ok(GenericValue::Set(self.values(env.payload_array(cx)?, cx)?)),
            tag::MAP => Ok(GenericValue::Map(self.pairs(env, cx)?)),
            tag::INT32 => {
                let wide = self.integer(env, i64::from(i32::MIN), i64::from(i32::MAX), cx)?;
                Ok(GenericValue::Int32(wide as i32))
            }
            tag::INT64 => Ok(GenericValue::Int64(self.integer(env, i64::MIN, i64::MAX, cx)?)),
            tag::FLOAT => Ok(GenericValue::Float(self.floating(env, cx)? as f32)),
            tag::DOUBLE => Ok(GenericValue::Double(self.floating(env, cx)?)),
            tag::STRING => match env.payload {
                Value::String(s) => Ok(GenericValue::String(s.clone())),
                other => Err(shape_error(env.tag, "a string", other, cx)),
            },
            tag::BOOL => match env.payload {
                Value::Bool(b) => Ok(GenericValue::Bool(*b)),
                other => Err(shape_error(env.tag, "a boolean", other, cx)),
            },
            tag::VERTEX => Ok(GenericValue::Vertex(Box::new(self.vertex_payload(env.payload, cx)?))),
            tag::EDGE => Ok(GenericValue::Edge(Box::new(self.edge_payload(env.payload, cx)?))),
            tag::VERTEX_PROPERTY => Ok(GenericValue::VertexProperty(Box::new(
                self.vertex_property_payload(env.payload, cx)?,
            ))),
            tag::PROPERTY => Ok(GenericValue::Property(Box::new(self.edge_property_payload(env.payload, cx)?))),
            other => {
                tracing::trace!(context = cx, tag = other, "passing through unrecognized tag");
                Ok(GenericValue::Unknown { tag: other.to_owned(), payload: env.payload.clone() })
            }
        }
    }

    pub(crate) fn values(&self, items: &[Value], cx: &str) -> Result<Vec<GenericValue>> {
        items.iter().map(|item| self.value(item, cx)).collect()
    }

    /// `g:Map` payload: alternating keys and values.
    pub(crate) fn pairs(&self, env: &Envelope<'_>, cx: &str) -> Result<Vec<(String, GenericValue)>> {
        let items = env.payload_array(cx)?;
        if items.len() % 2 != 0 {
            return Err(Error::OddPairCount { context: cx.to_owned(), count: items.len() });
        }
        items
            .chunks_exact(2)
            .map(|pair| {
                let key = match self.value(&pair[0], cx)? {
                    GenericValue::String(key) => key,
                    other => {
                        return Err(Error::malformed(
                            cx,
                            format!("g:Map key must be a string, got {}", other.tag()),
                        ));
                    }
                };
                Ok((key, self.value(&pair[1], cx)?))
            })
            .collect()
    }

    /// Narrow a numeric payload to an integer in `min..=max`.
    ///
    /// With `exact_integers` off, fractions truncate and out-of-range values
    /// wrap at the caller's width.
    fn integer(&self, env: &Envelope<'_>, min: i64, max: i64, cx: &str) -> Result<i64> {
        let Value::Number(n) = env.payload else {
            return Err(shape_error(env.tag, "a number", env.payload, cx));
        };
        let exact = self.config.exact_integers;
        if let Some(i) = n.as_i64() {
            if exact && !(min..=max).contains(&i) {
                return Err(out_of_range(env.tag, n, cx));
            }
            return Ok(i);
        }
        let f = number_as_f64(n);
        // `-min` is one past `max` for two's complement widths.
        if exact && (f.fract() != 0.0 || f < min as f64 || f >= -(min as f64)) {
            return Err(out_of_range(env.tag, n, cx));
        }
        Ok(f as i64)
    }

    fn floating(&self, env: &Envelope<'_>, cx: &str) -> Result<f64> {
        match env.payload {
            Value::Number(n) => Ok(number_as_f64(n)),
            Value::String(s) => match s.as_str() {
                "NaN" => Ok(f64::NAN),
                "Infinity" => Ok(f64::INFINITY),
                "-Infinity" => Ok(f64::NEG_INFINITY),
                _ => Err(Error::malformed(cx, format!("{} payload {s:?} is not a number", env.tag))),
            },
            other => Err(shape_error(env.tag, "a number", other, cx)),
        }
    }
}

fn number_as_f64(n: &Number) -> f64 {
    // Only `arbitrary_precision` numbers lack an f64 view.
    n.as_f64().unwrap_or(f64::NAN)
}

fn shape_error(tag: &str, expected: &str, got: &Value, cx: &str) -> Error {
    Error::malformed(cx, format!("{tag} payload must be {expected}, got {}", json_kind(got)))
}

fn out_of_range(tag: &str, n: &Number, cx: &str) -> Error {
    Error::malformed(cx, format!("{tag} payload {n} is not an integer of that width"))
}
