//! The `{"@type": ..., "@value": ...}` envelope and strict field checks.

use serde_json::{Map, Value};

use crate::{Error, Result};

pub const TYPE_KEY: &str = "@type";
pub const VALUE_KEY: &str = "@value";

const ENVELOPE_FIELDS: &[&str] = &[TYPE_KEY, VALUE_KEY];

/// A tag and its payload, borrowed from parsed JSON.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Envelope<'a> {
    pub tag: &'a str,
    pub payload: &'a Value,
}

impl<'a> Envelope<'a> {
    /// Read an envelope out of a JSON object.
    ///
    /// With `strict`, any field besides `@type` and `@value` is rejected.
    pub fn parse(raw: &'a Value, cx: &str, strict: bool) -> Result<Self> {
        let Value::Object(obj) = raw else {
            return Err(Error::malformed(cx, format!("expected an envelope object, got {}", json_kind(raw))));
        };
        if strict {
            check_fields(obj, ENVELOPE_FIELDS, cx, "envelope")?;
        }
        let tag = match obj.get(TYPE_KEY) {
            Some(Value::String(tag)) if !tag.is_empty() => tag.as_str(),
            Some(Value::String(_)) => return Err(Error::malformed(cx, "envelope has an empty `@type`")),
            Some(other) => {
                return Err(Error::malformed(cx, format!("`@type` must be a string, got {}", json_kind(other))));
            }
            None => return Err(Error::malformed(cx, "envelope is missing `@type`")),
        };
        let payload = obj
            .get(VALUE_KEY)
            .ok_or_else(|| Error::malformed(cx, format!("{tag} envelope is missing `@value`")))?;
        Ok(Self { tag, payload })
    }

    /// Fail with `TagMismatch` unless this envelope carries `expected`.
    pub fn expect_tag(&self, expected: &'static str, cx: &str) -> Result<()> {
        if self.tag == expected {
            Ok(())
        } else {
            Err(Error::tag_mismatch(cx, expected, self.tag))
        }
    }

    /// The payload as an array, as `g:List`, `g:Set` and `g:Map` require.
    pub fn payload_array(&self, cx: &str) -> Result<&'a [Value]> {
        match self.payload {
            Value::Array(items) => Ok(items),
            other => Err(Error::malformed(
                cx,
                format!("{} payload must be an array, got {}", self.tag, json_kind(other)),
            )),
        }
    }
}

/// Reject any field of `obj` not in `allowed`.
pub(crate) fn check_fields(obj: &Map<String, Value>, allowed: &[&str], cx: &str, what: &str) -> Result<()> {
    match obj.keys().find(|key| !allowed.contains(&key.as_str())) {
        Some(unknown) => Err(Error::malformed(cx, format!("{what}: unknown field `{unknown}`"))),
        None => Ok(()),
    }
}

pub(crate) fn required<'a>(obj: &'a Map<String, Value>, field: &str, cx: &str, what: &str) -> Result<&'a Value> {
    obj.get(field)
        .ok_or_else(|| Error::malformed(cx, format!("{what}: missing field `{field}`")))
}

pub(crate) fn required_str<'a>(obj: &'a Map<String, Value>, field: &str, cx: &str, what: &str) -> Result<&'a str> {
    match required(obj, field, cx, what)? {
        Value::String(s) => Ok(s),
        other => Err(Error::malformed(
            cx,
            format!("{what}: field `{field}` must be a string, got {}", json_kind(other)),
        )),
    }
}

/// Parse a response buffer. Empty input and a JSON `null` both mean
/// "no result" and yield `None`.
pub(crate) fn parse_response(raw: &[u8], cx: &str) -> Result<Option<Value>> {
    if raw.trim_ascii().is_empty() {
        return Ok(None);
    }
    match serde_json::from_slice(raw) {
        Ok(Value::Null) => Ok(None),
        Ok(json) => Ok(Some(json)),
        Err(e) => Err(Error::malformed(cx, e.to_string())),
    }
}

pub(crate) fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_parse_envelope() {
        let raw = json!({"@type": "g:Int32", "@value": 7});
        let env = Envelope::parse(&raw, "test", true).unwrap();
        assert_eq!(env.tag, "g:Int32");
        assert_eq!(env.payload, &json!(7));
    }

    #[test]
    fn test_strict_rejects_extra_field() {
        let raw = json!({"@type": "g:Int32", "@value": 7, "extra": 1});
        let err = Envelope::parse(&raw, "test", true).unwrap_err();
        assert!(err.to_string().contains("unknown field `extra`"), "{err}");
        assert!(Envelope::parse(&raw, "test", false).is_ok());
    }

    #[test]
    fn test_missing_fields() {
        assert!(matches!(
            Envelope::parse(&json!({"@value": 1}), "test", true),
            Err(Error::MalformedEnvelope { .. })
        ));
        assert!(matches!(
            Envelope::parse(&json!({"@type": "g:Int32"}), "test", true),
            Err(Error::MalformedEnvelope { .. })
        ));
        assert!(matches!(
            Envelope::parse(&json!({"@type": "", "@value": 1}), "test", true),
            Err(Error::MalformedEnvelope { .. })
        ));
    }

    #[test]
    fn test_expect_tag_names_both_tags() {
        let raw = json!({"@type": "g:Map", "@value": []});
        let env = Envelope::parse(&raw, "decode_list", true).unwrap();
        let err = env.expect_tag("g:List", "decode_list").unwrap_err();
        assert_eq!(err.to_string(), r#"decode_list: expected `g:List` type, but got "g:Map""#);
    }

    #[test]
    fn test_parse_response_empty_and_null() {
        assert_eq!(parse_response(b"", "test").unwrap(), None);
        assert_eq!(parse_response(b"null", "test").unwrap(), None);
        assert_eq!(parse_response(b" null\n", "test").unwrap(), None);
        assert!(matches!(parse_response(b"{nope", "test"), Err(Error::MalformedEnvelope { .. })));
    }
}
