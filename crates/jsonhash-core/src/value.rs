//! # Value Model — The Four-Variant Document Tree
//!
//! `JsonValue` is the closed tagged variant the canonicalizer consumes.
//! Decoders produce it once per document; the canonicalizer only borrows it.
//!
//! ## Scalar Rendering
//!
//! Strings, numbers, and booleans collapse into `Scalar(text)`. The text is
//! what gets hashed, so the rendering policy is observable in every digest:
//!
//! 1. **Strings** — the decoded text verbatim, without quotes.
//! 2. **Booleans** — `true` / `false`.
//! 3. **Integers** — base-10 (`1`, `-7`).
//! 4. **Floats** — `serde_json`'s shortest round-trip form (`1.0`, `0.5`).
//!    `1` and `1.0` therefore produce different digests.
//!
//! The string `"1"` and the number `1` render identically and share a digest.
//!
//! ## Mapping Pairs
//!
//! Mappings are kept as an ordered list of pairs rather than a map. Duplicate
//! keys survive decoding (see the `Deserialize` impl) and each occurrence
//! contributes to the digest. Keys are usually scalars but any variant is
//! allowed, which YAML documents make use of.

use std::fmt;

use serde::de::{self, Deserialize, Deserializer, EnumAccess, MapAccess, SeqAccess, Visitor};

use crate::error::JsonHashError;

/// A parsed JSON-like value.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum JsonValue {
    /// JSON `null`.
    Null,
    /// A string, number, or boolean reduced to its textual rendering.
    Scalar(String),
    /// An ordered list of values.
    Sequence(Vec<JsonValue>),
    /// Key/value pairs in insertion order. Duplicate keys are preserved.
    Mapping(Vec<(JsonValue, JsonValue)>),
}

impl JsonValue {
    /// Build a scalar from anything that renders as text.
    pub fn scalar(text: impl Into<String>) -> Self {
        Self::Scalar(text.into())
    }

    /// Build a sequence from an iterator of values.
    pub fn sequence(items: impl IntoIterator<Item = JsonValue>) -> Self {
        Self::Sequence(items.into_iter().collect())
    }

    /// Build a mapping from an iterator of key/value pairs.
    pub fn mapping(pairs: impl IntoIterator<Item = (JsonValue, JsonValue)>) -> Self {
        Self::Mapping(pairs.into_iter().collect())
    }

    /// Returns true for `Null`.
    pub fn is_null(&self) -> bool {
        matches!(self, Self::Null)
    }

    /// Short lowercase name of the variant, for diagnostics.
    pub fn kind(&self) -> &'static str {
        match self {
            Self::Null => "null",
            Self::Scalar(_) => "scalar",
            Self::Sequence(_) => "sequence",
            Self::Mapping(_) => "mapping",
        }
    }

    /// Move this value's direct children onto `out`, leaving it childless.
    fn detach_children(&mut self, out: &mut Vec<JsonValue>) {
        match self {
            Self::Null | Self::Scalar(_) => {}
            Self::Sequence(items) => out.append(items),
            Self::Mapping(pairs) => {
                out.reserve(pairs.len() * 2);
                for (key, value) in pairs.drain(..) {
                    out.push(key);
                    out.push(value);
                }
            }
        }
    }
}

// Nesting depth is unbounded, so the compiler-generated recursive drop could
// exhaust the stack. Children are flattened onto a heap stack instead.
impl Drop for JsonValue {
    fn drop(&mut self) {
        let mut pending = Vec::new();
        self.detach_children(&mut pending);
        while let Some(mut value) = pending.pop() {
            value.detach_children(&mut pending);
        }
    }
}

/// Render a finite float the way `serde_json` prints it. Non-finite values
/// have no JSON rendering.
fn render_f64(v: f64) -> Option<String> {
    serde_json::Number::from_f64(v).map(|n| n.to_string())
}

impl From<serde_json::Value> for JsonValue {
    fn from(value: serde_json::Value) -> Self {
        use serde_json::Value as Json;
        match value {
            Json::Null => Self::Null,
            Json::Bool(b) => Self::Scalar(b.to_string()),
            Json::Number(n) => Self::Scalar(n.to_string()),
            Json::String(s) => Self::Scalar(s),
            Json::Array(items) => Self::Sequence(items.into_iter().map(Self::from).collect()),
            Json::Object(map) => Self::Mapping(
                map.into_iter()
                    .map(|(k, v)| (Self::Scalar(k), Self::from(v)))
                    .collect(),
            ),
        }
    }
}

impl From<&serde_json::Value> for JsonValue {
    fn from(value: &serde_json::Value) -> Self {
        Self::from(value.clone())
    }
}

impl TryFrom<serde_yaml::Value> for JsonValue {
    type Error = JsonHashError;

    /// Tagged nodes (`!tag value`) and non-finite numbers (`.inf`, `.nan`)
    /// have no counterpart in the four-variant model and are rejected rather
    /// than coerced.
    fn try_from(value: serde_yaml::Value) -> Result<Self, Self::Error> {
        use serde_yaml::Value as Yaml;
        Ok(match value {
            Yaml::Null => Self::Null,
            Yaml::Bool(b) => Self::Scalar(b.to_string()),
            Yaml::Number(n) if n.is_nan() || n.is_infinite() => {
                return Err(JsonHashError::UnsupportedValue(format!(
                    "non-finite number {n}"
                )))
            }
            Yaml::Number(n) => Self::Scalar(n.to_string()),
            Yaml::String(s) => Self::Scalar(s),
            Yaml::Sequence(items) => Self::Sequence(
                items
                    .into_iter()
                    .map(Self::try_from)
                    .collect::<Result<_, _>>()?,
            ),
            Yaml::Mapping(map) => Self::Mapping(
                map.into_iter()
                    .map(|(k, v)| Ok((Self::try_from(k)?, Self::try_from(v)?)))
                    .collect::<Result<_, JsonHashError>>()?,
            ),
            Yaml::Tagged(tagged) => {
                return Err(JsonHashError::UnsupportedValue(format!(
                    "tagged YAML value {}",
                    tagged.tag
                )))
            }
        })
    }
}

impl<'de> Deserialize<'de> for JsonValue {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        deserializer.deserialize_any(JsonValueVisitor)
    }
}

struct JsonValueVisitor;

impl<'de> Visitor<'de> for JsonValueVisitor {
    type Value = JsonValue;

    fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("null, a scalar, a sequence, or a mapping")
    }

    fn visit_unit<E>(self) -> Result<JsonValue, E> {
        Ok(JsonValue::Null)
    }

    fn visit_none<E>(self) -> Result<JsonValue, E> {
        Ok(JsonValue::Null)
    }

    fn visit_some<D>(self, deserializer: D) -> Result<JsonValue, D::Error>
    where
        D: Deserializer<'de>,
    {
        JsonValue::deserialize(deserializer)
    }

    fn visit_bool<E>(self, v: bool) -> Result<JsonValue, E> {
        Ok(JsonValue::Scalar(v.to_string()))
    }

    fn visit_i64<E>(self, v: i64) -> Result<JsonValue, E> {
        Ok(JsonValue::Scalar(v.to_string()))
    }

    fn visit_u64<E>(self, v: u64) -> Result<JsonValue, E> {
        Ok(JsonValue::Scalar(v.to_string()))
    }

    fn visit_f64<E>(self, v: f64) -> Result<JsonValue, E>
    where
        E: de::Error,
    {
        render_f64(v)
            .map(JsonValue::Scalar)
            .ok_or_else(|| E::custom(format!("unsupported value: non-finite number {v}")))
    }

    fn visit_str<E>(self, v: &str) -> Result<JsonValue, E> {
        Ok(JsonValue::Scalar(v.to_owned()))
    }

    fn visit_string<E>(self, v: String) -> Result<JsonValue, E> {
        Ok(JsonValue::Scalar(v))
    }

    fn visit_bytes<E>(self, _v: &[u8]) -> Result<JsonValue, E>
    where
        E: de::Error,
    {
        Err(E::custom("unsupported value: byte string"))
    }

    fn visit_seq<A>(self, mut seq: A) -> Result<JsonValue, A::Error>
    where
        A: SeqAccess<'de>,
    {
        let mut items = Vec::with_capacity(seq.size_hint().unwrap_or(0).min(4096));
        while let Some(item) = seq.next_element()? {
            items.push(item);
        }
        Ok(JsonValue::Sequence(items))
    }

    fn visit_map<A>(self, mut map: A) -> Result<JsonValue, A::Error>
    where
        A: MapAccess<'de>,
    {
        let mut pairs = Vec::with_capacity(map.size_hint().unwrap_or(0).min(4096));
        while let Some(pair) = map.next_entry::<JsonValue, JsonValue>()? {
            pairs.push(pair);
        }
        Ok(JsonValue::Mapping(pairs))
    }

    fn visit_enum<A>(self, _data: A) -> Result<JsonValue, A::Error>
    where
        A: EnumAccess<'de>,
    {
        Err(de::Error::custom("unsupported value: enum or tagged value"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn s(text: &str) -> JsonValue {
        JsonValue::scalar(text)
    }

    #[test]
    fn from_serde_json_renders_scalars() {
        let value = JsonValue::from(json!([true, false, 1, -7, 1.5, "x", null]));
        assert_eq!(
            value,
            JsonValue::sequence([
                s("true"),
                s("false"),
                s("1"),
                s("-7"),
                s("1.5"),
                s("x"),
                JsonValue::Null,
            ])
        );
    }

    #[test]
    fn integer_and_float_render_differently() {
        assert_eq!(JsonValue::from(json!(1)), s("1"));
        assert_eq!(JsonValue::from(json!(1.0)), s("1.0"));
    }

    #[test]
    fn from_serde_json_object_keys_become_scalars() {
        let value = JsonValue::from(&json!({"k": {"nested": []}}));
        assert_eq!(
            value,
            JsonValue::mapping([(
                s("k"),
                JsonValue::mapping([(s("nested"), JsonValue::sequence([]))])
            )])
        );
    }

    #[test]
    fn deserialize_preserves_duplicate_keys_in_order() {
        let value: JsonValue = serde_json::from_str(r#"{"a": 1, "b": 2, "a": 3}"#).unwrap();
        assert_eq!(
            value,
            JsonValue::mapping([(s("a"), s("1")), (s("b"), s("2")), (s("a"), s("3"))])
        );
    }

    #[test]
    fn deserialize_matches_from_serde_json() {
        let text = r#"{"n": [1, 2.25, -3, true, null, "t"], "o": {"x": {}}}"#;
        let decoded: JsonValue = serde_json::from_str(text).unwrap();
        let via_value = JsonValue::from(serde_json::from_str::<serde_json::Value>(text).unwrap());
        // Both sides list keys in the same order here: text order and sorted order agree.
        assert_eq!(decoded, via_value);
    }

    #[test]
    fn yaml_tagged_value_is_rejected() {
        let yaml: serde_yaml::Value = serde_yaml::from_str("key: !custom 5").unwrap();
        let err = JsonValue::try_from(yaml).unwrap_err();
        assert!(matches!(err, JsonHashError::UnsupportedValue(_)), "{err}");
    }

    #[test]
    fn non_finite_numbers_are_rejected_on_every_path() {
        for text in ["x: .inf", "x: -.inf", "x: .nan"] {
            let yaml: serde_yaml::Value = serde_yaml::from_str(text).unwrap();
            let err = JsonValue::try_from(yaml).unwrap_err();
            assert!(matches!(err, JsonHashError::UnsupportedValue(_)), "{err}");

            let err = serde_yaml::from_str::<JsonValue>(text).unwrap_err();
            assert!(err.to_string().contains("unsupported value"), "{err}");
        }
        let finite: serde_yaml::Value = serde_yaml::from_str("x: 1.5").unwrap();
        assert!(JsonValue::try_from(finite).is_ok());
    }

    #[test]
    fn yaml_non_text_keys_are_kept_structured() {
        let yaml: serde_yaml::Value = serde_yaml::from_str("? [1, 2]\n: pair\n").unwrap();
        let value = JsonValue::try_from(yaml).unwrap();
        assert_eq!(
            value,
            JsonValue::mapping([(JsonValue::sequence([s("1"), s("2")]), s("pair"))])
        );
    }

    #[test]
    fn kind_names() {
        assert_eq!(JsonValue::Null.kind(), "null");
        assert_eq!(s("a").kind(), "scalar");
        assert_eq!(JsonValue::sequence([]).kind(), "sequence");
        assert_eq!(JsonValue::mapping([]).kind(), "mapping");
        assert!(JsonValue::Null.is_null());
    }

    #[test]
    fn dropping_a_deep_tree_does_not_overflow() {
        let mut value = JsonValue::Null;
        for _ in 0..200_000 {
            value = JsonValue::Sequence(vec![value]);
        }
        drop(value);
    }
}
