//! # Typed RDF-Literal Codec
//!
//! Self-description documents carry scalar values as RDF literal objects of
//! the form `{"@type": "<xsd type>", "@value": <scalar>}`. This module owns
//! the translation in both directions.
//!
//! ## Decode Leniency
//!
//! Older catalog entries serialize some scalars bare (no literal wrapper).
//! [`ScalarLiteral::decode`] accepts both forms: an object carrying
//! `"@value"` is unwrapped and parsed per the requested kind, a bare scalar
//! is accepted directly. Anything else is a [`FormatError`].
//!
//! ## Kind Preservation
//!
//! Strings and URIs are indistinguishable on the wire (both serialize the
//! value as a JSON string), but the semantic kind matters upstream: a field
//! declared as a URI must decode back as a URI. The [`StringValue`],
//! [`UriValue`], and [`IntegerValue`] newtypes carry the kind in the type
//! system so subject structs can derive serde and still round-trip kinds.

use serde::de::Error as _;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use serde_json::{json, Value};

use crate::error::FormatError;

/// Wire key for the literal datatype.
const TYPE_KEY: &str = "@type";
/// Wire key for the literal value.
const VALUE_KEY: &str = "@value";

/// The semantic kind of a scalar literal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum LiteralKind {
    /// Plain string, `xsd:string`.
    String,
    /// URI reference, `xsd:anyURI`. Shares the wire shape of a string.
    Uri,
    /// Integer, `xsd:integer`.
    Integer,
}

impl LiteralKind {
    /// The xsd datatype written to the wire for this kind.
    ///
    /// The mapping is fixed: string→`xsd:string`, uri→`xsd:anyURI`,
    /// integer→`xsd:integer`.
    pub fn xsd_type(&self) -> &'static str {
        match self {
            LiteralKind::String => "xsd:string",
            LiteralKind::Uri => "xsd:anyURI",
            LiteralKind::Integer => "xsd:integer",
        }
    }
}

impl std::fmt::Display for LiteralKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.xsd_type())
    }
}

/// A scalar domain value tagged with its semantic kind.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum ScalarLiteral {
    /// Plain string value.
    String(String),
    /// URI value. Wire-identical to a string; the kind lives here.
    Uri(String),
    /// Integer value.
    Integer(i64),
}

impl ScalarLiteral {
    /// The semantic kind of this literal.
    pub fn kind(&self) -> LiteralKind {
        match self {
            ScalarLiteral::String(_) => LiteralKind::String,
            ScalarLiteral::Uri(_) => LiteralKind::Uri,
            ScalarLiteral::Integer(_) => LiteralKind::Integer,
        }
    }

    /// Encode this literal to its wire form.
    ///
    /// Total for all values: every literal has a wire representation.
    pub fn encode(&self) -> Value {
        let (xsd, value) = match self {
            ScalarLiteral::String(s) => (LiteralKind::String.xsd_type(), json!(s)),
            ScalarLiteral::Uri(u) => (LiteralKind::Uri.xsd_type(), json!(u)),
            ScalarLiteral::Integer(i) => (LiteralKind::Integer.xsd_type(), json!(i)),
        };
        json!({ TYPE_KEY: xsd, VALUE_KEY: value })
    }

    /// Decode a wire node into a literal of the requested kind.
    ///
    /// A node carrying `"@value"` is unwrapped; a bare scalar is accepted
    /// directly (lenient decode for older catalog entries). The extracted
    /// value is then parsed per `kind` — an integer literal accepts either a
    /// JSON number or a numeric string, and a parse failure is a
    /// [`FormatError::IntegerParse`].
    pub fn decode(node: &Value, kind: LiteralKind) -> Result<ScalarLiteral, FormatError> {
        let raw = match node {
            Value::Object(map) => map
                .get(VALUE_KEY)
                .ok_or_else(|| FormatError::MalformedLiteral(compact(node)))?,
            Value::String(_) | Value::Number(_) => node,
            other => return Err(FormatError::MalformedLiteral(compact(other))),
        };

        match kind {
            LiteralKind::String => match raw {
                Value::String(s) => Ok(ScalarLiteral::String(s.clone())),
                other => Err(wrong_kind(kind, other)),
            },
            LiteralKind::Uri => match raw {
                Value::String(s) => Ok(ScalarLiteral::Uri(s.clone())),
                other => Err(wrong_kind(kind, other)),
            },
            LiteralKind::Integer => match raw {
                Value::Number(n) => n
                    .as_i64()
                    .map(ScalarLiteral::Integer)
                    .ok_or_else(|| FormatError::IntegerParse(n.to_string())),
                Value::String(s) => s
                    .parse::<i64>()
                    .map(ScalarLiteral::Integer)
                    .map_err(|_| FormatError::IntegerParse(s.clone())),
                other => Err(wrong_kind(kind, other)),
            },
        }
    }
}

fn wrong_kind(kind: LiteralKind, value: &Value) -> FormatError {
    FormatError::WrongValueKind {
        kind: kind.xsd_type(),
        value: compact(value),
    }
}

fn compact(value: &Value) -> String {
    serde_json::to_string(value).unwrap_or_else(|_| "<unprintable>".to_string())
}

// ── Kind-preserving field newtypes ──────────────────────────────────────

/// Serialize helper shared by the field newtypes.
fn serialize_literal<S: Serializer>(lit: &ScalarLiteral, serializer: S) -> Result<S::Ok, S::Error> {
    lit.encode().serialize(serializer)
}

/// Deserialize helper shared by the field newtypes.
fn deserialize_literal<'de, D: Deserializer<'de>>(
    deserializer: D,
    kind: LiteralKind,
) -> Result<ScalarLiteral, D::Error> {
    let node = Value::deserialize(deserializer)?;
    ScalarLiteral::decode(&node, kind).map_err(D::Error::custom)
}

/// An `xsd:string` field on a self-description document.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct StringValue(String);

impl StringValue {
    /// Wrap a string value.
    pub fn new(value: impl Into<String>) -> Self {
        Self(value.into())
    }

    /// The inner string.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl From<&str> for StringValue {
    fn from(value: &str) -> Self {
        Self::new(value)
    }
}

impl Serialize for StringValue {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serialize_literal(&ScalarLiteral::String(self.0.clone()), serializer)
    }
}

impl<'de> Deserialize<'de> for StringValue {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        match deserialize_literal(deserializer, LiteralKind::String)? {
            ScalarLiteral::String(s) => Ok(Self(s)),
            other => Err(D::Error::custom(format!(
                "expected an xsd:string literal, decoded {}",
                other.kind()
            ))),
        }
    }
}

/// An `xsd:anyURI` field on a self-description document.
///
/// Wire-identical to [`StringValue`]; the distinct type preserves the
/// intended semantic kind through a round trip.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct UriValue(String);

impl UriValue {
    /// Wrap a URI value.
    pub fn new(value: impl Into<String>) -> Self {
        Self(value.into())
    }

    /// The inner URI string.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl From<&str> for UriValue {
    fn from(value: &str) -> Self {
        Self::new(value)
    }
}

impl Serialize for UriValue {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serialize_literal(&ScalarLiteral::Uri(self.0.clone()), serializer)
    }
}

impl<'de> Deserialize<'de> for UriValue {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        match deserialize_literal(deserializer, LiteralKind::Uri)? {
            ScalarLiteral::Uri(u) => Ok(Self(u)),
            other => Err(D::Error::custom(format!(
                "expected an xsd:anyURI literal, decoded {}",
                other.kind()
            ))),
        }
    }
}

/// An `xsd:integer` field on a self-description document.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct IntegerValue(i64);

impl IntegerValue {
    /// Wrap an integer value.
    pub fn new(value: i64) -> Self {
        Self(value)
    }

    /// The inner integer.
    pub fn get(&self) -> i64 {
        self.0
    }
}

impl From<i64> for IntegerValue {
    fn from(value: i64) -> Self {
        Self(value)
    }
}

impl Serialize for IntegerValue {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serialize_literal(&ScalarLiteral::Integer(self.0), serializer)
    }
}

impl<'de> Deserialize<'de> for IntegerValue {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        match deserialize_literal(deserializer, LiteralKind::Integer)? {
            ScalarLiteral::Integer(i) => Ok(Self(i)),
            other => Err(D::Error::custom(format!(
                "expected an xsd:integer literal, decoded {}",
                other.kind()
            ))),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;
    use serde_json::json;

    #[test]
    fn xsd_mapping_is_fixed() {
        assert_eq!(LiteralKind::String.xsd_type(), "xsd:string");
        assert_eq!(LiteralKind::Uri.xsd_type(), "xsd:anyURI");
        assert_eq!(LiteralKind::Integer.xsd_type(), "xsd:integer");
    }

    #[test]
    fn encode_string_produces_wire_form() {
        let lit = ScalarLiteral::String("X".to_string());
        assert_eq!(lit.encode(), json!({"@type": "xsd:string", "@value": "X"}));
    }

    #[test]
    fn decode_wire_literal_extracts_value() {
        let node = json!({"@type": "xsd:string", "@value": "FR79537407926"});
        let lit = ScalarLiteral::decode(&node, LiteralKind::String).unwrap();
        assert_eq!(lit, ScalarLiteral::String("FR79537407926".to_string()));
    }

    #[test]
    fn decode_accepts_bare_scalar() {
        let lit = ScalarLiteral::decode(&json!("plain"), LiteralKind::String).unwrap();
        assert_eq!(lit, ScalarLiteral::String("plain".to_string()));

        let lit = ScalarLiteral::decode(&json!(17), LiteralKind::Integer).unwrap();
        assert_eq!(lit, ScalarLiteral::Integer(17));
    }

    #[test]
    fn decode_integer_from_numeric_string() {
        let node = json!({"@type": "xsd:integer", "@value": "42"});
        let lit = ScalarLiteral::decode(&node, LiteralKind::Integer).unwrap();
        assert_eq!(lit, ScalarLiteral::Integer(42));
    }

    #[test]
    fn decode_integer_parse_failure_is_format_error() {
        let node = json!({"@type": "xsd:integer", "@value": "not-a-number"});
        let err = ScalarLiteral::decode(&node, LiteralKind::Integer).unwrap_err();
        assert!(matches!(err, FormatError::IntegerParse(_)));
    }

    #[test]
    fn decode_rejects_object_without_value_key() {
        let node = json!({"@type": "xsd:string"});
        let err = ScalarLiteral::decode(&node, LiteralKind::String).unwrap_err();
        assert!(matches!(err, FormatError::MalformedLiteral(_)));
    }

    #[test]
    fn decode_rejects_non_scalar_node() {
        let err = ScalarLiteral::decode(&json!([1, 2]), LiteralKind::Integer).unwrap_err();
        assert!(matches!(err, FormatError::MalformedLiteral(_)));
    }

    #[test]
    fn decode_rejects_kind_mismatch() {
        let node = json!({"@type": "xsd:string", "@value": 99});
        let err = ScalarLiteral::decode(&node, LiteralKind::String).unwrap_err();
        assert!(matches!(err, FormatError::WrongValueKind { .. }));
    }

    #[test]
    fn string_and_uri_share_wire_form_but_keep_kind() {
        let s = ScalarLiteral::String("https://example.com".to_string());
        let u = ScalarLiteral::Uri("https://example.com".to_string());
        // Identical bytes on the wire, apart from the datatype tag.
        assert_eq!(s.encode()["@value"], u.encode()["@value"]);
        assert_ne!(s.encode()["@type"], u.encode()["@type"]);

        // The kind survives a round trip through decode.
        let back = ScalarLiteral::decode(&u.encode(), LiteralKind::Uri).unwrap();
        assert_eq!(back.kind(), LiteralKind::Uri);
    }

    #[test]
    fn field_newtypes_serialize_wire_form() {
        let v = serde_json::to_value(StringValue::new("X")).unwrap();
        assert_eq!(v, json!({"@type": "xsd:string", "@value": "X"}));

        let v = serde_json::to_value(UriValue::new("https://example.com")).unwrap();
        assert_eq!(v["@type"], "xsd:anyURI");

        let v = serde_json::to_value(IntegerValue::new(7)).unwrap();
        assert_eq!(v, json!({"@type": "xsd:integer", "@value": 7}));
    }

    #[test]
    fn field_newtypes_deserialize_both_forms() {
        let wrapped: StringValue =
            serde_json::from_value(json!({"@type": "xsd:string", "@value": "a"})).unwrap();
        assert_eq!(wrapped.as_str(), "a");

        let bare: StringValue = serde_json::from_value(json!("a")).unwrap();
        assert_eq!(bare, wrapped);

        let int: IntegerValue = serde_json::from_value(json!({"@value": "12"})).unwrap();
        assert_eq!(int.get(), 12);
    }

    proptest! {
        #[test]
        fn string_roundtrip(s in ".*") {
            let lit = ScalarLiteral::String(s);
            let back = ScalarLiteral::decode(&lit.encode(), LiteralKind::String).unwrap();
            prop_assert_eq!(back, lit);
        }

        #[test]
        fn uri_roundtrip(s in "[a-z]+://[a-z0-9./#-]*") {
            let lit = ScalarLiteral::Uri(s);
            let back = ScalarLiteral::decode(&lit.encode(), LiteralKind::Uri).unwrap();
            prop_assert_eq!(back, lit);
        }

        #[test]
        fn integer_roundtrip(i in any::<i64>()) {
            let lit = ScalarLiteral::Integer(i);
            let back = ScalarLiteral::decode(&lit.encode(), LiteralKind::Integer).unwrap();
            prop_assert_eq!(back, lit);
        }
    }
}
