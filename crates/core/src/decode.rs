//! Frontmatter decoding, dispatched on the block's declared encoding.

use crate::tree::{Frontmatter, MetadataTag, Node};
use crate::{EsmatterError, SourceLocation};
use serde_json::{Map, Number, Value as JsonValue};
use std::collections::HashMap;
use thiserror::Error;

/// Failure reported by a decoder. Locations are relative to the block text.
#[derive(Debug, Error)]
#[error("{message}")]
pub struct DecodeError {
    /// Decoder error message
    pub message: String,
    /// Line/column inside the block, when known
    pub location: Option<SourceLocation>,
}

impl DecodeError {
    /// Create an error without location information.
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            location: None,
        }
    }
}

/// Decodes raw block text into structured data.
pub type DecodeFn = fn(&str) -> Result<JsonValue, DecodeError>;

/// Dispatch table from encoding tag to decoder.
#[derive(Debug, Clone)]
pub struct DecoderRegistry {
    decoders: HashMap<MetadataTag, DecodeFn>,
}

impl Default for DecoderRegistry {
    fn default() -> Self {
        let mut registry = Self::empty();
        registry.register(MetadataTag::Yaml, decode_yaml);
        registry.register(MetadataTag::Toml, decode_toml);
        registry
    }
}

impl DecoderRegistry {
    /// A registry that recognizes no encodings.
    pub fn empty() -> Self {
        Self {
            decoders: HashMap::new(),
        }
    }

    /// Register a decoder, replacing any existing one for `tag`.
    pub fn register(&mut self, tag: MetadataTag, decoder: DecodeFn) {
        self.decoders.insert(tag, decoder);
    }

    /// Check if a tag has a decoder.
    pub fn is_registered(&self, tag: &MetadataTag) -> bool {
        self.decoders.contains_key(tag)
    }

    /// Decode a node.
    ///
    /// Returns `Ok(None)` for nodes that are not frontmatter, for tags without a
    /// decoder, and for blocks whose document is `null` (e.g. an empty YAML block).
    /// Every other value, `false`, `0` and `{}` included, is returned as present.
    pub fn decode(&self, node: &Node) -> Result<Option<JsonValue>, EsmatterError> {
        match node {
            Node::Frontmatter(frontmatter) => self.decode_frontmatter(frontmatter),
            _ => Ok(None),
        }
    }

    /// Decode a frontmatter block.
    pub fn decode_frontmatter(
        &self,
        frontmatter: &Frontmatter,
    ) -> Result<Option<JsonValue>, EsmatterError> {
        let Some(decoder) = self.decoders.get(&frontmatter.tag) else {
            log::debug!("No decoder registered for '{}' frontmatter", frontmatter.tag);
            return Ok(None);
        };

        match decoder(&frontmatter.value) {
            Ok(JsonValue::Null) => Ok(None),
            Ok(value) => Ok(Some(value)),
            Err(err) => {
                let block_line = frontmatter.position.as_ref().map(|p| p.start.line);
                let location = match (err.location, block_line) {
                    (Some(location), Some(line)) => Some(location.offset_by_block(line)),
                    (location, _) => location,
                };
                Err(EsmatterError::Decode {
                    tag: frontmatter.tag.to_string(),
                    message: err.message,
                    location,
                })
            }
        }
    }
}

/// Decode YAML text.
pub fn decode_yaml(text: &str) -> Result<JsonValue, DecodeError> {
    let yaml_value: serde_yaml::Value = serde_yaml::from_str(text).map_err(|err| DecodeError {
        location: err
            .location()
            .map(|location| SourceLocation::new(location.line(), location.column())),
        message: err.to_string(),
    })?;
    serde_json::to_value(yaml_value).map_err(|err| {
        DecodeError::new(format!(
            "frontmatter mapping keys must be strings or scalars ({err})"
        ))
    })
}

/// Decode TOML text. Datetimes become their RFC 3339 strings.
pub fn decode_toml(text: &str) -> Result<JsonValue, DecodeError> {
    let table: toml::Table = toml::from_str(text).map_err(|err| DecodeError {
        message: err.message().to_string(),
        location: err.span().map(|span| offset_location(text, span.start)),
    })?;
    Ok(toml_table_to_json(table))
}

fn toml_table_to_json(table: toml::Table) -> JsonValue {
    JsonValue::Object(
        table
            .into_iter()
            .map(|(key, value)| (key, toml_to_json(value)))
            .collect::<Map<_, _>>(),
    )
}

fn toml_to_json(value: toml::Value) -> JsonValue {
    match value {
        toml::Value::String(s) => JsonValue::String(s),
        toml::Value::Integer(i) => JsonValue::Number(i.into()),
        // NaN and infinities have no JSON form.
        toml::Value::Float(f) => Number::from_f64(f).map_or(JsonValue::Null, JsonValue::Number),
        toml::Value::Boolean(b) => JsonValue::Bool(b),
        toml::Value::Datetime(datetime) => JsonValue::String(datetime.to_string()),
        toml::Value::Array(items) => JsonValue::Array(items.into_iter().map(toml_to_json).collect()),
        toml::Value::Table(table) => toml_table_to_json(table),
    }
}

fn offset_location(text: &str, offset: usize) -> SourceLocation {
    let prefix = text.get(..offset.min(text.len())).unwrap_or(text);
    let line = prefix.matches('\n').count() + 1;
    let column = match prefix.rfind('\n') {
        Some(newline) => prefix[newline + 1..].chars().count() + 1,
        None => prefix.chars().count() + 1,
    };
    SourceLocation::new(line, column)
}

#[cfg(test)]
mod tests {
    use super::*;
    use markdown::mdast;
    use markdown::unist::{Point, Position};
    use serde_json::json;

    fn frontmatter(tag: MetadataTag, value: &str) -> Node {
        Node::Frontmatter(Frontmatter::new(tag, value))
    }

    fn decode(node: &Node) -> Option<JsonValue> {
        DecoderRegistry::default()
            .decode(node)
            .expect("decode should succeed")
    }

    #[test]
    fn dispatches_on_tag() {
        assert_eq!(
            decode(&frontmatter(MetadataTag::Yaml, "title: Hello")),
            Some(json!({ "title": "Hello" }))
        );
        assert_eq!(
            decode(&frontmatter(MetadataTag::Toml, "title = \"Hello\"")),
            Some(json!({ "title": "Hello" }))
        );
    }

    #[test]
    fn non_frontmatter_is_absent() {
        let paragraph = Node::Markdown(mdast::Node::Paragraph(mdast::Paragraph {
            children: vec![],
            position: None,
        }));
        assert_eq!(decode(&paragraph), None);
    }

    #[test]
    fn unregistered_tag_is_absent() {
        let node = frontmatter(MetadataTag::Custom("json".into()), "{\"a\": 1}");
        assert_eq!(decode(&node), None);
        let empty = DecoderRegistry::empty();
        assert_eq!(
            empty.decode(&frontmatter(MetadataTag::Yaml, "a: 1")).unwrap(),
            None
        );
    }

    #[test]
    fn custom_decoders_can_be_registered() {
        fn decode_json(text: &str) -> Result<JsonValue, DecodeError> {
            serde_json::from_str(text).map_err(|err| DecodeError::new(err.to_string()))
        }

        let mut registry = DecoderRegistry::default();
        let tag = MetadataTag::Custom("json".into());
        registry.register(tag.clone(), decode_json);
        assert!(registry.is_registered(&tag));
        let value = registry
            .decode(&frontmatter(tag, "{\"a\": [1, 2]}"))
            .unwrap();
        assert_eq!(value, Some(json!({ "a": [1, 2] })));
    }

    #[test]
    fn null_documents_are_absent_but_falsy_values_are_present() {
        assert_eq!(decode(&frontmatter(MetadataTag::Yaml, "")), None);
        assert_eq!(decode(&frontmatter(MetadataTag::Yaml, "~")), None);
        assert_eq!(decode(&frontmatter(MetadataTag::Yaml, "false")), Some(json!(false)));
        assert_eq!(decode(&frontmatter(MetadataTag::Yaml, "0")), Some(json!(0)));
        assert_eq!(decode(&frontmatter(MetadataTag::Yaml, "{}")), Some(json!({})));
        assert_eq!(decode(&frontmatter(MetadataTag::Toml, "")), Some(json!({})));
    }

    #[test]
    fn yaml_keeps_nested_structure() {
        let value = decode(&frontmatter(
            MetadataTag::Yaml,
            "title: Post\ntags:\n  - rust\n  - mdx\nauthor:\n  name: Ada\n  age: 36\ndraft: false",
        ));
        assert_eq!(
            value,
            Some(json!({
                "title": "Post",
                "tags": ["rust", "mdx"],
                "author": { "name": "Ada", "age": 36 },
                "draft": false
            }))
        );
    }

    #[test]
    fn toml_datetimes_become_strings() {
        let value = decode(&frontmatter(
            MetadataTag::Toml,
            "published = 1979-05-27T07:32:00Z\nratio = 0.5\n[author]\nname = \"Ada\"",
        ));
        assert_eq!(
            value,
            Some(json!({
                "published": "1979-05-27T07:32:00Z",
                "ratio": 0.5,
                "author": { "name": "Ada" }
            }))
        );
    }

    #[test]
    fn invalid_yaml_fails_with_tag() {
        let err = DecoderRegistry::default()
            .decode(&frontmatter(MetadataTag::Yaml, "invalid: [unterminated"))
            .unwrap_err();
        match err {
            EsmatterError::Decode { tag, location, .. } => {
                assert_eq!(tag, "yaml");
                assert!(location.is_some());
            }
            other => panic!("expected decode error, got {other:?}"),
        }
    }

    #[test]
    fn complex_yaml_keys_are_rejected_with_a_hint() {
        let err = DecoderRegistry::default()
            .decode(&frontmatter(MetadataTag::Yaml, "? [a, b]\n: 1"))
            .unwrap_err();
        match err {
            EsmatterError::Decode { tag, message, .. } => {
                assert_eq!(tag, "yaml");
                assert!(message.contains("keys must be strings or scalars"), "{message}");
            }
            other => panic!("expected decode error, got {other:?}"),
        }
    }

    #[test]
    fn toml_error_location_is_shifted_into_document() {
        let node = Node::Frontmatter(Frontmatter {
            tag: MetadataTag::Toml,
            value: "title = \"ok\"\nbroken =".into(),
            position: Some(Position {
                start: Point::new(1, 1, 0),
                end: Point::new(4, 4, 30),
            }),
        });
        let err = DecoderRegistry::default().decode(&node).unwrap_err();
        match err {
            EsmatterError::Decode {
                tag,
                location: Some(location),
                ..
            } => {
                assert_eq!(tag, "toml");
                // Block line 2 sits below the opening fence on document line 1.
                assert_eq!(location.line, 3);
            }
            other => panic!("expected located decode error, got {other:?}"),
        }
    }

    #[test]
    fn offsets_map_to_line_and_column() {
        assert_eq!(offset_location("ab\ncd", 4), SourceLocation::new(2, 2));
        assert_eq!(offset_location("ab", 99), SourceLocation::new(1, 3));
    }
}
