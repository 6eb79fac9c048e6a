//! Serializable configuration for hosts that pick a built-in renderer.

use crate::render::{ExportRenderer, StaticPropsRenderer};
use crate::transform::FrontmatterTransform;
use serde::{Deserialize, Serialize};

/// Built-in renderers selectable from configuration.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum RendererKind {
    /// `export const getStaticProps = async () => ({ props })`.
    #[default]
    StaticProps,
    /// `export const <exportName> = data;`.
    Export,
}

/// Frontmatter stage configuration.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TransformConfig {
    /// Which built-in renderer to use.
    #[serde(default)]
    pub renderer: RendererKind,
    /// Binding name for the `export` renderer. Defaults to `frontmatter`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub export_name: Option<String>,
}

impl TransformConfig {
    /// Build the configured transform.
    pub fn build(&self) -> FrontmatterTransform {
        match self.renderer {
            RendererKind::StaticProps => FrontmatterTransform::with_renderer(StaticPropsRenderer),
            RendererKind::Export => {
                let renderer = match &self.export_name {
                    Some(name) => ExportRenderer::new(name.clone()),
                    None => ExportRenderer::default(),
                };
                FrontmatterTransform::with_renderer(renderer)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tree::{Frontmatter, MetadataTag, Node, Root};

    fn rendered(config: &TransformConfig) -> String {
        let mut root = Root::new(vec![Node::Frontmatter(Frontmatter::new(
            MetadataTag::Yaml,
            "title: Hi",
        ))]);
        config.build().transform(&mut root).unwrap();
        root.fragments().next().expect("fragment").value.clone()
    }

    #[test]
    fn defaults_to_static_props() {
        let config: TransformConfig = serde_json::from_str("{}").unwrap();
        assert_eq!(config, TransformConfig::default());
        assert!(rendered(&config).starts_with("export const getStaticProps"));
    }

    #[test]
    fn export_renderer_from_camel_case_json() {
        let config: TransformConfig =
            serde_json::from_str(r#"{"renderer":"export","exportName":"meta"}"#).unwrap();
        assert_eq!(config.renderer, RendererKind::Export);
        assert_eq!(rendered(&config), "export const meta = {\"title\":\"Hi\"};\n");

        let config = TransformConfig {
            renderer: RendererKind::Export,
            export_name: None,
        };
        assert!(rendered(&config).starts_with("export const frontmatter ="));
    }

    #[test]
    fn serializes_without_empty_export_name() {
        let json = serde_json::to_string(&TransformConfig::default()).unwrap();
        assert_eq!(json, r#"{"renderer":"staticProps"}"#);
    }
}
