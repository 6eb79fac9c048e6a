#![deny(missing_docs)]
//! Esmatter core: turns frontmatter nodes into ES module fragments spliced
//! back into the document tree.

/// Rendered source to ES module body.
pub mod compile;
/// Serializable stage configuration.
pub mod config;
/// Frontmatter decoders and their registry.
pub mod decode;
/// Core error types.
pub mod error;
/// Markdown parsing utilities and the transform pipeline.
pub mod parse;
/// Renderers from decoded data to module source.
pub mod render;
/// The splicing transform.
pub mod transform;
/// Document tree model.
pub mod tree;

pub use compile::{compile_fragment, program_from_body};
pub use config::{RendererKind, TransformConfig};
pub use decode::{DecodeError, DecodeFn, DecoderRegistry, decode_toml, decode_yaml};
pub use error::{EsmatterError, SourceLocation};
pub use parse::{DocumentPipeline, ParseOptions, TextTransform, TreeTransform, parse_mdast};
pub use render::{ExportRenderer, Renderer, StaticPropsRenderer, json_literal};
pub use transform::FrontmatterTransform;
pub use tree::{Frontmatter, MdxjsEsm, MetadataTag, Node, Root};
