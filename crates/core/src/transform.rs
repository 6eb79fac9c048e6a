//! The frontmatter stage: decode, render, compile, and splice.

use crate::EsmatterError;
use crate::compile::{compile_fragment, program_from_body};
use crate::decode::{DecodeFn, DecoderRegistry};
use crate::parse::TreeTransform;
use crate::render::{Renderer, StaticPropsRenderer};
use crate::tree::{MdxjsEsm, MetadataTag, Node, Root};

/// Replaces frontmatter nodes with compiled ES module fragments.
///
/// Only the top-level children of a [`Root`] are visited. Nodes are handled one
/// at a time in document order, and the first error aborts the pass; nodes
/// replaced before the failure stay replaced.
pub struct FrontmatterTransform {
    decoders: DecoderRegistry,
    renderer: Box<dyn Renderer>,
}

impl Default for FrontmatterTransform {
    fn default() -> Self {
        Self::new()
    }
}

impl FrontmatterTransform {
    /// YAML and TOML decoding with the `getStaticProps` renderer.
    pub fn new() -> Self {
        Self {
            decoders: DecoderRegistry::default(),
            renderer: Box::new(StaticPropsRenderer),
        }
    }

    /// Default decoders with a custom renderer.
    pub fn with_renderer<R: Renderer + 'static>(renderer: R) -> Self {
        Self {
            decoders: DecoderRegistry::default(),
            renderer: Box::new(renderer),
        }
    }

    /// Register an extra decoder, or replace a built-in one.
    pub fn with_decoder(mut self, tag: MetadataTag, decoder: DecodeFn) -> Self {
        self.decoders.register(tag, decoder);
        self
    }

    /// Replace the whole decoder table.
    pub fn with_registry(mut self, decoders: DecoderRegistry) -> Self {
        self.decoders = decoders;
        self
    }

    /// Decoders in use.
    pub fn decoders(&self) -> &DecoderRegistry {
        &self.decoders
    }

    /// Rewrite `root` in place.
    pub fn transform(&self, root: &mut Root) -> Result<(), EsmatterError> {
        let mut replaced = 0usize;
        for child in root.children.iter_mut() {
            if let Some(fragment) = self.compile_node(child)? {
                *child = Node::MdxjsEsm(fragment);
                replaced += 1;
            }
        }
        log::debug!(
            "Replaced {} of {} top-level nodes with ESM fragments",
            replaced,
            root.children.len()
        );
        Ok(())
    }

    /// Build the replacement for a single node, or `None` to leave it as is.
    pub fn compile_node(&self, node: &Node) -> Result<Option<MdxjsEsm>, EsmatterError> {
        let Node::Frontmatter(frontmatter) = node else {
            return Ok(None);
        };
        let Some(data) = self.decoders.decode_frontmatter(frontmatter)? else {
            return Ok(None);
        };

        let source = self.renderer.render(&data, frontmatter)?;
        log::trace!("Rendered {} frontmatter:\n{}", frontmatter.tag, source);
        let body = compile_fragment(&source)?;

        Ok(Some(MdxjsEsm {
            value: source,
            program: program_from_body(body),
            position: frontmatter.position.clone(),
        }))
    }
}

impl TreeTransform for FrontmatterTransform {
    fn transform(&self, root: &mut Root) -> Result<(), EsmatterError> {
        FrontmatterTransform::transform(self, root)
    }
}
