//! Document tree handed to the frontmatter stage.
//!
//! markdown-rs trees cannot hold a parsed ES module, so the top level of a
//! document is lifted into [`Root`]: frontmatter blocks and compiled fragments
//! get their own variants, everything else is carried as an mdast node.

use crate::EsmatterError;
use crate::parse::{ParseOptions, parse_mdast};
use markdown::mdast;
use markdown::unist::Position;
use swc_core::ecma::ast::{Module, ModuleItem};

/// Encoding declared by a frontmatter block.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum MetadataTag {
    /// `---` fenced YAML.
    Yaml,
    /// `+++` fenced TOML.
    Toml,
    /// Any other encoding a host pipeline produces itself.
    Custom(String),
}

impl MetadataTag {
    /// Node type name for this tag.
    pub fn as_str(&self) -> &str {
        match self {
            MetadataTag::Yaml => "yaml",
            MetadataTag::Toml => "toml",
            MetadataTag::Custom(name) => name,
        }
    }
}

impl std::fmt::Display for MetadataTag {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A raw frontmatter block.
#[derive(Debug, Clone, PartialEq)]
pub struct Frontmatter {
    /// Declared encoding.
    pub tag: MetadataTag,
    /// Text between the fences.
    pub value: String,
    /// Location of the block, fences included.
    pub position: Option<Position>,
}

impl Frontmatter {
    /// Create a frontmatter node without position information.
    pub fn new(tag: MetadataTag, value: impl Into<String>) -> Self {
        Self {
            tag,
            value: value.into(),
            position: None,
        }
    }
}

/// An ES module fragment spliced into the document.
#[derive(Debug, Clone, PartialEq)]
pub struct MdxjsEsm {
    /// Source text the program was compiled from.
    pub value: String,
    /// Module-scoped program; its body is the compiled statement list.
    pub program: Module,
    /// Location of the node this fragment replaced.
    pub position: Option<Position>,
}

impl MdxjsEsm {
    /// Statements of the fragment, in source order.
    pub fn body(&self) -> &[ModuleItem] {
        &self.program.body
    }
}

/// A top-level document node.
#[derive(Debug, Clone, PartialEq)]
pub enum Node {
    /// Frontmatter awaiting decoding.
    Frontmatter(Frontmatter),
    /// Executable module fragment.
    MdxjsEsm(MdxjsEsm),
    /// Any other markdown content, left as parsed.
    Markdown(mdast::Node),
}

impl Node {
    /// Discriminant string for frontmatter and fragment nodes.
    ///
    /// Plain markdown nodes report `None`; this stage never dispatches on them.
    pub fn kind(&self) -> Option<&str> {
        match self {
            Node::Frontmatter(frontmatter) => Some(frontmatter.tag.as_str()),
            Node::MdxjsEsm(_) => Some("mdxjsEsm"),
            Node::Markdown(_) => None,
        }
    }

    /// Position of the node in the source document, if known.
    pub fn position(&self) -> Option<&Position> {
        match self {
            Node::Frontmatter(frontmatter) => frontmatter.position.as_ref(),
            Node::MdxjsEsm(esm) => esm.position.as_ref(),
            Node::Markdown(node) => node.position(),
        }
    }
}

impl From<mdast::Node> for Node {
    fn from(node: mdast::Node) -> Self {
        match node {
            mdast::Node::Yaml(mdast::Yaml { value, position }) => Node::Frontmatter(Frontmatter {
                tag: MetadataTag::Yaml,
                value,
                position,
            }),
            mdast::Node::Toml(mdast::Toml { value, position }) => Node::Frontmatter(Frontmatter {
                tag: MetadataTag::Toml,
                value,
                position,
            }),
            other => Node::Markdown(other),
        }
    }
}

/// Document root. Only `children` is rewritten by tree transforms.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Root {
    /// Top-level nodes in document order.
    pub children: Vec<Node>,
    /// Location of the whole document.
    pub position: Option<Position>,
}

impl Root {
    /// Create a root from top-level nodes.
    pub fn new(children: Vec<Node>) -> Self {
        Self {
            children,
            position: None,
        }
    }

    /// Lift a markdown-rs root into a document tree.
    pub fn from_mdast(root: mdast::Root) -> Self {
        Self {
            children: root.children.into_iter().map(Node::from).collect(),
            position: root.position,
        }
    }

    /// Parse markdown and lift the result.
    pub fn parse(input: &str, options: &ParseOptions) -> Result<Self, EsmatterError> {
        match parse_mdast(input, options)? {
            mdast::Node::Root(root) => Ok(Self::from_mdast(root)),
            other => Ok(Self {
                position: other.position().cloned(),
                children: vec![Node::from(other)],
            }),
        }
    }

    /// Compiled fragments in document order.
    pub fn fragments(&self) -> impl Iterator<Item = &MdxjsEsm> {
        self.children.iter().filter_map(|child| match child {
            Node::MdxjsEsm(esm) => Some(esm),
            _ => None,
        })
    }
}
