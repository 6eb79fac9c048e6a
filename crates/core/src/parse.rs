//! Markdown parsing utilities and the transform pipeline around them.

use crate::tree::Root;
use crate::{EsmatterError, SourceLocation};
use markdown::mdast::Node;
use markdown::message::{Message, Place};
use std::borrow::Cow;

/// Parser options for building markdown-rs parse options.
#[derive(Clone, Copy, Debug)]
pub struct ParseOptions {
    /// Enable MDX constructs (JSX, ESM, expressions).
    pub mdx: bool,
    /// Enable GitHub Flavored Markdown constructs.
    pub gfm: bool,
    /// Enable YAML/TOML frontmatter parsing.
    pub frontmatter: bool,
    /// Enable math constructs ($inline$ and $$block$$).
    pub math: bool,
}

impl ParseOptions {
    /// Markdown-friendly defaults (no MDX).
    pub const fn markdown() -> Self {
        Self {
            mdx: false,
            gfm: true,
            frontmatter: true,
            math: false,
        }
    }

    /// MDX-friendly defaults (JSX/ESM/expression enabled).
    pub const fn mdx() -> Self {
        Self {
            mdx: true,
            gfm: true,
            frontmatter: true,
            math: false,
        }
    }

    /// Convert to markdown-rs `ParseOptions`.
    pub fn to_markdown(self) -> markdown::ParseOptions {
        let mut constructs = markdown::Constructs {
            frontmatter: self.frontmatter,
            ..Default::default()
        };

        if self.gfm {
            constructs.gfm_autolink_literal = true;
            constructs.gfm_footnote_definition = true;
            constructs.gfm_label_start_footnote = true;
            constructs.gfm_strikethrough = true;
            constructs.gfm_table = true;
            constructs.gfm_task_list_item = true;
        }

        if self.mdx {
            constructs.mdx_esm = true;
            constructs.mdx_expression_flow = true;
            constructs.mdx_expression_text = true;
            constructs.mdx_jsx_flow = true;
            constructs.mdx_jsx_text = true;
            constructs.code_indented = false;
            constructs.html_flow = false;
            constructs.html_text = false;
        }

        if self.math {
            constructs.math_flow = true;
            constructs.math_text = true;
        }

        markdown::ParseOptions {
            constructs,
            math_text_single_dollar: self.math,
            ..markdown::ParseOptions::default()
        }
    }
}

impl Default for ParseOptions {
    fn default() -> Self {
        Self::markdown()
    }
}

/// Trait for preprocessing raw markdown text before parsing.
pub trait TextTransform {
    /// Transform the input markdown text, returning an owned or borrowed string.
    fn transform<'a>(&self, input: &'a str) -> Cow<'a, str>;
}

impl<F> TextTransform for F
where
    F: for<'a> Fn(&'a str) -> Cow<'a, str>,
{
    fn transform<'a>(&self, input: &'a str) -> Cow<'a, str> {
        (self)(input)
    }
}

/// A stage that rewrites the document tree in place.
///
/// The pipeline hands the tree over exclusively for the duration of the call.
pub trait TreeTransform {
    /// Mutate the document tree in place.
    fn transform(&self, root: &mut Root) -> Result<(), EsmatterError>;
}

impl<F> TreeTransform for F
where
    F: Fn(&mut Root) -> Result<(), EsmatterError>,
{
    fn transform(&self, root: &mut Root) -> Result<(), EsmatterError> {
        (self)(root)
    }
}

/// Configurable parsing pipeline: text transforms, markdown parsing, then
/// tree transforms in registration order.
pub struct DocumentPipeline {
    options: ParseOptions,
    text_transforms: Vec<Box<dyn TextTransform>>,
    tree_transforms: Vec<Box<dyn TreeTransform>>,
}

impl DocumentPipeline {
    /// Create a new pipeline from parse options.
    pub fn new(options: ParseOptions) -> Self {
        Self {
            options,
            text_transforms: Vec::new(),
            tree_transforms: Vec::new(),
        }
    }

    /// Add a text preprocessor transform.
    pub fn add_text_transform<T: TextTransform + 'static>(&mut self, transform: T) {
        self.text_transforms.push(Box::new(transform));
    }

    /// Add a tree transform.
    pub fn add_tree_transform<T: TreeTransform + 'static>(&mut self, transform: T) {
        self.tree_transforms.push(Box::new(transform));
    }

    /// Parse markdown and run every tree transform, stopping at the first error.
    pub fn parse(&self, input: &str) -> Result<Root, EsmatterError> {
        let mut current = Cow::Borrowed(input);
        for transform in &self.text_transforms {
            let next = transform.transform(current.as_ref());
            current = Cow::Owned(next.into_owned());
        }

        let mut root = Root::parse(&current, &self.options)?;
        for transform in &self.tree_transforms {
            transform.transform(&mut root)?;
        }

        Ok(root)
    }
}

/// Parse markdown into an MDAST tree using core options.
pub fn parse_mdast(input: &str, options: &ParseOptions) -> Result<Node, EsmatterError> {
    markdown::to_mdast(input, &options.to_markdown()).map_err(|err| EsmatterError::Parse {
        message: err.to_string(),
        location: message_location(&err),
    })
}

fn message_location(message: &Message) -> SourceLocation {
    match &message.place {
        Some(place) => match place.as_ref() {
            Place::Point(point) => SourceLocation::new(point.line, point.column),
            Place::Position(position) => {
                SourceLocation::new(position.start.line, position.start.column)
            }
        },
        None => SourceLocation::new(1, 1),
    }
}
