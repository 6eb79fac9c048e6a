use thiserror::Error;

/// Source location information for error reporting
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SourceLocation {
    /// Optional file path
    pub file: Option<String>,
    /// Line number (1-indexed)
    pub line: usize,
    /// Column number (1-indexed)
    pub column: usize,
}

impl SourceLocation {
    /// Create a new source location
    pub fn new(line: usize, column: usize) -> Self {
        Self {
            file: None,
            line,
            column,
        }
    }

    /// Shift a location found inside a frontmatter block so it points into the
    /// surrounding document. `block_start_line` is the line of the opening fence.
    pub fn offset_by_block(self, block_start_line: usize) -> Self {
        Self {
            line: self.line + block_start_line,
            ..self
        }
    }
}

impl std::fmt::Display for SourceLocation {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        if let Some(file) = &self.file {
            write!(f, "{}:{}:{}", file, self.line, self.column)
        } else {
            write!(f, "{}:{}", self.line, self.column)
        }
    }
}

/// Errors that can abort a frontmatter pass.
///
/// None of these are recovered locally: the first one raised stops the
/// transform and is handed back to the host pipeline.
#[derive(Debug, Error)]
pub enum EsmatterError {
    /// markdown-rs parser error surfaced through the adapter.
    #[error("Parse error at {location}: {message}")]
    Parse {
        /// Error message
        message: String,
        /// Source location
        location: SourceLocation,
    },
    /// Frontmatter text is malformed for its declared encoding.
    #[error("{}", decode_message(.tag, .message, .location.as_ref()))]
    Decode {
        /// Encoding tag of the offending node (e.g. "yaml")
        tag: String,
        /// Decoder error message
        message: String,
        /// Location of the error, when the decoder reports one
        location: Option<SourceLocation>,
    },
    /// A renderer failed to produce source text.
    #[error("Render error: {0}")]
    Render(String),
    /// Rendered source is not a valid standalone ES module.
    #[error("Compile error at {location}: {message}")]
    Compile {
        /// Parser error message
        message: String,
        /// Location inside the rendered source
        location: SourceLocation,
    },
}

impl EsmatterError {
    /// Create a render error, for use inside custom renderers.
    pub fn render(message: impl Into<String>) -> Self {
        Self::Render(message.into())
    }

    /// Create a compile error with location
    pub fn compile_error(message: impl Into<String>, line: usize, column: usize) -> Self {
        Self::Compile {
            message: message.into(),
            location: SourceLocation::new(line, column),
        }
    }
}

fn decode_message(tag: &str, message: &str, location: Option<&SourceLocation>) -> String {
    match location {
        Some(location) => format!("Invalid {tag} frontmatter at {location}: {message}"),
        None => format!("Invalid {tag} frontmatter: {message}"),
    }
}
