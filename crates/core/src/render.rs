//! Renderers turn decoded frontmatter into standalone module source.
//!
//! Whatever a renderer returns is parsed on its own as an ES module, so it can
//! use top-level `import`/`export` but cannot rely on any surrounding scope.

use crate::EsmatterError;
use crate::tree::Frontmatter;
use serde_json::Value as JsonValue;

/// Converts decoded frontmatter into ES module source text.
pub trait Renderer {
    /// Render `data`, decoded from `node`, as module source.
    fn render(&self, data: &JsonValue, node: &Frontmatter) -> Result<String, EsmatterError>;
}

impl<F> Renderer for F
where
    F: Fn(&JsonValue, &Frontmatter) -> Result<String, EsmatterError>,
{
    fn render(&self, data: &JsonValue, node: &Frontmatter) -> Result<String, EsmatterError> {
        (self)(data, node)
    }
}

/// Default renderer: an async `getStaticProps` export returning `{ props: data }`.
#[derive(Debug, Clone, Copy, Default)]
pub struct StaticPropsRenderer;

impl Renderer for StaticPropsRenderer {
    fn render(&self, data: &JsonValue, _node: &Frontmatter) -> Result<String, EsmatterError> {
        let literal = json_literal(data)?;
        Ok(format!(
            "export const getStaticProps = async () => {{\n  return {{ props: {literal} }}\n}}\n"
        ))
    }
}

/// Exports the data as a named constant, e.g. `export const frontmatter = {...};`.
#[derive(Debug, Clone)]
pub struct ExportRenderer {
    name: String,
}

impl ExportRenderer {
    /// Binding name used when none is configured.
    pub const DEFAULT_NAME: &'static str = "frontmatter";

    /// Create a renderer exporting under `name`.
    pub fn new(name: impl Into<String>) -> Self {
        Self { name: name.into() }
    }

    /// The exported binding name.
    pub fn name(&self) -> &str {
        &self.name
    }
}

impl Default for ExportRenderer {
    fn default() -> Self {
        Self::new(Self::DEFAULT_NAME)
    }
}

impl Renderer for ExportRenderer {
    fn render(&self, data: &JsonValue, _node: &Frontmatter) -> Result<String, EsmatterError> {
        if !is_identifier(&self.name) {
            return Err(EsmatterError::render(format!(
                "'{}' is not a valid export name",
                self.name
            )));
        }
        let literal = json_literal(data)?;
        Ok(format!("export const {} = {literal};\n", self.name))
    }
}

/// Serialize `data` as a JSON literal, which JavaScript parses back to the same value.
pub fn json_literal(data: &JsonValue) -> Result<String, EsmatterError> {
    serde_json::to_string(data).map_err(|err| EsmatterError::render(err.to_string()))
}

/// Words that cannot name a `const` binding in module code.
const RESERVED_WORDS: &[&str] = &[
    "await", "break", "case", "catch", "class", "const", "continue", "debugger", "default",
    "delete", "do", "else", "enum", "export", "extends", "false", "finally", "for", "function",
    "if", "implements", "import", "in", "instanceof", "interface", "let", "new", "null",
    "package", "private", "protected", "public", "return", "static", "super", "switch", "this",
    "throw", "true", "try", "typeof", "var", "void", "while", "with", "yield",
];

fn is_identifier(name: &str) -> bool {
    if RESERVED_WORDS.contains(&name) {
        return false;
    }
    let mut chars = name.chars();
    match chars.next() {
        Some(first) if first.is_alphabetic() || first == '_' || first == '$' => {}
        _ => return false,
    }
    chars.all(|c| c.is_alphanumeric() || c == '_' || c == '$')
}
