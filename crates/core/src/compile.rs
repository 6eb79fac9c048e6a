//! Parses rendered source into an ES module body with SWC.

use crate::EsmatterError;
use swc_core::common::sync::Lrc;
use swc_core::common::{DUMMY_SP, FileName, SourceMap, Span, Spanned};
use swc_core::ecma::ast::{EsVersion, Module, ModuleItem};
use swc_core::ecma::parser::error::Error as SwcError;
use swc_core::ecma::parser::{EsConfig, Syntax, parse_file_as_module};

/// Parse `source` as a standalone ES module and return its statements.
///
/// The source sees no bindings besides its own. Recovered syntax errors are
/// treated the same as fatal ones.
pub fn compile_fragment(source: &str) -> Result<Vec<ModuleItem>, EsmatterError> {
    let source_map: Lrc<SourceMap> = Default::default();
    let file = source_map.new_source_file(
        FileName::Custom("frontmatter.mjs".into()),
        source.to_string(),
    );

    let mut recovered = Vec::new();
    let result = parse_file_as_module(
        &file,
        Syntax::Es(EsConfig::default()),
        EsVersion::Es2022,
        None,
        &mut recovered,
    );

    match result {
        Ok(_) if !recovered.is_empty() => Err(swc_error(&source_map, recovered.remove(0))),
        Ok(module) => Ok(module.body),
        Err(err) => Err(swc_error(&source_map, err)),
    }
}

/// Wrap a statement list in a synthetic module-scoped program.
pub fn program_from_body(body: Vec<ModuleItem>) -> Module {
    Module {
        span: DUMMY_SP,
        body,
        shebang: None,
    }
}

fn swc_error(source_map: &SourceMap, err: SwcError) -> EsmatterError {
    let (line, column) = span_start(source_map, err.span());
    EsmatterError::compile_error(err.into_kind().msg(), line, column)
}

fn span_start(source_map: &SourceMap, span: Span) -> (usize, usize) {
    if span.is_dummy() {
        return (1, 1);
    }
    let loc = source_map.lookup_char_pos(span.lo);
    (loc.line, loc.col_display + 1)
}
