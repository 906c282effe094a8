//! iconscript: a compiler for a small icon-description language.
//!
//! A script of primitive shape commands (lines, rectangles, circles, arcs)
//! is interpreted into named icons, and each icon's figures are composed
//! into one filled vector outline by buffering strokes and unioning the
//! resulting areas. The pipeline is:
//!
//! ```text
//! source text --parse--> pairs --interpret--> icons --compose--> path-data
//! ```
//!
//! [`compile`] runs the whole pipeline; [`interpret_script`] stops after
//! interpretation when only the figure model is needed.

use pest::Parser;
use pest_derive::Parser;

pub mod compose;
pub mod errors;
pub mod figure;
pub mod interpret;
pub mod log;
pub mod svg;

use compose::{GeoEngine, compose_icon};
use errors::{CompileError, ScriptError};
use figure::Icon;
use interpret::Interpreter;

#[derive(Parser)]
#[grammar = "iconscript.pest"]
pub struct IconScriptParser;

/// A finalized icon together with its composed path-data.
///
/// The path-data is empty for icons whose figures produced no area; the
/// caller decides whether to skip those on output.
#[derive(Debug, Clone, PartialEq)]
pub struct CompiledIcon {
    pub name: String,
    pub path_data: String,
}

/// Parse and interpret a script into finalized icons.
pub fn interpret_script(source: &str) -> Result<Vec<Icon>, CompileError> {
    let mut pairs = IconScriptParser::parse(Rule::script, source)
        .map_err(|error| ScriptError::from_pest("<input>", source, error))?;
    let script = pairs.next().expect("script rule always yields one pair");
    Ok(Interpreter::new().run(script))
}

/// Compile a script into per-icon path-data.
pub fn compile(source: &str) -> Result<Vec<CompiledIcon>, CompileError> {
    let icons = interpret_script(source)?;
    let engine = GeoEngine;
    let mut compiled = Vec::with_capacity(icons.len());
    for icon in &icons {
        let path_data = compose_icon(&engine, icon)?;
        compiled.push(CompiledIcon {
            name: icon.name.clone(),
            path_data,
        });
    }
    Ok(compiled)
}
