//! Error types with diagnostics via miette.
//!
//! Interpreter-level problems (missing Y, figure outside an icon) are
//! recoverable and only logged; everything here is a hard failure that
//! aborts compilation of a script or of a single icon.

use miette::{Diagnostic, NamedSource, SourceSpan};
use thiserror::Error;

use crate::Rule;

/// Failure inside the geometry engine or the composition algorithm.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum GeometryError {
    #[error("polyline needs at least 2 positions, got {count}")]
    TooFewPositions { count: usize },

    #[error("ring needs at least 3 vertices, got {count}")]
    DegenerateRing { count: usize },

    #[error("cannot buffer a point by non-positive radius {radius}")]
    InvalidRadius { radius: f32 },

    #[error("coordinate is NaN or infinite")]
    NonFinite,

    #[error("geometry has no centroid")]
    NoCentroid,

    /// Serialization hit a geometry kind outside the figure set in scope.
    /// This is a programming error, not a data error.
    #[error("unsupported geometry kind `{kind}` in output")]
    UnsupportedGeometry { kind: &'static str },
}

/// A composition failure, naming the icon whose output was aborted.
#[derive(Error, Diagnostic, Debug)]
#[error("failed to compose icon `{icon}`")]
#[diagnostic(code(iconscript::compose))]
pub struct ComposeError {
    pub icon: String,
    #[source]
    pub source: GeometryError,
}

/// Script-level syntax failure, with the offending span.
#[derive(Error, Diagnostic, Debug)]
#[error("parse error")]
#[diagnostic(code(iconscript::parse))]
pub struct ScriptError {
    #[source_code]
    pub src: NamedSource<String>,
    #[label("{message}")]
    pub span: SourceSpan,
    pub message: String,
}

impl ScriptError {
    /// Convert a pest error into a spanned diagnostic.
    pub fn from_pest(name: &str, source: &str, error: pest::error::Error<Rule>) -> Self {
        use pest::error::InputLocation;

        let (offset, len) = match error.location {
            InputLocation::Pos(pos) => (pos.min(source.len()), 1),
            InputLocation::Span((start, end)) => (start, end.saturating_sub(start).max(1)),
        };
        Self {
            src: NamedSource::new(name, source.to_string()),
            span: (offset, len).into(),
            message: error.variant.message().into_owned(),
        }
    }
}

/// Any failure `compile` can report.
#[derive(Error, Diagnostic, Debug)]
pub enum CompileError {
    #[error(transparent)]
    #[diagnostic(transparent)]
    Parse(#[from] ScriptError),

    #[error(transparent)]
    #[diagnostic(transparent)]
    Compose(#[from] ComposeError),
}
