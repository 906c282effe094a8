//! Shared value types: positions, drawing state, figures and icons.

use glam::Vec2;

/// A 2D point on the drawing plane. Plain value, no identity.
pub type Position = Vec2;

/// Default stroke width for freshly reset drawing state.
pub const DEFAULT_WIDTH: f32 = 1.0;

/// Resolved drawing state at a point in the script.
///
/// Contexts form a stack: entering a scope pushes a copy of the top
/// context, exiting pops it, so changes made inside a scope are discarded
/// when the scope closes.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DrawingContext {
    /// Position the next relative coordinate resolves against.
    pub position: Position,
    /// Stroke width snapshotted into figures as they are created.
    pub width: f32,
    /// Whether figures combine additively (`a`) or subtractively (`r`).
    /// Only union is composed; the flag is threaded state.
    pub union_mode: bool,
}

impl Default for DrawingContext {
    fn default() -> Self {
        Self {
            position: Position::ZERO,
            width: DEFAULT_WIDTH,
            union_mode: true,
        }
    }
}

/// One primitive shape with the stroke width captured at creation time.
///
/// The width is a snapshot of the drawing context, not a live reference:
/// later `w` commands never affect already-recorded figures.
#[derive(Debug, Clone, PartialEq)]
pub enum Figure {
    /// Polyline through two or more positions, optionally filled.
    Line {
        positions: Vec<Position>,
        filled: bool,
        width: f32,
    },
    /// Axis-aligned rectangle between two corners.
    Rectangle {
        start: Position,
        end: Position,
        width: f32,
    },
    /// Circle around a center.
    Circle {
        center: Position,
        radius: f32,
        width: f32,
    },
    /// Part of a circle; angles are in radians.
    Arc {
        center: Position,
        radius: f32,
        start_angle: f32,
        end_angle: f32,
        width: f32,
    },
}

/// A named, finalized collection of figures forming one vector glyph.
///
/// Icons are immutable once the interpreter finalizes them; the composer
/// only derives new values from them.
#[derive(Debug, Clone, PartialEq)]
pub struct Icon {
    pub name: String,
    pub figures: Vec<Figure>,
}
