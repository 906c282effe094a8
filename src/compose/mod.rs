//! Geometry composer: map figures to filled areas, union them per icon,
//! and serialize the result to path-data.
//!
//! Figures are processed strictly in declaration order; the union itself is
//! order-independent but the emitted vertex order, and therefore the exact
//! path-data bytes, are not.

pub mod engine;
pub mod path;

pub use engine::{GeoEngine, GeometryEngine, Outline, QUADRANT_SEGMENTS};

use crate::errors::{ComposeError, GeometryError};
use crate::figure::{Figure, Icon, Position};

/// Compose one icon's figures into a single path-data string.
///
/// An icon with no figures yields an empty string without touching the
/// engine. Any engine failure aborts this icon only, naming it.
pub fn compose_icon<E: GeometryEngine>(engine: &E, icon: &Icon) -> Result<String, ComposeError> {
    compose(engine, icon).map_err(|source| ComposeError {
        icon: icon.name.clone(),
        source,
    })
}

fn compose<E: GeometryEngine>(engine: &E, icon: &Icon) -> Result<String, GeometryError> {
    if icon.figures.is_empty() {
        return Ok(String::new());
    }

    let mut pieces: Vec<String> = Vec::new();
    let mut areas: Vec<E::Area> = Vec::new();
    for figure in &icon.figures {
        match figure {
            Figure::Line {
                positions, width, ..
            } => {
                areas.push(engine.buffer_polyline(positions, width / 2.0, QUADRANT_SEGMENTS)?);
            }
            Figure::Rectangle { start, end, .. } => {
                let ring = [
                    *start,
                    Position::new(end.x, start.y),
                    *end,
                    Position::new(start.x, end.y),
                ];
                areas.push(engine.ring_polygon(&ring)?);
            }
            Figure::Circle { center, radius, .. } => {
                let disk = engine.buffer_point(*center, *radius, QUADRANT_SEGMENTS)?;
                // The Bezier outline reflects the disk as built, not the
                // declared radius: center and radius are measured back
                // from the buffered geometry.
                let (cx, cy) = engine.centroid(&disk)?;
                let measured = (engine.area(&disk) / std::f64::consts::PI).sqrt();
                pieces.push(path::circle_bezier(cx, cy, measured));
                areas.push(disk);
            }
            // Arcs are parsed but not yet fillable; they stay out of the
            // union geometry.
            Figure::Arc { .. } => {}
        }
    }

    let mut remaining = areas.into_iter();
    if let Some(first) = remaining.next() {
        let unioned = remaining.try_fold(first, |acc, next| engine.union(acc, next))?;
        let outline = engine.outline(&unioned)?;
        let serialized = path::outline_path(&outline);
        if !serialized.is_empty() {
            pieces.push(serialized);
        }
    }
    Ok(pieces.join(" "))
}
