//! Narrow contract over the 2D geometry engine, and the production
//! implementation backed by the `geo` crate.
//!
//! The composer only ever talks to [`GeometryEngine`]. `Area` values are
//! owned resources: dropping one releases it and [`GeometryEngine::union`]
//! consumes both operands, so every intermediate an implementation hands
//! out is released exactly once on every exit path, including errors.

use geo::geometry::{Coord, Geometry, LineString, MultiPolygon, Polygon};
use geo::{Area as _, BooleanOps, Centroid};
use glam::Vec2;

use crate::errors::GeometryError;

/// Segment resolution for circular buffering: vertices per quarter circle.
pub const QUADRANT_SEGMENTS: u32 = 8;

/// A ring or line of coordinates, in drawing order.
pub type Ring = Vec<(f64, f64)>;

/// Structured view of an area geometry, for path-data serialization.
#[derive(Debug, Clone, PartialEq)]
pub enum Outline {
    /// Filled polygon: exterior ring plus zero or more interior rings
    /// (holes), each closed.
    Polygon { exterior: Ring, holes: Vec<Ring> },
    /// Open line-string. Only degenerate zero-width results take this form.
    Line(Ring),
    /// Collection serialized member by member, in engine-returned order.
    Multi(Vec<Outline>),
}

/// Boolean-geometry engine the composer runs on.
pub trait GeometryEngine {
    /// An owned area geometry; dropping it releases the resource.
    type Area;

    /// Buffer an open polyline outward by `distance` into a filled area.
    ///
    /// Fails for fewer than two points. A non-positive distance yields the
    /// bare line-string instead of an area.
    fn buffer_polyline(
        &self,
        points: &[Vec2],
        distance: f32,
        segments: u32,
    ) -> Result<Self::Area, GeometryError>;

    /// Build a filled polygon from a closed ring of vertices.
    fn ring_polygon(&self, ring: &[Vec2]) -> Result<Self::Area, GeometryError>;

    /// Buffer a single point by `radius` into a disk.
    fn buffer_point(
        &self,
        center: Vec2,
        radius: f32,
        segments: u32,
    ) -> Result<Self::Area, GeometryError>;

    /// Boolean union, consuming both operands.
    fn union(&self, a: Self::Area, b: Self::Area) -> Result<Self::Area, GeometryError>;

    /// Measured area of the geometry.
    fn area(&self, area: &Self::Area) -> f64;

    /// Centroid of the geometry.
    fn centroid(&self, area: &Self::Area) -> Result<(f64, f64), GeometryError>;

    /// Structured outline for serialization.
    fn outline(&self, area: &Self::Area) -> Result<Outline, GeometryError>;
}

/// Production engine on top of the `geo` crate.
///
/// Boolean union, area and centroid come straight from `geo`. Buffering is
/// composed from primitives: a polyline buffers into one oriented quad per
/// segment plus a joint disk per vertex, all unioned; a point buffers into
/// a regular polygon with `4 * segments` vertices.
#[derive(Debug, Clone, Copy, Default)]
pub struct GeoEngine;

impl GeoEngine {
    fn coord(point: Vec2) -> Result<Coord<f64>, GeometryError> {
        if point.x.is_finite() && point.y.is_finite() {
            Ok(Coord {
                x: f64::from(point.x),
                y: f64::from(point.y),
            })
        } else {
            Err(GeometryError::NonFinite)
        }
    }

    /// Regular polygon approximating a disk.
    fn disk(center: Coord<f64>, radius: f64, segments: u32) -> Polygon<f64> {
        let vertices = (segments * 4).max(4);
        let ring: Vec<Coord<f64>> = (0..vertices)
            .map(|i| {
                let theta = std::f64::consts::TAU * f64::from(i) / f64::from(vertices);
                Coord {
                    x: center.x + radius * theta.cos(),
                    y: center.y + radius * theta.sin(),
                }
            })
            .collect();
        Polygon::new(LineString::new(ring), vec![])
    }

    /// Oriented quad covering one stroked segment, or None when the
    /// segment has zero length.
    fn segment_quad(a: Coord<f64>, b: Coord<f64>, half: f64) -> Option<Polygon<f64>> {
        let dx = b.x - a.x;
        let dy = b.y - a.y;
        let length = (dx * dx + dy * dy).sqrt();
        if length == 0.0 {
            return None;
        }
        let px = -dy / length * half;
        let py = dx / length * half;
        let ring = vec![
            Coord { x: a.x + px, y: a.y + py },
            Coord { x: b.x + px, y: b.y + py },
            Coord { x: b.x - px, y: b.y - py },
            Coord { x: a.x - px, y: a.y - py },
        ];
        Some(Polygon::new(LineString::new(ring), vec![]))
    }
}

impl GeometryEngine for GeoEngine {
    type Area = Geometry<f64>;

    fn buffer_polyline(
        &self,
        points: &[Vec2],
        distance: f32,
        segments: u32,
    ) -> Result<Self::Area, GeometryError> {
        if points.len() < 2 {
            return Err(GeometryError::TooFewPositions {
                count: points.len(),
            });
        }
        let coords = points
            .iter()
            .map(|&point| Self::coord(point))
            .collect::<Result<Vec<_>, _>>()?;
        if distance <= 0.0 {
            // Zero-width strokes stay unbuffered.
            return Ok(Geometry::LineString(LineString::new(coords)));
        }

        let half = f64::from(distance);
        let mut buffered = MultiPolygon::new(vec![Self::disk(coords[0], half, segments)]);
        for pair in coords.windows(2) {
            if let Some(quad) = Self::segment_quad(pair[0], pair[1], half) {
                buffered = buffered.union(&MultiPolygon::new(vec![quad]));
            }
            buffered = buffered.union(&MultiPolygon::new(vec![Self::disk(pair[1], half, segments)]));
        }
        Ok(Geometry::MultiPolygon(buffered))
    }

    fn ring_polygon(&self, ring: &[Vec2]) -> Result<Self::Area, GeometryError> {
        if ring.len() < 3 {
            return Err(GeometryError::DegenerateRing { count: ring.len() });
        }
        let coords = ring
            .iter()
            .map(|&point| Self::coord(point))
            .collect::<Result<Vec<_>, _>>()?;
        Ok(Geometry::Polygon(Polygon::new(
            LineString::new(coords),
            vec![],
        )))
    }

    fn buffer_point(
        &self,
        center: Vec2,
        radius: f32,
        segments: u32,
    ) -> Result<Self::Area, GeometryError> {
        if !(radius > 0.0) {
            return Err(GeometryError::InvalidRadius { radius });
        }
        let center = Self::coord(center)?;
        Ok(Geometry::Polygon(Self::disk(
            center,
            f64::from(radius),
            segments,
        )))
    }

    fn union(&self, a: Self::Area, b: Self::Area) -> Result<Self::Area, GeometryError> {
        let a = into_areal(a)?;
        let b = into_areal(b)?;
        Ok(Geometry::MultiPolygon(a.union(&b)))
    }

    fn area(&self, area: &Self::Area) -> f64 {
        area.unsigned_area()
    }

    fn centroid(&self, area: &Self::Area) -> Result<(f64, f64), GeometryError> {
        area.centroid()
            .map(|point| (point.x(), point.y()))
            .ok_or(GeometryError::NoCentroid)
    }

    fn outline(&self, area: &Self::Area) -> Result<Outline, GeometryError> {
        match area {
            Geometry::Polygon(polygon) => Ok(polygon_outline(polygon)),
            Geometry::MultiPolygon(multi) => Ok(Outline::Multi(
                multi.0.iter().map(polygon_outline).collect(),
            )),
            Geometry::LineString(line) => Ok(Outline::Line(ring_coords(line))),
            Geometry::MultiLineString(multi) => Ok(Outline::Multi(
                multi.0.iter().map(|line| Outline::Line(ring_coords(line))).collect(),
            )),
            other => Err(GeometryError::UnsupportedGeometry {
                kind: kind_name(other),
            }),
        }
    }
}

fn ring_coords(line: &LineString<f64>) -> Ring {
    line.coords().map(|coord| (coord.x, coord.y)).collect()
}

fn polygon_outline(polygon: &Polygon<f64>) -> Outline {
    Outline::Polygon {
        exterior: ring_coords(polygon.exterior()),
        holes: polygon.interiors().iter().map(ring_coords).collect(),
    }
}

/// Union only operates on areal geometry; anything else is an algebra
/// failure that aborts the icon.
fn into_areal(geometry: Geometry<f64>) -> Result<MultiPolygon<f64>, GeometryError> {
    match geometry {
        Geometry::Polygon(polygon) => Ok(MultiPolygon::new(vec![polygon])),
        Geometry::MultiPolygon(multi) => Ok(multi),
        other => Err(GeometryError::UnsupportedGeometry {
            kind: kind_name(&other),
        }),
    }
}

fn kind_name(geometry: &Geometry<f64>) -> &'static str {
    match geometry {
        Geometry::Point(_) => "Point",
        Geometry::Line(_) => "Line",
        Geometry::LineString(_) => "LineString",
        Geometry::Polygon(_) => "Polygon",
        Geometry::MultiPoint(_) => "MultiPoint",
        Geometry::MultiLineString(_) => "MultiLineString",
        Geometry::MultiPolygon(_) => "MultiPolygon",
        Geometry::GeometryCollection(_) => "GeometryCollection",
        Geometry::Rect(_) => "Rect",
        Geometry::Triangle(_) => "Triangle",
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::f64::consts::PI;

    const ENGINE: GeoEngine = GeoEngine;

    fn v(x: f32, y: f32) -> Vec2 {
        Vec2::new(x, y)
    }

    #[test]
    fn too_few_positions_is_an_error() {
        let result = ENGINE.buffer_polyline(&[v(0.0, 0.0)], 0.5, QUADRANT_SEGMENTS);
        assert_eq!(
            result.err(),
            Some(GeometryError::TooFewPositions { count: 1 })
        );
    }

    #[test]
    fn non_positive_radius_is_an_error() {
        let result = ENGINE.buffer_point(v(0.0, 0.0), 0.0, QUADRANT_SEGMENTS);
        assert_eq!(result.err(), Some(GeometryError::InvalidRadius { radius: 0.0 }));
    }

    #[test]
    fn disk_area_approaches_circle_area() {
        let disk = ENGINE
            .buffer_point(v(0.0, 0.0), 2.0, QUADRANT_SEGMENTS)
            .unwrap();
        let area = ENGINE.area(&disk);
        // A 32-gon underestimates the disk slightly.
        assert!(area < PI * 4.0);
        assert!(area > PI * 4.0 * 0.99);
    }

    #[test]
    fn disk_centroid_is_its_center() {
        let disk = ENGINE
            .buffer_point(v(3.0, -1.0), 1.0, QUADRANT_SEGMENTS)
            .unwrap();
        let (cx, cy) = ENGINE.centroid(&disk).unwrap();
        assert!((cx - 3.0).abs() < 1e-9);
        assert!((cy + 1.0).abs() < 1e-9);
    }

    #[test]
    fn zero_width_polyline_stays_a_line() {
        let line = ENGINE
            .buffer_polyline(&[v(0.0, 0.0), v(2.0, 0.0)], 0.0, QUADRANT_SEGMENTS)
            .unwrap();
        match ENGINE.outline(&line).unwrap() {
            Outline::Line(coords) => assert_eq!(coords, vec![(0.0, 0.0), (2.0, 0.0)]),
            other => panic!("expected a line outline, got {other:?}"),
        }
    }

    #[test]
    fn buffered_polyline_covers_the_stroke() {
        let stroke = ENGINE
            .buffer_polyline(&[v(0.0, 0.0), v(4.0, 0.0)], 0.5, QUADRANT_SEGMENTS)
            .unwrap();
        let area = ENGINE.area(&stroke);
        // Quad of 4 x 1 plus two end caps of radius 0.5.
        let expected = 4.0 + PI * 0.25;
        assert!((area - expected).abs() < 0.1, "area {area} vs {expected}");
    }

    #[test]
    fn union_of_disjoint_squares_adds_areas() {
        let a = ENGINE
            .ring_polygon(&[v(0.0, 0.0), v(1.0, 0.0), v(1.0, 1.0), v(0.0, 1.0)])
            .unwrap();
        let b = ENGINE
            .ring_polygon(&[v(5.0, 0.0), v(6.0, 0.0), v(6.0, 1.0), v(5.0, 1.0)])
            .unwrap();
        let union = ENGINE.union(a, b).unwrap();
        assert!((ENGINE.area(&union) - 2.0).abs() < 1e-9);
    }

    #[test]
    fn union_of_overlapping_squares_merges() {
        let a = ENGINE
            .ring_polygon(&[v(0.0, 0.0), v(2.0, 0.0), v(2.0, 2.0), v(0.0, 2.0)])
            .unwrap();
        let b = ENGINE
            .ring_polygon(&[v(1.0, 0.0), v(3.0, 0.0), v(3.0, 2.0), v(1.0, 2.0)])
            .unwrap();
        let union = ENGINE.union(a, b).unwrap();
        assert!((ENGINE.area(&union) - 6.0).abs() < 1e-9);
        match ENGINE.outline(&union).unwrap() {
            Outline::Multi(members) => assert_eq!(members.len(), 1),
            other => panic!("expected one merged polygon, got {other:?}"),
        }
    }

    #[test]
    fn union_with_a_line_operand_fails() {
        let line = ENGINE
            .buffer_polyline(&[v(0.0, 0.0), v(1.0, 0.0)], 0.0, QUADRANT_SEGMENTS)
            .unwrap();
        let square = ENGINE
            .ring_polygon(&[v(0.0, 0.0), v(1.0, 0.0), v(1.0, 1.0), v(0.0, 1.0)])
            .unwrap();
        let result = ENGINE.union(line, square);
        assert_eq!(
            result.err(),
            Some(GeometryError::UnsupportedGeometry { kind: "LineString" })
        );
    }

    #[test]
    fn non_finite_coordinates_are_rejected() {
        let result = ENGINE.ring_polygon(&[
            v(0.0, 0.0),
            v(f32::NAN, 0.0),
            v(1.0, 1.0),
        ]);
        assert_eq!(result.err(), Some(GeometryError::NonFinite));
    }
}
