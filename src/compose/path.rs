//! Path-data serialization: outlines and circle approximations to the
//! `M/L/C/Z` mini-language.

use super::engine::{Outline, Ring};

/// Control-point distance factor for a cubic Bezier quarter circle.
const KAPPA: f64 = 0.552_284_749_8;

/// Serialize an outline to path-data.
///
/// Polygons become closed `M .. L .. Z` subpaths, exterior ring first and
/// one subpath per hole; line-strings become open `M .. L ..` subpaths;
/// collections concatenate their members in order.
pub fn outline_path(outline: &Outline) -> String {
    let mut subpaths = Vec::new();
    collect_subpaths(outline, &mut subpaths);
    subpaths.join(" ")
}

fn collect_subpaths(outline: &Outline, subpaths: &mut Vec<String>) {
    match outline {
        Outline::Polygon { exterior, holes } => {
            if let Some(subpath) = ring_subpath(exterior, true) {
                subpaths.push(subpath);
            }
            for hole in holes {
                if let Some(subpath) = ring_subpath(hole, true) {
                    subpaths.push(subpath);
                }
            }
        }
        Outline::Line(coords) => {
            if let Some(subpath) = ring_subpath(coords, false) {
                subpaths.push(subpath);
            }
        }
        Outline::Multi(members) => {
            for member in members {
                collect_subpaths(member, subpaths);
            }
        }
    }
}

fn ring_subpath(coords: &Ring, closed: bool) -> Option<String> {
    let mut points = coords.iter();
    let (x, y) = points.next()?;
    let mut subpath = format!("M {},{}", fmt_coord(*x), fmt_coord(*y));
    for (x, y) in points {
        subpath.push_str(&format!(" L {},{}", fmt_coord(*x), fmt_coord(*y)));
    }
    if closed {
        subpath.push_str(" Z");
    }
    Some(subpath)
}

/// 4-segment cubic Bezier approximation of a circle.
pub fn circle_bezier(cx: f64, cy: f64, radius: f64) -> String {
    let right = fmt_coord(cx + radius);
    let left = fmt_coord(cx - radius);
    let bottom = fmt_coord(cy + radius);
    let top = fmt_coord(cy - radius);
    let x = fmt_coord(cx);
    let y = fmt_coord(cy);
    let xk_pos = fmt_coord(cx + KAPPA * radius);
    let xk_neg = fmt_coord(cx - KAPPA * radius);
    let yk_pos = fmt_coord(cy + KAPPA * radius);
    let yk_neg = fmt_coord(cy - KAPPA * radius);
    format!(
        "M {right},{y} \
         C {right},{yk_pos} {xk_pos},{bottom} {x},{bottom} \
         C {xk_neg},{bottom} {left},{yk_pos} {left},{y} \
         C {left},{yk_neg} {xk_neg},{top} {x},{top} \
         C {xk_pos},{top} {right},{yk_neg} {right},{y} Z"
    )
}

/// Fixed-decimal coordinate formatting: up to three fractional digits,
/// trailing zeros trimmed, never scientific notation.
pub fn fmt_coord(value: f64) -> String {
    let text = format!("{value:.3}");
    let trimmed = text.trim_end_matches('0').trim_end_matches('.');
    if trimmed.is_empty() || trimmed == "-" || trimmed == "-0" {
        "0".to_string()
    } else {
        trimmed.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn coordinates_format_as_fixed_decimals() {
        assert_eq!(fmt_coord(1.0), "1");
        assert_eq!(fmt_coord(0.5), "0.5");
        assert_eq!(fmt_coord(-2.25), "-2.25");
        assert_eq!(fmt_coord(1.00049), "1");
        assert_eq!(fmt_coord(0.0001), "0");
        assert_eq!(fmt_coord(-0.0001), "0");
        assert_eq!(fmt_coord(-0.0), "0");
        assert_eq!(fmt_coord(1.2345), "1.234");
    }

    #[test]
    fn polygon_outline_closes_each_ring() {
        let outline = Outline::Polygon {
            exterior: vec![(0.0, 0.0), (4.0, 0.0), (4.0, 4.0), (0.0, 4.0), (0.0, 0.0)],
            holes: vec![vec![(1.0, 1.0), (1.0, 3.0), (3.0, 3.0), (3.0, 1.0), (1.0, 1.0)]],
        };
        assert_eq!(
            outline_path(&outline),
            "M 0,0 L 4,0 L 4,4 L 0,4 L 0,0 Z \
             M 1,1 L 1,3 L 3,3 L 3,1 L 1,1 Z"
        );
    }

    #[test]
    fn line_outline_stays_open() {
        let outline = Outline::Line(vec![(0.0, 0.0), (1.0, 2.0)]);
        assert_eq!(outline_path(&outline), "M 0,0 L 1,2");
    }

    #[test]
    fn multi_outline_concatenates_members() {
        let outline = Outline::Multi(vec![
            Outline::Polygon {
                exterior: vec![(0.0, 0.0), (1.0, 0.0), (1.0, 1.0), (0.0, 0.0)],
                holes: vec![],
            },
            Outline::Line(vec![(5.0, 5.0), (6.0, 5.0)]),
        ]);
        assert_eq!(
            outline_path(&outline),
            "M 0,0 L 1,0 L 1,1 L 0,0 Z M 5,5 L 6,5"
        );
    }

    #[test]
    fn empty_rings_produce_nothing() {
        let outline = Outline::Multi(vec![Outline::Line(vec![])]);
        assert_eq!(outline_path(&outline), "");
    }

    #[test]
    fn circle_bezier_has_four_segments() {
        let path = circle_bezier(0.0, 0.0, 2.0);
        assert!(path.starts_with("M 2,0 C "));
        assert!(path.ends_with("2,0 Z"));
        assert_eq!(path.matches('C').count(), 4);
        // kappa * 2 rounds to 1.105
        assert!(path.contains("1.105"));
    }
}
