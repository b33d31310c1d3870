//! Drawable data for one frame, independent of any drawing API.
//!
//! Scenes turn renderer output into these primitives; the SVG writer and the
//! browser adapter only ever read them.

use fieldfx_core::DVec2;

/// An open polyline, drawn with a single stroke.
#[derive(Debug, Clone, PartialEq)]
pub struct Polyline {
    pub points: Vec<DVec2>,
    pub stroke: String,
    pub stroke_width: f64,
}

/// A straight line between two points.
#[derive(Debug, Clone, PartialEq)]
pub struct Segment {
    pub from: DVec2,
    pub to: DVec2,
    pub stroke: String,
    pub stroke_width: f64,
}

/// A labelled node drawn as a pill centred on `center`.
#[derive(Debug, Clone, PartialEq)]
pub struct NodeMark {
    pub center: DVec2,
    /// Half the pill width; the pill height is fixed by the drawing layer.
    pub half_width: f64,
    pub label: String,
    /// CSS colour of the pill body.
    pub fill: String,
    /// CSS colour of the pill outline.
    pub stroke: String,
    /// CSS colour of the label text.
    pub label_fill: String,
    /// Whether the cursor is over the node.
    pub hover: bool,
}

/// A filled dot, e.g. the accent following the cursor.
#[derive(Debug, Clone, PartialEq)]
pub struct Dot {
    pub center: DVec2,
    pub radius: f64,
    pub fill: String,
}

/// Everything a scene draws in one frame, in paint order.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Frame {
    pub polylines: Vec<Polyline>,
    pub segments: Vec<Segment>,
    pub nodes: Vec<NodeMark>,
    pub dots: Vec<Dot>,
}

impl Frame {
    /// True when there is nothing to draw.
    pub fn is_empty(&self) -> bool {
        self.polylines.is_empty()
            && self.segments.is_empty()
            && self.nodes.is_empty()
            && self.dots.is_empty()
    }
}

/// SVG `points` attribute: `"x,y x,y ..."` with two decimals.
pub fn polyline_points(points: &[DVec2]) -> String {
    points
        .iter()
        .map(|p| format!("{:.2},{:.2}", p.x, p.y))
        .collect::<Vec<_>>()
        .join(" ")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn polyline_points_uses_two_decimals() {
        let s = polyline_points(&[DVec2::new(0.0, 0.0), DVec2::new(5.126, 60.0)]);
        assert_eq!(s, "0.00,0.00 5.13,60.00");
    }

    #[test]
    fn polyline_points_of_nothing_is_empty() {
        assert_eq!(polyline_points(&[]), "");
    }

    #[test]
    fn default_frame_is_empty() {
        assert!(Frame::default().is_empty());
        let f = Frame {
            dots: vec![Dot {
                center: DVec2::ZERO,
                radius: 1.0,
                fill: "red".into(),
            }],
            ..Frame::default()
        };
        assert!(!f.is_empty());
    }
}
