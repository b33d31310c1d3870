//! Serializes a [`Frame`] as a standalone SVG document.
//!
//! Always available (no I/O) so tests and the snapshot writer share it.

use crate::frame::{polyline_points, Frame};
use fieldfx_core::DVec2;
use std::fmt::Write;

const NODE_HEIGHT: f64 = 14.0;
const NODE_CORNER: f64 = 6.0;
const LABEL_FONT: &str = "10px 'JetBrains Mono', monospace";

/// Renders `frame` into an SVG document with a `0 0 w h` viewBox.
pub fn to_svg_document(frame: &Frame, size: DVec2) -> String {
    let mut out = String::new();
    // writing to a String cannot fail
    let _ = writeln!(
        out,
        r#"<svg xmlns="http://www.w3.org/2000/svg" viewBox="0 0 {:.2} {:.2}" preserveAspectRatio="xMidYMid slice">"#,
        size.x, size.y
    );
    for line in &frame.polylines {
        let _ = writeln!(
            out,
            r#"  <polyline fill="none" stroke="{}" stroke-width="{}" points="{}"/>"#,
            line.stroke,
            line.stroke_width,
            polyline_points(&line.points)
        );
    }
    for seg in &frame.segments {
        let _ = writeln!(
            out,
            r#"  <line x1="{:.2}" y1="{:.2}" x2="{:.2}" y2="{:.2}" stroke="{}" stroke-width="{}"/>"#,
            seg.from.x, seg.from.y, seg.to.x, seg.to.y, seg.stroke, seg.stroke_width
        );
    }
    for node in &frame.nodes {
        let _ = writeln!(
            out,
            r#"  <rect x="{:.2}" y="{:.2}" width="{:.2}" height="{}" rx="{}" fill="{}" stroke="{}"/>"#,
            node.center.x - node.half_width,
            node.center.y - NODE_HEIGHT / 2.0,
            node.half_width * 2.0,
            NODE_HEIGHT,
            NODE_CORNER,
            node.fill,
            node.stroke
        );
        let _ = writeln!(
            out,
            r#"  <text x="{:.2}" y="{:.2}" text-anchor="middle" dominant-baseline="middle" fill="{}" style="font: {}">{}</text>"#,
            node.center.x,
            node.center.y,
            node.label_fill,
            LABEL_FONT,
            escape_text(&node.label)
        );
    }
    for dot in &frame.dots {
        let _ = writeln!(
            out,
            r#"  <circle cx="{:.2}" cy="{:.2}" r="{}" fill="{}"/>"#,
            dot.center.x, dot.center.y, dot.radius, dot.fill
        );
    }
    out.push_str("</svg>\n");
    out
}

fn escape_text(s: &str) -> String {
    s.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
}
