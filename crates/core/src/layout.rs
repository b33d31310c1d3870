//! Point-set layouts: the regular grid and the category-anchored cluster.
//!
//! A layout turns field dimensions (and a seed, for anything random) into a
//! fresh point set. Layouts are rerun wholesale on resize and the result is
//! handed to [`ReactiveFieldRenderer::relayout`](crate::ReactiveFieldRenderer::relayout).

use crate::color::Srgb;
use crate::drift::IdleDrift;
use crate::error::FieldError;
use crate::point::{CategoryId, Point};
use crate::prng::Xorshift64;
use serde::{Deserialize, Serialize};
use std::f64::consts::TAU;

/// Builds a point set for a field of the given size.
///
/// Object safe, so scenes can hold a `Box<dyn Layout>`.
pub trait Layout {
    /// Short identifier, e.g. `"grid"`.
    fn name(&self) -> &str;

    /// Produces the point set. The same arguments always give the same points.
    fn build(&self, width: f64, height: f64, seed: u64) -> Result<Vec<Point>, FieldError>;
}

fn check_dimensions(width: f64, height: f64) -> Result<(), FieldError> {
    if width.is_finite() && height.is_finite() && width > 0.0 && height > 0.0 {
        Ok(())
    } else {
        Err(FieldError::InvalidDimensions)
    }
}

/// Largest point count a [`GridLayout`] will build.
pub const MAX_GRID_POINTS: usize = 4096;

/// Regular lattice of `(cols + 1) * (rows + 1)` points spanning the field.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct GridLayout {
    pub cols: usize,
    pub rows: usize,
}

impl GridLayout {
    /// Grid of `cols` by `rows` cells. Counts are checked in [`Layout::build`].
    pub fn new(cols: usize, rows: usize) -> Self {
        Self { cols, rows }
    }

    /// Points per row, i.e. `cols + 1`.
    pub fn stride(&self) -> usize {
        self.cols.saturating_add(1)
    }

    /// Total lattice points, or `None` if the count overflows `usize`.
    pub fn point_count(&self) -> Option<usize> {
        self.cols
            .checked_add(1)?
            .checked_mul(self.rows.checked_add(1)?)
    }

    /// Index of the point at column `c`, row `r` in the row-major point set.
    pub fn index(&self, c: usize, r: usize) -> usize {
        r * self.stride() + c
    }

    /// Indices of each horizontal line, top to bottom.
    pub fn row_runs(&self) -> impl Iterator<Item = Vec<usize>> + '_ {
        (0..=self.rows).map(move |r| (0..=self.cols).map(|c| self.index(c, r)).collect())
    }

    /// Indices of each vertical line, left to right.
    pub fn column_runs(&self) -> impl Iterator<Item = Vec<usize>> + '_ {
        (0..=self.cols).map(move |c| (0..=self.rows).map(|r| self.index(c, r)).collect())
    }
}

impl Layout for GridLayout {
    fn name(&self) -> &str {
        "grid"
    }

    fn build(&self, width: f64, height: f64, _seed: u64) -> Result<Vec<Point>, FieldError> {
        check_dimensions(width, height)?;
        if self.cols == 0 || self.rows == 0 {
            return Err(FieldError::InvalidDimensions);
        }
        let count = match self.point_count() {
            Some(n) if n <= MAX_GRID_POINTS => n,
            _ => return Err(FieldError::InvalidDimensions),
        };
        let mut points = Vec::with_capacity(count);
        for r in 0..=self.rows {
            for c in 0..=self.cols {
                points.push(Point::at(
                    c as f64 / self.cols as f64 * width,
                    r as f64 / self.rows as f64 * height,
                ));
            }
        }
        Ok(points)
    }
}

/// A named group of labelled nodes sharing a colour.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Category {
    pub name: String,
    pub color: Srgb,
    pub labels: Vec<String>,
}

impl Category {
    /// Category `name` with one node per entry of `labels`.
    pub fn new(name: &str, color: Srgb, labels: &[&str]) -> Self {
        Self {
            name: name.to_string(),
            color,
            labels: labels.iter().map(|s| s.to_string()).collect(),
        }
    }
}

const ORBIT_BASE_RADIUS: f64 = 55.0;
const ORBIT_RADIUS_STEP: f64 = 8.0;
const CATEGORY_ANGLE_OFFSET: f64 = 0.5;
const NODE_BASE_RADIUS: f64 = 26.0;
const NODE_RADIUS_PER_CHAR: f64 = 1.2;

/// Categories orbit anchors at the quadrant centres of the field.
///
/// Category `ci` sits at `x = 0.28w` (even) or `0.72w` (odd) and `y = 0.3h`
/// (first two) or `0.7h`. Its labels spiral out on a loose ring, each with
/// its own seeded idle-drift phase.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ClusterLayout {
    pub categories: Vec<Category>,
    pub drift: bool,
}

impl ClusterLayout {
    /// Cluster over `categories`, with idle drift on.
    pub fn new(categories: Vec<Category>) -> Self {
        Self {
            categories,
            drift: true,
        }
    }

    /// Colour of the category with id `id`.
    pub fn color_of(&self, id: CategoryId) -> Option<Srgb> {
        self.categories.get(id as usize).map(|c| c.color)
    }
}

impl Layout for ClusterLayout {
    fn name(&self) -> &str {
        "cluster"
    }

    fn build(&self, width: f64, height: f64, seed: u64) -> Result<Vec<Point>, FieldError> {
        check_dimensions(width, height)?;
        let mut rng = Xorshift64::new(seed);
        let mut points = Vec::new();
        for (ci, cat) in self.categories.iter().enumerate() {
            let anchor_x = (if ci % 2 == 0 { 0.28 } else { 0.72 }) * width;
            let anchor_y = (if ci < 2 { 0.3 } else { 0.7 }) * height;
            let count = cat.labels.len() as f64;
            for (si, label) in cat.labels.iter().enumerate() {
                let angle = si as f64 / count * TAU + ci as f64 * CATEGORY_ANGLE_OFFSET;
                let orbit = ORBIT_BASE_RADIUS + si as f64 * ORBIT_RADIUS_STEP;
                let radius =
                    NODE_BASE_RADIUS + label.chars().count() as f64 * NODE_RADIUS_PER_CHAR;
                let mut point = Point::at(
                    anchor_x + angle.cos() * orbit,
                    anchor_y + angle.sin() * orbit,
                )
                .with_category(ci as CategoryId)
                .with_label(label.clone(), radius);
                // one draw per node regardless of `drift`
                let phase = rng.next_angle();
                if self.drift {
                    point = point.with_drift(IdleDrift::with_phase(phase));
                }
                points.push(point);
            }
        }
        if points.is_empty() {
            return Err(FieldError::EmptyPointSet);
        }
        Ok(points)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use glam::DVec2;

    fn two_categories() -> ClusterLayout {
        ClusterLayout::new(vec![
            Category::new("Technical", Srgb::new(0xc8, 0xff, 0x00), &["Rust", "SQL", "Git"]),
            Category::new("Analytics", Srgb::new(0x60, 0xa5, 0xfa), &["Statistics"]),
        ])
    }

    #[test]
    fn grid_has_expected_count_and_corners() {
        let g = GridLayout::new(20, 12);
        let pts = g.build(100.0, 60.0, 0).unwrap();
        assert_eq!(pts.len(), 21 * 13);
        assert_eq!(pts[0].rest(), DVec2::ZERO);
        assert_eq!(pts[g.index(20, 0)].rest(), DVec2::new(100.0, 0.0));
        assert_eq!(pts[g.index(20, 12)].rest(), DVec2::new(100.0, 60.0));
        assert!(pts.iter().all(|p| p.category().is_none()));
    }

    #[test]
    fn grid_runs_cover_rows_and_columns() {
        let g = GridLayout::new(3, 2);
        let rows: Vec<_> = g.row_runs().collect();
        let cols: Vec<_> = g.column_runs().collect();
        assert_eq!(rows.len(), 3);
        assert_eq!(cols.len(), 4);
        assert_eq!(rows[1], vec![4, 5, 6, 7]);
        assert_eq!(cols[2], vec![2, 6, 10]);
    }

    #[test]
    fn grid_rejects_degenerate_input() {
        assert!(matches!(
            GridLayout::new(0, 4).build(10.0, 10.0, 0),
            Err(FieldError::InvalidDimensions)
        ));
        assert!(matches!(
            GridLayout::new(4, 4).build(0.0, 10.0, 0),
            Err(FieldError::InvalidDimensions)
        ));
        assert!(matches!(
            GridLayout::new(4, 4).build(10.0, f64::NAN, 0),
            Err(FieldError::InvalidDimensions)
        ));
    }

    #[test]
    fn grid_rejects_overflowing_counts() {
        let g = GridLayout::new(usize::MAX, 2);
        assert_eq!(g.point_count(), None);
        assert!(matches!(
            g.build(100.0, 60.0, 0),
            Err(FieldError::InvalidDimensions)
        ));
    }

    #[test]
    fn grid_point_ceiling_is_enforced() {
        assert!(matches!(
            GridLayout::new(100_000, 100_000).build(100.0, 60.0, 0),
            Err(FieldError::InvalidDimensions)
        ));
        // 64 x 64 cells is 65 * 65 = 4225 points, just over the ceiling
        assert!(GridLayout::new(64, 64).build(100.0, 60.0, 0).is_err());
        let at_limit = GridLayout::new(63, 63).build(100.0, 60.0, 0).unwrap();
        assert_eq!(at_limit.len(), 64 * 64);
        assert!(at_limit.len() <= MAX_GRID_POINTS);
    }

    #[test]
    fn cluster_places_first_node_on_anchor_ring() {
        let pts = two_categories().build(1000.0, 500.0, 1).unwrap();
        assert_eq!(pts.len(), 4);
        let anchor = DVec2::new(280.0, 150.0);
        assert!((pts[0].rest().distance(anchor) - 55.0).abs() < 1e-9);
        assert!((pts[1].rest().distance(anchor) - 63.0).abs() < 1e-9);
        // second category, first node: angle 0.5, orbit 55 around (720, 150)
        let expected = DVec2::new(720.0 + 0.5_f64.cos() * 55.0, 150.0 + 0.5_f64.sin() * 55.0);
        assert!(pts[3].rest().distance(expected) < 1e-9);
    }

    #[test]
    fn cluster_assigns_categories_labels_and_radii() {
        let pts = two_categories().build(800.0, 400.0, 9).unwrap();
        assert_eq!(pts[2].category(), Some(0));
        assert_eq!(pts[3].category(), Some(1));
        assert_eq!(pts[3].label.as_deref(), Some("Statistics"));
        assert!((pts[3].radius - (26.0 + 10.0 * 1.2)).abs() < 1e-12);
        assert!(pts.iter().all(|p| p.drift().is_some()));
    }

    #[test]
    fn cluster_is_deterministic_per_seed() {
        let layout = two_categories();
        let a = layout.build(800.0, 400.0, 5).unwrap();
        let b = layout.build(800.0, 400.0, 5).unwrap();
        let c = layout.build(800.0, 400.0, 6).unwrap();
        assert_eq!(a, b);
        assert_ne!(a, c);
    }

    #[test]
    fn cluster_without_drift_keeps_positions() {
        let mut still = two_categories();
        still.drift = false;
        let a = still.build(800.0, 400.0, 5).unwrap();
        let b = two_categories().build(800.0, 400.0, 5).unwrap();
        for (p, q) in a.iter().zip(&b) {
            assert_eq!(p.rest(), q.rest());
            assert!(p.drift().is_none());
        }
    }

    #[test]
    fn empty_cluster_is_rejected() {
        let layout = ClusterLayout::new(vec![Category::new("Empty", Srgb::new(0, 0, 0), &[])]);
        assert!(matches!(
            layout.build(100.0, 100.0, 1),
            Err(FieldError::EmptyPointSet)
        ));
    }

    #[test]
    fn layouts_work_as_trait_objects() {
        let layouts: Vec<Box<dyn Layout>> =
            vec![Box::new(GridLayout::new(2, 2)), Box::new(two_categories())];
        let names: Vec<_> = layouts.iter().map(|l| l.name().to_string()).collect();
        assert_eq!(names, vec!["grid", "cluster"]);
        assert_eq!(layouts[0].build(10.0, 10.0, 0).unwrap().len(), 9);
    }
}
