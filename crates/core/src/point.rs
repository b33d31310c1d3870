//! A decorative point with a fixed rest position and a per-frame live position.

use crate::drift::IdleDrift;
use glam::DVec2;
use serde::{Deserialize, Serialize};

/// Category id used to group points for connectivity.
pub type CategoryId = u32;

/// A point of the field.
///
/// `rest` and `category` are fixed at construction; the renderer writes
/// `live` once per tick. `label` and `radius` are payload for the drawing
/// layer and are never read by the renderer.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Point {
    rest: DVec2,
    live: DVec2,
    category: Option<CategoryId>,
    drift: Option<IdleDrift>,
    pub label: Option<String>,
    pub radius: f64,
}

impl Point {
    /// Uncategorized point resting (and currently live) at `rest`.
    pub fn new(rest: DVec2) -> Self {
        Self {
            rest,
            live: rest,
            category: None,
            drift: None,
            label: None,
            radius: 0.0,
        }
    }

    /// Shorthand for `Point::new(DVec2::new(x, y))`.
    pub fn at(x: f64, y: f64) -> Self {
        Self::new(DVec2::new(x, y))
    }

    /// Joins `category`; only same-category points connect.
    pub fn with_category(mut self, category: CategoryId) -> Self {
        self.category = Some(category);
        self
    }

    /// Adds an idle offset on top of the rest position.
    pub fn with_drift(mut self, drift: IdleDrift) -> Self {
        self.drift = Some(drift);
        self
    }

    /// Attaches a display label and its hit radius.
    pub fn with_label(mut self, label: impl Into<String>, radius: f64) -> Self {
        self.label = Some(label.into());
        self.radius = radius;
        self
    }

    /// Fixed rest position.
    pub fn rest(&self) -> DVec2 {
        self.rest
    }

    /// Position computed by the last tick.
    pub fn live(&self) -> DVec2 {
        self.live
    }

    /// Connectivity group, if any.
    pub fn category(&self) -> Option<CategoryId> {
        self.category
    }

    pub fn drift(&self) -> Option<&IdleDrift> {
        self.drift.as_ref()
    }

    pub(crate) fn set_live(&mut self, live: DVec2) {
        self.live = live;
    }

    /// Rest position plus idle drift at `elapsed` seconds.
    pub(crate) fn drifted_rest(&self, elapsed: f64) -> DVec2 {
        match &self.drift {
            Some(d) => self.rest + d.offset(elapsed),
            None => self.rest,
        }
    }
}
