#![deny(unsafe_code)]
//! Core of fieldfx, the pointer-reactive decorative field effects.
//!
//! Provides [`ReactiveFieldRenderer`] (smoothed pointer, decaying impulse,
//! eased displacement of rest points, same-category connections), the
//! [`Point`] and [`FieldConfig`] data model, [`Layout`]s for grids and
//! category clusters, input helpers, [`Srgb`] colours, the [`Xorshift64`]
//! PRNG and [`SceneSeed`]. Nothing here touches a platform API.

pub mod color;
pub mod config;
pub mod drift;
pub mod easing;
pub mod error;
pub mod input;
pub mod layout;
pub mod params;
pub mod point;
pub mod pointer;
pub mod prng;
pub mod renderer;
pub mod seed;

pub use color::Srgb;
pub use config::{FieldConfig, Polarity, SmoothingMode};
pub use drift::IdleDrift;
pub use easing::Easing;
pub use error::FieldError;
pub use input::{normalize_viewport, ScrollTracker};
pub use layout::{Category, ClusterLayout, GridLayout, Layout, MAX_GRID_POINTS};
pub use point::{CategoryId, Point};
pub use pointer::PointerState;
pub use prng::Xorshift64;
pub use renderer::{Connection, ReactiveFieldRenderer, CONNECTION_POINT_CEILING};
pub use seed::SceneSeed;

pub use glam::DVec2;
