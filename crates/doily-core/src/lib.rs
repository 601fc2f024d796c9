//! Radial-symmetry drawing surface: dots stored in sector-relative polar form, replicated across
//! N rotational sectors (plus an optional mirror) at render time, with undo/redo and an eraser.

pub mod config;
pub mod dot;
pub mod eraser;
pub mod error;
pub mod geometry;
pub mod history;
pub mod render;
pub mod surface;

pub use config::SurfaceConfig;
pub use dot::Dot;
pub use error::SurfaceError;
pub use geometry::{Point, Polar, SectorCount};
pub use history::DotHistory;
pub use render::SurfaceRenderer;
pub use surface::{DoilySurface, PointOutcome};
