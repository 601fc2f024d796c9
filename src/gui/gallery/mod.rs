pub mod model;
pub mod view;

pub use model::{Gallery, GalleryError, GalleryLayout, Snapshot};
pub use view::draw;

pub const GALLERY_ROWS: usize = 2;
pub const CELL_PADDING: f64 = 4.0;
pub const BORDER_WIDTH: f64 = 2.0;
pub const EMPTY_MARKER_FACTOR: f64 = 0.25; // empty-cell circle radius relative to the cell
