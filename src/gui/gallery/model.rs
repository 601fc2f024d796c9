use crate::gui::gallery::GALLERY_ROWS;
use cairo::ImageSurface;
use doily_core::Point;
use std::path::{Path, PathBuf};
use thiserror::Error;

#[derive(Error, Debug)]
pub enum GalleryError {
    #[error("Gallery is full ({0} doilies). Remove doilies to add more.")]
    Full(usize),
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
    #[error("PNG encoding error: {0}")]
    Png(#[from] cairo::IoError),
}

#[derive(Debug, Clone)]
pub struct Snapshot {
    pub image: ImageSurface,
    pub selected: bool,
}

/// Saved renders of the surface, in the order they were added.
#[derive(Debug, Clone)]
pub struct Gallery {
    capacity: usize,
    snapshots: Vec<Snapshot>,
}

impl Gallery {
    pub fn new(capacity: usize) -> Self {
        Self {
            capacity,
            snapshots: Vec::new(),
        }
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    /// Existing snapshots are kept even if they exceed the new capacity.
    pub fn set_capacity(&mut self, capacity: usize) {
        self.capacity = capacity;
    }

    pub fn snapshots(&self) -> &[Snapshot] {
        &self.snapshots
    }

    pub fn len(&self) -> usize {
        self.snapshots.len()
    }

    pub fn is_empty(&self) -> bool {
        self.snapshots.is_empty()
    }

    pub fn is_full(&self) -> bool {
        self.snapshots.len() >= self.capacity
    }

    pub fn add(&mut self, image: ImageSurface) -> Result<usize, GalleryError> {
        if self.is_full() {
            return Err(GalleryError::Full(self.capacity));
        }
        self.snapshots.push(Snapshot {
            image,
            selected: false,
        });
        Ok(self.snapshots.len())
    }

    pub fn toggle(&mut self, index: usize) -> Option<bool> {
        self.snapshots.get_mut(index).map(|s| {
            s.selected = !s.selected;
            s.selected
        })
    }

    pub fn select_all(&mut self) {
        self.snapshots.iter_mut().for_each(|s| s.selected = true);
    }

    pub fn deselect_all(&mut self) {
        self.snapshots.iter_mut().for_each(|s| s.selected = false);
    }

    pub fn selected_count(&self) -> usize {
        self.snapshots.iter().filter(|s| s.selected).count()
    }

    pub fn remove_selected(&mut self) -> usize {
        let before = self.snapshots.len();
        self.snapshots.retain(|s| !s.selected);
        before - self.snapshots.len()
    }

    /// Writes every selected snapshot to `dir` as `doily-NN.png`, numbered by gallery position.
    pub fn export_selected(&self, dir: &Path) -> Result<Vec<PathBuf>, GalleryError> {
        fs_err::create_dir_all(dir)?;

        let mut written = Vec::new();
        for (i, snapshot) in self.snapshots.iter().enumerate() {
            if !snapshot.selected {
                continue;
            }
            let path = dir.join(format!("doily-{:02}.png", i + 1));
            let mut file = fs_err::File::create(&path)?;
            snapshot.image.write_to_png(&mut file)?;
            written.push(path);
        }
        Ok(written)
    }
}

/// Grid of square cells, filled row by row.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GalleryLayout {
    pub rows: usize,
    pub cols: usize,
}

impl GalleryLayout {
    pub fn for_capacity(capacity: usize) -> Self {
        Self {
            rows: GALLERY_ROWS,
            cols: capacity.div_ceil(GALLERY_ROWS).max(1),
        }
    }

    pub fn cells(&self) -> usize {
        self.rows * self.cols
    }

    pub fn cell_size(&self, width: f64, height: f64) -> f64 {
        (width / self.cols as f64).min(height / self.rows as f64)
    }

    pub fn cell_origin(&self, index: usize, width: f64, height: f64) -> Point {
        let size = self.cell_size(width, height);
        let (row, col) = (index / self.cols, index % self.cols);
        Point::new(col as f64 * size, row as f64 * size)
    }

    pub fn cell_at(&self, point: Point, width: f64, height: f64) -> Option<usize> {
        let size = self.cell_size(width, height);
        if size <= 0.0 || point.x < 0.0 || point.y < 0.0 {
            return None;
        }
        let (col, row) = ((point.x / size) as usize, (point.y / size) as usize);
        (col < self.cols && row < self.rows).then_some(row * self.cols + col)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use cairo::Format;

    fn image() -> ImageSurface {
        ImageSurface::create(Format::ARgb32, 8, 8).unwrap()
    }

    fn gallery_with(n: usize) -> Gallery {
        let mut gallery = Gallery::new(3);
        for _ in 0..n {
            gallery.add(image()).unwrap();
        }
        gallery
    }

    #[test]
    fn test_add_respects_capacity() {
        let mut gallery = gallery_with(3);
        assert!(gallery.is_full());
        assert!(matches!(gallery.add(image()), Err(GalleryError::Full(3))));
        assert_eq!(gallery.len(), 3);
    }

    #[test]
    fn test_selection_and_removal() {
        let mut gallery = gallery_with(3);
        assert_eq!(gallery.toggle(1), Some(true));
        assert_eq!(gallery.toggle(7), None);
        assert_eq!(gallery.selected_count(), 1);

        assert_eq!(gallery.remove_selected(), 1);
        assert_eq!(gallery.len(), 2);
        assert!(!gallery.is_full());

        gallery.select_all();
        assert_eq!(gallery.selected_count(), 2);
        gallery.deselect_all();
        assert_eq!(gallery.remove_selected(), 0);

        gallery.select_all();
        assert_eq!(gallery.remove_selected(), 2);
        assert!(gallery.is_empty());
    }

    #[test]
    fn test_layout_hit_testing() {
        let layout = GalleryLayout::for_capacity(12);
        assert_eq!(layout, GalleryLayout { rows: 2, cols: 6 });
        assert_eq!(layout.cells(), 12);

        // 600x300 gives 100px cells
        assert_eq!(layout.cell_at(Point::new(5.0, 5.0), 600.0, 300.0), Some(0));
        assert_eq!(layout.cell_at(Point::new(250.0, 150.0), 600.0, 300.0), Some(8));
        assert_eq!(layout.cell_at(Point::new(650.0, 50.0), 600.0, 300.0), None);
        assert_eq!(layout.cell_at(Point::new(50.0, -1.0), 600.0, 300.0), None);
        assert_eq!(layout.cell_origin(8, 600.0, 300.0), Point::new(200.0, 100.0));
    }

    #[test]
    fn test_odd_capacity_rounds_columns_up() {
        assert_eq!(GalleryLayout::for_capacity(5).cols, 3);
        assert_eq!(GalleryLayout::for_capacity(0).cols, 1);
    }

    #[test]
    fn test_export_writes_selected_pngs() {
        let dir = std::env::temp_dir().join(format!("doily-export-test-{}", std::process::id()));
        let mut gallery = gallery_with(3);
        gallery.toggle(0);
        gallery.toggle(2);

        let written = gallery.export_selected(&dir).unwrap();

        assert_eq!(written, vec![dir.join("doily-01.png"), dir.join("doily-03.png")]);
        for path in &written {
            let bytes = fs_err::read(path).unwrap();
            assert_eq!(&bytes[1..4], b"PNG");
        }
        fs_err::remove_dir_all(&dir).unwrap();
    }
}
