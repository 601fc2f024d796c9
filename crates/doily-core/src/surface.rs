use crate::config::{MIN_PEN_SIZE, SurfaceConfig};
use crate::dot::Dot;
use crate::error::SurfaceError;
use crate::geometry::{Point, SectorCount};
use crate::history::DotHistory;
use crate::render::SurfaceRenderer;
use cairo::{Context, ImageSurface};
use palette::Srgba;

pub const DEFAULT_SIDE: i32 = 740;

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum PointOutcome {
    Drawn,
    Erased(usize),
}

/// The drawing surface: configuration, dot history and the bounds used to locate the center.
#[derive(Debug, Clone)]
pub struct DoilySurface {
    config: SurfaceConfig,
    history: DotHistory,
    width: i32,
    height: i32,
}

impl Default for DoilySurface {
    fn default() -> Self {
        Self::new(SurfaceConfig::default())
    }
}

impl DoilySurface {
    pub fn new(config: SurfaceConfig) -> Self {
        Self {
            config,
            history: DotHistory::new(),
            width: DEFAULT_SIDE,
            height: DEFAULT_SIDE,
        }
    }

    pub fn config(&self) -> &SurfaceConfig {
        &self.config
    }

    pub fn history(&self) -> &DotHistory {
        &self.history
    }

    pub fn bounds(&self) -> (i32, i32) {
        (self.width, self.height)
    }

    pub fn center(&self) -> Point {
        Point::new(self.width as f64 / 2.0, self.height as f64 / 2.0)
    }

    pub fn set_bounds(&mut self, width: i32, height: i32) {
        self.width = width.max(0);
        self.height = height.max(0);
    }

    pub fn set_sector_count(&mut self, count: i32) -> Result<(), SurfaceError> {
        self.config.sectors = SectorCount::new(count)?;
        log::debug!("sector count set to {}", self.config.sectors);
        Ok(())
    }

    pub fn set_pen_size(&mut self, size: u32) {
        if size < MIN_PEN_SIZE {
            log::warn!("pen size {} clamped to {}", size, MIN_PEN_SIZE);
        }
        self.config.pen_size = size.max(MIN_PEN_SIZE);
    }

    pub fn set_pen_color(&mut self, color: Srgba<f64>) {
        self.config.pen_color = color;
    }

    pub fn set_draw_sector_lines(&mut self, enabled: bool) {
        self.config.draw_sector_lines = enabled;
    }

    pub fn set_reflect(&mut self, enabled: bool) {
        self.config.reflect = enabled;
    }

    pub fn set_erasing(&mut self, enabled: bool) {
        self.config.erasing = enabled;
    }

    /// Handles one pointer sample in surface-local coordinates. In eraser mode the eraser dot is
    /// reconciled before this returns, so the next render always sees a settled history.
    pub fn add_point(&mut self, x: f64, y: f64) -> PointOutcome {
        let step = self.config.angular_step();
        let dot = Dot::from_pointer(
            Point::new(x, y),
            self.center(),
            step,
            self.config.pen_size,
            self.config.pen_color,
        );

        if self.config.erasing {
            PointOutcome::Erased(self.history.draw_for_erase(dot, self.config.reflect, step))
        } else {
            self.history.draw(dot);
            PointOutcome::Drawn
        }
    }

    pub fn undo(&mut self, count: usize) -> usize {
        self.history.undo(count)
    }

    pub fn redo(&mut self, count: usize) -> usize {
        self.history.redo(count)
    }

    pub fn clear(&mut self) {
        self.history.clear();
        log::debug!("surface cleared");
    }

    pub fn render(&self, cr: &Context, width: f64, height: f64) -> Result<(), cairo::Error> {
        SurfaceRenderer::new(&self.config, self.history.active()).draw(cr, width, height)
    }

    pub fn render_to(&self, width: i32, height: i32) -> Result<ImageSurface, SurfaceError> {
        Ok(SurfaceRenderer::new(&self.config, self.history.active()).render_image(width, height)?)
    }
}
