use crate::geometry::SectorCount;
use palette::Srgba;

pub const DEFAULT_PEN_SIZE: u32 = 10;
pub const MIN_PEN_SIZE: u32 = 1;

/// Drawing parameters as seen by one frame. The surface hands a copy to the renderer and the
/// eraser instead of letting them read shared state.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SurfaceConfig {
    pub sectors: SectorCount,
    pub pen_size: u32,
    pub pen_color: Srgba<f64>,
    pub draw_sector_lines: bool,
    pub reflect: bool,
    pub erasing: bool,
}

impl SurfaceConfig {
    pub fn angular_step(&self) -> f64 {
        self.sectors.angular_step()
    }
}

impl Default for SurfaceConfig {
    fn default() -> Self {
        Self {
            sectors: SectorCount::default(),
            pen_size: DEFAULT_PEN_SIZE,
            pen_color: Srgba::new(1.0, 0.0, 0.0, 1.0),
            draw_sector_lines: true,
            reflect: false,
            erasing: false,
        }
    }
}
