use crate::config::SurfaceConfig;
use crate::dot::Dot;
use crate::geometry::{self, Point};
use cairo::{Context, Format, ImageSurface};
use std::f64::consts::PI;

pub const BACKGROUND_RGB: (f64, f64, f64) = (0.0, 0.0, 0.0);
pub const SECTOR_LINE_RGB: (f64, f64, f64) = (1.0, 1.0, 1.0);
pub const SECTOR_LINE_WIDTH: f64 = 2.0;
// guide lines overshoot the half-width so they reach the corners
pub const SECTOR_LINE_REACH: f64 = 1.4;

/// Saves the context state on creation and restores it when dropped.
struct SavedState<'a> {
    cr: &'a Context,
}

impl<'a> SavedState<'a> {
    fn new(cr: &'a Context) -> Result<Self, cairo::Error> {
        cr.save()?;
        Ok(Self { cr })
    }
}

impl Drop for SavedState<'_> {
    fn drop(&mut self) {
        if let Err(e) = self.cr.restore() {
            log::error!("Failed to restore drawing state: {}", e);
        }
    }
}

fn rotate_around(cr: &Context, center: Point, angle: f64) {
    cr.translate(center.x, center.y);
    cr.rotate(angle);
    cr.translate(-center.x, -center.y);
}

/// Top-left corner of the dot's bounding box inside the canonical sector, pulled back along the
/// dot's angle by half its size.
pub(crate) fn oval_origin(dot: &Dot, angular_step: f64, center: Point) -> Point {
    let point = geometry::to_cartesian(dot.polar(), angular_step, center);
    let angle = dot.angle_fraction() * angular_step;
    let half = dot.size() as f64 / 2.0;
    Point::new(point.x - angle.cos() * half, point.y - angle.sin() * half)
}

/// The mirrored copy is placed without the pull-back, the same way the eraser sees it.
pub(crate) fn mirrored_oval_origin(dot: &Dot, angular_step: f64, center: Point) -> Point {
    geometry::to_cartesian(dot.polar().reflected(), angular_step, center)
}

pub struct SurfaceRenderer<'a> {
    config: &'a SurfaceConfig,
    dots: &'a [Dot],
}

impl<'a> SurfaceRenderer<'a> {
    pub fn new(config: &'a SurfaceConfig, dots: &'a [Dot]) -> Self {
        Self { config, dots }
    }

    pub fn draw(&self, cr: &Context, width: f64, height: f64) -> Result<(), cairo::Error> {
        let _saved = SavedState::new(cr)?;
        self.fill_background(cr, width, height)?;

        let center = Point::new(width / 2.0, height / 2.0);
        let step = self.config.angular_step();
        let line_length = width / 2.0 * SECTOR_LINE_REACH;

        rotate_around(cr, center, self.config.sectors.pre_rotation());

        for sector in 0..*self.config.sectors {
            let angle = sector as f64 * step;
            if self.config.draw_sector_lines {
                self.draw_sector_line(cr, center, angle, line_length)?;
            }

            let _sector = SavedState::new(cr)?;
            rotate_around(cr, center, angle);
            for dot in self.dots {
                self.draw_dot(cr, dot, center, step)?;
            }
        }
        Ok(())
    }

    pub fn render_image(&self, width: i32, height: i32) -> Result<ImageSurface, cairo::Error> {
        let surface = ImageSurface::create(Format::ARgb32, width, height)?;
        {
            let cr = Context::new(&surface)?;
            self.draw(&cr, width as f64, height as f64)?;
        }
        surface.flush();
        Ok(surface)
    }

    fn fill_background(&self, cr: &Context, width: f64, height: f64) -> Result<(), cairo::Error> {
        let (r, g, b) = BACKGROUND_RGB;
        cr.set_source_rgb(r, g, b);
        cr.rectangle(0.0, 0.0, width, height);
        cr.fill()
    }

    fn draw_sector_line(
        &self,
        cr: &Context,
        center: Point,
        angle: f64,
        length: f64,
    ) -> Result<(), cairo::Error> {
        let (r, g, b) = SECTOR_LINE_RGB;
        cr.set_source_rgb(r, g, b);
        cr.set_line_width(SECTOR_LINE_WIDTH);
        cr.move_to(center.x, center.y);
        cr.line_to(
            center.x + (angle.cos() * length).round(),
            center.y + (angle.sin() * length).round(),
        );
        cr.stroke()
    }

    fn draw_dot(
        &self,
        cr: &Context,
        dot: &Dot,
        center: Point,
        angular_step: f64,
    ) -> Result<(), cairo::Error> {
        let (r, g, b, a) = dot.color().into_components();
        cr.set_source_rgba(r, g, b, a);
        let size = dot.size() as f64;

        fill_oval(cr, oval_origin(dot, angular_step, center), size)?;
        if self.config.reflect {
            fill_oval(cr, mirrored_oval_origin(dot, angular_step, center), size)?;
        }
        Ok(())
    }
}

fn fill_oval(cr: &Context, origin: Point, size: f64) -> Result<(), cairo::Error> {
    let radius = size / 2.0;
    cr.new_path();
    cr.arc(origin.x + radius, origin.y + radius, radius, 0.0, 2.0 * PI);
    cr.fill()
}
