use super::model::{Gallery, GalleryLayout, Snapshot};
use super::{BORDER_WIDTH, CELL_PADDING, EMPTY_MARKER_FACTOR};
use crate::gui::theme::GalleryColors;
use cairo::Context;
use doily_core::Point;
use palette::Srgba;
use std::f64::consts::PI;

struct CellRenderer<'a> {
    snapshot: Option<&'a Snapshot>,
    origin: Point,
    size: f64,
}

impl<'a> CellRenderer<'a> {
    fn new(snapshot: Option<&'a Snapshot>, origin: Point, size: f64) -> Self {
        Self {
            snapshot,
            origin,
            size,
        }
    }

    fn draw(&self, cr: &Context, colors: &GalleryColors) -> Result<(), cairo::Error> {
        match self.snapshot {
            Some(snapshot) => {
                self.draw_thumbnail(cr, snapshot)?;
                let border = if snapshot.selected {
                    colors.selected
                } else {
                    colors.unselected
                };
                self.draw_border(cr, border)
            }
            None => self.draw_empty(cr, colors.empty),
        }
    }

    fn inner_size(&self) -> f64 {
        (self.size - 2.0 * CELL_PADDING).max(0.0)
    }

    fn draw_thumbnail(&self, cr: &Context, snapshot: &Snapshot) -> Result<(), cairo::Error> {
        let (iw, ih) = (snapshot.image.width() as f64, snapshot.image.height() as f64);
        if iw <= 0.0 || ih <= 0.0 {
            return Ok(());
        }
        // fit the snapshot into the cell
        let scale = self.inner_size() / iw.max(ih);

        cr.save()?;
        cr.translate(self.origin.x + CELL_PADDING, self.origin.y + CELL_PADDING);
        cr.scale(scale, scale);
        cr.set_source_surface(&snapshot.image, 0.0, 0.0)?;
        cr.paint()?;
        cr.restore()
    }

    fn draw_border(&self, cr: &Context, color: Srgba<f64>) -> Result<(), cairo::Error> {
        let (r, g, b, a) = color.into_components();
        cr.set_source_rgba(r, g, b, a);
        cr.set_line_width(BORDER_WIDTH);
        let inset = CELL_PADDING / 2.0;
        cr.rectangle(
            self.origin.x + inset,
            self.origin.y + inset,
            self.size - CELL_PADDING,
            self.size - CELL_PADDING,
        );
        cr.stroke()
    }

    fn draw_empty(&self, cr: &Context, color: Srgba<f64>) -> Result<(), cairo::Error> {
        let (r, g, b, a) = color.into_components();
        cr.set_source_rgba(r, g, b, a);
        cr.new_path();
        cr.arc(
            self.origin.x + self.size / 2.0,
            self.origin.y + self.size / 2.0,
            self.size * EMPTY_MARKER_FACTOR,
            0.0,
            2.0 * PI,
        );
        cr.fill()
    }
}

pub fn draw(
    cr: &Context,
    gallery: &Gallery,
    width: f64,
    height: f64,
    colors: &GalleryColors,
) -> Result<(), cairo::Error> {
    let layout = GalleryLayout::for_capacity(gallery.capacity().max(gallery.len()));
    let size = layout.cell_size(width, height);

    for index in 0..layout.cells() {
        let origin = layout.cell_origin(index, width, height);
        CellRenderer::new(gallery.snapshots().get(index), origin, size).draw(cr, colors)?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use cairo::{Format, ImageSurface};

    fn pixel(surface: &ImageSurface, x: usize, y: usize) -> (u8, u8, u8) {
        let stride = surface.stride() as usize;
        let mut rgb = (0, 0, 0);
        surface
            .with_data(|data| {
                let i = y * stride + x * 4;
                let px = u32::from_ne_bytes([data[i], data[i + 1], data[i + 2], data[i + 3]]);
                rgb = ((px >> 16) as u8, (px >> 8) as u8, px as u8);
            })
            .unwrap();
        rgb
    }

    fn solid(rgb: (f64, f64, f64)) -> ImageSurface {
        let image = ImageSurface::create(Format::ARgb32, 40, 40).unwrap();
        {
            let cr = Context::new(&image).unwrap();
            cr.set_source_rgb(rgb.0, rgb.1, rgb.2);
            cr.paint().unwrap();
        }
        image
    }

    #[test]
    fn test_draws_thumbnails_borders_and_empty_cells() {
        let mut gallery = Gallery::new(4);
        gallery.add(solid((1.0, 1.0, 0.0))).unwrap();
        gallery.add(solid((1.0, 1.0, 0.0))).unwrap();
        gallery.toggle(1);

        // 2x2 grid of 100px cells
        let target = ImageSurface::create(Format::ARgb32, 200, 200).unwrap();
        {
            let cr = Context::new(&target).unwrap();
            draw(&cr, &gallery, 200.0, 200.0, &GalleryColors::default()).unwrap();
        }
        target.flush();

        // thumbnail content
        assert_eq!(pixel(&target, 50, 50), (255, 255, 0));
        // unselected border is blue, selected is red
        assert_eq!(pixel(&target, 2, 50), (0, 0, 255));
        assert_eq!(pixel(&target, 102, 50), (255, 0, 0));
        // empty cell gets the green marker
        assert_eq!(pixel(&target, 50, 150), (0, 255, 0));
    }
}
