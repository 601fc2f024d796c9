use gtk::gdk;
use gtk4 as gtk;
use palette::Srgba;

pub struct GalleryColors {
    pub selected: Srgba<f64>,
    pub unselected: Srgba<f64>,
    pub empty: Srgba<f64>,
}

impl Default for GalleryColors {
    fn default() -> Self {
        Self {
            selected: Srgba::new(1.0, 0.0, 0.0, 1.0),
            unselected: Srgba::new(0.0, 0.0, 1.0, 1.0),
            empty: Srgba::new(0.0, 1.0, 0.0, 1.0),
        }
    }
}

pub fn srgba_to_rgba(color: Srgba<f64>) -> gdk::RGBA {
    let (r, g, b, a) = color.into_components();
    gdk::RGBA::new(r as f32, g as f32, b as f32, a as f32)
}

pub fn rgba_to_srgba(color: &gdk::RGBA) -> Srgba<f64> {
    Srgba::new(
        color.red() as f64,
        color.green() as f64,
        color.blue() as f64,
        color.alpha() as f64,
    )
}

pub fn load_css() {
    let provider = gtk::CssProvider::new();
    let css_data = "
.doily-surface {
    background-color: black;
}
.doily-status {
    font-style: italic;
}
";
    provider.load_from_data(css_data);

    if let Some(display) = gdk::Display::default() {
        gtk::style_context_add_provider_for_display(
            &display,
            &provider,
            gtk::STYLE_PROVIDER_PRIORITY_APPLICATION,
        );
    }
}
