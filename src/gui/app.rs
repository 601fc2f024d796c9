use crate::config::{self, Config};
use crate::events::AppEvent;
use crate::gui::gallery::{self, Gallery, GalleryLayout};
use crate::gui::theme::{self, GalleryColors};
use doily_core::{DoilySurface, Point, PointOutcome};
use gdk4::{Key, ModifierType};
use gtk::prelude::*;
use gtk4 as gtk;
use palette::Srgba;
use relm4::prelude::*;
use std::cell::RefCell;
use std::rc::Rc;
use strum::Display;

pub const SURFACE_MIN_SIDE: i32 = 480;
pub const PEN_SIZE_RANGE: (f64, f64) = (2.0, 42.0);
pub const SECTOR_RANGE: (f64, f64) = (4.0, 24.0);
pub const STEP_RANGE: (f64, f64) = (1.0, 50.0);

#[derive(Debug, Clone, Copy, PartialEq, Eq, Display)]
pub enum Tool {
    Pen,
    Eraser,
}

impl Tool {
    fn from_eraser_active(active: bool) -> Self {
        if active { Self::Eraser } else { Self::Pen }
    }

    fn other(self) -> Self {
        match self {
            Self::Pen => Self::Eraser,
            Self::Eraser => Self::Pen,
        }
    }
}

pub struct AppModel {
    pub surface: Rc<RefCell<DoilySurface>>,
    pub gallery: Rc<RefCell<Gallery>>,
    pub config: Config,
    pub tool: Tool,
    pub pen_size: u32,
    pub sectors: u32,
    pub undo_step: u32,
    pub redo_step: u32,
    pub status: String,
    pub surface_area: gtk::DrawingArea,
    pub gallery_area: gtk::DrawingArea,
}

#[derive(Debug)]
pub enum AppMsg {
    Point(Point),
    Resize(i32, i32),
    SetSectors(i32),
    SetPenSize(u32),
    SetPenColor(Srgba<f64>),
    SetSectorLines(bool),
    SetReflect(bool),
    SetTool(Tool),
    SetUndoStep(u32),
    SetRedoStep(u32),
    Undo,
    Redo,
    Clear,
    SaveToGallery,
    GalleryClick(Point),
    RemoveSelected,
    SelectAll,
    DeselectAll,
    ExportSelected,
    ConfigReload,
}

impl From<AppEvent> for AppMsg {
    fn from(event: AppEvent) -> Self {
        match event {
            AppEvent::ConfigReload => AppMsg::ConfigReload,
        }
    }
}

fn shortcut(key: Key, state: ModifierType) -> Option<AppMsg> {
    if !state.contains(ModifierType::CONTROL_MASK) {
        return None;
    }
    let key = key.to_lower();
    if (key == Key::z && state.contains(ModifierType::SHIFT_MASK)) || key == Key::y {
        Some(AppMsg::Redo)
    } else if key == Key::z {
        Some(AppMsg::Undo)
    } else {
        None
    }
}

#[relm4::component(pub)]
impl SimpleComponent for AppModel {
    type Init = (DoilySurface, Config, async_channel::Receiver<AppEvent>);
    type Input = AppMsg;
    type Output = ();

    view! {
        #[root]
        gtk::ApplicationWindow {
            set_title: Some("Doily"),
            set_default_size: (1280, 800),

            add_controller = gtk::EventControllerKey {
                connect_key_pressed[sender] => move |_, key, _, state| {
                    match shortcut(key, state) {
                        Some(msg) => {
                            sender.input(msg);
                            glib::Propagation::Stop
                        }
                        None => glib::Propagation::Proceed,
                    }
                }
            },

            gtk::Box {
                set_orientation: gtk::Orientation::Horizontal,
                set_spacing: 12,
                set_margin_all: 12,

                #[name = "surface_area"]
                gtk::DrawingArea {
                    set_hexpand: true,
                    set_vexpand: true,
                    set_content_width: SURFACE_MIN_SIDE,
                    set_content_height: SURFACE_MIN_SIDE,
                    add_css_class: "doily-surface",

                    connect_resize[sender] => move |_, width, height| {
                        sender.input(AppMsg::Resize(width, height));
                    },

                    add_controller = gtk::GestureDrag {
                        connect_drag_begin[sender] => move |_, x, y| {
                            sender.input(AppMsg::Point(Point::new(x, y)));
                        },
                        connect_drag_update[sender] => move |gesture, dx, dy| {
                            if let Some((x, y)) = gesture.start_point() {
                                sender.input(AppMsg::Point(Point::new(x + dx, y + dy)));
                            }
                        }
                    }
                },

                gtk::Box {
                    set_orientation: gtk::Orientation::Vertical,
                    set_spacing: 6,
                    set_width_request: 380,

                    gtk::Button {
                        set_label: "Clear Display",
                        connect_clicked => AppMsg::Clear,
                    },

                    gtk::Button {
                        set_label: "Save doily to gallery",
                        connect_clicked => AppMsg::SaveToGallery,
                    },

                    gtk::Label {
                        set_xalign: 0.0,
                        #[watch]
                        set_label: &format!("Undo Operations : {}", model.undo_step),
                    },

                    gtk::Scale::with_range(gtk::Orientation::Horizontal, STEP_RANGE.0, STEP_RANGE.1, 1.0) {
                        set_digits: 0,
                        #[watch]
                        set_value: model.undo_step as f64,
                        connect_value_changed[sender] => move |scale| {
                            sender.input(AppMsg::SetUndoStep(scale.value() as u32));
                        },
                    },

                    gtk::Button {
                        #[watch]
                        set_label: &format!("Undo {} Points", model.undo_step),
                        connect_clicked => AppMsg::Undo,
                    },

                    gtk::Label {
                        set_xalign: 0.0,
                        #[watch]
                        set_label: &format!("Redo Operations : {}", model.redo_step),
                    },

                    gtk::Scale::with_range(gtk::Orientation::Horizontal, STEP_RANGE.0, STEP_RANGE.1, 1.0) {
                        set_digits: 0,
                        #[watch]
                        set_value: model.redo_step as f64,
                        connect_value_changed[sender] => move |scale| {
                            sender.input(AppMsg::SetRedoStep(scale.value() as u32));
                        },
                    },

                    gtk::Button {
                        #[watch]
                        set_label: &format!("Redo {} Points", model.redo_step),
                        connect_clicked => AppMsg::Redo,
                    },

                    gtk::Label {
                        set_xalign: 0.0,
                        #[watch]
                        set_label: &format!("Pen Size : {} px", model.pen_size),
                    },

                    gtk::Scale::with_range(gtk::Orientation::Horizontal, PEN_SIZE_RANGE.0, PEN_SIZE_RANGE.1, 1.0) {
                        set_digits: 0,
                        set_value: model.pen_size as f64,
                        connect_value_changed[sender] => move |scale| {
                            sender.input(AppMsg::SetPenSize(scale.value() as u32));
                        },
                    },

                    gtk::Label {
                        set_xalign: 0.0,
                        #[watch]
                        set_label: &format!("Number of Sectors : {}", model.sectors),
                    },

                    gtk::Scale::with_range(gtk::Orientation::Horizontal, SECTOR_RANGE.0, SECTOR_RANGE.1, 1.0) {
                        set_digits: 0,
                        set_value: model.sectors as f64,
                        connect_value_changed[sender] => move |scale| {
                            sender.input(AppMsg::SetSectors(scale.value() as i32));
                        },
                    },

                    gtk::CheckButton {
                        set_label: Some("Show Sector Lines"),
                        set_active: show_sector_lines,
                        connect_toggled[sender] => move |button| {
                            sender.input(AppMsg::SetSectorLines(button.is_active()));
                        },
                    },

                    gtk::CheckButton {
                        set_label: Some("Reflect Drawn Points"),
                        set_active: reflect,
                        connect_toggled[sender] => move |button| {
                            sender.input(AppMsg::SetReflect(button.is_active()));
                        },
                    },

                    gtk::ToggleButton {
                        #[watch]
                        set_label: &format!("Switch to {}", model.tool.other()),
                        connect_toggled[sender] => move |button| {
                            sender.input(AppMsg::SetTool(Tool::from_eraser_active(button.is_active())));
                        },
                    },

                    gtk::ColorDialogButton::new(Some(gtk::ColorDialog::new())) {
                        set_rgba: &pen_rgba,
                        connect_rgba_notify[sender] => move |button| {
                            sender.input(AppMsg::SetPenColor(theme::rgba_to_srgba(&button.rgba())));
                        },
                    },

                    gtk::Label {
                        set_xalign: 0.0,
                        set_wrap: true,
                        add_css_class: "doily-status",
                        #[watch]
                        set_label: &model.status,
                    },

                    gtk::Box {
                        set_orientation: gtk::Orientation::Horizontal,
                        set_spacing: 4,
                        set_homogeneous: true,

                        gtk::Button {
                            set_label: "Remove Doily",
                            connect_clicked => AppMsg::RemoveSelected,
                        },
                        gtk::Button {
                            set_label: "Select All",
                            connect_clicked => AppMsg::SelectAll,
                        },
                        gtk::Button {
                            set_label: "Deselect All",
                            connect_clicked => AppMsg::DeselectAll,
                        },
                        gtk::Button {
                            set_label: "Export",
                            connect_clicked => AppMsg::ExportSelected,
                        },
                    },

                    #[name = "gallery_area"]
                    gtk::DrawingArea {
                        set_vexpand: true,
                        set_content_height: 200,

                        add_controller = gtk::GestureClick {
                            connect_released[sender] => move |_, _, x, y| {
                                sender.input(AppMsg::GalleryClick(Point::new(x, y)));
                            }
                        }
                    },
                },
            }
        }
    }

    fn init(
        init: Self::Init,
        root: Self::Root,
        sender: ComponentSender<Self>,
    ) -> ComponentParts<Self> {
        let (surface, config, rx) = init;

        theme::load_css();

        let surface_config = *surface.config();
        let pen_rgba = theme::srgba_to_rgba(surface_config.pen_color);
        let show_sector_lines = surface_config.draw_sector_lines;
        let reflect = surface_config.reflect;

        let model = AppModel {
            surface: Rc::new(RefCell::new(surface)),
            gallery: Rc::new(RefCell::new(Gallery::new(config.gallery.capacity))),
            tool: Tool::Pen,
            pen_size: surface_config.pen_size,
            sectors: *surface_config.sectors,
            undo_step: config.controls.undo_step,
            redo_step: config.controls.redo_step,
            status: String::new(),
            config,
            surface_area: gtk::DrawingArea::default(),
            gallery_area: gtk::DrawingArea::default(),
        };

        let widgets = view_output!();

        let mut model = model;
        model.surface_area = widgets.surface_area.clone();
        model.gallery_area = widgets.gallery_area.clone();

        let surface_draw = model.surface.clone();
        widgets
            .surface_area
            .set_draw_func(move |_, cr, width, height| {
                let side = width.min(height) as f64;
                if let Err(e) = surface_draw.borrow().render(cr, side, side) {
                    log::error!("Drawing error: {}", e);
                }
            });

        let gallery_draw = model.gallery.clone();
        widgets
            .gallery_area
            .set_draw_func(move |_, cr, width, height| {
                let colors = GalleryColors::default();
                if let Err(e) = gallery::draw(
                    cr,
                    &gallery_draw.borrow(),
                    width as f64,
                    height as f64,
                    &colors,
                ) {
                    log::error!("Gallery drawing error: {}", e);
                }
            });

        let sender_clone = sender.clone();
        relm4::spawn(async move {
            while let Ok(event) = rx.recv().await {
                sender_clone.input(AppMsg::from(event));
            }
        });

        ComponentParts { model, widgets }
    }

    fn update(&mut self, msg: Self::Input, _sender: ComponentSender<Self>) {
        match msg {
            AppMsg::Point(point) => {
                let outcome = self.surface.borrow_mut().add_point(point.x, point.y);
                if let PointOutcome::Erased(removed) = outcome
                    && removed > 0
                {
                    self.status = format!("Erased {} points", removed);
                }
                self.surface_area.queue_draw();
            }
            AppMsg::Resize(width, height) => {
                let side = width.min(height);
                self.surface.borrow_mut().set_bounds(side, side);
            }
            AppMsg::SetSectors(count) => {
                if let Err(e) = self.surface.borrow_mut().set_sector_count(count) {
                    self.status = e.to_string();
                    return;
                }
                self.sectors = *self.surface.borrow().config().sectors;
                self.surface_area.queue_draw();
            }
            AppMsg::SetPenSize(size) => {
                self.surface.borrow_mut().set_pen_size(size);
                self.pen_size = self.surface.borrow().config().pen_size;
            }
            AppMsg::SetPenColor(color) => self.surface.borrow_mut().set_pen_color(color),
            AppMsg::SetSectorLines(enabled) => {
                self.surface.borrow_mut().set_draw_sector_lines(enabled);
                self.surface_area.queue_draw();
            }
            AppMsg::SetReflect(enabled) => {
                self.surface.borrow_mut().set_reflect(enabled);
                self.surface_area.queue_draw();
            }
            AppMsg::SetTool(tool) => {
                self.tool = tool;
                self.surface.borrow_mut().set_erasing(tool == Tool::Eraser);
            }
            AppMsg::SetUndoStep(step) => self.undo_step = step,
            AppMsg::SetRedoStep(step) => self.redo_step = step,
            AppMsg::Undo => {
                let undone = self.surface.borrow_mut().undo(self.undo_step as usize);
                self.status = format!("Undid {} points", undone);
                self.surface_area.queue_draw();
            }
            AppMsg::Redo => {
                let redone = self.surface.borrow_mut().redo(self.redo_step as usize);
                self.status = format!("Redid {} points", redone);
                self.surface_area.queue_draw();
            }
            AppMsg::Clear => {
                self.surface.borrow_mut().clear();
                self.status.clear();
                self.surface_area.queue_draw();
            }
            AppMsg::SaveToGallery => self.save_to_gallery(),
            AppMsg::GalleryClick(point) => {
                let mut gallery = self.gallery.borrow_mut();
                let layout = GalleryLayout::for_capacity(gallery.capacity().max(gallery.len()));
                let (width, height) = (
                    self.gallery_area.width() as f64,
                    self.gallery_area.height() as f64,
                );
                if let Some(index) = layout.cell_at(point, width, height) {
                    gallery.toggle(index);
                    self.gallery_area.queue_draw();
                }
            }
            AppMsg::RemoveSelected => {
                let removed = self.gallery.borrow_mut().remove_selected();
                self.status = format!("Removed {} doilies", removed);
                self.gallery_area.queue_draw();
            }
            AppMsg::SelectAll => {
                self.gallery.borrow_mut().select_all();
                self.gallery_area.queue_draw();
            }
            AppMsg::DeselectAll => {
                self.gallery.borrow_mut().deselect_all();
                self.gallery_area.queue_draw();
            }
            AppMsg::ExportSelected => self.export_selected(),
            AppMsg::ConfigReload => match config::load_config() {
                Ok(new_config) => {
                    self.apply_config(new_config);
                    log::info!("Configuration reloaded");
                }
                Err(e) => log::error!("Failed to reload config: {}", e),
            },
        }
    }
}

impl AppModel {
    fn save_to_gallery(&mut self) {
        let (width, height) = self.surface.borrow().bounds();
        let image = match self.surface.borrow().render_to(width, height) {
            Ok(image) => image,
            Err(e) => {
                log::error!("Failed to render snapshot: {}", e);
                self.status = e.to_string();
                return;
            }
        };

        self.status = match self.gallery.borrow_mut().add(image) {
            Ok(count) => format!("Saved doily {} of {}", count, self.config.gallery.capacity),
            Err(e) => e.to_string(),
        };
        self.gallery_area.queue_draw();
    }

    fn export_selected(&mut self) {
        let Some(dir) = self.config.gallery.resolve_export_dir() else {
            self.status = "No export directory available".to_string();
            return;
        };

        self.status = match self.gallery.borrow().export_selected(&dir) {
            Ok(paths) => {
                log::info!("Exported {} doilies to {}", paths.len(), dir.display());
                format!("Exported {} doilies to {}", paths.len(), dir.display())
            }
            Err(e) => {
                log::error!("Export failed: {}", e);
                e.to_string()
            }
        };
    }

    /// Applies the parts of a reloaded config that make sense mid-session. Surface settings only
    /// apply at startup so a reload never changes the pattern being drawn.
    fn apply_config(&mut self, config: Config) {
        self.undo_step = config.controls.undo_step;
        self.redo_step = config.controls.redo_step;
        self.gallery
            .borrow_mut()
            .set_capacity(config.gallery.capacity);
        self.gallery_area.queue_draw();
        self.config = config;
    }
}
