use crate::gui::theme::ThemeColors;
use crate::gui::{TILE_SIZE, celebration, window};
use gdk_pixbuf::Pixbuf;
use gtk::prelude::*;
use gtk4 as gtk;
use keepsake::calendar::{FALLBACK_TEXT, TileBack, TileView};
use keepsake::reveal::{AssetPath, Day};
use std::path::{Path, PathBuf};

const FRONT: &str = "front";
const BACK: &str = "back";

/// Loads an image scaled to fit `size`.
pub fn load_texture(path: &Path, size: i32) -> Result<gdk4::Texture, glib::Error> {
    let pixbuf = Pixbuf::from_file_at_scale(path, size, size, true)?;
    Ok(gdk4::Texture::for_pixbuf(&pixbuf))
}

pub fn clear_children(container: &gtk::Box) {
    while let Some(child) = container.first_child() {
        container.remove(&child);
    }
}

/// Outcome of pushing a tile view into its widgets.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TileLoad {
    Ok,
    AssetFailed(Day),
}

pub struct TileWidget {
    pub day: Day,
    pub button: gtk::Button,
    faces: gtk::Stack,
    back: gtk::Box,
}

impl TileWidget {
    pub fn new(day: Day, on_click: impl Fn(Day) + 'static) -> Self {
        let front = gtk::Box::new(gtk::Orientation::Vertical, 4);
        front.add_css_class("tile-front");
        front.set_valign(gtk::Align::Center);

        let icon = gtk::DrawingArea::new();
        icon.set_content_width(28);
        icon.set_content_height(28);
        icon.set_halign(gtk::Align::Center);
        icon.set_draw_func(|area, cr, w, h| {
            let colors = ThemeColors::from_context(&area.style_context());
            let size = w.min(h) as f64;
            if let Err(e) = celebration::draw_tile_icon(cr, size, &colors) {
                log::error!("Drawing error: {}", e);
            }
        });
        front.append(&icon);
        front.append(&gtk::Label::new(Some(day.label().as_str())));

        let back = gtk::Box::new(gtk::Orientation::Vertical, 0);
        back.add_css_class("tile-back");
        back.set_valign(gtk::Align::Center);
        back.set_halign(gtk::Align::Center);

        let faces = gtk::Stack::new();
        faces.set_transition_type(gtk::StackTransitionType::RotateLeftRight);
        faces.add_named(&front, Some(FRONT));
        faces.add_named(&back, Some(BACK));

        let button = gtk::Button::new();
        button.add_css_class("tile");
        button.set_size_request(TILE_SIZE, TILE_SIZE);
        button.set_child(Some(&faces));
        button.connect_clicked(move |_| on_click(day));

        Self {
            day,
            button,
            faces,
            back,
        }
    }

    /// Projects `view` onto the tile. Image loading happens here, so a
    /// failure is reported back for the caller to record.
    pub fn refresh(&self, view: &TileView, resolve: impl Fn(&AssetPath) -> PathBuf) -> TileLoad {
        let label = view.accessible_label();
        self.button.set_tooltip_text(Some(&label));
        self.button
            .update_property(&[gtk::accessible::Property::Label(&label)]);
        window::toggle_class(&self.button, "revealed", view.revealed);

        clear_children(&self.back);
        match &view.back {
            TileBack::Hidden => {
                self.faces.set_visible_child_name(FRONT);
                return TileLoad::Ok;
            }
            TileBack::Image(asset) => match load_texture(&resolve(asset), TILE_SIZE) {
                Ok(texture) => {
                    let picture = gtk::Picture::for_paintable(&texture);
                    picture.set_alternative_text(Some(view.label.as_str()));
                    picture.set_content_fit(gtk::ContentFit::Cover);
                    picture.set_size_request(TILE_SIZE, TILE_SIZE);
                    self.back.append(&picture);
                }
                Err(e) => {
                    log::debug!("Failed to load {}: {}", asset, e);
                    return TileLoad::AssetFailed(self.day);
                }
            },
            TileBack::Fallback => {
                let fallback = gtk::Label::new(Some(FALLBACK_TEXT));
                fallback.add_css_class("tile-fallback");
                fallback.set_wrap(true);
                fallback.set_justify(gtk::Justification::Center);
                self.back.append(&fallback);
            }
        }
        self.faces.set_visible_child_name(BACK);
        TileLoad::Ok
    }
}
