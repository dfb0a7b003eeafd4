use crate::gui::LIGHTBOX_SIZE;
use crate::gui::calendar::load_texture;
use crate::gui::window::bounds_in;
use gtk::prelude::*;
use gtk4 as gtk;
use keepsake::calendar::FALLBACK_TEXT;
use keepsake::geometry::Point;
use keepsake::lightbox::{Lightbox, LightboxInput};
use keepsake::reveal::AssetPath;
use std::path::PathBuf;

/// Full-window modal layer: a dimmed backdrop around a content card.
pub struct LightboxLayer {
    pub root: gtk::Box,
    content: gtk::Box,
    picture: gtk::Picture,
    fallback: gtk::Label,
}

impl LightboxLayer {
    pub fn new(on_input: impl Fn(LightboxInput) + Clone + 'static) -> Self {
        let root = gtk::Box::new(gtk::Orientation::Vertical, 0);
        root.add_css_class("lightbox");
        root.set_hexpand(true);
        root.set_vexpand(true);
        root.set_visible(false);

        let content = gtk::Box::new(gtk::Orientation::Vertical, 8);
        content.add_css_class("lightbox-content");
        content.set_halign(gtk::Align::Center);
        content.set_valign(gtk::Align::Center);
        content.set_vexpand(true);

        let close = gtk::Button::with_label("✕");
        close.set_halign(gtk::Align::End);
        close.set_tooltip_text(Some("Close"));
        {
            let on_input = on_input.clone();
            close.connect_clicked(move |_| on_input(LightboxInput::CloseButton));
        }

        let picture = gtk::Picture::new();
        picture.set_size_request(LIGHTBOX_SIZE, LIGHTBOX_SIZE);
        picture.set_content_fit(gtk::ContentFit::Contain);

        let fallback = gtk::Label::new(Some(FALLBACK_TEXT));
        fallback.add_css_class("lightbox-fallback");
        fallback.set_visible(false);

        content.append(&close);
        content.append(&picture);
        content.append(&fallback);
        root.append(&content);

        let click = gtk::GestureClick::new();
        {
            let root = root.clone();
            let content = content.clone();
            click.connect_released(move |_, _, x, y| {
                let inside = bounds_in(&content, &root).is_some_and(|r| r.contains(Point::new(x, y)));
                on_input(if inside {
                    LightboxInput::Content
                } else {
                    LightboxInput::Backdrop
                });
            });
        }
        root.add_controller(click);

        Self {
            root,
            content,
            picture,
            fallback,
        }
    }

    /// Mirrors `lightbox` into the widgets. Returns `false` if the image
    /// could not be loaded; the caller records the failure and syncs again.
    pub fn sync(&self, lightbox: &Lightbox, resolve: impl Fn(&AssetPath) -> PathBuf) -> bool {
        self.root.set_visible(lightbox.is_open());
        self.fallback.set_visible(lightbox.shows_fallback());

        match lightbox {
            Lightbox::Closed => {
                self.picture.set_paintable(None::<&gdk4::Paintable>);
                true
            }
            Lightbox::Open { failed: true, .. } => {
                self.picture.set_paintable(None::<&gdk4::Paintable>);
                self.picture.set_visible(false);
                true
            }
            Lightbox::Open { day, asset, .. } => {
                match load_texture(&resolve(asset), LIGHTBOX_SIZE) {
                    Ok(texture) => {
                        self.picture.set_paintable(Some(&texture));
                        self.picture
                            .set_alternative_text(Some(day.label().as_str()));
                        self.picture.set_visible(true);
                        self.content.grab_focus();
                        true
                    }
                    Err(e) => {
                        log::debug!("Failed to load {} for lightbox: {}", asset, e);
                        false
                    }
                }
            }
        }
    }
}
