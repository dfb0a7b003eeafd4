use crate::config::{self, Config};
use crate::events::AppEvent;
use crate::gui::calendar::{self, TileLoad, TileWidget};
use crate::gui::lightbox::LightboxLayer;
use crate::gui::theme::{self, ThemeColors};
use crate::gui::window::{self, ArenaMeasure};
use crate::gui::{
    ARENA_HEIGHT, ARENA_WIDTH, ASK_TITLE, CALENDAR_TITLE, FEEDBACK_SIZE, FINAL_LINK_LABEL,
    FINAL_MESSAGE, GRID_COLUMNS, NO_POSITION, WINDOW_HEIGHT, WINDOW_WIDTH, YES_POSITION,
    celebration as celebration_view,
};
use gtk::prelude::*;
use gtk4 as gtk;
use keepsake::calendar::{Calendar, TileAction};
use keepsake::celebration::Celebration;
use keepsake::clock::{Clock, SystemClock};
use keepsake::evasion::EvasionController;
use keepsake::feedback::{DECLINE_FALLBACK_TEXT, DeclineFeedback};
use keepsake::geometry::Point;
use keepsake::lightbox::{Lightbox, LightboxInput};
use keepsake::navigator::{Navigator, Screen};
use keepsake::placement::Placement;
use keepsake::reveal::Day;
use relm4::prelude::*;
use std::cell::{Cell, RefCell};
use std::path::PathBuf;
use std::rc::Rc;
use std::time::Duration;

// Wait for the ask screen to be allocated before the first placement.
const LAYOUT_DELAY: Duration = Duration::from_millis(100);
const NO_LINK: &str = "about:blank";

pub struct AppInit {
    pub config: Config,
    /// Assets directory given on the command line; survives config reloads.
    pub assets_override: Option<PathBuf>,
    pub events: async_channel::Receiver<AppEvent>,
}

/// Widgets the evasion controller measures and moves.
pub struct AskWidgets {
    pub window: gtk::ApplicationWindow,
    pub arena: gtk::Fixed,
    pub yes: gtk::Button,
    pub no: gtk::Button,
}

impl AskWidgets {
    fn measure(&self) -> ArenaMeasure<'_> {
        ArenaMeasure {
            window: &self.window,
            arena: &self.arena,
            obstacle: &self.yes,
            element: &self.no,
        }
    }

    fn apply(&self, placement: Option<Placement>) {
        if let Some(p) = placement {
            self.arena.move_(&self.no, p.left, p.top);
        }
    }
}

pub struct AppModel {
    pub config: Config,
    pub assets_override: Option<PathBuf>,
    pub clock: SystemClock,
    pub navigator: Navigator,
    pub evasion: EvasionController,
    pub feedback: DeclineFeedback,
    pub celebration: Rc<RefCell<Celebration>>,
    pub calendar: Calendar,
    pub lightbox: Lightbox,
    pub ask: AskWidgets,
    pub feedback_box: gtk::Box,
    pub final_link: gtk::LinkButton,
    pub celebration_area: gtk::DrawingArea,
    pub animating: Rc<Cell<bool>>,
    pub tiles: Vec<TileWidget>,
    pub lightbox_layer: LightboxLayer,
}

#[derive(Debug)]
pub enum AppMsg {
    Layout,
    PointerMoved(Point),
    NoEntered,
    NoClicked,
    FeedbackExpired,
    YesClicked,
    ShowCalendar,
    Back,
    TileClicked(Day),
    Lightbox(LightboxInput),
    Reset,
    ConfigReload,
}

impl From<AppEvent> for AppMsg {
    fn from(event: AppEvent) -> Self {
        match event {
            AppEvent::ConfigReload => AppMsg::ConfigReload,
        }
    }
}

#[relm4::component(pub)]
impl SimpleComponent for AppModel {
    type Init = AppInit;
    type Input = AppMsg;
    type Output = ();

    view! {
        #[root]
        #[name = "window"]
        gtk::ApplicationWindow {
            set_title: Some("Valentine"),
            set_default_width: WINDOW_WIDTH,
            set_default_height: WINDOW_HEIGHT,
            add_css_class: "valentine-window",

            add_controller = gtk::EventControllerKey {
                connect_key_pressed[sender] => move |_, key, _, _| {
                    if key == gtk::gdk::Key::Escape {
                        sender.input(AppMsg::Lightbox(LightboxInput::Escape));
                        return glib::Propagation::Stop;
                    }
                    glib::Propagation::Proceed
                }
            },

            add_controller = gtk::EventControllerMotion {
                connect_motion[sender] => move |_, x, y| {
                    sender.input(AppMsg::PointerMoved(Point::new(x, y)));
                },
                connect_enter[sender] => move |_, x, y| {
                    sender.input(AppMsg::PointerMoved(Point::new(x, y)));
                }
            },

            #[name = "overlay"]
            gtk::Overlay {
                gtk::Box {
                    set_orientation: gtk::Orientation::Vertical,
                    set_halign: gtk::Align::Center,
                    set_valign: gtk::Align::Center,

                    gtk::Box {
                        set_orientation: gtk::Orientation::Vertical,
                        set_spacing: 16,
                        #[watch]
                        set_visible: model.navigator.is_visible(Screen::Ask),

                        gtk::Label {
                            set_label: ASK_TITLE,
                            add_css_class: "ask-title",
                        },

                        #[name = "arena"]
                        gtk::Fixed {
                            set_width_request: ARENA_WIDTH,
                            set_height_request: ARENA_HEIGHT,
                            set_halign: gtk::Align::Center,
                            add_css_class: "buttons-wrap",
                        },

                        #[name = "feedback_box"]
                        gtk::Box {
                            set_orientation: gtk::Orientation::Vertical,
                            set_halign: gtk::Align::Center,
                            add_css_class: "nice-try",
                            #[watch]
                            set_visible: model.feedback.is_visible(),
                        },
                    },

                    gtk::Box {
                        set_orientation: gtk::Orientation::Vertical,
                        set_spacing: 12,
                        #[watch]
                        set_visible: model.navigator.is_visible(Screen::Calendar),

                        gtk::Label {
                            set_label: CALENDAR_TITLE,
                            add_css_class: "calendar-title",
                        },

                        #[name = "grid"]
                        gtk::Grid {
                            set_row_spacing: 10,
                            set_column_spacing: 10,
                            set_halign: gtk::Align::Center,
                        },

                        gtk::Label {
                            add_css_class: "revealed-count",
                            #[watch]
                            set_label: &model.calendar.count_text(),
                        },

                        gtk::Label {
                            set_label: FINAL_MESSAGE,
                            add_css_class: "final-message",
                            #[watch]
                            set_visible: model.calendar.completion_visible(),
                        },

                        #[name = "final_link"]
                        gtk::LinkButton::with_label(NO_LINK, FINAL_LINK_LABEL) {
                            #[watch]
                            set_visible: model.calendar.completion_visible()
                                && model.config.final_link.is_some(),
                        },

                        gtk::Box {
                            set_orientation: gtk::Orientation::Horizontal,
                            set_spacing: 8,
                            set_halign: gtk::Align::Center,

                            gtk::Button {
                                set_label: "Start over",
                                connect_clicked => AppMsg::Reset,
                            },

                            gtk::Button {
                                set_label: "Back",
                                connect_clicked => AppMsg::Back,
                            },
                        },
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
        let AppInit {
            mut config,
            assets_override,
            events,
        } = init;
        if let Some(dir) = &assets_override {
            config.assets_dir = dir.clone();
        }

        theme::load_css();

        let yes = gtk::Button::with_label("Yes");
        yes.add_css_class("yes-button");
        {
            let sender = sender.clone();
            yes.connect_clicked(move |_| sender.input(AppMsg::YesClicked));
        }

        let no = gtk::Button::with_label("No");
        no.add_css_class("no-button");
        {
            let sender = sender.clone();
            no.connect_clicked(move |_| sender.input(AppMsg::NoClicked));
        }
        let enter = gtk::EventControllerMotion::new();
        {
            let sender = sender.clone();
            enter.connect_enter(move |_, _, _| sender.input(AppMsg::NoEntered));
        }
        no.add_controller(enter);

        let tiles = Day::all()
            .map(|day| {
                let sender = sender.clone();
                TileWidget::new(day, move |d| sender.input(AppMsg::TileClicked(d)))
            })
            .collect();

        let lightbox_layer = {
            let sender = sender.clone();
            LightboxLayer::new(move |input| sender.input(AppMsg::Lightbox(input)))
        };

        let celebration_area = gtk::DrawingArea::new();
        celebration_area.set_hexpand(true);
        celebration_area.set_vexpand(true);
        celebration_area.set_can_target(false);
        celebration_area.add_css_class("celebration");

        let mut model = AppModel {
            navigator: Navigator::new(config.start_screen),
            evasion: EvasionController::new(config.evasion),
            feedback: DeclineFeedback::new(config.feedback.clone()),
            celebration: Rc::new(RefCell::new(Celebration::new(config.celebration))),
            calendar: Calendar::new(),
            lightbox: Lightbox::default(),
            clock: SystemClock::new(),
            config,
            assets_override,
            ask: AskWidgets {
                window: root.clone(),
                arena: gtk::Fixed::default(),
                yes,
                no,
            },
            feedback_box: gtk::Box::default(),
            final_link: gtk::LinkButton::new(NO_LINK),
            celebration_area,
            animating: Rc::new(Cell::new(false)),
            tiles,
            lightbox_layer,
        };

        let widgets = view_output!();

        model.ask.arena = widgets.arena.clone();
        model.feedback_box = widgets.feedback_box.clone();
        model.final_link = widgets.final_link.clone();

        model
            .ask
            .arena
            .put(&model.ask.yes, YES_POSITION.0, YES_POSITION.1);
        model
            .ask
            .arena
            .put(&model.ask.no, NO_POSITION.0, NO_POSITION.1);

        for (i, tile) in model.tiles.iter().enumerate() {
            let i = i as u32;
            widgets.grid.attach(
                &tile.button,
                (i % GRID_COLUMNS) as i32,
                (i / GRID_COLUMNS) as i32,
                1,
                1,
            );
        }

        widgets.overlay.add_overlay(&model.celebration_area);
        widgets.overlay.add_overlay(&model.lightbox_layer.root);

        let celebration = model.celebration.clone();
        let clock = model.clock;
        model
            .celebration_area
            .set_draw_func(move |area, cr, width, height| {
                let colors = ThemeColors::from_context(&area.style_context());
                if let Err(e) = celebration_view::draw(
                    cr,
                    &celebration.borrow(),
                    clock.now_ms(),
                    width as f64,
                    height as f64,
                    &colors,
                ) {
                    log::error!("Drawing error: {}", e);
                }
            });

        model.apply_final_link();
        model.apply_screen_mode();
        model.refresh_all_tiles();
        if model.navigator.is_visible(Screen::Ask) {
            schedule(&sender, LAYOUT_DELAY, AppMsg::Layout);
        }

        let sender_clone = sender.clone();
        relm4::spawn(async move {
            while let Ok(event) = events.recv().await {
                sender_clone.input(AppMsg::from(event));
            }
        });

        ComponentParts { model, widgets }
    }

    fn update(&mut self, msg: Self::Input, sender: ComponentSender<Self>) {
        match msg {
            AppMsg::Layout => self.place_initial(),
            AppMsg::PointerMoved(point) => {
                self.place_initial();
                let active = self.navigator.is_visible(Screen::Ask);
                let placement =
                    self.evasion
                        .pointer_moved(point, active, &self.ask.measure(), &self.clock);
                self.ask.apply(placement);
            }
            AppMsg::NoEntered => {
                let active = self.navigator.is_visible(Screen::Ask);
                let placement = self
                    .evasion
                    .pointer_entered(active, &self.ask.measure(), &self.clock);
                self.ask.apply(placement);
            }
            AppMsg::NoClicked => {
                let delay = self.feedback.engage();
                self.show_feedback();
                schedule(&sender, delay, AppMsg::FeedbackExpired);
            }
            AppMsg::FeedbackExpired => {
                self.feedback.expire();
                calendar::clear_children(&self.feedback_box);
                let placement = self.evasion.reposition(&self.ask.measure(), &self.clock);
                self.ask.apply(placement);
            }
            AppMsg::YesClicked => {
                let delay = self
                    .celebration
                    .borrow_mut()
                    .burst(self.clock.now_ms(), &mut rand::rng());
                self.animate_celebration();
                schedule(&sender, delay, AppMsg::ShowCalendar);
            }
            AppMsg::ShowCalendar => self.show_screen(Screen::Calendar, &sender),
            AppMsg::Back => self.show_screen(Screen::Ask, &sender),
            AppMsg::TileClicked(day) => match self.calendar.click(day) {
                TileAction::OpenLightbox(day) => {
                    self.lightbox.open(day);
                    self.sync_lightbox();
                }
                TileAction::Revealed { day, completed_now } => {
                    self.refresh_tile(day);
                    if completed_now {
                        log::info!("Calendar complete");
                    }
                }
            },
            AppMsg::Lightbox(input) => {
                if self.lightbox.handle(input) {
                    self.sync_lightbox();
                }
            }
            AppMsg::Reset => {
                self.calendar.reset();
                self.refresh_all_tiles();
            }
            AppMsg::ConfigReload => match config::load_config() {
                Ok(mut new_config) => {
                    if let Some(dir) = &self.assets_override {
                        new_config.assets_dir = dir.clone();
                    }
                    self.evasion.set_settings(new_config.evasion);
                    self.feedback.set_settings(new_config.feedback.clone());
                    self.celebration
                        .borrow_mut()
                        .set_settings(new_config.celebration);
                    self.config = new_config;
                    self.apply_final_link();
                    log::info!("Configuration reloaded");
                }
                Err(e) => log::error!("Failed to reload config: {}", e),
            },
        }
    }
}

fn schedule(sender: &ComponentSender<AppModel>, delay: Duration, msg: AppMsg) {
    let sender = sender.clone();
    glib::timeout_add_local_once(delay, move || sender.input(msg));
}

impl AppModel {
    fn place_initial(&mut self) {
        if !self.navigator.is_visible(Screen::Ask) {
            return;
        }
        let placement = self.evasion.ensure_placed(&self.ask.measure(), &self.clock);
        self.ask.apply(placement);
    }

    fn show_screen(&mut self, screen: Screen, sender: &ComponentSender<Self>) {
        if !self.navigator.show(screen) {
            return;
        }
        self.apply_screen_mode();
        if screen == Screen::Ask {
            schedule(sender, LAYOUT_DELAY, AppMsg::Layout);
        }
    }

    fn apply_screen_mode(&self) {
        for (class, active) in self.navigator.mode_classes() {
            window::toggle_class(&self.ask.window, class, active);
        }
    }

    fn apply_final_link(&self) {
        if let Some(uri) = &self.config.final_link {
            self.final_link.set_uri(uri);
        }
    }

    fn show_feedback(&self) {
        calendar::clear_children(&self.feedback_box);
        let asset = self.feedback.asset();
        match calendar::load_texture(&self.config.resolve_asset(&asset), FEEDBACK_SIZE) {
            Ok(texture) => {
                let picture = gtk::Picture::for_paintable(&texture);
                picture.set_alternative_text(Some(DECLINE_FALLBACK_TEXT));
                picture.set_size_request(FEEDBACK_SIZE, FEEDBACK_SIZE);
                self.feedback_box.append(&picture);
            }
            Err(e) => {
                log::debug!("Failed to load {}: {}", asset, e);
                self.feedback_box
                    .append(&gtk::Label::new(Some(DECLINE_FALLBACK_TEXT)));
            }
        }
    }

    fn animate_celebration(&self) {
        if self.animating.replace(true) {
            return;
        }
        let celebration = self.celebration.clone();
        let animating = self.animating.clone();
        let clock = self.clock;
        self.celebration_area.add_tick_callback(move |area, _| {
            celebration.borrow_mut().prune(clock.now_ms());
            area.queue_draw();
            if celebration.borrow().is_active() {
                glib::ControlFlow::Continue
            } else {
                animating.set(false);
                glib::ControlFlow::Break
            }
        });
    }

    fn refresh_tile(&mut self, day: Day) {
        let Some(tile) = self.tiles.iter().find(|t| t.day == day) else {
            return;
        };
        let config = &self.config;
        if let TileLoad::AssetFailed(day) =
            tile.refresh(&self.calendar.tile(day), |a| config.resolve_asset(a))
        {
            self.calendar.asset_failed(day);
            tile.refresh(&self.calendar.tile(day), |a| config.resolve_asset(a));
        }
    }

    fn refresh_all_tiles(&mut self) {
        for day in Day::all() {
            self.refresh_tile(day);
        }
    }

    fn sync_lightbox(&mut self) {
        let config = &self.config;
        if !self
            .lightbox_layer
            .sync(&self.lightbox, |a| config.resolve_asset(a))
        {
            self.lightbox.asset_failed();
            self.lightbox_layer
                .sync(&self.lightbox, |a| config.resolve_asset(a));
        }
    }
}
