//! Browser front end: mounts the views into the page, routes between them via
//! `location.hash`, and forwards DOM events to the core.
//!
//! All state lives in one thread-local `App`. Event listeners are attached once
//! to the root element and dispatch on `data-action` attributes, so re-rendering
//! with `set_inner_html` never leaks per-button closures.

mod home;
mod raf;
mod settings_page;

pub use raf::RafTicker;

use std::cell::RefCell;

use wasm_bindgen::JsCast;
use wasm_bindgen::prelude::*;
use web_sys::{Document, Element, Event, HtmlElement, HtmlInputElement, KeyboardEvent, Window, window};

use crate::dice::DieType;
use crate::easing::Easing;
use crate::i18n::{Locale, Translator};
use crate::scheduler::TickOutcome;
use crate::settings::{ButtonAnimation, SettingsPatch, SettingsStore};
use crate::storage::{BrowserStorage, KeyValueStore, MemoryStore};

use home::{FACE_ID, HomeView, PROGRESS_FILL_ID, render_home};
use settings_page::{
    DURATION_ERROR_ID, DURATION_INPUT_ID, PARTICLE_INPUT_ID, PARTICLE_VALUE_ID, SettingsView,
    duration_error_text, render_settings,
};

/// Element the app renders into; created under `<body>` when missing.
pub const ROOT_ID: &str = "dice-app";

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Route {
    Home,
    Settings,
}

impl Route {
    pub fn from_hash(hash: &str) -> Self {
        match hash.trim_start_matches('#').trim_end_matches('/') {
            "/settings" | "settings" => Route::Settings,
            _ => Route::Home,
        }
    }

    pub fn hash(self) -> &'static str {
        match self {
            Route::Home => "#/",
            Route::Settings => "#/settings",
        }
    }
}

enum View {
    Home(HomeView),
    Settings(SettingsView),
}

struct App {
    window: Window,
    root: Element,
    store: SettingsStore<Box<dyn KeyValueStore>>,
    translator: Translator,
    view: View,
}

thread_local! {
    static APP: RefCell<Option<App>> = RefCell::new(None);
}

fn with_app(f: impl FnOnce(&mut App)) {
    APP.with(|cell| match cell.try_borrow_mut() {
        Ok(mut guard) => {
            if let Some(app) = guard.as_mut() {
                f(app);
            }
        }
        Err(_) => log::debug!("app state busy, event dropped"),
    });
}

fn now_ms(window: &Window) -> f64 {
    window.performance().map(|p| p.now()).unwrap_or(0.0)
}

/// Frame callback handed to the home view's ticker.
pub(crate) fn on_frame(ts: f64) {
    with_app(|app| app.on_frame(ts));
}

#[wasm_bindgen]
pub fn start_app() -> Result<(), JsValue> {
    if APP.with(|cell| cell.borrow().is_some()) {
        log::debug!("start_app called twice; ignoring");
        return Ok(());
    }
    let win = window().ok_or_else(|| JsValue::from_str("no window"))?;
    let doc = win
        .document()
        .ok_or_else(|| JsValue::from_str("no document"))?;
    let root = mount_root(&doc)?;

    let storage: Box<dyn KeyValueStore> = match BrowserStorage::open() {
        Some(s) => Box::new(s),
        None => {
            log::warn!("localStorage unavailable; settings will not survive a reload");
            Box::new(MemoryStore::new())
        }
    };
    let mut store = SettingsStore::load(storage);
    let locale = store.stored_locale().unwrap_or_else(|| {
        let lang = win.navigator().language().unwrap_or_default();
        Locale::detect(&lang)
    });
    if let Err(e) = store.save_locale(locale) {
        log::warn!("{e}");
    }

    let route = Route::from_hash(&win.location().hash().unwrap_or_default());
    let view = open_view(route, &win, &store);
    let app = App {
        window: win.clone(),
        root: root.clone(),
        store,
        translator: Translator::new(locale),
        view,
    };
    app.render();
    APP.with(|cell| cell.replace(Some(app)));

    attach_listeners(&win, &root)?;
    log::info!("dice roller started ({})", locale.tag());
    Ok(())
}

fn mount_root(doc: &Document) -> Result<Element, JsValue> {
    if let Some(el) = doc.get_element_by_id(ROOT_ID) {
        return Ok(el);
    }
    let el = doc.create_element("div")?;
    el.set_id(ROOT_ID);
    let body = doc.body().ok_or_else(|| JsValue::from_str("no body"))?;
    body.append_child(&el)?;
    Ok(el)
}

fn open_view(route: Route, win: &Window, store: &SettingsStore<Box<dyn KeyValueStore>>) -> View {
    match route {
        Route::Home => View::Home(HomeView::new(win)),
        Route::Settings => View::Settings(SettingsView::new(store.settings())),
    }
}

fn attach_listeners(win: &Window, root: &Element) -> Result<(), JsValue> {
    let click = Closure::<dyn FnMut(Event)>::wrap(Box::new(|evt: Event| {
        let Some((action, value)) = action_of(&evt) else {
            return;
        };
        with_app(|app| app.on_action(&action, &value));
    }));
    root.add_event_listener_with_callback("click", click.as_ref().unchecked_ref())?;
    click.forget();

    let input = Closure::<dyn FnMut(Event)>::wrap(Box::new(|evt: Event| {
        let Some(el) = input_target(&evt) else {
            return;
        };
        let (id, value) = (el.id(), el.value());
        with_app(|app| app.on_input(&id, &value));
    }));
    root.add_event_listener_with_callback("input", input.as_ref().unchecked_ref())?;
    input.forget();

    let focusout = Closure::<dyn FnMut(Event)>::wrap(Box::new(|evt: Event| {
        let Some(el) = input_target(&evt) else {
            return;
        };
        let id = el.id();
        with_app(|app| app.on_blur(&id));
    }));
    root.add_event_listener_with_callback("focusout", focusout.as_ref().unchecked_ref())?;
    focusout.forget();

    // Enter ends editing. Blurring fires focusout synchronously, so the app state
    // must not be borrowed here.
    let keydown = Closure::<dyn FnMut(KeyboardEvent)>::wrap(Box::new(|evt: KeyboardEvent| {
        if evt.key() != "Enter" {
            return;
        }
        if let Some(el) = input_target(&evt) {
            if el.id() == DURATION_INPUT_ID {
                let _ = el.blur();
            }
        }
    }));
    root.add_event_listener_with_callback("keydown", keydown.as_ref().unchecked_ref())?;
    keydown.forget();

    let hashchange = Closure::<dyn FnMut(Event)>::wrap(Box::new(|_evt: Event| {
        with_app(|app| {
            let hash = app.window.location().hash().unwrap_or_default();
            app.navigate(Route::from_hash(&hash));
        });
    }));
    win.add_event_listener_with_callback("hashchange", hashchange.as_ref().unchecked_ref())?;
    hashchange.forget();
    Ok(())
}

fn action_of(evt: &Event) -> Option<(String, String)> {
    let target: Element = evt.target()?.dyn_into().ok()?;
    let el = target.closest("[data-action]").ok()??;
    let action = el.get_attribute("data-action")?;
    let value = el.get_attribute("data-value").unwrap_or_default();
    Some((action, value))
}

fn input_target(evt: &Event) -> Option<HtmlInputElement> {
    evt.target()?.dyn_into().ok()
}

impl App {
    fn render(&self) {
        let settings = self.store.settings();
        let html = match &self.view {
            View::Home(home) => render_home(home.scheduler(), &self.translator, settings),
            View::Settings(view) => render_settings(view, settings, &self.translator),
        };
        self.root.set_inner_html(&html);
    }

    fn element(&self, id: &str) -> Option<Element> {
        self.root.owner_document()?.get_element_by_id(id)
    }

    fn navigate(&mut self, route: Route) {
        let current = match self.view {
            View::Home(_) => Route::Home,
            View::Settings(_) => Route::Settings,
        };
        if current == route {
            return;
        }
        // Replacing the home view drops its scheduler, cancelling any roll in flight.
        self.view = open_view(route, &self.window, &self.store);
        self.render();
    }

    fn go(&self, route: Route) {
        if let Err(e) = self.window.location().set_hash(route.hash()) {
            log::warn!("failed to change route: {:?}", e);
        }
    }

    fn persist(&mut self, patch: SettingsPatch) {
        if let Err(e) = self.store.update(patch) {
            log::warn!("{e}");
        }
    }

    fn on_action(&mut self, action: &str, value: &str) {
        match action {
            "select-die" => {
                let View::Home(home) = &mut self.view else {
                    return;
                };
                let die = value.parse::<u8>().ok().and_then(DieType::from_faces);
                if let Some(die) = die {
                    if home.select_die(die) {
                        self.render();
                    }
                }
            }
            "roll" => {
                let now = now_ms(&self.window);
                let settings = *self.store.settings();
                let View::Home(home) = &mut self.view else {
                    return;
                };
                if home.roll(now, &settings) {
                    self.render();
                }
            }
            "open-settings" => self.go(Route::Settings),
            "back" => self.go(Route::Home),
            "locale" => {
                if let Some(locale) = Locale::from_tag(value) {
                    self.translator.set_locale(locale);
                    if let Err(e) = self.store.save_locale(locale) {
                        log::warn!("{e}");
                    }
                    self.render();
                }
            }
            "button-animation" => {
                if let Some(mode) = ButtonAnimation::parse(value) {
                    self.persist(SettingsPatch {
                        button_animation: Some(mode),
                        ..SettingsPatch::default()
                    });
                    self.render();
                }
            }
            "easing" => {
                if let Some(easing) = Easing::parse(value) {
                    self.persist(SettingsPatch {
                        easing: Some(easing),
                        ..SettingsPatch::default()
                    });
                    self.render();
                }
            }
            other => log::debug!("unhandled action {other}"),
        }
    }

    fn on_input(&mut self, id: &str, value: &str) {
        let View::Settings(view) = &mut self.view else {
            return;
        };
        match id {
            DURATION_INPUT_ID => {
                if let Err(e) = view.duration.edit(&mut self.store, value) {
                    log::warn!("{e}");
                }
                self.show_duration_error();
            }
            PARTICLE_INPUT_ID => {
                let Ok(intensity) = value.parse::<u8>() else {
                    return;
                };
                self.persist(SettingsPatch {
                    particle_intensity: Some(intensity),
                    ..SettingsPatch::default()
                });
                let shown = format!("{}%", self.store.settings().particle_intensity);
                if let Some(el) = self.element(PARTICLE_VALUE_ID) {
                    el.set_text_content(Some(&shown));
                }
            }
            _ => {}
        }
    }

    fn on_blur(&mut self, id: &str) {
        if id != DURATION_INPUT_ID {
            return;
        }
        if let View::Settings(view) = &mut self.view {
            view.duration.blur();
            self.show_duration_error();
        }
    }

    // Updates only the error line so the text box keeps focus.
    fn show_duration_error(&self) {
        let View::Settings(view) = &self.view else {
            return;
        };
        let text = duration_error_text(&view.duration, &self.translator);
        if let Some(el) = self.element(DURATION_ERROR_ID) {
            el.set_text_content(Some(&text));
        }
        if let Some(input) = self.element(DURATION_INPUT_ID) {
            let _ = input.set_attribute("class", if text.is_empty() { "" } else { "dr-invalid" });
        }
    }

    fn on_frame(&mut self, ts: f64) {
        let easing = self.store.settings().easing;
        let View::Home(home) = &mut self.view else {
            return;
        };
        match home.tick(ts) {
            TickOutcome::Idle => {}
            TickOutcome::Completed { .. } => self.render(),
            TickOutcome::Advanced { face } => {
                let progress = home.scheduler().progress(ts).unwrap_or(1.0);
                if let Some(el) = self.element(FACE_ID) {
                    el.set_text_content(Some(&face.to_string()));
                }
                self.set_progress(easing, progress);
            }
            TickOutcome::Waiting => {
                let progress = home.scheduler().progress(ts).unwrap_or(1.0);
                self.set_progress(easing, progress);
            }
        }
    }

    fn set_progress(&self, easing: Easing, progress: f64) {
        let Some(fill) = self.element(PROGRESS_FILL_ID) else {
            return;
        };
        if let Ok(fill) = fill.dyn_into::<HtmlElement>() {
            let width = format!("{:.1}%", easing.apply(progress) * 100.0);
            let _ = fill.style().set_property("width", &width);
        }
    }
}
