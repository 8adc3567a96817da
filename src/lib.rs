//! Dice Roller core crate.
//!
//! Pick a die (D4, D6, D16, D20), roll it through a slowing flash of faces, and
//! keep the last five results per die. Preferences persist to `localStorage`;
//! roll history lasts for the page session only.
//!
//! Everything except the `app` module is plain Rust and runs under native
//! `cargo test`; `app` binds it to the DOM.

use wasm_bindgen::prelude::*;

pub mod app;
pub mod dice;
pub mod easing;
pub mod error;
pub mod history;
pub mod i18n;
pub mod scheduler;
pub mod settings;
pub mod storage;

pub use dice::{DieType, FaceGenerator};
pub use easing::Easing;
pub use error::{DurationError, SettingsError, StorageError};
pub use history::{HISTORY_LEN, HistoryLedger};
pub use i18n::{Locale, Translator};
pub use scheduler::{RollScheduler, RollSession, TickOutcome, Ticker};
pub use settings::{ButtonAnimation, DurationField, RollDuration, Settings, SettingsPatch, SettingsStore};
pub use storage::{KeyValueStore, MemoryStore};

// Optional small allocator for size (feature gated)
#[cfg(feature = "wee_alloc")]
#[global_allocator]
static ALLOC: wee_alloc::WeeAlloc = wee_alloc::WeeAlloc::INIT;

#[wasm_bindgen(start)]
pub fn wasm_start() {
    #[cfg(feature = "console_error_panic_hook")]
    console_error_panic_hook::set_once();

    console_log::init_with_level(log::Level::Debug).ok();
}

/// Single face for scripting from the console; 0 for an unsupported die size.
#[wasm_bindgen]
pub fn roll_once(faces: u8) -> u8 {
    match DieType::from_faces(faces) {
        Some(die) => FaceGenerator::from_entropy().roll(die),
        None => {
            log::warn!("roll_once: no D{} die", faces);
            0
        }
    }
}
