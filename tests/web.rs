// Browser-only tests; run with `wasm-pack test --headless --firefox`.
#![cfg(target_arch = "wasm32")]

use dice_roller::app::RafTicker;
use dice_roller::settings::SETTINGS_KEY;
use dice_roller::storage::BrowserStorage;
use dice_roller::{Easing, KeyValueStore, SettingsPatch, SettingsStore, Ticker};
use wasm_bindgen_test::*;

wasm_bindgen_test_configure!(run_in_browser);

#[wasm_bindgen_test]
fn local_storage_round_trip() {
    let storage = BrowserStorage::open().expect("localStorage available");
    let mut store = SettingsStore::load(storage);
    store
        .update(SettingsPatch {
            easing: Some(Easing::Sine),
            ..SettingsPatch::default()
        })
        .unwrap();
    let reopened = SettingsStore::load(BrowserStorage::open().unwrap());
    assert_eq!(reopened.settings().easing, Easing::Sine);
    assert!(reopened.storage().get(SETTINGS_KEY).is_some());
}

#[wasm_bindgen_test]
fn raf_ticker_cancels_cleanly() {
    let window = web_sys::window().unwrap();
    let mut ticker = RafTicker::new(window, |_ts| {});
    ticker.request_tick();
    ticker.cancel();
    ticker.request_tick();
    drop(ticker);
}

#[wasm_bindgen_test]
fn app_mounts_into_page() {
    dice_roller::app::start_app().unwrap();
    let doc = web_sys::window().unwrap().document().unwrap();
    let root = doc.get_element_by_id(dice_roller::app::ROOT_ID).unwrap();
    assert!(root.inner_html().contains("data-action='roll'") || root.inner_html().contains("data-action='back'"));
}
