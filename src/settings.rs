//! User preferences: the persisted record, its store, and the duration field editor.

use serde::{Deserialize, Serialize};

use crate::easing::Easing;
use crate::error::{DurationError, SettingsError};
use crate::i18n::Locale;
use crate::storage::KeyValueStore;

/// Storage key of the serialized settings record.
pub const SETTINGS_KEY: &str = "diceSettings";
/// Storage key of the locale tag.
pub const LOCALE_KEY: &str = "locale";

pub const MIN_ROLL_SECONDS: u8 = 1;
pub const MAX_ROLL_SECONDS: u8 = 10;
pub const MAX_PARTICLE_INTENSITY: u8 = 100;

/// What the roll button does while a roll is in flight.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ButtonAnimation {
    /// Slide aside.
    #[default]
    Move,
    /// Disappear until the roll completes.
    Hide,
}

impl ButtonAnimation {
    pub fn as_str(self) -> &'static str {
        match self {
            ButtonAnimation::Move => "move",
            ButtonAnimation::Hide => "hide",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "move" => Some(ButtonAnimation::Move),
            "hide" => Some(ButtonAnimation::Hide),
            _ => None,
        }
    }
}

/// Roll length in whole seconds, always within `MIN_ROLL_SECONDS..=MAX_ROLL_SECONDS`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "u8", into = "u8")]
pub struct RollDuration(u8);

impl RollDuration {
    pub const DEFAULT: RollDuration = RollDuration(5);

    pub fn new(seconds: u8) -> Option<Self> {
        (MIN_ROLL_SECONDS..=MAX_ROLL_SECONDS)
            .contains(&seconds)
            .then_some(RollDuration(seconds))
    }

    /// Parses user text. Only plain decimal digits are accepted; surrounding
    /// whitespace is ignored.
    pub fn parse(input: &str) -> Result<Self, DurationError> {
        let trimmed = input.trim();
        if trimmed.is_empty() {
            return Err(DurationError::Empty);
        }
        let out_of_range = || DurationError::OutOfRange {
            input: input.to_owned(),
        };
        if !trimmed.bytes().all(|b| b.is_ascii_digit()) {
            return Err(out_of_range());
        }
        trimmed
            .parse::<u8>()
            .ok()
            .and_then(RollDuration::new)
            .ok_or_else(out_of_range)
    }

    pub fn seconds(self) -> u8 {
        self.0
    }

    pub fn as_millis(self) -> f64 {
        f64::from(self.0) * 1_000.0
    }
}

impl Default for RollDuration {
    fn default() -> Self {
        RollDuration::DEFAULT
    }
}

impl TryFrom<u8> for RollDuration {
    type Error = String;

    fn try_from(seconds: u8) -> Result<Self, Self::Error> {
        RollDuration::new(seconds).ok_or_else(|| format!("roll duration {seconds} outside 1..=10"))
    }
}

impl From<RollDuration> for u8 {
    fn from(d: RollDuration) -> u8 {
        d.0
    }
}

fn default_particle_intensity() -> u8 {
    50
}

/// The persisted preference record.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Settings {
    pub button_animation: ButtonAnimation,
    pub roll_duration: RollDuration,
    #[serde(rename = "easingType")]
    pub easing: Easing,
    pub particle_intensity: u8,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            button_animation: ButtonAnimation::default(),
            roll_duration: RollDuration::DEFAULT,
            easing: Easing::default(),
            particle_intensity: default_particle_intensity(),
        }
    }
}

impl Settings {
    /// Parses a stored record; None if it is not a valid record.
    pub fn from_json(raw: &str) -> Option<Self> {
        let mut settings: Settings = serde_json::from_str(raw).ok()?;
        settings.particle_intensity = settings.particle_intensity.min(MAX_PARTICLE_INTENSITY);
        Some(settings)
    }
}

/// Partial change merged by `SettingsStore::update`.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct SettingsPatch {
    pub button_animation: Option<ButtonAnimation>,
    pub roll_duration: Option<RollDuration>,
    pub easing: Option<Easing>,
    pub particle_intensity: Option<u8>,
}

impl SettingsPatch {
    fn apply(self, settings: &mut Settings) {
        if let Some(v) = self.button_animation {
            settings.button_animation = v;
        }
        if let Some(v) = self.roll_duration {
            settings.roll_duration = v;
        }
        if let Some(v) = self.easing {
            settings.easing = v;
        }
        if let Some(v) = self.particle_intensity {
            settings.particle_intensity = v.min(MAX_PARTICLE_INTENSITY);
        }
    }
}

// --- Store -------------------------------------------------------------------

/// In-memory settings backed by a key-value store. Every change is written back
/// immediately.
pub struct SettingsStore<S: KeyValueStore> {
    storage: S,
    settings: Settings,
}

impl<S: KeyValueStore> SettingsStore<S> {
    /// Reads the stored record, falling back to defaults when it is absent or
    /// malformed.
    pub fn load(storage: S) -> Self {
        let settings = match storage.get(SETTINGS_KEY) {
            Some(raw) => Settings::from_json(&raw).unwrap_or_else(|| {
                log::warn!("stored settings are malformed, using defaults");
                Settings::default()
            }),
            None => Settings::default(),
        };
        Self { storage, settings }
    }

    pub fn settings(&self) -> &Settings {
        &self.settings
    }

    /// Merges `patch` and persists the full record. The in-memory record is
    /// updated even if the write fails.
    pub fn update(&mut self, patch: SettingsPatch) -> Result<(), SettingsError> {
        patch.apply(&mut self.settings);
        self.persist()
    }

    pub fn persist(&mut self) -> Result<(), SettingsError> {
        let raw = serde_json::to_string(&self.settings)?;
        self.storage.set(SETTINGS_KEY, &raw)?;
        Ok(())
    }

    /// Validates free-form duration text and stores it. Rejected input leaves the
    /// stored duration untouched.
    pub fn set_roll_duration(&mut self, input: &str) -> Result<RollDuration, SettingsError> {
        let duration = RollDuration::parse(input)?;
        self.update(SettingsPatch {
            roll_duration: Some(duration),
            ..SettingsPatch::default()
        })?;
        Ok(duration)
    }

    pub fn stored_locale(&self) -> Option<Locale> {
        self.storage
            .get(LOCALE_KEY)
            .and_then(|tag| Locale::from_tag(&tag))
    }

    pub fn save_locale(&mut self, locale: Locale) -> Result<(), SettingsError> {
        self.storage.set(LOCALE_KEY, locale.tag())?;
        Ok(())
    }

    pub fn storage(&self) -> &S {
        &self.storage
    }
}

// --- Duration field ----------------------------------------------------------

/// Edit state of the roll-duration text box.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct DurationField {
    text: String,
    error: Option<DurationError>,
}

impl DurationField {
    pub fn new(current: RollDuration) -> Self {
        Self {
            text: current.seconds().to_string(),
            error: None,
        }
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn error(&self) -> Option<&DurationError> {
        self.error.as_ref()
    }

    /// Handles a keystroke-level change. Valid text is persisted right away; empty
    /// text is tolerated until `blur`.
    pub fn edit<S: KeyValueStore>(
        &mut self,
        store: &mut SettingsStore<S>,
        text: &str,
    ) -> Result<(), SettingsError> {
        self.text = text.to_owned();
        if text.trim().is_empty() {
            self.error = None;
            return Ok(());
        }
        match store.set_roll_duration(text) {
            Ok(_) => {
                self.error = None;
                Ok(())
            }
            Err(SettingsError::Duration(e)) => {
                self.error = Some(e);
                Ok(())
            }
            Err(e) => {
                self.error = None;
                Err(e)
            }
        }
    }

    /// Editing finished (focus lost or Enter).
    pub fn blur(&mut self) {
        if self.text.trim().is_empty() {
            self.error = Some(DurationError::Empty);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::MemoryStore;

    #[test]
    fn default_record_serializes_with_camel_case_keys() {
        let json = serde_json::to_value(Settings::default()).unwrap();
        assert_eq!(
            json,
            serde_json::json!({
                "buttonAnimation": "move",
                "rollDuration": 5,
                "easingType": "linear",
                "particleIntensity": 50
            })
        );
    }

    #[test]
    fn partial_record_fills_missing_fields() {
        let s = Settings::from_json(r#"{"rollDuration":8,"buttonAnimation":"hide"}"#).unwrap();
        assert_eq!(s.roll_duration.seconds(), 8);
        assert_eq!(s.button_animation, ButtonAnimation::Hide);
        assert_eq!(s.easing, Easing::Linear);
        assert_eq!(s.particle_intensity, 50);
    }

    #[test]
    fn invalid_records_are_rejected() {
        assert!(Settings::from_json("not json").is_none());
        assert!(Settings::from_json(r#"{"rollDuration":0}"#).is_none());
        assert!(Settings::from_json(r#"{"rollDuration":11}"#).is_none());
        assert!(Settings::from_json(r#"{"easingType":"bounce"}"#).is_none());
    }

    #[test]
    fn stored_intensity_is_clamped() {
        let s = Settings::from_json(r#"{"particleIntensity":250}"#).unwrap();
        assert_eq!(s.particle_intensity, MAX_PARTICLE_INTENSITY);
    }

    #[test]
    fn roll_duration_parse() {
        for n in 1..=10u8 {
            assert_eq!(RollDuration::parse(&n.to_string()).unwrap().seconds(), n);
        }
        assert_eq!(RollDuration::parse(" 7 ").unwrap().seconds(), 7);
        assert_eq!(RollDuration::parse(""), Err(DurationError::Empty));
        assert_eq!(RollDuration::parse("   "), Err(DurationError::Empty));
        for bad in ["0", "11", "abc", "+5", "5.0", "-1", "300", "5abc"] {
            assert!(
                matches!(RollDuration::parse(bad), Err(DurationError::OutOfRange { .. })),
                "{bad:?} accepted"
            );
        }
    }

    #[test]
    fn patch_merges_only_given_fields() {
        let mut s = Settings::default();
        SettingsPatch {
            easing: Some(Easing::Sine),
            particle_intensity: Some(180),
            ..SettingsPatch::default()
        }
        .apply(&mut s);
        assert_eq!(s.easing, Easing::Sine);
        assert_eq!(s.particle_intensity, 100);
        assert_eq!(s.roll_duration, RollDuration::DEFAULT);
        assert_eq!(s.button_animation, ButtonAnimation::Move);
    }

    #[test]
    fn update_writes_through() {
        let mut store = SettingsStore::load(MemoryStore::new());
        store
            .update(SettingsPatch {
                button_animation: Some(ButtonAnimation::Hide),
                ..SettingsPatch::default()
            })
            .unwrap();
        let raw = store.storage().get(SETTINGS_KEY).unwrap();
        assert_eq!(
            Settings::from_json(&raw).unwrap().button_animation,
            ButtonAnimation::Hide
        );
    }

    #[test]
    fn blur_on_empty_field_reports_error() {
        let mut store = SettingsStore::load(MemoryStore::new());
        let mut field = DurationField::new(store.settings().roll_duration);
        field.edit(&mut store, "").unwrap();
        assert_eq!(field.error(), None);
        field.blur();
        assert_eq!(field.error(), Some(&DurationError::Empty));
        assert_eq!(store.settings().roll_duration, RollDuration::DEFAULT);
        field.edit(&mut store, "3").unwrap();
        assert_eq!(field.error(), None);
        assert_eq!(store.settings().roll_duration.seconds(), 3);
    }

    #[test]
    fn locale_entry_is_independent() {
        let mut store = SettingsStore::load(MemoryStore::new());
        assert_eq!(store.stored_locale(), None);
        store.save_locale(Locale::ZhCn).unwrap();
        assert_eq!(store.stored_locale(), Some(Locale::ZhCn));
        assert!(store.storage().get(SETTINGS_KEY).is_none());
    }
}
