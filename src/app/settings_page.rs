//! Settings view: language, button animation, easing, particle intensity, roll duration.

use crate::easing::Easing;
use crate::i18n::{Locale, Translator};
use crate::settings::{ButtonAnimation, DurationField, Settings};

pub const DURATION_INPUT_ID: &str = "dr-duration";
pub const DURATION_ERROR_ID: &str = "dr-duration-error";
pub const PARTICLE_INPUT_ID: &str = "dr-particles";
pub const PARTICLE_VALUE_ID: &str = "dr-particles-value";

pub struct SettingsView {
    pub duration: DurationField,
}

impl SettingsView {
    pub fn new(settings: &Settings) -> Self {
        Self {
            duration: DurationField::new(settings.roll_duration),
        }
    }
}

fn escape_attr(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    for c in s.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(c),
        }
    }
    out
}

fn radio(action: &str, value: &str, checked: bool, label: &str) -> String {
    format!(
        "<label class='dr-radio'><input type='radio' name='{action}' data-action='{action}' data-value='{value}'{}> <span>{label}</span></label>",
        if checked { " checked" } else { "" }
    )
}

fn section(title: &str, hint: &str, body: &str) -> String {
    format!("<section class='dr-card'><h3>{title}</h3><p>{hint}</p>{body}</section>")
}

/// Localized text of the field's current error, empty if none.
pub fn duration_error_text(field: &DurationField, t: &Translator) -> String {
    field
        .error()
        .map(|e| t.t(e.i18n_key()).to_owned())
        .unwrap_or_default()
}

pub fn render_settings(
    view: &SettingsView,
    settings: &Settings,
    t: &Translator,
) -> String {
    let mut html = String::new();
    html.push_str(&format!(
        "<button data-action='back' class='dr-back'>← {}</button><h1 class='dr-title'>{}</h1>",
        t.t("common.back"),
        t.t("common.settings")
    ));

    let languages: String = Locale::ALL
        .iter()
        .map(|&l| radio("locale", l.tag(), l == t.locale(), l.native_name()))
        .collect();
    html.push_str(&section(
        t.t("common.language"),
        t.t("common.chooseLanguage"),
        &languages,
    ));

    let buttons = [
        (ButtonAnimation::Move, "common.moveButton"),
        (ButtonAnimation::Hide, "common.hideButton"),
    ]
    .iter()
    .map(|&(mode, key)| {
        radio(
            "button-animation",
            mode.as_str(),
            mode == settings.button_animation,
            t.t(key),
        )
    })
    .collect::<String>();
    html.push_str(&section(
        t.t("common.buttonAnimation"),
        t.t("common.chooseButtonBehavior"),
        &buttons,
    ));

    let easings: String = Easing::ALL
        .iter()
        .map(|&e| radio("easing", e.as_str(), e == settings.easing, t.t(e.i18n_key())))
        .collect();
    html.push_str(&section(
        t.t("common.easingType"),
        t.t("common.chooseEasingType"),
        &easings,
    ));

    let particles = format!(
        "<input id='{PARTICLE_INPUT_ID}' type='range' min='0' max='100' value='{v}'>\
         <div class='dr-range-labels'><span>{low}</span><span id='{PARTICLE_VALUE_ID}'>{v}%</span><span>{high}</span></div>",
        v = settings.particle_intensity,
        low = t.t("common.low"),
        high = t.t("common.high"),
    );
    html.push_str(&section(
        t.t("common.particleIntensity"),
        t.t("common.adjustParticleEffect"),
        &particles,
    ));

    let error = duration_error_text(&view.duration, t);
    let duration = format!(
        "<input id='{DURATION_INPUT_ID}' type='text' inputmode='numeric' value='{}' class='{}'> <span>{}</span>\
         <p id='{DURATION_ERROR_ID}' class='dr-error'>{}</p>",
        escape_attr(view.duration.text()),
        if error.is_empty() { "" } else { "dr-invalid" },
        t.t("common.seconds"),
        error
    );
    html.push_str(&section(
        t.t("common.rollDuration"),
        t.t("common.setRollDuration"),
        &duration,
    ));
    html
}
