//! Home view: die selector, roll button, rolling face, recent rolls.

use rand::Rng;
use web_sys::Window;

use super::raf::RafTicker;
use crate::dice::DieType;
use crate::i18n::Translator;
use crate::scheduler::{RollScheduler, TickOutcome, Ticker};
use crate::settings::{ButtonAnimation, Settings};

pub const FACE_ID: &str = "dr-face";
pub const PROGRESS_FILL_ID: &str = "dr-progress-fill";

pub struct HomeView {
    scheduler: RollScheduler<RafTicker>,
}

impl HomeView {
    pub fn new(window: &Window) -> Self {
        let ticker = RafTicker::new(window.clone(), super::on_frame);
        Self {
            scheduler: RollScheduler::new(ticker),
        }
    }

    pub fn scheduler(&self) -> &RollScheduler<RafTicker> {
        &self.scheduler
    }

    pub fn select_die(&mut self, die: DieType) -> bool {
        self.scheduler.select_die(die)
    }

    pub fn roll(&mut self, now: f64, settings: &Settings) -> bool {
        self.scheduler.trigger(now, settings.roll_duration)
    }

    pub fn tick(&mut self, now: f64) -> TickOutcome {
        self.scheduler.tick(now)
    }
}

// Glow radius in px at full particle intensity.
const MAX_GLOW_PX: f64 = 24.0;

fn glow(settings: &Settings, color: &str) -> String {
    let px = MAX_GLOW_PX * f64::from(settings.particle_intensity) / 100.0;
    if px <= 0.0 {
        return String::new();
    }
    format!("text-shadow:0 0 {px:.1}px {color};")
}

fn roll_button_style(rolling: bool, mode: ButtonAnimation) -> &'static str {
    match (rolling, mode) {
        (true, ButtonAnimation::Hide) => "display:none;",
        (true, ButtonAnimation::Move) => "transform:translateX(-150px);",
        (false, _) => "transform:translateX(0);",
    }
}

/// Full home markup for the scheduler's current state.
pub fn render_home<T: Ticker, R: Rng>(
    scheduler: &RollScheduler<T, R>,
    t: &Translator,
    settings: &Settings,
) -> String {
    let die = scheduler.die();
    let rolling = scheduler.is_rolling();
    let color = die.color();
    let disabled = if rolling { " disabled" } else { "" };

    let mut html = String::new();
    html.push_str(&format!(
        "<h1 class='dr-title'>{}</h1>",
        t.t("common.diceSimulator")
    ));

    html.push_str("<div class='dr-selector'>");
    for option in DieType::ALL {
        let ring = if option == die {
            "outline:2px solid #fff;transform:scale(1.1);"
        } else {
            ""
        };
        html.push_str(&format!(
            "<button data-action='select-die' data-value='{}' style='background:{};{}'{}>{}</button>",
            option.faces(),
            option.color(),
            ring,
            disabled,
            t.t(option.i18n_key())
        ));
    }
    html.push_str("</div>");

    let face = scheduler
        .displayed_face()
        .or(scheduler.result())
        .map(|v| v.to_string())
        .unwrap_or_default();
    let face_style = if rolling {
        format!("color:{color};")
    } else {
        format!("color:{color};{}", glow(settings, color))
    };
    html.push_str(&format!(
        "<div id='{FACE_ID}' class='dr-face' style='{face_style}'>{face}</div>"
    ));

    html.push_str("<div class='dr-controls'>");
    let label = if rolling {
        t.t("common.rolling")
    } else {
        t.t("common.rollDice")
    };
    html.push_str(&format!(
        "<button data-action='roll' class='dr-roll' style='transition:transform .3s;{}'{}>{}</button>",
        roll_button_style(rolling, settings.button_animation),
        disabled,
        label
    ));
    html.push_str(&format!(
        "<button data-action='open-settings' class='dr-gear' title='{}'>⚙</button>",
        t.t("common.settings")
    ));
    html.push_str("</div>");

    if rolling {
        html.push_str(&format!(
            "<div class='dr-progress'><div id='{PROGRESS_FILL_ID}' style='width:0%'></div></div>"
        ));
    }

    let recent = scheduler.history().read(die);
    if !recent.is_empty() {
        html.push_str(&format!(
            "<div class='dr-history'><h3>{}</h3><div>",
            t.t("common.recentRolls")
        ));
        for v in recent {
            html.push_str(&format!(
                "<span class='dr-chip' style='color:{color};border-color:{color}'>{v}</span>"
            ));
        }
        html.push_str("</div></div>");
    }
    html
}
