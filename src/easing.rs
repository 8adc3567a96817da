//! Progress-remapping curves selectable in the settings page.

use serde::{Deserialize, Serialize};
use std::f64::consts::FRAC_PI_2;

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Easing {
    #[default]
    Linear,
    Quadratic,
    Exponential,
    Sine,
}

impl Easing {
    pub const ALL: [Easing; 4] = [
        Easing::Linear,
        Easing::Quadratic,
        Easing::Exponential,
        Easing::Sine,
    ];

    /// Maps normalized time `t` (clamped to [0,1]) to eased progress.
    pub fn apply(self, t: f64) -> f64 {
        let t = t.clamp(0.0, 1.0);
        match self {
            Easing::Linear => t,
            Easing::Quadratic => t * (2.0 - t),
            Easing::Exponential => 1.0 - 2f64.powf(-10.0 * t),
            Easing::Sine => (t * FRAC_PI_2).sin(),
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Easing::Linear => "linear",
            Easing::Quadratic => "quadratic",
            Easing::Exponential => "exponential",
            Easing::Sine => "sine",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        Easing::ALL.into_iter().find(|e| e.as_str() == s)
    }

    pub fn i18n_key(self) -> &'static str {
        match self {
            Easing::Linear => "common.linear",
            Easing::Quadratic => "common.quadratic",
            Easing::Exponential => "common.exponential",
            Easing::Sine => "common.sine",
        }
    }
}
