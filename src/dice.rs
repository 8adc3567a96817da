//! Die types and the random face generator.

use rand::rngs::SmallRng;
use rand::{Rng, SeedableRng};

/// Die selectable in the home view. The discriminant is the face count.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum DieType {
    D4 = 4,
    #[default]
    D6 = 6,
    D16 = 16,
    D20 = 20,
}

impl DieType {
    pub const ALL: [DieType; 4] = [DieType::D4, DieType::D6, DieType::D16, DieType::D20];

    pub fn faces(self) -> u8 {
        self as u8
    }

    pub fn from_faces(faces: u8) -> Option<Self> {
        match faces {
            4 => Some(DieType::D4),
            6 => Some(DieType::D6),
            16 => Some(DieType::D16),
            20 => Some(DieType::D20),
            _ => None,
        }
    }

    /// Short label, e.g. "D20".
    pub fn name(self) -> &'static str {
        match self {
            DieType::D4 => "D4",
            DieType::D6 => "D6",
            DieType::D16 => "D16",
            DieType::D20 => "D20",
        }
    }

    /// Translation key of the localized die label.
    pub fn i18n_key(self) -> &'static str {
        match self {
            DieType::D4 => "diceTypes.d4",
            DieType::D6 => "diceTypes.d6",
            DieType::D16 => "diceTypes.d16",
            DieType::D20 => "diceTypes.d20",
        }
    }

    /// Accent color used for the selector button and the result digits.
    pub fn color(self) -> &'static str {
        match self {
            DieType::D4 => "#3b82f6",
            DieType::D6 => "#10b981",
            DieType::D16 => "#ec4899",
            DieType::D20 => "#f97316",
        }
    }
}

impl TryFrom<u8> for DieType {
    type Error = String;

    fn try_from(faces: u8) -> Result<Self, Self::Error> {
        DieType::from_faces(faces).ok_or_else(|| format!("unsupported die with {faces} faces"))
    }
}

impl From<DieType> for u8 {
    fn from(die: DieType) -> u8 {
        die.faces()
    }
}

/// Uniform face source. Entropy comes from the platform (browser crypto under wasm)
/// unless a seed is given.
pub struct FaceGenerator<R = SmallRng> {
    rng: R,
}

impl FaceGenerator<SmallRng> {
    pub fn from_entropy() -> Self {
        Self {
            rng: SmallRng::from_entropy(),
        }
    }

    /// Deterministic generator for replay and tests.
    pub fn seeded(seed: u64) -> Self {
        Self {
            rng: SmallRng::seed_from_u64(seed),
        }
    }
}

impl<R: Rng> FaceGenerator<R> {
    pub fn with_rng(rng: R) -> Self {
        Self { rng }
    }

    /// Face in `1..=die.faces()`.
    pub fn roll(&mut self, die: DieType) -> u8 {
        self.rng.gen_range(1..=die.faces())
    }

    pub fn sequence(&mut self, die: DieType, len: usize) -> Vec<u8> {
        (0..len).map(|_| self.roll(die)).collect()
    }
}
