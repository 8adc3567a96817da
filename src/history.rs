//! Recent results per die. Lives for the page session only; never written to storage.

use crate::dice::DieType;

/// Entries kept per die.
pub const HISTORY_LEN: usize = 5;

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct HistoryLedger {
    d4: Vec<u8>,
    d6: Vec<u8>,
    d16: Vec<u8>,
    d20: Vec<u8>,
}

impl HistoryLedger {
    pub fn new() -> Self {
        Self::default()
    }

    /// Prepends `value` to the bucket of `die`, keeping the newest `HISTORY_LEN`.
    pub fn record(&mut self, die: DieType, value: u8) {
        let bucket = self.bucket_mut(die);
        bucket.insert(0, value);
        bucket.truncate(HISTORY_LEN);
    }

    /// Most recent first.
    pub fn read(&self, die: DieType) -> &[u8] {
        match die {
            DieType::D4 => &self.d4,
            DieType::D6 => &self.d6,
            DieType::D16 => &self.d16,
            DieType::D20 => &self.d20,
        }
    }

    fn bucket_mut(&mut self, die: DieType) -> &mut Vec<u8> {
        match die {
            DieType::D4 => &mut self.d4,
            DieType::D6 => &mut self.d6,
            DieType::D16 => &mut self.d16,
            DieType::D20 => &mut self.d20,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn starts_empty() {
        let h = HistoryLedger::new();
        for die in DieType::ALL {
            assert!(h.read(die).is_empty());
        }
    }

    #[test]
    fn keeps_most_recent_first_and_caps_length() {
        let mut h = HistoryLedger::new();
        for n in 1..=12u8 {
            h.record(DieType::D20, n);
            assert_eq!(h.read(DieType::D20).len(), (n as usize).min(HISTORY_LEN));
            assert_eq!(h.read(DieType::D20)[0], n);
        }
        assert_eq!(h.read(DieType::D20), &[12, 11, 10, 9, 8]);
    }

    #[test]
    fn buckets_are_independent() {
        let mut h = HistoryLedger::new();
        h.record(DieType::D4, 3);
        h.record(DieType::D16, 15);
        assert_eq!(h.read(DieType::D4), &[3]);
        assert_eq!(h.read(DieType::D16), &[15]);
        assert!(h.read(DieType::D6).is_empty());
        assert!(h.read(DieType::D20).is_empty());
    }
}
