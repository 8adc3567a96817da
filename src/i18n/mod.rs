//! Translation lookup.
//!
//! Keys are dot-delimited (`common.rollDice`). A lookup tries the active locale,
//! then en-US, then gives back the key itself and logs a warning.

mod locale_en_us;
mod locale_zh_cn;

pub use locale_en_us::EN_US;
pub use locale_zh_cn::ZH_CN;

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum Locale {
    ZhCn,
    #[default]
    EnUs,
}

impl Locale {
    pub const ALL: [Locale; 2] = [Locale::ZhCn, Locale::EnUs];

    pub fn tag(self) -> &'static str {
        match self {
            Locale::ZhCn => "zh-CN",
            Locale::EnUs => "en-US",
        }
    }

    pub fn from_tag(tag: &str) -> Option<Self> {
        match tag {
            "zh-CN" => Some(Locale::ZhCn),
            "en-US" => Some(Locale::EnUs),
            _ => None,
        }
    }

    /// Picks a locale from a browser language such as `navigator.language`.
    pub fn detect(browser_language: &str) -> Self {
        if browser_language.starts_with("zh") {
            Locale::ZhCn
        } else {
            Locale::EnUs
        }
    }

    /// Name shown in the language picker, in its own language.
    pub fn native_name(self) -> &'static str {
        match self {
            Locale::ZhCn => "中文",
            Locale::EnUs => "English",
        }
    }

    fn table(self) -> &'static [(&'static str, &'static str)] {
        match self {
            Locale::ZhCn => ZH_CN,
            Locale::EnUs => EN_US,
        }
    }
}

fn lookup(table: &'static [(&'static str, &'static str)], key: &str) -> Option<&'static str> {
    table
        .iter()
        .find(|(k, _)| *k == key)
        .map(|(_, v)| *v)
        .filter(|v| !v.is_empty())
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Translator {
    locale: Locale,
}

impl Translator {
    pub fn new(locale: Locale) -> Self {
        Self { locale }
    }

    pub fn locale(&self) -> Locale {
        self.locale
    }

    pub fn set_locale(&mut self, locale: Locale) {
        self.locale = locale;
    }

    pub fn t<'a>(&self, key: &'a str) -> &'a str {
        if let Some(v) = lookup(self.locale.table(), key) {
            return v;
        }
        if let Some(v) = lookup(EN_US, key) {
            return v;
        }
        log::warn!("Missing translation for key: {key}");
        key
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn resolves_active_locale() {
        assert_eq!(Translator::new(Locale::EnUs).t("common.rollDice"), "Roll Dice");
        assert_eq!(Translator::new(Locale::ZhCn).t("common.rollDice"), "掷骰子");
    }

    #[test]
    fn falls_back_to_english_then_key() {
        let zh = Translator::new(Locale::ZhCn);
        assert_eq!(zh.t("common.particleIntensity"), "Particle Intensity");
        assert_eq!(zh.t("common.nope"), "common.nope");
        assert_eq!(Translator::new(Locale::EnUs).t("missing"), "missing");
    }

    #[test]
    fn detect_from_browser_language() {
        assert_eq!(Locale::detect("zh-TW"), Locale::ZhCn);
        assert_eq!(Locale::detect("zh"), Locale::ZhCn);
        assert_eq!(Locale::detect("en-GB"), Locale::EnUs);
        assert_eq!(Locale::detect("fr"), Locale::EnUs);
    }

    #[test]
    fn tags_round_trip() {
        for l in Locale::ALL {
            assert_eq!(Locale::from_tag(l.tag()), Some(l));
        }
        assert_eq!(Locale::from_tag("de-DE"), None);
    }

    #[test]
    fn tables_have_unique_keys() {
        for table in [EN_US, ZH_CN] {
            let mut seen = HashSet::new();
            for (k, v) in table {
                assert!(seen.insert(*k), "duplicate key '{}'", k);
                assert!(!v.is_empty(), "empty value for '{}'", k);
            }
        }
    }

    #[test]
    fn chinese_keys_exist_in_english() {
        let en: HashSet<&str> = EN_US.iter().map(|(k, _)| *k).collect();
        for (k, _) in ZH_CN {
            assert!(en.contains(k), "'{}' has no en-US fallback", k);
        }
    }
}
