use crate::CompassError;
use serde::{Deserialize, Serialize};
use std::borrow::Borrow;
use std::collections::BTreeMap;
use std::fmt;
use std::hash::{Hash, Hasher};

/// Locales supported by the chat platform the bot runs on.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize,
)]
pub enum Locale {
    #[serde(rename = "en-US")]
    AmericanEnglish,
    #[serde(rename = "en-GB")]
    BritishEnglish,
    #[serde(rename = "zh-TW")]
    TaiwanChinese,
    #[serde(rename = "ja")]
    Japanese,
}

pub const CANONICAL_LOCALE: Locale = Locale::Japanese;

impl Locale {
    pub const ALL: [Locale; 4] = [
        Locale::AmericanEnglish,
        Locale::BritishEnglish,
        Locale::TaiwanChinese,
        Locale::Japanese,
    ];

    pub fn tag(self) -> &'static str {
        match self {
            Self::AmericanEnglish => "en-US",
            Self::BritishEnglish => "en-GB",
            Self::TaiwanChinese => "zh-TW",
            Self::Japanese => "ja",
        }
    }

    /// Accepts exactly the four platform tags.
    pub fn parse(tag: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|locale| locale.tag() == tag)
    }

    pub fn from_tag_or_canonical(tag: &str) -> Self {
        Self::parse(tag).unwrap_or(CANONICAL_LOCALE)
    }

    fn slot(self) -> usize {
        match self {
            Self::AmericanEnglish => 0,
            Self::BritishEnglish => 1,
            Self::TaiwanChinese => 2,
            Self::Japanese => 3,
        }
    }
}

impl fmt::Display for Locale {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.tag())
    }
}

/// Text with one rendering per [`Locale`].
///
/// Compares equal to a plain string when the canonical (`ja`) text or any
/// locale variant matches, so localized and plain names can be searched the
/// same way. Two values are equal when they share any variant.
///
/// Hashing only looks at the canonical text, which keeps values usable as
/// map keys addressed by their Japanese name (see the [`Borrow<str>`] impl).
/// Values that are equal only through a non-canonical variant may therefore
/// hash differently. That asymmetry is accepted: the equality exists for
/// search, not for general-purpose set membership.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(
    try_from = "BTreeMap<Locale, String>",
    into = "BTreeMap<Locale, String>"
)]
pub struct LocalizedString {
    variants: [String; 4],
}

impl LocalizedString {
    /// Uses `text` for every locale.
    pub fn new(text: impl Into<String>) -> Result<Self, CompassError> {
        let text = text.into();
        if text.is_empty() {
            return Err(CompassError::InvalidArgument(
                "canonical text must not be empty".to_string(),
            ));
        }
        Ok(Self {
            variants: std::array::from_fn(|_| text.clone()),
        })
    }

    /// Builds from explicit variants. The `ja` entry is required; absent or
    /// empty entries for other locales fall back to it.
    pub fn from_map<I, S>(entries: I) -> Result<Self, CompassError>
    where
        I: IntoIterator<Item = (Locale, S)>,
        S: Into<String>,
    {
        let mut given: [Option<String>; 4] = Default::default();
        for (locale, text) in entries {
            given[locale.slot()] = Some(text.into());
        }
        let canonical = match given[CANONICAL_LOCALE.slot()].take() {
            Some(text) if !text.is_empty() => text,
            Some(_) => {
                return Err(CompassError::InvalidArgument(
                    "canonical (ja) text must not be empty".to_string(),
                ))
            }
            None => {
                return Err(CompassError::InvalidArgument(
                    "canonical (ja) text is missing".to_string(),
                ))
            }
        };
        let variants = std::array::from_fn(|slot| match given[slot].take() {
            Some(text) if !text.is_empty() => text,
            _ => canonical.clone(),
        });
        Ok(Self { variants })
    }

    /// Catalog construction path: `source` is the Japanese record text and
    /// the others come from translation overlays. `en-GB` reuses `en-US`
    /// when absent, and empty translations fall back to `source`.
    pub fn from_source(
        source: &str,
        en_us: Option<&str>,
        en_gb: Option<&str>,
        zh_tw: Option<&str>,
    ) -> Result<Self, CompassError> {
        let pick = |value: Option<&str>| match value {
            Some(text) if !text.is_empty() => text.to_string(),
            _ => source.to_string(),
        };
        Self::from_map([
            (Locale::Japanese, source.to_string()),
            (Locale::AmericanEnglish, pick(en_us)),
            (Locale::BritishEnglish, pick(en_gb.or(en_us))),
            (Locale::TaiwanChinese, pick(zh_tw)),
        ])
    }

    /// Static label tables. Every part must be a non-empty literal.
    pub(crate) fn from_labels(ja: &str, zh_tw: &str, en: &str) -> Self {
        debug_assert!(!ja.is_empty() && !zh_tw.is_empty() && !en.is_empty());
        Self {
            variants: [
                en.to_string(),
                en.to_string(),
                zh_tw.to_string(),
                ja.to_string(),
            ],
        }
    }

    pub fn render(&self, locale: Locale) -> &str {
        &self.variants[locale.slot()]
    }

    /// Renders for a raw platform tag; unknown tags render canonical text.
    pub fn render_tag(&self, tag: &str) -> &str {
        self.render(Locale::from_tag_or_canonical(tag))
    }

    pub fn canonical_text(&self) -> &str {
        self.render(CANONICAL_LOCALE)
    }

    /// Every variant in [`Locale::ALL`] order, duplicates included.
    pub fn all_variants(&self) -> Vec<&str> {
        Locale::ALL
            .iter()
            .map(|locale| self.render(*locale))
            .collect()
    }

    /// Rewrites every variant. Meant for construction-time corrections such
    /// as stripping a disambiguating suffix.
    pub fn map<F>(&self, mut f: F) -> Result<Self, CompassError>
    where
        F: FnMut(Locale, &str) -> String,
    {
        Self::from_map(
            Locale::ALL
                .iter()
                .map(|locale| (*locale, f(*locale, self.render(*locale)))),
        )
    }

    fn matches(&self, text: &str) -> bool {
        self.variants.iter().any(|variant| variant == text)
    }

    /// Label lookup for tag parsing; ASCII case is ignored.
    pub(crate) fn matches_ignore_ascii_case(&self, text: &str) -> bool {
        self.variants
            .iter()
            .any(|variant| variant.eq_ignore_ascii_case(text))
    }
}

impl fmt::Display for LocalizedString {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.canonical_text())
    }
}

impl TryFrom<BTreeMap<Locale, String>> for LocalizedString {
    type Error = CompassError;

    fn try_from(value: BTreeMap<Locale, String>) -> Result<Self, Self::Error> {
        Self::from_map(value)
    }
}

impl From<LocalizedString> for BTreeMap<Locale, String> {
    fn from(value: LocalizedString) -> Self {
        let [en_us, en_gb, zh_tw, ja] = value.variants;
        BTreeMap::from([
            (Locale::AmericanEnglish, en_us),
            (Locale::BritishEnglish, en_gb),
            (Locale::TaiwanChinese, zh_tw),
            (Locale::Japanese, ja),
        ])
    }
}

impl PartialEq for LocalizedString {
    fn eq(&self, other: &Self) -> bool {
        other.variants.iter().any(|variant| self.matches(variant))
    }
}

impl Eq for LocalizedString {}

impl Hash for LocalizedString {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.canonical_text().hash(state);
    }
}

impl Borrow<str> for LocalizedString {
    fn borrow(&self) -> &str {
        self.canonical_text()
    }
}

impl PartialEq<str> for LocalizedString {
    fn eq(&self, other: &str) -> bool {
        self.matches(other)
    }
}

impl PartialEq<&str> for LocalizedString {
    fn eq(&self, other: &&str) -> bool {
        self.matches(other)
    }
}

impl PartialEq<String> for LocalizedString {
    fn eq(&self, other: &String) -> bool {
        self.matches(other)
    }
}

impl PartialEq<LocalizedString> for str {
    fn eq(&self, other: &LocalizedString) -> bool {
        other.matches(self)
    }
}

impl PartialEq<LocalizedString> for &str {
    fn eq(&self, other: &LocalizedString) -> bool {
        other.matches(self)
    }
}

impl PartialEq<LocalizedString> for String {
    fn eq(&self, other: &LocalizedString) -> bool {
        other.matches(self)
    }
}
