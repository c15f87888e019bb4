use crate::{Locale, LocalizedString, Searchable};
use serde::{Deserialize, Serialize};
use std::fmt;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Stage {
    pub name: LocalizedString,
    /// Players per team.
    pub number: u32,
    pub portal: u32,
    /// Image base name; some stages ship localized artwork.
    pub filename: LocalizedString,
    pub is_official: bool,
}

impl Stage {
    pub fn image_file(&self, locale: Locale) -> String {
        format!("{}.png", self.filename.render(locale))
    }

    pub fn title(&self, locale: Locale) -> String {
        format!("【{n}on{n}】{}", self.name.render(locale), n = self.number)
    }
}

impl fmt::Display for Stage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "【{n}on{n}】{}", self.name, n = self.number)
    }
}

impl Searchable for Stage {
    fn search_labels(&self) -> Vec<String> {
        self.name
            .all_variants()
            .into_iter()
            .map(str::to_string)
            .collect()
    }
}
