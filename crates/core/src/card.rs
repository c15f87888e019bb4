use crate::{
    Activation, Attribute, Collabo, Locale, LocalizedString, Rank, Rarity, Searchable, Status,
};
use serde::{Deserialize, Serialize};
use std::fmt;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Card {
    pub name: LocalizedString,
    pub rarity: Rarity,
    pub types: Vec<String>,
    pub cool_time: u32,
    pub activation: Activation,
    pub attribute: Attribute,
    pub rank: Rank,
    pub ability: LocalizedString,
    pub status: Status,
    pub abbreviation: Vec<String>,
    pub collabo: Collabo,
    pub filename: String,
}

impl Card {
    pub fn is_collabo(&self) -> bool {
        self.collabo.is_collaboration()
    }

    pub fn image_file(&self) -> String {
        format!("{}.jpg", self.filename)
    }

    /// `【近・防】name` in the requested locale.
    pub fn title(&self, locale: Locale) -> String {
        format!("【{}】{}", self.types.join("・"), self.name.render(locale))
    }
}

impl fmt::Display for Card {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "【{}】{}", self.types.join("・"), self.name)
    }
}

impl Searchable for Card {
    /// Abbreviations, then every name variant. Original UR cards can also be
    /// found by attribute word plus type, e.g. `赤近`.
    fn search_labels(&self) -> Vec<String> {
        let mut labels = self.abbreviation.clone();
        labels.extend(self.name.all_variants().into_iter().map(str::to_string));
        if !self.is_collabo() && self.rarity == Rarity::UR {
            let joined = self.types.concat();
            labels.extend(
                self.attribute
                    .related_terms()
                    .iter()
                    .map(|term| format!("{term}{joined}")),
            );
        }
        labels
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Parameter;

    fn card(name: &str, rarity: Rarity, collabo: Collabo) -> Card {
        Card {
            name: LocalizedString::from_map([
                (Locale::Japanese, name.to_string()),
                (Locale::AmericanEnglish, format!("{name}-en")),
            ])
            .expect("name"),
            rarity,
            types: vec!["近".to_string(), "防".to_string()],
            cool_time: 12,
            activation: Activation::Short,
            attribute: Attribute::Fire,
            rank: Rank::S1,
            ability: LocalizedString::new("ability").expect("ability"),
            status: Status::uniform(Parameter::new(1.0, 1.0, 1.0)),
            abbreviation: vec!["abbr".to_string()],
            collabo,
            filename: "card_001".to_string(),
        }
    }

    #[test]
    fn original_ur_cards_add_attribute_type_labels() {
        let labels = card("一撃", Rarity::UR, Collabo::Original).search_labels();
        assert_eq!(labels[0], "abbr");
        assert!(labels.contains(&"一撃-en".to_string()));
        assert!(labels.contains(&"赤近防".to_string()));
        assert!(labels.contains(&"火近防".to_string()));
    }

    #[test]
    fn collaboration_and_lower_rarities_skip_attribute_labels() {
        let collab = card("一撃", Rarity::UR, Collabo::Miku).search_labels();
        assert!(!collab.contains(&"赤近防".to_string()));
        let sr = card("一撃", Rarity::SR, Collabo::Original).search_labels();
        assert_eq!(sr.len(), 1 + Locale::ALL.len());
    }

    #[test]
    fn title_joins_types() {
        let card = card("一撃", Rarity::UR, Collabo::Original);
        assert_eq!(card.to_string(), "【近・防】一撃");
        assert_eq!(card.title(Locale::AmericanEnglish), "【近・防】一撃-en");
        assert_eq!(card.image_file(), "card_001.jpg");
    }
}
