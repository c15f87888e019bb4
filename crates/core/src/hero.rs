use crate::{CompassError, LocalizedString, Parameter, Role, Searchable};
use serde::{Deserialize, Serialize};
use std::fmt;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Hero {
    pub num: u32,
    pub name: LocalizedString,
    pub setname: String,
    pub parameter: Parameter,
    pub speed: f64,
    pub role: Role,
    pub ultname: LocalizedString,
    pub ultinvincible: String,
    pub haname: LocalizedString,
    pub is_collabo: bool,
    pub icon_name: String,
    pub icon_color: u32,
    pub image_name: String,
    pub image_color: u32,
}

impl Hero {
    /// `001_setname`, the stable key used by icon sheets and labels.
    pub fn key(&self) -> String {
        format!("{:03}_{}", self.num, self.setname)
    }

    pub fn icon_file(&self) -> String {
        format!("{}.jpg", self.icon_name)
    }

    pub fn image_file(&self) -> String {
        format!("{}.jpg", self.image_name)
    }

    /// Copy with `suffix` removed from every name variant. This is the one
    /// correction applied to a hero after loading, used once a filter has
    /// excluded the variant the suffix distinguished it from.
    pub fn without_suffix(&self, suffix: &str) -> Result<Self, CompassError> {
        let name = self.name.map(|_, text| text.replace(suffix, ""))?;
        Ok(Self {
            name,
            ..self.clone()
        })
    }
}

impl fmt::Display for Hero {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.key())
    }
}

impl Searchable for Hero {
    fn search_labels(&self) -> Vec<String> {
        let mut labels: Vec<String> = self
            .name
            .all_variants()
            .into_iter()
            .map(str::to_string)
            .collect();
        labels.push(self.key());
        labels
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Locale;

    fn hero(name: &str, en: &str) -> Hero {
        Hero {
            num: 13,
            name: LocalizedString::from_source(name, Some(en), None, None).expect("name"),
            setname: "thirteen".to_string(),
            parameter: Parameter::new(1.0, 1.0, 1.0),
            speed: 1.0,
            role: Role::Gunner,
            ultname: LocalizedString::new("ult").expect("ult"),
            ultinvincible: "1.0".to_string(),
            haname: LocalizedString::new("ha").expect("ha"),
            is_collabo: false,
            icon_name: "icon_13".to_string(),
            icon_color: 0,
            image_name: "hero_13".to_string(),
            image_color: 0,
        }
    }

    #[test]
    fn labels_include_padded_key() {
        let labels = hero("サーティーン(gun)", "Thirteen(gun)").search_labels();
        assert_eq!(labels.last().map(String::as_str), Some("013_thirteen"));
        assert!(labels.contains(&"Thirteen(gun)".to_string()));
    }

    #[test]
    fn image_names_carry_extensions() {
        let hero = hero("サーティーン(gun)", "Thirteen(gun)");
        assert_eq!(hero.icon_file(), "icon_13.jpg");
        assert_eq!(hero.image_file(), "hero_13.jpg");
    }

    #[test]
    fn suffix_is_stripped_from_every_variant() {
        let original = hero("サーティーン(gun)", "Thirteen(gun)");
        let renamed = original.without_suffix("(gun)").expect("rename");
        assert_eq!(renamed.name.canonical_text(), "サーティーン");
        assert_eq!(renamed.name.render(Locale::BritishEnglish), "Thirteen");
        assert_eq!(original.name.canonical_text(), "サーティーン(gun)");
        assert_eq!(renamed.num, original.num);
    }
}
