use crate::{CompassError, HeroFilter, Role};
use std::str::FromStr;

/// A switch on the roulette settings panel.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RouletteKey {
    Role(Role),
    Original,
    Collabo,
}

impl FromStr for RouletteKey {
    type Err = CompassError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.trim().to_ascii_lowercase().as_str() {
            "original" => Ok(Self::Original),
            "collabo" => Ok(Self::Collabo),
            _ => value
                .parse::<Role>()
                .map(Self::Role)
                .map_err(|_| CompassError::unknown("roulette key", value)),
        }
    }
}

/// Per-user hero roulette settings. Every switch starts on, and a toggle
/// that would leave no role or neither origin selected is undone.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RouletteParameter {
    roles: [bool; 4],
    original: bool,
    collabo: bool,
}

impl Default for RouletteParameter {
    fn default() -> Self {
        Self {
            roles: [true; 4],
            original: true,
            collabo: true,
        }
    }
}

fn role_slot(role: Role) -> usize {
    match role {
        Role::Attacker => 0,
        Role::Sprinter => 1,
        Role::Gunner => 2,
        Role::Tank => 3,
    }
}

impl RouletteParameter {
    pub fn is_valid(&self) -> bool {
        (self.original || self.collabo) && self.roles.iter().any(|on| *on)
    }

    pub fn is_on(&self, key: RouletteKey) -> bool {
        match key {
            RouletteKey::Role(role) => self.roles[role_slot(role)],
            RouletteKey::Original => self.original,
            RouletteKey::Collabo => self.collabo,
        }
    }

    fn flip(&mut self, key: RouletteKey) {
        match key {
            RouletteKey::Role(role) => {
                let slot = role_slot(role);
                self.roles[slot] = !self.roles[slot];
            }
            RouletteKey::Original => self.original = !self.original,
            RouletteKey::Collabo => self.collabo = !self.collabo,
        }
    }

    /// Flips `key`; returns whether the change was kept.
    pub fn toggle(&mut self, key: RouletteKey) -> bool {
        self.flip(key);
        if self.is_valid() {
            return true;
        }
        self.flip(key);
        false
    }

    pub fn reset(&mut self) {
        *self = Self::default();
    }

    pub fn roles(&self) -> Vec<Role> {
        Role::ALL
            .into_iter()
            .filter(|role| self.roles[role_slot(*role)])
            .collect()
    }

    pub fn hero_filter(&self) -> HeroFilter {
        HeroFilter {
            roles: self.roles(),
            original: self.original,
            collabo: self.collabo,
            exclusion: true,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn starts_fully_enabled() {
        let param = RouletteParameter::default();
        assert!(param.is_valid());
        assert_eq!(param.roles(), Role::ALL.to_vec());
        let filter = param.hero_filter();
        assert!(filter.original && filter.collabo && filter.exclusion);
    }

    #[test]
    fn last_role_cannot_be_switched_off() {
        let mut param = RouletteParameter::default();
        assert!(param.toggle(RouletteKey::Role(Role::Attacker)));
        assert!(param.toggle(RouletteKey::Role(Role::Sprinter)));
        assert!(param.toggle(RouletteKey::Role(Role::Gunner)));
        assert!(!param.toggle(RouletteKey::Role(Role::Tank)));
        assert_eq!(param.roles(), vec![Role::Tank]);
    }

    #[test]
    fn one_origin_must_stay_on() {
        let mut param = RouletteParameter::default();
        assert!(param.toggle("original".parse().expect("key")));
        assert!(!param.toggle(RouletteKey::Collabo));
        assert!(param.is_on(RouletteKey::Collabo));
        assert!(!param.is_on(RouletteKey::Original));
        param.reset();
        assert_eq!(param, RouletteParameter::default());
    }

    #[test]
    fn keys_parse_from_role_labels() {
        assert_eq!("gun".parse::<RouletteKey>(), Ok(RouletteKey::Role(Role::Gunner)));
        assert_eq!("Collabo".parse::<RouletteKey>(), Ok(RouletteKey::Collabo));
        assert!("speed".parse::<RouletteKey>().is_err());
    }
}
