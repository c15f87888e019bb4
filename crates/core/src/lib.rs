//! Compass domain logic: localized text, name resolution and the game
//! catalogs. Keep this crate free of IO and platform concerns.

pub mod attributes;
pub mod card;
pub mod catalog;
pub mod deck;
pub mod error;
pub mod gacha;
pub mod hero;
pub mod locale;
pub mod normalize;
pub mod resolver;
pub mod rng;
pub mod roulette;
pub mod stage;
pub mod status;
pub mod team;

pub use attributes::*;
pub use card::*;
pub use catalog::*;
pub use deck::*;
pub use error::*;
pub use gacha::*;
pub use hero::*;
pub use locale::*;
pub use normalize::*;
pub use resolver::*;
pub use rng::*;
pub use roulette::*;
pub use stage::*;
pub use status::*;
pub use team::*;
