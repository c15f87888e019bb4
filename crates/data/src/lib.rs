//! Loading catalogs and gacha tables from a data directory.

pub mod load;
pub mod schema;

pub use load::*;
pub use schema::*;
