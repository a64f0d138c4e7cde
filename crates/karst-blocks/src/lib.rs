//! Block value types and the kind -> material table.
#![forbid(unsafe_code)]

pub mod material;
pub mod types;

pub use material::MaterialCatalog;
pub use types::{Block, BlockKind, MaterialId};
