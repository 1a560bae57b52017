pub mod reference;
pub mod track;

pub use reference::{EntityKind, EntityRef};
pub use track::Track;
