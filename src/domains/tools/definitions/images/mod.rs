//! Image generation tools module.
//!
//! - `background`: Atmospheric scene backgrounds
//! - `character`: Character portraits, full-body art, and battle-map tokens
//! - `monster`: D&D 5e monster lookup plus a matching image

pub mod background;
pub mod character;
pub mod monster;

pub use background::BackgroundImageTool;
pub use character::CharacterImageTool;
pub use monster::MonsterImageTool;
