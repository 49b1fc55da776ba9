//! Доменная модель дурака: карты, колода, руки, стол, игроки, комната.

pub mod card;
pub mod deck;
pub mod hand;
pub mod player;
pub mod room;
pub mod table;

// Базовые идентификаторы
pub type PlayerId = u64;
pub type RoomId = u64;
pub type CardId = u64;
pub type PileId = u64;

// Удобные реэкспорты, чтобы в других модулях писать crate::domain::Card и т.п.
pub use card::*;
pub use deck::*;
pub use hand::*;
pub use player::*;
pub use room::*;
pub use table::*;
