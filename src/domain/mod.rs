//! Доменная модель блэкджека: карты, фишки, колода, руки, лобби, игра.

pub mod card;
pub mod chips;
pub mod deck;
pub mod game;
pub mod hand;
pub mod lobby;

// Базовые идентификаторы. Счёт идёт с нуля, как в исходном контракте.
pub type AccountId = u64;
pub type LobbyId = u64;
pub type GameId = u64;

/// Unix-время в секундах. Движок часов не держит — время приносит вызывающий.
pub type Timestamp = u64;

// Удобные реэкспорты, чтобы в других модулях писать crate::domain::Card и т.п.
pub use card::*;
pub use chips::*;
pub use deck::*;
pub use game::*;
pub use hand::*;
pub use lobby::*;
