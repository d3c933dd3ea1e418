use serde::{Deserialize, Serialize};

use crate::domain::{GameId, LobbyId};

/// Монотонные счётчики идентификаторов лобби и игр.
///
/// Id растут от нуля, как в исходном контракте (первое лобби — 0).
/// Обычные u64 вместо атомиков: движок — единоличный владелец своего
/// состояния (&mut self), а счётчики должны сериализоваться вместе
/// с остальным состоянием.
#[derive(Clone, Debug, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct IdGenerator {
    lobby_counter: u64,
    game_counter: u64,
}

impl IdGenerator {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn next_lobby_id(&mut self) -> LobbyId {
        let id = self.lobby_counter;
        self.lobby_counter += 1;
        id
    }

    pub fn next_game_id(&mut self) -> GameId {
        let id = self.game_counter;
        self.game_counter += 1;
        id
    }
}
