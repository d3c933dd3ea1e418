use serde::{Deserialize, Serialize};

use crate::domain::chips::Chips;
use crate::domain::{AccountId, GameId, LobbyId, Timestamp};

/// Статус лобби.
#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub enum LobbyStatus {
    /// Лобби открыто, ждёт игрока.
    Open,
    /// Игрок присоединился; лобби атомарно превратилось в игру.
    Joined,
    /// Создатель отменил лобби, ставка возвращена.
    Cancelled,
}

/// Открытое предложение дилера сыграть одну игру с фиксированной ставкой.
///
/// Создатель лобби становится дилером и вносит 1.5 × bet (дилер несёт
/// повышенный риск, потому что играет и банкиром, и рукой).
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct Lobby {
    pub id: LobbyId,
    pub dealer: AccountId,
    /// Ставка игры (bet), а не внесённый дилером стейк.
    pub bet_amount: Chips,
    /// Сколько дилер реально внёс в эскроу (1.5 × bet).
    pub stake: Chips,
    pub status: LobbyStatus,
    /// Инвариант: Some ⇔ status == Joined.
    pub game_id: Option<GameId>,
    pub created_at: Timestamp,
}

impl Lobby {
    pub fn new(
        id: LobbyId,
        dealer: AccountId,
        bet_amount: Chips,
        stake: Chips,
        created_at: Timestamp,
    ) -> Self {
        Self {
            id,
            dealer,
            bet_amount,
            stake,
            status: LobbyStatus::Open,
            game_id: None,
            created_at,
        }
    }

    pub fn is_open(&self) -> bool {
        matches!(self.status, LobbyStatus::Open)
    }
}
