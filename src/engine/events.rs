use serde::{Deserialize, Serialize};

use crate::domain::card::Card;
use crate::domain::chips::Chips;
use crate::domain::game::Outcome;
use crate::domain::{AccountId, GameId, LobbyId};
use crate::engine::actions::{DealerActionKind, PlayerActionKind};

/// Тип события движка — всё, что видят внешние подписчики.
///
/// Вместо регистрации колбэков — явный append-only журнал плюс чтение
/// с оффсета: подписчик перечитывает хвост журнала сколько угодно раз,
/// «как минимум один раз» получается само собой.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub enum EventKind {
    /// Создано новое лобби.
    LobbyCreated {
        lobby_id: LobbyId,
        dealer: AccountId,
        bet_amount: Chips,
    },

    /// Игрок присоединился к лобби.
    LobbyJoined {
        lobby_id: LobbyId,
        player: AccountId,
    },

    /// Создатель отменил лобби, ставка возвращена.
    LobbyCancelled {
        lobby_id: LobbyId,
        dealer: AccountId,
    },

    /// Из лобби родилась игра.
    GameCreated {
        game_id: GameId,
        player: AccountId,
        dealer: AccountId,
    },

    /// Роздана карта (в руку игрока или дилера).
    CardDealt {
        game_id: GameId,
        card: Card,
        is_dealer: bool,
    },

    /// Действие игрока.
    PlayerActed {
        game_id: GameId,
        action: PlayerActionKind,
    },

    /// Действие дилера.
    DealerActed {
        game_id: GameId,
        action: DealerActionKind,
    },

    /// Ход перешёл к игроку.
    PlayerTurn { game_id: GameId },

    /// Ход перешёл к дилеру.
    DealerTurn { game_id: GameId },

    /// Активной стала сплит-рука.
    SplitHandStarted { game_id: GameId },

    /// Рука перебрала.
    HandBusted { game_id: GameId },

    /// Игра рассчитана и завершена.
    GameComplete {
        game_id: GameId,
        outcome: Outcome,
        player_score: u32,
        dealer_score: u32,
        player_payout: Chips,
        dealer_payout: Chips,
    },
}

impl EventKind {
    /// К какой игре относится событие (для фильтрации журнала).
    pub fn game_id(&self) -> Option<GameId> {
        match self {
            EventKind::GameCreated { game_id, .. }
            | EventKind::CardDealt { game_id, .. }
            | EventKind::PlayerActed { game_id, .. }
            | EventKind::DealerActed { game_id, .. }
            | EventKind::PlayerTurn { game_id }
            | EventKind::DealerTurn { game_id }
            | EventKind::SplitHandStarted { game_id }
            | EventKind::HandBusted { game_id }
            | EventKind::GameComplete { game_id, .. } => Some(*game_id),
            _ => None,
        }
    }
}

/// Событие со сквозным порядковым номером.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub struct Event {
    pub seq: u64,
    pub kind: EventKind,
}

/// Append-only журнал событий всего движка.
#[derive(Clone, Debug, Default, Serialize, Deserialize, PartialEq)]
pub struct EventLog {
    pub events: Vec<Event>,
}

impl EventLog {
    pub fn new() -> Self {
        Self { events: Vec::new() }
    }

    pub fn push(&mut self, kind: EventKind) {
        let seq = self.events.len() as u64;
        self.events.push(Event { seq, kind });
    }

    pub fn len(&self) -> usize {
        self.events.len()
    }

    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }

    /// Хвост журнала начиная с оффсета (poll-from-offset для подписчиков).
    pub fn poll_from(&self, offset: u64) -> &[Event] {
        let idx = (offset as usize).min(self.events.len());
        &self.events[idx..]
    }

    /// Все события одной игры (история для реплея/отладки).
    pub fn for_game(&self, game_id: GameId) -> Vec<&Event> {
        self.events
            .iter()
            .filter(|e| e.kind.game_id() == Some(game_id))
            .collect()
    }
}
