use core::fmt;

use serde::{Deserialize, Serialize};

use crate::domain::chips::Chips;
use crate::domain::deck::Deck;
use crate::domain::hand::Hand;
use crate::domain::{AccountId, GameId, LobbyId};

/// Чей сейчас ход.
#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub enum Turn {
    Player,
    Dealer,
}

/// Какая из рук игрока сейчас активна (после сплита их две).
/// Ре-сплит не поддерживается, поэтому коллекция рук фиксированная:
/// основная рука + опциональная сплит-рука.
#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub enum HandSlot {
    Primary,
    Split,
}

/// Роль вызывающего в конкретной игре. Разрешается один раз по адресам,
/// сохранённым в Game при создании, — никаких сравнений строк по месту.
#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub enum Role {
    Player,
    Dealer,
}

/// Итог игры целиком.
#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub enum Outcome {
    PlayerWins,
    DealerWins,
    Push,
}

impl fmt::Display for Outcome {
    /// Строки итогов из исходного контракта: "Player Wins" и т.д.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Outcome::PlayerWins => "Player Wins",
            Outcome::DealerWins => "Dealer Wins",
            Outcome::Push => "Push",
        };
        write!(f, "{s}")
    }
}

/// Зафиксированный результат расчёта (записывается ровно один раз).
#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct GameResult {
    pub outcome: Outcome,
    /// Итог основной руки игрока (для сплита — именно основной).
    pub player_score: u32,
    pub dealer_score: u32,
    pub player_payout: Chips,
    pub dealer_payout: Chips,
}

/// Состояние одной игры.
///
/// Владение по фазам: менеджер лобби создаёт игру, машина ходов
/// (engine::game_loop) единолично меняет руки/ход, расчёт
/// (engine::settlement) единолично ставит result/is_complete и
/// отпускает эскроу. Фазы не пересекаются.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct Game {
    pub id: GameId,
    pub lobby_id: LobbyId,
    pub player: AccountId,
    pub dealer: AccountId,
    pub bet_amount: Chips,
    /// Сумма всех внесённых в эту игру средств. После завершения
    /// остаётся как исторический факт, эскроу обнуляет ledger.
    pub pot: Chips,
    /// Приватная перетасованная колода этой игры.
    pub deck: Deck,
    pub player_hand: Hand,
    pub dealer_hand: Hand,
    pub split_hand: Option<Hand>,
    pub active_slot: HandSlot,
    pub turn: Turn,
    pub is_complete: bool,
    pub result: Option<GameResult>,
}

impl Game {
    pub fn new(
        id: GameId,
        lobby_id: LobbyId,
        player: AccountId,
        dealer: AccountId,
        bet_amount: Chips,
        pot: Chips,
        deck: Deck,
    ) -> Self {
        Self {
            id,
            lobby_id,
            player,
            dealer,
            bet_amount,
            pot,
            deck,
            player_hand: Hand::new(bet_amount),
            dealer_hand: Hand::new(Chips::ZERO),
            split_hand: None,
            active_slot: HandSlot::Primary,
            turn: Turn::Player,
            is_complete: false,
            result: None,
        }
    }

    /// Роль адреса в этой игре (None — посторонний).
    pub fn role_of(&self, account: AccountId) -> Option<Role> {
        if account == self.player {
            Some(Role::Player)
        } else if account == self.dealer {
            Some(Role::Dealer)
        } else {
            None
        }
    }

    pub fn is_split(&self) -> bool {
        self.split_hand.is_some()
    }

    /// Активная рука игрока (основная или сплит).
    pub fn active_hand(&self) -> &Hand {
        match self.active_slot {
            HandSlot::Primary => &self.player_hand,
            HandSlot::Split => self
                .split_hand
                .as_ref()
                .expect("active_slot == Split только после сплита"),
        }
    }

    pub fn active_hand_mut(&mut self) -> &mut Hand {
        match self.active_slot {
            HandSlot::Primary => &mut self.player_hand,
            HandSlot::Split => self
                .split_hand
                .as_mut()
                .expect("active_slot == Split только после сплита"),
        }
    }

    /// Можно ли удвоить: только ход игрока, ровно две карты в основной
    /// руке, по ней ещё не было действий и не было сплита.
    pub fn can_double(&self) -> bool {
        !self.is_complete
            && self.turn == Turn::Player
            && !self.is_split()
            && self.player_hand.len() == 2
            && !self.player_hand.held
    }

    /// Можно ли сплитовать: только ход игрока, в основной руке пара
    /// одинакового ранга, сплита ещё не было.
    pub fn can_split(&self) -> bool {
        !self.is_complete
            && self.turn == Turn::Player
            && !self.is_split()
            && self.player_hand.is_splittable_pair()
            && !self.player_hand.held
    }

    /// Все руки игрока разыграны (основная и, если есть, сплит).
    pub fn all_player_hands_resolved(&self) -> bool {
        self.player_hand.is_resolved()
            && self
                .split_hand
                .as_ref()
                .map(|h| h.is_resolved())
                .unwrap_or(true)
    }

    /// Все руки игрока перебрали — дилеру играть незачем.
    pub fn all_player_hands_busted(&self) -> bool {
        self.player_hand.score().is_bust
            && self
                .split_hand
                .as_ref()
                .map(|h| h.score().is_bust)
                .unwrap_or(true)
    }
}
