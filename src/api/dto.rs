use serde::{Deserialize, Serialize};

use crate::domain::card::Card;
use crate::domain::chips::Chips;
use crate::domain::game::{Game, Turn};
use crate::domain::hand::Hand;
use crate::domain::lobby::{Lobby, LobbyStatus};
use crate::domain::{AccountId, GameId, LobbyId, Timestamp};

/// Карта во внешнем представлении исходного контракта:
/// value 1..=13 (1 = туз, 11/12/13 = J/Q/K), suit 1..=4 (♣ ♦ ♥ ♠).
#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct CardDto {
    pub value: u8,
    pub suit: u8,
}

impl From<Card> for CardDto {
    fn from(card: Card) -> Self {
        Self {
            value: card.rank.code(),
            suit: card.suit.code(),
        }
    }
}

/// Рука как список карт DTO.
pub fn hand_to_dto(hand: &Hand) -> Vec<CardDto> {
    hand.cards.iter().copied().map(CardDto::from).collect()
}

/// Лобби для списка в клиенте.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct LobbyDto {
    pub lobby_id: LobbyId,
    pub dealer: AccountId,
    pub bet_amount: Chips,
    pub status: LobbyStatus,
    pub game_id: Option<GameId>,
    pub created_at: Timestamp,
}

impl From<&Lobby> for LobbyDto {
    fn from(lobby: &Lobby) -> Self {
        Self {
            lobby_id: lobby.id,
            dealer: lobby.dealer,
            bet_amount: lobby.bet_amount,
            status: lobby.status,
            game_id: lobby.game_id,
            created_at: lobby.created_at,
        }
    }
}

/// Состояние игры — форма getGameState исходного контракта.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct GameStateDto {
    pub game_id: GameId,
    pub player: AccountId,
    pub dealer: AccountId,
    pub bet_amount: Chips,
    pub pot: Chips,
    pub player_score: u32,
    pub dealer_score: u32,
    pub is_player_turn: bool,
    pub can_double: bool,
    pub can_split: bool,
    pub is_split: bool,
    pub is_complete: bool,
    /// Строка итога ("Player Wins" / "Dealer Wins" / "Push"), если игра завершена.
    pub result: Option<String>,
}

/// Сформировать DTO состояния по текущему зафиксированному Game.
pub fn build_game_state(game: &Game) -> GameStateDto {
    GameStateDto {
        game_id: game.id,
        player: game.player,
        dealer: game.dealer,
        bet_amount: game.bet_amount,
        pot: game.pot,
        player_score: game.player_hand.score().total,
        dealer_score: game.dealer_hand.score().total,
        is_player_turn: !game.is_complete && game.turn == Turn::Player,
        can_double: game.can_double(),
        can_split: game.can_split(),
        is_split: game.is_split(),
        is_complete: game.is_complete,
        result: game.result.map(|r| r.outcome.to_string()),
    }
}
