use serde::{Deserialize, Serialize};

use crate::domain::GameId;
use crate::engine::{BlackjackEngine, Event};

use super::dto::{build_game_state, hand_to_dto, CardDto, GameStateDto, LobbyDto};
use super::errors::ApiError;

/// Запросы «только чтение». Повторный вызов без промежуточных команд
/// возвращает в точности те же значения — это снапшоты
/// зафиксированного состояния.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub enum Query {
    /// Список открытых лобби.
    GetOpenLobbies,

    /// Состояние игры (форма getGameState).
    GetGameState { game_id: GameId },

    /// Руки по отдельности — как геттеры исходного контракта.
    GetPlayerHand { game_id: GameId },
    GetDealerHand { game_id: GameId },
    GetSplitHand { game_id: GameId },

    /// Хвост журнала событий начиная с оффсета.
    PollEvents { from: u64 },
}

/// Результат запроса.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub enum QueryResponse {
    OpenLobbies(Vec<LobbyDto>),
    GameState(GameStateDto),
    Hand(Vec<CardDto>),
    Events(Vec<Event>),
}

/// Выполнить запрос к движку.
pub fn handle_query(engine: &BlackjackEngine, query: Query) -> Result<QueryResponse, ApiError> {
    match query {
        Query::GetOpenLobbies => {
            let lobbies = engine
                .open_lobbies()
                .into_iter()
                .map(LobbyDto::from)
                .collect();
            Ok(QueryResponse::OpenLobbies(lobbies))
        }

        Query::GetGameState { game_id } => {
            let game = engine
                .game(game_id)
                .ok_or_else(|| ApiError::NotFound(format!("Игра {game_id} не найдена")))?;
            Ok(QueryResponse::GameState(build_game_state(game)))
        }

        Query::GetPlayerHand { game_id } => {
            let game = engine
                .game(game_id)
                .ok_or_else(|| ApiError::NotFound(format!("Игра {game_id} не найдена")))?;
            Ok(QueryResponse::Hand(hand_to_dto(&game.player_hand)))
        }

        Query::GetDealerHand { game_id } => {
            let game = engine
                .game(game_id)
                .ok_or_else(|| ApiError::NotFound(format!("Игра {game_id} не найдена")))?;
            Ok(QueryResponse::Hand(hand_to_dto(&game.dealer_hand)))
        }

        Query::GetSplitHand { game_id } => {
            let game = engine
                .game(game_id)
                .ok_or_else(|| ApiError::NotFound(format!("Игра {game_id} не найдена")))?;
            // Пустой список, если сплита не было, — как в исходном контракте.
            let cards = game
                .split_hand
                .as_ref()
                .map(hand_to_dto)
                .unwrap_or_default();
            Ok(QueryResponse::Hand(cards))
        }

        Query::PollEvents { from } => {
            Ok(QueryResponse::Events(engine.events.poll_from(from).to_vec()))
        }
    }
}
