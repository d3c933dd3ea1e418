use serde::{Deserialize, Serialize};

use crate::engine::EngineError;

/// Ошибки внешнего API (то, что отдаём клиенту).
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub enum ApiError {
    /// Неправильные входные данные запроса.
    BadRequest(String),

    /// Запрошенной сущности нет (лобби/игра).
    NotFound(String),

    /// Ошибка движка (ставки, ходы, расчёт).
    Engine(String),
}

impl From<EngineError> for ApiError {
    fn from(err: EngineError) -> Self {
        match err {
            EngineError::LobbyNotFound(_) | EngineError::GameNotFound(_) => {
                ApiError::NotFound(err.to_string())
            }
            _ => ApiError::Engine(err.to_string()),
        }
    }
}
