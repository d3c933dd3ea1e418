use thiserror::Error;

use crate::domain::{GameId, LobbyId};

/// Ошибки бухгалтерии эскроу. Любая из них означает, что операция
/// отвергнута целиком — частичных списаний не бывает.
#[derive(Clone, Copy, Debug, Error, PartialEq, Eq)]
pub enum LedgerError {
    #[error("Эскроу для лобби {0} не найден")]
    LobbyEscrowMissing(LobbyId),

    #[error("Эскроу для игры {0} не найден")]
    GameEscrowMissing(GameId),

    #[error("Сумма выплат не сходится с эскроу игры {0}")]
    UnbalancedRelease(GameId),
}

/// Ошибки игрового движка. Все fail-fast: отвергнутое действие не
/// меняет состояние и не двигает средства.
#[derive(Clone, Copy, Debug, Error, PartialEq, Eq)]
pub enum EngineError {
    #[error("Лобби {0} не найдено")]
    LobbyNotFound(LobbyId),

    #[error("Игра {0} не найдена")]
    GameNotFound(GameId),

    #[error("Внесённая сумма не равна требуемой ставке или нарушает лимиты")]
    InvalidStake,

    #[error("Нельзя присоединиться к собственному лобби")]
    SelfJoin,

    #[error("Лобби {0} не в статусе Open")]
    LobbyNotOpen(LobbyId),

    #[error("Вызывающий не является стороной, которой разрешено это действие")]
    NotAuthorized,

    #[error("Действие недопустимо в текущей фазе игры")]
    WrongTurn,

    #[error("Игра {0} уже завершена")]
    GameFinished(GameId),

    #[error("Удвоение доступно только на исходной руке из двух карт")]
    DoubleNotAllowed,

    #[error("Сплит доступен только для пары карт одинакового ранга")]
    SplitNotAllowed,

    /// Колода из 52 карт не может закончиться при реальных размерах рук.
    /// Если закончилась — это фатальное нарушение инварианта, а не
    /// восстановимая ошибка.
    #[error("Колода игры {0} исчерпана")]
    DeckExhausted(GameId),

    #[error(transparent)]
    Ledger(#[from] LedgerError),
}
