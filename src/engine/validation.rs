use crate::domain::game::{Game, Role, Turn};
use crate::domain::AccountId;
use crate::engine::errors::EngineError;

/// Общие проверки перед любым игровым действием:
/// 1) игра не завершена (иначе GameFinished);
/// 2) вызывающий — та роль, которой действие принадлежит
///    (иначе NotAuthorized);
/// 3) сейчас фаза этой роли (иначе WrongTurn).
///
/// Порядок проверок фиксированный, чтобы ошибка была детерминированной
/// при любой комбинации нарушений.
pub fn validate_turn_action(
    game: &Game,
    caller: AccountId,
    required_role: Role,
) -> Result<(), EngineError> {
    if game.is_complete {
        return Err(EngineError::GameFinished(game.id));
    }

    match game.role_of(caller) {
        Some(role) if role == required_role => {}
        _ => return Err(EngineError::NotAuthorized),
    }

    let required_turn = match required_role {
        Role::Player => Turn::Player,
        Role::Dealer => Turn::Dealer,
    };
    if game.turn != required_turn {
        return Err(EngineError::WrongTurn);
    }

    Ok(())
}

/// Предусловия удвоения (без проверки внесённой суммы — её делает
/// менеджер, у которого в руках стейк).
pub fn validate_double(game: &Game) -> Result<(), EngineError> {
    if !game.can_double() {
        return Err(EngineError::DoubleNotAllowed);
    }
    Ok(())
}

/// Предусловия сплита.
pub fn validate_split(game: &Game) -> Result<(), EngineError> {
    if !game.can_split() {
        return Err(EngineError::SplitNotAllowed);
    }
    Ok(())
}
