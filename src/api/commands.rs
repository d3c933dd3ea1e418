use serde::{Deserialize, Serialize};

use crate::domain::chips::Chips;
use crate::domain::{AccountId, GameId, LobbyId, Timestamp};
use crate::engine::{BlackjackEngine, RandomSource};

use super::errors::ApiError;

/// Команда верхнего уровня.
///
/// Каждая команда несёт адрес вызывающего и, где нужно, внесённую
/// сумму — аналог msg.sender / msg.value исходного контракта.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub enum Command {
    /// Создать лобби (вызывающий становится дилером).
    CreateLobby(CreateLobbyCommand),

    /// Присоединиться к открытому лобби (вызывающий становится игроком).
    JoinLobby(JoinLobbyCommand),

    /// Отменить своё открытое лобби.
    CancelLobby(CancelLobbyCommand),

    /// Ход в существующей игре.
    Game(GameActionCommand),

    /// Снять накопленные выплаты вызывающего.
    Withdraw(WithdrawCommand),
}

/// Команда создания лобби. Размер ставки выводится из стейка:
/// bet = stake × 2/3, стейк обязан равняться ровно 1.5 × bet.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct CreateLobbyCommand {
    pub caller: AccountId,
    pub stake: Chips,
    /// Метка времени создания — движок часов не держит.
    pub now: Timestamp,
}

/// Присоединение к лобби; stake обязан равняться bet лобби.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct JoinLobbyCommand {
    pub caller: AccountId,
    pub lobby_id: LobbyId,
    pub stake: Chips,
}

/// Отмена лобби (только создателем, только пока Open).
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct CancelLobbyCommand {
    pub caller: AccountId,
    pub lobby_id: LobbyId,
}

/// Ход в конкретной игре.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct GameActionCommand {
    pub caller: AccountId,
    pub game_id: GameId,
    pub action: GameAction,
}

/// Какой именно ход делается.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub enum GameAction {
    Hit,
    Stand,
    /// Удвоение требует довнесения, равного исходной ставке.
    DoubleDown { stake: Chips },
    /// Сплит требует довнесения, равного исходной ставке.
    Split { stake: Chips },
    DealerHit,
    DealerStand,
}

/// Снятие выводимого баланса.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct WithdrawCommand {
    pub caller: AccountId,
}

/// Что вернула команда (созданные идентификаторы, снятая сумма).
#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub enum CommandOutcome {
    LobbyCreated(LobbyId),
    GameStarted(GameId),
    Withdrawn(Chips),
    Done,
}

/// Применить команду к движку.
///
/// RNG приходит снаружи: продакшен даёт SystemRng, реплей и тесты —
/// детерминированный (см. infra::RngSeed).
pub fn handle_command<R: RandomSource>(
    engine: &mut BlackjackEngine,
    command: Command,
    rng: &mut R,
) -> Result<CommandOutcome, ApiError> {
    match command {
        Command::CreateLobby(cmd) => {
            let lobby_id = engine.create_lobby(cmd.caller, cmd.stake, cmd.now)?;
            Ok(CommandOutcome::LobbyCreated(lobby_id))
        }

        Command::JoinLobby(cmd) => {
            let game_id = engine.join_lobby(cmd.caller, cmd.lobby_id, cmd.stake, rng)?;
            Ok(CommandOutcome::GameStarted(game_id))
        }

        Command::CancelLobby(cmd) => {
            engine.cancel_lobby(cmd.caller, cmd.lobby_id)?;
            Ok(CommandOutcome::Done)
        }

        Command::Game(cmd) => {
            match cmd.action {
                GameAction::Hit => engine.hit(cmd.caller, cmd.game_id)?,
                GameAction::Stand => engine.stand(cmd.caller, cmd.game_id)?,
                GameAction::DoubleDown { stake } => {
                    engine.double_down(cmd.caller, cmd.game_id, stake)?
                }
                GameAction::Split { stake } => engine.split(cmd.caller, cmd.game_id, stake)?,
                GameAction::DealerHit => engine.dealer_hit(cmd.caller, cmd.game_id)?,
                GameAction::DealerStand => engine.dealer_stand(cmd.caller, cmd.game_id)?,
            }
            Ok(CommandOutcome::Done)
        }

        Command::Withdraw(cmd) => Ok(CommandOutcome::Withdrawn(engine.withdraw(cmd.caller))),
    }
}
