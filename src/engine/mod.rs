//! Движок блэкджека: лобби и эскроу, машина ходов, расчёт, события.
//!
//! Высокоуровневый объект: `BlackjackEngine`.
//! Основные операции:
//!   - `create_lobby` / `join_lobby` / `cancel_lobby` — жизненный цикл лобби;
//!   - `hit` / `stand` / `double_down` / `split` — ходы игрока;
//!   - `dealer_hit` / `dealer_stand` — ходы дилера;
//! расчёт (`settlement::settle`) запускается движком сам, синхронно,
//! в момент достижения терминального состояния.

pub mod actions;
pub mod errors;
pub mod events;
pub mod game_loop;
pub mod ledger;
pub mod manager;
pub mod settlement;
pub mod validation;

pub use actions::{DealerActionKind, PlayerActionKind};
pub use errors::{EngineError, LedgerError};
pub use events::{Event, EventKind, EventLog};
pub use game_loop::GameStatus;
pub use ledger::EscrowLedger;
pub use manager::{BlackjackEngine, EngineConfig};

/// RNG интерфейс для engine: единственное, что движку нужно от
/// случайности, — перетасовать колоду. Реализации живут в infra.
pub trait RandomSource {
    fn shuffle<T>(&mut self, slice: &mut [T]);
}
