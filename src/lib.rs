//! Движок блэкджека «дилер против игрока» со ставками в эскроу.
//!
//! Здесь живёт вся игровая логика:
//! - лобби и эскроу ставок (создать / присоединиться / отменить);
//! - раздача карт без повторов из приватной колоды игры;
//! - машина ходов игрока и дилера (hit / stand / double / split);
//! - подсчёт руки с мягким тузом, bust / blackjack;
//! - расчёт и выплата банка ровно один раз на игру.
//!
//! Кошельки, транспорт и UI — внешние коллабораторы: движок
//! принимает команды методами и отдаёт уведомления через журнал
//! событий (`engine::events`).

pub mod api;
pub mod domain;
pub mod engine;
pub mod infra;

pub use api::{Command, Query, QueryResponse};
pub use engine::{BlackjackEngine, EngineConfig, EngineError};
