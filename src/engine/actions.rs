use core::fmt;

use serde::{Deserialize, Serialize};

/// Тип действия игрока в свой ход.
#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub enum PlayerActionKind {
    /// Взять одну карту в активную руку.
    Hit,
    /// Зафиксировать активную руку.
    Stand,
    /// Удвоить ставку, получить ровно одну карту и автоматически встать.
    DoubleDown,
    /// Разделить пару на две независимые руки.
    Split,
}

impl fmt::Display for PlayerActionKind {
    /// Строки действий из событий исходного контракта.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            PlayerActionKind::Hit => "Hit",
            PlayerActionKind::Stand => "Stand",
            PlayerActionKind::DoubleDown => "Double Down",
            PlayerActionKind::Split => "Split",
        };
        write!(f, "{s}")
    }
}

/// Тип действия дилера. Дилер — живой контрагент и решает сам;
/// движок его руку не доигрывает (никакого правила «стоять на 17»).
#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub enum DealerActionKind {
    Hit,
    Stand,
}

impl fmt::Display for DealerActionKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            DealerActionKind::Hit => "Hit",
            DealerActionKind::Stand => "Stand",
        };
        write!(f, "{s}")
    }
}
