use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use crate::domain::chips::Chips;
use crate::domain::{AccountId, GameId, LobbyId};
use crate::engine::errors::LedgerError;

/// Эскроу-бухгалтерия движка.
///
/// Наружу торчат только сбалансированные операции (hold / move /
/// release) — «сырой» мутации балансов нет. Инвариант:
/// `total_held == Σ эскроу лобби + Σ эскроу игр`. Выплаченные
/// средства копятся как выводимые балансы по адресам.
#[derive(Clone, Debug, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct EscrowLedger {
    lobby_escrow: HashMap<LobbyId, Chips>,
    game_escrow: HashMap<GameId, Chips>,
    /// Начисленные, ещё не выведенные средства.
    payouts: HashMap<AccountId, Chips>,
    total_held: Chips,
}

impl EscrowLedger {
    pub fn new() -> Self {
        Self::default()
    }

    /// Принять стейк дилера в эскроу нового лобби.
    pub fn hold_for_lobby(&mut self, lobby_id: LobbyId, amount: Chips) {
        *self.lobby_escrow.entry(lobby_id).or_insert(Chips::ZERO) += amount;
        self.total_held += amount;
    }

    /// Вернуть эскроу отменённого лобби его создателю.
    pub fn refund_lobby(
        &mut self,
        lobby_id: LobbyId,
        dealer: AccountId,
    ) -> Result<Chips, LedgerError> {
        let amount = self
            .lobby_escrow
            .remove(&lobby_id)
            .ok_or(LedgerError::LobbyEscrowMissing(lobby_id))?;
        self.total_held -= amount;
        *self.payouts.entry(dealer).or_insert(Chips::ZERO) += amount;
        Ok(amount)
    }

    /// Перенести эскроу лобби в банк новой игры (join).
    pub fn move_lobby_to_game(
        &mut self,
        lobby_id: LobbyId,
        game_id: GameId,
    ) -> Result<Chips, LedgerError> {
        let amount = self
            .lobby_escrow
            .remove(&lobby_id)
            .ok_or(LedgerError::LobbyEscrowMissing(lobby_id))?;
        *self.game_escrow.entry(game_id).or_insert(Chips::ZERO) += amount;
        Ok(amount)
    }

    /// Довнести средства в банк игры (ставка игрока, дабл, сплит).
    pub fn add_to_game(&mut self, game_id: GameId, amount: Chips) {
        *self.game_escrow.entry(game_id).or_insert(Chips::ZERO) += amount;
        self.total_held += amount;
    }

    /// Сколько сейчас в эскроу игры.
    pub fn game_escrow_of(&self, game_id: GameId) -> Chips {
        self.game_escrow
            .get(&game_id)
            .copied()
            .unwrap_or(Chips::ZERO)
    }

    /// Сколько сейчас в эскроу лобби.
    pub fn lobby_escrow_of(&self, lobby_id: LobbyId) -> Chips {
        self.lobby_escrow
            .get(&lobby_id)
            .copied()
            .unwrap_or(Chips::ZERO)
    }

    /// Выпустить эскроу завершённой игры двумя выплатами.
    ///
    /// Сумма выплат обязана сойтись с эскроу копейка в копейку, иначе
    /// вся операция отвергается и средства остаются в эскроу — ни одна
    /// фишка не покидает ledger без полностью посчитанного результата.
    pub fn release_game(
        &mut self,
        game_id: GameId,
        player: AccountId,
        player_payout: Chips,
        dealer: AccountId,
        dealer_payout: Chips,
    ) -> Result<(), LedgerError> {
        let held = *self
            .game_escrow
            .get(&game_id)
            .ok_or(LedgerError::GameEscrowMissing(game_id))?;

        if player_payout.0 + dealer_payout.0 != held.0 {
            return Err(LedgerError::UnbalancedRelease(game_id));
        }

        self.game_escrow.remove(&game_id);
        self.total_held -= held;
        *self.payouts.entry(player).or_insert(Chips::ZERO) += player_payout;
        *self.payouts.entry(dealer).or_insert(Chips::ZERO) += dealer_payout;
        Ok(())
    }

    /// Выводимый баланс адреса.
    pub fn balance_of(&self, account: AccountId) -> Chips {
        self.payouts.get(&account).copied().unwrap_or(Chips::ZERO)
    }

    /// Снять весь выводимый баланс адреса.
    pub fn withdraw(&mut self, account: AccountId) -> Chips {
        self.payouts.remove(&account).unwrap_or(Chips::ZERO)
    }

    /// Всего удерживается в эскроу (лобби + игры).
    pub fn total_held(&self) -> Chips {
        self.total_held
    }

    /// Пересчёт инварианта: сумма по всем эскроу равна total_held.
    /// Для тестов и отладочных проверок.
    pub fn is_conserved(&self) -> bool {
        let sum: u64 = self
            .lobby_escrow
            .values()
            .chain(self.game_escrow.values())
            .map(|c| c.0)
            .sum();
        sum == self.total_held.0
    }
}
