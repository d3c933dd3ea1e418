use std::collections::{BTreeMap, HashMap};

use serde::{Deserialize, Serialize};

use crate::domain::chips::Chips;
use crate::domain::deck::Deck;
use crate::domain::game::{Game, GameResult, Role};
use crate::domain::lobby::{Lobby, LobbyStatus};
use crate::domain::{AccountId, GameId, LobbyId, Timestamp};
use crate::engine::errors::EngineError;
use crate::engine::events::{EventKind, EventLog};
use crate::engine::game_loop::{self, GameStatus};
use crate::engine::ledger::EscrowLedger;
use crate::engine::settlement;
use crate::engine::validation::{validate_double, validate_split, validate_turn_action};
use crate::engine::RandomSource;
use crate::infra::ids::IdGenerator;

/// Конфигурация движка: лимиты ставки на весь процесс.
#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct EngineConfig {
    pub min_bet: Chips,
    pub max_bet: Chips,
}

/// Верхний объект движка: лобби, игры, эскроу и журнал событий.
///
/// Движок — единоличный владелец изменяемого состояния: одна
/// мутирующая операция за раз, каждая атомарна (все проверки до
/// первой мутации). Очередей и таймеров нет — недопустимая сейчас
/// операция сразу возвращает типизированную ошибку.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct BlackjackEngine {
    pub config: EngineConfig,
    pub ledger: EscrowLedger,
    /// BTreeMap, чтобы getOpenLobbies отдавал лобби в порядке создания.
    pub lobbies: BTreeMap<LobbyId, Lobby>,
    pub games: HashMap<GameId, Game>,
    pub ids: IdGenerator,
    pub events: EventLog,
}

impl BlackjackEngine {
    pub fn new(config: EngineConfig) -> Self {
        Self {
            config,
            ledger: EscrowLedger::new(),
            lobbies: BTreeMap::new(),
            games: HashMap::new(),
            ids: IdGenerator::new(),
            events: EventLog::new(),
        }
    }

    // ------------------------------------------------------------------
    // Лобби
    // ------------------------------------------------------------------

    /// Создать лобби. Вызывающий становится дилером; внесённый стейк
    /// обязан равняться ровно 1.5 × bet, а bet — попадать в лимиты.
    pub fn create_lobby(
        &mut self,
        dealer: AccountId,
        stake: Chips,
        now: Timestamp,
    ) -> Result<LobbyId, EngineError> {
        let bet = Chips::bet_from_dealer_stake(stake);
        if Chips::dealer_stake_for_bet(bet) != stake
            || bet < self.config.min_bet
            || bet > self.config.max_bet
        {
            return Err(EngineError::InvalidStake);
        }

        let lobby_id = self.ids.next_lobby_id();
        self.ledger.hold_for_lobby(lobby_id, stake);
        self.lobbies
            .insert(lobby_id, Lobby::new(lobby_id, dealer, bet, stake, now));
        self.events.push(EventKind::LobbyCreated {
            lobby_id,
            dealer,
            bet_amount: bet,
        });
        Ok(lobby_id)
    }

    /// Присоединиться к открытому лобби. Атомарно: лобби → Joined,
    /// эскроу переезжает в банк новой игры, раздаются по две карты,
    /// натуральный блэкджек рассчитывается сразу.
    pub fn join_lobby<R: RandomSource>(
        &mut self,
        player: AccountId,
        lobby_id: LobbyId,
        stake: Chips,
        rng: &mut R,
    ) -> Result<GameId, EngineError> {
        let (dealer, bet) = {
            let lobby = self
                .lobbies
                .get(&lobby_id)
                .ok_or(EngineError::LobbyNotFound(lobby_id))?;
            if !lobby.is_open() {
                return Err(EngineError::LobbyNotOpen(lobby_id));
            }
            if player == lobby.dealer {
                return Err(EngineError::SelfJoin);
            }
            if stake != lobby.bet_amount {
                return Err(EngineError::InvalidStake);
            }
            (lobby.dealer, lobby.bet_amount)
        };

        let game_id = self.ids.next_game_id();
        let dealer_stake = self.ledger.move_lobby_to_game(lobby_id, game_id)?;
        self.ledger.add_to_game(game_id, stake);

        let lobby = self
            .lobbies
            .get_mut(&lobby_id)
            .expect("лобби проверено выше");
        lobby.status = LobbyStatus::Joined;
        lobby.game_id = Some(game_id);

        // Каждая игра тасует собственную колоду независимо.
        let mut deck = Deck::standard_52();
        rng.shuffle(&mut deck.cards);

        let mut game = Game::new(
            game_id,
            lobby_id,
            player,
            dealer,
            bet,
            dealer_stake + stake,
            deck,
        );

        self.events.push(EventKind::LobbyJoined { lobby_id, player });
        self.events.push(EventKind::GameCreated {
            game_id,
            player,
            dealer,
        });

        let status = game_loop::deal_initial(&mut game, &mut self.events)?;
        if status == GameStatus::ReadyToSettle {
            settlement::settle(&mut game, &mut self.ledger, &mut self.events)?;
        }
        self.games.insert(game_id, game);
        Ok(game_id)
    }

    /// Отменить своё открытое лобби и вернуть стейк из эскроу.
    pub fn cancel_lobby(
        &mut self,
        caller: AccountId,
        lobby_id: LobbyId,
    ) -> Result<(), EngineError> {
        let dealer = {
            let lobby = self
                .lobbies
                .get(&lobby_id)
                .ok_or(EngineError::LobbyNotFound(lobby_id))?;
            if !lobby.is_open() {
                return Err(EngineError::LobbyNotOpen(lobby_id));
            }
            if caller != lobby.dealer {
                return Err(EngineError::NotAuthorized);
            }
            lobby.dealer
        };

        self.ledger.refund_lobby(lobby_id, dealer)?;
        let lobby = self
            .lobbies
            .get_mut(&lobby_id)
            .expect("лобби проверено выше");
        lobby.status = LobbyStatus::Cancelled;
        self.events.push(EventKind::LobbyCancelled { lobby_id, dealer });
        Ok(())
    }

    /// Открытые лобби в порядке создания (снапшот).
    pub fn open_lobbies(&self) -> Vec<&Lobby> {
        self.lobbies.values().filter(|l| l.is_open()).collect()
    }

    // ------------------------------------------------------------------
    // Ходы игрока
    // ------------------------------------------------------------------

    /// Игрок берёт карту в активную руку.
    pub fn hit(&mut self, caller: AccountId, game_id: GameId) -> Result<(), EngineError> {
        let game = self
            .games
            .get_mut(&game_id)
            .ok_or(EngineError::GameNotFound(game_id))?;
        validate_turn_action(game, caller, Role::Player)?;

        let status = game_loop::player_hit(game, &mut self.events)?;
        if status == GameStatus::ReadyToSettle {
            settlement::settle(game, &mut self.ledger, &mut self.events)?;
        }
        Ok(())
    }

    /// Игрок фиксирует активную руку.
    pub fn stand(&mut self, caller: AccountId, game_id: GameId) -> Result<(), EngineError> {
        let game = self
            .games
            .get_mut(&game_id)
            .ok_or(EngineError::GameNotFound(game_id))?;
        validate_turn_action(game, caller, Role::Player)?;

        let status = game_loop::player_stand(game, &mut self.events)?;
        if status == GameStatus::ReadyToSettle {
            settlement::settle(game, &mut self.ledger, &mut self.events)?;
        }
        Ok(())
    }

    /// Удвоение: требует довнесения, равного исходной ставке.
    pub fn double_down(
        &mut self,
        caller: AccountId,
        game_id: GameId,
        stake: Chips,
    ) -> Result<(), EngineError> {
        let game = self
            .games
            .get_mut(&game_id)
            .ok_or(EngineError::GameNotFound(game_id))?;
        validate_turn_action(game, caller, Role::Player)?;
        validate_double(game)?;
        if stake != game.bet_amount {
            return Err(EngineError::InvalidStake);
        }

        self.ledger.add_to_game(game_id, stake);
        let status = game_loop::player_double(game, &mut self.events)?;
        if status == GameStatus::ReadyToSettle {
            settlement::settle(game, &mut self.ledger, &mut self.events)?;
        }
        Ok(())
    }

    /// Сплит: требует довнесения, равного исходной ставке.
    pub fn split(
        &mut self,
        caller: AccountId,
        game_id: GameId,
        stake: Chips,
    ) -> Result<(), EngineError> {
        let game = self
            .games
            .get_mut(&game_id)
            .ok_or(EngineError::GameNotFound(game_id))?;
        validate_turn_action(game, caller, Role::Player)?;
        validate_split(game)?;
        if stake != game.bet_amount {
            return Err(EngineError::InvalidStake);
        }

        self.ledger.add_to_game(game_id, stake);
        game_loop::player_split(game, &mut self.events)?;
        Ok(())
    }

    // ------------------------------------------------------------------
    // Ходы дилера
    // ------------------------------------------------------------------

    /// Дилер берёт карту. Перебор дилера рассчитывает игру немедленно.
    pub fn dealer_hit(&mut self, caller: AccountId, game_id: GameId) -> Result<(), EngineError> {
        let game = self
            .games
            .get_mut(&game_id)
            .ok_or(EngineError::GameNotFound(game_id))?;
        validate_turn_action(game, caller, Role::Dealer)?;

        let status = game_loop::dealer_hit(game, &mut self.events)?;
        if status == GameStatus::ReadyToSettle {
            settlement::settle(game, &mut self.ledger, &mut self.events)?;
        }
        Ok(())
    }

    /// Дилер останавливается — игра синхронно уходит в расчёт.
    pub fn dealer_stand(&mut self, caller: AccountId, game_id: GameId) -> Result<(), EngineError> {
        let game = self
            .games
            .get_mut(&game_id)
            .ok_or(EngineError::GameNotFound(game_id))?;
        validate_turn_action(game, caller, Role::Dealer)?;

        let status = game_loop::dealer_stand(game, &mut self.events)?;
        if status == GameStatus::ReadyToSettle {
            settlement::settle(game, &mut self.ledger, &mut self.events)?;
        }
        Ok(())
    }

    // ------------------------------------------------------------------
    // Чтение
    // ------------------------------------------------------------------

    /// Игра по id (read-only снапшот текущего зафиксированного состояния).
    pub fn game(&self, game_id: GameId) -> Option<&Game> {
        self.games.get(&game_id)
    }

    /// Лобби по id.
    pub fn lobby(&self, lobby_id: LobbyId) -> Option<&Lobby> {
        self.lobbies.get(&lobby_id)
    }

    /// Результат завершённой игры.
    pub fn result_of(&self, game_id: GameId) -> Option<GameResult> {
        self.games.get(&game_id).and_then(|g| g.result)
    }

    /// Снять накопленные выплаты адреса.
    pub fn withdraw(&mut self, account: AccountId) -> Chips {
        self.ledger.withdraw(account)
    }
}
