//! Машина ходов: раздача, hit/stand/double/split, смена фаз и все
//! отказы по ролям, фазам и предусловиям.

use blackjack_engine::domain::card::Card;
use blackjack_engine::domain::chips::Chips;
use blackjack_engine::domain::game::{HandSlot, Turn};
use blackjack_engine::engine::{
    BlackjackEngine, EngineConfig, EngineError, EventKind, PlayerActionKind, RandomSource,
};

const DEALER: u64 = 1;
const PLAYER: u64 = 2;
const STRANGER: u64 = 9;

/// Тасовка-заглушка: колода остаётся в стандартном порядке,
/// раздача идёт сверху: Ks, Qs, Js, Ts, 9s, ...
#[derive(Default)]
struct DummyRng;

impl RandomSource for DummyRng {
    fn shuffle<T>(&mut self, _slice: &mut [T]) {
        // no-op
    }
}

/// Разворот колоды: раздача идёт с туза треф — Ac, 2c, 3c, 4c, 5c, ...
#[derive(Default)]
struct ReverseRng;

impl RandomSource for ReverseRng {
    fn shuffle<T>(&mut self, slice: &mut [T]) {
        slice.reverse();
    }
}

/// Тасовка, подкладывающая заданные карты наверх колоды: они раздаются
/// первыми в перечисленном порядке. Работает перестановкой индексов
/// стандартного порядка Deck::standard_52 (масти по 13 карт подряд),
/// остальная колода сохраняет исходный порядок.
struct StackedRng {
    top: Vec<Card>,
}

impl StackedRng {
    fn new(codes: &[&str]) -> Self {
        Self {
            top: codes.iter().map(|c| c.parse().expect("valid card")).collect(),
        }
    }

    fn standard_index(card: &Card) -> usize {
        (card.suit.code() as usize - 1) * 13 + (card.rank.code() as usize - 1)
    }
}

impl RandomSource for StackedRng {
    fn shuffle<T>(&mut self, slice: &mut [T]) {
        let n = slice.len();

        // target[i] — позиция, куда уезжает элемент с исходным индексом i.
        // Раздача снимает карты с конца, поэтому первая карта из top
        // ложится в самый конец.
        let mut target = vec![usize::MAX; n];
        for (k, card) in self.top.iter().enumerate() {
            target[Self::standard_index(card)] = n - 1 - k;
        }
        let mut cursor = 0;
        for t in target.iter_mut() {
            if *t == usize::MAX {
                *t = cursor;
                cursor += 1;
            }
        }

        // Перестановка по циклам.
        for i in 0..n {
            while target[i] != i {
                let j = target[i];
                slice.swap(i, j);
                target.swap(i, j);
            }
        }
    }
}

fn engine() -> BlackjackEngine {
    BlackjackEngine::new(EngineConfig {
        min_bet: Chips(10),
        max_bet: Chips(1_000_000),
    })
}

/// Лобби + join одной строкой; bet = 100, банк = 250.
fn start_game<R: RandomSource>(rng: &mut R) -> BlackjackEngine {
    let mut eng = engine();
    eng.create_lobby(DEALER, Chips(150), 0).unwrap();
    eng.join_lobby(PLAYER, 0, Chips(100), rng).unwrap();
    eng
}

fn cards(codes: &[&str]) -> Vec<Card> {
    codes.iter().map(|c| c.parse().unwrap()).collect()
}

//
// начальная раздача
//
#[test]
fn initial_deal_two_cards_each_player_first() {
    let eng = start_game(&mut DummyRng);
    let game = eng.game(0).unwrap();

    assert_eq!(game.player_hand.cards, cards(&["Ks", "Qs"]));
    assert_eq!(game.dealer_hand.cards, cards(&["Js", "Ts"]));
    assert_eq!(game.player_hand.score().total, 20);
    assert_eq!(game.dealer_hand.score().total, 20);
    assert_eq!(game.turn, Turn::Player);
    assert!(!game.is_complete);
}

#[test]
fn initial_deal_soft_hand() {
    let eng = start_game(&mut ReverseRng);
    let game = eng.game(0).unwrap();

    assert_eq!(game.player_hand.cards, cards(&["Ac", "2c"]));
    assert_eq!(game.dealer_hand.cards, cards(&["3c", "4c"]));
    let score = game.player_hand.score();
    assert_eq!(score.total, 13);
    assert!(score.is_soft);
}

//
// hit / stand
//
#[test]
fn player_hit_draws_into_active_hand() {
    let mut eng = start_game(&mut ReverseRng);
    eng.hit(PLAYER, 0).unwrap();

    let game = eng.game(0).unwrap();
    assert_eq!(game.player_hand.cards, cards(&["Ac", "2c", "5c"]));
    assert_eq!(game.player_hand.score().total, 18);
    assert_eq!(game.turn, Turn::Player, "не перебрал — ход остаётся");

    assert!(matches!(
        eng.events.poll_from(0).last().unwrap().kind,
        EventKind::PlayerActed {
            game_id: 0,
            action: PlayerActionKind::Hit
        }
    ));
}

#[test]
fn player_bust_settles_without_dealer_play() {
    let mut eng = start_game(&mut DummyRng);
    // 20 + 9s = перебор.
    eng.hit(PLAYER, 0).unwrap();

    let game = eng.game(0).unwrap();
    assert!(game.is_complete);
    assert!(game.player_hand.score().is_bust);
    assert_eq!(game.dealer_hand.len(), 2, "дилер не доигрывал");

    assert_eq!(eng.ledger.balance_of(DEALER), Chips(250));
    assert_eq!(eng.ledger.balance_of(PLAYER), Chips::ZERO);
    assert!(eng.ledger.is_conserved());

    let kinds: Vec<_> = eng.events.for_game(0);
    assert!(kinds
        .iter()
        .any(|e| matches!(e.kind, EventKind::HandBusted { game_id: 0 })));
    assert!(matches!(
        kinds.last().unwrap().kind,
        EventKind::GameComplete { .. }
    ));
}

#[test]
fn player_stand_passes_turn_to_dealer() {
    let mut eng = start_game(&mut DummyRng);
    eng.stand(PLAYER, 0).unwrap();

    let game = eng.game(0).unwrap();
    assert!(game.player_hand.held);
    assert_eq!(game.turn, Turn::Dealer);
    assert!(!game.is_complete);

    assert!(matches!(
        eng.events.poll_from(0).last().unwrap().kind,
        EventKind::DealerTurn { game_id: 0 }
    ));
}

#[test]
fn dealer_hit_and_bust_end_the_game() {
    let mut eng = start_game(&mut DummyRng);
    eng.stand(PLAYER, 0).unwrap();
    // Дилер на 20 берёт 9s и перебирает.
    eng.dealer_hit(DEALER, 0).unwrap();

    let game = eng.game(0).unwrap();
    assert!(game.is_complete);
    assert!(game.dealer_hand.score().is_bust);
    assert_eq!(eng.ledger.balance_of(PLAYER), Chips(200));
    assert_eq!(eng.ledger.balance_of(DEALER), Chips(50));
}

//
// проверки ролей и фаз
//
#[test]
fn actions_out_of_phase_are_rejected() {
    let mut eng = start_game(&mut DummyRng);

    // Фаза игрока: дилеру ходить рано.
    assert_eq!(eng.dealer_hit(DEALER, 0), Err(EngineError::WrongTurn));
    assert_eq!(eng.dealer_stand(DEALER, 0), Err(EngineError::WrongTurn));

    eng.stand(PLAYER, 0).unwrap();

    // Фаза дилера: игроку ходить поздно.
    assert_eq!(eng.hit(PLAYER, 0), Err(EngineError::WrongTurn));
    assert_eq!(eng.stand(PLAYER, 0), Err(EngineError::WrongTurn));
}

#[test]
fn actions_of_wrong_party_are_rejected() {
    let mut eng = start_game(&mut DummyRng);

    // Посторонний.
    assert_eq!(eng.hit(STRANGER, 0), Err(EngineError::NotAuthorized));
    // Дилер не может ходить за игрока (и наоборот): роль проверяется
    // раньше фазы.
    assert_eq!(eng.hit(DEALER, 0), Err(EngineError::NotAuthorized));
    assert_eq!(eng.dealer_hit(PLAYER, 0), Err(EngineError::NotAuthorized));
}

#[test]
fn actions_on_unknown_game_are_rejected() {
    let mut eng = engine();
    assert_eq!(eng.hit(PLAYER, 4), Err(EngineError::GameNotFound(4)));
}

#[test]
fn actions_after_completion_are_rejected() {
    let mut eng = start_game(&mut DummyRng);
    eng.hit(PLAYER, 0).unwrap(); // перебор, игра завершена

    assert_eq!(eng.hit(PLAYER, 0), Err(EngineError::GameFinished(0)));
    assert_eq!(eng.dealer_stand(DEALER, 0), Err(EngineError::GameFinished(0)));
}

//
// double down
//
#[test]
fn double_down_one_card_double_stake_forced_stand() {
    let mut eng = start_game(&mut ReverseRng);
    eng.double_down(PLAYER, 0, Chips(100)).unwrap();

    let game = eng.game(0).unwrap();
    assert_eq!(game.player_hand.cards, cards(&["Ac", "2c", "5c"]));
    assert!(game.player_hand.held, "после дабла рука зафиксирована");
    assert_eq!(game.player_hand.stake, Chips(200));
    assert_eq!(game.pot, Chips(350));
    assert_eq!(game.turn, Turn::Dealer);
    assert_eq!(eng.ledger.game_escrow_of(0), Chips(350));

    assert!(eng.events.for_game(0).iter().any(|e| matches!(
        e.kind,
        EventKind::PlayerActed {
            game_id: 0,
            action: PlayerActionKind::DoubleDown
        }
    )));
}

#[test]
fn double_down_bust_settles_immediately() {
    let mut eng = start_game(&mut DummyRng);
    // 20 + 9s = перебор одной картой дабла.
    eng.double_down(PLAYER, 0, Chips(100)).unwrap();

    let game = eng.game(0).unwrap();
    assert!(game.is_complete);
    // Банк 350 целиком уходит дилеру.
    assert_eq!(eng.ledger.balance_of(DEALER), Chips(350));
    assert_eq!(eng.ledger.balance_of(PLAYER), Chips::ZERO);
    assert!(eng.ledger.is_conserved());
}

#[test]
fn double_down_requires_exact_stake() {
    let mut eng = start_game(&mut ReverseRng);
    assert_eq!(
        eng.double_down(PLAYER, 0, Chips(50)),
        Err(EngineError::InvalidStake)
    );
    // Отказ не тронул ни игру, ни эскроу.
    assert_eq!(eng.game(0).unwrap().player_hand.len(), 2);
    assert_eq!(eng.ledger.game_escrow_of(0), Chips(250));
}

#[test]
fn double_down_only_on_untouched_two_card_hand() {
    let mut eng = start_game(&mut ReverseRng);
    eng.hit(PLAYER, 0).unwrap();
    assert_eq!(
        eng.double_down(PLAYER, 0, Chips(100)),
        Err(EngineError::DoubleNotAllowed)
    );
}

//
// split
//
#[test]
fn split_builds_two_hands_and_plays_both() {
    // Игроку — пара восьмёрок, дилеру 11, дальше мелочь по сценарию.
    let mut rng = StackedRng::new(&["8c", "8d", "5h", "6h", "2d", "3d", "9d", "Td"]);
    let mut eng = start_game(&mut rng);

    let game = eng.game(0).unwrap();
    assert_eq!(game.player_hand.cards, cards(&["8c", "8d"]));
    assert!(game.can_split());

    eng.split(PLAYER, 0, Chips(100)).unwrap();
    let game = eng.game(0).unwrap();
    assert_eq!(game.player_hand.cards, cards(&["8c", "2d"]));
    assert_eq!(
        game.split_hand.as_ref().unwrap().cards,
        cards(&["8d", "3d"])
    );
    assert_eq!(game.active_slot, HandSlot::Primary);
    assert_eq!(game.pot, Chips(350));
    assert_eq!(game.player_hand.stake, Chips(100));
    assert_eq!(game.split_hand.as_ref().unwrap().stake, Chips(100));
    assert_eq!(eng.ledger.game_escrow_of(0), Chips(350));

    // Основная рука: 8+2+9 = 19, stand → активной становится сплит-рука.
    eng.hit(PLAYER, 0).unwrap();
    eng.stand(PLAYER, 0).unwrap();
    let game = eng.game(0).unwrap();
    assert_eq!(game.active_slot, HandSlot::Split);
    assert_eq!(game.turn, Turn::Player);
    assert!(eng
        .events
        .for_game(0)
        .iter()
        .any(|e| matches!(e.kind, EventKind::SplitHandStarted { game_id: 0 })));

    // Сплит-рука: 8+3+T = 21, stand → ход дилера.
    eng.hit(PLAYER, 0).unwrap();
    eng.stand(PLAYER, 0).unwrap();
    let game = eng.game(0).unwrap();
    assert_eq!(game.turn, Turn::Dealer);

    // Дилер: 5+6+K = 21, stand → расчёт обеих рук против 21.
    eng.dealer_hit(DEALER, 0).unwrap();
    eng.dealer_stand(DEALER, 0).unwrap();

    let game = eng.game(0).unwrap();
    assert!(game.is_complete);
    let result = game.result.unwrap();
    // Основная 19 проиграла, сплит 21 — push: вернулась одна ставка.
    assert_eq!(result.player_payout, Chips(100));
    assert_eq!(result.dealer_payout, Chips(250));
    assert_eq!(eng.ledger.balance_of(PLAYER), Chips(100));
    assert_eq!(eng.ledger.balance_of(DEALER), Chips(250));
    assert!(eng.ledger.is_conserved());
}

#[test]
fn split_requires_a_pair() {
    let mut eng = start_game(&mut ReverseRng); // Ac + 2c — не пара
    assert_eq!(
        eng.split(PLAYER, 0, Chips(100)),
        Err(EngineError::SplitNotAllowed)
    );
}

#[test]
fn split_requires_exact_stake() {
    let mut rng = StackedRng::new(&["8c", "8d", "5h", "6h"]);
    let mut eng = start_game(&mut rng);
    assert_eq!(
        eng.split(PLAYER, 0, Chips(150)),
        Err(EngineError::InvalidStake)
    );
    assert_eq!(eng.ledger.game_escrow_of(0), Chips(250));
}

#[test]
fn no_resplit_and_no_double_after_split() {
    let mut rng = StackedRng::new(&["8c", "8d", "5h", "6h", "8h", "8s"]);
    let mut eng = start_game(&mut rng);
    eng.split(PLAYER, 0, Chips(100)).unwrap();

    // Основная рука снова пара восьмёрок — но ре-сплит запрещён.
    assert_eq!(
        eng.game(0).unwrap().player_hand.cards,
        cards(&["8c", "8h"])
    );
    assert_eq!(
        eng.split(PLAYER, 0, Chips(100)),
        Err(EngineError::SplitNotAllowed)
    );
    assert_eq!(
        eng.double_down(PLAYER, 0, Chips(100)),
        Err(EngineError::DoubleNotAllowed)
    );
}

#[test]
fn both_split_hands_busted_settle_without_dealer() {
    // Обе руки добираются до перебора картинками.
    let mut rng = StackedRng::new(&[
        "8c", "8d", "5h", "6h", "Kd", "Kh", "Qd", "Qh",
    ]);
    let mut eng = start_game(&mut rng);
    eng.split(PLAYER, 0, Chips(100)).unwrap();

    // Основная: 8+K = 18, добор Qd → 28, перебор; активной станет сплит.
    eng.hit(PLAYER, 0).unwrap();
    assert_eq!(eng.game(0).unwrap().active_slot, HandSlot::Split);

    // Сплит: 8+K = 18, добор Qh → 28, перебор обеих — расчёт без дилера.
    eng.hit(PLAYER, 0).unwrap();

    let game = eng.game(0).unwrap();
    assert!(game.is_complete);
    assert_eq!(game.dealer_hand.len(), 2);
    assert_eq!(eng.ledger.balance_of(DEALER), Chips(350));
    assert_eq!(eng.ledger.balance_of(PLAYER), Chips::ZERO);
}
