use crate::domain::chips::Chips;
use crate::domain::game::{Game, GameResult, Outcome};
use crate::domain::hand::HandScore;
use crate::engine::errors::EngineError;
use crate::engine::events::{EventKind, EventLog};
use crate::engine::ledger::EscrowLedger;

/// Расчёт одной игры. Выполняется ровно один раз, синхронно, в момент
/// достижения терминального состояния: натуральный блэкджек при
/// раздаче, перебор всех рук игрока, перебор дилера или stand дилера.
///
/// Атомарность: сначала полностью считается результат, затем эскроу
/// выпускается одной сбалансированной операцией ledger. Если выпуск
/// не сходится, игра остаётся незавершённой, средства — в эскроу.
pub fn settle(
    game: &mut Game,
    ledger: &mut EscrowLedger,
    events: &mut EventLog,
) -> Result<GameResult, EngineError> {
    if game.is_complete {
        return Err(EngineError::GameFinished(game.id));
    }

    let dealer_score = game.dealer_hand.score();

    // Каждая рука игрока (основная и сплит) сравнивается с единственной
    // рукой дилера независимо, со своей собственной ставкой.
    let mut player_payout = Chips::ZERO;
    let mut player_staked = Chips::ZERO;

    let hands: Vec<&crate::domain::hand::Hand> = match &game.split_hand {
        Some(split) => vec![&game.player_hand, split],
        None => vec![&game.player_hand],
    };

    for hand in hands {
        player_staked += hand.stake;
        match hand_outcome(hand.score(), dealer_score) {
            // Выигрыш платит 2× ставку этой руки.
            Outcome::PlayerWins => player_payout += Chips(hand.stake.0 * 2),
            // Push возвращает ставку.
            Outcome::Push => player_payout += hand.stake,
            // Проигранная ставка достаётся дилеру вместе с остатком банка.
            Outcome::DealerWins => {}
        }
    }

    // Банк берём из ledger — он первоисточник по средствам.
    let pot = ledger.game_escrow_of(game.id);

    // Стейк дилера 1.5× не покрывает двойной выигрыш по даблу/сплиту,
    // поэтому выплата игроку ограничена банком: расчёт всегда ровно
    // сохраняет эскроу, ничего не создавая и не сжигая.
    if player_payout > pot {
        player_payout = pot;
    }
    let dealer_payout = pot - player_payout;

    let outcome = if player_payout > player_staked {
        Outcome::PlayerWins
    } else if player_payout == player_staked {
        Outcome::Push
    } else {
        Outcome::DealerWins
    };

    ledger.release_game(
        game.id,
        game.player,
        player_payout,
        game.dealer,
        dealer_payout,
    )?;

    let result = GameResult {
        outcome,
        player_score: game.player_hand.score().total,
        dealer_score: dealer_score.total,
        player_payout,
        dealer_payout,
    };

    game.result = Some(result);
    game.is_complete = true;

    events.push(EventKind::GameComplete {
        game_id: game.id,
        outcome,
        player_score: result.player_score,
        dealer_score: result.dealer_score,
        player_payout,
        dealer_payout,
    });

    Ok(result)
}

/// Сравнение одной руки игрока с рукой дилера:
/// - перебор проигрывает любой не-перебранной руке;
/// - из двух не-перебранных выигрывает больший итог, равные — push;
/// - натуральный блэкджек из двух карт бьёт не-натуральные 21.
fn hand_outcome(hand: HandScore, dealer: HandScore) -> Outcome {
    if hand.is_bust {
        return Outcome::DealerWins;
    }
    if dealer.is_bust {
        return Outcome::PlayerWins;
    }
    if hand.is_blackjack && !dealer.is_blackjack {
        return Outcome::PlayerWins;
    }
    if dealer.is_blackjack && !hand.is_blackjack {
        return Outcome::DealerWins;
    }
    if hand.total > dealer.total {
        Outcome::PlayerWins
    } else if hand.total < dealer.total {
        Outcome::DealerWins
    } else {
        Outcome::Push
    }
}
