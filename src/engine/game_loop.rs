use crate::domain::card::Card;
use crate::domain::game::{Game, HandSlot, Turn};
use crate::domain::hand::Hand;
use crate::engine::actions::{DealerActionKind, PlayerActionKind};
use crate::engine::errors::EngineError;
use crate::engine::events::{EventKind, EventLog};

/// Статус игры после применённого действия.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum GameStatus {
    /// Игра продолжается (возможно, ход уже у дилера).
    Ongoing,
    /// Достигнуто терминальное состояние — менеджер обязан немедленно
    /// запустить расчёт (engine::settlement).
    ReadyToSettle,
}

/// Снять следующую карту с приватной колоды игры.
///
/// Пустая колода при 52 картах и реальных размерах рук недостижима,
/// поэтому DeckExhausted трактуется как фатальное нарушение инварианта.
pub fn draw_card(game: &mut Game) -> Result<Card, EngineError> {
    game.deck
        .draw_one()
        .ok_or(EngineError::DeckExhausted(game.id))
}

/// Положить карту в руку игрока (активную) или дилера и записать событие.
fn deal_into(game: &mut Game, to_dealer: bool, events: &mut EventLog) -> Result<Card, EngineError> {
    let card = draw_card(game)?;
    if to_dealer {
        game.dealer_hand.push(card);
    } else {
        game.active_hand_mut().push(card);
    }
    events.push(EventKind::CardDealt {
        game_id: game.id,
        card,
        is_dealer: to_dealer,
    });
    Ok(card)
}

/// Начальная раздача: по две карты игроку и дилеру (CardDealt ×4).
///
/// Если хотя бы одна рука — натуральный блэкджек, игра завершается
/// сразу (ReadyToSettle), до хода игрока дело не доходит. Иначе ход
/// остаётся у игрока и пишется событие PlayerTurn.
pub fn deal_initial(game: &mut Game, events: &mut EventLog) -> Result<GameStatus, EngineError> {
    deal_into(game, false, events)?;
    deal_into(game, false, events)?;
    deal_into(game, true, events)?;
    deal_into(game, true, events)?;

    let player = game.player_hand.score();
    let dealer = game.dealer_hand.score();
    if player.is_blackjack || dealer.is_blackjack {
        return Ok(GameStatus::ReadyToSettle);
    }

    game.turn = Turn::Player;
    events.push(EventKind::PlayerTurn { game_id: game.id });
    Ok(GameStatus::Ongoing)
}

/// Игрок берёт карту в активную руку.
pub fn player_hit(game: &mut Game, events: &mut EventLog) -> Result<GameStatus, EngineError> {
    deal_into(game, false, events)?;
    events.push(EventKind::PlayerActed {
        game_id: game.id,
        action: PlayerActionKind::Hit,
    });

    if game.active_hand().score().is_bust {
        events.push(EventKind::HandBusted { game_id: game.id });
        return Ok(advance_after_resolution(game, events));
    }
    Ok(GameStatus::Ongoing)
}

/// Игрок фиксирует активную руку.
pub fn player_stand(game: &mut Game, events: &mut EventLog) -> Result<GameStatus, EngineError> {
    game.active_hand_mut().held = true;
    events.push(EventKind::PlayerActed {
        game_id: game.id,
        action: PlayerActionKind::Stand,
    });
    Ok(advance_after_resolution(game, events))
}

/// Удвоение: ставка руки растёт на bet, сдаётся ровно одна карта,
/// рука немедленно фиксируется (второй раз взять нельзя).
///
/// Предусловия (can_double, размер довнесения) уже проверил менеджер,
/// он же довнёс средства в эскроу; здесь только мутация игры.
pub fn player_double(game: &mut Game, events: &mut EventLog) -> Result<GameStatus, EngineError> {
    let bet = game.bet_amount;
    game.pot += bet;
    game.player_hand.stake += bet;

    deal_into(game, false, events)?;
    events.push(EventKind::PlayerActed {
        game_id: game.id,
        action: PlayerActionKind::DoubleDown,
    });

    if game.player_hand.score().is_bust {
        events.push(EventKind::HandBusted { game_id: game.id });
    }
    game.player_hand.held = true;
    Ok(advance_after_resolution(game, events))
}

/// Сплит: пара распадается на две руки по одной карте, каждая тут же
/// получает вторую карту. Активной остаётся основная рука; сплит-рука
/// ждёт своей очереди. Ре-сплит не поддерживается.
pub fn player_split(game: &mut Game, events: &mut EventLog) -> Result<GameStatus, EngineError> {
    let bet = game.bet_amount;
    game.pot += bet;

    let second = game
        .player_hand
        .cards
        .pop()
        .expect("can_split гарантирует две карты в руке");
    game.split_hand = Some(Hand::with_cards(vec![second], bet));

    events.push(EventKind::PlayerActed {
        game_id: game.id,
        action: PlayerActionKind::Split,
    });

    // По одной карте в каждую руку: сперва в основную, затем в сплит.
    game.active_slot = HandSlot::Primary;
    deal_into(game, false, events)?;
    game.active_slot = HandSlot::Split;
    deal_into(game, false, events)?;
    game.active_slot = HandSlot::Primary;

    Ok(GameStatus::Ongoing)
}

/// Дилер берёт карту. Перебор дилера — терминальное состояние.
pub fn dealer_hit(game: &mut Game, events: &mut EventLog) -> Result<GameStatus, EngineError> {
    deal_into(game, true, events)?;
    events.push(EventKind::DealerActed {
        game_id: game.id,
        action: DealerActionKind::Hit,
    });

    if game.dealer_hand.score().is_bust {
        events.push(EventKind::HandBusted { game_id: game.id });
        return Ok(GameStatus::ReadyToSettle);
    }
    Ok(GameStatus::Ongoing)
}

/// Дилер останавливается — игра уходит в расчёт.
pub fn dealer_stand(game: &mut Game, events: &mut EventLog) -> Result<GameStatus, EngineError> {
    game.dealer_hand.held = true;
    events.push(EventKind::DealerActed {
        game_id: game.id,
        action: DealerActionKind::Stand,
    });
    Ok(GameStatus::ReadyToSettle)
}

/// Продвижение после того, как активная рука игрока разыграна
/// (stand, дабл или перебор):
/// - есть неразыгранная сплит-рука → она становится активной;
/// - все руки перебрали → расчёт без участия дилера;
/// - иначе ход переходит к дилеру.
fn advance_after_resolution(game: &mut Game, events: &mut EventLog) -> GameStatus {
    if game.active_slot == HandSlot::Primary {
        if let Some(split) = &game.split_hand {
            if !split.is_resolved() {
                game.active_slot = HandSlot::Split;
                events.push(EventKind::SplitHandStarted { game_id: game.id });
                return GameStatus::Ongoing;
            }
        }
    }

    if game.all_player_hands_busted() {
        return GameStatus::ReadyToSettle;
    }

    game.turn = Turn::Dealer;
    events.push(EventKind::DealerTurn { game_id: game.id });
    GameStatus::Ongoing
}
