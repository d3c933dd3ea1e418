use serde::{Deserialize, Serialize};

use crate::domain::card::Card;
use crate::domain::chips::Chips;

/// Итог подсчёта руки.
#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct HandScore {
    /// Лучшее значение руки (после понижения тузов).
    pub total: u32,
    /// Мягкая рука: хотя бы один туз всё ещё считается как 11.
    pub is_soft: bool,
    /// Перебор: итог больше 21.
    pub is_bust: bool,
    /// Натуральный блэкджек: ровно две карты и итог 21.
    pub is_blackjack: bool,
}

/// Рука одной стороны (игрока, дилера или сплит-руки игрока) в одной игре.
///
/// Карты только добавляются — движок никогда не убирает карту из руки
/// (единственное исключение: сплит переносит вторую карту пары в новую
/// руку в момент её создания).
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct Hand {
    pub cards: Vec<Card>,
    /// Ставка, которая едет на этой конкретной руке:
    /// bet, bet×2 после дабла, по bet на каждую сплит-руку.
    pub stake: Chips,
    /// Игрок зафиксировал руку (stand или принудительный stand после дабла).
    pub held: bool,
}

impl Hand {
    pub fn new(stake: Chips) -> Self {
        Self {
            cards: Vec::new(),
            stake,
            held: false,
        }
    }

    /// Рука из готового набора карт (сплит, тесты).
    pub fn with_cards(cards: Vec<Card>, stake: Chips) -> Self {
        Self {
            cards,
            stake,
            held: false,
        }
    }

    pub fn push(&mut self, card: Card) {
        self.cards.push(card);
    }

    pub fn len(&self) -> usize {
        self.cards.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cards.is_empty()
    }

    /// Подсчёт руки по правилам блэкджека:
    /// - картинки дают 10, тузы сначала считаются как 11;
    /// - пока итог больше 21 и есть туз, засчитанный как 11,
    ///   один туз понижается до 1 (минус 10 от итога);
    /// - мягкой рука остаётся, если после понижений хотя бы один туз
    ///   всё ещё стоит 11.
    pub fn score(&self) -> HandScore {
        let mut total: u32 = 0;
        let mut aces_high: u32 = 0;

        for card in &self.cards {
            total += card.rank.base_value();
            if card.is_ace() {
                aces_high += 1;
            }
        }

        while total > 21 && aces_high > 0 {
            total -= 10;
            aces_high -= 1;
        }

        HandScore {
            total,
            is_soft: aces_high > 0,
            is_bust: total > 21,
            is_blackjack: self.cards.len() == 2 && total == 21,
        }
    }

    /// Рука разыграна до конца: игрок её зафиксировал либо перебрал.
    pub fn is_resolved(&self) -> bool {
        self.held || self.score().is_bust
    }

    /// Пара одинакового ранга (условие сплита).
    pub fn is_splittable_pair(&self) -> bool {
        self.cards.len() == 2 && self.cards[0].rank == self.cards[1].rank
    }
}
