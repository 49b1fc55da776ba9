use serde::{Deserialize, Serialize};

use crate::domain::card::{Card, Rank, Suit};
use crate::domain::CardId;

/// Карты на руке у игрока. Порядок значения не имеет,
/// но сохраняется, чтобы отказ в действии не менял руку вообще.
#[derive(Clone, Debug, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct Hand {
    pub cards: Vec<Card>,
}

impl Hand {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.cards.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cards.is_empty()
    }

    pub fn get(&self, card_id: CardId) -> Option<&Card> {
        self.cards.iter().find(|c| c.id == card_id)
    }

    pub fn contains(&self, card_id: CardId) -> bool {
        self.get(card_id).is_some()
    }

    /// Убрать карту из руки. Вызывается только после того,
    /// как действие прошло все проверки.
    pub fn remove(&mut self, card_id: CardId) -> Option<Card> {
        let index = self.cards.iter().position(|c| c.id == card_id)?;
        Some(self.cards.remove(index))
    }

    pub fn push(&mut self, card: Card) {
        self.cards.push(card);
    }

    pub fn extend(&mut self, cards: impl IntoIterator<Item = Card>) {
        self.cards.extend(cards);
    }

    pub fn clear(&mut self) {
        self.cards.clear();
    }

    /// Младший козырь на руке (для выбора первого атакующего).
    pub fn lowest_trump(&self, trump: Suit) -> Option<Rank> {
        self.cards
            .iter()
            .filter(|c| c.suit == trump)
            .map(|c| c.rank)
            .min()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Card> {
        self.cards.iter()
    }
}
