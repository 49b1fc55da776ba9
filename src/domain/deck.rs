use serde::{Deserialize, Serialize};

use crate::domain::card::{Card, Rank, Suit};
use crate::domain::CardId;

/// Размер колоды для дурака.
pub const DECK_SIZE: usize = 36;

/// Колода карт. В домене – просто упорядоченный список карт.
/// Перемешивание делает engine (через RNG из infra), НЕ здесь.
///
/// Верх колоды – конец вектора (`draw_one` снимает оттуда),
/// низ колоды (`cards[0]`) – открытый козырь, который достаётся последним.
#[derive(Clone, Debug, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct Deck {
    pub cards: Vec<Card>,
}

impl Deck {
    /// 36-карточная колода в порядке:
    /// Spades 6..A, Hearts 6..A, Diamonds 6..A, Clubs 6..A.
    ///
    /// Идентификаторы выдаёт `next_id` – каждый вызов даёт новую колоду
    /// со свежими id.
    pub fn durak_36(mut next_id: impl FnMut() -> CardId) -> Self {
        let mut cards = Vec::with_capacity(DECK_SIZE);
        for suit in Suit::ALL {
            for rank in Rank::ALL {
                cards.push(Card::new(next_id(), rank, suit));
            }
        }
        Deck { cards }
    }

    pub fn len(&self) -> usize {
        self.cards.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cards.is_empty()
    }

    /// Взять одну карту сверху колоды.
    pub fn draw_one(&mut self) -> Option<Card> {
        self.cards.pop()
    }

    /// Нижняя карта – её открывают как козырь.
    pub fn bottom(&self) -> Option<&Card> {
        self.cards.first()
    }

    pub fn clear(&mut self) {
        self.cards.clear();
    }
}
