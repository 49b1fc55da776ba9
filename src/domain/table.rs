use std::collections::HashSet;

use serde::{Deserialize, Serialize};

use crate::domain::card::{Card, Rank};
use crate::domain::PileId;

/// Одна пара на столе: атакующая карта и (возможно) отбой.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct Pile {
    pub id: PileId,
    pub attack: Card,
    /// None – карта ещё не отбита.
    pub defense: Option<Card>,
}

impl Pile {
    pub fn new(id: PileId, attack: Card) -> Self {
        Self {
            id,
            attack,
            defense: None,
        }
    }

    pub fn is_defended(&self) -> bool {
        self.defense.is_some()
    }
}

/// Стол текущего розыгрыша: упорядоченный список пар.
#[derive(Clone, Debug, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct Table {
    pub piles: Vec<Pile>,
}

impl Table {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.piles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.piles.is_empty()
    }

    pub fn pile(&self, pile_id: PileId) -> Option<&Pile> {
        self.piles.iter().find(|p| p.id == pile_id)
    }

    pub fn pile_mut(&mut self, pile_id: PileId) -> Option<&mut Pile> {
        self.piles.iter_mut().find(|p| p.id == pile_id)
    }

    /// Все ли пары отбиты (на пустом столе – false).
    pub fn all_defended(&self) -> bool {
        !self.piles.is_empty() && self.piles.iter().all(Pile::is_defended)
    }

    pub fn any_defended(&self) -> bool {
        self.piles.iter().any(Pile::is_defended)
    }

    pub fn any_undefended(&self) -> bool {
        self.piles.iter().any(|p| !p.is_defended())
    }

    /// Ранги, которые уже "в игре": и атакующие, и отбойные карты.
    pub fn ranks_in_play(&self) -> HashSet<Rank> {
        let mut ranks = HashSet::new();
        for pile in &self.piles {
            ranks.insert(pile.attack.rank);
            if let Some(defense) = &pile.defense {
                ranks.insert(defense.rank);
            }
        }
        ranks
    }

    pub fn card_count(&self) -> usize {
        self.piles
            .iter()
            .map(|p| 1 + usize::from(p.is_defended()))
            .sum()
    }

    /// Снять все карты со стола (атаки и отбои) и очистить его.
    pub fn sweep(&mut self) -> Vec<Card> {
        let mut cards = Vec::with_capacity(self.card_count());
        for pile in self.piles.drain(..) {
            cards.push(pile.attack);
            if let Some(defense) = pile.defense {
                cards.push(defense);
            }
        }
        cards
    }
}
