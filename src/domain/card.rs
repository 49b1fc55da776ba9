use core::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::domain::CardId;

/// Масть карты.
#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "lowercase")]
pub enum Suit {
    Spades,   // ♠
    Hearts,   // ♥
    Diamonds, // ♦
    Clubs,    // ♣
}

impl Suit {
    pub const ALL: [Suit; 4] = [Suit::Spades, Suit::Hearts, Suit::Diamonds, Suit::Clubs];
}

/// Ранг карты. В 36-карточной колоде только 6..A.
#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq, Hash, Ord, PartialOrd)]
pub enum Rank {
    #[serde(rename = "6")]
    Six = 6,
    #[serde(rename = "7")]
    Seven,
    #[serde(rename = "8")]
    Eight,
    #[serde(rename = "9")]
    Nine,
    #[serde(rename = "10")]
    Ten,
    #[serde(rename = "J")]
    Jack,
    #[serde(rename = "Q")]
    Queen,
    #[serde(rename = "K")]
    King,
    #[serde(rename = "A")]
    Ace,
}

impl Rank {
    pub const ALL: [Rank; 9] = [
        Rank::Six,
        Rank::Seven,
        Rank::Eight,
        Rank::Nine,
        Rank::Ten,
        Rank::Jack,
        Rank::Queen,
        Rank::King,
        Rank::Ace,
    ];

    /// Числовое значение 6..=14.
    pub const fn value(self) -> u8 {
        self as u8
    }
}

/// Карта колоды. Идентичность – только по `id`,
/// масть и ранг – неизменяемые атрибуты.
#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq, Hash)]
pub struct Card {
    pub id: CardId,
    pub suit: Suit,
    pub rank: Rank,
}

impl Card {
    pub const fn new(id: CardId, rank: Rank, suit: Suit) -> Self {
        Self { id, suit, rank }
    }

    pub const fn value(&self) -> u8 {
        self.rank.value()
    }
}

/// Бьёт ли `defense` карту `attack` при козыре `trump`.
///
/// Да, если:
/// - та же масть и старше;
/// - защита козырная, а атака нет;
/// - обе козырные и защита старше.
///
/// Карта третьей (некозырной) масти не бьёт никогда.
pub fn beats(attack: &Card, defense: &Card, trump: Suit) -> bool {
    if defense.suit == attack.suit {
        return defense.value() > attack.value();
    }
    defense.suit == trump && attack.suit != trump
}

impl fmt::Display for Suit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let ch = match self {
            Suit::Spades => 's',
            Suit::Hearts => 'h',
            Suit::Diamonds => 'd',
            Suit::Clubs => 'c',
        };
        write!(f, "{ch}")
    }
}

impl fmt::Display for Rank {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Rank::Six => "6",
            Rank::Seven => "7",
            Rank::Eight => "8",
            Rank::Nine => "9",
            Rank::Ten => "T",
            Rank::Jack => "J",
            Rank::Queen => "Q",
            Rank::King => "K",
            Rank::Ace => "A",
        };
        f.write_str(s)
    }
}

impl fmt::Display for Card {
    /// Формат вида `Ah`, `Td`, `7c` (без id).
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", self.rank, self.suit)
    }
}

/// "Лицо" карты без идентичности: удобно в тестах и CLI.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct CardFace {
    pub rank: Rank,
    pub suit: Suit,
}

impl CardFace {
    pub const fn with_id(self, id: CardId) -> Card {
        Card::new(id, self.rank, self.suit)
    }
}

/// Парсинг строки вида "Ah", "Td", "7c".
impl FromStr for CardFace {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let mut chars = s.chars();
        let (r_ch, s_ch) = match (chars.next(), chars.next(), chars.next()) {
            (Some(r), Some(s), None) => (r, s),
            _ => return Err("Строка карты должна состоять из 2 символов".into()),
        };

        let rank = match r_ch {
            '6' => Rank::Six,
            '7' => Rank::Seven,
            '8' => Rank::Eight,
            '9' => Rank::Nine,
            'T' | 't' => Rank::Ten,
            'J' | 'j' => Rank::Jack,
            'Q' | 'q' => Rank::Queen,
            'K' | 'k' => Rank::King,
            'A' | 'a' => Rank::Ace,
            _ => return Err(format!("Неверный ранг: {r_ch}")),
        };

        let suit = match s_ch {
            's' | 'S' => Suit::Spades,
            'h' | 'H' => Suit::Hearts,
            'd' | 'D' => Suit::Diamonds,
            'c' | 'C' => Suit::Clubs,
            _ => return Err(format!("Неверная масть: {s_ch}")),
        };

        Ok(CardFace { rank, suit })
    }
}
