use serde::{Deserialize, Serialize};

use crate::domain::card::{Card, Suit};
use crate::domain::deck::Deck;
use crate::domain::player::Player;
use crate::domain::table::Table;
use crate::domain::{CardId, PlayerId, RoomId};

/// Максимум игроков в комнате.
pub const MAX_PLAYERS: usize = 2;

/// Статус комнаты.
#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum RoomStatus {
    /// Ждём второго игрока.
    Waiting,
    /// Идёт партия.
    Playing,
    /// Партия закончена, есть `result`.
    Finished,
}

/// Настройки комнаты – задаются при создании и больше не меняются.
#[derive(Clone, Copy, Debug, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct RoomSettings {
    /// Разрешён ли перевод ("переводной" дурак).
    pub perevod: bool,
}

/// Фаза розыгрыша.
#[derive(Clone, Copy, Debug, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum Phase {
    #[default]
    Attacking,
    /// Защитник объявил "беру", атакующий ещё может подкинуть.
    Taking,
}

/// Упорядоченная пара ролей (атакующий, защитник).
#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct Roles {
    pub attacker: PlayerId,
    pub defender: PlayerId,
}

impl Roles {
    pub fn new(attacker: PlayerId, defender: PlayerId) -> Self {
        Self { attacker, defender }
    }

    pub fn swap(&mut self) {
        std::mem::swap(&mut self.attacker, &mut self.defender);
    }
}

/// Итог партии.
#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq)]
#[serde(tag = "outcome", rename_all = "lowercase")]
pub enum GameResult {
    Win {
        #[serde(rename = "winnerId")]
        winner_id: PlayerId,
        #[serde(rename = "loserId")]
        loser_id: PlayerId,
    },
    Draw,
}

/// Комната – корневой агрегат игры.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct Room {
    pub id: RoomId,
    pub status: RoomStatus,
    pub settings: RoomSettings,

    /// 0..=2 игроков, в порядке входа.
    pub players: Vec<Player>,

    pub deck: Deck,
    pub trump_card: Option<Card>,
    pub trump_suit: Option<Suit>,

    pub table: Table,
    pub discard: Vec<Card>,

    pub phase: Phase,
    /// Лимит пар, зафиксированный на первом ходу розыгрыша.
    pub round_limit: Option<usize>,

    /// None – пока партия не началась.
    pub roles: Option<Roles>,
    pub result: Option<GameResult>,
}

impl Room {
    /// Пустая комната в статусе `waiting`.
    pub fn new(id: RoomId, settings: RoomSettings) -> Self {
        Self {
            id,
            status: RoomStatus::Waiting,
            settings,
            players: Vec::with_capacity(MAX_PLAYERS),
            deck: Deck::default(),
            trump_card: None,
            trump_suit: None,
            table: Table::new(),
            discard: Vec::new(),
            phase: Phase::Attacking,
            round_limit: None,
            roles: None,
            result: None,
        }
    }

    pub fn is_full(&self) -> bool {
        self.players.len() >= MAX_PLAYERS
    }

    pub fn player(&self, player_id: PlayerId) -> Option<&Player> {
        self.players.iter().find(|p| p.id == player_id)
    }

    pub fn player_mut(&mut self, player_id: PlayerId) -> Option<&mut Player> {
        self.players.iter_mut().find(|p| p.id == player_id)
    }

    pub fn opponent_of(&self, player_id: PlayerId) -> Option<&Player> {
        self.players.iter().find(|p| p.id != player_id)
    }

    pub fn attacker_id(&self) -> Option<PlayerId> {
        self.roles.map(|r| r.attacker)
    }

    pub fn defender_id(&self) -> Option<PlayerId> {
        self.roles.map(|r| r.defender)
    }

    pub fn attacker(&self) -> Option<&Player> {
        self.attacker_id().and_then(|id| self.player(id))
    }

    pub fn defender(&self) -> Option<&Player> {
        self.defender_id().and_then(|id| self.player(id))
    }

    pub fn is_first_round(&self) -> bool {
        self.discard.is_empty()
    }

    /// Все id карт во всех местах (руки, стол, колода, бито).
    /// Используется для проверки сохранения карт.
    pub fn all_card_ids(&self) -> Vec<CardId> {
        let mut ids: Vec<CardId> = Vec::new();
        for player in &self.players {
            ids.extend(player.hand.iter().map(|c| c.id));
        }
        for pile in &self.table.piles {
            ids.push(pile.attack.id);
            if let Some(defense) = &pile.defense {
                ids.push(defense.id);
            }
        }
        ids.extend(self.deck.cards.iter().map(|c| c.id));
        ids.extend(self.discard.iter().map(|c| c.id));
        ids
    }
}
