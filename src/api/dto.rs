use serde::{Deserialize, Serialize};

use crate::domain::card::{Card, Rank, Suit};
use crate::domain::room::{GameResult, Phase, RoomSettings, RoomStatus};
use crate::domain::table::Pile;
use crate::domain::{CardId, PileId, PlayerId, RoomId};
use crate::engine::hints::ActionHints;

/// DTO карты: вместе с числовым значением, чтобы фронт не считал сам.
#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct CardDto {
    pub id: CardId,
    pub suit: Suit,
    pub rank: Rank,
    pub value: u8,
}

impl From<&Card> for CardDto {
    fn from(card: &Card) -> Self {
        Self {
            id: card.id,
            suit: card.suit,
            rank: card.rank,
            value: card.value(),
        }
    }
}

/// DTO пары на столе. Стол виден обоим игрокам целиком.
#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct PileDto {
    pub id: PileId,
    pub attack: CardDto,
    pub defense: Option<CardDto>,
}

impl From<&Pile> for PileDto {
    fn from(pile: &Pile) -> Self {
        Self {
            id: pile.id,
            attack: CardDto::from(&pile.attack),
            defense: pile.defense.as_ref().map(CardDto::from),
        }
    }
}

/// Игрок глазами любого участника: только число карт.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct PlayerSummaryDto {
    pub id: PlayerId,
    pub name: String,
    pub hand_count: usize,
}

/// Снэпшот комнаты для конкретного игрока.
///
/// Своя рука – полностью, рука соперника – только размер,
/// колода и бито – только размер.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct RoomStateDto {
    pub room_id: RoomId,
    pub status: RoomStatus,
    pub settings: RoomSettings,
    pub you_id: PlayerId,
    pub players: Vec<PlayerSummaryDto>,
    pub your_hand: Vec<CardDto>,
    pub opponent_hand_count: usize,
    pub attacker_id: Option<PlayerId>,
    pub defender_id: Option<PlayerId>,
    pub table: Vec<PileDto>,
    pub deck_count: usize,
    pub trump_card: Option<CardDto>,
    pub trump_suit: Option<Suit>,
    pub discard_count: usize,
    pub phase: Phase,
    /// Текущий лимит пар (0 – пока партия не идёт).
    pub attack_limit: usize,
    pub action_hints: ActionHints,
    pub result: Option<GameResult>,
}

/// Краткая информация о комнате (для HTTP lookup).
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct RoomSummaryDto {
    pub room_id: RoomId,
    pub status: RoomStatus,
    pub settings: RoomSettings,
    pub players: usize,
}

/// Исходящее сообщение в соединение игрока.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ServerMessage {
    /// Новый снэпшот после принятого изменения.
    State(Box<RoomStateDto>),

    /// Отказ – только в исходное соединение.
    Error { message: String },
}

impl ServerMessage {
    pub fn error(message: impl Into<String>) -> Self {
        ServerMessage::Error {
            message: message.into(),
        }
    }
}
