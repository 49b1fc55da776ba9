use serde::{Deserialize, Serialize};

use crate::domain::room::RoomSettings;
use crate::domain::{CardId, PileId, PlayerId, RoomId};
use crate::engine::actions::{PlayerAction, PlayerActionKind};

/// Входящее сообщение от соединения игрока.
///
/// JSON вида `{"type": "defend", "pileId": 3, "cardId": 17}`.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ClientMessage {
    /// Привязать соединение к комнате.
    Join {
        #[serde(rename = "roomId")]
        room_id: RoomId,
        /// Имя необязательно – подставим "Player N".
        #[serde(default)]
        name: Option<String>,
    },

    Attack {
        #[serde(rename = "cardId")]
        card_id: CardId,
    },

    Defend {
        #[serde(rename = "pileId")]
        pile_id: PileId,
        #[serde(rename = "cardId")]
        card_id: CardId,
    },

    /// Только если в комнате включён `perevod`.
    Transfer {
        #[serde(rename = "cardId")]
        card_id: CardId,
    },

    Take,

    EndTurn,
}

impl ClientMessage {
    /// Игровое действие для движка. Для `Join` – None.
    pub fn to_action(&self, player_id: PlayerId) -> Option<PlayerAction> {
        let kind = match *self {
            ClientMessage::Join { .. } => return None,
            ClientMessage::Attack { card_id } => PlayerActionKind::Attack { card_id },
            ClientMessage::Defend { pile_id, card_id } => {
                PlayerActionKind::Defend { pile_id, card_id }
            }
            ClientMessage::Transfer { card_id } => PlayerActionKind::Transfer { card_id },
            ClientMessage::Take => PlayerActionKind::Take,
            ClientMessage::EndTurn => PlayerActionKind::EndTurn,
        };
        Some(PlayerAction::new(player_id, kind))
    }
}

/// Команда создания комнаты (приходит из HTTP-слоя).
#[derive(Clone, Debug, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct CreateRoomCommand {
    #[serde(default)]
    pub perevod: bool,
}

impl CreateRoomCommand {
    pub fn settings(&self) -> RoomSettings {
        RoomSettings {
            perevod: self.perevod,
        }
    }
}
