use serde::{Deserialize, Serialize};

use crate::domain::{CardId, PileId, PlayerId};

/// Тип действия игрока во время партии.
#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub enum PlayerActionKind {
    /// Зайти/подкинуть карту.
    Attack { card_id: CardId },
    /// Отбить конкретную пару.
    Defend { pile_id: PileId, card_id: CardId },
    /// Перевести атаку картой того же ранга.
    Transfer { card_id: CardId },
    /// Объявить "беру".
    Take,
    /// Закончить розыгрыш (бито или забрать).
    EndTurn,
}

/// Конкретное действие игрока.
#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct PlayerAction {
    /// Какой игрок действует.
    pub player_id: PlayerId,
    /// Само действие.
    pub kind: PlayerActionKind,
}

impl PlayerAction {
    pub fn new(player_id: PlayerId, kind: PlayerActionKind) -> Self {
        Self { player_id, kind }
    }
}
