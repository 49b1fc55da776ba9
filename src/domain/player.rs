use serde::{Deserialize, Serialize};

use crate::domain::hand::Hand;
use crate::domain::PlayerId;

/// Игрок в комнате. Живёт от join до отключения/удаления комнаты.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct Player {
    pub id: PlayerId,
    /// Отображаемое имя (уже очищенное).
    pub name: String,
    pub hand: Hand,
}

impl Player {
    pub fn new(id: PlayerId, name: String) -> Self {
        Self {
            id,
            name,
            hand: Hand::new(),
        }
    }
}
