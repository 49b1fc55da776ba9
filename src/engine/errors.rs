use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::domain::{CardId, PileId, PlayerId};

/// Категория отказа. Все категории локальные: действие отклоняется,
/// состояние комнаты не меняется, комната продолжает жить.
#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum ErrorKind {
    /// Битое сообщение, неизвестный тип, действие до входа в комнату.
    Protocol,
    /// Не та роль для действия.
    Authorization,
    /// Нарушено правило автомата состояний.
    Legality,
    /// Карта или пара с таким id не найдена.
    Resource,
}

/// Ошибки движка дурака.
#[derive(Clone, Debug, Error, PartialEq, Eq)]
pub enum EngineError {
    #[error("Игрок {0} не состоит в этой комнате")]
    PlayerNotInRoom(PlayerId),

    #[error("Комната заполнена")]
    RoomFull,

    #[error("Партия в этой комнате уже идёт")]
    GameAlreadyStarted,

    #[error("Для начала партии нужно ровно два игрока")]
    NotEnoughPlayers,

    #[error("Партия не активна")]
    GameNotActive,

    #[error("Только атакующий может это сделать")]
    NotAttacker,

    #[error("Только защитник может это сделать")]
    NotDefender,

    #[error("Карты {0} нет на руке")]
    CardNotInHand(CardId),

    #[error("Пара {0} не найдена на столе")]
    PileNotFound(PileId),

    #[error("Эта атака уже отбита")]
    PileAlreadyDefended(PileId),

    #[error("Эта карта не бьёт атакующую")]
    CardDoesNotBeat,

    #[error("Ранг карты должен совпадать с рангом на столе")]
    RankNotOnTable,

    #[error("Достигнут лимит атак: {limit}")]
    AttackLimitReached { limit: usize },

    #[error("Защитник уже объявил, что берёт")]
    DefenderIsTaking,

    #[error("Переводы в этой комнате отключены")]
    TransfersDisabled,

    #[error("Переводить можно только до первого отбоя")]
    TransferAfterDefense,

    #[error("На столе нет карт")]
    TableEmpty,

    #[error("Не все атаки отбиты")]
    UndefendedPiles,
}

impl EngineError {
    /// Категория ошибки (для логов и клиента).
    pub fn kind(&self) -> ErrorKind {
        match self {
            EngineError::PlayerNotInRoom(_) => ErrorKind::Protocol,

            EngineError::NotAttacker | EngineError::NotDefender => ErrorKind::Authorization,

            EngineError::CardNotInHand(_) | EngineError::PileNotFound(_) => ErrorKind::Resource,

            EngineError::RoomFull
            | EngineError::GameAlreadyStarted
            | EngineError::NotEnoughPlayers
            | EngineError::GameNotActive
            | EngineError::PileAlreadyDefended(_)
            | EngineError::CardDoesNotBeat
            | EngineError::RankNotOnTable
            | EngineError::AttackLimitReached { .. }
            | EngineError::DefenderIsTaking
            | EngineError::TransfersDisabled
            | EngineError::TransferAfterDefense
            | EngineError::TableEmpty
            | EngineError::UndefendedPiles => ErrorKind::Legality,
        }
    }
}
