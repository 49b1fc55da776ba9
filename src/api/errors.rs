use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::domain::RoomId;
use crate::engine::{EngineError, ErrorKind, RegistryError};

/// Ошибки внешнего API (то, что отдаём клиенту).
#[derive(Clone, Debug, Error, Serialize, Deserialize, PartialEq, Eq)]
pub enum ApiError {
    /// Неправильные входные данные (например, битый JSON).
    #[error("Неверный формат сообщения: {0}")]
    BadRequest(String),

    /// Соединение ещё не вошло в комнату.
    #[error("Вы не в комнате")]
    NotJoined,

    /// Соединение уже привязано к комнате.
    #[error("Вы уже в комнате")]
    AlreadyJoined,

    /// Комната не найдена.
    #[error("Комната {0} не найдена")]
    RoomNotFound(RoomId),

    /// Комнату вытеснили ради новой – соединение больше ни к чему не привязано.
    #[error("Комната {0} закрыта")]
    RoomClosed(RoomId),

    /// Создать комнату сейчас нельзя.
    #[error("Партия уже идёт")]
    RoomsBusy,

    /// Отказ движка (текст – причина для игрока).
    #[error("{message}")]
    Rejected { kind: ErrorKind, message: String },
}

impl ApiError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            ApiError::BadRequest(_) | ApiError::NotJoined | ApiError::AlreadyJoined => {
                ErrorKind::Protocol
            }
            ApiError::RoomNotFound(_) | ApiError::RoomClosed(_) => ErrorKind::Resource,
            ApiError::RoomsBusy => ErrorKind::Legality,
            ApiError::Rejected { kind, .. } => *kind,
        }
    }
}

impl From<EngineError> for ApiError {
    fn from(err: EngineError) -> Self {
        ApiError::Rejected {
            kind: err.kind(),
            message: err.to_string(),
        }
    }
}

impl From<RegistryError> for ApiError {
    fn from(err: RegistryError) -> Self {
        match err {
            RegistryError::RoomNotFound(id) => ApiError::RoomNotFound(id),
            RegistryError::CapacityReached => ApiError::RoomsBusy,
            RegistryError::Engine(e) => e.into(),
        }
    }
}
