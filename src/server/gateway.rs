use std::collections::BTreeMap;

use serde_json::Value;
use tracing::{debug, warn};

use crate::api::commands::{ClientMessage, CreateRoomCommand};
use crate::api::dto::ServerMessage;
use crate::api::errors::ApiError;
use crate::api::queries::{answer_query, build_room_view, Query, QueryResponse};
use crate::config::ServerConfig;
use crate::domain::{PlayerId, RoomId};
use crate::engine::{ActionOutcome, LeaveOutcome, RandomSource, RoomRegistry};
use crate::infra::ConfiguredRng;

/// Идентификатор соединения (выдаёт транспорт).
pub type ConnectionId = u64;

/// Сообщение, которое транспорт должен отправить в соединение `conn`.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Outbound {
    pub conn: ConnectionId,
    pub message: ServerMessage,
}

/// Результат создания комнаты: id и уведомления соединениям вытесненной комнаты.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RoomCreated {
    pub room_id: RoomId,
    pub notices: Vec<Outbound>,
}

/// Привязка соединения после `join`.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Binding {
    pub room_id: RoomId,
    pub player_id: PlayerId,
}

/// Протокольный шлюз: сырой текст соединения → действие движка → исходящие сообщения.
///
/// После принятого изменения – снэпшот каждому игроку комнаты,
/// при отказе – одна ошибка только в исходное соединение.
pub struct Gateway<R: RandomSource> {
    registry: RoomRegistry<R>,
    bindings: BTreeMap<ConnectionId, Binding>,
}

impl Gateway<ConfiguredRng> {
    /// Шлюз по конфигу процесса.
    pub fn from_config(config: &ServerConfig) -> Self {
        let registry = RoomRegistry::new(ConfiguredRng::new(config.seed))
            .with_max_rooms(config.max_rooms)
            .with_name_max_len(config.name_max_len);
        Self::new(registry)
    }
}

impl<R: RandomSource> Gateway<R> {
    pub fn new(registry: RoomRegistry<R>) -> Self {
        Self {
            registry,
            bindings: BTreeMap::new(),
        }
    }

    pub fn registry(&self) -> &RoomRegistry<R> {
        &self.registry
    }

    pub fn registry_mut(&mut self) -> &mut RoomRegistry<R> {
        &mut self.registry
    }

    pub fn binding(&self, conn: ConnectionId) -> Option<Binding> {
        self.bindings.get(&conn).copied()
    }

    /// Создать комнату. Если ради неё вытеснена старая комната,
    /// её соединения отвязываются и получают ошибку "комната закрыта".
    pub fn create_room(&mut self, command: &CreateRoomCommand) -> Result<RoomCreated, ApiError> {
        let room_id = self.registry.create_room(command.settings())?;

        let registry = &self.registry;
        let mut notices = Vec::new();
        self.bindings.retain(|conn, b| {
            if registry.has_room(b.room_id) {
                return true;
            }
            debug!(conn = *conn, room_id = b.room_id, "binding dropped with evicted room");
            notices.push(error_to(*conn, &ApiError::RoomClosed(b.room_id)));
            false
        });

        Ok(RoomCreated { room_id, notices })
    }

    /// Запрос "только чтение" по комнате из самого запроса.
    pub fn query(&self, query: &Query) -> QueryResponse {
        answer_query(|room_id| self.registry.room(room_id), query)
    }

    /// Разобрать текст и обработать сообщение.
    pub fn handle_text(&mut self, conn: ConnectionId, text: &str) -> Vec<Outbound> {
        match parse_message(text) {
            Ok(message) => self.handle_message(conn, message),
            Err(err) => {
                warn!(conn, reason = %err, "malformed message");
                vec![error_to(conn, &err)]
            }
        }
    }

    pub fn handle_message(&mut self, conn: ConnectionId, message: ClientMessage) -> Vec<Outbound> {
        match self.dispatch(conn, &message) {
            Ok(room_id) => self.broadcast(room_id),
            Err(err) => {
                debug!(conn, kind = ?err.kind(), reason = %err, "message rejected");
                vec![error_to(conn, &err)]
            }
        }
    }

    fn dispatch(&mut self, conn: ConnectionId, message: &ClientMessage) -> Result<RoomId, ApiError> {
        if let ClientMessage::Join { room_id, name } = message {
            return self.join(conn, *room_id, name.as_deref());
        }

        let binding = self.bindings.get(&conn).copied().ok_or(ApiError::NotJoined)?;
        let action = message
            .to_action(binding.player_id)
            .ok_or_else(|| ApiError::BadRequest("join".into()))?;

        let outcome = self.registry.apply_action(binding.room_id, action)?;
        if let ActionOutcome::GameOver(result) = outcome {
            debug!(room_id = binding.room_id, result = ?result, "game over broadcast");
        }

        Ok(binding.room_id)
    }

    fn join(
        &mut self,
        conn: ConnectionId,
        room_id: RoomId,
        name: Option<&str>,
    ) -> Result<RoomId, ApiError> {
        if self.bindings.contains_key(&conn) {
            return Err(ApiError::AlreadyJoined);
        }

        let (player_id, _started) = self.registry.join(room_id, name)?;
        self.bindings.insert(conn, Binding { room_id, player_id });
        Ok(room_id)
    }

    /// Соединение закрылось.
    pub fn disconnect(&mut self, conn: ConnectionId) -> Vec<Outbound> {
        let Some(binding) = self.bindings.remove(&conn) else {
            return Vec::new();
        };

        match self.registry.leave(binding.room_id, binding.player_id) {
            Ok(LeaveOutcome::Reset) => self.broadcast(binding.room_id),
            Ok(LeaveOutcome::RoomEmpty) => Vec::new(),
            Err(err) => {
                warn!(conn, reason = %err, "leave failed");
                Vec::new()
            }
        }
    }

    /// Снэпшот каждому соединению комнаты.
    fn broadcast(&self, room_id: RoomId) -> Vec<Outbound> {
        let Some(room) = self.registry.room(room_id) else {
            return Vec::new();
        };

        self.bindings
            .iter()
            .filter(|(_, b)| b.room_id == room_id)
            .filter_map(|(conn, b)| {
                build_room_view(room, b.player_id).map(|view| Outbound {
                    conn: *conn,
                    message: ServerMessage::State(Box::new(view)),
                })
            })
            .collect()
    }
}

fn error_to(conn: ConnectionId, err: &ApiError) -> Outbound {
    Outbound {
        conn,
        message: ServerMessage::error(err.to_string()),
    }
}

/// JSON → ClientMessage с разделением "битый формат" / "неизвестное действие".
///
/// Список известных действий – это сами варианты `ClientMessage`:
/// неизвестный тег serde сообщает как `unknown variant`.
fn parse_message(text: &str) -> Result<ClientMessage, ApiError> {
    let value: Value = serde_json::from_str(text)
        .map_err(|_| ApiError::BadRequest("ожидался JSON".into()))?;

    let kind = value
        .get("type")
        .and_then(Value::as_str)
        .ok_or_else(|| ApiError::BadRequest("нет поля type".into()))?
        .to_owned();

    serde_json::from_value(value).map_err(|e| {
        if e.to_string().starts_with("unknown variant") {
            ApiError::BadRequest(format!("неизвестное действие {kind}"))
        } else {
            ApiError::BadRequest(e.to_string())
        }
    })
}
