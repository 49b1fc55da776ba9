//! Очередь обработки комнат.
//!
//! Движок не содержит блокировок, поэтому все сообщения проходят через
//! одну задачу tokio, которая владеет `Gateway` и обрабатывает их строго
//! по одному. Частично применённое действие никогда не видно другому.

use std::collections::HashMap;

use tokio::sync::{mpsc, oneshot};
use tokio::task::JoinHandle;
use tracing::{debug, info};

use crate::api::commands::CreateRoomCommand;
use crate::api::dto::{RoomSummaryDto, ServerMessage};
use crate::api::errors::ApiError;
use crate::api::queries::{Query, QueryResponse};
use crate::domain::RoomId;
use crate::engine::RandomSource;
use crate::server::gateway::{ConnectionId, Gateway, Outbound};

/// Входящие события от транспорта.
#[derive(Debug)]
pub enum Inbound {
    /// Новое соединение и канал для ответов в него.
    Connect {
        conn: ConnectionId,
        sender: mpsc::UnboundedSender<ServerMessage>,
    },
    /// Текстовое сообщение из соединения.
    Text { conn: ConnectionId, text: String },
    /// Соединение закрыто.
    Disconnect { conn: ConnectionId },
    /// HTTP: создать комнату.
    CreateRoom {
        command: CreateRoomCommand,
        reply: oneshot::Sender<Result<RoomId, ApiError>>,
    },
    /// HTTP: запрос "только чтение" (сводка комнаты или снэпшот игрока).
    Query {
        query: Query,
        reply: oneshot::Sender<QueryResponse>,
    },
}

/// Ручка для транспорта: отправка событий в очередь.
#[derive(Clone, Debug)]
pub struct RoomActorHandle {
    tx: mpsc::Sender<Inbound>,
}

/// Очередь закрыта (задача актора завершилась).
#[derive(Debug, thiserror::Error)]
#[error("Очередь обработки комнат остановлена")]
pub struct ActorClosed;

impl RoomActorHandle {
    pub async fn send(&self, event: Inbound) -> Result<(), ActorClosed> {
        self.tx.send(event).await.map_err(|_| ActorClosed)
    }

    pub async fn connect(
        &self,
        conn: ConnectionId,
    ) -> Result<mpsc::UnboundedReceiver<ServerMessage>, ActorClosed> {
        let (sender, receiver) = mpsc::unbounded_channel();
        self.send(Inbound::Connect { conn, sender }).await?;
        Ok(receiver)
    }

    pub async fn text(&self, conn: ConnectionId, text: impl Into<String>) -> Result<(), ActorClosed> {
        self.send(Inbound::Text {
            conn,
            text: text.into(),
        })
        .await
    }

    pub async fn disconnect(&self, conn: ConnectionId) -> Result<(), ActorClosed> {
        self.send(Inbound::Disconnect { conn }).await
    }

    pub async fn create_room(
        &self,
        command: CreateRoomCommand,
    ) -> Result<Result<RoomId, ApiError>, ActorClosed> {
        let (reply, rx) = oneshot::channel();
        self.send(Inbound::CreateRoom { command, reply }).await?;
        rx.await.map_err(|_| ActorClosed)
    }

    pub async fn query(&self, query: Query) -> Result<QueryResponse, ActorClosed> {
        let (reply, rx) = oneshot::channel();
        self.send(Inbound::Query { query, reply }).await?;
        rx.await.map_err(|_| ActorClosed)
    }

    /// Сводка комнаты (None – комнаты нет).
    pub async fn get_room(&self, room_id: RoomId) -> Result<Option<RoomSummaryDto>, ActorClosed> {
        Ok(match self.query(Query::GetRoom { room_id }).await? {
            QueryResponse::Room(summary) => Some(summary),
            _ => None,
        })
    }
}

/// Запустить актор. Задача живёт, пока жива хотя бы одна ручка.
pub fn spawn<R>(gateway: Gateway<R>, capacity: usize) -> (RoomActorHandle, JoinHandle<()>)
where
    R: RandomSource + Send + 'static,
{
    let (tx, rx) = mpsc::channel(capacity);
    let handle = tokio::spawn(run(gateway, rx));
    (RoomActorHandle { tx }, handle)
}

async fn run<R: RandomSource>(mut gateway: Gateway<R>, mut rx: mpsc::Receiver<Inbound>) {
    let mut senders: HashMap<ConnectionId, mpsc::UnboundedSender<ServerMessage>> = HashMap::new();

    info!("room actor started");

    while let Some(event) = rx.recv().await {
        let outbound = match event {
            Inbound::Connect { conn, sender } => {
                senders.insert(conn, sender);
                Vec::new()
            }
            Inbound::Text { conn, text } => gateway.handle_text(conn, &text),
            Inbound::Disconnect { conn } => {
                senders.remove(&conn);
                gateway.disconnect(conn)
            }
            Inbound::CreateRoom { command, reply } => match gateway.create_room(&command) {
                Ok(created) => {
                    let _ = reply.send(Ok(created.room_id));
                    created.notices
                }
                Err(err) => {
                    let _ = reply.send(Err(err));
                    Vec::new()
                }
            },
            Inbound::Query { query, reply } => {
                let _ = reply.send(gateway.query(&query));
                Vec::new()
            }
        };

        deliver(&senders, outbound);
    }

    info!("room actor stopped");
}

fn deliver(
    senders: &HashMap<ConnectionId, mpsc::UnboundedSender<ServerMessage>>,
    outbound: Vec<Outbound>,
) {
    for Outbound { conn, message } in outbound {
        match senders.get(&conn) {
            Some(sender) => {
                // Закрытый получатель – соединение уже уходит, событие Disconnect придёт следом.
                let _ = sender.send(message);
            }
            None => debug!(conn, "no sender for connection"),
        }
    }
}
