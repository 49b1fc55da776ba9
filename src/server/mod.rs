//! Граница с транспортом: протокольный шлюз и очередь обработки.
//!
//! Сокеты, HTTP и фрейминг сюда не входят – транспорт передаёт текст
//! сообщений и забирает готовые исходящие сообщения.

pub mod actor;
pub mod gateway;

pub use actor::{spawn, ActorClosed, Inbound, RoomActorHandle};
pub use gateway::{Binding, ConnectionId, Gateway, Outbound, RoomCreated};
