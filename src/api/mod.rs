//! Внешний API движка.
//!
//! Здесь описываются:
//! - команды (commands.rs) – входящие сообщения игроков и создание комнаты;
//! - запросы (queries.rs) – только чтение, в т.ч. снэпшот комнаты для игрока;
//! - DTO (dto.rs) – структуры, которые уходят клиенту;
//! - ошибки (errors.rs) – то, что видит клиент.

pub mod commands;
pub mod dto;
pub mod errors;
pub mod queries;

pub use commands::*;
pub use dto::*;
pub use errors::*;
pub use queries::*;
