//! Движок "дурака" на двоих (подкидной / переводной).
//!
//! Движок владеет всей игровой правдой: чьи карты где, чей ход,
//! легальность каждого действия, конец партии. Транспорт (сокеты, HTTP)
//! снаружи: он передаёт "игрок P хочет сделать A" и получает либо новые
//! снэпшоты для игроков, либо причину отказа.

pub mod api;
pub mod config;
pub mod domain;
pub mod engine;
pub mod infra;
pub mod server;

pub use config::ServerConfig;
