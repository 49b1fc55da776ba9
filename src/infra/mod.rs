//! Инфраструктурный слой вокруг движка:
//! - генерация ID;
//! - RNG-реализации для движка;
//! - инициализация логирования.

pub mod ids;
pub mod logging;
pub mod rng;

pub use ids::*;
pub use rng::*;
