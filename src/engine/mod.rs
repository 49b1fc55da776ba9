//! Движок дурака: проверка и применение действий, жизненный цикл комнаты.
//!
//! Основные операции:
//!   - `lifecycle::join` / `start_game` – вход игроков и старт партии
//!   - `apply_action` – применить действие игрока (атака, отбой, перевод, беру, бито)
//!   - `compute_action_hints` – подсказки для UI теми же проверками
//!   - `RoomRegistry` – комнаты по id поверх всего этого

pub mod actions;
pub mod errors;
pub mod hints;
pub mod lifecycle;
pub mod registry;
pub mod resolver;
pub mod validation;

pub use actions::{PlayerAction, PlayerActionKind};
pub use errors::{EngineError, ErrorKind};
pub use hints::{compute_action_hints, ActionHints};
pub use lifecycle::LeaveOutcome;
pub use registry::{RegistryError, RoomRegistry};
pub use resolver::{apply_action, ActionOutcome, HAND_SIZE};
pub use validation::{attack_limit, max_pairs, validate_action};

/// RNG интерфейс для engine.
/// Реализации – в infra (обёртки над `rand`).
pub trait RandomSource {
    /// Равномерная перестановка (Fisher–Yates).
    fn shuffle<T>(&mut self, slice: &mut [T]);

    /// Случайный индекс в `0..len` (`len > 0`).
    fn pick_index(&mut self, len: usize) -> usize;
}
