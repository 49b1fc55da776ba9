use std::sync::atomic::{AtomicU64, Ordering};

use crate::domain::{CardId, PileId, PlayerId, RoomId};

/// Простая генерация ID на основе монотонных счётчиков.
///
/// Карты получают свежие id при каждой новой колоде, поэтому id карты
/// из прошлой партии никогда не совпадёт с картой текущей.
#[derive(Debug)]
pub struct IdGenerator {
    room_counter: AtomicU64,
    player_counter: AtomicU64,
    card_counter: AtomicU64,
    pile_counter: AtomicU64,
}

impl Default for IdGenerator {
    fn default() -> Self {
        Self::new()
    }
}

impl IdGenerator {
    /// Создать генератор с начальным значением 1 для всех сущностей.
    pub fn new() -> Self {
        Self {
            room_counter: AtomicU64::new(1),
            player_counter: AtomicU64::new(1),
            card_counter: AtomicU64::new(1),
            pile_counter: AtomicU64::new(1),
        }
    }

    #[inline]
    pub fn next_room_id(&self) -> RoomId {
        self.room_counter.fetch_add(1, Ordering::Relaxed)
    }

    #[inline]
    pub fn next_player_id(&self) -> PlayerId {
        self.player_counter.fetch_add(1, Ordering::Relaxed)
    }

    #[inline]
    pub fn next_card_id(&self) -> CardId {
        self.card_counter.fetch_add(1, Ordering::Relaxed)
    }

    #[inline]
    pub fn next_pile_id(&self) -> PileId {
        self.pile_counter.fetch_add(1, Ordering::Relaxed)
    }
}
