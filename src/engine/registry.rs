// src/engine/registry.rs

use std::collections::HashMap;

use thiserror::Error;
use tracing::info;

use crate::domain::room::{Room, RoomSettings, RoomStatus};
use crate::domain::{PlayerId, RoomId};
use crate::engine::lifecycle::{self, LeaveOutcome, DEFAULT_NAME_MAX_LEN};
use crate::engine::resolver::{self, ActionOutcome};
use crate::engine::{EngineError, PlayerAction, RandomSource};
use crate::infra::IdGenerator;

/// Ошибки уровня реестра комнат (над движком одной комнаты).
#[derive(Clone, Debug, Error, PartialEq, Eq)]
pub enum RegistryError {
    /// Комната с таким ID не найдена.
    #[error("Комната {0} не найдена")]
    RoomNotFound(RoomId),

    /// Все слоты заняты идущими партиями.
    #[error("Партия уже идёт, новую комнату создать нельзя")]
    CapacityReached,

    /// Проброшенная ошибка из движка (EngineError).
    #[error(transparent)]
    Engine(#[from] EngineError),
}

/// Реестр комнат:
/// - хранит комнаты по RoomId, каждая – независимая запись;
/// - выдаёт id комнат, игроков, карт и пар;
/// - даёт методы join/apply_action/leave поверх lifecycle и resolver.
///
/// Реестр не потокобезопасен: действия обрабатываются строго по одному
/// (см. `server::actor`).
pub struct RoomRegistry<R: RandomSource> {
    rooms: HashMap<RoomId, Room>,
    ids: IdGenerator,
    rng: R,
    /// None – без ограничения. Тогда реестр удаляет только комнаты, из
    /// которых ушёл последний игрок: комната, в которую никто не вошёл,
    /// живёт до конца процесса. Долгоживущему серверу нужен `Some(n)` –
    /// при заполнении вытесняются завершённые и пустые комнаты.
    max_rooms: Option<usize>,
    name_max_len: usize,
}

impl<R: RandomSource> RoomRegistry<R> {
    /// Создать пустой реестр без ограничения числа комнат.
    pub fn new(rng: R) -> Self {
        Self {
            rooms: HashMap::new(),
            ids: IdGenerator::new(),
            rng,
            max_rooms: None,
            name_max_len: DEFAULT_NAME_MAX_LEN,
        }
    }

    pub fn with_max_rooms(mut self, max_rooms: Option<usize>) -> Self {
        self.max_rooms = max_rooms;
        self
    }

    pub fn with_name_max_len(mut self, name_max_len: usize) -> Self {
        self.name_max_len = name_max_len;
        self
    }

    pub fn len(&self) -> usize {
        self.rooms.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rooms.is_empty()
    }

    pub fn has_room(&self, room_id: RoomId) -> bool {
        self.rooms.contains_key(&room_id)
    }

    /// Ссылка на комнату (read-only).
    pub fn room(&self, room_id: RoomId) -> Option<&Room> {
        self.rooms.get(&room_id)
    }

    /// Ссылка на комнату (mutable). Для тестов и админских сценариев.
    pub fn room_mut(&mut self, room_id: RoomId) -> Option<&mut Room> {
        self.rooms.get_mut(&room_id)
    }

    /// Создать новую комнату.
    ///
    /// Если реестр заполнен, освобождаем место, удаляя завершённую
    /// или пустую комнату; если таких нет – отказ.
    pub fn create_room(&mut self, settings: RoomSettings) -> Result<RoomId, RegistryError> {
        if let Some(max) = self.max_rooms {
            if self.rooms.len() >= max {
                let evictable = self
                    .rooms
                    .values()
                    .find(|r| r.status == RoomStatus::Finished || r.players.is_empty())
                    .map(|r| r.id)
                    .ok_or(RegistryError::CapacityReached)?;
                self.rooms.remove(&evictable);
                info!(room_id = evictable, "room evicted");
            }
        }

        let id = self.ids.next_room_id();
        self.rooms.insert(id, lifecycle::create_room(id, settings));
        Ok(id)
    }

    /// Войти в комнату. Возвращает id нового игрока и флаг старта партии.
    pub fn join(
        &mut self,
        room_id: RoomId,
        name: Option<&str>,
    ) -> Result<(PlayerId, bool), RegistryError> {
        let room = self
            .rooms
            .get_mut(&room_id)
            .ok_or(RegistryError::RoomNotFound(room_id))?;

        // Проверяем заполненность до выдачи id, чтобы не тратить их зря.
        if room.is_full() {
            return Err(EngineError::RoomFull.into());
        }

        let player_id = self.ids.next_player_id();
        let started = lifecycle::join(
            room,
            player_id,
            name,
            self.name_max_len,
            &mut self.rng,
            &self.ids,
        )?;

        Ok((player_id, started))
    }

    /// Применить действие игрока в конкретной комнате.
    pub fn apply_action(
        &mut self,
        room_id: RoomId,
        action: PlayerAction,
    ) -> Result<ActionOutcome, RegistryError> {
        let room = self
            .rooms
            .get_mut(&room_id)
            .ok_or(RegistryError::RoomNotFound(room_id))?;

        Ok(resolver::apply_action(room, action, &self.ids)?)
    }

    /// Игрок ушёл. Пустая комната удаляется целиком.
    pub fn leave(
        &mut self,
        room_id: RoomId,
        player_id: PlayerId,
    ) -> Result<LeaveOutcome, RegistryError> {
        let room = self
            .rooms
            .get_mut(&room_id)
            .ok_or(RegistryError::RoomNotFound(room_id))?;

        let outcome = lifecycle::leave(room, player_id)?;
        if outcome == LeaveOutcome::RoomEmpty {
            self.rooms.remove(&room_id);
            info!(room_id, "room torn down");
        }

        Ok(outcome)
    }
}
