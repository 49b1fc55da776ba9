//! Жизненный цикл комнаты: создание, вход игроков, старт партии
//! (раздача, козырь, первый ход), конец партии и сброс при выходе игрока.

use std::cmp::Ordering;

use tracing::info;

use crate::domain::deck::Deck;
use crate::domain::player::Player;
use crate::domain::room::{
    GameResult, Phase, Roles, Room, RoomSettings, RoomStatus, MAX_PLAYERS,
};
use crate::domain::{PlayerId, RoomId};
use crate::engine::errors::EngineError;
use crate::engine::resolver::HAND_SIZE;
use crate::engine::RandomSource;
use crate::infra::IdGenerator;

/// Длина имени игрока по умолчанию.
pub const DEFAULT_NAME_MAX_LEN: usize = 16;

/// Что стало с комнатой после выхода игрока.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum LeaveOutcome {
    /// Игроков не осталось – комнату нужно удалить.
    RoomEmpty,
    /// Оставшийся игрок ждёт нового соперника.
    Reset,
}

/// Пустая комната в статусе `waiting`.
pub fn create_room(id: RoomId, settings: RoomSettings) -> Room {
    info!(room_id = id, perevod = settings.perevod, "room created");
    Room::new(id, settings)
}

/// Очистить имя: trim, обрезка до `max_len` символов, иначе `fallback`.
pub fn sanitize_name(raw: Option<&str>, max_len: usize, fallback: String) -> String {
    let cleaned: String = raw
        .map(str::trim)
        .unwrap_or_default()
        .chars()
        .take(max_len)
        .collect();
    let cleaned = cleaned.trim_end().to_string();

    if cleaned.is_empty() {
        fallback
    } else {
        cleaned
    }
}

/// Посадить игрока в комнату. Второй вошедший запускает партию.
///
/// Возвращает `true`, если партия стартовала.
pub fn join<R: RandomSource>(
    room: &mut Room,
    player_id: PlayerId,
    raw_name: Option<&str>,
    name_max_len: usize,
    rng: &mut R,
    ids: &IdGenerator,
) -> Result<bool, EngineError> {
    if room.is_full() {
        return Err(EngineError::RoomFull);
    }
    if room.status != RoomStatus::Waiting {
        return Err(EngineError::GameAlreadyStarted);
    }

    let fallback = format!("Player {}", room.players.len() + 1);
    let name = sanitize_name(raw_name, name_max_len, fallback);
    info!(room_id = room.id, player_id, name = %name, "player joined");
    room.players.push(Player::new(player_id, name));

    if room.players.len() == MAX_PLAYERS {
        start_game(room, rng, ids)?;
        return Ok(true);
    }

    Ok(false)
}

/// Старт партии:
/// - свежая колода + перемешивание;
/// - козырь – нижняя карта колоды;
/// - по 6 карт каждому, по очереди;
/// - первый ходит обладатель младшего козыря.
pub fn start_game<R: RandomSource>(
    room: &mut Room,
    rng: &mut R,
    ids: &IdGenerator,
) -> Result<(), EngineError> {
    if room.players.len() != MAX_PLAYERS {
        return Err(EngineError::NotEnoughPlayers);
    }
    if room.status == RoomStatus::Playing {
        return Err(EngineError::GameAlreadyStarted);
    }

    let mut deck = Deck::durak_36(|| ids.next_card_id());
    rng.shuffle(&mut deck.cards);

    room.trump_card = deck.bottom().copied();
    room.trump_suit = room.trump_card.map(|c| c.suit);
    room.deck = deck;
    room.table.piles.clear();
    room.discard.clear();
    room.result = None;
    room.phase = Phase::Attacking;
    room.round_limit = None;

    deal_initial_hands(room);
    room.roles = determine_first_attacker(room, rng);
    room.status = RoomStatus::Playing;

    info!(
        room_id = room.id,
        trump = ?room.trump_suit,
        attacker = ?room.attacker_id(),
        "game started"
    );

    Ok(())
}

/// Раздать по `HAND_SIZE` карт по очереди, пока руки не полны или колода не пуста.
fn deal_initial_hands(room: &mut Room) {
    for player in room.players.iter_mut() {
        player.hand.clear();
    }

    for _ in 0..HAND_SIZE {
        for player in room.players.iter_mut() {
            match room.deck.draw_one() {
                Some(card) => player.hand.push(card),
                None => return,
            }
        }
    }
}

/// Первый атакующий – у кого младший козырь.
/// Если козырей нет ни у кого – случайный выбор.
pub fn determine_first_attacker<R: RandomSource>(room: &Room, rng: &mut R) -> Option<Roles> {
    let [a, b] = room.players.as_slice() else {
        return None;
    };

    let lowest = |p: &Player| room.trump_suit.and_then(|t| p.hand.lowest_trump(t));

    let a_first = match (lowest(a), lowest(b)) {
        (Some(ra), Some(rb)) => match ra.cmp(&rb) {
            Ordering::Less => true,
            Ordering::Greater => false,
            Ordering::Equal => rng.pick_index(2) == 0,
        },
        (Some(_), None) => true,
        (None, Some(_)) => false,
        (None, None) => rng.pick_index(2) == 0,
    };

    Some(if a_first {
        Roles::new(a.id, b.id)
    } else {
        Roles::new(b.id, a.id)
    })
}

/// Проверка конца партии. Срабатывает только при пустой колоде:
/// - один игрок без карт – он победил;
/// - оба без карт – ничья.
///
/// При результате статус становится `finished`.
pub fn check_game_end(room: &mut Room) -> Option<GameResult> {
    if room.status != RoomStatus::Playing || !room.deck.is_empty() {
        return None;
    }

    let empty: Vec<PlayerId> = room
        .players
        .iter()
        .filter(|p| p.hand.is_empty())
        .map(|p| p.id)
        .collect();

    let result = match empty.as_slice() {
        [] => return None,
        [winner_id] => {
            let loser_id = room.opponent_of(*winner_id)?.id;
            GameResult::Win {
                winner_id: *winner_id,
                loser_id,
            }
        }
        _ => GameResult::Draw,
    };

    room.status = RoomStatus::Finished;
    room.result = Some(result);
    info!(room_id = room.id, result = ?result, "game finished");

    Some(result)
}

/// Игрок ушёл (отключился).
pub fn leave(room: &mut Room, player_id: PlayerId) -> Result<LeaveOutcome, EngineError> {
    let index = room
        .players
        .iter()
        .position(|p| p.id == player_id)
        .ok_or(EngineError::PlayerNotInRoom(player_id))?;
    room.players.remove(index);

    info!(room_id = room.id, player_id, left = room.players.len(), "player left");

    if room.players.is_empty() {
        return Ok(LeaveOutcome::RoomEmpty);
    }

    reset_room(room);
    Ok(LeaveOutcome::Reset)
}

/// Вернуть комнату в `waiting`: всё игровое состояние и руки очищаются.
pub fn reset_room(room: &mut Room) {
    room.status = RoomStatus::Waiting;
    room.deck.clear();
    room.trump_card = None;
    room.trump_suit = None;
    room.table.piles.clear();
    room.discard.clear();
    room.phase = Phase::Attacking;
    room.round_limit = None;
    room.roles = None;
    room.result = None;
    for player in room.players.iter_mut() {
        player.hand.clear();
    }
}
