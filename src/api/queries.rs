use serde::{Deserialize, Serialize};

use crate::domain::room::{Room, RoomStatus};
use crate::domain::{PlayerId, RoomId};
use crate::engine::hints::compute_action_hints;
use crate::engine::validation::attack_limit;

use super::dto::{CardDto, PileDto, PlayerSummaryDto, RoomStateDto, RoomSummaryDto};

/// Запросы "только чтение".
#[derive(Clone, Debug, Serialize, Deserialize)]
pub enum Query {
    /// Краткая информация о комнате.
    GetRoom { room_id: RoomId },

    /// Снэпшот комнаты глазами игрока.
    GetView { room_id: RoomId, player_id: PlayerId },
}

impl Query {
    pub fn room_id(&self) -> RoomId {
        match *self {
            Query::GetRoom { room_id } | Query::GetView { room_id, .. } => room_id,
        }
    }
}

/// Результат запроса "только чтение".
#[derive(Clone, Debug, Serialize, Deserialize)]
pub enum QueryResponse {
    Room(RoomSummaryDto),
    View(Box<RoomStateDto>),
    NotFound,
}

/// Ответить на запрос. Комната ищется по `room_id` из самого запроса.
pub fn answer_query<'a>(
    lookup: impl FnOnce(RoomId) -> Option<&'a Room>,
    query: &Query,
) -> QueryResponse {
    let Some(room) = lookup(query.room_id()) else {
        return QueryResponse::NotFound;
    };

    match query {
        Query::GetRoom { .. } => QueryResponse::Room(build_room_summary(room)),
        Query::GetView { player_id, .. } => build_room_view(room, *player_id)
            .map(|v| QueryResponse::View(Box::new(v)))
            .unwrap_or(QueryResponse::NotFound),
    }
}

pub fn build_room_summary(room: &Room) -> RoomSummaryDto {
    RoomSummaryDto {
        room_id: room.id,
        status: room.status,
        settings: room.settings,
        players: room.players.len(),
    }
}

/// Сформировать снэпшот комнаты для игрока `player_id`.
/// None – такого игрока в комнате нет.
pub fn build_room_view(room: &Room, player_id: PlayerId) -> Option<RoomStateDto> {
    let me = room.player(player_id)?;

    let players = room
        .players
        .iter()
        .map(|p| PlayerSummaryDto {
            id: p.id,
            name: p.name.clone(),
            hand_count: p.hand.len(),
        })
        .collect();

    let limit = if room.status == RoomStatus::Playing {
        attack_limit(room)
    } else {
        0
    };

    Some(RoomStateDto {
        room_id: room.id,
        status: room.status,
        settings: room.settings,
        you_id: player_id,
        players,
        your_hand: me.hand.iter().map(CardDto::from).collect(),
        opponent_hand_count: room
            .opponent_of(player_id)
            .map(|p| p.hand.len())
            .unwrap_or(0),
        attacker_id: room.attacker_id(),
        defender_id: room.defender_id(),
        table: room.table.piles.iter().map(PileDto::from).collect(),
        deck_count: room.deck.len(),
        trump_card: room.trump_card.as_ref().map(CardDto::from),
        trump_suit: room.trump_suit,
        discard_count: room.discard.len(),
        phase: room.phase,
        attack_limit: limit,
        action_hints: compute_action_hints(room, player_id),
        result: room.result,
    })
}
