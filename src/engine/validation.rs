//! Проверки легальности действий.
//!
//! Все функции здесь чистые: только читают `Room`. Ими пользуются и
//! резолвер (перед применением действия), и подсказки для UI.

use crate::domain::card::{beats, Card, Suit};
use crate::domain::player::Player;
use crate::domain::room::{Phase, Room, RoomStatus};
use crate::domain::{CardId, PileId, PlayerId};
use crate::engine::actions::{PlayerAction, PlayerActionKind};
use crate::engine::errors::EngineError;

/// Лимит пар в самом первом розыгрыше партии (бито ещё пустое).
pub const FIRST_ROUND_MAX_PAIRS: usize = 5;
/// Лимит пар в остальных розыгрышах.
pub const MAX_PAIRS: usize = 6;

/// 5 в первом розыгрыше, дальше 6.
pub fn max_pairs(room: &Room) -> usize {
    if room.is_first_round() {
        FIRST_ROUND_MAX_PAIRS
    } else {
        MAX_PAIRS
    }
}

fn hand_size(room: &Room, player_id: Option<PlayerId>) -> usize {
    player_id
        .and_then(|id| room.player(id))
        .map(|p| p.hand.len())
        .unwrap_or(0)
}

/// Сколько пар можно выложить в текущем розыгрыше:
/// `min(round_limit ?? карт у защитника, max_pairs)`.
pub fn attack_limit(room: &Room) -> usize {
    let base = room
        .round_limit
        .unwrap_or_else(|| hand_size(room, room.defender_id()));
    base.min(max_pairs(room))
}

/// Лимит после перевода: считается по будущему защитнику (текущему атакующему).
pub fn transfer_limit(room: &Room) -> usize {
    hand_size(room, room.attacker_id()).min(max_pairs(room))
}

/// Проверка, может ли игрок выполнить это действие при текущем состоянии комнаты.
pub fn validate_action(room: &Room, action: &PlayerAction) -> Result<(), EngineError> {
    let player_id = action.player_id;

    match action.kind {
        PlayerActionKind::Attack { card_id } => validate_attack(room, player_id, card_id),
        PlayerActionKind::Defend { pile_id, card_id } => {
            validate_defend(room, player_id, pile_id, card_id)
        }
        PlayerActionKind::Transfer { card_id } => validate_transfer(room, player_id, card_id),
        PlayerActionKind::Take => validate_take(room, player_id),
        PlayerActionKind::EndTurn => validate_end_turn(room, player_id),
    }
}

/// Общая часть: партия идёт, игрок в комнате, роли назначены.
fn acting_player(room: &Room, player_id: PlayerId) -> Result<(&Player, Suit), EngineError> {
    let player = room
        .player(player_id)
        .ok_or(EngineError::PlayerNotInRoom(player_id))?;

    if room.status != RoomStatus::Playing {
        return Err(EngineError::GameNotActive);
    }

    match (room.roles, room.trump_suit) {
        (Some(_), Some(trump)) => Ok((player, trump)),
        _ => Err(EngineError::GameNotActive),
    }
}

fn card_in_hand(player: &Player, card_id: CardId) -> Result<&Card, EngineError> {
    player
        .hand
        .get(card_id)
        .ok_or(EngineError::CardNotInHand(card_id))
}

fn validate_attack(room: &Room, player_id: PlayerId, card_id: CardId) -> Result<(), EngineError> {
    let (player, _) = acting_player(room, player_id)?;

    if room.attacker_id() != Some(player_id) {
        return Err(EngineError::NotAttacker);
    }

    let card = card_in_hand(player, card_id)?;

    // Подкидывать можно и в фазе Taking – значит проверка фазы не нужна.
    if !room.table.is_empty() && !room.table.ranks_in_play().contains(&card.rank) {
        return Err(EngineError::RankNotOnTable);
    }

    let limit = attack_limit(room);
    if room.table.len() >= limit {
        return Err(EngineError::AttackLimitReached { limit });
    }

    Ok(())
}

fn validate_defend(
    room: &Room,
    player_id: PlayerId,
    pile_id: PileId,
    card_id: CardId,
) -> Result<(), EngineError> {
    let (player, trump) = acting_player(room, player_id)?;

    if room.defender_id() != Some(player_id) {
        return Err(EngineError::NotDefender);
    }

    if room.phase == Phase::Taking {
        return Err(EngineError::DefenderIsTaking);
    }

    let pile = room
        .table
        .pile(pile_id)
        .ok_or(EngineError::PileNotFound(pile_id))?;

    if pile.is_defended() {
        return Err(EngineError::PileAlreadyDefended(pile_id));
    }

    let card = card_in_hand(player, card_id)?;

    if !beats(&pile.attack, card, trump) {
        return Err(EngineError::CardDoesNotBeat);
    }

    Ok(())
}

fn validate_transfer(
    room: &Room,
    player_id: PlayerId,
    card_id: CardId,
) -> Result<(), EngineError> {
    if !room.settings.perevod {
        return Err(EngineError::TransfersDisabled);
    }

    let (player, _) = acting_player(room, player_id)?;

    if room.defender_id() != Some(player_id) {
        return Err(EngineError::NotDefender);
    }

    if room.phase == Phase::Taking {
        return Err(EngineError::DefenderIsTaking);
    }

    if room.table.is_empty() {
        return Err(EngineError::TableEmpty);
    }

    if room.table.any_defended() {
        return Err(EngineError::TransferAfterDefense);
    }

    let card = card_in_hand(player, card_id)?;

    if !room.table.ranks_in_play().contains(&card.rank) {
        return Err(EngineError::RankNotOnTable);
    }

    let limit = transfer_limit(room);
    if room.table.len() >= limit {
        return Err(EngineError::AttackLimitReached { limit });
    }

    Ok(())
}

fn validate_take(room: &Room, player_id: PlayerId) -> Result<(), EngineError> {
    acting_player(room, player_id)?;

    if room.defender_id() != Some(player_id) {
        return Err(EngineError::NotDefender);
    }

    if room.table.is_empty() {
        return Err(EngineError::TableEmpty);
    }

    if room.phase == Phase::Taking {
        return Err(EngineError::DefenderIsTaking);
    }

    Ok(())
}

fn validate_end_turn(room: &Room, player_id: PlayerId) -> Result<(), EngineError> {
    acting_player(room, player_id)?;

    if room.attacker_id() != Some(player_id) {
        return Err(EngineError::NotAttacker);
    }

    if room.table.is_empty() {
        return Err(EngineError::TableEmpty);
    }

    // Защитник берёт – закрыть розыгрыш можно сразу.
    if room.phase == Phase::Attacking && !room.table.all_defended() {
        return Err(EngineError::UndefendedPiles);
    }

    Ok(())
}
