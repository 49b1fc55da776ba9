use tracing::{debug, info};

use crate::domain::room::{GameResult, Phase, Room};
use crate::domain::table::Pile;
use crate::domain::{Card, CardId, PileId, PlayerId};
use crate::engine::actions::{PlayerAction, PlayerActionKind};
use crate::engine::errors::EngineError;
use crate::engine::lifecycle::check_game_end;
use crate::engine::validation::{max_pairs, validate_action};
use crate::infra::IdGenerator;

/// До скольких карт добираются игроки после розыгрыша.
pub const HAND_SIZE: usize = 6;

/// Что произошло после принятого действия.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ActionOutcome {
    /// Розыгрыш продолжается.
    Continue,
    /// Стол очищен: в бито (`taken = false`) или защитнику на руку.
    RoundClosed { taken: bool },
    /// Партия закончилась.
    GameOver(GameResult),
}

/// Применить действие игрока к комнате.
///
/// Сначала полная проверка (`validate_action`), потом применение.
/// При ошибке комната не меняется ни в одном поле.
pub fn apply_action(
    room: &mut Room,
    action: PlayerAction,
    ids: &IdGenerator,
) -> Result<ActionOutcome, EngineError> {
    if let Err(err) = validate_action(room, &action) {
        debug!(
            room_id = room.id,
            player_id = action.player_id,
            action = ?action.kind,
            reason = %err,
            "action rejected"
        );
        return Err(err);
    }

    let player_id = action.player_id;
    let outcome = match action.kind {
        PlayerActionKind::Attack { card_id } => commit_attack(room, player_id, card_id, ids),
        PlayerActionKind::Defend { pile_id, card_id } => {
            commit_defend(room, player_id, pile_id, card_id)
        }
        PlayerActionKind::Transfer { card_id } => commit_transfer(room, player_id, card_id, ids),
        PlayerActionKind::Take => commit_take(room),
        PlayerActionKind::EndTurn => commit_end_turn(room),
    }?;

    debug!(
        room_id = room.id,
        player_id,
        action = ?action.kind,
        piles = room.table.len(),
        phase = ?room.phase,
        "action applied"
    );

    Ok(outcome)
}

/// Снять проверенную карту с руки игрока.
fn remove_from_hand(
    room: &mut Room,
    player_id: PlayerId,
    card_id: CardId,
) -> Result<Card, EngineError> {
    room.player_mut(player_id)
        .ok_or(EngineError::PlayerNotInRoom(player_id))?
        .hand
        .remove(card_id)
        .ok_or(EngineError::CardNotInHand(card_id))
}

fn defender_hand_len(room: &Room) -> usize {
    room.defender().map(|p| p.hand.len()).unwrap_or(0)
}

fn commit_attack(
    room: &mut Room,
    player_id: PlayerId,
    card_id: CardId,
    ids: &IdGenerator,
) -> Result<ActionOutcome, EngineError> {
    let card = remove_from_hand(room, player_id, card_id)?;

    // Первый заход розыгрыша фиксирует лимит по руке защитника.
    if room.round_limit.is_none() {
        room.round_limit = Some(defender_hand_len(room));
    }
    room.table.piles.push(Pile::new(ids.next_pile_id(), card));

    Ok(ActionOutcome::Continue)
}

fn commit_defend(
    room: &mut Room,
    player_id: PlayerId,
    pile_id: PileId,
    card_id: CardId,
) -> Result<ActionOutcome, EngineError> {
    let index = room
        .table
        .piles
        .iter()
        .position(|p| p.id == pile_id)
        .ok_or(EngineError::PileNotFound(pile_id))?;
    let card = remove_from_hand(room, player_id, card_id)?;
    room.table.piles[index].defense = Some(card);

    Ok(ActionOutcome::Continue)
}

fn commit_transfer(
    room: &mut Room,
    player_id: PlayerId,
    card_id: CardId,
    ids: &IdGenerator,
) -> Result<ActionOutcome, EngineError> {
    let card = remove_from_hand(room, player_id, card_id)?;
    room.table.piles.push(Pile::new(ids.next_pile_id(), card));

    swap_roles(room);
    room.round_limit = Some(defender_hand_len(room).min(max_pairs(room)));

    Ok(ActionOutcome::Continue)
}

fn commit_take(room: &mut Room) -> Result<ActionOutcome, EngineError> {
    room.phase = Phase::Taking;
    if room.round_limit.is_none() {
        room.round_limit = Some(defender_hand_len(room));
    }

    Ok(ActionOutcome::Continue)
}

fn commit_end_turn(room: &mut Room) -> Result<ActionOutcome, EngineError> {
    let roles = room.roles.ok_or(EngineError::GameNotActive)?;
    let taken = room.phase == Phase::Taking;
    let cards = room.table.sweep();

    if taken {
        let defender = room
            .player_mut(roles.defender)
            .ok_or(EngineError::PlayerNotInRoom(roles.defender))?;
        defender.hand.extend(cards);
    } else {
        room.discard.extend(cards);
    }

    // Добор: сначала атакующий, потом защитник.
    draw_up_to(room, roles.attacker, HAND_SIZE);
    draw_up_to(room, roles.defender, HAND_SIZE);

    if !taken {
        swap_roles(room);
    }
    room.phase = Phase::Attacking;
    room.round_limit = None;

    info!(
        room_id = room.id,
        taken,
        deck = room.deck.len(),
        discard = room.discard.len(),
        "round closed"
    );

    Ok(match check_game_end(room) {
        Some(result) => ActionOutcome::GameOver(result),
        None => ActionOutcome::RoundClosed { taken },
    })
}

/// Единственное место, где атакующий и защитник меняются местами.
fn swap_roles(room: &mut Room) {
    if let Some(roles) = room.roles.as_mut() {
        roles.swap();
    }
}

/// Добрать карты из колоды до `target` (или пока колода не кончится).
pub fn draw_up_to(room: &mut Room, player_id: PlayerId, target: usize) {
    let Some(index) = room.players.iter().position(|p| p.id == player_id) else {
        return;
    };

    while room.players[index].hand.len() < target {
        match room.deck.draw_one() {
            Some(card) => room.players[index].hand.push(card),
            None => break,
        }
    }
}
