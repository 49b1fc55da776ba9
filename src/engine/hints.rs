use serde::{Deserialize, Serialize};

use crate::domain::room::Room;
use crate::domain::PlayerId;
use crate::engine::actions::{PlayerAction, PlayerActionKind};
use crate::engine::validation::validate_action;

/// Подсказки для UI: какие действия сейчас доступны игроку.
///
/// Считаются теми же проверками, что применяет резолвер,
/// поэтому подсказка "можно" всегда означает, что хотя бы
/// одно такое действие будет принято.
#[derive(Clone, Copy, Debug, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct ActionHints {
    pub can_attack: bool,
    pub can_defend: bool,
    pub can_transfer: bool,
    pub can_take: bool,
    pub can_end_turn: bool,
}

/// Чистая функция от (комната, игрок).
pub fn compute_action_hints(room: &Room, player_id: PlayerId) -> ActionHints {
    let Some(player) = room.player(player_id) else {
        return ActionHints::default();
    };

    let legal = |kind: PlayerActionKind| {
        validate_action(room, &PlayerAction::new(player_id, kind)).is_ok()
    };

    let can_attack = player
        .hand
        .iter()
        .any(|c| legal(PlayerActionKind::Attack { card_id: c.id }));

    let can_defend = room
        .table
        .piles
        .iter()
        .filter(|p| !p.is_defended())
        .any(|pile| {
            player.hand.iter().any(|c| {
                legal(PlayerActionKind::Defend {
                    pile_id: pile.id,
                    card_id: c.id,
                })
            })
        });

    let can_transfer = player
        .hand
        .iter()
        .any(|c| legal(PlayerActionKind::Transfer { card_id: c.id }));

    ActionHints {
        can_attack,
        can_defend,
        can_transfer,
        can_take: legal(PlayerActionKind::Take),
        can_end_turn: legal(PlayerActionKind::EndTurn),
    }
}
