// tests/api_test.rs
//
// Внешний слой: снэпшоты игроков, подсказки, протокольный шлюз
// (ошибки формата, рассылка, отключение), конфиг.

use durak_engine::api::{
    build_room_view, ApiError, ClientMessage, CreateRoomCommand, Query, QueryResponse,
    RoomStateDto, ServerMessage,
};
use durak_engine::config::ServerConfig;
use durak_engine::domain::{PlayerId, RoomId, RoomStatus};
use durak_engine::engine::{ActionHints, EngineError, ErrorKind, RegistryError, RoomRegistry};
use durak_engine::infra::DeterministicRng;
use durak_engine::server::{ConnectionId, Gateway, Outbound};

const ALICE: ConnectionId = 10;
const BOB: ConnectionId = 11;

fn gateway() -> Gateway<DeterministicRng> {
    Gateway::new(RoomRegistry::new(DeterministicRng::from_u64(42)))
}

fn send(gw: &mut Gateway<DeterministicRng>, conn: ConnectionId, msg: &ClientMessage) -> Vec<Outbound> {
    let text = serde_json::to_string(msg).unwrap();
    gw.handle_text(conn, &text)
}

/// Шлюз с комнатой, где уже сидят оба игрока.
fn started(perevod: bool) -> (Gateway<DeterministicRng>, RoomId) {
    let mut gw = gateway();
    let room_id = gw.create_room(&CreateRoomCommand { perevod }).unwrap().room_id;
    send(&mut gw, ALICE, &ClientMessage::Join { room_id, name: Some("Alice".into()) });
    send(&mut gw, BOB, &ClientMessage::Join { room_id, name: Some("Bob".into()) });
    (gw, room_id)
}

fn player_of(gw: &Gateway<DeterministicRng>, conn: ConnectionId) -> PlayerId {
    gw.binding(conn).unwrap().player_id
}

/// Соединения атакующего и защитника.
fn roles(gw: &Gateway<DeterministicRng>, room_id: RoomId) -> (ConnectionId, ConnectionId) {
    let room = gw.registry().room(room_id).unwrap();
    if room.attacker_id() == Some(player_of(gw, ALICE)) {
        (ALICE, BOB)
    } else {
        (BOB, ALICE)
    }
}

fn state_of(out: &Outbound) -> &RoomStateDto {
    match &out.message {
        ServerMessage::State(view) => view,
        other => panic!("ожидался снэпшот, пришло {other:?}"),
    }
}

fn error_text(out: &[Outbound]) -> &str {
    match out {
        [Outbound {
            message: ServerMessage::Error { message },
            ..
        }] => message,
        other => panic!("ожидалась одна ошибка, пришло {other:?}"),
    }
}

//
// JOIN / SNAPSHOTS
//

#[test]
fn join_broadcasts_snapshots() {
    let mut gw = gateway();
    let room_id = gw.create_room(&CreateRoomCommand::default()).unwrap().room_id;

    let out = send(&mut gw, ALICE, &ClientMessage::Join { room_id, name: None });
    assert_eq!(out.len(), 1);
    let view = state_of(&out[0]);
    assert_eq!(view.status, RoomStatus::Waiting);
    assert_eq!(view.players[0].name, "Player 1");
    assert_eq!(view.attack_limit, 0);

    let out = send(&mut gw, BOB, &ClientMessage::Join { room_id, name: Some("Bob".into()) });
    let conns: Vec<_> = out.iter().map(|o| o.conn).collect();
    assert_eq!(conns, vec![ALICE, BOB]);

    for o in &out {
        let view = state_of(o);
        assert_eq!(view.status, RoomStatus::Playing);
        assert_eq!(view.your_hand.len(), 6);
        assert_eq!(view.opponent_hand_count, 6);
        assert_eq!(view.deck_count, 24);
        assert_eq!(view.discard_count, 0);
        assert_eq!(view.trump_suit, view.trump_card.map(|c| c.suit));
        assert_eq!(view.attack_limit, 5);
    }
}

#[test]
fn snapshot_hides_opponent_hand() {
    let (gw, room_id) = started(false);
    let room = gw.registry().room(room_id).unwrap();
    let alice = player_of(&gw, ALICE);
    let bob = player_of(&gw, BOB);

    let view = build_room_view(room, alice).unwrap();
    let bob_ids: Vec<u64> = room.player(bob).unwrap().hand.iter().map(|c| c.id).collect();
    assert!(view.your_hand.iter().all(|c| !bob_ids.contains(&c.id)));

    // В JSON нет ни рук соперника, ни содержимого колоды.
    let json = serde_json::to_value(&view).unwrap();
    assert!(json.get("deck").is_none());
    assert_eq!(json["opponentHandCount"], 6);
    assert_eq!(json["deckCount"], 24);
    assert!(json["actionHints"].get("canAttack").is_some());

    assert!(build_room_view(room, 9_999).is_none());
}

#[test]
fn hints_follow_roles() {
    let (gw, room_id) = started(true);
    let (attacker, defender) = roles(&gw, room_id);
    let room = gw.registry().room(room_id).unwrap();

    let a = build_room_view(room, player_of(&gw, attacker)).unwrap().action_hints;
    assert!(a.can_attack);
    assert!(!a.can_defend && !a.can_take && !a.can_end_turn && !a.can_transfer);

    let d = build_room_view(room, player_of(&gw, defender)).unwrap().action_hints;
    assert_eq!(d, ActionHints::default());
}

#[test]
fn queries_resolve_room_from_request() {
    let (gw, room_id) = started(false);

    match gw.query(&Query::GetRoom { room_id }) {
        QueryResponse::Room(summary) => {
            assert_eq!(summary.room_id, room_id);
            assert_eq!(summary.players, 2);
            assert_eq!(summary.status, RoomStatus::Playing);
        }
        other => panic!("{other:?}"),
    }

    let alice = player_of(&gw, ALICE);
    match gw.query(&Query::GetView { room_id, player_id: alice }) {
        QueryResponse::View(view) => {
            assert_eq!(view.you_id, alice);
            assert_eq!(view.your_hand.len(), 6);
        }
        other => panic!("{other:?}"),
    }

    assert!(matches!(
        gw.query(&Query::GetRoom { room_id: room_id + 1 }),
        QueryResponse::NotFound
    ));
    assert!(matches!(
        gw.query(&Query::GetView { room_id, player_id: 9_999 }),
        QueryResponse::NotFound
    ));
}

//
// PROTOCOL ERRORS
//

#[test]
fn malformed_messages_get_single_error() {
    let (mut gw, _) = started(false);

    for text in ["not json", "{\"foo\": 1}", "{\"type\": \"fly\"}", "{\"type\": \"attack\"}"] {
        let out = gw.handle_text(ALICE, text);
        assert_eq!(out.len(), 1, "{text}");
        assert_eq!(out[0].conn, ALICE);
        assert!(error_text(&out).starts_with("Неверный формат сообщения"), "{text}");
    }
}

/// Неизвестный тип распознаётся по самим вариантам ClientMessage,
/// а известный тип с битыми полями – отдельной ошибкой.
#[test]
fn unknown_action_is_told_apart_from_bad_fields() {
    let (mut gw, _) = started(false);

    let out = gw.handle_text(ALICE, r#"{"type": "fly"}"#);
    assert_eq!(error_text(&out), "Неверный формат сообщения: неизвестное действие fly");

    let out = gw.handle_text(ALICE, r#"{"type": "defend", "pileId": 1}"#);
    let text = error_text(&out);
    assert!(text.starts_with("Неверный формат сообщения"));
    assert!(!text.contains("неизвестное действие"), "{text}");
}

#[test]
fn actions_before_join_are_rejected() {
    let mut gw = gateway();
    let out = send(&mut gw, ALICE, &ClientMessage::Take);
    assert_eq!(error_text(&out), "Вы не в комнате");

    let out = send(&mut gw, ALICE, &ClientMessage::Join { room_id: 999, name: None });
    assert_eq!(error_text(&out), "Комната 999 не найдена");
}

#[test]
fn join_twice_and_full_room() {
    let (mut gw, room_id) = started(false);

    let out = send(&mut gw, ALICE, &ClientMessage::Join { room_id, name: None });
    assert_eq!(error_text(&out), "Вы уже в комнате");

    let out = send(&mut gw, 12, &ClientMessage::Join { room_id, name: None });
    assert_eq!(error_text(&out), "Комната заполнена");
    assert!(gw.binding(12).is_none());
}

//
// ACTIONS
//

#[test]
fn rejected_action_goes_only_to_sender() {
    let (mut gw, room_id) = started(false);
    let (_, defender) = roles(&gw, room_id);
    let before = gw.registry().room(room_id).unwrap().clone();

    let out = send(&mut gw, defender, &ClientMessage::EndTurn);
    assert_eq!(out[0].conn, defender);
    assert_eq!(error_text(&out), "Только атакующий может это сделать");
    assert_eq!(gw.registry().room(room_id).unwrap(), &before);
}

#[test]
fn accepted_action_broadcasts_to_both() {
    let (mut gw, room_id) = started(false);
    let (attacker, defender) = roles(&gw, room_id);
    let card_id = gw
        .registry()
        .room(room_id)
        .unwrap()
        .player(player_of(&gw, attacker))
        .unwrap()
        .hand
        .iter()
        .next()
        .unwrap()
        .id;

    let out = send(&mut gw, attacker, &ClientMessage::Attack { card_id });
    assert_eq!(out.len(), 2);
    for o in &out {
        let view = state_of(o);
        assert_eq!(view.table.len(), 1);
        assert_eq!(view.table[0].attack.id, card_id);
    }

    let defender_view = out.iter().find(|o| o.conn == defender).map(state_of).unwrap();
    assert!(defender_view.action_hints.can_take);
}

#[test]
fn transfer_disabled_is_rejected() {
    let (mut gw, room_id) = started(false);
    let (attacker, defender) = roles(&gw, room_id);
    let room = gw.registry().room(room_id).unwrap();
    let attack_card = room.player(player_of(&gw, attacker)).unwrap().hand.iter().next().unwrap().id;
    let any_card = room.player(player_of(&gw, defender)).unwrap().hand.iter().next().unwrap().id;

    send(&mut gw, attacker, &ClientMessage::Attack { card_id: attack_card });
    let out = send(&mut gw, defender, &ClientMessage::Transfer { card_id: any_card });
    assert_eq!(error_text(&out), "Переводы в этой комнате отключены");
}

//
// DISCONNECT
//

#[test]
fn disconnect_resets_room_and_notifies_remaining_player() {
    let (mut gw, room_id) = started(false);

    let out = gw.disconnect(ALICE);
    assert_eq!(out.len(), 1);
    assert_eq!(out[0].conn, BOB);
    let view = state_of(&out[0]);
    assert_eq!(view.status, RoomStatus::Waiting);
    assert_eq!(view.players.len(), 1);
    assert!(view.your_hand.is_empty());
    assert_eq!(view.trump_card, None);

    // Повторное отключение – ничего.
    assert!(gw.disconnect(ALICE).is_empty());

    assert!(gw.disconnect(BOB).is_empty());
    assert!(!gw.registry().has_room(room_id));
}

#[test]
fn evicted_room_notifies_its_connections() {
    let mut gw = Gateway::new(
        RoomRegistry::new(DeterministicRng::from_u64(1)).with_max_rooms(Some(1)),
    );
    let first = gw.create_room(&CreateRoomCommand::default()).unwrap();
    assert!(first.notices.is_empty());
    let first = first.room_id;
    send(&mut gw, ALICE, &ClientMessage::Join { room_id: first, name: None });
    send(&mut gw, BOB, &ClientMessage::Join { room_id: first, name: None });

    assert_eq!(
        gw.create_room(&CreateRoomCommand::default()).unwrap_err(),
        ApiError::RoomsBusy
    );

    gw.registry_mut().room_mut(first).unwrap().status = RoomStatus::Finished;
    let created = gw.create_room(&CreateRoomCommand::default()).unwrap();
    assert_ne!(first, created.room_id);
    assert!(gw.binding(ALICE).is_none());
    assert!(gw.binding(BOB).is_none());

    // Оба игрока старой комнаты узнают, что её больше нет.
    let conns: Vec<_> = created.notices.iter().map(|o| o.conn).collect();
    assert_eq!(conns, vec![ALICE, BOB]);
    let expected = format!("Комната {first} закрыта");
    for notice in &created.notices {
        assert_eq!(error_text(std::slice::from_ref(notice)), expected);
    }

    // Отвязанное соединение может войти в новую комнату.
    let out = send(&mut gw, ALICE, &ClientMessage::Join { room_id: created.room_id, name: None });
    assert_eq!(state_of(&out[0]).room_id, created.room_id);
}

//
// ERRORS / CONFIG
//

#[test]
fn api_error_kinds() {
    assert_eq!(ApiError::BadRequest("x".into()).kind(), ErrorKind::Protocol);
    assert_eq!(ApiError::NotJoined.kind(), ErrorKind::Protocol);
    assert_eq!(ApiError::RoomNotFound(1).kind(), ErrorKind::Resource);
    assert_eq!(ApiError::RoomClosed(1).kind(), ErrorKind::Resource);

    let from_engine = ApiError::from(EngineError::NotDefender);
    assert_eq!(from_engine.kind(), ErrorKind::Authorization);
    assert_eq!(from_engine.to_string(), "Только защитник может это сделать");

    assert_eq!(ApiError::from(RegistryError::CapacityReached), ApiError::RoomsBusy);
    assert_eq!(
        ApiError::from(RegistryError::Engine(EngineError::RoomFull)).kind(),
        ErrorKind::Legality
    );
}

#[test]
fn client_messages_wire_format() {
    let msg: ClientMessage =
        serde_json::from_str(r#"{"type":"defend","pileId":3,"cardId":17}"#).unwrap();
    assert_eq!(msg, ClientMessage::Defend { pile_id: 3, card_id: 17 });

    let msg: ClientMessage = serde_json::from_str(r#"{"type":"join","roomId":1}"#).unwrap();
    assert_eq!(msg, ClientMessage::Join { room_id: 1, name: None });

    let msg: ClientMessage = serde_json::from_str(r#"{"type":"end_turn"}"#).unwrap();
    assert_eq!(msg, ClientMessage::EndTurn);
    assert!(msg.to_action(1).is_some());
}

#[test]
fn config_defaults_and_overrides() {
    let cfg = ServerConfig::from_json_str("{}").unwrap();
    assert_eq!(cfg, ServerConfig::default());
    assert_eq!(cfg.max_rooms, Some(1));
    assert_eq!(cfg.name_max_len, 16);

    let cfg = ServerConfig::from_json_str(r#"{"seed": 5, "max_rooms": null, "log_json": true}"#)
        .unwrap();
    assert_eq!(cfg.seed, Some(5));
    assert_eq!(cfg.max_rooms, None);
    assert!(cfg.log_json);
    assert_eq!(cfg.log_level, "info");

    assert!(ServerConfig::from_json_str("not json").is_err());
}
