// src/bin/durak_dev_cli.rs
//
// Dev-CLI: два бота играют партии через протокольный шлюз (JSON туда-обратно),
// как если бы их сообщения пришли из сокетов.

use std::path::PathBuf;

use clap::Parser;
use tracing::{error, info};

use durak_engine::api::{CardDto, ClientMessage, CreateRoomCommand, RoomStateDto, ServerMessage};
use durak_engine::config::ServerConfig;
use durak_engine::domain::card::{beats, Card};
use durak_engine::domain::room::{Phase, RoomStatus};
use durak_engine::domain::{RoomId, Suit};
use durak_engine::infra::{logging, ConfiguredRng};
use durak_engine::server::{ConnectionId, Gateway, Outbound};

/// Сколько сообщений максимум на одну партию (защита от зацикливания бота).
const MAX_STEPS: usize = 2_000;

#[derive(Debug, Parser)]
#[command(name = "durak_dev_cli", about = "Самоигра двух ботов через движок дурака")]
struct Args {
    /// JSON-конфиг сервера.
    #[arg(long)]
    config: Option<PathBuf>,

    /// Seed перемешивания (перекрывает конфиг).
    #[arg(long)]
    seed: Option<u64>,

    /// Включить переводы.
    #[arg(long)]
    perevod: bool,

    /// Сколько партий сыграть.
    #[arg(long, default_value_t = 1)]
    games: u32,

    /// Уровень логов (перекрывает конфиг).
    #[arg(long)]
    log_level: Option<String>,
}

fn main() {
    let args = Args::parse();

    let mut config = match &args.config {
        Some(path) => match ServerConfig::load(path) {
            Ok(cfg) => cfg,
            Err(e) => {
                eprintln!("[CLI] ОШИБКА конфига: {e}");
                std::process::exit(1);
            }
        },
        None => ServerConfig::default(),
    };
    if let Some(seed) = args.seed {
        config.seed = Some(seed);
    }
    if let Some(level) = &args.log_level {
        config.log_level = level.clone();
    }

    logging::init(&config.log_level, config.log_json);
    info!(games = args.games, perevod = args.perevod, seed = ?config.seed, "durak_dev_cli starting");

    let mut gateway = Gateway::from_config(&config);

    for game in 1..=args.games {
        println!();
        println!("================ GAME {game} =================");
        match play_game(&mut gateway, args.perevod, game) {
            Ok(summary) => println!("[CLI] {summary}"),
            Err(e) => {
                error!(game, reason = %e, "game aborted");
                println!("[CLI] ОШИБКА в партии {game}: {e}");
            }
        }
    }

    println!("[CLI] Завершение работы dev-CLI.");
}

/// Одна партия: создать комнату, посадить двух ботов, играть до результата.
fn play_game(gateway: &mut Gateway<ConfiguredRng>, perevod: bool, game: u32) -> Result<String, String> {
    let room_id = gateway
        .create_room(&CreateRoomCommand { perevod })
        .map_err(|e| e.to_string())?
        .room_id;

    // Соединения уникальны в рамках процесса.
    let conns: [ConnectionId; 2] = [u64::from(game) * 2, u64::from(game) * 2 + 1];
    let result = run_bots(gateway, room_id, &conns);

    for conn in conns {
        gateway.disconnect(conn);
    }
    result
}

fn run_bots(
    gateway: &mut Gateway<ConfiguredRng>,
    room_id: RoomId,
    conns: &[ConnectionId; 2],
) -> Result<String, String> {
    let mut states: [Option<RoomStateDto>; 2] = [None, None];

    for (i, conn) in conns.iter().enumerate() {
        let join = ClientMessage::Join {
            room_id,
            name: Some(format!("Bot {}", i + 1)),
        };
        let out = send(gateway, *conn, &join)?;
        absorb(conns, &mut states, out)?;
    }

    for _ in 0..MAX_STEPS {
        let [Some(a), Some(b)] = &states else {
            return Err("нет снэпшотов после join".into());
        };

        if a.status == RoomStatus::Finished {
            return Ok(format!(
                "room={room_id} result={:?} discard={}",
                a.result, a.discard_count
            ));
        }

        let (index, message) = if let Some(m) = choose_move(a) {
            (0, m)
        } else if let Some(m) = choose_move(b) {
            (1, m)
        } else {
            return Err("ни одному боту нечем ходить".into());
        };

        let out = send(gateway, conns[index], &message)?;
        absorb(conns, &mut states, out)?;
    }

    Err(format!("партия не закончилась за {MAX_STEPS} шагов"))
}

fn send(
    gateway: &mut Gateway<ConfiguredRng>,
    conn: ConnectionId,
    message: &ClientMessage,
) -> Result<Vec<Outbound>, String> {
    let text = serde_json::to_string(message).map_err(|e| e.to_string())?;
    Ok(gateway.handle_text(conn, &text))
}

/// Разложить исходящие сообщения по ботам. Ошибка от движка – баг бота.
fn absorb(
    conns: &[ConnectionId; 2],
    states: &mut [Option<RoomStateDto>; 2],
    outbound: Vec<Outbound>,
) -> Result<(), String> {
    for Outbound { conn, message } in outbound {
        let index = conns.iter().position(|c| *c == conn).ok_or("чужое соединение")?;
        match message {
            ServerMessage::State(view) => states[index] = Some(*view),
            ServerMessage::Error { message } => return Err(message),
        }
    }
    Ok(())
}

fn to_card(dto: &CardDto) -> Card {
    Card::new(dto.id, dto.rank, dto.suit)
}

/// Сортировка "сначала мелкие некозырные".
fn cheapest_first(cards: &mut [CardDto], trump: Option<Suit>) {
    cards.sort_by_key(|c| (Some(c.suit) == trump, c.value));
}

/// Ход бота по его снэпшоту (None – сейчас не его ход).
fn choose_move(view: &RoomStateDto) -> Option<ClientMessage> {
    let hints = view.action_hints;
    let trump = view.trump_suit;
    let mut hand = view.your_hand.clone();
    cheapest_first(&mut hand, trump);

    let ranks_on_table: Vec<_> = view
        .table
        .iter()
        .flat_map(|p| std::iter::once(p.attack.rank).chain(p.defense.map(|d| d.rank)))
        .collect();

    let is_defender = view.defender_id == Some(view.you_id);
    let has_undefended = view.table.iter().any(|p| p.defense.is_none());

    if is_defender && view.phase == Phase::Attacking && has_undefended {
        if hints.can_transfer {
            if let Some(card) = hand.iter().find(|c| ranks_on_table.contains(&c.rank)) {
                return Some(ClientMessage::Transfer { card_id: card.id });
            }
        }
        if hints.can_defend {
            let trump = trump?;
            for pile in view.table.iter().filter(|p| p.defense.is_none()) {
                let attack = to_card(&pile.attack);
                if let Some(card) = hand.iter().find(|c| beats(&attack, &to_card(c), trump)) {
                    return Some(ClientMessage::Defend {
                        pile_id: pile.id,
                        card_id: card.id,
                    });
                }
            }
        }
        if hints.can_take {
            return Some(ClientMessage::Take);
        }
    }

    if view.attacker_id == Some(view.you_id) {
        if hints.can_attack {
            let card = hand
                .iter()
                .find(|c| view.table.is_empty() || ranks_on_table.contains(&c.rank))?;
            return Some(ClientMessage::Attack { card_id: card.id });
        }
        if hints.can_end_turn {
            return Some(ClientMessage::EndTurn);
        }
    }

    None
}
