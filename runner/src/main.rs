// ═══════════════════════════════════════════════════════════════════════
// Runner: CLI entry point for dealing and stepping seeded games
// ═══════════════════════════════════════════════════════════════════════

use cluedo_engine::navigation::reachable_within;
use cluedo_engine::visibility::participant_view;
use cluedo_engine::{advance_turn, create_game, standard_board, Board, GameConfig, GameState, GridBoard, PlayerId};
use clap::{Parser, Subcommand};
use std::process::ExitCode;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "cluedo-runner", about = "Seeded Cluedo rules engine")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Set up a game and show who got what
    Deal {
        #[arg(short, long, default_value_t = 42)]
        seed: u64,
        #[arg(short, long, default_value_t = 3)]
        players: usize,
    },
    /// Print one participant's view of a fresh game as JSON
    View {
        #[arg(short, long, default_value_t = 42)]
        seed: u64,
        #[arg(short, long, default_value_t = 3)]
        players: usize,
        /// Zero-based seat of the viewer
        #[arg(long, default_value_t = 0)]
        player: u8,
    },
    /// Roll the first turn and list every legal destination for it
    Moves {
        #[arg(short, long, default_value_t = 42)]
        seed: u64,
        #[arg(short, long, default_value_t = 3)]
        players: usize,
    },
    /// Advance a fresh game by K turns
    Turns {
        #[arg(short, long, default_value_t = 42)]
        seed: u64,
        #[arg(short, long, default_value_t = 3)]
        players: usize,
        #[arg(short, long, default_value_t = 10)]
        count: u32,
    },
}

fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    let result = match cli.command {
        Commands::Deal { seed, players } => cmd_deal(seed, players),
        Commands::View { seed, players, player } => cmd_view(seed, players, player),
        Commands::Moves { seed, players } => cmd_moves(seed, players),
        Commands::Turns { seed, players, count } => cmd_turns(seed, players, count),
    };

    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("error: {e}");
            ExitCode::FAILURE
        }
    }
}

fn new_game(seed: u64, player_count: usize) -> Result<(GameState, GridBoard), String> {
    let mut board = standard_board();
    let state = create_game(&mut board, &GameConfig { player_count, seed }).map_err(|e| e.to_string())?;
    Ok((state, board))
}

fn cmd_deal(seed: u64, player_count: usize) -> Result<(), String> {
    let (state, _) = new_game(seed, player_count)?;
    println!("=== Cluedo: seed={seed}, players={player_count} ===\n");
    for p in &state.players {
        let start = p.position.map(|t| t.to_string()).unwrap_or_else(|| "-".to_string());
        let hand: Vec<String> = p.hand.iter().map(|c| c.to_string()).collect();
        println!("  {} [{}] {:16} start {:>4}  hand: {}", p.id, p.token, p.character, start, hand.join(", "));
    }
    Ok(())
}

fn cmd_view(seed: u64, player_count: usize, viewer: u8) -> Result<(), String> {
    let (state, _) = new_game(seed, player_count)?;
    if viewer as usize >= state.player_count() {
        return Err(format!("no participant at seat {viewer}"));
    }
    let view = participant_view(&state, PlayerId(viewer));
    tracing::debug!(viewer, cards = view.hand.len(), "rendering participant view");
    let json = serde_json::to_string_pretty(&view).map_err(|e| e.to_string())?;
    println!("{json}");
    Ok(())
}

fn cmd_moves(seed: u64, player_count: usize) -> Result<(), String> {
    let (mut state, board) = new_game(seed, player_count)?;
    advance_turn(&mut state);
    let p = state.current_player();
    let from = p.position.ok_or_else(|| format!("{} is not on the board", p.id))?;
    let destinations = reachable_within(&board, from, state.roll as usize);

    println!("{} ({}) rolled {} from {from}: {} destinations", p.id, p.character, state.roll, destinations.len());
    for tile in destinations {
        let id = tile.to_string();
        match (board.room_at(tile), board.tile(tile).and_then(|t| t.pos)) {
            (Some(room), _) => println!("  {id:>4}  room {room}"),
            (None, Some((x, y))) => println!("  {id:>4}  square ({x}, {y})"),
            (None, None) => println!("  {id:>4}"),
        }
    }
    Ok(())
}

fn cmd_turns(seed: u64, player_count: usize, count: u32) -> Result<(), String> {
    let (mut state, _) = new_game(seed, player_count)?;
    for turn in 1..=count {
        advance_turn(&mut state);
        let p = state.current_player();
        println!("turn {turn:>3}: {} ({}) rolled {:>2}", p.id, p.character, state.roll);
        if state.complete {
            println!("game over, winner: {}", state.winner.map(|w| w.to_string()).unwrap_or_else(|| "none".to_string()));
            break;
        }
    }
    Ok(())
}
