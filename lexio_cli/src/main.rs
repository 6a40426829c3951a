//! Play lexio in the terminal against computer opponents.
//!
//! The game runs in a table actor. This binary renders every state change
//! it is notified of and forwards the human's commands.

use anyhow::{Context, Result, bail};
use lexio::{
    Command, GameEngine, Phase, PlayerId,
    table::{StateChangeNotification, TableActor, TableError, TableHandle},
};
use lexio_cli::{
    commands::{Input, parse_input},
    config::{CliConfig, Overrides},
    view,
};
use log::info;
use pico_args::Arguments;
use std::io::Write;
use tokio::io::{AsyncBufReadExt, BufReader};

const HELP: &str = "\
Play lexio against computer opponents

USAGE:
  lexio_cli [OPTIONS]

OPTIONS:
  --name NAME           Your display name          [default: env LEXIO_PLAYER_NAME or Player]
  --players N           Seats at the table, 2-5    [default: env LEXIO_PLAYERS or 3]
  --difficulty LEVEL    easy, medium or hard       [default: env LEXIO_DIFFICULTY or medium]
  --rounds N            Rounds per game            [default: env LEXIO_ROUNDS or 3]
  --think-min MS        Shortest bot thinking time [default: env LEXIO_THINK_MIN_MS or 1000]
  --think-max MS        Longest bot thinking time  [default: env LEXIO_THINK_MAX_MS or 3000]
  --seed N              Seed shuffles and bots for a reproducible game

FLAGS:
  --json                Print the final state as JSON when a game ends
  -h, --help            Print help information

COMMANDS (in game):
  play <cards>          Cards by position in your hand or by name: play 1 2, play c3 s3
  pass                  Pass your turn
  round                 Start the next round
  new                   Start a new game
  status                Show the table
  quit                  Leave
";

const SUBSCRIBER_ID: u64 = 0;

struct Args {
    overrides: Overrides,
    seed: Option<u64>,
    json: bool,
}

#[tokio::main]
async fn main() -> Result<()> {
    // Load .env file if it exists
    let _ = dotenvy::dotenv();

    let mut pargs = Arguments::from_env();

    // Help has a higher priority and should be handled separately.
    if pargs.contains(["-h", "--help"]) {
        print!("{HELP}");
        std::process::exit(0);
    }

    let args = Args {
        overrides: Overrides {
            player_name: pargs.opt_value_from_str("--name")?,
            player_count: pargs.opt_value_from_str("--players")?,
            difficulty: pargs.opt_value_from_str("--difficulty")?,
            max_rounds: pargs.opt_value_from_str("--rounds")?,
            think_min_ms: pargs.opt_value_from_str("--think-min")?,
            think_max_ms: pargs.opt_value_from_str("--think-max")?,
        },
        seed: pargs.opt_value_from_str("--seed")?,
        json: pargs.contains("--json"),
    };

    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info"))
        .format_target(false)
        .init();

    let config = CliConfig::from_env(args.overrides).context("Invalid configuration")?;
    run(config, args.seed, args.json).await
}

async fn run(config: CliConfig, seed: Option<u64>, json: bool) -> Result<()> {
    let engine = seed.map_or_else(GameEngine::new, GameEngine::with_seed);
    let (actor, table) = TableActor::new(config.table.clone(), engine);
    tokio::spawn(actor.run());

    let mut updates = table.subscribe(SUBSCRIBER_ID, 64).await?;
    table
        .start_game(config.game.clone())
        .await
        .context("Failed to start game")?;
    info!(
        "{} sits down with {} {} bots",
        config.game.player_name,
        config.game.player_count - 1,
        config.game.ai_difficulty
    );

    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    loop {
        tokio::select! {
            update = updates.recv() => {
                let Some(StateChangeNotification::StateChanged(state)) = update else {
                    bail!("Table stopped unexpectedly");
                };
                println!("\n{}", view::render_table(&state));
                if state.phase == Phase::GameEnd && json {
                    println!("{}", serde_json::to_string_pretty(&state)?);
                }
                prompt(view::render_prompt(&state, 0))?;
            }

            line = lines.next_line() => {
                let Some(line) = line? else {
                    break;
                };
                if !handle_line(&table, &config, &line).await? {
                    break;
                }
            }
        }
    }

    table.close().await.ok();
    println!("Bye!");
    Ok(())
}

/// Apply one line of input. Returns false when the user wants to leave.
async fn handle_line(table: &TableHandle, config: &CliConfig, line: &str) -> Result<bool> {
    let state = table.state().await?;
    let hand = state
        .player(&PlayerId::human())
        .map(view::sorted_hand)
        .unwrap_or_default();

    let input = match parse_input(line, &hand) {
        Ok(input) => input,
        Err(e) => {
            println!("{e}");
            return Ok(true);
        }
    };

    match input {
        Input::Quit => return Ok(false),
        Input::Help => print!("{HELP}"),
        Input::Status => {
            println!("{}", view::render_table(&state));
            prompt(view::render_prompt(&state, 0))?;
        }
        Input::Game(Command::NewGame) => {
            table.submit(PlayerId::human(), Command::NewGame).await?;
            table
                .start_game(config.game.clone())
                .await
                .context("Failed to restart game")?;
        }
        Input::Game(command) => match table.submit(PlayerId::human(), command).await {
            Ok(()) => {}
            Err(TableError::Action(e)) => println!("Rejected: {e}"),
            Err(e) => return Err(e.into()),
        },
    }
    Ok(true)
}

fn prompt(text: Option<String>) -> Result<()> {
    if let Some(text) = text {
        print!("{text} ");
        std::io::stdout().flush()?;
    }
    Ok(())
}
