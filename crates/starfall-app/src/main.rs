//! starfall: headless STARFALL combat runner.
//!
//! Usage:
//!   starfall [--config combat.json] [--ticks N] [--seed N] [--ground]
//!            [--class titan|phantom] [--realtime SECS]

use std::path::PathBuf;
use std::process;
use std::time::Duration;

use starfall_app::autopilot::{self, AutopilotOptions};
use starfall_app::client::GameClient;
use starfall_core::commands::ModeCommand;
use starfall_core::config::CombatConfig;
use starfall_core::enums::PlayerClass;
use starfall_core::Vec3;

fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let args: Vec<String> = std::env::args().skip(1).collect();
    if args.iter().any(|a| a == "--help" || a == "-h") {
        print_usage();
        return;
    }

    let mut config = match flag_value(&args, "--config") {
        Some(path) => CombatConfig::load(&PathBuf::from(path)),
        None => CombatConfig::default(),
    };
    if let Some(seed) = parse_flag::<u64>(&args, "--seed") {
        config.seed = seed;
    }
    if let Err(e) = config.validate() {
        eprintln!("Invalid config: {e}");
        process::exit(1);
    }

    let class = match flag_value(&args, "--class") {
        None | Some("titan") => PlayerClass::Titan,
        Some("phantom") => PlayerClass::Phantom,
        Some(other) => {
            eprintln!("Unknown class: {other}");
            print_usage();
            process::exit(1);
        }
    };

    if let Some(secs) = parse_flag::<f32>(&args, "--realtime") {
        run_realtime(config, class, secs, args.iter().any(|a| a == "--ground"));
        return;
    }

    let options = AutopilotOptions {
        ticks: parse_flag(&args, "--ticks").unwrap_or(1800),
        ground: args.iter().any(|a| a == "--ground"),
        terrain_seed: config.seed,
        class,
    };

    match autopilot::run(config, &options) {
        Ok(summary) => match serde_json::to_string_pretty(&summary) {
            Ok(json) => println!("{json}"),
            Err(e) => {
                eprintln!("Failed to encode summary: {e}");
                process::exit(1);
            }
        },
        Err(e) => {
            eprintln!("Combat session failed: {e}");
            process::exit(1);
        }
    }
}

/// Run the threaded game loop in real time and print the final snapshot.
fn run_realtime(config: CombatConfig, class: PlayerClass, secs: f32, ground: bool) {
    let seed = config.seed;
    let client = GameClient::new();
    if let Err(e) = client.start(config, class) {
        eprintln!("Failed to start game loop: {e}");
        process::exit(1);
    }

    let enter = if ground {
        ModeCommand::EnterGroundCombat {
            origin: Vec3::ZERO,
            terrain_seed: seed,
        }
    } else {
        ModeCommand::EnterSpaceCombat { origin: Vec3::ZERO }
    };
    if let Err(e) = client.send(enter) {
        eprintln!("Failed to enter combat: {e}");
        process::exit(1);
    }

    std::thread::sleep(Duration::try_from_secs_f32(secs).unwrap_or_default());

    let snapshot = client.snapshot();
    if let Err(e) = client.shutdown() {
        log::warn!("Shutdown: {}", e);
    }
    match snapshot {
        Ok(Some(snapshot)) => match serde_json::to_string_pretty(&snapshot) {
            Ok(json) => println!("{json}"),
            Err(e) => eprintln!("Failed to encode snapshot: {e}"),
        },
        Ok(None) => eprintln!("No frame ran"),
        Err(e) => eprintln!("Failed to read snapshot: {e}"),
    }
}

fn print_usage() {
    eprintln!(
        "starfall: headless STARFALL combat runner\n\
         \n\
           --config <path>    Combat config JSON (missing or invalid falls back to defaults)\n\
           --ticks <N>        Frames to simulate (default: 1800)\n\
           --seed <N>         Override the config RNG seed\n\
           --ground           Fight on generated terrain instead of in space\n\
           --class <name>     titan (default) or phantom\n\
           --realtime <secs>  Run the threaded game loop for SECS and print the last snapshot\n\
         \n\
         Examples:\n\
         \n\
           starfall --ticks 3600 --seed 7\n\
           starfall --ground --class phantom\n"
    );
}

fn flag_value<'a>(args: &'a [String], flag: &str) -> Option<&'a str> {
    args.iter()
        .position(|a| a == flag)
        .and_then(|i| args.get(i + 1))
        .map(String::as_str)
}

fn parse_flag<T: std::str::FromStr>(args: &[String], flag: &str) -> Option<T> {
    let value = flag_value(args, flag)?;
    match value.parse() {
        Ok(v) => Some(v),
        Err(_) => {
            eprintln!("Invalid value for {flag}: {value}");
            process::exit(1);
        }
    }
}
