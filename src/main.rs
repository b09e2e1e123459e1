//! golf-settle CLI
//!
//! Settle side games and work out handicaps from the command line.
//!
//! # Usage
//!
//! ```bash
//! # Settle a batch of games
//! golf-settle settle --input games.json
//!
//! # Output as JSON
//! golf-settle settle --input games.json --format json
//!
//! # Strokes given between two players
//! golf-settle strokes --a 12.4 --b 8.2 --slope 131 --rating 73.2 --par 72
//!
//! # Generate a random season for testing
//! golf-settle generate --players 12 --games 40
//! ```

use golf_settle::config::EngineConfig;
use golf_settle::core::game::{Game, GameSet};
use golf_settle::core::player::PlayerId;
use golf_settle::handicap::engine::HandicapEngine;
use golf_settle::settlement::venmo::venmo_deep_link;
use golf_settle::simulation::stress_test::{generate_season, SeasonConfig};
use log::{debug, warn};
use rust_decimal::Decimal;
use std::fs;
use std::process;
use std::str::FromStr;

fn print_usage() {
    eprintln!(
        r#"golf-settle — side-game settlement and handicap calculator

USAGE:
    golf-settle <COMMAND> [OPTIONS]

COMMANDS:
    settle      Net a batch of scored games into payments
    handicap    Course handicap for one handicap index
    strokes     Strokes given between two players
    venmo       Build a Venmo payment link
    generate    Generate a random season (for testing)
    help        Show this message

OPTIONS (settle):
    --input <FILE>      Path to JSON games file
    --format <FORMAT>   Output format: text (default) or json
    --config <FILE>     Engine configuration (JSON)
    --strict            Refuse games that fail validation

OPTIONS (handicap, strokes):
    --index <X>         Handicap index (handicap)
    --a <X> --b <Y>     Handicap indexes of players A and B (strokes)
    --slope <S>         Slope rating (default: 113)
    --rating <R>        Course rating (default: par)
    --par <P>           Par (default: 72)

OPTIONS (venmo):
    --amount <N>        Amount to pay
    --note <TEXT>       Payment note (default from config)
    --to <USER>         Recipient username
    --config <FILE>     Engine configuration (JSON)

OPTIONS (generate):
    --players <N>       Number of players (default: 12)
    --games <N>         Number of games (default: 40)
    --output <FILE>     Write to file instead of stdout

EXAMPLES:
    golf-settle settle --input games.json
    golf-settle settle --input games.json --format json
    golf-settle handicap --index 12.4 --slope 131 --rating 73.2 --par 72
    golf-settle strokes --a 15.1 --b 5.8 --slope 125 --rating 71.4
    golf-settle venmo --amount 18 --note "Skins week 3" --to jake-fraser
    golf-settle generate --players 8 --games 20 --output season.json"#
    );
}

/// JSON schema for a games file.
#[derive(serde::Deserialize, serde::Serialize)]
struct GamesFile {
    /// Everyone to settle between. Defaults to every player in the games.
    #[serde(default)]
    user_ids: Option<Vec<PlayerId>>,
    games: Vec<Game>,
}

/// Parsed `--flag value` pairs plus bare switches.
struct Options {
    values: Vec<(String, String)>,
    switches: Vec<String>,
}

impl Options {
    fn parse(args: &[String], switches: &[&str]) -> Self {
        let mut values = Vec::new();
        let mut found = Vec::new();
        let mut i = 0;
        while i < args.len() {
            let flag = args[i].as_str();
            if !flag.starts_with("--") {
                fail(&format!("Unexpected argument: {}", flag));
            }
            if switches.contains(&flag) {
                found.push(flag.to_string());
            } else {
                i += 1;
                let value = args
                    .get(i)
                    .cloned()
                    .unwrap_or_else(|| fail(&format!("{} requires a value", flag)));
                values.push((flag.to_string(), value));
            }
            i += 1;
        }
        Self {
            values,
            switches: found,
        }
    }

    fn get(&self, flag: &str) -> Option<&str> {
        self.values
            .iter()
            .rev()
            .find(|(f, _)| f == flag)
            .map(|(_, v)| v.as_str())
    }

    fn has(&self, switch: &str) -> bool {
        self.switches.iter().any(|s| s == switch)
    }

    fn reject_unknown(&self, known: &[&str]) {
        for (flag, _) in &self.values {
            if !known.contains(&flag.as_str()) {
                fail(&format!("Unknown option: {}", flag));
            }
        }
    }

    fn parsed<T: FromStr>(&self, flag: &str) -> Option<T>
    where
        T::Err: std::fmt::Display,
    {
        self.get(flag).map(|raw| {
            raw.parse().unwrap_or_else(|e| {
                fail(&format!("Invalid value '{}' for {}: {}", raw, flag, e))
            })
        })
    }

    fn required<T: FromStr>(&self, flag: &str) -> T
    where
        T::Err: std::fmt::Display,
    {
        self.parsed(flag)
            .unwrap_or_else(|| fail(&format!("Error: {} is required", flag)))
    }
}

fn fail(message: &str) -> ! {
    eprintln!("{}", message);
    process::exit(1);
}

fn load_config(opts: &Options) -> EngineConfig {
    match opts.get("--config") {
        Some(path) => EngineConfig::from_file(path).unwrap_or_else(|e| fail(&e.to_string())),
        None => EngineConfig::default(),
    }
}

fn load_games(path: &str) -> GamesFile {
    let content = fs::read_to_string(path)
        .unwrap_or_else(|e| fail(&format!("Error reading file '{}': {}", path, e)));

    serde_json::from_str(&content).unwrap_or_else(|e| {
        eprintln!("Error parsing JSON: {}", e);
        eprintln!("Expected format:");
        eprintln!(
            r#"{{
  "user_ids": ["jake", "mike"],
  "games": [
    {{ "type": "match_play", "buy_in": 6, "player_ids": ["jake", "mike"], "results": {{ "jake": 1, "mike": 0 }} }}
  ]
}}"#
        );
        process::exit(1);
    })
}

fn cmd_settle(args: &[String]) {
    let opts = Options::parse(args, &["--strict"]);
    opts.reject_unknown(&["--input", "--format", "--config"]);
    let config = load_config(&opts);
    let path: String = opts.required("--input");
    let format = opts.get("--format").unwrap_or("text");

    let file = load_games(&path);
    for (i, game) in file.games.iter().enumerate() {
        if let Err(e) = game.validate() {
            if opts.has("--strict") {
                fail(&format!("Game {} ({}): {}", i, game.id(), e));
            }
            warn!("game {} ({}): {}", i, game.id(), e);
        }
    }

    let games = GameSet::from(file.games);
    let user_ids = file.user_ids.unwrap_or_else(|| games.players());
    debug!("settling {} games between {} players", games.len(), user_ids.len());

    let report = config.settlement_engine().settle(&games, &user_ids);
    if !report.is_balanced() {
        warn!("balances do not sum to zero; check for duplicate players");
    }

    match format {
        "json" => match serde_json::to_string_pretty(&report) {
            Ok(json) => println!("{}", json),
            Err(e) => fail(&format!("Error serializing report: {}", e)),
        },
        "text" => {
            println!("{}", report);
            for s in report.settlements() {
                println!("  {}", s.venmo_link(&config.venmo_note, None));
            }
        }
        other => fail(&format!("Unknown format '{}': use 'text' or 'json'", other)),
    }
}

fn course_args(opts: &Options) -> (Decimal, Decimal, i32) {
    let par: i32 = opts.parsed("--par").unwrap_or(72);
    let slope = opts.parsed("--slope").unwrap_or(Decimal::from(113));
    let rating = opts.parsed("--rating").unwrap_or(Decimal::from(par));
    (slope, rating, par)
}

fn cmd_handicap(args: &[String]) {
    let opts = Options::parse(args, &[]);
    opts.reject_unknown(&["--index", "--slope", "--rating", "--par"]);
    let index: Decimal = opts.required("--index");
    let (slope, rating, par) = course_args(&opts);

    println!(
        "{}",
        HandicapEngine::course_handicap(index, slope, rating, par)
    );
}

fn cmd_strokes(args: &[String]) {
    let opts = Options::parse(args, &[]);
    opts.reject_unknown(&["--a", "--b", "--slope", "--rating", "--par"]);
    let index_a: Decimal = opts.required("--a");
    let index_b: Decimal = opts.required("--b");
    let (slope, rating, par) = course_args(&opts);

    let alloc = HandicapEngine::strokes_given(index_a, index_b, slope, rating, par);
    println!("Course handicap A: {}", alloc.course_handicap_a);
    println!("Course handicap B: {}", alloc.course_handicap_b);
    println!("{}", alloc);
}

fn cmd_venmo(args: &[String]) {
    let opts = Options::parse(args, &[]);
    opts.reject_unknown(&["--amount", "--note", "--to", "--config"]);
    let config = load_config(&opts);
    let amount: Decimal = opts.required("--amount");
    let note = opts.get("--note").unwrap_or(&config.venmo_note);

    println!("{}", venmo_deep_link(amount, note, opts.get("--to")));
}

fn cmd_generate(args: &[String]) {
    let opts = Options::parse(args, &[]);
    opts.reject_unknown(&["--players", "--games", "--output"]);
    let config = SeasonConfig {
        player_count: opts.parsed("--players").unwrap_or(12),
        game_count: opts.parsed("--games").unwrap_or(40),
        ..Default::default()
    };

    let season = generate_season(&config);
    let output = GamesFile {
        user_ids: Some(season.players),
        games: season.games.games().to_vec(),
    };
    let json = serde_json::to_string_pretty(&output)
        .unwrap_or_else(|e| fail(&format!("Error serializing season: {}", e)));

    match opts.get("--output") {
        Some(path) => {
            fs::write(path, &json)
                .unwrap_or_else(|e| fail(&format!("Error writing to '{}': {}", path, e)));
            eprintln!(
                "Generated {} games across {} players → {}",
                output.games.len(),
                config.player_count,
                path
            );
        }
        None => println!("{}", json),
    }
}

fn main() {
    env_logger::init();

    let args: Vec<String> = std::env::args().collect();

    if args.len() < 2 {
        print_usage();
        process::exit(1);
    }

    let command = args[1].as_str();
    let rest = &args[2..];

    match command {
        "settle" => cmd_settle(rest),
        "handicap" => cmd_handicap(rest),
        "strokes" => cmd_strokes(rest),
        "venmo" => cmd_venmo(rest),
        "generate" => cmd_generate(rest),
        "help" | "--help" | "-h" => print_usage(),
        _ => {
            eprintln!("Unknown command: {}", command);
            print_usage();
            process::exit(1);
        }
    }
}
