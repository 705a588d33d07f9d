//! EcoRangers CLI - text-mode host for both engines
//!
//! Usage:
//!   ecorangers                               # Tilt game (default)
//!   ecorangers --play --seed 7               # Tilt game with fixed shuffle
//!   ecorangers --detect                      # Detection loop over stdin frames
//!   ecorangers --detect --json               # JSON reports
//!   ecorangers --config eco.json             # Custom vocabulary / timing / prompts

use std::path::PathBuf;
use std::sync::Arc;

use clap::Parser;
use colored::Colorize;
use tokio::io::{AsyncBufReadExt, BufReader};

use ecorangers::config::EngineConfig;
use ecorangers::core::{ClassifierFilter, CleanupTracker, DetectionStream, FrameParser, GameSession};
use ecorangers::telemetry::init_tracing;
use ecorangers::types::{display_name, DetectionReport, Feedback, GameState, PitchSample};
use ecorangers::VERSION;

#[derive(Parser, Debug)]
#[command(
    name = "ecorangers",
    version = VERSION,
    about = "EcoRangers - spot trash on camera, then play the tilt trivia game",
    long_about = "EcoRangers core engines driven from the terminal.\n\n\
                  Modes:\n  \
                  --play    Tilt game: type 'down' (correct), 'up' (pass), 'start', 'quit'\n  \
                  --detect  Detection loop: one frame per line, 'label=conf, ...'\n            \
                  '!reason' simulates a classifier failure, 'pick' picks the first item\n\n\
                  Phases:\n  \
                  RUNNING              - Countdown on, tilt to answer\n  \
                  AWAITING_NEXT_PROMPT - Answer taken, next card shortly\n  \
                  GAME_OVER            - Time up or deck exhausted"
)]
struct Args {
    /// Run the tilt game (default)
    #[arg(short, long)]
    play: bool,

    /// Run the detection loop over stdin frames
    #[arg(short, long, conflicts_with = "play")]
    detect: bool,

    /// JSON config file (vocabulary, timing, prompts)
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Fixed shuffle seed for the prompt deck
    #[arg(long)]
    seed: Option<u64>,

    /// Output as JSON
    #[arg(long)]
    json: bool,

    /// Disable colors in output
    #[arg(long)]
    no_color: bool,

    /// Default log level when RUST_LOG is unset
    #[arg(long, default_value = "warn")]
    log_level: String,
}

#[tokio::main]
async fn main() {
    let args = Args::parse();

    if init_tracing(&args.log_level).is_err() {
        eprintln!("logging already initialised");
    }
    if args.no_color {
        colored::control::set_override(false);
    }

    let config = match load_config(&args) {
        Ok(config) => config,
        Err(e) => {
            eprintln!("{} {}", "Config error:".red().bold(), e);
            std::process::exit(2);
        }
    };

    let result = if args.detect {
        run_detect(&args, &config).await
    } else {
        run_play(&args, &config).await
    };

    if let Err(e) = result {
        eprintln!("{} {}", "Error:".red().bold(), e);
        std::process::exit(1);
    }
}

fn load_config(args: &Args) -> Result<EngineConfig, ecorangers::error::ConfigError> {
    let mut config = match &args.config {
        Some(path) => EngineConfig::load(path)?,
        None => EngineConfig::default(),
    };
    if args.seed.is_some() {
        config.game.seed = args.seed;
    }
    config.validate()?;
    Ok(config)
}

/// Detection loop: stdin frames → DetectionStream → printer task
async fn run_detect(args: &Args, config: &EngineConfig) -> Result<(), Box<dyn std::error::Error>> {
    let filter = ClassifierFilter::from_config(&config.detection)?;
    let stream = Arc::new(DetectionStream::new(filter));
    let parser = FrameParser::new();
    let mut tracker = CleanupTracker::new();

    print_header("Detection", args.no_color);
    println!("One frame per line: label=confidence, label=confidence");
    println!("'!reason' = classifier failure, 'pick' = pick first item, 'quit' = exit");
    println!();

    let json = args.json;
    let printer = stream.subscribe_with(move |report| print_report(&report, json));

    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    while let Some(line) = lines.next_line().await? {
        let line = line.trim();
        if line.eq_ignore_ascii_case("quit") || line.eq_ignore_ascii_case("exit") {
            break;
        }
        if line.eq_ignore_ascii_case("pick") {
            let latest = stream.latest();
            match latest.as_ref().and_then(|r| tracker.pick(r)) {
                Some(category) => println!(
                    "{} Picked {} (+{}) | cleanup score={}",
                    "✓".green(),
                    display_name(&category),
                    ecorangers::PICK_POINTS,
                    tracker.score()
                ),
                None => println!("{}", "No Trash Detected".dimmed()),
            }
            continue;
        }
        stream.publish(parser.parse(line));
    }

    // Let the printer drain, then close the stream
    tokio::task::yield_now().await;
    drop(stream);
    let _ = printer.await;

    println!();
    println!(
        "Session ended. Cleanup score: {} ({} picks)",
        tracker.score(),
        tracker.total_picks()
    );
    Ok(())
}

/// Tilt game: stdin commands → GameSession, snapshots printed as broadcast
async fn run_play(args: &Args, config: &EngineConfig) -> Result<(), Box<dyn std::error::Error>> {
    let session = GameSession::from_config(&config.game)?;
    let mut updates = session.subscribe();

    print_header("Tilt Game", args.no_color);
    println!("Tilt DOWN if guessed correctly: type 'down' (or 'd')");
    println!("Tilt UP to pass: type 'up' (or 'u')");
    println!("'start' plays again, 'quit' exits.");
    println!();

    session.start().await?;

    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    loop {
        tokio::select! {
            update = updates.recv() => match update {
                Ok(state) => print_state(&state, args.json),
                Err(tokio::sync::broadcast::error::RecvError::Lagged(_)) => continue,
                Err(tokio::sync::broadcast::error::RecvError::Closed) => break,
            },
            line = lines.next_line() => {
                let Some(line) = line? else { break };
                let line = line.trim().to_lowercase();
                match line.as_str() {
                    "quit" | "exit" => break,
                    "start" | "again" => session.start().await?,
                    "down" | "d" => session.pitch(PitchSample::new(-1.0, true)).await?,
                    "up" | "u" => session.pitch(PitchSample::new(1.0, true)).await?,
                    "" => {}
                    other => println!("{}", format!("unknown command '{}'", other).yellow()),
                }
            }
        }
    }

    let last = session.latest();
    session.shutdown().await;
    println!();
    println!("Session ended. Score: {}", last.score);
    Ok(())
}

fn print_header(mode: &str, no_color: bool) {
    let title = format!("EcoRangers v{} - {}", VERSION, mode);
    if no_color {
        println!("========================================");
        println!("  {}", title);
        println!("========================================");
    } else {
        println!("{}", "════════════════════════════════════════".green());
        println!("  {}", title.green().bold());
        println!("{}", "════════════════════════════════════════".green());
    }
    println!();
}

fn print_report(report: &DetectionReport, json: bool) {
    if json {
        match serde_json::to_string(report) {
            Ok(line) => println!("{}", line),
            Err(e) => eprintln!("failed to encode report: {}", e),
        }
    } else if report.is_degraded() {
        println!("{}", report.to_parseable_string().red());
    } else if report.categories.is_empty() {
        println!("{}", report.to_parseable_string().dimmed());
    } else {
        println!("{}", report.to_parseable_string().green());
    }
}

fn print_state(state: &GameState, json: bool) {
    if json {
        match serde_json::to_string(state) {
            Ok(line) => println!("{}", line),
            Err(e) => eprintln!("failed to encode state: {}", e),
        }
        return;
    }

    if colored::control::SHOULD_COLORIZE.should_colorize() {
        println!("{}", state.to_terminal_string());
    } else {
        println!("{}", state.to_parseable_string());
    }

    match state.feedback() {
        Some(Feedback::Success) => println!("{}", "  *bzz* success".green()),
        Some(Feedback::Warning) => println!("{}", "  *bzz bzz* warning".yellow()),
        None => {}
    }

    if state.reason.is_terminal() {
        println!();
        println!("{}", state.summary().bold());
        println!("Type 'start' to play again.");
    }
}
