//! TONSign CLI
//!
//! Usage:
//!   tonsign                                 # Watch the newest game log, send OSC
//!   tonsign --lang ja --debug               # Japanese messages, debug output
//!   tonsign --replay output_log.txt --json  # Process a saved log once
//!   tonsign --serve                         # Also run the status API

use std::path::PathBuf;
use std::process::ExitCode;
use std::time::Duration;
use clap::Parser;
use colored::Colorize;
use tracing::{error, info, warn};

use tonsign::core::{
    default_log_dir, init_logging, run_server, Localizer, OscSink, OutputMode, Reporter,
    RoundCatalog, Session, StatusBoard, Watcher,
};
use tonsign::{OSC_DEFAULT_TARGET, OSC_PARAMETER_PATH, POLL_INTERVAL_SECS, VERSION};

#[derive(Parser, Debug)]
#[command(
    name = "tonsign",
    version = VERSION,
    about = "TONSign - Predict SPECIAL/CLASSIC rounds in Terrors of Nowhere",
    long_about = "TONSign follows the newest VRChat log, classifies every announced\n\
                  Terrors of Nowhere round and predicts whether the next round is\n\
                  SPECIAL or CLASSIC. The prediction is sent as the boolean avatar\n\
                  parameter /avatar/parameters/TON_Sign over OSC.\n\n\
                  Rules:\n  \
                  < 2 rounds recorded      - CLASSIC\n  \
                  > 2 specials in last 6   - alternate (also while BONUS ACTIVE!)\n  \
                  two classics in a row    - SPECIAL\n  \
                  otherwise                - CLASSIC"
)]
struct Args {
    /// Language of log messages (en, ja, or a pack from --lang-dir)
    #[arg(short, long, default_value = "en", env = "TONSIGN_LANG")]
    lang: String,

    /// Debug output
    #[arg(long)]
    debug: bool,

    /// Directory containing the game's output_log_*.txt files
    #[arg(long, env = "TONSIGN_LOG_DIR")]
    log_dir: Option<PathBuf>,

    /// OSC receiver address
    #[arg(long, default_value = OSC_DEFAULT_TARGET, env = "TONSIGN_OSC_ADDR")]
    osc_addr: String,

    /// OSC address pattern of the avatar parameter
    #[arg(long, default_value = OSC_PARAMETER_PATH)]
    osc_path: String,

    /// Seconds between log polls
    #[arg(long, default_value_t = POLL_INTERVAL_SECS)]
    poll_secs: u64,

    /// Round catalog YAML (default: built-in)
    #[arg(long)]
    catalog: Option<PathBuf>,

    /// Directory with extra *.yml language packs
    #[arg(long)]
    lang_dir: Option<PathBuf>,

    /// Process an existing log file once and exit
    #[arg(long)]
    replay: Option<PathBuf>,

    /// Print each prediction as JSON
    #[arg(long)]
    json: bool,

    /// Print a summary line for each prediction
    #[arg(long)]
    verbose: bool,

    /// Disable colors in output
    #[arg(long)]
    no_color: bool,

    /// Do not send OSC messages
    #[arg(long)]
    dry_run: bool,

    /// Run the HTTP status API
    #[arg(short, long)]
    serve: bool,

    /// Status API address (default: 127.0.0.1:3000)
    #[arg(long, default_value = "127.0.0.1:3000")]
    addr: String,

    /// Directory for this program's own logs (latest.log, Logs/)
    #[arg(long, default_value = ".")]
    app_log_dir: PathBuf,

    /// Print the test message and exit (CI smoke check)
    #[arg(long)]
    test: bool,
}

#[tokio::main]
async fn main() -> ExitCode {
    let args = Args::parse();

    if args.no_color {
        colored::control::set_override(false);
    }
    if let Err(e) = init_logging(&args.app_log_dir, args.debug, !args.no_color) {
        eprintln!("{} {}", "error:".red().bold(), e);
        return ExitCode::FAILURE;
    }

    match run(args).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            error!("{}", e);
            ExitCode::FAILURE
        }
    }
}

async fn run(args: Args) -> Result<(), Box<dyn std::error::Error>> {
    let mut localizer = Localizer::new(&args.lang)?;
    if let Some(dir) = &args.lang_dir {
        localizer = localizer.with_dir(dir)?;
    }
    if !localizer.has_language(&args.lang) {
        warn!("no language pack for {:?}, using English", args.lang);
    }

    if args.test {
        info!("{}", localizer.get("log.test"));
        return Ok(());
    }

    let catalog = match &args.catalog {
        Some(path) => RoundCatalog::from_path(path)?,
        None => RoundCatalog::standard()?,
    };

    let mode = if args.json {
        OutputMode::Json
    } else if args.verbose && args.no_color {
        OutputMode::Parseable
    } else if args.verbose {
        OutputMode::Terminal
    } else {
        OutputMode::Log
    };

    let log_dir = args
        .log_dir
        .clone()
        .or_else(default_log_dir)
        .ok_or("cannot determine the game log directory, pass --log-dir")?;

    if mode != OutputMode::Json {
        print_header(args.no_color);
    }

    let reporter = Reporter::new(localizer.clone(), mode);
    let session = Session::new(catalog);
    let mut watcher = Watcher::new(session, reporter, log_dir, Duration::from_secs(args.poll_secs.max(1)));

    if !args.dry_run {
        let sink = OscSink::connect(&args.osc_addr, args.osc_path.as_str()).await?;
        let target = sink.target().to_string();
        info!("{}", localizer.format("log.osc_target", &[target.as_str(), sink.address()]));
        watcher = watcher.with_sink(sink);
    }

    if args.serve {
        let board = StatusBoard::new();
        watcher = watcher.with_board(board.clone());
        let addr = args.addr.clone();
        info!("{}", localizer.format("log.api_listening", &[addr.as_str()]));
        tokio::spawn(async move {
            if let Err(e) = run_server(&addr, board).await {
                error!("status API error: {}", e);
            }
        });
    }

    if let Some(path) = &args.replay {
        watcher.replay(path).await?;
        return Ok(());
    }

    watcher.run().await;
    Ok(())
}

/// Print header
fn print_header(no_color: bool) {
    let title = format!("TONSign v{} - Classic or Special", VERSION);
    if no_color {
        println!("========================================");
        println!("  {}", title);
        println!("========================================");
    } else {
        println!("{}", "════════════════════════════════════════".bright_black());
        println!("  {}", title.bold());
        println!("{}", "════════════════════════════════════════".bright_black());
    }
    println!();
}
