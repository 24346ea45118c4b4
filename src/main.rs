use clap::{Parser, Subcommand};
use std::path::PathBuf;
use std::time::Instant;

use clanboard::cache::{clear_disk_cache, get_cache_path, RosterCache};
use clanboard::config::Config;
use clanboard::fetch::{fetch_and_score, FetchOptions, LeaderboardOutcome, RosterOrigin};
use clanboard::output;

const EXIT_SUCCESS: i32 = 0;
const EXIT_SOURCE: i32 = 2;
const EXIT_OUTPUT: i32 = 3;
const EXIT_CONFIG: i32 = 4;

#[derive(Subcommand, Debug)]
enum Commands {
    /// Show the ranked leaderboard in the terminal (default if no subcommand)
    List,
    /// Render the leaderboard as an HTML page
    Html {
        /// Write to this file instead of stdout
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
    /// Export the full scored table as CSV
    Export {
        /// Write to this file instead of stdout
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
    /// Re-render the HTML page every refresh interval until interrupted
    Watch {
        /// HTML file to keep up to date
        #[arg(short, long)]
        output: PathBuf,
    },
    /// Delete the on-disk roster cache
    ClearCache,
}

#[derive(Parser, Debug)]
#[command(name = "clanboard")]
#[command(about = "Fairness-adjusted clan leaderboard", long_about = None)]
#[command(version)]
struct Cli {
    /// Enable verbose logging
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Path to config file (defaults to ~/.config/clanboard/config.yaml)
    #[arg(short, long, global = true)]
    config: Option<String>,

    /// Roster location (CSV or xlsx), URL or path (overrides CLANBOARD_SOURCE and the config file)
    #[arg(short, long, global = true)]
    source: Option<String>,

    /// Bypass the roster cache
    #[arg(long, global = true)]
    no_cache: bool,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[tokio::main]
async fn main() {
    let cli = Cli::parse();
    clanboard::logging::init(cli.verbose);
    let command = cli.command.unwrap_or(Commands::List);
    let start_time = Instant::now();

    if let Commands::ClearCache = command {
        let cache_path = get_cache_path();
        if let Err(e) = clear_disk_cache(&cache_path) {
            eprintln!("Failed to clear cache: {:#}", e);
            std::process::exit(EXIT_OUTPUT);
        }
        println!("Cleared roster cache at {}", cache_path.display());
        std::process::exit(EXIT_SUCCESS);
    }

    // Load config
    let config_path = cli.config.map(PathBuf::from);
    let config = match clanboard::config::load_config(config_path) {
        Ok(c) => c,
        Err(e) => {
            eprintln!("Config error: {:#}", e);
            std::process::exit(EXIT_CONFIG);
        }
    };

    if let Err(errors) = clanboard::config::validate_config(&config) {
        eprintln!("Config errors:");
        for error in errors {
            eprintln!("  - {}", error);
        }
        std::process::exit(EXIT_CONFIG);
    }

    let Some(source) = config.resolve_source(cli.source) else {
        eprintln!("No roster source configured.");
        eprintln!("Pass --source, set CLANBOARD_SOURCE, or add to ~/.config/clanboard/config.yaml:");
        eprintln!("  source: \"https://docs.google.com/spreadsheets/d/<id>/export?format=csv\"");
        std::process::exit(EXIT_CONFIG);
    };

    let options = match fetch_options(&config, source) {
        Ok(o) => o,
        Err(e) => {
            eprintln!("Config error: {:#}", e);
            std::process::exit(EXIT_CONFIG);
        }
    };

    let mut cache = if cli.no_cache {
        RosterCache::disabled()
    } else {
        RosterCache::persistent(get_cache_path())
    };
    let cache_status = if cache.is_enabled() {
        "enabled"
    } else {
        "disabled (--no-cache)"
    };
    tracing::debug!(
        source = %options.source,
        refresh = %humantime::format_duration(options.refresh_interval),
        cache = cache_status,
        "starting"
    );

    if let Commands::Watch { output: path } = &command {
        let code = watch(&options, &config, &mut cache, path).await;
        std::process::exit(code);
    }

    let outcome = fetch_and_score(&options, &config.scoring, &mut cache, chrono::Utc::now()).await;
    if let Some(warning) = &outcome.warning {
        eprintln!("Warning: {}", warning);
    }

    let written = match command {
        Commands::List => {
            let use_colors = output::should_use_colors();
            println!("{}", output::format_leaderboard_table(&outcome.leaderboard, use_colors));
            if cli.verbose {
                for entry in &outcome.leaderboard {
                    eprintln!("{}", output::format_breakdown(entry));
                }
            }
            Ok(())
        }
        Commands::Html { output: path } => {
            let page = output::render_html_with_notice(&outcome.leaderboard, outcome.warning.as_deref());
            emit(path.as_deref(), &page)
        }
        Commands::Export { output: path } => {
            output::format_csv(&outcome.leaderboard).and_then(|csv| emit(path.as_deref(), &csv))
        }
        Commands::Watch { .. } | Commands::ClearCache => unreachable!("handled above"),
    };

    if let Err(e) = &written {
        eprintln!("Output error: {:#}", e);
    }

    tracing::debug!(
        members = outcome.leaderboard.len(),
        elapsed = ?start_time.elapsed(),
        "done"
    );

    std::process::exit(exit_code(&outcome, &written));
}

fn fetch_options(config: &Config, source: String) -> anyhow::Result<FetchOptions> {
    Ok(FetchOptions {
        source,
        refresh_interval: config.refresh_interval()?,
        fetch_timeout: config.fetch_timeout()?,
    })
}

fn emit(path: Option<&std::path::Path>, contents: &str) -> anyhow::Result<()> {
    match path {
        Some(path) => {
            output::write_atomically(path, contents)?;
            eprintln!("Wrote {}", path.display());
            Ok(())
        }
        None => {
            print!("{}", contents);
            Ok(())
        }
    }
}

/// A failed write wins over an unavailable source: nothing was rendered.
fn exit_code(outcome: &LeaderboardOutcome, written: &anyhow::Result<()>) -> i32 {
    if written.is_err() {
        return EXIT_OUTPUT;
    }
    match outcome.origin {
        RosterOrigin::Unavailable => EXIT_SOURCE,
        _ => EXIT_SUCCESS,
    }
}

async fn watch(
    options: &FetchOptions,
    config: &Config,
    cache: &mut RosterCache,
    path: &std::path::Path,
) -> i32 {
    let mut ticker = tokio::time::interval(options.refresh_interval);
    ticker.set_missed_tick_behavior(tokio::time::MissedTickBehavior::Delay);

    loop {
        tokio::select! {
            _ = ticker.tick() => {
                let outcome = fetch_and_score(options, &config.scoring, cache, chrono::Utc::now()).await;
                if let Some(warning) = &outcome.warning {
                    tracing::warn!("{}", warning);
                }
                let page = output::render_html_with_notice(&outcome.leaderboard, outcome.warning.as_deref());
                match output::write_atomically(path, &page) {
                    Ok(()) => tracing::info!(
                        path = %path.display(),
                        members = outcome.leaderboard.len(),
                        origin = ?outcome.origin,
                        "leaderboard rendered"
                    ),
                    Err(e) => tracing::error!(error = %format!("{:#}", e), "failed to write leaderboard"),
                }
            }
            _ = tokio::signal::ctrl_c() => {
                tracing::info!("interrupted, stopping");
                return EXIT_SUCCESS;
            }
        }
    }
}
