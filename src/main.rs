use std::path::{Path, PathBuf};
use std::sync::Arc;

use anyhow::{Context, Result};
use axum::http::HeaderValue;
use clap::{Parser, Subcommand};
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use win_tally::api::state::AppState;
use win_tally::calculate::{
    build_catalog, build_columns, build_view, summarize_players, SortDirection, SortState,
};
use win_tally::calendar::{CalendarMapper, PersianCalendar};
use win_tally::clock::{Clock, FixedClock, SystemClock};
use win_tally::config::AppConfig;
use win_tally::models::{Column, DayKey, DisplayMonthId, Scoreboard, ScoreboardKey};
use win_tally::storage::{JsonlScoreboardStore, ScoreboardStore, StorageConfig};
use win_tally::update::{self, PlayerWins, ScoreboardError};

#[derive(Parser)]
#[command(name = "win-tally")]
#[command(about = "Season win tally with Persian-calendar monthly totals")]
#[command(version)]
struct Cli {
    /// Path to configuration file
    #[arg(long, default_value = "./config.toml")]
    config: String,

    /// Data directory path (overrides the config file)
    #[arg(long)]
    data_dir: Option<String>,

    /// Log level (trace, debug, info, warn, error)
    #[arg(long)]
    log_level: Option<String>,

    /// Output logs as JSON
    #[arg(long)]
    json_logs: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Start the API server
    Serve {
        /// Bind address
        #[arg(long)]
        host: Option<String>,

        /// Port number
        #[arg(long)]
        port: Option<u16>,

        /// Log all HTTP requests
        #[arg(long)]
        access_log: bool,
    },

    /// Create the configured scoreboard if it does not exist
    Init {
        /// Display title for the scoreboard
        #[arg(long)]
        title: Option<String>,
    },

    /// Print the scoreboard table and player summaries
    Show {
        /// Sort by this month's total (two-digit month number)
        #[arg(long)]
        sort: Option<String>,

        /// Sort ascending instead of descending
        #[arg(long)]
        asc: bool,

        /// Treat this day as today (YYYY-MM-DD)
        #[arg(long)]
        today: Option<String>,
    },

    /// Add a player to the scoreboard
    AddPlayer {
        /// Player name
        name: String,
    },

    /// Add a day's wins (additive)
    AddWins {
        /// Day the games were played (YYYY-MM-DD)
        #[arg(long)]
        date: String,

        /// Entries as name=wins
        #[arg(value_parser = parse_entry, required = true)]
        entries: Vec<PlayerWins>,
    },

    /// Set one player's wins for a day (replaces the value)
    SetCell {
        #[arg(long)]
        player: String,

        #[arg(long)]
        date: String,

        #[arg(long)]
        wins: u32,
    },
}

fn parse_entry(s: &str) -> Result<PlayerWins, String> {
    let (name, wins) = s
        .rsplit_once('=')
        .ok_or_else(|| format!("expected name=wins, got {}", s))?;
    let wins = wins
        .trim()
        .parse::<u32>()
        .map_err(|_| format!("wins must be a non-negative whole number: {}", wins))?;
    Ok(PlayerWins::new(name, wins))
}

fn parse_sort_month(raw: &str) -> Result<DisplayMonthId> {
    DisplayMonthId::parse_month_number(raw)
        .with_context(|| format!("--sort must be a two-digit month number (01-12), got {}", raw))
}

fn open_store(config: &AppConfig) -> JsonlScoreboardStore {
    JsonlScoreboardStore::new(&StorageConfig::new(config.data_dir.clone()))
}

async fn load_board(store: &dyn ScoreboardStore, key: &ScoreboardKey) -> Result<Scoreboard> {
    let board = store
        .load(key)
        .await?
        .ok_or_else(|| ScoreboardError::ScoreboardNotFound(key.clone()))?;
    Ok(board)
}

fn cors_layer(origin: &str) -> Result<CorsLayer> {
    if origin == "*" {
        return Ok(CorsLayer::permissive());
    }
    let origin: HeaderValue = origin
        .parse()
        .with_context(|| format!("Invalid CORS origin: {}", origin))?;
    Ok(CorsLayer::new()
        .allow_origin(origin)
        .allow_methods(Any)
        .allow_headers(Any))
}

fn column_label(column: &Column) -> &str {
    match column {
        Column::Date { label, .. } | Column::MonthTotal { label, .. } => label,
    }
}

fn print_board(board: &Scoreboard, sort: &SortState, today: &DayKey, calendar: &dyn CalendarMapper) {
    let view = build_view(board, sort, today, calendar);

    println!(
        "{} ({})",
        board.title.as_deref().unwrap_or("Scoreboard"),
        board.key()
    );
    println!("Today: {} ({})", today, calendar.day_label(today));
    println!();

    let name_width = view
        .rows
        .iter()
        .map(|r| r.name.chars().count())
        .max()
        .unwrap_or(0)
        .max(6);

    let mut header = format!("{:<width$}", "Player", width = name_width);
    for column in &view.columns {
        header.push_str(&format!("  {:>10}", column_label(column)));
    }
    println!("{}", header);

    for row in &view.rows {
        let mut line = format!("{:<width$}", row.name, width = name_width);
        for cell in &row.cells {
            line.push_str(&format!("  {:>10}", cell));
        }
        println!("{}", line);
    }

    let catalog = build_catalog(&board.dates, calendar);
    let columns = build_columns(&catalog, calendar);
    let summaries = summarize_players(&board.players, &catalog, &columns, today, calendar);

    println!();
    println!(
        "{:>4}  {:<width$}  {:>6}  {:>10}  {:>13}",
        "Rank",
        "Player",
        "Total",
        "Best month",
        "Current month",
        width = name_width
    );
    for s in &summaries {
        println!(
            "{:>4}  {:<width$}  {:>6}  {:>10}  {:>13}",
            s.rank,
            s.name,
            s.total,
            s.best_month_total,
            s.current_month_total,
            width = name_width
        );
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    let mut config = AppConfig::load_or_default(Path::new(&cli.config))?;
    if let Some(data_dir) = &cli.data_dir {
        config.data_dir = PathBuf::from(data_dir);
    }
    let log_level = cli.log_level.clone().unwrap_or_else(|| config.log_level.clone());

    // Initialize tracing
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(&log_level));

    let registry = tracing_subscriber::registry().with(filter);
    if cli.json_logs {
        registry.with(tracing_subscriber::fmt::layer().json()).init();
    } else {
        registry.with(tracing_subscriber::fmt::layer()).init();
    }

    tracing::info!("Starting win-tally v{}", env!("CARGO_PKG_VERSION"));

    let key = config.scoreboard.key();
    let store = open_store(&config);
    let calendar = PersianCalendar::new();

    match cli.command {
        Commands::Serve {
            host,
            port,
            access_log,
        } => {
            let host = host.unwrap_or_else(|| config.server.host.clone());
            let port = port.unwrap_or(config.server.port);

            let state = AppState::new(
                Arc::new(store),
                key,
                Arc::new(calendar),
                Arc::new(SystemClock),
            );
            let mut app = win_tally::api::build_router(state)
                .layer(cors_layer(&config.server.cors_origin)?);
            if access_log {
                app = app.layer(TraceLayer::new_for_http());
            }

            let addr = format!("{}:{}", host, port);
            let listener = tokio::net::TcpListener::bind(&addr).await?;
            tracing::info!("Scoreboard API: http://{}/api/scoreboard", addr);
            axum::serve(listener, app).await?;
        }
        Commands::Init { title } => {
            let title = title.or_else(|| config.scoreboard.title.clone());
            let board = Scoreboard::new(&key, title);
            store.create(&board).await?;
            println!("Created scoreboard {}", key);
        }
        Commands::Show { sort, asc, today } => {
            let clock: Box<dyn Clock> = match today {
                Some(day) => Box::new(FixedClock::new(DayKey::normalize(&day)?)),
                None => Box::new(SystemClock),
            };
            let direction = if asc {
                SortDirection::Asc
            } else {
                SortDirection::Desc
            };
            let sort = match sort {
                Some(month) => SortState::by(parse_sort_month(&month)?, direction),
                None => SortState::default(),
            };

            let board = load_board(&store, &key).await?;
            print_board(&board, &sort, &clock.today(), &calendar);
        }
        Commands::AddPlayer { name } => {
            let mut board = load_board(&store, &key).await?;
            let player = update::add_player(&mut board, &name, SystemClock.now())?.clone();
            store.save(&board).await?;
            println!("Added player {}", player.name);
        }
        Commands::AddWins { date, entries } => {
            let day = DayKey::normalize(&date)?;
            let mut board = load_board(&store, &key).await?;
            let report = update::apply_day_results(&mut board, &day, &entries, SystemClock.now())?;
            store.save(&board).await?;

            println!(
                "Added wins for players on {} (total: {})",
                report.day, report.total_wins
            );
            if !report.ignored_players.is_empty() {
                println!("Ignored unknown players: {}", report.ignored_players.join(", "));
            }
        }
        Commands::SetCell { player, date, wins } => {
            let day = DayKey::normalize(&date)?;
            let mut board = load_board(&store, &key).await?;
            update::set_cell_value(&mut board, &player, &day, wins, SystemClock.now())?;
            store.save(&board).await?;
            println!("Updated {}'s wins for {} to {}", player, day, wins);
        }
    }

    Ok(())
}
