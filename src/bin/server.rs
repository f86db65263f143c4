use std::{fs::OpenOptions, net::SocketAddr, process::exit, sync::Arc};

use axum::{
    Router,
    extract::{MatchedPath, Request},
    middleware,
};
use axum_server::Handle;
use clap::Parser;
use rusqlite::Connection;
use time::OffsetDateTime;
use tower_http::trace::TraceLayer;

#[cfg(debug_assertions)]
use tower_livereload::LiveReloadLayer;

use tracing_subscriber::{Layer, filter, layer::SubscriberExt, util::SubscriberInitExt};

use budget_tracker::{
    AppState, CategoryCatalog, Currency, DataSource, DataSourceKind, FixtureDataSource,
    SqliteDataSource, build_router, default_categories, get_local_offset, graceful_shutdown,
    logging_middleware,
};

/// The web server for BudgetTracker.
#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
struct Args {
    /// File path to the application SQLite database.
    #[arg(long, env = "DATABASE_PATH", default_value = "budget.db")]
    db_path: String,

    /// The port to serve the app from.
    #[arg(short, long, env = "PORT", default_value_t = 3000)]
    port: u16,

    /// Where records are kept: a SQLite database, or in-memory demo data.
    #[arg(long, env = "DATA_SOURCE", value_enum, default_value_t = DataSourceKind::Sqlite)]
    data_source: DataSourceKind,

    /// The canonical name of the local timezone, e.g. "Africa/Johannesburg".
    ///
    /// Used to decide which month "today" falls in.
    #[arg(long, env = "TIMEZONE", default_value = "Etc/UTC")]
    timezone: String,

    /// The currency amounts are shown in unless a page selects another.
    #[arg(long, env = "CURRENCY", value_enum, default_value_t = Currency::Zar)]
    currency: Currency,
}

#[tokio::main]
async fn main() {
    setup_logging();

    let args = Args::parse();

    let Some(offset) = get_local_offset(&args.timezone) else {
        tracing::error!(
            "\"{}\" is not a valid, canonical timezone name, e.g. \"Africa/Johannesburg\"",
            args.timezone
        );
        exit(1);
    };

    let data_source: Arc<dyn DataSource> = match args.data_source {
        DataSourceKind::Sqlite => {
            let connection = match Connection::open(&args.db_path) {
                Ok(connection) => connection,
                Err(error) => {
                    tracing::error!("Could not open database at {}: {error}", args.db_path);
                    exit(1);
                }
            };

            match SqliteDataSource::new(connection) {
                Ok(data_source) => {
                    tracing::info!("Serving records from {}", args.db_path);
                    Arc::new(data_source)
                }
                Err(error) => {
                    tracing::error!("Could not initialize database at {}: {error}", args.db_path);
                    exit(1);
                }
            }
        }
        DataSourceKind::Fixture => {
            tracing::info!("Serving in-memory demo data, changes are lost on restart");
            let today = OffsetDateTime::now_utc().to_offset(offset).date();
            Arc::new(FixtureDataSource::new(
                CategoryCatalog::new(default_categories()),
                today,
            ))
        }
    };

    let state = AppState::new(data_source, &args.timezone, args.currency);

    let addr = SocketAddr::from(([0, 0, 0, 0], args.port));

    let handle = Handle::new();
    tokio::spawn(graceful_shutdown(handle.clone()));

    let router = add_tracing_layer(build_router(state));

    #[cfg(debug_assertions)]
    let router = router.layer(LiveReloadLayer::new());

    tracing::info!("HTTP server listening on {}", addr);
    if let Err(error) = axum_server::bind(addr)
        .handle(handle)
        .serve(router.into_make_service())
        .await
    {
        tracing::error!("Server error: {error}");
        exit(1);
    }
}

fn setup_logging() {
    let stdout_log = tracing_subscriber::fmt::layer().pretty();

    let log_file = OpenOptions::new()
        .create(true)
        .append(true)
        .open("debug.log")
        .expect("Could not create log file");

    let debug_log = tracing_subscriber::fmt::layer()
        .pretty()
        .with_writer(Arc::new(log_file));

    tracing_subscriber::registry()
        .with(
            stdout_log
                .with_filter(filter::LevelFilter::INFO)
                .and_then(debug_log)
                .with_filter(filter::LevelFilter::DEBUG),
        )
        .init();
}

fn add_tracing_layer(router: Router) -> Router {
    let tracing_layer = TraceLayer::new_for_http()
        .make_span_with(|req: &Request| {
            let method = req.method();
            let uri = req.uri();

            let matched_path = req
                .extensions()
                .get::<MatchedPath>()
                .map(|matched_path| matched_path.as_str());

            tracing::debug_span!("request", %method, %uri, matched_path)
        })
        // By default, `TraceLayer` will log 5xx responses but we're doing our specific
        // logging of errors so disable that
        .on_failure(());

    router
        .layer(middleware::from_fn(logging_middleware))
        .layer(tracing_layer)
}
