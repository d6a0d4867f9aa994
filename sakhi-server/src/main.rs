use std::sync::Arc;

use clap::Parser;
use sakhi_core::{
    CerebrasClient, CompletionBackend, CompletionConfig, DisabledTranslation,
    HttpTranslationClient, SakhiConfig, TranslationBackend,
};
use tokio::sync::broadcast;
use tracing_subscriber::{fmt, EnvFilter};

use sakhi_server::auth::{PgSessionStore, SessionStore, StaticSessionStore};
use sakhi_server::http::{self, AppState};

#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    #[arg(short, long, default_value = "sakhi.toml")]
    config: String,

    #[arg(long)]
    health: bool,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load .env file if present (dev convenience; production uses real env vars)
    dotenvy::dotenv().ok();

    let args = Args::parse();

    // Load config
    let config = match SakhiConfig::load(&args.config) {
        Ok(c) => c,
        Err(e) => {
            eprintln!("Failed to load config from {}: {}", args.config, e);
            std::process::exit(1);
        }
    };

    // Init logging
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(&config.service.log_level));
    fmt().with_env_filter(filter).init();

    // Connect to DB
    let pool = match sakhi_core::db::create_pool(&config.database).await {
        Ok(p) => p,
        Err(e) => {
            eprintln!("Failed to connect to database: {}", e);
            std::process::exit(1);
        }
    };

    if args.health {
        match sakhi_core::db::health_check(&pool).await {
            Ok(v) => println!("✅ PostgreSQL connected: {}", v),
            Err(e) => {
                println!("❌ PostgreSQL connection failed: {}", e);
                std::process::exit(1);
            }
        }

        println!("✅ Sakhi DB health check passed");
        return Ok(());
    }

    // Completion backend (API key comes from CEREBRAS_API_KEY)
    let mut completion_config = CompletionConfig::new(None, config.assistant.model.clone());
    completion_config.temperature = config.assistant.temperature;
    completion_config.max_tokens = config.assistant.max_tokens;
    let completions: Arc<dyn CompletionBackend> = match CerebrasClient::new(completion_config) {
        Ok(c) => Arc::new(c),
        Err(e) => {
            eprintln!("Failed to create completion client: {}", e);
            std::process::exit(1);
        }
    };

    // Translation backend (optional collaborator)
    let translator: Arc<dyn TranslationBackend> = if config.translation.endpoint.is_empty() {
        tracing::warn!("No translation endpoint configured; replies stay untranslated");
        Arc::new(DisabledTranslation)
    } else {
        match HttpTranslationClient::new(config.translation.endpoint.clone()) {
            Ok(c) => Arc::new(c),
            Err(e) => {
                eprintln!("Failed to create translation client: {}", e);
                std::process::exit(1);
            }
        }
    };

    // Session verification: static token for single-user setups, the
    // sessions table otherwise
    let sessions: Arc<dyn SessionStore> = match (&config.auth.static_token, config.auth.static_user)
    {
        (Some(token), Some(user)) => {
            tracing::info!(user = %user, "Using static session token");
            Arc::new(StaticSessionStore::new(token.clone(), user))
        }
        (Some(_), None) => {
            eprintln!("auth.static_token requires auth.static_user");
            std::process::exit(1);
        }
        _ => Arc::new(PgSessionStore::new(pool.clone())),
    };

    // Shutdown signal
    let (tx, _rx) = broadcast::channel(1);
    let shutdown_tx = tx.clone();

    tokio::spawn(async move {
        tokio::signal::ctrl_c()
            .await
            .expect("Failed to listen for Ctrl+C");
        tracing::info!("Shutdown signal received");
        let _ = shutdown_tx.send(());
    });

    let state = Arc::new(AppState {
        pool,
        config,
        completions,
        translator,
        sessions,
    });

    http::start_http_server(state, tx.subscribe()).await?;

    Ok(())
}
