//! Terminal front end for the task list.
//!
//! Reads commands from stdin, renders the list to stdout, logs to stderr.
//! See `help` inside the session for the command set and `todo::Config`
//! for the environment variables.

use anyhow::Context;
use std::sync::Arc;
use tasklist_core::environment::SystemClock;
use todo::{Config, JsonFileStorage, RenderStyle, TodoEnvironment, open_store, shell};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

fn main() -> anyhow::Result<()> {
    // A missing .env file is fine
    let _ = dotenvy::dotenv();
    let config = Config::from_env();

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(&config.log_level)),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr).with_target(false))
        .try_init()
        .context("failed to install tracing subscriber")?;

    let clock = Arc::new(SystemClock);
    let env = if config.storage.persist {
        let storage = JsonFileStorage::new(&config.storage.dir, config.storage.key.clone());
        tracing::info!(path = %storage.path().display(), "Persisting task list");
        TodoEnvironment::new(clock, Arc::new(storage))
    } else {
        tracing::info!("Persistence disabled, list lives for this session only");
        TodoEnvironment::ephemeral(clock)
    };

    let mut store = open_store(env);

    let style = if config.ui.color {
        RenderStyle::Ansi
    } else {
        RenderStyle::Plain
    };

    shell::run(
        &mut store,
        std::io::stdin().lock(),
        std::io::stdout().lock(),
        &config.ui.title,
        style,
    )
    .context("terminal session failed")?;

    let (total, done) = store.state(|s| (s.count(), s.completed_count()));
    tracing::info!(total, done, "Session ended");
    Ok(())
}
