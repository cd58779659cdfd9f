/// Digital Hermit - signup intake and moderation backend
///
/// Serves the landing-page signup forms, the member login flow, and the
/// moderation dashboard that approves or rejects pending signups.

mod account;
mod api;
mod auth;
mod config;
mod context;
mod db;
mod error;
mod intake;
mod jobs;
mod moderation;
mod profiles;
mod server;
#[cfg(test)]
mod test_util;

use config::ServerConfig;
use context::AppContext;
use error::HermitResult;
use std::sync::Arc;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> HermitResult<()> {
    // Initialize logging
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "digital_hermit=debug,tower_http=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    print_banner();

    let config = ServerConfig::from_env()?;

    let ctx = AppContext::new(config).await?;
    let ctx = Arc::new(ctx);

    // Start background jobs
    let scheduler = Arc::new(jobs::JobScheduler::new(Arc::clone(&ctx)));
    scheduler.start();

    server::serve((*ctx).clone()).await?;

    Ok(())
}

fn print_banner() {
    println!(
        r#"
    ____  _       _ __        __   __  __                    _ __
   / __ \(_)___ _(_) /_____ _/ /  / / / /__  _________ ___  (_) /_
  / / / / / __ `/ / __/ __ `/ /  / /_/ / _ \/ ___/ __ `__ \/ / __/
 / /_/ / / /_/ / / /_/ /_/ / /  / __  /  __/ /  / / / / / / / /_
/_____/_/\__, /_/\__/\__,_/_/  /_/ /_/\___/_/  /_/ /_/ /_/_/\__/
        /____/
        Signup intake and moderation backend v{}
        "#,
        env!("CARGO_PKG_VERSION")
    );
}
