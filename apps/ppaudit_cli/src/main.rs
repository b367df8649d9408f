use std::sync::Arc;

use anyhow::{anyhow, Context};
use clap::Parser;
use ppaudit_adapters::configuration;
use ppaudit_adapters::telemetry;
use ppaudit_adapters::{ClientCredentialsTokenProvider, PowerPlatformAdminApi, ReqwestTransport};
use ppaudit_core::ports::{AdminApi, TokenProvider};
use ppaudit_core::query::QueryIntent;
use ppaudit_core::report;
use ppaudit_core::use_cases::{PublicAppsAuditUseCase, TestConnectionUseCase};
use tracing::{error, info};

/// Audit Power Platform environments for apps shared with everyone.
#[derive(Parser)]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// The security audit query, e.g. 'find public apps' or 'test connection'
    query: String,

    /// Log level for this run (RUST_LOG still takes precedence)
    #[arg(long)]
    log_level: Option<String>,
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    let cli = Cli::parse();

    let settings = configuration::get_configuration().context("configuration loading failed")?;

    telemetry::init_subscriber(cli.log_level.as_deref().unwrap_or(&settings.log_level));

    info!(query = %cli.query, "audit initiated");

    let transport = Arc::new(ReqwestTransport::new()?);

    let token_provider = ClientCredentialsTokenProvider::new(
        settings.credentials.clone(),
        settings.auth.clone(),
        transport.clone(),
    );
    let token = match token_provider.fetch_token().await {
        Ok(token) => token,
        Err(e) => {
            error!(
                error = %e,
                "failed to get access token; check your .env credentials and app registration permissions"
            );
            return Err(anyhow!("failed to get access token: {}", e));
        }
    };

    let api = Arc::new(PowerPlatformAdminApi::new(
        transport,
        token,
        settings.api.clone(),
    ));

    let Some(intent) = QueryIntent::recognize(&cli.query) else {
        print!("{}", report::render_unrecognized_query(&cli.query));
        return Ok(());
    };

    info!(%intent, "dispatching query");
    match intent {
        QueryIntent::PublicApps => run_public_apps(api).await,
        QueryIntent::TestConnection => run_test_connection(api).await,
    }
}

async fn run_public_apps<A: AdminApi>(api: Arc<A>) -> anyhow::Result<()> {
    let findings = PublicAppsAuditUseCase::new(api).execute().await;
    print!("{}", report::render_findings(&findings));
    Ok(())
}

async fn run_test_connection<A: AdminApi>(api: Arc<A>) -> anyhow::Result<()> {
    println!("{}", report::CONNECTION_ATTEMPT);

    match TestConnectionUseCase::new(api).execute().await {
        Ok(connection) => {
            print!("{}", report::render_connection_report(&connection));
            Ok(())
        }
        Err(e) => {
            println!("Failed to list environments: {}", e);
            Err(anyhow!("connection test failed: {}", e))
        }
    }
}
