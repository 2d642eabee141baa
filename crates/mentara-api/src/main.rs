use mentara_agent::client::HttpAgent;
use mentara_api::config::ApiConfig;
use mentara_api::state::AppState;
use mentara_api::{accounts, maintenance};
use mentara_auth::jwt::TokenKeys;
use mentara_instruments::Registry;
use mentara_storage::objects::ObjectStore;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> eyre::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .json()
        .init();

    let config = ApiConfig::from_env()?;

    let store = match &config.data_dir {
        Some(dir) => ObjectStore::directory(dir).await?,
        None => {
            tracing::warn!("MENTARA_DATA_DIR not set, records will not survive a restart");
            ObjectStore::in_memory()
        }
    };
    accounts::seed_admins(&store, &config.admin_ids).await?;

    let agent = HttpAgent::new(&config.agent_url, config.agent_timeout)?;
    tracing::info!(agent_url = agent.base_url(), "assessment agent configured");

    let state = AppState::new(
        Registry::standard(),
        store,
        TokenKeys::from_secret(config.jwt_secret.as_bytes()),
        agent,
        config.session_ttl,
    );
    tokio::spawn(maintenance::run_session_purger(state.clone()));

    let app = mentara_api::router(state);
    let listener = tokio::net::TcpListener::bind(config.bind_addr).await?;
    tracing::info!(addr = %config.bind_addr, "listening");
    axum::serve(listener, app).await?;

    Ok(())
}
