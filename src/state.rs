use crate::config::AppConfig;
use crate::ml::MlClient;
use crate::store::Store;

#[derive(Clone)]
pub struct AppState {
    pub store: Store,
    pub ml: MlClient,
}

impl AppState {
    pub fn init(config: &AppConfig) -> anyhow::Result<Self> {
        let store = Store::open(&config.data_dir)?;
        let ml = MlClient::new(&config.ml_api_url)?;
        Ok(Self { store, ml })
    }

    /// State with an in-memory store and an unreachable ML endpoint.
    pub fn ephemeral() -> Self {
        let store = Store::ephemeral();
        let ml = MlClient::new("http://127.0.0.1:9").expect("client for fixed url");
        Self { store, ml }
    }
}
