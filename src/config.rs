use std::env;

#[derive(Debug, Clone)]
pub struct AppConfig {
    pub data_dir: String,
    pub ml_api_url: String,
    pub host: String,
    pub port: u16,
}

impl AppConfig {
    pub fn from_env() -> anyhow::Result<Self> {
        let data_dir = env::var("SHAREBITE_DATA_DIR").unwrap_or_else(|_| "data".to_string());
        let ml_api_url =
            env::var("ML_API_URL").unwrap_or_else(|_| "http://localhost:5000".to_string());
        let host = env::var("APP_HOST").unwrap_or_else(|_| "127.0.0.1".to_string());
        let port = env::var("APP_PORT")
            .ok()
            .and_then(|p| p.parse::<u16>().ok())
            .unwrap_or(3000);
        Ok(Self {
            data_dir,
            ml_api_url,
            host,
            port,
        })
    }
}
