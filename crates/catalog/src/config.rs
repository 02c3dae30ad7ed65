use serde::Deserialize;

#[derive(Debug, Clone, Deserialize)]
pub struct Settings {
    pub database_url: String,
    pub catalog_env: String,
    pub api_bind: String,
    pub page_size: i64,
}

impl Settings {
    pub fn from_env() -> Result<Self, std::env::VarError> {
        let database_url =
            std::env::var("DATABASE_URL").or_else(|_| std::env::var("CATALOG_DATABASE_URL"))?;
        let catalog_env = std::env::var("CATALOG_ENV").unwrap_or_else(|_| "dev".to_string());
        let api_bind =
            std::env::var("CATALOG_API_BIND").unwrap_or_else(|_| "0.0.0.0:3000".to_string());
        let page_size = std::env::var("CATALOG_PAGE_SIZE")
            .ok()
            .and_then(|v| v.parse().ok())
            .unwrap_or(50);

        Ok(Self {
            database_url,
            catalog_env,
            api_bind,
            page_size,
        })
    }
}
