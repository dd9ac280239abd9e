use dotenvy::dotenv;
use std::env;

#[derive(Clone)]
pub struct Config {
    pub server_addr: String,
    pub database_url: String,

    // Rate limiting
    pub rate_api_per_min: u32,
    pub rate_import_per_min: u32,

    /// innodb lock-wait budget for one import transaction, in seconds
    pub dtr_lock_wait_secs: u32,

    pub api_prefix: String,
}

impl Config {
    pub fn from_env() -> Self {
        dotenv().ok();

        Self {
            server_addr: env::var("SERVER_ADDR").expect("SERVER_ADDR must be set"),
            database_url: env::var("DATABASE_URL").expect("DATABASE_URL must be set"),

            rate_api_per_min: env::var("RATE_API_PER_MIN")
                .unwrap_or_else(|_| "600".to_string())
                .parse()
                .unwrap(),
            rate_import_per_min: env::var("RATE_IMPORT_PER_MIN")
                .unwrap_or_else(|_| "30".to_string())
                .parse()
                .unwrap(),

            dtr_lock_wait_secs: env::var("DTR_LOCK_WAIT_SECS")
                .unwrap_or_else(|_| "5".to_string()) // default 5 seconds
                .parse()
                .unwrap(),

            api_prefix: env::var("API_PREFIX").unwrap_or_else(|_| "/api/v1".to_string()),
        }
    }
}
