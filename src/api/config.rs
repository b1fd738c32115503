use dotenvy::dotenv;
use once_cell::sync::Lazy;

#[derive(Debug, Clone)]
pub struct Config {
    pub jwt_secret: String,
    pub jwt_expiration_minutes: u64,
    pub server_port: u16,
    /// Upper bound, in seconds, a checkout waits on a competing row lock.
    pub checkout_lock_wait_secs: u64,
}

impl Config {
    pub fn new() -> Self {
        CONFIG.clone()
    }
}

impl Default for Config {
    fn default() -> Self {
        Config::new()
    }
}

static CONFIG: Lazy<Config> = Lazy::new(|| {
    dotenv().ok();

    let jwt_secret = std::env::var("JWT_SECRET").expect("JWT_SECRET must be set");
    let jwt_expiration_minutes = std::env::var("JWT_EXPIRATION_MINUTES")
        .unwrap_or_else(|_| "60".to_string())
        .parse()
        .expect("JWT_EXPIRATION_MINUTES must be a valid u64");
    let server_port = std::env::var("SERVER_PORT")
        .unwrap_or_else(|_| "3000".to_string())
        .parse()
        .expect("SERVER_PORT must be a valid u16");
    let checkout_lock_wait_secs = std::env::var("CHECKOUT_LOCK_WAIT_SECS")
        .unwrap_or_else(|_| "10".to_string())
        .parse()
        .expect("CHECKOUT_LOCK_WAIT_SECS must be a valid u64");

    tracing::info!("Config loaded");

    Config {
        jwt_secret,
        jwt_expiration_minutes,
        server_port,
        checkout_lock_wait_secs,
    }
});
