use std::path::PathBuf;

/// Runtime settings, read once at startup from the environment (a `.env`
/// file is honored when present).
#[derive(Clone, Debug)]
pub struct Config {
    pub database_url: String,
    /// Filesystem root for uploaded product images.
    pub upload_dir: PathBuf,
    pub bind_addr: String,
}

impl Config {
    pub fn from_env() -> Config {
        dotenvy::dotenv().ok();

        Config {
            database_url: std::env::var("DATABASE_URL").expect("DATABASE_URL must be set"),
            upload_dir: std::env::var("UPLOAD_DIR")
                .unwrap_or_else(|_| "uploads".to_owned())
                .into(),
            bind_addr: std::env::var("BIND_ADDR").unwrap_or_else(|_| "0.0.0.0:3000".to_owned()),
        }
    }
}
