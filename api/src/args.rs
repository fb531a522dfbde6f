use std::path::PathBuf;

use clap::Parser;
use pantryscan_core::domain::common::{
    DatabaseConfig, DetectionConfig, LLMConfig, PantryScanConfig,
};
use uuid::Uuid;

#[derive(Debug, Clone, Parser)]
#[command(name = "pantryscan-api", about = "Ingredient Detection API")]
pub struct Args {
    #[command(flatten)]
    pub server: ServerArgs,

    #[command(flatten)]
    pub database: DatabaseArgs,

    #[command(flatten)]
    pub llm: LLMArgs,

    #[command(flatten)]
    pub detection: DetectionArgs,
}

#[derive(Debug, Clone, clap::Args)]
pub struct ServerArgs {
    #[arg(long, env = "HOST", default_value = "0.0.0.0")]
    pub host: String,

    #[arg(long, env = "PORT", default_value_t = 8000)]
    pub port: u16,
}

#[derive(Debug, Clone, clap::Args)]
pub struct DatabaseArgs {
    #[arg(long = "db-host", env = "DATABASE_HOST")]
    pub db_host: String,

    #[arg(long = "db-port", env = "DATABASE_PORT", default_value_t = 5432)]
    pub db_port: u16,

    #[arg(long = "db-user", env = "DATABASE_USER")]
    pub db_user: String,

    #[arg(long = "db-password", env = "DATABASE_PASSWORD", hide_env_values = true)]
    pub db_password: String,

    #[arg(long = "db-name", env = "DATABASE_NAME")]
    pub db_name: String,
}

#[derive(Debug, Clone, clap::Args)]
pub struct LLMArgs {
    #[arg(long, env = "GEMINI_API_KEY", hide_env_values = true)]
    pub gemini_api_key: String,

    #[arg(long, env = "GEMINI_MODEL", default_value = "gemini-2.5-flash")]
    pub gemini_model: String,
}

#[derive(Debug, Clone, clap::Args)]
pub struct DetectionArgs {
    /// Identity every pantry write is attributed to
    #[arg(long, env = "USER_ID")]
    pub user_id: Uuid,

    #[arg(long, env = "UPLOAD_DIR", default_value = "uploads")]
    pub upload_dir: PathBuf,

    #[arg(long, env = "SNAPSHOT_PATH", default_value = "outputs/detections.json")]
    pub snapshot_path: PathBuf,
}

impl From<Args> for PantryScanConfig {
    fn from(args: Args) -> Self {
        Self {
            database: DatabaseConfig {
                host: args.database.db_host,
                port: args.database.db_port,
                username: args.database.db_user,
                password: args.database.db_password,
                name: args.database.db_name,
            },
            llm: LLMConfig {
                gemini_api_key: args.llm.gemini_api_key,
                gemini_model: args.llm.gemini_model,
            },
            detection: DetectionConfig {
                user_id: args.detection.user_id,
                upload_dir: args.detection.upload_dir,
                snapshot_path: args.detection.snapshot_path,
            },
        }
    }
}
