use crate::domain::common::{PantryScanConfig, services::Service};
use crate::infrastructure::{
    db::postgres::{Postgres, PostgresConfig},
    detection::repositories::{PostgresPantryRepository, PostgresSubstitutionRepository},
    llm::GeminiLLMClient,
    snapshot::FileSnapshotStore,
    uploads::FsUploadStore,
};

pub type PantryScanService = Service<
    GeminiLLMClient,
    PostgresPantryRepository,
    PostgresSubstitutionRepository,
    FsUploadStore,
    FileSnapshotStore,
>;

/// Wires concrete adapters into a ready-to-serve detection service.
pub async fn create_service(config: PantryScanConfig) -> Result<PantryScanService, anyhow::Error> {
    let database_url = format!(
        "postgres://{}:{}@{}:{}/{}",
        config.database.username,
        config.database.password,
        config.database.host,
        config.database.port,
        config.database.name
    );
    let postgres = Postgres::new(PostgresConfig { database_url }).await?;

    let llm_client = GeminiLLMClient::new(config.llm.gemini_api_key, config.llm.gemini_model);
    let pantry_repository = PostgresPantryRepository::new(postgres.get_db());
    let substitution_repository = PostgresSubstitutionRepository::new(postgres.get_db());
    let upload_store = FsUploadStore::new(config.detection.upload_dir.clone());
    let snapshot_store = FileSnapshotStore::new(config.detection.snapshot_path.clone());

    Ok(Service::new(
        llm_client,
        pantry_repository,
        substitution_repository,
        upload_store,
        snapshot_store,
        config.detection,
    ))
}
