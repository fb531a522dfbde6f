use crate::domain::{
    common::DetectionConfig,
    detection::ports::{
        LLMClient, PantryRepository, SnapshotStore, SubstitutionRepository, UploadStore,
    },
};

/// Aggregate service over the pipeline's ports. Concrete adapters are picked
/// in `application::create_service`; tests plug in mocks.
#[derive(Clone)]
pub struct Service<L, P, S, U, SN>
where
    L: LLMClient,
    P: PantryRepository,
    S: SubstitutionRepository,
    U: UploadStore,
    SN: SnapshotStore,
{
    pub(crate) llm_client: L,
    pub(crate) pantry_repository: P,
    pub(crate) substitution_repository: S,
    pub(crate) upload_store: U,
    pub(crate) snapshot_store: SN,
    pub(crate) detection: DetectionConfig,
}

impl<L, P, S, U, SN> Service<L, P, S, U, SN>
where
    L: LLMClient,
    P: PantryRepository,
    S: SubstitutionRepository,
    U: UploadStore,
    SN: SnapshotStore,
{
    pub fn new(
        llm_client: L,
        pantry_repository: P,
        substitution_repository: S,
        upload_store: U,
        snapshot_store: SN,
        detection: DetectionConfig,
    ) -> Self {
        Self {
            llm_client,
            pantry_repository,
            substitution_repository,
            upload_store,
            snapshot_store,
            detection,
        }
    }
}
