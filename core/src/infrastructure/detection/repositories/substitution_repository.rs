use sea_orm::{ActiveValue::Set, DatabaseConnection, EntityTrait};
use tracing::error;

use crate::{
    domain::{
        common::entities::app_errors::CoreError,
        detection::{entities::SubstitutionRecord, ports::SubstitutionRepository},
    },
    entity::substitutions::{ActiveModel, Entity},
};

#[derive(Debug, Clone)]
pub struct PostgresSubstitutionRepository {
    pub db: DatabaseConnection,
}

impl PostgresSubstitutionRepository {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }
}

impl SubstitutionRepository for PostgresSubstitutionRepository {
    async fn insert(&self, record: SubstitutionRecord) -> Result<SubstitutionRecord, CoreError> {
        let nutrition_delta = serde_json::to_value(&record.nutrition_delta).map_err(|e| {
            error!("Failed to serialize nutrition delta: {}", e);
            CoreError::InternalServerError
        })?;

        let created = Entity::insert(ActiveModel {
            id: Set(record.id),
            ingredient: Set(record.ingredient),
            alt_name: Set(record.alt_name),
            nutrition_delta: Set(nutrition_delta),
            source: Set(record.source),
        })
        .exec_with_returning(&self.db)
        .await
        .map(SubstitutionRecord::from)
        .map_err(|e| {
            error!("Failed to insert substitution record: {}", e);
            CoreError::PersistenceError(format!("Failed to insert substitution record: {}", e))
        })?;

        Ok(created)
    }
}
