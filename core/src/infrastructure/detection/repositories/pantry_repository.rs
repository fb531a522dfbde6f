use sea_orm::{ActiveValue::Set, DatabaseConnection, EntityTrait};
use tracing::error;

use crate::{
    domain::{
        common::entities::app_errors::CoreError,
        detection::{entities::PantryRecord, ports::PantryRepository},
    },
    entity::pantry::{ActiveModel, Entity},
};

#[derive(Debug, Clone)]
pub struct PostgresPantryRepository {
    pub db: DatabaseConnection,
}

impl PostgresPantryRepository {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }
}

impl PantryRepository for PostgresPantryRepository {
    async fn insert(&self, record: PantryRecord) -> Result<PantryRecord, CoreError> {
        let created = Entity::insert(ActiveModel {
            id: Set(record.id),
            user_id: Set(record.user_id),
            item_name: Set(record.item_name),
            date_added: Set(record.date_added),
        })
        .exec_with_returning(&self.db)
        .await
        .map(PantryRecord::from)
        .map_err(|e| {
            error!("Failed to insert pantry record: {}", e);
            CoreError::PersistenceError(format!("Failed to insert pantry record: {}", e))
        })?;

        Ok(created)
    }
}
