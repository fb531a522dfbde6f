use crate::{
    domain::detection::entities::{NutritionDelta, PantryRecord, SubstitutionRecord},
    entity::{pantry, substitutions},
};

impl From<&pantry::Model> for PantryRecord {
    fn from(model: &pantry::Model) -> Self {
        Self {
            id: model.id,
            user_id: model.user_id,
            item_name: model.item_name.clone(),
            date_added: model.date_added,
        }
    }
}

impl From<pantry::Model> for PantryRecord {
    fn from(model: pantry::Model) -> Self {
        Self::from(&model)
    }
}

impl From<&substitutions::Model> for SubstitutionRecord {
    fn from(model: &substitutions::Model) -> Self {
        let nutrition_delta: NutritionDelta =
            serde_json::from_value(model.nutrition_delta.clone()).unwrap_or_default();

        Self {
            id: model.id,
            ingredient: model.ingredient.clone(),
            alt_name: model.alt_name.clone(),
            nutrition_delta,
            source: model.source.clone(),
        }
    }
}

impl From<substitutions::Model> for SubstitutionRecord {
    fn from(model: substitutions::Model) -> Self {
        Self::from(&model)
    }
}
