#![forbid(unsafe_code)]

use super::Tracker;
use crate::error::EngineError;
use crate::views::{CategoryView, SubcategoryView};

impl Tracker {
    pub fn list_categories(&self) -> Result<Vec<CategoryView>, EngineError> {
        Ok(self
            .store
            .list_categories()?
            .into_iter()
            .map(|row| CategoryView {
                id: row.id,
                name: row.name,
                icon: row.icon,
                color: row.color,
                order_index: row.order_index,
            })
            .collect())
    }

    pub fn list_subcategories(&self) -> Result<Vec<SubcategoryView>, EngineError> {
        Ok(self
            .store
            .list_subcategories()?
            .into_iter()
            .map(|row| SubcategoryView {
                id: row.id,
                category_id: row.category_id,
                name: row.name,
                order_index: row.order_index,
            })
            .collect())
    }
}
