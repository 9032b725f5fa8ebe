#![forbid(unsafe_code)]

use super::Tracker;
use crate::error::EngineError;
use crate::outcome::TemplateApplied;
use crate::support::ts_ms_to_rfc3339;
use crate::template_file::{TemplateData, parse_template_document};
use crate::views::TemplateView;
use dd_core::ids::{DealId, UserId};
use dd_core::model::Priority;
use dd_storage::{NewTemplate, TemplateItem, TemplateRow};

impl Tracker {
    pub fn list_templates(&self) -> Result<Vec<TemplateView>, EngineError> {
        self.store
            .list_templates()?
            .into_iter()
            .map(template_view)
            .collect()
    }

    /// Store a template from a YAML document. The document is validated
    /// here; applying never re-validates or mutates the stored template.
    pub fn import_template(
        &mut self,
        actor: &UserId,
        yaml: &str,
    ) -> Result<TemplateView, EngineError> {
        let doc = parse_template_document(yaml)?;
        let data = TemplateData {
            categories: doc.categories,
        };
        let template_data_json = serde_json::to_string(&data)
            .map_err(|_| EngineError::Validation("template data failed to serialize"))?;

        let row = self.store.insert_template(NewTemplate {
            name: doc.name,
            description: doc.description,
            industry: doc.industry,
            deal_type: doc.deal_type,
            template_data_json,
            is_default: doc.is_default,
            created_by: Some(actor.as_str().to_string()),
        })?;
        template_view(row)
    }

    /// Expand a template into concrete requests under a deal. Category
    /// names resolve by exact, case-sensitive match; unmatched categories
    /// are skipped without error. The insert is all-or-nothing, and zero
    /// created requests is a valid outcome.
    pub fn apply_template(
        &mut self,
        actor: &UserId,
        deal_id: &DealId,
        template_id: &str,
    ) -> Result<TemplateApplied, EngineError> {
        let Some(template) = self.store.get_template(template_id)? else {
            return Err(EngineError::NotFound {
                kind: "template",
                id: template_id.to_string(),
            });
        };
        let data: TemplateData = serde_json::from_str(&template.template_data_json)
            .map_err(|_| EngineError::Validation("template data is not valid json"))?;

        let categories = self.store.list_categories()?;

        let mut items = Vec::new();
        let mut order_index = 0i64;
        for category in &data.categories {
            let Some(matched) = categories.iter().find(|row| row.name == category.name) else {
                continue;
            };
            for request in &category.requests {
                let priority = request
                    .priority
                    .as_deref()
                    .and_then(Priority::parse)
                    .unwrap_or(Priority::Medium);
                items.push(TemplateItem {
                    category_id: matched.id.clone(),
                    title: request.title.clone(),
                    description: request.description.clone(),
                    priority: priority.as_str().to_string(),
                    order_index,
                });
                order_index += 1;
            }
        }

        let requests_created =
            self.store
                .insert_request_batch(deal_id.as_str(), actor.as_str(), &items)?;
        Ok(TemplateApplied { requests_created })
    }
}

fn template_view(row: TemplateRow) -> Result<TemplateView, EngineError> {
    let data: TemplateData = serde_json::from_str(&row.template_data_json)
        .map_err(|_| EngineError::Validation("template data is not valid json"))?;
    Ok(TemplateView {
        id: row.id,
        name: row.name,
        description: row.description,
        industry: row.industry,
        deal_type: row.deal_type,
        is_default: row.is_default,
        created_by: row.created_by,
        created_at: ts_ms_to_rfc3339(row.created_at_ms),
        data,
    })
}
