#![forbid(unsafe_code)]

use crate::error::EngineError;
use dd_core::model::Priority;
use serde::{Deserialize, Serialize};

/// The category/request tree a template expands under a deal. Stored as
/// JSON in the template row; also the `categories` section of an imported
/// YAML document.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct TemplateData {
    pub categories: Vec<TemplateCategory>,
}

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct TemplateCategory {
    pub name: String,
    #[serde(default)]
    pub requests: Vec<TemplateRequestSpec>,
}

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct TemplateRequestSpec {
    pub title: String,
    #[serde(default)]
    pub priority: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
}

/// A template as imported from a YAML document.
#[derive(Clone, Debug, Deserialize)]
pub struct TemplateDocument {
    pub name: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub industry: Option<String>,
    #[serde(default)]
    pub deal_type: Option<String>,
    #[serde(default)]
    pub is_default: bool,
    pub categories: Vec<TemplateCategory>,
}

pub(crate) fn parse_template_document(yaml: &str) -> Result<TemplateDocument, EngineError> {
    let doc: TemplateDocument = serde_yaml::from_str(yaml)?;
    if doc.name.trim().is_empty() {
        return Err(EngineError::Validation("template name is required"));
    }
    if doc.categories.is_empty() {
        return Err(EngineError::Validation("template has no categories"));
    }
    for category in &doc.categories {
        if category.name.trim().is_empty() {
            return Err(EngineError::Validation("template category name is required"));
        }
        for request in &category.requests {
            if request.title.trim().is_empty() {
                return Err(EngineError::Validation("template request title is required"));
            }
            if let Some(priority) = &request.priority
                && Priority::parse(priority).is_none()
            {
                return Err(EngineError::Validation("template request priority is unknown"));
            }
        }
    }
    Ok(doc)
}
