#![forbid(unsafe_code)]

/// Template row. `template_data_json` is the raw serialized category/request
/// tree; the engine owns the typed representation.
#[derive(Clone, Debug)]
pub struct TemplateRow {
    pub id: String,
    pub name: String,
    pub description: Option<String>,
    pub industry: Option<String>,
    pub deal_type: Option<String>,
    pub template_data_json: String,
    pub is_default: bool,
    pub created_by: Option<String>,
    pub created_at_ms: i64,
}

#[derive(Clone, Debug)]
pub struct NewTemplate {
    pub name: String,
    pub description: Option<String>,
    pub industry: Option<String>,
    pub deal_type: Option<String>,
    pub template_data_json: String,
    pub is_default: bool,
    pub created_by: Option<String>,
}

/// One expanded request from a template, ready for the all-or-nothing batch
/// insert under a target deal.
#[derive(Clone, Debug)]
pub struct TemplateItem {
    pub category_id: String,
    pub title: String,
    pub description: Option<String>,
    pub priority: String,
    pub order_index: i64,
}
