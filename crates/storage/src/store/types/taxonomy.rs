#![forbid(unsafe_code)]

#[derive(Clone, Debug)]
pub struct CategoryRow {
    pub id: String,
    pub name: String,
    pub icon: String,
    pub color: String,
    pub order_index: i64,
}

#[derive(Clone, Debug)]
pub struct SubcategoryRow {
    pub id: String,
    pub category_id: String,
    pub name: String,
    pub order_index: i64,
}
