#![forbid(unsafe_code)]

use super::{SqliteStore, StoreError, next_counter_tx};
use super::types::{CategoryRow, SubcategoryRow};
use rusqlite::params;

// Baseline due-diligence taxonomy, installed once into an empty store.
// Categories are reference data: icon and color are display hints only,
// order_index drives presentation order.
const DEFAULT_TAXONOMY: &[(&str, &str, &str, &[&str])] = &[
    (
        "Financial",
        "chart-line",
        "#2563eb",
        &["Historical Financials", "Projections", "Working Capital"],
    ),
    (
        "Legal",
        "scale",
        "#7c3aed",
        &["Corporate Records", "Material Contracts", "Litigation"],
    ),
    ("Tax", "receipt", "#0d9488", &["Income Tax", "Indirect Tax"]),
    (
        "Commercial",
        "briefcase",
        "#ea580c",
        &["Customers", "Market & Competition"],
    ),
    (
        "Operations",
        "factory",
        "#64748b",
        &["Facilities", "Supply Chain"],
    ),
    (
        "Human Resources",
        "users",
        "#db2777",
        &["Org & Headcount", "Compensation & Benefits"],
    ),
    (
        "Technology & IP",
        "cpu",
        "#16a34a",
        &["Intellectual Property", "IT Systems", "Data Privacy"],
    ),
    (
        "Environmental",
        "leaf",
        "#65a30d",
        &["Permits & Compliance"],
    ),
];

impl SqliteStore {
    pub fn list_categories(&self) -> Result<Vec<CategoryRow>, StoreError> {
        let mut stmt = self.conn.prepare(
            "SELECT id, name, icon, color, order_index FROM categories \
             ORDER BY order_index ASC, id ASC",
        )?;
        let rows = stmt.query_map([], |row| {
            Ok(CategoryRow {
                id: row.get(0)?,
                name: row.get(1)?,
                icon: row.get(2)?,
                color: row.get(3)?,
                order_index: row.get(4)?,
            })
        })?;
        Ok(rows.collect::<Result<Vec<_>, _>>()?)
    }

    pub fn list_subcategories(&self) -> Result<Vec<SubcategoryRow>, StoreError> {
        let mut stmt = self.conn.prepare(
            "SELECT id, category_id, name, order_index FROM subcategories \
             ORDER BY category_id ASC, order_index ASC, id ASC",
        )?;
        let rows = stmt.query_map([], |row| {
            Ok(SubcategoryRow {
                id: row.get(0)?,
                category_id: row.get(1)?,
                name: row.get(2)?,
                order_index: row.get(3)?,
            })
        })?;
        Ok(rows.collect::<Result<Vec<_>, _>>()?)
    }

    pub(super) fn seed_default_taxonomy(&mut self) -> Result<(), StoreError> {
        let existing: i64 =
            self.conn
                .query_row("SELECT COUNT(*) FROM categories", [], |row| row.get(0))?;
        if existing > 0 {
            return Ok(());
        }

        let tx = self.conn.transaction()?;
        for (category_index, (name, icon, color, subcategories)) in
            DEFAULT_TAXONOMY.iter().enumerate()
        {
            let seq = next_counter_tx(&tx, "category_seq")?;
            let category_id = format!("CAT-{seq:03}");
            tx.execute(
                "INSERT INTO categories(id, name, icon, color, order_index) VALUES (?1,?2,?3,?4,?5)",
                params![category_id, name, icon, color, category_index as i64],
            )?;

            for (subcategory_index, subcategory_name) in subcategories.iter().enumerate() {
                let seq = next_counter_tx(&tx, "subcategory_seq")?;
                let subcategory_id = format!("SUB-{seq:03}");
                tx.execute(
                    "INSERT INTO subcategories(id, category_id, name, order_index) VALUES (?1,?2,?3,?4)",
                    params![
                        subcategory_id,
                        category_id,
                        subcategory_name,
                        subcategory_index as i64
                    ],
                )?;
            }
        }
        tx.commit()?;
        Ok(())
    }
}
