use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Specialty {
    pub id: i64,
    pub name: String,
    pub description_markdown: Option<String>,
}
