use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Clinic {
    pub id: i64,
    pub name: String,
    pub address: Option<String>,
    pub description_markdown: Option<String>,
}
