use serde::{Deserialize, Serialize};

/// A doctor row joined with its directory data (specialty, clinic, bio, price).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Doctor {
    pub id: i64,
    pub first_name: String,
    pub last_name: String,
    pub position: Option<String>,
    pub specialty: Option<String>,
    pub clinic: Option<String>,
    pub description: Option<String>,
    pub content_markdown: Option<String>,
    /// Consultation price in VND, when the clinic has published one.
    pub price: Option<i64>,
}

impl Doctor {
    /// Display name in the directory's family-name-first convention.
    pub fn display_name(&self) -> String {
        format!("{} {}", self.last_name, self.first_name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_name_is_family_name_first() {
        let doctor = Doctor {
            id: 1,
            first_name: "A".into(),
            last_name: "Nguyen Van".into(),
            position: None,
            specialty: None,
            clinic: None,
            description: None,
            content_markdown: None,
            price: None,
        };
        assert_eq!(doctor.display_name(), "Nguyen Van A");
    }
}
