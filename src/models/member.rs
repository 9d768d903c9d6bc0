use chrono::NaiveDate;
use serde::Serialize;

#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct Member {
    pub id: i64,
    pub name: String,
    pub phone: String, // empty = not provided
    pub program_id: i64,
    pub program_name: String, // denormalized copy, refreshed on program change
    pub registered_on: NaiveDate,
}

impl Member {
    /// Phone for display/export; missing numbers render as "-".
    pub fn phone_or_placeholder(&self) -> &str {
        if self.phone.trim().is_empty() {
            "-"
        } else {
            &self.phone
        }
    }

    pub fn registered_on_str(&self) -> String {
        self.registered_on.format("%Y-%m-%d").to_string()
    }
}
