use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

use crate::domain::common::{Displayable, Identifiable};

/// A dated income record attributed to a source, tracked separately from
/// account transactions.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct IncomeRecord {
    pub id: String,
    pub account_id: String,
    pub date: NaiveDate,
    pub amount: f64,
    pub source: Option<String>,
    pub created_at: DateTime<Utc>,
}

impl IncomeRecord {
    pub fn new(
        id: impl Into<String>,
        account_id: impl Into<String>,
        date: NaiveDate,
        amount: f64,
    ) -> Self {
        Self {
            id: id.into(),
            account_id: account_id.into(),
            date,
            amount,
            source: None,
            created_at: Utc::now(),
        }
    }

    pub fn with_source(mut self, source: impl Into<String>) -> Self {
        self.source = Some(source.into());
        self
    }
}

impl Identifiable for IncomeRecord {
    fn id(&self) -> &str {
        &self.id
    }
}

impl Displayable for IncomeRecord {
    fn display_label(&self) -> String {
        format!(
            "{} · {} {:.2} from {}",
            self.id,
            self.date,
            self.amount,
            self.source.as_deref().unwrap_or("Unknown")
        )
    }
}
