use sea_orm::DatabaseConnection;

use crate::{EngineError, ResultEngine};

mod pledges;
mod requests;

pub use pledges::{PledgeCmd, PledgeReceipt};
pub use requests::RequestCmd;

#[derive(Debug)]
pub struct Engine {
    database: DatabaseConnection,
}

impl Engine {
    /// Return a builder for `Engine`. Help to build the struct.
    pub fn builder() -> EngineBuilder {
        EngineBuilder::default()
    }
}

fn normalize_required_text(value: &str, label: &str) -> ResultEngine<String> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return Err(EngineError::InvalidField(format!(
            "{label} must not be empty"
        )));
    }
    Ok(trimmed.to_string())
}

fn normalize_optional_text(value: Option<&str>) -> Option<String> {
    value
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(ToString::to_string)
}

/// Phone numbers are stored as exactly ten digits.
fn validate_phone(value: &str) -> ResultEngine<String> {
    let trimmed = value.trim();
    if trimmed.len() != 10 || !trimmed.chars().all(|c| c.is_ascii_digit()) {
        return Err(EngineError::InvalidField(
            "phone must be exactly 10 digits".to_string(),
        ));
    }
    Ok(trimmed.to_string())
}

fn validate_optional_email(value: Option<&str>) -> ResultEngine<Option<String>> {
    let Some(email) = normalize_optional_text(value) else {
        return Ok(None);
    };
    let valid = email
        .split_once('@')
        .is_some_and(|(local, domain)| !local.is_empty() && domain.contains('.'));
    if !valid {
        return Err(EngineError::InvalidField(format!(
            "invalid email address: {email}"
        )));
    }
    Ok(Some(email))
}

/// The builder for `Engine`
#[derive(Default)]
pub struct EngineBuilder {
    database: DatabaseConnection,
}

impl EngineBuilder {
    /// Pass the required database
    pub fn database(mut self, db: DatabaseConnection) -> EngineBuilder {
        self.database = db;
        self
    }

    /// Build an `Engine`, verifying the database connection is usable.
    pub async fn build(self) -> ResultEngine<Engine> {
        self.database.ping().await?;
        Ok(Engine {
            database: self.database,
        })
    }
}
