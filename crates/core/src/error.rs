use std::fmt::Display;

/// Errors raised by Marquee's domain rules, independent of transport.
#[derive(Debug, thiserror::Error)]
pub enum CoreError {
    /// A row looked up by id or by a natural key such as a category slug.
    #[error("{entity} '{key}' not found")]
    NotFound { entity: &'static str, key: String },

    /// A submitted form failed field validation. `fields` is sorted.
    #[error("Invalid {form} fields: {}", fields.join(", "))]
    InvalidFields {
        form: &'static str,
        fields: Vec<String>,
    },

    #[error("Validation failed: {0}")]
    Validation(String),

    #[error("Conflict: {0}")]
    Conflict(String),

    #[error("Unauthorized: {0}")]
    Unauthorized(String),

    #[error("Forbidden: {0}")]
    Forbidden(String),

    #[error("Internal error: {0}")]
    Internal(String),
}

impl CoreError {
    pub fn not_found(entity: &'static str, key: impl Display) -> Self {
        Self::NotFound {
            entity,
            key: key.to_string(),
        }
    }

    pub fn invalid_fields<I, S>(form: &'static str, fields: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let mut fields: Vec<String> = fields.into_iter().map(Into::into).collect();
        fields.sort();
        fields.dedup();
        Self::InvalidFields { form, fields }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::DbId;

    #[test]
    fn not_found_accepts_ids_and_slugs() {
        let id = DbId::nil();
        assert_eq!(
            CoreError::not_found("TourDate", id).to_string(),
            format!("TourDate '{id}' not found")
        );
        assert_eq!(
            CoreError::not_found("Archive category", "live").to_string(),
            "Archive category 'live' not found"
        );
    }

    #[test]
    fn invalid_fields_are_sorted_and_unique() {
        let err = CoreError::invalid_fields("contact", ["name", "email", "name"]);
        assert_eq!(err.to_string(), "Invalid contact fields: email, name");
    }
}
