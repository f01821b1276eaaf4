//! Statically configured administrator e-mail allow-list.

/// E-mail addresses treated as administrators regardless of the contents of
/// `user_roles`. Matching is case-insensitive and ignores surrounding
/// whitespace.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AdminAllowList {
    emails: Vec<String>,
}

impl AdminAllowList {
    /// Parse a comma-separated list such as `ADMIN_EMAILS`.
    pub fn parse(raw: &str) -> Self {
        let mut emails: Vec<String> = raw
            .split(',')
            .map(|e| e.trim().to_lowercase())
            .filter(|e| !e.is_empty())
            .collect();
        emails.sort();
        emails.dedup();
        Self { emails }
    }

    pub fn contains(&self, email: &str) -> bool {
        let needle = email.trim().to_lowercase();
        !needle.is_empty() && self.emails.binary_search(&needle).is_ok()
    }

    pub fn is_empty(&self) -> bool {
        self.emails.is_empty()
    }

    pub fn len(&self) -> usize {
        self.emails.len()
    }
}
