//! The content tables the site hydrates from, and the kinds of change the
//! backend reports for them.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// A table that feeds a public page section.
///
/// The serialized form is the Postgres table name, which is also what the
/// change triggers put in the `table` field of their notification payload.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ContentTable {
    SiteSettings,
    AboutSection,
    Projects,
    Videos,
    TourDates,
    ArchiveCategories,
    ContactSettings,
    FooterSettings,
    NavLinks,
}

impl ContentTable {
    /// Every hydrated table, in snapshot field order.
    pub const ALL: [ContentTable; 9] = [
        ContentTable::SiteSettings,
        ContentTable::AboutSection,
        ContentTable::Projects,
        ContentTable::Videos,
        ContentTable::TourDates,
        ContentTable::ArchiveCategories,
        ContentTable::ContactSettings,
        ContentTable::FooterSettings,
        ContentTable::NavLinks,
    ];

    pub fn table_name(self) -> &'static str {
        match self {
            ContentTable::SiteSettings => "site_settings",
            ContentTable::AboutSection => "about_section",
            ContentTable::Projects => "projects",
            ContentTable::Videos => "videos",
            ContentTable::TourDates => "tour_dates",
            ContentTable::ArchiveCategories => "archive_categories",
            ContentTable::ContactSettings => "contact_settings",
            ContentTable::FooterSettings => "footer_settings",
            ContentTable::NavLinks => "nav_links",
        }
    }

    pub fn from_table_name(name: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|t| t.table_name() == name)
    }

    /// Singleton tables hold at most one row and are read with
    /// "fetch at most one" semantics.
    pub fn is_singleton(self) -> bool {
        matches!(
            self,
            ContentTable::SiteSettings
                | ContentTable::AboutSection
                | ContentTable::ContactSettings
                | ContentTable::FooterSettings
        )
    }
}

impl fmt::Display for ContentTable {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.table_name())
    }
}

impl FromStr for ContentTable {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::from_table_name(s.trim()).ok_or_else(|| format!("Unknown content table '{s}'"))
    }
}

/// Parse a comma-separated table list such as `projects,videos`.
///
/// An empty or missing list means every table.
pub fn parse_table_list(raw: Option<&str>) -> Result<Vec<ContentTable>, String> {
    let Some(raw) = raw.filter(|r| !r.trim().is_empty()) else {
        return Ok(ContentTable::ALL.to_vec());
    };
    let mut tables = Vec::new();
    for part in raw.split(',').map(str::trim).filter(|p| !p.is_empty()) {
        let table: ContentTable = part.parse()?;
        if !tables.contains(&table) {
            tables.push(table);
        }
    }
    Ok(tables)
}

/// What happened to a row.
///
/// `Resync` is synthetic: it means notifications may have been missed
/// (a lagging subscriber, a reconnected feed) and the table must be re-read.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ChangeKind {
    Insert,
    Update,
    Delete,
    Resync,
}

impl ChangeKind {
    /// Map a trigger `TG_OP` value (`INSERT`, `UPDATE`, `DELETE`).
    pub fn from_trigger_op(op: &str) -> Option<Self> {
        match op.to_ascii_uppercase().as_str() {
            "INSERT" => Some(ChangeKind::Insert),
            "UPDATE" => Some(ChangeKind::Update),
            "DELETE" => Some(ChangeKind::Delete),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn table_names_round_trip() {
        for table in ContentTable::ALL {
            assert_eq!(ContentTable::from_table_name(table.table_name()), Some(table));
        }
        assert_eq!(ContentTable::from_table_name("archive_items"), None);
    }

    #[test]
    fn singletons() {
        let singletons: Vec<_> = ContentTable::ALL
            .into_iter()
            .filter(|t| t.is_singleton())
            .collect();
        assert_eq!(singletons.len(), 4);
        assert!(!ContentTable::Projects.is_singleton());
    }

    #[test]
    fn table_list_defaults_to_all() {
        assert_eq!(parse_table_list(None).unwrap().len(), 9);
        assert_eq!(parse_table_list(Some("  ")).unwrap().len(), 9);
    }

    #[test]
    fn table_list_dedupes_and_rejects_unknown() {
        let tables = parse_table_list(Some("projects, videos,projects")).unwrap();
        assert_eq!(tables, vec![ContentTable::Projects, ContentTable::Videos]);
        assert!(parse_table_list(Some("projects,users")).is_err());
    }

    #[test]
    fn trigger_ops() {
        assert_eq!(ChangeKind::from_trigger_op("INSERT"), Some(ChangeKind::Insert));
        assert_eq!(ChangeKind::from_trigger_op("delete"), Some(ChangeKind::Delete));
        assert_eq!(ChangeKind::from_trigger_op("TRUNCATE"), None);
    }
}
