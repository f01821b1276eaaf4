//! URL slugs for archive categories.

use crate::error::CoreError;

/// Lower-case `title`, collapse every run of non `[a-z0-9]` characters into
/// a single `-`, and trim dashes from both ends.
///
/// ```
/// use marquee_core::slug::slugify;
///
/// assert_eq!(slugify("Live at the Apollo (2019)"), "live-at-the-apollo-2019");
/// ```
pub fn slugify(title: &str) -> String {
    let mut slug = String::with_capacity(title.len());
    let mut pending_dash = false;

    for ch in title.chars().flat_map(char::to_lowercase) {
        if ch.is_ascii_lowercase() || ch.is_ascii_digit() {
            if pending_dash && !slug.is_empty() {
                slug.push('-');
            }
            pending_dash = false;
            slug.push(ch);
        } else {
            pending_dash = true;
        }
    }

    slug
}

/// Pick the slug to store for a category: the explicit one when given,
/// otherwise one derived from the title. Either way the result is
/// normalised through [`slugify`] and must not be empty.
pub fn resolve_slug(explicit: Option<&str>, title: &str) -> Result<String, CoreError> {
    let source = explicit
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .unwrap_or(title);
    let slug = slugify(source);
    if slug.is_empty() {
        return Err(CoreError::Validation(
            "Slug must contain at least one letter or digit".into(),
        ));
    }
    Ok(slug)
}
