//! Name normalization shared by the entry normalizer and the rule table.
//!
//! Two keys are derived from a French display name:
//! - the *name slug*: lowercase, accents stripped, only `[a-z0-9]` kept
//!   ("M. Mime de Galar" -> "mmimedegalar");
//! - the *base slug*: the name slug with parenthesised qualifiers dropped and
//!   a trailing regional suffix trimmed ("M. Mime de Galar" -> "mmime").
//!
//! Rules are matched on base slugs so that a rule written against the bare
//! species name applies to regional entries whose name embeds the region.

use schema::Region;
use strum::IntoEnumIterator;
use unicode_normalization::char::is_combining_mark;
use unicode_normalization::UnicodeNormalization;

/// Lowercase, strip diacritics, and drop every character outside `[a-z0-9]`.
pub fn slugify(name: &str) -> String {
    name.nfd()
        .filter(|c| !is_combining_mark(*c))
        .flat_map(char::to_lowercase)
        .filter(|c| c.is_ascii_alphanumeric())
        .collect()
}

/// Slug used as the rule-matching key.
pub fn base_slug(name: &str) -> String {
    let slug = slugify(&drop_parenthesised(name));
    strip_region_suffix(&slug).to_string()
}

/// Trim one trailing regional suffix ("dalola", "degalar", ...) from a slug.
/// A slug that consists only of a suffix is returned unchanged.
pub fn strip_region_suffix(slug: &str) -> &str {
    for region in Region::iter() {
        if let Some(suffix) = region.name_suffix_slug() {
            if let Some(stripped) = slug.strip_suffix(suffix) {
                if !stripped.is_empty() {
                    return stripped;
                }
            }
        }
    }
    slug
}

fn drop_parenthesised(name: &str) -> String {
    let mut depth = 0usize;
    let mut kept = String::with_capacity(name.len());
    for c in name.chars() {
        match c {
            '(' => depth += 1,
            ')' => depth = depth.saturating_sub(1),
            _ if depth == 0 => kept.push(c),
            _ => {}
        }
    }
    kept
}
