//! Slug generation for persistence keys.

/// Lower-cases `text` and collapses every run of non-alphanumeric characters
/// into a single `-`, trimming dashes at both ends.
///
/// ```
/// use crewrate_core::slug::slugify;
///
/// assert_eq!(slugify("Crew #1 (North)"), "crew-1-north");
/// ```
pub fn slugify(text: &str) -> String {
    let mut slug = String::with_capacity(text.len());
    let mut pending_dash = false;
    for c in text.chars() {
        if c.is_alphanumeric() {
            if pending_dash && !slug.is_empty() {
                slug.push('-');
            }
            pending_dash = false;
            slug.extend(c.to_lowercase());
        } else {
            pending_dash = true;
        }
    }
    slug
}

/// Slug for a crew name. Names without any alphanumeric character map to
/// `"crew"` so the key never ends in an empty segment.
pub fn crew_slug(name: &str) -> String {
    let slug = slugify(name);
    if slug.is_empty() {
        "crew".to_string()
    } else {
        slug
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn slugify_basic() {
        assert_eq!(slugify("Crew 1"), "crew-1");
        assert_eq!(slugify("  North   Crew  "), "north-crew");
        assert_eq!(slugify("A--B__C"), "a-b-c");
    }

    #[test]
    fn slugify_empty_and_symbols() {
        assert_eq!(slugify(""), "");
        assert_eq!(slugify("###"), "");
    }

    #[test]
    fn crew_slug_falls_back_for_symbol_names() {
        assert_eq!(crew_slug("North Crew"), "north-crew");
        assert_eq!(crew_slug("***"), "crew");
        assert_eq!(crew_slug(""), "crew");
    }

    #[test]
    fn slugify_is_idempotent() {
        let once = slugify("Septic Pump-Out Team");
        assert_eq!(slugify(&once), once);
    }
}
