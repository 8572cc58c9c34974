//! Slug normalization.
//!
//! A slug is the human-readable key of a product. Before every write the
//! stored value is lower-cased and each space, apostrophe, and hyphen is
//! replaced with an underscore. The transform is idempotent.

/// Normalize a raw slug (or a title used as a slug seed).
///
/// ```
/// use catalog_core::slug::normalize_slug;
///
/// assert_eq!(normalize_slug("Men's T-Shirt"), "men_s_t_shirt");
/// assert_eq!(normalize_slug("men_s_t_shirt"), "men_s_t_shirt");
/// ```
pub fn normalize_slug(raw: &str) -> String {
    raw.to_lowercase()
        .replace(' ', "_")
        .replace('\'', "_")
        .replace('-', "_")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_lowercases_and_replaces_separators() {
        assert_eq!(normalize_slug("Men's T-Shirt"), "men_s_t_shirt");
        assert_eq!(normalize_slug("Red Shoes"), "red_shoes");
    }

    #[test]
    fn test_every_occurrence_is_replaced() {
        assert_eq!(normalize_slug("a  b--c''d"), "a__b__c__d");
    }

    #[test]
    fn test_other_punctuation_is_kept() {
        assert_eq!(normalize_slug("Kids/Shoes.2024"), "kids/shoes.2024");
    }

    #[test]
    fn test_empty_input() {
        assert_eq!(normalize_slug(""), "");
    }

    #[test]
    fn test_idempotent() {
        for s in [
            "Men's T-Shirt",
            "  Leading And Trailing  ",
            "ALL-CAPS'TITLE",
            "Ünïcödé Jacket",
            "already_normal",
        ] {
            let once = normalize_slug(s);
            assert_eq!(normalize_slug(&once), once, "not idempotent for {:?}", s);
        }
    }
}
