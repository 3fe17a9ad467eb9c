//! Permanent product handle derivation.

/// Derives the storefront handle for an entry: `dog-<entry id>`, lowercased.
///
/// Depends on nothing but the entry id, so a dog keeps its handle for life
/// even when its name changes.
#[must_use]
pub fn derive_handle(entry_id: &str) -> String {
    format!("dog-{entry_id}").to_lowercase()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn prefixes_entry_id() {
        assert_eq!(derive_handle("24-108"), "dog-24-108");
    }

    #[test]
    fn lowercases_the_whole_handle() {
        assert_eq!(derive_handle("AB-12"), "dog-ab-12");
    }

    #[test]
    fn is_deterministic() {
        assert_eq!(derive_handle("7-3"), derive_handle("7-3"));
    }
}
