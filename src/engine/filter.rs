use icu_normalizer::ComposingNormalizerBorrowed;

use crate::catalog::{Catalog, GlossaryEntry};

/// Category selector. `All` is the sentinel shown first in the selector.
#[derive(Clone, Debug, Default, PartialEq, Eq, Hash)]
pub enum CategoryFilter {
    #[default]
    All,
    Only(String),
}

impl CategoryFilter {
    pub fn matches(&self, category: &str) -> bool {
        match self {
            CategoryFilter::All => true,
            CategoryFilter::Only(c) => c == category,
        }
    }

    /// Display label; the sentinel uses the localized "all" text.
    pub fn label<'a>(&'a self, all_label: &'a str) -> &'a str {
        match self {
            CategoryFilter::All => all_label,
            CategoryFilter::Only(c) => c,
        }
    }
}

/// Lowercase and NFC-normalize so that precomposed and decomposed umlauts
/// compare equal.
pub fn fold_case(text: &str) -> String {
    let lower = text.to_lowercase();
    String::from(ComposingNormalizerBorrowed::new_nfc().normalize(&lower))
}

/// Query and category for one glossary view. The visible entries are always
/// recomputed from the catalog; nothing derived is cached here.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct FilterState {
    query: String,
    category: CategoryFilter,
}

impl FilterState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn query(&self) -> &str {
        &self.query
    }

    pub fn category(&self) -> &CategoryFilter {
        &self.category
    }

    pub fn set_query(&mut self, text: &str) {
        if self.query != text {
            tracing::debug!(query = text, "filter query changed");
        }
        self.query = text.to_string();
    }

    /// Unknown categories are accepted and match nothing.
    pub fn set_category(&mut self, category: CategoryFilter) {
        tracing::debug!(?category, "filter category changed");
        self.category = category;
    }

    pub fn reset(&mut self) {
        self.query.clear();
        self.category = CategoryFilter::All;
    }

    pub fn is_default(&self) -> bool {
        self.query.trim().is_empty() && self.category == CategoryFilter::All
    }

    pub fn matches(&self, entry: &GlossaryEntry) -> bool {
        self.category.matches(&entry.category) && text_matches(&self.needle(), entry)
    }

    /// Entries passing both predicates, in catalog order.
    pub fn visible_entries<'a>(&self, catalog: &'a Catalog) -> Vec<&'a GlossaryEntry> {
        let needle = self.needle();
        catalog
            .iter()
            .filter(|e| self.category.matches(&e.category) && text_matches(&needle, e))
            .collect()
    }

    pub fn match_count(&self, catalog: &Catalog) -> usize {
        self.visible_entries(catalog).len()
    }

    fn needle(&self) -> String {
        fold_case(self.query.trim())
    }
}

fn text_matches(needle: &str, entry: &GlossaryEntry) -> bool {
    needle.is_empty()
        || fold_case(&entry.term).contains(needle)
        || fold_case(&entry.definition).contains(needle)
        || fold_case(entry.tip_text()).contains(needle)
}

/// `All` followed by every distinct category in ascending order.
pub fn available_categories(catalog: &Catalog) -> Vec<CategoryFilter> {
    std::iter::once(CategoryFilter::All)
        .chain(
            catalog
                .categories()
                .into_iter()
                .map(|c| CategoryFilter::Only(c.to_string())),
        )
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> Catalog {
        Catalog::new(vec![
            GlossaryEntry::new("Seed Phrase", "Wallets", "Words that restore a wallet")
                .with_tip("Never type it into a website"),
            GlossaryEntry::new("Phishing", "Scams", "Fake sites that steal logins"),
            GlossaryEntry::new("Node", "Network", "Checks every block"),
            GlossaryEntry::new("Börse", "Handel", "Marktplatz für Coins"),
            GlossaryEntry::new("Cold Storage", "Wallets", "Offline key storage"),
        ])
    }

    fn terms<'a>(entries: &[&'a GlossaryEntry]) -> Vec<&'a str> {
        entries.iter().map(|e| e.term.as_str()).collect()
    }

    #[test]
    fn test_default_shows_everything_in_order() {
        let catalog = sample();
        let filter = FilterState::new();
        assert!(filter.is_default());
        assert_eq!(
            terms(&filter.visible_entries(&catalog)),
            vec!["Seed Phrase", "Phishing", "Node", "Börse", "Cold Storage"]
        );
    }

    #[test]
    fn test_query_is_case_insensitive_across_fields() {
        let catalog = sample();
        let mut filter = FilterState::new();

        filter.set_query("PHISH");
        assert_eq!(terms(&filter.visible_entries(&catalog)), vec!["Phishing"]);

        filter.set_query("block");
        assert_eq!(terms(&filter.visible_entries(&catalog)), vec!["Node"]);

        filter.set_query("website");
        assert_eq!(terms(&filter.visible_entries(&catalog)), vec!["Seed Phrase"]);
    }

    #[test]
    fn test_query_is_trimmed() {
        let catalog = sample();
        let mut filter = FilterState::new();
        filter.set_query("   node  ");
        assert_eq!(terms(&filter.visible_entries(&catalog)), vec!["Node"]);
        assert_eq!(filter.query(), "   node  ");

        filter.set_query("   ");
        assert_eq!(filter.match_count(&catalog), catalog.len());
    }

    #[test]
    fn test_no_match_is_empty() {
        let catalog = sample();
        let mut filter = FilterState::new();
        filter.set_query("zzzz-nothing");
        assert!(filter.visible_entries(&catalog).is_empty());
    }

    #[test]
    fn test_category_and_query_combine() {
        let catalog = sample();
        let mut filter = FilterState::new();
        filter.set_category(CategoryFilter::Only("Wallets".to_string()));
        assert_eq!(
            terms(&filter.visible_entries(&catalog)),
            vec!["Seed Phrase", "Cold Storage"]
        );

        filter.set_query("offline");
        assert_eq!(terms(&filter.visible_entries(&catalog)), vec!["Cold Storage"]);

        filter.set_query("phishing");
        assert!(filter.visible_entries(&catalog).is_empty());
    }

    #[test]
    fn test_unknown_category_matches_nothing() {
        let catalog = sample();
        let mut filter = FilterState::new();
        filter.set_category(CategoryFilter::Only("Nope".to_string()));
        assert_eq!(filter.match_count(&catalog), 0);
    }

    #[test]
    fn test_reset() {
        let catalog = sample();
        let mut filter = FilterState::new();
        filter.set_query("node");
        filter.set_category(CategoryFilter::Only("Scams".to_string()));
        assert!(!filter.is_default());
        filter.reset();
        assert!(filter.is_default());
        assert_eq!(filter.query(), "");
        assert_eq!(filter.match_count(&catalog), catalog.len());
    }

    #[test]
    fn test_decomposed_umlaut_matches_precomposed() {
        let catalog = sample();
        let mut filter = FilterState::new();
        // "bo" + COMBINING DIAERESIS + "rse"
        filter.set_query("Bo\u{308}rse");
        assert_eq!(terms(&filter.visible_entries(&catalog)), vec!["Börse"]);
    }

    #[test]
    fn test_available_categories() {
        let categories = available_categories(&sample());
        assert_eq!(categories[0], CategoryFilter::All);
        let labels: Vec<&str> = categories.iter().map(|c| c.label("All")).collect();
        assert_eq!(labels, vec!["All", "Handel", "Network", "Scams", "Wallets"]);
    }

    #[test]
    fn test_matches_single_entry() {
        let catalog = sample();
        let mut filter = FilterState::new();
        filter.set_query("steal");
        assert!(filter.matches(&catalog.entries()[1]));
        assert!(!filter.matches(&catalog.entries()[0]));
    }
}
