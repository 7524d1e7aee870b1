//! Keyword-heuristic category tagging.
//!
//! [`tag_text`] is a pure lookup over a [`CategoryRules`] table: count
//! whole-word, case-insensitive keyword hits per category and pick the
//! category with the most hits. Ties go to the category declared first in
//! [`Category`]; no hits at all gives [`Category::Unknown`].

use std::collections::BTreeMap;

use crate::config::CategoriesConfig;
use crate::models::Category;

const PRODUCT_KEYWORDS: &[&str] = &[
    "feature",
    "dictation",
    "dictate",
    "voice",
    "shortcut",
    "hotkey",
    "command mode",
    "dictionary",
    "snippet",
    "language",
    "settings",
    "workflow",
];

const BILLING_KEYWORDS: &[&str] = &[
    "billing",
    "invoice",
    "payment",
    "price",
    "pricing",
    "subscription",
    "refund",
    "plan",
    "charge",
    "trial",
    "receipt",
    "upgrade",
];

const TECHNICAL_KEYWORDS: &[&str] = &[
    "error",
    "crash",
    "install",
    "installation",
    "bug",
    "microphone",
    "permission",
    "permissions",
    "troubleshoot",
    "troubleshooting",
    "not working",
    "latency",
    "update",
    "compatibility",
];

const ACCOUNT_KEYWORDS: &[&str] = &[
    "account",
    "login",
    "log in",
    "sign in",
    "password",
    "email",
    "profile",
    "sso",
    "team",
    "delete account",
];

/// Keywords per category, lowercased. [`Category::Unknown`] never has keywords.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CategoryRules {
    keywords: BTreeMap<Category, Vec<String>>,
}

impl Default for CategoryRules {
    fn default() -> Self {
        let mut keywords = BTreeMap::new();
        keywords.insert(Category::Product, owned(PRODUCT_KEYWORDS));
        keywords.insert(Category::Billing, owned(BILLING_KEYWORDS));
        keywords.insert(Category::Technical, owned(TECHNICAL_KEYWORDS));
        keywords.insert(Category::Account, owned(ACCOUNT_KEYWORDS));
        Self { keywords }
    }
}

fn owned(words: &[&str]) -> Vec<String> {
    words.iter().map(|w| w.to_string()).collect()
}

impl CategoryRules {
    /// Built-in table with any per-category overrides from config applied.
    pub fn from_config(config: &CategoriesConfig) -> Self {
        let mut rules = Self::default();
        let overrides = [
            (Category::Product, &config.product),
            (Category::Billing, &config.billing),
            (Category::Technical, &config.technical),
            (Category::Account, &config.account),
        ];
        for (category, keywords) in overrides {
            if let Some(list) = keywords {
                rules.set(category, list.iter().map(String::as_str));
            }
        }
        rules
    }

    /// Replace the keyword list of one category.
    pub fn set<'k>(&mut self, category: Category, keywords: impl IntoIterator<Item = &'k str>) {
        if category == Category::Unknown {
            return;
        }
        let list = keywords
            .into_iter()
            .map(|k| collapse_whitespace(k).to_lowercase())
            .filter(|k| !k.is_empty())
            .collect();
        self.keywords.insert(category, list);
    }

    #[cfg(test)]
    fn keywords(&self, category: Category) -> &[String] {
        self.keywords
            .get(&category)
            .map(Vec::as_slice)
            .unwrap_or(&[])
    }
}

/// Assign a category to `text` using `rules`.
pub fn tag_text(text: &str, rules: &CategoryRules) -> Category {
    // Line breaks inside wrapped PDF text must not split multi-word keywords.
    let haystack = collapse_whitespace(text).to_lowercase();
    let mut best = Category::Unknown;
    let mut best_hits = 0usize;
    for (category, keywords) in &rules.keywords {
        let hits: usize = keywords
            .iter()
            .map(|k| count_whole_word(&haystack, k))
            .sum();
        // BTreeMap iterates in declaration order, so `>` keeps the earlier
        // category on ties.
        if hits > best_hits {
            best = *category;
            best_hits = hits;
        }
    }
    best
}

fn collapse_whitespace(text: &str) -> String {
    text.split_whitespace().collect::<Vec<_>>().join(" ")
}

/// Count occurrences of `needle` in `haystack` that are not embedded in a
/// longer alphanumeric word. Both sides are expected to be lowercase.
fn count_whole_word(haystack: &str, needle: &str) -> usize {
    if needle.is_empty() {
        return 0;
    }
    haystack
        .match_indices(needle)
        .filter(|(pos, _)| {
            let before = haystack[..*pos].chars().next_back();
            let after = haystack[pos + needle.len()..].chars().next();
            !before.is_some_and(char::is_alphanumeric) && !after.is_some_and(char::is_alphanumeric)
        })
        .count()
}
