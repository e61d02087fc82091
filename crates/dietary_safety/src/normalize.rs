use std::collections::HashSet;

use catalog::ContentItem;

/// Canonical searchable form of a catalog item: one lowercase text blob
/// for keyword scanning and one lowercase tag set for tag policies.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NormalizedItem {
    pub text: String,
    pub tags: HashSet<String>,
}

impl NormalizedItem {
    /// First keyword appearing anywhere in the text blob, if any.
    /// Returns the matched keyword so removals can name their reason.
    pub fn find_keyword<'a>(&self, keywords: &'a [String]) -> Option<&'a str> {
        keywords
            .iter()
            .find(|kw| self.text.contains(kw.as_str()))
            .map(String::as_str)
    }

    /// First of `tags` carried by the item, if any.
    pub fn find_tag<'a>(&self, tags: &'a [String]) -> Option<&'a str> {
        tags.iter()
            .find(|tag| self.tags.contains(tag.as_str()))
            .map(String::as_str)
    }

    pub fn has_tag(&self, tag: &str) -> bool {
        self.tags.contains(tag)
    }

    pub fn has_any_tag(&self, tags: &[&str]) -> bool {
        tags.iter().any(|tag| self.tags.contains(*tag))
    }
}

/// Extract the canonical text and tag set from a heterogeneous item.
///
/// Missing fields are treated as empty, never as an error. Pure and
/// idempotent; the pipeline calls this once per item per pass.
pub fn normalize(item: &ContentItem) -> NormalizedItem {
    let mut parts: Vec<&str> = Vec::new();
    if let Some(name) = &item.name {
        parts.push(name);
    }
    if let Some(description) = &item.description {
        parts.push(description);
    }
    parts.extend(item.ingredients.iter().map(String::as_str));
    parts.extend(item.instructions.iter().map(String::as_str));
    let text = parts.join(" ").to_lowercase();

    let mut tags = HashSet::new();
    for collection in [
        &item.dietary_tags,
        &item.tags,
        &item.categories,
        &item.labels,
    ] {
        if let Some(list) = collection {
            tags.extend(list.iter().map(|tag| tag.trim().to_lowercase()));
        }
    }

    NormalizedItem { text, tags }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn item_with_everything() -> ContentItem {
        ContentItem {
            name: Some("Almond Butter Toast".to_string()),
            description: Some("Crunchy breakfast".to_string()),
            ingredients: vec!["Almond butter".to_string(), "Bread".to_string()],
            instructions: vec!["Spread and serve".to_string()],
            dietary_tags: Some(vec!["Vegetarian".to_string()]),
            tags: Some(vec!["breakfast".to_string()]),
            categories: Some(vec!["Toast".to_string()]),
            labels: Some(vec!["quick ".to_string()]),
            ..ContentItem::default()
        }
    }

    #[test]
    fn test_text_concatenates_all_descriptive_fields_lowercased() {
        let norm = normalize(&item_with_everything());

        assert!(norm.text.contains("almond butter toast"));
        assert!(norm.text.contains("crunchy breakfast"));
        assert!(norm.text.contains("bread"));
        assert!(norm.text.contains("spread and serve"));
        assert_eq!(norm.text, norm.text.to_lowercase());
    }

    #[test]
    fn test_tags_union_all_four_collections() {
        let norm = normalize(&item_with_everything());

        for tag in ["vegetarian", "breakfast", "toast", "quick"] {
            assert!(norm.has_tag(tag), "expected tag {:?}", tag);
        }
    }

    #[test]
    fn test_missing_fields_yield_empty_forms() {
        let norm = normalize(&ContentItem::default());

        assert!(norm.text.is_empty());
        assert!(norm.tags.is_empty());
    }

    #[test]
    fn test_find_keyword_reports_the_match() {
        let norm = normalize(&item_with_everything());
        let keywords = vec!["walnut".to_string(), "almond".to_string()];

        assert_eq!(norm.find_keyword(&keywords), Some("almond"));
        assert_eq!(norm.find_keyword(&[]), None);
    }

    #[test]
    fn test_normalize_is_idempotent_per_item() {
        let item = item_with_everything();

        assert_eq!(normalize(&item), normalize(&item));
    }
}
