use catalog::{ContentItem, ItemKind};
use profile::DietaryProfile;

use crate::filter::{SafetyFilter, display_name};
use crate::normalize::normalize;
use crate::registry::AllergenCategory;

/// Core keyword stems for the two highest-severity allergen categories.
/// Deliberately narrower than the registry's full lists: these are the
/// matches that must never survive the primary pipeline, so any hit here
/// means the primary filter under-matched.
const NUT_STEMS: &[&str] = &[
    "peanut",
    "almond",
    "cashew",
    "walnut",
    "pecan",
    "pistachio",
    "hazelnut",
    "nut butter",
];
const DAIRY_STEMS: &[&str] = &["milk", "cheese", "butter", "cream", "yogurt", "whey"];

impl SafetyFilter {
    /// Defense-in-depth audit of an already-filtered set.
    ///
    /// For nut and dairy allergies explicitly declared in the profile,
    /// re-scan each surviving meal's text against the core stems and drop
    /// anything that slipped through. Removals here are logged at error
    /// level, distinct from ordinary filtering, because they indicate a
    /// defect upstream. Non-meal items pass through unaudited.
    pub fn reverify(
        &self,
        items: Vec<ContentItem>,
        profile: &DietaryProfile,
    ) -> Vec<ContentItem> {
        let mut audited: Vec<(AllergenCategory, &'static [&'static str])> = Vec::new();
        for term in &profile.allergies {
            let Some(rule) = self.registry().resolve_allergen(term) else {
                continue;
            };
            let stems = match rule.category {
                AllergenCategory::Nuts => NUT_STEMS,
                AllergenCategory::Dairy => DAIRY_STEMS,
                _ => continue,
            };
            if !audited.iter().any(|(category, _)| *category == rule.category) {
                audited.push((rule.category, stems));
            }
        }
        if audited.is_empty() {
            return items;
        }

        items
            .into_iter()
            .filter(|item| {
                if item.kind != ItemKind::Meal {
                    return true;
                }
                let norm = normalize(item);
                for (category, stems) in &audited {
                    if let Some(stem) = stems.iter().find(|stem| norm.text.contains(*stem)) {
                        tracing::error!(
                            item = display_name(item),
                            category = %category,
                            stem,
                            "item survived primary filtering; removed on re-verification"
                        );
                        return false;
                    }
                }
                true
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::registry::RuleRegistry;

    fn filter() -> SafetyFilter {
        SafetyFilter::new(RuleRegistry::builtin())
    }

    fn meal(name: &str) -> ContentItem {
        ContentItem {
            name: Some(name.to_string()),
            tags: Some(vec![]),
            ..ContentItem::default()
        }
    }

    #[test]
    fn test_reverify_removes_slipped_nut_meal() {
        let profile = DietaryProfile {
            allergies: vec!["peanut allergy".to_string()],
            ..DietaryProfile::default()
        };
        // Simulates a primary-filter defect by handing reverify an
        // unfiltered set.
        let items = vec![meal("Peanut Noodles"), meal("Plain Rice")];

        let out = filter().reverify(items, &profile);

        assert_eq!(out.len(), 1);
        assert_eq!(out[0].name.as_deref(), Some("Plain Rice"));
    }

    #[test]
    fn test_reverify_only_audits_declared_categories() {
        let profile = DietaryProfile {
            allergies: vec!["dairy".to_string()],
            ..DietaryProfile::default()
        };
        let items = vec![meal("Peanut Noodles")];

        let out = filter().reverify(items, &profile);

        assert_eq!(out.len(), 1, "nut stems are not audited without a nut allergy");
    }

    #[test]
    fn test_reverify_skips_non_meal_items() {
        let profile = DietaryProfile {
            allergies: vec!["dairy".to_string()],
            ..DietaryProfile::default()
        };
        let items = vec![ContentItem::ingredient("milk")];

        let out = filter().reverify(items, &profile);

        assert_eq!(out.len(), 1, "only meal-shaped items are audited");
    }

    #[test]
    fn test_reverify_without_severe_allergies_is_identity() {
        let profile = DietaryProfile {
            allergies: vec!["soy".to_string()],
            ..DietaryProfile::default()
        };
        let items = vec![meal("Cheese Toast")];

        let out = filter().reverify(items.clone(), &profile);

        assert_eq!(out, items);
    }
}
