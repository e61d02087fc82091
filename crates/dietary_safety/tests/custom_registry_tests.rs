use dietary_safety::{
    AllergenCategory, AllergenRule, ContentItem, DietaryProfile, RuleRegistry, SafetyFilter,
};

fn meal(name: &str, tags: &[&str]) -> ContentItem {
    ContentItem {
        name: Some(name.to_string()),
        tags: Some(tags.iter().map(|s| s.to_string()).collect()),
        ..ContentItem::default()
    }
}

fn to_strings(list: &[&str]) -> Vec<String> {
    list.iter().map(|s| s.to_string()).collect()
}

/// A deliberately under-matching nut rule: it resolves "nut" allergies
/// but only knows the "peanut" keyword.
fn weakened_nut_registry() -> RuleRegistry {
    RuleRegistry::with_rules(
        vec![AllergenRule {
            category: AllergenCategory::Nuts,
            aliases: to_strings(&["nut"]),
            keywords: to_strings(&["peanut"]),
            disqualifying_tags: to_strings(&["contains-nuts"]),
            safe_alternatives: to_strings(&["sunflower seed butter"]),
        }],
        Vec::new(),
        Vec::new(),
    )
}

#[test]
fn test_injected_rules_replace_the_builtin_knowledge_base() {
    let filter = SafetyFilter::new(weakened_nut_registry());
    let profile = DietaryProfile {
        allergies: vec!["nut allergy".to_string()],
        ..DietaryProfile::default()
    };
    let items = vec![meal("Peanut Brittle", &[]), meal("Cheese Plate", &[])];

    let out = filter.filter(&items, &profile);

    assert_eq!(out.len(), 1);
    assert_eq!(
        out[0].name.as_deref(),
        Some("Cheese Plate"),
        "the custom registry has no dairy rule, so cheese passes"
    );
}

#[test]
fn test_reverification_catches_what_a_weak_primary_rule_misses() {
    let filter = SafetyFilter::new(weakened_nut_registry());
    let profile = DietaryProfile {
        allergies: vec!["nut allergy".to_string()],
        ..DietaryProfile::default()
    };
    // "almond" is not a keyword of the weakened rule, so the primary
    // pipeline lets this through.
    let items = vec![meal("Almond Torte", &[]), meal("Fruit Salad", &[])];

    let survived = filter.filter(&items, &profile);
    assert_eq!(survived.len(), 2, "precondition: the weak rule misses almonds");

    let audited = filter.reverify(survived, &profile);

    assert_eq!(audited.len(), 1);
    assert_eq!(audited[0].name.as_deref(), Some("Fruit Salad"));
}

#[test]
fn test_empty_registry_filters_nothing() {
    let filter = SafetyFilter::new(RuleRegistry::with_rules(
        Vec::new(),
        Vec::new(),
        Vec::new(),
    ));
    let profile = DietaryProfile {
        allergies: vec!["nuts".to_string()],
        dietary_restrictions: vec!["vegan".to_string()],
        ..DietaryProfile::default()
    };
    let items = vec![meal("Peanut Beef Curry", &[])];

    let out = filter.filter(&items, &profile);

    assert_eq!(out.len(), 1, "with no rules every restriction is unknown and fails open");
}
