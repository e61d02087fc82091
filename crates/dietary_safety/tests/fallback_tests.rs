use dietary_safety::{
    ContentItem, DietaryProfile, PrimaryDiet, RuleRegistry, SafetyFilter, WEEKLY_MINIMUM,
};

fn meal(name: &str, tags: &[&str]) -> ContentItem {
    ContentItem {
        name: Some(name.to_string()),
        tags: Some(tags.iter().map(|s| s.to_string()).collect()),
        ..ContentItem::default()
    }
}

fn filter() -> SafetyFilter {
    SafetyFilter::new(RuleRegistry::builtin())
}

fn maximally_restricted_profile() -> DietaryProfile {
    DietaryProfile {
        allergies: vec![
            "nuts".to_string(),
            "dairy".to_string(),
            "shellfish".to_string(),
            "egg".to_string(),
        ],
        dietary_restrictions: vec!["gluten-free".to_string()],
        primary_diet: PrimaryDiet::Vegan,
        spice_preference: Some("none".to_string()),
        is_gluten_free: true,
        is_dairy_free: true,
        is_nut_free: true,
    }
}

#[test]
fn test_every_slot_is_populated_even_when_everything_is_restricted() {
    let meals = filter().generate_fallback(&maximally_restricted_profile());

    for item in meals.into_vec() {
        assert!(item.name.is_some(), "a fallback slot came back unnamed");
        assert!(
            item.id.unwrap().starts_with("emergency-"),
            "fallback items must be marked synthetic"
        );
        assert!(!item.ingredients.is_empty());
    }
}

#[test]
fn test_thin_catalog_gets_topped_up_with_fallback_meals() {
    let items = vec![
        meal("Rice Bowl", &["vegan", "gluten-free"]),
        meal("Quinoa Salad", &["vegan", "gluten-free"]),
    ];
    let profile = DietaryProfile {
        primary_diet: PrimaryDiet::Vegan,
        ..DietaryProfile::default()
    };

    let out = filter().meal_plan_candidates(&items, &profile);

    assert_eq!(out.len(), 2 + 4, "four fallback slots appended after the survivors");
    let emergency = out
        .iter()
        .filter(|item| {
            item.id
                .as_deref()
                .is_some_and(|id| id.starts_with("emergency-"))
        })
        .count();
    assert_eq!(emergency, 4);
    assert_eq!(out[0].name.as_deref(), Some("Rice Bowl"), "catalog items come first");
}

#[test]
fn test_sufficient_catalog_is_left_alone() {
    let items: Vec<ContentItem> = (0..WEEKLY_MINIMUM + 1)
        .map(|i| meal(&format!("Meal {i}"), &["vegan"]))
        .collect();

    let out = filter().meal_plan_candidates(&items, &DietaryProfile::default());

    assert_eq!(out.len(), WEEKLY_MINIMUM + 1);
    assert!(
        out.iter().all(|item| item.id.is_none()),
        "no synthetic items when supply is sufficient"
    );
}

#[test]
fn test_exactly_at_threshold_skips_fallback() {
    let items: Vec<ContentItem> = (0..WEEKLY_MINIMUM)
        .map(|i| meal(&format!("Meal {i}"), &[]))
        .collect();

    let out = filter().meal_plan_candidates(&items, &DietaryProfile::default());

    assert_eq!(out.len(), WEEKLY_MINIMUM, "the threshold is strictly below the minimum");
}

#[test]
fn test_fallback_meals_pass_their_own_filter_for_common_profiles() {
    let f = filter();
    let profile = DietaryProfile {
        allergies: vec!["nuts".to_string(), "dairy".to_string()],
        spice_preference: Some("mild".to_string()),
        ..DietaryProfile::default()
    };

    let meals = f.generate_fallback(&profile).into_vec();
    let refiltered = f.filter(&meals, &profile);

    assert_eq!(
        refiltered.len(),
        meals.len(),
        "staples must be intrinsically safe for keyword-only profiles"
    );
}
