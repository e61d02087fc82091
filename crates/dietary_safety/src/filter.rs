use catalog::{ContentItem, ItemKind};
use profile::DietaryProfile;
use serde_json::Value;

use crate::error::FilterAnomaly;
use crate::normalize::{NormalizedItem, normalize};
use crate::registry::{AllergenCategory, AllergenRule, DietRule, RuleRegistry, SpiceRule};

const NUT_FREE_TAGS: &[&str] = &["nut-free", "nut free", "nut_free"];
const DAIRY_FREE_TAGS: &[&str] = &["dairy-free", "dairy free", "dairy_free", "non-dairy"];
const GLUTEN_FREE_TAGS: &[&str] = &["gluten-free", "gluten free", "gluten_free", "glutenfree"];

/// Pipeline toggles.
#[derive(Debug, Clone)]
pub struct FilterOptions {
    /// When set, an item carrying a mild-override tag passes the spice
    /// stage even if a spicy keyword is present in its text. This
    /// reproduces long-standing production behavior; disable it to let
    /// keyword detection win over the tag.
    pub mild_override: bool,
}

impl Default for FilterOptions {
    fn default() -> Self {
        FilterOptions {
            mild_override: true,
        }
    }
}

/// The dietary safety filter: narrows a catalog of items down to the
/// subset safe for one user's declared profile.
///
/// Exclusion is the default on doubt. Every stage is a pure narrowing
/// transform, so output is always a subset of input, in input order, and
/// repeated passes are idempotent. The registry is read-only; a filter
/// can be shared freely across callers.
pub struct SafetyFilter {
    registry: RuleRegistry,
    options: FilterOptions,
}

struct Candidate<'a> {
    item: &'a ContentItem,
    norm: NormalizedItem,
}

pub(crate) fn display_name(item: &ContentItem) -> &str {
    item.name
        .as_deref()
        .or(item.id.as_deref())
        .unwrap_or("<unnamed>")
}

impl SafetyFilter {
    pub fn new(registry: RuleRegistry) -> Self {
        SafetyFilter::with_options(registry, FilterOptions::default())
    }

    pub fn with_options(registry: RuleRegistry, options: FilterOptions) -> Self {
        SafetyFilter { registry, options }
    }

    pub fn registry(&self) -> &RuleRegistry {
        &self.registry
    }

    /// Narrow `items` to the subset safe for `profile`.
    ///
    /// Stages run in sequence over the surviving candidates: allergens,
    /// free-text restrictions (diet and spice families), primary diet,
    /// then the boolean flags. A stage with nothing to apply passes its
    /// input through unchanged; an unrestricted profile short-circuits to
    /// the full input.
    pub fn filter(&self, items: &[ContentItem], profile: &DietaryProfile) -> Vec<ContentItem> {
        if profile.is_unrestricted() {
            return items.to_vec();
        }

        let mut candidates: Vec<Candidate> = items
            .iter()
            .map(|item| Candidate {
                item,
                norm: normalize(item),
            })
            .collect();

        // A meal record with no tag collections at all cannot prove
        // anything about its own safety once constraints are in play.
        candidates.retain(|c| {
            if c.item.kind != ItemKind::Meal || c.item.has_tag_metadata() {
                return true;
            }
            let anomaly = FilterAnomaly::MissingSafetyMetadata(display_name(c.item).to_string());
            tracing::warn!(anomaly = %anomaly, "excluding meal without safety metadata");
            false
        });

        self.allergen_stage(&mut candidates, profile);
        self.restriction_stage(&mut candidates, profile);
        self.primary_diet_stage(&mut candidates, profile);
        self.flag_stage(&mut candidates, profile);

        tracing::info!(
            input = items.len(),
            safe = candidates.len(),
            "dietary filter pass complete"
        );
        candidates.into_iter().map(|c| c.item.clone()).collect()
    }

    /// Duck-typed boundary for upstream callers holding raw JSON.
    ///
    /// A non-array items payload logs a warning and yields an empty
    /// result: better to show nothing than to misfilter. Entries that
    /// fail to parse are excluded the same way. An absent or malformed
    /// profile payload means no restrictions to apply.
    pub fn filter_value(&self, items: &Value, profile: &Value) -> Vec<ContentItem> {
        let Some(entries) = items.as_array() else {
            tracing::warn!(
                anomaly = %FilterAnomaly::InvalidInput,
                "refusing to filter non-array items payload"
            );
            return Vec::new();
        };

        let parsed: Vec<ContentItem> = entries
            .iter()
            .filter_map(|value| {
                let item = ContentItem::from_value(value);
                if item.is_none() {
                    tracing::warn!(
                        anomaly = %FilterAnomaly::InvalidInput,
                        "dropping unparseable catalog entry"
                    );
                }
                item
            })
            .collect();

        let profile: DietaryProfile =
            serde_json::from_value(profile.clone()).unwrap_or_default();

        self.filter(&parsed, &profile)
    }

    fn allergen_stage(&self, candidates: &mut Vec<Candidate>, profile: &DietaryProfile) {
        if profile.allergies.is_empty() {
            return;
        }
        let before = candidates.len();

        for term in &profile.allergies {
            let Some(rule) = self.registry.resolve_allergen(term) else {
                let anomaly = FilterAnomaly::UnknownRestriction(term.clone());
                tracing::warn!(anomaly = %anomaly, "allergy matches no known category");
                continue;
            };
            candidates.retain(|c| match allergen_violation(&c.norm, rule) {
                None => true,
                Some(matched) => {
                    tracing::debug!(
                        item = display_name(c.item),
                        category = %rule.category,
                        matched,
                        "removed by allergen rule"
                    );
                    false
                }
            });
        }

        tracing::info!(stage = "allergen", before, after = candidates.len(), "stage complete");
    }

    fn restriction_stage(&self, candidates: &mut Vec<Candidate>, profile: &DietaryProfile) {
        if profile.dietary_restrictions.is_empty() && profile.spice_preference.is_none() {
            return;
        }
        let before = candidates.len();

        for term in &profile.dietary_restrictions {
            let diet = self.registry.resolve_diet(term);
            let spice = self.registry.resolve_spice(term);
            if diet.is_none() && spice.is_none() {
                let anomaly = FilterAnomaly::UnknownRestriction(term.clone());
                tracing::warn!(anomaly = %anomaly, "ignoring unrecognized restriction");
                continue;
            }
            // A string can match both families; both rules apply.
            if let Some(rule) = diet {
                self.apply_diet_rule(candidates, rule);
            }
            if let Some(rule) = spice {
                self.apply_spice_rule(candidates, rule);
            }
        }

        // The declared spice preference rides the same stage. Levels that
        // resolve to no rule (or to the no-op hot rule) tolerate heat and
        // need no warning.
        if let Some(preference) = &profile.spice_preference {
            if let Some(rule) = self.registry.resolve_spice(preference) {
                self.apply_spice_rule(candidates, rule);
            }
        }

        tracing::info!(
            stage = "restriction",
            before,
            after = candidates.len(),
            "stage complete"
        );
    }

    fn primary_diet_stage(&self, candidates: &mut Vec<Candidate>, profile: &DietaryProfile) {
        // Omnivore and Other resolve to no rule and pass everything.
        let Some(rule) = self.registry.resolve_diet(profile.primary_diet.as_ref()) else {
            return;
        };
        let before = candidates.len();

        self.apply_diet_rule(candidates, rule);

        tracing::info!(
            stage = "primary_diet",
            diet = %rule.name,
            before,
            after = candidates.len(),
            "stage complete"
        );
    }

    fn flag_stage(&self, candidates: &mut Vec<Candidate>, profile: &DietaryProfile) {
        if !profile.is_nut_free && !profile.is_dairy_free && !profile.is_gluten_free {
            return;
        }
        let before = candidates.len();

        if profile.is_nut_free {
            self.apply_exempting_flag(candidates, AllergenCategory::Nuts, NUT_FREE_TAGS);
        }
        if profile.is_dairy_free {
            self.apply_exempting_flag(candidates, AllergenCategory::Dairy, DAIRY_FREE_TAGS);
        }
        if profile.is_gluten_free {
            // Allow-list only: gluten contamination is not reliably
            // keyword-detectable, so the explicit tag is required.
            candidates.retain(|c| {
                if c.norm.has_any_tag(GLUTEN_FREE_TAGS) {
                    return true;
                }
                tracing::debug!(
                    item = display_name(c.item),
                    "removed by gluten-free flag: no gluten-free tag"
                );
                false
            });
        }

        tracing::info!(stage = "flags", before, after = candidates.len(), "stage complete");
    }

    fn apply_diet_rule(&self, candidates: &mut Vec<Candidate>, rule: &DietRule) {
        candidates.retain(|c| match diet_removal_reason(&c.norm, rule) {
            None => true,
            Some(reason) => {
                tracing::debug!(
                    item = display_name(c.item),
                    diet = %rule.name,
                    reason,
                    "removed by diet rule"
                );
                false
            }
        });
    }

    fn apply_spice_rule(&self, candidates: &mut Vec<Candidate>, rule: &SpiceRule) {
        candidates.retain(|c| {
            // The override wins even when a spicy keyword is present.
            if self.options.mild_override && c.norm.find_tag(&rule.mild_override_tags).is_some() {
                return true;
            }
            let matched = c
                .norm
                .find_keyword(&rule.avoid_keywords)
                .or_else(|| c.norm.find_tag(&rule.disqualifying_tags));
            match matched {
                None => true,
                Some(matched) => {
                    tracing::debug!(
                        item = display_name(c.item),
                        level = %rule.level,
                        matched,
                        "removed by spice rule"
                    );
                    false
                }
            }
        });
    }

    /// Deny-list with an explicit escape hatch: items mentioning the
    /// category's keywords are removed unless they carry one of the
    /// `free_tags` that vouches for them.
    fn apply_exempting_flag(
        &self,
        candidates: &mut Vec<Candidate>,
        category: AllergenCategory,
        free_tags: &[&str],
    ) {
        let Some(rule) = self.registry.allergen(category) else {
            return;
        };
        candidates.retain(|c| {
            if c.norm.has_any_tag(free_tags) {
                return true;
            }
            match c.norm.find_keyword(&rule.keywords) {
                None => true,
                Some(matched) => {
                    tracing::debug!(
                        item = display_name(c.item),
                        category = %category,
                        matched,
                        "removed by boolean flag"
                    );
                    false
                }
            }
        });
    }
}

fn allergen_violation<'a>(norm: &NormalizedItem, rule: &'a AllergenRule) -> Option<&'a str> {
    norm.find_keyword(&rule.keywords)
        .or_else(|| norm.find_tag(&rule.disqualifying_tags))
}

fn diet_removal_reason(norm: &NormalizedItem, rule: &DietRule) -> Option<String> {
    if rule.is_allow_list && norm.find_tag(&rule.qualifying_tags).is_none() {
        return Some(format!("missing {} qualifying tag", rule.name));
    }
    if let Some(keyword) = norm.find_keyword(&rule.avoid_keywords) {
        return Some(format!("contains \"{keyword}\""));
    }
    if let Some(tag) = norm.find_tag(&rule.disqualifying_tags) {
        return Some(format!("tagged \"{tag}\""));
    }
    None
}
