use serde::{Deserialize, Serialize};
use strum::{AsRefStr, Display, EnumString, VariantArray};

/// The user's primary eating pattern.
#[derive(
    EnumString,
    VariantArray,
    Display,
    AsRefStr,
    Clone,
    Copy,
    Debug,
    Default,
    PartialEq,
    Eq,
    Serialize,
    Deserialize,
)]
#[strum(serialize_all = "lowercase", ascii_case_insensitive)]
#[serde(rename_all = "lowercase", from = "String")]
pub enum PrimaryDiet {
    #[default]
    Omnivore,
    Vegan,
    Vegetarian,
    Pescatarian,
    Keto,
    Paleo,
    Other,
}

impl PrimaryDiet {
    /// Parse a user-entered diet name.
    ///
    /// Accepts the canonical names case-insensitively plus common loose
    /// phrasings ("plant-based", "I'm vegetarian"). Anything unrecognized
    /// maps to `Other`, which no filter rule matches.
    pub fn parse(s: &str) -> Self {
        let s = s.trim().to_lowercase();
        match s.as_str() {
            "omnivore" => PrimaryDiet::Omnivore,
            "vegan" => PrimaryDiet::Vegan,
            "vegetarian" => PrimaryDiet::Vegetarian,
            "pescatarian" => PrimaryDiet::Pescatarian,
            "keto" => PrimaryDiet::Keto,
            "paleo" => PrimaryDiet::Paleo,
            _ if s.contains("vegan") || s.contains("plant-based") => PrimaryDiet::Vegan,
            _ if s.contains("vegetarian") => PrimaryDiet::Vegetarian,
            _ if s.contains("pescatarian") || s.contains("pescetarian") => {
                PrimaryDiet::Pescatarian
            }
            _ if s.contains("keto") => PrimaryDiet::Keto,
            _ if s.contains("paleo") => PrimaryDiet::Paleo,
            _ => PrimaryDiet::Other,
        }
    }
}

impl From<String> for PrimaryDiet {
    fn from(s: String) -> Self {
        PrimaryDiet::parse(&s)
    }
}

/// A user's declared dietary constraints, read on every filter pass.
///
/// Owned and mutated by the profile subsystem; the filter only reads it.
/// `allergies` and `dietary_restrictions` are free text exactly as the
/// user typed them; resolution against known rules happens inside the
/// filter's rule registry. `spice_preference` is also free text since
/// onboarding accepts synonyms like "bland".
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DietaryProfile {
    pub allergies: Vec<String>,
    #[serde(alias = "dietaryRestrictions")]
    pub dietary_restrictions: Vec<String>,
    #[serde(alias = "primaryDiet")]
    pub primary_diet: PrimaryDiet,
    #[serde(alias = "spicePreference", alias = "spiceLevel")]
    pub spice_preference: Option<String>,
    #[serde(alias = "isGlutenFree")]
    pub is_gluten_free: bool,
    #[serde(alias = "isDairyFree")]
    pub is_dairy_free: bool,
    #[serde(alias = "isNutFree")]
    pub is_nut_free: bool,
}

impl DietaryProfile {
    /// True when the profile declares nothing the filter could act on.
    /// The pipeline returns its input unchanged for such profiles.
    pub fn is_unrestricted(&self) -> bool {
        self.allergies.is_empty()
            && self.dietary_restrictions.is_empty()
            && matches!(
                self.primary_diet,
                PrimaryDiet::Omnivore | PrimaryDiet::Other
            )
            && self.spice_preference.is_none()
            && !self.is_gluten_free
            && !self.is_dairy_free
            && !self.is_nut_free
    }
}
