use serde::{Deserialize, Serialize};
use strum::{AsRefStr, Display, EnumString, VariantArray};

/// Named allergen clusters the registry knows how to detect.
#[derive(
    EnumString,
    VariantArray,
    Display,
    AsRefStr,
    Clone,
    Copy,
    Debug,
    PartialEq,
    Eq,
    Serialize,
    Deserialize,
)]
#[strum(serialize_all = "lowercase", ascii_case_insensitive)]
#[serde(rename_all = "lowercase")]
pub enum AllergenCategory {
    Nuts,
    Dairy,
    Gluten,
    Soy,
    Eggs,
    Shellfish,
    Fish,
    Sesame,
}

/// Detection rule for one allergen category.
///
/// `aliases` identify the category in user-entered allergy text
/// ("peanut allergy" resolves to nuts because it contains "peanut");
/// `keywords` disqualify items whose searchable text mentions them;
/// `disqualifying_tags` do the same for item tags. `safe_alternatives`
/// feed substitution hints in the UI.
#[derive(Debug, Clone)]
pub struct AllergenRule {
    pub category: AllergenCategory,
    pub aliases: Vec<String>,
    pub keywords: Vec<String>,
    pub disqualifying_tags: Vec<String>,
    pub safe_alternatives: Vec<String>,
}

/// Rule for a named diet or free-text dietary restriction.
///
/// Allow-list rules require a qualifying tag to pass; deny-list rules
/// pass by default unless a keyword or tag matches.
#[derive(Debug, Clone)]
pub struct DietRule {
    pub name: String,
    pub aliases: Vec<String>,
    pub avoid_keywords: Vec<String>,
    pub disqualifying_tags: Vec<String>,
    pub qualifying_tags: Vec<String>,
    pub is_allow_list: bool,
}

/// Rule for one spice-tolerance level.
///
/// `mild_override_tags` let an explicitly mild-tagged item pass even
/// when an avoid keyword is present.
#[derive(Debug, Clone)]
pub struct SpiceRule {
    pub level: String,
    pub aliases: Vec<String>,
    pub avoid_keywords: Vec<String>,
    pub disqualifying_tags: Vec<String>,
    pub mild_override_tags: Vec<String>,
}

/// The static knowledge base behind the filter: allergen, diet, and
/// spice rules plus their resolution from loose user strings.
///
/// Constructed explicitly and handed to the pipeline so tests can inject
/// custom rule sets. Immutable after construction; `builtin` is the
/// production rule set and the single place new allergen, diet, or spice
/// support is added.
#[derive(Debug, Clone)]
pub struct RuleRegistry {
    allergens: Vec<AllergenRule>,
    diets: Vec<DietRule>,
    spice: Vec<SpiceRule>,
}

fn words(list: &[&str]) -> Vec<String> {
    list.iter().map(|s| s.to_string()).collect()
}

impl RuleRegistry {
    pub fn with_rules(
        allergens: Vec<AllergenRule>,
        diets: Vec<DietRule>,
        spice: Vec<SpiceRule>,
    ) -> Self {
        RuleRegistry {
            allergens,
            diets,
            spice,
        }
    }

    /// The hand-authored production rule set.
    pub fn builtin() -> Self {
        // Shellfish must come before fish: "shellfish" contains "fish"
        // and resolution takes the first matching rule.
        let allergens = vec![
            AllergenRule {
                category: AllergenCategory::Nuts,
                aliases: words(&["nut", "almond", "cashew", "pistachio", "pecan"]),
                keywords: words(&[
                    "peanut",
                    "almond",
                    "cashew",
                    "walnut",
                    "pecan",
                    "pistachio",
                    "hazelnut",
                    "macadamia",
                    "brazil nut",
                    "nut butter",
                    "mixed nuts",
                    "praline",
                    "nougat",
                    "marzipan",
                ]),
                disqualifying_tags: words(&["nuts", "tree-nuts", "contains-nuts"]),
                safe_alternatives: words(&[
                    "sunflower seed butter",
                    "pumpkin seeds",
                    "roasted chickpeas",
                ]),
            },
            AllergenRule {
                category: AllergenCategory::Dairy,
                aliases: words(&["dairy", "milk", "lactose", "cheese"]),
                keywords: words(&[
                    "milk",
                    "cheese",
                    "butter",
                    "cream",
                    "yogurt",
                    "whey",
                    "casein",
                    "ghee",
                    "custard",
                    "lactose",
                    "mozzarella",
                    "parmesan",
                    "cheddar",
                ]),
                disqualifying_tags: words(&["dairy", "contains-dairy"]),
                safe_alternatives: words(&["oat milk", "coconut yogurt", "olive oil"]),
            },
            AllergenRule {
                category: AllergenCategory::Gluten,
                aliases: words(&["gluten", "wheat", "celiac", "coeliac"]),
                keywords: words(&[
                    "wheat",
                    "barley",
                    "rye",
                    "flour",
                    "bread",
                    "pasta",
                    "noodle",
                    "cracker",
                    "couscous",
                    "semolina",
                    "seitan",
                    "bagel",
                    "croissant",
                ]),
                disqualifying_tags: words(&["gluten", "contains-gluten"]),
                safe_alternatives: words(&["rice", "quinoa", "corn tortillas"]),
            },
            AllergenRule {
                category: AllergenCategory::Soy,
                aliases: words(&["soy"]),
                keywords: words(&["soy", "tofu", "tempeh", "edamame", "miso", "tamari"]),
                disqualifying_tags: words(&["soy", "contains-soy"]),
                safe_alternatives: words(&["coconut aminos", "chickpeas"]),
            },
            AllergenRule {
                category: AllergenCategory::Eggs,
                aliases: words(&["egg"]),
                keywords: words(&[
                    "egg",
                    "mayonnaise",
                    "mayo",
                    "meringue",
                    "aioli",
                    "frittata",
                    "omelet",
                ]),
                disqualifying_tags: words(&["eggs", "contains-eggs"]),
                safe_alternatives: words(&["flax egg", "chia egg", "applesauce"]),
            },
            AllergenRule {
                category: AllergenCategory::Shellfish,
                aliases: words(&["shellfish", "shrimp", "prawn", "crab", "lobster", "crustacean"]),
                keywords: words(&[
                    "shrimp",
                    "prawn",
                    "crab",
                    "lobster",
                    "crayfish",
                    "scallop",
                    "clam",
                    "mussel",
                    "oyster",
                    "squid",
                    "calamari",
                    "octopus",
                ]),
                disqualifying_tags: words(&["shellfish", "contains-shellfish"]),
                safe_alternatives: words(&["white fish", "tofu"]),
            },
            AllergenRule {
                category: AllergenCategory::Fish,
                aliases: words(&["fish", "salmon", "tuna"]),
                keywords: words(&[
                    "fish",
                    "salmon",
                    "tuna",
                    "cod",
                    "tilapia",
                    "halibut",
                    "trout",
                    "sardine",
                    "anchovy",
                    "mackerel",
                ]),
                disqualifying_tags: words(&["fish", "contains-fish"]),
                safe_alternatives: words(&["chicken", "tofu", "jackfruit"]),
            },
            AllergenRule {
                category: AllergenCategory::Sesame,
                aliases: words(&["sesame", "tahini"]),
                keywords: words(&["sesame", "tahini", "halva", "benne"]),
                disqualifying_tags: words(&["sesame", "contains-sesame"]),
                safe_alternatives: words(&["sunflower seeds", "poppy seeds"]),
            },
        ];

        let diets = vec![
            DietRule {
                name: "vegan".to_string(),
                aliases: words(&["vegan", "plant-based", "plant based"]),
                avoid_keywords: words(&[
                    "beef", "pork", "chicken", "turkey", "lamb", "bacon", "ham", "sausage",
                    "steak", "fish", "salmon", "tuna", "shrimp", "milk", "cheese", "butter",
                    "cream", "yogurt", "egg", "honey", "gelatin",
                ]),
                disqualifying_tags: words(&["meat", "dairy", "contains-eggs"]),
                qualifying_tags: words(&["vegan", "plant-based"]),
                is_allow_list: true,
            },
            DietRule {
                name: "vegetarian".to_string(),
                aliases: words(&["vegetarian", "veggie"]),
                avoid_keywords: words(&[
                    "beef", "pork", "chicken", "turkey", "lamb", "bacon", "ham", "sausage",
                    "steak", "veal", "fish", "salmon", "tuna", "shrimp", "crab", "anchovy",
                    "gelatin", "lard",
                ]),
                disqualifying_tags: words(&["meat", "fish"]),
                qualifying_tags: Vec::new(),
                is_allow_list: false,
            },
            DietRule {
                name: "pescatarian".to_string(),
                aliases: words(&["pescatarian", "pescetarian"]),
                avoid_keywords: words(&[
                    "beef", "pork", "chicken", "turkey", "lamb", "bacon", "ham", "sausage",
                    "steak", "veal", "lard",
                ]),
                disqualifying_tags: words(&["meat"]),
                qualifying_tags: Vec::new(),
                is_allow_list: false,
            },
            DietRule {
                name: "keto".to_string(),
                aliases: words(&["keto", "ketogenic", "low carb", "low-carb"]),
                avoid_keywords: words(&[
                    "sugar", "bread", "pasta", "rice", "potato", "oats", "oatmeal", "flour",
                    "honey", "banana", "cereal", "noodle",
                ]),
                disqualifying_tags: words(&["high-carb"]),
                qualifying_tags: Vec::new(),
                is_allow_list: false,
            },
            DietRule {
                name: "paleo".to_string(),
                aliases: words(&["paleo", "caveman"]),
                avoid_keywords: words(&[
                    "bread", "pasta", "rice", "beans", "lentil", "peanut", "cheese", "milk",
                    "yogurt", "sugar", "cereal", "tofu", "soy",
                ]),
                disqualifying_tags: words(&["grain", "legume", "dairy"]),
                qualifying_tags: Vec::new(),
                is_allow_list: false,
            },
            // Allow-list by policy: gluten contamination is not reliably
            // keyword-detectable, so an explicit tag is required.
            DietRule {
                name: "gluten-free".to_string(),
                aliases: words(&["gluten", "celiac", "coeliac"]),
                avoid_keywords: words(&["wheat", "barley", "rye", "semolina", "seitan"]),
                disqualifying_tags: words(&["contains-gluten"]),
                qualifying_tags: words(&[
                    "gluten-free",
                    "gluten free",
                    "gluten_free",
                    "glutenfree",
                ]),
                is_allow_list: true,
            },
            DietRule {
                name: "dairy-free".to_string(),
                aliases: words(&["dairy", "lactose"]),
                avoid_keywords: words(&[
                    "milk", "cheese", "butter", "cream", "yogurt", "whey", "casein", "ghee",
                    "custard",
                ]),
                disqualifying_tags: words(&["dairy", "contains-dairy"]),
                qualifying_tags: Vec::new(),
                is_allow_list: false,
            },
            DietRule {
                name: "nut-free".to_string(),
                aliases: words(&["nut", "peanut"]),
                avoid_keywords: words(&[
                    "peanut",
                    "almond",
                    "cashew",
                    "walnut",
                    "pecan",
                    "pistachio",
                    "hazelnut",
                    "macadamia",
                    "nut butter",
                ]),
                disqualifying_tags: words(&["nuts", "contains-nuts"]),
                qualifying_tags: Vec::new(),
                is_allow_list: false,
            },
        ];

        let hot_keywords = &[
            "spicy",
            "chili",
            "chile",
            "jalapeño",
            "jalapeno",
            "habanero",
            "sriracha",
            "cayenne",
            "hot sauce",
            "curry",
            "wasabi",
            "pepper flakes",
            "red pepper",
            "gochujang",
            "harissa",
            "ginger",
        ];

        // "none" before "mild" before "hot": alias matching is substring
        // based and "not spicy" must land on mild, not hot.
        let spice = vec![
            SpiceRule {
                level: "none".to_string(),
                aliases: words(&["none", "no spice", "zero spice", "spice-free"]),
                avoid_keywords: words(hot_keywords),
                disqualifying_tags: words(&["spicy", "hot", "medium-spice"]),
                mild_override_tags: words(&["mild", "no-spice"]),
            },
            SpiceRule {
                level: "mild".to_string(),
                aliases: words(&["mild", "bland", "not spicy", "low spice", "sensitive"]),
                avoid_keywords: words(hot_keywords),
                disqualifying_tags: words(&["spicy", "hot"]),
                mild_override_tags: words(&["mild", "kid-friendly", "no-spice"]),
            },
            SpiceRule {
                level: "medium".to_string(),
                aliases: words(&["medium"]),
                avoid_keywords: words(&["ghost pepper", "carolina reaper", "extra hot"]),
                disqualifying_tags: words(&["extra-hot"]),
                mild_override_tags: Vec::new(),
            },
            SpiceRule {
                level: "hot".to_string(),
                aliases: words(&["hot", "spicy"]),
                avoid_keywords: Vec::new(),
                disqualifying_tags: Vec::new(),
                mild_override_tags: Vec::new(),
            },
        ];

        RuleRegistry::with_rules(allergens, diets, spice)
    }

    /// Resolve a user-entered allergy string to at most one allergen rule.
    /// First rule whose alias appears in the string wins; unresolved
    /// strings are a no-op for the caller.
    pub fn resolve_allergen(&self, term: &str) -> Option<&AllergenRule> {
        let term = term.trim().to_lowercase();
        self.allergens
            .iter()
            .find(|rule| rule.aliases.iter().any(|a| term.contains(a.as_str())))
    }

    /// Resolve a user-entered restriction or diet name to at most one
    /// diet rule.
    pub fn resolve_diet(&self, term: &str) -> Option<&DietRule> {
        let term = term.trim().to_lowercase();
        self.diets
            .iter()
            .find(|rule| rule.aliases.iter().any(|a| term.contains(a.as_str())))
    }

    /// Resolve a spice level or synonym ("bland") to at most one spice
    /// rule.
    pub fn resolve_spice(&self, term: &str) -> Option<&SpiceRule> {
        let term = term.trim().to_lowercase();
        self.spice
            .iter()
            .find(|rule| rule.aliases.iter().any(|a| term.contains(a.as_str())))
    }

    /// Direct lookup by category, for callers that already know which
    /// allergen they are auditing.
    pub fn allergen(&self, category: AllergenCategory) -> Option<&AllergenRule> {
        self.allergens.iter().find(|rule| rule.category == category)
    }

    /// Substitute ingredients for the allergen an allergy string resolves
    /// to. Empty for unrecognized strings.
    pub fn suggest_alternatives(&self, term: &str) -> &[String] {
        self.resolve_allergen(term)
            .map(|rule| rule.safe_alternatives.as_slice())
            .unwrap_or(&[])
    }
}
