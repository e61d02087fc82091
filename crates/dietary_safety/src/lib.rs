//! Dietary safety filtering for the platewell meal planner.
//!
//! Takes a catalog of food-related items (meals, ingredients, shopping
//! entries) and a user's declared allergies, restrictions, diet, and
//! spice tolerance, and produces the subset safe to show that user.
//! Exclusion is the default on doubt, a nut/dairy re-verification pass
//! backstops the primary filter, and an emergency fallback keeps
//! meal-plan callers from ever ending up with zero options.
//!
//! Everything here is synchronous, in-memory, and free of shared mutable
//! state: the rule registry is immutable after construction, so one
//! [`SafetyFilter`] can serve any number of concurrent callers.

pub mod error;
pub mod fallback;
pub mod filter;
pub mod normalize;
pub mod registry;
pub mod reverify;

pub use catalog::{ContentItem, ItemKind};
pub use error::FilterAnomaly;
pub use fallback::{FallbackMeals, MealSlot, WEEKLY_MINIMUM};
pub use filter::{FilterOptions, SafetyFilter};
pub use normalize::{NormalizedItem, normalize};
pub use profile::{DietaryProfile, PrimaryDiet};
pub use registry::{AllergenCategory, AllergenRule, DietRule, RuleRegistry, SpiceRule};
