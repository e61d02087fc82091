pub mod types;

pub use types::{DietaryProfile, PrimaryDiet};
