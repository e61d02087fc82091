use serde::{Deserialize, Serialize};
use serde_json::Value;
use strum::{AsRefStr, Display, EnumString, VariantArray};

/// Shape of a catalog record: a full meal, a single ingredient, or a
/// shopping-list entry.
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
#[strum(serialize_all = "snake_case", ascii_case_insensitive)]
#[serde(rename_all = "snake_case")]
pub enum ItemKind {
    #[default]
    #[serde(alias = "recipe")]
    Meal,
    Ingredient,
    #[serde(alias = "shoppingEntry")]
    ShoppingEntry,
}

/// A food-related catalog record as supplied by upstream services.
///
/// Every descriptive field is optional: meals usually carry most of them,
/// ingredient and shopping entries often carry only a name. The four tag
/// collections stay `Option` so that "no tag collection at all" is
/// distinguishable from "tagged with nothing" — the filter treats the
/// former as missing safety metadata on meals.
///
/// The filter never mutates these records; it only reads them and copies
/// survivors into its output.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ContentItem {
    pub id: Option<String>,
    pub kind: ItemKind,
    pub name: Option<String>,
    pub description: Option<String>,
    pub ingredients: Vec<String>,
    pub instructions: Vec<String>,
    #[serde(alias = "dietaryTags")]
    pub dietary_tags: Option<Vec<String>>,
    pub tags: Option<Vec<String>>,
    pub categories: Option<Vec<String>>,
    pub labels: Option<Vec<String>>,
}

impl ContentItem {
    /// A bare ingredient record carrying only a name.
    pub fn ingredient(name: impl Into<String>) -> Self {
        ContentItem {
            kind: ItemKind::Ingredient,
            name: Some(name.into()),
            ..ContentItem::default()
        }
    }

    /// True when at least one of the tag collections is present, even if
    /// empty. Items without any collection cannot prove anything about
    /// their own safety.
    pub fn has_tag_metadata(&self) -> bool {
        self.dietary_tags.is_some()
            || self.tags.is_some()
            || self.categories.is_some()
            || self.labels.is_some()
    }

    /// Parse one element of an upstream items payload.
    ///
    /// Upstream collections are heterogeneous: plain strings are
    /// ingredient entries, objects are records with any subset of the
    /// fields above. Anything else (or an object with mistyped fields)
    /// yields `None` so the caller can exclude it.
    pub fn from_value(value: &Value) -> Option<Self> {
        match value {
            Value::String(name) => Some(ContentItem::ingredient(name.clone())),
            Value::Object(_) => serde_json::from_value(value.clone()).ok(),
            _ => None,
        }
    }
}
