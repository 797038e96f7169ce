//! Domain DTOs for the drug catalog API.
//!
//! # Design
//! These types mirror the mock-server's schema but are defined independently;
//! integration tests catch any schema drift between the two crates.
//!
//! Every clinical field is optional. Absent list-valued fields and explicit
//! `null`s both deserialize to an empty `Vec`, so callers never distinguish
//! "missing" from "empty". `contraindications` is normalized at parse time:
//! the API sends either a single string or a list, and downstream code only
//! ever sees the list.

use serde::{Deserialize, Deserializer, Serialize};

/// Identifier of a drug on the wire.
pub type DrugId = u64;

/// Identifier of a category on the wire.
pub type CategoryId = u64;

/// A drug record as returned by the API.
///
/// List endpoints populate only the summary fields (`id` through
/// `requires_prescription`); the detail endpoint fills in the rest.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Drug {
    pub id: DrugId,
    pub name: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub category: String,
    pub category_id: CategoryId,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub drug_class: Option<String>,
    #[serde(default)]
    pub requires_prescription: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub dosage: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max_dosage: Option<String>,
    #[serde(default, deserialize_with = "null_as_empty", skip_serializing_if = "Vec::is_empty")]
    pub side_effects: Vec<String>,
    #[serde(default, deserialize_with = "null_as_empty", skip_serializing_if = "Vec::is_empty")]
    pub common_side_effects: Vec<String>,
    #[serde(default, deserialize_with = "null_as_empty", skip_serializing_if = "Vec::is_empty")]
    pub serious_side_effects: Vec<String>,
    #[serde(default, deserialize_with = "null_as_empty", skip_serializing_if = "Vec::is_empty")]
    pub rare_side_effects: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub warnings: Option<String>,
    #[serde(default, deserialize_with = "null_as_empty", skip_serializing_if = "Vec::is_empty")]
    pub interactions: Vec<Interaction>,
    #[serde(default, deserialize_with = "string_or_list", skip_serializing_if = "Vec::is_empty")]
    pub contraindications: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub mechanism_of_action: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub pharmacokinetics: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub half_life: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub onset_of_action: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub route_of_administration: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub pregnancy_category: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub pregnancy_info: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub lactation_info: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub storage_info: Option<String>,
}

impl Drug {
    /// Over-the-counter drugs are exactly those that do not require a
    /// prescription.
    pub fn is_otc(&self) -> bool {
        !self.requires_prescription
    }

    /// Every known side effect. Uses the aggregated `side_effects` list when
    /// the API sent one, otherwise common, serious and rare in that order.
    pub fn all_side_effects(&self) -> Vec<&str> {
        if !self.side_effects.is_empty() {
            return self.side_effects.iter().map(String::as_str).collect();
        }
        self.common_side_effects
            .iter()
            .chain(&self.serious_side_effects)
            .chain(&self.rare_side_effects)
            .map(String::as_str)
            .collect()
    }
}

/// A drug category with the number of drugs filed under it.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Category {
    pub id: CategoryId,
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default)]
    pub drug_count: u64,
}

/// A known interaction between a drug and another substance.
///
/// `severity` is free text ("Major", "moderate", ...); the API does not
/// constrain it to a fixed set.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Interaction {
    pub name: String,
    #[serde(default)]
    pub description: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub severity: Option<String>,
}

fn null_as_empty<'de, D, T>(deserializer: D) -> Result<Vec<T>, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de>,
{
    Ok(Option::<Vec<T>>::deserialize(deserializer)?.unwrap_or_default())
}

/// Accept `"text"`, `["a", "b"]` or `null` and always produce a list.
fn string_or_list<'de, D>(deserializer: D) -> Result<Vec<String>, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum StringOrList {
        One(String),
        Many(Vec<String>),
    }

    Ok(match Option::<StringOrList>::deserialize(deserializer)? {
        None => Vec::new(),
        Some(StringOrList::One(s)) if s.trim().is_empty() => Vec::new(),
        Some(StringOrList::One(s)) => vec![s],
        Some(StringOrList::Many(items)) => items,
    })
}
