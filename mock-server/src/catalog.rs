//! In-memory catalog behind the mock API.
//!
//! Reproduces the real backend's query semantics: case-insensitive search
//! over name and description, OR across category ids, a prescription filter,
//! three sort orders and an optional limit. List endpoints return summary
//! records; only the detail endpoint returns clinical fields.

use std::cmp::Ordering;

use crate::{Category, Contraindications, Drug, Interaction, ListParams};

#[derive(Clone, Debug, Default)]
pub struct Catalog {
    categories: Vec<Category>,
    drugs: Vec<Drug>,
}

impl Catalog {
    /// Build a catalog, filling in each drug's category name and each
    /// category's drug count.
    pub fn new(mut categories: Vec<Category>, mut drugs: Vec<Drug>) -> Self {
        for drug in &mut drugs {
            drug.category = categories
                .iter()
                .find(|c| c.id == drug.category_id)
                .map(|c| c.name.clone())
                .unwrap_or_default();
        }
        for category in &mut categories {
            category.drug_count = drugs.iter().filter(|d| d.category_id == category.id).count() as u64;
        }
        Self { categories, drugs }
    }

    /// Categories ordered by name.
    pub fn categories(&self) -> Vec<Category> {
        let mut categories = self.categories.clone();
        categories.sort_by(|a, b| cmp_names(&a.name, &b.name));
        categories
    }

    pub fn category(&self, id: u64) -> Option<Category> {
        self.categories.iter().find(|c| c.id == id).cloned()
    }

    /// Full record with `side_effects` aggregated from the three frequency
    /// lists.
    pub fn drug(&self, id: u64) -> Option<Drug> {
        let mut drug = self.drugs.iter().find(|d| d.id == id)?.clone();
        drug.side_effects = drug
            .common_side_effects
            .iter()
            .chain(&drug.serious_side_effects)
            .chain(&drug.rare_side_effects)
            .cloned()
            .collect();
        Some(drug)
    }

    /// Summary records of the drugs in category `id`, by name.
    pub fn drugs_in_category(&self, id: u64) -> Vec<Drug> {
        let mut drugs: Vec<Drug> = self
            .drugs
            .iter()
            .filter(|d| d.category_id == id)
            .map(summary)
            .collect();
        drugs.sort_by(|a, b| cmp_names(&a.name, &b.name));
        drugs
    }

    pub fn list_drugs(&self, params: &ListParams) -> Vec<Drug> {
        let search = params
            .search
            .as_deref()
            .filter(|s| !s.is_empty())
            .map(str::to_lowercase);
        let categories: Option<Vec<u64>> = params
            .categories
            .as_deref()
            .filter(|s| !s.is_empty())
            .map(|s| s.split(',').filter_map(|id| id.trim().parse().ok()).collect());
        let requires_prescription = match params.prescription_filter.as_deref() {
            None | Some("") | Some("all") => None,
            Some("prescription") => Some(true),
            Some(_) => Some(false),
        };

        let mut drugs: Vec<Drug> = self
            .drugs
            .iter()
            .filter(|d| match &search {
                Some(needle) => {
                    d.name.to_lowercase().contains(needle)
                        || d.description.to_lowercase().contains(needle)
                }
                None => true,
            })
            .filter(|d| match &categories {
                Some(ids) => ids.contains(&d.category_id),
                None => true,
            })
            .filter(|d| requires_prescription.map_or(true, |rx| d.requires_prescription == rx))
            .map(summary)
            .collect();

        match params.sort_by.as_deref() {
            Some("name_desc") => drugs.sort_by(|a, b| cmp_names(&b.name, &a.name)),
            Some("category") => drugs.sort_by(|a, b| {
                cmp_names(&a.category, &b.category).then_with(|| cmp_names(&a.name, &b.name))
            }),
            _ => drugs.sort_by(|a, b| cmp_names(&a.name, &b.name)),
        }

        if let Some(limit) = params
            .limit
            .as_deref()
            .and_then(|l| l.parse::<usize>().ok())
            .filter(|&l| l > 0)
        {
            drugs.truncate(limit);
        }
        drugs
    }

    pub fn seeded() -> Self {
        let categories = vec![
            category(1, "Analgesics", Some("Medicines that relieve pain and reduce fever.")),
            category(2, "Antibiotics", Some("Medicines that treat bacterial infections.")),
            category(3, "Cardiovascular", Some("Medicines acting on the heart and blood vessels.")),
            category(4, "Antihistamines", None),
        ];

        let drugs = vec![
            Drug {
                dosage: Some("200-400 mg every 4-6 hours".to_string()),
                max_dosage: Some("1200 mg/day without supervision".to_string()),
                common_side_effects: strings(&["Upset stomach", "Heartburn"]),
                serious_side_effects: strings(&["Gastrointestinal bleeding"]),
                rare_side_effects: strings(&["Kidney problems"]),
                warnings: Some("Take with food. Avoid in late pregnancy.".to_string()),
                interactions: vec![
                    Interaction {
                        name: "Warfarin".to_string(),
                        description: "Increased risk of bleeding.".to_string(),
                        severity: Some("Major".to_string()),
                    },
                    Interaction {
                        name: "Lisinopril".to_string(),
                        description: "May reduce blood pressure lowering effect.".to_string(),
                        severity: Some("Moderate".to_string()),
                    },
                ],
                contraindications: Some(Contraindications::Many(strings(&[
                    "Active peptic ulcer",
                    "Severe heart failure",
                ]))),
                mechanism_of_action: Some("Non-selective COX-1 and COX-2 inhibition.".to_string()),
                half_life: Some("2-4 hours".to_string()),
                onset_of_action: Some("30 minutes".to_string()),
                route_of_administration: Some("Oral".to_string()),
                pregnancy_category: Some("C (D in third trimester)".to_string()),
                storage_info: Some("Store at room temperature.".to_string()),
                ..drug(1, "Ibuprofen", 1, "NSAID", false, "Nonsteroidal anti-inflammatory for pain, fever and inflammation.")
            },
            Drug {
                dosage: Some("500-1000 mg every 4-6 hours".to_string()),
                max_dosage: Some("4000 mg/day".to_string()),
                common_side_effects: strings(&["Nausea"]),
                serious_side_effects: strings(&["Liver damage"]),
                contraindications: Some(Contraindications::One("Severe hepatic impairment".to_string())),
                route_of_administration: Some("Oral".to_string()),
                ..drug(2, "Acetaminophen", 1, "Analgesic", false, "Pain reliever and fever reducer.")
            },
            drug(3, "Advil", 1, "NSAID", false, "Brand-name ibuprofen tablets for minor aches."),
            drug(4, "Vicoprofen", 1, "Opioid combination", true, "Hydrocodone with ibuprofen for short-term severe pain."),
            Drug {
                dosage: Some("500 mg every 8 hours".to_string()),
                common_side_effects: strings(&["Diarrhea", "Rash"]),
                rare_side_effects: strings(&["Anaphylaxis"]),
                interactions: vec![Interaction {
                    name: "Methotrexate".to_string(),
                    description: "Reduced methotrexate clearance.".to_string(),
                    severity: None,
                }],
                contraindications: Some(Contraindications::Many(strings(&["Penicillin allergy"]))),
                ..drug(5, "Amoxicillin", 2, "Penicillin", true, "Broad-spectrum penicillin antibiotic.")
            },
            drug(6, "Azithromycin", 2, "Macrolide", true, "Macrolide antibiotic for respiratory infections."),
            drug(7, "Lisinopril", 3, "ACE inhibitor", true, "Treats high blood pressure and heart failure."),
            drug(8, "Atorvastatin", 3, "Statin", true, "Lowers LDL cholesterol."),
            drug(9, "Loratadine", 4, "Second-generation antihistamine", false, "Non-drowsy allergy relief."),
            drug(10, "Cetirizine", 4, "Second-generation antihistamine", false, "Relief of hay fever and hives."),
        ];

        Self::new(categories, drugs)
    }
}

fn summary(drug: &Drug) -> Drug {
    Drug {
        id: drug.id,
        name: drug.name.clone(),
        description: drug.description.clone(),
        category_id: drug.category_id,
        category: drug.category.clone(),
        drug_class: drug.drug_class.clone(),
        requires_prescription: drug.requires_prescription,
        ..Drug::default()
    }
}

fn cmp_names(a: &str, b: &str) -> Ordering {
    a.to_lowercase().cmp(&b.to_lowercase())
}

fn category(id: u64, name: &str, description: Option<&str>) -> Category {
    Category {
        id,
        name: name.to_string(),
        description: description.map(str::to_string),
        drug_count: 0,
    }
}

fn drug(id: u64, name: &str, category_id: u64, class: &str, rx: bool, description: &str) -> Drug {
    Drug {
        id,
        name: name.to_string(),
        description: description.to_string(),
        category_id,
        drug_class: Some(class.to_string()),
        requires_prescription: rx,
        ..Drug::default()
    }
}

fn strings(items: &[&str]) -> Vec<String> {
    items.iter().map(|s| s.to_string()).collect()
}
