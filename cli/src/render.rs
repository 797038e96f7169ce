//! Plain-text and JSON output for the CLI.

use anyhow::Result;
use pharmacat_core::{Category, Drug};
use serde::Serialize;

const NOT_SPECIFIED: &str = "Not specified";

#[derive(Serialize)]
struct Listing<'a> {
    link: &'a str,
    drugs: &'a [Drug],
}

fn print_json<T: Serialize + ?Sized>(value: &T) -> Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}

fn or_not_specified(value: Option<&str>) -> &str {
    value.filter(|v| !v.trim().is_empty()).unwrap_or(NOT_SPECIFIED)
}

pub fn drugs(drugs: &[Drug], json: bool) -> Result<()> {
    if json {
        return print_json(drugs);
    }
    if drugs.is_empty() {
        println!("No drugs found. Try clearing the filters.");
        return Ok(());
    }
    for drug in drugs {
        let rx = if drug.requires_prescription { " [Rx]" } else { "" };
        println!("{:>5}  {}{}  ({})", drug.id, drug.name, rx, drug.category);
    }
    Ok(())
}

pub fn listing(drugs: &[Drug], link: &str, json: bool) -> Result<()> {
    if json {
        return print_json(&Listing { link, drugs });
    }
    self::drugs(drugs, false)?;
    println!();
    println!("link: {link}");
    Ok(())
}

pub fn categories(categories: &[Category], json: bool) -> Result<()> {
    if json {
        return print_json(categories);
    }
    if categories.is_empty() {
        println!("No categories found.");
        return Ok(());
    }
    for category in categories {
        println!("{:>5}  {} ({})", category.id, category.name, category.drug_count);
    }
    Ok(())
}

pub fn category(category: &Category, json: bool) -> Result<()> {
    if json {
        return print_json(category);
    }
    println!("{} ({} drugs)", category.name, category.drug_count);
    if let Some(description) = &category.description {
        println!("{description}");
    }
    Ok(())
}

pub fn drug(drug: &Drug, json: bool) -> Result<()> {
    if json {
        return print_json(drug);
    }
    println!("{} ({})", drug.name, drug.category);
    if drug.requires_prescription {
        println!("Prescription required");
    }
    if !drug.description.is_empty() {
        println!("{}", drug.description);
    }
    println!();

    let fields = [
        ("Drug class", drug.drug_class.as_deref()),
        ("Onset of action", drug.onset_of_action.as_deref()),
        ("Half-life", drug.half_life.as_deref()),
        ("Route", drug.route_of_administration.as_deref()),
        ("Dosage", drug.dosage.as_deref()),
        ("Maximum dosage", drug.max_dosage.as_deref()),
        ("Mechanism of action", drug.mechanism_of_action.as_deref()),
        ("Pharmacokinetics", drug.pharmacokinetics.as_deref()),
        ("Warnings", drug.warnings.as_deref()),
        ("Pregnancy category", drug.pregnancy_category.as_deref()),
        ("Pregnancy", drug.pregnancy_info.as_deref()),
        ("Lactation", drug.lactation_info.as_deref()),
        ("Storage", drug.storage_info.as_deref()),
    ];
    for (label, value) in fields {
        println!("{label}: {}", or_not_specified(value));
    }

    list("Side effects", &drug.all_side_effects());
    list(
        "Contraindications",
        &drug.contraindications.iter().map(String::as_str).collect::<Vec<_>>(),
    );

    println!();
    println!("Interactions:");
    if drug.interactions.is_empty() {
        println!("  {NOT_SPECIFIED}");
    }
    for interaction in &drug.interactions {
        match &interaction.severity {
            Some(severity) => println!(
                "  - {} [{severity}]: {}",
                interaction.name, interaction.description
            ),
            None => println!("  - {}: {}", interaction.name, interaction.description),
        }
    }
    Ok(())
}

fn list(title: &str, items: &[&str]) {
    println!();
    println!("{title}:");
    if items.is_empty() {
        println!("  {NOT_SPECIFIED}");
    }
    for item in items {
        println!("  - {item}");
    }
}
