use crate::infra::build_scan_service;
use clap::{Args, Subcommand};
use pawcheck::allergy::{render_marked, HighlightSegment, Hit, Verdict};
use pawcheck::config::AppConfig;
use pawcheck::error::AppError;
use pawcheck::profile::{dedupe_allergens, StoredProfile};
use pawcheck::scan::{AllergenCheck, ScanReport};
use std::fmt::Write as _;

const MARK_OPEN: &str = "**";
const MARK_CLOSE: &str = "**";

#[derive(Args, Debug)]
pub(crate) struct CheckArgs {
    /// Ingredient list to screen, as printed on the label
    #[arg(long)]
    pub(crate) ingredients: String,
    /// Allergen to screen for (repeatable). Defaults to the stored profile.
    #[arg(long = "allergen")]
    pub(crate) allergens: Vec<String>,
}

#[derive(Args, Debug)]
pub(crate) struct LookupArgs {
    /// Product barcode; non-digit characters are ignored
    pub(crate) barcode: String,
    /// Print the full screening report as JSON
    #[arg(long)]
    pub(crate) json: bool,
}

#[derive(Subcommand, Debug)]
pub(crate) enum ProfileCommand {
    /// Print the stored dog name and allergen list
    Show,
    /// Add an allergen to the profile
    Add { allergen: String },
    /// Remove an allergen from the profile (exact spelling)
    Remove { allergen: String },
    /// Change the dog's display name
    Rename { name: String },
}

pub(crate) fn run_check(args: CheckArgs) -> Result<(), AppError> {
    let config = AppConfig::load()?;
    let service = build_scan_service(&config)?;

    let allergens = if args.allergens.is_empty() {
        service.profile()?.allergens
    } else {
        dedupe_allergens(&args.allergens)
    };

    let check = service.check(Some(args.ingredients.as_str()), &allergens);
    print!("{}", render_check(&allergens, &check));
    Ok(())
}

pub(crate) async fn run_lookup(args: LookupArgs) -> Result<(), AppError> {
    let config = AppConfig::load()?;
    let service = build_scan_service(&config)?;
    let report = service.scan(&args.barcode).await?;

    if args.json {
        let body = serde_json::to_string_pretty(&report).map_err(std::io::Error::other)?;
        println!("{body}");
    } else {
        print!("{}", render_report(&report));
    }
    Ok(())
}

pub(crate) fn run_profile(command: ProfileCommand) -> Result<(), AppError> {
    let config = AppConfig::load()?;
    let service = build_scan_service(&config)?;

    let profile = match command {
        ProfileCommand::Show => service.profile()?,
        ProfileCommand::Add { allergen } => service.add_allergen(&allergen)?,
        ProfileCommand::Remove { allergen } => service.remove_allergen(&allergen)?,
        ProfileCommand::Rename { name } => service.rename_dog(&name)?,
    };

    print!("{}", render_profile(&profile));
    Ok(())
}

pub(crate) fn render_check(allergens: &[String], check: &AllergenCheck) -> String {
    let mut out = String::new();
    if allergens.is_empty() {
        let _ = writeln!(out, "No allergens to screen for.");
    } else {
        let _ = writeln!(out, "Screening for: {}", allergens.join(", "));
    }
    push_verdict(&mut out, check.verdict, &check.hits, &check.highlighted);
    out
}

pub(crate) fn render_report(report: &ScanReport) -> String {
    let product = &report.product;
    let mut out = String::new();
    let _ = writeln!(out, "{} ({})", product.display_name(), product.display_brand());
    let _ = writeln!(
        out,
        "Barcode {} via {}",
        product.barcode,
        product.source.label()
    );
    let _ = writeln!(out, "Screening for {}", report.dog_name);
    push_verdict(&mut out, report.verdict, &report.hits, &report.highlighted);
    out
}

pub(crate) fn render_profile(profile: &StoredProfile) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "Dog: {}", profile.dog_name);
    if profile.allergens.is_empty() {
        let _ = writeln!(out, "Allergens: none recorded");
    } else {
        let _ = writeln!(out, "Allergens:");
        for allergen in &profile.allergens {
            let _ = writeln!(out, "  - {allergen}");
        }
    }
    match profile.updated_at {
        Some(stamp) => {
            let _ = writeln!(out, "Updated: {}", stamp.format("%Y-%m-%d %H:%M UTC"));
        }
        None => {
            let _ = writeln!(out, "Updated: never");
        }
    }
    out
}

fn push_verdict(
    out: &mut String,
    verdict: Verdict,
    hits: &[Hit],
    highlighted: &[HighlightSegment],
) {
    let _ = writeln!(out, "Verdict: {}", verdict.label());

    match verdict {
        Verdict::Unknown => {
            let _ = writeln!(out, "Ingredient text is missing or not in English.");
        }
        Verdict::Safe => {
            let _ = writeln!(out, "No listed allergens found.");
        }
        Verdict::Avoid => {
            let _ = writeln!(out, "Matched allergens:");
            for hit in hits {
                let _ = writeln!(
                    out,
                    "  - {} -> \"{}\" ({})",
                    hit.allergen,
                    hit.matched,
                    hit.kind.label()
                );
            }
        }
    }

    if !highlighted.is_empty() {
        let _ = writeln!(
            out,
            "Ingredients: {}",
            render_marked(highlighted, MARK_OPEN, MARK_CLOSE)
        );
    }
}
