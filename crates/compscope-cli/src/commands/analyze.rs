//! Analyze command implementation

use crate::cli::{AnalyzeArgs, FilterArgs, SubjectArgs};
use crate::config_loader::load_config_with_overrides;
use crate::output::OutputWriter;
use crate::output_types::{describe_filters, AnalyzeOutput, HistogramRow, ListingRow};
use anyhow::{Context, Result};
use compscope_analysis::{format_dollars, CompsSession, SessionOptions};
use compscope_core::config::{parse_distance_unit, CliConfigOverrides};
use compscope_core::models::{
    parse_bound, Coordinates, DateRange, FilterField, PresetId, SubjectProperty,
};
use compscope_geo::bounds::{comp_bounds, comp_centroid};
use compscope_sync::TokioClock;
use std::path::Path;

pub async fn execute(
    args: AnalyzeArgs,
    config_path: Option<&Path>,
    output: &OutputWriter,
) -> Result<()> {
    let distance_unit = args.distance_unit.as_deref().map(parse_distance_unit).transpose()?;
    let overrides = CliConfigOverrides {
        listing_count: args.count,
        seed: args.seed,
        distance_unit,
        ..Default::default()
    };
    let config = load_config_with_overrides(config_path, overrides)?;
    let unit = config.distance_unit.value;

    let subject = build_subject(&args.subject);
    let options = SessionOptions::from_config(&config);
    let seed = options.seed;
    let mut session =
        CompsSession::new(subject, options, TokioClock).context("Invalid subject property")?;

    // Preset first so explicit bounds refine it
    if let Some(name) = &args.preset {
        let preset: PresetId = name.parse()?;
        session.select_preset(preset);
    }

    for (field, text) in filter_inputs(&args.filters) {
        if parse_bound(text).is_none() && !text.trim().is_empty() {
            output.warning(format!("Ignoring unparseable --{} value '{}'", flag_name(field), text));
        }
        session.edit_filter_text(field, text);
    }
    session.commit_filters();

    if args.from.is_some() || args.to.is_some() {
        let range = DateRange::new(
            args.from.unwrap_or(DateRange::EARLIEST),
            args.to.unwrap_or(DateRange::LATEST),
        )?;
        session.commit_date_range(range);
    }

    if let Some(job) = session.begin_recompute() {
        let ticket = job.ticket;
        let analysis = tokio::task::spawn_blocking(move || job.run())
            .await
            .context("Recompute task failed")?;
        session.finish_recompute(ticket, analysis);
    }

    let analysis = session.analysis().context("No analysis available")?;
    let stats = &analysis.stats;

    let result = AnalyzeOutput {
        generated_at: chrono::Utc::now(),
        subject: session.subject().clone(),
        seed,
        preset: session.active_preset(),
        filters: analysis.filters,
        date_range: analysis.date_range,
        distance_unit: unit,
        total_listings: session.all_listings().len(),
        kpis: stats.kpis,
        insight: stats.insight.clone(),
        market_profile: stats.profile.map(|profile| profile.describe()),
        subject_valuation: stats.subject_valuation,
        regression: stats.regression,
        histogram: stats.histogram.clone(),
        bounds: comp_bounds(session.subject(), &analysis.listings),
        centroid: comp_centroid(session.subject(), &analysis.listings),
        listings: analysis.listings.iter().take(args.limit).cloned().collect(),
    };

    if output.is_json() {
        return output.result(result);
    }

    output.section("Subject Property");
    output.kv("Address", &result.subject.address);
    output.kv("Details", result.subject.summary());
    output.kv(
        "Location",
        format!("{:.5}, {:.5}", result.subject.location.lat, result.subject.location.lng),
    );

    output.section("Comparable Listings");
    output.kv("Matched", format!("{} of {}", result.kpis.count, result.total_listings));
    if let Some(preset) = result.preset {
        output.kv("Preset", preset.label());
    }
    output.kv("Filters", describe_filters(&result.filters));
    output.kv(
        "Date Range",
        format!("{} - {}", result.date_range.start(), result.date_range.end()),
    );

    output.section("Key Metrics");
    output.kv("Median Price", format!("${}", format_dollars(result.kpis.median_price)));
    output.kv("Median $/Sqft", format!("${:.2}", result.kpis.median_price_per_sqft));
    output.kv(
        "Avg Distance",
        format!("{:.2} {}", unit.from_miles(result.kpis.average_distance), unit.abbreviation()),
    );

    if let Some(estimate) = result.subject_valuation {
        output.kv("Est. Subject Value", format!("${}", format_dollars(estimate)));
    }

    output.section("Insight");
    match &result.insight {
        Some(insight) => output.info(insight),
        None => output.info("Not enough comparable listings for an insight"),
    }
    if let Some(profile) = &result.market_profile {
        output.info(profile);
    }

    if !result.histogram.is_empty() {
        output.section("Price/Sqft Distribution");
        output.table(result.histogram.iter().map(HistogramRow::from).collect());
    }

    output.section(format!("Listings (showing {} of {})", result.listings.len(), result.kpis.count));
    output.table(result.listings.iter().map(|listing| ListingRow::new(listing, unit)).collect());

    if let Some(bounds) = result.bounds {
        output.kv(
            "Map Bounds",
            format!(
                "{:.4},{:.4} to {:.4},{:.4}",
                bounds.south_west.lat,
                bounds.south_west.lng,
                bounds.north_east.lat,
                bounds.north_east.lng
            ),
        );
    }

    Ok(())
}

/// Default subject with any flags the user supplied layered on top
fn build_subject(args: &SubjectArgs) -> SubjectProperty {
    let defaults = SubjectProperty::default();
    SubjectProperty {
        address: args.address.clone().unwrap_or(defaults.address),
        location: Coordinates::new(
            args.lat.unwrap_or(defaults.location.lat),
            args.lng.unwrap_or(defaults.location.lng),
        ),
        sqft: args.sqft.unwrap_or(defaults.sqft),
        beds: args.beds.unwrap_or(defaults.beds),
        baths: args.baths.unwrap_or(defaults.baths),
        year_built: args.year_built.unwrap_or(defaults.year_built),
    }
}

fn filter_inputs(args: &FilterArgs) -> Vec<(FilterField, &str)> {
    [
        (FilterField::PriceMin, &args.price_min),
        (FilterField::PriceMax, &args.price_max),
        (FilterField::SqftMin, &args.sqft_min),
        (FilterField::SqftMax, &args.sqft_max),
        (FilterField::MinBeds, &args.min_beds),
        (FilterField::MinBaths, &args.min_baths),
        (FilterField::YearBuiltMin, &args.year_built_min),
        (FilterField::YearBuiltMax, &args.year_built_max),
        (FilterField::MaxDistance, &args.max_distance),
    ]
    .into_iter()
    .filter_map(|(field, value)| value.as_deref().map(|text| (field, text)))
    .collect()
}

fn flag_name(field: FilterField) -> String {
    field.as_str().replace('_', "-")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_subject_flags_override_defaults() {
        let args = SubjectArgs { sqft: Some(2400), lat: Some(47.6), ..Default::default() };
        let subject = build_subject(&args);

        assert_eq!(subject.sqft, 2400);
        assert_eq!(subject.location.lat, 47.6);
        assert_eq!(subject.location.lng, -122.48);
        assert_eq!(subject.address, "Bellingham, WA");
    }

    #[test]
    fn test_filter_inputs_skip_unset_flags() {
        let args = FilterArgs {
            price_max: Some("300,000".to_string()),
            min_beds: Some("3".to_string()),
            ..Default::default()
        };
        let inputs = filter_inputs(&args);

        assert_eq!(inputs, vec![(FilterField::PriceMax, "300,000"), (FilterField::MinBeds, "3")]);
    }

    #[test]
    fn test_flag_name_matches_cli_spelling() {
        assert_eq!(flag_name(FilterField::YearBuiltMin), "year-built-min");
    }
}
