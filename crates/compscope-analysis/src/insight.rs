//! One-line narrative insight over a comp set.

use std::collections::BTreeMap;

use compscope_core::models::{Listing, SubjectProperty};
use compscope_core::stats::{linear_regression, median, slope};
use serde::Serialize;

use crate::derived::{price_per_sqft_values, sqft_price_points};

/// Descriptive framing for a comp set
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct MarketProfile {
    /// Most common bed count; ties go to the smaller count
    pub dominant_beds: u32,
    /// Upper-middle year built
    pub median_year_built: i32,
}

impl MarketProfile {
    pub fn describe(&self) -> String {
        if self.median_year_built > 1995 {
            format!(
                "Your dataset is dominated by {}-bed homes built after {}.",
                self.dominant_beds,
                self.median_year_built - 5
            )
        } else {
            format!("Your dataset is dominated by {}-bed homes.", self.dominant_beds)
        }
    }
}

/// Bed-count and vintage profile, `None` for an empty set
pub fn market_profile(listings: &[Listing]) -> Option<MarketProfile> {
    let mut bed_counts: BTreeMap<u32, usize> = BTreeMap::new();
    for listing in listings {
        *bed_counts.entry(listing.beds).or_default() += 1;
    }

    // Reverse(beds) breaks count ties toward the smaller bed count
    let dominant_beds = bed_counts
        .iter()
        .max_by_key(|(beds, count)| (**count, std::cmp::Reverse(**beds)))
        .map(|(beds, _)| *beds)?;

    let mut years: Vec<i32> = listings.iter().map(|l| l.year_built).collect();
    years.sort_unstable();
    let median_year_built = years[years.len() / 2];

    Some(MarketProfile { dominant_beds, median_year_built })
}

/// The first applicable insight for a comp set.
///
/// Candidates in order: the regression's price delta per 100 sqft when the
/// slope is positive, then the bed-count framing from [`market_profile`],
/// then the subject's value at the median price/sqft. Fewer than two comps,
/// or a set with no spread in sqft, yields `None`.
pub fn derive_insight(listings: &[Listing], subject: &SubjectProperty) -> Option<String> {
    if listings.len() < 2 {
        return None;
    }

    let line = linear_regression(&sqft_price_points(listings))?;

    let per_100_sqft = slope(&line).map(|s| s * 100.0).filter(|d| *d > 0.0);
    if let Some(delta) = per_100_sqft {
        return Some(format!(
            "Each additional 100 sqft adds about ${} on average.",
            format_dollars(delta)
        ));
    }

    if let Some(profile) = market_profile(listings) {
        return Some(profile.describe());
    }

    subject_valuation(listings, subject).map(|estimate| {
        format!(
            "Based on median price/sqft of ${:.2}, your subject property's estimated value is approximately ${}.",
            estimate / subject.sqft as f64,
            format_dollars(estimate)
        )
    })
}

/// Subject value at the comp set's median price/sqft, `None` when either
/// factor is zero
pub fn subject_valuation(listings: &[Listing], subject: &SubjectProperty) -> Option<f64> {
    let median_ppsf = median(&price_per_sqft_values(listings));
    let estimate = median_ppsf * subject.sqft as f64;
    (median_ppsf > 0.0 && estimate > 0.0).then_some(estimate)
}

/// Round to whole dollars with thousands separators
pub fn format_dollars(amount: f64) -> String {
    let rounded = amount.round();
    let digits = format!("{}", rounded.abs() as u64);

    let mut out = String::with_capacity(digits.len() + digits.len() / 3 + 1);
    if rounded < 0.0 {
        out.push('-');
    }
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push(',');
        }
        out.push(ch);
    }
    out
}
