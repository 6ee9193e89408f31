//! A single analysis session: one subject, one comp batch, and the debounced
//! controls that drive the filtered view.

use std::sync::Arc;
use std::time::Duration;

use compscope_core::config::LayeredConfig;
use compscope_core::error::Result;
use compscope_core::models::{DateRange, FilterField, Filters, Listing, PresetId, SubjectProperty};
use compscope_geo::validation::ensure_valid_subject;
use compscope_sync::{Clock, Completion, Debouncer, DeferredValue, SystemClock, Ticket};
use rand::rngs::StdRng;
use serde::Serialize;

use crate::derived::{derive_stats, DerivedStats};
use crate::filter::filter_all;
use crate::generator::{rng_from_seed, ListingGenerator};

/// Tunables for a session
#[derive(Debug, Clone, PartialEq)]
pub struct SessionOptions {
    pub listing_count: usize,
    pub filter_debounce: Duration,
    pub date_range_debounce: Duration,
    pub seed: Option<u64>,
}

impl Default for SessionOptions {
    fn default() -> Self {
        Self {
            listing_count: 150,
            filter_debounce: Duration::from_millis(150),
            date_range_debounce: Duration::from_millis(250),
            seed: None,
        }
    }
}

impl SessionOptions {
    pub fn from_config(config: &LayeredConfig) -> Self {
        Self {
            listing_count: config.listing_count.value,
            filter_debounce: Duration::from_millis(config.filter_debounce_ms.value),
            date_range_debounce: Duration::from_millis(config.input_debounce_ms.value),
            seed: config.seed.value,
        }
    }
}

/// Committed control state the filtered view is computed from
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct CommittedInput {
    pub filters: Filters,
    pub date_range: DateRange,
}

/// Result of one recompute pass
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CompAnalysis {
    pub filters: Filters,
    pub date_range: DateRange,
    pub listings: Vec<Listing>,
    pub stats: DerivedStats,
}

/// Work for one recompute pass, detached from the session so it can run
/// wherever the caller schedules low-priority work
#[derive(Debug, Clone)]
pub struct RecomputeJob {
    pub ticket: Ticket,
    pub input: CommittedInput,
    subject: SubjectProperty,
    listings: Arc<[Listing]>,
}

impl RecomputeJob {
    pub fn run(&self) -> CompAnalysis {
        let listings = filter_all(&self.listings, &self.input.filters, &self.input.date_range);
        let stats = derive_stats(&listings, &self.subject);
        CompAnalysis {
            filters: self.input.filters,
            date_range: self.input.date_range,
            listings,
            stats,
        }
    }
}

pub struct CompsSession<C: Clock + Clone = SystemClock> {
    subject: SubjectProperty,
    listings: Arc<[Listing]>,
    generator: ListingGenerator,
    rng: StdRng,
    listing_count: usize,
    filters: Debouncer<Filters, C>,
    date_range: Debouncer<DateRange, C>,
    analysis: DeferredValue<CommittedInput, Arc<CompAnalysis>>,
    active_preset: Option<PresetId>,
}

impl<C: Clock + Clone> CompsSession<C> {
    /// Validate the subject, generate its comps and start with no filters
    pub fn new(subject: SubjectProperty, options: SessionOptions, clock: C) -> Result<Self> {
        ensure_valid_subject(&subject)?;

        let generator = ListingGenerator::default();
        let mut rng = rng_from_seed(options.seed);
        let listings: Arc<[Listing]> =
            generator.generate(options.listing_count, &subject, &mut rng).into();

        let input = CommittedInput { filters: Filters::new(), date_range: DateRange::default() };

        Ok(Self {
            subject,
            listings,
            generator,
            rng,
            listing_count: options.listing_count,
            filters: Debouncer::new(input.filters, options.filter_debounce, clock.clone()),
            date_range: Debouncer::new(input.date_range, options.date_range_debounce, clock),
            analysis: DeferredValue::new(input),
            active_preset: None,
        })
    }

    pub fn subject(&self) -> &SubjectProperty {
        &self.subject
    }

    /// The full generated batch, unfiltered
    pub fn all_listings(&self) -> &[Listing] {
        &self.listings
    }

    /// Replace the subject; a changed subject gets a fresh comp batch
    pub fn set_subject(&mut self, subject: SubjectProperty) -> Result<()> {
        ensure_valid_subject(&subject)?;
        if subject == self.subject {
            return Ok(());
        }

        self.listings =
            self.generator.generate(self.listing_count, &subject, &mut self.rng).into();
        self.subject = subject;
        self.analysis.invalidate();
        tracing::debug!(address = %self.subject.address, "subject replaced, comps regenerated");
        Ok(())
    }

    /// Filters as the user currently sees them
    pub fn visible_filters(&self) -> &Filters {
        self.filters.value()
    }

    pub fn committed_filters(&self) -> &Filters {
        self.filters.committed()
    }

    pub fn visible_date_range(&self) -> &DateRange {
        self.date_range.value()
    }

    pub fn committed_date_range(&self) -> &DateRange {
        self.date_range.committed()
    }

    pub fn active_preset(&self) -> Option<PresetId> {
        self.active_preset
    }

    /// Replace the whole filter set as a user edit
    pub fn edit_filters(&mut self, filters: Filters) {
        self.filters.edit(filters.sanitized());
    }

    /// Change one bound as a user edit
    pub fn edit_filter(&mut self, field: FilterField, value: Option<f64>) {
        self.filters.update(|filters| *filters = filters.with(field, value));
    }

    /// Change one bound from raw control text; malformed text clears the bound
    pub fn edit_filter_text(&mut self, field: FilterField, input: &str) {
        self.filters.update(|filters| *filters = filters.with_text(field, input));
    }

    /// Commit pending filter edits now (e.g. on blur)
    pub fn commit_filters(&mut self) -> bool {
        match self.filters.flush() {
            Some(_) => {
                self.submit();
                true
            }
            None => false,
        }
    }

    /// Timeline drag in progress
    pub fn edit_date_range(&mut self, range: DateRange) {
        self.date_range.edit(range);
    }

    /// Timeline drag released
    pub fn commit_date_range(&mut self, range: DateRange) {
        self.date_range.commit(range);
        self.submit();
    }

    /// Apply a preset, or clear it when it is already active
    pub fn select_preset(&mut self, preset: PresetId) {
        if self.active_preset == Some(preset) {
            self.reset_filters();
            return;
        }

        self.filters.sync(preset.filters());
        self.active_preset = Some(preset);
        self.submit();
        tracing::debug!(preset = %preset, "preset applied");
    }

    /// Clear every filter bound and the active preset
    pub fn reset_filters(&mut self) {
        self.filters.sync(Filters::new());
        self.active_preset = None;
        self.submit();
    }

    /// Fire any debounce deadline that has passed; true if anything committed
    pub fn tick(&mut self) -> bool {
        let filters_committed = self.filters.poll().is_some();
        let range_committed = self.date_range.poll().is_some();

        if filters_committed || range_committed {
            self.submit();
            true
        } else {
            false
        }
    }

    /// True while any control edit or derived result is outstanding
    pub fn is_pending(&self) -> bool {
        self.filters.is_pending() || self.date_range.is_pending() || self.analysis.is_pending()
    }

    /// True while the derived view lags the committed controls
    pub fn is_recompute_pending(&self) -> bool {
        self.analysis.is_pending()
    }

    /// Hand out a recompute pass for the latest committed input, if stale
    pub fn begin_recompute(&mut self) -> Option<RecomputeJob> {
        let (ticket, input) = self.analysis.begin()?;
        Some(RecomputeJob {
            ticket,
            input,
            subject: self.subject.clone(),
            listings: Arc::clone(&self.listings),
        })
    }

    /// Apply a finished pass unless newer input has been committed since
    pub fn finish_recompute(&mut self, ticket: Ticket, analysis: CompAnalysis) -> Completion {
        let count = analysis.listings.len();
        let completion = self.analysis.complete(ticket, Arc::new(analysis));
        if completion == Completion::Applied {
            tracing::debug!(epoch = ticket.epoch(), matched = count, "comp view recomputed");
        }
        completion
    }

    /// Run a pending recompute pass in place
    pub fn recompute(&mut self) -> bool {
        let Some(job) = self.begin_recompute() else {
            return false;
        };
        let analysis = job.run();
        self.finish_recompute(job.ticket, analysis) == Completion::Applied
    }

    /// Most recently applied analysis; may lag while a recompute is pending
    pub fn analysis(&self) -> Option<Arc<CompAnalysis>> {
        self.analysis.output().cloned()
    }

    fn submit(&mut self) {
        let input = CommittedInput {
            filters: *self.filters.committed(),
            date_range: *self.date_range.committed(),
        };
        self.analysis.submit(input);
    }
}
