//! A single frequency-tagged series with lazily computed frequency views.

use std::sync::OnceLock;

use crate::connector::DataSource;
use crate::timeseries::period;
use crate::timeseries::resample::ResamplePlan;
use crate::timeseries::util::decode_records;
use crate::{
    AggregationPolicy, DerivedView, Frequency, Observation, RawObservation, SeriesError,
    SeriesSpec,
};

#[derive(Debug)]
struct NativeData {
    observations: Vec<Observation>,
    view: DerivedView,
    skipped: usize,
}

/// One compute-once slot per calendar frequency.
#[derive(Debug, Default)]
struct ViewCache {
    annual: OnceLock<DerivedView>,
    quarterly: OnceLock<DerivedView>,
    monthly: OnceLock<DerivedView>,
}

impl ViewCache {
    const fn slot(&self, frequency: Frequency) -> Option<&OnceLock<DerivedView>> {
        match frequency {
            Frequency::Annual => Some(&self.annual),
            Frequency::Quarterly => Some(&self.quarterly),
            Frequency::Monthly => Some(&self.monthly),
            Frequency::Native => None,
        }
    }
}

/// A titled series in its native frequency.
///
/// The native observation sequence is written exactly once (see
/// [`Series::populate`]) and never mutated afterwards, so each derived view is
/// computed at most once and then served from the cache for the lifetime of
/// the series.
#[derive(Debug)]
pub struct Series {
    spec: SeriesSpec,
    native: OnceLock<NativeData>,
    views: ViewCache,
}

impl Series {
    /// Create an empty series; views fail with `SeriesNotReady` until populated.
    #[must_use]
    pub fn new(spec: SeriesSpec) -> Self {
        Self {
            spec,
            native: OnceLock::new(),
            views: ViewCache::default(),
        }
    }

    /// Query `source` for the spec's request and populate a new series.
    ///
    /// No series is produced if the source fails.
    ///
    /// # Errors
    /// - `UnsupportedFrequency` if the source cannot serve the native frequency.
    /// - Any error returned by the source.
    /// - Any decoding error from [`Series::populate`].
    #[cfg_attr(
        feature = "tracing",
        tracing::instrument(
            name = "macroseries_core::series::fetch",
            skip(spec, source),
            fields(source = source.name(), key = %spec.request.key()),
        )
    )]
    pub async fn fetch(spec: SeriesSpec, source: &dyn DataSource) -> Result<Self, SeriesError> {
        let frequency = spec.request.frequency();
        if !source.supported_frequencies().contains(&frequency) {
            return Err(SeriesError::unsupported_frequency(frequency.code()));
        }
        let records = source.observations(&spec.request).await?;
        let series = Self::new(spec);
        series.populate(records)?;
        Ok(series)
    }

    /// Decode `records` into the native sequence.
    ///
    /// Records missing a period or value are skipped and counted (see
    /// [`Series::skipped_records`]). The sequence is sorted by period and must
    /// not contain duplicate periods.
    ///
    /// # Errors
    /// - `AlreadyPopulated` if the series was populated before.
    /// - `MalformedPeriodLabel`, `InvalidValue` or `DuplicateIndex` for bad records.
    pub fn populate<I>(&self, records: I) -> Result<(), SeriesError>
    where
        I: IntoIterator<Item = RawObservation>,
    {
        if self.native.get().is_some() {
            return Err(self.already_populated());
        }
        let decoded = decode_records(records, self.frequency())?;
        #[cfg(feature = "tracing")]
        {
            if decoded.skipped > 0 {
                tracing::debug!(
                    title = %self.spec.title,
                    skipped = decoded.skipped,
                    "skipped records with a missing period or value"
                );
            }
            tracing::trace!(
                title = %self.spec.title,
                observations = decoded.observations.len(),
                "series populated"
            );
        }
        let view = DerivedView::from_observations(&decoded.observations);
        self.native
            .set(NativeData {
                observations: decoded.observations,
                view,
                skipped: decoded.skipped,
            })
            .map_err(|_| self.already_populated())
    }

    fn already_populated(&self) -> SeriesError {
        SeriesError::AlreadyPopulated {
            title: self.spec.title.clone(),
        }
    }

    fn native(&self) -> Result<&NativeData, SeriesError> {
        self.native
            .get()
            .ok_or_else(|| SeriesError::not_ready(self.spec.title.clone()))
    }

    /// Display title.
    #[must_use]
    pub fn title(&self) -> &str {
        &self.spec.title
    }

    /// Native frequency (never `Native`).
    #[must_use]
    pub const fn frequency(&self) -> Frequency {
        self.spec.request.frequency()
    }

    /// Aggregation policy used for every conversion of this series.
    #[must_use]
    pub const fn policy(&self) -> AggregationPolicy {
        self.spec.policy
    }

    /// First calendar year, inclusive.
    #[must_use]
    pub const fn start_year(&self) -> i32 {
        self.spec.request.start_year()
    }

    /// Last calendar year, inclusive.
    #[must_use]
    pub const fn end_year(&self) -> i32 {
        self.spec.request.end_year()
    }

    /// The spec this series was built from.
    #[must_use]
    pub const fn spec(&self) -> &SeriesSpec {
        &self.spec
    }

    /// Returns true once the native sequence has been populated.
    #[must_use]
    pub fn is_ready(&self) -> bool {
        self.native.get().is_some()
    }

    /// Native observations, sorted ascending by index.
    ///
    /// # Errors
    /// Returns `SeriesNotReady` before population.
    pub fn observations(&self) -> Result<&[Observation], SeriesError> {
        Ok(&self.native()?.observations)
    }

    /// Number of source records dropped for a missing period or value.
    ///
    /// # Errors
    /// Returns `SeriesNotReady` before population.
    pub fn skipped_records(&self) -> Result<usize, SeriesError> {
        Ok(self.native()?.skipped)
    }

    /// The native `{time, value}` view.
    ///
    /// # Errors
    /// Returns `SeriesNotReady` before population.
    pub fn data(&self) -> Result<&DerivedView, SeriesError> {
        Ok(&self.native()?.view)
    }

    /// The series converted to `frequency`, computed on first access and cached.
    ///
    /// `Frequency::Native` and the native frequency itself return the native view.
    ///
    /// # Errors
    /// Returns `SeriesNotReady` before population.
    pub fn view(&self, frequency: Frequency) -> Result<&DerivedView, SeriesError> {
        let native = self.native()?;
        let plan = ResamplePlan::between(self.frequency(), frequency)?;
        if plan == ResamplePlan::Identity {
            return Ok(&native.view);
        }
        let target = frequency.resolve(self.frequency());
        let slot = self
            .views
            .slot(target)
            .ok_or_else(|| SeriesError::unsupported_frequency(target.code()))?;
        Ok(slot.get_or_init(|| {
            #[cfg(feature = "tracing")]
            tracing::debug!(
                title = %self.spec.title,
                native = %self.frequency(),
                target = %target,
                policy = %self.policy(),
                "computing derived view"
            );
            plan.apply(
                &native.observations,
                self.policy(),
                self.start_year(),
                self.end_year(),
            )
        }))
    }

    /// Render a period index in `frequency` as a calendar label.
    ///
    /// `Frequency::Native` resolves to this series' native frequency.
    #[must_use]
    pub fn label(&self, index: i64, frequency: Frequency) -> String {
        period::encode(index, frequency.resolve(self.frequency()))
    }

    /// Labels for every point of the view in `frequency`.
    ///
    /// # Errors
    /// Returns `SeriesNotReady` before population.
    pub fn labels(&self, frequency: Frequency) -> Result<Vec<String>, SeriesError> {
        let view = self.view(frequency)?;
        Ok(view
            .time()
            .iter()
            .map(|&t| self.label(t, frequency))
            .collect())
    }
}
