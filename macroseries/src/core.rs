use std::sync::Arc;
use std::time::Duration;

use macroseries_core::{
    CollectionConfig, DEFAULT_DATABASE, DataSource, Frequency, Series, SeriesConfig, SeriesError,
    SeriesSpec,
};

/// Default per-source call timeout.
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);

/// A titled set of series sharing one year range, display frequency and source.
pub struct Collection {
    pub(crate) title: String,
    pub(crate) start_year: i32,
    pub(crate) end_year: i32,
    pub(crate) frequency: Frequency,
    pub(crate) interval: usize,
    pub(crate) timeout: Duration,
    pub(crate) source: Arc<dyn DataSource>,
    pub(crate) specs: Vec<SeriesSpec>,
}

/// Builder for constructing a [`Collection`].
pub struct CollectionBuilder {
    title: String,
    years: Option<(i32, i32)>,
    frequency: Frequency,
    interval: usize,
    timeout: Duration,
    database: String,
    source: Option<Arc<dyn DataSource>>,
    series: Vec<SeriesConfig>,
}

impl Default for CollectionBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl CollectionBuilder {
    /// Create a builder with defaults: native display frequency, tick interval 1,
    /// 30s source timeout, the `IFS` database and no series.
    #[must_use]
    pub fn new() -> Self {
        Self {
            title: String::new(),
            years: None,
            frequency: Frequency::Native,
            interval: 1,
            timeout: DEFAULT_TIMEOUT,
            database: DEFAULT_DATABASE.to_string(),
            source: None,
            series: vec![],
        }
    }

    /// Seed a builder from a collection file; the source still has to be set.
    #[must_use]
    pub fn from_config(cfg: &CollectionConfig) -> Self {
        Self {
            title: cfg.title.clone(),
            years: Some((cfg.start_year, cfg.end_year)),
            frequency: cfg.frequency,
            interval: cfg.interval,
            timeout: cfg.source.timeout(),
            database: cfg.source.database.clone(),
            source: None,
            series: cfg.series.clone(),
        }
    }

    /// Collection title; also the stem of exported file names.
    #[must_use]
    pub fn title(mut self, title: impl Into<String>) -> Self {
        self.title = title.into();
        self
    }

    /// Inclusive calendar year range shared by every series.
    #[must_use]
    pub const fn years(mut self, start_year: i32, end_year: i32) -> Self {
        self.years = Some((start_year, end_year));
        self
    }

    /// Frequency every series is rendered in; `Native` keeps each series as fetched.
    #[must_use]
    pub const fn frequency(mut self, frequency: Frequency) -> Self {
        self.frequency = frequency;
        self
    }

    /// Chart tick step in periods of the display frequency.
    #[must_use]
    pub const fn interval(mut self, interval: usize) -> Self {
        self.interval = interval;
        self
    }

    /// Upper bound for each source call.
    #[must_use]
    pub const fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Database used by series that do not name one.
    #[must_use]
    pub fn database(mut self, database: impl Into<String>) -> Self {
        self.database = database.into();
        self
    }

    /// Data source every series is fetched from.
    #[must_use]
    pub fn source(mut self, source: Arc<dyn DataSource>) -> Self {
        self.source = Some(source);
        self
    }

    /// Add a series.
    #[must_use]
    pub fn series(mut self, series: SeriesConfig) -> Self {
        self.series.push(series);
        self
    }

    /// Validate and build the collection.
    ///
    /// # Errors
    /// - `InvalidArg` for an empty title, a missing year range or source, or a zero interval.
    /// - Any request validation error of an individual series.
    pub fn build(self) -> Result<Collection, SeriesError> {
        let title = self.title.trim().to_string();
        if title.is_empty() {
            return Err(SeriesError::InvalidArg(
                "collection title must not be empty".into(),
            ));
        }
        let (start_year, end_year) = self.years.ok_or_else(|| {
            SeriesError::InvalidArg("year range not set; call years(start, end)".into())
        })?;
        if start_year > end_year {
            return Err(SeriesError::InvalidArg(format!(
                "start year {start_year} is after end year {end_year}"
            )));
        }
        if self.interval == 0 {
            return Err(SeriesError::InvalidArg(
                "chart interval must be at least 1".into(),
            ));
        }
        let source = self.source.ok_or_else(|| {
            SeriesError::InvalidArg("no data source set; call source(...)".into())
        })?;
        let specs = self
            .series
            .iter()
            .map(|s| s.to_spec(start_year, end_year, &self.database))
            .collect::<Result<Vec<_>, SeriesError>>()?;
        Ok(Collection {
            title,
            start_year,
            end_year,
            frequency: self.frequency,
            interval: self.interval,
            timeout: self.timeout,
            source,
            specs,
        })
    }
}

impl Collection {
    /// Start building a new collection.
    #[must_use]
    pub fn builder() -> CollectionBuilder {
        CollectionBuilder::new()
    }

    /// Build a collection straight from a collection file.
    ///
    /// # Errors
    /// See [`CollectionBuilder::build`].
    pub fn from_config(
        cfg: &CollectionConfig,
        source: Arc<dyn DataSource>,
    ) -> Result<Self, SeriesError> {
        CollectionBuilder::from_config(cfg).source(source).build()
    }

    /// Collection title.
    #[must_use]
    pub fn title(&self) -> &str {
        &self.title
    }

    /// Specs of the series to load, in insertion order.
    #[must_use]
    pub fn specs(&self) -> &[SeriesSpec] {
        &self.specs
    }

    /// Display frequency.
    #[must_use]
    pub const fn frequency(&self) -> Frequency {
        self.frequency
    }

    pub(crate) async fn source_call_with_timeout<T, Fut>(
        source_name: &'static str,
        timeout: Duration,
        fut: Fut,
    ) -> Result<T, SeriesError>
    where
        Fut: std::future::Future<Output = Result<T, SeriesError>>,
    {
        (tokio::time::timeout(timeout, fut).await)
            .unwrap_or_else(|_| Err(SeriesError::source_timeout(source_name)))
    }

    /// Fetch every series concurrently.
    ///
    /// Each fetch is bounded by the configured timeout. The load is all or
    /// nothing: the first failing series (in insertion order) is returned and
    /// no partial collection is produced.
    ///
    /// # Errors
    /// Any error of an individual fetch, including `SourceTimeout`.
    #[cfg_attr(
        feature = "tracing",
        tracing::instrument(
            name = "macroseries::collection::load",
            skip(self),
            fields(title = %self.title, series = self.specs.len(), source = self.source.name()),
        )
    )]
    pub async fn load(&self) -> Result<LoadedCollection, SeriesError> {
        let tasks = self.specs.iter().cloned().map(|spec| {
            let source = Arc::clone(&self.source);
            let timeout = self.timeout;
            async move {
                let name = source.name();
                Self::source_call_with_timeout(name, timeout, Series::fetch(spec, source.as_ref()))
                    .await
            }
        });
        let results = futures::future::join_all(tasks).await;
        let series = results
            .into_iter()
            .collect::<Result<Vec<Series>, SeriesError>>()?;
        #[cfg(feature = "tracing")]
        tracing::info!(loaded = series.len(), "collection loaded");
        Ok(LoadedCollection {
            title: self.title.clone(),
            start_year: self.start_year,
            end_year: self.end_year,
            frequency: self.frequency,
            interval: self.interval,
            series,
        })
    }
}

/// A collection whose series have all been fetched and populated.
#[derive(Debug)]
pub struct LoadedCollection {
    pub(crate) title: String,
    pub(crate) start_year: i32,
    pub(crate) end_year: i32,
    pub(crate) frequency: Frequency,
    pub(crate) interval: usize,
    pub(crate) series: Vec<Series>,
}

impl LoadedCollection {
    /// Collection title.
    #[must_use]
    pub fn title(&self) -> &str {
        &self.title
    }

    /// First calendar year, inclusive.
    #[must_use]
    pub const fn start_year(&self) -> i32 {
        self.start_year
    }

    /// Last calendar year, inclusive.
    #[must_use]
    pub const fn end_year(&self) -> i32 {
        self.end_year
    }

    /// Display frequency as configured (may be `Native`).
    #[must_use]
    pub const fn frequency(&self) -> Frequency {
        self.frequency
    }

    /// Chart tick step.
    #[must_use]
    pub const fn interval(&self) -> usize {
        self.interval
    }

    /// Loaded series, in insertion order.
    #[must_use]
    pub fn series(&self) -> &[Series] {
        &self.series
    }

    /// Frequency `series` is rendered in: the display frequency, or the
    /// series' own when the display frequency is `Native`.
    #[must_use]
    pub const fn display_frequency(&self, series: &Series) -> Frequency {
        self.frequency.resolve(series.frequency())
    }

    /// Frequency chart ticks are laid out in.
    ///
    /// With a `Native` display frequency this is the finest native frequency
    /// among the loaded series (annual for an empty collection).
    #[must_use]
    pub fn axis_frequency(&self) -> Frequency {
        if !self.frequency.is_native() {
            return self.frequency;
        }
        self.series
            .iter()
            .map(Series::frequency)
            .max_by_key(|f| f.periods_per_year().unwrap_or(0))
            .unwrap_or(Frequency::Annual)
    }

    /// Spreadsheet layout of every series; see [`crate::sink::table::build`].
    ///
    /// # Errors
    /// Returns `SeriesNotReady` if a series was never populated.
    pub fn table(&self) -> Result<crate::sink::table::Table, SeriesError> {
        crate::sink::table::build(self)
    }

    /// Chart description; see [`crate::sink::chart::build`].
    ///
    /// # Errors
    /// Returns `SeriesNotReady` if a series was never populated.
    pub fn chart(&self) -> Result<crate::sink::chart::ChartSpec, SeriesError> {
        crate::sink::chart::build(self)
    }

    /// Write the table as CSV to a file or into a directory; see [`crate::sink::csv::export`].
    ///
    /// # Errors
    /// `SeriesNotReady` for an unpopulated series, `Export` if the file cannot be written.
    pub fn export_csv(&self, path: &std::path::Path) -> Result<std::path::PathBuf, SeriesError> {
        crate::sink::csv::export(self, path)
    }
}
