use crate::{AggregationPolicy, DerivedView, Frequency, Observation, SeriesError};

/// How a native series maps onto a target frequency.
///
/// Periods per year are 1, 4 and 12, so every pair of calendar frequencies
/// divides evenly and a conversion is either a fan-out or a fixed window.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ResamplePlan {
    /// Same frequency: the native view is returned as-is.
    Identity,
    /// Coarser to finer: every native period expands into `fan_out` target periods.
    Upsample {
        /// Target periods per native period (4, 12 or 3).
        fan_out: i64,
    },
    /// Finer to coarser: each target period collects a `window` of native periods.
    Downsample {
        /// Native periods per target period (3, 4 or 12).
        window: i64,
        /// Periods per year of the target frequency.
        target_ppy: i64,
    },
}

impl ResamplePlan {
    /// Choose the plan converting `native` into `target`.
    ///
    /// `target` may be `Native`, which resolves to `native`.
    ///
    /// # Errors
    /// Returns `UnsupportedFrequency` if `native` is `Native`.
    pub fn between(native: Frequency, target: Frequency) -> Result<Self, SeriesError> {
        let native = native.concrete()?;
        let target = target.resolve(native);
        let (Some(n), Some(t)) = (native.periods_per_year(), target.periods_per_year()) else {
            return Err(SeriesError::unsupported_frequency(target.code()));
        };
        Ok(match n.cmp(&t) {
            std::cmp::Ordering::Equal => Self::Identity,
            std::cmp::Ordering::Less => Self::Upsample { fan_out: t / n },
            std::cmp::Ordering::Greater => Self::Downsample {
                window: n / t,
                target_ppy: t,
            },
        })
    }

    /// Apply the plan to observations sorted ascending by index.
    ///
    /// Down-sampling only emits target periods inside `start_year..=end_year`;
    /// native observations outside those years are ignored, and target periods
    /// without any contributing observation are omitted rather than zero filled.
    /// The work done is proportional to the number of observations, not to the
    /// width of the year range.
    #[must_use]
    pub fn apply(
        self,
        obs: &[Observation],
        policy: AggregationPolicy,
        start_year: i32,
        end_year: i32,
    ) -> DerivedView {
        match self {
            Self::Identity => DerivedView::from_observations(obs),
            Self::Upsample { fan_out } => upsample(obs, fan_out, policy),
            Self::Downsample { window, target_ppy } => {
                downsample(obs, window, target_ppy, policy, start_year, end_year)
            }
        }
    }
}

/// Spread or combine `values` into `out_size` output values.
///
/// - `Average`: the mean of `values`, repeated `out_size` times.
/// - `Sum`: `sum(values) / out_size`, repeated `out_size` times.
///
/// The `Sum` divisor is the output size, not the number of inputs: down-sampling
/// (`out_size == 1`) yields the plain sum even when a window is only partially
/// populated. This matches the upstream workbook output and is kept as-is.
///
/// Returns an empty vector when `values` is empty or `out_size` is zero.
#[must_use]
pub fn convert_values(values: &[f64], out_size: usize, policy: AggregationPolicy) -> Vec<f64> {
    if values.is_empty() || out_size == 0 {
        return Vec::new();
    }
    let total: f64 = values.iter().sum();
    #[allow(clippy::cast_precision_loss)]
    let v = match policy {
        AggregationPolicy::Average => total / values.len() as f64,
        AggregationPolicy::Sum => total / out_size as f64,
    };
    vec![v; out_size]
}

fn upsample(obs: &[Observation], fan_out: i64, policy: AggregationPolicy) -> DerivedView {
    let out_size = usize::try_from(fan_out).unwrap_or(0);
    let mut pairs = Vec::with_capacity(obs.len() * out_size);
    for o in obs {
        // Indices decoded from labels always fit; hand-built ones may not.
        let Some(base) = o.index.checked_mul(fan_out) else {
            continue;
        };
        for (offset, v) in (0..fan_out).zip(convert_values(&[o.value], out_size, policy)) {
            if let Some(index) = base.checked_add(offset) {
                pairs.push((index, v));
            }
        }
    }
    DerivedView::from_pairs(pairs)
}

fn downsample(
    obs: &[Observation],
    window: i64,
    target_ppy: i64,
    policy: AggregationPolicy,
    start_year: i32,
    end_year: i32,
) -> DerivedView {
    let first = i64::from(start_year) * target_ppy;
    let last = i64::from(end_year) * target_ppy + target_ppy - 1;
    let mut pairs = Vec::new();
    let mut in_bounds = obs
        .iter()
        .map(|o| (o.index.div_euclid(window), o.value))
        .filter(|(t, _)| (first..=last).contains(t))
        .peekable();
    let mut values = Vec::with_capacity(usize::try_from(window).unwrap_or(0));
    while let Some((t, v)) = in_bounds.next() {
        values.clear();
        values.push(v);
        while let Some((_, v)) = in_bounds.next_if(|(next, _)| *next == t) {
            values.push(v);
        }
        if let Some(&v) = convert_values(&values, 1, policy).first() {
            pairs.push((t, v));
        }
    }
    DerivedView::from_pairs(pairs)
}

/// Convert a native series into `target`.
///
/// `obs` must be sorted ascending by index with unique indices (as
/// [`crate::Series`] guarantees). `start_year..=end_year` bounds the target
/// periods considered when down-sampling.
///
/// # Errors
/// Returns `UnsupportedFrequency` if `native` is `Native`.
///
/// ```
/// use macroseries_core::{AggregationPolicy, Frequency, Observation, resample};
/// let annual = [Observation::new(5, 120.0)];
/// let monthly = resample(&annual, Frequency::Annual, Frequency::Monthly, AggregationPolicy::Sum, 5, 5).unwrap();
/// assert_eq!(monthly.len(), 12);
/// assert_eq!(monthly.time()[0], 60);
/// assert_eq!(monthly.value()[0], 10.0);
/// ```
pub fn resample(
    obs: &[Observation],
    native: Frequency,
    target: Frequency,
    policy: AggregationPolicy,
    start_year: i32,
    end_year: i32,
) -> Result<DerivedView, SeriesError> {
    Ok(ResamplePlan::between(native, target)?.apply(obs, policy, start_year, end_year))
}
