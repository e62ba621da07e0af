use tracing_subscriber::EnvFilter;

/// Library crates whose spans and events the binary surfaces: the facade
/// (collection load, exports), the core (series population, derived views)
/// and both data sources.
const CRATE_TARGETS: &[&str] = &[
    "macroseries",
    "macroseries_core",
    "macroseries_imf",
    "macroseries_mock",
];

const fn level_for(verbosity: u8) -> &'static str {
    match verbosity {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    }
}

/// Filter directives for `-v` repeated `verbosity` times, one per crate target.
fn directives(verbosity: u8) -> String {
    let level = level_for(verbosity);
    CRATE_TARGETS
        .iter()
        .map(|target| format!("{target}={level}"))
        .collect::<Vec<_>>()
        .join(",")
}

/// Install the stderr subscriber.
///
/// Without `-v` only warnings are shown; `-v` adds collection progress and
/// skipped-record counts, `-vv` request URLs and view computations, `-vvv`
/// everything. `RUST_LOG` replaces these directives entirely. Output goes to
/// stderr so `show --json` and `chart` keep stdout parseable.
pub fn init(verbosity: u8) {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(directives(verbosity)));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(verbosity >= 2)
        .init();
}
