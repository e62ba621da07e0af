use std::io::Write;
use std::path::Path;

use anyhow::{Context, Result};
use macroseries::{
    Collection, DerivedView, Frequency, LoadedCollection, SeriesConfig, SourceConfig,
};
use serde::Serialize;
use tracing::info;

use crate::cli::{ChartArgs, ExportArgs, ShowArgs};
use crate::{config, source};

#[derive(Serialize)]
struct ShowOutput<'a> {
    key: String,
    frequency: Frequency,
    labels: Vec<String>,
    data: &'a DerivedView,
}

/// Fetch one series and print it in the requested frequency.
pub async fn show(args: ShowArgs) -> Result<()> {
    let mut source_cfg = SourceConfig {
        database: args.database.clone(),
        timeout_secs: args.timeout,
        ..SourceConfig::default()
    };
    if let Some(url) = &args.base_url {
        source_cfg.base_url.clone_from(url);
    }
    let key = format!("{}.{}.{}", args.frequency.code(), args.country, args.indicator);
    let collection = Collection::builder()
        .title(key.clone())
        .years(args.start, args.end)
        .frequency(args.to)
        .timeout(source_cfg.timeout())
        .database(args.database.clone())
        .source(source::select(&source_cfg)?)
        .series(SeriesConfig {
            title: key.clone(),
            frequency: args.frequency,
            country: args.country,
            indicator: args.indicator,
            aggregation: args.aggregation,
            database: None,
        })
        .build()
        .context("invalid request")?;
    let loaded = collection
        .load()
        .await
        .with_context(|| format!("failed to fetch {key}"))?;

    let Some(series) = loaded.series().first() else {
        anyhow::bail!("no series loaded for {key}");
    };
    let frequency = loaded.display_frequency(series);
    let view = series.view(frequency)?;
    let labels = series.labels(frequency)?;
    let skipped = series.skipped_records()?;
    if skipped > 0 {
        info!(skipped, "records without a period or value were skipped");
    }

    let mut out = std::io::stdout().lock();
    if args.json {
        let payload = ShowOutput {
            key,
            frequency,
            labels,
            data: view,
        };
        serde_json::to_writer_pretty(&mut out, &payload)?;
        writeln!(out)?;
    } else {
        for (label, value) in labels.iter().zip(view.value()) {
            writeln!(out, "{label}\t{value}")?;
        }
    }
    Ok(())
}

async fn load_collection(path: &Path) -> Result<LoadedCollection> {
    let cfg = config::load(path)?;
    let source = source::select(&cfg.source)?;
    let collection = Collection::from_config(&cfg, source)
        .with_context(|| format!("invalid collection in {}", path.display()))?;
    info!(title = collection.title(), series = collection.specs().len(), "loading collection");
    collection
        .load()
        .await
        .with_context(|| format!("failed to load collection {}", cfg.title))
}

/// Load a collection file and write its table as CSV.
pub async fn export(args: ExportArgs) -> Result<()> {
    let loaded = load_collection(&args.config).await?;
    let target = args.output.unwrap_or_else(|| Path::new(".").to_path_buf());
    let written = loaded
        .export_csv(&target)
        .with_context(|| format!("failed to export to {}", target.display()))?;
    println!("{}", written.display());
    Ok(())
}

/// Load a collection file and write its chart spec as JSON.
pub async fn chart(args: ChartArgs) -> Result<()> {
    let loaded = load_collection(&args.config).await?;
    let json = loaded.chart()?.to_json()?;
    match args.output {
        Some(path) => {
            std::fs::write(&path, json)
                .with_context(|| format!("failed to write chart spec: {}", path.display()))?;
            println!("{}", path.display());
        }
        None => println!("{json}"),
    }
    Ok(())
}
