use std::path::Path;

use anyhow::{Context, Result};
use comfy_table::Table;
use tracing::info_span;

use er_core::MatchOptions;
use er_ingest::read_csv;
use er_cli::pipeline::{ColumnSource, build_table, load, output, output_format, resolve};

use crate::cli::MatchArgs;
use crate::summary::{apply_table_style, print_preview};
use crate::types::MatchSummary;

pub fn run_columns(file: &Path) -> Result<()> {
    let table = read_csv(file).with_context(|| format!("read {}", file.display()))?;
    let mut listing = Table::new();
    listing.set_header(vec!["#", "Column"]);
    apply_table_style(&mut listing);
    for (index, header) in table.headers().iter().enumerate() {
        listing.add_row(vec![(index + 1).to_string(), header.clone()]);
    }
    println!("{listing}");
    println!("{} rows", table.len());
    Ok(())
}

pub fn run_match(args: &MatchArgs) -> Result<MatchSummary> {
    let span = info_span!("match", source = %args.source.display(), target = %args.target.display());
    let _guard = span.enter();

    let options = MatchOptions::default()
        .with_k(args.k)
        .with_metric(args.metric)
        .with_normalization(args.normalize)
        .with_parallel(!args.no_parallel);
    options.validate().context("invalid arguments")?;

    let source = ColumnSource {
        path: args.source.clone(),
        column: args.source_column.clone(),
    };
    let target = ColumnSource {
        path: args.target.clone(),
        column: args.target_column.clone(),
    };

    let loaded = load(&source, &target)?;
    let resolved = resolve(&loaded, options, args.cache_dir.as_deref())?;
    let table = build_table(&loaded, &resolved)?;

    if let Some(path) = &args.output {
        let format = output_format(path, args.format.map(Into::into));
        output(&table, path, format)?;
    }
    print_preview(&table, args.preview);

    Ok(MatchSummary {
        source: source.path,
        source_column: source.column,
        target: target.path,
        target_column: target.column,
        target_rows: loaded.target.len(),
        options,
        results: resolved.results,
        cache: resolved.cache,
        elapsed: resolved.elapsed,
        output: args.output.clone(),
    })
}
