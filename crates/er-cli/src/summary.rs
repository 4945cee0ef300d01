use comfy_table::modifiers::{UTF8_ROUND_CORNERS, UTF8_SOLID_INNER_BORDERS};
use comfy_table::presets::{UTF8_FULL, UTF8_FULL_CONDENSED};
use comfy_table::{Attribute, Cell, CellAlignment, Color, ContentArrangement, Table};

use er_cache::CacheStatus;
use er_output::{Cell as MatchCell, MatchTable};

use crate::types::MatchSummary;

/// Print the first `limit` rows of the flattened results.
pub fn print_preview(table: &MatchTable, limit: usize) {
    if limit == 0 || table.is_empty() {
        return;
    }
    println!("{}", preview_table(table, limit));
    if table.len() > limit {
        println!("... {} more rows", table.len() - limit);
    }
}

pub fn print_summary(summary: &MatchSummary) {
    println!("Source: {} ({})", summary.source.display(), summary.source_column);
    println!("Target: {} ({})", summary.target.display(), summary.target_column);
    if let Some(path) = &summary.output {
        println!("Output: {}", path.display());
    }
    println!("{}", summary_table(summary));
}

fn preview_table(table: &MatchTable, limit: usize) -> Table {
    let mut preview = Table::new();
    preview.set_header(table.headers().iter().map(|h| header_cell(h)));
    apply_preview_style(&mut preview);
    for index in (2..table.headers().len()).step_by(2) {
        align_column(&mut preview, index, CellAlignment::Right);
    }
    for row in table.rows().iter().take(limit) {
        preview.add_row(row.iter().enumerate().map(|(column, cell)| match cell {
            Some(MatchCell::Text(text)) if column == 0 => Cell::new(text).add_attribute(Attribute::Bold),
            Some(MatchCell::Percent(value)) => score_cell(*value),
            Some(cell) => Cell::new(cell.render()),
            None => dim_cell("-"),
        }));
    }
    preview
}

fn summary_table(summary: &MatchSummary) -> Table {
    let mut table = Table::new();
    table.set_header(vec![header_cell("Metric"), header_cell("Value")]);
    apply_table_style(&mut table);
    align_column(&mut table, 1, CellAlignment::Right);

    let results = &summary.results;
    table.add_row(vec![Cell::new("Source rows"), Cell::new(results.len())]);
    table.add_row(vec![Cell::new("Target rows"), Cell::new(summary.target_rows)]);
    table.add_row(vec![Cell::new("Candidates per row"), Cell::new(results.k)]);
    table.add_row(vec![
        Cell::new("Exact matches"),
        count_cell(results.exact_matches(), Color::Green),
    ]);
    table.add_row(vec![
        Cell::new("Unmatched"),
        count_cell(results.unmatched(), Color::Yellow),
    ]);
    table.add_row(vec![
        Cell::new("Mean best score (%)"),
        match results.mean_best_score() {
            Some(score) => Cell::new(format!("{:.2}", score * 100.0)),
            None => dim_cell("-"),
        },
    ]);
    table.add_row(vec![
        Cell::new("Metric / normalization"),
        Cell::new(format!("{} / {}", summary.options.metric, summary.options.normalization)),
    ]);
    table.add_row(vec![Cell::new("Cache"), cache_cell(summary.cache)]);
    table.add_row(vec![
        Cell::new("Elapsed"),
        Cell::new(format!("{:.2?}", summary.elapsed)),
    ]);
    table
}

pub fn apply_table_style(table: &mut Table) {
    table
        .load_preset(UTF8_FULL_CONDENSED)
        .apply_modifier(UTF8_ROUND_CORNERS)
        .set_content_arrangement(ContentArrangement::Dynamic)
        .set_width(120);
}

fn apply_preview_style(table: &mut Table) {
    table
        .load_preset(UTF8_FULL)
        .apply_modifier(UTF8_ROUND_CORNERS)
        .apply_modifier(UTF8_SOLID_INNER_BORDERS)
        .set_content_arrangement(ContentArrangement::DynamicFullWidth)
        .set_width(165);
}

fn align_column(table: &mut Table, index: usize, alignment: CellAlignment) {
    if let Some(column) = table.column_mut(index) {
        column.set_cell_alignment(alignment);
    }
}

fn score_cell(percent: f64) -> Cell {
    let color = if percent >= 100.0 {
        Color::Green
    } else if percent >= 80.0 {
        Color::Cyan
    } else if percent >= 50.0 {
        Color::Yellow
    } else {
        Color::Red
    };
    Cell::new(format!("{percent:.2}")).fg(color)
}

fn cache_cell(status: Option<CacheStatus>) -> Cell {
    match status {
        Some(CacheStatus::Hit) => Cell::new("hit")
            .fg(Color::Green)
            .add_attribute(Attribute::Bold),
        Some(CacheStatus::Miss) => Cell::new("miss").fg(Color::Yellow),
        None => dim_cell("off"),
    }
}

fn count_cell(count: usize, color: Color) -> Cell {
    if count > 0 {
        Cell::new(count).fg(color).add_attribute(Attribute::Bold)
    } else {
        dim_cell(count)
    }
}

fn header_cell(label: &str) -> Cell {
    Cell::new(label)
        .fg(Color::Cyan)
        .add_attribute(Attribute::Bold)
}

fn dim_cell<T: ToString>(value: T) -> Cell {
    Cell::new(value).fg(Color::DarkGrey)
}
