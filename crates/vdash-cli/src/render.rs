//! Terminal rendering of metric cards and the data preview.

use comfy_table::modifiers::UTF8_ROUND_CORNERS;
use comfy_table::presets::{UTF8_FULL, UTF8_FULL_CONDENSED};
use comfy_table::{Attribute, Cell, CellAlignment, Color, ContentArrangement, Table};
use polars::prelude::DataFrame;

use anyhow::Result;
use vdash_report::MetricCard;

/// Render the four headline cards as one table: labels, values, then
/// sub-labels.
pub fn metric_table(cards: &[MetricCard]) -> Table {
    let mut table = Table::new();
    table.set_header(cards.iter().map(|card| header_cell(&card.label)));
    apply_card_style(&mut table);
    table.add_row(
        cards
            .iter()
            .map(|card| Cell::new(&card.value).add_attribute(Attribute::Bold)),
    );
    table.add_row(
        cards
            .iter()
            .map(|card| dim_cell(card.delta.as_deref().unwrap_or("-"))),
    );
    for index in 0..cards.len() {
        align_column(&mut table, index, CellAlignment::Center);
    }
    table
}

/// Render a display-safe excerpt as a preview table.
///
/// Expects the all-text frame produced by the display-safety transform.
pub fn preview_table(excerpt: &DataFrame) -> Result<Table> {
    let mut table = Table::new();
    table.set_header(
        excerpt
            .get_column_names()
            .into_iter()
            .map(|name| header_cell(name)),
    );
    apply_preview_style(&mut table);

    let columns: Vec<_> = excerpt
        .get_columns()
        .iter()
        .map(|column| column.as_materialized_series().str().map(Clone::clone))
        .collect::<Result<_, _>>()?;

    for row in 0..excerpt.height() {
        table.add_row(
            columns
                .iter()
                .map(|cells| Cell::new(cells.get(row).unwrap_or(""))),
        );
    }
    Ok(table)
}

fn apply_card_style(table: &mut Table) {
    table
        .load_preset(UTF8_FULL)
        .apply_modifier(UTF8_ROUND_CORNERS)
        .set_content_arrangement(ContentArrangement::Dynamic)
        .set_width(120);
}

fn apply_preview_style(table: &mut Table) {
    table
        .load_preset(UTF8_FULL_CONDENSED)
        .apply_modifier(UTF8_ROUND_CORNERS)
        .set_content_arrangement(ContentArrangement::Dynamic)
        .set_width(120);
}

/// Plain listing style for configuration tables (`vdash roles`).
pub fn apply_listing_style(table: &mut Table) {
    table
        .load_preset(UTF8_FULL_CONDENSED)
        .apply_modifier(UTF8_ROUND_CORNERS)
        .set_content_arrangement(ContentArrangement::Dynamic)
        .set_width(120);
}

fn align_column(table: &mut Table, index: usize, alignment: CellAlignment) {
    if let Some(column) = table.column_mut(index) {
        column.set_cell_alignment(alignment);
    }
}

fn header_cell(label: &str) -> Cell {
    Cell::new(label)
        .fg(Color::Cyan)
        .add_attribute(Attribute::Bold)
}

fn dim_cell(value: &str) -> Cell {
    Cell::new(value).fg(Color::DarkGrey)
}
