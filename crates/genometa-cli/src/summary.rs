use comfy_table::modifiers::{UTF8_ROUND_CORNERS, UTF8_SOLID_INNER_BORDERS};
use comfy_table::presets::UTF8_FULL;
use comfy_table::{
    Attribute, Cell, CellAlignment, Color, ColumnConstraint, ContentArrangement, Table, Width,
};

use genometa_cli::{EntitySummary, EtlReport};
use genometa_model::{Severity, Violation};

pub fn print_summary(report: &EtlReport) {
    println!("Input: {}", report.raw_dir.display());
    println!("Mode: {}", report.mode);
    if let Some(first) = report.written.first()
        && let Some(dir) = first.path.parent()
    {
        println!("Curated: {} file(s) under {}", report.written.len(), dir.display());
    }
    if let Some(dir) = report.quarantine_files.first().and_then(|path| path.parent()) {
        println!("Quarantine: {}", dir.display());
    }

    let mut table = Table::new();
    table.set_header(vec![
        header_cell("Table"),
        header_cell("Input"),
        header_cell("Curated"),
        header_cell("Quarantined"),
        header_cell("Violations"),
    ]);
    apply_summary_table_style(&mut table);
    for index in 1..=4 {
        align_column(&mut table, index, CellAlignment::Right);
    }

    let mut totals = Totals::default();
    for summary in &report.entities {
        totals.add(summary);
        table.add_row(vec![
            Cell::new(summary.entity.table_name())
                .fg(Color::Blue)
                .add_attribute(Attribute::Bold),
            Cell::new(summary.input_rows),
            optional_cell(summary.curated_rows),
            count_cell(summary.quarantined_rows, Color::Yellow),
            count_cell(summary.violations, Color::Red),
        ]);
    }
    table.add_row(vec![
        Cell::new("TOTAL")
            .fg(Color::Cyan)
            .add_attribute(Attribute::Bold),
        Cell::new(totals.input_rows).add_attribute(Attribute::Bold),
        optional_cell(totals.curated_rows).add_attribute(Attribute::Bold),
        count_cell(totals.quarantined_rows, Color::Yellow).add_attribute(Attribute::Bold),
        count_cell(totals.violations, Color::Red).add_attribute(Attribute::Bold),
    ]);
    println!("{table}");

    print_violation_table(&report.violations);
    if report.failed {
        eprintln!(
            "error: {} violation(s) found in {} mode",
            report.violations.len(),
            report.mode
        );
    }
}

#[derive(Default)]
struct Totals {
    input_rows: usize,
    curated_rows: Option<usize>,
    quarantined_rows: usize,
    violations: usize,
}

impl Totals {
    fn add(&mut self, summary: &EntitySummary) {
        self.input_rows += summary.input_rows;
        if let Some(rows) = summary.curated_rows {
            *self.curated_rows.get_or_insert(0) += rows;
        }
        self.quarantined_rows += summary.quarantined_rows;
        self.violations += summary.violations;
    }
}

/// Every violation, already in canonical order.
fn print_violation_table(violations: &[Violation]) {
    if violations.is_empty() {
        return;
    }
    let mut table = Table::new();
    table.set_header(vec![
        header_cell("Table"),
        header_cell("Row"),
        header_cell("Key"),
        header_cell("Column"),
        header_cell("Kind"),
        header_cell("Rule"),
        header_cell("Severity"),
        header_cell("Message"),
    ]);
    apply_violation_table_style(&mut table);
    align_column(&mut table, 1, CellAlignment::Right);
    align_column(&mut table, 6, CellAlignment::Center);
    for violation in violations {
        table.add_row(vec![
            Cell::new(violation.entity.table_name()).fg(Color::Blue),
            Cell::new(violation.row.index),
            match &violation.row.key {
                Some(key) => Cell::new(key),
                None => dim_cell("-"),
            },
            Cell::new(&violation.column),
            Cell::new(violation.kind.as_str()),
            dim_cell(violation.rule.as_str()),
            severity_cell(violation.severity),
            message_cell(violation),
        ]);
    }
    println!();
    println!("Violations:");
    println!("{table}");
}

fn apply_summary_table_style(table: &mut Table) {
    table
        .load_preset(UTF8_FULL)
        .apply_modifier(UTF8_ROUND_CORNERS)
        .apply_modifier(UTF8_SOLID_INNER_BORDERS)
        .set_content_arrangement(ContentArrangement::Dynamic)
        .set_width(100);
}

fn apply_violation_table_style(table: &mut Table) {
    table
        .load_preset(UTF8_FULL)
        .apply_modifier(UTF8_ROUND_CORNERS)
        .apply_modifier(UTF8_SOLID_INNER_BORDERS)
        .set_content_arrangement(ContentArrangement::DynamicFullWidth)
        .set_width(180);
    if table.column_count() >= 8 {
        table.set_constraints(vec![
            ColumnConstraint::UpperBoundary(Width::Fixed(12)),
            ColumnConstraint::LowerBoundary(Width::Fixed(5)),
            ColumnConstraint::UpperBoundary(Width::Fixed(16)),
            ColumnConstraint::UpperBoundary(Width::Fixed(20)),
            ColumnConstraint::UpperBoundary(Width::Fixed(16)),
            ColumnConstraint::UpperBoundary(Width::Fixed(26)),
            ColumnConstraint::LowerBoundary(Width::Fixed(10)),
            ColumnConstraint::UpperBoundary(Width::Percentage(45)),
        ]);
    }
}

fn align_column(table: &mut Table, index: usize, alignment: CellAlignment) {
    if let Some(column) = table.column_mut(index) {
        column.set_cell_alignment(alignment);
    }
}

fn severity_cell(severity: Severity) -> Cell {
    match severity {
        Severity::Hard => Cell::new("HARD").fg(Color::Red),
        Severity::Advisory => Cell::new("ADVISORY").fg(Color::Yellow),
    }
}

// Cascaded exclusions are shown dimmed; the root cause is listed elsewhere.
fn message_cell(violation: &Violation) -> Cell {
    if violation.is_cascade() {
        dim_cell(&violation.message)
    } else {
        Cell::new(&violation.message)
    }
}

fn optional_cell(count: Option<usize>) -> Cell {
    match count {
        Some(value) => Cell::new(value),
        None => dim_cell("-"),
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
