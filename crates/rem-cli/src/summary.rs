use comfy_table::modifiers::{UTF8_ROUND_CORNERS, UTF8_SOLID_INNER_BORDERS};
use comfy_table::presets::UTF8_FULL;
use comfy_table::{Attribute, Cell, CellAlignment, Color, ContentArrangement, Table};
use serde_json::Value;

use rem_indicators::report::{
    DOMAIN_ATTENTIONS, DOMAIN_BIRTHS, DOMAIN_CONTROLS, DOMAIN_DISCHARGES,
    DOMAIN_MATERNAL_EPISODES, DOMAIN_MOTHERS, DOMAIN_NEONATAL_EPISODES, DOMAIN_NEWBORNS,
};
use rem_indicators::{DomainCounts, DomainSection, IndicatorsReport};
use rem_model::ReportPeriod;
use rem_report::RegulatoryReport;

pub fn print_indicators_summary(report: &IndicatorsReport) {
    print_period(&report.period);

    let mut table = Table::new();
    table.set_header(vec![
        header_cell("Domain"),
        header_cell("Total"),
        header_cell("Periods"),
        header_cell("Average"),
        header_cell("Top category"),
        header_cell("Rates"),
    ]);
    apply_table_style(&mut table, 140);
    align_column(&mut table, 1, CellAlignment::Right);
    align_column(&mut table, 2, CellAlignment::Right);
    align_column(&mut table, 3, CellAlignment::Right);
    for (domain, section) in report.sections() {
        let failed = report.failures.iter().any(|f| f.domain == domain);
        table.add_row(section_row(domain, section, failed));
    }
    println!("{table}");

    let operational = &report.operational;
    let mut table = Table::new();
    table.set_header(vec![
        header_cell("Domain"),
        header_cell("Total"),
        header_cell(&format!(
            "Last {} days",
            operational.recent_activity.window_days
        )),
    ]);
    apply_table_style(&mut table, 80);
    align_column(&mut table, 1, CellAlignment::Right);
    align_column(&mut table, 2, CellAlignment::Right);
    let totals = domain_rows(&operational.totals);
    let recent = domain_rows(&operational.recent_activity.counts);
    for ((domain, total), (_, recent)) in totals.into_iter().zip(recent) {
        table.add_row(vec![
            domain_cell(domain),
            Cell::new(total),
            count_cell(recent, Color::Green),
        ]);
    }
    table.add_row(vec![
        Cell::new("TOTAL")
            .fg(Color::Cyan)
            .add_attribute(Attribute::Bold),
        Cell::new(operational.totals.sum()).add_attribute(Attribute::Bold),
        Cell::new(operational.recent_activity.counts.sum()).add_attribute(Attribute::Bold),
    ]);
    println!();
    println!("Operational:");
    println!("{table}");

    if report.has_failures() {
        eprintln!("Failed sections:");
        for failure in &report.failures {
            eprintln!("- {}: {}", failure.domain, failure.error);
        }
    }
}

pub fn print_rem_summary(report: &RegulatoryReport) {
    print_period(&report.period);

    let mut table = Table::new();
    table.set_header(vec![
        header_cell("Section"),
        header_cell("Indicator"),
        header_cell("Count"),
    ]);
    apply_table_style(&mut table, 100);
    align_column(&mut table, 2, CellAlignment::Right);

    let mut rows = Vec::new();
    if let Ok(Value::Object(sections)) = serde_json::to_value(report.sections) {
        for (section, value) in sections {
            flatten_counts(&section, String::new(), &value, &mut rows);
        }
    }
    let mut previous = String::new();
    for (section, indicator, count) in rows {
        let section_cell = if section == previous {
            dim_cell("")
        } else {
            domain_cell(&section)
        };
        previous = section;
        table.add_row(vec![
            section_cell,
            Cell::new(indicator),
            count_cell(count, Color::White),
        ]);
    }
    println!("{table}");
}

/// Leaf counters of one report section as `(section, dotted.path, count)`.
pub fn flatten_counts(
    section: &str,
    prefix: String,
    value: &Value,
    rows: &mut Vec<(String, String, usize)>,
) {
    match value {
        Value::Object(fields) => {
            for (key, child) in fields {
                let path = if prefix.is_empty() {
                    key.clone()
                } else {
                    format!("{prefix}.{key}")
                };
                flatten_counts(section, path, child, rows);
            }
        }
        Value::Number(number) => {
            if let Some(count) = number.as_u64().and_then(|n| usize::try_from(n).ok()) {
                rows.push((section.to_string(), prefix, count));
            }
        }
        _ => {}
    }
}

fn print_period(period: &ReportPeriod) {
    let bound = |date: Option<chrono::NaiveDate>| {
        date.map_or_else(|| "open".to_string(), |d| d.to_string())
    };
    println!(
        "Period: {} to {} (grouped by {})",
        bound(period.start),
        bound(period.end),
        period.group_by
    );
}

fn section_row(domain: &str, section: &DomainSection, failed: bool) -> Vec<Cell> {
    let name = if failed {
        Cell::new(domain).fg(Color::Red).add_attribute(Attribute::Bold)
    } else {
        domain_cell(domain)
    };
    let average = match section.average {
        Some(value) => Cell::new(format!("{value:.1}")),
        None => dim_cell("-"),
    };
    let top = match section.by_category.first() {
        Some(share) => Cell::new(format!("{} ({}%)", share.label, share.percentage)),
        None => dim_cell("-"),
    };
    let rates = if section.rates.is_empty() {
        dim_cell("-")
    } else {
        Cell::new(
            section
                .rates
                .iter()
                .map(|(name, rate)| format!("{name} {}%", rate.rate))
                .collect::<Vec<_>>()
                .join("\n"),
        )
    };
    vec![
        name,
        Cell::new(section.total),
        count_cell(section.evolution.len(), Color::White),
        average,
        top,
        rates,
    ]
}

fn domain_rows(counts: &DomainCounts) -> [(&'static str, usize); 8] {
    [
        (DOMAIN_MOTHERS, counts.mothers),
        (DOMAIN_BIRTHS, counts.births),
        (DOMAIN_NEWBORNS, counts.newborns),
        (DOMAIN_NEONATAL_EPISODES, counts.neonatal_episodes),
        (DOMAIN_MATERNAL_EPISODES, counts.maternal_episodes),
        (DOMAIN_CONTROLS, counts.controls),
        (DOMAIN_ATTENTIONS, counts.attentions),
        (DOMAIN_DISCHARGES, counts.discharges),
    ]
}

fn apply_table_style(table: &mut Table, width: u16) {
    table
        .load_preset(UTF8_FULL)
        .apply_modifier(UTF8_ROUND_CORNERS)
        .apply_modifier(UTF8_SOLID_INNER_BORDERS)
        .set_content_arrangement(ContentArrangement::Dynamic)
        .set_width(width);
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

fn domain_cell(label: &str) -> Cell {
    Cell::new(label)
        .fg(Color::Blue)
        .add_attribute(Attribute::Bold)
}

fn count_cell(count: usize, color: Color) -> Cell {
    match count {
        0 => dim_cell(0),
        value => Cell::new(value).fg(color),
    }
}

fn dim_cell<T: ToString>(value: T) -> Cell {
    Cell::new(value).fg(Color::DarkGrey)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn flattens_nested_counters_with_dotted_paths() {
        let value = serde_json::json!({
            "totalPartos": 3,
            "edadMaterna": { "menor15": 0, "de15a19": 1 }
        });
        let mut rows = Vec::new();
        flatten_counts("caracteristicasParto", String::new(), &value, &mut rows);
        assert_eq!(
            rows,
            vec![
                ("caracteristicasParto".to_string(), "edadMaterna.de15a19".to_string(), 1),
                ("caracteristicasParto".to_string(), "edadMaterna.menor15".to_string(), 0),
                ("caracteristicasParto".to_string(), "totalPartos".to_string(), 3),
            ]
        );
    }
}
