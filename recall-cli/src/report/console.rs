//! Terminal rendering of a scoring report.

use comfy_table::{Cell, Color, ContentArrangement, Table, presets::UTF8_FULL_CONDENSED};
use recall_scoring::{GlobalSummary, ScoringReport};

const NOT_COMPUTABLE: &str = "n/a";

/// One-line pooled summary, e.g. `k/N = 3/6 -> 50.0% (CI z=1.96: 18.8–81.2%)`.
pub fn global_line(global: &GlobalSummary, z: f64) -> String {
    let percent = format_percent(global.percent());
    let ci = match global.interval {
        Some(interval) => format!(
            "{:.1}–{:.1}%",
            interval.lower_percent(),
            interval.upper_percent()
        ),
        None => NOT_COMPUTABLE.to_string(),
    };
    format!(
        "k/N = {}/{} -> {} (CI z={}: {})",
        global.k_correct_total, global.n_items_total, percent, z, ci
    )
}

/// Serial position curve as a table.
pub fn curve_table(report: &ScoringReport) -> Table {
    let mut table = new_table(&["Position", "Correct", "Total", "Percent"]);
    for point in &report.curve {
        table.add_row(vec![
            Cell::new(point.position),
            Cell::new(point.correct),
            Cell::new(point.total),
            Cell::new(format_percent(point.percent)),
        ]);
    }
    table
}

/// Per-trial accuracy, with error-type counts for serial recall.
pub fn trial_table(report: &ScoringReport) -> Table {
    let mut header = vec!["File", "Correct", "Items", "Percent", "CI"];
    if report.errors.is_some() {
        header.extend(["Omit", "Transp", "Intr"]);
    }
    let mut table = new_table(&header);

    for (i, trial) in report.trials.iter().enumerate() {
        let ci = trial
            .interval
            .map(|interval| {
                format!(
                    "{:.1}–{:.1}%",
                    interval.lower_percent(),
                    interval.upper_percent()
                )
            })
            .unwrap_or_else(|| NOT_COMPUTABLE.to_string());

        let mut row = vec![
            Cell::new(&trial.source_id),
            Cell::new(trial.k_correct),
            Cell::new(trial.n_items),
            Cell::new(format_percent(trial.percent())),
            Cell::new(ci),
        ];
        if let Some(dist) = report.errors.as_ref().and_then(|errors| errors.get(i)) {
            row.push(Cell::new(dist.counts.omission));
            row.push(Cell::new(dist.counts.transposition));
            row.push(Cell::new(dist.counts.intrusion));
        }
        table.add_row(row);
    }
    table
}

fn new_table(header: &[&str]) -> Table {
    let mut table = Table::new();
    table.load_preset(UTF8_FULL_CONDENSED);
    table.set_content_arrangement(ContentArrangement::Dynamic);
    table.set_header(
        header
            .iter()
            .map(|h| Cell::new(h).fg(Color::Cyan))
            .collect::<Vec<_>>(),
    );
    table
}

fn format_percent(value: Option<f64>) -> String {
    value
        .map(|p| format!("{p:.1}%"))
        .unwrap_or_else(|| NOT_COMPUTABLE.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use recall_scoring::{DEFAULT_Z, Item, TaskKind, Trial, score_batch};

    fn items(values: &[&str]) -> Vec<Item> {
        values.iter().map(|v| Item::new(v)).collect()
    }

    #[test]
    fn global_line_shows_counts_and_interval() {
        let global = GlobalSummary::compute(3, 6, DEFAULT_Z);

        let line = global_line(&global, DEFAULT_Z);

        assert_eq!(line, "k/N = 3/6 -> 50.0% (CI z=1.96: 18.8–81.2%)");
    }

    #[test]
    fn global_line_marks_empty_batch_not_computable() {
        let global = GlobalSummary::compute(0, 0, DEFAULT_Z);

        let line = global_line(&global, DEFAULT_Z);

        assert_eq!(line, "k/N = 0/0 -> n/a (CI z=1.96: n/a)");
    }

    #[test]
    fn trial_table_includes_error_columns_for_serial() {
        let report = score_batch(
            TaskKind::Serial,
            vec![Trial::new("a.csv", items(&["A", "B"]), items(&["B", ""]))],
            DEFAULT_Z,
        )
        .unwrap();

        let rendered = trial_table(&report).to_string();

        assert!(rendered.contains("Transp"));
        assert!(rendered.contains("a.csv"));
    }

    #[test]
    fn trial_table_omits_error_columns_for_free() {
        let report = score_batch(
            TaskKind::Free,
            vec![Trial::new("f.csv", items(&["A", "B"]), items(&["B"]))],
            DEFAULT_Z,
        )
        .unwrap();

        let rendered = trial_table(&report).to_string();

        assert!(!rendered.contains("Transp"));
        assert!(rendered.contains("50.0%"));
    }

    #[test]
    fn curve_table_shows_position_percent() {
        let report = score_batch(
            TaskKind::Free,
            vec![Trial::new("f.csv", items(&["A"]), items(&["A"]))],
            DEFAULT_Z,
        )
        .unwrap();

        let rendered = curve_table(&report).to_string();

        assert!(rendered.contains("100.0%"));
    }
}
