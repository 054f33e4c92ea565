use super::super::domain::SlotId;
use super::super::format::format_usd;
use super::metrics::DerivedMetrics;
use serde::Serialize;
use std::io::Write;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ComparisonColumn {
    pub slot: SlotId,
    pub scenario_name: String,
}

impl ComparisonColumn {
    pub fn heading(&self) -> String {
        format!("Scenario {}: {}", self.slot, self.scenario_name)
    }
}

/// One labelled row with a formatted cell per compared slot.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ComparisonRow {
    pub label: String,
    pub cells: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ScenarioSummary {
    pub slot: SlotId,
    pub scenario_name: String,
    pub summary: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ComparisonTable {
    pub columns: Vec<ComparisonColumn>,
    pub parameters: Vec<ComparisonRow>,
    pub metrics: Vec<DerivedMetrics>,
    pub best_value: Option<SlotId>,
    pub summaries: Vec<ScenarioSummary>,
}

impl ComparisonTable {
    pub fn is_best_value(&self, slot: SlotId) -> bool {
        self.best_value == Some(slot)
    }

    pub fn metric_rows(&self) -> Vec<ComparisonRow> {
        let money_row = |label: &str, value: fn(&DerivedMetrics) -> f64| ComparisonRow {
            label: label.to_string(),
            cells: self.metrics.iter().map(|m| format_usd(value(m))).collect(),
        };

        vec![
            money_row("Monthly Cost per Card", |m| m.monthly_cost_per_card),
            money_row("Monthly Cost per System", |m| m.monthly_cost_per_system),
            money_row("Total Monthly Cost", |m| m.total_monthly_cost),
            money_row("Cost per Card for Full Term", |m| {
                m.cost_per_card_full_term
            }),
            ComparisonRow {
                label: "Best Value Option".to_string(),
                cells: self
                    .metrics
                    .iter()
                    .map(|m| (if m.best_value { "Yes" } else { "" }).to_string())
                    .collect(),
            },
        ]
    }

    /// Tab-separated rendering: parameter table, metric table, then each
    /// scenario's summary.
    pub fn render_text(&self) -> String {
        let mut sections = Vec::new();

        let mut parameter_lines = vec![tab_row(
            "Parameter",
            self.columns.iter().map(ComparisonColumn::heading),
        )];
        parameter_lines.extend(
            self.parameters
                .iter()
                .map(|row| tab_row(&row.label, row.cells.iter().cloned())),
        );
        sections.push(parameter_lines.join("\n"));

        let mut metric_lines = vec![tab_row(
            "Metric",
            self.columns
                .iter()
                .map(|column| format!("Scenario {}", column.slot)),
        )];
        metric_lines.extend(
            self.metric_rows()
                .iter()
                .map(|row| tab_row(&row.label, row.cells.iter().cloned())),
        );
        sections.push(metric_lines.join("\n"));

        for summary in &self.summaries {
            sections.push(format!(
                "Scenario {}: {}\n{}",
                summary.slot, summary.scenario_name, summary.summary
            ));
        }

        sections.join("\n\n")
    }

    /// Writes the parameter and metric rows as a single CSV sheet.
    pub fn write_csv<W: Write>(&self, writer: W) -> Result<(), csv::Error> {
        let mut csv_writer = csv::Writer::from_writer(writer);

        let mut header = vec!["Parameter".to_string()];
        header.extend(self.columns.iter().map(ComparisonColumn::heading));
        csv_writer.write_record(&header)?;

        let metric_rows = self.metric_rows();
        for row in self.parameters.iter().chain(metric_rows.iter()) {
            let mut record = vec![row.label.as_str()];
            record.extend(row.cells.iter().map(String::as_str));
            csv_writer.write_record(&record)?;
        }

        csv_writer.flush()?;
        Ok(())
    }
}

fn tab_row(label: &str, cells: impl Iterator<Item = String>) -> String {
    let mut row = vec![label.to_string()];
    row.extend(cells);
    row.join("\t")
}
