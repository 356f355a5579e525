//! Chart command handler.
//!
//! Prints the projected series as a table: one row per record, one column
//! per series. Structured formats emit the `ChartData` itself.

use chrono::Local;
use tabled::builder::Builder;
use tabled::settings::Style;

use netwatch_core::display::amount;
use netwatch_core::{ChartData, Monitor, filter_with_table};

use crate::cli::{ChartArgs, GlobalOpts, OutputFormat};
use crate::config;
use crate::error::CliError;
use crate::output;

use super::category;

pub async fn handle(monitor: &Monitor, args: ChartArgs, global: &GlobalOpts) -> Result<(), CliError> {
    let category = category(args.category);
    let records = monitor.fetch_history(category).await;
    let visible = filter_with_table(
        monitor.windows(),
        &records,
        config::time_window(global),
        Local::now().naive_local(),
    );
    let data = netwatch_core::chart(category, &visible);

    let out = render(&data, &global.output_format())?;
    output::print_output(&out, global.quiet);
    Ok(())
}

fn render(data: &ChartData, format: &OutputFormat) -> Result<String, CliError> {
    output::render_single(format, data, grid, |d| {
        grid_rows(d)
            .into_iter()
            .map(|row| row.join("\t"))
            .collect::<Vec<_>>()
            .join("\n")
    })
}

fn grid(data: &ChartData) -> String {
    let mut builder = Builder::default();
    let mut header = vec!["Time".to_owned()];
    header.extend(data.series.iter().map(|s| s.label.to_owned()));
    builder.push_record(header);
    for row in grid_rows(data) {
        builder.push_record(row);
    }
    builder.build().with(Style::rounded()).to_string()
}

/// One row per x position: label, then each series' value.
fn grid_rows(data: &ChartData) -> Vec<Vec<String>> {
    data.labels
        .iter()
        .enumerate()
        .map(|(i, label)| {
            let mut row = vec![if label.is_empty() { "-".into() } else { label.clone() }];
            row.extend(
                data.series
                    .iter()
                    .map(|s| amount(s.values.get(i).copied().flatten())),
            );
            row
        })
        .collect()
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use netwatch_core::{HistoryCategory, HistoryRecord, Stamp, TrafficRecord};

    fn sample() -> ChartData {
        let records = vec![
            HistoryRecord::Traffic(TrafficRecord {
                taken_at: Some(Stamp::parse("2024-05-10 10:00:00")),
                download_mb: Some(1.0),
                upload_mb: Some(0.5),
            }),
            HistoryRecord::Traffic(TrafficRecord {
                taken_at: None,
                download_mb: Some(2.0),
                upload_mb: None,
            }),
        ];
        netwatch_core::chart(HistoryCategory::Traffic, &records)
    }

    #[test]
    fn plain_grid_has_one_line_per_record() {
        let out = render(&sample(), &OutputFormat::Plain).unwrap();
        let lines: Vec<&str> = out.lines().collect();
        assert_eq!(lines.len(), 2);
        assert_eq!(lines[0], "2024-05-10 10:00:00\t1.00\t0.50\t1.50");
        assert_eq!(lines[1], "-\t2.00\t-\t-");
    }

    #[test]
    fn table_header_names_each_series() {
        let out = render(&sample(), &OutputFormat::Table).unwrap();
        let header = out.lines().nth(1).unwrap();
        assert!(header.contains("Time"));
        assert!(header.contains("Download"));
    }
}
