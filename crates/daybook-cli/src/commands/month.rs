use clap::Subcommand;
use daybook_core::{KeywordFilter, MonthKey};

use super::open_planner;

const WEEKDAYS: [&str; 7] = ["Sun", "Mon", "Tue", "Wed", "Thu", "Fri", "Sat"];

#[derive(Subcommand)]
pub enum MonthAction {
    /// Month grid with the number of events per day
    Show {
        /// Month as YYYY-MM (default: current month)
        month: Option<MonthKey>,
        /// Only count events whose name or description contains this
        #[arg(long, default_value = "")]
        filter: String,
    },
}

pub fn run(action: MonthAction) -> Result<(), Box<dyn std::error::Error>> {
    let (_, planner) = open_planner()?;

    match action {
        MonthAction::Show { month, filter } => {
            let month = match month {
                Some(month) => month,
                None => MonthKey::current()?,
            };
            let slice = KeywordFilter::new(&filter).apply_month(planner.query_month(month));

            let title = month
                .first_day()
                .map(|d| d.date().format("%B %Y").to_string())
                .unwrap_or_else(|| month.to_string());
            println!("{title}");
            // Weekend columns are starred
            let header: Vec<String> = WEEKDAYS
                .iter()
                .enumerate()
                .map(|(i, d)| if i == 0 || i == 6 { format!("{d}*") } else { d.to_string() })
                .map(|d| format!("{d:<7}"))
                .collect();
            println!("{}", header.concat().trim_end());

            for week in month.grid().chunks(7) {
                let row: Vec<String> = week
                    .iter()
                    .map(|cell| match cell.and_then(|day| month.day(day)) {
                        Some(date) => {
                            let count = slice.get(date).len();
                            let cell = if count > 0 {
                                format!("{:>2}({count})", date.day())
                            } else {
                                format!("{:>2}", date.day())
                            };
                            format!("{cell:<7}")
                        }
                        None => " ".repeat(7),
                    })
                    .collect();
                println!("{}", row.concat().trim_end());
            }
            println!("{} events", slice.len());
        }
    }
    Ok(())
}
