//! Event management commands for CLI.

use clap::Subcommand;
use daybook_core::interval::parse_minutes;
use daybook_core::{Category, DateKey, EventData, EventRecord, KeywordFilter};
use serde::Serialize;

use super::{open_planner, warn_unsaved};

#[derive(Subcommand)]
pub enum EventAction {
    /// Add an event to a day
    Add {
        /// Day as YYYY-MM-DD
        date: DateKey,
        /// Event name
        name: String,
        /// Start time (HH:MM)
        #[arg(long)]
        start: String,
        /// End time (HH:MM), after the start
        #[arg(long)]
        end: String,
        /// Free-form description
        #[arg(long, default_value = "")]
        description: String,
        /// Work, Personal or Others (default: from config)
        #[arg(long)]
        category: Option<Category>,
    },
    /// Delete an event from a day
    Delete {
        /// Day as YYYY-MM-DD
        date: DateKey,
        /// Position as shown by `event list`
        #[arg(long, conflicts_with = "start", required_unless_present = "start")]
        index: Option<usize>,
        /// Start time (HH:MM) of the event to delete
        #[arg(long)]
        start: Option<String>,
    },
    /// List a day's events
    List {
        /// Day as YYYY-MM-DD (default: today)
        date: Option<DateKey>,
        /// Only events whose name or description contains this
        #[arg(long, default_value = "")]
        filter: String,
        /// Print JSON instead of text
        #[arg(long)]
        json: bool,
    },
    /// List every day that has events
    All {
        /// Only events whose name or description contains this
        #[arg(long, default_value = "")]
        filter: String,
        /// Print JSON instead of text
        #[arg(long)]
        json: bool,
    },
}

/// One listed event with its position in the day.
#[derive(Serialize)]
struct Listed<'a> {
    index: usize,
    #[serde(flatten)]
    event: &'a EventRecord,
}

#[derive(Serialize)]
struct ListedDay<'a> {
    date: String,
    events: Vec<Listed<'a>>,
}

fn listed<'a>(events: &'a [EventRecord], filter: &KeywordFilter) -> Vec<Listed<'a>> {
    events
        .iter()
        .enumerate()
        .filter(|(_, e)| filter.matches(e))
        .map(|(index, event)| Listed { index, event })
        .collect()
}

fn print_text(events: &[Listed<'_>]) {
    for l in events {
        let e = l.event;
        print!("[{}] {} {} ({})", l.index, e.interval(), e.name(), e.category());
        if !e.description().is_empty() {
            print!(" - {}", e.description());
        }
        println!();
    }
}

pub fn run(action: EventAction) -> Result<(), Box<dyn std::error::Error>> {
    let (config, mut planner) = open_planner()?;

    match action {
        EventAction::Add {
            date,
            name,
            start,
            end,
            description,
            category,
        } => {
            let data = EventData::new(name, start, end)
                .with_description(description)
                .with_category(category.unwrap_or(config.events.default_category));
            let added = planner.add_event(date, data)?;
            warn_unsaved(added.save_error.as_ref());
            tracing::debug!(id = %added.value, "added from cli");
            println!("Event added on {date}");
        }
        EventAction::Delete { date, index, start } => {
            let removed = match (index, start) {
                (_, Some(start)) => {
                    let minute = parse_minutes("start", &start)?;
                    let id = planner
                        .query_day(date)
                        .iter()
                        .find(|e| e.interval().start() == minute)
                        .map(EventRecord::id)
                        .ok_or_else(|| format!("no event starting at {start} on {date}"))?;
                    planner.delete_event_by_id(date, id)?
                }
                (Some(index), None) => planner.delete_event(date, index)?,
                (None, None) => return Err("either --index or --start is required".into()),
            };
            warn_unsaved(removed.save_error.as_ref());
            println!("Event deleted: {} ({})", removed.value.name(), removed.value.interval());
        }
        EventAction::List { date, filter, json } => {
            let date = match date {
                Some(date) => date,
                None => DateKey::today()?,
            };
            let events = listed(planner.query_day(date), &KeywordFilter::new(&filter));
            if json {
                println!("{}", serde_json::to_string_pretty(&events)?);
            } else if events.is_empty() {
                println!("No events on {date}.");
            } else {
                print_text(&events);
            }
        }
        EventAction::All { filter, json } => {
            let filter = KeywordFilter::new(&filter);
            let days: Vec<ListedDay<'_>> = planner
                .all_entries()
                .map(|(date, events)| ListedDay {
                    date: date.to_string(),
                    events: listed(events, &filter),
                })
                .filter(|day| !day.events.is_empty())
                .collect();
            if json {
                println!("{}", serde_json::to_string_pretty(&days)?);
            } else if days.is_empty() {
                println!("No events available.");
            } else {
                for day in &days {
                    println!("{}", day.date);
                    print_text(&day.events);
                }
            }
        }
    }
    Ok(())
}
