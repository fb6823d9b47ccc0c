//! `lull calendar`: nearest date on a day of month and/or weekday.

use chrono::{Local, NaiveDate};
use serde::Serialize;

use lull_core::calendar::find_date;

use crate::cli::{CalendarArgs, GlobalOpts};
use crate::error::CliError;
use crate::output;

#[derive(Debug, Serialize)]
struct CalendarReport {
    from: NaiveDate,
    date: NaiveDate,
    weekday: String,
}

pub fn handle(args: &CalendarArgs, global: &GlobalOpts) -> Result<(), CliError> {
    let from = args.from.unwrap_or_else(|| Local::now().date_naive());
    let date = find_date(from, args.day, args.weekday)?;

    let report = CalendarReport {
        from,
        date,
        weekday: date.format("%A").to_string(),
    };
    let rendered = output::render(global.output, &report, |r| r.date.to_string())?;
    output::print_output(&rendered, global.quiet);
    Ok(())
}
