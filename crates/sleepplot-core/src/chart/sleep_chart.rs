//! Sleep schedule chart assembly.
//!
//! Top row: one bar per night spanning wake time to bedtime on the
//! relative-seconds axis, plus the two rolling-average trend lines.
//! Bottom row: nightly sleep duration.

use chrono::{NaiveDate, TimeDelta};

use super::figure::{BarSpec, Figure, LineSpec, Row, Tick};
use crate::normalize::{format_relative_seconds, format_timedelta, SleepTable};

const HOUR: i64 = 3600;
const DAY: i64 = 24 * HOUR;
/// Highest duration tick, in hours.
const MAX_DURATION_HOURS: i64 = 15;

/// Builds the two-row sleep chart for `table`.
///
/// `tick_date` is the reference date used to label the time-of-day axis;
/// any date gives the same labels.
pub fn build_sleep_chart(table: &SleepTable, title: &str, tick_date: NaiveDate) -> Figure {
    let rows = table.rows();
    let x: Vec<String> = rows.iter().map(|r| r.date.format("%Y-%m-%d").to_string()).collect();

    let mut figure = Figure::new(title);

    figure.add_bar_trace(
        Row::Top,
        BarSpec {
            name: "Sleeping Hours".into(),
            x: x.clone(),
            base: rows.iter().map(|r| r.r_wakeup).collect(),
            height: rows
                .iter()
                .map(|r| Some(r.r_bedtime? - r.r_wakeup?))
                .collect(),
            customdata: rows
                .iter()
                .map(|r| {
                    vec![
                        r.f_bedtime.clone(),
                        r.f_wakeup.clone(),
                        format_timedelta(r.sleeptime),
                    ]
                })
                .collect(),
            hovertemplate: "Date: %{x}<br>\
                            Bedtime: %{customdata[0]}<br>\
                            Wakeup: %{customdata[1]}<br>\
                            Total Time: %{customdata[2]}\
                            <extra></extra>"
                .into(),
        },
    );

    figure.add_line_trace(
        Row::Top,
        LineSpec {
            name: "Wakeup 7 Day Rolling Average".into(),
            x: x.clone(),
            y: rows.iter().map(|r| r.rm_wakeup).collect(),
            customdata: rows
                .iter()
                .map(|r| format_relative_seconds(r.rm_wakeup, r.date))
                .collect(),
            hovertemplate: "Average Wakeup: %{customdata}<extra></extra>".into(),
        },
    );

    figure.add_line_trace(
        Row::Top,
        LineSpec {
            name: "Bedtime 7 Day Rolling Average".into(),
            x: x.clone(),
            y: rows.iter().map(|r| r.rm_bedtime).collect(),
            customdata: rows
                .iter()
                .map(|r| format_relative_seconds(r.rm_bedtime, r.date))
                .collect(),
            hovertemplate: "Average Bedtime: %{customdata}<extra></extra>".into(),
        },
    );

    figure.add_line_trace(
        Row::Bottom,
        LineSpec {
            name: "Sleep Time".into(),
            x,
            y: rows
                .iter()
                .map(|r| r.sleeptime.map(|d| d.num_seconds() as f64))
                .collect(),
            customdata: rows.iter().map(|r| format_timedelta(r.sleeptime)).collect(),
            hovertemplate: "Sleep Time: %{customdata}".into(),
        },
    );

    figure
        .set_axis_ticks(Row::Top, time_of_day_ticks(tick_date))
        .set_axis_ticks(Row::Bottom, duration_ticks());

    figure
}

/// Hourly ticks from +24h down to (excluding) -24h relative seconds,
/// labeled as wall-clock times.
pub fn time_of_day_ticks(date: NaiveDate) -> Vec<Tick> {
    (0..48)
        .map(|i| DAY - i * HOUR)
        .map(|s| {
            let value = s as f64;
            Tick {
                value,
                label: format!("{}  ", format_relative_seconds(Some(value), date)),
            }
        })
        .collect()
}

/// Whole-hour duration ticks from 0 to 15 hours.
pub fn duration_ticks() -> Vec<Tick> {
    (0..=MAX_DURATION_HOURS)
        .map(|h| {
            let delta = TimeDelta::hours(h);
            Tick {
                value: delta.num_seconds() as f64,
                label: format_timedelta(Some(delta)),
            }
        })
        .collect()
}
