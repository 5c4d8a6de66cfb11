//! Normalized, date-ordered sleep table.
//!
//! Built once per run from the flat table: rows without an id are dropped,
//! the rest are sorted by calendar date, then each derived column is
//! computed row by row. Only the rolling means look across rows, which is
//! why sorting happens first.

use chrono::{DateTime, NaiveDate, NaiveDateTime, TimeDelta};
use serde::{Serialize, Serializer};
use std::io;
use std::path::Path;

use super::rolling::{rolling_mean, ROLLING_WINDOW};
use super::timeaxis::{format_relative_seconds, make_relative};
use crate::error::{Result, TableError};
use crate::table::{RawTable, ID_COLUMN};

const DATE_COLUMN: &str = "calendarDate";
const START_COLUMN: &str = "sleepStartTimestampLocal";
const END_COLUMN: &str = "sleepEndTimestampLocal";
const DURATION_COLUMN: &str = "sleepTimeSeconds";
const REQUIRED_COLUMNS: [&str; 5] = [
    ID_COLUMN,
    DATE_COLUMN,
    START_COLUMN,
    END_COLUMN,
    DURATION_COLUMN,
];

/// One calendar day's sleep entry, as read from the flat table.
#[derive(Debug, Clone, PartialEq)]
pub struct SleepRecord {
    pub id: String,
    pub calendar_date: NaiveDate,
    /// Local wall-clock time encoded as epoch milliseconds.
    pub sleep_start_local: Option<i64>,
    pub sleep_end_local: Option<i64>,
    pub sleep_time_seconds: Option<f64>,
}

impl SleepRecord {
    /// Reads row `row` of `table`. Returns `Ok(None)` when the row has no id.
    ///
    /// `table` must carry every required column; see [`require_columns`].
    fn from_raw(table: &RawTable, row: usize) -> Result<Option<Self>> {
        let Some(id) = table.cell(row, ID_COLUMN) else {
            return Ok(None);
        };

        let raw_date = table.cell(row, DATE_COLUMN).unwrap_or_default();
        let calendar_date = NaiveDate::parse_from_str(raw_date.trim(), "%Y-%m-%d")
            .map_err(|_| invalid(DATE_COLUMN, row, raw_date))?;

        Ok(Some(Self {
            id: id.to_string(),
            calendar_date,
            sleep_start_local: parse_millis(table, row, START_COLUMN)?,
            sleep_end_local: parse_millis(table, row, END_COLUMN)?,
            sleep_time_seconds: parse_number(table, row, DURATION_COLUMN)?,
        }))
    }
}

/// Derived view of a [`SleepRecord`].
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SleepRow {
    pub id: String,
    pub date: NaiveDate,
    pub bedtime: Option<NaiveDateTime>,
    pub wakeup: Option<NaiveDateTime>,
    /// Serialized as whole seconds.
    #[serde(serialize_with = "serialize_seconds")]
    pub sleeptime: Option<TimeDelta>,
    pub r_bedtime: Option<f64>,
    pub r_wakeup: Option<f64>,
    pub f_bedtime: String,
    pub f_wakeup: String,
    pub rm_bedtime: Option<f64>,
    pub rm_wakeup: Option<f64>,
}

impl SleepRow {
    fn derive(record: SleepRecord) -> Self {
        let date = record.calendar_date;
        let bedtime = record.sleep_start_local.and_then(local_millis);
        let wakeup = record.sleep_end_local.and_then(local_millis);
        let r_bedtime = bedtime.map(|dt| make_relative(dt, date));
        let r_wakeup = wakeup.map(|dt| make_relative(dt, date));

        Self {
            id: record.id,
            date,
            bedtime,
            wakeup,
            sleeptime: record
                .sleep_time_seconds
                .and_then(|s| TimeDelta::try_milliseconds((s * 1000.0).round() as i64)),
            r_bedtime,
            r_wakeup,
            f_bedtime: format_relative_seconds(r_bedtime, date),
            f_wakeup: format_relative_seconds(r_wakeup, date),
            rm_bedtime: None,
            rm_wakeup: None,
        }
    }
}

/// Date-sorted sleep rows with every derived column filled in.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(transparent)]
pub struct SleepTable {
    rows: Vec<SleepRow>,
}

impl SleepTable {
    /// Cleans and normalizes a flat table read from disk.
    pub fn from_raw(raw: &RawTable) -> Result<Self> {
        require_columns(raw)?;

        let mut records = Vec::with_capacity(raw.len());
        for row in 0..raw.len() {
            if let Some(record) = SleepRecord::from_raw(raw, row)? {
                records.push(record);
            }
        }
        let dropped = raw.len() - records.len();
        if dropped > 0 {
            tracing::debug!("Skipped {} row(s) without an id", dropped);
        }
        Ok(Self::from_records(records))
    }

    /// Sorts `records` by date and derives all columns.
    pub fn from_records(mut records: Vec<SleepRecord>) -> Self {
        records.sort_by_key(|r| r.calendar_date);
        let mut rows: Vec<SleepRow> = records.into_iter().map(SleepRow::derive).collect();

        let bed: Vec<Option<f64>> = rows.iter().map(|r| r.r_bedtime).collect();
        let wake: Vec<Option<f64>> = rows.iter().map(|r| r.r_wakeup).collect();
        let rm_bed = rolling_mean(&bed, ROLLING_WINDOW);
        let rm_wake = rolling_mean(&wake, ROLLING_WINDOW);
        for (row, (b, w)) in rows.iter_mut().zip(rm_bed.into_iter().zip(rm_wake)) {
            row.rm_bedtime = b;
            row.rm_wakeup = w;
        }

        Self { rows }
    }

    pub fn rows(&self) -> &[SleepRow] {
        &self.rows
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Writes the normalized table as CSV.
    pub fn write_csv(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            std::fs::create_dir_all(parent)?;
        }
        self.write_csv_to(std::fs::File::create(path)?)?;
        tracing::info!("Wrote normalized table to {}", path.display());
        Ok(())
    }

    pub fn write_csv_to<W: io::Write>(&self, writer: W) -> Result<()> {
        let mut wtr = csv::Writer::from_writer(writer);
        for row in &self.rows {
            wtr.serialize(row)?;
        }
        wtr.flush()?;
        Ok(())
    }
}

fn require_columns(table: &RawTable) -> Result<(), TableError> {
    match REQUIRED_COLUMNS
        .iter()
        .find(|column| table.column_index(column).is_none())
    {
        Some(column) => Err(TableError::MissingColumn((*column).into())),
        None => Ok(()),
    }
}

/// Epoch milliseconds of a local timestamp as a naive wall-clock datetime.
fn local_millis(ms: i64) -> Option<NaiveDateTime> {
    DateTime::from_timestamp_millis(ms).map(|dt| dt.naive_utc())
}

fn serialize_seconds<S: Serializer>(
    value: &Option<TimeDelta>,
    serializer: S,
) -> std::result::Result<S::Ok, S::Error> {
    match value {
        Some(delta) => serializer.serialize_some(&delta.num_seconds()),
        None => serializer.serialize_none(),
    }
}

fn invalid(column: &str, row: usize, value: &str) -> TableError {
    TableError::InvalidCell {
        column: column.into(),
        row,
        value: value.into(),
    }
}

fn parse_number(table: &RawTable, row: usize, column: &str) -> Result<Option<f64>> {
    let Some(raw) = table.cell(row, column) else {
        return Ok(None);
    };
    let value: f64 = raw
        .trim()
        .parse()
        .map_err(|_| invalid(column, row, raw))?;
    Ok(value.is_finite().then_some(value))
}

/// Timestamps may arrive as `1704150000000` or, after a float round trip,
/// `1704150000000.0`.
fn parse_millis(table: &RawTable, row: usize, column: &str) -> Result<Option<i64>> {
    Ok(parse_number(table, row, column)?.map(|v| v.round() as i64))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::CoreError;

    fn date(day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 1, day).unwrap()
    }

    fn millis(day: u32, h: u32, m: u32) -> i64 {
        date(day)
            .and_hms_opt(h, m, 0)
            .unwrap()
            .and_utc()
            .timestamp_millis()
    }

    fn record(day: u32, bed_hour: u32) -> SleepRecord {
        SleepRecord {
            id: day.to_string(),
            calendar_date: date(day),
            sleep_start_local: Some(millis(day - 1, bed_hour, 0)),
            sleep_end_local: Some(millis(day, 7, 15)),
            sleep_time_seconds: Some(28_800.0),
        }
    }

    #[test]
    fn derives_relative_and_formatted_columns() {
        let table = SleepTable::from_records(vec![record(2, 23)]);
        let row = &table.rows()[0];
        assert_eq!(row.r_bedtime, Some(3600.0));
        assert_eq!(row.r_wakeup, Some(-26100.0));
        assert_eq!(row.f_bedtime, "11:00 PM");
        assert_eq!(row.f_wakeup, "07:15 AM");
        assert_eq!(row.sleeptime, Some(TimeDelta::hours(8)));
    }

    #[test]
    fn rows_are_sorted_by_date() {
        let table = SleepTable::from_records(vec![record(5, 22), record(3, 23), record(4, 21)]);
        let dates: Vec<NaiveDate> = table.rows().iter().map(|r| r.date).collect();
        assert!(dates.windows(2).all(|w| w[0] <= w[1]));
        assert_eq!(dates[0], date(3));
    }

    #[test]
    fn rolling_mean_matches_trailing_window() {
        let records: Vec<SleepRecord> = (2..12).map(|d| record(d, 20 + d % 4)).collect();
        let table = SleepTable::from_records(records);
        let bed: Vec<f64> = table.rows().iter().map(|r| r.r_bedtime.unwrap()).collect();

        for (i, row) in table.rows().iter().enumerate() {
            if i < 6 {
                assert_eq!(row.rm_bedtime, None);
            } else {
                let expected = bed[i - 6..=i].iter().sum::<f64>() / 7.0;
                let actual = row.rm_bedtime.unwrap();
                assert!((actual - expected).abs() < 1e-9);
            }
        }
    }

    #[test]
    fn missing_timestamps_format_as_empty() {
        let mut rec = record(2, 23);
        rec.sleep_start_local = None;
        rec.sleep_time_seconds = None;
        let table = SleepTable::from_records(vec![rec]);
        let row = &table.rows()[0];
        assert_eq!(row.r_bedtime, None);
        assert_eq!(row.f_bedtime, "");
        assert_eq!(row.sleeptime, None);
    }

    #[test]
    fn from_raw_parses_float_timestamps_and_skips_missing_ids() {
        let mut raw = RawTable::new(
            ["id", "calendarDate", "sleepStartTimestampLocal", "sleepEndTimestampLocal", "sleepTimeSeconds"]
                .map(String::from)
                .to_vec(),
        );
        let start = format!("{}.0", millis(1, 23, 0));
        let end = millis(2, 7, 15).to_string();
        raw.push_row(
            0,
            vec![
                Some("10".into()),
                Some("2024-01-02".into()),
                Some(start),
                Some(end),
                Some("29700".into()),
            ],
        );
        raw.push_row(1, vec![None, Some("2024-01-03".into()), None, None, None]);

        let table = SleepTable::from_raw(&raw).unwrap();
        assert_eq!(table.len(), 1);
        assert_eq!(table.rows()[0].r_bedtime, Some(3600.0));
    }

    #[test]
    fn from_raw_requires_known_columns() {
        let raw = RawTable::new(vec!["id".into()]);
        let mut with_row = raw.clone();
        with_row.push_row(0, vec![Some("1".into())]);
        let err = SleepTable::from_raw(&with_row).unwrap_err();
        assert!(err.to_string().contains("calendarDate"));
    }

    #[test]
    fn header_is_checked_even_without_rows() {
        let raw = RawTable::new(vec!["id".into(), "calendarDate".into()]);
        let err = SleepTable::from_raw(&raw).unwrap_err();
        assert!(matches!(
            err,
            CoreError::Table(TableError::MissingColumn(ref c)) if c == "sleepStartTimestampLocal"
        ));
    }

    #[test]
    fn complete_header_without_rows_is_empty() {
        let raw = RawTable::new(REQUIRED_COLUMNS.map(String::from).to_vec());
        assert!(SleepTable::from_raw(&raw).unwrap().is_empty());
    }

    #[test]
    fn csv_export_uses_seconds_for_duration() {
        let table = SleepTable::from_records(vec![record(2, 23)]);
        let mut out = Vec::new();
        table.write_csv_to(&mut out).unwrap();
        let text = String::from_utf8(out).unwrap();
        let mut lines = text.lines();
        assert_eq!(
            lines.next().unwrap(),
            "id,date,bedtime,wakeup,sleeptime,r_bedtime,r_wakeup,f_bedtime,f_wakeup,rm_bedtime,rm_wakeup"
        );
        assert!(lines.next().unwrap().contains(",28800,"));
    }
}
