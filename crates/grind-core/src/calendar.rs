//! Month calendar projection.
//!
//! Study topics paint every in-month day of their inclusive date range;
//! upsolve entries mark the single day they were attempted. Unparsable or
//! out-of-month dates contribute nothing.

use chrono::{Datelike, NaiveDate};
use uuid::Uuid;

use crate::{document::Document, record::UpsolveKind};

/// What kind of record produced a calendar entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DayEntryKind {
  Study,
  UpsolveProblem,
  UpsolveContest,
}

/// One item shown on a day cell.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DayEntry {
  pub kind:  DayEntryKind,
  pub label: String,
  pub id:    Uuid,
}

/// The projected month: `days[d - 1]` holds day `d`'s entries.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MonthCalendar {
  pub year:  i32,
  pub month: u32,
  pub days:  Vec<Vec<DayEntry>>,
}

impl MonthCalendar {
  pub fn day(&self, day: u32) -> &[DayEntry] {
    day
      .checked_sub(1)
      .and_then(|i| self.days.get(i as usize))
      .map(Vec::as_slice)
      .unwrap_or(&[])
  }
}

/// First and last day of the month, if the year/month pair is valid.
fn month_bounds(year: i32, month: u32) -> Option<(NaiveDate, NaiveDate)> {
  let first = NaiveDate::from_ymd_opt(year, month, 1)?;
  let next = if month == 12 {
    NaiveDate::from_ymd_opt(year + 1, 1, 1)?
  } else {
    NaiveDate::from_ymd_opt(year, month + 1, 1)?
  };
  Some((first, next.pred_opt()?))
}

/// Project the document onto one month. An invalid year/month yields an
/// empty calendar.
pub fn month_calendar(doc: &Document, year: i32, month: u32) -> MonthCalendar {
  let Some((first, last)) = month_bounds(year, month) else {
    return MonthCalendar {
      year,
      month,
      days: Vec::new(),
    };
  };
  let mut days: Vec<Vec<DayEntry>> = vec![Vec::new(); last.day() as usize];

  for topic in &doc.study_topics {
    let (Some(start), Some(end)) = (topic.start(), topic.end()) else {
      continue;
    };
    // Clamp to the month so a wide range walks at most one month of days.
    let stop = end.min(last);
    let mut d = start.max(first);
    while d <= stop {
      days[d.day() as usize - 1].push(DayEntry {
        kind:  DayEntryKind::Study,
        label: topic.topic.clone(),
        id:    topic.id,
      });
      let Some(next) = d.succ_opt() else { break };
      d = next;
    }
  }

  for entry in &doc.upsolve {
    let Some(date) = entry.attempt_date() else {
      continue;
    };
    if date.year() == year && date.month() == month {
      days[date.day() as usize - 1].push(DayEntry {
        kind:  if matches!(entry.kind, UpsolveKind::Contest { .. }) {
          DayEntryKind::UpsolveContest
        } else {
          DayEntryKind::UpsolveProblem
        },
        label: entry.name.clone(),
        id:    entry.id,
      });
    }
  }

  MonthCalendar { year, month, days }
}
