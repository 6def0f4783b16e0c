//! Record types — the items held inside the document's four collections.
//!
//! Serde attribute choices here pin down the on-disk layout: field names are
//! camelCase, study statuses serialise with spaces, and the upsolve kind is a
//! flattened internally-tagged enum, so stored documents keep the flat shape
//! with a `"kind"` field.

use std::{fmt, str::FromStr};

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

// ─── Problems ────────────────────────────────────────────────────────────────

/// A practice problem tracked by difficulty rating.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RatingProblem {
  pub id:     Uuid,
  #[serde(default)]
  pub name:   String,
  pub link:   String,
  /// The rating as entered, e.g. `"1350"`. Values that don't parse as an
  /// integer land in the Unrated bucket.
  #[serde(default, skip_serializing_if = "Option::is_none")]
  pub rating: Option<String>,
  #[serde(default)]
  pub notes:  String,
  #[serde(default)]
  pub solved: bool,
}

impl RatingProblem {
  /// The parsed numeric rating, if the stored string is a valid integer.
  pub fn rating_value(&self) -> Option<i64> {
    self.rating.as_deref().and_then(|r| r.trim().parse().ok())
  }
}

/// A practice problem tracked by topic label rather than rating.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TopicProblem {
  pub id:     Uuid,
  #[serde(default)]
  pub name:   String,
  pub link:   String,
  /// Free-text grouping label ("DP", "Graphs", ...). Blank groups under
  /// "General".
  #[serde(default)]
  pub topic:  String,
  #[serde(default)]
  pub notes:  String,
  #[serde(default)]
  pub solved: bool,
}

// ─── Study topics ────────────────────────────────────────────────────────────

/// Upper bound on resources attached to one study topic.
pub const MAX_RESOURCES: usize = 10;

/// Progress state of a study topic. All transitions are permitted — a
/// completed topic can be reopened.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum StudyStatus {
  #[default]
  #[serde(rename = "not started")]
  NotStarted,
  #[serde(rename = "in progress")]
  InProgress,
  #[serde(rename = "completed")]
  Completed,
}

impl fmt::Display for StudyStatus {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    let s = match self {
      Self::NotStarted => "not started",
      Self::InProgress => "in progress",
      Self::Completed => "completed",
    };
    f.write_str(s)
  }
}

impl FromStr for StudyStatus {
  type Err = String;

  fn from_str(s: &str) -> Result<Self, Self::Err> {
    match s.trim().to_ascii_lowercase().as_str() {
      "not started" | "not-started" | "todo" => Ok(Self::NotStarted),
      "in progress" | "in-progress" | "started" => Ok(Self::InProgress),
      "completed" | "done" => Ok(Self::Completed),
      other => Err(format!("unknown status: {other:?}")),
    }
  }
}

/// A link attached to a study topic.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Resource {
  pub url:  String,
  #[serde(default)]
  pub desc: String,
}

/// A planned block of study with a date range and resource links.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StudyTopic {
  pub id:         Uuid,
  pub topic:      String,
  /// `YYYY-MM-DD`, or empty when unscheduled.
  #[serde(default)]
  pub start_date: String,
  #[serde(default)]
  pub end_date:   String,
  #[serde(default)]
  pub status:     StudyStatus,
  #[serde(default)]
  pub resources:  Vec<Resource>,
}

impl StudyTopic {
  pub fn start(&self) -> Option<NaiveDate> { self.start_date.parse().ok() }

  pub fn end(&self) -> Option<NaiveDate> { self.end_date.parse().ok() }
}

// ─── Upsolve entries ─────────────────────────────────────────────────────────

/// Contest platform for upsolve entries of kind `contest`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum Platform {
  Codeforces,
  AtCoder,
  CodeChef,
  VJudge,
  Other,
  /// No platform chosen; serialises as the empty string.
  #[default]
  #[serde(rename = "")]
  Unspecified,
}

impl fmt::Display for Platform {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    let s = match self {
      Self::Codeforces => "Codeforces",
      Self::AtCoder => "AtCoder",
      Self::CodeChef => "CodeChef",
      Self::VJudge => "VJudge",
      Self::Other => "Other",
      Self::Unspecified => "",
    };
    f.write_str(s)
  }
}

impl FromStr for Platform {
  type Err = String;

  fn from_str(s: &str) -> Result<Self, Self::Err> {
    match s.trim().to_ascii_lowercase().as_str() {
      "codeforces" => Ok(Self::Codeforces),
      "atcoder" => Ok(Self::AtCoder),
      "codechef" => Ok(Self::CodeChef),
      "vjudge" => Ok(Self::VJudge),
      "other" => Ok(Self::Other),
      "" => Ok(Self::Unspecified),
      other => Err(format!("unknown platform: {other:?}")),
    }
  }
}

/// One problem inside a contest upsolve entry. Addressed by position within
/// its parent, not by id.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ContestProblem {
  #[serde(default)]
  pub name:   String,
  pub link:   String,
  #[serde(default)]
  pub solved: bool,
}

/// What an upsolve entry refers to. The serde tag is flattened into the
/// parent entry, so single problems store as `"kind": "problem"` and carry no
/// contest fields at all.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "lowercase")]
pub enum UpsolveKind {
  /// A single problem to revisit.
  #[default]
  Problem,
  /// A whole contest, with its problem list.
  Contest {
    #[serde(default)]
    platform: Platform,
    #[serde(default)]
    problems: Vec<ContestProblem>,
  },
}

/// A problem or contest to solve after the contest window closed.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UpsolveEntry {
  pub id:     Uuid,
  pub name:   String,
  pub link:   String,
  /// Why it's on the list ("used editorial", "ran out of time", ...).
  #[serde(default)]
  pub reason: String,
  /// Attempt date, `YYYY-MM-DD` or empty.
  #[serde(default)]
  pub date:   String,
  /// Entry-level solved flag. Tracked for contests too, independently of the
  /// per-problem flags.
  #[serde(default)]
  pub solved: bool,
  #[serde(flatten)]
  pub kind:   UpsolveKind,
}

impl UpsolveEntry {
  pub fn is_contest(&self) -> bool {
    matches!(self.kind, UpsolveKind::Contest { .. })
  }

  /// The nested contest problems; empty for single-problem entries.
  pub fn contest_problems(&self) -> &[ContestProblem] {
    match &self.kind {
      UpsolveKind::Problem => &[],
      UpsolveKind::Contest { problems, .. } => problems,
    }
  }

  pub fn attempt_date(&self) -> Option<NaiveDate> { self.date.parse().ok() }
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn study_status_roundtrips_with_spaces() {
    let json = serde_json::to_string(&StudyStatus::NotStarted).unwrap();
    assert_eq!(json, r#""not started""#);
    let back: StudyStatus = serde_json::from_str(&json).unwrap();
    assert_eq!(back, StudyStatus::NotStarted);
  }

  #[test]
  fn upsolve_problem_serialises_flat() {
    let entry = UpsolveEntry {
      id:     Uuid::new_v4(),
      name:   "ABC 321 D".into(),
      link:   "https://atcoder.jp/abc321_d".into(),
      reason: String::new(),
      date:   "2024-02-02".into(),
      solved: false,
      kind:   UpsolveKind::Problem,
    };
    let value = serde_json::to_value(&entry).unwrap();
    assert_eq!(value["kind"], "problem");
    assert!(value.get("problems").is_none());
  }

  #[test]
  fn upsolve_contest_roundtrips() {
    let entry = UpsolveEntry {
      id:     Uuid::new_v4(),
      name:   "Round 912".into(),
      link:   "https://codeforces.com/contest/1912".into(),
      reason: "upsolve C-E".into(),
      date:   "2024-01-15".into(),
      solved: false,
      kind:   UpsolveKind::Contest {
        platform: Platform::Codeforces,
        problems: vec![ContestProblem {
          name:   "C".into(),
          link:   "https://codeforces.com/contest/1912/C".into(),
          solved: true,
        }],
      },
    };
    let json = serde_json::to_string(&entry).unwrap();
    let back: UpsolveEntry = serde_json::from_str(&json).unwrap();
    assert_eq!(back, entry);
    assert_eq!(back.contest_problems().len(), 1);
  }

  #[test]
  fn unspecified_platform_is_empty_string() {
    let json = serde_json::to_string(&Platform::Unspecified).unwrap();
    assert_eq!(json, r#""""#);
  }

  #[test]
  fn rating_value_rejects_garbage() {
    let mut p = RatingProblem {
      id:     Uuid::new_v4(),
      name:   "A".into(),
      link:   "https://example.com".into(),
      rating: Some("1350".into()),
      notes:  String::new(),
      solved: false,
    };
    assert_eq!(p.rating_value(), Some(1350));
    p.rating = Some("abc".into());
    assert_eq!(p.rating_value(), None);
    p.rating = None;
    assert_eq!(p.rating_value(), None);
  }
}
