//! Subcommand definitions. Parsing only; execution lives in [`crate::app`].

use std::path::PathBuf;

use clap::{Args, Subcommand, ValueEnum};
use grind_core::{
  record::{Platform, StudyStatus},
  views::SolveFilter,
};
use uuid::Uuid;

#[derive(Subcommand, Debug)]
pub enum Command {
  /// Add a problem to the practice list (rating-based unless --topic is
  /// given).
  Add(AddArgs),

  /// List problems grouped by rating bucket and/or topic.
  List(ListArgs),

  /// Mark a problem or upsolve entry solved (or unsolved with --undo).
  Solve(SolveArgs),

  /// Edit fields of an existing problem.
  Edit(EditArgs),

  /// Delete a record from whichever collection holds it.
  Rm {
    id: Uuid,
  },

  /// Move a problem between the rating and topic categories. The record gets
  /// a fresh id; the old one goes stale.
  Move(MoveArgs),

  /// Manage study-topic plans.
  #[command(subcommand)]
  Plan(PlanCommand),

  /// Manage upsolve entries.
  #[command(subcommand)]
  Upsolve(UpsolveCommand),

  /// Show the activity calendar for a month.
  Calendar {
    /// Month to show, e.g. 2024-01. Defaults to the current month.
    #[arg(long, value_name = "YYYY-MM")]
    month: Option<String>,
  },

  /// Dashboard counts.
  Stats,

  /// Breakdown by rating bucket, topic, contest, and study status.
  Analytics,

  /// Case-insensitive name search across all collections.
  Search {
    query: String,
  },

  /// Write a backup of the full document.
  Export {
    /// Output file (default: grind-backup.json).
    #[arg(value_name = "FILE")]
    out: Option<PathBuf>,
  },

  /// Replace the document with a backup file. Leaves everything untouched if
  /// the file doesn't parse.
  Import {
    file: PathBuf,
  },

  /// Show or set the accent color (#rrggbb).
  Theme {
    color: Option<String>,
  },
}

// ─── Problems ────────────────────────────────────────────────────────────────

#[derive(Args, Debug)]
pub struct AddArgs {
  /// Problem URL.
  pub link: String,

  #[arg(long, default_value = "")]
  pub name: String,

  /// Difficulty rating, e.g. 1500.
  #[arg(long, conflicts_with = "topic")]
  pub rating: Option<String>,

  /// Topic label; switches the problem into the topic-based list.
  #[arg(long)]
  pub topic: Option<String>,

  #[arg(long, default_value = "")]
  pub notes: String,
}

#[derive(Args, Debug)]
pub struct ListArgs {
  #[arg(value_enum, default_value = "all")]
  pub what: ListTarget,

  #[arg(long, value_enum, default_value = "all")]
  pub filter: FilterArg,
}

#[derive(ValueEnum, Debug, Clone, Copy)]
pub enum ListTarget {
  Rating,
  Topic,
  All,
}

#[derive(ValueEnum, Debug, Clone, Copy)]
pub enum FilterArg {
  All,
  Solved,
  Unsolved,
}

impl From<FilterArg> for SolveFilter {
  fn from(arg: FilterArg) -> Self {
    match arg {
      FilterArg::All => Self::All,
      FilterArg::Solved => Self::Solved,
      FilterArg::Unsolved => Self::Unsolved,
    }
  }
}

#[derive(Args, Debug)]
pub struct SolveArgs {
  pub id: Uuid,

  /// Mark unsolved instead.
  #[arg(long)]
  pub undo: bool,
}

#[derive(Args, Debug)]
pub struct EditArgs {
  pub id: Uuid,

  #[arg(long)]
  pub name: Option<String>,

  #[arg(long)]
  pub link: Option<String>,

  /// New rating (rating-based problems only).
  #[arg(long)]
  pub rating: Option<String>,

  /// New topic label (topic-based problems only).
  #[arg(long)]
  pub topic: Option<String>,

  #[arg(long)]
  pub notes: Option<String>,
}

#[derive(Args, Debug)]
pub struct MoveArgs {
  pub id: Uuid,

  /// Destination topic label (moves a rating problem into the topic list).
  #[arg(long, value_name = "TOPIC", conflicts_with = "to_rating")]
  pub to_topic: Option<String>,

  /// Destination rating (moves a topic problem into the rating list).
  #[arg(long, value_name = "RATING")]
  pub to_rating: Option<String>,
}

// ─── Study plans ─────────────────────────────────────────────────────────────

#[derive(Subcommand, Debug)]
pub enum PlanCommand {
  /// Plan a study topic.
  Add {
    topic: String,

    #[arg(long, value_name = "YYYY-MM-DD", default_value = "")]
    start: String,

    #[arg(long, value_name = "YYYY-MM-DD", default_value = "")]
    end: String,

    /// Resource link, `URL` or `URL|description`. Repeatable, max 10.
    #[arg(long = "resource", value_name = "URL[|DESC]")]
    resources: Vec<String>,
  },

  /// List study topics in schedule order.
  List,

  /// Set a topic's status (not-started, in-progress, completed).
  Status {
    id:     Uuid,
    status: StudyStatus,
  },

  /// Delete a study topic.
  Rm {
    id: Uuid,
  },
}

// ─── Upsolve ─────────────────────────────────────────────────────────────────

#[derive(Subcommand, Debug)]
pub enum UpsolveCommand {
  /// Record a problem or contest to upsolve.
  Add(UpsolveAddArgs),

  /// List upsolve entries, most recent first.
  List {
    #[arg(long, value_enum, default_value = "all")]
    filter: FilterArg,
  },

  /// Mark an entry solved, or one contest problem with --index.
  Solve {
    id: Uuid,

    /// Zero-based position of a contest problem within the entry.
    #[arg(long)]
    index: Option<usize>,

    #[arg(long)]
    undo: bool,
  },

  /// Delete an upsolve entry.
  Rm {
    id: Uuid,
  },
}

#[derive(Args, Debug)]
pub struct UpsolveAddArgs {
  pub name: String,
  pub link: String,

  /// Why it's on the list ("used editorial", ...).
  #[arg(long, default_value = "")]
  pub reason: String,

  /// Attempt date, YYYY-MM-DD.
  #[arg(long, default_value = "")]
  pub date: String,

  /// Record a whole contest instead of a single problem.
  #[arg(long)]
  pub contest: bool,

  /// Contest platform (Codeforces, AtCoder, CodeChef, VJudge, Other).
  #[arg(long, default_value = "", requires = "contest")]
  pub platform: Platform,

  /// Contest problem, `LINK` or `NAME=LINK`. Repeatable.
  #[arg(long = "problem", value_name = "NAME=LINK", requires = "contest")]
  pub problems: Vec<String>,
}
