//! Command execution: load the document, apply the mutation, save, render.
//!
//! Every command runs load → mutate → save synchronously; views are always
//! recomputed from the document that was just persisted.

use std::{fs, path::PathBuf};

use anyhow::{Context as _, bail};
use grind_core::{
  calendar::month_calendar,
  document::Document,
  mutate::{
    NewRatingProblem, NewStudyTopic, NewTopicProblem, NewUpsolve,
    RatingProblemPatch, TopicProblemPatch,
  },
  record::{ContestProblem, Resource, StudyStatus, UpsolveKind},
  schema,
  store::DocumentStore,
  views,
};
use grind_store_json::JsonStore;
use uuid::Uuid;

use crate::{
  commands::{
    AddArgs, Command, EditArgs, ListArgs, ListTarget, MoveArgs, PlanCommand,
    SolveArgs, UpsolveAddArgs, UpsolveCommand,
  },
  render,
};

pub struct App {
  store: JsonStore,
}

impl App {
  pub fn new(store: JsonStore) -> Self { Self { store } }

  pub fn run(&self, command: Command) -> anyhow::Result<()> {
    match command {
      Command::Add(args) => self.add(args),
      Command::List(args) => self.list(args),
      Command::Solve(args) => self.solve(args),
      Command::Edit(args) => self.edit(args),
      Command::Rm { id } => self.remove(id),
      Command::Move(args) => self.move_problem(args),
      Command::Plan(cmd) => self.plan(cmd),
      Command::Upsolve(cmd) => self.upsolve(cmd),
      Command::Calendar { month } => self.calendar(month),
      Command::Stats => self.stats(),
      Command::Analytics => self.analytics(),
      Command::Search { query } => self.search(&query),
      Command::Export { out } => self.export(out),
      Command::Import { file } => self.import(file),
      Command::Theme { color } => self.theme(color),
    }
  }

  // ── Problems ──────────────────────────────────────────────────────────

  fn add(&self, args: AddArgs) -> anyhow::Result<()> {
    let mut doc = self.store.load();
    let id = match args.topic {
      Some(topic) => {
        doc
          .add_topic_problem(NewTopicProblem {
            name: args.name,
            link: args.link,
            topic,
            notes: args.notes,
          })?
          .id
      }
      None => {
        doc
          .add_rating_problem(NewRatingProblem {
            name:   args.name,
            link:   args.link,
            rating: args.rating,
            notes:  args.notes,
          })?
          .id
      }
    };
    self.store.save(&doc)?;
    println!("added {id}");
    Ok(())
  }

  fn list(&self, args: ListArgs) -> anyhow::Result<()> {
    let doc = self.store.load();
    let filter = args.filter.into();
    match args.what {
      ListTarget::Rating => render::rating_list(&doc, filter),
      ListTarget::Topic => render::topic_list(&doc, filter),
      ListTarget::All => {
        render::rating_list(&doc, filter);
        render::topic_list(&doc, filter);
      }
    }
    Ok(())
  }

  fn solve(&self, args: SolveArgs) -> anyhow::Result<()> {
    let mut doc = self.store.load();
    let solved = !args.undo;
    // Ids are unique across collections; try each in turn.
    let touched = doc.set_rating_solved(args.id, solved)
      || doc.set_topic_solved(args.id, solved)
      || doc.set_upsolve_solved(args.id, solved);
    if !touched {
      println!("no record with id {}", args.id);
      return Ok(());
    }
    self.store.save(&doc)?;
    println!("{} {}", if solved { "solved" } else { "unsolved" }, args.id);
    Ok(())
  }

  fn edit(&self, args: EditArgs) -> anyhow::Result<()> {
    let mut doc = self.store.load();
    let touched = if doc.rating_problem(args.id).is_some() {
      doc.update_rating_problem(args.id, RatingProblemPatch {
        name:   args.name,
        link:   args.link,
        rating: args.rating,
        notes:  args.notes,
      })?
    } else {
      doc.update_topic_problem(args.id, TopicProblemPatch {
        name:  args.name,
        link:  args.link,
        topic: args.topic,
        notes: args.notes,
      })?
    };
    if !touched {
      println!("no problem with id {}", args.id);
      return Ok(());
    }
    self.store.save(&doc)?;
    println!("updated {}", args.id);
    Ok(())
  }

  fn remove(&self, id: Uuid) -> anyhow::Result<()> {
    let mut doc = self.store.load();
    let touched = doc.remove_rating_problem(id)
      || doc.remove_topic_problem(id)
      || doc.remove_study_topic(id)
      || doc.remove_upsolve(id);
    if !touched {
      println!("no record with id {id}");
      return Ok(());
    }
    self.store.save(&doc)?;
    println!("removed {id}");
    Ok(())
  }

  fn move_problem(&self, args: MoveArgs) -> anyhow::Result<()> {
    let mut doc = self.store.load();
    let new_id = match (args.to_topic, args.to_rating) {
      (Some(topic), None) => doc.move_to_topic(args.id, topic),
      (None, Some(rating)) => {
        let rating = (!rating.trim().is_empty()).then_some(rating);
        doc.move_to_rating(args.id, rating)
      }
      _ => bail!("pass exactly one of --to-topic or --to-rating"),
    };
    let Some(new_id) = new_id else {
      println!("no problem with id {} in the source category", args.id);
      return Ok(());
    };
    self.store.save(&doc)?;
    println!("moved {} -> {new_id}", args.id);
    Ok(())
  }

  // ── Study plans ───────────────────────────────────────────────────────

  fn plan(&self, cmd: PlanCommand) -> anyhow::Result<()> {
    match cmd {
      PlanCommand::Add {
        topic,
        start,
        end,
        resources,
      } => {
        let mut doc = self.store.load();
        let id = doc
          .add_study_topic(NewStudyTopic {
            topic,
            start_date: start,
            end_date: end,
            status: StudyStatus::NotStarted,
            resources: resources.iter().map(|s| parse_resource(s)).collect(),
          })?
          .id;
        self.store.save(&doc)?;
        println!("added {id}");
      }
      PlanCommand::List => {
        let doc = self.store.load();
        render::plan_list(&doc);
      }
      PlanCommand::Status { id, status } => {
        let mut doc = self.store.load();
        if !doc.set_study_status(id, status) {
          println!("no study topic with id {id}");
          return Ok(());
        }
        self.store.save(&doc)?;
        println!("{id} is now {status}");
      }
      PlanCommand::Rm { id } => {
        let mut doc = self.store.load();
        if !doc.remove_study_topic(id) {
          println!("no study topic with id {id}");
          return Ok(());
        }
        self.store.save(&doc)?;
        println!("removed {id}");
      }
    }
    Ok(())
  }

  // ── Upsolve ───────────────────────────────────────────────────────────

  fn upsolve(&self, cmd: UpsolveCommand) -> anyhow::Result<()> {
    match cmd {
      UpsolveCommand::Add(args) => self.upsolve_add(args)?,
      UpsolveCommand::List { filter } => {
        let doc = self.store.load();
        render::upsolve_list(&doc, filter.into());
      }
      UpsolveCommand::Solve { id, index, undo } => {
        let mut doc = self.store.load();
        let solved = !undo;
        let touched = match index {
          Some(index) => doc.set_contest_problem_solved(id, index, solved),
          None => doc.set_upsolve_solved(id, solved),
        };
        if !touched {
          println!("nothing to toggle at {id}{}", match index {
            Some(i) => format!("[{i}]"),
            None => String::new(),
          });
          return Ok(());
        }
        self.store.save(&doc)?;
        println!("{} {id}", if solved { "solved" } else { "unsolved" });
      }
      UpsolveCommand::Rm { id } => {
        let mut doc = self.store.load();
        if !doc.remove_upsolve(id) {
          println!("no upsolve entry with id {id}");
          return Ok(());
        }
        self.store.save(&doc)?;
        println!("removed {id}");
      }
    }
    Ok(())
  }

  fn upsolve_add(&self, args: UpsolveAddArgs) -> anyhow::Result<()> {
    let kind = if args.contest {
      UpsolveKind::Contest {
        platform: args.platform,
        problems: args.problems.iter().map(|s| parse_contest_problem(s)).collect(),
      }
    } else {
      UpsolveKind::Problem
    };
    let mut doc = self.store.load();
    let id = doc
      .add_upsolve(NewUpsolve {
        name: args.name,
        link: args.link,
        reason: args.reason,
        date: args.date,
        kind,
      })?
      .id;
    self.store.save(&doc)?;
    println!("added {id}");
    Ok(())
  }

  // ── Read-only views ───────────────────────────────────────────────────

  fn calendar(&self, month: Option<String>) -> anyhow::Result<()> {
    let (year, month) = match month {
      Some(spec) => parse_month(&spec)?,
      None => {
        let today = chrono::Local::now().date_naive();
        use chrono::Datelike as _;
        (today.year(), today.month())
      }
    };
    let doc = self.store.load();
    render::calendar(&month_calendar(&doc, year, month));
    Ok(())
  }

  fn stats(&self) -> anyhow::Result<()> {
    let doc = self.store.load();
    render::stats(&views::dashboard(&doc));
    Ok(())
  }

  fn analytics(&self) -> anyhow::Result<()> {
    let doc = self.store.load();
    render::analytics(&views::analytics(&doc));
    Ok(())
  }

  fn search(&self, query: &str) -> anyhow::Result<()> {
    let doc = self.store.load();
    render::search_results(&views::search(&doc, query));
    Ok(())
  }

  // ── Backup ────────────────────────────────────────────────────────────

  fn export(&self, out: Option<PathBuf>) -> anyhow::Result<()> {
    let out = out.unwrap_or_else(|| PathBuf::from("grind-backup.json"));
    let doc = self.store.load();
    let json = schema::export_document(&doc)?;
    fs::write(&out, json)
      .with_context(|| format!("failed to write {}", out.display()))?;
    println!("exported to {}", out.display());
    Ok(())
  }

  fn import(&self, file: PathBuf) -> anyhow::Result<()> {
    let raw = fs::read_to_string(&file)
      .with_context(|| format!("failed to read {}", file.display()))?;
    // Parse the whole file before anything is replaced; a bad backup must
    // leave the current document alone.
    let doc: Document = schema::parse_document(&raw)
      .with_context(|| format!("{} is not a valid backup", file.display()))?;
    self.store.save(&doc)?;
    println!(
      "imported {} problems, {} study topics, {} upsolve entries",
      doc.rating_problems.len() + doc.topic_problems.len(),
      doc.study_topics.len(),
      doc.upsolve.len(),
    );
    Ok(())
  }

  fn theme(&self, color: Option<String>) -> anyhow::Result<()> {
    match color {
      Some(color) => {
        self.store.save_accent(&color)?;
        println!("accent set to {}", self.store.load_accent().unwrap_or(color));
      }
      None => match self.store.load_accent() {
        Some(current) => println!("{current}"),
        None => println!("(unset)"),
      },
    }
    Ok(())
  }
}

// ─── Argument parsing helpers ────────────────────────────────────────────────

/// `URL` or `URL|description`.
fn parse_resource(spec: &str) -> Resource {
  match spec.split_once('|') {
    Some((url, desc)) => Resource {
      url:  url.trim().to_string(),
      desc: desc.trim().to_string(),
    },
    None => Resource {
      url:  spec.trim().to_string(),
      desc: String::new(),
    },
  }
}

/// `LINK` or `NAME=LINK`.
fn parse_contest_problem(spec: &str) -> ContestProblem {
  match spec.split_once('=') {
    Some((name, link)) => ContestProblem {
      name:   name.trim().to_string(),
      link:   link.trim().to_string(),
      solved: false,
    },
    None => ContestProblem {
      name:   String::new(),
      link:   spec.trim().to_string(),
      solved: false,
    },
  }
}

/// `YYYY-MM` → (year, month).
fn parse_month(spec: &str) -> anyhow::Result<(i32, u32)> {
  let Some((y, m)) = spec.split_once('-') else {
    bail!("expected YYYY-MM, got {spec:?}");
  };
  let year: i32 = y.parse().with_context(|| format!("bad year in {spec:?}"))?;
  let month: u32 = m.parse().with_context(|| format!("bad month in {spec:?}"))?;
  if !(1..=12).contains(&month) {
    bail!("month out of range in {spec:?}");
  }
  Ok((year, month))
}
