//! Plain-text rendering of the derived views.
//!
//! Only consumes the data structures from `grind_core::views` and
//! `grind_core::calendar`; nothing here reaches back into the document
//! beyond iterating its collections for listings.

use grind_core::{
  calendar::{DayEntryKind, MonthCalendar},
  document::Document,
  record::{StudyTopic, UpsolveEntry},
  views::{
    self, AnalyticsReport, DashboardStats, SearchHit, SolveFilter,
  },
};

fn checkbox(solved: bool) -> &'static str {
  if solved { "[x]" } else { "[ ]" }
}

// ─── Problem listings ─────────────────────────────────────────────────────────

pub fn rating_list(doc: &Document, filter: SolveFilter) {
  let buckets = views::rating_buckets(&doc.rating_problems);
  if buckets.is_empty() {
    println!("no rating problems yet");
    return;
  }
  for (bucket, problems) in buckets {
    let visible: Vec<_> =
      problems.iter().filter(|p| filter.matches(p.solved)).collect();
    if visible.is_empty() {
      continue;
    }
    println!("{}", bucket.label());
    for p in visible {
      println!(
        "  {} {}  {}  ({})",
        checkbox(p.solved),
        if p.name.is_empty() { "Untitled" } else { &p.name },
        p.link,
        p.id
      );
    }
  }
}

pub fn topic_list(doc: &Document, filter: SolveFilter) {
  let groups = views::topic_groups(&doc.topic_problems);
  if groups.is_empty() {
    println!("no topic problems yet");
    return;
  }
  for (topic, problems) in groups {
    let visible: Vec<_> =
      problems.iter().filter(|p| filter.matches(p.solved)).collect();
    if visible.is_empty() {
      continue;
    }
    println!("{topic}");
    for p in visible {
      println!(
        "  {} {}  {}  ({})",
        checkbox(p.solved),
        if p.name.is_empty() { "Untitled" } else { &p.name },
        p.link,
        p.id
      );
    }
  }
}

// ─── Study plans ──────────────────────────────────────────────────────────────

pub fn plan_list(doc: &Document) {
  let schedule = views::study_schedule(&doc.study_topics);
  if schedule.is_empty() {
    println!("no study topics planned");
    return;
  }
  for topic in schedule {
    print_study_topic(topic);
  }
}

fn print_study_topic(t: &StudyTopic) {
  let start = if t.start_date.is_empty() { "?" } else { &t.start_date };
  let end = if t.end_date.is_empty() { "?" } else { &t.end_date };
  println!("{}  {} -> {}  [{}]  ({})", t.topic, start, end, t.status, t.id);
  for r in &t.resources {
    if r.desc.is_empty() {
      println!("    - {}", r.url);
    } else {
      println!("    - {} ({})", r.desc, r.url);
    }
  }
}

// ─── Upsolve ──────────────────────────────────────────────────────────────────

pub fn upsolve_list(doc: &Document, filter: SolveFilter) {
  let entries: Vec<&UpsolveEntry> = views::upsolve_recent(&doc.upsolve)
    .into_iter()
    .filter(|u| filter.matches(u.solved))
    .collect();
  if entries.is_empty() {
    println!("no upsolve entries");
    return;
  }
  for u in entries {
    let tag = if u.is_contest() { "contest" } else { "problem" };
    let date = if u.date.is_empty() { "undated" } else { &u.date };
    println!(
      "{} {}  [{tag}]  {}  {}  ({})",
      checkbox(u.solved),
      u.name,
      date,
      u.link,
      u.id
    );
    if !u.reason.is_empty() {
      println!("    reason: {}", u.reason);
    }
    for (i, p) in u.contest_problems().iter().enumerate() {
      println!(
        "    [{i}] {} {}  {}",
        checkbox(p.solved),
        if p.name.is_empty() { &p.link } else { &p.name },
        p.link
      );
    }
  }
}

// ─── Dashboard and analytics ──────────────────────────────────────────────────

pub fn stats(stats: &DashboardStats) {
  println!("overall   {}", stats.overall);
  println!("rating    {}", stats.rating);
  println!("topic     {}", stats.topic);
  println!("upsolve   {}", stats.upsolve);
  println!(
    "study     {}/{} completed",
    stats.study_completed, stats.study_total
  );
}

pub fn analytics(report: &AnalyticsReport) {
  println!("rating buckets");
  if report.rating.is_empty() {
    println!("  (no rating problems)");
  }
  for b in &report.rating {
    println!("  {:<12} {}", b.label, b.counts);
  }

  println!("topics");
  if report.topics.is_empty() {
    println!("  (no topic problems)");
  }
  for b in &report.topics {
    println!("  {:<12} {}", b.label, b.counts);
  }

  println!("contests");
  if report.contests.is_empty() {
    println!("  (no contests)");
  }
  for c in &report.contests {
    let platform = if c.platform.to_string().is_empty() {
      String::new()
    } else {
      format!(" [{}]", c.platform)
    };
    println!("  {}{platform}  {}", c.name, c.problems);
  }

  println!("study topics");
  if report.study.is_empty() {
    println!("  (no study topics)");
  }
  for s in &report.study {
    println!("  {:<20} {}", s.topic, s.status);
  }
}

// ─── Calendar ─────────────────────────────────────────────────────────────────

pub fn calendar(cal: &MonthCalendar) {
  println!("{}-{:02}", cal.year, cal.month);
  let mut any = false;
  for (i, entries) in cal.days.iter().enumerate() {
    if entries.is_empty() {
      continue;
    }
    any = true;
    println!("  {:>2}", i + 1);
    for e in entries {
      let tag = match e.kind {
        DayEntryKind::Study => "study",
        DayEntryKind::UpsolveProblem => "problem",
        DayEntryKind::UpsolveContest => "contest",
      };
      println!("      [{tag}] {}", e.label);
    }
  }
  if !any {
    println!("  (nothing scheduled)");
  }
}

// ─── Search ───────────────────────────────────────────────────────────────────

pub fn search_results(hits: &[SearchHit]) {
  if hits.is_empty() {
    println!("no matches");
    return;
  }
  for hit in hits {
    let link = hit.link.as_deref().unwrap_or("-");
    println!("[{}] {}  {}  ({})", hit.collection, hit.name, link, hit.id);
  }
}
