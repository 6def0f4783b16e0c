//! Pure view projections over a [`Document`].
//!
//! Everything here recomputes from the document on every call — record counts
//! are small, so nothing is cached or stored.

use std::{collections::BTreeMap, fmt};

use uuid::Uuid;

use crate::{
  document::Document,
  record::{Platform, RatingProblem, StudyStatus, StudyTopic, TopicProblem, UpsolveEntry},
};

// ─── Aggregates ──────────────────────────────────────────────────────────────

/// Solved/total counts with a derived percentage.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Aggregate {
  pub solved: usize,
  pub total:  usize,
}

impl Aggregate {
  /// Count an iterator of solved flags.
  pub fn tally(flags: impl IntoIterator<Item = bool>) -> Self {
    let mut agg = Self::default();
    for solved in flags {
      agg.total += 1;
      if solved {
        agg.solved += 1;
      }
    }
    agg
  }

  /// Rounded percentage; 0 when the total is 0.
  pub fn pct(&self) -> u32 {
    if self.total == 0 {
      return 0;
    }
    (100.0 * self.solved as f64 / self.total as f64).round() as u32
  }
}

impl fmt::Display for Aggregate {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    write!(f, "{}/{} solved ({}%)", self.solved, self.total, self.pct())
  }
}

/// The dashboard numbers: per-collection aggregates plus a grand total over
/// the three problem collections. Study topics count completions, not solves.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DashboardStats {
  pub overall:         Aggregate,
  pub rating:          Aggregate,
  pub topic:           Aggregate,
  pub upsolve:         Aggregate,
  pub study_completed: usize,
  pub study_total:     usize,
}

pub fn dashboard(doc: &Document) -> DashboardStats {
  let rating = Aggregate::tally(doc.rating_problems.iter().map(|p| p.solved));
  let topic = Aggregate::tally(doc.topic_problems.iter().map(|p| p.solved));
  let upsolve = Aggregate::tally(doc.upsolve.iter().map(|u| u.solved));
  DashboardStats {
    overall: Aggregate {
      solved: rating.solved + topic.solved + upsolve.solved,
      total:  rating.total + topic.total + upsolve.total,
    },
    rating,
    topic,
    upsolve,
    study_completed: doc
      .study_topics
      .iter()
      .filter(|t| t.status == StudyStatus::Completed)
      .count(),
    study_total: doc.study_topics.len(),
  }
}

// ─── Rating buckets ──────────────────────────────────────────────────────────

/// A 200-point rating band, or the distinguished Unrated bucket.
///
/// The derived `Ord` sorts bands numerically ascending with `Unrated` last —
/// the display order. (The original sorted bucket labels lexically, which
/// only worked because in-range bucket starts share a magnitude.)
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum RatingBucket {
  /// Half-open band starting here: `start..start+200`.
  Band(i64),
  Unrated,
}

impl RatingBucket {
  pub fn of(problem: &RatingProblem) -> Self {
    match problem.rating_value() {
      // div_euclid keeps negative ratings in the band below zero.
      Some(r) => Self::Band(r.div_euclid(200) * 200),
      None => Self::Unrated,
    }
  }

  pub fn label(&self) -> String {
    match self {
      Self::Band(start) => format!("{start}-{}", start + 200),
      Self::Unrated => "Unrated".to_string(),
    }
  }
}

/// Group rating problems into ordered buckets. Insertion order is preserved
/// within each bucket.
pub fn rating_buckets(
  problems: &[RatingProblem],
) -> Vec<(RatingBucket, Vec<&RatingProblem>)> {
  let mut buckets: BTreeMap<RatingBucket, Vec<&RatingProblem>> = BTreeMap::new();
  for p in problems {
    buckets.entry(RatingBucket::of(p)).or_default().push(p);
  }
  buckets.into_iter().collect()
}

// ─── Topic groups ────────────────────────────────────────────────────────────

/// Group key for a topic problem: the trimmed label, `"General"` when blank.
pub fn topic_key(problem: &TopicProblem) -> String {
  let t = problem.topic.trim();
  if t.is_empty() { "General".to_string() } else { t.to_string() }
}

/// Group topic problems by label, ordered lexically by key.
pub fn topic_groups(
  problems: &[TopicProblem],
) -> Vec<(String, Vec<&TopicProblem>)> {
  let mut groups: BTreeMap<String, Vec<&TopicProblem>> = BTreeMap::new();
  for p in problems {
    groups.entry(topic_key(p)).or_default().push(p);
  }
  groups.into_iter().collect()
}

// ─── Orderings and filters ───────────────────────────────────────────────────

/// Solved-state filter applied to any solvable listing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SolveFilter {
  #[default]
  All,
  Solved,
  Unsolved,
}

impl SolveFilter {
  pub fn matches(&self, solved: bool) -> bool {
    match self {
      Self::All => true,
      Self::Solved => solved,
      Self::Unsolved => !solved,
    }
  }
}

/// Study topics in schedule order: ascending start date as a string compare,
/// so unscheduled (empty) topics sort first. Ties keep insertion order.
pub fn study_schedule(topics: &[StudyTopic]) -> Vec<&StudyTopic> {
  let mut out: Vec<&StudyTopic> = topics.iter().collect();
  out.sort_by(|a, b| a.start_date.cmp(&b.start_date));
  out
}

/// Upsolve entries most-recent-first by attempt date (string compare; undated
/// entries sort last).
pub fn upsolve_recent(entries: &[UpsolveEntry]) -> Vec<&UpsolveEntry> {
  let mut out: Vec<&UpsolveEntry> = entries.iter().collect();
  out.sort_by(|a, b| b.date.cmp(&a.date));
  out
}

// ─── Analytics ───────────────────────────────────────────────────────────────

/// Solved/total for one display bucket (rating band or topic group).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BucketStat {
  pub label:  String,
  pub counts: Aggregate,
}

/// Per-contest solved/total over the nested problem list, plus the
/// entry-level solved flag.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ContestStat {
  pub name:     String,
  pub platform: Platform,
  pub problems: Aggregate,
  pub solved:   bool,
}

/// One line of the study-topic status list.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StudyStat {
  pub topic:  String,
  pub status: StudyStatus,
}

/// Read-only analytics report composed from the other projections.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AnalyticsReport {
  pub rating:   Vec<BucketStat>,
  pub topics:   Vec<BucketStat>,
  pub contests: Vec<ContestStat>,
  pub study:    Vec<StudyStat>,
}

pub fn analytics(doc: &Document) -> AnalyticsReport {
  let rating = rating_buckets(&doc.rating_problems)
    .into_iter()
    .map(|(bucket, problems)| BucketStat {
      label:  bucket.label(),
      counts: Aggregate::tally(problems.iter().map(|p| p.solved)),
    })
    .collect();

  let topics = topic_groups(&doc.topic_problems)
    .into_iter()
    .map(|(label, problems)| BucketStat {
      label,
      counts: Aggregate::tally(problems.iter().map(|p| p.solved)),
    })
    .collect();

  let contests = doc
    .upsolve
    .iter()
    .filter(|u| u.is_contest())
    .map(|u| ContestStat {
      name:     u.name.clone(),
      platform: match u.kind {
        crate::record::UpsolveKind::Contest { platform, .. } => platform,
        crate::record::UpsolveKind::Problem => Platform::Unspecified,
      },
      problems: Aggregate::tally(u.contest_problems().iter().map(|p| p.solved)),
      solved:   u.solved,
    })
    .collect();

  let study = doc
    .study_topics
    .iter()
    .map(|t| StudyStat {
      topic:  t.topic.clone(),
      status: t.status,
    })
    .collect();

  AnalyticsReport {
    rating,
    topics,
    contests,
    study,
  }
}

// ─── Search ──────────────────────────────────────────────────────────────────

/// Which collection a search hit came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Collection {
  Rating,
  Topic,
  Study,
  Upsolve,
}

impl fmt::Display for Collection {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    let s = match self {
      Self::Rating => "rating",
      Self::Topic => "topic",
      Self::Study => "study",
      Self::Upsolve => "upsolve",
    };
    f.write_str(s)
  }
}

/// One search result, tagged with its source collection.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchHit {
  pub collection: Collection,
  pub id:         Uuid,
  pub name:       String,
  pub link:       Option<String>,
}

/// Case-insensitive substring search over display names (the topic label for
/// study topics). A blank query means "search inactive" and yields nothing.
pub fn search(doc: &Document, query: &str) -> Vec<SearchHit> {
  let query = query.trim().to_lowercase();
  if query.is_empty() {
    return Vec::new();
  }
  let matches = |name: &str| name.to_lowercase().contains(&query);

  let mut hits = Vec::new();
  for p in &doc.rating_problems {
    if matches(&p.name) {
      hits.push(SearchHit {
        collection: Collection::Rating,
        id:         p.id,
        name:       p.name.clone(),
        link:       Some(p.link.clone()),
      });
    }
  }
  for p in &doc.topic_problems {
    if matches(&p.name) {
      hits.push(SearchHit {
        collection: Collection::Topic,
        id:         p.id,
        name:       p.name.clone(),
        link:       Some(p.link.clone()),
      });
    }
  }
  for t in &doc.study_topics {
    if matches(&t.topic) {
      hits.push(SearchHit {
        collection: Collection::Study,
        id:         t.id,
        name:       t.topic.clone(),
        link:       None,
      });
    }
  }
  for u in &doc.upsolve {
    if matches(&u.name) {
      hits.push(SearchHit {
        collection: Collection::Upsolve,
        id:         u.id,
        name:       u.name.clone(),
        link:       Some(u.link.clone()),
      });
    }
  }
  hits
}

#[cfg(test)]
mod tests {
  use super::*;
  use crate::mutate::{NewRatingProblem, NewStudyTopic, NewTopicProblem, NewUpsolve};

  fn add_rating(doc: &mut Document, rating: Option<&str>) -> Uuid {
    doc
      .add_rating_problem(NewRatingProblem {
        name:   format!("p{}", doc.rating_problems.len()),
        link:   "https://x".into(),
        rating: rating.map(Into::into),
        notes:  String::new(),
      })
      .unwrap()
      .id
  }

  #[test]
  fn empty_aggregate_has_zero_pct() {
    assert_eq!(Aggregate::default().pct(), 0);
  }

  #[test]
  fn dashboard_counts_follow_the_scenario() {
    let mut doc = Document::default();
    let id = doc
      .add_rating_problem(NewRatingProblem {
        name:   "A".into(),
        link:   "http://x".into(),
        rating: Some("1500".into()),
        notes:  String::new(),
      })
      .unwrap()
      .id;

    let stats = dashboard(&doc);
    assert_eq!((stats.overall.solved, stats.overall.total), (0, 1));
    assert_eq!(stats.overall.pct(), 0);

    doc.set_rating_solved(id, true);
    let stats = dashboard(&doc);
    assert_eq!((stats.overall.solved, stats.overall.total), (1, 1));
    assert_eq!(stats.overall.pct(), 100);
  }

  #[test]
  fn rating_1350_lands_in_1200_1400() {
    assert_eq!(
      RatingBucket::Band(1200).label(),
      "1200-1400"
    );
    let mut doc = Document::default();
    add_rating(&mut doc, Some("1350"));
    let buckets = rating_buckets(&doc.rating_problems);
    assert_eq!(buckets.len(), 1);
    assert_eq!(buckets[0].0, RatingBucket::Band(1200));
  }

  #[test]
  fn non_numeric_and_absent_ratings_are_unrated() {
    let mut doc = Document::default();
    add_rating(&mut doc, Some("abc"));
    add_rating(&mut doc, None);
    let buckets = rating_buckets(&doc.rating_problems);
    assert_eq!(buckets.len(), 1);
    assert_eq!(buckets[0].0, RatingBucket::Unrated);
    assert_eq!(buckets[0].1.len(), 2);
  }

  #[test]
  fn buckets_order_numerically_with_unrated_last() {
    let mut doc = Document::default();
    add_rating(&mut doc, Some("2000"));
    add_rating(&mut doc, Some("800"));
    add_rating(&mut doc, None);
    // Lexically "1000-1200" would come before "800-1000"; numerically not.
    add_rating(&mut doc, Some("1000"));

    let order: Vec<RatingBucket> = rating_buckets(&doc.rating_problems)
      .into_iter()
      .map(|(b, _)| b)
      .collect();
    assert_eq!(order, vec![
      RatingBucket::Band(800),
      RatingBucket::Band(1000),
      RatingBucket::Band(2000),
      RatingBucket::Unrated,
    ]);
  }

  #[test]
  fn negative_ratings_bucket_below_zero() {
    assert_eq!((-50i64).div_euclid(200) * 200, -200);
    assert_eq!(RatingBucket::Band(-200).label(), "-200-0");
  }

  #[test]
  fn blank_topics_group_under_general() {
    let mut doc = Document::default();
    for topic in ["DP", "  ", "Graphs", "DP"] {
      doc
        .add_topic_problem(NewTopicProblem {
          name:  "p".into(),
          link:  "https://x".into(),
          topic: topic.into(),
          notes: String::new(),
        })
        .unwrap();
    }
    let groups = topic_groups(&doc.topic_problems);
    let keys: Vec<&str> = groups.iter().map(|(k, _)| k.as_str()).collect();
    assert_eq!(keys, vec!["DP", "General", "Graphs"]);
    assert_eq!(groups[0].1.len(), 2);
  }

  #[test]
  fn study_schedule_sorts_empty_dates_first() {
    let mut doc = Document::default();
    for (topic, start) in
      [("late", "2024-03-01"), ("unscheduled", ""), ("early", "2024-01-01")]
    {
      doc
        .add_study_topic(NewStudyTopic {
          topic: topic.into(),
          start_date: start.into(),
          ..Default::default()
        })
        .unwrap();
    }
    let order: Vec<&str> = study_schedule(&doc.study_topics)
      .iter()
      .map(|t| t.topic.as_str())
      .collect();
    assert_eq!(order, vec!["unscheduled", "early", "late"]);
  }

  #[test]
  fn contest_stats_count_nested_problems() {
    use crate::record::{ContestProblem, Platform, UpsolveKind};

    let mut doc = Document::default();
    doc
      .add_upsolve(NewUpsolve {
        name: "Round 9".into(),
        link: "https://c".into(),
        kind: UpsolveKind::Contest {
          platform: Platform::Codeforces,
          problems: vec![
            ContestProblem {
              name:   "A".into(),
              link:   "https://c/a".into(),
              solved: true,
            },
            ContestProblem {
              name:   "B".into(),
              link:   "https://c/b".into(),
              solved: false,
            },
          ],
        },
        ..Default::default()
      })
      .unwrap();
    // Single problems never show up in contest stats.
    doc
      .add_upsolve(NewUpsolve {
        name: "stray".into(),
        link: "https://p".into(),
        ..Default::default()
      })
      .unwrap();

    let report = analytics(&doc);
    assert_eq!(report.contests.len(), 1);
    let c = &report.contests[0];
    assert_eq!((c.problems.solved, c.problems.total), (1, 2));
    assert_eq!(c.problems.pct(), 50);
    assert_eq!(c.platform, Platform::Codeforces);
  }

  #[test]
  fn search_is_case_insensitive_and_tagged() {
    let mut doc = Document::default();
    add_rating(&mut doc, Some("1500"));
    doc
      .update_rating_problem(
        doc.rating_problems[0].id,
        crate::mutate::RatingProblemPatch {
          name: Some("Two Pointers Drill".into()),
          ..Default::default()
        },
      )
      .unwrap();
    doc
      .add_study_topic(NewStudyTopic {
        topic: "pointers and heaps".into(),
        ..Default::default()
      })
      .unwrap();

    let hits = search(&doc, "POINTERS");
    assert_eq!(hits.len(), 2);
    assert_eq!(hits[0].collection, Collection::Rating);
    assert_eq!(hits[1].collection, Collection::Study);
  }

  #[test]
  fn blank_query_means_search_inactive() {
    let mut doc = Document::default();
    add_rating(&mut doc, None);
    assert!(search(&doc, "   ").is_empty());
    assert!(search(&doc, "").is_empty());
  }

  #[test]
  fn solve_filter_matches() {
    assert!(SolveFilter::All.matches(true));
    assert!(SolveFilter::All.matches(false));
    assert!(SolveFilter::Solved.matches(true));
    assert!(!SolveFilter::Solved.matches(false));
    assert!(SolveFilter::Unsolved.matches(false));
  }
}
