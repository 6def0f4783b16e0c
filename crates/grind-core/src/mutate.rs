//! Mutation operations on [`Document`], plus their input types.
//!
//! Every operation validates before touching state, so a rejected call leaves
//! the document exactly as it was. Lookups by id that find nothing are silent
//! no-ops — the boolean returns report whether a record was touched, and
//! absence is never an error.

use uuid::Uuid;

use crate::{
  Error, Result,
  document::Document,
  record::{
    ContestProblem, MAX_RESOURCES, RatingProblem, Resource, StudyStatus,
    StudyTopic, TopicProblem, UpsolveEntry, UpsolveKind,
  },
};

// ─── Inputs ──────────────────────────────────────────────────────────────────

/// Input to [`Document::add_rating_problem`].
#[derive(Debug, Clone, Default)]
pub struct NewRatingProblem {
  pub name:   String,
  pub link:   String,
  pub rating: Option<String>,
  pub notes:  String,
}

/// Input to [`Document::add_topic_problem`].
#[derive(Debug, Clone, Default)]
pub struct NewTopicProblem {
  pub name:  String,
  pub link:  String,
  pub topic: String,
  pub notes: String,
}

/// Input to [`Document::add_study_topic`]. Status starts as
/// [`StudyStatus::NotStarted`] unless set explicitly.
#[derive(Debug, Clone, Default)]
pub struct NewStudyTopic {
  pub topic:      String,
  pub start_date: String,
  pub end_date:   String,
  pub status:     StudyStatus,
  pub resources:  Vec<Resource>,
}

/// Input to [`Document::add_upsolve`].
#[derive(Debug, Clone, Default)]
pub struct NewUpsolve {
  pub name:   String,
  pub link:   String,
  pub reason: String,
  pub date:   String,
  pub kind:   UpsolveKind,
}

// ─── Patches ─────────────────────────────────────────────────────────────────
//
// A `Some` field replaces the stored value; `None` leaves it alone.

#[derive(Debug, Clone, Default)]
pub struct RatingProblemPatch {
  pub name:   Option<String>,
  pub link:   Option<String>,
  pub rating: Option<String>,
  pub notes:  Option<String>,
}

#[derive(Debug, Clone, Default)]
pub struct TopicProblemPatch {
  pub name:  Option<String>,
  pub link:  Option<String>,
  pub topic: Option<String>,
  pub notes: Option<String>,
}

#[derive(Debug, Clone, Default)]
pub struct StudyTopicPatch {
  pub topic:      Option<String>,
  pub start_date: Option<String>,
  pub end_date:   Option<String>,
  pub status:     Option<StudyStatus>,
  pub resources:  Option<Vec<Resource>>,
}

#[derive(Debug, Clone, Default)]
pub struct UpsolvePatch {
  pub name:   Option<String>,
  pub link:   Option<String>,
  pub reason: Option<String>,
  pub date:   Option<String>,
  pub kind:   Option<UpsolveKind>,
}

// ─── Validation helpers ──────────────────────────────────────────────────────

fn require(value: &str, field: &'static str) -> Result<()> {
  if value.trim().is_empty() {
    return Err(Error::MissingField(field));
  }
  Ok(())
}

/// Drop resources with a blank URL, then enforce the per-topic cap.
fn sanitize_resources(mut resources: Vec<Resource>) -> Result<Vec<Resource>> {
  resources.retain(|r| !r.url.trim().is_empty());
  if resources.len() > MAX_RESOURCES {
    return Err(Error::TooManyResources(resources.len()));
  }
  Ok(resources)
}

/// Drop contest sub-problems with a blank link. Single problems carry none.
fn sanitize_kind(kind: UpsolveKind) -> UpsolveKind {
  match kind {
    UpsolveKind::Problem => UpsolveKind::Problem,
    UpsolveKind::Contest {
      platform,
      mut problems,
    } => {
      problems.retain(|p: &ContestProblem| !p.link.trim().is_empty());
      UpsolveKind::Contest { platform, problems }
    }
  }
}

// ─── Mutations ───────────────────────────────────────────────────────────────

impl Document {
  // ── Adds ──────────────────────────────────────────────────────────────

  /// Append a rating problem with a fresh id and return it.
  pub fn add_rating_problem(
    &mut self,
    new: NewRatingProblem,
  ) -> Result<&RatingProblem> {
    require(&new.link, "link")?;
    let idx = self.rating_problems.len();
    self.rating_problems.push(RatingProblem {
      id:     Uuid::new_v4(),
      name:   new.name,
      link:   new.link,
      rating: new.rating,
      notes:  new.notes,
      solved: false,
    });
    Ok(&self.rating_problems[idx])
  }

  /// Append a topic problem with a fresh id and return it.
  pub fn add_topic_problem(
    &mut self,
    new: NewTopicProblem,
  ) -> Result<&TopicProblem> {
    require(&new.link, "link")?;
    let idx = self.topic_problems.len();
    self.topic_problems.push(TopicProblem {
      id:     Uuid::new_v4(),
      name:   new.name,
      link:   new.link,
      topic:  new.topic,
      notes:  new.notes,
      solved: false,
    });
    Ok(&self.topic_problems[idx])
  }

  /// Append a study topic with a fresh id and return it.
  pub fn add_study_topic(&mut self, new: NewStudyTopic) -> Result<&StudyTopic> {
    require(&new.topic, "topic")?;
    let resources = sanitize_resources(new.resources)?;
    let idx = self.study_topics.len();
    self.study_topics.push(StudyTopic {
      id: Uuid::new_v4(),
      topic: new.topic,
      start_date: new.start_date,
      end_date: new.end_date,
      status: new.status,
      resources,
    });
    Ok(&self.study_topics[idx])
  }

  /// Append an upsolve entry with a fresh id and return it.
  pub fn add_upsolve(&mut self, new: NewUpsolve) -> Result<&UpsolveEntry> {
    require(&new.name, "name")?;
    require(&new.link, "link")?;
    let idx = self.upsolve.len();
    self.upsolve.push(UpsolveEntry {
      id:     Uuid::new_v4(),
      name:   new.name,
      link:   new.link,
      reason: new.reason,
      date:   new.date,
      solved: false,
      kind:   sanitize_kind(new.kind),
    });
    Ok(&self.upsolve[idx])
  }

  // ── Updates ───────────────────────────────────────────────────────────

  pub fn update_rating_problem(
    &mut self,
    id: Uuid,
    patch: RatingProblemPatch,
  ) -> Result<bool> {
    if let Some(link) = &patch.link {
      require(link, "link")?;
    }
    let Some(p) = self.rating_problem_mut(id) else {
      return Ok(false);
    };
    if let Some(name) = patch.name {
      p.name = name;
    }
    if let Some(link) = patch.link {
      p.link = link;
    }
    if let Some(rating) = patch.rating {
      p.rating = (!rating.trim().is_empty()).then_some(rating);
    }
    if let Some(notes) = patch.notes {
      p.notes = notes;
    }
    Ok(true)
  }

  pub fn update_topic_problem(
    &mut self,
    id: Uuid,
    patch: TopicProblemPatch,
  ) -> Result<bool> {
    if let Some(link) = &patch.link {
      require(link, "link")?;
    }
    let Some(p) = self.topic_problem_mut(id) else {
      return Ok(false);
    };
    if let Some(name) = patch.name {
      p.name = name;
    }
    if let Some(link) = patch.link {
      p.link = link;
    }
    if let Some(topic) = patch.topic {
      p.topic = topic;
    }
    if let Some(notes) = patch.notes {
      p.notes = notes;
    }
    Ok(true)
  }

  pub fn update_study_topic(
    &mut self,
    id: Uuid,
    patch: StudyTopicPatch,
  ) -> Result<bool> {
    if let Some(topic) = &patch.topic {
      require(topic, "topic")?;
    }
    let resources = patch.resources.map(sanitize_resources).transpose()?;
    let Some(t) = self.study_topic_mut(id) else {
      return Ok(false);
    };
    if let Some(topic) = patch.topic {
      t.topic = topic;
    }
    if let Some(start) = patch.start_date {
      t.start_date = start;
    }
    if let Some(end) = patch.end_date {
      t.end_date = end;
    }
    if let Some(status) = patch.status {
      t.status = status;
    }
    if let Some(resources) = resources {
      t.resources = resources;
    }
    Ok(true)
  }

  pub fn update_upsolve(&mut self, id: Uuid, patch: UpsolvePatch) -> Result<bool> {
    if let Some(name) = &patch.name {
      require(name, "name")?;
    }
    if let Some(link) = &patch.link {
      require(link, "link")?;
    }
    let Some(u) = self.upsolve_entry_mut(id) else {
      return Ok(false);
    };
    if let Some(name) = patch.name {
      u.name = name;
    }
    if let Some(link) = patch.link {
      u.link = link;
    }
    if let Some(reason) = patch.reason {
      u.reason = reason;
    }
    if let Some(date) = patch.date {
      u.date = date;
    }
    if let Some(kind) = patch.kind {
      u.kind = sanitize_kind(kind);
    }
    Ok(true)
  }

  // ── Removals ──────────────────────────────────────────────────────────

  pub fn remove_rating_problem(&mut self, id: Uuid) -> bool {
    let before = self.rating_problems.len();
    self.rating_problems.retain(|p| p.id != id);
    self.rating_problems.len() != before
  }

  pub fn remove_topic_problem(&mut self, id: Uuid) -> bool {
    let before = self.topic_problems.len();
    self.topic_problems.retain(|p| p.id != id);
    self.topic_problems.len() != before
  }

  pub fn remove_study_topic(&mut self, id: Uuid) -> bool {
    let before = self.study_topics.len();
    self.study_topics.retain(|t| t.id != id);
    self.study_topics.len() != before
  }

  pub fn remove_upsolve(&mut self, id: Uuid) -> bool {
    let before = self.upsolve.len();
    self.upsolve.retain(|u| u.id != id);
    self.upsolve.len() != before
  }

  // ── Flags and status ──────────────────────────────────────────────────

  pub fn set_rating_solved(&mut self, id: Uuid, solved: bool) -> bool {
    match self.rating_problem_mut(id) {
      Some(p) => {
        p.solved = solved;
        true
      }
      None => false,
    }
  }

  pub fn set_topic_solved(&mut self, id: Uuid, solved: bool) -> bool {
    match self.topic_problem_mut(id) {
      Some(p) => {
        p.solved = solved;
        true
      }
      None => false,
    }
  }

  pub fn set_upsolve_solved(&mut self, id: Uuid, solved: bool) -> bool {
    match self.upsolve_entry_mut(id) {
      Some(u) => {
        u.solved = solved;
        true
      }
      None => false,
    }
  }

  /// Flip the solved flag on a nested contest problem, addressed by
  /// `(parent_id, index)`. No-op when the parent is missing, is a single
  /// problem, or the index is out of bounds.
  pub fn set_contest_problem_solved(
    &mut self,
    parent_id: Uuid,
    index: usize,
    solved: bool,
  ) -> bool {
    let Some(entry) = self.upsolve_entry_mut(parent_id) else {
      return false;
    };
    let UpsolveKind::Contest { problems, .. } = &mut entry.kind else {
      return false;
    };
    match problems.get_mut(index) {
      Some(p) => {
        p.solved = solved;
        true
      }
      None => false,
    }
  }

  /// Any transition between statuses is allowed; the machine is unguarded.
  pub fn set_study_status(&mut self, id: Uuid, status: StudyStatus) -> bool {
    match self.study_topic_mut(id) {
      Some(t) => {
        t.status = status;
        true
      }
      None => false,
    }
  }

  // ── Category moves ────────────────────────────────────────────────────
  //
  // A move is remove-then-add with a fresh id, not an identity-preserving
  // update: references to the old id go stale.

  /// Move a rating problem into the topic collection. Carries name, link,
  /// notes, and the solved flag; the rating field is discarded. Returns the
  /// new id, or `None` when the source id is unknown.
  pub fn move_to_topic(
    &mut self,
    id: Uuid,
    topic: impl Into<String>,
  ) -> Option<Uuid> {
    let pos = self.rating_problems.iter().position(|p| p.id == id)?;
    let old = self.rating_problems.remove(pos);
    let new_id = Uuid::new_v4();
    self.topic_problems.push(TopicProblem {
      id:     new_id,
      name:   old.name,
      link:   old.link,
      topic:  topic.into(),
      notes:  old.notes,
      solved: old.solved,
    });
    Some(new_id)
  }

  /// Move a topic problem into the rating collection. The topic field is
  /// discarded in favour of the supplied rating.
  pub fn move_to_rating(
    &mut self,
    id: Uuid,
    rating: Option<String>,
  ) -> Option<Uuid> {
    let pos = self.topic_problems.iter().position(|p| p.id == id)?;
    let old = self.topic_problems.remove(pos);
    let new_id = Uuid::new_v4();
    self.rating_problems.push(RatingProblem {
      id: new_id,
      name: old.name,
      link: old.link,
      rating,
      notes: old.notes,
      solved: old.solved,
    });
    Some(new_id)
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  fn rating_problem(link: &str, rating: Option<&str>) -> NewRatingProblem {
    NewRatingProblem {
      name:   "P".into(),
      link:   link.into(),
      rating: rating.map(Into::into),
      notes:  String::new(),
    }
  }

  #[test]
  fn add_then_remove_restores_the_collection() {
    let mut doc = Document::default();
    doc
      .add_rating_problem(rating_problem("https://a", Some("1500")))
      .unwrap();
    let snapshot = doc.clone();

    let id = doc
      .add_rating_problem(rating_problem("https://b", None))
      .unwrap()
      .id;
    assert_eq!(doc.rating_problems.len(), 2);

    assert!(doc.remove_rating_problem(id));
    assert_eq!(doc, snapshot);
  }

  #[test]
  fn add_without_link_is_rejected_and_leaves_state_untouched() {
    let mut doc = Document::default();
    let err = doc.add_rating_problem(rating_problem("  ", None)).unwrap_err();
    assert!(matches!(err, Error::MissingField("link")));
    assert!(doc.rating_problems.is_empty());
  }

  #[test]
  fn update_merges_only_present_fields() {
    let mut doc = Document::default();
    let id = doc
      .add_rating_problem(NewRatingProblem {
        name:   "Old name".into(),
        link:   "https://a".into(),
        rating: Some("1200".into()),
        notes:  "keep me".into(),
      })
      .unwrap()
      .id;

    let touched = doc
      .update_rating_problem(id, RatingProblemPatch {
        name: Some("New name".into()),
        ..Default::default()
      })
      .unwrap();
    assert!(touched);

    let p = doc.rating_problem(id).unwrap();
    assert_eq!(p.name, "New name");
    assert_eq!(p.notes, "keep me");
    assert_eq!(p.rating.as_deref(), Some("1200"));
  }

  #[test]
  fn update_with_unknown_id_is_a_noop() {
    let mut doc = Document::default();
    let touched = doc
      .update_rating_problem(Uuid::new_v4(), RatingProblemPatch::default())
      .unwrap();
    assert!(!touched);
  }

  #[test]
  fn remove_with_unknown_id_is_a_noop() {
    let mut doc = Document::default();
    doc.add_rating_problem(rating_problem("https://a", None)).unwrap();
    let snapshot = doc.clone();
    assert!(!doc.remove_rating_problem(Uuid::new_v4()));
    assert_eq!(doc, snapshot);
  }

  #[test]
  fn study_topic_resource_cap_is_enforced() {
    let mut doc = Document::default();
    let resources = (0..11)
      .map(|i| Resource {
        url:  format!("https://r/{i}"),
        desc: String::new(),
      })
      .collect();
    let err = doc
      .add_study_topic(NewStudyTopic {
        topic: "DP".into(),
        resources,
        ..Default::default()
      })
      .unwrap_err();
    assert!(matches!(err, Error::TooManyResources(11)));
    assert!(doc.study_topics.is_empty());
  }

  #[test]
  fn blank_resource_urls_are_dropped_before_the_cap() {
    let mut doc = Document::default();
    let mut resources: Vec<Resource> = (0..10)
      .map(|i| Resource {
        url:  format!("https://r/{i}"),
        desc: String::new(),
      })
      .collect();
    resources.push(Resource {
      url:  "   ".into(),
      desc: "blank".into(),
    });
    let topic = doc
      .add_study_topic(NewStudyTopic {
        topic: "Graphs".into(),
        resources,
        ..Default::default()
      })
      .unwrap();
    assert_eq!(topic.resources.len(), 10);
  }

  #[test]
  fn update_study_topic_replaces_resources_and_enforces_the_cap() {
    let mut doc = Document::default();
    let id = doc
      .add_study_topic(NewStudyTopic {
        topic: "Trees".into(),
        ..Default::default()
      })
      .unwrap()
      .id;

    let too_many: Vec<Resource> = (0..11)
      .map(|i| Resource {
        url:  format!("https://r/{i}"),
        desc: String::new(),
      })
      .collect();
    let err = doc
      .update_study_topic(id, StudyTopicPatch {
        resources: Some(too_many),
        ..Default::default()
      })
      .unwrap_err();
    assert!(matches!(err, Error::TooManyResources(11)));
    assert!(doc.study_topic(id).unwrap().resources.is_empty());

    doc
      .update_study_topic(id, StudyTopicPatch {
        resources: Some(vec![Resource {
          url:  "https://cp-algorithms.com".into(),
          desc: "reference".into(),
        }]),
        ..Default::default()
      })
      .unwrap();
    assert_eq!(doc.study_topic(id).unwrap().resources.len(), 1);
  }

  #[test]
  fn update_upsolve_can_switch_kind() {
    let mut doc = Document::default();
    let id = doc
      .add_upsolve(NewUpsolve {
        name: "Round 3".into(),
        link: "https://c3".into(),
        ..Default::default()
      })
      .unwrap()
      .id;
    assert!(!doc.upsolve_entry(id).unwrap().is_contest());

    doc
      .update_upsolve(id, UpsolvePatch {
        kind: Some(UpsolveKind::Contest {
          platform: crate::record::Platform::VJudge,
          problems: Vec::new(),
        }),
        ..Default::default()
      })
      .unwrap();
    let entry = doc.upsolve_entry(id).unwrap();
    assert!(entry.is_contest());
    // Untouched fields survive the kind switch.
    assert_eq!(entry.name, "Round 3");
  }

  #[test]
  fn contest_problem_toggle_out_of_bounds_is_a_noop() {
    let mut doc = Document::default();
    let id = doc
      .add_upsolve(NewUpsolve {
        name: "Round 1".into(),
        link: "https://c".into(),
        kind: UpsolveKind::Contest {
          platform: crate::record::Platform::Codeforces,
          problems: vec![ContestProblem {
            name:   "A".into(),
            link:   "https://c/a".into(),
            solved: false,
          }],
        },
        ..Default::default()
      })
      .unwrap()
      .id;
    let snapshot = doc.clone();

    assert!(!doc.set_contest_problem_solved(id, 1, true));
    assert_eq!(doc, snapshot);

    assert!(doc.set_contest_problem_solved(id, 0, true));
    assert!(doc.upsolve_entry(id).unwrap().contest_problems()[0].solved);
  }

  #[test]
  fn contest_problem_toggle_on_single_problem_entry_is_a_noop() {
    let mut doc = Document::default();
    let id = doc
      .add_upsolve(NewUpsolve {
        name: "B".into(),
        link: "https://b".into(),
        ..Default::default()
      })
      .unwrap()
      .id;
    assert!(!doc.set_contest_problem_solved(id, 0, true));
  }

  #[test]
  fn blank_contest_problem_links_are_dropped() {
    let mut doc = Document::default();
    let entry = doc
      .add_upsolve(NewUpsolve {
        name: "Round 2".into(),
        link: "https://c2".into(),
        kind: UpsolveKind::Contest {
          platform: crate::record::Platform::AtCoder,
          problems: vec![
            ContestProblem {
              name:   "A".into(),
              link:   "https://c2/a".into(),
              solved: false,
            },
            ContestProblem {
              name:   "no link".into(),
              link:   "".into(),
              solved: false,
            },
          ],
        },
        ..Default::default()
      })
      .unwrap();
    assert_eq!(entry.contest_problems().len(), 1);
  }

  #[test]
  fn move_to_topic_discards_rating_and_reassigns_id() {
    let mut doc = Document::default();
    let old_id = doc
      .add_rating_problem(rating_problem("https://a", Some("1500")))
      .unwrap()
      .id;
    doc.set_rating_solved(old_id, true);

    let new_id = doc.move_to_topic(old_id, "DP").unwrap();
    assert_ne!(new_id, old_id);
    assert!(doc.rating_problems.is_empty());

    let moved = doc.topic_problem(new_id).unwrap();
    assert_eq!(moved.topic, "DP");
    assert_eq!(moved.link, "https://a");
    assert!(moved.solved);
  }

  #[test]
  fn move_with_unknown_id_is_a_noop() {
    let mut doc = Document::default();
    assert!(doc.move_to_topic(Uuid::new_v4(), "DP").is_none());
    assert!(doc.move_to_rating(Uuid::new_v4(), None).is_none());
    assert_eq!(doc, Document::default());
  }

  #[test]
  fn status_transitions_are_unguarded() {
    let mut doc = Document::default();
    let id = doc
      .add_study_topic(NewStudyTopic {
        topic: "Flows".into(),
        ..Default::default()
      })
      .unwrap()
      .id;
    assert_eq!(doc.study_topic(id).unwrap().status, StudyStatus::NotStarted);

    assert!(doc.set_study_status(id, StudyStatus::Completed));
    assert!(doc.set_study_status(id, StudyStatus::NotStarted));
    assert_eq!(doc.study_topic(id).unwrap().status, StudyStatus::NotStarted);
  }
}
