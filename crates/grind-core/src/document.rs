//! The document — root aggregate of all tracked data.
//!
//! One document owns the four collections and is persisted as a single JSON
//! blob. Records have no identity or lifecycle outside it.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::record::{RatingProblem, StudyTopic, TopicProblem, UpsolveEntry};

/// Root aggregate. Collection field names pin the storage layout; a missing
/// collection deserialises as empty rather than failing.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Document {
  #[serde(default, rename = "nextMonthRating")]
  pub rating_problems: Vec<RatingProblem>,
  #[serde(default, rename = "nextMonthTopic")]
  pub topic_problems:  Vec<TopicProblem>,
  #[serde(default, rename = "topics4Weeks")]
  pub study_topics:    Vec<StudyTopic>,
  #[serde(default, rename = "upsolve")]
  pub upsolve:         Vec<UpsolveEntry>,
  /// Unknown top-level fields from imported data. Preserved across
  /// save/export, ignored by all logic.
  #[serde(flatten)]
  pub extra:           serde_json::Map<String, serde_json::Value>,
}

impl Document {
  pub fn rating_problem(&self, id: Uuid) -> Option<&RatingProblem> {
    self.rating_problems.iter().find(|p| p.id == id)
  }

  pub fn topic_problem(&self, id: Uuid) -> Option<&TopicProblem> {
    self.topic_problems.iter().find(|p| p.id == id)
  }

  pub fn study_topic(&self, id: Uuid) -> Option<&StudyTopic> {
    self.study_topics.iter().find(|t| t.id == id)
  }

  pub fn upsolve_entry(&self, id: Uuid) -> Option<&UpsolveEntry> {
    self.upsolve.iter().find(|u| u.id == id)
  }

  pub(crate) fn rating_problem_mut(
    &mut self,
    id: Uuid,
  ) -> Option<&mut RatingProblem> {
    self.rating_problems.iter_mut().find(|p| p.id == id)
  }

  pub(crate) fn topic_problem_mut(
    &mut self,
    id: Uuid,
  ) -> Option<&mut TopicProblem> {
    self.topic_problems.iter_mut().find(|p| p.id == id)
  }

  pub(crate) fn study_topic_mut(&mut self, id: Uuid) -> Option<&mut StudyTopic> {
    self.study_topics.iter_mut().find(|t| t.id == id)
  }

  pub(crate) fn upsolve_entry_mut(
    &mut self,
    id: Uuid,
  ) -> Option<&mut UpsolveEntry> {
    self.upsolve.iter_mut().find(|u| u.id == id)
  }
}
