use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::fmt;

use crate::error::MatchError;

/// A normalized (trimmed, lowercased) skill token
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(transparent)]
pub struct SkillId(String);

impl SkillId {
    /// Normalize a raw token, returning `None` for blank input
    pub fn new(raw: &str) -> Option<Self> {
        let normalized = raw.trim().to_lowercase();
        if normalized.is_empty() {
            None
        } else {
            Some(Self(normalized))
        }
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for SkillId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl AsRef<str> for SkillId {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

/// Ordered, duplicate-free list of known skills
///
/// Loaded once at startup and shared read-only between requests.
#[derive(Debug, Clone)]
pub struct SkillDictionary {
    entries: Vec<SkillId>,
}

impl SkillDictionary {
    /// Build a dictionary from raw entries
    ///
    /// Entries are normalized, blanks are skipped and later duplicates are
    /// dropped. A dictionary with no usable entries is a configuration error.
    pub fn new<I, S>(raw: I) -> Result<Self, MatchError>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut seen = HashSet::new();
        let entries: Vec<SkillId> = raw
            .into_iter()
            .filter_map(|s| SkillId::new(s.as_ref()))
            .filter(|skill| seen.insert(skill.clone()))
            .collect();

        if entries.is_empty() {
            return Err(MatchError::Configuration(
                "skill dictionary has no entries".to_string(),
            ));
        }

        Ok(Self { entries })
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &SkillId> {
        self.entries.iter()
    }

    pub fn get(&self, index: usize) -> Option<&SkillId> {
        self.entries.get(index)
    }

    pub fn contains(&self, skill: &SkillId) -> bool {
        self.entries.contains(skill)
    }
}

/// Skills detected for one request
///
/// Keeps insertion order for output and a hash index for membership tests.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MatchedSkillSet {
    skills: Vec<SkillId>,
    index: HashSet<SkillId>,
}

impl MatchedSkillSet {
    /// Build a set from caller-supplied tokens, normalizing each one
    pub fn from_tokens<I, S>(tokens: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        tokens
            .into_iter()
            .filter_map(|t| SkillId::new(t.as_ref()))
            .collect()
    }

    pub fn len(&self) -> usize {
        self.skills.len()
    }

    pub fn is_empty(&self) -> bool {
        self.skills.is_empty()
    }

    pub fn contains(&self, skill: &SkillId) -> bool {
        self.index.contains(skill)
    }

    pub fn iter(&self) -> impl Iterator<Item = &SkillId> {
        self.skills.iter()
    }

    pub fn to_strings(&self) -> Vec<String> {
        self.skills.iter().map(|s| s.as_str().to_string()).collect()
    }
}

impl FromIterator<SkillId> for MatchedSkillSet {
    fn from_iter<T: IntoIterator<Item = SkillId>>(iter: T) -> Self {
        let mut set = MatchedSkillSet::default();
        for skill in iter {
            if set.index.insert(skill.clone()) {
                set.skills.push(skill);
            }
        }
        set
    }
}

/// Catalog field that may arrive as a single value or as a list
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(untagged)]
pub enum FieldValue<T> {
    Scalar(T),
    List(Vec<T>),
}

impl<T> FieldValue<T> {
    /// Resolve to the scalar, or the first list element
    pub fn into_first(self) -> Option<T> {
        match self {
            FieldValue::Scalar(value) => Some(value),
            FieldValue::List(values) => values.into_iter().next(),
        }
    }
}

/// A job posting from the catalog, immutable once loaded
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct JobRecord {
    pub title: String,
    pub company: String,
    pub location: Option<String>,
    pub remote_type: Option<String>,
    pub employment_type: Option<String>,
    pub seniority_level: Option<String>,
    pub salary_range: Option<String>,
    pub description: Option<String>,
    pub posted_date: Option<DateTime<Utc>>,
    pub required_skills: Vec<SkillId>,
}

impl JobRecord {
    /// Minimal record with a title, company and required skills
    pub fn new<S: AsRef<str>>(title: &str, company: &str, skills: &[S]) -> Self {
        let mut seen = HashSet::new();
        Self {
            title: title.to_string(),
            company: company.to_string(),
            location: None,
            remote_type: None,
            employment_type: None,
            seniority_level: None,
            salary_range: None,
            description: None,
            posted_date: None,
            required_skills: skills
                .iter()
                .filter_map(|s| SkillId::new(s.as_ref()))
                .filter(|s| seen.insert(s.clone()))
                .collect(),
        }
    }
}

/// A job paired with its match score for one request
#[derive(Debug, Clone, PartialEq)]
pub struct ScoredRecommendation<'a> {
    pub job: &'a JobRecord,
    /// 0-100
    pub score: u8,
    /// Skills present in both the request and the job, in the job's order
    pub matched_skills: Vec<SkillId>,
}

/// Returned in place of a ranking when no skills were detected
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NoSkillsNotice {
    pub message: String,
}

impl Default for NoSkillsNotice {
    fn default() -> Self {
        Self {
            message: "No skills detected. Upload a resume with detectable skills.".to_string(),
        }
    }
}

/// Result of running the recommendation engine
#[derive(Debug, Clone, PartialEq)]
pub enum RecommendationOutcome<'a> {
    Ranked(Vec<ScoredRecommendation<'a>>),
    NoSkillsDetected(NoSkillsNotice),
}

impl<'a> RecommendationOutcome<'a> {
    pub fn is_no_skills(&self) -> bool {
        matches!(self, RecommendationOutcome::NoSkillsDetected(_))
    }

    /// Ranked entries, empty for the no-skills outcome
    pub fn ranked(&self) -> &[ScoredRecommendation<'a>] {
        match self {
            RecommendationOutcome::Ranked(recs) => recs,
            RecommendationOutcome::NoSkillsDetected(_) => &[],
        }
    }
}
