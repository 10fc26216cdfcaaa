use chrono::{DateTime, NaiveDate, Utc};
use serde::Deserialize;
use std::collections::HashSet;
use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;

use crate::error::MatchError;
use crate::models::{FieldValue, JobRecord, SkillDictionary, SkillId};

/// Errors that can occur while loading the static skill and job data
#[derive(Debug, Error)]
pub enum CatalogError {
    #[error("Failed to read {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Invalid JSON in {path}: {source}")]
    Json {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("Invalid TOML in {path}: {source}")]
    Toml {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },

    #[error("Unsupported file type: {0}")]
    UnsupportedFormat(PathBuf),

    #[error("Job #{index}: {message}")]
    InvalidRecord { index: usize, message: String },

    #[error("Skill dictionary: {0}")]
    Dictionary(String),
}

impl From<CatalogError> for MatchError {
    fn from(err: CatalogError) -> Self {
        MatchError::Configuration(err.to_string())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Format {
    Json,
    Toml,
}

fn format_of(path: &Path) -> Result<Format, CatalogError> {
    match path.extension().and_then(|ext| ext.to_str()) {
        Some(ext) if ext.eq_ignore_ascii_case("json") => Ok(Format::Json),
        Some(ext) if ext.eq_ignore_ascii_case("toml") => Ok(Format::Toml),
        _ => Err(CatalogError::UnsupportedFormat(path.to_path_buf())),
    }
}

fn read(path: &Path) -> Result<String, CatalogError> {
    fs::read_to_string(path).map_err(|source| CatalogError::Io {
        path: path.to_path_buf(),
        source,
    })
}

fn parse<T>(path: &Path, format: Format, contents: &str) -> Result<T, CatalogError>
where
    T: for<'de> Deserialize<'de>,
{
    match format {
        Format::Json => serde_json::from_str(contents).map_err(|source| CatalogError::Json {
            path: path.to_path_buf(),
            source,
        }),
        Format::Toml => toml::from_str(contents).map_err(|source| CatalogError::Toml {
            path: path.to_path_buf(),
            source,
        }),
    }
}

#[derive(Debug, Deserialize)]
struct SkillsDocument {
    skills: Vec<String>,
}

/// Load the skill dictionary
///
/// JSON files hold a bare array of strings. TOML files hold `skills = [...]`.
pub fn load_dictionary<P: AsRef<Path>>(path: P) -> Result<SkillDictionary, CatalogError> {
    let path = path.as_ref();
    let format = format_of(path)?;
    let contents = read(path)?;

    let raw: Vec<String> = match format {
        Format::Json => parse(path, format, &contents)?,
        Format::Toml => parse::<SkillsDocument>(path, format, &contents)?.skills,
    };

    let dictionary =
        SkillDictionary::new(raw).map_err(|e| CatalogError::Dictionary(e.to_string()))?;

    tracing::info!(
        "Loaded {} skills from {}",
        dictionary.len(),
        path.display()
    );
    Ok(dictionary)
}

/// Job as it appears in the catalog feed, before normalization
///
/// Accepts both the feed's field names (`title_clean`, `company_name`,
/// `skills`) and plain ones. Every field may be a scalar or a list.
#[derive(Debug, Deserialize)]
struct RawJobRecord {
    #[serde(alias = "title_clean")]
    title: Option<FieldValue<String>>,
    #[serde(alias = "company_name")]
    company: Option<FieldValue<String>>,
    location: Option<FieldValue<String>>,
    remote_type: Option<FieldValue<String>>,
    employment_type: Option<FieldValue<String>>,
    seniority_level: Option<FieldValue<String>>,
    salary_range: Option<FieldValue<String>>,
    description: Option<FieldValue<String>>,
    posted_date: Option<FieldValue<String>>,
    #[serde(alias = "skills")]
    required_skills: Option<FieldValue<String>>,
}

#[derive(Debug, Deserialize)]
struct CatalogDocument {
    jobs: Vec<RawJobRecord>,
}

/// First non-blank value of an optional field
fn text(field: Option<FieldValue<String>>) -> Option<String> {
    field
        .and_then(FieldValue::into_first)
        .map(|value| value.trim().to_string())
        .filter(|value| !value.is_empty())
}

/// Accept RFC 3339 timestamps or plain `YYYY-MM-DD` dates
fn parse_posted_date(raw: &str) -> Option<DateTime<Utc>> {
    if let Ok(ts) = DateTime::parse_from_rfc3339(raw) {
        return Some(ts.with_timezone(&Utc));
    }
    NaiveDate::parse_from_str(raw, "%Y-%m-%d")
        .ok()
        .and_then(|date| date.and_hms_opt(0, 0, 0))
        .map(|naive| naive.and_utc())
}

impl RawJobRecord {
    fn resolve(self, index: usize) -> Result<JobRecord, CatalogError> {
        let invalid = |message: &str| CatalogError::InvalidRecord {
            index,
            message: message.to_string(),
        };

        let title = text(self.title).ok_or_else(|| invalid("missing title"))?;
        let company = text(self.company).ok_or_else(|| invalid("missing company"))?;

        let posted_date = match text(self.posted_date) {
            Some(raw) => Some(parse_posted_date(&raw).ok_or_else(|| {
                invalid(&format!("unrecognized posted_date '{}'", raw))
            })?),
            None => None,
        };

        // A scalar skill field may carry a comma separated list
        let entries = match self.required_skills {
            Some(FieldValue::Scalar(joined)) => {
                joined.split(',').map(str::to_string).collect()
            }
            Some(FieldValue::List(items)) => items,
            None => Vec::new(),
        };
        let mut seen = HashSet::new();
        let required_skills = entries
            .iter()
            .filter_map(|entry| SkillId::new(entry))
            .filter(|skill| seen.insert(skill.clone()))
            .collect();

        Ok(JobRecord {
            title,
            company,
            location: text(self.location),
            remote_type: text(self.remote_type),
            employment_type: text(self.employment_type),
            seniority_level: text(self.seniority_level),
            salary_range: text(self.salary_range),
            description: text(self.description),
            posted_date,
            required_skills,
        })
    }
}

/// Load and normalize the job catalog
///
/// JSON files hold either an array of jobs or `{ "jobs": [...] }`. TOML files
/// use `[[jobs]]` tables. Any malformed record fails the whole load.
pub fn load_jobs<P: AsRef<Path>>(path: P) -> Result<Vec<JobRecord>, CatalogError> {
    let path = path.as_ref();
    let format = format_of(path)?;
    let contents = read(path)?;

    let raw: Vec<RawJobRecord> = match format {
        Format::Json if contents.trim_start().starts_with('[') => {
            parse(path, format, &contents)?
        }
        _ => parse::<CatalogDocument>(path, format, &contents)?.jobs,
    };

    let jobs = raw
        .into_iter()
        .enumerate()
        .map(|(index, record)| record.resolve(index))
        .collect::<Result<Vec<_>, _>>()?;

    let unskilled = jobs.iter().filter(|job| job.required_skills.is_empty()).count();
    if unskilled > 0 {
        tracing::warn!("{} jobs list no required skills and will always score 0", unskilled);
    }

    tracing::info!("Loaded {} jobs from {}", jobs.len(), path.display());
    Ok(jobs)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    fn write_temp(suffix: &str, contents: &str) -> tempfile::NamedTempFile {
        let mut file = tempfile::Builder::new()
            .suffix(suffix)
            .tempfile()
            .unwrap();
        file.write_all(contents.as_bytes()).unwrap();
        file
    }

    #[test]
    fn test_load_dictionary_json() {
        let file = write_temp(".json", r#"["JavaScript", "React", "react", "Node"]"#);

        let dict = load_dictionary(file.path()).unwrap();

        let entries: Vec<&str> = dict.iter().map(|s| s.as_str()).collect();
        assert_eq!(entries, vec!["javascript", "react", "node"]);
    }

    #[test]
    fn test_load_dictionary_toml() {
        let file = write_temp(".toml", "skills = [\"Rust\", \"Go\"]\n");

        let dict = load_dictionary(file.path()).unwrap();

        assert_eq!(dict.len(), 2);
    }

    #[test]
    fn test_empty_dictionary_rejected() {
        let file = write_temp(".json", "[]");

        let err = load_dictionary(file.path()).unwrap_err();

        assert!(matches!(err, CatalogError::Dictionary(_)));
    }

    #[test]
    fn test_missing_file() {
        let err = load_dictionary("/nonexistent/skills.json").unwrap_err();
        assert!(matches!(err, CatalogError::Io { .. }));
    }

    #[test]
    fn test_unsupported_extension() {
        let file = write_temp(".yaml", "- rust");
        let err = load_jobs(file.path()).unwrap_err();
        assert!(matches!(err, CatalogError::UnsupportedFormat(_)));
    }

    #[test]
    fn test_load_jobs_resolves_scalar_or_list_fields() {
        let file = write_temp(
            ".json",
            r#"[
                {
                    "title_clean": ["frontend engineer"],
                    "company_name": "Acme",
                    "location": ["Berlin", "Remote"],
                    "remote_type": "Hybrid",
                    "posted_date": ["2024-05-01"],
                    "skills": ["JavaScript", "React", "react"]
                },
                {
                    "title": "Data Engineer",
                    "company": ["Initech"],
                    "posted_date": "2024-05-02T10:30:00+02:00",
                    "required_skills": "python, sql"
                }
            ]"#,
        );

        let jobs = load_jobs(file.path()).unwrap();

        assert_eq!(jobs.len(), 2);
        assert_eq!(jobs[0].title, "frontend engineer");
        assert_eq!(jobs[0].location.as_deref(), Some("Berlin"));
        assert_eq!(jobs[0].remote_type.as_deref(), Some("Hybrid"));
        assert_eq!(jobs[0].required_skills.len(), 2);
        assert!(jobs[0].posted_date.is_some());

        let skills: Vec<&str> = jobs[1].required_skills.iter().map(|s| s.as_str()).collect();
        assert_eq!(skills, vec!["python", "sql"]);
        assert_eq!(
            jobs[1].posted_date.map(|d| d.to_rfc3339()).as_deref(),
            Some("2024-05-02T08:30:00+00:00")
        );
    }

    #[test]
    fn test_list_skill_entries_kept_whole() {
        let file = write_temp(
            ".json",
            r#"[
                {
                    "title": "Analyst",
                    "company": "Acme",
                    "skills": ["Excel", "SQL, NoSQL"]
                },
                {
                    "title": "Engineer",
                    "company": "Acme",
                    "skills": "Rust, Go"
                }
            ]"#,
        );

        let jobs = load_jobs(file.path()).unwrap();

        let listed: Vec<&str> = jobs[0].required_skills.iter().map(|s| s.as_str()).collect();
        assert_eq!(listed, vec!["excel", "sql, nosql"]);

        let joined: Vec<&str> = jobs[1].required_skills.iter().map(|s| s.as_str()).collect();
        assert_eq!(joined, vec!["rust", "go"]);
    }

    #[test]
    fn test_load_jobs_wrapped_json_and_toml() {
        let json = write_temp(
            ".json",
            r#"{ "jobs": [{ "title": "SRE", "company": "Acme", "skills": ["linux"] }] }"#,
        );
        let toml = write_temp(
            ".toml",
            "[[jobs]]\ntitle = \"SRE\"\ncompany = \"Acme\"\nskills = [\"linux\"]\n",
        );

        assert_eq!(load_jobs(json.path()).unwrap().len(), 1);
        assert_eq!(load_jobs(toml.path()).unwrap()[0].title, "SRE");
    }

    #[test]
    fn test_missing_title_is_invalid() {
        let file = write_temp(".json", r#"[{ "company": "Acme" }]"#);

        let err = load_jobs(file.path()).unwrap_err();

        assert!(matches!(err, CatalogError::InvalidRecord { index: 0, .. }));
    }

    #[test]
    fn test_bad_date_is_invalid() {
        let file = write_temp(
            ".json",
            r#"[{ "title": "SRE", "company": "Acme", "posted_date": "last week" }]"#,
        );

        let err = load_jobs(file.path()).unwrap_err();

        assert!(err.to_string().contains("last week"));
    }

    #[test]
    fn test_catalog_error_becomes_configuration_error() {
        let err: MatchError = CatalogError::UnsupportedFormat(PathBuf::from("x.csv")).into();
        assert!(matches!(err, MatchError::Configuration(_)));
    }
}
