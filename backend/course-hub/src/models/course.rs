use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use uuid::Uuid;

use super::{Image, Owner};

/// Audience a course targets
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum CourseType {
    #[serde(rename = "BA")]
    Ba,
    Tester,
    Frontend,
    Backend,
    #[serde(rename = "Full stack")]
    FullStack,
    All,
}

impl CourseType {
    pub const ALL_VALUES: [CourseType; 6] = [
        CourseType::Ba,
        CourseType::Tester,
        CourseType::Frontend,
        CourseType::Backend,
        CourseType::FullStack,
        CourseType::All,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            CourseType::Ba => "BA",
            CourseType::Tester => "Tester",
            CourseType::Frontend => "Frontend",
            CourseType::Backend => "Backend",
            CourseType::FullStack => "Full stack",
            CourseType::All => "All",
        }
    }
}

impl fmt::Display for CourseType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for CourseType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        CourseType::ALL_VALUES
            .into_iter()
            .find(|t| t.as_str() == s)
            .ok_or_else(|| format!("Unknown course type: {}", s))
    }
}

/// A course as returned to clients, with its owner expanded
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Course {
    #[serde(rename = "_id")]
    pub id: Uuid,
    pub title: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    pub url: String,
    pub cost: f64,
    #[serde(rename = "type", skip_serializing_if = "Option::is_none")]
    pub course_type: Option<CourseType>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub framework: Option<String>,
    pub rate: f64,
    /// Identities that already rated this course
    pub learner: Vec<Uuid>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub image: Option<Image>,
    #[serde(rename = "postedBy")]
    pub posted_by: Owner,
    #[serde(rename = "createdAt")]
    pub created_at: DateTime<Utc>,
    #[serde(rename = "updatedAt")]
    pub updated_at: DateTime<Utc>,
}

/// Fields submitted on create/update, already parsed from the form
#[derive(Debug, Clone, Default)]
pub struct CourseInput {
    pub title: Option<String>,
    pub description: Option<String>,
    pub url: Option<String>,
    pub cost: Option<f64>,
    pub course_type: Option<CourseType>,
    pub framework: Option<String>,
    pub image: Option<Image>,
}

/// Validated insert; rating state always starts empty
#[derive(Debug, Clone)]
pub struct NewCourse {
    pub title: String,
    pub description: Option<String>,
    pub url: String,
    pub cost: f64,
    pub course_type: Option<CourseType>,
    pub framework: Option<String>,
    pub image: Option<Image>,
}

/// Whitelisted update set.
///
/// `None` keeps the stored value. Rating state (`rate`, `learner`) and
/// `posted_by` are not part of it.
#[derive(Debug, Clone)]
pub struct CourseChanges {
    pub title: String,
    pub description: Option<String>,
    pub url: Option<String>,
    pub cost: Option<f64>,
    pub course_type: Option<CourseType>,
    pub framework: Option<String>,
    pub image: Option<Image>,
}

/// Prepend `https://` unless the url already carries an http(s) scheme
pub fn normalize_url(url: &str) -> String {
    let url = url.trim();
    if url.starts_with("https://") || url.starts_with("http://") {
        url.to_string()
    } else {
        format!("https://{}", url)
    }
}
