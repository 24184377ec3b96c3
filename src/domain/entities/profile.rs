use std::{borrow::Cow, cmp::Ordering, collections::BTreeMap, fmt, str::FromStr};

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use uuid::Uuid;
use validator::{Validate, ValidationError, ValidationErrors, ValidationErrorsKind};

use crate::entities::form_fields::blank_as_none;

// ───── Domain Models ─────────────────────────────────────────────────

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Validate)]
#[serde(default)]
pub struct VideoSample {
    pub id: Uuid,

    #[validate(custom(function = "validate_not_blank", message = "Sample title is required."))]
    pub title: String,

    #[validate(custom(function = "validate_not_blank", message = "Sample URL is required."))]
    pub url: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum EmploymentType {
    FullTime,
    Contract,
    PartTime,
    Freelance,
    Other,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Validate)]
#[serde(default)]
pub struct Experience {
    pub id: Uuid,

    #[validate(custom(function = "validate_not_blank", message = "Job title is required."))]
    pub job_title: String,

    #[validate(custom(
        function = "validate_not_blank",
        message = "Employer or client name is required."
    ))]
    pub employer_or_client: String,

    #[serde(deserialize_with = "blank_as_none")]
    #[validate(required(message = "Start date is required."))]
    pub start_date: Option<NaiveDate>,

    /// `None` means the position is current.
    #[serde(deserialize_with = "blank_as_none")]
    pub end_date: Option<NaiveDate>,

    #[serde(deserialize_with = "blank_as_none")]
    #[validate(required(message = "Please select an employment type."))]
    pub employment_type: Option<EmploymentType>,

    pub contribution_summary: String,

    #[validate(nested)]
    pub videos: Vec<VideoSample>,
}

/// The editable part of a profile. Drafts are always owned copies of this.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, Validate)]
#[serde(default)]
pub struct ProfileData {
    #[validate(custom(function = "validate_not_blank", message = "First name is required."))]
    pub first_name: String,

    #[validate(custom(function = "validate_not_blank", message = "Last name is required."))]
    pub last_name: String,

    pub summary: String,

    #[validate(nested)]
    pub experiences: Vec<Experience>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ProfileStatus {
    PendingReview,
    Published,
}

/// Whether the importer derived anything from the portfolio URL.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ImportOutcome {
    Success,
    Fail,
}

/// Stored profile record, one per imported portfolio.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RosterProfile {
    pub profile_id: Uuid,

    #[serde(default)]
    pub original_portfolio_url: Option<String>,

    #[serde(flatten)]
    pub data: ProfileData,

    pub status: ProfileStatus,

    pub process: ImportOutcome,
}

// ───── API Request & Response Models ────────────────────────────────

#[derive(Debug, Serialize, Deserialize, Validate)]
pub struct ImportProfileRequest {
    #[validate(custom(function = "validate_not_blank", message = "Portfolio URL cannot be empty."))]
    pub portfolio_url: String,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct ProfileCreatedResponse {
    pub profile_id: Uuid,
    pub status: ProfileStatus,
    pub process: ImportOutcome,
    pub message: String,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct ProfileUpdatedResponse {
    pub message: String,
    pub profile: RosterProfile,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct SamplePortfolio {
    pub name: String,
    pub url: String,
}

/// Result of a full-document validation pass, keyed by field path
/// (`first_name`, `experiences[0].job_title`, `experiences[0].videos[1].url`).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ValidationReport {
    pub valid: bool,
    pub errors: BTreeMap<FieldPath, String>,
}

/// A validation path such as `experiences[2].videos[0].url`. Paths order by
/// position in the document: declaration order of each field, then index.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct FieldPath(String);

const FIELD_ORDER: &[&str] = &[
    "portfolio_url",
    "first_name",
    "last_name",
    "summary",
    "experiences",
    "id",
    "job_title",
    "employer_or_client",
    "start_date",
    "end_date",
    "employment_type",
    "contribution_summary",
    "videos",
    "title",
    "url",
];

// ───── Validation Helpers ───────────────────────────────────────────

pub fn validate_not_blank(value: &str) -> Result<(), ValidationError> {
    if value.trim().is_empty() {
        let mut err = ValidationError::new("blank");
        err.message = Some(Cow::Borrowed("This field is required."));
        return Err(err);
    }
    Ok(())
}

fn collect_field_errors(
    prefix: &str,
    errors: &ValidationErrors,
    out: &mut BTreeMap<FieldPath, String>,
) {
    for (field, kind) in errors.errors() {
        let path = if prefix.is_empty() {
            field.to_string()
        } else {
            format!("{}.{}", prefix, field)
        };

        match kind {
            ValidationErrorsKind::Field(field_errors) => {
                if let Some(first) = field_errors.first() {
                    let message = first
                        .message
                        .as_ref()
                        .map(|m| m.to_string())
                        .unwrap_or_else(|| "Invalid value".to_string());
                    out.insert(FieldPath(path), message);
                }
            }
            ValidationErrorsKind::Struct(inner) => collect_field_errors(&path, inner, out),
            ValidationErrorsKind::List(items) => {
                for (index, inner) in items {
                    collect_field_errors(&format!("{}[{}]", path, index), inner, out);
                }
            }
        }
    }
}

// ───── Conversions & Behaviour ──────────────────────────────────────

impl ValidationReport {
    pub fn from_errors(errors: BTreeMap<FieldPath, String>) -> Self {
        Self { valid: errors.is_empty(), errors }
    }

    pub fn is_valid(&self) -> bool {
        self.errors.is_empty()
    }

    /// Records an error unless the path already has one.
    pub fn add_error(&mut self, path: impl Into<FieldPath>, message: impl Into<String>) {
        self.errors.entry(path.into()).or_insert_with(|| message.into());
        self.valid = false;
    }

    pub fn message(&self, path: &str) -> Option<&str> {
        self.errors.get(&FieldPath::from(path)).map(String::as_str)
    }
}

impl Default for ValidationReport {
    fn default() -> Self {
        Self::from_errors(BTreeMap::new())
    }
}

impl FieldPath {
    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn into_string(self) -> String {
        self.0
    }

    fn segments(&self) -> impl Iterator<Item = (usize, &str, Option<usize>)> + '_ {
        self.0.split('.').map(|segment| {
            let (name, index) = match segment.split_once('[') {
                Some((name, rest)) => (name, rest.trim_end_matches(']').parse().ok()),
                None => (segment, None),
            };
            let rank = FIELD_ORDER
                .iter()
                .position(|known| *known == name)
                .unwrap_or(FIELD_ORDER.len());
            (rank, name, index)
        })
    }
}

impl Ord for FieldPath {
    fn cmp(&self, other: &Self) -> Ordering {
        self.segments()
            .cmp(other.segments())
            .then_with(|| self.0.cmp(&other.0))
    }
}

impl PartialOrd for FieldPath {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl From<&str> for FieldPath {
    fn from(path: &str) -> Self {
        FieldPath(path.to_string())
    }
}

impl From<String> for FieldPath {
    fn from(path: String) -> Self {
        FieldPath(path)
    }
}

impl fmt::Display for FieldPath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&ValidationErrors> for ValidationReport {
    fn from(errors: &ValidationErrors) -> Self {
        let mut collected = BTreeMap::new();
        collect_field_errors("", errors, &mut collected);
        ValidationReport::from_errors(collected)
    }
}

impl VideoSample {
    pub fn empty() -> Self {
        Self {
            id: Uuid::new_v4(),
            title: String::new(),
            url: String::new(),
        }
    }

    pub fn new(title: impl Into<String>, url: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            url: url.into(),
            ..Self::empty()
        }
    }
}

impl Default for VideoSample {
    fn default() -> Self {
        Self::empty()
    }
}

impl Experience {
    pub fn empty() -> Self {
        Self {
            id: Uuid::new_v4(),
            job_title: String::new(),
            employer_or_client: String::new(),
            start_date: None,
            end_date: None,
            employment_type: None,
            contribution_summary: String::new(),
            videos: Vec::new(),
        }
    }

    /// Human readable period, e.g. `Jan 2022 - Present`.
    pub fn period(&self) -> String {
        let start = self
            .start_date
            .map(|d| d.format("%b %Y").to_string())
            .unwrap_or_default();
        let end = self
            .end_date
            .map(|d| d.format("%b %Y").to_string())
            .unwrap_or_else(|| "Present".to_string());
        format!("{} - {}", start, end)
    }
}

impl Default for Experience {
    fn default() -> Self {
        Self::empty()
    }
}

impl EmploymentType {
    pub const ALL: [EmploymentType; 5] = [
        EmploymentType::FullTime,
        EmploymentType::Contract,
        EmploymentType::PartTime,
        EmploymentType::Freelance,
        EmploymentType::Other,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            EmploymentType::FullTime => "full-time",
            EmploymentType::Contract => "contract",
            EmploymentType::PartTime => "part-time",
            EmploymentType::Freelance => "freelance",
            EmploymentType::Other => "other",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            EmploymentType::FullTime => "Full-time",
            EmploymentType::Contract => "Contract",
            EmploymentType::PartTime => "Part-time",
            EmploymentType::Freelance => "Freelance",
            EmploymentType::Other => "Other",
        }
    }
}

impl FromStr for EmploymentType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let normalized = s.trim().to_lowercase();
        EmploymentType::ALL
            .into_iter()
            .find(|kind| kind.as_str() == normalized)
            .ok_or_else(|| format!("Unknown employment type: {}", s))
    }
}

impl fmt::Display for EmploymentType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl ProfileStatus {
    /// Publishing is one-way; a published profile stays published.
    pub fn publish(self) -> Self {
        ProfileStatus::Published
    }

    pub fn is_published(&self) -> bool {
        *self == ProfileStatus::Published
    }
}

impl ImportOutcome {
    pub fn from_parse(derived_anything: bool) -> Self {
        if derived_anything {
            ImportOutcome::Success
        } else {
            ImportOutcome::Fail
        }
    }
}

impl RosterProfile {
    /// Deep copy of the editable data; edits to it never reach the record.
    pub fn to_draft(&self) -> ProfileData {
        self.data.clone()
    }

    /// Merges a saved draft into the record and publishes it.
    /// The import outcome is left untouched.
    pub fn apply_update(&mut self, data: ProfileData) {
        self.data = data;
        self.status = self.status.publish();
    }

    pub fn display_name(&self) -> String {
        format!("{} {}", self.data.first_name.trim(), self.data.last_name.trim())
            .trim()
            .to_string()
    }
}
