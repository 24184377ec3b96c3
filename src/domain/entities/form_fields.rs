use std::{fmt::Display, str::FromStr};

use serde::{Deserialize, Deserializer, Serialize, de};

/// Editable top-level fields of a profile draft.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BasicField {
    FirstName,
    LastName,
    Summary,
}

/// Editable fields of a single experience entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ExperienceField {
    JobTitle,
    EmployerOrClient,
    StartDate,
    EndDate,
    EmploymentType,
    ContributionSummary,
}

/// Editable fields of a work sample.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SampleField {
    Title,
    Url,
}

impl BasicField {
    pub fn name(&self) -> &'static str {
        match self {
            BasicField::FirstName => "first_name",
            BasicField::LastName => "last_name",
            BasicField::Summary => "summary",
        }
    }
}

impl ExperienceField {
    pub fn name(&self) -> &'static str {
        match self {
            ExperienceField::JobTitle => "job_title",
            ExperienceField::EmployerOrClient => "employer_or_client",
            ExperienceField::StartDate => "start_date",
            ExperienceField::EndDate => "end_date",
            ExperienceField::EmploymentType => "employment_type",
            ExperienceField::ContributionSummary => "contribution_summary",
        }
    }
}

impl SampleField {
    pub fn name(&self) -> &'static str {
        match self {
            SampleField::Title => "title",
            SampleField::Url => "url",
        }
    }
}

/// Parses form text into an optional value; blank text means "unset".
pub fn parse_optional<T>(raw: &str) -> Result<Option<T>, T::Err>
where
    T: FromStr,
{
    match raw.trim() {
        "" => Ok(None),
        value => value.parse().map(Some),
    }
}

/// Serde adapter accepting `null`, a missing field or `""` as `None`.
pub fn blank_as_none<'de, D, T>(deserializer: D) -> Result<Option<T>, D::Error>
where
    D: Deserializer<'de>,
    T: FromStr,
    T::Err: Display,
{
    let raw: Option<String> = Option::deserialize(deserializer)?;
    match raw {
        None => Ok(None),
        Some(text) => parse_optional(&text).map_err(de::Error::custom),
    }
}

#[cfg(test)]
mod tests {
    use chrono::NaiveDate;

    use super::*;

    #[test]
    fn parse_optional_treats_blank_as_unset() {
        assert_eq!(parse_optional::<NaiveDate>("   ").unwrap(), None);
        assert_eq!(
            parse_optional::<NaiveDate>("2023-04-01").unwrap(),
            NaiveDate::from_ymd_opt(2023, 4, 1)
        );
        assert!(parse_optional::<NaiveDate>("April 2023").is_err());
    }

    #[test]
    fn field_names_match_serialized_form() {
        let json = serde_json::to_string(&ExperienceField::EmployerOrClient).unwrap();
        assert_eq!(json, format!("\"{}\"", ExperienceField::EmployerOrClient.name()));
    }
}
