//! Draft editing operations.
//!
//! Every operation borrows the current draft and returns a new one, so each
//! intermediate state can be kept (undo history) or thrown away. Experiences
//! and samples are addressed by id only, never by position.

use std::collections::HashSet;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use uuid::Uuid;
use validator::Validate;

use crate::{
    entities::{
        form_fields::{parse_optional, BasicField, ExperienceField, SampleField},
        profile::{EmploymentType, Experience, ProfileData, ValidationReport, VideoSample},
    },
    errors::DraftError,
};

/// A single edit, as sent by a client editing a draft session.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "op", rename_all = "snake_case")]
pub enum DraftCommand {
    SetBasicField {
        field: BasicField,
        value: String,
    },
    AddExperience,
    RemoveExperience {
        experience_id: Uuid,
    },
    UpdateExperienceField {
        experience_id: Uuid,
        field: ExperienceField,
        value: String,
    },
    AddSample {
        experience_id: Uuid,
    },
    RemoveSample {
        experience_id: Uuid,
        sample_id: Uuid,
    },
    UpdateSampleField {
        experience_id: Uuid,
        sample_id: Uuid,
        field: SampleField,
        value: String,
    },
}

impl DraftCommand {
    pub fn apply(&self, draft: &ProfileData) -> Result<ProfileData, DraftError> {
        match self {
            DraftCommand::SetBasicField { field, value } => {
                Ok(set_basic_field(draft, *field, value))
            }
            DraftCommand::AddExperience => Ok(add_experience(draft).0),
            DraftCommand::RemoveExperience { experience_id } => {
                remove_experience(draft, *experience_id)
            }
            DraftCommand::UpdateExperienceField { experience_id, field, value } => {
                update_experience_field(draft, *experience_id, *field, value)
            }
            DraftCommand::AddSample { experience_id } => {
                add_sample(draft, *experience_id).map(|(next, _)| next)
            }
            DraftCommand::RemoveSample { experience_id, sample_id } => {
                remove_sample(draft, *experience_id, *sample_id)
            }
            DraftCommand::UpdateSampleField { experience_id, sample_id, field, value } => {
                update_sample_field(draft, *experience_id, *sample_id, *field, value)
            }
        }
    }
}

pub fn set_basic_field(draft: &ProfileData, field: BasicField, value: &str) -> ProfileData {
    let mut next = draft.clone();
    let target = match field {
        BasicField::FirstName => &mut next.first_name,
        BasicField::LastName => &mut next.last_name,
        BasicField::Summary => &mut next.summary,
    };
    *target = value.to_string();
    next
}

/// Appends an empty experience and returns its id alongside the new draft.
pub fn add_experience(draft: &ProfileData) -> (ProfileData, Uuid) {
    let mut next = draft.clone();
    let experience = Experience::empty();
    let id = experience.id;
    next.experiences.push(experience);
    (next, id)
}

pub fn remove_experience(draft: &ProfileData, experience_id: Uuid) -> Result<ProfileData, DraftError> {
    find_experience(draft, experience_id)?;

    let mut next = draft.clone();
    next.experiences.retain(|exp| exp.id != experience_id);
    Ok(next)
}

pub fn update_experience_field(
    draft: &ProfileData,
    experience_id: Uuid,
    field: ExperienceField,
    value: &str,
) -> Result<ProfileData, DraftError> {
    let mut next = draft.clone();
    let experience = find_experience_mut(&mut next, experience_id)?;

    match field {
        ExperienceField::JobTitle => experience.job_title = value.to_string(),
        ExperienceField::EmployerOrClient => experience.employer_or_client = value.to_string(),
        ExperienceField::ContributionSummary => {
            experience.contribution_summary = value.to_string()
        }
        ExperienceField::StartDate => experience.start_date = parse_date(field, value)?,
        ExperienceField::EndDate => experience.end_date = parse_date(field, value)?,
        ExperienceField::EmploymentType => {
            experience.employment_type = parse_optional::<EmploymentType>(value)
                .map_err(|reason| DraftError::InvalidValue { field: field.name(), reason })?
        }
    }

    Ok(next)
}

/// Appends an empty sample to the experience and returns its id.
pub fn add_sample(draft: &ProfileData, experience_id: Uuid) -> Result<(ProfileData, Uuid), DraftError> {
    let mut next = draft.clone();
    let experience = find_experience_mut(&mut next, experience_id)?;

    let sample = VideoSample::empty();
    let id = sample.id;
    experience.videos.push(sample);
    Ok((next, id))
}

pub fn remove_sample(
    draft: &ProfileData,
    experience_id: Uuid,
    sample_id: Uuid,
) -> Result<ProfileData, DraftError> {
    let mut next = draft.clone();
    let experience = find_experience_mut(&mut next, experience_id)?;

    let before = experience.videos.len();
    experience.videos.retain(|video| video.id != sample_id);
    if experience.videos.len() == before {
        return Err(DraftError::SampleNotFound(sample_id));
    }
    Ok(next)
}

pub fn update_sample_field(
    draft: &ProfileData,
    experience_id: Uuid,
    sample_id: Uuid,
    field: SampleField,
    value: &str,
) -> Result<ProfileData, DraftError> {
    let mut next = draft.clone();
    let sample = find_experience_mut(&mut next, experience_id)?
        .videos
        .iter_mut()
        .find(|video| video.id == sample_id)
        .ok_or(DraftError::SampleNotFound(sample_id))?;

    match field {
        SampleField::Title => sample.title = value.to_string(),
        SampleField::Url => sample.url = value.to_string(),
    }
    Ok(next)
}

/// Full-document validation. Every offending field is reported, keyed by path.
pub fn validate_draft(draft: &ProfileData) -> ValidationReport {
    let mut report = match draft.validate() {
        Ok(()) => ValidationReport::default(),
        Err(errors) => ValidationReport::from(&errors),
    };
    report_duplicate_ids(draft, &mut report);
    report
}

/// Experiences are addressed by id, and samples by id within their
/// experience, so a repeated id is reported on every later occurrence.
fn report_duplicate_ids(draft: &ProfileData, report: &mut ValidationReport) {
    let mut experience_ids = HashSet::new();

    for (i, experience) in draft.experiences.iter().enumerate() {
        if !experience_ids.insert(experience.id) {
            report.add_error(format!("experiences[{}].id", i), "Duplicate experience id.");
        }

        let mut sample_ids = HashSet::new();
        for (j, video) in experience.videos.iter().enumerate() {
            if !sample_ids.insert(video.id) {
                report.add_error(
                    format!("experiences[{}].videos[{}].id", i, j),
                    "Duplicate sample id.",
                );
            }
        }
    }
}

fn parse_date(field: ExperienceField, value: &str) -> Result<Option<NaiveDate>, DraftError> {
    parse_optional::<NaiveDate>(value).map_err(|_| DraftError::InvalidValue {
        field: field.name(),
        reason: format!("'{}' is not a date in YYYY-MM-DD format", value.trim()),
    })
}

fn find_experience(draft: &ProfileData, experience_id: Uuid) -> Result<&Experience, DraftError> {
    draft
        .experiences
        .iter()
        .find(|exp| exp.id == experience_id)
        .ok_or(DraftError::ExperienceNotFound(experience_id))
}

fn find_experience_mut(
    draft: &mut ProfileData,
    experience_id: Uuid,
) -> Result<&mut Experience, DraftError> {
    draft
        .experiences
        .iter_mut()
        .find(|exp| exp.id == experience_id)
        .ok_or(DraftError::ExperienceNotFound(experience_id))
}
