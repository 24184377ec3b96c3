use serde::Serialize;
use url::Url;
use uuid::Uuid;

use crate::{
    embed::{resolve_embed_url, VideoProvider},
    entities::profile::{Experience, ProfileStatus, RosterProfile, VideoSample},
    utils::markdown::safe_markdown_to_html,
};

const EMPTY_SUMMARY: &str = "No summary provided.";

// ───── API Response Models ──────────────────────────────────────────

/// Public, display-ready view of a profile.
#[derive(Debug, Serialize)]
pub struct ProfileCard {
    pub profile_id: Uuid,
    pub display_name: String,
    pub status: ProfileStatus,
    pub share_url: String,
    pub summary_html: String,
    pub experiences: Vec<ExperienceCard>,
}

#[derive(Debug, Serialize)]
pub struct ExperienceCard {
    pub id: Uuid,
    pub job_title: String,
    pub employer_or_client: String,
    pub employment_type: Option<&'static str>,
    pub period: String,
    pub contribution_html: Option<String>,
    pub samples: Vec<SampleCard>,
}

#[derive(Debug, Serialize)]
pub struct SampleCard {
    pub id: Uuid,
    pub title: String,
    pub source_url: String,
    pub presentation: SamplePresentation,
}

/// How a work sample should be shown: an inline player when the link is a
/// supported video, otherwise an outbound link, otherwise nothing clickable.
#[derive(Debug, PartialEq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum SamplePresentation {
    Embedded { provider: VideoProvider, embed_url: String },
    ExternalLink { href: String },
    Unavailable,
}

// ───── Conversions ──────────────────────────────────────────────────

impl ProfileCard {
    pub fn render(profile: &RosterProfile, share_url: String) -> Self {
        let summary = profile.data.summary.trim();
        let summary_html = if summary.is_empty() {
            format!("<p>{}</p>", EMPTY_SUMMARY)
        } else {
            safe_markdown_to_html(summary)
        };

        ProfileCard {
            profile_id: profile.profile_id,
            display_name: profile.display_name(),
            status: profile.status,
            share_url,
            summary_html,
            experiences: profile.data.experiences.iter().map(ExperienceCard::from).collect(),
        }
    }
}

impl From<&Experience> for ExperienceCard {
    fn from(exp: &Experience) -> Self {
        let contribution = exp.contribution_summary.trim();

        ExperienceCard {
            id: exp.id,
            job_title: exp.job_title.clone(),
            employer_or_client: exp.employer_or_client.clone(),
            employment_type: exp.employment_type.map(|kind| kind.label()),
            period: exp.period(),
            contribution_html: (!contribution.is_empty())
                .then(|| safe_markdown_to_html(contribution)),
            samples: exp.videos.iter().map(SampleCard::from).collect(),
        }
    }
}

impl From<&VideoSample> for SampleCard {
    fn from(sample: &VideoSample) -> Self {
        SampleCard {
            id: sample.id,
            title: sample.title.clone(),
            source_url: sample.url.clone(),
            presentation: SamplePresentation::for_url(&sample.url),
        }
    }
}

impl SamplePresentation {
    pub fn for_url(raw: &str) -> Self {
        if let Some(embed) = resolve_embed_url(raw) {
            return SamplePresentation::Embedded {
                provider: embed.provider,
                embed_url: embed.url,
            };
        }

        match Url::parse(raw.trim()) {
            Ok(parsed) if matches!(parsed.scheme(), "http" | "https") => {
                SamplePresentation::ExternalLink { href: parsed.to_string() }
            }
            _ => SamplePresentation::Unavailable,
        }
    }
}
