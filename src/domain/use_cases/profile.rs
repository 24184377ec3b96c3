use uuid::Uuid;

use crate::{
    draft::validate_draft,
    entities::{
        profile::{
            ImportOutcome, ProfileCreatedResponse, ProfileData, ProfileStatus, RosterProfile,
        },
        profile_card::ProfileCard,
    },
    errors::AppError,
    importer::PortfolioParser,
    repositories::profile::ProfileRepository,
};

pub struct ProfileHandler<R, P>
where
    R: ProfileRepository,
    P: PortfolioParser,
{
    pub profile_repo: R,
    pub parser: P,
}

impl<R, P> ProfileHandler<R, P>
where
    R: ProfileRepository,
    P: PortfolioParser,
{
    pub fn new(profile_repo: R, parser: P) -> Self {
        ProfileHandler { profile_repo, parser }
    }

    /// Imports a portfolio URL into a new profile awaiting review
    pub async fn create_from_url(&self, portfolio_url: &str) -> Result<ProfileCreatedResponse, AppError> {
        let portfolio_url = portfolio_url.trim();
        if portfolio_url.is_empty() {
            return Err(AppError::InvalidInput("Portfolio URL cannot be empty.".to_string()));
        }

        let parsed = self.parser.parse(portfolio_url);
        let process = ImportOutcome::from_parse(!parsed.is_empty());

        let profile = RosterProfile {
            profile_id: Uuid::new_v4(),
            original_portfolio_url: Some(portfolio_url.to_string()),
            data: ProfileData {
                first_name: parsed.first_name.unwrap_or_default(),
                last_name: parsed.last_name.unwrap_or_default(),
                summary: parsed.summary.unwrap_or_default(),
                experiences: parsed.experiences.unwrap_or_default(),
            },
            status: ProfileStatus::PendingReview,
            process,
        };

        self.profile_repo.insert(&profile).await?;

        tracing::info!(
            profile_id = %profile.profile_id,
            process = ?process,
            "Created profile from portfolio URL"
        );

        Ok(ProfileCreatedResponse {
            profile_id: profile.profile_id,
            status: profile.status,
            process,
            message: match process {
                ImportOutcome::Success => "Profile generated. Please review it before publishing.".to_string(),
                ImportOutcome::Fail => "Could not read that portfolio. Please fill in your profile manually.".to_string(),
            },
        })
    }

    /// Retrieves a stored profile
    pub async fn get_profile(&self, profile_id: Uuid) -> Result<RosterProfile, AppError> {
        self.profile_repo.get_by_id(profile_id).await
    }

    /// Validates the draft, then merges it into the record and publishes it
    pub async fn update_profile(&self, profile_id: Uuid, data: ProfileData) -> Result<RosterProfile, AppError> {
        let report = validate_draft(&data);
        if !report.is_valid() {
            return Err(report.into());
        }

        let updated = self.profile_repo.update(profile_id, &data).await?;

        tracing::info!(profile_id = %profile_id, "Profile published");
        Ok(updated)
    }

    /// Builds the shareable, display-ready view of a profile
    pub async fn profile_card(&self, profile_id: Uuid, public_base_url: &str) -> Result<ProfileCard, AppError> {
        let profile = self.profile_repo.get_by_id(profile_id).await?;
        let share_url = format!("{}/profile/{}", public_base_url.trim_end_matches('/'), profile_id);

        Ok(ProfileCard::render(&profile, share_url))
    }
}

#[cfg(test)]
mod tests {
    use chrono::NaiveDate;
    use mockall::predicate::eq;

    use crate::{
        entities::profile::{EmploymentType, Experience},
        importer::mock_parser::MockPortfolioParser,
        repositories::profile::MockProfileRepository,
    };

    use super::*;

    fn stored_profile(id: Uuid) -> RosterProfile {
        RosterProfile {
            profile_id: id,
            original_portfolio_url: Some("https://test.com".into()),
            data: ProfileData {
                first_name: "Jane (Mock)".into(),
                last_name: "Doe".into(),
                ..ProfileData::default()
            },
            status: ProfileStatus::PendingReview,
            process: ImportOutcome::Success,
        }
    }

    #[tokio::test]
    async fn create_from_url_rejects_blank_urls() {
        let mut repo = MockProfileRepository::new();
        repo.expect_insert().never();

        let handler = ProfileHandler::new(repo, MockPortfolioParser::new());
        let result = handler.create_from_url("   ").await;

        assert!(matches!(result, Err(AppError::InvalidInput(_))));
    }

    #[tokio::test]
    async fn unknown_domain_is_stored_as_failed_import() {
        let mut repo = MockProfileRepository::new();
        repo.expect_insert()
            .withf(|profile: &RosterProfile| {
                profile.data.first_name.is_empty()
                    && profile.data.last_name.is_empty()
                    && profile.process == ImportOutcome::Fail
                    && profile.status == ProfileStatus::PendingReview
                    && profile.original_portfolio_url.as_deref() == Some("https://x.my.site/portfolio")
            })
            .times(1)
            .returning(|_| Ok(()));

        let handler = ProfileHandler::new(repo, MockPortfolioParser::new());
        let created = handler.create_from_url(" https://x.my.site/portfolio ").await.unwrap();

        assert_eq!(created.process, ImportOutcome::Fail);
        assert_eq!(created.status, ProfileStatus::PendingReview);
    }

    #[tokio::test]
    async fn invalid_update_never_reaches_repository() {
        let mut repo = MockProfileRepository::new();
        repo.expect_update().never();

        let handler = ProfileHandler::new(repo, MockPortfolioParser::new());
        let result = handler.update_profile(Uuid::new_v4(), ProfileData::default()).await;

        match result {
            Err(AppError::ValidationError(errors)) => {
                let fields: Vec<&str> = errors.iter().map(|e| e.field.as_str()).collect();
                assert_eq!(fields, vec!["first_name", "last_name"]);
            }
            other => panic!("expected validation error, got {:?}", other),
        }
    }

    #[tokio::test]
    async fn valid_update_is_delegated() {
        let id = Uuid::new_v4();
        let data = ProfileData {
            first_name: "Jane".into(),
            last_name: "Doe".into(),
            experiences: vec![Experience {
                job_title: "Producer".into(),
                employer_or_client: "Studio".into(),
                start_date: NaiveDate::from_ymd_opt(2020, 5, 1),
                employment_type: Some(EmploymentType::Contract),
                ..Experience::empty()
            }],
            ..ProfileData::default()
        };

        let mut repo = MockProfileRepository::new();
        let expected = data.clone();
        repo.expect_update()
            .withf(move |profile_id, incoming| *profile_id == id && *incoming == expected)
            .times(1)
            .returning(move |profile_id, incoming| {
                let mut profile = stored_profile(profile_id);
                profile.apply_update(incoming.clone());
                Ok(profile)
            });

        let handler = ProfileHandler::new(repo, MockPortfolioParser::new());
        let updated = handler.update_profile(id, data).await.unwrap();

        assert_eq!(updated.status, ProfileStatus::Published);
        assert_eq!(updated.data.first_name, "Jane");
    }

    #[tokio::test]
    async fn profile_card_builds_share_url() {
        let id = Uuid::new_v4();
        let mut repo = MockProfileRepository::new();
        repo.expect_get_by_id()
            .with(eq(id))
            .returning(|profile_id| Ok(stored_profile(profile_id)));

        let handler = ProfileHandler::new(repo, MockPortfolioParser::new());
        let card = handler.profile_card(id, "https://roster.example/").await.unwrap();

        assert_eq!(card.share_url, format!("https://roster.example/profile/{}", id));
        assert_eq!(card.display_name, "Jane (Mock) Doe");
    }
}
