use std::{
    collections::VecDeque,
    sync::Arc,
    time::{Duration, Instant},
};

use dashmap::DashMap;
use serde::Serialize;
use tokio::{task::JoinHandle, time::sleep};
use uuid::Uuid;

use crate::{
    draft::{validate_draft, DraftCommand},
    entities::profile::{ProfileData, ProfileStatus, RosterProfile, ValidationReport},
    errors::AppError,
    importer::PortfolioParser,
    repositories::profile::ProfileRepository,
    use_cases::profile::ProfileHandler,
};

/// An editing session over one profile. The draft is an owned copy and is
/// only written back to storage by `save`.
#[derive(Debug, Clone)]
struct DraftSession {
    profile_id: Uuid,
    status: ProfileStatus,
    draft: ProfileData,
    history: VecDeque<ProfileData>,
    /// Bumped on every change to `draft`.
    revision: u64,
    errors: ValidationReport,
    last_error: Option<String>,
    last_seen: Instant,
}

#[derive(Debug, Serialize)]
pub struct DraftSnapshot {
    pub draft_id: Uuid,
    pub profile_id: Uuid,
    pub status: ProfileStatus,
    pub draft: ProfileData,
    pub undo_depth: usize,
    pub errors: ValidationReport,
    pub last_error: Option<String>,
}

type SessionMap = Arc<DashMap<Uuid, DraftSession>>;

pub struct DraftHandler<R, P>
where
    R: ProfileRepository,
    P: PortfolioParser,
{
    profiles: Arc<ProfileHandler<R, P>>,
    sessions: SessionMap,
    history_limit: usize,
    session_ttl: Duration,
}

impl<R, P> DraftHandler<R, P>
where
    R: ProfileRepository,
    P: PortfolioParser,
{
    pub fn new(profiles: Arc<ProfileHandler<R, P>>, history_limit: usize, session_ttl: Duration) -> Self {
        DraftHandler {
            profiles,
            sessions: Arc::new(DashMap::new()),
            history_limit: history_limit.max(1),
            session_ttl,
        }
    }

    /// Opens a draft session holding a deep copy of the stored profile
    pub async fn open(&self, profile_id: Uuid) -> Result<DraftSnapshot, AppError> {
        let profile = self.profiles.get_profile(profile_id).await?;
        let draft_id = Uuid::new_v4();

        let session = DraftSession::from_profile(&profile);
        let snapshot = session.snapshot(draft_id);
        self.sessions.insert(draft_id, session);

        tracing::debug!(draft_id = %draft_id, profile_id = %profile_id, "Opened draft session");
        Ok(snapshot)
    }

    pub fn get(&self, draft_id: Uuid) -> Result<DraftSnapshot, AppError> {
        let mut session = self.session_mut(draft_id)?;
        session.last_seen = Instant::now();
        Ok(session.snapshot(draft_id))
    }

    /// Applies one edit; the previous draft is pushed onto the undo history
    pub fn apply(&self, draft_id: Uuid, command: &DraftCommand) -> Result<DraftSnapshot, AppError> {
        let mut session = self.session_mut(draft_id)?;

        let next = command.apply(&session.draft)?;
        let previous = std::mem::replace(&mut session.draft, next);

        session.history.push_back(previous);
        while session.history.len() > self.history_limit {
            session.history.pop_front();
        }
        session.changed();

        Ok(session.snapshot(draft_id))
    }

    pub fn undo(&self, draft_id: Uuid) -> Result<DraftSnapshot, AppError> {
        let mut session = self.session_mut(draft_id)?;

        let previous = session
            .history
            .pop_back()
            .ok_or_else(|| AppError::InvalidInput("Nothing to undo".to_string()))?;
        session.draft = previous;
        session.changed();

        Ok(session.snapshot(draft_id))
    }

    pub fn validate(&self, draft_id: Uuid) -> Result<ValidationReport, AppError> {
        let mut session = self.session_mut(draft_id)?;

        session.errors = validate_draft(&session.draft);
        session.last_seen = Instant::now();
        Ok(session.errors.clone())
    }

    /// Validates and persists the draft. The session closes only if nothing
    /// was edited while the write was in flight; on any failure the draft is
    /// kept so no edits are lost.
    pub async fn save(&self, draft_id: Uuid) -> Result<RosterProfile, AppError> {
        let (profile_id, revision, draft) = {
            let mut session = self.session_mut(draft_id)?;
            session.last_seen = Instant::now();

            session.errors = validate_draft(&session.draft);
            if !session.errors.is_valid() {
                session.last_error = Some("Please fix the highlighted fields.".to_string());
                return Err(session.errors.clone().into());
            }
            (session.profile_id, session.revision, session.draft.clone())
        };

        match self.profiles.update_profile(profile_id, draft).await {
            Ok(profile) => {
                let closed = self
                    .sessions
                    .remove_if(&draft_id, |_, session| session.revision == revision)
                    .is_some();

                if closed {
                    tracing::info!(draft_id = %draft_id, profile_id = %profile_id, "Draft saved and closed");
                } else if let Some(mut session) = self.sessions.get_mut(&draft_id) {
                    session.status = profile.status;
                    session.last_error = None;
                    tracing::info!(
                        draft_id = %draft_id,
                        profile_id = %profile_id,
                        "Draft saved; later edits kept open"
                    );
                }
                Ok(profile)
            }
            Err(e) => {
                tracing::warn!(draft_id = %draft_id, profile_id = %profile_id, error = %e, "Draft save failed");
                if let Some(mut session) = self.sessions.get_mut(&draft_id) {
                    session.last_error = Some(e.to_string());
                }
                Err(e)
            }
        }
    }

    pub fn discard(&self, draft_id: Uuid) -> Result<(), AppError> {
        self.sessions
            .remove(&draft_id)
            .map(|_| ())
            .ok_or_else(|| draft_not_found(draft_id))
    }

    pub fn open_sessions(&self) -> usize {
        self.sessions.len()
    }

    /// Drops sessions idle for longer than the configured TTL.
    pub fn evict_expired(&self) -> usize {
        evict_idle_sessions(&self.sessions, self.session_ttl)
    }

    /// Spawns the background sweep that evicts idle sessions.
    pub fn spawn_eviction(&self, interval: Duration) -> JoinHandle<()> {
        let sessions = self.sessions.clone();
        let ttl = self.session_ttl;

        tokio::spawn(async move {
            loop {
                sleep(interval).await;
                let evicted = evict_idle_sessions(&sessions, ttl);
                if evicted > 0 {
                    tracing::info!(evicted, remaining = sessions.len(), "Evicted idle draft sessions");
                }
            }
        })
    }

    fn session_mut(
        &self,
        draft_id: Uuid,
    ) -> Result<dashmap::mapref::one::RefMut<'_, Uuid, DraftSession>, AppError> {
        self.sessions
            .get_mut(&draft_id)
            .ok_or_else(|| draft_not_found(draft_id))
    }
}

impl DraftSession {
    fn from_profile(profile: &RosterProfile) -> Self {
        DraftSession {
            profile_id: profile.profile_id,
            status: profile.status,
            draft: profile.to_draft(),
            history: VecDeque::new(),
            revision: 0,
            errors: ValidationReport::default(),
            last_error: None,
            last_seen: Instant::now(),
        }
    }

    /// Errors already shown are recomputed so they track the edited draft.
    fn changed(&mut self) {
        self.revision += 1;
        self.last_seen = Instant::now();
        self.last_error = None;
        if !self.errors.is_valid() {
            self.errors = validate_draft(&self.draft);
        }
    }

    fn snapshot(&self, draft_id: Uuid) -> DraftSnapshot {
        DraftSnapshot {
            draft_id,
            profile_id: self.profile_id,
            status: self.status,
            draft: self.draft.clone(),
            undo_depth: self.history.len(),
            errors: self.errors.clone(),
            last_error: self.last_error.clone(),
        }
    }
}

fn evict_idle_sessions(sessions: &DashMap<Uuid, DraftSession>, ttl: Duration) -> usize {
    let now = Instant::now();
    let mut evicted = 0;
    sessions.retain(|_, session| {
        let alive = now.duration_since(session.last_seen) <= ttl;
        if !alive {
            evicted += 1;
        }
        alive
    });
    evicted
}

fn draft_not_found(draft_id: Uuid) -> AppError {
    AppError::NotFound(format!("Draft {} not found", draft_id))
}

#[cfg(test)]
mod tests {
    use async_trait::async_trait;
    use tokio::sync::Notify;

    use crate::{
        entities::form_fields::{BasicField, ExperienceField},
        importer::mock_parser::MockPortfolioParser,
        repositories::{memory::InMemoryProfileRepo, profile::MockProfileRepository},
    };

    use super::*;

    const HOUR: Duration = Duration::from_secs(3600);

    async fn handler_with_profile() -> (DraftHandler<InMemoryProfileRepo, MockPortfolioParser>, Uuid) {
        handler_with_ttl(HOUR).await
    }

    async fn handler_with_ttl(ttl: Duration) -> (DraftHandler<InMemoryProfileRepo, MockPortfolioParser>, Uuid) {
        let profiles = Arc::new(ProfileHandler::new(InMemoryProfileRepo::new(), MockPortfolioParser::new()));
        let created = profiles.create_from_url("https://test.com").await.unwrap();
        (DraftHandler::new(profiles, 3, ttl), created.profile_id)
    }

    /// Holds every `update` until `release` is notified.
    struct GatedRepo {
        inner: InMemoryProfileRepo,
        writing: Arc<Notify>,
        release: Arc<Notify>,
    }

    #[async_trait]
    impl ProfileRepository for GatedRepo {
        async fn insert(&self, profile: &RosterProfile) -> Result<(), AppError> {
            self.inner.insert(profile).await
        }

        async fn get_by_id(&self, profile_id: Uuid) -> Result<RosterProfile, AppError> {
            self.inner.get_by_id(profile_id).await
        }

        async fn update(&self, profile_id: Uuid, data: &ProfileData) -> Result<RosterProfile, AppError> {
            self.writing.notify_one();
            self.release.notified().await;
            self.inner.update(profile_id, data).await
        }

        async fn check_connection(&self) -> Result<(), AppError> {
            Ok(())
        }

        fn backend(&self) -> &'static str {
            "gated"
        }
    }

    #[tokio::test]
    async fn edits_stay_in_draft_until_saved() {
        let (drafts, profile_id) = handler_with_profile().await;
        let snapshot = drafts.open(profile_id).await.unwrap();

        drafts
            .apply(snapshot.draft_id, &DraftCommand::SetBasicField {
                field: BasicField::FirstName,
                value: "Janet".into(),
            })
            .unwrap();

        let stored = drafts.profiles.get_profile(profile_id).await.unwrap();
        assert_eq!(stored.data.first_name, "Jane (Mock)");

        let saved = drafts.save(snapshot.draft_id).await.unwrap();
        assert_eq!(saved.data.first_name, "Janet");
        assert_eq!(saved.status, ProfileStatus::Published);
        assert_eq!(drafts.open_sessions(), 0);
    }

    #[tokio::test]
    async fn undo_restores_previous_draft_and_history_is_capped() {
        let (drafts, profile_id) = handler_with_profile().await;
        let draft_id = drafts.open(profile_id).await.unwrap().draft_id;

        for _ in 0..5 {
            drafts.apply(draft_id, &DraftCommand::AddExperience).unwrap();
        }
        let snapshot = drafts.get(draft_id).unwrap();
        assert_eq!(snapshot.draft.experiences.len(), 5);
        assert_eq!(snapshot.undo_depth, 3);

        let snapshot = drafts.undo(draft_id).unwrap();
        assert_eq!(snapshot.draft.experiences.len(), 4);
        drafts.undo(draft_id).unwrap();
        drafts.undo(draft_id).unwrap();
        assert!(matches!(drafts.undo(draft_id), Err(AppError::InvalidInput(_))));
    }

    #[tokio::test]
    async fn invalid_save_keeps_session_and_reports_every_field() {
        let (drafts, profile_id) = handler_with_profile().await;
        let draft_id = drafts.open(profile_id).await.unwrap().draft_id;

        let snapshot = drafts.apply(draft_id, &DraftCommand::AddExperience).unwrap();
        let experience_id = snapshot.draft.experiences[0].id;
        drafts
            .apply(draft_id, &DraftCommand::UpdateExperienceField {
                experience_id,
                field: ExperienceField::JobTitle,
                value: "Editor".into(),
            })
            .unwrap();

        let err = drafts.save(draft_id).await.unwrap_err();
        match err {
            AppError::ValidationError(fields) => assert_eq!(fields.len(), 3),
            other => panic!("expected validation error, got {:?}", other),
        }

        let snapshot = drafts.get(draft_id).unwrap();
        assert_eq!(snapshot.draft.experiences[0].job_title, "Editor");
        assert_eq!(snapshot.errors.errors.len(), 3);
        assert!(snapshot.last_error.is_some());
    }

    #[tokio::test]
    async fn persistence_failure_keeps_draft() {
        let profile_id = Uuid::new_v4();
        let mut repo = MockProfileRepository::new();
        repo.expect_get_by_id().returning(|id| {
            Ok(RosterProfile {
                profile_id: id,
                original_portfolio_url: None,
                data: ProfileData {
                    first_name: "Jane".into(),
                    last_name: "Doe".into(),
                    ..ProfileData::default()
                },
                status: ProfileStatus::PendingReview,
                process: crate::entities::profile::ImportOutcome::Success,
            })
        });
        repo.expect_update()
            .returning(|_, _| Err(AppError::InternalError("store unavailable".into())));

        let profiles = Arc::new(ProfileHandler::new(repo, MockPortfolioParser::new()));
        let drafts = DraftHandler::new(profiles, 10, HOUR);
        let draft_id = drafts.open(profile_id).await.unwrap().draft_id;

        assert!(matches!(drafts.save(draft_id).await, Err(AppError::InternalError(_))));

        let snapshot = drafts.get(draft_id).unwrap();
        assert_eq!(snapshot.draft.first_name, "Jane");
        assert_eq!(
            snapshot.last_error.as_deref(),
            Some("Internal server error: store unavailable")
        );
    }

    #[tokio::test]
    async fn unknown_drafts_are_not_found() {
        let (drafts, _) = handler_with_profile().await;
        let stranger = Uuid::new_v4();

        assert!(matches!(drafts.get(stranger), Err(AppError::NotFound(_))));
        assert!(matches!(drafts.discard(stranger), Err(AppError::NotFound(_))));
        assert!(matches!(drafts.save(stranger).await, Err(AppError::NotFound(_))));
    }

    #[tokio::test]
    async fn edit_during_save_keeps_session_open() {
        let writing = Arc::new(Notify::new());
        let release = Arc::new(Notify::new());
        let repo = GatedRepo {
            inner: InMemoryProfileRepo::new(),
            writing: writing.clone(),
            release: release.clone(),
        };
        let profiles = Arc::new(ProfileHandler::new(repo, MockPortfolioParser::new()));
        let profile_id = profiles.create_from_url("https://test.com").await.unwrap().profile_id;
        let drafts = DraftHandler::new(profiles, 10, HOUR);
        let draft_id = drafts.open(profile_id).await.unwrap().draft_id;

        let late_edit = DraftCommand::SetBasicField {
            field: BasicField::Summary,
            value: "Edited while saving".into(),
        };
        let (saved, edited) = tokio::join!(drafts.save(draft_id), async {
            writing.notified().await;
            let edited = drafts.apply(draft_id, &late_edit);
            release.notify_one();
            edited
        });

        let saved = saved.unwrap();
        assert_eq!(saved.status, ProfileStatus::Published);
        assert_ne!(saved.data.summary, "Edited while saving");
        edited.unwrap();

        let snapshot = drafts.get(draft_id).unwrap();
        assert_eq!(snapshot.draft.summary, "Edited while saving");
        assert_eq!(snapshot.status, ProfileStatus::Published);
        assert_eq!(snapshot.last_error, None);

        let (resaved, _) = tokio::join!(drafts.save(draft_id), async {
            writing.notified().await;
            release.notify_one();
        });
        assert_eq!(resaved.unwrap().data.summary, "Edited while saving");
        assert_eq!(drafts.open_sessions(), 0);
    }

    #[tokio::test]
    async fn idle_sessions_are_evicted_and_active_ones_kept() {
        let (drafts, profile_id) = handler_with_ttl(Duration::from_millis(50)).await;
        let idle = drafts.open(profile_id).await.unwrap().draft_id;
        let active = drafts.open(profile_id).await.unwrap().draft_id;

        tokio::time::sleep(Duration::from_millis(80)).await;
        drafts.get(active).unwrap();

        assert_eq!(drafts.evict_expired(), 1);
        assert!(matches!(drafts.get(idle), Err(AppError::NotFound(_))));
        assert!(drafts.get(active).is_ok());
    }

    #[tokio::test]
    async fn background_sweep_clears_abandoned_sessions() {
        let (drafts, profile_id) = handler_with_ttl(Duration::from_millis(10)).await;
        for _ in 0..50 {
            drafts.open(profile_id).await.unwrap();
        }
        assert_eq!(drafts.open_sessions(), 50);

        let sweep = drafts.spawn_eviction(Duration::from_millis(20));
        tokio::time::sleep(Duration::from_millis(120)).await;
        sweep.abort();

        assert_eq!(drafts.open_sessions(), 0);
    }

    #[tokio::test]
    async fn shown_errors_follow_later_edits() {
        let (drafts, profile_id) = handler_with_profile().await;
        let draft_id = drafts.open(profile_id).await.unwrap().draft_id;

        let snapshot = drafts.apply(draft_id, &DraftCommand::AddExperience).unwrap();
        assert!(snapshot.errors.is_valid());
        let experience_id = snapshot.draft.experiences[0].id;

        assert!(drafts.save(draft_id).await.is_err());
        let snapshot = drafts.get(draft_id).unwrap();
        assert_eq!(snapshot.errors.errors.len(), 4);
        assert!(snapshot.last_error.is_some());

        let snapshot = drafts
            .apply(draft_id, &DraftCommand::UpdateExperienceField {
                experience_id,
                field: ExperienceField::JobTitle,
                value: "Editor".into(),
            })
            .unwrap();
        assert_eq!(snapshot.errors.errors.len(), 3);
        assert_eq!(snapshot.errors.message("experiences[0].job_title"), None);
        assert_eq!(snapshot.last_error, None);

        let snapshot = drafts.undo(draft_id).unwrap();
        assert_eq!(snapshot.errors.errors.len(), 4);
    }
}
