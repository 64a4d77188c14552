//! Recurring posting scheduler built on tokio-cron-scheduler.
//!
//! One daily job per auto-posting user, keyed by user id. Jobs re-fetch the
//! user at fire time so toggling auto-posting off takes effect without a
//! restart, and generation failures are logged and swallowed so the next
//! scheduled fire still happens.

use std::collections::HashMap;
use std::sync::Arc;

use tokio::sync::Mutex;
use tokio_cron_scheduler::{Job, JobScheduler, JobSchedulerError};
use uuid::Uuid;

use postpilot_core::generator::DraftGenerator;
use postpilot_core::ports::UserRepository;

/// Fallback daily fire time for malformed "HH:MM" preferences.
const DEFAULT_SCHEDULE: &str = "0 0 9 * * *";

/// Per-user recurring draft generation.
pub struct PostingScheduler {
    inner: JobScheduler,
    jobs: Mutex<HashMap<Uuid, Uuid>>,
    users: Arc<dyn UserRepository>,
    generator: Arc<DraftGenerator>,
}

impl PostingScheduler {
    pub async fn new(
        users: Arc<dyn UserRepository>,
        generator: Arc<DraftGenerator>,
    ) -> Result<Self, JobSchedulerError> {
        let inner = JobScheduler::new().await?;
        Ok(Self {
            inner,
            jobs: Mutex::new(HashMap::new()),
            users,
            generator,
        })
    }

    /// Start the underlying scheduler loop.
    pub async fn start(&self) -> Result<(), JobSchedulerError> {
        self.inner.start().await?;
        tracing::info!("Posting scheduler started");
        Ok(())
    }

    /// Register a daily job for a user. A user with an active job is left
    /// untouched; at most one job exists per user.
    pub async fn start_user(&self, user_id: Uuid, best_time: &str) -> Result<(), JobSchedulerError> {
        let mut jobs = self.jobs.lock().await;
        if jobs.contains_key(&user_id) {
            tracing::info!(user_id = %user_id, "scheduler already running for user");
            return Ok(());
        }

        let schedule = time_to_cron(best_time);
        let users = self.users.clone();
        let generator = self.generator.clone();

        let job = Job::new_async(schedule.as_str(), move |_uuid, _lock| {
            let users = users.clone();
            let generator = generator.clone();
            Box::pin(async move {
                run_scheduled_generation(users, generator, user_id).await;
            })
        })?;

        let job_id = self.inner.add(job).await?;
        jobs.insert(user_id, job_id);
        tracing::info!(user_id = %user_id, schedule = %schedule, "posting scheduler registered");
        Ok(())
    }

    /// Cancel a user's job. A no-op when no job exists.
    pub async fn stop_user(&self, user_id: Uuid) -> Result<(), JobSchedulerError> {
        let mut jobs = self.jobs.lock().await;
        if let Some(job_id) = jobs.remove(&user_id) {
            self.inner.remove(&job_id).await?;
            tracing::info!(user_id = %user_id, "posting scheduler stopped");
        }
        Ok(())
    }

    /// Register jobs for every auto-posting user. Called once at process
    /// start; individual registration failures are logged, not fatal.
    pub async fn start_all(&self) {
        let users = match self.users.find_auto_posting_enabled().await {
            Ok(users) => users,
            Err(e) => {
                tracing::error!(error = %e, "failed to load auto-posting users");
                return;
            }
        };

        let mut started = 0usize;
        for user in &users {
            match self
                .start_user(user.id, &user.preferences.best_time_to_post)
                .await
            {
                Ok(()) => started += 1,
                Err(e) => {
                    tracing::error!(user_id = %user.id, error = %e, "failed to register scheduler")
                }
            }
        }
        tracing::info!(started, "posting schedulers registered");
    }

    /// Cancel every job and stop the scheduler loop. Called on shutdown.
    pub async fn shutdown(&self) -> Result<(), JobSchedulerError> {
        self.jobs.lock().await.clear();
        let mut inner = self.inner.clone();
        inner.shutdown().await?;
        tracing::info!("Posting scheduler stopped");
        Ok(())
    }

    pub async fn active_count(&self) -> usize {
        self.jobs.lock().await.len()
    }

    pub async fn is_scheduled(&self, user_id: Uuid) -> bool {
        self.jobs.lock().await.contains_key(&user_id)
    }
}

/// One scheduled fire. Re-checks the auto-posting toggle and swallows every
/// failure; the job stays registered either way.
async fn run_scheduled_generation(
    users: Arc<dyn UserRepository>,
    generator: Arc<DraftGenerator>,
    user_id: Uuid,
) {
    match users.find_by_id(user_id).await {
        Ok(Some(user)) if user.preferences.auto_posting_enabled => {
            match generator.generate_draft(user_id).await {
                Ok(post) => {
                    tracing::info!(user_id = %user_id, post_id = %post.id, "daily post generated")
                }
                Err(e) => {
                    tracing::error!(user_id = %user_id, error = %e, "daily post generation failed")
                }
            }
        }
        Ok(_) => {
            tracing::debug!(user_id = %user_id, "auto-posting disabled or user gone, skipping");
        }
        Err(e) => {
            tracing::error!(user_id = %user_id, error = %e, "failed to load user for scheduled run");
        }
    }
}

/// Convert an "HH:MM" wall-clock time into a daily cron expression
/// (seconds-resolution, as the scheduler expects). Malformed input falls back
/// to 09:00.
fn time_to_cron(time: &str) -> String {
    let parsed = match time.split_once(':') {
        Some((h, m)) => match (h.parse::<u8>(), m.parse::<u8>()) {
            (Ok(hours), Ok(minutes)) if hours <= 23 && minutes <= 59 => Some((hours, minutes)),
            _ => None,
        },
        None => None,
    };

    match parsed {
        Some((hours, minutes)) => format!("0 {minutes} {hours} * * *"),
        None => {
            tracing::warn!(time = %time, "malformed best-time-to-post, falling back to 09:00");
            DEFAULT_SCHEDULE.to_string()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use postpilot_core::domain::User;
    use postpilot_core::error::{AssetError, GenerationError};
    use postpilot_core::ports::{
        AssetStore, BaseRepository, CaptionGenerator, CaptionRequest, GeneratedCaption,
        ImageAsset, ImageMetadata, PostQuery, PostRepository,
    };
    use postpilot_infra::database::{
        InMemoryAnalyticsRepository, InMemoryPostRepository, InMemoryUserRepository,
    };

    struct FixedCaptions;

    #[async_trait]
    impl CaptionGenerator for FixedCaptions {
        fn model_name(&self) -> &str {
            "fixed-model"
        }

        async fn generate(
            &self,
            _request: &CaptionRequest,
        ) -> Result<GeneratedCaption, GenerationError> {
            Ok(GeneratedCaption {
                caption: "scheduled caption".to_string(),
                hashtags: Vec::new(),
                trending_topics: Vec::new(),
                confidence_score: 0.8,
            })
        }
    }

    struct NoImages;

    #[async_trait]
    impl AssetStore for NoImages {
        async fn list_images(&self) -> Result<Vec<ImageAsset>, AssetError> {
            Ok(Vec::new())
        }

        async fn store_image(
            &self,
            filename: &str,
            _bytes: &[u8],
        ) -> Result<ImageAsset, AssetError> {
            Err(AssetError::NotFound(filename.to_string()))
        }

        async fn delete_image(&self, filename: &str) -> Result<(), AssetError> {
            Err(AssetError::NotFound(filename.to_string()))
        }

        async fn image_metadata(&self, filename: &str) -> Result<ImageMetadata, AssetError> {
            Err(AssetError::NotFound(filename.to_string()))
        }
    }

    struct Fixture {
        users: Arc<InMemoryUserRepository>,
        posts: Arc<InMemoryPostRepository>,
        generator: Arc<DraftGenerator>,
    }

    fn fixture() -> Fixture {
        let users = Arc::new(InMemoryUserRepository::new());
        let posts = Arc::new(InMemoryPostRepository::new());
        let generator = Arc::new(DraftGenerator::new(
            users.clone(),
            posts.clone(),
            Arc::new(InMemoryAnalyticsRepository::new()),
            Arc::new(FixedCaptions),
            Arc::new(NoImages),
        ));
        Fixture {
            users,
            posts,
            generator,
        }
    }

    async fn auto_posting_user(users: &InMemoryUserRepository, enabled: bool) -> User {
        let mut user = User::new(
            format!("{}@example.com", Uuid::new_v4()),
            "hash".to_string(),
            "Sam".to_string(),
        );
        user.preferences.auto_posting_enabled = enabled;
        users.save(user.clone()).await.unwrap();
        user
    }

    #[test]
    fn time_to_cron_converts_wall_clock_times() {
        assert_eq!(time_to_cron("09:00"), "0 0 9 * * *");
        assert_eq!(time_to_cron("18:45"), "0 45 18 * * *");
        assert_eq!(time_to_cron("00:05"), "0 5 0 * * *");
    }

    #[test]
    fn time_to_cron_falls_back_on_garbage() {
        assert_eq!(time_to_cron("25:00"), DEFAULT_SCHEDULE);
        assert_eq!(time_to_cron("09:75"), DEFAULT_SCHEDULE);
        assert_eq!(time_to_cron("soon"), DEFAULT_SCHEDULE);
        assert_eq!(time_to_cron(""), DEFAULT_SCHEDULE);
    }

    #[tokio::test]
    async fn start_twice_registers_exactly_one_job() {
        let f = fixture();
        let scheduler = PostingScheduler::new(f.users.clone(), f.generator.clone())
            .await
            .unwrap();
        let user = auto_posting_user(&f.users, true).await;

        scheduler.start_user(user.id, "09:00").await.unwrap();
        scheduler.start_user(user.id, "09:00").await.unwrap();

        assert_eq!(scheduler.active_count().await, 1);
    }

    #[tokio::test]
    async fn stop_without_a_job_is_a_no_op() {
        let f = fixture();
        let scheduler = PostingScheduler::new(f.users.clone(), f.generator.clone())
            .await
            .unwrap();

        scheduler.stop_user(Uuid::new_v4()).await.unwrap();
        assert_eq!(scheduler.active_count().await, 0);
    }

    #[tokio::test]
    async fn start_then_stop_removes_the_job() {
        let f = fixture();
        let scheduler = PostingScheduler::new(f.users.clone(), f.generator.clone())
            .await
            .unwrap();
        let user = auto_posting_user(&f.users, true).await;

        scheduler.start_user(user.id, "10:30").await.unwrap();
        assert!(scheduler.is_scheduled(user.id).await);

        scheduler.stop_user(user.id).await.unwrap();
        assert!(!scheduler.is_scheduled(user.id).await);
        assert_eq!(scheduler.active_count().await, 0);
    }

    #[tokio::test]
    async fn start_all_registers_only_auto_posting_users() {
        let f = fixture();
        let scheduler = PostingScheduler::new(f.users.clone(), f.generator.clone())
            .await
            .unwrap();
        let enabled = auto_posting_user(&f.users, true).await;
        let _disabled = auto_posting_user(&f.users, false).await;

        scheduler.start_all().await;

        assert_eq!(scheduler.active_count().await, 1);
        assert!(scheduler.is_scheduled(enabled.id).await);
    }

    #[tokio::test]
    async fn fired_job_generates_for_enabled_user() {
        let f = fixture();
        let user = auto_posting_user(&f.users, true).await;

        run_scheduled_generation(f.users.clone(), f.generator.clone(), user.id).await;

        let drafts = f
            .posts
            .find_by_user(user.id, &PostQuery::default())
            .await
            .unwrap();
        assert_eq!(drafts.len(), 1);
        assert_eq!(drafts[0].caption, "scheduled caption");
    }

    #[tokio::test]
    async fn fired_job_skips_when_auto_posting_was_disabled() {
        let f = fixture();
        let user = auto_posting_user(&f.users, false).await;

        run_scheduled_generation(f.users.clone(), f.generator.clone(), user.id).await;

        let count = f.posts.count_by_user(user.id, None).await.unwrap();
        assert_eq!(count, 0);
    }

    #[tokio::test]
    async fn fired_job_survives_a_missing_user() {
        let f = fixture();
        // must not panic
        run_scheduled_generation(f.users.clone(), f.generator.clone(), Uuid::new_v4()).await;
    }
}
