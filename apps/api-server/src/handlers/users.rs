//! User profile, onboarding and social-connection handlers.

use actix_web::{HttpResponse, web};

use postpilot_shared::ApiResponse;
use postpilot_shared::dto::{
    ConnectSocialRequest, OnboardingRequest, ProfileResponse, UpdateProfileRequest,
};

use crate::middleware::auth::Identity;
use crate::middleware::error::{AppError, AppResult};
use crate::state::AppState;

/// GET /api/users/profile
pub async fn get_profile(state: web::Data<AppState>, identity: Identity) -> AppResult<HttpResponse> {
    let user = state
        .users
        .find_by_id(identity.user_id)
        .await?
        .ok_or_else(|| AppError::NotFound("User not found".to_string()))?;

    Ok(HttpResponse::Ok().json(ProfileResponse::from(&user)))
}

/// PUT /api/users/profile
///
/// Partial update; also keeps the posting scheduler in sync when the
/// auto-posting preference flips.
pub async fn update_profile(
    state: web::Data<AppState>,
    identity: Identity,
    body: web::Json<UpdateProfileRequest>,
) -> AppResult<HttpResponse> {
    let req = body.into_inner();
    let mut user = state
        .users
        .find_by_id(identity.user_id)
        .await?
        .ok_or_else(|| AppError::NotFound("User not found".to_string()))?;

    if let Some(name) = req.name {
        if name.trim().is_empty() {
            return Err(AppError::BadRequest("Name cannot be empty".to_string()));
        }
        user.name = name.trim().to_string();
    }
    if let Some(niche) = req.niche {
        user.niche = Some(niche);
    }
    if let Some(audience) = req.target_audience {
        user.target_audience = Some(audience);
    }
    if let Some(style) = req.posting_style {
        user.posting_style = style;
    }

    let mut auto_posting_toggle = None;
    if let Some(prefs) = req.preferences {
        if let Some(enabled) = prefs.auto_posting_enabled {
            auto_posting_toggle = Some(enabled);
            user.preferences.auto_posting_enabled = enabled;
        }
        if let Some(frequency) = prefs.posting_frequency {
            user.preferences.posting_frequency = frequency;
        }
        if let Some(best_time) = prefs.best_time_to_post {
            user.preferences.best_time_to_post = best_time;
        }
        if let Some(include) = prefs.include_hashtags {
            user.preferences.include_hashtags = include;
        }
        if let Some(include) = prefs.include_trending_topics {
            user.preferences.include_trending_topics = include;
        }
        if let Some(max) = prefs.max_hashtags {
            user.preferences.max_hashtags = max;
        }
    }

    user.recompute_completeness();
    user.updated_at = chrono::Utc::now();
    let saved = state.users.save(user).await?;

    // Scheduler registration follows the stored preference; failures here
    // must not fail the profile update.
    match auto_posting_toggle {
        Some(true) => {
            if let Err(e) = state
                .scheduler
                .start_user(saved.id, &saved.preferences.best_time_to_post)
                .await
            {
                tracing::error!(user_id = %saved.id, error = %e, "failed to start scheduler");
            }
        }
        Some(false) => {
            if let Err(e) = state.scheduler.stop_user(saved.id).await {
                tracing::error!(user_id = %saved.id, error = %e, "failed to stop scheduler");
            }
        }
        None => {}
    }

    Ok(HttpResponse::Ok().json(ProfileResponse::from(&saved)))
}

/// POST /api/users/onboarding/complete
pub async fn complete_onboarding(
    state: web::Data<AppState>,
    identity: Identity,
    body: web::Json<OnboardingRequest>,
) -> AppResult<HttpResponse> {
    let req = body.into_inner();
    let mut user = state
        .users
        .find_by_id(identity.user_id)
        .await?
        .ok_or_else(|| AppError::NotFound("User not found".to_string()))?;

    user.niche = Some(req.niche);
    user.target_audience = Some(req.target_audience);
    user.posting_style = req.posting_style;
    if let Some(niches) = req.niches {
        user.niches = niches.into_iter().map(Into::into).collect();
    }
    user.is_onboarded = true;
    user.profile_completeness = 100;
    user.updated_at = chrono::Utc::now();

    let saved = state.users.save(user).await?;
    Ok(HttpResponse::Ok().json(ProfileResponse::from(&saved)))
}

/// POST /api/users/social-media/connect
pub async fn connect_social(
    state: web::Data<AppState>,
    identity: Identity,
    body: web::Json<ConnectSocialRequest>,
) -> AppResult<HttpResponse> {
    let req = body.into_inner();
    if req.access_token.is_empty() {
        return Err(AppError::BadRequest("Access token is required".to_string()));
    }

    let mut user = state
        .users
        .find_by_id(identity.user_id)
        .await?
        .ok_or_else(|| AppError::NotFound("User not found".to_string()))?;

    match req.platform.as_str() {
        "facebook" => {
            let page_id = req
                .page_id
                .ok_or_else(|| AppError::BadRequest("pageId is required".to_string()))?;
            user.social_accounts.facebook.account_id = Some(page_id);
            user.social_accounts.facebook.access_token = Some(req.access_token);
            user.social_accounts.facebook.connected = true;
        }
        "linkedin" => {
            let profile_id = req
                .profile_id
                .ok_or_else(|| AppError::BadRequest("profileId is required".to_string()))?;
            user.social_accounts.linkedin.account_id = Some(profile_id);
            user.social_accounts.linkedin.access_token = Some(req.access_token);
            user.social_accounts.linkedin.connected = true;
        }
        other => {
            return Err(AppError::BadRequest(format!("Invalid platform: {other}")));
        }
    }

    user.recompute_completeness();
    user.updated_at = chrono::Utc::now();
    let saved = state.users.save(user).await?;

    Ok(HttpResponse::Ok().json(ApiResponse::ok_with_message(
        ProfileResponse::from(&saved),
        format!("{} account connected successfully", req.platform),
    )))
}
