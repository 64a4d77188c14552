//! Post pipeline handlers - generate, list, edit, approve-and-publish.

use actix_web::{HttpResponse, web};
use serde::Deserialize;
use uuid::Uuid;

use postpilot_core::domain::DraftEdit;
use postpilot_core::ports::PostQuery;
use postpilot_shared::ApiResponse;
use postpilot_shared::dto::{
    AnalyticsEventDto, ApproveResponse, PostListResponse, PostResponse, PublishResultDto,
    UpdatePostRequest,
};

use crate::middleware::auth::Identity;
use crate::middleware::error::{AppError, AppResult};
use crate::state::AppState;

/// POST /api/posts - generate a new draft for the authenticated user.
///
/// Rate-limited per user: generation fans out to the completion endpoint.
pub async fn generate(state: web::Data<AppState>, identity: Identity) -> AppResult<HttpResponse> {
    if let Some(limiter) = &state.rate_limiter {
        match limiter.check(&identity.user_id.to_string()).await {
            Ok(result) if !result.allowed => {
                return Err(AppError::TooManyRequests {
                    retry_after_secs: result.reset_after.as_secs(),
                });
            }
            Ok(_) => {}
            Err(e) => {
                // fail open
                tracing::error!(error = %e, "rate limiter error, allowing request");
            }
        }
    }

    let post = state.generator.generate_draft(identity.user_id).await?;
    Ok(HttpResponse::Created().json(PostResponse::from(&post)))
}

#[derive(Debug, Deserialize)]
pub struct ListParams {
    status: Option<String>,
    limit: Option<u64>,
    skip: Option<u64>,
}

/// GET /api/posts?status=&limit=&skip=
pub async fn list(
    state: web::Data<AppState>,
    identity: Identity,
    params: web::Query<ListParams>,
) -> AppResult<HttpResponse> {
    let status = match params.status.as_deref() {
        None | Some("all") => None,
        Some(value) => Some(
            value
                .parse()
                .map_err(|e: String| AppError::BadRequest(e))?,
        ),
    };

    let query = PostQuery {
        status,
        limit: params.limit.unwrap_or(20).min(100),
        skip: params.skip.unwrap_or(0),
    };

    let posts = state.posts.find_by_user(identity.user_id, &query).await?;
    let total = state.posts.count_by_user(identity.user_id, status).await?;

    Ok(HttpResponse::Ok().json(PostListResponse {
        posts: posts.iter().map(PostResponse::from).collect(),
        total,
        limit: query.limit,
        skip: query.skip,
    }))
}

/// GET /api/posts/{post_id}
pub async fn get(
    state: web::Data<AppState>,
    identity: Identity,
    path: web::Path<Uuid>,
) -> AppResult<HttpResponse> {
    let post_id = path.into_inner();
    let post = state
        .posts
        .find_by_id(post_id)
        .await?
        .ok_or_else(|| AppError::NotFound("Post not found".to_string()))?;
    post.ensure_owned_by(identity.user_id)?;

    Ok(HttpResponse::Ok().json(PostResponse::from(&post)))
}

/// PUT /api/posts/{post_id} - edit a draft.
pub async fn update(
    state: web::Data<AppState>,
    identity: Identity,
    path: web::Path<Uuid>,
    body: web::Json<UpdatePostRequest>,
) -> AppResult<HttpResponse> {
    let post_id = path.into_inner();
    let req = body.into_inner();

    let mut post = state
        .posts
        .find_by_id(post_id)
        .await?
        .ok_or_else(|| AppError::NotFound("Post not found".to_string()))?;
    post.ensure_owned_by(identity.user_id)?;

    post.apply_edit(DraftEdit {
        caption: req.caption,
        hashtags: req.hashtags,
        approval_notes: req.approval_notes,
    })?;

    let saved = state.posts.save(post).await?;
    Ok(HttpResponse::Ok().json(PostResponse::from(&saved)))
}

/// POST /api/posts/{post_id}/approve - publish to every configured platform.
///
/// Returns 200 with per-platform results even when some platforms fail; the
/// post's own status records whether everything stuck.
pub async fn approve(
    state: web::Data<AppState>,
    identity: Identity,
    path: web::Path<Uuid>,
) -> AppResult<HttpResponse> {
    let post_id = path.into_inner();
    let (post, outcomes) = state
        .publish
        .approve_and_publish(identity.user_id, post_id)
        .await?;

    Ok(HttpResponse::Ok().json(ApproveResponse {
        post: PostResponse::from(&post),
        social_results: outcomes.iter().map(PublishResultDto::from).collect(),
    }))
}

/// DELETE /api/posts/{post_id} - drafts only.
pub async fn delete(
    state: web::Data<AppState>,
    identity: Identity,
    path: web::Path<Uuid>,
) -> AppResult<HttpResponse> {
    let post_id = path.into_inner();
    let post = state
        .posts
        .find_by_id(post_id)
        .await?
        .ok_or_else(|| AppError::NotFound("Post not found".to_string()))?;
    post.ensure_owned_by(identity.user_id)?;
    post.ensure_deletable()?;

    state.posts.delete(post_id).await?;
    Ok(HttpResponse::Ok().json(ApiResponse::ok_with_message((), "Post deleted successfully")))
}

/// GET /api/posts/analytics/all - latest events for the user.
pub async fn analytics(state: web::Data<AppState>, identity: Identity) -> AppResult<HttpResponse> {
    let events = state
        .analytics
        .recent_for_user(identity.user_id, 100)
        .await?;

    let events: Vec<AnalyticsEventDto> = events.iter().map(Into::into).collect();
    Ok(HttpResponse::Ok().json(events))
}
