//! Image pool handlers.
//!
//! The pool feeds the draft assembler's image selection. Uploads happen out
//! of band (multipart handling lives outside this service).

use actix_web::{HttpResponse, web};

use postpilot_shared::ApiResponse;
use postpilot_shared::dto::{ImageDto, ImageListResponse, ImageMetadataDto};

use crate::middleware::auth::Identity;
use crate::middleware::error::AppResult;
use crate::state::AppState;

/// GET /api/images
pub async fn list(state: web::Data<AppState>, _identity: Identity) -> AppResult<HttpResponse> {
    let images = state.assets.list_images().await?;

    Ok(HttpResponse::Ok().json(ImageListResponse {
        total: images.len(),
        images: images.iter().map(ImageDto::from).collect(),
    }))
}

/// GET /api/images/{filename}/metadata
pub async fn metadata(
    state: web::Data<AppState>,
    _identity: Identity,
    path: web::Path<String>,
) -> AppResult<HttpResponse> {
    let filename = path.into_inner();
    let metadata = state.assets.image_metadata(&filename).await?;

    Ok(HttpResponse::Ok().json(ImageMetadataDto::from(&metadata)))
}

/// DELETE /api/images/{filename}
pub async fn delete(
    state: web::Data<AppState>,
    _identity: Identity,
    path: web::Path<String>,
) -> AppResult<HttpResponse> {
    let filename = path.into_inner();
    state.assets.delete_image(&filename).await?;

    Ok(HttpResponse::Ok().json(ApiResponse::ok_with_message(
        (),
        "Image deleted successfully",
    )))
}
