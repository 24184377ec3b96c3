use actix_web::{web, HttpResponse};

use crate::{
    draft::DraftCommand,
    errors::AppError,
    utils::valid_uuid::valid_uuid,
    AppState,
};

pub async fn open_draft(
    state: web::Data<AppState>,
    profile_id: web::Path<String>,
) -> Result<HttpResponse, AppError> {
    let id = valid_uuid(&profile_id, "profile")?;
    let snapshot = state.draft_handler.open(id).await?;

    Ok(HttpResponse::Created().json(snapshot))
}

pub async fn get_draft(
    state: web::Data<AppState>,
    draft_id: web::Path<String>,
) -> Result<HttpResponse, AppError> {
    let id = valid_uuid(&draft_id, "draft")?;
    Ok(HttpResponse::Ok().json(state.draft_handler.get(id)?))
}

pub async fn apply_command(
    state: web::Data<AppState>,
    draft_id: web::Path<String>,
    command: web::Json<DraftCommand>,
) -> Result<HttpResponse, AppError> {
    let id = valid_uuid(&draft_id, "draft")?;
    let snapshot = state.draft_handler.apply(id, &command)?;

    Ok(HttpResponse::Ok().json(snapshot))
}

pub async fn undo_draft(
    state: web::Data<AppState>,
    draft_id: web::Path<String>,
) -> Result<HttpResponse, AppError> {
    let id = valid_uuid(&draft_id, "draft")?;
    Ok(HttpResponse::Ok().json(state.draft_handler.undo(id)?))
}

pub async fn validate_draft(
    state: web::Data<AppState>,
    draft_id: web::Path<String>,
) -> Result<HttpResponse, AppError> {
    let id = valid_uuid(&draft_id, "draft")?;
    Ok(HttpResponse::Ok().json(state.draft_handler.validate(id)?))
}

pub async fn save_draft(
    state: web::Data<AppState>,
    draft_id: web::Path<String>,
) -> Result<HttpResponse, AppError> {
    let id = valid_uuid(&draft_id, "draft")?;
    let profile = state.draft_handler.save(id).await?;

    Ok(HttpResponse::Ok().json(profile))
}

pub async fn discard_draft(
    state: web::Data<AppState>,
    draft_id: web::Path<String>,
) -> Result<HttpResponse, AppError> {
    let id = valid_uuid(&draft_id, "draft")?;
    state.draft_handler.discard(id)?;

    Ok(HttpResponse::NoContent().finish())
}
