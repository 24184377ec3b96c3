use actix_web::{web, HttpResponse};
use validator::Validate;

use crate::{
    entities::profile::{ImportProfileRequest, ProfileData, ProfileUpdatedResponse},
    errors::AppError,
    utils::valid_uuid::valid_uuid,
    AppState,
};

pub async fn import_profile(
    state: web::Data<AppState>,
    payload: web::Json<ImportProfileRequest>,
) -> Result<HttpResponse, AppError> {
    let request = payload.into_inner();
    request.validate()?;

    let created = state.profile_handler
        .create_from_url(&request.portfolio_url).await?;

    Ok(HttpResponse::Created().json(created))
}

pub async fn get_profile(
    state: web::Data<AppState>,
    profile_id: web::Path<String>,
) -> Result<HttpResponse, AppError> {
    let id = valid_uuid(&profile_id, "profile")?;
    let profile = state.profile_handler.get_profile(id).await?;

    Ok(HttpResponse::Ok().json(profile))
}

pub async fn update_profile(
    state: web::Data<AppState>,
    profile_id: web::Path<String>,
    payload: web::Json<ProfileData>,
) -> Result<HttpResponse, AppError> {
    let id = valid_uuid(&profile_id, "profile")?;
    let profile = state.profile_handler
        .update_profile(id, payload.into_inner()).await?;

    Ok(HttpResponse::Ok().json(ProfileUpdatedResponse {
        message: "Profile updated successfully.".to_string(),
        profile,
    }))
}

pub async fn get_profile_card(
    state: web::Data<AppState>,
    profile_id: web::Path<String>,
) -> Result<HttpResponse, AppError> {
    let id = valid_uuid(&profile_id, "profile")?;
    let card = state.profile_handler
        .profile_card(id, &state.public_base_url).await?;

    Ok(HttpResponse::Ok().json(card))
}

pub async fn list_sample_portfolios(state: web::Data<AppState>) -> HttpResponse {
    HttpResponse::Ok().json(state.profile_handler.parser.sample_portfolios())
}
