use actix_web::{web, HttpResponse, Responder};
use serde::{Deserialize, Serialize};

use crate::embed::{resolve_embed_url, VideoProvider};

#[derive(Debug, Deserialize)]
pub struct EmbedQuery {
    #[serde(default)]
    pub url: String,
}

#[derive(Debug, Serialize)]
struct EmbedLookupResponse {
    supported: bool,
    provider: Option<VideoProvider>,
    video_id: Option<String>,
    embed_url: Option<String>,
}

pub async fn resolve_embed(query: web::Query<EmbedQuery>) -> impl Responder {
    let body = match resolve_embed_url(&query.url) {
        Some(embed) => EmbedLookupResponse {
            supported: true,
            provider: Some(embed.provider),
            video_id: Some(embed.video_id),
            embed_url: Some(embed.url),
        },
        None => EmbedLookupResponse {
            supported: false,
            provider: None,
            video_id: None,
            embed_url: None,
        },
    };

    HttpResponse::Ok().json(body)
}
