use std::net::SocketAddr;

use axum::extract::{DefaultBodyLimit, FromRef, Multipart, Path, State};
use axum::response::Html;
use axum::routing::{get, post};
use axum::{Json, Router};
use tower_http::limit::RequestBodyLimitLayer;
use tower_http::normalize_path::NormalizePathLayer;
use tower_http::trace::TraceLayer;
use tracing::info;

use crate::config::Config;
use crate::controllers::paste;
use crate::db::Database;
use crate::models::Paste;
use crate::render;

#[derive(Clone, FromRef)]
pub struct AppState {
    pub config: Config,
    pub database: Database,
}

pub async fn run(state: AppState) -> anyhow::Result<()> {
    let addr = SocketAddr::from(([127, 0, 0, 1], state.config.port));

    info!("listening on {addr}");

    axum::Server::bind(&addr)
        .serve(build_router(state).into_make_service())
        .await?;

    Ok(())
}

pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/api/paste", post(create_paste))
        .route("/:id", get(display_paste))
        .layer(DefaultBodyLimit::disable())
        .layer(RequestBodyLimitLayer::new(
            state.config.limits.max_upload_size,
        ))
        .layer(TraceLayer::new_for_http())
        .route_layer(NormalizePathLayer::trim_trailing_slash())
        .with_state(state)
}

async fn display_paste(
    State(db): State<Database>,
    Path(id): Path<String>,
) -> crate::ApiResult<Html<String>> {
    let paste = paste::fetch(&db, &id).await?;
    Ok(Html(render::paste_page(&paste)))
}

async fn create_paste(
    State(db): State<Database>,
    mut multipart: Multipart,
) -> crate::ApiResult<Json<Paste>> {
    let mut text = None;
    let mut language = None;

    while let Some(field) = multipart.next_field().await? {
        let name = field.name().map(str::to_owned);
        match name.as_deref() {
            Some("text") => text = Some(field.text().await?),
            Some("language") => language = Some(field.text().await?),
            _ => {}
        }
    }

    // absent fields behave like empty ones
    let paste = paste::create(
        &db,
        text.unwrap_or_default(),
        language.unwrap_or_default(),
    )
    .await?;

    Ok(Json(paste))
}
