//! HTTP surface: the form page, its submit action and a JSON equivalent.

use axum::{
    extract::{Form, Json, State},
    http::{Method, StatusCode},
    response::Html,
    routing::{get, post},
    Router,
};
use medisurv_form::{PredictError, PredictionHandler, RawInputs, TextInputs};
use serde::Serialize;
use std::net::SocketAddr;
use std::sync::Arc;
use tower_http::cors::{Any, CorsLayer};

use crate::page::{render_page, Banner};

type SharedHandler = Arc<PredictionHandler>;

#[derive(Debug, Serialize)]
struct FeatureDto {
    name: &'static str,
    value: f64,
}

#[derive(Debug, Serialize)]
#[serde(untagged)]
enum PredictResponse {
    Prediction {
        label: i64,
        outcome: medisurv_form::Outcome,
        message: &'static str,
        features: Vec<FeatureDto>,
    },
    Error {
        error: String,
    },
}

pub fn router(handler: SharedHandler) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods([Method::GET, Method::POST])
        .allow_headers(Any);

    Router::new()
        .route("/", get(index))
        .route("/health", get(health))
        .route("/predict", post(predict_form))
        .route("/api/predict", post(predict_api))
        .layer(cors)
        .with_state(handler)
}

/// Serve until ctrl-c.
pub async fn serve(addr: SocketAddr, handler: SharedHandler) -> std::io::Result<()> {
    let listener = tokio::net::TcpListener::bind(addr).await?;
    println!("medisurv listening on http://{}", listener.local_addr()?);
    axum::serve(listener, router(handler))
        .with_graceful_shutdown(async {
            let _ = tokio::signal::ctrl_c().await;
            log::info!("shutting down");
        })
        .await
}

fn status_for(err: &PredictError) -> StatusCode {
    match err {
        PredictError::Form(_) => StatusCode::UNPROCESSABLE_ENTITY,
        _ => StatusCode::INTERNAL_SERVER_ERROR,
    }
}

async fn health() -> &'static str {
    "ok"
}

async fn index() -> Html<String> {
    Html(render_page(&TextInputs::default(), None))
}

async fn predict_form(
    State(handler): State<SharedHandler>,
    Form(values): Form<TextInputs>,
) -> (StatusCode, Html<String>) {
    let result = values
        .parse()
        .map_err(PredictError::from)
        .and_then(|raw| handler.submit(&raw));
    match result {
        Ok(prediction) => (
            StatusCode::OK,
            Html(render_page(&values, Some(&Banner::Outcome(prediction.outcome)))),
        ),
        Err(err) => {
            log::error!("form submission failed: {err}");
            (
                status_for(&err),
                Html(render_page(&values, Some(&Banner::Error(err.to_string())))),
            )
        }
    }
}

async fn predict_api(
    State(handler): State<SharedHandler>,
    Json(raw): Json<RawInputs>,
) -> (StatusCode, Json<PredictResponse>) {
    match handler.submit(&raw) {
        Ok(prediction) => (
            StatusCode::OK,
            Json(PredictResponse::Prediction {
                label: prediction.label,
                outcome: prediction.outcome,
                message: prediction.outcome.message(),
                features: prediction
                    .features
                    .named()
                    .map(|(name, value)| FeatureDto { name, value })
                    .collect(),
            }),
        ),
        Err(err) => {
            log::error!("api prediction failed: {err}");
            (
                status_for(&err),
                Json(PredictResponse::Error {
                    error: err.to_string(),
                }),
            )
        }
    }
}
