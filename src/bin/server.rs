use std::net::SocketAddr;

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::routing::{get, post};
use axum::{Json, Router};
use base64::Engine;
use image::ImageEncoder;
use image::codecs::png::PngEncoder;
use rayon::prelude::*;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tower_http::cors::CorsLayer;
use tower_http::services::ServeDir;

use attractor::config::{Field, Params};
use attractor::controls::{self, Control};
use attractor::error::ParamError;
use attractor::lorenz::{Extent, Point};
use attractor::randomize::{randomize_entropy, randomize_seeded};
use attractor::render;
use attractor::view::{Camera, Rotation, clamp_viewport};

const PREVIEW_W: usize = 320;
const PREVIEW_H: usize = 240;

/// Upper limit on seeds per `/api/candidates` request.
const MAX_CANDIDATES: usize = 16;

#[derive(Error, Debug)]
enum ApiError {
    #[error(transparent)]
    Param(#[from] ParamError),

    #[error("Too many candidate seeds: {got} (max {max})")]
    TooManyCandidates { got: usize, max: usize },

    #[error("PNG encode failed: {0}")]
    Encode(#[from] image::ImageError),

    #[error("Worker task failed: {0}")]
    Join(#[from] tokio::task::JoinError),
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = match self {
            ApiError::Param(_) | ApiError::TooManyCandidates { .. } => StatusCode::BAD_REQUEST,
            _ => StatusCode::INTERNAL_SERVER_ERROR,
        };
        eprintln!("request failed ({}): {}", status, self);
        let body = Json(serde_json::json!({ "error": self.to_string() }));
        (status, body).into_response()
    }
}

#[derive(Deserialize)]
struct GenerateRequest {
    sigma: Option<f64>,
    rho: Option<f64>,
    beta: Option<f64>,
    dt: Option<f64>,
    steps: Option<f64>,
    speed: Option<f64>,
    initial: Option<[f64; 3]>,
    // View
    width: Option<usize>,
    height: Option<usize>,
    elapsed: Option<f64>,
}

#[derive(Serialize)]
struct GenerateResponse {
    params: Params,
    labels: Vec<Label>,
    points: Vec<Point>,
    extent: Option<Extent>,
    rotation: Rotation,
    preview: String,
    timings: Vec<TimingEntry>,
    width: usize,
    height: usize,
}

#[derive(Serialize)]
struct Label {
    field: Field,
    text: String,
}

#[derive(Serialize)]
struct TimingEntry {
    name: String,
    ms: f64,
}

#[derive(Deserialize)]
struct EditRequest {
    params: Params,
    field: String,
    value: f64,
}

#[derive(Deserialize)]
struct RandomizeRequest {
    params: Params,
    seed: Option<u64>,
}

#[derive(Deserialize)]
struct CandidatesRequest {
    params: Params,
    seeds: Vec<u64>,
}

#[derive(Serialize)]
struct Candidate {
    seed: u64,
    params: Params,
    extent: Option<Extent>,
    preview: String,
}

fn encode_png(rgba: &[u8], w: usize, h: usize) -> Result<String, image::ImageError> {
    let mut buf = Vec::new();
    let encoder = PngEncoder::new(&mut buf);
    encoder.write_image(rgba, w as u32, h as u32, image::ExtendedColorType::Rgba8)?;
    let b64 = base64::engine::general_purpose::STANDARD.encode(&buf);
    Ok(format!("data:image/png;base64,{}", b64))
}

fn labels(params: &Params) -> Vec<Label> {
    Field::ALL
        .into_iter()
        .map(|field| Label {
            field,
            text: controls::format_value(field, params.get(field)),
        })
        .collect()
}

async fn defaults_handler() -> Json<Params> {
    Json(Params::default())
}

async fn controls_handler() -> Json<Vec<Control>> {
    Json(controls::controls())
}

async fn generate_handler(Json(req): Json<GenerateRequest>) -> Result<Json<GenerateResponse>, ApiError> {
    let (width, height) = clamp_viewport(req.width.unwrap_or(1024), req.height.unwrap_or(768));
    let elapsed = req.elapsed.unwrap_or(0.0);

    let defaults = Params::default();
    let params = Params {
        sigma: req.sigma.unwrap_or(defaults.sigma),
        rho: req.rho.unwrap_or(defaults.rho),
        beta: req.beta.unwrap_or(defaults.beta),
        dt: req.dt.unwrap_or(defaults.dt),
        speed: req.speed.unwrap_or(defaults.speed),
        initial: req.initial.unwrap_or(defaults.initial),
        ..defaults
    };
    // Commit only clamped values.
    let params = params
        .with(Field::Steps, req.steps.unwrap_or(defaults.steps as f64))
        .clamped();
    params.validate()?;

    let response = tokio::task::spawn_blocking(move || -> Result<GenerateResponse, ApiError> {
        let (frame, timings) = attractor::generate(&params, width, height, elapsed);

        eprintln!(
            "generated {} points ({}x{}) in {:.1} ms",
            frame.points.len(),
            width,
            height,
            timings.last().map_or(0.0, |t| t.ms)
        );

        let timing_entries = timings
            .iter()
            .map(|t| TimingEntry {
                name: t.name.to_string(),
                ms: t.ms,
            })
            .collect();

        Ok(GenerateResponse {
            params,
            labels: labels(&params),
            preview: encode_png(&frame.rgba, width, height)?,
            points: frame.points,
            extent: frame.extent,
            rotation: frame.rotation,
            timings: timing_entries,
            width,
            height,
        })
    })
    .await??;

    Ok(Json(response))
}

async fn edit_handler(Json(req): Json<EditRequest>) -> Result<Json<Params>, ApiError> {
    req.params.validate()?;
    let field: Field = req.field.parse()?;
    Ok(Json(req.params.with(field, req.value)))
}

async fn randomize_handler(Json(req): Json<RandomizeRequest>) -> Result<Json<Params>, ApiError> {
    req.params.validate()?;
    let next = match req.seed {
        Some(seed) => randomize_seeded(&req.params, seed),
        None => randomize_entropy(&req.params),
    };
    Ok(Json(next))
}

fn check_candidate_count(n: usize) -> Result<(), ApiError> {
    if n > MAX_CANDIDATES {
        return Err(ApiError::TooManyCandidates {
            got: n,
            max: MAX_CANDIDATES,
        });
    }
    Ok(())
}

async fn candidates_handler(
    Json(req): Json<CandidatesRequest>,
) -> Result<Json<Vec<Candidate>>, ApiError> {
    req.params.validate()?;
    check_candidate_count(req.seeds.len())?;
    let previous = req.params;

    let candidates = tokio::task::spawn_blocking(move || -> Result<Vec<Candidate>, ApiError> {
        let camera = Camera::new(PREVIEW_W, PREVIEW_H);
        req.seeds
            .par_iter()
            .map(|&seed| {
                let params = randomize_seeded(&previous, seed);
                let points = attractor::lorenz::generate_trajectory(&params);
                let rgba = render::render_trajectory(&points, &camera, Rotation::default());
                Ok(Candidate {
                    seed,
                    params,
                    extent: Extent::of(&points),
                    preview: encode_png(&rgba, PREVIEW_W, PREVIEW_H)?,
                })
            })
            .collect()
    })
    .await??;

    Ok(Json(candidates))
}

#[tokio::main]
async fn main() {
    let frontend = ServeDir::new("frontend");

    let app = Router::new()
        .route("/api/defaults", get(defaults_handler))
        .route("/api/controls", get(controls_handler))
        .route("/api/generate", post(generate_handler))
        .route("/api/edit", post(edit_handler))
        .route("/api/randomize", post(randomize_handler))
        .route("/api/candidates", post(candidates_handler))
        .fallback_service(frontend)
        .layer(CorsLayer::permissive());

    let addr = SocketAddr::from(([127, 0, 0, 1], 3000));
    eprintln!("attractor server at http://{}", addr);

    let listener = tokio::net::TcpListener::bind(addr).await.unwrap();
    axum::serve(listener, app).await.unwrap();
}
