use axum::extract::State;
use axum::http::{StatusCode, header};
use axum::response::IntoResponse;
use axum::{Json, Router, routing::get, routing::post};
use clap::Parser;
use serde_json::{Value, json};

/// 1x1 transparent PNG.
const PIXEL_PNG: &[u8] = &[
    0x89, 0x50, 0x4E, 0x47, 0x0D, 0x0A, 0x1A, 0x0A, 0x00, 0x00, 0x00, 0x0D, 0x49, 0x48, 0x44,
    0x52, 0x00, 0x00, 0x00, 0x01, 0x00, 0x00, 0x00, 0x01, 0x08, 0x06, 0x00, 0x00, 0x00, 0x1F,
    0x15, 0xC4, 0x89, 0x00, 0x00, 0x00, 0x0D, 0x49, 0x44, 0x41, 0x54, 0x78, 0x9C, 0x63, 0x00,
    0x01, 0x00, 0x00, 0x05, 0x00, 0x01, 0x0D, 0x0A, 0x2D, 0xB4, 0x00, 0x00, 0x00, 0x00, 0x49,
    0x45, 0x4E, 0x44, 0xAE, 0x42, 0x60, 0x82,
];

#[derive(Parser, Debug, Clone)]
#[command(version, about, long_about = None)]
struct Args {
    #[arg(short, long)]
    port: u16,
}

/// Answers like the media JSON API: a stream link for any body carrying a `url`.
async fn api_json(State(args): State<Args>, Json(body): Json<Value>) -> impl IntoResponse {
    println!("Request received {}", body);

    match body.get("url").and_then(Value::as_str) {
        Some(_) => (
            StatusCode::OK,
            Json(json!({
                "status": "stream",
                "url": format!("http://localhost:{}/assets/pixel.png", args.port),
            })),
        ),
        None => (
            StatusCode::BAD_REQUEST,
            Json(json!({"status": "error", "text": "missing url"})),
        ),
    }
}

async fn pixel() -> impl IntoResponse {
    (
        [(header::CONTENT_TYPE, "image/png; charset=binary")],
        PIXEL_PNG,
    )
}

fn router(port: u16) -> Router {
    let state = Args { port };
    Router::new()
        .route("/api/json", post(api_json))
        .route("/assets/pixel.png", get(pixel))
        .with_state(state)
}

#[tokio::main]
async fn main() {
    let args: Args = Args::parse();
    let listener = tokio::net::TcpListener::bind(format!("0.0.0.0:{}", args.port))
        .await
        .unwrap();
    axum::serve(listener, router(args.port)).await.unwrap();
}
