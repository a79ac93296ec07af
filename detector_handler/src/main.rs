pub mod handlers;

use axum::Router;
use axum::routing::{get, post};
use emotion_detection::service::CommonService;
use handlers::{analyze_received, emotion_detector};
use lambda_http::{run, tracing, Error};
use std::env::set_var;


#[tokio::main]
async fn main() -> Result<(), Error> {
    set_var("AWS_LAMBDA_HTTP_IGNORE_STAGE_IN_PATH", "true");

    tracing::init_default_subscriber();

    let service = CommonService::new();
    tracing::info!("emotion endpoint: {}", service.emotion.endpoint());

    run(router(service)).await
}

pub fn router(service: CommonService) -> Router {
    Router::new()
        .route("/", post(analyze_received))
        .route("/emotionDetector", get(emotion_detector))
        .with_state(service)
}
