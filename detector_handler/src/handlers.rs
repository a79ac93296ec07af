
use anyhow::{bail, Context};
use axum::extract::rejection::JsonRejection;
use axum::extract::{Query, State};
use axum::http::header::CONTENT_TYPE;
use axum::http::{HeaderMap, HeaderValue, StatusCode};
use axum::response::{IntoResponse, Response};
use axum::response::Json;
use emotion_detection::service::common_structs::AnalysisResult;
use emotion_detection::service::CommonService;
use emotion_detection::utilities::format_report;
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};
use tracing::{info, warn};


#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Eq)]
pub struct AnalyzeRequest {
    pub text: String,
}

#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Eq, Default)]
pub struct DetectorParams {
    #[serde(rename = "textToAnalyze")]
    pub text_to_analyze: Option<String>,
}


fn build_response(status: StatusCode, content_type: &'static str, body: String) -> Response {
    let mut headers = HeaderMap::new();
    headers.insert(CONTENT_TYPE, HeaderValue::from_static(content_type));
    (status, headers, body).into_response()
}

fn build_json_response(status: StatusCode, body: &Value) -> Response {
    build_response(status, "application/json", body.to_string())
}

fn build_error_response(message: &str) -> Response {
    build_json_response(StatusCode::BAD_REQUEST, &json!({
        "success": false,
        "message": message
    }))
}

fn result_status(result: &AnalysisResult) -> StatusCode {
    if result.is_failed() { StatusCode::BAD_GATEWAY } else { StatusCode::OK }
}

fn parse_request(params: Value) -> anyhow::Result<AnalyzeRequest> {
    if !params.is_object() {
        bail!("Body must be a JSON object.");
    }
    serde_json::from_value::<AnalyzeRequest>(params).context("Body must contain a string field `text`.")
}


// GET /emotionDetector?textToAnalyze=...
pub async fn emotion_detector(
    State(service): State<CommonService>,
    Query(params): Query<DetectorParams>
) -> Response {
    let text = params.text_to_analyze.unwrap_or_default();
    let result = service.emotion.analyze(&text).await;
    info!("emotion detector result: {:?}", result);

    match result.scores() {
        Some(scores) => build_response(StatusCode::OK, "text/plain; charset=utf-8", format_report(&scores)),
        None => build_json_response(result_status(&result), &json!(result)),
    }
}

// POST / {"text": "..."}
pub async fn analyze_received(
    State(service): State<CommonService>,
    body: Result<Json<Value>, JsonRejection>
) -> Response {
    let params = match body {
        Ok(Json(params)) => params,
        Err(rejection) => {
            warn!("Error reading analyze body: {}", rejection);
            return build_error_response(&rejection.body_text());
        },
    };

    let request = match parse_request(params) {
        Ok(request) => request,
        Err(error) => {
            warn!("Error converting to analyze request: {:?}", error);
            return build_error_response(&error.to_string());
        },
    };

    let result = service.emotion.analyze(&request.text).await;
    info!("analyze result: {:?}", result);
    build_json_response(result_status(&result), &json!(result))
}
