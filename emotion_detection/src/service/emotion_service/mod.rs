pub mod errors;
pub mod structs;

use reqwest::{header::{HeaderMap, HeaderName, HeaderValue, CONTENT_TYPE}, Client, StatusCode};
use serde_json::{Map, Value};
use tracing::{debug, error, warn};

use errors::AnalyzeError;
use structs::EmotionPredictRequest;
use crate::env_keys::{EMOTION_MODEL_ID, EMOTION_PREDICT_URL};
use super::common_structs::{AnalysisResult, Emotion, EmotionScores};

pub const EMOTION_PREDICT_ENDPOINT: &str = "https://sn-watson-emotion.labs.skills.network/v1/watson.runtime.nlp.v1/NlpService/EmotionPredict";
pub const DEFAULT_MODEL_ID: &str = "emotion_aggregated-workflow_lang_en_stock";
pub const MODEL_ID_HEADER: &str = "grpc-metadata-mm-model-id";

const EMOTION_PREDICTIONS_KEY: &str = "emotionPredictions";
const EMOTION_KEY: &str = "emotion";


/// Client for the remote emotion prediction service.
///
/// Holds no per-call state, so a single instance can be cloned into concurrent tasks.
/// No timeout is applied here; pass a configured [`Client`] to [`EmotionService::with_client`] for one.
#[derive(Debug, Clone)]
pub struct EmotionService {
    client: Client,
    endpoint: String,
    headers: HeaderMap,
}

impl EmotionService {
    pub fn new() -> Self {
        let endpoint = std::env::var(EMOTION_PREDICT_URL).unwrap_or(EMOTION_PREDICT_ENDPOINT.to_owned());
        let model_id = std::env::var(EMOTION_MODEL_ID).unwrap_or(DEFAULT_MODEL_ID.to_owned());
        Self::with_client(Client::new(), &endpoint, &model_id)
    }

    pub fn with_client(client: Client, endpoint: &str, model_id: &str) -> Self {
        let model_id = HeaderValue::from_str(model_id).unwrap_or_else(|_| {
            warn!("invalid model id {:?}, falling back to {}", model_id, DEFAULT_MODEL_ID);
            HeaderValue::from_static(DEFAULT_MODEL_ID)
        });

        let mut headers = HeaderMap::new();
        headers.insert(HeaderName::from_static(MODEL_ID_HEADER), model_id);
        headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));

        Self {
            client,
            endpoint: endpoint.to_owned(),
            headers,
        }
    }

    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }

    /// Scores `text` against the five tracked emotions.
    ///
    /// Blank text and a 400 from the service both yield [`AnalysisResult::NoSignal`].
    /// Every other failure is logged and returned as [`AnalysisResult::Failed`].
    pub async fn analyze(&self, text: &str) -> AnalysisResult {
        if text.trim().is_empty() {
            debug!("blank text, skipping emotion request");
            return AnalysisResult::NoSignal;
        }

        match self.request_scores(text).await {
            Ok(Some(scores)) => AnalysisResult::Scores(scores),
            Ok(None) => AnalysisResult::NoSignal,
            Err(error) => {
                error!(kind = ?error.kind(), detail = error.detail(), "{}", error);
                AnalysisResult::Failed(error)
            },
        }
    }

    async fn request_scores(&self, text: &str) -> Result<Option<EmotionScores>, AnalyzeError> {
        let body = serde_json::to_string(&EmotionPredictRequest::new(text))
            .map_err(|error| AnalyzeError::unexpected(error.to_string()))?;

        let response = self.client
            .post(&self.endpoint)
            .headers(self.headers.clone())
            .body(body)
            .send()
            .await?;

        let status = response.status();
        if status == StatusCode::BAD_REQUEST {
            let body_string = response.text().await.unwrap_or_default();
            warn!("emotion service rejected the text: {}", body_string);
            return Ok(None);
        }
        if !status.is_success() {
            let body_string = response.text().await.unwrap_or_default();
            return Err(AnalyzeError::Transport {
                detail: format!("status {}: {}", status, body_string)
            });
        }

        let body_string = response.text().await?;
        debug!("response_body: {}", body_string);
        parse_scores(&body_string).map(Some)
    }
}

impl Default for EmotionService {
    fn default() -> Self {
        Self::new()
    }
}


/// Extracts `emotionPredictions[0].emotion` from a service response body.
pub fn parse_scores(body: &str) -> Result<EmotionScores, AnalyzeError> {
    let response = serde_json::from_str::<Value>(body)?;
    let response = as_object(&response, "response body")?;

    let prediction = response
        .get(EMOTION_PREDICTIONS_KEY)
        .ok_or_else(|| AnalyzeError::missing(EMOTION_PREDICTIONS_KEY))?
        .as_array()
        .ok_or_else(|| AnalyzeError::unexpected("emotionPredictions is not an array"))?
        .first()
        .ok_or_else(|| AnalyzeError::unexpected("emotionPredictions is empty"))?;

    let emotion = as_object(prediction, "emotion prediction")?
        .get(EMOTION_KEY)
        .ok_or_else(|| AnalyzeError::missing(EMOTION_KEY))?;
    let emotion = as_object(emotion, EMOTION_KEY)?;

    let mut values = [0.0; 5];
    for (value, key) in values.iter_mut().zip(Emotion::ALL) {
        let score = emotion.get(key.as_str()).ok_or_else(|| AnalyzeError::missing(key.as_str()))?;
        *value = score
            .as_f64()
            .ok_or_else(|| AnalyzeError::unexpected(format!("score for {} is not a number: {}", key, score)))?;
    }

    let [anger, disgust, fear, joy, sadness] = values;
    Ok(EmotionScores::new(anger, disgust, fear, joy, sadness))
}

fn as_object<'a>(value: &'a Value, name: &str) -> Result<&'a Map<String, Value>, AnalyzeError> {
    value
        .as_object()
        .ok_or_else(|| AnalyzeError::unexpected(format!("{} is not a JSON object: {}", name, value)))
}


#[cfg(test)]
mod tests {
    use super::*;
    use super::errors::ErrorKind;

    #[test]
    fn parses_first_prediction() {
        let body = r#"{"emotionPredictions": [
            {"emotion": {"anger": 0.1, "disgust": 0.05, "fear": 0.2, "joy": 0.6, "sadness": 0.05}},
            {"emotion": {"anger": 0.9, "disgust": 0.0, "fear": 0.0, "joy": 0.0, "sadness": 0.0}}
        ]}"#;
        let scores = parse_scores(body).unwrap();
        assert_eq!(scores.anger, Some(0.1));
        assert_eq!(scores.dominant_emotion, Some(Emotion::Joy));
    }

    #[test]
    fn integer_scores_are_numbers() {
        let body = r#"{"emotionPredictions": [{"emotion": {"anger": 0, "disgust": 0, "fear": 1, "joy": 0, "sadness": 0}}]}"#;
        let scores = parse_scores(body).unwrap();
        assert_eq!(scores.fear, Some(1.0));
        assert_eq!(scores.dominant_emotion, Some(Emotion::Fear));
    }

    #[test]
    fn extra_emotions_are_ignored() {
        let body = r#"{"emotionPredictions": [{"emotion": {"surprise": 0.9, "anger": 0.2, "disgust": 0, "fear": 0, "joy": 0.1, "sadness": 0}}]}"#;
        let scores = parse_scores(body).unwrap();
        assert_eq!(scores.dominant_emotion, Some(Emotion::Anger));
    }

    #[test]
    fn invalid_json_is_decode_error() {
        let error = parse_scores("<html>oops</html>").unwrap_err();
        assert_eq!(error.kind(), ErrorKind::MalformedResponse);
        assert_eq!(error.to_string(), "JSON decode error");
    }

    #[test]
    fn missing_keys_are_named() {
        let error = parse_scores(r#"{"producerId": {}}"#).unwrap_err();
        assert_eq!(error, AnalyzeError::missing("emotionPredictions"));

        let error = parse_scores(r#"{"emotionPredictions": [{"target": "x"}]}"#).unwrap_err();
        assert_eq!(error.to_string(), "Missing key in JSON response: 'emotion'");

        let body = r#"{"emotionPredictions": [{"emotion": {"anger": 0.1, "disgust": 0.1, "fear": 0.1, "joy": 0.1}}]}"#;
        let error = parse_scores(body).unwrap_err();
        assert_eq!(error.to_string(), "Missing key in JSON response: 'sadness'");
    }

    #[test]
    fn odd_shapes_are_unexpected() {
        for body in [
            r#"{"emotionPredictions": []}"#,
            r#"{"emotionPredictions": {"emotion": {}}}"#,
            r#"[1, 2, 3]"#,
            r#"{"emotionPredictions": [{"emotion": {"anger": "high", "disgust": 0, "fear": 0, "joy": 0, "sadness": 0}}]}"#,
        ] {
            let error = parse_scores(body).unwrap_err();
            assert_eq!(error.kind(), ErrorKind::Unknown, "body: {}", body);
            assert_eq!(error.to_string(), "An unexpected error occurred");
        }
    }

    #[test]
    fn invalid_model_id_falls_back_to_default() {
        let service = EmotionService::with_client(Client::new(), "http://localhost", "bad\nid");
        assert_eq!(service.headers.get(MODEL_ID_HEADER).unwrap(), DEFAULT_MODEL_ID);
    }
}
