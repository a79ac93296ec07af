use std::fmt;

use serde::{Deserialize, Serialize, Serializer};
use serde_json::json;

use super::emotion_service::errors::AnalyzeError;


#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq, Eq, Hash)]
#[serde(rename_all = "lowercase")]
pub enum Emotion {
    Anger,
    Disgust,
    Fear,
    Joy,
    Sadness,
}

impl Emotion {
    // scan order for dominant emotion
    pub const ALL: [Emotion; 5] = [
        Emotion::Anger,
        Emotion::Disgust,
        Emotion::Fear,
        Emotion::Joy,
        Emotion::Sadness,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Emotion::Anger => "anger",
            Emotion::Disgust => "disgust",
            Emotion::Fear => "fear",
            Emotion::Joy => "joy",
            Emotion::Sadness => "sadness",
        }
    }
}

impl fmt::Display for Emotion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}


/// Five emotion scores plus the label of the highest one.
///
/// Every field is `None` when the service gave no usable signal.
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct EmotionScores {
    pub anger: Option<f64>,
    pub disgust: Option<f64>,
    pub fear: Option<f64>,
    pub joy: Option<f64>,
    pub sadness: Option<f64>,
    pub dominant_emotion: Option<Emotion>,
}

impl EmotionScores {
    pub fn new(anger: f64, disgust: f64, fear: f64, joy: f64, sadness: f64) -> Self {
        let values = [anger, disgust, fear, joy, sadness];

        // first max wins on ties
        let mut dominant = 0;
        for (index, value) in values.iter().enumerate().skip(1) {
            if *value > values[dominant] {
                dominant = index;
            }
        }

        Self {
            anger: Some(anger),
            disgust: Some(disgust),
            fear: Some(fear),
            joy: Some(joy),
            sadness: Some(sadness),
            dominant_emotion: Some(Emotion::ALL[dominant]),
        }
    }

    pub fn empty() -> Self {
        Self {
            anger: None,
            disgust: None,
            fear: None,
            joy: None,
            sadness: None,
            dominant_emotion: None,
        }
    }

    pub fn score(&self, emotion: Emotion) -> Option<f64> {
        match emotion {
            Emotion::Anger => self.anger,
            Emotion::Disgust => self.disgust,
            Emotion::Fear => self.fear,
            Emotion::Joy => self.joy,
            Emotion::Sadness => self.sadness,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.dominant_emotion.is_none()
    }
}


/// Outcome of a single `analyze` call.
///
/// Serializes to the scores mapping (all-null for `NoSignal`) or to `{"error": <message>}`.
#[derive(Debug, Clone, PartialEq)]
pub enum AnalysisResult {
    Scores(EmotionScores),
    // blank input or a 400 from the service
    NoSignal,
    Failed(AnalyzeError),
}

impl AnalysisResult {
    /// The scores mapping, all-null for `NoSignal`. `None` on failure.
    pub fn scores(&self) -> Option<EmotionScores> {
        match self {
            AnalysisResult::Scores(scores) => Some(scores.to_owned()),
            AnalysisResult::NoSignal => Some(EmotionScores::empty()),
            AnalysisResult::Failed(_) => None,
        }
    }

    pub fn error(&self) -> Option<&AnalyzeError> {
        match self {
            AnalysisResult::Failed(error) => Some(error),
            _ => None,
        }
    }

    pub fn is_failed(&self) -> bool {
        matches!(self, AnalysisResult::Failed(_))
    }
}

impl Serialize for AnalysisResult {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            AnalysisResult::Scores(scores) => scores.serialize(serializer),
            AnalysisResult::NoSignal => EmotionScores::empty().serialize(serializer),
            AnalysisResult::Failed(error) => json!({ "error": error.to_string() }).serialize(serializer),
        }
    }
}
