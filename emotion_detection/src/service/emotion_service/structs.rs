use serde::{Deserialize, Serialize};


#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Eq)]
pub struct EmotionPredictRequest {
    pub raw_document: RawDocument,
}

#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Eq)]
pub struct RawDocument {
    pub text: String,
}

impl EmotionPredictRequest {
    pub fn new(text: &str) -> Self {
        Self {
            raw_document: RawDocument { text: text.to_owned() }
        }
    }
}
