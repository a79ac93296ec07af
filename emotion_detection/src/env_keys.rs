pub static EMOTION_PREDICT_URL: &str = "EMOTION_PREDICT_URL";
pub static EMOTION_MODEL_ID: &str = "EMOTION_MODEL_ID";
