pub mod emotion_service;
pub mod common_structs;


#[derive(Debug, Clone)]
pub struct CommonService {
    pub emotion: emotion_service::EmotionService,
}

impl CommonService {
    pub fn new() -> Self {
        Self {
            emotion: emotion_service::EmotionService::new(),
        }
    }

    pub fn with_emotion(emotion: emotion_service::EmotionService) -> Self {
        Self { emotion }
    }
}

impl Default for CommonService {
    fn default() -> Self {
        Self::new()
    }
}
