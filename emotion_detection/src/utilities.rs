use crate::service::common_structs::{Emotion, EmotionScores};

pub const INVALID_TEXT_MESSAGE: &str = "Invalid text! Please try again!";


// For the given statement, the system response is 'anger': 0.1, ... and 'sadness': 0.05. The dominant emotion is joy.
pub fn format_report(scores: &EmotionScores) -> String {
    if scores.is_empty() {
        return INVALID_TEXT_MESSAGE.to_owned();
    }

    let score = |emotion: Emotion| scores.score(emotion).unwrap_or_default();
    format!(
        "For the given statement, the system response is 'anger': {}, 'disgust': {}, 'fear': {}, 'joy': {} and 'sadness': {}. The dominant emotion is {}.",
        score(Emotion::Anger),
        score(Emotion::Disgust),
        score(Emotion::Fear),
        score(Emotion::Joy),
        score(Emotion::Sadness),
        scores.dominant_emotion.map_or("", |emotion| emotion.as_str())
    )
}


#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn report_lists_scores_and_dominant() {
        let scores = EmotionScores::new(0.1, 0.05, 0.2, 0.6, 0.05);
        assert_eq!(
            format_report(&scores),
            "For the given statement, the system response is 'anger': 0.1, 'disgust': 0.05, 'fear': 0.2, 'joy': 0.6 and 'sadness': 0.05. The dominant emotion is joy."
        );
    }

    #[test]
    fn empty_scores_are_invalid_text() {
        assert_eq!(format_report(&EmotionScores::empty()), INVALID_TEXT_MESSAGE);
    }

    #[test]
    fn scores_without_dominant_are_invalid_text() {
        let mut scores = EmotionScores::new(0.2, 0.2, 0.2, 0.2, 0.2);
        scores.dominant_emotion = None;
        assert!(scores.is_empty());
        assert_eq!(format_report(&scores), INVALID_TEXT_MESSAGE);
    }
}
