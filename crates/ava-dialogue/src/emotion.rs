//! Lexical emotion scoring for spoken input.
//!
//! A keyword-weight heuristic, not a classifier. Longer keywords carry more
//! weight and repeated hits amplify. The result is normalized against
//! utterance length so a one-word "great!" scores higher than "great"
//! buried in a paragraph. Good enough to drive a live mood readout next to
//! the transcript.

/// One detected emotion with a 0.0 to 1.0 intensity.
#[derive(Debug, Clone, PartialEq)]
pub struct EmotionScore {
    pub emotion: &'static str,
    pub score: f64,
}

const EMOTION_KEYWORDS: &[(&str, &[&str])] = &[
    (
        "Excitement",
        &[
            "excited",
            "amazing",
            "fantastic",
            "wonderful",
            "great",
            "awesome",
            "love",
            "perfect",
        ],
    ),
    (
        "Interest",
        &[
            "interested",
            "curious",
            "want",
            "need",
            "tell",
            "know",
            "learn",
            "understand",
        ],
    ),
    (
        "Determination",
        &[
            "will",
            "must",
            "need",
            "have to",
            "important",
            "urgent",
            "definitely",
            "absolutely",
        ],
    ),
    (
        "Satisfaction",
        &[
            "good",
            "fine",
            "okay",
            "satisfied",
            "happy",
            "pleased",
            "thank",
            "thanks",
        ],
    ),
    (
        "Concern",
        &[
            "worried",
            "concerned",
            "problem",
            "issue",
            "trouble",
            "difficult",
            "help",
            "confused",
        ],
    ),
    (
        "Politeness",
        &[
            "please",
            "thank you",
            "sorry",
            "excuse me",
            "could you",
            "would you",
            "may i",
        ],
    ),
];

/// Score the emotions present in `text`, strongest first, capped at three.
pub fn analyze(text: &str) -> Vec<EmotionScore> {
    let text = text.to_lowercase();
    let word_count = text.split_whitespace().count().max(1) as f64;

    let mut scores = Vec::new();
    for (emotion, keywords) in EMOTION_KEYWORDS {
        let mut matches = 0u32;
        let mut weight = 0.0f64;
        for keyword in *keywords {
            if text.contains(keyword) {
                matches += 1;
                weight += keyword.len() as f64 / 10.0;
            }
        }
        if matches > 0 {
            let intensity = (weight * f64::from(matches) / (word_count * 0.5)).min(1.0);
            scores.push(EmotionScore {
                emotion,
                score: intensity,
            });
        }
    }

    scores.sort_by(|a, b| {
        b.score
            .partial_cmp(&a.score)
            .unwrap_or(std::cmp::Ordering::Equal)
    });
    scores.truncate(3);
    scores
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_single_strong_keyword_saturates() {
        let scores = analyze("great");
        assert_eq!(scores.len(), 1);
        assert_eq!(scores[0].emotion, "Excitement");
        assert_eq!(scores[0].score, 1.0);
    }

    #[test]
    fn test_politeness_outranks_satisfaction() {
        // "thank you" hits both lists; the longer politeness phrase wins.
        let scores = analyze("thank you");
        assert_eq!(scores[0].emotion, "Politeness");
        assert!((scores[0].score - 0.9).abs() < 1e-9);
        assert_eq!(scores[1].emotion, "Satisfaction");
    }

    #[test]
    fn test_caps_at_three_emotions() {
        let scores =
            analyze("i'm excited and interested, please help, this is good and important");
        assert_eq!(scores.len(), 3);
    }

    #[test]
    fn test_scores_are_sorted_descending() {
        let scores = analyze("i'm worried about the fee but i will definitely come, thanks");
        for pair in scores.windows(2) {
            assert!(pair[0].score >= pair[1].score);
        }
    }

    #[test]
    fn test_scores_never_exceed_one() {
        let scores = analyze("amazing fantastic wonderful great awesome perfect");
        for score in &scores {
            assert!(score.score <= 1.0);
        }
    }

    #[test]
    fn test_empty_input_yields_nothing() {
        assert!(analyze("").is_empty());
        assert!(analyze("the quick brown fox").is_empty());
    }
}
