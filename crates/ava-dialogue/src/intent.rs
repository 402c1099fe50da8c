//! Keyword-based utterance classification.
//!
//! Classification runs on normalized (lowercased, trimmed) input and uses
//! plain substring containment, which holds up well against speech-to-text
//! output where word boundaries and punctuation are unreliable. Keyword
//! groups are checked in priority order: booking beats info beats greeting.

/// Keywords that signal the caller wants to book an appointment.
///
/// Service nouns like "renewal" are deliberately absent: on their own they
/// are just as often information questions ("what documents do I need for
/// renewal"), so they route through [`INFO_KEYWORDS`] and the service
/// extractor instead.
const BOOKING_KEYWORDS: &[&str] = &[
    "book",
    "appointment",
    "schedule",
    "reserve",
    "set up",
    "new licence",
    "new license",
    "apply",
    "application",
    "extend",
    "replace",
    "replacement",
    "lost",
    "damaged",
    "duplicate",
    "address change",
    "change address",
    "update address",
    "driving test",
    "test",
    "exam",
    "practical test",
    "want to book",
    "need to book",
    "i want",
];

/// Keywords that signal an information request.
const INFO_KEYWORDS: &[&str] = &[
    "info",
    "information",
    "details",
    "know",
    "about",
    "documents",
    "required",
    "bring",
    "need",
    "fee",
    "cost",
    "price",
    "location",
    "where",
    "hours",
    "open",
];

/// Opening pleasantries.
const GREETING_KEYWORDS: &[&str] = &[
    "hello",
    "hi",
    "hey",
    "good morning",
    "good afternoon",
    "good evening",
];

const CONFIRMATION_KEYWORDS: &[&str] = &[
    "yes",
    "yeah",
    "yep",
    "yup",
    "correct",
    "right",
    "okay",
    "ok",
    "sure",
    "absolutely",
    "definitely",
    "confirm",
    "confirmed",
    "good",
    "fine",
    "perfect",
    "sounds good",
    "looks good",
    "that's right",
    "that works",
];

const NEGATION_KEYWORDS: &[&str] = &["no", "nope", "not", "incorrect", "wrong", "cancel"];

/// Coarse class an utterance falls into before slot filling starts.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UtteranceClass {
    Booking,
    Info,
    Greeting,
    None,
}

/// Result of classifying one utterance.
#[derive(Debug, Clone, Copy)]
pub struct Classification {
    pub class: UtteranceClass,
    /// The keyword that decided the class, for trace output.
    pub matched_keyword: Option<&'static str>,
}

/// Classify a normalized utterance.
///
/// `has_active_intent` suppresses the greeting class: once a flow is
/// underway, a mid-conversation "hi" must not restart the exchange, while
/// booking and info keywords may still switch the flow.
pub fn classify(utterance: &str, has_active_intent: bool) -> Classification {
    if let Some(keyword) = first_match(BOOKING_KEYWORDS, utterance) {
        return Classification {
            class: UtteranceClass::Booking,
            matched_keyword: Some(keyword),
        };
    }
    if let Some(keyword) = first_match(INFO_KEYWORDS, utterance) {
        return Classification {
            class: UtteranceClass::Info,
            matched_keyword: Some(keyword),
        };
    }
    if !has_active_intent {
        if let Some(keyword) = first_match(GREETING_KEYWORDS, utterance) {
            return Classification {
                class: UtteranceClass::Greeting,
                matched_keyword: Some(keyword),
            };
        }
    }
    Classification {
        class: UtteranceClass::None,
        matched_keyword: None,
    }
}

/// True when the utterance reads as agreement.
///
/// Deliberately permissive: any non-empty input that is not a negation
/// counts as a yes at the confirmation step, because callers confirm with
/// phrases no keyword list can enumerate ("go ahead", "that's the one").
pub fn is_confirmation(utterance: &str) -> bool {
    CONFIRMATION_KEYWORDS
        .iter()
        .any(|keyword| utterance.contains(keyword))
        || (!utterance.trim().is_empty() && !is_negation(utterance))
}

/// True when the utterance reads as disagreement or cancellation.
pub fn is_negation(utterance: &str) -> bool {
    NEGATION_KEYWORDS
        .iter()
        .any(|keyword| utterance.contains(keyword))
}

fn first_match(keywords: &'static [&'static str], utterance: &str) -> Option<&'static str> {
    keywords
        .iter()
        .copied()
        .find(|keyword| utterance.contains(keyword))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_booking_keyword_classifies_as_booking() {
        let result = classify("i want to book a new licence", false);
        assert_eq!(result.class, UtteranceClass::Booking);
        assert_eq!(result.matched_keyword, Some("book"));
    }

    #[test]
    fn test_booking_beats_info() {
        // "know" is an info keyword but "appointment" wins.
        let result = classify("i want to know about my appointment", false);
        assert_eq!(result.class, UtteranceClass::Booking);
    }

    #[test]
    fn test_info_keyword_classifies_as_info() {
        let result = classify("how much does it cost", false);
        assert_eq!(result.class, UtteranceClass::Info);
        assert_eq!(result.matched_keyword, Some("cost"));
    }

    #[test]
    fn test_document_question_is_info_not_booking() {
        let result = classify("what documents do i need for renewal", false);
        assert_eq!(result.class, UtteranceClass::Info);
    }

    #[test]
    fn test_greeting_classifies_as_greeting() {
        let result = classify("good morning", false);
        assert_eq!(result.class, UtteranceClass::Greeting);
        assert_eq!(result.matched_keyword, Some("good morning"));
    }

    #[test]
    fn test_greeting_suppressed_during_active_flow() {
        let result = classify("hello there", true);
        assert_eq!(result.class, UtteranceClass::None);
    }

    #[test]
    fn test_booking_still_wins_during_active_flow() {
        let result = classify("actually i want to book a driving test", true);
        assert_eq!(result.class, UtteranceClass::Booking);
    }

    #[test]
    fn test_unrecognized_input_is_none() {
        let result = classify("the weather is nice", false);
        assert_eq!(result.class, UtteranceClass::None);
        assert_eq!(result.matched_keyword, None);
    }

    #[test]
    fn test_confirmation_keywords() {
        assert!(is_confirmation("yes"));
        assert!(is_confirmation("sounds good"));
        assert!(is_confirmation("that's right"));
    }

    #[test]
    fn test_confirmation_accepts_any_non_negation() {
        assert!(is_confirmation("go ahead"));
        assert!(is_confirmation("please proceed"));
    }

    #[test]
    fn test_confirmation_rejects_empty() {
        assert!(!is_confirmation(""));
        assert!(!is_confirmation("   "));
    }

    #[test]
    fn test_negation_keywords() {
        assert!(is_negation("no"));
        assert!(is_negation("that's wrong"));
        assert!(is_negation("cancel that"));
        assert!(!is_negation("yes please"));
    }

    #[test]
    fn test_plain_negation_is_not_confirmation() {
        assert!(!is_confirmation("nope"));
        assert!(!is_confirmation("cancel"));
    }
}
