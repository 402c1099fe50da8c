//! Shared domain types used by both the dialogue engine and the memory store.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

use crate::catalog::ServiceKind;

/// Who produced a session message.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MessageRole {
    User,
    Assistant,
}

/// One turn of the session transcript.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SessionMessage {
    pub role: MessageRole,
    pub content: String,
    pub timestamp: DateTime<Utc>,
}

impl SessionMessage {
    pub fn user(content: impl Into<String>, timestamp: DateTime<Utc>) -> Self {
        Self {
            role: MessageRole::User,
            content: content.into(),
            timestamp,
        }
    }

    pub fn assistant(content: impl Into<String>, timestamp: DateTime<Utc>) -> Self {
        Self {
            role: MessageRole::Assistant,
            content: content.into(),
            timestamp,
        }
    }
}

/// Coarse per-conversation outcome tag used for trend analytics.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Sentiment {
    Positive,
    Neutral,
    Negative,
}

impl fmt::Display for Sentiment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Sentiment::Positive => write!(f, "positive"),
            Sentiment::Neutral => write!(f, "neutral"),
            Sentiment::Negative => write!(f, "negative"),
        }
    }
}

/// The booking produced by a completed flow.
///
/// Immutable once created: the engine hands it to the caller and records it
/// into history, then never touches it again.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Appointment {
    pub service: ServiceKind,
    pub name: String,
    /// Resolved human-readable date, e.g. "Friday, August 15".
    pub date: String,
    /// One of the fixed slot labels, e.g. "2:00 PM".
    pub time: String,
    /// 10-digit contact number.
    pub contact: String,
    /// Checklist copied from the service definition at booking time.
    pub documents: Vec<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_message_constructors() {
        let now = Utc::now();
        let user = SessionMessage::user("hello", now);
        assert_eq!(user.role, MessageRole::User);
        assert_eq!(user.content, "hello");

        let assistant = SessionMessage::assistant("hi there", now);
        assert_eq!(assistant.role, MessageRole::Assistant);
    }

    #[test]
    fn test_message_role_serde() {
        let json = serde_json::to_string(&MessageRole::Assistant).unwrap();
        assert_eq!(json, "\"assistant\"");
    }

    #[test]
    fn test_sentiment_display() {
        assert_eq!(Sentiment::Positive.to_string(), "positive");
        assert_eq!(Sentiment::Negative.to_string(), "negative");
    }

    #[test]
    fn test_sentiment_serde_roundtrip() {
        let json = serde_json::to_string(&Sentiment::Neutral).unwrap();
        assert_eq!(json, "\"neutral\"");
        let back: Sentiment = serde_json::from_str(&json).unwrap();
        assert_eq!(back, Sentiment::Neutral);
    }

    #[test]
    fn test_appointment_serde_roundtrip() {
        let appointment = Appointment {
            service: ServiceKind::NewLicence,
            name: "Priya Sharma".to_string(),
            date: "Friday, August 15".to_string(),
            time: "2:00 PM".to_string(),
            contact: "9876543210".to_string(),
            documents: vec!["ID proof".to_string()],
        };
        let json = serde_json::to_string(&appointment).unwrap();
        assert!(json.contains("\"new licence\""));
        let back: Appointment = serde_json::from_str(&json).unwrap();
        assert_eq!(back, appointment);
    }

    #[test]
    fn test_message_timestamp_is_rfc3339() {
        let now = Utc::now();
        let msg = SessionMessage::user("hi", now);
        let json = serde_json::to_string(&msg).unwrap();
        // chrono serializes DateTime<Utc> in RFC 3339 form.
        assert!(json.contains('T'));
        assert!(json.contains("\"timestamp\""));
    }
}
