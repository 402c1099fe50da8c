//! Persisted entities owned by the memory store.
//!
//! Everything here is keyed by the contact identifier (10-digit phone) and
//! serialized into a single snapshot document, timestamps as RFC 3339.

use std::collections::HashMap;
use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use ava_core::catalog::{ServiceKind, TimeOfDay};
use ava_core::types::{Appointment, SessionMessage, Sentiment};

/// Everything known about one caller.
///
/// Created lazily on first reference; never deleted except by explicit
/// erase. An empty `name` means the caller has not introduced themselves.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UserProfile {
    pub name: String,
    pub preferred_name: Option<String>,
    pub phone: String,
    pub email: Option<String>,
    pub address: Option<String>,
    /// Day segments this caller has booked before, append-only, de-duplicated.
    pub preferred_time_slots: Vec<TimeOfDay>,
    /// Services this caller has booked before, append-only, de-duplicated.
    pub preferred_services: Vec<ServiceKind>,
    pub last_visit: Option<DateTime<Utc>>,
    pub total_appointments: u32,
    pub notes: Vec<String>,
}

impl UserProfile {
    pub fn new(phone: impl Into<String>) -> Self {
        Self {
            name: String::new(),
            preferred_name: None,
            phone: phone.into(),
            email: None,
            address: None,
            preferred_time_slots: Vec::new(),
            preferred_services: Vec::new(),
            last_visit: None,
            total_appointments: 0,
            notes: Vec::new(),
        }
    }

    /// Shallow-merge: `Some` fields replace, `None` fields are left alone.
    pub fn apply(&mut self, update: ProfileUpdate) {
        if let Some(name) = update.name {
            self.name = name;
        }
        if let Some(preferred_name) = update.preferred_name {
            self.preferred_name = Some(preferred_name);
        }
        if let Some(email) = update.email {
            self.email = Some(email);
        }
        if let Some(address) = update.address {
            self.address = Some(address);
        }
        if let Some(last_visit) = update.last_visit {
            self.last_visit = Some(last_visit);
        }
        if let Some(total) = update.total_appointments {
            self.total_appointments = total;
        }
    }
}

/// Partial profile update; unset fields keep their current value.
#[derive(Debug, Clone, Default)]
pub struct ProfileUpdate {
    pub name: Option<String>,
    pub preferred_name: Option<String>,
    pub email: Option<String>,
    pub address: Option<String>,
    pub last_visit: Option<DateTime<Utc>>,
    pub total_appointments: Option<u32>,
}

/// How the assistant should speak to this caller.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CommunicationStyle {
    Formal,
    Casual,
    Friendly,
}

/// How the caller wants appointment reminders delivered.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ReminderPreference {
    Sms,
    Email,
    Both,
    None,
}

/// Language the caller prefers to hear.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LanguagePreference {
    English,
    Hindi,
    Mixed,
}

/// Per-caller interaction preferences, defaulted on first access.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct UserPreferences {
    pub communication_style: CommunicationStyle,
    pub reminder_preference: ReminderPreference,
    /// Minutes of buffer around preferred times.
    pub appointment_buffer: u32,
    pub language_preference: LanguagePreference,
    pub accessibility_needs: Vec<String>,
}

impl Default for UserPreferences {
    fn default() -> Self {
        Self {
            communication_style: CommunicationStyle::Friendly,
            reminder_preference: ReminderPreference::Sms,
            appointment_buffer: 30,
            language_preference: LanguagePreference::English,
            accessibility_needs: Vec::new(),
        }
    }
}

/// One completed or ended session with a caller.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ConversationRecord {
    pub id: Uuid,
    pub timestamp: DateTime<Utc>,
    pub messages: Vec<SessionMessage>,
    /// Intent label: "book_appointment", "get_info", or "general".
    pub intent: String,
    pub completed: bool,
    pub appointment: Option<Appointment>,
    pub user_sentiment: Sentiment,
}

/// Direction of a caller's recent sentiment.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SatisfactionTrend {
    Improving,
    Declining,
    Stable,
}

impl fmt::Display for SatisfactionTrend {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SatisfactionTrend::Improving => write!(f, "improving"),
            SatisfactionTrend::Declining => write!(f, "declining"),
            SatisfactionTrend::Stable => write!(f, "stable"),
        }
    }
}

/// What pattern analysis found in a caller's recent history.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UserPatterns {
    /// Up to 3 services, most frequent first.
    pub most_used_services: Vec<ServiceKind>,
    /// Up to 2 day segments, most frequent first.
    pub preferred_times: Vec<TimeOfDay>,
    /// Computed from the 5 most recent sentiments.
    pub satisfaction_trend: SatisfactionTrend,
    /// De-duplicated intents of negative-sentiment conversations.
    pub common_issues: Vec<String>,
}

/// Full per-caller snapshot for privacy export.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UserDataExport {
    pub profile: Option<UserProfile>,
    pub preferences: Option<UserPreferences>,
    pub conversation_history: Option<Vec<ConversationRecord>>,
}

/// The single persisted document: three collections keyed by phone.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct MemorySnapshot {
    #[serde(default)]
    pub profiles: HashMap<String, UserProfile>,
    #[serde(default)]
    pub histories: HashMap<String, Vec<ConversationRecord>>,
    #[serde(default)]
    pub preferences: HashMap<String, UserPreferences>,
}
