//! Ava memory crate - per-caller profiles, history, and personalization.
//!
//! One [`MemoryStore`] serves every session in the process:
//! - User profiles and interaction preferences, keyed by phone number
//! - Conversation history, capped per caller
//! - Pattern analytics, personalized greetings, and contextual suggestions
//! - Pluggable snapshot persistence with in-memory fallback

pub mod backend;
pub mod insight;
pub mod store;
pub mod types;

pub use backend::{InMemoryBackend, JsonFileBackend, SnapshotBackend};
pub use insight::ResponseContext;
pub use store::{MemoryStore, HISTORY_CAP};
pub use types::{
    CommunicationStyle, ConversationRecord, LanguagePreference, MemorySnapshot, ProfileUpdate,
    ReminderPreference, SatisfactionTrend, UserDataExport, UserPatterns, UserPreferences,
    UserProfile,
};
