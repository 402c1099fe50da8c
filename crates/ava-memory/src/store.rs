//! Process-wide user memory store.
//!
//! One instance serves every session in the process. All state lives behind a
//! single mutex; every mutating operation takes the lock once and applies its
//! whole read-modify-write sequence, persisting before the lock is released.

use std::sync::{Mutex, MutexGuard};

use chrono::{DateTime, Utc};
use tracing::{info, warn};
use uuid::Uuid;

use ava_core::catalog::TimeOfDay;
use ava_core::config::AssistantConfig;
use ava_core::types::{Appointment, Sentiment, SessionMessage};

use crate::backend::{InMemoryBackend, SnapshotBackend};
use crate::types::{
    ConversationRecord, MemorySnapshot, ProfileUpdate, UserDataExport, UserPreferences,
    UserProfile,
};

/// Conversations kept per contact, most recent first.
pub const HISTORY_CAP: usize = 50;

/// Shared store of profiles, histories and preferences, keyed by phone number.
pub struct MemoryStore {
    state: Mutex<MemorySnapshot>,
    backend: Box<dyn SnapshotBackend>,
    pub(crate) assistant: AssistantConfig,
}

impl MemoryStore {
    /// Open the store, loading any existing snapshot from the backend.
    ///
    /// A backend that fails to load is logged and ignored; the store starts
    /// empty and keeps serving from memory.
    pub fn new(backend: Box<dyn SnapshotBackend>) -> Self {
        let state = match backend.load() {
            Ok(Some(snapshot)) => {
                info!(
                    profiles = snapshot.profiles.len(),
                    "Loaded memory snapshot"
                );
                snapshot
            }
            Ok(None) => MemorySnapshot::default(),
            Err(e) => {
                warn!("Failed to load memory snapshot, starting empty: {}", e);
                MemorySnapshot::default()
            }
        };

        Self {
            state: Mutex::new(state),
            backend,
            assistant: AssistantConfig::default(),
        }
    }

    /// Store backed by nothing but memory, mainly for tests.
    pub fn in_memory() -> Self {
        Self::new(Box::new(InMemoryBackend::new()))
    }

    /// Set the assistant identity used in generated greetings.
    pub fn with_assistant(mut self, assistant: AssistantConfig) -> Self {
        self.assistant = assistant;
        self
    }

    // =========================================================================
    // Identification and profiles
    // =========================================================================

    /// Look a user up by phone or by name.
    ///
    /// A phone lookup always yields a profile, creating one on first contact.
    /// A name lookup is a case-insensitive substring search over stored names
    /// and preferred names, and returns nothing on a miss.
    pub fn identify_user(&self, phone: Option<&str>, name: Option<&str>) -> Option<UserProfile> {
        let mut state = self.lock();

        if let Some(phone) = phone {
            return Some(Self::profile_entry(&mut state, phone).clone());
        }

        if let Some(name) = name {
            let needle = name.to_lowercase();
            for profile in state.profiles.values() {
                let by_name = profile.name.to_lowercase().contains(&needle);
                let by_preferred = profile
                    .preferred_name
                    .as_ref()
                    .is_some_and(|p| p.to_lowercase().contains(&needle));
                if by_name || by_preferred {
                    return Some(profile.clone());
                }
            }
        }

        None
    }

    /// Profile for `phone`, created empty on first access.
    pub fn user_profile(&self, phone: &str) -> UserProfile {
        let mut state = self.lock();
        Self::profile_entry(&mut state, phone).clone()
    }

    /// Shallow-merge `updates` into the profile and persist.
    pub fn update_profile(&self, phone: &str, updates: ProfileUpdate) {
        let mut state = self.lock();
        Self::profile_entry(&mut state, phone).apply(updates);
        self.persist(&state);
    }

    /// Preferences for `phone`, defaults on first access.
    pub fn preferences(&self, phone: &str) -> UserPreferences {
        let mut state = self.lock();
        Self::preferences_entry(&mut state, phone).clone()
    }

    /// Replace the stored preferences and persist.
    pub fn update_preferences(&self, phone: &str, preferences: UserPreferences) {
        let mut state = self.lock();
        state.preferences.insert(phone.to_string(), preferences);
        self.persist(&state);
    }

    // =========================================================================
    // Conversation history
    // =========================================================================

    /// Prepend a conversation record, keeping at most [`HISTORY_CAP`] entries.
    pub fn add_conversation(
        &self,
        phone: &str,
        messages: Vec<SessionMessage>,
        intent: &str,
        completed: bool,
        appointment: Option<Appointment>,
        sentiment: Sentiment,
        now: DateTime<Utc>,
    ) {
        let mut state = self.lock();
        Self::push_record(
            &mut state,
            phone,
            messages,
            intent,
            completed,
            appointment,
            sentiment,
            now,
        );
        self.persist(&state);
    }

    /// Most recent conversations for `phone`, newest first.
    pub fn conversation_history(&self, phone: &str, limit: usize) -> Vec<ConversationRecord> {
        let state = self.lock();
        state
            .histories
            .get(phone)
            .map(|history| history.iter().take(limit).cloned().collect())
            .unwrap_or_default()
    }

    /// Appointments from completed conversations, newest first.
    pub fn recent_appointments(&self, phone: &str, limit: usize) -> Vec<Appointment> {
        self.conversation_history(phone, 20)
            .into_iter()
            .filter(|record| record.completed)
            .filter_map(|record| record.appointment)
            .take(limit)
            .collect()
    }

    /// Record a finalized booking in one atomic step.
    ///
    /// Updates the profile (name, last visit, appointment count, preferred
    /// services and times), appends a completed conversation record, persists
    /// once, and returns the updated profile.
    pub fn record_appointment(
        &self,
        phone: &str,
        name: &str,
        appointment: Appointment,
        slot_preference: TimeOfDay,
        messages: Vec<SessionMessage>,
        now: DateTime<Utc>,
    ) -> UserProfile {
        let mut state = self.lock();

        let profile = Self::profile_entry(&mut state, phone);
        profile.name = name.to_string();
        profile.last_visit = Some(now);
        profile.total_appointments += 1;
        if !profile.preferred_services.contains(&appointment.service) {
            profile.preferred_services.push(appointment.service);
        }
        if !profile.preferred_time_slots.contains(&slot_preference) {
            profile.preferred_time_slots.push(slot_preference);
        }
        let updated = profile.clone();

        Self::push_record(
            &mut state,
            phone,
            messages,
            "book_appointment",
            true,
            Some(appointment),
            Sentiment::Positive,
            now,
        );

        self.persist(&state);
        updated
    }

    // =========================================================================
    // Privacy compliance
    // =========================================================================

    /// Everything stored for `phone`, without creating missing entries.
    pub fn export_user_data(&self, phone: &str) -> UserDataExport {
        let state = self.lock();
        UserDataExport {
            profile: state.profiles.get(phone).cloned(),
            preferences: state.preferences.get(phone).cloned(),
            conversation_history: state.histories.get(phone).cloned(),
        }
    }

    /// Erase everything stored for `phone`.
    ///
    /// All three collections are cleared before the single persist call, so
    /// no partial state survives a crash mid-delete.
    pub fn delete_user_data(&self, phone: &str) {
        let mut state = self.lock();
        state.profiles.remove(phone);
        state.preferences.remove(phone);
        state.histories.remove(phone);
        self.persist(&state);
        info!("Deleted stored data for contact");
    }

    // =========================================================================
    // Internals
    // =========================================================================

    pub(crate) fn lock(&self) -> MutexGuard<'_, MemorySnapshot> {
        // Map state is consistent at every await-free step, so a poisoned
        // guard is still safe to reuse.
        self.state
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
    }

    /// Best-effort write-through; a failing backend degrades to memory-only.
    pub(crate) fn persist(&self, state: &MemorySnapshot) {
        if let Err(e) = self.backend.save(state) {
            warn!("Failed to persist memory snapshot: {}", e);
        }
    }

    pub(crate) fn profile_entry<'a>(
        state: &'a mut MemorySnapshot,
        phone: &str,
    ) -> &'a mut UserProfile {
        state
            .profiles
            .entry(phone.to_string())
            .or_insert_with(|| UserProfile::new(phone))
    }

    pub(crate) fn preferences_entry<'a>(
        state: &'a mut MemorySnapshot,
        phone: &str,
    ) -> &'a mut UserPreferences {
        state.preferences.entry(phone.to_string()).or_default()
    }

    fn push_record(
        state: &mut MemorySnapshot,
        phone: &str,
        messages: Vec<SessionMessage>,
        intent: &str,
        completed: bool,
        appointment: Option<Appointment>,
        sentiment: Sentiment,
        now: DateTime<Utc>,
    ) {
        let record = ConversationRecord {
            id: Uuid::new_v4(),
            timestamp: now,
            messages,
            intent: intent.to_string(),
            completed,
            appointment,
            user_sentiment: sentiment,
        };

        let history = state.histories.entry(phone.to_string()).or_default();
        history.insert(0, record);
        history.truncate(HISTORY_CAP);
    }
}

impl std::fmt::Debug for MemoryStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("MemoryStore").finish()
    }
}
