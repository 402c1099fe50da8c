//! The dialogue engine: one instance per caller session.
//!
//! Input processing is strictly ordered. Confirmation is checked first so a
//! "yes" at the read-back step finalizes immediately, then negation so a
//! "no" can rewind, then intent recognition while the flow is still young,
//! and finally the step handler for whatever flow is active. Recognition
//! stops once a booking passes step 2; from there the caller's words belong
//! to the slot being collected, not the classifier.

use std::fmt;
use std::mem;
use std::sync::Arc;

use chrono::{DateTime, Local, Utc};
use serde::Serialize;
use tracing::{debug, info};

use ava_core::{
    Appointment, AssistantConfig, AvaConfig, OfficeConfig, Sentiment, ServiceKind, SessionMessage,
    TimeOfDay, TimeSlot, SERVICE_CATALOG,
};
use ava_memory::{MemoryStore, UserProfile};

use crate::extract;
use crate::intent::{self, UtteranceClass};

/// Step at which the summary has been read back and the engine waits on a
/// yes. Finalization must never trigger earlier: at step 5 the caller's
/// input is a phone number, not an answer to the summary.
const CONFIRM_STEP: u8 = 6;

/// The two flows the engine can drive.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Intent {
    BookAppointment,
    GetInfo,
}

impl fmt::Display for Intent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Intent::BookAppointment => write!(f, "book_appointment"),
            Intent::GetInfo => write!(f, "get_info"),
        }
    }
}

/// One turn's response to the caller.
#[derive(Debug, Clone, Serialize)]
pub struct TurnReply {
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub intent: Option<Intent>,
    pub completed: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub appointment: Option<Appointment>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub suggestions: Option<Vec<String>>,
}

impl TurnReply {
    fn text(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            intent: None,
            completed: false,
            appointment: None,
            suggestions: None,
        }
    }

    fn with_intent(mut self, intent: Intent) -> Self {
        self.intent = Some(intent);
        self
    }

    fn with_suggestions(mut self, suggestions: Vec<String>) -> Self {
        if !suggestions.is_empty() {
            self.suggestions = Some(suggestions);
        }
        self
    }
}

/// Slots collected across the booking flow.
#[derive(Debug, Default, Clone)]
struct BookingSlots {
    service: Option<ServiceKind>,
    name: Option<String>,
    date: Option<String>,
    time: Option<TimeSlot>,
    contact: Option<String>,
}

#[derive(Debug, Default)]
struct DialogueState {
    intent: Option<Intent>,
    step: u8,
    slots: BookingSlots,
}

/// Rule-based dialogue engine for one caller session.
pub struct DialogueEngine {
    state: DialogueState,
    store: Arc<MemoryStore>,
    session: Vec<SessionMessage>,
    current_contact: Option<String>,
    assistant: AssistantConfig,
    office: OfficeConfig,
}

impl DialogueEngine {
    pub fn new(store: Arc<MemoryStore>) -> Self {
        Self {
            state: DialogueState::default(),
            store,
            session: Vec::new(),
            current_contact: None,
            assistant: AssistantConfig::default(),
            office: OfficeConfig::default(),
        }
    }

    /// Use the configured assistant identity and office details in responses.
    pub fn with_config(mut self, config: &AvaConfig) -> Self {
        self.assistant = config.assistant.clone();
        self.office = config.office.clone();
        self
    }

    /// The phone number this session is pinned to, once known.
    pub fn current_contact(&self) -> Option<&str> {
        self.current_contact.as_deref()
    }

    pub fn active_intent(&self) -> Option<Intent> {
        self.state.intent
    }

    pub fn step(&self) -> u8 {
        self.state.step
    }

    /// Pin the session to a known caller before the first utterance.
    pub fn identify(&mut self, phone: &str) -> Option<UserProfile> {
        let profile = self.store.identify_user(Some(phone), None);
        if profile.is_some() {
            self.current_contact = Some(phone.to_string());
        }
        profile
    }

    /// Opening line for the session, personalized when the caller is known.
    pub fn initial_greeting(&self, now: DateTime<Local>) -> String {
        match &self.current_contact {
            Some(phone) => self.store.personalized_greeting(phone, now),
            None => format!(
                "Hello! You've reached the {}. This is {}, your virtual assistant. \
                 How can I help you today?",
                self.assistant.authority, self.assistant.name
            ),
        }
    }

    /// Process one caller utterance against the wall clock.
    pub fn process_input(&mut self, input: &str) -> TurnReply {
        self.process_input_at(input, Local::now())
    }

    /// Process one caller utterance at an explicit point in time.
    pub fn process_input_at(&mut self, input: &str, now: DateTime<Local>) -> TurnReply {
        let normalized = input.trim().to_lowercase();
        self.push_user(input, now);

        if self.state.intent == Some(Intent::BookAppointment)
            && self.state.step >= CONFIRM_STEP
            && intent::is_confirmation(&normalized)
        {
            return self.finalize_booking(now);
        }

        if self.state.intent.is_some() && intent::is_negation(&normalized) {
            return self.handle_negation(now);
        }

        if self.state.intent.is_none() || self.state.step <= 2 {
            if let Some(reply) = self.try_recognize(&normalized, now) {
                return reply;
            }
        }

        self.continue_flow(&normalized, now)
    }

    /// Flush the transcript to memory and unpin the caller.
    pub fn end_session(&mut self, now: DateTime<Local>) {
        if let Some(phone) = self.current_contact.take() {
            if !self.session.is_empty() {
                let intent = self
                    .state
                    .intent
                    .map(|intent| intent.to_string())
                    .unwrap_or_else(|| "general".to_string());
                let completed = self.state.intent == Some(Intent::BookAppointment)
                    && self.state.step >= CONFIRM_STEP;
                self.store.add_conversation(
                    &phone,
                    mem::take(&mut self.session),
                    &intent,
                    completed,
                    None,
                    Sentiment::Neutral,
                    now.with_timezone(&Utc),
                );
            }
        }
        self.session.clear();
        self.state = DialogueState::default();
    }

    // =========================================================================
    // Recognition
    // =========================================================================

    /// Identification and intent classification for early-flow input.
    ///
    /// Returns `None` when nothing was recognized but a flow is active, in
    /// which case the input belongs to the current step handler.
    fn try_recognize(&mut self, input: &str, now: DateTime<Local>) -> Option<TurnReply> {
        if let Some(phone) = extract::find_phone(input) {
            self.current_contact = Some(phone.clone());
            if let Some(profile) = self.store.identify_user(Some(&phone), None) {
                if !profile.name.is_empty() {
                    debug!(contact = %phone, "Recognized returning caller");
                    let greeting = self.store.personalized_greeting(&phone, now);
                    let suggestions = self.store.contextual_suggestions(&phone, now);
                    return Some(
                        self.reply_with(TurnReply::text(greeting).with_suggestions(suggestions), now),
                    );
                }
            }
        }

        let classification = intent::classify(input, self.state.intent.is_some());
        if let Some(keyword) = classification.matched_keyword {
            debug!(class = ?classification.class, keyword, "Classified utterance");
        }

        match classification.class {
            UtteranceClass::Booking => Some(self.start_booking(input, now)),
            UtteranceClass::Info => {
                self.state.intent = Some(Intent::GetInfo);
                Some(self.handle_info_request(input, now))
            }
            UtteranceClass::Greeting => {
                let message = format!(
                    "Hello! I'm {}, your virtual assistant for the {}. I'm here to help \
                     you with appointments and information. What can I do for you today?",
                    self.assistant.name, self.assistant.authority
                );
                Some(self.reply_with(TurnReply::text(message), now))
            }
            UtteranceClass::None => {
                if self.state.intent.is_some() {
                    None
                } else {
                    Some(self.default_reply(now))
                }
            }
        }
    }

    fn start_booking(&mut self, input: &str, now: DateTime<Local>) -> TurnReply {
        self.state.intent = Some(Intent::BookAppointment);
        self.state.step = 1;

        if let Some(service) = extract::extract_service(input) {
            self.state.slots.service = Some(service);
            self.state.step = 2;

            let message = if let Some(name) = self.prefill_known_caller() {
                format!(
                    "Great! I'll help you book an appointment for {}. I have your details \
                     as {}. What date would work best for your appointment?",
                    service, name
                )
            } else {
                format!(
                    "Great! I'll help you book an appointment for {}. Could I have your \
                     full name, please? Please speak clearly and I'll wait for you to finish.",
                    service
                )
            };
            return self.reply_with(TurnReply::text(message).with_intent(Intent::BookAppointment), now);
        }

        let mut message = String::from(concat!(
            "I'd be happy to help you book an appointment. What service do you need? We offer:\n",
            "    • New licence applications\n",
            "    • Licence renewals\n",
            "    • Licence replacements\n",
            "    • Address changes\n",
            "    • Driving tests"
        ));
        if let Some(phone) = self.current_contact.clone() {
            let patterns = self.store.analyze_patterns(&phone);
            if let Some(service) = patterns.most_used_services.first() {
                message.push_str(&format!(
                    "\n\nBased on your previous visits, you might be interested in {}.",
                    service
                ));
            }
        }
        message.push_str("\n\nWhich one interests you?");
        self.reply_with(TurnReply::text(message).with_intent(Intent::BookAppointment), now)
    }

    fn default_reply(&mut self, now: DateTime<Local>) -> TurnReply {
        let mut message = String::from(concat!(
            "I'm here to help you with driving licence services. I can:\n",
            "  • Book appointments for various services\n",
            "  • Provide information about fees and requirements\n",
            "  • Tell you about office hours and location"
        ));
        if let Some(phone) = self.current_contact.clone() {
            let suggestions = self.store.contextual_suggestions(&phone, now);
            if !suggestions.is_empty() {
                message.push_str(&format!(
                    "\n\nBased on your history, you might want to:\n• {}",
                    suggestions.join("\n• ")
                ));
            }
        }
        message.push_str("\n\nWhat would you like to do today?");
        self.reply_with(TurnReply::text(message), now)
    }

    // =========================================================================
    // Booking flow
    // =========================================================================

    fn continue_flow(&mut self, input: &str, now: DateTime<Local>) -> TurnReply {
        match self.state.intent {
            Some(Intent::BookAppointment) => self.handle_booking_step(input, now),
            Some(Intent::GetInfo) => self.handle_info_request(input, now),
            None => self.reply_with(
                TurnReply::text("I understand. Could you tell me more about what you need help with?"),
                now,
            ),
        }
    }

    fn handle_booking_step(&mut self, input: &str, now: DateTime<Local>) -> TurnReply {
        match self.state.step {
            1 => {
                let Some(service) = extract::extract_service(input) else {
                    return self.reply_with(
                        TurnReply::text(
                            "Which service would you like to book? Please tell me if you need \
                             a new licence, licence renewal, replacement, address change, or \
                             driving test.",
                        ),
                        now,
                    );
                };
                self.state.slots.service = Some(service);
                self.state.step = 2;

                let message = if let Some(name) = self.prefill_known_caller() {
                    format!(
                        "Excellent choice! I'll help you book an appointment for {}. I have \
                         your details as {}. What date would work best for your appointment?",
                        service, name
                    )
                } else {
                    format!(
                        "Excellent choice! I'll help you book an appointment for {}. Could I \
                         have your full name, please? Take your time, I'll wait for you to \
                         finish speaking.",
                        service
                    )
                };
                self.reply_with(TurnReply::text(message), now)
            }
            2 => {
                let Some(service) = self.state.slots.service else {
                    return self.restart(now);
                };
                let Some(name) = extract::clean_name(input) else {
                    return self.reply_with(
                        TurnReply::text(
                            "I didn't catch your name clearly. Could you please tell me your \
                             full name again? Speak slowly and clearly.",
                        ),
                        now,
                    );
                };
                self.state.slots.name = Some(name.clone());
                self.state.step = 3;
                let message = format!(
                    "Thank you, {}! What date would work best for your {} appointment? \
                     You can say something like \"August 15th\" or \"next Monday\".",
                    name, service
                );
                self.reply_with(TurnReply::text(message), now)
            }
            3 => {
                let Some(date) = extract::parse_date(input, now.date_naive()) else {
                    return self.reply_with(
                        TurnReply::text(
                            "I didn't catch that date clearly. Could you try saying it like \
                             \"August 15th\", \"15th of August\", \"tomorrow\", or \"next \
                             Monday\"? What date would work for you?",
                        ),
                        now,
                    );
                };
                self.state.slots.date = Some(date.clone());
                self.state.step = 4;
                let slots = self.available_slots().join(", ");
                let message = format!(
                    "Perfect! I've got you down for {}. Here are the available time slots: \
                     {}. What time works best for you?",
                    date, slots
                );
                self.reply_with(TurnReply::text(message), now)
            }
            4 => {
                let Some(date) = self.state.slots.date.clone() else {
                    return self.restart(now);
                };
                let Some(slot) = extract::parse_time(input) else {
                    return self.reply_with(
                        TurnReply::text(
                            "What time would you prefer? You can choose from the slots I \
                             mentioned, or just say 'morning' or 'afternoon'.",
                        ),
                        now,
                    );
                };
                self.state.slots.time = Some(slot);

                if let Some(phone) = self.current_contact.clone() {
                    self.state.slots.contact = Some(phone);
                    self.state.step = CONFIRM_STEP;
                    let Some(summary) = self.confirmation_summary() else {
                        return self.restart(now);
                    };
                    let message = format!(
                        "Perfect! I have you scheduled for {} at {}. Let me confirm your \
                         appointment details: {}",
                        date,
                        slot.label(),
                        summary
                    );
                    return self.reply_with(TurnReply::text(message), now);
                }

                self.state.step = 5;
                let message = format!(
                    "Perfect! I have you scheduled for {} at {}. Could I get your contact \
                     number for confirmation? Please speak the digits clearly.",
                    date,
                    slot.label()
                );
                self.reply_with(TurnReply::text(message), now)
            }
            5 => {
                let Some(contact) = extract::parse_contact(input) else {
                    return self.reply_with(
                        TurnReply::text(
                            "I didn't catch your phone number clearly. Could you please say \
                             your 10-digit contact number again? Speak each digit clearly \
                             with small pauses.",
                        ),
                        now,
                    );
                };
                self.state.slots.contact = Some(contact.clone());
                self.state.step = CONFIRM_STEP;
                self.store.identify_user(Some(&contact), None);
                self.current_contact = Some(contact);

                let Some(summary) = self.confirmation_summary() else {
                    return self.restart(now);
                };
                let message = format!("Excellent! Let me confirm your appointment details: {}", summary);
                self.reply_with(TurnReply::text(message), now)
            }
            6 => {
                if !input.trim().is_empty() {
                    return self.finalize_booking(now);
                }
                self.reply_with(
                    TurnReply::text(
                        "Please say 'yes' to confirm your appointment, or tell me what you'd \
                         like to change.",
                    ),
                    now,
                )
            }
            _ => self.restart(now),
        }
    }

    fn finalize_booking(&mut self, now: DateTime<Local>) -> TurnReply {
        let (Some(service), Some(name), Some(date), Some(slot), Some(contact)) = (
            self.state.slots.service,
            self.state.slots.name.clone(),
            self.state.slots.date.clone(),
            self.state.slots.time,
            self.state.slots.contact.clone(),
        ) else {
            // A confirmation step with missing slots means the flow logic
            // is broken, not the caller.
            debug_assert!(false, "Reached finalize with incomplete slots");
            return self.restart(now);
        };

        let definition = service.definition();
        let appointment = Appointment {
            service,
            name: name.clone(),
            date: date.clone(),
            time: slot.label().to_string(),
            contact: contact.clone(),
            documents: definition
                .documents
                .iter()
                .map(|document| document.to_string())
                .collect(),
        };

        let profile = self.store.record_appointment(
            &contact,
            &name,
            appointment.clone(),
            slot.time_of_day(),
            self.session.clone(),
            now.with_timezone(&Utc),
        );
        info!(service = %service, date = %date, "Appointment booked");

        let mut message = format!(
            "Wonderful! Your appointment is confirmed, {}. You're all set for {} on {} \
             at {}. You'll receive a confirmation SMS at {}. Please remember to bring: {}.",
            name,
            service,
            date,
            slot.label(),
            contact,
            definition.documents.join(", ")
        );
        if profile.total_appointments > 1 {
            message.push_str(" Thank you for choosing us again!");
        }
        message.push_str(" Is there anything else I can help you with today?");

        self.state = DialogueState::default();
        self.push_assistant(&message, now);

        TurnReply {
            message,
            intent: None,
            completed: true,
            appointment: Some(appointment),
            suggestions: None,
        }
    }

    fn handle_negation(&mut self, now: DateTime<Local>) -> TurnReply {
        if self.state.intent == Some(Intent::BookAppointment) {
            self.state.step = self.state.step.saturating_sub(1).max(1);
            return self.reply_with(
                TurnReply::text(
                    "No worries. Let me help you with that again. What would you like to change?",
                ),
                now,
            );
        }
        self.reply_with(
            TurnReply::text("I understand. How else can I help you today?"),
            now,
        )
    }

    fn restart(&mut self, now: DateTime<Local>) -> TurnReply {
        self.state = DialogueState::default();
        self.state.intent = Some(Intent::BookAppointment);
        self.state.step = 1;
        self.reply_with(
            TurnReply::text("Let me help you start over. What service do you need today?"),
            now,
        )
    }

    /// Summary line for the read-back step. `None` only when a slot is
    /// missing, which the flow never allows by the time this is called.
    fn confirmation_summary(&self) -> Option<String> {
        let service = self.state.slots.service?;
        let name = self.state.slots.name.as_deref()?;
        let date = self.state.slots.date.as_deref()?;
        let slot = self.state.slots.time?;
        let contact = self.state.slots.contact.as_deref()?;
        let definition = service.definition();
        Some(format!(
            "{} for {} on {} at {}. Contact: {}. Fee: {}. Please bring: {}. Does everything \
             look correct?",
            service,
            name,
            date,
            slot.label(),
            contact,
            definition.fee,
            definition.documents.join(", ")
        ))
    }

    /// Prefill name and contact from the identified caller's profile.
    /// Skips the name step entirely when the profile already has a name.
    fn prefill_known_caller(&mut self) -> Option<String> {
        let phone = self.current_contact.clone()?;
        let profile = self.store.user_profile(&phone);
        if profile.name.is_empty() {
            return None;
        }
        self.state.slots.name = Some(profile.name.clone());
        self.state.slots.contact = Some(profile.phone);
        self.state.step = 3;
        Some(profile.name)
    }

    /// First eight slots, narrowed to the caller's preferred half of the day
    /// when their history shows one, presented four at a time.
    fn available_slots(&self) -> Vec<&'static str> {
        let mut slots: Vec<TimeSlot> = TimeSlot::all().take(8).collect();
        if let Some(phone) = &self.current_contact {
            let patterns = self.store.analyze_patterns(phone);
            if patterns.preferred_times.contains(&TimeOfDay::Morning) {
                slots.retain(|slot| slot.is_am());
            } else if patterns.preferred_times.contains(&TimeOfDay::Afternoon) {
                slots.retain(|slot| !slot.is_am());
            }
        }
        slots.into_iter().take(4).map(TimeSlot::label).collect()
    }

    // =========================================================================
    // Info flow
    // =========================================================================

    fn handle_info_request(&mut self, input: &str, now: DateTime<Local>) -> TurnReply {
        if contains_any(input, &["documents", "required", "need", "bring"]) {
            if let Some(service) = extract::extract_service(input) {
                let definition = service.definition();
                let message = format!(
                    "For {}, you'll need to bring: {}. The fee is {} and the process takes \
                     about {}. Would you like me to book an appointment for you?",
                    service,
                    definition.documents.join(", "),
                    definition.fee,
                    definition.duration
                );
                return self.reply_with(TurnReply::text(message).with_intent(Intent::GetInfo), now);
            }
            return self.reply_with(
                TurnReply::text(
                    "I can tell you the required documents for any service. Which service \
                     are you interested in? New licence, licence renewal, replacement, \
                     address change, or driving test?",
                )
                .with_intent(Intent::GetInfo),
                now,
            );
        }

        if contains_any(input, &["fee", "cost", "price"]) {
            let fees = SERVICE_CATALOG
                .iter()
                .map(|definition| format!("{} - {}", capitalize(definition.kind.label()), definition.fee))
                .collect::<Vec<_>>()
                .join(", ");
            let message = format!(
                "Here are our service fees: {}. Which service would you like to know more about?",
                fees
            );
            return self.reply_with(TurnReply::text(message).with_intent(Intent::GetInfo), now);
        }

        if contains_any(input, &["location", "address", "where"]) {
            let message = format!(
                "We're located at {}. Our office hours are {}. We're closed on Sundays and \
                 public holidays. Would you like to book an appointment?",
                self.office.address, self.office.hours
            );
            return self.reply_with(TurnReply::text(message).with_intent(Intent::GetInfo), now);
        }

        if contains_any(input, &["hours", "time", "open"]) {
            let message = format!(
                "Our office hours are {}. We're closed on Sundays and public holidays. \
                 You can reach us at {}. How can I help you today?",
                self.office.hours, self.office.helpline
            );
            return self.reply_with(TurnReply::text(message).with_intent(Intent::GetInfo), now);
        }

        self.reply_with(
            TurnReply::text(
                "I can provide information about required documents, fees, office location, \
                 hours, and contact details. I can also help you book appointments. What \
                 would you like to know?",
            )
            .with_intent(Intent::GetInfo),
            now,
        )
    }

    // =========================================================================
    // Session transcript
    // =========================================================================

    fn push_user(&mut self, content: &str, now: DateTime<Local>) {
        self.session
            .push(SessionMessage::user(content, now.with_timezone(&Utc)));
    }

    fn push_assistant(&mut self, content: &str, now: DateTime<Local>) {
        self.session
            .push(SessionMessage::assistant(content, now.with_timezone(&Utc)));
    }

    fn reply_with(&mut self, reply: TurnReply, now: DateTime<Local>) -> TurnReply {
        self.push_assistant(&reply.message, now);
        reply
    }
}

impl fmt::Debug for DialogueEngine {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("DialogueEngine")
            .field("intent", &self.state.intent)
            .field("step", &self.state.step)
            .finish()
    }
}

fn contains_any(input: &str, keywords: &[&str]) -> bool {
    keywords.iter().any(|keyword| input.contains(keyword))
}

fn capitalize(label: &str) -> String {
    let mut chars = label.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}
