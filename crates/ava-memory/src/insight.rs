//! Analytics and personalization derived from stored history.
//!
//! Everything here is computed on demand from the snapshot; nothing is
//! cached between calls.

use chrono::{DateTime, Local, Timelike, Utc};

use ava_core::catalog::{ServiceKind, TimeOfDay};
use ava_core::types::Sentiment;

use crate::store::MemoryStore;
use crate::types::{CommunicationStyle, SatisfactionTrend, UserPatterns};

/// Situation a personalized response is requested for.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ResponseContext {
    AppointmentConfirmation,
    ServiceSuggestion,
}

impl MemoryStore {
    /// Usage patterns mined from the 30 most recent conversations.
    pub fn analyze_patterns(&self, phone: &str) -> UserPatterns {
        let history = self.conversation_history(phone, 30);

        let mut services: Vec<(ServiceKind, u32)> = Vec::new();
        let mut times: Vec<(TimeOfDay, u32)> = Vec::new();
        let mut issues: Vec<String> = Vec::new();

        for record in &history {
            if let Some(appointment) = &record.appointment {
                bump(&mut services, appointment.service);
                bump(&mut times, categorize_time(&appointment.time));
            }
            if record.user_sentiment == Sentiment::Negative {
                issues.push(record.intent.clone());
            }
        }

        // Stable sort keeps first-seen order on equal counts.
        services.sort_by(|a, b| b.1.cmp(&a.1));
        times.sort_by(|a, b| b.1.cmp(&a.1));

        let recent: Vec<Sentiment> = history
            .iter()
            .take(5)
            .map(|record| record.user_sentiment)
            .collect();

        let mut common_issues: Vec<String> = Vec::new();
        for issue in issues {
            if !common_issues.contains(&issue) {
                common_issues.push(issue);
            }
        }

        UserPatterns {
            most_used_services: services.into_iter().take(3).map(|(s, _)| s).collect(),
            preferred_times: times.into_iter().take(2).map(|(t, _)| t).collect(),
            satisfaction_trend: satisfaction_trend(&recent),
            common_issues,
        }
    }

    /// Greeting tailored to what is known about the caller.
    ///
    /// Priority: unknown caller, interrupted booking, recently completed
    /// appointment, returning caller, first-time caller with a name.
    pub fn personalized_greeting(&self, phone: &str, now: DateTime<Local>) -> String {
        let profile = self.user_profile(phone);

        if profile.name.is_empty() {
            return format!(
                "Hello! You've reached the {}. This is {}, your virtual assistant. \
                 How can I help you today?",
                self.assistant.authority, self.assistant.name
            );
        }

        let name = short_name(&profile.name, profile.preferred_name.as_deref());
        let salutation = salutation(now);

        let recent = self.conversation_history(phone, 3);
        let interrupted = recent
            .iter()
            .any(|record| record.intent == "book_appointment" && !record.completed);
        if interrupted {
            return format!(
                "{}, {}! Welcome back. I see we were working on booking an appointment \
                 earlier. Would you like to continue with that, or is there something \
                 else I can help you with today?",
                salutation, name
            );
        }

        if let Some(last) = self.recent_appointments(phone, 1).first() {
            return format!(
                "{}, {}! Great to hear from you again. I hope your {} appointment \
                 went well. How can I assist you today?",
                salutation, name, last.service
            );
        }

        if profile.total_appointments > 0 {
            return format!(
                "{}, {}! Welcome back to the {}. How can I help you today?",
                salutation, name, self.assistant.authority
            );
        }

        format!(
            "{}, {}! Welcome to the {}. I'm {}, your virtual assistant. \
             How can I help you today?",
            salutation, name, self.assistant.authority, self.assistant.name
        )
    }

    /// Up to three next-step suggestions, most relevant first.
    pub fn contextual_suggestions(&self, phone: &str, now: DateTime<Local>) -> Vec<String> {
        let profile = self.user_profile(phone);
        let patterns = self.analyze_patterns(phone);
        let mut suggestions = Vec::new();

        if let Some(service) = patterns.most_used_services.first() {
            suggestions.push(format!("Book another {} appointment", service));
        }

        if profile.email.is_none() {
            suggestions.push("Update your contact information".to_string());
        }

        if let Some(last_visit) = profile.last_visit {
            let days_since = now
                .with_timezone(&Utc)
                .signed_duration_since(last_visit)
                .num_days();
            if days_since > 30 {
                suggestions.push("Check if your licence needs renewal".to_string());
            }
        }

        if patterns.preferred_times.contains(&TimeOfDay::Morning) {
            suggestions.push("Book a morning appointment".to_string());
        }

        suggestions.truncate(3);
        suggestions
    }

    /// Phrase a stock response to match the caller's communication style.
    pub fn personalized_response(&self, phone: &str, context: ResponseContext) -> String {
        let profile = self.user_profile(phone);
        let style = self.preferences(phone).communication_style;

        match context {
            ResponseContext::AppointmentConfirmation => match style {
                CommunicationStyle::Formal => format!(
                    "Thank you, {}. Your appointment has been confirmed.",
                    profile.name
                ),
                CommunicationStyle::Casual => "All set! Your appointment is booked.".to_string(),
                CommunicationStyle::Friendly => format!(
                    "Perfect, {}! Your appointment is all confirmed.",
                    short_name(&profile.name, profile.preferred_name.as_deref())
                ),
            },
            ResponseContext::ServiceSuggestion => {
                if profile.total_appointments > 3 {
                    "Based on your previous visits, I think this service would be perfect for you."
                        .to_string()
                } else {
                    "This service is quite popular and should meet your needs well.".to_string()
                }
            }
        }
    }

    /// Adjust stored preferences and notes from one exchange.
    pub fn learn_from_interaction(
        &self,
        phone: &str,
        user_input: &str,
        assistant_response: &str,
        satisfaction: Option<Sentiment>,
    ) {
        let mut state = self.lock();

        if user_input.contains("please") || user_input.contains("thank you") {
            let prefs = Self::preferences_entry(&mut state, phone);
            if prefs.communication_style == CommunicationStyle::Casual {
                prefs.communication_style = CommunicationStyle::Formal;
            }
        }

        let profile = Self::profile_entry(&mut state, phone);
        if user_input.contains("no, I meant") || user_input.contains("actually") {
            profile.notes.push(format!("Correction needed: {}", user_input));
        }
        if satisfaction == Some(Sentiment::Negative) {
            profile
                .notes
                .push(format!("Dissatisfaction: {}", assistant_response));
        }

        self.persist(&state);
    }
}

fn bump<T: PartialEq>(counts: &mut Vec<(T, u32)>, key: T) {
    match counts.iter_mut().find(|(k, _)| *k == key) {
        Some((_, n)) => *n += 1,
        None => counts.push((key, 1)),
    }
}

fn satisfaction_trend(sentiments: &[Sentiment]) -> SatisfactionTrend {
    let positive = sentiments
        .iter()
        .filter(|s| **s == Sentiment::Positive)
        .count();
    let negative = sentiments
        .iter()
        .filter(|s| **s == Sentiment::Negative)
        .count();

    if positive > negative {
        SatisfactionTrend::Improving
    } else if negative > positive {
        SatisfactionTrend::Declining
    } else {
        SatisfactionTrend::Stable
    }
}

/// Bucket a slot label like `2:00 PM` by its 24-hour time of day.
fn categorize_time(label: &str) -> TimeOfDay {
    let hour: u32 = label
        .split(':')
        .next()
        .and_then(|h| h.trim().parse().ok())
        .unwrap_or(0);
    let is_pm = label.to_uppercase().contains("PM");

    let hour24 = match (is_pm, hour) {
        (true, 12) => 12,
        (true, h) => h + 12,
        (false, 12) => 0,
        (false, h) => h,
    };

    match hour24 {
        9..=11 => TimeOfDay::Morning,
        12..=16 => TimeOfDay::Afternoon,
        _ => TimeOfDay::Evening,
    }
}

fn salutation(now: DateTime<Local>) -> &'static str {
    let hour = now.hour();
    if hour < 12 {
        "Good morning"
    } else if hour < 17 {
        "Good afternoon"
    } else {
        "Good evening"
    }
}

fn short_name(name: &str, preferred: Option<&str>) -> String {
    match preferred {
        Some(preferred) => preferred.to_string(),
        None => name.split_whitespace().next().unwrap_or(name).to_string(),
    }
}
