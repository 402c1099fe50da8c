//! End-to-end conversation tests for the dialogue engine.
//!
//! Each test drives a whole conversation through `process_input_at` with a
//! pinned clock (Friday 2025-08-15, 10 AM) so parsed dates, greetings, and
//! slot menus are deterministic. The engine runs against a fresh in-memory
//! store per test.

use std::sync::Arc;

use chrono::{DateTime, Local, TimeZone};

use ava_core::{ServiceKind, TimeOfDay};
use ava_dialogue::{DialogueEngine, Intent};
use ava_memory::MemoryStore;

// =============================================================================
// Helpers
// =============================================================================

const PRIYA_PHONE: &str = "9876543210";

/// Friday morning, so "tomorrow" resolves to Saturday, August 16.
fn clock() -> DateTime<Local> {
    Local.with_ymd_and_hms(2025, 8, 15, 10, 0, 0).unwrap()
}

fn fresh_engine() -> (Arc<MemoryStore>, DialogueEngine) {
    let store = Arc::new(MemoryStore::in_memory());
    let engine = DialogueEngine::new(Arc::clone(&store));
    (store, engine)
}

/// Walk Priya through a complete new-licence booking.
fn complete_booking(engine: &mut DialogueEngine) {
    engine.process_input_at("I want to book a new licence", clock());
    engine.process_input_at("My name is Priya Sharma", clock());
    engine.process_input_at("August 20th", clock());
    engine.process_input_at("2 PM", clock());
    engine.process_input_at(PRIYA_PHONE, clock());
    let reply = engine.process_input_at("yes", clock());
    assert!(reply.completed, "booking did not complete: {}", reply.message);
}

// =============================================================================
// Booking flow, step by step
// =============================================================================

#[test]
fn test_booking_request_with_service_asks_for_name() {
    let (_store, mut engine) = fresh_engine();
    let reply = engine.process_input_at("I want to book a new licence", clock());

    assert_eq!(reply.intent, Some(Intent::BookAppointment));
    assert!(reply.message.contains("new licence"));
    assert!(reply.message.contains("full name"));
}

#[test]
fn test_name_step_cleans_spoken_name() {
    let (_store, mut engine) = fresh_engine();
    engine.process_input_at("I want to book a new licence", clock());
    let reply = engine.process_input_at("My name is Priya Sharma", clock());

    assert!(reply.message.contains("Thank you, Priya Sharma!"));
    assert!(reply.message.contains("What date"));
}

#[test]
fn test_date_step_presents_time_slots() {
    let (_store, mut engine) = fresh_engine();
    engine.process_input_at("I want to book a new licence", clock());
    engine.process_input_at("My name is Priya Sharma", clock());
    let reply = engine.process_input_at("August 20th", clock());

    assert!(reply.message.contains("Wednesday, August 20"));
    assert!(reply
        .message
        .contains("9:00 AM, 9:30 AM, 10:00 AM, 10:30 AM"));
}

#[test]
fn test_time_step_normalizes_spoken_time() {
    let (_store, mut engine) = fresh_engine();
    engine.process_input_at("I want to book a new licence", clock());
    engine.process_input_at("My name is Priya Sharma", clock());
    engine.process_input_at("August 20th", clock());
    let reply = engine.process_input_at("2 PM", clock());

    assert!(reply.message.contains("at 2:00 PM"));
    assert!(reply.message.contains("contact number"));
}

#[test]
fn test_contact_step_reads_back_full_summary() {
    let (_store, mut engine) = fresh_engine();
    engine.process_input_at("I want to book a new licence", clock());
    engine.process_input_at("My name is Priya Sharma", clock());
    engine.process_input_at("August 20th", clock());
    engine.process_input_at("2 PM", clock());
    let reply = engine.process_input_at(PRIYA_PHONE, clock());

    assert!(reply.message.contains("new licence for Priya Sharma"));
    assert!(reply.message.contains("Wednesday, August 20 at 2:00 PM"));
    assert!(reply.message.contains("Contact: 9876543210"));
    assert!(reply.message.contains("Fee: ₹500"));
    assert!(reply
        .message
        .contains("ID proof, Address proof, Passport photo, Medical certificate"));
    assert!(reply.message.contains("Does everything look correct?"));
}

#[test]
fn test_confirmation_completes_and_stores_everything() {
    let (store, mut engine) = fresh_engine();
    complete_booking(&mut engine);

    let profile = store.user_profile(PRIYA_PHONE);
    assert_eq!(profile.name, "Priya Sharma");
    assert_eq!(profile.total_appointments, 1);
    assert_eq!(profile.preferred_services, vec![ServiceKind::NewLicence]);
    assert_eq!(profile.preferred_time_slots, vec![TimeOfDay::Afternoon]);

    let history = store.conversation_history(PRIYA_PHONE, 10);
    assert_eq!(history.len(), 1);
    assert!(history[0].completed);
    let appointment = history[0].appointment.as_ref().unwrap();
    assert_eq!(appointment.service, ServiceKind::NewLicence);
    assert_eq!(appointment.date, "Wednesday, August 20");
    assert_eq!(appointment.time, "2:00 PM");
    assert_eq!(appointment.documents.len(), 4);

    let patterns = store.analyze_patterns(PRIYA_PHONE);
    assert!(patterns.most_used_services.contains(&ServiceKind::NewLicence));
}

#[test]
fn test_confirmation_reply_carries_the_appointment() {
    let (_store, mut engine) = fresh_engine();
    engine.process_input_at("I want to book a new licence", clock());
    engine.process_input_at("My name is Priya Sharma", clock());
    engine.process_input_at("August 20th", clock());
    engine.process_input_at("2 PM", clock());
    engine.process_input_at(PRIYA_PHONE, clock());
    let reply = engine.process_input_at("yes", clock());

    assert!(reply.completed);
    assert!(reply.message.contains("Your appointment is confirmed, Priya Sharma"));
    assert!(reply.message.contains("confirmation SMS at 9876543210"));
    // First booking, so no repeat-visitor thanks.
    assert!(!reply.message.contains("choosing us again"));

    let appointment = reply.appointment.expect("appointment missing from reply");
    assert_eq!(appointment.service, ServiceKind::NewLicence);
    assert_eq!(appointment.contact, PRIYA_PHONE);
}

#[test]
fn test_finalize_resets_flow_state() {
    let (_store, mut engine) = fresh_engine();
    complete_booking(&mut engine);

    assert_eq!(engine.active_intent(), None);
    assert_eq!(engine.step(), 0);

    // The next utterance starts fresh instead of hitting the old flow.
    let reply = engine.process_input_at("hello", clock());
    assert!(reply.message.contains("What can I do for you today?"));
}

// =============================================================================
// Information flow
// =============================================================================

#[test]
fn test_document_question_answered_without_booking() {
    let (_store, mut engine) = fresh_engine();
    let reply = engine.process_input_at("What documents do I need for renewal?", clock());

    assert_eq!(reply.intent, Some(Intent::GetInfo));
    assert!(reply
        .message
        .contains("Current licence, ID proof, Passport photo"));
    assert!(reply.message.contains("₹200"));
    // Renewal needs exactly its own three documents, nothing borrowed
    // from the new-licence checklist.
    assert!(!reply.message.contains("Medical certificate"));
}

#[test]
fn test_info_flow_can_switch_into_booking() {
    let (_store, mut engine) = fresh_engine();
    engine.process_input_at("What documents do I need for renewal?", clock());
    let reply = engine.process_input_at("okay, book me a renewal appointment", clock());

    assert_eq!(reply.intent, Some(Intent::BookAppointment));
    assert!(reply.message.contains("licence renewal"));
}

// =============================================================================
// Corrections and interruptions
// =============================================================================

#[test]
fn test_negation_rewinds_and_recovers() {
    let (_store, mut engine) = fresh_engine();
    engine.process_input_at("I want to book a new licence", clock());
    engine.process_input_at("My name is Priya Sharma", clock());
    assert_eq!(engine.step(), 3);

    let reply = engine.process_input_at("no wait", clock());
    assert!(reply.message.contains("What would you like to change?"));
    assert_eq!(engine.step(), 2);

    // The corrected name lands on the rewound step.
    let reply = engine.process_input_at("Priya Verma", clock());
    assert!(reply.message.contains("Thank you, Priya Verma!"));
    assert_eq!(engine.step(), 3);
}

#[test]
fn test_phone_number_mid_sentence_identifies_known_caller() {
    let (store, mut engine) = fresh_engine();
    complete_booking(&mut engine);
    engine.end_session(clock());

    // Same store, fresh session: the caller names their number out loud.
    let mut engine = DialogueEngine::new(store);
    let reply = engine.process_input_at("hi, this is 9876543210", clock());

    assert!(reply.message.contains("Priya"));
    assert!(reply.message.contains("new licence appointment went well"));
    let suggestions = reply.suggestions.expect("expected suggestions for known caller");
    assert!(!suggestions.is_empty());
    assert_eq!(engine.current_contact(), Some(PRIYA_PHONE));
}

#[test]
fn test_unknown_phone_sets_contact_and_skips_contact_step() {
    let (_store, mut engine) = fresh_engine();
    engine.process_input_at("i am calling from 9876543210", clock());
    assert_eq!(engine.current_contact(), Some(PRIYA_PHONE));

    engine.process_input_at("book a driving test", clock());
    engine.process_input_at("Arjun Mehta", clock());
    engine.process_input_at("tomorrow", clock());
    let reply = engine.process_input_at("10 o'clock", clock());

    // Contact was known, so the summary comes straight after the time.
    assert!(reply.message.contains("Contact: 9876543210"));
    assert!(reply.message.contains("Does everything look correct?"));
    assert_eq!(engine.step(), 6);
}

// =============================================================================
// Returning callers
// =============================================================================

#[test]
fn test_returning_caller_gets_personalized_greeting() {
    let (store, mut engine) = fresh_engine();
    complete_booking(&mut engine);
    engine.end_session(clock());

    let mut engine = DialogueEngine::new(store);
    engine.identify(PRIYA_PHONE);
    let greeting = engine.initial_greeting(clock());

    assert!(greeting.starts_with("Good morning, Priya!"));
    assert!(greeting.contains("new licence appointment went well"));
}

#[test]
fn test_returning_caller_skips_name_and_contact_steps() {
    let (store, mut engine) = fresh_engine();
    complete_booking(&mut engine);
    engine.end_session(clock());

    let mut engine = DialogueEngine::new(store);
    engine.identify(PRIYA_PHONE);

    let reply = engine.process_input_at("I want to book a new licence", clock());
    assert!(reply.message.contains("I have your details as Priya Sharma"));
    assert_eq!(engine.step(), 3);

    // History says afternoons, so the slot menu narrows to PM.
    let reply = engine.process_input_at("tomorrow", clock());
    assert!(reply.message.contains("2:00 PM, 2:30 PM"));
    assert!(!reply.message.contains("9:00 AM"));

    // Time goes straight to the summary since the contact is on file.
    let reply = engine.process_input_at("2:30 pm", clock());
    assert!(reply.message.contains("Does everything look correct?"));

    let reply = engine.process_input_at("yes", clock());
    assert!(reply.completed);
    assert!(reply.message.contains("Thank you for choosing us again!"));
}

// =============================================================================
// Session lifecycle
// =============================================================================

#[test]
fn test_end_session_records_incomplete_conversation() {
    let (store, mut engine) = fresh_engine();
    engine.identify(PRIYA_PHONE);
    engine.process_input_at("hello", clock());
    engine.process_input_at("I want to book a new licence", clock());
    engine.end_session(clock());

    let history = store.conversation_history(PRIYA_PHONE, 10);
    assert_eq!(history.len(), 1);
    assert_eq!(history[0].intent, "book_appointment");
    assert!(!history[0].completed);
    // Two caller turns and two assistant turns.
    assert_eq!(history[0].messages.len(), 4);
}

#[test]
fn test_end_session_without_contact_records_nothing() {
    let (store, mut engine) = fresh_engine();
    engine.process_input_at("hello", clock());
    engine.end_session(clock());

    assert!(store.conversation_history(PRIYA_PHONE, 10).is_empty());
}
