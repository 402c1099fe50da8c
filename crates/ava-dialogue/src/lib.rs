//! Rule-based dialogue engine for the Ava voice assistant.
//!
//! The engine drives two flows over keyword classification and slot
//! extraction: a six-step appointment booking and an information Q&A. All
//! state lives in the engine instance; long-term caller memory is delegated
//! to `ava-memory`.

pub mod emotion;
pub mod engine;
pub mod extract;
pub mod intent;

pub use emotion::{analyze as analyze_emotions, EmotionScore};
pub use engine::{DialogueEngine, Intent, TurnReply};
pub use intent::{classify, Classification, UtteranceClass};
