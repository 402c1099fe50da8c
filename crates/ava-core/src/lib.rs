//! Ava core crate - shared types, service catalog, configuration, and errors.
//!
//! Everything the dialogue engine and the memory store agree on lives here:
//! - The service catalog and the fixed table of bookable time slots
//! - Session message and appointment types
//! - TOML configuration with defaults
//! - The crate-wide error type

pub mod catalog;
pub mod config;
pub mod error;
pub mod types;

pub use catalog::{
    ServiceDefinition, ServiceKind, TimeOfDay, TimeSlot, SERVICE_CATALOG, TIME_SLOTS,
};
pub use config::{AssistantConfig, AvaConfig, GeneralConfig, OfficeConfig};
pub use error::{AvaError, Result};
pub use types::{Appointment, MessageRole, Sentiment, SessionMessage};
