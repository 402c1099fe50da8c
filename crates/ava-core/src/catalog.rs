//! Static service catalog and bookable time-slot table.
//!
//! The catalog is configuration, not user data: five services, each with a
//! fee, an expected duration, and a fixed document checklist. The slot table
//! is the sole universe of bookable times; every parsed time snaps to one
//! of its twelve entries.

use serde::{Deserialize, Serialize};
use std::fmt;

// =============================================================================
// Services
// =============================================================================

/// The five services the authority offers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ServiceKind {
    #[serde(rename = "new licence")]
    NewLicence,
    #[serde(rename = "licence renewal")]
    LicenceRenewal,
    #[serde(rename = "replacement")]
    Replacement,
    #[serde(rename = "address change")]
    AddressChange,
    #[serde(rename = "driving test")]
    DrivingTest,
}

impl ServiceKind {
    pub const ALL: [ServiceKind; 5] = [
        ServiceKind::NewLicence,
        ServiceKind::LicenceRenewal,
        ServiceKind::Replacement,
        ServiceKind::AddressChange,
        ServiceKind::DrivingTest,
    ];

    /// Spoken label, used verbatim in responses.
    pub fn label(self) -> &'static str {
        match self {
            ServiceKind::NewLicence => "new licence",
            ServiceKind::LicenceRenewal => "licence renewal",
            ServiceKind::Replacement => "replacement",
            ServiceKind::AddressChange => "address change",
            ServiceKind::DrivingTest => "driving test",
        }
    }

    /// Catalog entry for this service.
    pub fn definition(self) -> &'static ServiceDefinition {
        match self {
            ServiceKind::NewLicence => &SERVICE_CATALOG[0],
            ServiceKind::LicenceRenewal => &SERVICE_CATALOG[1],
            ServiceKind::Replacement => &SERVICE_CATALOG[2],
            ServiceKind::AddressChange => &SERVICE_CATALOG[3],
            ServiceKind::DrivingTest => &SERVICE_CATALOG[4],
        }
    }
}

impl fmt::Display for ServiceKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.label())
    }
}

impl std::str::FromStr for ServiceKind {
    type Err = String;
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "new licence" => Ok(ServiceKind::NewLicence),
            "licence renewal" => Ok(ServiceKind::LicenceRenewal),
            "replacement" => Ok(ServiceKind::Replacement),
            "address change" => Ok(ServiceKind::AddressChange),
            "driving test" => Ok(ServiceKind::DrivingTest),
            _ => Err(format!("Unknown service: {}", s)),
        }
    }
}

/// One catalog entry: what to bring, what it costs, how long it takes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ServiceDefinition {
    pub kind: ServiceKind,
    pub documents: &'static [&'static str],
    pub fee: &'static str,
    pub duration: &'static str,
}

/// The full catalog, in presentation order.
pub const SERVICE_CATALOG: [ServiceDefinition; 5] = [
    ServiceDefinition {
        kind: ServiceKind::NewLicence,
        documents: &[
            "ID proof",
            "Address proof",
            "Passport photo",
            "Medical certificate",
        ],
        fee: "₹500",
        duration: "30 minutes",
    },
    ServiceDefinition {
        kind: ServiceKind::LicenceRenewal,
        documents: &["Current licence", "ID proof", "Passport photo"],
        fee: "₹200",
        duration: "15 minutes",
    },
    ServiceDefinition {
        kind: ServiceKind::Replacement,
        documents: &["Police report (if lost)", "ID proof", "Passport photo"],
        fee: "₹300",
        duration: "20 minutes",
    },
    ServiceDefinition {
        kind: ServiceKind::AddressChange,
        documents: &["Current licence", "New address proof", "Passport photo"],
        fee: "₹100",
        duration: "10 minutes",
    },
    ServiceDefinition {
        kind: ServiceKind::DrivingTest,
        documents: &["Learner's licence", "ID proof", "Passport photo"],
        fee: "₹300",
        duration: "45 minutes",
    },
];

// =============================================================================
// Time slots
// =============================================================================

/// Bookable half-hour labels: 9:00 AM-11:30 AM and 2:00 PM-4:30 PM.
/// Lunch is excluded.
pub const TIME_SLOTS: [&str; 12] = [
    "9:00 AM", "9:30 AM", "10:00 AM", "10:30 AM", "11:00 AM", "11:30 AM", "2:00 PM", "2:30 PM",
    "3:00 PM", "3:30 PM", "4:00 PM", "4:30 PM",
];

/// Minute-of-day for each `TIME_SLOTS` entry, same order.
const SLOT_MINUTES: [u32; 12] = [540, 570, 600, 630, 660, 690, 840, 870, 900, 930, 960, 990];

/// Coarse day segment used for preferences and pattern analytics.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TimeOfDay {
    Morning,
    Afternoon,
    Evening,
}

impl fmt::Display for TimeOfDay {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TimeOfDay::Morning => write!(f, "morning"),
            TimeOfDay::Afternoon => write!(f, "afternoon"),
            TimeOfDay::Evening => write!(f, "evening"),
        }
    }
}

/// One entry of the fixed slot table.
///
/// Constructed only from the table, so an instance always names a bookable
/// time. Parsed times that fall between entries snap via [`TimeSlot::nearest`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TimeSlot(usize);

impl TimeSlot {
    /// All twelve slots in table order.
    pub fn all() -> impl Iterator<Item = TimeSlot> {
        (0..TIME_SLOTS.len()).map(TimeSlot)
    }

    /// Look up a slot by its exact label.
    pub fn from_label(label: &str) -> Option<TimeSlot> {
        TIME_SLOTS.iter().position(|s| *s == label).map(TimeSlot)
    }

    /// The slot closest to the given minute-of-day, ties resolved to the
    /// earlier table entry.
    pub fn nearest(minute_of_day: u32) -> TimeSlot {
        let mut best = 0;
        let mut best_diff = u32::MAX;
        for (i, m) in SLOT_MINUTES.iter().enumerate() {
            let diff = m.abs_diff(minute_of_day);
            if diff < best_diff {
                best_diff = diff;
                best = i;
            }
        }
        TimeSlot(best)
    }

    pub fn label(self) -> &'static str {
        TIME_SLOTS[self.0]
    }

    pub fn minute_of_day(self) -> u32 {
        SLOT_MINUTES[self.0]
    }

    pub fn is_am(self) -> bool {
        self.minute_of_day() < 12 * 60
    }

    /// Day segment this slot belongs to: 9-12 morning, 12-17 afternoon.
    pub fn time_of_day(self) -> TimeOfDay {
        let hour = self.minute_of_day() / 60;
        if (9..12).contains(&hour) {
            TimeOfDay::Morning
        } else if (12..17).contains(&hour) {
            TimeOfDay::Afternoon
        } else {
            TimeOfDay::Evening
        }
    }
}

impl fmt::Display for TimeSlot {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.label())
    }
}
