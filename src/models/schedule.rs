use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// A bookable slot on a doctor's calendar.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Schedule {
    pub id: i64,
    pub doctor_id: i64,
    pub date: NaiveDate,
    /// Slot label as shown to patients, e.g. "08:00 - 09:00".
    pub timeslot: String,
    pub max_capacity: i64,
    pub current_bookings: i64,
}

impl Schedule {
    /// Seats still open on this slot.
    pub fn available(&self) -> i64 {
        self.max_capacity - self.current_bookings
    }
}
