//! Prompt Assembler — shapes live directory data into the compact payloads
//! embedded in generation instructions.

use chrono::{Days, NaiveDate};
use rusqlite::Connection;

use crate::db::repository;
use crate::models::enums::{DoctorIntent, SpecialtyIntent};
use crate::models::{Doctor, Review, Schedule};

use super::types::{
    ClinicPayload, ClinicProjection, ConversationContext, DoctorPayload, DoctorProjection,
    ReviewProjection, SlotProjection, SpecialtyPayload, SpecialtyProjection,
};
use super::ChatError;

/// Forward-looking schedule window: [today, today + 3 days).
const SCHEDULE_WINDOW_DAYS: u64 = 3;

/// How many recent commented reviews accompany each doctor.
const MAX_REVIEWS_PER_DOCTOR: usize = 2;

/// Build the doctor payload: every doctor with its near-term schedule and
/// latest commented reviews. Price is included only for price-intent queries
/// and stripped from every other payload.
pub fn assemble_doctor_payload(
    conn: &Connection,
    query: &str,
    intent: DoctorIntent,
    context: &ConversationContext,
    today: NaiveDate,
) -> Result<DoctorPayload, ChatError> {
    let doctors = repository::list_doctors(conn).map_err(ChatError::DoctorLookup)?;
    let window_end = today
        .checked_add_days(Days::new(SCHEDULE_WINDOW_DAYS))
        .unwrap_or(today);

    // Per-doctor enrichment reads are independent of each other; nothing
    // below depends on the order they complete in.
    let mut entries = Vec::with_capacity(doctors.len());
    for doctor in &doctors {
        let schedule = repository::schedules_in_range(conn, doctor.id, today, window_end)
            .map_err(ChatError::DoctorLookup)?;
        let reviews =
            repository::recent_reviews_with_comments(conn, doctor.id, MAX_REVIEWS_PER_DOCTOR)
                .map_err(ChatError::DoctorLookup)?;
        entries.push(project_doctor(doctor, &schedule, &reviews, intent));
    }

    Ok(DoctorPayload {
        doctors: entries,
        query: query.to_string(),
        filter: (intent != DoctorIntent::Default).then_some(intent),
        greeted: context.greeted,
        transcript: context.transcript.clone(),
    })
}

pub fn assemble_specialty_payload(
    conn: &Connection,
    query: &str,
    intent: SpecialtyIntent,
    context: &ConversationContext,
) -> Result<SpecialtyPayload, ChatError> {
    let specialties = repository::list_specialties(conn).map_err(ChatError::SpecialtyLookup)?;

    Ok(SpecialtyPayload {
        specialties: specialties
            .into_iter()
            .map(|s| SpecialtyProjection {
                id: s.id,
                name: s.name,
                description: s.description_markdown.unwrap_or_default(),
            })
            .collect(),
        query: query.to_string(),
        filter: (intent != SpecialtyIntent::Default).then_some(intent),
        greeted: context.greeted,
        transcript: context.transcript.clone(),
    })
}

pub fn assemble_clinic_payload(
    conn: &Connection,
    query: &str,
    context: &ConversationContext,
) -> Result<ClinicPayload, ChatError> {
    let clinics = repository::list_clinics(conn).map_err(ChatError::ClinicLookup)?;

    Ok(ClinicPayload {
        clinics: clinics
            .into_iter()
            .map(|c| ClinicProjection {
                id: c.id,
                name: c.name,
                address: c.address.unwrap_or_default(),
                description: c.description_markdown.unwrap_or_default(),
            })
            .collect(),
        query: query.to_string(),
        greeted: context.greeted,
        transcript: context.transcript.clone(),
    })
}

fn project_doctor(
    doctor: &Doctor,
    schedule: &[Schedule],
    reviews: &[Review],
    intent: DoctorIntent,
) -> DoctorProjection {
    let price = if intent == DoctorIntent::Price {
        doctor.price.map(format_price)
    } else {
        None
    };

    DoctorProjection {
        id: doctor.id,
        name: doctor.display_name(),
        position: doctor.position.clone().unwrap_or_default(),
        specialty: doctor.specialty.clone().unwrap_or_default(),
        description: doctor.description.clone().unwrap_or_default(),
        schedule: schedule
            .iter()
            .map(|slot| SlotProjection {
                date: slot.date.format("%Y-%m-%d").to_string(),
                timeslot: slot.timeslot.clone(),
                available: slot.available(),
            })
            .collect(),
        reviews: reviews
            .iter()
            .map(|review| ReviewProjection {
                rating: review.rating,
                comment: review.comment.clone().unwrap_or_default(),
            })
            .collect(),
        price,
    }
}

/// Format a VND amount the way the booking pages print it: "300.000 VND".
pub fn format_price(amount: i64) -> String {
    let digits = amount.abs().to_string();
    let mut grouped = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, c) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            grouped.push('.');
        }
        grouped.push(c);
    }
    let sign = if amount < 0 { "-" } else { "" };
    format!("{sign}{grouped} VND")
}
