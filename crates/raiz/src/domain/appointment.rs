use raiz_core::{prelude::*, validate::looks_like_email};
use serde::{Deserialize, Serialize};
use std::fmt;
use thiserror::Error as ThisError;
use time::Date;

///
/// AppointmentStatus
///

#[derive(Clone, Copy, Debug, Default, Deserialize, Eq, PartialEq, Ord, PartialOrd, Serialize)]
pub enum AppointmentStatus {
    #[default]
    #[serde(rename = "Pendiente")]
    Pending,
    #[serde(rename = "Confirmada")]
    Confirmed,
    #[serde(rename = "Completada")]
    Completed,
    #[serde(rename = "Cancelada")]
    Cancelled,
}

impl AppointmentStatus {
    pub const ALL: [Self; 4] = [
        Self::Pending,
        Self::Confirmed,
        Self::Completed,
        Self::Cancelled,
    ];

    #[must_use]
    pub const fn label(&self) -> &'static str {
        match self {
            Self::Pending => "Pendiente",
            Self::Confirmed => "Confirmada",
            Self::Completed => "Completada",
            Self::Cancelled => "Cancelada",
        }
    }
}

impl fmt::Display for AppointmentStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.label())
    }
}

///
/// TimeSlotError
///

#[derive(Debug, ThisError)]
pub enum TimeSlotError {
    #[error("not a bookable time slot: {0}")]
    NotBookable(String),
}

///
/// TimeSlot
///
/// A bookable half-hour slot. The agenda runs 08:00-12:30 and, after the
/// lunch break, 14:00-17:30.
///

#[derive(Clone, Copy, Debug, Deserialize, Eq, Hash, PartialEq, Ord, PartialOrd, Serialize)]
#[serde(try_from = "String", into = "String")]
pub struct TimeSlot {
    hour: u8,
    minute: u8,
}

impl TimeSlot {
    /// Every bookable slot, in agenda order.
    #[must_use]
    pub fn all() -> Vec<Self> {
        let mut slots = Vec::with_capacity(18);
        for hour in 8..=17 {
            // lunch break
            if hour == 13 {
                continue;
            }
            // the morning block ends at 12:30
            for minute in [0, 30] {
                slots.push(Self { hour, minute });
            }
        }

        slots
    }

    pub fn try_new(hour: u8, minute: u8) -> Result<Self, TimeSlotError> {
        let candidate = Self { hour, minute };
        if Self::all().contains(&candidate) {
            Ok(candidate)
        } else {
            Err(TimeSlotError::NotBookable(format!("{hour:02}:{minute:02}")))
        }
    }

    /// Parse the `HH:MM` form used by the agenda and the seed data.
    pub fn parse(value: &str) -> Result<Self, TimeSlotError> {
        let not_bookable = || TimeSlotError::NotBookable(value.to_string());

        let (hour, minute) = value.split_once(':').ok_or_else(not_bookable)?;
        let hour: u8 = hour.parse().map_err(|_| not_bookable())?;
        let minute: u8 = minute.parse().map_err(|_| not_bookable())?;

        Self::try_new(hour, minute)
    }

    #[must_use]
    pub const fn hour(&self) -> u8 {
        self.hour
    }

    #[must_use]
    pub const fn minute(&self) -> u8 {
        self.minute
    }
}

impl fmt::Display for TimeSlot {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:02}:{:02}", self.hour, self.minute)
    }
}

impl TryFrom<String> for TimeSlot {
    type Error = TimeSlotError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::parse(&value)
    }
}

impl From<TimeSlot> for String {
    fn from(slot: TimeSlot) -> Self {
        slot.to_string()
    }
}

///
/// Appointment
///
/// A client visit to a property. `property_id` is a plain reference and
/// may dangle once the property is deleted; joins resolve it to `None`.
///

#[derive(Clone, Debug, Deserialize, Eq, PartialEq, Serialize)]
pub struct Appointment {
    pub id: RecordId,
    pub client_name: String,
    pub client_phone: String,
    pub client_email: String,
    pub property_id: RecordId,
    pub date: Date,
    pub slot: TimeSlot,
    pub status: AppointmentStatus,
    pub notes: String,
}

impl Record for Appointment {
    const ENTITY_NAME: &'static str = "appointment";

    fn id(&self) -> RecordId {
        self.id
    }
}

impl FieldValues for Appointment {
    fn field_value(&self, field: &str) -> Option<Value> {
        let value = match field {
            "id" => Value::Id(self.id),
            "client_name" => Value::Text(self.client_name.clone()),
            "client_phone" => Value::Text(self.client_phone.clone()),
            "client_email" => Value::Text(self.client_email.clone()),
            "property_id" => Value::Id(self.property_id),
            "date" => Value::Date(self.date),
            "slot" => Value::Text(self.slot.to_string()),
            "status" => Value::Text(self.status.label().to_string()),
            "notes" => Value::Text(self.notes.clone()),
            _ => return None,
        };

        Some(value)
    }
}

///
/// AppointmentDraft
///
/// The scheduling form. Property, date, and slot stay unset until chosen.
/// Date/slot collisions are deliberately not checked; double-booking is
/// allowed, as in the source workflow.
///

#[derive(Clone, Debug, Default, Deserialize, Eq, PartialEq, Serialize)]
pub struct AppointmentDraft {
    pub client_name: String,
    pub client_phone: String,
    pub client_email: String,
    pub property_id: Option<RecordId>,
    pub date: Option<Date>,
    pub slot: Option<TimeSlot>,
    pub status: AppointmentStatus,
    pub notes: String,
}

impl AppointmentDraft {
    /// Prefill the form for editing an existing record.
    #[must_use]
    pub fn from_appointment(appointment: &Appointment) -> Self {
        Self {
            client_name: appointment.client_name.clone(),
            client_phone: appointment.client_phone.clone(),
            client_email: appointment.client_email.clone(),
            property_id: Some(appointment.property_id),
            date: Some(appointment.date),
            slot: Some(appointment.slot),
            status: appointment.status,
            notes: appointment.notes.clone(),
        }
    }

    fn issues(&self) -> Issues {
        let mut issues = Issues::new();

        issues.require_text(
            "client_name",
            &self.client_name,
            "El nombre del cliente es requerido",
        );
        issues.require_text("client_phone", &self.client_phone, "El teléfono es requerido");
        issues.require_text("client_email", &self.client_email, "El email es requerido");
        issues.require(
            "property_id",
            self.property_id.is_some(),
            "Debe seleccionar una propiedad",
        );
        issues.require("date", self.date.is_some(), "La fecha es requerida");
        issues.require("slot", self.slot.is_some(), "La hora es requerida");

        // a blank-but-nonempty email fails the shape check, not the
        // required check, so the format message wins
        if !self.client_email.is_empty() && !looks_like_email(self.client_email.trim()) {
            issues.put("client_email", "El email no es válido");
        }

        issues
    }

    /// Validate and materialize the draft under the given id.
    pub fn try_into_appointment(self, id: RecordId) -> Result<Appointment, Issues> {
        let issues = self.issues();

        if let (true, Some(property_id), Some(date), Some(slot)) =
            (issues.is_empty(), self.property_id, self.date, self.slot)
        {
            Ok(Appointment {
                id,
                client_name: self.client_name,
                client_phone: self.client_phone,
                client_email: self.client_email,
                property_id,
                date,
                slot,
                status: self.status,
                notes: self.notes,
            })
        } else {
            Err(issues)
        }
    }
}

impl ValidateDraft for AppointmentDraft {
    fn validate(&self) -> Result<(), Issues> {
        self.issues().into_result()
    }
}

///
/// TESTS
///
