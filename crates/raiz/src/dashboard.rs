//! Aggregated overview of the back office: stat cards, trend series and
//! the upcoming-appointment shortlist derived from the live stores.

use crate::{
    domain::{
        appointment::{Appointment, AppointmentStatus, TimeSlot},
        property::Property,
    },
    fixtures,
    notify::NoticeKind,
};
use derive_more::Display;
use raiz_core::store::Store;
use serde::{Deserialize, Serialize};
use time::Date;

///
/// TimeRange
/// Reporting window selectable on the overview page.
///

#[derive(Clone, Copy, Debug, Default, Display, Eq, PartialEq, Serialize, Deserialize)]
pub enum TimeRange {
    #[default]
    #[display("Últimos 7 días")]
    #[serde(rename = "7d")]
    Last7Days,

    #[display("Últimos 30 días")]
    #[serde(rename = "30d")]
    Last30Days,

    #[display("Últimos 90 días")]
    #[serde(rename = "90d")]
    Last90Days,
}

impl TimeRange {
    pub const ALL: [Self; 3] = [Self::Last7Days, Self::Last30Days, Self::Last90Days];

    #[must_use]
    pub const fn days(self) -> u16 {
        match self {
            Self::Last7Days => 7,
            Self::Last30Days => 30,
            Self::Last90Days => 90,
        }
    }
}

///
/// StatCard
///

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct StatCard {
    pub title: String,
    pub value: String,
    pub trend_pct: u32,
    pub subtitle: String,
}

///
/// TrendPoint
/// One month of closed sales and signed rentals.
///

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct TrendPoint {
    pub month: String,
    pub sales: u32,
    pub rentals: u32,
}

///
/// KindSlice
///

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct KindSlice {
    pub label: String,
    pub count: u32,
}

///
/// StatusSlice
///

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct StatusSlice {
    pub label: String,
    pub count: u32,
}

///
/// ActivityEntry
///

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct ActivityEntry {
    pub action: String,
    pub details: String,
    pub time_ago: String,
    pub kind: NoticeKind,
}

///
/// UpcomingAppointment
/// An appointment shortlist row. The property title is resolved at build
/// time; it is `None` when the referenced property no longer exists.
///

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct UpcomingAppointment {
    pub client_name: String,
    pub property_title: Option<String>,
    pub date: Date,
    pub slot: TimeSlot,
    pub status: AppointmentStatus,
}

///
/// DashboardSummary
///

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct DashboardSummary {
    pub range: TimeRange,
    pub stats: Vec<StatCard>,
    pub trend: Vec<TrendPoint>,
    pub by_kind: Vec<KindSlice>,
    pub by_status: Vec<StatusSlice>,
    pub recent_activity: Vec<ActivityEntry>,
    pub upcoming: Vec<UpcomingAppointment>,
}

impl DashboardSummary {
    /// Assembles the overview for the given window. Card and chart figures
    /// are fixture-backed; the upcoming shortlist is derived from the
    /// appointment store.
    #[must_use]
    pub fn build(
        range: TimeRange,
        properties: &Store<Property>,
        appointments: &Store<Appointment>,
    ) -> Self {
        Self {
            range,
            stats: fixtures::stat_cards(),
            trend: fixtures::monthly_trend(),
            by_kind: fixtures::kind_distribution(),
            by_status: fixtures::status_breakdown(),
            recent_activity: fixtures::recent_activity(),
            upcoming: upcoming_appointments(properties, appointments),
        }
    }
}

// The three next appointments that are still on the books, soonest first.
fn upcoming_appointments(
    properties: &Store<Property>,
    appointments: &Store<Appointment>,
) -> Vec<UpcomingAppointment> {
    let mut pending: Vec<Appointment> = appointments
        .records()
        .into_iter()
        .filter(|appt| appt.status != AppointmentStatus::Cancelled)
        .collect();

    pending.sort_by_key(|appt| (appt.date, appt.slot));

    pending
        .into_iter()
        .take(3)
        .map(|appt| UpcomingAppointment {
            client_name: appt.client_name,
            property_title: properties.record(appt.property_id).map(|p| p.title.clone()),
            date: appt.date,
            slot: appt.slot,
            status: appt.status,
        })
        .collect()
}

///
/// TESTS
///
