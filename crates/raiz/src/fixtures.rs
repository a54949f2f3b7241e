//! Hard-coded seed data standing in for a backend dataset.
//!
//! Ids come from `RecordId::from_parts` with fixed timestamps so seeded
//! order (and therefore store iteration order) is stable across runs.

use crate::{
    dashboard::{ActivityEntry, KindSlice, StatCard, StatusSlice, TrendPoint},
    domain::{
        appointment::{Appointment, AppointmentStatus, TimeSlot},
        property::{ListingStatus, Property, PropertyKind, Stratum},
        role::{ModuleKey, PermissionMatrix, PermissionSet, Role},
    },
    notify::NoticeKind,
};
use raiz_core::{error::InternalError, id::RecordId};
use time::macros::date;

/// Seed epoch: 2024-01-11T00:00:00Z.
const SEED_TS: u64 = 1_704_931_200_000;

/// Id of the first seeded property ("Casa Moderna en El Poblado").
#[must_use]
pub fn casa_moderna_id() -> RecordId {
    RecordId::from_parts(SEED_TS, 1)
}

/// Id of the second seeded property ("Apartamento de Lujo").
#[must_use]
pub fn apartamento_lujo_id() -> RecordId {
    RecordId::from_parts(SEED_TS, 2)
}

/// Id of the built-in Administrador role.
#[must_use]
pub fn administrador_id() -> RecordId {
    RecordId::from_parts(SEED_TS + 2_000, 1)
}

/// The seeded property inventory.
pub fn properties() -> Result<Vec<Property>, InternalError> {
    Ok(vec![
        Property {
            id: casa_moderna_id(),
            title: "Casa Moderna en El Poblado".into(),
            kind: PropertyKind::Casa,
            price: "$850,000".into(),
            status: ListingStatus::Sale,
            bedrooms: 4,
            bathrooms: 3,
            parking: 2,
            stratum: stratum(5)?,
            area: "280".into(),
            address: "Carrera 43A #5-15, El Poblado, Medellín".into(),
            image_url: "/api/placeholder/400/300".into(),
            description: "Hermosa casa moderna con acabados de lujo y excelente ubicación.".into(),
        },
        Property {
            id: apartamento_lujo_id(),
            title: "Apartamento de Lujo".into(),
            kind: PropertyKind::Apartamento,
            price: "$2,500/mes".into(),
            status: ListingStatus::Rent,
            bedrooms: 3,
            bathrooms: 2,
            parking: 1,
            stratum: stratum(4)?,
            area: "150".into(),
            address: "Calle 10 #43-25, Laureles, Medellín".into(),
            image_url: "/api/placeholder/400/300".into(),
            description: "Apartamento completamente amoblado en zona exclusiva.".into(),
        },
    ])
}

/// The seeded appointment book. References the seeded property ids.
pub fn appointments() -> Result<Vec<Appointment>, InternalError> {
    Ok(vec![
        Appointment {
            id: RecordId::from_parts(SEED_TS + 1_000, 1),
            client_name: "Ana Martínez".into(),
            client_phone: "+57 300 123 4567".into(),
            client_email: "ana.martinez@email.com".into(),
            property_id: casa_moderna_id(),
            date: date!(2024 - 01 - 15),
            slot: slot("10:00")?,
            status: AppointmentStatus::Confirmed,
            notes: "Cliente interesada en compra inmediata".into(),
        },
        Appointment {
            id: RecordId::from_parts(SEED_TS + 1_000, 2),
            client_name: "Luis García".into(),
            client_phone: "+57 301 234 5678".into(),
            client_email: "luis.garcia@email.com".into(),
            property_id: apartamento_lujo_id(),
            date: date!(2024 - 01 - 16),
            slot: slot("14:30")?,
            status: AppointmentStatus::Pending,
            notes: "Primera visita, requiere información de financiación".into(),
        },
    ])
}

/// The seeded roles: the Administrador system role plus Vendedor.
#[must_use]
pub fn roles() -> Vec<Role> {
    let mut vendedor = PermissionMatrix::new();
    vendedor.grant(
        ModuleKey::Properties,
        PermissionSet {
            create: true,
            edit: true,
            delete: false,
        },
    );
    vendedor.grant(ModuleKey::Appointments, PermissionSet::FULL);
    vendedor.grant(ModuleKey::Users, PermissionSet::NONE);
    vendedor.grant(
        ModuleKey::Reports,
        PermissionSet {
            create: true,
            edit: false,
            delete: false,
        },
    );

    vec![
        Role {
            id: administrador_id(),
            name: "Administrador".into(),
            description: "Acceso completo al sistema".into(),
            permissions: PermissionMatrix::full(),
            user_count: 2,
            is_system: true,
        },
        Role {
            id: RecordId::from_parts(SEED_TS + 2_000, 2),
            name: "Vendedor".into(),
            description: "Gestión de propiedades y citas".into(),
            permissions: vendedor,
            user_count: 5,
            is_system: false,
        },
    ]
}

/// The four dashboard stat cards.
#[must_use]
pub fn stat_cards() -> Vec<StatCard> {
    vec![
        StatCard {
            title: "Propiedades Activas".into(),
            value: "156".into(),
            trend_pct: 12,
            subtitle: "23 nuevas este mes".into(),
        },
        StatCard {
            title: "Citas Programadas".into(),
            value: "24".into(),
            trend_pct: 8,
            subtitle: "8 para hoy".into(),
        },
        StatCard {
            title: "Ventas del Mes".into(),
            value: "8".into(),
            trend_pct: 25,
            subtitle: "$2.4M generados".into(),
        },
        StatCard {
            title: "Clientes Activos".into(),
            value: "342".into(),
            trend_pct: 18,
            subtitle: "45 nuevos este mes".into(),
        },
    ]
}

/// Monthly sales-vs-rentals trend, first half of the year.
#[must_use]
pub fn monthly_trend() -> Vec<TrendPoint> {
    let months = ["Ene", "Feb", "Mar", "Abr", "May", "Jun"];
    let sales = [12, 19, 15, 25, 22, 30];
    let rentals = [8, 12, 10, 15, 18, 20];

    months
        .into_iter()
        .zip(sales)
        .zip(rentals)
        .map(|((month, sales), rentals)| TrendPoint {
            month: month.to_string(),
            sales,
            rentals,
        })
        .collect()
}

/// Portfolio distribution by property kind.
#[must_use]
pub fn kind_distribution() -> Vec<KindSlice> {
    [
        ("Casas", 45),
        ("Apartamentos", 62),
        ("Locales", 23),
        ("Terrenos", 18),
        ("Fincas", 8),
    ]
    .into_iter()
    .map(|(label, count)| KindSlice {
        label: label.to_string(),
        count,
    })
    .collect()
}

/// Portfolio breakdown by listing state.
#[must_use]
pub fn status_breakdown() -> Vec<StatusSlice> {
    [
        ("Vendidas", 30),
        ("En Venta", 45),
        ("Arrendadas", 25),
        ("Disponibles", 56),
    ]
    .into_iter()
    .map(|(label, count)| StatusSlice {
        label: label.to_string(),
        count,
    })
    .collect()
}

/// The recent-activity feed.
#[must_use]
pub fn recent_activity() -> Vec<ActivityEntry> {
    vec![
        ActivityEntry {
            action: "Nueva propiedad registrada".into(),
            details: "Casa en El Poblado - $850,000".into(),
            time_ago: "Hace 2 horas".into(),
            kind: NoticeKind::Success,
        },
        ActivityEntry {
            action: "Cita programada".into(),
            details: "Juan Pérez - Apartamento Laureles".into(),
            time_ago: "Hace 4 horas".into(),
            kind: NoticeKind::Info,
        },
        ActivityEntry {
            action: "Venta completada".into(),
            details: "Penthouse Envigado - $1,200,000".into(),
            time_ago: "Hace 6 horas".into(),
            kind: NoticeKind::Success,
        },
        ActivityEntry {
            action: "Cliente registrado".into(),
            details: "María González - Interesada en casas".into(),
            time_ago: "Hace 8 horas".into(),
            kind: NoticeKind::Info,
        },
        ActivityEntry {
            action: "Cita cancelada".into(),
            details: "Carlos Rodríguez - Reagendada".into(),
            time_ago: "Hace 1 día".into(),
            kind: NoticeKind::Warning,
        },
    ]
}

fn stratum(value: u8) -> Result<Stratum, InternalError> {
    Stratum::try_new(value)
        .map_err(|err| InternalError::fixture_internal(format!("seed stratum: {err}")))
}

fn slot(value: &str) -> Result<TimeSlot, InternalError> {
    TimeSlot::parse(value)
        .map_err(|err| InternalError::fixture_internal(format!("seed slot: {err}")))
}

///
/// TESTS
///
