use raiz_core::prelude::*;
use serde::{Deserialize, Serialize};
use std::fmt;
use thiserror::Error as ThisError;

///
/// PropertyKind
///

#[derive(Clone, Copy, Debug, Default, Deserialize, Eq, PartialEq, Ord, PartialOrd, Serialize)]
pub enum PropertyKind {
    #[default]
    Casa,
    Apartamento,
    Apartaestudio,
    Finca,
    Terreno,
    #[serde(rename = "Local Comercial")]
    LocalComercial,
}

impl PropertyKind {
    pub const ALL: [Self; 6] = [
        Self::Casa,
        Self::Apartamento,
        Self::Apartaestudio,
        Self::Finca,
        Self::Terreno,
        Self::LocalComercial,
    ];

    #[must_use]
    pub const fn label(&self) -> &'static str {
        match self {
            Self::Casa => "Casa",
            Self::Apartamento => "Apartamento",
            Self::Apartaestudio => "Apartaestudio",
            Self::Finca => "Finca",
            Self::Terreno => "Terreno",
            Self::LocalComercial => "Local Comercial",
        }
    }
}

impl fmt::Display for PropertyKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.label())
    }
}

///
/// ListingStatus
///
/// Whether the property is listed for sale or for rent.
///

#[derive(Clone, Copy, Debug, Default, Deserialize, Eq, PartialEq, Ord, PartialOrd, Serialize)]
pub enum ListingStatus {
    #[default]
    #[serde(rename = "Venta")]
    Sale,
    #[serde(rename = "Arriendo")]
    Rent,
}

impl ListingStatus {
    pub const ALL: [Self; 2] = [Self::Sale, Self::Rent];

    #[must_use]
    pub const fn label(&self) -> &'static str {
        match self {
            Self::Sale => "Venta",
            Self::Rent => "Arriendo",
        }
    }
}

impl fmt::Display for ListingStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.label())
    }
}

///
/// StratumError
///

#[derive(Debug, ThisError)]
pub enum StratumError {
    #[error("stratum out of range: {0} (expected 1..=6)")]
    OutOfRange(u8),
}

///
/// Stratum
///
/// Colombian socioeconomic stratum, 1 through 6.
///

#[derive(Clone, Copy, Debug, Deserialize, Eq, PartialEq, Ord, PartialOrd, Serialize)]
#[serde(try_from = "u8", into = "u8")]
pub struct Stratum(u8);

impl Stratum {
    pub const MIN: Self = Self(1);
    pub const MAX: Self = Self(6);

    pub const fn try_new(value: u8) -> Result<Self, StratumError> {
        if value >= 1 && value <= 6 {
            Ok(Self(value))
        } else {
            Err(StratumError::OutOfRange(value))
        }
    }

    #[must_use]
    pub const fn get(&self) -> u8 {
        self.0
    }
}

impl Default for Stratum {
    fn default() -> Self {
        Self::MIN
    }
}

impl TryFrom<u8> for Stratum {
    type Error = StratumError;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        Self::try_new(value)
    }
}

impl From<Stratum> for u8 {
    fn from(stratum: Stratum) -> Self {
        stratum.0
    }
}

impl fmt::Display for Stratum {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

///
/// Property
///
/// One inventory listing. `price` and `area` stay free-form text because
/// the source data mixes formats ("$850,000", "$2,500/mes").
///

#[derive(Clone, Debug, Deserialize, Eq, PartialEq, Serialize)]
pub struct Property {
    pub id: RecordId,
    pub title: String,
    pub kind: PropertyKind,
    pub price: String,
    pub status: ListingStatus,
    pub bedrooms: u32,
    pub bathrooms: u32,
    pub parking: u32,
    pub stratum: Stratum,
    pub area: String,
    pub address: String,
    pub image_url: String,
    pub description: String,
}

impl Record for Property {
    const ENTITY_NAME: &'static str = "property";

    fn id(&self) -> RecordId {
        self.id
    }
}

impl FieldValues for Property {
    fn field_value(&self, field: &str) -> Option<Value> {
        let value = match field {
            "id" => Value::Id(self.id),
            "title" => Value::Text(self.title.clone()),
            "kind" => Value::Text(self.kind.label().to_string()),
            "price" => Value::Text(self.price.clone()),
            "status" => Value::Text(self.status.label().to_string()),
            "bedrooms" => Value::Uint(u64::from(self.bedrooms)),
            "bathrooms" => Value::Uint(u64::from(self.bathrooms)),
            "parking" => Value::Uint(u64::from(self.parking)),
            "stratum" => Value::Uint(u64::from(self.stratum.get())),
            "area" => Value::Text(self.area.clone()),
            "address" => Value::Text(self.address.clone()),
            "description" => Value::Text(self.description.clone()),
            _ => return None,
        };

        Some(value)
    }
}

///
/// PropertyDraft
///
/// The property form shape. Defaults mirror the empty form: Casa for
/// sale, one bedroom, one bathroom, stratum 1.
///

#[derive(Clone, Debug, Deserialize, Eq, PartialEq, Serialize)]
pub struct PropertyDraft {
    pub title: String,
    pub kind: PropertyKind,
    pub price: String,
    pub status: ListingStatus,
    pub bedrooms: u32,
    pub bathrooms: u32,
    pub parking: u32,
    pub stratum: Stratum,
    pub area: String,
    pub address: String,
    pub image_url: String,
    pub description: String,
}

impl Default for PropertyDraft {
    fn default() -> Self {
        Self {
            title: String::new(),
            kind: PropertyKind::Casa,
            price: String::new(),
            status: ListingStatus::Sale,
            bedrooms: 1,
            bathrooms: 1,
            parking: 0,
            stratum: Stratum::MIN,
            area: String::new(),
            address: String::new(),
            image_url: String::new(),
            description: String::new(),
        }
    }
}

impl PropertyDraft {
    /// Prefill the form for editing an existing record.
    #[must_use]
    pub fn from_property(property: &Property) -> Self {
        Self {
            title: property.title.clone(),
            kind: property.kind,
            price: property.price.clone(),
            status: property.status,
            bedrooms: property.bedrooms,
            bathrooms: property.bathrooms,
            parking: property.parking,
            stratum: property.stratum,
            area: property.area.clone(),
            address: property.address.clone(),
            image_url: property.image_url.clone(),
            description: property.description.clone(),
        }
    }

    /// Materialize the draft under the given id.
    /// Call `validate` first; this performs no checking of its own.
    #[must_use]
    pub fn into_property(self, id: RecordId) -> Property {
        Property {
            id,
            title: self.title,
            kind: self.kind,
            price: self.price,
            status: self.status,
            bedrooms: self.bedrooms,
            bathrooms: self.bathrooms,
            parking: self.parking,
            stratum: self.stratum,
            area: self.area,
            address: self.address,
            image_url: self.image_url,
            description: self.description,
        }
    }
}

impl ValidateDraft for PropertyDraft {
    fn validate(&self) -> Result<(), Issues> {
        let mut issues = Issues::new();

        issues.require_text("title", &self.title, "El título es requerido");
        issues.require_text("price", &self.price, "El precio es requerido");
        issues.require_text("area", &self.area, "El área es requerida");
        issues.require_text("address", &self.address, "La dirección es requerida");

        issues.into_result()
    }
}

///
/// TESTS
///

#[cfg(test)]
mod tests {
    use super::*;

    fn valid_draft() -> PropertyDraft {
        PropertyDraft {
            title: "Casa Moderna en El Poblado".into(),
            price: "$850,000".into(),
            area: "280".into(),
            address: "Carrera 43A #5-15, El Poblado, Medellín".into(),
            ..PropertyDraft::default()
        }
    }

    #[test]
    fn draft_requires_title_price_area_address() {
        let issues = PropertyDraft::default().validate().unwrap_err();

        assert_eq!(issues.get("title"), Some("El título es requerido"));
        assert_eq!(issues.get("price"), Some("El precio es requerido"));
        assert_eq!(issues.get("area"), Some("El área es requerida"));
        assert_eq!(issues.get("address"), Some("La dirección es requerida"));
    }

    #[test]
    fn whitespace_only_fields_are_blank() {
        let draft = PropertyDraft {
            title: "   ".into(),
            ..valid_draft()
        };

        let issues = draft.validate().unwrap_err();
        assert_eq!(issues.len(), 1);
        assert!(issues.get("title").is_some());
    }

    #[test]
    fn valid_draft_passes() {
        assert!(valid_draft().validate().is_ok());
    }

    #[test]
    fn stratum_bounds() {
        assert!(Stratum::try_new(0).is_err());
        assert!(Stratum::try_new(7).is_err());
        assert_eq!(Stratum::try_new(5).unwrap().get(), 5);
    }

    #[test]
    fn labels_serialize_as_source_strings() {
        let json = serde_json::to_string(&PropertyKind::LocalComercial).unwrap();
        assert_eq!(json, "\"Local Comercial\"");

        let json = serde_json::to_string(&ListingStatus::Rent).unwrap();
        assert_eq!(json, "\"Arriendo\"");
    }

    #[test]
    fn field_projection_uses_labels() {
        let property = valid_draft().into_property(RecordId::from_parts(1, 1));

        assert_eq!(
            property.field_value("status"),
            Some(Value::Text("Venta".into()))
        );
        assert_eq!(property.field_value("kind"), Some(Value::Text("Casa".into())));
        assert_eq!(property.field_value("listed"), None);
    }
}
