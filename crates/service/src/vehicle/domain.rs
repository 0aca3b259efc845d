use chrono::{DateTime, NaiveDate, NaiveDateTime, Utc};
use models::vehicle;
use sea_orm::prelude::DateTimeWithTimeZone;
use serde::{Deserialize, Deserializer};
use uuid::Uuid;

use super::errors::VehicleError;

/// `yearOfMake` as sent by clients: forms post strings, scripts post numbers.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(untagged)]
pub enum YearOfMake {
    Integer(i64),
    Decimal(f64),
    Text(String),
}

impl YearOfMake {
    /// Coerce to an integer year. Fractional or non-numeric input is rejected.
    pub fn coerce(&self) -> Result<i32, VehicleError> {
        let invalid = || VehicleError::bad_request("yearOfMake must be a whole number");
        match self {
            YearOfMake::Integer(n) => i32::try_from(*n).map_err(|_| invalid()),
            YearOfMake::Decimal(f) => whole(*f).ok_or_else(invalid),
            YearOfMake::Text(s) => {
                let t = s.trim();
                if let Ok(n) = t.parse::<i32>() {
                    return Ok(n);
                }
                t.parse::<f64>().ok().and_then(whole).ok_or_else(invalid)
            }
        }
    }

    fn is_blank(&self) -> bool {
        matches!(self, YearOfMake::Text(s) if s.trim().is_empty())
    }
}

impl From<i32> for YearOfMake {
    fn from(n: i32) -> Self {
        YearOfMake::Integer(n.into())
    }
}

impl From<&str> for YearOfMake {
    fn from(s: &str) -> Self {
        YearOfMake::Text(s.to_string())
    }
}

fn whole(f: f64) -> Option<i32> {
    if f.is_finite() && f.fract() == 0.0 && f >= f64::from(i32::MIN) && f <= f64::from(i32::MAX) {
        Some(f as i32)
    } else {
        None
    }
}

/// Parse a client-supplied date. Blank means "no date".
///
/// Accepts RFC 3339, `YYYY-MM-DDTHH:MM[:SS]` (read as UTC, the shape of an
/// HTML `datetime-local` input) and a bare `YYYY-MM-DD` (midnight UTC).
pub fn parse_date(field: &str, raw: &str) -> Result<Option<DateTimeWithTimeZone>, VehicleError> {
    let t = raw.trim();
    if t.is_empty() {
        return Ok(None);
    }
    if let Ok(dt) = DateTime::parse_from_rfc3339(t) {
        return Ok(Some(dt));
    }
    for fmt in ["%Y-%m-%dT%H:%M:%S%.f", "%Y-%m-%dT%H:%M", "%Y-%m-%d %H:%M:%S"] {
        if let Ok(naive) = NaiveDateTime::parse_from_str(t, fmt) {
            return Ok(Some(naive.and_utc().into()));
        }
    }
    if let Some(naive) = NaiveDate::parse_from_str(t, "%Y-%m-%d").ok().and_then(|d| d.and_hms_opt(0, 0, 0)) {
        return Ok(Some(naive.and_utc().into()));
    }
    Err(VehicleError::bad_request(format!("{field} is not a valid date")))
}

fn non_blank(value: Option<String>) -> Option<String> {
    value.filter(|s| !s.trim().is_empty())
}

/// Body of a create request. Everything is optional at the wire level so that
/// missing fields surface as one `BadRequest` naming them all.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateVehicleInput {
    pub registration_no: Option<String>,
    pub vehicle_type: Option<String>,
    pub model: Option<String>,
    pub manufacturer: Option<String>,
    pub year_of_make: Option<YearOfMake>,
    pub current_location: Option<String>,
    pub start_location: Option<String>,
    pub end_location: Option<String>,
    pub start_date: Option<String>,
    pub end_date: Option<String>,
    pub status: Option<String>,
}

/// Create input after validation and coercion.
#[derive(Debug, Clone, PartialEq)]
pub struct NewVehicle {
    pub registration_no: String,
    pub vehicle_type: String,
    pub model: String,
    pub manufacturer: String,
    pub year_of_make: i32,
    pub current_location: Option<String>,
    pub start_location: Option<String>,
    pub end_location: Option<String>,
    pub start_date: Option<DateTimeWithTimeZone>,
    pub end_date: Option<DateTimeWithTimeZone>,
    pub status: String,
}

impl CreateVehicleInput {
    pub fn validate(self) -> Result<NewVehicle, VehicleError> {
        let registration_no = non_blank(self.registration_no);
        let vehicle_type = non_blank(self.vehicle_type);
        let model = non_blank(self.model);
        let manufacturer = non_blank(self.manufacturer);
        let year = self.year_of_make.filter(|y| !y.is_blank());

        let mut missing = Vec::new();
        if registration_no.is_none() { missing.push("registrationNo"); }
        if vehicle_type.is_none() { missing.push("vehicleType"); }
        if model.is_none() { missing.push("model"); }
        if manufacturer.is_none() { missing.push("manufacturer"); }
        if year.is_none() { missing.push("yearOfMake"); }

        let (Some(registration_no), Some(vehicle_type), Some(model), Some(manufacturer), Some(year)) =
            (registration_no, vehicle_type, model, manufacturer, year)
        else {
            return Err(VehicleError::bad_request(format!("Missing required fields: {}", missing.join(", "))));
        };

        let start_date = match self.start_date.as_deref() {
            Some(raw) => parse_date("startDate", raw)?,
            None => None,
        };
        let end_date = match self.end_date.as_deref() {
            Some(raw) => parse_date("endDate", raw)?,
            None => None,
        };

        Ok(NewVehicle {
            registration_no,
            vehicle_type,
            model,
            manufacturer,
            year_of_make: year.coerce()?,
            current_location: self.current_location,
            start_location: self.start_location,
            end_location: self.end_location,
            start_date,
            end_date,
            status: non_blank(self.status).unwrap_or_else(|| vehicle::DEFAULT_STATUS.to_string()),
        })
    }
}

impl NewVehicle {
    /// Materialize the record; owner and timestamps come from the caller, never the client.
    pub fn into_record(self, id: Uuid, owner: &str, now: DateTimeWithTimeZone) -> vehicle::Model {
        vehicle::Model {
            id,
            user_id: owner.to_string(),
            registration_no: self.registration_no,
            vehicle_type: self.vehicle_type,
            model_name: self.model,
            manufacturer: self.manufacturer,
            year_of_make: self.year_of_make,
            current_location: self.current_location,
            start_location: self.start_location,
            end_location: self.end_location,
            start_date: self.start_date,
            end_date: self.end_date,
            status: self.status,
            created_at: now,
            updated_at: now,
        }
    }
}

/// Distinguish "key absent" (`None`) from "key present" (`Some(..)`, possibly `Some(None)` for null).
fn present<'de, D, T>(d: D) -> Result<Option<Option<T>>, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de>,
{
    Option::<T>::deserialize(d).map(Some)
}

/// Body of a partial update. Only these keys are honoured; anything else the
/// client sends (`id`, `userId`, timestamps) is dropped during deserialization.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateVehicleInput {
    #[serde(default, deserialize_with = "present")]
    pub registration_no: Option<Option<String>>,
    #[serde(default, deserialize_with = "present")]
    pub vehicle_type: Option<Option<String>>,
    #[serde(default, deserialize_with = "present")]
    pub model: Option<Option<String>>,
    #[serde(default, deserialize_with = "present")]
    pub manufacturer: Option<Option<String>>,
    #[serde(default, deserialize_with = "present")]
    pub year_of_make: Option<Option<YearOfMake>>,
    #[serde(default, deserialize_with = "present")]
    pub current_location: Option<Option<String>>,
    #[serde(default, deserialize_with = "present")]
    pub start_location: Option<Option<String>>,
    #[serde(default, deserialize_with = "present")]
    pub end_location: Option<Option<String>>,
    #[serde(default, deserialize_with = "present")]
    pub start_date: Option<Option<String>>,
    #[serde(default, deserialize_with = "present")]
    pub end_date: Option<Option<String>>,
    #[serde(default, deserialize_with = "present")]
    pub status: Option<Option<String>>,
}

/// Validated field-set of an update. `None` leaves a column untouched;
/// `Some(None)` on a nullable column clears it.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct VehicleChanges {
    pub registration_no: Option<String>,
    pub vehicle_type: Option<String>,
    pub model_name: Option<String>,
    pub manufacturer: Option<String>,
    pub year_of_make: Option<i32>,
    pub current_location: Option<Option<String>>,
    pub start_location: Option<Option<String>>,
    pub end_location: Option<Option<String>>,
    pub start_date: Option<Option<DateTimeWithTimeZone>>,
    pub end_date: Option<Option<DateTimeWithTimeZone>>,
    pub status: Option<String>,
}

fn required(field: &str, value: Option<Option<String>>) -> Result<Option<String>, VehicleError> {
    match value {
        None => Ok(None),
        Some(None) => Err(VehicleError::bad_request(format!("{field} cannot be null"))),
        Some(Some(s)) if s.trim().is_empty() => Err(VehicleError::bad_request(format!("{field} cannot be empty"))),
        Some(Some(s)) => Ok(Some(s)),
    }
}

fn date_change(field: &str, value: Option<Option<String>>) -> Result<Option<Option<DateTimeWithTimeZone>>, VehicleError> {
    match value {
        None => Ok(None),
        Some(None) => Ok(Some(None)),
        Some(Some(raw)) => parse_date(field, &raw).map(Some),
    }
}

impl UpdateVehicleInput {
    /// Decode a request body; shape errors become `BadRequest`.
    pub fn from_json(body: serde_json::Value) -> Result<Self, VehicleError> {
        serde_json::from_value(body).map_err(|e| VehicleError::bad_request(format!("invalid update body: {e}")))
    }

    pub fn into_changes(self) -> Result<VehicleChanges, VehicleError> {
        let year_of_make = match self.year_of_make {
            None => None,
            Some(None) => return Err(VehicleError::bad_request("yearOfMake cannot be null")),
            Some(Some(y)) => Some(y.coerce()?),
        };
        Ok(VehicleChanges {
            registration_no: required("registrationNo", self.registration_no)?,
            vehicle_type: required("vehicleType", self.vehicle_type)?,
            model_name: required("model", self.model)?,
            manufacturer: required("manufacturer", self.manufacturer)?,
            year_of_make,
            current_location: self.current_location,
            start_location: self.start_location,
            end_location: self.end_location,
            start_date: date_change("startDate", self.start_date)?,
            end_date: date_change("endDate", self.end_date)?,
            status: required("status", self.status)?,
        })
    }
}

impl VehicleChanges {
    pub fn is_empty(&self) -> bool {
        *self == Self::default()
    }

    /// Apply onto an in-memory record and bump `updated_at`.
    pub fn apply(&self, v: &mut vehicle::Model, updated_at: DateTimeWithTimeZone) {
        if let Some(x) = &self.registration_no { v.registration_no = x.clone(); }
        if let Some(x) = &self.vehicle_type { v.vehicle_type = x.clone(); }
        if let Some(x) = &self.model_name { v.model_name = x.clone(); }
        if let Some(x) = &self.manufacturer { v.manufacturer = x.clone(); }
        if let Some(x) = self.year_of_make { v.year_of_make = x; }
        if let Some(x) = &self.current_location { v.current_location = x.clone(); }
        if let Some(x) = &self.start_location { v.start_location = x.clone(); }
        if let Some(x) = &self.end_location { v.end_location = x.clone(); }
        if let Some(x) = self.start_date { v.start_date = x; }
        if let Some(x) = self.end_date { v.end_date = x; }
        if let Some(x) = &self.status { v.status = x.clone(); }
        v.updated_at = updated_at;
    }
}

pub fn now() -> DateTimeWithTimeZone {
    Utc::now().into()
}
