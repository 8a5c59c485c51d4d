//! Defines the OpenAQ v3 wire structures and their normalization into the internal schema.
//!
//! The API has shifted shape across versions and providers: coordinates show up
//! nested or flat under several key names, timestamps come as plain strings or as
//! `{utc, local}` objects, and parameters are either a name or a nested object.
//! Everything here is lenient (`#[serde(default)]`) and the `normalize` helpers
//! collapse the variants into one representation.

use crate::models::{Pollutants, StationReading};
use chrono::{DateTime, FixedOffset, NaiveDate, NaiveDateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Generic metadata block of V3 responses.
#[derive(Debug, Deserialize, Serialize, Clone, Default)]
pub struct MetaV3 {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub page: u32,
    #[serde(default)]
    pub limit: u32,
}

/// Envelope shared by every V3 list endpoint.
#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct ApiResponse<T> {
    #[serde(default)]
    pub meta: Option<MetaV3>,
    #[serde(default = "Vec::new")]
    pub results: Vec<T>,
}

/// A row of `/v3/countries`.
#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct CountryRecord {
    #[serde(default)]
    pub code: String,
    #[serde(default)]
    pub name: String,
}

/// Location identifiers are numeric in V3 but strings in some older payloads.
#[derive(Debug, Deserialize, Serialize, Clone, PartialEq)]
#[serde(untagged)]
pub enum LocationId {
    Number(i64),
    Text(String),
}

impl fmt::Display for LocationId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LocationId::Number(id) => write!(f, "{}", id),
            LocationId::Text(id) => f.write_str(id),
        }
    }
}

/// Coordinates, accepting both `latitude/longitude` and `lat/lon` keys.
#[derive(Debug, Deserialize, Serialize, Clone, Default)]
pub struct Coordinates {
    #[serde(default, alias = "lat")]
    pub latitude: Option<f64>,
    #[serde(default, alias = "lon", alias = "lng")]
    pub longitude: Option<f64>,
}

/// A timestamp either as a bare string or as the V3 `{utc, local}` object.
#[derive(Debug, Deserialize, Serialize, Clone)]
#[serde(untagged)]
pub enum Timestamp {
    Nested {
        utc: String,
        #[serde(default)]
        local: Option<String>,
    },
    Flat(String),
}

impl Timestamp {
    pub fn as_str(&self) -> &str {
        match self {
            Timestamp::Nested { utc, .. } => utc,
            Timestamp::Flat(value) => value,
        }
    }

    /// Parses RFC 3339 (`Z` or numeric offset) and falls back to naive timestamps read as UTC.
    pub fn parse(&self) -> Option<DateTime<FixedOffset>> {
        let raw = self.as_str().trim();
        if raw.is_empty() {
            return None;
        }
        DateTime::parse_from_rfc3339(raw).ok().or_else(|| {
            NaiveDateTime::parse_from_str(raw, "%Y-%m-%dT%H:%M:%S%.f")
                .ok()
                .map(|naive| naive.and_utc().fixed_offset())
        })
    }
}

/// A parameter given either by name or as a nested `{id, name, units}` object.
#[derive(Debug, Deserialize, Serialize, Clone)]
#[serde(untagged)]
pub enum ParameterRef {
    Nested { name: String },
    Flat(String),
}

impl ParameterRef {
    pub fn name(&self) -> String {
        match self {
            ParameterRef::Nested { name } | ParameterRef::Flat(name) => name.to_lowercase(),
        }
    }
}

/// Latest value of one parameter at a location.
#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct ParameterSnapshot {
    #[serde(default, alias = "parameter")]
    pub name: Option<ParameterRef>,
    #[serde(default, rename = "lastValue", alias = "last_value", alias = "value")]
    pub last_value: Option<f64>,
}

/// A row of `/v3/locations`.
#[derive(Debug, Deserialize, Serialize, Clone, Default)]
pub struct LocationRecord {
    #[serde(default)]
    pub id: Option<LocationId>,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub locality: Option<String>,
    #[serde(default)]
    pub coordinates: Option<Coordinates>,
    #[serde(default, alias = "latitude")]
    pub lat: Option<f64>,
    #[serde(default, alias = "longitude")]
    pub lon: Option<f64>,
    #[serde(default, rename = "lastUpdated", alias = "last_updated")]
    pub last_updated: Option<Timestamp>,
    #[serde(default, rename = "datetimeLast", alias = "datetime_last")]
    pub datetime_last: Option<Timestamp>,
    #[serde(default)]
    pub parameters: Vec<ParameterSnapshot>,
}

impl LocationRecord {
    /// City name: `locality` if set, else the part of `name` before the first comma.
    pub fn city_name(&self) -> String {
        if let Some(locality) = self.locality.as_deref().map(str::trim) {
            if !locality.is_empty() {
                return locality.to_string();
            }
        }
        let name = self.name.as_deref().unwrap_or_default();
        let head = name.split(',').next().unwrap_or_default().trim();
        if !head.is_empty() {
            head.to_string()
        } else if !name.is_empty() {
            name.to_string()
        } else {
            "Unknown".to_string()
        }
    }

    pub fn latitude(&self) -> f64 {
        self.coordinates
            .as_ref()
            .and_then(|c| c.latitude)
            .or(self.lat)
            .unwrap_or(0.0)
    }

    pub fn longitude(&self) -> f64 {
        self.coordinates
            .as_ref()
            .and_then(|c| c.longitude)
            .or(self.lon)
            .unwrap_or(0.0)
    }

    /// First parseable of `lastUpdated` and `datetimeLast`, else `now`.
    pub fn updated_at(&self, now: DateTime<Utc>) -> DateTime<Utc> {
        self.last_updated
            .as_ref()
            .and_then(Timestamp::parse)
            .or_else(|| self.datetime_last.as_ref().and_then(Timestamp::parse))
            .map(|ts| ts.with_timezone(&Utc))
            .unwrap_or(now)
    }

    /// Latest readings keyed by the six tracked parameters; anything else is ignored.
    pub fn pollutants(&self) -> Pollutants {
        let mut pollutants = Pollutants::default();
        for snapshot in &self.parameters {
            let Some(name) = snapshot.name.as_ref().map(ParameterRef::name) else {
                continue;
            };
            let value = snapshot.last_value.unwrap_or(0.0);
            match name.as_str() {
                "pm25" => pollutants.pm25 = value,
                "pm10" => pollutants.pm10 = value,
                "no2" => pollutants.no2 = value,
                "o3" => pollutants.o3 = value,
                "co" => pollutants.co = value,
                "so2" => pollutants.so2 = value,
                _ => {},
            }
        }
        pollutants
    }

    pub fn normalize(&self, now: DateTime<Utc>) -> StationReading {
        StationReading {
            id: self.id.as_ref().map(ToString::to_string).unwrap_or_default(),
            city: self.city_name(),
            name: self.name.clone().unwrap_or_default(),
            lat: self.latitude(),
            lon: self.longitude(),
            pollutants: self.pollutants(),
            last_updated: self.updated_at(now),
        }
    }
}

/// A row of `/v3/measurements`.
#[derive(Debug, Deserialize, Serialize, Clone, Default)]
pub struct MeasurementRecord {
    #[serde(default)]
    pub date: Option<Timestamp>,
    #[serde(default)]
    pub datetime: Option<Timestamp>,
    #[serde(default)]
    pub parameter: Option<ParameterRef>,
    #[serde(default)]
    pub value: Option<f64>,
}

impl MeasurementRecord {
    /// Calendar day of the reading in the offset it was reported with.
    pub fn day(&self) -> Option<NaiveDate> {
        self.date
            .as_ref()
            .or(self.datetime.as_ref())
            .and_then(Timestamp::parse)
            .map(|ts| ts.date_naive())
    }

    pub fn parameter_name(&self) -> String {
        self.parameter
            .as_ref()
            .map(ParameterRef::name)
            .unwrap_or_default()
    }
}
