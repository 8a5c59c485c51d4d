//! Internal air quality schema served by the HTTP API.
//!
//! Every record here is built fresh per request, either from normalized OpenAQ
//! data or from the built-in sample dataset. Field names serialize in camelCase.

use crate::aqi::{aqi_from_pm25, AqiCategory};
use chrono::{DateTime, NaiveDate, Utc};
use serde::Serialize;

/// Rounds `value` to `places` decimal digits.
pub fn round_to(value: f64, places: i32) -> f64 {
    let factor = 10f64.powi(places);
    (value * factor).round() / factor
}

/// The six pollutant concentrations tracked per reading. `0` means "no reading".
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize)]
pub struct Pollutants {
    pub pm25: f64,
    pub pm10: f64,
    pub no2: f64,
    pub o3: f64,
    pub co: f64,
    pub so2: f64,
}

impl Pollutants {
    /// Applies the display precision used across the API: two decimals for CO, one for the rest.
    pub fn rounded(self) -> Self {
        Self {
            pm25: round_to(self.pm25, 1),
            pm10: round_to(self.pm10, 1),
            no2: round_to(self.no2, 1),
            o3: round_to(self.o3, 1),
            co: round_to(self.co, 2),
            so2: round_to(self.so2, 1),
        }
    }

    /// Multiplies every concentration by `factor`.
    pub fn scaled(self, factor: f64) -> Self {
        Self {
            pm25: self.pm25 * factor,
            pm10: self.pm10 * factor,
            no2: self.no2 * factor,
            o3: self.o3 * factor,
            co: self.co * factor,
            so2: self.so2 * factor,
        }
    }

    pub fn aqi(&self) -> u32 {
        aqi_from_pm25(self.pm25)
    }
}

/// Country-level overview row.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Country {
    pub code: String,
    pub name: String,
    pub city_count: usize,
    pub average_aqi: u32,
    pub worst_city: String,
    pub worst_city_aqi: u32,
}

impl Country {
    /// A country known only by code and name, without city statistics.
    pub fn bare(code: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            code: code.into(),
            name: name.into(),
            city_count: 0,
            average_aqi: 0,
            worst_city: String::new(),
            worst_city_aqi: 0,
        }
    }
}

/// Current air quality for one city.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CityReading {
    pub city: String,
    pub aqi_index: u32,
    pub aqi_category: AqiCategory,
    #[serde(flatten)]
    pub pollutants: Pollutants,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub population: Option<u64>,
    pub lat: f64,
    pub lon: f64,
    pub last_updated: DateTime<Utc>,
}

/// One monitoring station as returned by the stations endpoint.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Station {
    pub station_name: String,
    pub latitude: f64,
    pub longitude: f64,
    #[serde(flatten)]
    pub pollutants: Pollutants,
    pub aqi_index: u32,
    pub last_updated: DateTime<Utc>,
}

/// Daily pollutant record. Pollutants stay `None` until a reading for that day is seen.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct HistoricalRecord {
    pub date: NaiveDate,
    pub pm25: Option<f64>,
    pub pm10: Option<f64>,
    pub no2: Option<f64>,
    pub o3: Option<f64>,
    pub co: Option<f64>,
    pub so2: Option<f64>,
    pub aqi_index: u32,
}

impl HistoricalRecord {
    /// An empty record for `date` with AQI 0.
    pub fn empty(date: NaiveDate) -> Self {
        Self {
            date,
            pm25: None,
            pm10: None,
            no2: None,
            o3: None,
            co: None,
            so2: None,
            aqi_index: 0,
        }
    }

    /// A fully populated record; AQI is derived from `pollutants.pm25`.
    pub fn from_pollutants(date: NaiveDate, pollutants: Pollutants) -> Self {
        Self {
            date,
            pm25: Some(pollutants.pm25),
            pm10: Some(pollutants.pm10),
            no2: Some(pollutants.no2),
            o3: Some(pollutants.o3),
            co: Some(pollutants.co),
            so2: Some(pollutants.so2),
            aqi_index: pollutants.aqi(),
        }
    }

    /// Mutable slot for a lower-cased OpenAQ parameter name, if it is one we track.
    pub fn slot_mut(&mut self, parameter: &str) -> Option<&mut Option<f64>> {
        match parameter {
            "pm25" => Some(&mut self.pm25),
            "pm10" => Some(&mut self.pm10),
            "no2" => Some(&mut self.no2),
            "o3" => Some(&mut self.o3),
            "co" => Some(&mut self.co),
            "so2" => Some(&mut self.so2),
            _ => None,
        }
    }
}

/// A single point on the map view.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct HeatmapPoint {
    pub city: String,
    pub country: String,
    pub latitude: f64,
    pub longitude: f64,
    pub pm25: f64,
    pub aqi_index: u32,
    pub aqi_category: AqiCategory,
}

impl HeatmapPoint {
    pub fn from_city(country: &str, reading: &CityReading) -> Self {
        Self {
            city: reading.city.clone(),
            country: country.to_string(),
            latitude: reading.lat,
            longitude: reading.lon,
            pm25: reading.pollutants.pm25,
            aqi_index: reading.aqi_index,
            aqi_category: reading.aqi_category,
        }
    }
}

/// A monitoring location normalized from the OpenAQ `/locations` payload.
#[derive(Debug, Clone, PartialEq)]
pub struct StationReading {
    pub id: String,
    pub city: String,
    pub name: String,
    pub lat: f64,
    pub lon: f64,
    pub pollutants: Pollutants,
    pub last_updated: DateTime<Utc>,
}

impl StationReading {
    pub fn to_station(&self) -> Station {
        let pollutants = self.pollutants.rounded();
        Station {
            station_name: self.name.clone(),
            latitude: self.lat,
            longitude: self.lon,
            aqi_index: aqi_from_pm25(self.pollutants.pm25),
            pollutants,
            last_updated: self.last_updated,
        }
    }
}
