//! Provides a client for interacting with the OpenAQ v3 API.
//!
//! This module defines the `OpenAQClient` struct and its read-only queries:
//! countries, locations of a country (with their latest readings) and daily
//! historical measurements. Every query returns a [`Fetch`] instead of an error;
//! failures are logged here and handed to the caller as `Fetch::Failed`.

use crate::api::Fetch;
use crate::aqi::aqi_from_pm25;
use crate::config::UpstreamConfig;
use crate::error::{AppError, Result};
use crate::models::{
    ApiResponse, Country, CountryRecord, HistoricalRecord, LocationRecord, MeasurementRecord,
    StationReading,
};
use chrono::{Duration as ChronoDuration, NaiveDate, SecondsFormat, Utc};
use reqwest::header::ACCEPT;
use reqwest::Client;
use serde::de::DeserializeOwned;
use std::collections::BTreeMap;
use std::time::Duration;
use tracing::{debug, error, info};

const COUNTRIES_LIMIT: u32 = 200;
const MEASUREMENTS_LIMIT: u32 = 1000;

/// An asynchronous client for fetching data from the OpenAQ API v3.
pub struct OpenAQClient {
    client: Client,
    config: UpstreamConfig,
}

impl OpenAQClient {
    /// Creates a new `OpenAQClient`. A disabled configuration yields a client that
    /// answers every query with `Fetch::Empty` without touching the network.
    pub fn new(config: UpstreamConfig) -> Self {
        Self {
            client: Client::new(),
            config,
        }
    }

    pub fn is_enabled(&self) -> bool {
        self.config.is_enabled()
    }

    /// Lists the countries known to OpenAQ, without city statistics.
    ///
    /// Corresponds to the `/v3/countries` endpoint.
    pub async fn fetch_countries(&self) -> Fetch<Country> {
        if !self.is_enabled() {
            return Fetch::Empty;
        }
        info!("Fetching countries from OpenAQ");

        let result = self
            .get_results::<CountryRecord>(
                "countries",
                &[("limit", COUNTRIES_LIMIT.to_string())],
                self.config.lookup_timeout,
            )
            .await
            .map(|records| {
                records
                    .into_iter()
                    .map(|record| Country::bare(record.code, record.name))
                    .collect()
            });
        Fetch::from_result(result)
    }

    /// Lists the monitoring locations of a country with their latest readings,
    /// most recently updated first.
    ///
    /// Corresponds to the `/v3/locations` endpoint.
    pub async fn fetch_locations(&self, country_code: &str) -> Fetch<StationReading> {
        if !self.is_enabled() {
            return Fetch::Empty;
        }
        Fetch::from_result(self.locations(country_code).await)
    }

    /// Fetches up to `days` days of measurements and folds them into one record per day.
    ///
    /// Corresponds to the `/v3/measurements` endpoint. The city is first resolved
    /// to the first location of `country` whose city name contains it, ignoring
    /// case; when no location matches, the result is empty.
    pub async fn fetch_history(
        &self,
        city: &str,
        country: &str,
        days: u32,
    ) -> Fetch<HistoricalRecord> {
        if !self.is_enabled() {
            return Fetch::Empty;
        }
        Fetch::from_result(self.history(city, country, days).await)
    }

    async fn locations(&self, country_code: &str) -> Result<Vec<StationReading>> {
        info!("Fetching locations for country: {}", country_code);

        let records = self
            .get_results::<LocationRecord>(
                "locations",
                &[
                    ("countriesId", country_code.to_string()),
                    ("limit", self.config.location_limit.to_string()),
                    ("order_by", "lastUpdated".to_string()),
                    ("sort", "desc".to_string()),
                ],
                self.config.lookup_timeout,
            )
            .await?;

        let now = Utc::now();
        Ok(records.iter().map(|record| record.normalize(now)).collect())
    }

    async fn history(&self, city: &str, country: &str, days: u32) -> Result<Vec<HistoricalRecord>> {
        let needle = city.to_lowercase();
        let locations = self.locations(country).await?;
        let Some(location) = locations
            .into_iter()
            .find(|loc| loc.city.to_lowercase().contains(&needle))
        else {
            debug!("No OpenAQ location matches city {} in {}", city, country);
            return Ok(Vec::new());
        };
        let location_id = location.id;

        let date_to = Utc::now();
        let date_from = date_to - ChronoDuration::days(i64::from(days));
        info!(
            "Fetching measurements for location {} from {} to {}",
            location_id, date_from, date_to
        );

        let measurements = self
            .get_results::<MeasurementRecord>(
                "measurements",
                &[
                    ("date_from", date_from.to_rfc3339_opts(SecondsFormat::Secs, true)),
                    ("date_to", date_to.to_rfc3339_opts(SecondsFormat::Secs, true)),
                    ("limit", MEASUREMENTS_LIMIT.to_string()),
                    ("order_by", "datetime".to_string()),
                    ("sort", "asc".to_string()),
                    ("locations_id", location_id),
                ],
                self.config.measurements_timeout,
            )
            .await?;

        Ok(group_by_day(&measurements))
    }

    /// Issues a GET against `path` and returns the `results` array of the response.
    async fn get_results<T: DeserializeOwned>(
        &self,
        path: &str,
        query: &[(&str, String)],
        timeout: Duration,
    ) -> Result<Vec<T>> {
        let url = format!("{}/{}", self.config.base_url, path);

        let mut request = self
            .client
            .get(&url)
            .header(ACCEPT, "application/json")
            .query(query)
            .timeout(timeout);
        if let Some(key) = &self.config.api_key {
            request = request.header("X-API-Key", key);
        }

        let response = request.send().await.map_err(|e| {
            if e.is_timeout() {
                error!("Request to {} timed out after {:?}", url, timeout);
            } else {
                error!("Error sending request to {}: {}", url, e);
            }
            AppError::from(e)
        })?;

        // Check HTTP status code and handle potential API errors
        let response = match response.error_for_status() {
            Ok(resp) => resp,
            Err(e) => {
                let status = e.status();
                error!(
                    "API request to {} failed with status {}: {}",
                    url,
                    status.unwrap_or_default(),
                    e
                );
                if status == Some(reqwest::StatusCode::UNAUTHORIZED)
                    || status == Some(reqwest::StatusCode::FORBIDDEN)
                {
                    error!("Received 401/403. Check OPENAQ_API_KEY validity and permissions.");
                }
                return Err(AppError::Upstream(format!(
                    "{} answered {}",
                    path,
                    status.unwrap_or_default()
                )));
            },
        };

        let body = response.text().await.map_err(|e| {
            error!("Error reading response body from {}: {}", url, e);
            AppError::from(e)
        })?;
        let payload: ApiResponse<T> = serde_json::from_str(&body).map_err(|e| {
            error!("Error parsing API response JSON from {}: {}", url, e);
            AppError::from(e)
        })?;

        debug!(
            "Received {} results from {} (meta: {:?})",
            payload.results.len(),
            url,
            payload.meta
        );
        Ok(payload.results)
    }
}

/// Folds raw measurements into one record per calendar day, ascending by date.
///
/// The first reading of a parameter on a day is stored as-is; each later one is
/// averaged pairwise with the stored value, `(current + value) / 2`, in arrival
/// order. For three or more readings this weights later readings more heavily
/// than a true mean would. Readings without a parseable timestamp are skipped.
pub(crate) fn group_by_day(measurements: &[MeasurementRecord]) -> Vec<HistoricalRecord> {
    let mut days: BTreeMap<NaiveDate, HistoricalRecord> = BTreeMap::new();

    for measurement in measurements {
        let Some(day) = measurement.day() else {
            continue;
        };
        let record = days
            .entry(day)
            .or_insert_with(|| HistoricalRecord::empty(day));

        let value = measurement.value.unwrap_or(0.0);
        if let Some(slot) = record.slot_mut(&measurement.parameter_name()) {
            *slot = Some(match *slot {
                None => value,
                Some(current) => (current + value) / 2.0,
            });
        }
    }

    days.into_values()
        .map(|mut record| {
            record.aqi_index = aqi_from_pm25(record.pm25.unwrap_or(0.0));
            record
        })
        .collect()
}
