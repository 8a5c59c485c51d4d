//! Provides the sample data provider used whenever OpenAQ cannot answer.
//!
//! Current readings come straight from the built-in table in `sample_data`.
//! Historical series and per-station readings are synthesized by randomly
//! perturbing a city's baseline, so repeated calls return plausible but
//! different values. Every randomized operation has a `_with_rng` variant that
//! takes the random source explicitly.

use crate::api::sample_data::{CityBaseline, SampleCountry, SAMPLE_COUNTRIES, UNKNOWN_CITY_BASELINE};
use crate::aqi::AqiCategory;
use crate::models::{
    round_to, CityReading, Country, HeatmapPoint, HistoricalRecord, Pollutants, Station,
};
use chrono::{Duration, NaiveDate, Utc};
use rand::distributions::{Distribution, Uniform};
use rand::{thread_rng, Rng};
use tracing::debug;

/// Station name suffixes; synthetic stations use the first three.
const STATION_SUFFIXES: [&str; 5] = ["Central", "North", "South", "East", "West"];
const STATIONS_PER_CITY: usize = 3;
/// Maximum coordinate jitter of a synthetic station, in degrees.
const STATION_JITTER_DEG: f64 = 0.05;

/// Serves air quality data from the static sample table.
pub struct SampleDataProvider {
    countries: &'static [SampleCountry],
}

impl Default for SampleDataProvider {
    fn default() -> Self {
        Self::new()
    }
}

impl SampleDataProvider {
    /// Creates a provider over the built-in table.
    pub fn new() -> Self {
        Self::with_table(SAMPLE_COUNTRIES)
    }

    /// Creates a provider over a custom table.
    pub fn with_table(countries: &'static [SampleCountry]) -> Self {
        Self { countries }
    }

    fn country(&self, code: &str) -> Option<&'static SampleCountry> {
        self.countries.iter().find(|c| c.code == code)
    }

    fn city(&self, city: &str, code: &str) -> Option<&'static CityBaseline> {
        self.country(code)?.cities.iter().find(|c| c.city == city)
    }

    /// Finds a city by exact name in any country.
    fn city_anywhere(&self, city: &str) -> Option<&'static CityBaseline> {
        self.countries
            .iter()
            .flat_map(|country| country.cities.iter())
            .find(|c| c.city == city)
    }

    /// Lists every sample country with its city statistics.
    ///
    /// `averageAqi` is the mean city AQI rounded half-to-even; the worst city is
    /// the first one reaching the maximum AQI.
    pub fn countries(&self) -> Vec<Country> {
        self.countries
            .iter()
            .filter_map(summarize_country)
            .collect()
    }

    /// Statistics of a single sample country, if it exists.
    pub fn country_summary(&self, code: &str) -> Option<Country> {
        self.country(code).and_then(summarize_country)
    }

    /// All sample cities of a country, stamped with the current time.
    pub fn cities(&self, code: &str) -> Vec<CityReading> {
        match self.country(code) {
            Some(country) => country.cities.iter().map(city_reading).collect(),
            None => {
                debug!("No sample cities for country: {}", code);
                Vec::new()
            },
        }
    }

    /// Current reading of one city, matched exactly by name within the country.
    pub fn city_summary(&self, city: &str, code: &str) -> Option<CityReading> {
        self.city(city, code).map(city_reading)
    }

    /// Synthetic daily history for the `days` days before today, oldest first.
    pub fn history(&self, city: &str, days: u32) -> Vec<HistoricalRecord> {
        self.history_with_rng(city, days, Utc::now().date_naive(), &mut thread_rng())
    }

    /// Generates `days` records ending the day before `today`.
    ///
    /// Each day scales the city's baseline by a random factor in `[0.7, 1.3]`;
    /// particulates are additionally scaled by a weekly seasonal factor
    /// `1 + 0.2 * ((i mod 7) - 3) / 7`, where `i` is the number of days before
    /// `today`. AQI is recomputed from the perturbed PM2.5. Unknown cities use
    /// a generic baseline.
    pub fn history_with_rng(
        &self,
        city: &str,
        days: u32,
        today: NaiveDate,
        rng: &mut impl Rng,
    ) -> Vec<HistoricalRecord> {
        let baseline = match self.city_anywhere(city) {
            Some(entry) => entry.pollutants,
            None => {
                debug!("City {} not in sample data, using generic baseline", city);
                UNKNOWN_CITY_BASELINE
            },
        };
        let variation_dist = Uniform::new_inclusive(0.7, 1.3);

        (1..=days)
            .rev()
            .map(|days_back| {
                let date = today - Duration::days(i64::from(days_back));
                let variation = variation_dist.sample(rng);
                let seasonal = 1.0 + 0.2 * (f64::from(days_back % 7) - 3.0) / 7.0;

                let pollutants = Pollutants {
                    pm25: baseline.pm25 * variation * seasonal,
                    pm10: baseline.pm10 * variation * seasonal,
                    no2: baseline.no2 * variation,
                    o3: baseline.o3 * variation,
                    co: baseline.co * variation,
                    so2: baseline.so2 * variation,
                }
                .rounded();
                HistoricalRecord::from_pollutants(date, pollutants)
            })
            .collect()
    }

    /// Three synthetic stations around a sample city; empty for unknown cities.
    pub fn stations(&self, city: &str, code: &str) -> Vec<Station> {
        self.stations_with_rng(city, code, &mut thread_rng())
    }

    /// Stations named `{city} Central/North/South`, each jittered by up to
    /// ±0.05° and scaled by a random factor in `[0.8, 1.2]`.
    pub fn stations_with_rng(&self, city: &str, code: &str, rng: &mut impl Rng) -> Vec<Station> {
        let Some(entry) = self.city(city, code) else {
            debug!("No sample stations for {} in {}", city, code);
            return Vec::new();
        };
        let now = Utc::now();

        STATION_SUFFIXES
            .iter()
            .take(STATIONS_PER_CITY)
            .map(|suffix| {
                let lat_offset = rng.gen_range(-STATION_JITTER_DEG..=STATION_JITTER_DEG);
                let lon_offset = rng.gen_range(-STATION_JITTER_DEG..=STATION_JITTER_DEG);
                let variation = rng.gen_range(0.8..=1.2);
                let pollutants = entry.pollutants.scaled(variation).rounded();

                Station {
                    station_name: format!("{} {}", entry.city, suffix),
                    latitude: round_to(entry.lat + lat_offset, 4),
                    longitude: round_to(entry.lon + lon_offset, 4),
                    aqi_index: pollutants.aqi(),
                    pollutants,
                    last_updated: now,
                }
            })
            .collect()
    }

    /// Map points for one country, or for every sample country when `code` is `None`.
    pub fn heatmap(&self, code: Option<&str>) -> Vec<HeatmapPoint> {
        self.countries
            .iter()
            .filter(|country| code.map_or(true, |code| country.code == code))
            .flat_map(|country| {
                country
                    .cities
                    .iter()
                    .map(move |entry| HeatmapPoint::from_city(country.code, &city_reading(entry)))
            })
            .collect()
    }
}

fn summarize_country(country: &SampleCountry) -> Option<Country> {
    let first = country.cities.first()?;
    let worst = country
        .cities
        .iter()
        .fold(first, |worst, c| if c.aqi_index > worst.aqi_index { c } else { worst });
    let total: u32 = country.cities.iter().map(|c| c.aqi_index).sum();
    let average = f64::from(total) / country.cities.len() as f64;

    Some(Country {
        code: country.code.to_string(),
        name: country.name.to_string(),
        city_count: country.cities.len(),
        average_aqi: average.round_ties_even() as u32,
        worst_city: worst.city.to_string(),
        worst_city_aqi: worst.aqi_index,
    })
}

fn city_reading(entry: &CityBaseline) -> CityReading {
    CityReading {
        city: entry.city.to_string(),
        aqi_index: entry.aqi_index,
        aqi_category: AqiCategory::from_aqi(entry.aqi_index),
        pollutants: entry.pollutants,
        population: Some(entry.population),
        lat: entry.lat,
        lon: entry.lon,
        last_updated: Utc::now(),
    }
}
