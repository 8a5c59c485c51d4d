//! Aggregation of per-station readings into city-level summaries.

use crate::aqi::AqiCategory;
use crate::models::{CityReading, Pollutants, StationReading};
use chrono::{DateTime, Utc};
use std::collections::HashMap;

/// Running mean over strictly positive readings.
#[derive(Debug, Default, Clone, Copy)]
struct PositiveMean {
    sum: f64,
    count: u32,
}

impl PositiveMean {
    fn push(&mut self, value: f64) {
        if value > 0.0 {
            self.sum += value;
            self.count += 1;
        }
    }

    fn value(&self) -> f64 {
        if self.count == 0 {
            0.0
        } else {
            self.sum / f64::from(self.count)
        }
    }
}

#[derive(Debug, Default)]
struct CityAccumulator {
    lat: f64,
    lon: f64,
    pm25: PositiveMean,
    pm10: PositiveMean,
    no2: PositiveMean,
    o3: PositiveMean,
    co: PositiveMean,
    so2: PositiveMean,
}

impl CityAccumulator {
    fn new(first: &StationReading) -> Self {
        Self {
            lat: first.lat,
            lon: first.lon,
            ..Self::default()
        }
    }

    fn push(&mut self, readings: &Pollutants) {
        self.pm25.push(readings.pm25);
        self.pm10.push(readings.pm10);
        self.no2.push(readings.no2);
        self.o3.push(readings.o3);
        self.co.push(readings.co);
        self.so2.push(readings.so2);
    }

    fn finish(&self, city: String, now: DateTime<Utc>) -> CityReading {
        let pollutants = Pollutants {
            pm25: self.pm25.value(),
            pm10: self.pm10.value(),
            no2: self.no2.value(),
            o3: self.o3.value(),
            co: self.co.value(),
            so2: self.so2.value(),
        };
        let aqi_index = pollutants.aqi();

        CityReading {
            city,
            aqi_index,
            aqi_category: AqiCategory::from_aqi(aqi_index),
            pollutants: pollutants.rounded(),
            population: None,
            lat: self.lat,
            lon: self.lon,
            last_updated: now,
        }
    }
}

/// City summaries in the order their first station was seen.
#[derive(Debug, Clone, Default)]
pub struct CityAggregates {
    cities: Vec<CityReading>,
    index: HashMap<String, usize>,
}

impl CityAggregates {
    pub fn len(&self) -> usize {
        self.cities.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cities.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &CityReading> {
        self.cities.iter()
    }

    /// Exact city-name lookup.
    pub fn get(&self, city: &str) -> Option<&CityReading> {
        self.index.get(city).map(|&i| &self.cities[i])
    }

    /// Exact match first, then the first case-insensitive match.
    pub fn find(&self, city: &str) -> Option<&CityReading> {
        self.get(city).or_else(|| {
            let wanted = city.to_lowercase();
            self.cities.iter().find(|c| c.city.to_lowercase() == wanted)
        })
    }

    pub fn into_vec(self) -> Vec<CityReading> {
        self.cities
    }
}

/// Groups station readings by exact city name and averages each pollutant.
///
/// A pollutant's city value is the mean of the stations reporting a strictly
/// positive reading for it; stations reporting `0` are left out of that mean
/// rather than counted as zero. Coordinates come from the city's first station.
pub fn aggregate_by_city(stations: &[StationReading]) -> CityAggregates {
    let mut order: Vec<String> = Vec::new();
    let mut accumulators: HashMap<&str, CityAccumulator> = HashMap::new();

    for station in stations {
        let acc = accumulators.entry(station.city.as_str()).or_insert_with(|| {
            order.push(station.city.clone());
            CityAccumulator::new(station)
        });
        acc.push(&station.pollutants);
    }

    let now = Utc::now();
    let mut aggregates = CityAggregates::default();
    for city in order {
        let reading = accumulators[city.as_str()].finish(city.clone(), now);
        aggregates.index.insert(city, aggregates.cities.len());
        aggregates.cities.push(reading);
    }
    aggregates
}

#[cfg(test)]
mod tests {
    use super::*;

    fn station(city: &str, lat: f64, pm25: f64, no2: f64) -> StationReading {
        StationReading {
            id: format!("{}-{}", city, lat),
            city: city.to_string(),
            name: format!("{} station", city),
            lat,
            lon: lat + 1.0,
            pollutants: Pollutants {
                pm25,
                no2,
                ..Pollutants::default()
            },
            last_updated: Utc::now(),
        }
    }

    #[test]
    fn averages_only_positive_readings() {
        let stations = vec![
            station("Lyon", 45.0, 40.0, 0.0),
            station("Lyon", 45.1, 0.0, 10.0),
            station("Lyon", 45.2, 60.0, 20.0),
        ];

        let aggregates = aggregate_by_city(&stations);
        let lyon = aggregates.get("Lyon").unwrap();

        assert_eq!(lyon.pollutants.pm25, 50.0);
        assert_eq!(lyon.pollutants.no2, 15.0);
        assert_eq!(lyon.pollutants.so2, 0.0);
        assert_eq!(lyon.aqi_index, 136);
        assert_eq!(lyon.aqi_category, AqiCategory::UnhealthyForSensitiveGroups);
    }

    #[test]
    fn keeps_first_station_coordinates_and_order() {
        let stations = vec![
            station("Paris", 48.8, 10.0, 0.0),
            station("Lyon", 45.7, 20.0, 0.0),
            station("Paris", 49.9, 30.0, 0.0),
        ];

        let aggregates = aggregate_by_city(&stations);
        let cities: Vec<_> = aggregates.iter().map(|c| c.city.as_str()).collect();
        assert_eq!(cities, ["Paris", "Lyon"]);

        let paris = aggregates.get("Paris").unwrap();
        assert_eq!(paris.lat, 48.8);
        assert!((paris.lon - 49.8).abs() < 1e-9);
        assert_eq!(paris.pollutants.pm25, 20.0);
        assert_eq!(paris.population, None);
    }

    #[test]
    fn city_without_readings_has_zero_aqi() {
        let aggregates = aggregate_by_city(&[station("Quiet", 1.0, 0.0, 0.0)]);
        let quiet = aggregates.get("Quiet").unwrap();
        assert_eq!(quiet.pollutants, Pollutants::default());
        assert_eq!(quiet.aqi_index, 0);
        assert_eq!(quiet.aqi_category, AqiCategory::Good);
    }

    #[test]
    fn find_falls_back_to_case_insensitive_match() {
        let aggregates = aggregate_by_city(&[station("São Paulo", -23.5, 42.0, 0.0)]);
        assert!(aggregates.get("são paulo").is_none());
        assert_eq!(aggregates.find("são paulo").unwrap().city, "São Paulo");
        assert!(aggregates.find("Rio").is_none());
        assert_eq!(aggregates.len(), 1);
    }

    #[test]
    fn empty_input_gives_empty_aggregates() {
        assert!(aggregate_by_city(&[]).is_empty());
    }
}
