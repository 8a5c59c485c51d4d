//! Answers every query from OpenAQ when possible and from sample data otherwise.

use crate::api::{Fetch, OpenAQClient, SampleDataProvider};
use crate::config::{Config, UpstreamConfig};
use crate::models::{CityReading, Country, HeatmapPoint, HistoricalRecord, Station, StationReading};
use crate::service::aggregate::aggregate_by_city;
use crate::service::insights::Insights;
use tracing::{debug, info, warn};

/// Most stations returned for a city from upstream data.
const MAX_CITY_STATIONS: usize = 5;

/// Country always offered in the listing, taken from sample data when upstream lacks it.
const ALWAYS_LISTED_COUNTRY: &str = "US";

pub struct Resolver {
    upstream: OpenAQClient,
    sample: SampleDataProvider,
}

impl Resolver {
    pub fn new(config: &Config) -> Self {
        Self::from_upstream(config.upstream.clone())
    }

    pub fn from_upstream(upstream: UpstreamConfig) -> Self {
        Self {
            upstream: OpenAQClient::new(upstream),
            sample: SampleDataProvider::new(),
        }
    }

    pub fn upstream_enabled(&self) -> bool {
        self.upstream.is_enabled()
    }

    /// All countries. Upstream entries carry zeroed statistics.
    pub async fn countries(&self) -> Vec<Country> {
        match settle(self.upstream.fetch_countries().await, "countries") {
            Some(mut countries) => {
                if !countries.iter().any(|c| c.code == ALWAYS_LISTED_COUNTRY) {
                    if let Some(us) = self.sample.country_summary(ALWAYS_LISTED_COUNTRY) {
                        debug!("Adding sample entry for {}", ALWAYS_LISTED_COUNTRY);
                        countries.push(us);
                    }
                }
                countries
            },
            None => self.sample.countries(),
        }
    }

    pub async fn cities(&self, country: &str) -> Vec<CityReading> {
        if let Some(stations) = self.locations(country).await {
            let aggregates = aggregate_by_city(&stations);
            if !aggregates.is_empty() {
                info!(
                    "Aggregated {} stations into {} cities for {}",
                    stations.len(),
                    aggregates.len(),
                    country
                );
                return aggregates.into_vec();
            }
        }
        self.sample.cities(country)
    }

    pub async fn city_summary(&self, city: &str, country: &str) -> Option<CityReading> {
        if let Some(stations) = self.locations(country).await {
            if let Some(reading) = aggregate_by_city(&stations).find(city) {
                return Some(reading.clone());
            }
            debug!("City {} not among upstream cities of {}", city, country);
        }
        self.sample.city_summary(city, country)
    }

    pub async fn city_history(&self, city: &str, country: &str, days: u32) -> Vec<HistoricalRecord> {
        let history = self.upstream.fetch_history(city, country, days).await;
        match settle(history, "history") {
            Some(history) => history,
            None => self.sample.history(city, days),
        }
    }

    /// Up to five upstream stations whose city contains `city`, ignoring case.
    pub async fn city_stations(&self, city: &str, country: &str) -> Vec<Station> {
        if let Some(stations) = self.locations(country).await {
            let needle = city.to_lowercase();
            let matching: Vec<Station> = stations
                .iter()
                .filter(|s| s.city.to_lowercase().contains(&needle))
                .take(MAX_CITY_STATIONS)
                .map(StationReading::to_station)
                .collect();
            if !matching.is_empty() {
                return matching;
            }
            debug!("No upstream stations match {} in {}", city, country);
        }
        self.sample.stations(city, country)
    }

    /// Map points. Without a country only sample cities are returned.
    pub async fn heatmap(&self, country: Option<&str>) -> Vec<HeatmapPoint> {
        if let Some(code) = country {
            if let Some(stations) = self.locations(code).await {
                let points: Vec<HeatmapPoint> = aggregate_by_city(&stations)
                    .iter()
                    .map(|reading| HeatmapPoint::from_city(code, reading))
                    .collect();
                if !points.is_empty() {
                    return points;
                }
            }
        }
        self.sample.heatmap(country)
    }

    pub async fn insights(&self, city: &str, country: &str) -> Option<Insights> {
        let summary = self.city_summary(city, country).await?;
        Some(Insights::new(city, country, summary.aqi_index))
    }

    async fn locations(&self, country: &str) -> Option<Vec<StationReading>> {
        let what = format!("locations of {}", country);
        settle(self.upstream.fetch_locations(country).await, &what)
    }
}

/// Turns an upstream outcome into records, logging why sample data will be used instead.
fn settle<T>(fetch: Fetch<T>, what: &str) -> Option<Vec<T>> {
    match &fetch {
        Fetch::Data(_) => {},
        Fetch::Empty => debug!("No upstream {}, using sample data", what),
        Fetch::Failed(e) => warn!("OpenAQ error fetching {}, using sample data: {}", what, e),
    }
    fetch.into_data()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::aqi::AqiCategory;
    use mockito::{Matcher, Server, ServerGuard};
    use serde_json::{json, Value};
    use std::io::Write;
    use std::time::Duration;

    fn sample_only() -> Resolver {
        Resolver::from_upstream(UpstreamConfig::sample_only())
    }

    fn upstream(server: &ServerGuard) -> Resolver {
        Resolver::from_upstream(UpstreamConfig::with_key("test_key", server.url()))
    }

    fn envelope(results: Value) -> String {
        json!({ "meta": { "found": 1 }, "results": results }).to_string()
    }

    async fn mock_locations(server: &mut ServerGuard, country: &str, results: Value) -> mockito::Mock {
        server
            .mock("GET", "/locations")
            .match_query(Matcher::UrlEncoded("countriesId".into(), country.into()))
            .with_status(200)
            .with_header("content-type", "application/json")
            .with_body(envelope(results))
            .create_async()
            .await
    }

    fn french_locations() -> Value {
        json!([
            {
                "id": 1, "name": "Paris, Louvre",
                "coordinates": { "latitude": 48.86, "longitude": 2.34 },
                "parameters": [{ "name": "pm25", "lastValue": 10.0 }, { "name": "no2", "lastValue": 30.0 }]
            },
            {
                "id": 2, "name": "Lyon, Centre",
                "coordinates": { "latitude": 45.76, "longitude": 4.83 },
                "parameters": [{ "name": "pm25", "lastValue": 40.0 }]
            },
            {
                "id": 3, "name": "Paris, Bercy",
                "coordinates": { "latitude": 48.83, "longitude": 2.38 },
                "parameters": [{ "name": "pm25", "lastValue": 30.0 }]
            }
        ])
    }

    #[tokio::test]
    async fn disabled_upstream_serves_sample_data() {
        let resolver = sample_only();
        assert!(!resolver.upstream_enabled());

        let countries = resolver.countries().await;
        assert_eq!(countries.len(), 8);
        assert_eq!(resolver.cities("IN").await.len(), 5);
        assert!(resolver.cities("ZZ").await.is_empty());
        assert_eq!(resolver.city_history("Tokyo", "JP", 30).await.len(), 30);
        assert_eq!(resolver.city_stations("Tokyo", "JP").await.len(), 3);
        assert_eq!(resolver.heatmap(None).await.len(), 20);
    }

    #[tokio::test]
    async fn cities_are_aggregated_from_upstream_locations() {
        let mut server = Server::new_async().await;
        let mock = mock_locations(&mut server, "FR", french_locations()).await;

        let cities = upstream(&server).cities("FR").await;

        mock.assert_async().await;
        let names: Vec<_> = cities.iter().map(|c| c.city.as_str()).collect();
        assert_eq!(names, ["Paris", "Lyon"]);
        assert_eq!(cities[0].pollutants.pm25, 20.0);
        assert_eq!(cities[0].pollutants.no2, 30.0);
        assert_eq!(cities[0].aqi_index, 67);
    }

    #[tokio::test]
    async fn country_without_locations_falls_back_to_sample() {
        let mut server = Server::new_async().await;
        let mock = mock_locations(&mut server, "IN", json!([])).await;

        let cities = upstream(&server).cities("IN").await;

        mock.assert_async().await;
        assert_eq!(cities.len(), 5);
        assert_eq!(cities[0].city, "New Delhi");
        assert_eq!(cities[0].population, Some(32_000_000));
    }

    #[tokio::test]
    async fn upstream_failure_falls_back_to_sample() {
        let mut server = Server::new_async().await;
        let _m = server
            .mock("GET", "/locations")
            .match_query(Matcher::Any)
            .with_status(500)
            .create_async()
            .await;

        let summary = upstream(&server).city_summary("Tokyo", "JP").await.unwrap();
        assert_eq!(summary.city, "Tokyo");
        assert_eq!(summary.aqi_index, 52);
    }

    #[tokio::test]
    async fn every_query_falls_back_for_country_without_locations() {
        let mut server = Server::new_async().await;
        let _locations = mock_locations(&mut server, "JP", json!([])).await;
        let measurements = server
            .mock("GET", "/measurements")
            .match_query(Matcher::Any)
            .expect(0)
            .create_async()
            .await;
        let resolver = upstream(&server);

        let summary = resolver.city_summary("Tokyo", "JP").await.unwrap();
        assert_eq!(summary.aqi_index, 52);
        assert_eq!(summary.population, Some(37_000_000));

        let stations = resolver.city_stations("Tokyo", "JP").await;
        let names: Vec<_> = stations.iter().map(|s| s.station_name.as_str()).collect();
        assert_eq!(names, ["Tokyo Central", "Tokyo North", "Tokyo South"]);

        let history = resolver.city_history("Tokyo", "JP", 30).await;
        assert_eq!(history.len(), 30);
        assert!(history.windows(2).all(|w| w[0].date < w[1].date));

        let points = resolver.heatmap(Some("JP")).await;
        assert_eq!(points.len(), 2);
        assert!(points.iter().all(|p| p.country == "JP"));

        let insights = resolver.insights("Tokyo", "JP").await.unwrap();
        assert_eq!(insights.aqi, 52);
        assert_eq!(insights.category, AqiCategory::Moderate);

        measurements.assert_async().await;
    }

    #[tokio::test]
    async fn history_and_stations_fall_back_on_server_error() {
        let mut server = Server::new_async().await;
        let _m = server
            .mock("GET", Matcher::Any)
            .with_status(500)
            .create_async()
            .await;
        let resolver = upstream(&server);

        assert_eq!(resolver.city_history("Tokyo", "JP", 7).await.len(), 7);
        assert_eq!(resolver.city_stations("Tokyo", "JP").await.len(), 3);
    }

    #[tokio::test]
    async fn slow_upstream_falls_back_to_sample() {
        let mut server = Server::new_async().await;
        let _m = server
            .mock("GET", "/locations")
            .match_query(Matcher::Any)
            .with_status(200)
            .with_header("content-type", "application/json")
            .with_chunked_body(|w| {
                std::thread::sleep(Duration::from_millis(500));
                w.write_all(b"{\"results\": []}")
            })
            .create_async()
            .await;
        let config = UpstreamConfig {
            lookup_timeout: Duration::from_millis(50),
            ..UpstreamConfig::with_key("test_key", server.url())
        };

        let cities = Resolver::from_upstream(config).cities("IN").await;

        assert_eq!(cities.len(), 5);
        assert_eq!(cities[0].city, "New Delhi");
    }

    #[tokio::test]
    async fn countries_gain_us_when_upstream_lacks_it() {
        let mut server = Server::new_async().await;
        let _m = server
            .mock("GET", "/countries")
            .match_query(Matcher::Any)
            .with_status(200)
            .with_header("content-type", "application/json")
            .with_body(envelope(json!([
                { "code": "IN", "name": "India" },
                { "code": "DE", "name": "Germany" }
            ])))
            .create_async()
            .await;

        let countries = upstream(&server).countries().await;

        assert_eq!(countries.len(), 3);
        assert_eq!(countries[0].average_aqi, 0);
        let us = &countries[2];
        assert_eq!(us.code, "US");
        assert_eq!(us.city_count, 3);
        assert_eq!(us.average_aqi, 59);
    }

    #[tokio::test]
    async fn countries_keep_upstream_us_entry() {
        let mut server = Server::new_async().await;
        let _m = server
            .mock("GET", "/countries")
            .match_query(Matcher::Any)
            .with_status(200)
            .with_header("content-type", "application/json")
            .with_body(envelope(json!([{ "code": "US", "name": "United States" }])))
            .create_async()
            .await;

        let countries = upstream(&server).countries().await;

        assert_eq!(countries.len(), 1);
        assert_eq!(countries[0].city_count, 0);
    }

    #[tokio::test]
    async fn summary_matches_city_case_insensitively() {
        let mut server = Server::new_async().await;
        let _m = mock_locations(&mut server, "FR", french_locations()).await;

        let lyon = upstream(&server).city_summary("LYON", "FR").await.unwrap();

        assert_eq!(lyon.city, "Lyon");
        assert_eq!(lyon.aqi_index, 111);
        assert_eq!(lyon.aqi_category, AqiCategory::UnhealthyForSensitiveGroups);
    }

    #[tokio::test]
    async fn unknown_upstream_city_uses_sample_summary() {
        let mut server = Server::new_async().await;
        let _m = mock_locations(&mut server, "FR", french_locations()).await;

        assert!(upstream(&server).city_summary("Nice", "FR").await.is_none());
    }

    #[tokio::test]
    async fn stations_filter_by_city_substring() {
        let mut server = Server::new_async().await;
        let _m = mock_locations(&mut server, "FR", french_locations()).await;

        let stations = upstream(&server).city_stations("par", "FR").await;

        assert_eq!(stations.len(), 2);
        assert_eq!(stations[0].station_name, "Paris, Louvre");
        assert_eq!(stations[0].aqi_index, 41);
        assert_eq!(stations[1].latitude, 48.83);
    }

    #[tokio::test]
    async fn heatmap_without_country_skips_upstream() {
        let mut server = Server::new_async().await;
        let mock = server
            .mock("GET", Matcher::Any)
            .expect(0)
            .create_async()
            .await;

        let points = upstream(&server).heatmap(None).await;

        mock.assert_async().await;
        assert_eq!(points.len(), 20);
    }

    #[tokio::test]
    async fn heatmap_for_country_uses_upstream_cities() {
        let mut server = Server::new_async().await;
        let _m = mock_locations(&mut server, "FR", french_locations()).await;

        let points = upstream(&server).heatmap(Some("FR")).await;

        assert_eq!(points.len(), 2);
        assert!(points.iter().all(|p| p.country == "FR"));
    }

    #[tokio::test]
    async fn insights_follow_city_summary() {
        let resolver = sample_only();

        let delhi = resolver.insights("New Delhi", "IN").await.unwrap();
        assert_eq!(delhi.aqi, 280);
        assert_eq!(delhi.category, AqiCategory::VeryUnhealthy);
        assert!(!delhi.activities.walking.safe);

        assert!(resolver.insights("Atlantis", "IN").await.is_none());
    }
}
