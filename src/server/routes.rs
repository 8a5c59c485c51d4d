//! Endpoint handlers. Errors are rendered as `{"detail": ...}` bodies.

use super::AppState;
use crate::error::{AppError, Result};
use crate::models::{CityReading, Country, HeatmapPoint, HistoricalRecord, Station};
use crate::service::Insights;
use axum::async_trait;
use axum::extract::{FromRequestParts, Path, Query, State};
use axum::http::request::Parts;
use axum::Json;
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};
use std::ops::RangeInclusive;

const DEFAULT_HISTORY_DAYS: i64 = 30;
const HISTORY_DAYS_RANGE: RangeInclusive<i64> = 1..=90;

const ENDPOINTS: [&str; 7] = [
    "/api/countries",
    "/api/cities",
    "/api/city/{city}/summary",
    "/api/city/{city}/history",
    "/api/city/{city}/stations",
    "/api/heatmap",
    "/api/insights",
];

/// `Query` whose rejection is an [`AppError::BadRequest`], so a missing or
/// malformed parameter gets the same error body as every other failure.
pub struct ApiQuery<T>(pub T);

#[async_trait]
impl<T, S> FromRequestParts<S> for ApiQuery<T>
where
    T: DeserializeOwned,
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self> {
        let Query(value) = Query::<T>::from_request_parts(parts, state)
            .await
            .map_err(|rejection| AppError::BadRequest(rejection.body_text()))?;
        Ok(Self(value))
    }
}

/// `?country=` of the city endpoints.
#[derive(Debug, Deserialize)]
pub struct CountryQuery {
    pub country: String,
}

/// `?country=&days=`; `days` defaults to 30.
#[derive(Debug, Deserialize)]
pub struct HistoryQuery {
    pub country: String,
    pub days: Option<i64>,
}

/// Optional `?country=` filter of the heatmap.
#[derive(Debug, Deserialize)]
pub struct HeatmapQuery {
    pub country: Option<String>,
}

/// `?country=&city=` of the insights endpoint.
#[derive(Debug, Deserialize)]
pub struct InsightsQuery {
    pub country: String,
    pub city: String,
}

/// Body of `GET /api/countries`.
#[derive(Serialize)]
pub struct CountriesResponse {
    pub countries: Vec<Country>,
}

/// Body of `GET /api/cities`.
#[derive(Serialize)]
pub struct CitiesResponse {
    pub country: String,
    pub cities: Vec<CityReading>,
}

/// Body of `GET /api/city/{city}/history`.
#[derive(Serialize)]
pub struct HistoryResponse {
    pub city: String,
    pub country: String,
    pub history: Vec<HistoricalRecord>,
}

/// Body of `GET /api/city/{city}/stations`.
#[derive(Serialize)]
pub struct StationsResponse {
    pub city: String,
    pub country: String,
    pub stations: Vec<Station>,
}

/// Body of `GET /api/heatmap`.
#[derive(Serialize)]
pub struct HeatmapResponse {
    pub points: Vec<HeatmapPoint>,
}

/// `GET /`: service name, version and endpoint list.
pub async fn root() -> Json<Value> {
    Json(json!({
        "message": "OpenAQ Global Air Dashboard API",
        "version": env!("CARGO_PKG_VERSION"),
        "endpoints": ENDPOINTS,
    }))
}

/// `GET /api/countries`: every country, with the US always present.
pub async fn countries(State(state): State<AppState>) -> Json<CountriesResponse> {
    Json(CountriesResponse {
        countries: state.resolver.countries().await,
    })
}

/// `GET /api/cities?country=`: cities of a country; 404 when there are none.
pub async fn cities(
    State(state): State<AppState>,
    ApiQuery(query): ApiQuery<CountryQuery>,
) -> Result<Json<CitiesResponse>> {
    let cities = state.resolver.cities(&query.country).await;
    if cities.is_empty() {
        return Err(AppError::NotFound(format!(
            "No cities found for country: {}",
            query.country
        )));
    }
    Ok(Json(CitiesResponse {
        country: query.country,
        cities,
    }))
}

/// `GET /api/city/{city}/summary?country=`: current reading; 404 for an unknown city.
pub async fn city_summary(
    State(state): State<AppState>,
    Path(city): Path<String>,
    ApiQuery(query): ApiQuery<CountryQuery>,
) -> Result<Json<CityReading>> {
    state
        .resolver
        .city_summary(&city, &query.country)
        .await
        .map(Json)
        .ok_or_else(|| AppError::NotFound(format!("City not found: {}", city)))
}

/// `GET /api/city/{city}/history?country=&days=`: daily records, oldest first.
///
/// `days` outside `1..=90` is rejected with 422.
pub async fn city_history(
    State(state): State<AppState>,
    Path(city): Path<String>,
    ApiQuery(query): ApiQuery<HistoryQuery>,
) -> Result<Json<HistoryResponse>> {
    let days = history_days(query.days)?;
    let history = state
        .resolver
        .city_history(&city, &query.country, days)
        .await;
    Ok(Json(HistoryResponse {
        city,
        country: query.country,
        history,
    }))
}

/// `GET /api/city/{city}/stations?country=`: monitoring stations; empty for an unknown city.
pub async fn city_stations(
    State(state): State<AppState>,
    Path(city): Path<String>,
    ApiQuery(query): ApiQuery<CountryQuery>,
) -> Json<StationsResponse> {
    let stations = state.resolver.city_stations(&city, &query.country).await;
    Json(StationsResponse {
        city,
        country: query.country,
        stations,
    })
}

/// `GET /api/heatmap?country=`: map points for one country, or all sample cities.
pub async fn heatmap(
    State(state): State<AppState>,
    ApiQuery(query): ApiQuery<HeatmapQuery>,
) -> Json<HeatmapResponse> {
    Json(HeatmapResponse {
        points: state.resolver.heatmap(query.country.as_deref()).await,
    })
}

/// `GET /api/insights?country=&city=`: health guidance; 404 for an unknown city.
pub async fn insights(
    State(state): State<AppState>,
    ApiQuery(query): ApiQuery<InsightsQuery>,
) -> Result<Json<Insights>> {
    state
        .resolver
        .insights(&query.city, &query.country)
        .await
        .map(Json)
        .ok_or_else(|| AppError::NotFound(format!("City not found: {}", query.city)))
}

fn history_days(days: Option<i64>) -> Result<u32> {
    let days = days.unwrap_or(DEFAULT_HISTORY_DAYS);
    if !HISTORY_DAYS_RANGE.contains(&days) {
        return Err(AppError::InvalidParameter(format!(
            "days must be between {} and {}, got {}",
            HISTORY_DAYS_RANGE.start(),
            HISTORY_DAYS_RANGE.end(),
            days
        )));
    }
    u32::try_from(days).map_err(|_| AppError::InvalidParameter(format!("invalid days: {}", days)))
}

#[cfg(test)]
mod tests {
    use crate::config::UpstreamConfig;
    use crate::server::{build_router, AppState};
    use crate::service::Resolver;
    use axum::body::{to_bytes, Body};
    use axum::http::{Request, StatusCode};
    use axum::Router;
    use rstest::rstest;
    use serde_json::Value;
    use tower::ServiceExt;

    fn app() -> Router {
        build_router(AppState::new(Resolver::from_upstream(
            UpstreamConfig::sample_only(),
        )))
    }

    async fn get(uri: &str) -> (StatusCode, Value) {
        let response = app()
            .oneshot(Request::builder().uri(uri).body(Body::empty()).unwrap())
            .await
            .unwrap();
        let status = response.status();
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        let body = serde_json::from_slice(&bytes).unwrap_or(Value::Null);
        (status, body)
    }

    #[tokio::test]
    async fn root_lists_endpoints() {
        let (status, body) = get("/").await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["endpoints"].as_array().unwrap().len(), 7);
    }

    #[tokio::test]
    async fn countries_include_us() {
        let (status, body) = get("/api/countries").await;
        assert_eq!(status, StatusCode::OK);
        let countries = body["countries"].as_array().unwrap();
        assert!(countries.iter().any(|c| c["code"] == "US"));
        assert!(countries[0]["averageAqi"].is_u64());
    }

    #[tokio::test]
    async fn cities_for_unknown_country_is_not_found() {
        let (status, body) = get("/api/cities?country=ZZ").await;
        assert_eq!(status, StatusCode::NOT_FOUND);
        assert_eq!(body["detail"], "No cities found for country: ZZ");
    }

    #[rstest]
    #[case("/api/cities")]
    #[case("/api/city/Tokyo/summary")]
    #[case("/api/insights?country=JP")]
    #[case("/api/city/Tokyo/history?country=JP&days=many")]
    #[tokio::test]
    async fn bad_query_is_rejected_with_detail(#[case] uri: &str) {
        let (status, body) = get(uri).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert!(body["detail"].is_string(), "{}", body);
    }

    #[tokio::test]
    async fn missing_country_names_the_field() {
        let (_, body) = get("/api/cities").await;
        assert!(body["detail"].as_str().unwrap().contains("country"));
    }

    #[tokio::test]
    async fn city_summary_by_path() {
        let (status, body) = get("/api/city/New%20Delhi/summary?country=IN").await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["city"], "New Delhi");
        assert_eq!(body["aqiIndex"], 280);
        assert_eq!(body["aqiCategory"], "Very Unhealthy");

        let (status, body) = get("/api/city/Atlantis/summary?country=IN").await;
        assert_eq!(status, StatusCode::NOT_FOUND);
        assert_eq!(body["detail"], "City not found: Atlantis");
    }

    #[tokio::test]
    async fn history_defaults_to_thirty_ascending_days() {
        let (status, body) = get("/api/city/Tokyo/history?country=JP").await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["city"], "Tokyo");

        let history = body["history"].as_array().unwrap();
        assert_eq!(history.len(), 30);
        let dates: Vec<&str> = history.iter().map(|r| r["date"].as_str().unwrap()).collect();
        assert!(dates.windows(2).all(|w| w[0] < w[1]));
        assert!(history.iter().all(|r| r["aqiIndex"].is_u64()));
    }

    #[rstest]
    #[case("0")]
    #[case("91")]
    #[case("-5")]
    #[tokio::test]
    async fn history_rejects_out_of_range_days(#[case] days: &str) {
        let uri = format!("/api/city/Tokyo/history?country=JP&days={}", days);
        let (status, body) = get(&uri).await;
        assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
        assert!(body["detail"].as_str().unwrap().contains("between 1 and 90"));
    }

    #[tokio::test]
    async fn history_accepts_bounds() {
        let (_, body) = get("/api/city/Tokyo/history?country=JP&days=90").await;
        assert_eq!(body["history"].as_array().unwrap().len(), 90);
        let (_, body) = get("/api/city/Tokyo/history?country=JP&days=1").await;
        assert_eq!(body["history"].as_array().unwrap().len(), 1);
    }

    #[tokio::test]
    async fn stations_for_unknown_city_are_empty() {
        let (status, body) = get("/api/city/Atlantis/stations?country=JP").await;
        assert_eq!(status, StatusCode::OK);
        assert!(body["stations"].as_array().unwrap().is_empty());

        let (_, body) = get("/api/city/Tokyo/stations?country=JP").await;
        assert_eq!(body["stations"].as_array().unwrap().len(), 3);
    }

    #[tokio::test]
    async fn heatmap_filters_by_country() {
        let (_, body) = get("/api/heatmap").await;
        assert_eq!(body["points"].as_array().unwrap().len(), 20);

        let (_, body) = get("/api/heatmap?country=GB").await;
        let points = body["points"].as_array().unwrap();
        assert_eq!(points.len(), 2);
        assert!(points.iter().all(|p| p["country"] == "GB"));
    }

    #[tokio::test]
    async fn insights_for_known_and_unknown_cities() {
        let (status, body) = get("/api/insights?country=IN&city=New%20Delhi").await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["aqi"], 280);
        assert_eq!(body["category"], "Very Unhealthy");
        assert_eq!(body["activities"]["running"]["safe"], false);

        let (status, _) = get("/api/insights?country=IN&city=Atlantis").await;
        assert_eq!(status, StatusCode::NOT_FOUND);
    }
}
