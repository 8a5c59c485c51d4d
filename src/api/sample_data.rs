//! Built-in air quality figures served when OpenAQ is disabled or unavailable.

use crate::models::Pollutants;

/// Literal reference figures for one city.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CityBaseline {
    pub city: &'static str,
    pub aqi_index: u32,
    pub pollutants: Pollutants,
    pub population: u64,
    pub lat: f64,
    pub lon: f64,
}

/// A country and its cities, in display order.
#[derive(Debug, Clone, Copy)]
pub struct SampleCountry {
    pub code: &'static str,
    pub name: &'static str,
    pub cities: &'static [CityBaseline],
}

/// Baseline used for historical series of cities missing from the table.
pub const UNKNOWN_CITY_BASELINE: Pollutants = Pollutants {
    pm25: 50.0,
    pm10: 75.0,
    no2: 40.0,
    o3: 40.0,
    co: 0.5,
    so2: 10.0,
};

pub static SAMPLE_COUNTRIES: &[SampleCountry] = &[
    SampleCountry {
        code: "IN",
        name: "India",
        cities: &[
            CityBaseline {
                city: "New Delhi",
                aqi_index: 280,
                pollutants: Pollutants {
                    pm25: 180.0,
                    pm10: 260.0,
                    no2: 90.0,
                    o3: 35.0,
                    co: 1.2,
                    so2: 22.0,
                },
                population: 32_000_000,
                lat: 28.7041,
                lon: 77.1025,
            },
            CityBaseline {
                city: "Mumbai",
                aqi_index: 160,
                pollutants: Pollutants {
                    pm25: 95.0,
                    pm10: 140.0,
                    no2: 60.0,
                    o3: 40.0,
                    co: 0.9,
                    so2: 15.0,
                },
                population: 20_000_000,
                lat: 19.076,
                lon: 72.8777,
            },
            CityBaseline {
                city: "Bangalore",
                aqi_index: 120,
                pollutants: Pollutants {
                    pm25: 65.0,
                    pm10: 95.0,
                    no2: 45.0,
                    o3: 38.0,
                    co: 0.7,
                    so2: 12.0,
                },
                population: 12_000_000,
                lat: 12.9716,
                lon: 77.5946,
            },
            CityBaseline {
                city: "Kolkata",
                aqi_index: 185,
                pollutants: Pollutants {
                    pm25: 110.0,
                    pm10: 165.0,
                    no2: 72.0,
                    o3: 42.0,
                    co: 1.0,
                    so2: 18.0,
                },
                population: 14_800_000,
                lat: 22.5726,
                lon: 88.3639,
            },
            CityBaseline {
                city: "Chennai",
                aqi_index: 95,
                pollutants: Pollutants {
                    pm25: 48.0,
                    pm10: 78.0,
                    no2: 38.0,
                    o3: 45.0,
                    co: 0.6,
                    so2: 10.0,
                },
                population: 10_900_000,
                lat: 13.0827,
                lon: 80.2707,
            },
        ],
    },
    SampleCountry {
        code: "US",
        name: "United States",
        cities: &[
            CityBaseline {
                city: "Los Angeles",
                aqi_index: 75,
                pollutants: Pollutants {
                    pm25: 35.0,
                    pm10: 58.0,
                    no2: 42.0,
                    o3: 55.0,
                    co: 0.5,
                    so2: 8.0,
                },
                population: 13_000_000,
                lat: 34.0522,
                lon: -118.2437,
            },
            CityBaseline {
                city: "New York",
                aqi_index: 55,
                pollutants: Pollutants {
                    pm25: 28.0,
                    pm10: 45.0,
                    no2: 38.0,
                    o3: 48.0,
                    co: 0.4,
                    so2: 7.0,
                },
                population: 19_000_000,
                lat: 40.7128,
                lon: -74.006,
            },
            CityBaseline {
                city: "Chicago",
                aqi_index: 48,
                pollutants: Pollutants {
                    pm25: 22.0,
                    pm10: 38.0,
                    no2: 32.0,
                    o3: 42.0,
                    co: 0.3,
                    so2: 6.0,
                },
                population: 9_500_000,
                lat: 41.8781,
                lon: -87.6298,
            },
        ],
    },
    SampleCountry {
        code: "GB",
        name: "United Kingdom",
        cities: &[
            CityBaseline {
                city: "London",
                aqi_index: 62,
                pollutants: Pollutants {
                    pm25: 32.0,
                    pm10: 52.0,
                    no2: 45.0,
                    o3: 38.0,
                    co: 0.4,
                    so2: 9.0,
                },
                population: 9_000_000,
                lat: 51.5074,
                lon: -0.1278,
            },
            CityBaseline {
                city: "Manchester",
                aqi_index: 58,
                pollutants: Pollutants {
                    pm25: 29.0,
                    pm10: 48.0,
                    no2: 40.0,
                    o3: 35.0,
                    co: 0.35,
                    so2: 8.0,
                },
                population: 2_800_000,
                lat: 53.4808,
                lon: -2.2426,
            },
        ],
    },
    SampleCountry {
        code: "DE",
        name: "Germany",
        cities: &[
            CityBaseline {
                city: "Berlin",
                aqi_index: 45,
                pollutants: Pollutants {
                    pm25: 20.0,
                    pm10: 35.0,
                    no2: 32.0,
                    o3: 40.0,
                    co: 0.3,
                    so2: 6.0,
                },
                population: 3_800_000,
                lat: 52.52,
                lon: 13.405,
            },
            CityBaseline {
                city: "Munich",
                aqi_index: 42,
                pollutants: Pollutants {
                    pm25: 18.0,
                    pm10: 32.0,
                    no2: 28.0,
                    o3: 38.0,
                    co: 0.28,
                    so2: 5.0,
                },
                population: 1_500_000,
                lat: 48.1351,
                lon: 11.582,
            },
        ],
    },
    SampleCountry {
        code: "BR",
        name: "Brazil",
        cities: &[
            CityBaseline {
                city: "São Paulo",
                aqi_index: 88,
                pollutants: Pollutants {
                    pm25: 42.0,
                    pm10: 68.0,
                    no2: 52.0,
                    o3: 45.0,
                    co: 0.65,
                    so2: 12.0,
                },
                population: 22_000_000,
                lat: -23.5505,
                lon: -46.6333,
            },
            CityBaseline {
                city: "Rio de Janeiro",
                aqi_index: 72,
                pollutants: Pollutants {
                    pm25: 36.0,
                    pm10: 58.0,
                    no2: 45.0,
                    o3: 50.0,
                    co: 0.55,
                    so2: 10.0,
                },
                population: 13_000_000,
                lat: -22.9068,
                lon: -43.1729,
            },
        ],
    },
    SampleCountry {
        code: "CN",
        name: "China",
        cities: &[
            CityBaseline {
                city: "Beijing",
                aqi_index: 165,
                pollutants: Pollutants {
                    pm25: 98.0,
                    pm10: 145.0,
                    no2: 68.0,
                    o3: 42.0,
                    co: 0.95,
                    so2: 20.0,
                },
                population: 21_500_000,
                lat: 39.9042,
                lon: 116.4074,
            },
            CityBaseline {
                city: "Shanghai",
                aqi_index: 135,
                pollutants: Pollutants {
                    pm25: 78.0,
                    pm10: 115.0,
                    no2: 58.0,
                    o3: 48.0,
                    co: 0.82,
                    so2: 16.0,
                },
                population: 27_000_000,
                lat: 31.2304,
                lon: 121.4737,
            },
        ],
    },
    SampleCountry {
        code: "JP",
        name: "Japan",
        cities: &[
            CityBaseline {
                city: "Tokyo",
                aqi_index: 52,
                pollutants: Pollutants {
                    pm25: 26.0,
                    pm10: 42.0,
                    no2: 36.0,
                    o3: 45.0,
                    co: 0.38,
                    so2: 7.0,
                },
                population: 37_000_000,
                lat: 35.6762,
                lon: 139.6503,
            },
            CityBaseline {
                city: "Osaka",
                aqi_index: 48,
                pollutants: Pollutants {
                    pm25: 23.0,
                    pm10: 38.0,
                    no2: 32.0,
                    o3: 42.0,
                    co: 0.35,
                    so2: 6.0,
                },
                population: 19_000_000,
                lat: 34.6937,
                lon: 135.5023,
            },
        ],
    },
    SampleCountry {
        code: "AU",
        name: "Australia",
        cities: &[
            CityBaseline {
                city: "Sydney",
                aqi_index: 38,
                pollutants: Pollutants {
                    pm25: 15.0,
                    pm10: 28.0,
                    no2: 25.0,
                    o3: 38.0,
                    co: 0.25,
                    so2: 4.0,
                },
                population: 5_300_000,
                lat: -33.8688,
                lon: 151.2093,
            },
            CityBaseline {
                city: "Melbourne",
                aqi_index: 35,
                pollutants: Pollutants {
                    pm25: 14.0,
                    pm10: 25.0,
                    no2: 22.0,
                    o3: 35.0,
                    co: 0.22,
                    so2: 3.0,
                },
                population: 5_000_000,
                lat: -37.8136,
                lon: 144.9631,
            },
        ],
    },
];

