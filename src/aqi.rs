//! US EPA Air Quality Index derived from PM2.5 concentrations.

use serde::Serialize;
use std::fmt;

/// `(pm25_low, pm25_high, aqi_low, aqi_high)`; upper breakpoints are inclusive.
const PM25_BREAKPOINTS: [(f64, f64, f64, f64); 6] = [
    (0.0, 12.0, 0.0, 50.0),
    (12.0, 35.4, 50.0, 100.0),
    (35.4, 55.4, 100.0, 150.0),
    (55.4, 150.4, 150.0, 200.0),
    (150.4, 250.4, 200.0, 300.0),
    (250.4, 500.4, 300.0, 400.0),
];

/// Absorbs float error at breakpoints so that e.g. 35.4 lands on 100, not 99.
const TRUNCATION_EPSILON: f64 = 1e-9;

/// Converts a PM2.5 concentration (µg/m³) into an AQI value.
///
/// Linear interpolation inside the matching breakpoint segment, truncated towards
/// zero. Concentrations above 500.4 extrapolate along the last segment. Negative
/// and NaN inputs are treated as zero.
pub fn aqi_from_pm25(pm25: f64) -> u32 {
    let pm25 = if pm25.is_nan() { 0.0 } else { pm25.max(0.0) };

    let (bp_lo, bp_hi, aqi_lo, aqi_hi) = PM25_BREAKPOINTS
        .iter()
        .copied()
        .find(|&(_, bp_hi, _, _)| pm25 <= bp_hi)
        .unwrap_or(PM25_BREAKPOINTS[PM25_BREAKPOINTS.len() - 1]);

    let aqi = aqi_lo + (aqi_hi - aqi_lo) * (pm25 - bp_lo) / (bp_hi - bp_lo);
    (aqi + TRUNCATION_EPSILON).floor() as u32
}

/// Health category for an AQI value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum AqiCategory {
    #[serde(rename = "Good")]
    Good,
    #[serde(rename = "Moderate")]
    Moderate,
    #[serde(rename = "Unhealthy for Sensitive Groups")]
    UnhealthyForSensitiveGroups,
    #[serde(rename = "Unhealthy")]
    Unhealthy,
    #[serde(rename = "Very Unhealthy")]
    VeryUnhealthy,
    #[serde(rename = "Hazardous")]
    Hazardous,
}

impl AqiCategory {
    /// Maps an AQI value onto its category. Each bracket includes its upper bound.
    pub fn from_aqi(aqi: u32) -> Self {
        match aqi {
            0..=50 => AqiCategory::Good,
            51..=100 => AqiCategory::Moderate,
            101..=150 => AqiCategory::UnhealthyForSensitiveGroups,
            151..=200 => AqiCategory::Unhealthy,
            201..=300 => AqiCategory::VeryUnhealthy,
            _ => AqiCategory::Hazardous,
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            AqiCategory::Good => "Good",
            AqiCategory::Moderate => "Moderate",
            AqiCategory::UnhealthyForSensitiveGroups => "Unhealthy for Sensitive Groups",
            AqiCategory::Unhealthy => "Unhealthy",
            AqiCategory::VeryUnhealthy => "Very Unhealthy",
            AqiCategory::Hazardous => "Hazardous",
        }
    }
}

impl fmt::Display for AqiCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case(0.0, 0)]
    #[case(6.0, 25)]
    #[case(12.0, 50)]
    #[case(35.4, 100)]
    #[case(55.4, 150)]
    #[case(150.4, 200)]
    #[case(250.4, 300)]
    #[case(500.4, 400)]
    fn aqi_at_breakpoints(#[case] pm25: f64, #[case] expected: u32) {
        assert_eq!(aqi_from_pm25(pm25), expected);
    }

    #[test]
    fn aqi_truncates_instead_of_rounding() {
        // 50 + 50/23.4 * (20 - 12) = 67.09...
        assert_eq!(aqi_from_pm25(20.0), 67);
        // 150 + 50/95 * (98 - 55.4) = 172.42...
        assert_eq!(aqi_from_pm25(98.0), 172);
    }

    #[test]
    fn aqi_extrapolates_beyond_last_breakpoint() {
        // 300 + 100/250 * (750.4 - 250.4) = 500
        assert_eq!(aqi_from_pm25(750.4), 500);
    }

    #[test]
    fn aqi_treats_invalid_input_as_zero() {
        assert_eq!(aqi_from_pm25(-5.0), 0);
        assert_eq!(aqi_from_pm25(f64::NAN), 0);
    }

    #[test]
    fn aqi_is_monotonic_in_pm25() {
        let mut previous = 0;
        for step in 0..=6000 {
            let pm25 = step as f64 * 0.1;
            let aqi = aqi_from_pm25(pm25);
            assert!(
                aqi >= previous,
                "AQI dropped from {} to {} at pm25={}",
                previous,
                aqi,
                pm25
            );
            previous = aqi;
        }
    }

    #[rstest]
    #[case(0, AqiCategory::Good)]
    #[case(50, AqiCategory::Good)]
    #[case(51, AqiCategory::Moderate)]
    #[case(100, AqiCategory::Moderate)]
    #[case(101, AqiCategory::UnhealthyForSensitiveGroups)]
    #[case(150, AqiCategory::UnhealthyForSensitiveGroups)]
    #[case(151, AqiCategory::Unhealthy)]
    #[case(200, AqiCategory::Unhealthy)]
    #[case(201, AqiCategory::VeryUnhealthy)]
    #[case(300, AqiCategory::VeryUnhealthy)]
    #[case(301, AqiCategory::Hazardous)]
    #[case(500, AqiCategory::Hazardous)]
    fn category_boundaries(#[case] aqi: u32, #[case] expected: AqiCategory) {
        assert_eq!(AqiCategory::from_aqi(aqi), expected);
    }

    #[test]
    fn category_serializes_as_label() {
        let json = serde_json::to_string(&AqiCategory::UnhealthyForSensitiveGroups).unwrap();
        assert_eq!(json, "\"Unhealthy for Sensitive Groups\"");
        assert_eq!(AqiCategory::VeryUnhealthy.to_string(), "Very Unhealthy");
    }
}
