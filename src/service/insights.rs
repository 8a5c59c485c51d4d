//! Health and activity guidance derived from a city's AQI.

use crate::aqi::AqiCategory;
use serde::Serialize;

/// Advice per population group.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct HealthAdvice {
    pub general: &'static str,
    pub sensitive: &'static str,
    pub children: &'static str,
    pub elderly: &'static str,
    pub asthma: &'static str,
}

/// Whether an outdoor activity is advisable, with a short recommendation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct ActivityAdvice {
    pub safe: bool,
    pub recommendation: &'static str,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct ActivityGuide {
    pub walking: ActivityAdvice,
    pub running: ActivityAdvice,
    pub outdoor_play: ActivityAdvice,
    pub cycling: ActivityAdvice,
}

/// Response body of the insights endpoint.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Insights {
    pub city: String,
    pub country: String,
    pub aqi: u32,
    pub category: AqiCategory,
    pub health: HealthAdvice,
    pub activities: ActivityGuide,
}

impl Insights {
    pub fn new(city: impl Into<String>, country: impl Into<String>, aqi: u32) -> Self {
        let category = AqiCategory::from_aqi(aqi);
        let (health, activities) = guidance(category);
        Self {
            city: city.into(),
            country: country.into(),
            aqi,
            category,
            health,
            activities,
        }
    }
}

const fn activity(safe: bool, recommendation: &'static str) -> ActivityAdvice {
    ActivityAdvice {
        safe,
        recommendation,
    }
}

fn guidance(category: AqiCategory) -> (HealthAdvice, ActivityGuide) {
    match category {
        AqiCategory::Good => (
            HealthAdvice {
                general: "Air quality is excellent. No health concerns.",
                sensitive: "Perfect conditions for everyone, including sensitive groups.",
                children: "Ideal for outdoor play and activities.",
                elderly: "Safe for all outdoor activities.",
                asthma: "No restrictions for asthma patients.",
            },
            ActivityGuide {
                walking: activity(true, "Excellent for walking at any pace."),
                running: activity(true, "Perfect for long runs and intense workouts."),
                outdoor_play: activity(true, "Great day for kids to play outside."),
                cycling: activity(true, "Ideal conditions for cycling."),
            },
        ),
        AqiCategory::Moderate => (
            HealthAdvice {
                general: "Air quality is acceptable. Most people can engage in outdoor activities.",
                sensitive: "Unusually sensitive people may experience minor symptoms.",
                children: "Generally safe, but watch for any unusual symptoms.",
                elderly: "Safe for moderate outdoor activities.",
                asthma: "Most asthma patients can go about normal activities. Monitor for symptoms.",
            },
            ActivityGuide {
                walking: activity(true, "Good for walking. No restrictions."),
                running: activity(
                    true,
                    "Safe for running, but sensitive individuals should monitor how they feel.",
                ),
                outdoor_play: activity(true, "Children can play outside normally."),
                cycling: activity(true, "Good conditions for cycling."),
            },
        ),
        AqiCategory::UnhealthyForSensitiveGroups => (
            HealthAdvice {
                general: "Sensitive groups may experience health effects.",
                sensitive: "People with heart or lung disease, children, and older adults should reduce prolonged outdoor exertion.",
                children: "Active children should take breaks and reduce intense outdoor activities.",
                elderly: "Older adults should limit prolonged outdoor exertion.",
                asthma: "Asthma patients may experience symptoms. Keep quick-relief inhaler handy.",
            },
            ActivityGuide {
                walking: activity(
                    true,
                    "Light to moderate walking is okay. Sensitive groups should limit duration.",
                ),
                running: activity(
                    false,
                    "Avoid intense running. Sensitive groups should skip outdoor workouts.",
                ),
                outdoor_play: activity(true, "Limit prolonged or intense outdoor play for children."),
                cycling: activity(true, "Moderate cycling is okay, but avoid intense efforts."),
            },
        ),
        AqiCategory::Unhealthy => (
            HealthAdvice {
                general: "Everyone may begin to experience health effects. Sensitive groups may experience more serious effects.",
                sensitive: "People with heart or lung disease, children, and older adults should avoid prolonged outdoor exertion.",
                children: "Children should limit outdoor play and avoid strenuous activities.",
                elderly: "Elderly should stay indoors and avoid exertion.",
                asthma: "Asthma patients should avoid outdoor activities. Use medications as prescribed.",
            },
            ActivityGuide {
                walking: activity(true, "Short walks are acceptable, but limit time outdoors."),
                running: activity(false, "Avoid running and intense outdoor workouts entirely."),
                outdoor_play: activity(
                    false,
                    "Children should play indoors. Avoid outdoor activities.",
                ),
                cycling: activity(false, "Avoid cycling. Use indoor alternatives."),
            },
        ),
        AqiCategory::VeryUnhealthy => (
            HealthAdvice {
                general: "Health alert: everyone may experience serious health effects.",
                sensitive: "High risk for sensitive groups. Stay indoors and keep activity levels low.",
                children: "Keep children indoors. Avoid all outdoor activities.",
                elderly: "Elderly must stay indoors and rest. Avoid any exertion.",
                asthma: "Dangerous for asthma patients. Stay indoors, use air purifiers, and monitor symptoms closely.",
            },
            ActivityGuide {
                walking: activity(false, "Avoid all outdoor walking. Stay indoors."),
                running: activity(false, "Do not run outdoors. Dangerous conditions."),
                outdoor_play: activity(
                    false,
                    "Absolutely no outdoor play. Children must stay indoors.",
                ),
                cycling: activity(false, "Do not cycle outdoors."),
            },
        ),
        AqiCategory::Hazardous => (
            HealthAdvice {
                general: "Health warnings of emergency conditions. Everyone is at risk.",
                sensitive: "Extremely dangerous for sensitive groups. Remain indoors and minimize activity.",
                children: "Keep children indoors with minimal activity. Close all windows.",
                elderly: "Hazardous conditions. Elderly should remain indoors and rest.",
                asthma: "Life-threatening for asthma patients. Stay indoors, use air purifiers, and seek medical advice if needed.",
            },
            ActivityGuide {
                walking: activity(false, "Hazardous. Do not go outdoors."),
                running: activity(false, "Extremely dangerous. Do not go outdoors."),
                outdoor_play: activity(false, "Emergency conditions. Keep everyone indoors."),
                cycling: activity(false, "Hazardous. Do not go outdoors."),
            },
        ),
    }
}
