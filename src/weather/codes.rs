use serde::Serialize;
use utoipa::ToSchema;

/// Coarse display bucket for a weather condition
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum Icon {
    Sunny,
    Cloudy,
    Fog,
    Rain,
    Snow,
    Storm,
}

impl Icon {
    pub fn as_str(&self) -> &'static str {
        match self {
            Icon::Sunny => "sunny",
            Icon::Cloudy => "cloudy",
            Icon::Fog => "fog",
            Icon::Rain => "rain",
            Icon::Snow => "snow",
            Icon::Storm => "storm",
        }
    }
}

/// One row of the WMO weather code table used by Open-Meteo
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct WeatherCodeEntry {
    pub code: i64,
    pub description: &'static str,
    pub icon: Icon,
}

const fn entry(code: i64, description: &'static str, icon: Icon) -> WeatherCodeEntry {
    WeatherCodeEntry {
        code,
        description,
        icon,
    }
}

/// Returned for any code missing from the table
pub const UNKNOWN_CONDITION: WeatherCodeEntry = entry(-1, "Unknown", Icon::Cloudy);

pub const WEATHER_CODES: &[WeatherCodeEntry] = &[
    entry(0, "Clear sky", Icon::Sunny),
    entry(1, "Mainly clear", Icon::Sunny),
    entry(2, "Partly cloudy", Icon::Cloudy),
    entry(3, "Overcast", Icon::Cloudy),
    entry(45, "Fog", Icon::Fog),
    entry(48, "Fog", Icon::Fog),
    entry(51, "Drizzle", Icon::Rain),
    entry(53, "Drizzle", Icon::Rain),
    entry(55, "Drizzle", Icon::Rain),
    entry(56, "Freezing drizzle", Icon::Rain),
    entry(57, "Freezing drizzle", Icon::Rain),
    entry(61, "Light rain", Icon::Rain),
    entry(63, "Rain", Icon::Rain),
    entry(65, "Heavy rain", Icon::Rain),
    entry(66, "Freezing rain", Icon::Rain),
    entry(67, "Freezing rain", Icon::Rain),
    entry(71, "Light snow", Icon::Snow),
    entry(73, "Snow", Icon::Snow),
    entry(75, "Heavy snow", Icon::Snow),
    entry(77, "Snow grains", Icon::Snow),
    entry(80, "Light showers", Icon::Rain),
    entry(81, "Showers", Icon::Rain),
    entry(82, "Heavy showers", Icon::Rain),
    entry(85, "Snow", Icon::Snow),
    entry(86, "Heavy snow", Icon::Snow),
    entry(95, "Thunderstorm", Icon::Storm),
    entry(96, "Thunderstorm with hail", Icon::Storm),
    entry(99, "Thunderstorm with hail", Icon::Storm),
];

/// Look up a weather code, falling back to [`UNKNOWN_CONDITION`]
pub fn lookup(code: i64) -> WeatherCodeEntry {
    WEATHER_CODES
        .iter()
        .find(|e| e.code == code)
        .copied()
        .unwrap_or(UNKNOWN_CONDITION)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_lookup_known_codes() {
        let clear = lookup(0);
        assert_eq!(clear.description, "Clear sky");
        assert_eq!(clear.icon, Icon::Sunny);

        assert_eq!(lookup(3).icon, Icon::Cloudy);
        assert_eq!(lookup(48).description, "Fog");
        assert_eq!(lookup(57).description, "Freezing drizzle");
        assert_eq!(lookup(77).icon, Icon::Snow);
        assert_eq!(lookup(82).description, "Heavy showers");
        assert_eq!(lookup(99).icon, Icon::Storm);
    }

    #[test]
    fn test_lookup_full_table() {
        let expected = [
            (0, "Clear sky", Icon::Sunny),
            (1, "Mainly clear", Icon::Sunny),
            (2, "Partly cloudy", Icon::Cloudy),
            (3, "Overcast", Icon::Cloudy),
            (45, "Fog", Icon::Fog),
            (48, "Fog", Icon::Fog),
            (51, "Drizzle", Icon::Rain),
            (53, "Drizzle", Icon::Rain),
            (55, "Drizzle", Icon::Rain),
            (56, "Freezing drizzle", Icon::Rain),
            (57, "Freezing drizzle", Icon::Rain),
            (61, "Light rain", Icon::Rain),
            (63, "Rain", Icon::Rain),
            (65, "Heavy rain", Icon::Rain),
            (66, "Freezing rain", Icon::Rain),
            (67, "Freezing rain", Icon::Rain),
            (71, "Light snow", Icon::Snow),
            (73, "Snow", Icon::Snow),
            (75, "Heavy snow", Icon::Snow),
            (77, "Snow grains", Icon::Snow),
            (80, "Light showers", Icon::Rain),
            (81, "Showers", Icon::Rain),
            (82, "Heavy showers", Icon::Rain),
            (85, "Snow", Icon::Snow),
            (86, "Heavy snow", Icon::Snow),
            (95, "Thunderstorm", Icon::Storm),
            (96, "Thunderstorm with hail", Icon::Storm),
            (99, "Thunderstorm with hail", Icon::Storm),
        ];

        assert_eq!(WEATHER_CODES.len(), expected.len());
        for (code, description, icon) in expected {
            let e = lookup(code);
            assert_eq!(e.code, code);
            assert_eq!(e.description, description, "code {}", code);
            assert_eq!(e.icon, icon, "code {}", code);
        }
    }

    #[test]
    fn test_lookup_unknown_codes_fall_back() {
        for code in [-1, 4, 44, 100, i64::MAX] {
            let e = lookup(code);
            assert_eq!(e.description, "Unknown");
            assert_eq!(e.icon, Icon::Cloudy);
        }
    }

    #[test]
    fn test_table_codes_are_unique() {
        let mut codes: Vec<i64> = WEATHER_CODES.iter().map(|e| e.code).collect();
        codes.sort_unstable();
        codes.dedup();
        assert_eq!(codes.len(), WEATHER_CODES.len());
    }

    #[test]
    fn test_icon_serializes_lowercase() {
        assert_eq!(serde_json::to_value(Icon::Storm).unwrap(), "storm");
        assert_eq!(Icon::Fog.as_str(), "fog");
    }
}
