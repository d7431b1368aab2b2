//! Human-readable formatting of a [`WeatherReading`].

use std::fmt::Display;

use crate::model::WeatherReading;

const UNKNOWN: &str = "unknown";

/// Multi-line block shown after a successful lookup.
pub fn render(reading: &WeatherReading) -> String {
    let feels = or_unknown(reading.feels_like_c.map(|v| format!("{v:.1}°C")));
    let humidity = or_unknown(reading.humidity_pct.map(|v| format!("{v}%")));
    let wind = or_unknown(reading.wind_speed_mps.map(|v| format!("{} m/s", float_repr(v))));

    format!(
        "\n🌦️  Weather — {header}\n   • Temp: {temp:.1}°C (feels {feels})\n   • Condition: {condition}\n   • Humidity: {humidity}\n   • Wind: {wind}\n",
        header = location(reading),
        temp = reading.temperature_c,
        condition = title_case(&reading.condition),
    )
}

/// One-line form stored in the search history, e.g. `15.2°C, Clear Sky`.
pub fn summarize(reading: &WeatherReading) -> String {
    format!(
        "{:.1}°C, {}",
        reading.temperature_c,
        title_case(&reading.condition)
    )
}

fn location(reading: &WeatherReading) -> String {
    if reading.country.is_empty() {
        reading.city.clone()
    } else {
        format!("{}, {}", reading.city, reading.country)
    }
}

/// Shortest round-trip form that always keeps a fractional part: `3.0`, `3.25`.
fn float_repr(value: f64) -> String {
    let text = value.to_string();
    if value.is_finite() && !text.contains('.') {
        format!("{text}.0")
    } else {
        text
    }
}

fn or_unknown<T: Display>(value: Option<T>) -> String {
    value.map_or_else(|| UNKNOWN.to_string(), |v| v.to_string())
}

/// Upper-case every letter that follows a non-letter, lower-case the rest.
pub fn title_case(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    let mut prev_is_letter = false;

    for ch in text.chars() {
        if ch.is_alphabetic() {
            if prev_is_letter {
                out.extend(ch.to_lowercase());
            } else {
                out.extend(ch.to_uppercase());
            }
            prev_is_letter = true;
        } else {
            out.push(ch);
            prev_is_letter = false;
        }
    }

    out
}

#[cfg(test)]
mod tests {
    use super::*;

    fn london() -> WeatherReading {
        WeatherReading {
            city: "London".into(),
            country: "GB".into(),
            temperature_c: 15.2,
            feels_like_c: Some(14.8),
            condition: "clear sky".into(),
            humidity_pct: Some(70),
            wind_speed_mps: Some(3.1),
        }
    }

    #[test]
    fn render_contains_every_field() {
        let out = render(&london());

        assert!(out.contains("London, GB"));
        assert!(out.contains("15.2°C (feels 14.8°C)"));
        assert!(out.contains("Clear Sky"));
        assert!(out.contains("70%"));
        assert!(out.contains("3.1 m/s"));
    }

    #[test]
    fn render_has_header_first_and_one_line_per_field() {
        let out = render(&london());
        let lines: Vec<&str> = out.lines().filter(|l| !l.trim().is_empty()).collect();

        assert_eq!(lines.len(), 5);
        assert_eq!(lines[0], "🌦️  Weather — London, GB");
        assert!(lines[1].contains("Temp:"));
        assert!(lines[2].contains("Condition:"));
        assert!(lines[3].contains("Humidity:"));
        assert!(lines[4].contains("Wind:"));
    }

    #[test]
    fn render_shows_unknown_for_missing_fields() {
        let reading = WeatherReading {
            country: String::new(),
            feels_like_c: None,
            humidity_pct: None,
            wind_speed_mps: None,
            condition: "N/A".into(),
            ..london()
        };
        let out = render(&reading);

        assert!(out.contains("Weather — London\n"));
        assert!(out.contains("(feels unknown)"));
        assert!(out.contains("Humidity: unknown"));
        assert!(out.contains("Wind: unknown"));
        assert!(out.contains("Condition: N/A"));
    }

    #[test]
    fn render_rounds_to_one_decimal() {
        let reading = WeatherReading {
            temperature_c: 7.0,
            feels_like_c: Some(4.96),
            ..london()
        };
        assert!(render(&reading).contains("7.0°C (feels 5.0°C)"));
    }

    #[test]
    fn render_keeps_fraction_on_whole_wind_speed() {
        let calm = WeatherReading {
            wind_speed_mps: Some(3.0),
            ..london()
        };
        assert!(render(&calm).contains("Wind: 3.0 m/s"));

        let gusty = WeatherReading {
            wind_speed_mps: Some(12.25),
            ..london()
        };
        assert!(render(&gusty).contains("Wind: 12.25 m/s"));
    }

    #[test]
    fn summarize_is_compact() {
        assert_eq!(summarize(&london()), "15.2°C, Clear Sky");
        assert!(!summarize(&london()).contains('\n'));
    }

    #[test]
    fn title_case_follows_word_boundaries() {
        assert_eq!(title_case("clear sky"), "Clear Sky");
        assert_eq!(title_case("LIGHT RAIN"), "Light Rain");
        assert_eq!(title_case("thunderstorm with light-rain"), "Thunderstorm With Light-Rain");
        assert_eq!(title_case("N/A"), "N/A");
        assert_eq!(title_case(""), "");
    }
}
