//! Plain-text rendering of proxy responses.

use std::fmt::Write;

use chrono::TimeZone;
use weather_core::{DayBucket, ForecastPoint, WeatherReading, classify};

/// `tz` is the zone the proxy's reading timestamp is shown in.
pub fn reading<Tz: TimeZone>(reading: &WeatherReading, tz: &Tz) -> String {
    let icon = classify(&reading.description);
    let visibility = match reading.visibility {
        Some(km) => format!("{km} km"),
        None => "n/a".to_string(),
    };

    let mut out = String::new();
    let _ = writeln!(out, "{}, {}", reading.city, reading.country);
    let _ = writeln!(
        out,
        "  {} {}°C  {}  (feels like {}°C)",
        icon.glyph(),
        reading.temperature,
        reading.description,
        reading.feels_like
    );
    let as_of = reading.timestamp.with_timezone(tz).naive_local();
    let _ = writeln!(out, "  as of {}", as_of.format("%H:%M"));
    let _ = writeln!(out, "  Humidity    {}%", reading.humidity);
    let _ = writeln!(out, "  Wind        {} m/s", reading.wind_speed);
    let _ = writeln!(out, "  Pressure    {} hPa", reading.pressure);
    let _ = writeln!(out, "  Visibility  {visibility}");
    out
}

pub fn days(days: &[DayBucket]) -> String {
    if days.is_empty() {
        return "No forecast data available\n".to_string();
    }

    let mut out = String::new();
    for day in days {
        let _ = writeln!(out, "\n{} ({})", day.day_of_week, day.date_label);
        for slot in &day.forecasts {
            let _ = writeln!(
                out,
                "  {}  {} {:>3}°  {}",
                slot.time,
                slot.icon.glyph(),
                slot.temperature,
                slot.condition
            );
        }
    }
    out
}

pub fn hourly<Tz: TimeZone>(points: &[ForecastPoint], tz: &Tz) -> String {
    if points.is_empty() {
        return "No forecast data available\n".to_string();
    }

    let mut out = String::new();
    for point in points {
        let local = point.timestamp.with_timezone(tz).naive_local();
        let _ = writeln!(
            out,
            "{}  {} {:>3}°  {:>3}%  {:>5} m/s  {}",
            local.format("%a %H:%M"),
            classify(&point.description).glyph(),
            point.temperature,
            point.humidity,
            point.wind_speed,
            point.description
        );
    }
    out
}
