//! Client-side grouping of the flat 3-hour forecast list into calendar days.

use chrono::{Datelike, NaiveDate, TimeZone, Weekday};
use serde::Serialize;

use crate::{
    icon::{IconTag, classify},
    model::ForecastPoint,
};

/// Upper bound on the number of day groups produced.
pub const MAX_DAYS: usize = 7;

/// Display item for one forecast slot inside a day group.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct HourlyForecast {
    pub time: String,
    pub temperature: i32,
    pub condition: String,
    pub humidity: u8,
    pub wind_speed: f64,
    pub icon: IconTag,
}

/// Forecast slots sharing one calendar date.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DayBucket {
    pub day_of_week: &'static str,
    pub date_label: String,
    pub date: NaiveDate,
    pub forecasts: Vec<HourlyForecast>,
}

pub fn weekday_label(day: Weekday) -> &'static str {
    match day {
        Weekday::Sun => "Sunday",
        Weekday::Mon => "Monday",
        Weekday::Tue => "Tuesday",
        Weekday::Wed => "Wednesday",
        Weekday::Thu => "Thursday",
        Weekday::Fri => "Friday",
        Weekday::Sat => "Saturday",
    }
}

impl HourlyForecast {
    fn from_point<Tz: TimeZone>(point: &ForecastPoint, tz: &Tz) -> Self {
        let local = point.timestamp.with_timezone(tz).naive_local();

        Self {
            time: local.format("%H:%M").to_string(),
            temperature: point.temperature,
            condition: point.description.clone(),
            humidity: point.humidity,
            wind_speed: point.wind_speed,
            icon: classify(&point.description),
        }
    }
}

/// Group forecast points by calendar date in `tz`.
///
/// Buckets appear in the order their date was first seen and keep their points in input
/// order. At most [`MAX_DAYS`] buckets are returned; later dates are dropped.
pub fn group_by_day<Tz: TimeZone>(points: &[ForecastPoint], tz: &Tz) -> Vec<DayBucket> {
    let mut buckets: Vec<DayBucket> = Vec::new();

    for point in points {
        let date = point.timestamp.with_timezone(tz).date_naive();
        let item = HourlyForecast::from_point(point, tz);

        match buckets.iter_mut().find(|b| b.date == date) {
            Some(bucket) => bucket.forecasts.push(item),
            None => buckets.push(DayBucket {
                day_of_week: weekday_label(date.weekday()),
                date_label: date.format("%a %b %d %Y").to_string(),
                date,
                forecasts: vec![item],
            }),
        }
    }

    buckets.truncate(MAX_DAYS);
    buckets
}
