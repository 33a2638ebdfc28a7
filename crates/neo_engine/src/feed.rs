use std::collections::BTreeMap;

use chrono::{Days, NaiveDate, NaiveDateTime};
use reqwest::Url;
use serde::{Deserialize, Deserializer};

use crate::{ApiError, FeedSettings, NearEarthObject};

const APPROACH_TIME_FORMAT: &str = "%Y-%b-%d %H:%M";

/// Builds `{base}/feed?start_date=..&end_date=..&api_key=..` for the window starting at `start`.
pub fn feed_url(settings: &FeedSettings, start: NaiveDate) -> Result<Url, ApiError> {
    let end = start
        .checked_add_days(Days::new(settings.window_days))
        .ok_or_else(|| ApiError::Unexpected(format!("feed window overflows from {start}")))?;

    let mut url = Url::parse(&settings.base_url)
        .map_err(|err| ApiError::Unexpected(format!("invalid base url: {err}")))?;
    url.path_segments_mut()
        .map_err(|()| ApiError::Unexpected("base url cannot have a path".to_string()))?
        .pop_if_empty()
        .push("feed");
    url.query_pairs_mut()
        .append_pair("start_date", &start.format("%Y-%m-%d").to_string())
        .append_pair("end_date", &end.format("%Y-%m-%d").to_string())
        .append_pair("api_key", &settings.api_key);
    Ok(url)
}

// The feed keys its object lists by approach date, so the outer level is a map.
#[derive(Debug, Deserialize)]
struct FeedResponse {
    near_earth_objects: BTreeMap<String, Vec<FeedObject>>,
}

#[derive(Debug, Deserialize)]
struct FeedObject {
    id: String,
    neo_reference_id: String,
    name: String,
    absolute_magnitude_h: f64,
    estimated_diameter: EstimatedDiameter,
    is_potentially_hazardous_asteroid: bool,
    close_approach_data: Vec<CloseApproach>,
}

#[derive(Debug, Deserialize)]
struct EstimatedDiameter {
    meters: DiameterRange,
}

#[derive(Debug, Deserialize)]
struct DiameterRange {
    estimated_diameter_min: f64,
    estimated_diameter_max: f64,
}

#[derive(Debug, Deserialize)]
struct CloseApproach {
    #[serde(deserialize_with = "approach_time")]
    close_approach_date_full: NaiveDateTime,
    relative_velocity: RelativeVelocity,
    miss_distance: MissDistance,
    orbiting_body: String,
}

#[derive(Debug, Deserialize)]
struct RelativeVelocity {
    kilometers_per_second: String,
}

#[derive(Debug, Deserialize)]
struct MissDistance {
    kilometers: String,
}

fn approach_time<'de, D>(deserializer: D) -> Result<NaiveDateTime, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = String::deserialize(deserializer)?;
    NaiveDateTime::parse_from_str(&raw, APPROACH_TIME_FORMAT).map_err(serde::de::Error::custom)
}

struct Measured {
    object: FeedObject,
    approach: CloseApproach,
    diameter: f64,
    velocity: f64,
    miss_distance: f64,
}

#[derive(Debug, Clone, Copy)]
struct Span {
    min: f64,
    max: f64,
}

impl Span {
    fn of(values: impl Iterator<Item = f64>) -> Option<Self> {
        values.fold(None, |span, value| match span {
            None => Some(Span {
                min: value,
                max: value,
            }),
            Some(Span { min, max }) => Some(Span {
                min: min.min(value),
                max: max.max(value),
            }),
        })
    }

    fn normalize(self, value: f64) -> f64 {
        let width = self.max - self.min;
        if width > 0.0 {
            (value - self.min) / width
        } else {
            0.0
        }
    }
}

/// Decodes a feed response body into objects ordered by feed date.
///
/// Objects without a close approach or with unparsable measurements are
/// skipped; a malformed document is an [`ApiError::Unexpected`].
pub fn decode_feed(bytes: &[u8]) -> Result<Vec<NearEarthObject>, ApiError> {
    let response: FeedResponse = serde_json::from_slice(bytes)
        .map_err(|err| ApiError::Unexpected(format!("unable to decode feed: {err}")))?;

    let measured: Vec<Measured> = response
        .near_earth_objects
        .into_values()
        .flatten()
        .filter_map(measure)
        .collect();

    let (Some(diameters), Some(velocities), Some(misses)) = (
        Span::of(measured.iter().map(|m| m.diameter)),
        Span::of(measured.iter().map(|m| m.velocity)),
        Span::of(measured.iter().map(|m| m.miss_distance)),
    ) else {
        return Ok(Vec::new());
    };

    Ok(measured
        .into_iter()
        .map(|m| NearEarthObject {
            id: m.object.id,
            reference_id: m.object.neo_reference_id,
            name: m.object.name,
            absolute_magnitude: m.object.absolute_magnitude_h,
            estimated_diameter: m.diameter,
            is_potentially_hazardous: m.object.is_potentially_hazardous_asteroid,
            close_approach: m.approach.close_approach_date_full,
            relative_velocity: m.velocity,
            miss_distance: m.miss_distance,
            orbiting_body: m.approach.orbiting_body,
            normalized_diameter: diameters.normalize(m.diameter),
            normalized_relative_velocity: velocities.normalize(m.velocity),
            normalized_miss_distance: misses.normalize(m.miss_distance),
        })
        .collect())
}

fn measure(mut object: FeedObject) -> Option<Measured> {
    if object.close_approach_data.is_empty() {
        return None;
    }
    let approach = object.close_approach_data.swap_remove(0);
    let velocity = approach
        .relative_velocity
        .kilometers_per_second
        .trim()
        .parse::<f64>()
        .ok()?;
    let miss_distance = approach.miss_distance.kilometers.trim().parse::<f64>().ok()?;
    let range = &object.estimated_diameter.meters;
    let diameter = (range.estimated_diameter_min + range.estimated_diameter_max) / 2.0;
    Some(Measured {
        object,
        approach,
        diameter,
        velocity,
        miss_distance,
    })
}
