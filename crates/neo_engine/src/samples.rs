use chrono::{Days, NaiveDate, NaiveTime};

use crate::NearEarthObject;

// (id, name, magnitude, diameter m, hazardous, days ahead, km/s, miss km, normalized d/v/m)
type Row = (&'static str, &'static str, f64, f64, bool, u64, f64, f64, [f64; 3]);

const ROWS: &[Row] = &[
    ("2465633", "(2009 JR5)", 20.44, 485.333, false, 3, 18.128, 45_290_298.2, [1.0, 0.7, 0.4]),
    ("3426410", "(2008 QV11)", 21.34, 320.656, false, 1, 19.750, 38_764_558.6, [0.7, 0.3, 0.2]),
    ("3553060", "(2010 XT10)", 26.5, 29.788, false, 3, 19.153, 73_563_782.4, [0.1, 0.3, 0.8]),
    ("3726710", "(2015 RC)", 24.3, 82.043, false, 1, 19.487, 4_027_962.7, [0.2, 0.5, 0.8]),
    ("3727181", "(2015 RO36)", 22.93, 154.184, false, 1, 15.809, 8_086_032.0, [0.5, 0.4, 0.3]),
    ("3727639", "(2015 RN83)", 21.77, 263.051, false, 3, 12.081, 25_195_177.4, [0.7, 0.4, 0.6]),
    ("723", "(2015 CB)", 21.34, 180.656, true, 2, 19.750, 32_764_558.6, [0.6, 0.4, 0.5]),
    ("3730577", "(2015 TX237)", 23.3, 130.029, false, 3, 6.573, 11_896_602.4, [0.4, 0.1, 0.4]),
    ("3731587", "(2015 UG)", 22.81, 162.945, false, 1, 11.956, 16_940_461.0, [0.5, 0.7, 0.2]),
    ("3747356", "(2016 EK158)", 20.49, 474.286, false, 3, 16.957, 41_958_497.7, [0.94, 0.3, 0.4]),
];

/// A fixed set of realistic objects approaching in the days after `today`.
pub fn sample_objects(today: NaiveDate) -> Vec<NearEarthObject> {
    let noon = NaiveTime::from_hms_opt(12, 0, 0).unwrap_or_default();
    ROWS.iter()
        .map(
            |&(id, name, magnitude, diameter, hazardous, days_ahead, velocity, miss, normalized)| {
                let day = today.checked_add_days(Days::new(days_ahead)).unwrap_or(today);
                NearEarthObject {
                    id: id.to_string(),
                    reference_id: id.to_string(),
                    name: name.to_string(),
                    absolute_magnitude: magnitude,
                    estimated_diameter: diameter,
                    is_potentially_hazardous: hazardous,
                    close_approach: day.and_time(noon),
                    relative_velocity: velocity,
                    miss_distance: miss,
                    orbiting_body: "Earth".to_string(),
                    normalized_diameter: normalized[0],
                    normalized_relative_velocity: normalized[1],
                    normalized_miss_distance: normalized[2],
                }
            },
        )
        .collect()
}
