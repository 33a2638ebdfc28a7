use std::collections::BTreeMap;

use chrono::NaiveDate;

use crate::NearEarthObject;

/// Objects whose close approach falls on the same calendar day.
#[derive(Debug, Clone, PartialEq)]
pub struct Section {
    pub date: NaiveDate,
    pub date_text: String,
    pub objects: Vec<NearEarthObject>,
}

/// Groups objects by approach day, earliest day first. Objects keep their
/// input order within a day.
pub fn group_into_sections(objects: Vec<NearEarthObject>) -> Vec<Section> {
    let mut by_day: BTreeMap<NaiveDate, Vec<NearEarthObject>> = BTreeMap::new();
    for object in objects {
        by_day
            .entry(object.close_approach.date())
            .or_default()
            .push(object);
    }

    by_day
        .into_iter()
        .map(|(date, objects)| Section {
            date,
            date_text: stardate_text(date),
            objects,
        })
        .collect()
}

/// `STARDATE 2025.032 (Feb 01)`
pub fn stardate_text(date: NaiveDate) -> String {
    format!(
        "STARDATE {} ({})",
        date.format("%Y.%j"),
        date.format("%b %d")
    )
}

pub fn object_count_text(sections: &[Section]) -> String {
    let count: usize = sections.iter().map(|section| section.objects.len()).sum();
    let plural = if count == 1 { "" } else { "S" };
    format!("THERE ARE {count} OBJECT{plural} APPROACHING")
}
