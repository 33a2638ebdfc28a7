use neo_core::UiError;
use neo_engine::{object_count_text, NearEarthObject, Risk, Section, Size};

use super::object_list::SectionsState;

/// Renders one published state as terminal lines.
pub fn render(state: &SectionsState) -> Vec<String> {
    match state {
        SectionsState::Empty(None) => vec!["Nothing loaded yet.".to_string()],
        SectionsState::Empty(Some(_)) => {
            let ui = state.ui_error().unwrap_or_default();
            vec![error_line(&ui), "Pull to refresh to try again.".to_string()]
        }
        SectionsState::Loading(None) => vec!["Scanning the skies...".to_string()],
        SectionsState::Loading(Some(sections)) => {
            let mut lines = vec!["Refreshing...".to_string()];
            lines.extend(render_sections(sections));
            lines
        }
        SectionsState::Loaded(sections, _) => {
            let mut lines = Vec::new();
            if let Some(ui) = state.loaded_ui_error() {
                lines.push(format!("[banner] {}", error_line(&ui)));
            }
            lines.extend(render_sections(sections));
            lines
        }
    }
}

fn error_line(ui: &UiError) -> String {
    format!("{} {}: {}", ui.symbol.glyph(), ui.title, ui.message)
}

fn render_sections(sections: &[Section]) -> Vec<String> {
    let mut lines = vec![object_count_text(sections)];
    for section in sections {
        lines.push(section.date_text.clone());
        lines.extend(section.objects.iter().map(render_row));
    }
    lines
}

fn render_row(object: &NearEarthObject) -> String {
    let hazard = if object.is_potentially_hazardous {
        " HAZARDOUS"
    } else {
        ""
    };
    format!(
        "  {:<20} {:<6} {:<6} {:>12.0} km{}",
        object.name,
        size_label(object.size()),
        risk_label(object.risk()),
        object.miss_distance,
        hazard
    )
}

fn size_label(size: Size) -> &'static str {
    match size {
        Size::Small => "small",
        Size::Medium => "medium",
        Size::Large => "large",
    }
}

fn risk_label(risk: Risk) -> &'static str {
    match risk {
        Risk::Low => "low",
        Risk::Medium => "medium",
        Risk::High => "HIGH",
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use neo_engine::{group_into_sections, sample_objects, ApiError};

    fn sections() -> Vec<Section> {
        let today = NaiveDate::from_ymd_opt(2025, 1, 1).unwrap();
        group_into_sections(sample_objects(today))
    }

    #[test]
    fn cold_failure_shows_error_view() {
        let lines = render(&SectionsState::Empty(Some(ApiError::Offline)));
        assert_eq!(
            lines[0],
            "(x) Offline: Try again when your device is online."
        );
    }

    #[test]
    fn failed_refresh_shows_banner_above_data() {
        let sections = sections();
        let lines = render(&SectionsState::Loaded(
            sections.clone(),
            Some(ApiError::Unauthorized),
        ));

        assert!(lines[0].starts_with("[banner] /!\\ ERROR"));
        assert_eq!(lines[1], "THERE ARE 10 OBJECTS APPROACHING");
        assert_eq!(lines[2], sections[0].date_text);
    }

    #[test]
    fn rows_include_hazard_marker() {
        let lines = render(&SectionsState::Loaded(sections(), None));
        let hazardous: Vec<_> = lines.iter().filter(|l| l.ends_with("HAZARDOUS")).collect();
        assert_eq!(hazardous.len(), 1);
        assert!(hazardous[0].contains("(2015 CB)"));
    }

    #[test]
    fn refresh_keeps_previous_rows_visible() {
        let lines = render(&SectionsState::Loading(Some(sections())));
        assert_eq!(lines[0], "Refreshing...");
        assert!(lines.len() > 10);
    }
}
