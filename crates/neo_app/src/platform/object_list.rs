use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::Duration;

use chrono::NaiveDate;
use neo_core::{LoadController, LoadState, StateStream, UiError};
use neo_engine::{group_into_sections, object_count_text, ApiError, NeoService, Section};
use neo_logging::neo_debug;

pub type SectionsState = LoadState<Vec<Section>, ApiError>;

/// The list of objects approaching this week, grouped by day.
pub struct ObjectListScreen {
    controller: LoadController<Vec<Section>, ApiError>,
    has_appeared: AtomicBool,
}

impl ObjectListScreen {
    /// `today` is asked for the window start on every load.
    pub fn new<F>(service: Arc<dyn NeoService>, minimum_empty_load_time: Duration, today: F) -> Self
    where
        F: Fn() -> NaiveDate + Send + Sync + 'static,
    {
        let controller = LoadController::with_minimum_empty_load_time(
            minimum_empty_load_time,
            move || {
                let service = service.clone();
                let start = today();
                async move { service.fetch(start).await.map(group_into_sections) }
            },
        );
        neo_debug!(
            "Object list ready, first load takes at least {:?}",
            controller.minimum_empty_load_time()
        );
        Self {
            controller,
            has_appeared: AtomicBool::new(false),
        }
    }

    /// Loads on the first appearance only.
    pub async fn appeared(&self) {
        if self.has_appeared.swap(true, Ordering::SeqCst) {
            return;
        }
        self.controller.load().await;
    }

    pub async fn refresh(&self) {
        self.controller.load().await;
    }

    pub fn subscribe(&self) -> StateStream<SectionsState> {
        self.controller.subscribe()
    }

    pub fn state(&self) -> SectionsState {
        self.controller.state()
    }

    /// Error to show as a banner over data that is still on screen.
    pub fn banner_error(&self) -> Option<UiError> {
        self.state().loaded_ui_error()
    }

    pub fn object_count_text(&self) -> Option<String> {
        self.state()
            .value()
            .map(|sections| object_count_text(sections))
    }
}
