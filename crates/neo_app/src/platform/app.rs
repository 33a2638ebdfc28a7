use std::sync::Arc;

use anyhow::Context;
use chrono::Local;
use neo_engine::{DelayedNeoService, NeoService, ReqwestNeoService};
use neo_logging::{neo_info, neo_warn};

use super::logging;
use super::object_list::ObjectListScreen;
use super::render::render;
use super::settings;

pub async fn run_app() -> anyhow::Result<()> {
    let settings = settings::load_from_env().context("loading settings")?;
    logging::initialize(
        settings.log_destination,
        logging::parse_level(&settings.log_level),
    );
    neo_info!(
        "Starting neo_app (mock={}, refreshes={})",
        settings.use_mock_service,
        settings.refresh_count
    );

    let service: Arc<dyn NeoService> = if settings.use_mock_service {
        Arc::new(DelayedNeoService::demo(Local::now().date_naive()))
    } else {
        let service =
            ReqwestNeoService::new(settings.feed_settings()).context("building feed client")?;
        neo_info!(
            "Fetching feed from {} ({} day window)",
            service.settings().base_url,
            service.settings().window_days
        );
        Arc::new(service)
    };

    let screen = ObjectListScreen::new(service, settings.minimum_empty_load_time(), || {
        Local::now().date_naive()
    });

    let mut stream = screen.subscribe();
    let renderer = tokio::spawn(async move {
        while let Some(state) = stream.next().await {
            for line in render(&state) {
                println!("{line}");
            }
            println!();
        }
    });

    screen.appeared().await;
    for _ in 0..settings.refresh_count {
        screen.refresh().await;
    }
    if let Some(ui) = screen.banner_error() {
        neo_warn!("Last refresh failed: {}", ui.message);
    }

    // Dropping the screen closes the state stream and lets the renderer finish.
    drop(screen);
    renderer.await.context("renderer task")?;
    Ok(())
}
