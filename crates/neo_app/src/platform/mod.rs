mod app;
mod logging;
mod object_list;
mod render;
mod settings;

pub use app::run_app;
