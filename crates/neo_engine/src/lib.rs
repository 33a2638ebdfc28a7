//! Neo engine: near-Earth-object feed client, decoding and grouping.
mod delayed;
mod error;
mod feed;
mod samples;
mod sections;
mod service;
mod types;

pub use delayed::{DelayedNeoService, DelayedValue, DelayedValues};
pub use error::ApiError;
pub use feed::{decode_feed, feed_url};
pub use samples::sample_objects;
pub use sections::{group_into_sections, object_count_text, stardate_text, Section};
pub use service::{FeedSettings, NeoService, ReqwestNeoService, DEFAULT_BASE_URL, DEMO_API_KEY};
pub use types::{NearEarthObject, Risk, Size};
