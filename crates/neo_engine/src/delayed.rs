use std::collections::VecDeque;
use std::sync::{Mutex, PoisonError};
use std::time::Duration;

use chrono::NaiveDate;
use neo_logging::neo_debug;

use crate::{sample_objects, ApiError, NearEarthObject, NeoService};

/// One canned outcome, returned after its delay.
#[derive(Debug, Clone)]
pub enum DelayedValue<V, E> {
    Value(V, Duration),
    Error(E, Duration),
}

impl<V, E> DelayedValue<V, E> {
    pub fn delay(&self) -> Duration {
        match self {
            DelayedValue::Value(_, delay) | DelayedValue::Error(_, delay) => *delay,
        }
    }

    fn into_result(self) -> Result<V, E> {
        match self {
            DelayedValue::Value(value, _) => Ok(value),
            DelayedValue::Error(error, _) => Err(error),
        }
    }
}

/// Replays canned outcomes in order. The last outcome repeats forever.
#[derive(Debug)]
pub struct DelayedValues<V, E> {
    values: Mutex<VecDeque<DelayedValue<V, E>>>,
}

impl<V: Clone, E: Clone> DelayedValues<V, E> {
    pub fn new(values: Vec<DelayedValue<V, E>>) -> Self {
        Self {
            values: Mutex::new(values.into()),
        }
    }

    /// Waits for the next outcome's delay and returns it, or `None` when
    /// nothing was configured.
    pub async fn next(&self) -> Option<Result<V, E>> {
        let next = {
            let mut values = self.values.lock().unwrap_or_else(PoisonError::into_inner);
            if values.len() > 1 {
                values.pop_front()
            } else {
                values.front().cloned()
            }
        }?;
        tokio::time::sleep(next.delay()).await;
        Some(next.into_result())
    }
}

/// [`NeoService`] backed by canned responses, for demos and tests.
#[derive(Debug)]
pub struct DelayedNeoService {
    values: DelayedValues<Vec<NearEarthObject>, ApiError>,
}

impl DelayedNeoService {
    pub fn new(values: DelayedValues<Vec<NearEarthObject>, ApiError>) -> Self {
        Self { values }
    }

    /// A failing first response followed by two sets of sample objects.
    pub fn demo(today: NaiveDate) -> Self {
        let all = sample_objects(today);
        let subset: Vec<_> = all.iter().step_by(2).cloned().collect();
        Self::new(DelayedValues::new(vec![
            DelayedValue::Error(
                ApiError::Unexpected("canned failure".to_string()),
                Duration::from_secs(5),
            ),
            DelayedValue::Value(all, Duration::from_secs(1)),
            DelayedValue::Value(subset, Duration::from_secs(3)),
        ]))
    }
}

#[async_trait::async_trait]
impl NeoService for DelayedNeoService {
    async fn fetch(&self, start_date: NaiveDate) -> Result<Vec<NearEarthObject>, ApiError> {
        neo_debug!("Serving canned feed for {}", start_date);
        self.values
            .next()
            .await
            .unwrap_or_else(|| Err(ApiError::Unexpected("no canned responses".to_string())))
    }
}
