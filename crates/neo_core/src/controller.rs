use std::future::Future;
use std::sync::Arc;
use std::time::Duration;

use futures_util::future::{BoxFuture, FutureExt};
use neo_logging::{neo_debug, neo_error, neo_trace};

use crate::{LoadState, StatePublisher, StateStream};

type LoadFn<V, E> = Arc<dyn Fn() -> BoxFuture<'static, Result<V, E>> + Send + Sync>;

/// Drives one asynchronous producer of `V` through the empty, loading and
/// loaded states.
///
/// Errors from the load function never escape [`LoadController::load`]; they
/// are only observable through the published [`LoadState`].
///
/// A started load runs on its own tokio task. Dropping the future returned by
/// `load` does not cancel it, and the load still publishes its outcome.
pub struct LoadController<V, E> {
    minimum_empty_load_time: Duration,
    load_function: LoadFn<V, E>,
    publisher: Arc<StatePublisher<LoadState<V, E>>>,
}

impl<V, E> LoadController<V, E>
where
    V: Clone + Send + 'static,
    E: Clone + Send + 'static,
{
    pub fn new<F, Fut>(load_function: F) -> Self
    where
        F: Fn() -> Fut + Send + Sync + 'static,
        Fut: Future<Output = Result<V, E>> + Send + 'static,
    {
        Self::with_minimum_empty_load_time(Duration::ZERO, load_function)
    }

    /// `minimum_empty_load_time` is the shortest a load may take while the
    /// state is `Empty`. Reloads of existing values are not held back.
    pub fn with_minimum_empty_load_time<F, Fut>(
        minimum_empty_load_time: Duration,
        load_function: F,
    ) -> Self
    where
        F: Fn() -> Fut + Send + Sync + 'static,
        Fut: Future<Output = Result<V, E>> + Send + 'static,
    {
        Self {
            minimum_empty_load_time,
            load_function: Arc::new(move || load_function().boxed()),
            publisher: Arc::new(StatePublisher::new(LoadState::Empty(None))),
        }
    }

    pub fn minimum_empty_load_time(&self) -> Duration {
        self.minimum_empty_load_time
    }

    /// Snapshot of the current state.
    pub fn state(&self) -> LoadState<V, E> {
        self.publisher.current()
    }

    /// Subscribes to the current state and every later transition.
    pub fn subscribe(&self) -> StateStream<LoadState<V, E>> {
        self.publisher.subscribe()
    }

    /// Calls the load function and publishes the outcome.
    ///
    /// Does nothing while a load is already in flight.
    pub async fn load(&self) {
        let mut previous = None;
        let mut was_empty = false;
        let started = self.publisher.publish_if(|current| {
            if current.is_loading() {
                return None;
            }
            was_empty = current.is_empty();
            previous = current.value().cloned();
            Some(LoadState::Loading(previous.clone()))
        });
        if !started {
            neo_trace!("load skipped, already loading");
            return;
        }

        let floor = if was_empty {
            self.minimum_empty_load_time
        } else {
            Duration::ZERO
        };
        neo_debug!("load started (cold={}, floor={:?})", was_empty, floor);

        let load_function = Arc::clone(&self.load_function);
        let publisher = Arc::clone(&self.publisher);
        let settle = tokio::spawn(async move {
            let (result, ()) = tokio::join!(load_function(), hold_for(floor));
            let next = match result {
                Ok(value) => LoadState::Loaded(value, None),
                Err(error) => match previous {
                    Some(value) => LoadState::Loaded(value, Some(error)),
                    None => LoadState::Empty(Some(error)),
                },
            };
            neo_debug!("load settled: {}", next.label());
            publisher.publish(next);
        });

        if let Err(err) = settle.await {
            // The load function panicked; leave `Loading` so later loads can run.
            neo_error!("load task failed: {}", err);
            self.publisher.publish_if(|current| {
                current.is_loading().then(|| match current.value() {
                    Some(value) => LoadState::Loaded(value.clone(), None),
                    None => LoadState::Empty(None),
                })
            });
        }
    }
}

async fn hold_for(interval: Duration) {
    if !interval.is_zero() {
        tokio::time::sleep(interval).await;
    }
}
