use crate::{AppError, UiError};

/// Lifecycle of a value produced by an asynchronous load.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LoadState<V, E> {
    /// No value exists, either because nothing was loaded yet or the last load failed.
    Empty(Option<E>),
    /// A load is in flight; carries the previously available value, if any.
    Loading(Option<V>),
    /// A value is available; carries the error of a later failed reload, if any.
    Loaded(V, Option<E>),
}

impl<V, E> Default for LoadState<V, E> {
    fn default() -> Self {
        LoadState::Empty(None)
    }
}

impl<V, E> LoadState<V, E> {
    pub fn is_empty(&self) -> bool {
        matches!(self, LoadState::Empty(_))
    }

    pub fn is_loading(&self) -> bool {
        matches!(self, LoadState::Loading(_))
    }

    pub fn is_loaded(&self) -> bool {
        matches!(self, LoadState::Loaded(..))
    }

    /// True only for `Empty` carrying an error.
    pub fn is_error(&self) -> bool {
        matches!(self, LoadState::Empty(Some(_)))
    }

    /// Any value held by the state, regardless of phase.
    pub fn value(&self) -> Option<&V> {
        match self {
            LoadState::Empty(_) => None,
            LoadState::Loading(value) => value.as_ref(),
            LoadState::Loaded(value, _) => Some(value),
        }
    }

    /// The error from either the `Empty` or the trailing `Loaded` position.
    pub fn error(&self) -> Option<&E> {
        match self {
            LoadState::Empty(error) | LoadState::Loaded(_, error) => error.as_ref(),
            LoadState::Loading(_) => None,
        }
    }

    pub(crate) fn label(&self) -> &'static str {
        match self {
            LoadState::Empty(None) => "empty",
            LoadState::Empty(Some(_)) => "empty(error)",
            LoadState::Loading(_) => "loading",
            LoadState::Loaded(_, None) => "loaded",
            LoadState::Loaded(_, Some(_)) => "loaded(error)",
        }
    }
}

impl<V, E: AppError> LoadState<V, E> {
    /// UI error for an `Empty` state that failed to load.
    pub fn ui_error(&self) -> Option<UiError> {
        match self {
            LoadState::Empty(Some(error)) => Some(error.ui_error()),
            _ => None,
        }
    }

    /// UI error for a `Loaded` state whose latest reload failed.
    pub fn loaded_ui_error(&self) -> Option<UiError> {
        match self {
            LoadState::Loaded(_, Some(error)) => Some(error.ui_error()),
            _ => None,
        }
    }
}
