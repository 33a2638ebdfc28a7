use std::error::Error;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Symbol {
    ExclamationmarkTriangle,
    WifiSlash,
}

impl Symbol {
    /// Short glyph used by text renderers.
    pub fn glyph(self) -> &'static str {
        match self {
            Symbol::ExclamationmarkTriangle => "/!\\",
            Symbol::WifiSlash => "(x)",
        }
    }
}

/// An error message meant to be shown to the user.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct UiError {
    pub symbol: Symbol,
    pub title: String,
    pub message: String,
}

impl UiError {
    pub const DEFAULT_TITLE: &'static str = "ERROR";

    pub fn new(symbol: Symbol, message: impl Into<String>) -> Self {
        Self {
            symbol,
            title: Self::DEFAULT_TITLE.to_string(),
            message: message.into(),
        }
    }

    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = title.into();
        self
    }

    /// Fallback used when an error has nothing more specific to say.
    pub fn generic() -> Self {
        Self::new(
            Symbol::ExclamationmarkTriangle,
            "Something went wrong, please try again.",
        )
    }
}

impl Default for UiError {
    fn default() -> Self {
        Self::generic()
    }
}

/// Errors that know how to present themselves in the UI.
pub trait AppError: Error {
    fn ui_error(&self) -> UiError;
}
