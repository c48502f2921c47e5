//! Core types for TONSign

mod round;
mod history;
mod event;
mod output;
mod error;

pub use round::{RoundKind, Bucket};
pub use history::History;
pub use event::EngineEvent;
pub use output::PredictionOutput;
pub use error::{CatalogError, LocaleError, SourceError, SinkError, LoggingError};
