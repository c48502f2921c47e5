//! Core modules for TONSign

pub mod catalog;
pub mod resolver;
pub mod predictor;
pub mod session;
pub mod log_source;
pub mod osc;
pub mod i18n;
pub mod logging;
pub mod watcher;
pub mod api;

pub use catalog::{RoundCatalog, DEFAULT_CATALOG_YAML};
pub use resolver::{resolve_and_append, resolve_exempt};
pub use predictor::{is_alternating, predict_next, Prediction};
pub use session::{Session, LineResult, BatchResult};
pub use log_source::{LogTail, find_latest_log, read_lines, default_log_dir};
pub use osc::{OscSink, encode_bool_message};
pub use i18n::Localizer;
pub use logging::{init_logging, rotate_latest_log};
pub use watcher::{Watcher, Reporter, OutputMode};
pub use api::{StatusBoard, StatusSnapshot, create_router, run_server};
