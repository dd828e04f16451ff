//! # Daybook Core Library
//!
//! This library provides the business rules of the Daybook personal event
//! planner. Presentation layers (the CLI, or any GUI) stay thin and call
//! into the same core.
//!
//! ## Architecture
//!
//! - **Store**: events grouped by local calendar day, with no two events of
//!   the same day overlapping in time
//! - **Filter**: case-insensitive keyword narrowing of a day or month
//! - **Export**: month slices rendered as JSON or CSV text
//! - **Persistence**: snapshot load/save behind an adapter trait
//!
//! ## Key Components
//!
//! - [`EventStore`]: Day-keyed event storage with overlap enforcement
//! - [`Planner`]: Store plus persistence, saving after each mutation
//! - [`TimeInterval`]: Half-open time-of-day range
//! - [`Config`]: Application configuration management

pub mod date_key;
pub mod error;
pub mod event;
pub mod export;
pub mod filter;
pub mod interval;
pub mod persistence;
pub mod planner;
pub mod storage;
pub mod store;

pub use date_key::{DateKey, MonthKey};
pub use error::{ConfigError, CoreError, PersistenceError, Result, ValidationError};
pub use event::{Category, EventData, EventId, EventRecord};
pub use export::{Export, ExportFormat};
pub use filter::KeywordFilter;
pub use interval::TimeInterval;
pub use persistence::{JsonFileAdapter, MemoryAdapter, PersistenceAdapter, Snapshot};
pub use planner::{Committed, Planner};
pub use storage::{data_dir, Config};
pub use store::{EventStore, MonthSlice};
