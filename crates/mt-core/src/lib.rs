//! Core domain logic for meet duration estimation.
//!
//! This crate contains:
//! - Time tokens: parsing `M:SS.hh` / `SS.hh` and extracting them from text
//! - Segmentation: turning heat sheet lines into events and heats
//! - Adaptation: turning structured heat listings into the same model
//! - Estimation: summing slowest heat times, heat gaps and event transitions
//!
//! Nothing here performs I/O; callers hand over text or parsed data.

pub mod adapter;
pub mod athletic;
mod error;
pub mod estimate;
pub mod model;
pub mod report;
pub mod segment;
pub mod time;

pub use adapter::{StructuredEvent, adapt, adapt_event};
pub use athletic::{EventListing, HeatListDocument};
pub use error::{ConfigError, ModelError, SegmentError, TimeTokenError};
pub use estimate::{EstimateConfig, EventEstimate, MeetEstimate, estimate, estimate_duration};
pub use model::{Event, EventKind, Heat, ScheduleModel};
pub use report::{DurationBreakdown, format_report};
pub use segment::{Segmenter, Transition, segment, segment_text};
pub use time::{TimeValue, extract_times, parse_time_token};
