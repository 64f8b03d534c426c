//! Query, filter and acknowledgement logic over the record store.

pub mod evidence;
pub mod labs;
pub mod orders;
pub mod service;
pub mod summary;

pub use service::{QueryOptions, RecordService};
