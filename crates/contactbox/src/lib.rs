//! `contactbox` - local contact-form capture and listing
//!
//! Submitted forms are appended to a record list kept under one key of a
//! local key-value store. The listing loads that list once and filters,
//! sorts and renders it on demand.

#![warn(missing_docs)]
#![warn(missing_debug_implementations)]
#![deny(unsafe_code)]

pub mod cli;
pub mod collate;
pub mod config;
pub mod error;
pub mod escape;
pub mod form;
pub mod listing;
pub mod logging;
pub mod record;
pub mod render;
pub mod storage;
pub mod store;

pub use config::Config;
pub use error::{Error, Result};
pub use escape::escape;
pub use form::{Confirmation, Form, SubmissionHandler, SubmissionState};
pub use listing::{recompute, ListingView, SortMode};
pub use logging::init_logging;
pub use record::Record;
pub use render::{render_json, render_list, render_plain};
pub use storage::{SlotInfo, Storage};
pub use store::RecordStore;
