//! Implementations that are useful accross the whole project
//!
//! Dataset definition, derived metrics, selection parsing and report dispatch

pub mod catalog;
pub mod dispatch;
pub mod error;
pub mod metrics;
pub mod record;
pub mod select;
