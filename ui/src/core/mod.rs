//! Platform glue shared by every view: formatting, persistence, timers and
//! the browser event bridge.

pub mod browser;
pub mod format;
pub mod platform;
pub mod storage;
pub mod timing;
