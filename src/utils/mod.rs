//! Utility modules: build info, on-disk paths, logging.

pub mod build_info;
pub mod logging;
pub mod persistence;
