//! Home Online CLI library
//!
//! ストア・設定・擬似遅延・セッションなど I/O を伴う部分

pub mod cli;
pub mod config;
pub mod error;
pub mod export;
pub mod fixtures;
pub mod session;
pub mod simulate;
pub mod store;
pub mod upload;
pub mod validation;
