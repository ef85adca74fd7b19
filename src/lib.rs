pub mod aggregator;
pub mod apis;
pub mod common;
pub mod config;
pub mod domain;
pub mod ingest;
pub mod logging;
pub mod normalize;
pub mod samples;
pub mod storage;
