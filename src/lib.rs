#![doc(test(attr(deny(warnings))))]

//! Finance Core keeps a personal income/expense ledger: CRUD over transactions,
//! filtered queries, monthly and per-category rollups, goal tracking, and JSON/CSV
//! exchange, persisted through a pluggable single-blob storage backend.

pub mod cli;
pub mod config;
pub mod currency;
pub mod errors;
pub mod ledger;
pub mod storage;
pub mod utils;
