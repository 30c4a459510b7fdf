// Library root: re-exports all modules so integration tests and the binaries
// can access the crate's public API.

pub mod app;
pub mod config;
pub mod db;
pub mod draft;
pub mod fantasy;
pub mod protocol;
pub mod proxy;
pub mod render;
pub mod source;
