//! Storage layer for splitr
//!
//! The only state persisted between runs is the OAuth token, written with
//! atomic JSON writes.

pub mod file_io;
pub mod tokens;

pub use file_io::{read_json_optional, write_json_atomic, write_private_json_atomic};
pub use tokens::{FileTokenStore, MemoryTokenStore, TokenStore};
