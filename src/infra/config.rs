//! Centralized configuration (environment variables + defaults).

use std::path::PathBuf;

/// Global catalog file: the master list of importable books.
pub fn global_library_path() -> PathBuf {
    std::env::var("GLOBAL_LIBRARY_PATH")
        .unwrap_or_else(|_| "data.json".to_string())
        .into()
}

/// User catalog file: the reading list.
pub fn user_library_path() -> PathBuf {
    std::env::var("USER_LIBRARY_PATH")
        .unwrap_or_else(|_| "user_library/user_library.json".to_string())
        .into()
}

/// Listen address for the API server.
pub fn bind_addr() -> String {
    std::env::var("BIND_ADDR").unwrap_or_else(|_| "0.0.0.0:5000".to_string())
}
