//! Configuration file support.
//!
//! Settings live in an INI file at `<config dir>/geogate/config.ini`:
//!
//! ```ini
//! [detection]
//! timeout_ms = 5000
//! primary_url = https://ipapi.co
//!
//! [cache]
//! ttl_secs = 3600
//!
//! [deployment]
//! region = international
//!
//! [relational]
//! url = https://project.example.co
//! anon_key = ...
//! ```
//!
//! [`ConfigFile`] maps the file onto the runtime configuration structs used by
//! the rest of the crate.

mod file;
mod keys;

pub use file::{config_file_path, CacheSettings, ConfigError, ConfigFile, DetectionSettings};
pub use keys::ConfigKey;
