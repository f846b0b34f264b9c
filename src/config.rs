use std::path::PathBuf;

/// Application-level constants
pub const APP_NAME: &str = "Clinicore";
pub const APP_VERSION: &str = env!("CARGO_PKG_VERSION");

/// Default tracing filter when RUST_LOG is not set
pub fn default_log_filter() -> String {
    "info,clinicore_lib=debug".to_string()
}

/// Get the application data directory
/// ~/Clinicore/ on all platforms (user-visible, per design requirement)
pub fn app_data_dir() -> PathBuf {
    let home = dirs::home_dir().expect("Cannot determine home directory");
    home.join("Clinicore")
}

/// Get the portal database path
pub fn database_path() -> PathBuf {
    app_data_dir().join("portal.db")
}
