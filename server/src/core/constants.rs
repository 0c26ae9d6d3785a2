// =============================================================================
// Application Identity
// =============================================================================

/// Application name in title case (for display)
pub const APP_NAME: &str = "Stockroom";

/// Application name in lowercase (for paths and identifiers)
pub const APP_NAME_LOWER: &str = "stockroom";

/// Unix-style dotfile folder name
pub const APP_DOT_FOLDER: &str = ".stockroom";

// =============================================================================
// Configuration Files
// =============================================================================

/// Config file name
pub const CONFIG_FILE_NAME: &str = "stockroom.json";

/// Environment variable for config file path
pub const ENV_CONFIG: &str = "STOCKROOM_CONFIG";

// =============================================================================
// Environment Variables - Debug
// =============================================================================

/// Environment variable for debug mode
pub const ENV_DEBUG: &str = "STOCKROOM_DEBUG";

// =============================================================================
// Environment Variables - Server
// =============================================================================

/// Environment variable for server host
pub const ENV_HOST: &str = "STOCKROOM_HOST";

/// Environment variable for server port
pub const ENV_PORT: &str = "STOCKROOM_PORT";

/// Environment variable for log level/filter
pub const ENV_LOG: &str = "STOCKROOM_LOG";

// =============================================================================
// Server Defaults
// =============================================================================

/// Default server host
pub const DEFAULT_HOST: &str = "127.0.0.1";

/// Default server port
pub const DEFAULT_PORT: u16 = 5390;

/// Default request body limit (the API is read-only)
pub const DEFAULT_BODY_LIMIT: usize = 64 * 1024;

// =============================================================================
// Environment Variables - Inventory
// =============================================================================

/// Environment variable for the inventory snapshot file
pub const ENV_DATA_FILE: &str = "STOCKROOM_DATA_FILE";

/// Default inventory snapshot file (relative to the working directory)
pub const DEFAULT_DATA_FILE: &str = "inventory.json";
