//! Stable error codes for the resolver configuration builder.
//!
//! All codes are SCREAMING_SNAKE_CASE and stable across versions.

/// Neither the config file nor the defaults supply `moduleConfiguration`.
pub const CONFIG_MODULE_CONFIGURATION_MISSING: &str = "CONFIG_MODULE_CONFIGURATION_MISSING";

/// Neither the config file nor the defaults supply `modulePrefix`.
pub const CONFIG_MODULE_PREFIX_MISSING: &str = "CONFIG_MODULE_PREFIX_MISSING";

/// The config file exists but could not be read.
pub const CONFIG_READ_FAILED: &str = "CONFIG_READ_FAILED";

/// The config file is not valid JSON.
pub const CONFIG_PARSE_FAILED: &str = "CONFIG_PARSE_FAILED";

/// A config member is present but has the wrong shape.
pub const CONFIG_INVALID: &str = "CONFIG_INVALID";

/// Builder options are unusable (e.g. config path escapes the input tree).
pub const OPTIONS_INVALID: &str = "OPTIONS_INVALID";

/// The output directory or a generated file could not be written.
pub const OUTPUT_WRITE_FAILED: &str = "OUTPUT_WRITE_FAILED";

/// The resolved configuration could not be serialized.
pub const OUTPUT_SERIALIZE_FAILED: &str = "OUTPUT_SERIALIZE_FAILED";
