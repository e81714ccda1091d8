use super::{types::RunConfig, ConfigError};

/// Validate configuration shape before any parsing begins.
/// Currently validates:
/// - Extension starts with `.` and names an actual suffix
/// - Destination root is an absolute path
/// - Copy/checksum buffer is non-zero
pub fn validate_config(config: &RunConfig) -> Result<(), ConfigError> {
    if !config.extension.starts_with('.') || config.extension.len() < 2 {
        return Err(ConfigError::ValidationError(format!(
            "extension must start with '.' and name a suffix (got \"{}\")",
            config.extension
        )));
    }

    if !config.destination.is_absolute() {
        return Err(ConfigError::ValidationError(format!(
            "destination must be an absolute path (got \"{}\")",
            config.destination.display()
        )));
    }

    if config.relocate.buffer_size == 0 {
        return Err(ConfigError::ValidationError(
            "relocate.buffer_size cannot be 0".to_string(),
        ));
    }

    Ok(())
}
