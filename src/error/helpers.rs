use super::IntakeError;
use std::path::Path;

/// Extension trait for convenient error conversion
pub trait ErrorExt<T> {
    /// Convert to an uncategorised IntakeError with a specific code
    fn to_other_error(self, code: u16, message: impl Into<String>) -> Result<T, IntakeError>;

    fn to_config_error(self, code: u16, message: impl Into<String>) -> Result<T, IntakeError>;

    /// Convert to an input error tied to the file being loaded
    fn to_input_error(
        self,
        code: u16,
        message: impl Into<String>,
        path: &Path,
    ) -> Result<T, IntakeError>;
}

impl<T, E> ErrorExt<T> for Result<T, E>
where
    E: Into<Box<dyn std::error::Error + Send + Sync>>,
{
    fn to_other_error(self, code: u16, message: impl Into<String>) -> Result<T, IntakeError> {
        self.map_err(|e| {
            IntakeError::Other {
                code,
                message: message.into(),
                source: None,
            }
            .with_source(e)
        })
    }

    fn to_config_error(self, code: u16, message: impl Into<String>) -> Result<T, IntakeError> {
        self.map_err(|e| IntakeError::config_with_code(code, message).with_source(e))
    }

    fn to_input_error(
        self,
        code: u16,
        message: impl Into<String>,
        path: &Path,
    ) -> Result<T, IntakeError> {
        self.map_err(|e| {
            IntakeError::input_with_code(code, message, Some(path.to_path_buf())).with_source(e)
        })
    }
}
