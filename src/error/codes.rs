/// Error code registry for clinic-intake
///
/// Error codes are organized by category:
/// - 1000-1999: Configuration errors
/// - 2000-2999: Input loading errors
/// - 3000-3999: Malformed record errors
/// - 9000-9999: Other errors
///
/// Validation violations are data, not errors, and carry no code here.
pub struct ErrorCode;

impl ErrorCode {
    // Configuration errors (1000-1999)
    pub const CONFIG_GENERIC: u16 = 1000;
    pub const CONFIG_NOT_FOUND: u16 = 1001;
    pub const CONFIG_INVALID_YAML: u16 = 1002;
    pub const CONFIG_INVALID_VALUE: u16 = 1005;
    pub const CONFIG_VALIDATION_FAILED: u16 = 1008;

    // Input loading errors (2000-2999)
    pub const INPUT_GENERIC: u16 = 2000;
    pub const INPUT_NOT_FOUND: u16 = 2001;
    pub const INPUT_READ_FAILED: u16 = 2002;
    pub const INPUT_INVALID_JSON: u16 = 2003;
    pub const INPUT_INVALID_YAML: u16 = 2004;
    pub const INPUT_INVALID_DATE: u16 = 2005;

    // Malformed record errors (3000-3999)
    pub const RECORD_NOT_AN_OBJECT: u16 = 3001;

    // Other errors (9000-9999)
    pub const OTHER_GENERIC: u16 = 9000;
    pub const OTHER_SERIALIZATION: u16 = 9001;
}

/// Get a human-readable description for an error code
pub fn describe_error_code(code: u16) -> &'static str {
    match code {
        1000 => "Generic configuration error",
        1001 => "Configuration file not found",
        1002 => "Invalid YAML syntax in configuration",
        1005 => "Invalid value in configuration",
        1008 => "Configuration validation failed",

        2000 => "Generic input error",
        2001 => "Input file not found",
        2002 => "Failed to read input file",
        2003 => "Invalid JSON in input file",
        2004 => "Invalid YAML in input file",
        2005 => "Invalid evaluation date",

        3001 => "Patient record is not an object",

        9000 => "Generic error",
        9001 => "Failed to serialize output",

        _ => "Unknown error code",
    }
}
