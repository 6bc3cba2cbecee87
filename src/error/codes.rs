/// Error code registry for the recipe allocator
///
/// Error codes are organized by category:
/// - 1000-1999: Configuration errors
/// - 3000-3999: Storage (file access) errors
/// - 7000-7999: Input validation errors
pub struct ErrorCode;

impl ErrorCode {
    // Configuration errors (1000-1999)
    pub const CONFIG_GENERIC: u16 = 1000;
    pub const CONFIG_NOT_FOUND: u16 = 1001;
    pub const CONFIG_INVALID_TOML: u16 = 1002;
    pub const CONFIG_INVALID_VALUE: u16 = 1005;

    // Storage errors (3000-3999)
    pub const STORAGE_IO_ERROR: u16 = 3001;
    pub const STORAGE_PERMISSION_DENIED: u16 = 3002;
    pub const STORAGE_NOT_FOUND: u16 = 3004;

    // Input validation errors (7000-7999)
    pub const VALIDATION_INVALID_TYPE: u16 = 7002;
    pub const VALIDATION_OUT_OF_RANGE: u16 = 7003;
    pub const VALIDATION_INVALID_FORMAT: u16 = 7005;
    pub const VALIDATION_DUPLICATE_VALUE: u16 = 7007;
    pub const VALIDATION_INVALID_DATA: u16 = 7009;
    pub const VALIDATION_UNKNOWN_LABEL: u16 = 7010;
    pub const VALIDATION_MISSING_CATEGORY: u16 = 7011;
    pub const VALIDATION_AXIS_MISMATCH: u16 = 7012;
    pub const VALIDATION_UNKNOWN_BOX_TYPE: u16 = 7013;
}

/// Get a human-readable description for an error code
pub fn describe_error_code(code: u16) -> &'static str {
    match code {
        // Configuration errors
        1000 => "Generic configuration error",
        1001 => "Configuration file not found",
        1002 => "Invalid TOML syntax in configuration",
        1005 => "Invalid value in configuration",

        // Storage errors
        3001 => "Storage I/O error",
        3002 => "Storage permission denied",
        3004 => "Input file not found",

        // Validation errors
        7002 => "Invalid data type",
        7003 => "Value out of allowed range",
        7005 => "Malformed input document",
        7007 => "Duplicate value not allowed",
        7009 => "Invalid data",
        7010 => "Label is not in the known vocabulary",
        7011 => "Order category is missing",
        7012 => "Order axes differ between categories or rows",
        7013 => "Unknown box type on stock entry",

        _ => "Unknown error code",
    }
}
