use std::path::Path;

/// Longest original name accepted; the stored name adds a 33 byte prefix
/// and most filesystems cap a path component at 255 bytes.
pub const MAX_ORIGINAL_NAME_LEN: usize = 222;

/// Reasons an uploaded file's original name cannot be used as a path component
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum OriginalNameError {
    Empty,
    TooLong,
    ContainsNullByte,
    ContainsPathSeparator,
    IsSpecialDirectory,
    NotAFileName,
}

impl OriginalNameError {
    pub fn message(&self) -> &'static str {
        match self {
            OriginalNameError::Empty => "File name cannot be empty",
            OriginalNameError::TooLong => "File name is too long",
            OriginalNameError::ContainsNullByte => "File name cannot contain null bytes",
            OriginalNameError::ContainsPathSeparator => {
                "File name cannot contain path separators (/ or \\)"
            }
            OriginalNameError::IsSpecialDirectory => "File name cannot be '.' or '..'",
            OriginalNameError::NotAFileName => "File name must be a plain file name",
        }
    }
}

impl std::fmt::Display for OriginalNameError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.message())
    }
}

impl std::error::Error for OriginalNameError {}

/// Check that a caller-supplied file name can be appended to a random token
/// and used as a single path component inside the upload directory.
///
/// The name is otherwise kept as-is: no case folding, no character
/// replacement, no extension checks.
pub fn validate_original_name(name: &str) -> Result<(), OriginalNameError> {
    if name.is_empty() {
        return Err(OriginalNameError::Empty);
    }

    if name.len() > MAX_ORIGINAL_NAME_LEN {
        return Err(OriginalNameError::TooLong);
    }

    if name.contains('\0') {
        return Err(OriginalNameError::ContainsNullByte);
    }

    if name.contains('/') || name.contains('\\') {
        return Err(OriginalNameError::ContainsPathSeparator);
    }

    if name == "." || name == ".." {
        return Err(OriginalNameError::IsSpecialDirectory);
    }

    // Path::file_name normalises some inputs; it must round-trip unchanged
    if Path::new(name).file_name().and_then(|n| n.to_str()) != Some(name) {
        return Err(OriginalNameError::NotAFileName);
    }

    Ok(())
}
