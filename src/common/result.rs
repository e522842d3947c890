use crate::common::error::WtsrcError;

/// Result alias used across the crate.
pub type WtsrcResult<T> = Result<T, WtsrcError>;

/// Conversion helpers from `Option` into [`WtsrcResult`].
pub trait OptionExt<T> {
    /// Turns `None` into the given error.
    fn ok_or_wtsrc(self, error: WtsrcError) -> WtsrcResult<T>;
}

impl<T> OptionExt<T> for Option<T> {
    fn ok_or_wtsrc(self, error: WtsrcError) -> WtsrcResult<T> {
        self.ok_or(error)
    }
}

/// Conversion helpers from foreign `Result`s into [`WtsrcResult`].
pub trait ResultExt<T, E> {
    /// Wraps an I/O failure with a message and the path it concerns.
    fn with_filesystem_error(
        self,
        message: impl Into<String>,
        path: Option<std::path::PathBuf>,
    ) -> WtsrcResult<T>
    where
        E: Into<std::io::Error>;
}

impl<T, E> ResultExt<T, E> for Result<T, E> {
    fn with_filesystem_error(
        self,
        message: impl Into<String>,
        path: Option<std::path::PathBuf>,
    ) -> WtsrcResult<T>
    where
        E: Into<std::io::Error>,
    {
        self.map_err(|e| WtsrcError::filesystem_error_with_source(message, path, e.into()))
    }
}
