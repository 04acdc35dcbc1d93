//! Error types for the Valley3D renderer
//!
//! This module defines the error types used throughout the renderer,
//! including initialization, resource assembly, and device failures.

use std::fmt;

/// Result type for Valley3D renderer operations
pub type Result<T> = std::result::Result<T, Error>;

/// Valley3D renderer errors
#[derive(Debug, Clone)]
pub enum Error {
    /// Initialization failed (engine, device, subsystems)
    InitializationFailed(String),

    /// Startup resource failure (shader compile failure, missing texture).
    /// Fatal: scene assembly must abort rather than render a broken frame.
    ResourceFailure(String),

    /// Structurally invalid resource data (mesh, animation clip, material)
    InvalidResource(String),

    /// Backend-specific device error
    BackendError(String),
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Error::InitializationFailed(msg) => write!(f, "Initialization failed: {}", msg),
            Error::ResourceFailure(msg) => write!(f, "Resource failure: {}", msg),
            Error::InvalidResource(msg) => write!(f, "Invalid resource: {}", msg),
            Error::BackendError(msg) => write!(f, "Backend error: {}", msg),
        }
    }
}

impl std::error::Error for Error {}

/// Construct an `Error::InvalidResource`, logging it as an ERROR entry.
///
/// # Example
///
/// ```no_run
/// let err = valley_3d_renderer::engine_err!("valley3d::Scene", "Clip has {} frames", 0);
/// ```
#[macro_export]
macro_rules! engine_err {
    ($source:expr, $($arg:tt)*) => {{
        let message = format!($($arg)*);
        $crate::engine_error!($source, "{}", message);
        $crate::valley3d::Error::InvalidResource(message)
    }};
}

/// Return early with an `Error::InvalidResource`, logging it first.
#[macro_export]
macro_rules! engine_bail {
    ($source:expr, $($arg:tt)*) => {
        return Err($crate::engine_err!($source, $($arg)*))
    };
}

#[cfg(test)]
#[path = "error_tests.rs"]
mod tests;
