// error.rs - start-up failures and config file problems
//
// Nothing in the projection/navigation core can fail. `AppError` covers
// acquiring the window and the drawing surfaces, none of which is
// recoverable. `ConfigError` is always recovered from by falling back to the
// defaults.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum AppError {
    #[error("failed to create window: {0}")]
    Window(#[from] winit::error::OsError),

    #[error("failed to create drawing surface: {0}")]
    Surface(#[from] wgpu::CreateSurfaceError),

    #[error("no compatible GPU adapter found")]
    NoAdapter,

    #[error("adapter cannot present to this window")]
    UnsupportedSurface,

    #[error("failed to open GPU device: {0}")]
    Device(#[from] wgpu::RequestDeviceError),

    #[error("cannot allocate a {size}x{size} canvas")]
    Canvas { size: u32 },

    #[error("canvas of {size}px exceeds the GPU texture limit of {max}px")]
    CanvasTexture { size: u32, max: u32 },
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("cannot read config: {0}")]
    Io(#[from] std::io::Error),

    #[error("malformed config: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("invalid {field}: {reason}")]
    Invalid { field: &'static str, reason: String },
}

impl ConfigError {
    pub fn invalid(field: &'static str, reason: impl Into<String>) -> Self {
        ConfigError::Invalid {
            field,
            reason: reason.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::error::Error as _;

    #[test]
    fn adapter_error_message() {
        assert_eq!(AppError::NoAdapter.to_string(), "no compatible GPU adapter found");
        assert!(AppError::NoAdapter.source().is_none());
        assert_eq!(
            AppError::Canvas { size: 0 }.to_string(),
            "cannot allocate a 0x0 canvas"
        );
    }

    #[test]
    fn config_errors_keep_their_cause() {
        let io = std::io::Error::new(std::io::ErrorKind::NotFound, "gone");
        let err = ConfigError::from(io);
        assert!(matches!(err, ConfigError::Io(_)));
        assert!(err.source().is_some());
        assert_eq!(err.to_string(), "cannot read config: gone");

        let parse = serde_json::from_str::<u32>("nope").unwrap_err();
        let err: ConfigError = parse.into();
        assert!(matches!(err, ConfigError::Parse(_)));
        assert!(err.source().is_some());

        let err = ConfigError::invalid("canvas_size", "must be at least 1");
        assert_eq!(err.to_string(), "invalid canvas_size: must be at least 1");
        assert!(err.source().is_none());
    }
}
