use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown node id `{0}`")]
pub struct ParseNodeIdError(pub String);

/// Fatal renderer setup failures. There is no degraded mode; callers surface
/// these to the user and stop.
#[cfg(feature = "gpu")]
#[derive(Debug, Error)]
pub enum RenderError {
    #[error("no compatible GPU adapter")]
    NoAdapter,
    #[error("surface creation failed: {0}")]
    CreateSurface(#[from] wgpu::CreateSurfaceError),
    #[error("device request failed: {0}")]
    RequestDevice(#[from] wgpu::RequestDeviceError),
    #[error("surface reports no supported formats")]
    NoSurfaceFormat,
}
