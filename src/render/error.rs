use thiserror::Error;

/// Failures of the raster surface. Layout itself cannot fail.
#[derive(Debug, Error)]
pub enum RenderError {
    #[error("cannot allocate a {width}x{height} canvas")]
    Allocation { width: u32, height: u32 },

    #[error("PNG encode failed: {0}")]
    Encode(String),
}
