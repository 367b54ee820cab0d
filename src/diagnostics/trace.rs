use crate::image::ImageU8;

/// Every intermediate image of one run, in stage order.
#[derive(Clone, Debug)]
pub struct PipelineTrace {
    /// Input resized to the working resolution (RGB).
    pub resized: ImageU8,
    pub gray: ImageU8,
    pub blurred: ImageU8,
    /// Binary edge map before masking.
    pub edges: ImageU8,
    /// Rasterized region of interest.
    pub region_mask: ImageU8,
    /// Edge map restricted to the region of interest.
    pub masked: ImageU8,
    /// Lanes drawn on black (RGB).
    pub overlay: ImageU8,
}
