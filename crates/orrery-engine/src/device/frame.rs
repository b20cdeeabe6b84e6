/// A single acquired swapchain frame.
///
/// Short-lived: holding the surface texture blocks acquisition of the next frame,
/// so it is submitted (and dropped) within the same callback that acquired it.
pub struct GpuFrame {
    pub surface_texture: wgpu::SurfaceTexture,
    pub view: wgpu::TextureView,
    pub encoder: wgpu::CommandEncoder,
}
