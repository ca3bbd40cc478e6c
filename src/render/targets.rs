use super::helpers;

/// Depth buffer plus the optional multisampled colour target.
///
/// Both follow the surface size and are rebuilt on every resize.
pub(crate) struct RenderTargets {
    pub(crate) depth_view: wgpu::TextureView,
    pub(crate) msaa_view: Option<wgpu::TextureView>,
    sample_count: u32,
    color_format: wgpu::TextureFormat,
}

impl RenderTargets {
    pub(crate) fn new(
        device: &wgpu::Device,
        width: u32,
        height: u32,
        color_format: wgpu::TextureFormat,
        sample_count: u32,
    ) -> Self {
        let (depth_view, msaa_view) =
            Self::create(device, width, height, color_format, sample_count);
        Self {
            depth_view,
            msaa_view,
            sample_count,
            color_format,
        }
    }

    fn create(
        device: &wgpu::Device,
        width: u32,
        height: u32,
        color_format: wgpu::TextureFormat,
        sample_count: u32,
    ) -> (wgpu::TextureView, Option<wgpu::TextureView>) {
        let depth = helpers::create_attachment(
            device,
            "depth",
            width,
            height,
            helpers::DEPTH_FORMAT,
            sample_count,
        );
        let msaa = (sample_count > 1).then(|| {
            helpers::create_attachment(device, "msaa_color", width, height, color_format, sample_count)
        });
        (depth, msaa)
    }

    pub(crate) fn recreate(&mut self, device: &wgpu::Device, width: u32, height: u32) {
        (self.depth_view, self.msaa_view) =
            Self::create(device, width, height, self.color_format, self.sample_count);
    }
}
