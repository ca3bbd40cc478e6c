use crate::constants::*;
use hero_core::geometry::{self, LineVertex, Vertex};
use hero_core::{HeroError, QualityParams, Renderer, Scene, Viewport};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use web_sys as web;
use wgpu::util::DeviceExt;

mod helpers;
pub mod instances;
mod targets;

use helpers::{GpuMesh, InstanceBuffer, PipelineSpec};
use instances::{FrameBatches, MeshInstance, MeshKind, PointInstance};
use targets::RenderTargets;

struct Pipelines {
    lit: wgpu::RenderPipeline,
    panel: wgpu::RenderPipeline,
    blob: wgpu::RenderPipeline,
    lines: wgpu::RenderPipeline,
    points: wgpu::RenderPipeline,
}

struct UnitMeshes {
    body: GpuMesh,
    wick: GpuMesh,
    low_poly: GpuMesh,
    quad: GpuMesh,
}

impl UnitMeshes {
    fn get(&self, kind: MeshKind) -> &GpuMesh {
        match kind {
            MeshKind::Body => &self.body,
            MeshKind::Wick => &self.wick,
            MeshKind::LowPoly => &self.low_poly,
            MeshKind::Panel | MeshKind::Shadow => &self.quad,
        }
    }
}

/// WebGPU backend for the hero scene, bound to one canvas.
pub struct GpuRenderer {
    canvas: web::HtmlCanvasElement,
    surface: wgpu::Surface<'static>,
    device: wgpu::Device,
    queue: wgpu::Queue,
    config: wgpu::SurfaceConfiguration,
    targets: RenderTargets,
    lost: Arc<AtomicBool>,

    globals_buffer: wgpu::Buffer,
    globals_bind_group: wgpu::BindGroup,
    pipelines: Pipelines,
    meshes: UnitMeshes,
    mesh_instances: InstanceBuffer,
    point_instances: InstanceBuffer,
    lines: Option<(wgpu::Buffer, u32)>,

    batches: FrameBatches,
}

impl GpuRenderer {
    pub async fn new(canvas: &web::HtmlCanvasElement, antialias: bool) -> anyhow::Result<Self> {
        let instance = wgpu::Instance::default();
        let surface = instance.create_surface(wgpu::SurfaceTarget::Canvas(canvas.clone()))?;
        let adapter = instance
            .request_adapter(&wgpu::RequestAdapterOptions {
                power_preference: wgpu::PowerPreference::HighPerformance,
                compatible_surface: Some(&surface),
                force_fallback_adapter: false,
            })
            .await
            .ok_or_else(|| anyhow::anyhow!("No WebGPU adapter"))?;
        let (device, queue) = adapter
            .request_device(
                &wgpu::DeviceDescriptor {
                    label: Some("hero_device"),
                    required_features: wgpu::Features::empty(),
                    required_limits: wgpu::Limits::default(),
                    memory_hints: wgpu::MemoryHints::Performance,
                },
                None,
            )
            .await
            .map_err(|e| anyhow::anyhow!("request_device error: {:?}", e))?;

        let (width, height) = instances::surface_extent(
            canvas.width(),
            canvas.height(),
            device.limits().max_texture_dimension_2d,
        );
        if (width, height) != (canvas.width(), canvas.height()) {
            crate::dom::set_canvas_backing_size(canvas, width, height);
        }

        let lost = Arc::new(AtomicBool::new(false));
        let lost_flag = lost.clone();
        device.set_device_lost_callback(move |reason, message| {
            if !matches!(reason, wgpu::DeviceLostReason::Destroyed) {
                log::warn!("[render] device lost: {message}");
                lost_flag.store(true, Ordering::SeqCst);
            }
        });

        let caps = surface.get_capabilities(&adapter);
        let format = caps
            .formats
            .iter()
            .copied()
            .find(|f| {
                matches!(
                    f,
                    wgpu::TextureFormat::Bgra8UnormSrgb | wgpu::TextureFormat::Rgba8UnormSrgb
                )
            })
            .or_else(|| caps.formats.first().copied())
            .ok_or_else(|| anyhow::anyhow!("surface reports no formats"))?;
        let alpha_mode = caps
            .alpha_modes
            .first()
            .copied()
            .unwrap_or(wgpu::CompositeAlphaMode::Auto);
        let config = wgpu::SurfaceConfiguration {
            usage: wgpu::TextureUsages::RENDER_ATTACHMENT,
            format,
            width,
            height,
            present_mode: wgpu::PresentMode::Fifo,
            alpha_mode,
            view_formats: vec![],
            desired_maximum_frame_latency: 2,
        };
        surface.configure(&device, &config);

        let sample_count = if antialias { MSAA_SAMPLES } else { 1 };
        let targets = RenderTargets::new(&device, width, height, format, sample_count);

        let globals_buffer = device.create_buffer(&wgpu::BufferDescriptor {
            label: Some("scene_globals"),
            size: std::mem::size_of::<instances::SceneUniforms>() as u64,
            usage: wgpu::BufferUsages::UNIFORM | wgpu::BufferUsages::COPY_DST,
            mapped_at_creation: false,
        });
        let globals_layout = device.create_bind_group_layout(&wgpu::BindGroupLayoutDescriptor {
            label: Some("scene_globals_layout"),
            entries: &[wgpu::BindGroupLayoutEntry {
                binding: 0,
                visibility: wgpu::ShaderStages::VERTEX | wgpu::ShaderStages::FRAGMENT,
                ty: wgpu::BindingType::Buffer {
                    ty: wgpu::BufferBindingType::Uniform,
                    has_dynamic_offset: false,
                    min_binding_size: None,
                },
                count: None,
            }],
        });
        let globals_bind_group = device.create_bind_group(&wgpu::BindGroupDescriptor {
            label: Some("scene_globals_bg"),
            layout: &globals_layout,
            entries: &[wgpu::BindGroupEntry {
                binding: 0,
                resource: globals_buffer.as_entire_binding(),
            }],
        });

        let shader = device.create_shader_module(wgpu::ShaderModuleDescriptor {
            label: Some("scene_shader"),
            source: wgpu::ShaderSource::Wgsl(include_str!("../shaders/scene.wgsl").into()),
        });
        let pipelines = create_pipelines(&device, &globals_layout, &shader, format, sample_count);

        let meshes = UnitMeshes {
            body: GpuMesh::upload(&device, "body_mesh", &geometry::unit_box()),
            wick: GpuMesh::upload(&device, "wick_mesh", &geometry::unit_cylinder(WICK_SEGMENTS)),
            low_poly: GpuMesh::upload(
                &device,
                "low_poly_mesh",
                &geometry::unit_cylinder(LOW_POLY_SEGMENTS),
            ),
            quad: GpuMesh::upload(&device, "quad_mesh", &geometry::unit_quad()),
        };
        let mesh_instances =
            InstanceBuffer::new::<MeshInstance>(&device, "mesh_instances", INITIAL_INSTANCE_CAPACITY);
        let point_instances = InstanceBuffer::new::<PointInstance>(
            &device,
            "point_instances",
            INITIAL_INSTANCE_CAPACITY,
        );

        log::info!(
            "[render] WebGPU ready: {:?} {}x{} msaa={}",
            format,
            width,
            height,
            sample_count
        );

        Ok(Self {
            canvas: canvas.clone(),
            surface,
            device,
            queue,
            config,
            targets,
            lost,
            globals_buffer,
            globals_bind_group,
            pipelines,
            meshes,
            mesh_instances,
            point_instances,
            lines: None,
            batches: FrameBatches::default(),
        })
    }

    fn reconfigure(&mut self, width: u32, height: u32) {
        self.config.width = width.max(1);
        self.config.height = height.max(1);
        self.surface.configure(&self.device, &self.config);
        self.targets
            .recreate(&self.device, self.config.width, self.config.height);
    }

    fn upload_lines(&mut self, lines: &[LineVertex]) {
        if self.lines.is_some() || lines.is_empty() {
            return;
        }
        let buffer = self
            .device
            .create_buffer_init(&wgpu::util::BufferInitDescriptor {
                label: Some("backdrop_lines"),
                contents: bytemuck::cast_slice(lines),
                usage: wgpu::BufferUsages::VERTEX,
            });
        self.lines = Some((buffer, lines.len() as u32));
    }

    fn acquire(&mut self) -> Result<wgpu::SurfaceTexture, HeroError> {
        match self.surface.get_current_texture() {
            Ok(frame) => Ok(frame),
            Err(wgpu::SurfaceError::Lost | wgpu::SurfaceError::Outdated) => {
                self.reconfigure(self.config.width, self.config.height);
                Err(HeroError::Surface("surface outdated, reconfigured".into()))
            }
            Err(wgpu::SurfaceError::OutOfMemory) => {
                Err(HeroError::ContextLost("out of GPU memory".into()))
            }
            Err(e) => Err(HeroError::Surface(e.to_string())),
        }
    }
}

impl Renderer for GpuRenderer {
    fn resize(&mut self, viewport: &Viewport, pixel_ratio: f32) {
        let (w, h) = viewport.physical_size(pixel_ratio);
        let (w, h) =
            instances::surface_extent(w, h, self.device.limits().max_texture_dimension_2d);
        crate::dom::set_canvas_backing_size(&self.canvas, w, h);
        if w == self.config.width && h == self.config.height {
            return;
        }
        self.reconfigure(w, h);
        log::debug!("[render] resized to {}x{} @{:.2}", w, h, pixel_ratio);
    }

    fn apply_quality(&mut self, params: &QualityParams) {
        log::debug!(
            "[render] quality: pixel_ratio={:.2} fog={:.3} shadows={} low_detail={}",
            params.pixel_ratio,
            params.fog_density,
            params.shadows,
            params.force_low_detail
        );
        let msaa = self.targets.msaa_view.is_some();
        if params.antialias != msaa {
            log::debug!("[render] antialias stays {} until the next mount", msaa);
        }
    }

    fn render(&mut self, scene: &Scene) -> Result<(), HeroError> {
        if self.lost.load(Ordering::SeqCst) {
            return Err(HeroError::ContextLost("device lost".into()));
        }
        let frame = self.acquire()?;
        let view = frame
            .texture
            .create_view(&wgpu::TextureViewDescriptor::default());

        self.upload_lines(&scene.backdrop.lines);
        let uniforms = instances::scene_uniforms(scene);
        self.queue
            .write_buffer(&self.globals_buffer, 0, bytemuck::bytes_of(&uniforms));
        self.batches.collect(scene);
        self.mesh_instances
            .write(&self.device, &self.queue, &self.batches.meshes);
        self.point_instances
            .write(&self.device, &self.queue, &self.batches.points);

        let mut encoder = self
            .device
            .create_command_encoder(&wgpu::CommandEncoderDescriptor {
                label: Some("hero_frame"),
            });
        {
            let (color_view, resolve_target) = match &self.targets.msaa_view {
                Some(msaa) => (msaa, Some(&view)),
                None => (&view, None),
            };
            let [r, g, b, a] = CLEAR_COLOR;
            let mut pass = encoder.begin_render_pass(&wgpu::RenderPassDescriptor {
                label: Some("hero_pass"),
                color_attachments: &[Some(wgpu::RenderPassColorAttachment {
                    view: color_view,
                    resolve_target,
                    ops: wgpu::Operations {
                        load: wgpu::LoadOp::Clear(wgpu::Color { r, g, b, a }),
                        store: wgpu::StoreOp::Store,
                    },
                })],
                depth_stencil_attachment: Some(wgpu::RenderPassDepthStencilAttachment {
                    view: &self.targets.depth_view,
                    depth_ops: Some(wgpu::Operations {
                        load: wgpu::LoadOp::Clear(1.0),
                        store: wgpu::StoreOp::Discard,
                    }),
                    stencil_ops: None,
                }),
                timestamp_writes: None,
                occlusion_query_set: None,
            });
            pass.set_bind_group(0, &self.globals_bind_group, &[]);

            // opaque candles first, then the translucent layers back to front
            for (kind, range) in &self.batches.draws {
                let pipeline = match kind {
                    k if k.is_opaque() => &self.pipelines.lit,
                    MeshKind::Panel => &self.pipelines.panel,
                    _ => continue,
                };
                pass.set_pipeline(pipeline);
                draw_mesh(&mut pass, self.meshes.get(*kind), &self.mesh_instances, range.clone());
            }

            if let Some((buffer, count)) = &self.lines {
                pass.set_pipeline(&self.pipelines.lines);
                pass.set_vertex_buffer(0, buffer.slice(..));
                pass.draw(0..*count, 0..1);
            }

            if let Some(range) = self.batches.draw_of(MeshKind::Shadow) {
                pass.set_pipeline(&self.pipelines.blob);
                draw_mesh(&mut pass, &self.meshes.quad, &self.mesh_instances, range);
            }

            let points = self.batches.points.len() as u32;
            if points > 0 {
                pass.set_pipeline(&self.pipelines.points);
                pass.set_vertex_buffer(0, self.point_instances.buffer().slice(..));
                pass.draw(0..6, 0..points);
            }
        }
        self.queue.submit(Some(encoder.finish()));
        frame.present();
        Ok(())
    }

    fn release(self) {
        log::info!("[render] releasing GPU resources");
        self.device.destroy();
    }
}

fn draw_mesh(
    pass: &mut wgpu::RenderPass<'_>,
    mesh: &GpuMesh,
    instances: &InstanceBuffer,
    range: std::ops::Range<u32>,
) {
    pass.set_vertex_buffer(0, mesh.vertex_buffer.slice(..));
    pass.set_vertex_buffer(1, instances.buffer().slice(..));
    pass.set_index_buffer(mesh.index_buffer.slice(..), wgpu::IndexFormat::Uint16);
    pass.draw_indexed(0..mesh.index_count, 0, range);
}

fn create_pipelines(
    device: &wgpu::Device,
    globals_layout: &wgpu::BindGroupLayout,
    shader: &wgpu::ShaderModule,
    format: wgpu::TextureFormat,
    sample_count: u32,
) -> Pipelines {
    let layout = device.create_pipeline_layout(&wgpu::PipelineLayoutDescriptor {
        label: Some("scene_layout"),
        bind_group_layouts: &[globals_layout],
        push_constant_ranges: &[],
    });

    let mesh_buffers = [
        wgpu::VertexBufferLayout {
            array_stride: std::mem::size_of::<Vertex>() as wgpu::BufferAddress,
            step_mode: wgpu::VertexStepMode::Vertex,
            attributes: &helpers::MESH_ATTRS,
        },
        wgpu::VertexBufferLayout {
            array_stride: std::mem::size_of::<MeshInstance>() as wgpu::BufferAddress,
            step_mode: wgpu::VertexStepMode::Instance,
            attributes: &helpers::MESH_INSTANCE_ATTRS,
        },
    ];
    let line_buffers = [wgpu::VertexBufferLayout {
        array_stride: std::mem::size_of::<LineVertex>() as wgpu::BufferAddress,
        step_mode: wgpu::VertexStepMode::Vertex,
        attributes: &helpers::LINE_ATTRS,
    }];
    let point_buffers = [wgpu::VertexBufferLayout {
        array_stride: std::mem::size_of::<PointInstance>() as wgpu::BufferAddress,
        step_mode: wgpu::VertexStepMode::Instance,
        attributes: &helpers::POINT_INSTANCE_ATTRS,
    }];

    let make = |spec: PipelineSpec<'_>| {
        helpers::make_pipeline(device, &layout, shader, format, sample_count, spec)
    };
    let alpha = Some(wgpu::BlendState::ALPHA_BLENDING);

    Pipelines {
        lit: make(PipelineSpec {
            label: "lit_pipeline",
            vertex_entry: "vs_mesh",
            fragment_entry: "fs_lit",
            buffers: &mesh_buffers,
            topology: wgpu::PrimitiveTopology::TriangleList,
            blend: Some(wgpu::BlendState::REPLACE),
            depth_write: true,
        }),
        panel: make(PipelineSpec {
            label: "panel_pipeline",
            vertex_entry: "vs_mesh",
            fragment_entry: "fs_unlit",
            buffers: &mesh_buffers,
            topology: wgpu::PrimitiveTopology::TriangleList,
            blend: alpha,
            depth_write: false,
        }),
        blob: make(PipelineSpec {
            label: "shadow_pipeline",
            vertex_entry: "vs_mesh",
            fragment_entry: "fs_blob",
            buffers: &mesh_buffers,
            topology: wgpu::PrimitiveTopology::TriangleList,
            blend: alpha,
            depth_write: false,
        }),
        lines: make(PipelineSpec {
            label: "line_pipeline",
            vertex_entry: "vs_line",
            fragment_entry: "fs_line",
            buffers: &line_buffers,
            topology: wgpu::PrimitiveTopology::LineList,
            blend: alpha,
            depth_write: false,
        }),
        points: make(PipelineSpec {
            label: "point_pipeline",
            vertex_entry: "vs_point",
            fragment_entry: "fs_point",
            buffers: &point_buffers,
            topology: wgpu::PrimitiveTopology::TriangleList,
            blend: Some(helpers::ADDITIVE_BLEND),
            depth_write: false,
        }),
    }
}
