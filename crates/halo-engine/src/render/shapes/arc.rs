use anyhow::Result;
use bytemuck::{Pod, Zeroable};
use wgpu::util::DeviceExt;

use crate::geom::LineCap;
use crate::render::{RenderCtx, RenderTarget};
use crate::scene::{DrawCmd, DrawList};

use super::common::{
    premul_alpha_blend, resolve_paint, viewport_ubo_min_binding_size, QuadVertex,
    ViewportUniform, KIND_SHADOW, QUAD_INDICES, QUAD_VERTICES,
};

/// Renderer for `DrawCmd::Arc` and `DrawCmd::Shadow`.
///
/// Supported paints:
/// - `Paint::Solid`
/// - `Paint::AngularGradient` (evaluated per fragment over the gradient surface)
///
/// All GPU objects are created in [`ArcRenderer::new`]; a shader that fails
/// to compile is reported there rather than on the first frame.
pub struct ArcRenderer {
    format: wgpu::TextureFormat,
    pipeline: wgpu::RenderPipeline,

    bind_group: wgpu::BindGroup,
    viewport_ubo: wgpu::Buffer,

    quad_vbo: wgpu::Buffer,
    quad_ibo: wgpu::Buffer,

    instance_vbo: Option<wgpu::Buffer>,
    instance_capacity: usize,

    warned_format: bool,
}

impl ArcRenderer {
    /// Builds the pipeline for targets of `format`.
    pub fn new(device: &wgpu::Device, format: wgpu::TextureFormat) -> Result<Self> {
        let shader = device.create_shader_module(wgpu::ShaderModuleDescriptor {
            label: Some("halo arc shader"),
            source: wgpu::ShaderSource::Wgsl(include_str!("shaders/arc.wgsl").into()),
        });

        let info = pollster::block_on(shader.get_compilation_info());
        let errors: Vec<String> = info
            .messages
            .iter()
            .filter(|m| m.message_type == wgpu::CompilationMessageType::Error)
            .map(|m| m.message.clone())
            .collect();
        if !errors.is_empty() {
            anyhow::bail!("arc shader failed to compile: {}", errors.join("; "));
        }

        let bind_group_layout = device.create_bind_group_layout(&wgpu::BindGroupLayoutDescriptor {
            label: Some("halo arc bgl"),
            entries: &[wgpu::BindGroupLayoutEntry {
                binding: 0,
                visibility: wgpu::ShaderStages::VERTEX,
                ty: wgpu::BindingType::Buffer {
                    ty: wgpu::BufferBindingType::Uniform,
                    has_dynamic_offset: false,
                    min_binding_size: viewport_ubo_min_binding_size(),
                },
                count: None,
            }],
        });

        let pipeline_layout = device.create_pipeline_layout(&wgpu::PipelineLayoutDescriptor {
            label: Some("halo arc pipeline layout"),
            bind_group_layouts: &[&bind_group_layout],
            immediate_size: 0,
        });

        let pipeline = device.create_render_pipeline(&wgpu::RenderPipelineDescriptor {
            label: Some("halo arc pipeline"),
            layout: Some(&pipeline_layout),
            vertex: wgpu::VertexState {
                module: &shader,
                entry_point: Some("vs_main"),
                compilation_options: Default::default(),
                buffers: &[QuadVertex::layout(), ArcInstance::layout()],
            },
            fragment: Some(wgpu::FragmentState {
                module: &shader,
                entry_point: Some("fs_main"),
                compilation_options: Default::default(),
                targets: &[Some(wgpu::ColorTargetState {
                    format,
                    blend: Some(premul_alpha_blend()),
                    write_mask: wgpu::ColorWrites::ALL,
                })],
            }),
            primitive: wgpu::PrimitiveState {
                topology: wgpu::PrimitiveTopology::TriangleList,
                strip_index_format: None,
                front_face: wgpu::FrontFace::Ccw,
                cull_mode: None,
                polygon_mode: wgpu::PolygonMode::Fill,
                unclipped_depth: false,
                conservative: false,
            },
            depth_stencil: None,
            multisample: wgpu::MultisampleState::default(),
            multiview_mask: None,
            cache: None,
        });

        let viewport_ubo = device.create_buffer(&wgpu::BufferDescriptor {
            label: Some("halo arc viewport ubo"),
            size: std::mem::size_of::<ViewportUniform>() as u64,
            usage: wgpu::BufferUsages::UNIFORM | wgpu::BufferUsages::COPY_DST,
            mapped_at_creation: false,
        });

        let bind_group = device.create_bind_group(&wgpu::BindGroupDescriptor {
            label: Some("halo arc bind group"),
            layout: &bind_group_layout,
            entries: &[wgpu::BindGroupEntry {
                binding: 0,
                resource: viewport_ubo.as_entire_binding(),
            }],
        });

        let quad_vbo = device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
            label: Some("halo arc quad vbo"),
            contents: bytemuck::cast_slice(&QUAD_VERTICES),
            usage: wgpu::BufferUsages::VERTEX,
        });
        let quad_ibo = device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
            label: Some("halo arc quad ibo"),
            contents: bytemuck::cast_slice(&QUAD_INDICES),
            usage: wgpu::BufferUsages::INDEX,
        });

        log::debug!("arc renderer ready for {format:?}");

        Ok(Self {
            format,
            pipeline,
            bind_group,
            viewport_ubo,
            quad_vbo,
            quad_ibo,
            instance_vbo: None,
            instance_capacity: 0,
            warned_format: false,
        })
    }

    /// Target format the pipeline was built for.
    #[inline]
    pub fn format(&self) -> wgpu::TextureFormat {
        self.format
    }

    pub fn render(
        &mut self,
        ctx: &RenderCtx<'_>,
        target: &mut RenderTarget<'_>,
        draw_list: &DrawList,
    ) {
        if ctx.surface_format != self.format {
            if !self.warned_format {
                log::warn!(
                    "arc renderer built for {:?}, target is {:?}; skipping",
                    self.format,
                    ctx.surface_format
                );
                self.warned_format = true;
            }
            return;
        }

        let instances = build_instances(draw_list);
        if instances.is_empty() {
            return;
        }

        ctx.queue.write_buffer(
            &self.viewport_ubo,
            0,
            bytemuck::bytes_of(&ViewportUniform {
                viewport: [ctx.viewport.width.max(1.0), ctx.viewport.height.max(1.0)],
                _pad: [0.0; 2],
            }),
        );

        self.ensure_instance_capacity(ctx, instances.len());
        let Some(instance_vbo) = self.instance_vbo.as_ref() else { return };
        ctx.queue.write_buffer(instance_vbo, 0, bytemuck::cast_slice(&instances));

        let mut rpass = target.encoder.begin_render_pass(&wgpu::RenderPassDescriptor {
            label: Some("halo arc pass"),
            color_attachments: &[Some(wgpu::RenderPassColorAttachment {
                view: target.color_view,
                resolve_target: None,
                ops: wgpu::Operations {
                    load: wgpu::LoadOp::Load,
                    store: wgpu::StoreOp::Store,
                },
                depth_slice: None,
            })],
            depth_stencil_attachment: None,
            timestamp_writes: None,
            occlusion_query_set: None,
            multiview_mask: None,
        });

        rpass.set_pipeline(&self.pipeline);
        rpass.set_bind_group(0, &self.bind_group, &[]);
        rpass.set_vertex_buffer(0, self.quad_vbo.slice(..));
        rpass.set_vertex_buffer(1, instance_vbo.slice(..));
        rpass.set_index_buffer(self.quad_ibo.slice(..), wgpu::IndexFormat::Uint16);
        rpass.draw_indexed(0..6, 0, 0..instances.len() as u32);
    }

    fn ensure_instance_capacity(&mut self, ctx: &RenderCtx<'_>, required: usize) {
        if required <= self.instance_capacity && self.instance_vbo.is_some() {
            return;
        }
        let new_cap = required.next_power_of_two().max(16);
        let new_size = (new_cap * std::mem::size_of::<ArcInstance>()) as u64;
        self.instance_vbo = Some(ctx.device.create_buffer(&wgpu::BufferDescriptor {
            label: Some("halo arc instance vbo"),
            size: new_size,
            usage: wgpu::BufferUsages::VERTEX | wgpu::BufferUsages::COPY_DST,
            mapped_at_creation: false,
        }));
        self.instance_capacity = new_cap;
    }
}

/// Packs a draw list into per-instance GPU records, in paint order.
fn build_instances(draw_list: &DrawList) -> Vec<ArcInstance> {
    draw_list
        .items()
        .iter()
        .map(|cmd| match cmd {
            DrawCmd::Arc(arc) => {
                let (kind, color0, color1, surface) = resolve_paint(&arc.paint);
                ArcInstance {
                    center: [arc.path.center.x, arc.path.center.y],
                    radius_width: [arc.path.radius, arc.path.width],
                    angles: [arc.path.start, arc.path.sweep],
                    style: [kind, cap_code(arc.path.cap), 0.0, 0.0],
                    color0,
                    color1,
                    surface,
                    mask: [0.0; 4],
                    mask_center: [0.0; 2],
                }
            }
            DrawCmd::Shadow(shadow) => ArcInstance {
                center: [shadow.path.center.x, shadow.path.center.y],
                radius_width: [shadow.path.radius, shadow.path.width],
                angles: [shadow.path.start, shadow.path.sweep],
                style: [KIND_SHADOW, cap_code(shadow.path.cap), shadow.blur_radius.max(0.0), 0.0],
                color0: shadow.color.to_array(),
                color1: shadow.color.to_array(),
                surface: [0.0; 4],
                mask: [shadow.mask.radius, shadow.mask.width, shadow.mask.start, shadow.mask.sweep],
                mask_center: [shadow.mask.center.x, shadow.mask.center.y],
            },
        })
        .collect()
}

#[inline]
fn cap_code(cap: LineCap) -> f32 {
    match cap {
        LineCap::Butt => 0.0,
        LineCap::Round => 1.0,
    }
}

// ── GPU types ─────────────────────────────────────────────────────────────

/// Instance data layout (112 bytes):
///
///  offset   0  center       [f32; 2]   loc 1
///  offset   8  radius_width [f32; 2]   loc 2
///  offset  16  angles       [f32; 2]   loc 3  (.x = start, .y = sweep)
///  offset  24  style        [f32; 4]   loc 4  (kind, cap, blur, unused)
///  offset  40  color0       [f32; 4]   loc 5
///  offset  56  color1       [f32; 4]   loc 6
///  offset  72  surface      [f32; 4]   loc 7  (gradient surface x, y, w, h)
///  offset  88  mask         [f32; 4]   loc 8  (radius, width, start, sweep)
///  offset 104  mask_center  [f32; 2]   loc 9
#[repr(C)]
#[derive(Debug, Copy, Clone, PartialEq, Pod, Zeroable)]
struct ArcInstance {
    center: [f32; 2],
    radius_width: [f32; 2],
    angles: [f32; 2],
    style: [f32; 4],
    color0: [f32; 4],
    color1: [f32; 4],
    surface: [f32; 4],
    mask: [f32; 4],
    mask_center: [f32; 2],
}

impl ArcInstance {
    const ATTRS: [wgpu::VertexAttribute; 9] = wgpu::vertex_attr_array![
        1 => Float32x2, // center
        2 => Float32x2, // radius_width
        3 => Float32x2, // angles
        4 => Float32x4, // style
        5 => Float32x4, // color0
        6 => Float32x4, // color1
        7 => Float32x4, // surface
        8 => Float32x4, // mask
        9 => Float32x2  // mask_center
    ];

    fn layout() -> wgpu::VertexBufferLayout<'static> {
        wgpu::VertexBufferLayout {
            array_stride: std::mem::size_of::<ArcInstance>() as u64,
            step_mode: wgpu::VertexStepMode::Instance,
            attributes: &Self::ATTRS,
        }
    }
}
