//! Shared GPU types and utilities used by the shape renderers.

use bytemuck::{Pod, Zeroable};

use crate::paint::Paint;

// ── blend ─────────────────────────────────────────────────────────────────

pub(super) fn premul_alpha_blend() -> wgpu::BlendState {
    wgpu::BlendState {
        color: wgpu::BlendComponent {
            src_factor: wgpu::BlendFactor::One,
            dst_factor: wgpu::BlendFactor::OneMinusSrcAlpha,
            operation: wgpu::BlendOperation::Add,
        },
        alpha: wgpu::BlendComponent {
            src_factor: wgpu::BlendFactor::One,
            dst_factor: wgpu::BlendFactor::OneMinusSrcAlpha,
            operation: wgpu::BlendOperation::Add,
        },
    }
}

// ── viewport uniform ──────────────────────────────────────────────────────

#[repr(C)]
#[derive(Debug, Copy, Clone, Pod, Zeroable)]
pub(super) struct ViewportUniform {
    pub viewport: [f32; 2],
    pub _pad: [f32; 2], // 16-byte alignment
}

/// Returns the `wgpu` minimum binding size for the viewport uniform buffer.
pub(super) fn viewport_ubo_min_binding_size() -> Option<std::num::NonZeroU64> {
    std::num::NonZeroU64::new(std::mem::size_of::<ViewportUniform>() as u64)
}

// ── quad vertex ───────────────────────────────────────────────────────────

#[repr(C)]
#[derive(Debug, Copy, Clone, Pod, Zeroable)]
pub(super) struct QuadVertex {
    pub pos: [f32; 2], // 0..1
}

impl QuadVertex {
    const ATTRS: [wgpu::VertexAttribute; 1] = wgpu::vertex_attr_array![0 => Float32x2];

    pub(super) fn layout() -> wgpu::VertexBufferLayout<'static> {
        wgpu::VertexBufferLayout {
            array_stride: std::mem::size_of::<QuadVertex>() as u64,
            step_mode: wgpu::VertexStepMode::Vertex,
            attributes: &Self::ATTRS,
        }
    }
}

pub(super) const QUAD_VERTICES: [QuadVertex; 4] = [
    QuadVertex { pos: [0.0, 0.0] },
    QuadVertex { pos: [1.0, 0.0] },
    QuadVertex { pos: [1.0, 1.0] },
    QuadVertex { pos: [0.0, 1.0] },
];

pub(super) const QUAD_INDICES: [u16; 6] = [0, 1, 2, 0, 2, 3];

// ── paint resolution ──────────────────────────────────────────────────────

/// Fragment-shader paint selector, stored in `style.x` of an instance.
pub(super) const KIND_SOLID: f32 = 0.0;
pub(super) const KIND_ANGULAR: f32 = 1.0;
pub(super) const KIND_SHADOW: f32 = 2.0;

/// Converts a `Paint` to `(kind, color0, color1, surface)`.
///
/// Solid fills repeat the color and carry an empty surface; the shader only
/// reads `color1`/`surface` for `KIND_ANGULAR`.
pub(super) fn resolve_paint(paint: &Paint) -> (f32, [f32; 4], [f32; 4], [f32; 4]) {
    match paint {
        Paint::Solid(c) => (KIND_SOLID, c.to_array(), c.to_array(), [0.0; 4]),
        Paint::AngularGradient(g) => {
            let s = g.surface;
            (
                KIND_ANGULAR,
                g.colors.0.to_array(),
                g.colors.1.to_array(),
                [s.origin.x, s.origin.y, s.size.x, s.size.y],
            )
        }
    }
}
