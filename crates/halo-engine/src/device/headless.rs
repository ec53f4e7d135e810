use anyhow::{Context, Result};

use crate::coords::Viewport;
use crate::paint::Color;
use crate::render::{RenderCtx, RenderTarget};

/// Initialization parameters for the GPU layer.
#[derive(Debug, Clone)]
pub struct GpuInit {
    /// Format of the offscreen color target.
    ///
    /// Ring colors are authored as plain channel values, so the default is a
    /// non-sRGB format that stores them unchanged.
    pub format: wgpu::TextureFormat,

    /// Adapter power preference.
    pub power_preference: wgpu::PowerPreference,

    /// Required wgpu features.
    ///
    /// Favor an empty set for portability unless a feature is strictly necessary.
    pub required_features: wgpu::Features,

    /// Limits requested from the adapter/device.
    pub required_limits: wgpu::Limits,
}

impl Default for GpuInit {
    fn default() -> Self {
        Self {
            format: wgpu::TextureFormat::Rgba8Unorm,
            power_preference: wgpu::PowerPreference::HighPerformance,
            required_features: wgpu::Features::empty(),
            required_limits: wgpu::Limits::default(),
        }
    }
}

/// Owns wgpu core objects and an offscreen render target.
///
/// Used where no window exists: the studio's `--gpu` mode and render smoke
/// checks. Hosts embedding rings in a window build their own `RenderCtx`.
pub struct HeadlessGpu {
    device: wgpu::Device,
    queue: wgpu::Queue,
    format: wgpu::TextureFormat,

    target: Option<OffscreenTarget>,
}

struct OffscreenTarget {
    width: u32,
    height: u32,
    texture: wgpu::Texture,
    view: wgpu::TextureView,
}

impl HeadlessGpu {
    /// Acquires an adapter and device without a surface.
    ///
    /// Adapter/device acquisition is asynchronous under wgpu; this blocks on it.
    pub fn new(init: GpuInit) -> Result<Self> {
        pollster::block_on(Self::new_async(init))
    }

    pub async fn new_async(init: GpuInit) -> Result<Self> {
        let instance = wgpu::Instance::new(&wgpu::InstanceDescriptor {
            backends: wgpu::Backends::all(),
            ..Default::default()
        });

        let adapter = instance
            .request_adapter(&wgpu::RequestAdapterOptions {
                power_preference: init.power_preference,
                compatible_surface: None,
                force_fallback_adapter: false,
            })
            .await
            .context("failed to find a suitable GPU adapter")?;

        log::info!("gpu adapter: {:?}", adapter.get_info().name);

        let (device, queue) = adapter
            .request_device(&wgpu::DeviceDescriptor {
                label: Some("halo-engine device"),
                required_features: init.required_features,
                required_limits: init.required_limits,
                experimental_features: wgpu::ExperimentalFeatures::disabled(),
                memory_hints: wgpu::MemoryHints::Performance,
                trace: wgpu::Trace::Off,
            })
            .await
            .context("failed to create wgpu device/queue")?;

        Ok(Self {
            device,
            queue,
            format: init.format,
            target: None,
        })
    }

    #[inline]
    pub fn device(&self) -> &wgpu::Device {
        &self.device
    }

    #[inline]
    pub fn queue(&self) -> &wgpu::Queue {
        &self.queue
    }

    /// Format of the offscreen target; build renderers for this format.
    #[inline]
    pub fn format(&self) -> wgpu::TextureFormat {
        self.format
    }

    /// Clears the offscreen target to `clear`, runs `draw` against it and
    /// submits the recorded commands.
    ///
    /// The target is (re)allocated whenever the viewport's pixel size changes.
    pub fn render_frame<F>(&mut self, clear: Color, viewport: Viewport, draw: F) -> Result<()>
    where
        F: FnOnce(&RenderCtx<'_>, &mut RenderTarget<'_>),
    {
        anyhow::ensure!(viewport.is_valid(), "cannot render into viewport {viewport:?}");
        let width = viewport.width.ceil() as u32;
        let height = viewport.height.ceil() as u32;
        self.ensure_target(width, height);
        let view = match self.target.as_ref() {
            Some(t) => &t.view,
            None => anyhow::bail!("offscreen target missing"),
        };

        let mut encoder = self
            .device
            .create_command_encoder(&wgpu::CommandEncoderDescriptor {
                label: Some("halo frame encoder"),
            });

        {
            let c = clear.to_array();
            let _clear_pass = encoder.begin_render_pass(&wgpu::RenderPassDescriptor {
                label: Some("halo clear pass"),
                color_attachments: &[Some(wgpu::RenderPassColorAttachment {
                    view,
                    resolve_target: None,
                    ops: wgpu::Operations {
                        load: wgpu::LoadOp::Clear(wgpu::Color {
                            r: c[0] as f64,
                            g: c[1] as f64,
                            b: c[2] as f64,
                            a: c[3] as f64,
                        }),
                        store: wgpu::StoreOp::Store,
                    },
                    depth_slice: None,
                })],
                depth_stencil_attachment: None,
                timestamp_writes: None,
                occlusion_query_set: None,
                multiview_mask: None,
            });
        }

        {
            let ctx = RenderCtx::new(&self.device, &self.queue, self.format, viewport, 1.0);
            let mut target = RenderTarget::new(&mut encoder, view);
            draw(&ctx, &mut target);
        }

        self.queue.submit(std::iter::once(encoder.finish()));
        Ok(())
    }

    /// Copies the last rendered frame back to the CPU.
    ///
    /// Returns tightly packed RGBA8 rows, top row first, exactly as stored in
    /// the target (premultiplied). Blocks until the GPU has finished the copy.
    pub fn read_rgba8(&self) -> Result<Vec<u8>> {
        let target = self.target.as_ref().context("no frame has been rendered yet")?;
        anyhow::ensure!(
            matches!(
                self.format,
                wgpu::TextureFormat::Rgba8Unorm | wgpu::TextureFormat::Rgba8UnormSrgb
            ),
            "readback supports RGBA8 targets only, not {:?}",
            self.format
        );

        let width = target.width.max(1);
        let height = target.height.max(1);
        let row_bytes = width * 4;
        let align = wgpu::COPY_BYTES_PER_ROW_ALIGNMENT;
        let padded_row_bytes = row_bytes.div_ceil(align) * align;

        let buffer = self.device.create_buffer(&wgpu::BufferDescriptor {
            label: Some("halo readback buffer"),
            size: padded_row_bytes as u64 * height as u64,
            usage: wgpu::BufferUsages::COPY_DST | wgpu::BufferUsages::MAP_READ,
            mapped_at_creation: false,
        });

        let mut encoder = self
            .device
            .create_command_encoder(&wgpu::CommandEncoderDescriptor {
                label: Some("halo readback encoder"),
            });
        encoder.copy_texture_to_buffer(
            wgpu::TexelCopyTextureInfo {
                texture: &target.texture,
                mip_level: 0,
                origin: wgpu::Origin3d::ZERO,
                aspect: wgpu::TextureAspect::All,
            },
            wgpu::TexelCopyBufferInfo {
                buffer: &buffer,
                layout: wgpu::TexelCopyBufferLayout {
                    offset: 0,
                    bytes_per_row: Some(padded_row_bytes),
                    rows_per_image: Some(height),
                },
            },
            wgpu::Extent3d {
                width,
                height,
                depth_or_array_layers: 1,
            },
        );
        self.queue.submit(std::iter::once(encoder.finish()));

        let slice = buffer.slice(..);
        let (tx, rx) = std::sync::mpsc::channel();
        slice.map_async(wgpu::MapMode::Read, move |result| {
            let _ = tx.send(result);
        });
        self.device
            .poll(wgpu::PollType::wait_indefinitely())
            .context("failed waiting for readback")?;
        rx.recv()
            .context("readback callback never ran")?
            .context("failed to map readback buffer")?;

        let mut pixels = Vec::with_capacity((row_bytes * height) as usize);
        {
            let mapped = slice.get_mapped_range();
            for row in mapped.chunks(padded_row_bytes as usize) {
                pixels.extend_from_slice(&row[..row_bytes as usize]);
            }
        }
        buffer.unmap();

        log::trace!("read back {width}x{height} frame");
        Ok(pixels)
    }

    fn ensure_target(&mut self, width: u32, height: u32) {
        if let Some(t) = &self.target {
            if t.width == width && t.height == height {
                return;
            }
        }

        log::debug!("allocating {width}x{height} offscreen target ({:?})", self.format);
        let texture = self.device.create_texture(&wgpu::TextureDescriptor {
            label: Some("halo offscreen target"),
            size: wgpu::Extent3d {
                width: width.max(1),
                height: height.max(1),
                depth_or_array_layers: 1,
            },
            mip_level_count: 1,
            sample_count: 1,
            dimension: wgpu::TextureDimension::D2,
            format: self.format,
            usage: wgpu::TextureUsages::RENDER_ATTACHMENT | wgpu::TextureUsages::COPY_SRC,
            view_formats: &[],
        });
        let view = texture.create_view(&wgpu::TextureViewDescriptor::default());
        self.target = Some(OffscreenTarget {
            width,
            height,
            texture,
            view,
        });
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::coords::Rect;
    use crate::geom::{arc_path, track_path};
    use crate::paint::AngularGradient;
    use crate::render::shapes::arc::ArcRenderer;
    use crate::render::Canvas;
    use crate::scene::DrawList;

    const SIDE: u32 = 64;

    fn ring_list() -> DrawList {
        let bounds = Rect::new(0.0, 0.0, SIDE as f32, SIDE as f32);
        let c1 = Color::from_straight(1.0, 0.2, 0.4, 1.0);
        let mut list = DrawList::new();
        list.push_arc(track_path(bounds, 8.0), Color::gray(0.3));
        list.push_arc(arc_path(bounds, 8.0, 0.6), AngularGradient::new(bounds, (c1, c1.darker())));
        list
    }

    // ── readback ───────────────────────────────────────────────────────────

    #[test]
    fn readback_before_any_frame_is_an_error() {
        let Ok(gpu) = HeadlessGpu::new(GpuInit::default()) else {
            eprintln!("no GPU adapter, skipping");
            return;
        };
        assert!(gpu.read_rgba8().is_err());
    }

    #[test]
    fn gpu_frame_matches_canvas() {
        let Ok(mut gpu) = HeadlessGpu::new(GpuInit::default()) else {
            eprintln!("no GPU adapter, skipping");
            return;
        };
        let mut renderer = ArcRenderer::new(gpu.device(), gpu.format()).unwrap();
        let list = ring_list();
        let viewport = Viewport::new(SIDE as f32, SIDE as f32);
        gpu.render_frame(Color::BLACK, viewport, |ctx, target| {
            renderer.render(ctx, target, &list);
        })
        .unwrap();
        let gpu_px = gpu.read_rgba8().unwrap();
        assert_eq!(gpu_px.len(), (SIDE * SIDE * 4) as usize);

        let mut canvas = Canvas::new(SIDE, SIDE);
        canvas.clear(Color::BLACK);
        canvas.draw(&list);
        let cpu_px = canvas.to_rgba8();

        // 6 o'clock and lower-left on the arc, 12 o'clock on the bare track,
        // centre on the background.
        for (x, y) in [(32, 60), (12, 52), (32, 4), (32, 32)] {
            let i = ((y * SIDE + x) * 4) as usize;
            for c in 0..4 {
                let diff = (gpu_px[i + c] as i32 - cpu_px[i + c] as i32).abs();
                assert!(
                    diff <= 6,
                    "pixel ({x}, {y}) channel {c}: gpu {} vs canvas {}",
                    gpu_px[i + c],
                    cpu_px[i + c]
                );
            }
        }
    }
}
