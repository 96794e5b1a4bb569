//! GPU renderer for a [`StrokeRegistry`]'s batch.
//!
//! The renderer owns no geometry of its own. Each frame it asks the registry
//! for a rebuilt batch and, if there is one, replaces its vertex and index
//! buffers wholesale. Drawing is a single indexed call.

use crate::batch::Batch;
use crate::gpu_types::CameraUniform;
use crate::pipeline::{create_camera_bind_group_layout, create_stroke_pipeline};
use crate::registry::StrokeRegistry;
use filament_core::profiling::profile_scope;
use wgpu::util::DeviceExt;

pub struct StrokeRenderer {
    device: wgpu::Device,
    queue: wgpu::Queue,
    pipeline: wgpu::RenderPipeline,
    camera_buffer: wgpu::Buffer,
    camera_bind_group: wgpu::BindGroup,
    vertex_buffer: Option<wgpu::Buffer>,
    index_buffer: Option<wgpu::Buffer>,
    index_count: u32,
}

impl StrokeRenderer {
    /// Create a stroke renderer drawing into targets of `target_format`.
    pub fn new(
        device: &wgpu::Device,
        queue: &wgpu::Queue,
        target_format: wgpu::TextureFormat,
    ) -> Self {
        let camera_buffer = device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
            label: Some("Stroke Camera Buffer"),
            contents: bytemuck::cast_slice(&[CameraUniform::default()]),
            usage: wgpu::BufferUsages::UNIFORM | wgpu::BufferUsages::COPY_DST,
        });

        let camera_layout = create_camera_bind_group_layout(device);
        let camera_bind_group = device.create_bind_group(&wgpu::BindGroupDescriptor {
            label: Some("Stroke Camera Bind Group"),
            layout: &camera_layout,
            entries: &[wgpu::BindGroupEntry {
                binding: 0,
                resource: camera_buffer.as_entire_binding(),
            }],
        });

        let pipeline = create_stroke_pipeline(device, &camera_layout, target_format);

        Self {
            device: device.clone(),
            queue: queue.clone(),
            pipeline,
            camera_buffer,
            camera_bind_group,
            vertex_buffer: None,
            index_buffer: None,
            index_count: 0,
        }
    }

    /// Upload the camera and, if the registry changed, the rebuilt batch.
    pub fn prepare(&mut self, registry: &mut StrokeRegistry, camera: CameraUniform) {
        profile_scope!("stroke_renderer_prepare");

        self.queue
            .write_buffer(&self.camera_buffer, 0, bytemuck::cast_slice(&[camera]));

        if let Some(batch) = registry.batch_if_dirty() {
            self.upload(batch);
        }
    }

    fn upload(&mut self, batch: &Batch) {
        if batch.is_empty() {
            self.vertex_buffer = None;
            self.index_buffer = None;
            self.index_count = 0;
            return;
        }

        tracing::trace!(
            "Uploading stroke batch: {} vertices, {} indices",
            batch.vertices().len(),
            batch.index_count()
        );

        profile_scope!("create_stroke_buffers");
        self.vertex_buffer = Some(self.device.create_buffer_init(
            &wgpu::util::BufferInitDescriptor {
                label: Some("Stroke Vertex Buffer"),
                contents: bytemuck::cast_slice(batch.vertices()),
                usage: wgpu::BufferUsages::VERTEX,
            },
        ));
        self.index_buffer = Some(self.device.create_buffer_init(
            &wgpu::util::BufferInitDescriptor {
                label: Some("Stroke Index Buffer"),
                contents: bytemuck::cast_slice(batch.indices()),
                usage: wgpu::BufferUsages::INDEX,
            },
        ));
        self.index_count = batch.index_count();
    }

    /// Number of indices the next [`render`](Self::render) draws.
    pub fn index_count(&self) -> u32 {
        self.index_count
    }

    /// Draw the last uploaded batch.
    pub fn render(&self, pass: &mut wgpu::RenderPass<'_>) {
        profile_scope!("stroke_renderer_render");

        let (Some(vertices), Some(indices)) = (&self.vertex_buffer, &self.index_buffer) else {
            return;
        };

        pass.push_debug_group("StrokeRenderer::render");
        pass.set_pipeline(&self.pipeline);
        pass.set_bind_group(0, &self.camera_bind_group, &[]);
        pass.set_vertex_buffer(0, vertices.slice(..));
        pass.set_index_buffer(indices.slice(..), wgpu::IndexFormat::Uint32);
        pass.draw_indexed(0..self.index_count, 0, 0..1);
        pass.pop_debug_group();
    }
}
