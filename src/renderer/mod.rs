//! 渲染器模块
//!
//! 组织整个绘制流程：几何上传、管线创建、帧资源环的推进与等待、
//! 常量缓冲区更新和逐对象绘制。

pub mod constants;
pub mod frame;
pub mod sync;

use std::sync::Arc;

use tracing::{info, warn};
use wgpu::util::DeviceExt;
use winit::window::Window;

use crate::component::OrbitCamera;
use crate::core::config::Config;
use crate::core::error::{GraphicsError, Result};
use crate::core::input::InputSystem;
use crate::core::scene::SceneConfig;
use crate::core::timer::Timer;
use crate::geometry::Vertex;
use crate::gfx::context::{WgpuContext, DEPTH_FORMAT};
use crate::scene::{build_castle_geometry, build_castle_scene, RenderItem};

use constants::{object_stride, ObjectConstants, PassConstants};
use frame::{FrameResource, FrameRing, NUM_FRAME_RESOURCES};
use sync::{FenceManager, FenceValue};

/// 城堡场景渲染器
pub struct Renderer {
    context: WgpuContext,

    pipeline_solid: wgpu::RenderPipeline,
    pipeline_wireframe: Option<wgpu::RenderPipeline>,
    wireframe_active: bool,
    wireframe_warned: bool,

    vertex_buffer: wgpu::Buffer,
    index_buffer: wgpu::Buffer,
    index_count_total: u32,

    render_items: Vec<RenderItem>,
    camera: OrbitCamera,
    clear_color: wgpu::Color,

    fence: FenceManager,
    frames: FrameRing<FrameResource>,
}

impl Renderer {
    /// 创建渲染器：建立设备、上传几何、搭建场景并准备帧资源环
    pub fn new(window: Arc<Window>, config: &Config, scene_config: &SceneConfig) -> Result<Self> {
        let context = WgpuContext::new(window, config.graphics.vsync)?;

        // 几何与场景
        let geometry = build_castle_geometry()?;
        let render_items = build_castle_scene(&geometry)?;

        let vertex_buffer = context
            .device
            .create_buffer_init(&wgpu::util::BufferInitDescriptor {
                label: Some("Shared Vertex Buffer"),
                contents: bytemuck::cast_slice(&geometry.vertices),
                usage: wgpu::BufferUsages::VERTEX,
            });

        let index_buffer = context
            .device
            .create_buffer_init(&wgpu::util::BufferInitDescriptor {
                label: Some("Shared Index Buffer"),
                contents: bytemuck::cast_slice(&geometry.indices),
                usage: wgpu::BufferUsages::INDEX,
            });

        // 着色器与绑定布局
        let shader = context
            .device
            .create_shader_module(wgpu::ShaderModuleDescriptor {
                label: Some("Castle Shader"),
                source: wgpu::ShaderSource::Wgsl(include_str!("shaders/castle.wgsl").into()),
            });

        let object_layout =
            context
                .device
                .create_bind_group_layout(&wgpu::BindGroupLayoutDescriptor {
                    label: Some("Object Constants Layout"),
                    entries: &[wgpu::BindGroupLayoutEntry {
                        binding: 0,
                        visibility: wgpu::ShaderStages::VERTEX,
                        ty: wgpu::BindingType::Buffer {
                            ty: wgpu::BufferBindingType::Uniform,
                            has_dynamic_offset: true,
                            min_binding_size: wgpu::BufferSize::new(
                                std::mem::size_of::<ObjectConstants>() as u64,
                            ),
                        },
                        count: None,
                    }],
                });

        let pass_layout =
            context
                .device
                .create_bind_group_layout(&wgpu::BindGroupLayoutDescriptor {
                    label: Some("Pass Constants Layout"),
                    entries: &[wgpu::BindGroupLayoutEntry {
                        binding: 0,
                        visibility: wgpu::ShaderStages::VERTEX | wgpu::ShaderStages::FRAGMENT,
                        ty: wgpu::BindingType::Buffer {
                            ty: wgpu::BufferBindingType::Uniform,
                            has_dynamic_offset: false,
                            min_binding_size: wgpu::BufferSize::new(
                                std::mem::size_of::<PassConstants>() as u64,
                            ),
                        },
                        count: None,
                    }],
                });

        let pipeline_layout =
            context
                .device
                .create_pipeline_layout(&wgpu::PipelineLayoutDescriptor {
                    label: Some("Castle Pipeline Layout"),
                    bind_group_layouts: &[&object_layout, &pass_layout],
                    push_constant_ranges: &[],
                });

        let pipeline_solid = create_pipeline(
            &context,
            &pipeline_layout,
            &shader,
            wgpu::PolygonMode::Fill,
            "Castle Pipeline (Solid)",
        );

        // 线框管线只在设备支持时创建
        let pipeline_wireframe = if context.supports_wireframe {
            Some(create_pipeline(
                &context,
                &pipeline_layout,
                &shader,
                wgpu::PolygonMode::Line,
                "Castle Pipeline (Wireframe)",
            ))
        } else {
            None
        };

        // 相机
        let cam_cfg = &scene_config.camera;
        let mut camera = OrbitCamera::new(cam_cfg.theta, cam_cfg.phi, cam_cfg.radius);
        camera.set_lens(
            cam_cfg.fov.to_radians(),
            context.aspect_ratio(),
            cam_cfg.near_clip,
            cam_cfg.far_clip,
        );

        // 帧资源环
        let object_count = render_items.len();
        let frames = FrameRing::new(
            (0..NUM_FRAME_RESOURCES)
                .map(|i| {
                    FrameResource::new(
                        &context.device,
                        &object_layout,
                        &pass_layout,
                        object_count,
                        i,
                    )
                })
                .collect(),
        );

        let [r, g, b, a] = scene_config.clear_color;
        let clear_color = wgpu::Color {
            r: r as f64,
            g: g as f64,
            b: b as f64,
            a: a as f64,
        };

        let index_count_total = geometry.index_count() as u32;

        info!(
            "Renderer initialized: {} render items, {} frame resources",
            object_count, NUM_FRAME_RESOURCES
        );

        Ok(Self {
            context,
            pipeline_solid,
            pipeline_wireframe,
            wireframe_active: false,
            wireframe_warned: false,
            vertex_buffer,
            index_buffer,
            index_count_total,
            render_items,
            camera,
            clear_color,
            fence: FenceManager::new(),
            frames,
        })
    }

    /// 每帧更新：处理输入、推进帧资源环、等待围栏并写入常量
    pub fn update(&mut self, input: &mut InputSystem, timer: &Timer) {
        // 线框切换
        self.wireframe_active = input.wireframe_held();
        if self.wireframe_active && self.pipeline_wireframe.is_none() && !self.wireframe_warned {
            warn!("Wireframe mode unavailable on this device, drawing solid");
            self.wireframe_warned = true;
        }

        // 相机
        input.update_camera(&mut self.camera);

        // 推进帧资源环，重用前等待该槽位上一次提交完成
        let frame = self.frames.advance();
        if frame.fence_value != 0 {
            while self.fence.completed_value() < frame.fence_value {
                let _ = self.context.device.poll(wgpu::Maintain::Wait);
            }
        }

        // 只重写世界矩阵仍然脏的对象槽位
        for item in &mut self.render_items {
            if item.num_frames_dirty > 0 {
                let object = ObjectConstants::new(&item.world);
                self.context.queue.write_buffer(
                    &frame.object_buffer,
                    item.object_index as u64 * object_stride(),
                    bytemuck::bytes_of(&object),
                );
                item.num_frames_dirty -= 1;
            }
        }

        // 相机每帧都可能变化，通道常量无条件重写
        let pass = build_pass_constants(
            &self.camera,
            self.context.surface_config.width,
            self.context.surface_config.height,
            timer.total_time(),
            timer.delta_time(),
        );
        self.context
            .queue
            .write_buffer(&frame.pass_buffer, 0, bytemuck::bytes_of(&pass));
    }

    /// 绘制一帧并在提交上打围栏值
    pub fn draw(&mut self) -> Result<()> {
        let surface_texture = match self.context.surface.get_current_texture() {
            Ok(t) => t,
            Err(wgpu::SurfaceError::Lost | wgpu::SurfaceError::Outdated) => {
                self.context.reconfigure();
                return Ok(());
            }
            Err(wgpu::SurfaceError::Timeout) => {
                warn!("Surface frame acquisition timed out, skipping frame");
                return Ok(());
            }
            Err(wgpu::SurfaceError::OutOfMemory) => {
                return Err(GraphicsError::SwapchainError(
                    "out of memory acquiring surface frame".to_string(),
                )
                .into());
            }
        };

        let view = surface_texture
            .texture
            .create_view(&wgpu::TextureViewDescriptor::default());

        let mut encoder =
            self.context
                .device
                .create_command_encoder(&wgpu::CommandEncoderDescriptor {
                    label: Some("Castle Frame Encoder"),
                });

        {
            let mut render_pass = encoder.begin_render_pass(&wgpu::RenderPassDescriptor {
                label: Some("Castle Render Pass"),
                color_attachments: &[Some(wgpu::RenderPassColorAttachment {
                    view: &view,
                    resolve_target: None,
                    ops: wgpu::Operations {
                        load: wgpu::LoadOp::Clear(self.clear_color),
                        store: wgpu::StoreOp::Store,
                    },
                })],
                depth_stencil_attachment: Some(wgpu::RenderPassDepthStencilAttachment {
                    view: self.context.depth_view(),
                    depth_ops: Some(wgpu::Operations {
                        load: wgpu::LoadOp::Clear(1.0),
                        store: wgpu::StoreOp::Store,
                    }),
                    stencil_ops: None,
                }),
                timestamp_writes: None,
                occlusion_query_set: None,
            });

            let pipeline = match (&self.pipeline_wireframe, self.wireframe_active) {
                (Some(wireframe), true) => wireframe,
                _ => &self.pipeline_solid,
            };
            render_pass.set_pipeline(pipeline);

            render_pass.set_vertex_buffer(0, self.vertex_buffer.slice(..));
            render_pass.set_index_buffer(self.index_buffer.slice(..), wgpu::IndexFormat::Uint16);

            let frame = self.frames.current();
            render_pass.set_bind_group(1, &frame.pass_bind_group, &[]);

            for item in &self.render_items {
                let offset = (item.object_index as u64 * object_stride()) as u32;
                render_pass.set_bind_group(0, &frame.object_bind_group, &[offset]);

                let start = item.submesh.start_index;
                let end = start + item.submesh.index_count;
                debug_assert!(end <= self.index_count_total);
                render_pass.draw_indexed(start..end, item.submesh.base_vertex, 0..1);
            }
        }

        self.context.queue.submit(std::iter::once(encoder.finish()));

        // 提交后打围栏值，完成回调推进已完成计数
        let value = self.fence.next_value();
        self.frames.current_mut().fence_value = value.value();
        let handle = self.fence.completion_handle();
        self.context.queue.on_submitted_work_done(move || {
            handle.signal(value);
        });

        surface_texture.present();

        Ok(())
    }

    /// 窗口尺寸变化
    pub fn resize(&mut self, width: u32, height: u32) {
        self.context.resize(width, height);
        self.camera.set_aspect(self.context.aspect_ratio());
    }

    pub fn window(&self) -> &Window {
        &self.context.window
    }

    #[allow(dead_code)]
    pub fn last_fence_value(&self) -> FenceValue {
        FenceValue(self.fence.current_value())
    }
}

/// 根据相机和计时器组装通道常量块
fn build_pass_constants(
    camera: &OrbitCamera,
    width: u32,
    height: u32,
    total_time: f32,
    delta_time: f32,
) -> PassConstants {
    let view = camera.view_matrix();
    let proj = camera.proj_matrix();
    let view_proj = proj * view;
    let eye = camera.eye_position();

    let identity = crate::math::Matrix4::identity();
    let inv_view = view.try_inverse().unwrap_or(identity);
    let inv_proj = proj.try_inverse().unwrap_or(identity);
    let inv_view_proj = view_proj.try_inverse().unwrap_or(identity);

    let (w, h) = (width as f32, height as f32);

    PassConstants {
        view: *view.as_ref(),
        inv_view: *inv_view.as_ref(),
        proj: *proj.as_ref(),
        inv_proj: *inv_proj.as_ref(),
        view_proj: *view_proj.as_ref(),
        inv_view_proj: *inv_view_proj.as_ref(),
        eye_pos: [eye.x, eye.y, eye.z],
        _pad0: 0.0,
        render_target_size: [w, h],
        inv_render_target_size: [1.0 / w, 1.0 / h],
        near_z: camera.near_z(),
        far_z: camera.far_z(),
        total_time,
        delta_time,
    }
}

/// 创建渲染管线
///
/// 生成的形状绕序不完全统一，关闭背面剔除以保证两面都可见。
fn create_pipeline(
    context: &WgpuContext,
    layout: &wgpu::PipelineLayout,
    shader: &wgpu::ShaderModule,
    polygon_mode: wgpu::PolygonMode,
    label: &str,
) -> wgpu::RenderPipeline {
    context
        .device
        .create_render_pipeline(&wgpu::RenderPipelineDescriptor {
            label: Some(label),
            layout: Some(layout),
            vertex: wgpu::VertexState {
                module: shader,
                entry_point: "vs_main",
                buffers: &[Vertex::layout()],
            },
            fragment: Some(wgpu::FragmentState {
                module: shader,
                entry_point: "fs_main",
                targets: &[Some(wgpu::ColorTargetState {
                    format: context.surface_config.format,
                    blend: Some(wgpu::BlendState::REPLACE),
                    write_mask: wgpu::ColorWrites::ALL,
                })],
            }),
            primitive: wgpu::PrimitiveState {
                topology: wgpu::PrimitiveTopology::TriangleList,
                strip_index_format: None,
                front_face: wgpu::FrontFace::Ccw,
                cull_mode: None,
                unclipped_depth: false,
                polygon_mode,
                conservative: false,
            },
            depth_stencil: Some(wgpu::DepthStencilState {
                format: DEPTH_FORMAT,
                depth_write_enabled: true,
                depth_compare: wgpu::CompareFunction::Less,
                stencil: wgpu::StencilState::default(),
                bias: wgpu::DepthBiasState::default(),
            }),
            multisample: wgpu::MultisampleState::default(),
            multiview: None,
        })
}
