//! 帧资源环
//!
//! CPU 每帧写入的常量缓冲区按帧资源复制三份，轮流使用。
//! 环前进到某个帧资源时，必须先等它上一次提交的围栏值完成，
//! 才能重写它的缓冲区。

use wgpu::util::DeviceExt;

use crate::renderer::constants::{object_stride, PassConstants};

/// 帧资源数量
pub const NUM_FRAME_RESOURCES: usize = 3;

/// 单个帧资源
///
/// 持有本帧专用的对象常量缓冲区（动态偏移）和通道常量缓冲区，
/// 以及绑定它们的 bind group。
pub struct FrameResource {
    /// 环中的序号
    pub index: usize,

    /// 本帧资源上一次提交时打的围栏值，0 表示从未提交过
    pub fence_value: u64,

    /// 对象常量缓冲区：object_count 个 256 字节对齐的槽位
    pub object_buffer: wgpu::Buffer,

    /// 通道常量缓冲区
    pub pass_buffer: wgpu::Buffer,

    pub object_bind_group: wgpu::BindGroup,
    pub pass_bind_group: wgpu::BindGroup,
}

impl FrameResource {
    /// 创建一个帧资源及其 bind group
    pub fn new(
        device: &wgpu::Device,
        object_layout: &wgpu::BindGroupLayout,
        pass_layout: &wgpu::BindGroupLayout,
        object_count: usize,
        index: usize,
    ) -> Self {
        let object_buffer = device.create_buffer(&wgpu::BufferDescriptor {
            label: Some(&format!("Object Constants {}", index)),
            size: object_stride() * object_count as u64,
            usage: wgpu::BufferUsages::UNIFORM | wgpu::BufferUsages::COPY_DST,
            mapped_at_creation: false,
        });

        let pass_buffer = device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
            label: Some(&format!("Pass Constants {}", index)),
            contents: bytemuck::bytes_of(&PassConstants::default()),
            usage: wgpu::BufferUsages::UNIFORM | wgpu::BufferUsages::COPY_DST,
        });

        let object_bind_group = device.create_bind_group(&wgpu::BindGroupDescriptor {
            label: Some(&format!("Object Bind Group {}", index)),
            layout: object_layout,
            entries: &[wgpu::BindGroupEntry {
                binding: 0,
                resource: wgpu::BindingResource::Buffer(wgpu::BufferBinding {
                    buffer: &object_buffer,
                    offset: 0,
                    size: wgpu::BufferSize::new(object_stride()),
                }),
            }],
        });

        let pass_bind_group = device.create_bind_group(&wgpu::BindGroupDescriptor {
            label: Some(&format!("Pass Bind Group {}", index)),
            layout: pass_layout,
            entries: &[wgpu::BindGroupEntry {
                binding: 0,
                resource: pass_buffer.as_entire_binding(),
            }],
        });

        Self {
            index,
            fence_value: 0,
            object_buffer,
            pass_buffer,
            object_bind_group,
            pass_bind_group,
        }
    }
}

/// 帧资源环
///
/// 固定大小的循环队列，`advance` 前进到下一个槽位。
pub struct FrameRing<F> {
    frames: Vec<F>,
    current: usize,
}

impl<F> FrameRing<F> {
    pub fn new(frames: Vec<F>) -> Self {
        assert!(!frames.is_empty());
        // 第一次 advance 后落在 0 号槽位
        let current = frames.len() - 1;
        Self { frames, current }
    }

    /// 前进到下一个槽位
    pub fn advance(&mut self) -> &mut F {
        self.current = (self.current + 1) % self.frames.len();
        &mut self.frames[self.current]
    }

    pub fn current(&self) -> &F {
        &self.frames[self.current]
    }

    pub fn current_mut(&mut self) -> &mut F {
        &mut self.frames[self.current]
    }

    pub fn current_index(&self) -> usize {
        self.current
    }

    pub fn len(&self) -> usize {
        self.frames.len()
    }

    pub fn is_empty(&self) -> bool {
        self.frames.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::renderer::sync::FenceManager;

    /// 只带围栏值的帧槽位，用来验证环与围栏的配合
    struct TestFrame {
        fence_value: u64,
    }

    #[test]
    fn test_ring_cycles_in_order() {
        let mut ring = FrameRing::new(vec![
            TestFrame { fence_value: 0 },
            TestFrame { fence_value: 0 },
            TestFrame { fence_value: 0 },
        ]);

        assert_eq!(ring.len(), 3);

        let visited: Vec<usize> = (0..7)
            .map(|_| {
                ring.advance();
                ring.current_index()
            })
            .collect();
        assert_eq!(visited, vec![0, 1, 2, 0, 1, 2, 0]);
    }

    #[test]
    fn test_frame_reuse_waits_for_fence() {
        let fence = FenceManager::new();
        let handle = fence.completion_handle();
        let mut ring = FrameRing::new(
            (0..NUM_FRAME_RESOURCES)
                .map(|_| TestFrame { fence_value: 0 })
                .collect(),
        );

        // 模拟 GPU：记录每帧提交的围栏值，按提交顺序完成
        let mut in_flight: Vec<crate::renderer::sync::FenceValue> = Vec::new();

        for _ in 0..10 {
            let frame = ring.advance();

            // 重用前该帧上一次的围栏值必须已经完成
            if frame.fence_value != 0 && fence.completed_value() < frame.fence_value {
                // 等待 = 让模拟 GPU 完成队列头部的提交，直到条件满足
                while fence.completed_value() < frame.fence_value {
                    let oldest = in_flight.remove(0);
                    handle.signal(oldest);
                }
            }
            assert!(fence.completed_value() >= frame.fence_value);

            // 提交本帧
            let value = fence.next_value();
            frame.fence_value = value.value();
            in_flight.push(value);
        }
    }

    #[test]
    fn test_fresh_frames_never_wait() {
        let fence = FenceManager::new();
        let mut ring = FrameRing::new(
            (0..NUM_FRAME_RESOURCES)
                .map(|_| TestFrame { fence_value: 0 })
                .collect(),
        );

        // 前 N 帧从未提交过，围栏值为 0，不需要等待
        for _ in 0..NUM_FRAME_RESOURCES {
            let frame = ring.advance();
            assert_eq!(frame.fence_value, 0);
            frame.fence_value = fence.next_value().value();
        }
    }
}
