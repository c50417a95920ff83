//! 顶点数据定义
//!
//! 本模块定义了渲染管线使用的顶点结构体。
//!
//! # 设计说明
//!
//! - 使用 `#[repr(C)]` 确保内存布局与着色器一致
//! - 实现 `Pod` 和 `Zeroable` trait 以支持零拷贝传输到 GPU
//! - 本示例的着色器只需要位置和颜色两个属性

use bytemuck::{Pod, Zeroable};

/// 顶点结构体
///
/// 定义了每个顶点的属性数据，包括位置和颜色。
/// 这个结构体会被直接传输到 GPU 的顶点缓冲区。
///
/// # 内存布局
///
/// - `position`：前 12 字节（3 个 f32）
/// - `color`：后 16 字节（4 个 f32）
///
/// 总大小：28 字节
#[repr(C)]
#[derive(Default, Clone, Copy, Debug, PartialEq, Pod, Zeroable)]
pub struct Vertex {
    /// 顶点位置（3D 坐标）
    pub position: [f32; 3],
    /// 顶点颜色（RGBA，范围 0.0-1.0）
    pub color: [f32; 4],
}

impl Vertex {
    /// 创建一个新顶点
    pub fn new(position: [f32; 3], color: [f32; 4]) -> Self {
        Self { position, color }
    }

    /// 顶点缓冲布局描述
    ///
    /// 与 `castle.wgsl` 中的 `VertexInput` 对应。
    pub fn layout() -> wgpu::VertexBufferLayout<'static> {
        wgpu::VertexBufferLayout {
            array_stride: std::mem::size_of::<Vertex>() as wgpu::BufferAddress,
            step_mode: wgpu::VertexStepMode::Vertex,
            attributes: &[
                // position
                wgpu::VertexAttribute {
                    offset: 0,
                    shader_location: 0,
                    format: wgpu::VertexFormat::Float32x3,
                },
                // color
                wgpu::VertexAttribute {
                    offset: std::mem::size_of::<[f32; 3]>() as wgpu::BufferAddress,
                    shader_location: 1,
                    format: wgpu::VertexFormat::Float32x4,
                },
            ],
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_vertex_size() {
        assert_eq!(std::mem::size_of::<Vertex>(), 28);
    }

    #[test]
    fn test_layout_matches_struct() {
        let layout = Vertex::layout();
        assert_eq!(layout.array_stride, 28);
        assert_eq!(layout.attributes.len(), 2);
        assert_eq!(layout.attributes[1].offset, 12);
    }
}
