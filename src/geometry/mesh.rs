//! 共享几何缓冲区打包模块
//!
//! 把多个程序化网格拼接进同一对顶点/索引缓冲区，
//! 并为每个网格记录一个子网格（偏移 + 数量）。
//! 绘制时按名字查找子网格，用 `base_vertex` + `start_index`
//! 从共享缓冲区中取出对应的区段。

use std::collections::HashMap;

use crate::core::error::{CastleRenderError, GeometryError, Result};
use crate::geometry::primitives::MeshData;
use crate::geometry::vertex::Vertex;

/// 子网格：共享缓冲区中一个网格的绘制区段
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Submesh {
    /// 索引数量
    pub index_count: u32,

    /// 在共享索引缓冲区中的起始索引
    pub start_index: u32,

    /// 顶点基址：索引值在共享顶点缓冲区中的偏移
    pub base_vertex: i32,
}

/// 打包后的共享几何缓冲区（CPU 侧）
///
/// 索引用 16 位存储；打包时检查每个网格的顶点数不超过
/// 16 位索引能表达的范围。
#[derive(Debug, Default)]
pub struct GeometryBuffer {
    /// 所有网格拼接后的顶点数组
    pub vertices: Vec<Vertex>,

    /// 所有网格拼接后的索引数组
    pub indices: Vec<u16>,

    /// 按名字查找子网格
    submeshes: HashMap<String, Submesh>,
}

impl GeometryBuffer {
    /// 把一组命名网格打包进共享缓冲区
    ///
    /// 每个条目是（名字，网格数据，统一颜色）。
    /// 打包顺序决定各网格在缓冲区中的区段位置。
    pub fn pack(meshes: Vec<(&str, MeshData, [f32; 4])>) -> Result<Self> {
        let mut buffer = GeometryBuffer::default();

        for (name, mesh, color) in meshes {
            buffer.append(name, mesh, color)?;
        }

        Ok(buffer)
    }

    /// 追加一个网格，返回其子网格区段
    fn append(&mut self, name: &str, mesh: MeshData, color: [f32; 4]) -> Result<Submesh> {
        mesh.validate()
            .map_err(|e| CastleRenderError::Geometry(GeometryError::ValidationError(e)))?;

        // 索引缓冲区是 16 位的，单个网格的顶点数不能超出其表达范围
        if mesh.vertex_count() > u16::MAX as usize + 1 {
            return Err(CastleRenderError::Geometry(GeometryError::IndexOverflow {
                vertex_count: mesh.vertex_count(),
            }));
        }

        let submesh = Submesh {
            index_count: mesh.index_count() as u32,
            start_index: self.indices.len() as u32,
            base_vertex: self.vertices.len() as i32,
        };

        for position in mesh.positions {
            self.vertices.push(Vertex { position, color });
        }
        for index in mesh.indices {
            self.indices.push(index as u16);
        }

        self.submeshes.insert(name.to_string(), submesh);
        Ok(submesh)
    }

    /// 按名字查找子网格
    pub fn submesh(&self, name: &str) -> Result<Submesh> {
        self.submeshes.get(name).copied().ok_or_else(|| {
            CastleRenderError::Geometry(GeometryError::UnknownSubmesh(name.to_string()))
        })
    }

    /// 总顶点数
    pub fn vertex_count(&self) -> usize {
        self.vertices.len()
    }

    /// 总索引数
    pub fn index_count(&self) -> usize {
        self.indices.len()
    }

    /// 验证所有子网格区段都落在缓冲区范围内
    pub fn validate(&self) -> Result<()> {
        for (name, sub) in &self.submeshes {
            let index_end = sub.start_index as usize + sub.index_count as usize;
            if index_end > self.indices.len() {
                return Err(CastleRenderError::Geometry(GeometryError::ValidationError(
                    format!("submesh '{}' index range exceeds buffer", name),
                )));
            }

            // 区段内每个索引加上基址后必须指向有效顶点
            for &i in &self.indices[sub.start_index as usize..index_end] {
                let v = sub.base_vertex as i64 + i as i64;
                if v < 0 || v as usize >= self.vertices.len() {
                    return Err(CastleRenderError::Geometry(GeometryError::ValidationError(
                        format!("submesh '{}' references vertex {} out of range", name, v),
                    )));
                }
            }
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::geometry::primitives::{create_box, create_grid, create_sphere};

    #[test]
    fn test_pack_bookkeeping() {
        let box_mesh = create_box(1.0, 1.0, 1.0);
        let grid_mesh = create_grid(20.0, 30.0, 10, 10);

        let box_vertices = box_mesh.vertex_count();
        let box_indices = box_mesh.index_count();
        let grid_vertices = grid_mesh.vertex_count();
        let grid_indices = grid_mesh.index_count();

        let buffer = GeometryBuffer::pack(vec![
            ("box", box_mesh, [1.0, 0.0, 0.0, 1.0]),
            ("grid", grid_mesh, [0.0, 1.0, 0.0, 1.0]),
        ])
        .unwrap();

        assert_eq!(buffer.vertex_count(), box_vertices + grid_vertices);
        assert_eq!(buffer.index_count(), box_indices + grid_indices);

        let box_sub = buffer.submesh("box").unwrap();
        assert_eq!(box_sub.start_index, 0);
        assert_eq!(box_sub.base_vertex, 0);
        assert_eq!(box_sub.index_count, box_indices as u32);

        let grid_sub = buffer.submesh("grid").unwrap();
        assert_eq!(grid_sub.start_index, box_indices as u32);
        assert_eq!(grid_sub.base_vertex, box_vertices as i32);
        assert_eq!(grid_sub.index_count, grid_indices as u32);
    }

    #[test]
    fn test_pack_assigns_colors_per_mesh() {
        let red = [1.0, 0.0, 0.0, 1.0];
        let green = [0.0, 1.0, 0.0, 1.0];

        let buffer = GeometryBuffer::pack(vec![
            ("a", create_box(1.0, 1.0, 1.0), red),
            ("b", create_box(1.0, 1.0, 1.0), green),
        ])
        .unwrap();

        let a = buffer.submesh("a").unwrap();
        let b = buffer.submesh("b").unwrap();

        for v in &buffer.vertices[a.base_vertex as usize..b.base_vertex as usize] {
            assert_eq!(v.color, red);
        }
        for v in &buffer.vertices[b.base_vertex as usize..] {
            assert_eq!(v.color, green);
        }
    }

    #[test]
    fn test_pack_validates_ranges() {
        let buffer = GeometryBuffer::pack(vec![
            ("box", create_box(1.0, 1.0, 1.0), [1.0; 4]),
            ("sphere", create_sphere(0.5, 20, 20), [1.0; 4]),
        ])
        .unwrap();

        buffer.validate().unwrap();
    }

    #[test]
    fn test_unknown_submesh_is_error() {
        let buffer =
            GeometryBuffer::pack(vec![("box", create_box(1.0, 1.0, 1.0), [1.0; 4])]).unwrap();

        assert!(buffer.submesh("missing").is_err());
    }

    #[test]
    fn test_index_overflow_rejected() {
        // 257 x 257 网格有 66049 个顶点，超出 16 位索引范围
        let big = create_grid(10.0, 10.0, 257, 257);
        assert!(big.vertex_count() > u16::MAX as usize + 1);

        let result = GeometryBuffer::pack(vec![("big", big, [1.0; 4])]);
        assert!(matches!(
            result,
            Err(CastleRenderError::Geometry(GeometryError::IndexOverflow { .. }))
        ));
    }
}
