//! 几何模块
//!
//! 提供程序化网格生成、共享缓冲区打包和顶点格式定义。

pub mod mesh;
pub mod primitives;
pub mod vertex;

pub use mesh::{GeometryBuffer, Submesh};
pub use primitives::MeshData;
pub use vertex::Vertex;
