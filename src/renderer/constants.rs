//! 着色器常量块定义
//!
//! 对象常量按 256 字节对齐的步长打包进一个动态偏移的 uniform 缓冲区，
//! 每帧资源各持有一份；相机常量块每帧一份。
//! 内存布局必须与 `shaders/castle.wgsl` 中的结构一致。

use bytemuck::{Pod, Zeroable};

use crate::math::Matrix4;

/// uniform 缓冲区动态偏移的对齐要求
pub const UNIFORM_ALIGNMENT: u64 = 256;

/// 每个对象的常量块
#[repr(C)]
#[derive(Debug, Clone, Copy, Pod, Zeroable)]
pub struct ObjectConstants {
    /// 世界矩阵（列主序）
    pub world: [[f32; 4]; 4],
}

impl ObjectConstants {
    pub fn new(world: &Matrix4) -> Self {
        Self {
            world: *world.as_ref(),
        }
    }
}

impl Default for ObjectConstants {
    fn default() -> Self {
        Self::new(&Matrix4::identity())
    }
}

/// 每个渲染通道的常量块（相机与时间）
#[repr(C)]
#[derive(Debug, Clone, Copy, Pod, Zeroable)]
pub struct PassConstants {
    pub view: [[f32; 4]; 4],
    pub inv_view: [[f32; 4]; 4],
    pub proj: [[f32; 4]; 4],
    pub inv_proj: [[f32; 4]; 4],
    pub view_proj: [[f32; 4]; 4],
    pub inv_view_proj: [[f32; 4]; 4],
    pub eye_pos: [f32; 3],
    pub _pad0: f32,
    pub render_target_size: [f32; 2],
    pub inv_render_target_size: [f32; 2],
    pub near_z: f32,
    pub far_z: f32,
    pub total_time: f32,
    pub delta_time: f32,
}

impl Default for PassConstants {
    fn default() -> Self {
        let identity = *Matrix4::identity().as_ref();
        Self {
            view: identity,
            inv_view: identity,
            proj: identity,
            inv_proj: identity,
            view_proj: identity,
            inv_view_proj: identity,
            eye_pos: [0.0; 3],
            _pad0: 0.0,
            render_target_size: [0.0; 2],
            inv_render_target_size: [0.0; 2],
            near_z: 0.0,
            far_z: 0.0,
            total_time: 0.0,
            delta_time: 0.0,
        }
    }
}

/// 计算按对齐要求取整后的步长
pub fn aligned_stride(size: u64) -> u64 {
    (size + UNIFORM_ALIGNMENT - 1) / UNIFORM_ALIGNMENT * UNIFORM_ALIGNMENT
}

/// 对象常量在缓冲区中的步长
pub fn object_stride() -> u64 {
    aligned_stride(std::mem::size_of::<ObjectConstants>() as u64)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_aligned_stride() {
        assert_eq!(aligned_stride(1), 256);
        assert_eq!(aligned_stride(64), 256);
        assert_eq!(aligned_stride(256), 256);
        assert_eq!(aligned_stride(257), 512);
    }

    #[test]
    fn test_object_stride() {
        assert_eq!(std::mem::size_of::<ObjectConstants>(), 64);
        assert_eq!(object_stride(), 256);
    }

    #[test]
    fn test_pass_constants_layout() {
        // 6 个矩阵 + eye_pos/pad + 两个 vec2 + 4 个标量
        assert_eq!(
            std::mem::size_of::<PassConstants>(),
            6 * 64 + 16 + 16 + 16
        );
        assert_eq!(std::mem::size_of::<PassConstants>() % 16, 0);
    }

    #[test]
    fn test_object_constants_from_matrix() {
        let m = crate::math::translation(1.0, 2.0, 3.0);
        let c = ObjectConstants::new(&m);
        // 列主序：平移分量在第 4 列
        assert_eq!(c.world[3][0], 1.0);
        assert_eq!(c.world[3][1], 2.0);
        assert_eq!(c.world[3][2], 3.0);
    }
}
