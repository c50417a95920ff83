//! 统一的数学库模块
//!
//! 提供图形编程常用的数学类型和函数，基于 `nalgebra`。
//!
//! # 模块组织
//!
//! - **基础类型**：Vector2/3/4, Matrix4
//! - **常量**：PI, TAU 等
//! - **工具函数**：clamp, lerp 等
//! - **矩阵辅助函数**：translation, scaling, rotation, perspective, look_at
//!
//! # 设计理念
//!
//! - 简洁的类型名称（Vector3, Matrix4 等）
//! - 与 DirectXMath 类似的 API 风格
//! - 零成本抽象，性能与手写代码相当

// 允许未使用的代码，因为这是一个工具库，不是所有函数都会立即使用
#![allow(dead_code)]

pub use nalgebra::{
    Matrix4 as Mat4, Point3, Vector2 as Vec2, Vector3 as Vec3, Vector4 as Vec4,
};

// 类型别名，使用更简洁的名称
pub type Vector2 = Vec2<f32>;
pub type Vector3 = Vec3<f32>;
pub type Vector4 = Vec4<f32>;
pub type Matrix4 = Mat4<f32>;

pub use constants::{DEG_TO_RAD, EPSILON, PI, TAU};
pub use matrix::{
    look_at, perspective, rotation_x, rotation_y, rotation_z, scaling, translation,
};

/// 数学常量
pub mod constants {
    /// π
    pub const PI: f32 = std::f32::consts::PI;

    /// 2π
    pub const TAU: f32 = std::f32::consts::TAU;

    /// 角度转弧度的系数
    pub const DEG_TO_RAD: f32 = PI / 180.0;

    /// 浮点数比较的 epsilon
    pub const EPSILON: f32 = 1e-6;
}

/// 数学工具函数
pub mod utils {
    use super::*;

    /// 限制值在范围内
    pub fn clamp<T: PartialOrd>(value: T, min: T, max: T) -> T {
        if value < min {
            min
        } else if value > max {
            max
        } else {
            value
        }
    }

    /// 线性插值
    pub fn lerp(a: f32, b: f32, t: f32) -> f32 {
        a + (b - a) * t
    }

    /// 角度转弧度
    pub fn deg_to_rad(degrees: f32) -> f32 {
        degrees * constants::DEG_TO_RAD
    }

    /// 检查两个浮点数是否近似相等
    pub fn approx_eq(a: f32, b: f32, epsilon: f32) -> bool {
        (a - b).abs() < epsilon
    }
}

/// 矩阵辅助函数
///
/// 城堡布局代码大量使用这些函数拼接世界矩阵。
/// 注意 nalgebra 是列向量约定：`translation(..) * rotation * scaling(..)`
/// 表示先缩放、再旋转、最后平移。
pub mod matrix {
    use super::*;

    /// 创建平移矩阵
    pub fn translation(x: f32, y: f32, z: f32) -> Matrix4 {
        Matrix4::new_translation(&Vector3::new(x, y, z))
    }

    /// 创建缩放矩阵
    pub fn scaling(x: f32, y: f32, z: f32) -> Matrix4 {
        Matrix4::new_nonuniform_scaling(&Vector3::new(x, y, z))
    }

    /// 创建绕 X 轴旋转的矩阵
    pub fn rotation_x(angle: f32) -> Matrix4 {
        Matrix4::from_axis_angle(&Vector3::x_axis(), angle)
    }

    /// 创建绕 Y 轴旋转的矩阵
    pub fn rotation_y(angle: f32) -> Matrix4 {
        Matrix4::from_axis_angle(&Vector3::y_axis(), angle)
    }

    /// 创建绕 Z 轴旋转的矩阵
    pub fn rotation_z(angle: f32) -> Matrix4 {
        Matrix4::from_axis_angle(&Vector3::z_axis(), angle)
    }

    /// 创建透视投影矩阵
    pub fn perspective(fov_y: f32, aspect: f32, near: f32, far: f32) -> Matrix4 {
        Matrix4::new_perspective(aspect, fov_y, near, far)
    }

    /// 创建 Look-At 视图矩阵
    pub fn look_at(eye: &Vector3, target: &Vector3, up: &Vector3) -> Matrix4 {
        Matrix4::look_at_rh(&Point3::from(*eye), &Point3::from(*target), up)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_clamp() {
        assert_eq!(utils::clamp(5.0, 0.0, 1.0), 1.0);
        assert_eq!(utils::clamp(-5.0, 0.0, 1.0), 0.0);
        assert_eq!(utils::clamp(0.5, 0.0, 1.0), 0.5);
    }

    #[test]
    fn test_matrix_translation() {
        let mat = matrix::translation(1.0, 2.0, 3.0);
        let point = Vector4::new(0.0, 0.0, 0.0, 1.0);
        let result = mat * point;

        assert!((result.x - 1.0).abs() < 1e-6);
        assert!((result.y - 2.0).abs() < 1e-6);
        assert!((result.z - 3.0).abs() < 1e-6);
    }

    #[test]
    fn test_scale_then_translate_order() {
        // 列向量约定下 T * S 表示先缩放后平移
        let world = matrix::translation(0.0, 2.0, 0.0) * matrix::scaling(2.0, 2.0, 2.0);
        let p = world * Vector4::new(0.5, 0.5, 0.0, 1.0);

        assert!((p.x - 1.0).abs() < 1e-6);
        assert!((p.y - 3.0).abs() < 1e-6);
    }
}
