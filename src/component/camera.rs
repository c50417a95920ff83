//! 轨道相机组件
//!
//! 相机绕世界原点运行，位置由球面坐标（theta、phi、radius）决定。
//! 鼠标左键拖动改变角度，右键拖动改变半径（见 [`crate::core::input`]）。

use crate::math::{Matrix4, Vector3, PI};

/// 极角的最小/最大值，避免相机越过两极造成上向量翻转
const PHI_MIN: f32 = 0.1;
const PHI_MAX: f32 = PI - 0.1;

/// 半径（相机到原点的距离）的允许范围
const RADIUS_MIN: f32 = 5.0;
const RADIUS_MAX: f32 = 150.0;

/// 轨道相机
///
/// 维护球面坐标和投影参数，按需生成视图/投影矩阵。
#[derive(Debug, Clone)]
pub struct OrbitCamera {
    /// 方位角（绕 Y 轴，弧度）
    theta: f32,

    /// 极角（与 +Y 轴夹角，弧度）
    phi: f32,

    /// 到原点的距离
    radius: f32,

    /// 垂直视场角（弧度）
    fov_y: f32,

    /// 宽高比
    aspect: f32,

    /// 近裁剪面
    near_z: f32,

    /// 远裁剪面
    far_z: f32,
}

impl OrbitCamera {
    /// 创建轨道相机
    ///
    /// 初始角度和半径会立即被钳制到允许范围内。
    pub fn new(theta: f32, phi: f32, radius: f32) -> Self {
        Self {
            theta,
            phi: phi.clamp(PHI_MIN, PHI_MAX),
            radius: radius.clamp(RADIUS_MIN, RADIUS_MAX),
            fov_y: 45.0_f32.to_radians(),
            aspect: 16.0 / 9.0,
            near_z: 1.0,
            far_z: 1000.0,
        }
    }

    /// 设置投影参数
    pub fn set_lens(&mut self, fov_y: f32, aspect: f32, near_z: f32, far_z: f32) {
        self.fov_y = fov_y;
        self.aspect = aspect;
        self.near_z = near_z;
        self.far_z = far_z;
    }

    /// 窗口尺寸变化时更新宽高比
    pub fn set_aspect(&mut self, aspect: f32) {
        self.aspect = aspect;
    }

    /// 绕原点旋转
    ///
    /// 方位角自由累加，极角钳制在 (0.1, PI - 0.1) 之内。
    pub fn orbit(&mut self, d_theta: f32, d_phi: f32) {
        self.theta += d_theta;
        self.phi = (self.phi + d_phi).clamp(PHI_MIN, PHI_MAX);
    }

    /// 沿视线方向推拉
    ///
    /// 半径钳制在 [5, 150] 之内。
    pub fn zoom(&mut self, delta: f32) {
        self.radius = (self.radius + delta).clamp(RADIUS_MIN, RADIUS_MAX);
    }

    #[inline]
    pub fn theta(&self) -> f32 {
        self.theta
    }

    #[inline]
    pub fn phi(&self) -> f32 {
        self.phi
    }

    #[inline]
    pub fn radius(&self) -> f32 {
        self.radius
    }

    #[inline]
    pub fn near_z(&self) -> f32 {
        self.near_z
    }

    #[inline]
    pub fn far_z(&self) -> f32 {
        self.far_z
    }

    /// 球面坐标转换得到的相机位置
    pub fn eye_position(&self) -> Vector3 {
        Vector3::new(
            self.radius * self.phi.sin() * self.theta.cos(),
            self.radius * self.phi.cos(),
            self.radius * self.phi.sin() * self.theta.sin(),
        )
    }

    /// 视图矩阵：从相机位置看向原点，上方向为 +Y
    pub fn view_matrix(&self) -> Matrix4 {
        crate::math::look_at(
            &self.eye_position(),
            &Vector3::new(0.0, 0.0, 0.0),
            &Vector3::new(0.0, 1.0, 0.0),
        )
    }

    /// 投影矩阵
    pub fn proj_matrix(&self) -> Matrix4 {
        crate::math::perspective(self.fov_y, self.aspect, self.near_z, self.far_z)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_phi_clamped() {
        let mut cam = OrbitCamera::new(1.5 * PI, 0.2 * PI, 15.0);

        cam.orbit(0.0, 100.0);
        assert!(cam.phi() <= PHI_MAX + 1e-6);

        cam.orbit(0.0, -200.0);
        assert!(cam.phi() >= PHI_MIN - 1e-6);
    }

    #[test]
    fn test_theta_unbounded() {
        let mut cam = OrbitCamera::new(0.0, 0.5 * PI, 15.0);
        cam.orbit(10.0 * PI, 0.0);
        assert!((cam.theta() - 10.0 * PI).abs() < 1e-5);
    }

    #[test]
    fn test_radius_clamped() {
        let mut cam = OrbitCamera::new(0.0, 0.5 * PI, 15.0);

        cam.zoom(1000.0);
        assert_eq!(cam.radius(), RADIUS_MAX);

        cam.zoom(-1000.0);
        assert_eq!(cam.radius(), RADIUS_MIN);
    }

    #[test]
    fn test_constructor_clamps() {
        let cam = OrbitCamera::new(0.0, -1.0, 0.5);
        assert!(cam.phi() >= PHI_MIN);
        assert_eq!(cam.radius(), RADIUS_MIN);
    }

    #[test]
    fn test_eye_on_sphere() {
        let mut cam = OrbitCamera::new(1.5 * PI, 0.2 * PI, 15.0);

        for i in 0..100 {
            cam.orbit(0.37, -0.13);
            cam.zoom(if i % 2 == 0 { 3.0 } else { -1.0 });

            let eye = cam.eye_position();
            assert!((eye.norm() - cam.radius()).abs() < 1e-3);
        }
    }

    #[test]
    fn test_default_lens() {
        let cam = OrbitCamera::new(1.5 * PI, 0.2 * PI, 15.0);
        assert_eq!(cam.near_z(), 1.0);
        assert_eq!(cam.far_z(), 1000.0);
    }
}
