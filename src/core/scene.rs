//! 场景配置模块
//!
//! 提供场景初始状态的加载（scene.toml）。
//! 场景本身（城堡布局）由代码生成，配置文件只控制相机初始位置和清屏颜色。
//!
//! # 配置文件格式 (scene.toml)
//!
//! ```toml
//! clear_color = [0.69, 0.77, 0.87, 1.0]
//!
//! [camera]
//! theta = 4.712    # 水平环绕角（弧度）
//! phi = 0.628      # 俯仰角（弧度）
//! radius = 15.0    # 环绕半径
//! fov = 45.0       # 垂直视场角（度）
//! near_clip = 1.0
//! far_clip = 1000.0
//! ```

use serde::{Deserialize, Serialize};
use std::f32::consts::PI;
use std::path::Path;

use super::error::{ConfigError, Result};

/// 场景配置
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SceneConfig {
    /// 清屏颜色（RGBA，线性空间之前的 0.0-1.0 值）
    #[serde(default = "default_clear_color")]
    pub clear_color: [f32; 4],

    /// 相机初始状态
    #[serde(default)]
    pub camera: CameraConfig,
}

/// 环绕相机的初始状态
///
/// 相机以球面坐标环绕原点：theta 为水平角，phi 为俯仰角，radius 为距离。
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CameraConfig {
    /// 水平环绕角（弧度）
    #[serde(default = "default_theta")]
    pub theta: f32,

    /// 俯仰角（弧度）
    #[serde(default = "default_phi")]
    pub phi: f32,

    /// 环绕半径
    #[serde(default = "default_radius")]
    pub radius: f32,

    /// 垂直视场角（度）
    #[serde(default = "default_fov")]
    pub fov: f32,

    /// 近裁剪面距离
    #[serde(default = "default_near_clip")]
    pub near_clip: f32,

    /// 远裁剪面距离
    #[serde(default = "default_far_clip")]
    pub far_clip: f32,
}

// 默认机位：从正面斜上方俯视城堡
fn default_clear_color() -> [f32; 4] {
    // LightSteelBlue
    [0.690, 0.769, 0.871, 1.0]
}
fn default_theta() -> f32 { 1.5 * PI }
fn default_phi() -> f32 { 0.2 * PI }
fn default_radius() -> f32 { 15.0 }
fn default_fov() -> f32 { 45.0 }
fn default_near_clip() -> f32 { 1.0 }
fn default_far_clip() -> f32 { 1000.0 }

impl Default for SceneConfig {
    fn default() -> Self {
        Self {
            clear_color: default_clear_color(),
            camera: CameraConfig::default(),
        }
    }
}

impl Default for CameraConfig {
    fn default() -> Self {
        Self {
            theta: default_theta(),
            phi: default_phi(),
            radius: default_radius(),
            fov: default_fov(),
            near_clip: default_near_clip(),
            far_clip: default_far_clip(),
        }
    }
}

impl SceneConfig {
    /// 从配置文件加载
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path_str = path.as_ref().to_string_lossy().to_string();

        let contents = std::fs::read_to_string(path)
            .map_err(|_| ConfigError::FileNotFound(path_str.clone()))?;

        toml::from_str(&contents)
            .map_err(|e| ConfigError::ParseError(e.to_string()).into())
    }

    /// 从配置文件加载，如果文件不存在则使用默认配置
    pub fn from_file_or_default<P: AsRef<Path>>(path: P) -> Self {
        Self::from_file(path).unwrap_or_default()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_scene_camera() {
        let scene = SceneConfig::default();

        assert!((scene.camera.theta - 1.5 * PI).abs() < 1e-6);
        assert!((scene.camera.phi - 0.2 * PI).abs() < 1e-6);
        assert_eq!(scene.camera.radius, 15.0);
        assert_eq!(scene.camera.near_clip, 1.0);
        assert_eq!(scene.camera.far_clip, 1000.0);
    }

    #[test]
    fn test_parse_partial_scene_toml() {
        let scene: SceneConfig = toml::from_str(
            r#"
            [camera]
            radius = 40.0
            "#,
        )
        .unwrap();

        assert_eq!(scene.camera.radius, 40.0);
        // 其余字段使用默认值
        assert!((scene.camera.phi - 0.2 * PI).abs() < 1e-6);
        assert_eq!(scene.clear_color, default_clear_color());
    }
}
