//! 场景组件模块

pub mod camera;

pub use camera::OrbitCamera;
