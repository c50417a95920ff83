//! CastleRender
//!
//! 一个教学用的 3D 渲染示例：程序化生成十种基础形状，打包进
//! 一对共享的顶点/索引缓冲区，再用逐对象世界矩阵把它们摆成一座
//! 带城垛、塔楼和喷泉的城堡。
//!
//! # 架构
//!
//! - [`core`]：配置、日志、计时器、输入和错误类型
//! - [`math`]：基于 nalgebra 的数学工具
//! - [`geometry`]：形状生成与共享缓冲区打包
//! - [`component`]：轨道相机
//! - [`scene`]：渲染项与城堡布局
//! - [`gfx`]：wgpu 设备与表面管理
//! - [`renderer`]：帧资源环、围栏同步与绘制流程
//!
//! # 帧同步
//!
//! CPU 侧维护三份帧资源轮流写入。每次提交打一个单调递增的围栏值，
//! 轮转回某份帧资源时先等它上一次的围栏值完成，再重写它的常量缓冲区。

pub mod component;
pub mod core;
pub mod geometry;
pub mod gfx;
pub mod math;
pub mod renderer;
pub mod scene;
