//! 核心功能模块
//!
//! 本模块提供了示例的基础功能：配置管理、场景配置、日志系统、
//! 错误处理、帧计时和输入系统。这些模块独立于具体的渲染代码。
//!
//! # 模块组织
//!
//! - `config`：配置管理，支持从配置文件加载设置
//! - `scene`：场景配置（相机初始状态、清屏颜色）
//! - `log`：日志系统，提供结构化的日志记录功能
//! - `error`：错误处理，定义统一的错误类型
//! - `timer`：帧计时器
//! - `input`：输入系统（轮询式）

pub mod config;
pub mod error;
pub mod input;
pub mod log;
pub mod scene;
pub mod timer;

// 重新导出常用类型，方便使用
pub use config::Config;
pub use error::{CastleRenderError, Result};
pub use scene::SceneConfig;
pub use timer::Timer;
