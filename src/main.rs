//! CastleRender 程序入口
//!
//! 加载配置、初始化日志、创建窗口和渲染器，然后进入事件循环。
//! 任何图形错误都是致命的：记录后退出进程。

use std::sync::Arc;

use tracing::{error, info};
use winit::dpi::LogicalSize;
use winit::event::{Event, WindowEvent};
use winit::event_loop::EventLoop;
use winit::keyboard::{KeyCode, PhysicalKey};
use winit::window::WindowBuilder;

use castle_render::core::input::InputSystem;
use castle_render::core::{log, CastleRenderError, Config, Result, SceneConfig, Timer};
use castle_render::renderer::Renderer;

fn main() {
    // 配置：文件 + 命令行参数覆盖
    let mut config = Config::from_file_or_default("config.toml");
    config.apply_args(std::env::args().skip(1));

    if let Err(e) = config.validate() {
        eprintln!("Invalid configuration: {}", e);
        std::process::exit(1);
    }

    let log_file = if config.logging.file_output {
        Some(config.logging.log_file.clone())
    } else {
        None
    };
    log::init_logger(config.logging.level, config.logging.file_output, log_file.as_deref());

    info!("CastleRender starting");

    let scene_config = SceneConfig::from_file_or_default("scene.toml");

    if let Err(e) = run(config, scene_config) {
        error!("Fatal error: {}", e);
        std::process::exit(1);
    }
}

fn run(config: Config, scene_config: SceneConfig) -> Result<()> {
    let event_loop = EventLoop::new()
        .map_err(|e| CastleRenderError::Initialization(format!("event loop: {}", e)))?;

    let window = Arc::new(
        WindowBuilder::new()
            .with_title(&config.window.title)
            .with_inner_size(LogicalSize::new(config.window.width, config.window.height))
            .with_resizable(config.window.resizable)
            .build(&event_loop)
            .map_err(|e| CastleRenderError::Initialization(format!("window creation: {}", e)))?,
    );

    let mut renderer = Renderer::new(window.clone(), &config, &scene_config)?;
    let mut input = InputSystem::new();
    let mut timer = Timer::new();

    info!("Entering event loop");

    event_loop
        .run(move |event, elwt| match event {
            Event::WindowEvent { event, window_id } if window_id == window.id() => match event {
                WindowEvent::CloseRequested => elwt.exit(),

                WindowEvent::Resized(size) => {
                    renderer.resize(size.width, size.height);
                }

                WindowEvent::KeyboardInput {
                    event: key_event, ..
                } => {
                    if let PhysicalKey::Code(code) = key_event.physical_key {
                        if code == KeyCode::Escape {
                            elwt.exit();
                        }
                        input.on_keyboard_input(code, key_event.state);
                    }
                }

                WindowEvent::MouseInput { state, button, .. } => {
                    input.on_mouse_button(button, state);
                }

                WindowEvent::CursorMoved { position, .. } => {
                    input.on_mouse_move((position.x, position.y));
                }

                // 失焦时丢弃累积的鼠标位移，避免焦点恢复后相机跳变
                WindowEvent::Focused(false) => input.reset_mouse(),

                WindowEvent::RedrawRequested => {
                    timer.tick();
                    renderer.update(&mut input, &timer);
                    if let Err(e) = renderer.draw() {
                        error!("Draw failed: {}", e);
                        elwt.exit();
                    }
                }

                _ => {}
            },

            Event::AboutToWait => {
                window.request_redraw();
            }

            _ => {}
        })
        .map_err(|e| CastleRenderError::Initialization(format!("event loop: {}", e)))?;

    info!("CastleRender exited");
    Ok(())
}
