// main.rs - window, event loop, menus and HUD wiring

#![cfg_attr(not(debug_assertions), windows_subsystem = "windows")] // no console window in release builds

mod config;
mod controller;
mod error;
mod hud;
mod i18n;
mod input;
mod projection;
mod render;
mod renderer;
mod scene;
mod surface;
mod viewer;

use config::ViewerConfig;
use controller::Controller;
use error::AppError;
use input::{InputAdapter, InputStream};
use renderer::{repaint_deadline, Renderer};

use log::{debug, error, info};
use std::sync::Arc;
use std::time::Instant;
use winit::{
    dpi::LogicalSize,
    event::*,
    event_loop::{ControlFlow, EventLoop},
    window::{Fullscreen, Window, WindowBuilder},
};

fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    if let Err(e) = run() {
        error!("{}", e);
        std::process::exit(1);
    }
}

fn run() -> Result<(), AppError> {
    let cfg = ViewerConfig::load();

    let mut current_lang = i18n::resolve_lang_from_args();
    i18n::init(&current_lang);

    let event_loop = EventLoop::new();
    let window = Arc::new(
        WindowBuilder::new()
            .with_title(i18n::tr("app.title"))
            .with_inner_size(LogicalSize::new(1280, 1000))
            .build(&event_loop)?,
    );

    let mut controller = Controller::new(&cfg)?;
    let mut renderer = pollster::block_on(Renderer::new(window.clone(), cfg.canvas_size))?;
    let mut input = InputAdapter::new();
    input.set_scale_factor(window.scale_factor());
    let mut uploaded_revision = 0;
    let mut is_fullscreen = false;
    // Set when egui asked for a delayed repaint (tooltips, menu animations).
    let mut repaint_at: Option<Instant> = None;

    info!("ready, initial pose {:?}", controller.pose());

    event_loop.run(move |event, _, control_flow| {
        *control_flow = match repaint_at {
            Some(at) => ControlFlow::WaitUntil(at),
            None => ControlFlow::Wait,
        };

        match event {
            Event::NewEvents(StartCause::ResumeTimeReached { .. }) => {
                repaint_at = None;
                window.request_redraw();
            }

            Event::WindowEvent { event, .. } => {
                let response = renderer.egui_state.on_event(&renderer.egui_ctx, &event);
                if response.repaint {
                    window.request_redraw();
                }

                match &event {
                    WindowEvent::CloseRequested => {
                        *control_flow = ControlFlow::Exit;
                    }

                    WindowEvent::Resized(new_size) => {
                        renderer.resize(*new_size);
                        window.request_redraw();
                    }

                    WindowEvent::ScaleFactorChanged {
                        scale_factor,
                        new_inner_size,
                    } => {
                        input.set_scale_factor(*scale_factor);
                        renderer.resize(**new_inner_size);
                        window.request_redraw();
                    }

                    WindowEvent::KeyboardInput { input: key, .. }
                        if key.state == ElementState::Pressed
                            && key.virtual_keycode == Some(VirtualKeyCode::F11) =>
                    {
                        is_fullscreen = !is_fullscreen;
                        set_fullscreen(&window, is_fullscreen);
                    }

                    other => {
                        // While an egui widget holds keyboard focus the keys
                        // belong to it; pointer moves are always tracked.
                        if renderer.egui_ctx.wants_keyboard_input() {
                            input.unsubscribe(InputStream::Keyboard);
                        } else {
                            input.subscribe(InputStream::Keyboard);
                        }
                        if input.handle_window_event(other, &mut controller) {
                            window.request_redraw();
                        }
                    }
                }
            }

            Event::RedrawRequested(_) => {
                if controller.revision() != uploaded_revision {
                    debug!("uploading canvas revision {}", controller.revision());
                    renderer.upload_canvas(controller.canvas());
                    uploaded_revision = controller.revision();
                }

                let mut lang_changed = false;
                let render_result = renderer.render_with_ui(&window, |ctx| {
                    draw_ui(
                        ctx,
                        &mut controller,
                        &mut is_fullscreen,
                        &mut current_lang,
                        &mut lang_changed,
                        &window,
                    );
                });

                if lang_changed {
                    i18n::init(&current_lang);
                    window.set_title(&i18n::tr("app.title"));
                }
                // A menu action may have repainted the canvas.
                if lang_changed || controller.revision() != uploaded_revision {
                    window.request_redraw();
                }

                match render_result {
                    Ok(repaint_after) => {
                        let now = Instant::now();
                        repaint_at = repaint_deadline(repaint_after, now);
                        if repaint_at.is_some_and(|at| at <= now) {
                            repaint_at = None;
                            window.request_redraw();
                        }
                    }
                    Err(wgpu::SurfaceError::Lost) => renderer.resize(renderer.size),
                    Err(wgpu::SurfaceError::OutOfMemory) => {
                        error!("GPU out of memory");
                        *control_flow = ControlFlow::Exit;
                    }
                    Err(e) => error!("render error: {:?}", e),
                }
            }

            _ => {}
        }
    })
}

fn set_fullscreen(window: &Window, on: bool) {
    if on {
        window.set_fullscreen(Some(Fullscreen::Borderless(None)));
    } else {
        window.set_fullscreen(None);
    }
}

fn draw_ui(
    ctx: &egui::Context,
    controller: &mut Controller,
    is_fullscreen: &mut bool,
    current_lang: &mut String,
    lang_changed: &mut bool,
    window: &Window,
) {
    egui::TopBottomPanel::top("menu_bar").show(ctx, |ui| {
        egui::menu::bar(ui, |ui| {
            ui.menu_button(i18n::tr("menu.file"), |ui| {
                if ui.button(i18n::tr("menu.exit")).clicked() {
                    std::process::exit(0);
                }
            });

            ui.menu_button(i18n::tr("menu.view"), |ui| {
                if ui.button(i18n::tr("view.reset")).clicked() {
                    controller.reset();
                    ui.close_menu();
                }

                let label = if *is_fullscreen {
                    i18n::tr("view.fullscreen.exit")
                } else {
                    i18n::tr("view.fullscreen.enter")
                };
                if ui.button(label).clicked() {
                    *is_fullscreen = !*is_fullscreen;
                    set_fullscreen(window, *is_fullscreen);
                    ui.close_menu();
                }
            });

            ui.menu_button(i18n::tr("menu.language"), |ui| {
                for (code, name) in i18n::LANGUAGES {
                    if ui.radio_value(current_lang, code.to_string(), name).clicked() {
                        *lang_changed = true;
                        ui.close_menu();
                    }
                }
            });
        });
    });

    hud::draw(ctx, &controller.pose(), controller.pointer());
}
