use std::time::{Duration, Instant};

use anyhow::{Context, Result};
use ouroboros::self_referencing;
use winit::application::ApplicationHandler;
use winit::dpi::{LogicalSize, PhysicalSize};
use winit::event::WindowEvent;
use winit::event_loop::{ActiveEventLoop, EventLoop};
use winit::platform::pump_events::{EventLoopExtPumpEvents, PumpStatus};
use winit::window::{Window, WindowId};

use crate::config::HostConfig;
use crate::device::{Gpu, GpuFrame, GpuInit, SurfaceErrorAction};
use crate::host::{Backend, BackendStatus, Frame};
use crate::input::platform::translate_window_event;
use crate::input::{InputSource, InputState};
use crate::math::Color;
use crate::resource::Texture;

#[self_referencing]
struct WindowEntry {
    window: Window,

    #[borrows(window)]
    #[covariant]
    gpu: Gpu<'this>,
}

/// Window attributes taken from [`HostConfig`].
#[derive(Debug, Clone)]
struct WindowConfig {
    title: String,
    size: LogicalSize<f64>,
    resizable: bool,
    cursor_visible: bool,
}

impl From<&HostConfig> for WindowConfig {
    fn from(config: &HostConfig) -> Self {
        Self {
            title: config.title.clone(),
            size: LogicalSize::new(config.width as f64, config.height as f64),
            resizable: config.resizable,
            cursor_visible: config.cursor_visible,
        }
    }
}

/// winit + wgpu backend with a single window.
///
/// The event loop is pumped from the host's loop rather than owning control
/// flow. The window and its GPU surface are created on the first resume.
pub struct WindowBackend {
    event_loop: EventLoop<()>,
    shell: Shell,
}

impl WindowBackend {
    pub fn new(config: &HostConfig, gpu_init: GpuInit) -> Result<Self> {
        let event_loop = EventLoop::new().context("failed to create winit EventLoop")?;

        Ok(Self {
            event_loop,
            shell: Shell {
                config: WindowConfig::from(config),
                gpu_init,
                entry: None,
                input: InputState::default(),
                closed: false,
                error: None,
            },
        })
    }

    /// The window, once it has been created.
    pub fn window(&self) -> Option<&Window> {
        self.shell.entry.as_ref().map(|entry| entry.borrow_window())
    }
}

impl Backend for WindowBackend {
    type Frame<'a> = RenderFrame<'a>;

    fn pump_events(&mut self, deadline: Option<Instant>) -> Result<BackendStatus> {
        loop {
            let timeout = deadline.map_or(Duration::ZERO, |d| {
                d.saturating_duration_since(Instant::now())
            });
            let status = self.event_loop.pump_app_events(Some(timeout), &mut self.shell);

            if let Some(err) = self.shell.error.take() {
                return Err(err);
            }
            if self.shell.closed || matches!(status, PumpStatus::Exit(_)) {
                return Ok(BackendStatus::Closed);
            }

            match deadline {
                Some(d) if Instant::now() < d => continue,
                _ => return Ok(BackendStatus::Continue),
            }
        }
    }

    fn input(&self) -> &dyn InputSource {
        &self.shell.input
    }

    fn clear_frame(&mut self, color: Color) -> Result<Option<RenderFrame<'_>>> {
        let Some(entry) = self.shell.entry.as_ref() else {
            return Ok(None);
        };
        let gpu = entry.borrow_gpu();

        let mut frame = match gpu.begin_frame() {
            Ok(frame) => frame,
            Err(err) => match gpu.recover(err) {
                SurfaceErrorAction::Fatal => anyhow::bail!("GPU surface is out of memory"),
                action => {
                    log::warn!("skipping frame ({action:?})");
                    return Ok(None);
                }
            },
        };
        gpu.clear(&mut frame, color.into());

        Ok(Some(RenderFrame {
            window: entry.borrow_window(),
            gpu,
            frame,
        }))
    }
}

/// A cleared frame of the window surface.
///
/// Record extra passes into [`encoder`](Self::encoder) targeting
/// [`view`](Self::view); the host presents the frame after rendering.
pub struct RenderFrame<'a> {
    window: &'a Window,
    gpu: &'a Gpu<'a>,
    frame: GpuFrame,
}

impl RenderFrame<'_> {
    pub fn device(&self) -> &wgpu::Device {
        self.gpu.device()
    }

    pub fn queue(&self) -> &wgpu::Queue {
        self.gpu.queue()
    }

    pub fn surface_format(&self) -> wgpu::TextureFormat {
        self.gpu.surface_format()
    }

    pub fn view(&self) -> &wgpu::TextureView {
        &self.frame.view
    }

    pub fn encoder(&mut self) -> &mut wgpu::CommandEncoder {
        &mut self.frame.encoder
    }

    /// Drawable size in physical pixels.
    pub fn size(&self) -> PhysicalSize<u32> {
        self.gpu.size()
    }

    pub fn window(&self) -> &Window {
        self.window
    }

    pub fn upload_texture(&self, texture: &Texture) -> wgpu::Texture {
        self.gpu.upload_texture(texture)
    }
}

impl Frame for RenderFrame<'_> {
    fn present(self) -> Result<()> {
        self.window.pre_present_notify();
        self.gpu.submit(self.frame);
        Ok(())
    }
}

/// Event handler state pumped by [`WindowBackend`].
struct Shell {
    config: WindowConfig,
    gpu_init: GpuInit,
    entry: Option<WindowEntry>,
    input: InputState,
    closed: bool,
    error: Option<anyhow::Error>,
}

impl Shell {
    fn create_window_entry(&self, event_loop: &ActiveEventLoop) -> Result<WindowEntry> {
        let attrs = Window::default_attributes()
            .with_title(self.config.title.clone())
            .with_inner_size(self.config.size)
            .with_resizable(self.config.resizable);

        let window = event_loop
            .create_window(attrs)
            .context("failed to create window")?;
        window.set_cursor_visible(self.config.cursor_visible);

        let gpu_init = self.gpu_init.clone();
        WindowEntryTryBuilder {
            window,
            gpu_builder: |window| {
                pollster::block_on(Gpu::new(window, gpu_init))
                    .context("GPU initialization failed for window")
            },
        }
        .try_build()
    }
}

impl ApplicationHandler for Shell {
    fn resumed(&mut self, event_loop: &ActiveEventLoop) {
        if self.entry.is_some() {
            return;
        }

        match self.create_window_entry(event_loop) {
            Ok(entry) => self.entry = Some(entry),
            Err(err) => {
                log::error!("failed to create window: {err:#}");
                self.error = Some(err);
                event_loop.exit();
            }
        }
    }

    fn window_event(&mut self, event_loop: &ActiveEventLoop, _id: WindowId, event: WindowEvent) {
        let Some(entry) = self.entry.as_mut() else {
            return;
        };

        if let Some(ev) = translate_window_event(entry.borrow_window(), &event) {
            self.input.apply_event(&ev);
        }

        match event {
            WindowEvent::CloseRequested => {
                log::info!("close requested");
                self.entry = None;
                self.closed = true;
                event_loop.exit();
            }
            WindowEvent::Resized(size) => {
                entry.with_gpu_mut(|gpu| gpu.resize(size));
            }
            WindowEvent::ScaleFactorChanged { .. } => {
                let size = entry.borrow_window().inner_size();
                entry.with_gpu_mut(|gpu| gpu.resize(size));
            }
            _ => {}
        }
    }
}
