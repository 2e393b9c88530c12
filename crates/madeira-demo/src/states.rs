use std::rc::Rc;

use anyhow::Result;
use madeira_engine::input::{Key, MouseButton};
use madeira_engine::math::Vec2;
use madeira_engine::resource::{Sound, Texture};
use madeira_engine::window::RenderFrame;
use madeira_engine::{Error, Library, State, StateCtx, WindowBackend};

/// Loads an optional asset; a missing file is logged and skipped.
fn optional<T: 'static>(library: &mut Library, name: &str) -> Result<Option<Rc<T>>> {
    match library.get::<T>(name) {
        Ok(asset) => Ok(Some(asset)),
        Err(Error::ResourceNotFound { .. }) => {
            log::warn!("`{name}` not found, continuing without it");
            Ok(None)
        }
        Err(err) => Err(err.into()),
    }
}

/// Shows the logo; Space or a click starts playing, Q quits.
#[derive(Default)]
pub struct TitleState {
    logo: Option<Rc<Texture>>,
    uploaded: Option<wgpu::Texture>,
}

impl State<WindowBackend> for TitleState {
    fn name(&self) -> &str {
        "title"
    }

    fn enter(&mut self, ctx: &mut StateCtx<'_, WindowBackend>) -> Result<()> {
        self.logo = optional(ctx.library(), "logo.png")?;
        Ok(())
    }

    fn update(&mut self, ctx: &mut StateCtx<'_, WindowBackend>) -> Result<()> {
        let input = ctx.input();
        if input.key_pressed(Key::Q) {
            ctx.stop();
        } else if input.key_pressed(Key::Space) || input.button_pressed(MouseButton::Left) {
            ctx.change_state(PlayState::default());
        }
        Ok(())
    }

    fn render(
        &mut self,
        _ctx: &mut StateCtx<'_, WindowBackend>,
        frame: &mut RenderFrame<'_>,
    ) -> Result<()> {
        if self.uploaded.is_none()
            && let Some(logo) = &self.logo
        {
            log::info!("uploading {logo}");
            self.uploaded = Some(frame.upload_texture(logo));
        }
        Ok(())
    }
}

/// Tracks the pointer and plays a blip on click; Escape returns to the title.
#[derive(Default)]
pub struct PlayState {
    blip: Option<Rc<Sound>>,
    velocity: Vec2,
    clicks: u32,
}

impl State<WindowBackend> for PlayState {
    fn name(&self) -> &str {
        "play"
    }

    fn enter(&mut self, ctx: &mut StateCtx<'_, WindowBackend>) -> Result<()> {
        self.blip = optional(ctx.library(), "blip.wav")?;
        Ok(())
    }

    fn update(&mut self, ctx: &mut StateCtx<'_, WindowBackend>) -> Result<()> {
        let input = ctx.input();
        let dt = ctx.time().dt;

        if dt > 0.0 {
            self.velocity = input.pointer_delta() / dt;
        }

        if input.button_pressed(MouseButton::Left) {
            self.clicks += 1;
            match &self.blip {
                Some(blip) => log::info!("click {} at {:?}: {blip}", self.clicks, input.pointer_position()),
                None => log::info!("click {} at {:?}", self.clicks, input.pointer_position()),
            }
        }

        if input.key_pressed(Key::Q) {
            ctx.stop();
        } else if input.key_pressed(Key::Escape) {
            log::info!("pointer speed on leave: {:.1} px/s", self.velocity.length());
            ctx.change_state(TitleState::default());
        }
        Ok(())
    }

    fn exit(&mut self, ctx: &mut StateCtx<'_, WindowBackend>) -> Result<()> {
        log::info!("{} clicks in {} ticks", self.clicks, ctx.ticks());
        Ok(())
    }
}
