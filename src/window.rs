//! SDL2 window, presentation and input, plus frame pacing.
//!
//! The window is borderless and sized to the desktop display mode. It owns a
//! streaming ARGB8888 texture of the same size; each frame the engine's color
//! buffer is uploaded to it and copied to the screen.

use std::time::{Duration, Instant};

use sdl2::event::Event;
use sdl2::keyboard::Keycode;
use sdl2::pixels::PixelFormatEnum;
use sdl2::render::{Canvas, Texture, TextureCreator};
use sdl2::video::WindowContext;

/// Keys the frame loop reacts to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Key {
    Escape,
    Num1,
    Num2,
    Num3,
    Num4,
    C,
    D,
}

impl Key {
    fn from_keycode(keycode: Keycode) -> Option<Self> {
        match keycode {
            Keycode::Escape => Some(Key::Escape),
            Keycode::Num1 | Keycode::Kp1 => Some(Key::Num1),
            Keycode::Num2 | Keycode::Kp2 => Some(Key::Num2),
            Keycode::Num3 | Keycode::Kp3 => Some(Key::Num3),
            Keycode::Num4 | Keycode::Kp4 => Some(Key::Num4),
            Keycode::C => Some(Key::C),
            Keycode::D => Some(Key::D),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WindowEvent {
    None,
    Quit,
    KeyDown(Key),
}

/// Sleeps away whatever is left of the frame budget.
pub struct FrameLimiter {
    target: Duration,
    previous_frame_time: Instant,
}

/// Time left in a frame of length `target` after `elapsed`, if any.
pub fn remaining_frame_time(elapsed: Duration, target: Duration) -> Option<Duration> {
    target.checked_sub(elapsed).filter(|remaining| !remaining.is_zero())
}

impl FrameLimiter {
    pub fn new(target: Duration) -> Self {
        Self {
            target,
            previous_frame_time: Instant::now(),
        }
    }

    /// Blocks until at least one frame interval has passed since the previous
    /// call, then returns the time elapsed since that call. Never blocks for
    /// longer than one interval.
    pub fn wait(&mut self) -> Duration {
        let elapsed = self.previous_frame_time.elapsed();
        if let Some(time_to_wait) = remaining_frame_time(elapsed, self.target) {
            std::thread::sleep(time_to_wait);
        }

        let now = Instant::now();
        let delta = now - self.previous_frame_time;
        self.previous_frame_time = now;
        delta
    }
}

pub struct Window {
    // Field order matters: the texture must drop before its creator.
    texture: Texture<'static>,
    _texture_creator: Box<TextureCreator<WindowContext>>,
    canvas: Canvas<sdl2::video::Window>,
    event_pump: sdl2::EventPump,
    width: u32,
    height: u32,
}

impl Window {
    /// Opens a borderless window covering the first display.
    pub fn new(title: &str) -> Result<Self, String> {
        let sdl_context = sdl2::init()?;
        let video_subsystem = sdl_context.video()?;

        let mode = video_subsystem.current_display_mode(0)?;
        let width = u32::try_from(mode.w).map_err(|e| e.to_string())?;
        let height = u32::try_from(mode.h).map_err(|e| e.to_string())?;

        let window = video_subsystem
            .window(title, width, height)
            .borderless()
            .position_centered()
            .build()
            .map_err(|e| e.to_string())?;

        let canvas = window.into_canvas().build().map_err(|e| e.to_string())?;
        let texture_creator = Box::new(canvas.texture_creator());
        let event_pump = sdl_context.event_pump()?;

        // SAFETY: the creator is boxed, so its address is stable, and it is
        // stored in the same struct after the texture, so it outlives it.
        let creator: &'static TextureCreator<WindowContext> =
            unsafe { &*(texture_creator.as_ref() as *const _) };
        let texture = creator
            .create_texture_streaming(PixelFormatEnum::ARGB8888, width, height)
            .map_err(|e| e.to_string())?;

        log::info!("Opened {}x{} window", width, height);

        Ok(Self {
            texture,
            _texture_creator: texture_creator,
            canvas,
            event_pump,
            width,
            height,
        })
    }

    /// Takes at most one pending event off the queue.
    pub fn poll_event(&mut self) -> WindowEvent {
        match self.event_pump.poll_event() {
            Some(Event::Quit { .. }) => WindowEvent::Quit,
            Some(Event::KeyDown {
                keycode: Some(keycode),
                ..
            }) => Key::from_keycode(keycode)
                .map(WindowEvent::KeyDown)
                .unwrap_or(WindowEvent::None),
            _ => WindowEvent::None,
        }
    }

    /// Uploads an ARGB8888 pixel buffer of the window's size and shows it.
    pub fn present(&mut self, buffer: &[u8]) -> Result<(), String> {
        self.texture
            .update(None, buffer, (self.width * 4) as usize)
            .map_err(|e| e.to_string())?;

        self.canvas.clear();
        self.canvas.copy(&self.texture, None, None)?;
        self.canvas.present();
        Ok(())
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }
}
