// input.rs - winit events -> navigation key identifiers and pointer moves
//
// Two streams leave this module: key identifiers ("w", "ArrowUp", ...) and
// pointer positions in logical pixels. Each can be subscribed or unsubscribed
// on its own; events on an unsubscribed stream are dropped before reaching
// the listener.

use winit::dpi::PhysicalPosition;
use winit::event::{ElementState, VirtualKeyCode, WindowEvent};

/// Last observed pointer position in window (viewport) coordinates, in
/// logical pixels.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PointerPosition {
    pub x: f64,
    pub y: f64,
}

#[derive(Debug, Clone, PartialEq)]
pub enum InputEvent {
    Key(String),
    PointerMoved(PointerPosition),
}

impl InputEvent {
    pub fn stream(&self) -> InputStream {
        match self {
            InputEvent::Key(_) => InputStream::Keyboard,
            InputEvent::PointerMoved(_) => InputStream::Pointer,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum InputStream {
    Keyboard,
    Pointer,
}

/// Receiver of translated input. Both methods return `true` when the event
/// changed state that is visible on screen.
pub trait InputListener {
    fn on_key(&mut self, key: &str) -> bool;
    fn on_pointer_move(&mut self, pos: PointerPosition) -> bool;
}

#[derive(Debug, Clone)]
pub struct InputAdapter {
    keyboard: bool,
    pointer: bool,
    scale_factor: f64,
}

impl Default for InputAdapter {
    /// Adapter with neither stream subscribed.
    fn default() -> Self {
        Self {
            keyboard: false,
            pointer: false,
            scale_factor: 1.0,
        }
    }
}

impl InputAdapter {
    /// Adapter with both streams subscribed.
    pub fn new() -> Self {
        Self {
            keyboard: true,
            pointer: true,
            ..Self::default()
        }
    }

    /// Physical-to-logical ratio of the window, from `Window::scale_factor`.
    pub fn set_scale_factor(&mut self, scale_factor: f64) {
        if scale_factor.is_finite() && scale_factor > 0.0 {
            self.scale_factor = scale_factor;
        }
    }

    pub fn subscribe(&mut self, stream: InputStream) {
        *self.flag_mut(stream) = true;
    }

    pub fn unsubscribe(&mut self, stream: InputStream) {
        *self.flag_mut(stream) = false;
    }

    pub fn is_subscribed(&self, stream: InputStream) -> bool {
        match stream {
            InputStream::Keyboard => self.keyboard,
            InputStream::Pointer => self.pointer,
        }
    }

    fn flag_mut(&mut self, stream: InputStream) -> &mut bool {
        match stream {
            InputStream::Keyboard => &mut self.keyboard,
            InputStream::Pointer => &mut self.pointer,
        }
    }

    /// Translates a window event. Printable characters arrive through
    /// `ReceivedCharacter` (so case is preserved); arrow keys through
    /// `KeyboardInput`, on press only.
    pub fn translate(&self, event: &WindowEvent) -> Option<InputEvent> {
        match event {
            WindowEvent::ReceivedCharacter(c) if !c.is_control() => {
                Some(InputEvent::Key(c.to_string()))
            }
            WindowEvent::KeyboardInput { input, .. } if input.state == ElementState::Pressed => {
                let name = input.virtual_keycode.and_then(arrow_key_name)?;
                Some(InputEvent::Key(name.to_string()))
            }
            WindowEvent::CursorMoved { position, .. } => Some(InputEvent::PointerMoved(
                logical_pointer(*position, self.scale_factor),
            )),
            _ => None,
        }
    }

    /// Delivers `event` to `listener` if its stream is subscribed.
    pub fn dispatch<L: InputListener + ?Sized>(&self, event: &InputEvent, listener: &mut L) -> bool {
        if !self.is_subscribed(event.stream()) {
            return false;
        }
        match event {
            InputEvent::Key(key) => listener.on_key(key),
            InputEvent::PointerMoved(pos) => listener.on_pointer_move(*pos),
        }
    }

    pub fn handle_window_event<L: InputListener + ?Sized>(
        &self,
        event: &WindowEvent,
        listener: &mut L,
    ) -> bool {
        match self.translate(event) {
            Some(ev) => self.dispatch(&ev, listener),
            None => false,
        }
    }
}

/// winit reports the cursor in physical pixels; the readout uses logical ones.
pub fn logical_pointer(position: PhysicalPosition<f64>, scale_factor: f64) -> PointerPosition {
    let logical = position.to_logical::<f64>(scale_factor);
    PointerPosition {
        x: logical.x,
        y: logical.y,
    }
}

pub fn arrow_key_name(code: VirtualKeyCode) -> Option<&'static str> {
    match code {
        VirtualKeyCode::Up => Some("ArrowUp"),
        VirtualKeyCode::Down => Some("ArrowDown"),
        VirtualKeyCode::Left => Some("ArrowLeft"),
        VirtualKeyCode::Right => Some("ArrowRight"),
        _ => None,
    }
}
