use crate::framebuffer::FrameBuffer;
use sdl2::event::Event;
use sdl2::keyboard::{Keycode, Scancode};
use sdl2::pixels::PixelFormatEnum;
use sdl2::render::Canvas;
use sdl2::video::Window;
use sdl2::EventPump;
use starwarp::{Button, ButtonInput, Display, Error, Rgb};

/// Badge buttons on the keyboard.
const KEYMAP: [(Scancode, Button); 4] = [
    (Scancode::Left, Button::BottomLeft),
    (Scancode::Right, Button::BottomRight),
    (Scancode::Up, Button::TopRight),
    (Scancode::Down, Button::TopLeft),
];

/// The badge screen, drawn off-screen and scaled up into an SDL window.
pub struct SdlDisplay {
    canvas: Canvas<Window>,
    frame: FrameBuffer,
}

impl SdlDisplay {
    pub fn new(canvas: Canvas<Window>, width: u32, height: u32) -> Self {
        Self {
            canvas,
            frame: FrameBuffer::new(width, height),
        }
    }
}

impl Display for SdlDisplay {
    fn clear(&mut self) -> Result<(), Error> {
        self.frame.fill(Rgb::BLACK);
        Ok(())
    }

    fn pixel(&mut self, x: i32, y: i32, color: Rgb) -> Result<(), Error> {
        self.frame.draw_pixel(x, y, color);
        Ok(())
    }

    fn line(&mut self, x0: i32, y0: i32, x1: i32, y1: i32, color: Rgb) -> Result<(), Error> {
        self.frame.draw_line(x0, y0, x1, y1, color);
        Ok(())
    }

    fn print(&mut self, text: &str, fg: Rgb, x: i32, y: i32, font: u8) -> Result<(), Error> {
        self.frame.draw_text(text, fg, x, y, font);
        Ok(())
    }

    fn update(&mut self) -> Result<(), Error> {
        let texture_creator = self.canvas.texture_creator();
        let mut texture = texture_creator
            .create_texture_streaming(PixelFormatEnum::ARGB8888, self.frame.width(), self.frame.height())
            .map_err(|e| Error::Display(e.to_string()))?;

        let frame = &self.frame;
        texture
            .with_lock(None, |buffer: &mut [u8], pitch: usize| frame.blit(buffer, pitch))
            .map_err(Error::Display)?;

        self.canvas.copy(&texture, None, None).map_err(Error::Display)?;
        self.canvas.present();
        Ok(())
    }
}

/// Arrow keys standing in for the badge buttons. Also notices when the
/// window is closed, since this is where the event queue gets drained.
pub struct KeyboardButtons {
    event_pump: EventPump,
    quit: bool,
}

impl KeyboardButtons {
    pub fn new(event_pump: EventPump) -> Self {
        Self {
            event_pump,
            quit: false,
        }
    }

    pub fn quit_requested(&self) -> bool {
        self.quit
    }
}

impl ButtonInput for KeyboardButtons {
    fn read(&mut self, mask: u8) -> Result<u8, Error> {
        for event in self.event_pump.poll_iter() {
            match event {
                Event::Quit { .. }
                | Event::KeyDown {
                    keycode: Some(Keycode::Escape),
                    ..
                } => self.quit = true,
                _ => {}
            }
        }

        let keys = self.event_pump.keyboard_state();
        let pressed = KEYMAP
            .iter()
            .filter(|(scancode, _)| keys.is_scancode_pressed(*scancode))
            .fold(0u8, |bits, (_, button)| bits | button.bit());
        Ok(!(pressed & mask))
    }
}
