use embedded_graphics::mono_font::ascii::{FONT_5X8, FONT_6X10, FONT_8X13};
use embedded_graphics::mono_font::{MonoFont, MonoTextStyle};
use embedded_graphics::pixelcolor::Rgb888;
use embedded_graphics::prelude::*;
use embedded_graphics::primitives::{Line, PrimitiveStyle};
use embedded_graphics::text::{Baseline, Text};
use starwarp::Rgb;
use std::convert::Infallible;

/// Off-screen ARGB8888 copy of the badge screen.
pub struct FrameBuffer {
    pixels: Vec<u32>,
    width: u32,
    height: u32,
}

impl FrameBuffer {
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            pixels: vec![0xFF00_0000; (width * height) as usize],
            width,
            height,
        }
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    #[cfg(test)]
    pub fn get_pixel(&self, x: u32, y: u32) -> u32 {
        if x < self.width && y < self.height {
            self.pixels[(y * self.width + x) as usize]
        } else {
            0
        }
    }

    pub fn fill(&mut self, color: Rgb) {
        let c = argb(color);
        for p in self.pixels.iter_mut() {
            *p = c;
        }
    }

    pub fn draw_pixel(&mut self, x: i32, y: i32, color: Rgb) {
        Pixel(Point::new(x, y), rgb888(color))
            .draw(self)
            .unwrap_or_else(|never| match never {});
    }

    pub fn draw_line(&mut self, x0: i32, y0: i32, x1: i32, y1: i32, color: Rgb) {
        Line::new(Point::new(x0, y0), Point::new(x1, y1))
            .into_styled(PrimitiveStyle::with_stroke(rgb888(color), 1))
            .draw(self)
            .unwrap_or_else(|never| match never {});
    }

    /// Text with its top-left corner at (x, y). Font 0 is the small status font.
    pub fn draw_text(&mut self, text: &str, fg: Rgb, x: i32, y: i32, font: u8) {
        let style = MonoTextStyle::new(mono_font(font), rgb888(fg));
        Text::with_baseline(text, Point::new(x, y), style, Baseline::Top)
            .draw(self)
            .unwrap_or_else(|never| match never {});
    }

    /// Copy into a locked streaming texture row by row.
    pub fn blit(&self, buffer: &mut [u8], pitch: usize) {
        for (y, row) in self.pixels.chunks(self.width as usize).enumerate() {
            let line = &mut buffer[y * pitch..y * pitch + row.len() * 4];
            for (dst, px) in line.chunks_exact_mut(4).zip(row) {
                dst.copy_from_slice(&px.to_ne_bytes());
            }
        }
    }
}

fn mono_font(font: u8) -> &'static MonoFont<'static> {
    match font {
        0 => &FONT_5X8,
        1 => &FONT_6X10,
        _ => &FONT_8X13,
    }
}

fn rgb888(color: Rgb) -> Rgb888 {
    Rgb888::new(color.r, color.g, color.b)
}

fn argb(color: Rgb) -> u32 {
    0xFF00_0000 | (color.r as u32) << 16 | (color.g as u32) << 8 | color.b as u32
}

impl OriginDimensions for FrameBuffer {
    fn size(&self) -> Size {
        Size::new(self.width, self.height)
    }
}

impl DrawTarget for FrameBuffer {
    type Color = Rgb888;
    type Error = Infallible;

    fn draw_iter<I>(&mut self, pixels: I) -> Result<(), Self::Error>
    where
        I: IntoIterator<Item = Pixel<Self::Color>>,
    {
        for Pixel(coord, color) in pixels {
            if coord.x >= 0 && coord.y >= 0 && (coord.x as u32) < self.width && (coord.y as u32) < self.height {
                let c = argb(Rgb::new(color.r(), color.g(), color.b()));
                self.pixels[(coord.y as u32 * self.width + coord.x as u32) as usize] = c;
            }
        }
        Ok(())
    }
}
