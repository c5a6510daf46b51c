//! Pixel canvas shared with the host
//!
//! Capacity is fixed when the chamber is created. Each frame renders into a
//! `width × height` view of it, pixel `(x, y)` at offset `y * width + x`.

use crate::error::ChamberError;
use crate::sim::PixelRect;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Canvas {
    pixels: Vec<u32>,
    width: usize,
    height: usize,
}

impl Canvas {
    /// Blank canvas holding up to `capacity` pixels
    pub fn new(capacity: usize) -> Self {
        Self {
            pixels: vec![0; capacity],
            width: 0,
            height: 0,
        }
    }

    #[inline]
    pub fn capacity(&self) -> usize {
        self.pixels.len()
    }

    #[inline]
    pub fn width(&self) -> usize {
        self.width
    }

    #[inline]
    pub fn height(&self) -> usize {
        self.height
    }

    /// Select the active view; pixels outside it are left alone
    pub fn set_view(&mut self, width: usize, height: usize) -> Result<(), ChamberError> {
        let requested = width.saturating_mul(height);
        if requested > self.capacity() {
            return Err(ChamberError::CanvasTooSmall {
                requested,
                capacity: self.capacity(),
            });
        }
        self.width = width;
        self.height = height;
        Ok(())
    }

    /// Paint a solid rectangle, clipped to the active view
    pub fn fill_rect(&mut self, rect: PixelRect, color: u32) {
        let x_end = (rect.x + rect.width).min(self.width);
        let y_end = (rect.y + rect.height).min(self.height);
        if rect.x >= x_end {
            return;
        }
        for y in rect.y..y_end {
            let row = y * self.width;
            self.pixels[row + rect.x..row + x_end].fill(color);
        }
    }

    /// Pixel in the active view
    pub fn pixel(&self, x: usize, y: usize) -> Option<u32> {
        (x < self.width && y < self.height).then(|| self.pixels[y * self.width + x])
    }

    /// Active view as packed pixels
    pub fn view(&self) -> &[u32] {
        &self.pixels[..self.width * self.height]
    }

    /// Active view as raw RGBA bytes
    pub fn view_bytes(&self) -> &[u8] {
        bytemuck::cast_slice(self.view())
    }

    pub fn as_mut_ptr(&mut self) -> *mut u32 {
        self.pixels.as_mut_ptr()
    }
}
