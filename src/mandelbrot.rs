//! Escape-time Mandelbrot renderer with histogram-equalized hue coloring.
//!
//! Every call to [`Mandelbrot::render`] recomputes the whole image; nothing is
//! cached between frames.

use super::color::hsb_to_rgb;
use super::vec::Vec2;
use lazy_static::lazy_static;
use sdl2::pixels::Color;

pub const THRESHOLD: u32 = 5000;
pub const ESCAPE_RADIUS_SQUARED: f64 = 4.0;
pub const SATURATION: f32 = 0.85;
pub const BRIGHTNESS: f32 = 1.0;
lazy_static! {
    pub static ref IMAGE_SIZE: Vec2<usize> = Vec2::<usize>::new(800, 800);
    pub static ref VIEWPORT: Viewport = Viewport::new(Vec2::new(-1.4011, 0.0), 100.0);
}

/// Region of the complex plane shown on screen. The imaginary span always
/// matches the real span.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Viewport {
    pub min_real: f64,
    pub max_real: f64,
    pub min_imag: f64,
    pub max_imag: f64,
}

impl Viewport {
    pub fn new(center: Vec2<f64>, zoom: f64) -> Self {
        let min_real = center.x - 2.0 / zoom;
        let max_real = center.x + 2.0 / zoom;
        let half_span = (max_real - min_real) / 2.0;
        Self {
            min_real,
            max_real,
            min_imag: center.y - half_span,
            max_imag: center.y + half_span,
        }
    }

    /// Complex point at the centre of pixel `pixel` in an image of `size`.
    /// Row 0 is the top of the image, i.e. the largest imaginary part.
    pub fn sample(&self, pixel: Vec2<usize>, size: Vec2<usize>) -> Vec2<f64> {
        let real_step = (self.max_real - self.min_real) / size.x as f64;
        let imag_step = (self.max_imag - self.min_imag) / size.y as f64;
        Vec2::new(
            self.min_real + real_step * pixel.x as f64 + real_step / 2.0,
            self.max_imag - imag_step * pixel.y as f64 - imag_step / 2.0,
        )
    }
}

/// Iterates `z = z^2 + c` from zero and returns the index of the first iteration
/// whose result leaves the escape radius, or `threshold` if none does.
pub fn escape_count(re: f64, im: f64, threshold: u32) -> u32 {
    let mut z_real = 0.0;
    let mut z_imag = 0.0;
    for i in 0..threshold {
        let sq_real = z_real * z_real - z_imag * z_imag;
        let sq_imag = 2.0 * z_real * z_imag;
        z_real = sq_real + re;
        z_imag = sq_imag + im;
        if z_real * z_real + z_imag * z_imag > ESCAPE_RADIUS_SQUARED {
            return i;
        }
    }
    threshold
}

/// Number of pixels that escaped at each iteration count, `0..=threshold`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Histogram {
    buckets: Vec<u32>,
}

impl Histogram {
    pub fn new(threshold: u32) -> Self {
        Self {
            buckets: vec![0; threshold as usize + 1],
        }
    }

    pub fn from_counts(counts: &[u32], threshold: u32) -> Self {
        let mut histogram = Self::new(threshold);
        counts.iter().for_each(|&count| histogram.record(count));
        histogram
    }

    pub fn record(&mut self, count: u32) {
        self.buckets[count as usize] += 1;
    }

    pub fn bucket(&self, count: u32) -> u32 {
        self.buckets[count as usize]
    }

    pub fn total(&self) -> u64 {
        self.buckets.iter().map(|&n| u64::from(n)).sum()
    }

    /// For each count `k`, the share of `pixel_count` pixels whose count is `<= k`.
    pub fn percentiles(&self, pixel_count: usize) -> Vec<f32> {
        let mut cumulative = 0u64;
        self.buckets
            .iter()
            .map(|&n| {
                cumulative += u64::from(n);
                cumulative as f32 / pixel_count as f32
            })
            .collect()
    }
}

/// Escape counts for every pixel, row-major.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CountMatrix {
    size: Vec2<usize>,
    counts: Vec<u32>,
}

impl CountMatrix {
    pub fn size(&self) -> Vec2<usize> {
        self.size
    }

    pub fn get(&self, pixel: Vec2<usize>) -> u32 {
        self.counts[pixel.x + self.size.x * pixel.y]
    }

    pub fn as_slice(&self) -> &[u32] {
        &self.counts
    }
}

/// One fully rendered image.
pub struct Frame {
    pub counts: CountMatrix,
    pub histogram: Histogram,
    /// Packed RGB24, row-major, `3 * width` bytes per row.
    pub pixels: Vec<u8>,
}

impl Frame {
    pub fn size(&self) -> Vec2<usize> {
        self.counts.size()
    }

    pub fn pitch(&self) -> usize {
        self.size().x * 3
    }

    pub fn color_at(&self, pixel: Vec2<usize>) -> Color {
        let id = (pixel.x + self.size().x * pixel.y) * 3;
        Color::RGB(self.pixels[id], self.pixels[id + 1], self.pixels[id + 2])
    }
}

pub struct Mandelbrot {
    pub size: Vec2<usize>,
    pub viewport: Viewport,
    pub threshold: u32,
}

impl Mandelbrot {
    pub fn new(size: Vec2<usize>, viewport: Viewport, threshold: u32) -> Self {
        Self {
            size,
            viewport,
            threshold,
        }
    }

    pub fn compute_counts(&self) -> CountMatrix {
        let mut counts = Vec::with_capacity(self.size.area());
        for y in 0..self.size.y {
            for x in 0..self.size.x {
                let c = self.viewport.sample(Vec2::new(x, y), self.size);
                counts.push(escape_count(c.x, c.y, self.threshold));
            }
        }
        CountMatrix {
            size: self.size,
            counts,
        }
    }

    pub fn render(&self) -> Frame {
        let counts = self.compute_counts();
        let histogram = Histogram::from_counts(counts.as_slice(), self.threshold);

        // Every pixel with the same count gets the same color, so build the
        // palette once per count value.
        let palette: Vec<Color> = histogram
            .percentiles(self.size.area())
            .into_iter()
            .map(|percentile| hsb_to_rgb(percentile, SATURATION, BRIGHTNESS))
            .collect();

        let mut pixels = Vec::with_capacity(self.size.area() * 3);
        for &count in counts.as_slice() {
            let color = palette[count as usize];
            pixels.extend_from_slice(&[color.r, color.g, color.b]);
        }

        Frame {
            counts,
            histogram,
            pixels,
        }
    }
}

impl Default for Mandelbrot {
    fn default() -> Self {
        Self::new(*IMAGE_SIZE, *VIEWPORT, THRESHOLD)
    }
}
