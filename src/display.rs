use super::mandelbrot::Frame;
use super::sand_simulator::Grid;
use super::vec::Vec2;
use anyhow::Context;
use sdl2::{
    pixels::{Color, PixelFormatEnum},
    rect::Point,
    render::Canvas,
    video::Window,
};

pub const BACKGROUND_COLOR: Color = Color::RGB(255, 255, 255);
pub const SAND_COLOR: Color = Color::RGB(0, 0, 0);

/// Opens a centred, fixed-size window with an accelerated canvas.
pub fn get_sdl_canvas(
    sdl_context: &sdl2::Sdl,
    title: &str,
    size: Vec2<usize>,
) -> anyhow::Result<Canvas<Window>> {
    let video_subsystem = sdl_context.video().map_err(anyhow::Error::msg)?;
    let window = video_subsystem
        .window(title, size.x as u32, size.y as u32)
        .position_centered()
        .build()
        .with_context(|| format!("failed to open the {:?} window", title))?;
    log::info!("opened {:?} at {}x{}", title, size.x, size.y);

    window
        .into_canvas()
        .accelerated()
        .build()
        .context("failed to create a canvas")
}

pub fn clear_canvas_with_color(canvas: &mut Canvas<Window>, color: Color) {
    canvas.set_draw_color(color);
    canvas.clear();
}

/// Draws every occupied cell as one pixel.
pub fn draw_sand(canvas: &mut Canvas<Window>, grid: &Grid) -> anyhow::Result<()> {
    let points: Vec<Point> = grid
        .occupied_cells()
        .map(|pos| Point::new(pos.x as i32, pos.y as i32))
        .collect();

    clear_canvas_with_color(canvas, BACKGROUND_COLOR);
    canvas.set_draw_color(SAND_COLOR);
    canvas
        .draw_points(points.as_slice())
        .map_err(anyhow::Error::msg)?;
    canvas.present();
    Ok(())
}

/// Uploads a rendered frame into a texture and shows it.
pub fn draw_frame(canvas: &mut Canvas<Window>, frame: &Frame) -> anyhow::Result<()> {
    let size = frame.size();
    let texture_creator = canvas.texture_creator();
    let mut texture = texture_creator
        .create_texture_static(PixelFormatEnum::RGB24, size.x as u32, size.y as u32)
        .context("failed to create the frame texture")?;
    texture
        .update(None, &frame.pixels, frame.pitch())
        .context("failed to upload the frame")?;

    clear_canvas_with_color(canvas, BACKGROUND_COLOR);
    canvas
        .copy(&texture, None, None)
        .map_err(anyhow::Error::msg)?;
    canvas.present();
    Ok(())
}
