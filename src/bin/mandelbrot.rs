use pixel_demos::{
    display::{draw_frame, get_sdl_canvas},
    mandelbrot::Mandelbrot,
};
use sdl2::{
    event::{Event, WindowEvent},
    keyboard::Keycode,
    render::Canvas,
    video::Window,
    EventPump,
};
use std::time::Instant;

pub struct App {
    running: bool,
    renderer: Mandelbrot,
    canvas: Canvas<Window>,
    event_pump: EventPump,
}

impl App {
    pub fn new(sdl_context: &sdl2::Sdl) -> anyhow::Result<Self> {
        let renderer = Mandelbrot::default();
        let mut app = App {
            running: true,
            canvas: get_sdl_canvas(sdl_context, "Mandelbrot Set", renderer.size)?,
            event_pump: sdl_context.event_pump().map_err(anyhow::Error::msg)?,
            renderer,
        };

        app.render()?;

        Ok(app)
    }

    pub fn is_running(&self) -> bool {
        self.running
    }

    /// Blocks for the next event. Returns whether the window needs repainting.
    pub fn input(&mut self) -> bool {
        match self.event_pump.wait_event() {
            Event::Quit { .. }
            | Event::KeyDown {
                keycode: Some(Keycode::Escape),
                ..
            } => {
                self.running = false;
                false
            }
            Event::Window {
                win_event: WindowEvent::Exposed,
                ..
            } => true,
            _ => false,
        }
    }

    /// Recomputes the whole image and shows it.
    pub fn render(&mut self) -> anyhow::Result<()> {
        let started = Instant::now();
        let frame = self.renderer.render();
        log::info!(
            "rendered {}x{} with threshold {} in {:?}",
            self.renderer.size.x,
            self.renderer.size.y,
            self.renderer.threshold,
            started.elapsed()
        );
        draw_frame(&mut self.canvas, &frame)
    }
}

fn main() -> anyhow::Result<()> {
    env_logger::init();

    let sdl_context = sdl2::init().map_err(anyhow::Error::msg)?;
    let mut app = App::new(&sdl_context)?;

    while app.is_running() {
        if app.input() {
            if let Err(e) = app.render() {
                log::error!("Unable to render: {:?}", e);
            }
        }
    }

    log::info!("window closed");
    Ok(())
}
