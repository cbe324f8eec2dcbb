use pixel_demos::{
    display::{draw_sand, get_sdl_canvas},
    sand_simulator::{lock_simulator, spawn_ticker, Simulator, GRID_SIZE, TICK_PERIOD},
    vec::Vec2,
};
use sdl2::{event::Event, keyboard::Keycode, render::Canvas, video::Window, EventPump};
use std::sync::{
    mpsc::{self, Receiver},
    Arc, Mutex,
};

const EVENT_WAIT_MS: u32 = 5;

pub struct App {
    running: bool,
    simulator: Arc<Mutex<Simulator>>,
    canvas: Canvas<Window>,
    event_pump: EventPump,
    repaint: Receiver<()>,
}

impl App {
    pub fn new(
        sdl_context: &sdl2::Sdl,
        simulator: Arc<Mutex<Simulator>>,
        repaint: Receiver<()>,
    ) -> anyhow::Result<Self> {
        let mut app = App {
            running: true,
            canvas: get_sdl_canvas(sdl_context, "Falling Sand", *GRID_SIZE)?,
            event_pump: sdl_context.event_pump().map_err(anyhow::Error::msg)?,
            simulator,
            repaint,
        };

        app.render()?;

        Ok(app)
    }

    pub fn is_running(&self) -> bool {
        self.running
    }

    pub fn input(&mut self) {
        let first = self.event_pump.wait_event_timeout(EVENT_WAIT_MS);
        let pending: Vec<Event> = first
            .into_iter()
            .chain(self.event_pump.poll_iter())
            .collect();

        for event in pending {
            match event {
                Event::Quit { .. }
                | Event::KeyDown {
                    keycode: Some(Keycode::Escape),
                    ..
                } => self.running = false,
                Event::MouseButtonDown { x, y, .. } => {
                    lock_simulator(&self.simulator)
                        .pointer_mut()
                        .press(Vec2::new(x, y));
                }
                Event::MouseMotion { x, y, .. } => {
                    lock_simulator(&self.simulator)
                        .pointer_mut()
                        .drag(Vec2::new(x, y));
                }
                Event::MouseButtonUp { .. } => {
                    lock_simulator(&self.simulator).pointer_mut().release();
                }
                _ => {}
            }
        }
    }

    /// Redraws if the ticker has settled the grid since the last frame.
    pub fn update(&mut self) -> anyhow::Result<()> {
        if self.repaint.try_iter().count() > 0 {
            self.render()?;
        }
        Ok(())
    }

    pub fn render(&mut self) -> anyhow::Result<()> {
        let simulator = lock_simulator(&self.simulator);
        draw_sand(&mut self.canvas, simulator.grid())
    }
}

fn main() -> anyhow::Result<()> {
    env_logger::init();

    let sdl_context = sdl2::init().map_err(anyhow::Error::msg)?;
    let simulator = Arc::new(Mutex::new(Simulator::default()));
    let (repaint_tx, repaint_rx) = mpsc::channel();

    let mut app = App::new(&sdl_context, Arc::clone(&simulator), repaint_rx)?;
    spawn_ticker(simulator, TICK_PERIOD, repaint_tx);

    while app.is_running() {
        app.input();
        if let Err(e) = app.update() {
            log::error!("Unable to render: {:?}", e);
        }
    }

    log::info!("window closed");
    Ok(())
}
