use pixel_demos::{
    color::hsb_to_rgb,
    mandelbrot::{escape_count, Mandelbrot, Viewport, BRIGHTNESS, SATURATION},
    sand_simulator::{lock_simulator, spawn_ticker, Simulator},
    vec::Vec2,
};
use std::{
    sync::{mpsc, Arc, Mutex},
    time::Duration,
};

#[test]
fn ticker_settles_and_signals_repaint() {
    let simulator = Arc::new(Mutex::new(Simulator::new(Vec2::new(8, 6))));
    assert!(lock_simulator(&simulator)
        .grid_mut()
        .deposit(Vec2::new(4, 0)));

    let (tx, rx) = mpsc::channel();
    let ticker = spawn_ticker(Arc::clone(&simulator), Duration::from_millis(1), tx);

    // One repaint per tick, and five ticks bring the particle to the bottom row.
    for _ in 0..6 {
        rx.recv_timeout(Duration::from_secs(5)).unwrap();
    }
    drop(rx);
    ticker.join().unwrap();

    let simulator = lock_simulator(&simulator);
    let grid = simulator.grid();
    assert_eq!(grid.particle_count(), 1);
    assert!(grid.is_occupied(Vec2::new(4, 5)));
}

#[test]
fn dragging_outside_the_window_drops_nothing() {
    let mut simulator = Simulator::new(Vec2::new(8, 6));
    simulator.pointer_mut().press(Vec2::new(2, 2));
    simulator.pointer_mut().drag(Vec2::new(-4, 2));
    for _ in 0..3 {
        simulator.tick();
    }
    simulator.pointer_mut().drag(Vec2::new(8, 2));
    simulator.tick();
    assert_eq!(simulator.grid().particle_count(), 0);
}

#[test]
fn pile_forms_under_a_held_pointer() {
    let mut simulator = Simulator::new(Vec2::new(9, 6));
    simulator.pointer_mut().press(Vec2::new(4, 0));
    for _ in 0..12 {
        simulator.tick();
    }
    simulator.pointer_mut().release();
    for _ in 0..12 {
        simulator.tick();
    }

    assert_eq!(simulator.grid().particle_count(), 12);
    assert_eq!(simulator.settle(), 0);

    // At rest, nothing away from the border columns hangs over an empty cell.
    let grid = simulator.grid();
    for pos in grid
        .occupied_cells()
        .filter(|pos| pos.y < 5 && pos.x > 0 && pos.x < 8)
    {
        assert!(grid.is_occupied(Vec2::new(pos.x, pos.y + 1)));
    }
}

#[test]
fn small_render_is_histogram_equalized() {
    let viewport = Viewport::new(Vec2::new(-0.75, 0.0), 0.8);
    let renderer = Mandelbrot::new(Vec2::new(40, 30), viewport, 100);
    let frame = renderer.render();

    assert_eq!(frame.histogram.total(), 40 * 30);

    // The largest count present always lands on a percentile of 1.0.
    let max_count = *frame.counts.as_slice().iter().max().unwrap();
    let percentiles = frame.histogram.percentiles(40 * 30);
    assert!((percentiles[max_count as usize] - 1.0).abs() < 1e-6);
    assert!(frame.histogram.bucket(max_count) > 0);

    let centre = Vec2::new(20, 15);
    let c = viewport.sample(centre, renderer.size);
    assert_eq!(frame.counts.get(centre), escape_count(c.x, c.y, 100));
    assert_eq!(
        frame.color_at(centre),
        hsb_to_rgb(percentiles[frame.counts.get(centre) as usize], SATURATION, BRIGHTNESS)
    );
}

#[test]
fn default_renderer_matches_the_fixed_view() {
    let renderer = Mandelbrot::default();
    assert_eq!(renderer.size, Vec2::new(800, 800));
    assert_eq!(renderer.threshold, 5000);
    let span = renderer.viewport.max_real - renderer.viewport.min_real;
    assert!((span - 0.04).abs() < 1e-12);
    assert!((renderer.viewport.max_imag - renderer.viewport.min_imag - span).abs() < 1e-12);
}
