pub mod color;
pub mod display;
pub mod mandelbrot;
pub mod sand_simulator;
pub mod vec;
