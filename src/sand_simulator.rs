use super::vec::Vec2;
use lazy_static::lazy_static;
use std::{
    sync::{mpsc::Sender, Arc, Mutex, MutexGuard, PoisonError},
    thread::{self, JoinHandle},
    time::Duration,
};

pub const TICK_PERIOD: Duration = Duration::from_millis(50);
lazy_static! {
    pub static ref GRID_SIZE: Vec2<usize> = Vec2::<usize>::new(640, 240);
}

/// Boolean occupancy grid, row-major. A cell is `true` iff sand occupies it.
pub struct Grid {
    size: Vec2<usize>,
    cells: Vec<bool>,
}

impl Grid {
    pub fn new(size: Vec2<usize>) -> Self {
        Self {
            size,
            cells: vec![false; size.area()],
        }
    }

    pub fn size(&self) -> Vec2<usize> {
        self.size
    }

    fn get_id_from_pos(&self, pos: Vec2<usize>) -> usize {
        pos.x + self.size.x * pos.y
    }

    pub fn is_occupied(&self, pos: Vec2<usize>) -> bool {
        self.cells[self.get_id_from_pos(pos)]
    }

    pub fn particle_count(&self) -> usize {
        self.cells.iter().filter(|&&occupied| occupied).count()
    }

    pub fn occupied_cells(&self) -> impl Iterator<Item = Vec2<usize>> + '_ {
        let width = self.size.x;
        self.cells
            .iter()
            .enumerate()
            .filter(|(_, occupied)| **occupied)
            .map(move |(id, _)| Vec2::new(id % width, id / width))
    }

    /// Marks the cell at `pos` occupied. Returns `false` when `pos` is off the grid.
    pub fn deposit(&mut self, pos: Vec2<i32>) -> bool {
        match pos.to_index_within(self.size) {
            Some(pos) => {
                let id = self.get_id_from_pos(pos);
                self.cells[id] = true;
                true
            }
            None => false,
        }
    }

    fn swap_fields_on_grid(&mut self, id_a: usize, id_b: usize) {
        self.cells.swap(id_a, id_b);
    }

    fn fall_target(&self, pos: Vec2<usize>) -> Option<Vec2<usize>> {
        let [x, y]: [usize; 2] = pos.into();
        [
            Vec2::new(x, y + 1),
            Vec2::new(x - 1, y + 1),
            Vec2::new(x + 1, y + 1),
        ]
        .iter()
        .copied()
        .find(|&target| !self.is_occupied(target))
    }

    /// One settle pass. Rows run from the second-to-last up to the top and the
    /// border columns are skipped, so the outermost columns never move. Moves are
    /// applied in place: cells visited later see the updated grid.
    ///
    /// Returns how many particles moved.
    pub fn settle(&mut self) -> usize {
        if self.size.y < 2 || self.size.x < 3 {
            return 0;
        }

        let mut moved = 0;
        for y in (0..self.size.y - 1).rev() {
            for x in 1..self.size.x - 1 {
                let pos = Vec2::new(x, y);
                if !self.is_occupied(pos) {
                    continue;
                }
                if let Some(target) = self.fall_target(pos) {
                    let from = self.get_id_from_pos(pos);
                    let to = self.get_id_from_pos(target);
                    self.swap_fields_on_grid(from, to);
                    moved += 1;
                }
            }
        }
        moved
    }
}

#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct Pointer {
    pos: Vec2<i32>,
    active: bool,
}

impl Pointer {
    pub fn press(&mut self, pos: Vec2<i32>) {
        self.pos = pos;
        self.active = true;
    }

    pub fn drag(&mut self, pos: Vec2<i32>) {
        self.pos = pos;
    }

    pub fn release(&mut self) {
        self.active = false;
    }

    pub fn position(&self) -> Vec2<i32> {
        self.pos
    }

    pub fn is_active(&self) -> bool {
        self.active
    }
}

pub struct Simulator {
    grid: Grid,
    pointer: Pointer,
}

impl Simulator {
    pub fn new(size: Vec2<usize>) -> Self {
        Self {
            grid: Grid::new(size),
            pointer: Pointer::default(),
        }
    }

    pub fn grid(&self) -> &Grid {
        &self.grid
    }

    pub fn grid_mut(&mut self) -> &mut Grid {
        &mut self.grid
    }

    pub fn pointer_mut(&mut self) -> &mut Pointer {
        &mut self.pointer
    }

    /// Drops a particle at `pos` while the pointer is pressed.
    pub fn deposit(&mut self, pos: Vec2<i32>) -> bool {
        if !self.pointer.is_active() {
            return false;
        }
        let placed = self.grid.deposit(pos);
        if !placed {
            log::debug!("discarding deposit outside the grid at ({}, {})", pos.x, pos.y);
        }
        placed
    }

    pub fn settle(&mut self) -> usize {
        self.grid.settle()
    }

    /// Deposits at the last recorded pointer position, then settles once.
    pub fn tick(&mut self) -> usize {
        self.deposit(self.pointer.position());
        self.settle()
    }
}

impl Default for Simulator {
    fn default() -> Self {
        Self::new(*GRID_SIZE)
    }
}

/// Locks the shared simulator, recovering the state if another thread panicked
/// while holding the lock. The grid is plain data so it is always usable.
pub fn lock_simulator(simulator: &Mutex<Simulator>) -> MutexGuard<'_, Simulator> {
    simulator.lock().unwrap_or_else(|poisoned| {
        log::warn!("simulator lock was poisoned, recovering");
        PoisonError::into_inner(poisoned)
    })
}

/// Runs `tick` every `period` on a dedicated thread and signals `repaint` after
/// each pass. Stops once the receiving side hangs up.
pub fn spawn_ticker(
    simulator: Arc<Mutex<Simulator>>,
    period: Duration,
    repaint: Sender<()>,
) -> JoinHandle<()> {
    thread::spawn(move || loop {
        let moved = lock_simulator(&simulator).tick();
        log::debug!("tick moved {} particles", moved);

        if repaint.send(()).is_err() {
            log::info!("display is gone, stopping the ticker");
            break;
        }
        thread::sleep(period);
    })
}
