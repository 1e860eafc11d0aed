// session.rs - The single owner of the active grid and everything that mutates it

use std::time::{Duration, Instant};

use rand::SeedableRng;
use rand::rngs::StdRng;
use tracing::debug;

use crate::config::LifeConfig;
use crate::controller::{SimulationController, SimulationState};
use crate::dimension::{DesiredResolution, DimensionPolicy, DimensionSpec, Viewport};
use crate::error::Result;
use crate::grid::Grid;
use crate::patterns::{self, Pattern};
use crate::reflow::{Reflow, ReflowCoordinator, ReflowOptions};
use crate::resolution::{parse_interval, parse_resolution};
use crate::rules;
use crate::schedule::Debounce;

const HISTORY_LEN: usize = 10;

/// Ring of recent grid fingerprints.
#[derive(Debug, Clone, Default)]
struct CycleHistory {
    hashes: [u64; HISTORY_LEN],
    count: usize,
}

impl CycleHistory {
    /// Records `hash`; true when it was already among the recent ones.
    fn record(&mut self, hash: u64) -> bool {
        let filled = self.count.min(HISTORY_LEN);
        if self.hashes[..filled].contains(&hash) {
            return true;
        }
        self.hashes[self.count % HISTORY_LEN] = hash;
        self.count += 1;
        false
    }

    fn reset(&mut self) {
        self.count = 0;
    }
}

/// A running Game of Life: the grid, its generation counter, layout and
/// the Stopped/Running controller. Every mutation goes through `&mut self`.
pub struct Life {
    config: LifeConfig,
    grid: Grid,
    spec: DimensionSpec,
    generation: u64,
    viewport: Viewport,
    controller: SimulationController,
    reflow: ReflowCoordinator,
    history: CycleHistory,
    cycle_detected: bool,
    pending_pattern: Option<&'static Pattern>,
    notice: Option<String>,
    rng: StdRng,
}

impl Life {
    /// Lays out a randomized grid for `viewport`, Stopped.
    pub fn new(config: LifeConfig, viewport: Viewport) -> Result<Self> {
        config.validate()?;
        let mut rng = match config.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        };
        let mut reflow =
            ReflowCoordinator::new(DimensionPolicy::new(config.bounds), config.default_cell);
        let first = reflow.reflow(None, viewport, ReflowOptions::SETTLE, &mut rng)?;
        let controller =
            SimulationController::new(Duration::from_millis(config.step_interval_ms));

        let mut life = Self {
            config,
            grid: first.grid,
            spec: first.spec,
            generation: 0,
            viewport,
            controller,
            reflow,
            history: CycleHistory::default(),
            cycle_detected: false,
            pending_pattern: None,
            notice: None,
            rng,
        };
        life.reset_history();
        Ok(life)
    }

    pub fn config(&self) -> &LifeConfig {
        &self.config
    }

    pub fn grid(&self) -> &Grid {
        &self.grid
    }

    pub fn spec(&self) -> DimensionSpec {
        self.spec
    }

    pub fn width_priority(&self) -> bool {
        self.spec.width_priority
    }

    pub fn generation(&self) -> u64 {
        self.generation
    }

    pub fn population(&self) -> usize {
        self.grid.population()
    }

    pub fn viewport(&self) -> Viewport {
        self.viewport
    }

    pub fn state(&self) -> SimulationState {
        self.controller.state()
    }

    pub fn is_running(&self) -> bool {
        self.controller.is_running()
    }

    pub fn interval(&self) -> Duration {
        self.controller.interval()
    }

    pub fn next_step_at(&self) -> Option<Instant> {
        self.controller.next_step_at()
    }

    pub fn desired_resolution(&self) -> Option<DesiredResolution> {
        self.reflow.desired()
    }

    pub fn cycle_detected(&self) -> bool {
        self.cycle_detected
    }

    pub fn pending_pattern(&self) -> Option<&'static str> {
        self.pending_pattern.map(|p| p.name)
    }

    /// User-facing message from the last operation, if any.
    pub fn take_notice(&mut self) -> Option<String> {
        self.notice.take()
    }

    pub fn start(&mut self, now: Instant) -> bool {
        self.controller.start(now)
    }

    pub fn stop(&mut self) -> bool {
        self.controller.stop()
    }

    pub fn set_interval_ms(&mut self, ms: u64, now: Instant) {
        self.controller.set_interval_ms(ms, now);
    }

    pub fn set_interval_text(&mut self, text: &str, now: Instant) {
        self.set_interval_ms(parse_interval(text), now);
    }

    /// Advances one generation: the whole next grid is computed before it
    /// replaces the current one.
    fn advance(&mut self) {
        self.grid = rules::step(&self.grid);
        self.generation += 1;

        if self.history.record(self.grid.fingerprint()) {
            if !self.cycle_detected {
                debug!("Cycle detected at generation {}", self.generation);
            }
            self.cycle_detected = true;
            if self.config.stop_on_cycle {
                self.controller.stop();
            }
        }
    }

    /// Manual single step; ignored while Running.
    pub fn step(&mut self) -> bool {
        if self.is_running() {
            return false;
        }
        self.advance();
        true
    }

    /// Runs the periodic step when it is due.
    pub fn poll(&mut self, now: Instant) -> bool {
        if self.controller.step_due(now) {
            self.advance();
            true
        } else {
            false
        }
    }

    /// Flips one cell. Ignored (returns false) while Running.
    pub fn toggle(&mut self, x: usize, y: usize) -> Result<bool> {
        if !self.controller.can_edit() {
            debug!("Ignoring edit at ({}, {}) while running", x, y);
            return Ok(false);
        }
        self.grid.toggle(x, y)?;
        self.reset_history();
        Ok(true)
    }

    /// Forgets earlier fingerprints; the current grid becomes the first.
    fn reset_history(&mut self) {
        self.history.reset();
        self.history.record(self.grid.fingerprint());
        self.cycle_detected = false;
    }

    fn restart_generation(&mut self) {
        self.generation = 0;
        self.reset_history();
    }

    pub fn clear(&mut self) {
        self.stop();
        self.grid.clear();
        self.restart_generation();
    }

    pub fn randomize(&mut self) {
        self.stop();
        self.grid.randomize(&mut self.rng);
        self.restart_generation();
    }

    /// Clears the grid and centers the named pattern in it. Unknown names
    /// leave everything as it was.
    pub fn place_pattern(&mut self, name: &str) -> bool {
        let pattern = match patterns::lookup(name) {
            Ok(pattern) => pattern,
            Err(e) => {
                debug!("{}", e);
                return false;
            }
        };
        self.stop();
        patterns::place(pattern, &mut self.grid);
        self.restart_generation();
        true
    }

    /// Remembers a pattern for the next settle reflow, which then places it
    /// instead of randomizing.
    pub fn queue_pattern(&mut self, name: &str) -> bool {
        match patterns::lookup(name) {
            Ok(pattern) => {
                self.pending_pattern = Some(pattern);
                true
            }
            Err(e) => {
                debug!("{}", e);
                false
            }
        }
    }

    fn install(&mut self, reflow: Reflow) {
        if reflow.clamped {
            self.notice = Some(format!(
                "Resolution limited to {}x{}",
                reflow.spec.columns, reflow.spec.rows
            ));
        }
        self.grid = reflow.grid;
        self.spec = reflow.spec;
        if reflow.randomized {
            self.restart_generation();
        } else {
            self.reset_history();
        }
    }

    fn reflow_with(&mut self, options: ReflowOptions) -> Result<()> {
        let out = self
            .reflow
            .reflow(Some(&self.grid), self.viewport, options, &mut self.rng)?;
        self.install(out);
        Ok(())
    }

    /// Immediate reflow for one resize event: keeps the overlapping cells
    /// and the generation.
    pub fn reflow_live(&mut self, viewport: Viewport) -> Result<()> {
        self.viewport = viewport;
        self.reflow_with(ReflowOptions::LIVE)
    }

    /// Final reflow once resizing has stopped: randomizes, or places the
    /// queued pattern if there is one.
    pub fn reflow_settle(&mut self) -> Result<()> {
        match self.pending_pattern.take() {
            Some(pattern) => {
                self.reflow_with(ReflowOptions::LIVE)?;
                patterns::place(pattern, &mut self.grid);
                self.restart_generation();
                Ok(())
            }
            None => self.reflow_with(ReflowOptions::SETTLE),
        }
    }

    /// Stops and rebuilds a random grid at `desired`.
    /// On failure the previous resolution and grid stay in place.
    pub fn set_resolution(&mut self, desired: DesiredResolution) -> Result<()> {
        self.stop();
        let previous = self.reflow.desired();
        self.reflow.set_desired(desired);
        let result = self.reflow_with(ReflowOptions::SETTLE);
        if result.is_err() {
            match previous {
                Some(previous) => self.reflow.set_desired(previous),
                None => self.reflow.clear_desired(),
            }
        }
        result
    }

    /// Applies `"columns x rows"` text. Malformed text changes nothing.
    pub fn apply_resolution_text(&mut self, text: &str) -> Result<DesiredResolution> {
        let desired = parse_resolution(text).inspect_err(|e| debug!("{}", e))?;
        self.set_resolution(desired)?;
        Ok(desired)
    }

    /// Back to fitting cells of the current size to the viewport.
    pub fn clear_resolution(&mut self) -> Result<()> {
        self.stop();
        self.reflow.clear_desired();
        self.reflow_with(ReflowOptions::SETTLE)
    }

    fn scaled(&self, by: f64) -> DesiredResolution {
        let b = &self.config.bounds;
        let columns = (self.spec.columns as f64 * by).round() as usize;
        let rows = (self.spec.rows as f64 * by).round() as usize;
        DesiredResolution::new(columns.max(b.min_cols), rows.max(b.min_rows))
    }

    /// More, smaller cells.
    pub fn grow_resolution(&mut self) -> Result<()> {
        let cell_min = self.config.bounds.cell_min;
        let cell = self.reflow.cell_size();
        if self.reflow.desired().is_none() && cell > cell_min {
            self.stop();
            self.reflow
                .set_cell_size(cell.saturating_sub(self.config.cell_step).max(cell_min));
            self.reflow_with(ReflowOptions::SETTLE)
        } else {
            let desired = self.scaled(self.config.resolution_scale);
            self.set_resolution(desired)
        }
    }

    /// Fewer, larger cells.
    pub fn shrink_resolution(&mut self) -> Result<()> {
        if self.reflow.desired().is_some() {
            let desired = self.scaled(1.0 / self.config.resolution_scale);
            self.set_resolution(desired)
        } else {
            self.stop();
            let cell = self.reflow.cell_size();
            self.reflow.set_cell_size(cell + self.config.cell_step);
            self.reflow_with(ReflowOptions::SETTLE)
        }
    }
}

/// What a [`Driver::poll`] call did.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Tick {
    pub stepped: bool,
    pub settled: bool,
}

/// Couples a [`Life`] with the settle debounce so an adapter only has to
/// forward events and poll with the current time.
pub struct Driver {
    life: Life,
    settle: Debounce,
}

impl Driver {
    pub fn new(life: Life) -> Self {
        let delay = Duration::from_millis(life.config().settle_delay_ms);
        Self {
            life,
            settle: Debounce::new(delay),
        }
    }

    pub fn life(&self) -> &Life {
        &self.life
    }

    pub fn life_mut(&mut self) -> &mut Life {
        &mut self.life
    }

    pub fn settle_pending(&self) -> bool {
        self.settle.is_pending()
    }

    /// A resize stops the simulation, reflows keeping state, and (re)arms
    /// the settle reflow.
    pub fn on_resize(&mut self, viewport: Viewport, now: Instant) -> Result<()> {
        self.life.stop();
        self.life.reflow_live(viewport)?;
        self.settle.restart(now);
        Ok(())
    }

    pub fn start(&mut self, now: Instant) -> bool {
        self.life.start(now)
    }

    /// Explicit stop from the user; also drops a pending settle so nothing
    /// gets randomized right after.
    pub fn stop(&mut self) -> bool {
        self.settle.cancel();
        self.life.stop()
    }

    pub fn poll(&mut self, now: Instant) -> Result<Tick> {
        let settled = self.settle.poll(now);
        if settled {
            self.life.reflow_settle()?;
        }
        let stepped = self.life.poll(now);
        Ok(Tick { stepped, settled })
    }

    /// Earliest time anything is scheduled to happen.
    pub fn next_deadline(&self) -> Option<Instant> {
        match (self.life.next_step_at(), self.settle.deadline()) {
            (Some(a), Some(b)) => Some(a.min(b)),
            (a, b) => a.or(b),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn seeded() -> LifeConfig {
        LifeConfig {
            seed: Some(11),
            ..LifeConfig::default()
        }
    }

    fn life() -> Life {
        Life::new(seeded(), Viewport::new(200.0, 200.0, 0.0)).unwrap()
    }

    #[test]
    fn test_history_detects_repeat() {
        let mut history = CycleHistory::default();
        assert!(!history.record(1));
        assert!(!history.record(2));
        assert!(history.record(1));
        history.reset();
        assert!(!history.record(1));
    }

    #[test]
    fn test_history_forgets_old_hashes() {
        let mut history = CycleHistory::default();
        for hash in 1..=(HISTORY_LEN as u64 + 1) {
            assert!(!history.record(hash));
        }
        assert!(!history.record(1));
    }

    #[test]
    fn test_new_session_is_random_and_stopped() {
        let life = life();
        assert_eq!(life.grid().dimensions(), (10, 10));
        assert_eq!(life.generation(), 0);
        assert_eq!(life.state(), SimulationState::Stopped);
        assert!(life.population() > 0);
    }

    #[test]
    fn test_toggle_only_while_stopped() {
        let mut life = life();
        life.clear();
        assert!(life.toggle(3, 4).unwrap());
        assert!(life.grid().get(3, 4));
        life.start(Instant::now());
        assert!(!life.toggle(3, 4).unwrap());
        assert!(life.grid().get(3, 4));
    }

    #[test]
    fn test_manual_step_counts_generation() {
        let mut life = life();
        life.place_pattern("glider");
        assert!(life.step());
        assert!(life.step());
        assert_eq!(life.generation(), 2);
        assert_eq!(life.population(), 5);
    }

    #[test]
    fn test_unknown_pattern_is_noop() {
        let mut life = life();
        let before = life.grid().clone();
        assert!(!life.place_pattern("dragon"));
        assert_eq!(life.grid(), &before);
        assert!(!life.queue_pattern("dragon"));
    }

    #[test]
    fn test_stop_on_cycle() {
        let config = LifeConfig {
            stop_on_cycle: true,
            ..seeded()
        };
        let mut life = Life::new(config, Viewport::new(200.0, 200.0, 0.0)).unwrap();
        life.place_pattern("block");
        let t0 = Instant::now();
        life.start(t0);
        assert!(life.poll(t0 + Duration::from_millis(500)));
        assert!(life.cycle_detected());
        assert!(!life.is_running());
    }

    #[test]
    fn test_invalid_resolution_text_keeps_state() {
        let mut life = life();
        let before = life.grid().clone();
        assert!(life.apply_resolution_text("forty by thirty").is_err());
        assert_eq!(life.grid(), &before);
        assert_eq!(life.desired_resolution(), None);
    }
}
