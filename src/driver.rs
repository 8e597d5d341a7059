//! Driver loop that repeatedly advances a [`SimulationEngine`]
//!
//! The engine has no notion of time, pausing or termination; all of that lives
//! here. A [`StopHandle`] can be cloned into other threads (a key handler, a
//! signal handler) to pause, resume or stop a running loop.

use crate::game_of_life::{Grid, SimulationEngine};
use std::ops::ControlFlow;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::Duration;
use tracing::{debug, info};

const PAUSE_POLL: Duration = Duration::from_millis(10);

/// How many generations a run may advance
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RunBudget {
    Generations(usize),
    Forever,
}

impl From<Option<usize>> for RunBudget {
    fn from(generations: Option<usize>) -> Self {
        generations.map_or(RunBudget::Forever, RunBudget::Generations)
    }
}

/// Cross-thread control of a running [`Driver`]
#[derive(Debug, Clone, Default)]
pub struct StopHandle {
    stopped: Arc<AtomicBool>,
    paused: Arc<AtomicBool>,
}

impl StopHandle {
    pub fn stop(&self) {
        self.stopped.store(true, Ordering::SeqCst);
    }

    pub fn is_stopped(&self) -> bool {
        self.stopped.load(Ordering::SeqCst)
    }

    pub fn pause(&self) {
        self.paused.store(true, Ordering::SeqCst);
    }

    pub fn resume(&self) {
        self.paused.store(false, Ordering::SeqCst);
    }

    /// Flip the paused flag, returning the new state
    pub fn toggle_pause(&self) -> bool {
        !self.paused.fetch_xor(true, Ordering::SeqCst)
    }

    pub fn is_paused(&self) -> bool {
        self.paused.load(Ordering::SeqCst)
    }
}

/// Outcome of [`Driver::run`]
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RunSummary {
    /// Generations advanced during this run
    pub generations: usize,
    pub final_population: usize,
    /// Ended before the budget ran out
    pub stopped_early: bool,
    pub extinct: bool,
}

pub struct Driver {
    engine: SimulationEngine,
    interval: Duration,
    stop_when_extinct: bool,
    handle: StopHandle,
}

impl Driver {
    pub fn new(engine: SimulationEngine) -> Self {
        Self {
            engine,
            interval: Duration::ZERO,
            stop_when_extinct: false,
            handle: StopHandle::default(),
        }
    }

    /// Delay between generations
    pub fn with_interval(mut self, interval: Duration) -> Self {
        self.interval = interval;
        self
    }

    /// End the run once every cell is dead
    pub fn stop_when_extinct(mut self, stop: bool) -> Self {
        self.stop_when_extinct = stop;
        self
    }

    pub fn handle(&self) -> StopHandle {
        self.handle.clone()
    }

    pub fn engine(&self) -> &SimulationEngine {
        &self.engine
    }

    pub fn engine_mut(&mut self) -> &mut SimulationEngine {
        &mut self.engine
    }

    pub fn into_engine(self) -> SimulationEngine {
        self.engine
    }

    /// Advance until the budget is spent, the observer breaks, the handle is
    /// stopped, or (if enabled) the population dies out.
    ///
    /// The observer sees each new generation with its 1-based index within
    /// this run.
    pub fn run<F>(&mut self, budget: RunBudget, mut observer: F) -> RunSummary
    where
        F: FnMut(usize, &Grid) -> ControlFlow<()>,
    {
        info!(
            ?budget,
            height = self.engine.height(),
            width = self.engine.width(),
            "starting run"
        );

        let mut generation = 0;
        let mut stopped_early = false;

        loop {
            if let RunBudget::Generations(limit) = budget {
                if generation >= limit {
                    break;
                }
            }
            if self.handle.is_stopped() {
                stopped_early = true;
                break;
            }
            if self.handle.is_paused() {
                std::thread::sleep(PAUSE_POLL);
                continue;
            }

            let grid = self.engine.advance();
            generation += 1;
            debug!(generation, population = grid.living_count(), "advanced");

            if observer(generation, grid).is_break() {
                stopped_early = true;
                break;
            }
            if self.stop_when_extinct && self.engine.is_extinct() {
                info!(generation, "population extinct");
                stopped_early = match budget {
                    RunBudget::Generations(limit) => generation < limit,
                    RunBudget::Forever => true,
                };
                break;
            }
            if !self.interval.is_zero() {
                std::thread::sleep(self.interval);
            }
        }

        let summary = RunSummary {
            generations: generation,
            final_population: self.engine.live_count(),
            stopped_early,
            extinct: self.engine.is_extinct(),
        };
        info!(
            generations = summary.generations,
            population = summary.final_population,
            stopped_early = summary.stopped_early,
            "run finished"
        );
        summary
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::game_of_life::parse_pattern_auto;
    use std::thread;

    fn blinker() -> SimulationEngine {
        SimulationEngine::from_grid(parse_pattern_auto("00000\n00000\n01110\n00000\n00000\n"))
    }

    #[test]
    fn test_bounded_run() {
        let mut driver = Driver::new(blinker());
        let mut seen = Vec::new();

        let summary = driver.run(RunBudget::Generations(4), |generation, grid| {
            seen.push((generation, grid.living_count()));
            ControlFlow::Continue(())
        });

        assert_eq!(summary.generations, 4);
        assert!(!summary.stopped_early);
        assert_eq!(summary.final_population, 3);
        assert_eq!(seen, vec![(1, 3), (2, 3), (3, 3), (4, 3)]);
        // Even number of steps brings the blinker back
        assert_eq!(driver.engine().grid(), blinker().grid());
    }

    #[test]
    fn test_zero_budget_does_nothing() {
        let mut driver = Driver::new(blinker());
        let summary = driver.run(RunBudget::Generations(0), |_, _| ControlFlow::Continue(()));
        assert_eq!(summary.generations, 0);
        assert_eq!(driver.engine().grid(), blinker().grid());
    }

    #[test]
    fn test_observer_can_break() {
        let mut driver = Driver::new(blinker());
        let summary = driver.run(RunBudget::Forever, |generation, _| {
            if generation == 5 {
                ControlFlow::Break(())
            } else {
                ControlFlow::Continue(())
            }
        });
        assert_eq!(summary.generations, 5);
        assert!(summary.stopped_early);
    }

    #[test]
    fn test_stop_handle_ends_forever_run() {
        let mut driver = Driver::new(blinker()).with_interval(Duration::from_millis(1));
        let handle = driver.handle();

        let stopper = thread::spawn(move || {
            thread::sleep(Duration::from_millis(30));
            handle.stop();
        });

        let summary = driver.run(RunBudget::Forever, |_, _| ControlFlow::Continue(()));
        stopper.join().unwrap();

        assert!(summary.stopped_early);
        assert!(summary.generations > 0);
    }

    #[test]
    fn test_pause_and_resume() {
        let mut driver = Driver::new(blinker());
        let handle = driver.handle();
        handle.pause();
        assert!(handle.is_paused());

        let resumer = {
            let handle = handle.clone();
            thread::spawn(move || {
                thread::sleep(Duration::from_millis(30));
                assert!(!handle.toggle_pause());
            })
        };

        let summary = driver.run(RunBudget::Generations(3), |_, _| ControlFlow::Continue(()));
        resumer.join().unwrap();

        assert_eq!(summary.generations, 3);
        assert!(!handle.is_paused());
    }

    #[test]
    fn test_stop_when_extinct() {
        let engine = SimulationEngine::from_grid(parse_pattern_auto("000\n010\n000\n"));
        let mut driver = Driver::new(engine).stop_when_extinct(true);

        let summary = driver.run(RunBudget::Forever, |_, _| ControlFlow::Continue(()));
        assert_eq!(summary.generations, 1);
        assert!(summary.extinct);
        assert!(summary.stopped_early);
        assert_eq!(summary.final_population, 0);
    }

    #[test]
    fn test_reseed_between_runs() {
        let mut driver = Driver::new(blinker()).stop_when_extinct(true);
        driver.run(RunBudget::Generations(1), |_, _| ControlFlow::Continue(()));

        let block = parse_pattern_auto("00000\n01100\n01100\n00000\n00000\n");
        driver.engine_mut().set_grid(block.clone()).unwrap();
        assert!(driver.engine_mut().set_grid(Grid::dead(3, 3)).is_err());

        let summary = driver.run(RunBudget::Generations(3), |_, grid| {
            assert_eq!(grid, &block);
            ControlFlow::Continue(())
        });
        assert_eq!(summary.generations, 3);
        assert_eq!(summary.final_population, 4);

        let engine = driver.into_engine();
        assert_eq!(engine.grid(), &block);
    }

    #[test]
    fn test_budget_from_option() {
        assert_eq!(RunBudget::from(Some(3)), RunBudget::Generations(3));
        assert_eq!(RunBudget::from(None), RunBudget::Forever);
    }
}
