//! Step timing threaded through evaluation.
//!
//! A `Timer` only observes: it never changes what an expression evaluates
//! to. `NoopTimer` is accepted anywhere a recording timer is.

use std::time::{Duration, Instant};
use tracing::debug;

/// Receives the start and end of named evaluation steps.
///
/// Steps nest; every `enter` is matched by one `exit`. Callers go through
/// `step`, which pairs them.
pub trait Timer {
    fn enter(&mut self, name: &str);
    fn exit(&mut self);
}

impl<'t> dyn Timer + 't {
    /// Run `f` as a step named `name`.
    pub fn step<R>(&mut self, name: &str, f: impl FnOnce(&mut (dyn Timer + 't)) -> R) -> R {
        self.enter(name);
        let result = f(&mut *self);
        self.exit();
        result
    }
}

/// Timer that records nothing.
#[derive(Copy, Clone, Debug, Default)]
pub struct NoopTimer;

impl Timer for NoopTimer {
    fn enter(&mut self, _name: &str) {}
    fn exit(&mut self) {}
}

/// One completed (or still open) step.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Step {
    pub name: String,
    /// Nesting level; top-level steps are 0.
    pub depth: usize,
    pub duration: Duration,
}

/// Timer that keeps every step in the order it was entered.
#[derive(Debug, Default)]
pub struct RecordingTimer {
    steps: Vec<Step>,
    open: Vec<(usize, Instant)>,
}

impl RecordingTimer {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn steps(&self) -> &[Step] {
        &self.steps
    }
}

impl Timer for RecordingTimer {
    fn enter(&mut self, name: &str) {
        self.open.push((self.steps.len(), Instant::now()));
        self.steps.push(Step {
            name: name.to_string(),
            depth: self.open.len() - 1,
            duration: Duration::ZERO,
        });
    }

    fn exit(&mut self) {
        let Some((index, start)) = self.open.pop() else {
            return;
        };
        let duration = start.elapsed();
        let step = &mut self.steps[index];
        step.duration = duration;
        debug!(step = %step.name, ?duration, "step done");
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn steps_record_nesting_in_entry_order() {
        let mut recording = RecordingTimer::new();
        let timer: &mut dyn Timer = &mut recording;
        let value = timer.step("outer", |timer| {
            timer.step("first", |_| ());
            timer.step("second", |timer| timer.step("inner", |_| 42))
        });
        assert_eq!(value, 42);

        let shape: Vec<_> = recording
            .steps()
            .iter()
            .map(|s| (s.name.as_str(), s.depth))
            .collect();
        assert_eq!(shape, vec![("outer", 0), ("first", 1), ("second", 1), ("inner", 2)]);
    }

    #[test]
    fn unmatched_exit_is_ignored() {
        let mut recording = RecordingTimer::new();
        recording.exit();
        assert!(recording.steps().is_empty());
    }

    #[test]
    fn noop_timer_passes_results_through() {
        let timer: &mut dyn Timer = &mut NoopTimer;
        assert_eq!(timer.step("anything", |_| "done"), "done");
    }
}
