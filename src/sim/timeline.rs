//! Phase sequencer for time-extended gadgets
//!
//! An ordered list of per-tick phase functions with an explicit current phase.
//! Each call to [`Timeline::execute`] runs the current phase once; its return
//! value decides whether the sequence advances, jumps, holds or finishes.
//! The sequencer owns no gadget state: phases receive the owner's state and a
//! per-tick context as arguments.

/// What a phase asks the sequencer to do after running
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PhaseStep {
    /// Move to the next phase
    Advance,
    /// Move to an explicit phase index
    Jump(usize),
    /// Stay on the current phase
    Hold,
    /// Mark the sequence finished
    Finish,
}

impl From<bool> for PhaseStep {
    fn from(done: bool) -> Self {
        if done { PhaseStep::Advance } else { PhaseStep::Hold }
    }
}

/// A single phase: mutates owner state `S` given tick context `C`
pub type PhaseFn<S, C> = fn(&mut S, &C) -> PhaseStep;

/// Ordered phases with a current index (`None` = finished)
pub struct Timeline<S, C> {
    sequence: Vec<PhaseFn<S, C>>,
    phase: Option<usize>,
    /// Restart from phase 0 once finished
    pub looping: bool,
    on_loop: Option<fn(&mut S)>,
}

impl<S, C> Default for Timeline<S, C> {
    fn default() -> Self {
        Self::new()
    }
}

impl<S, C> std::fmt::Debug for Timeline<S, C> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Timeline")
            .field("phases", &self.sequence.len())
            .field("phase", &self.phase)
            .field("looping", &self.looping)
            .finish()
    }
}

impl<S, C> Timeline<S, C> {
    pub fn new() -> Self {
        Self {
            sequence: Vec::new(),
            phase: Some(0),
            looping: false,
            on_loop: None,
        }
    }

    /// Looping timeline that calls `on_loop` each time it wraps around
    pub fn looping(on_loop: fn(&mut S)) -> Self {
        Self {
            looping: true,
            on_loop: Some(on_loop),
            ..Self::new()
        }
    }

    /// Append a phase
    pub fn add(&mut self, phase: PhaseFn<S, C>) -> &mut Self {
        self.sequence.push(phase);
        self
    }

    /// Current phase index, `None` once finished
    pub fn phase(&self) -> Option<usize> {
        self.phase
    }

    pub fn is_finished(&self) -> bool {
        self.phase.is_none()
    }

    pub fn len(&self) -> usize {
        self.sequence.len()
    }

    pub fn is_empty(&self) -> bool {
        self.sequence.is_empty()
    }

    pub fn reset(&mut self) {
        self.phase = Some(0);
    }

    /// Run one tick of the current phase
    pub fn execute(&mut self, state: &mut S, ctx: &C) {
        if self.phase.is_none() && self.looping {
            self.phase = Some(0);
            if let Some(on_loop) = self.on_loop {
                on_loop(state);
            }
        }

        let Some((index, phase)) = self
            .phase
            .and_then(|i| self.sequence.get(i).map(|f| (i, *f)))
        else {
            self.phase = None;
            return;
        };

        let next = match phase(state, ctx) {
            PhaseStep::Advance => Some(index + 1),
            PhaseStep::Jump(target) => Some(target),
            PhaseStep::Hold => Some(index),
            PhaseStep::Finish => None,
        };
        // Keep the index on a real phase or mark finished
        self.phase = next.filter(|i| *i < self.sequence.len());
    }
}
