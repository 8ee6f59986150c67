//! The pet pulse: a short burst of frame advances after a click.

use std::cell::Cell;
use std::rc::{Rc, Weak};
use std::time::Duration;

use crate::config::PulseConfig;

/// Step delays of one pet pulse, measured from the click.
///
/// The first step is always immediate. Sprites with more frames than
/// [`PulseConfig::long_sprite_threshold`] get a third step so the flip is
/// visible on long filmstrips.
///
/// ```rust
/// use std::time::Duration;
/// use petting_zoo_view::{PetPulse, PulseConfig};
///
/// let short = PetPulse::plan(8, &PulseConfig::default());
/// assert_eq!(short.delays(), &[Duration::ZERO, Duration::from_millis(75)]);
///
/// let long = PetPulse::plan(32, &PulseConfig::default());
/// assert_eq!(long.steps(), 3);
/// assert_eq!(long.delays()[2], Duration::from_millis(150));
/// ```
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PetPulse {
    delays: Vec<Duration>,
}

impl PetPulse {
    pub fn plan(frame_count: u32, config: &PulseConfig) -> Self {
        let steps = if frame_count > config.long_sprite_threshold { 3 } else { 2 };
        let delays = (0..steps).map(|i| config.step() * i).collect();
        Self { delays }
    }

    /// Total number of frame advances, including the immediate one.
    #[inline]
    pub fn steps(&self) -> usize {
        self.delays.len()
    }

    #[inline]
    pub fn delays(&self) -> &[Duration] {
        &self.delays
    }

    /// Delays of the steps that must go through a timer.
    pub fn deferred(&self) -> impl Iterator<Item = Duration> + '_ {
        self.delays.iter().copied().filter(|d| !d.is_zero())
    }
}

/// Cancellation source for in-flight pulse steps.
///
/// Each pulse step carries a [`PulseToken`] taken when it was scheduled;
/// [`PulseGeneration::cancel_all`] invalidates every token issued so far.
#[derive(Debug, Default)]
pub struct PulseGeneration {
    current: Rc<Cell<u64>>,
}

impl PulseGeneration {
    pub fn new() -> Self {
        Self::default()
    }

    /// Issue a token valid until the next [`Self::cancel_all`].
    pub fn token(&self) -> PulseToken {
        PulseToken {
            generation: Rc::downgrade(&self.current),
            issued: self.current.get(),
        }
    }

    pub fn cancel_all(&self) {
        self.current.set(self.current.get() + 1);
    }
}

/// Handle checked by a pulse step before it touches any state.
#[derive(Clone, Debug)]
pub struct PulseToken {
    generation: Weak<Cell<u64>>,
    issued: u64,
}

impl PulseToken {
    /// `false` once cancelled or once the issuing generation is dropped.
    pub fn is_live(&self) -> bool {
        self.generation
            .upgrade()
            .is_some_and(|current| current.get() == self.issued)
    }
}
