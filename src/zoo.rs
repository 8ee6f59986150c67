//! A zoo session: the display root that owns the frame controller.

use std::cell::RefCell;
use std::rc::{Rc, Weak};

use log::debug;

use crate::config::{ConfigError, ZooConfig};
use crate::controls::{Activation, Command, NavControl};
use crate::pointer::{ContainerGeometry, FrameMapper, PointerSample};
use crate::pulse::{PetPulse, PulseGeneration, PulseToken};
use crate::render::SpriteView;
use crate::timer::TimerHost;
use crate::{ControllerState, FrameAction, FrameController, SpriteCatalog};

type Observer = Box<dyn Fn(ControllerState)>;

/// State shared between the session and its pending pulse steps.
struct Shared {
    controller: RefCell<FrameController>,
    observer: RefCell<Option<Observer>>,
}

impl Shared {
    fn apply(&self, action: FrameAction) -> ControllerState {
        let state = self.controller.borrow_mut().apply(action);
        if let Some(observer) = self.observer.borrow().as_ref() {
            observer(state);
        }
        state
    }
}

/// One mounted petting zoo.
///
/// The session exclusively owns the [`ControllerState`]; everything else
/// reads it through [`Zoo::state`] or [`Zoo::view`]. Pet pulse steps hold
/// only a weak handle, so steps that fire after the session is dropped (or
/// after [`Zoo::cancel_pending_pulses`]) do nothing.
///
/// ## Example
///
/// ```rust
/// use std::rc::Rc;
/// use std::time::Duration;
/// use petting_zoo_view::{
///     ContainerGeometry, ManualTimers, PointerSample, SpriteCatalog, Zoo, ZooConfig,
/// };
///
/// let timers = Rc::new(ManualTimers::new());
/// let zoo = Zoo::new(SpriteCatalog::default(), ZooConfig::default(), timers.clone()).unwrap();
///
/// // Scrub with the pointer
/// let container = ContainerGeometry::new(0.0, 490.0);
/// zoo.handle_pointer(PointerSample::new(151.0, true), container);
/// assert_eq!(zoo.state().frame_index, 8);
///
/// // Pet: one step now, two more on the timer
/// zoo.pet();
/// assert_eq!(zoo.state().frame_index, 9);
/// timers.advance(Duration::from_millis(150));
/// assert_eq!(zoo.state().frame_index, 11);
/// ```
pub struct Zoo<T: TimerHost> {
    shared: Rc<Shared>,
    mapper: FrameMapper,
    config: ZooConfig,
    timers: T,
    pulses: PulseGeneration,
}

impl<T: TimerHost> Zoo<T> {
    /// Start a session on frame 0 of the first sprite.
    pub fn new(catalog: SpriteCatalog, config: ZooConfig, timers: T) -> Result<Self, ConfigError> {
        config.validate()?;
        let controller = FrameController::with_policy(catalog, config.frame_policy);
        Ok(Self {
            shared: Rc::new(Shared {
                controller: RefCell::new(controller),
                observer: RefCell::new(None),
            }),
            mapper: FrameMapper::new(config.pointer),
            config,
            timers,
            pulses: PulseGeneration::new(),
        })
    }

    /// Register a callback run after every state change, including pulse
    /// steps fired by the timer host. Replaces any previous observer.
    pub fn set_observer(&self, observer: impl Fn(ControllerState) + 'static) {
        *self.shared.observer.borrow_mut() = Some(Box::new(observer));
    }

    #[inline]
    pub fn state(&self) -> ControllerState {
        self.shared.controller.borrow().state()
    }

    #[inline]
    pub fn config(&self) -> &ZooConfig {
        &self.config
    }

    /// Frame count of the sprite currently shown.
    pub fn frame_count(&self) -> u32 {
        self.shared.controller.borrow().current_frame_count()
    }

    /// What the sprite display should show right now.
    pub fn view(&self) -> SpriteView {
        let controller = self.shared.controller.borrow();
        SpriteView::compute(
            controller.catalog(),
            controller.state(),
            self.config.display_scale,
            &self.config.asset_root,
        )
    }

    /// Apply a controller action directly.
    pub fn apply(&self, action: FrameAction) -> ControllerState {
        self.shared.apply(action)
    }

    /// Scrub to the frame under the pointer.
    ///
    /// Returns the new state, or `None` when the sample was filtered out or
    /// the container cannot be mapped.
    pub fn handle_pointer(&self, sample: PointerSample, container: ContainerGeometry) -> Option<ControllerState> {
        let frame = self.mapper.map_sample(container, self.frame_count(), sample)?;
        Some(self.apply(FrameAction::SetFrame(frame)))
    }

    /// Activate one of the navigation controls.
    pub fn activate(&self, control: NavControl, activation: Activation<'_>) -> Option<ControllerState> {
        control.activate(activation).map(|command| self.command(command))
    }

    /// Run a navigation command.
    pub fn command(&self, command: Command) -> ControllerState {
        match command {
            Command::RetreatGif => self.apply(FrameAction::RetreatGif),
            Command::AdvanceGif => self.apply(FrameAction::AdvanceGif),
            Command::Pet => {
                self.pet();
                self.state()
            }
        }
    }

    /// Start a pet pulse and return how many frame advances it will make.
    ///
    /// Pulses are independent: a click during a running pulse starts another
    /// one alongside it.
    pub fn pet(&self) -> usize {
        let pulse = PetPulse::plan(self.frame_count(), &self.config.pulse);
        debug!("pet pulse: {} steps", pulse.steps());

        self.apply(FrameAction::AdvanceFrame);
        for delay in pulse.deferred() {
            let step = PulseStep {
                shared: Rc::downgrade(&self.shared),
                token: self.pulses.token(),
            };
            self.timers.schedule(delay, Box::new(move || step.fire()));
        }
        pulse.steps()
    }

    /// Drop every pulse step that has not fired yet.
    pub fn cancel_pending_pulses(&self) {
        debug!("cancelling pending pulse steps");
        self.pulses.cancel_all();
    }
}

/// A deferred frame advance belonging to one pet pulse.
struct PulseStep {
    shared: Weak<Shared>,
    token: PulseToken,
}

impl PulseStep {
    fn fire(self) {
        if !self.token.is_live() {
            debug!("pulse step cancelled");
            return;
        }
        match self.shared.upgrade() {
            Some(shared) => {
                shared.apply(FrameAction::AdvanceFrame);
            }
            None => debug!("pulse step outlived its zoo"),
        }
    }
}
