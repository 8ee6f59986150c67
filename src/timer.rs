//! Deferred callbacks for the pet pulse.
//!
//! The zoo never sleeps or polls; it hands callbacks to a [`TimerHost`],
//! which runs them later on the same thread. In a browser that is
//! `window.setTimeout`; natively and in tests it is [`ManualTimers`].

use std::cell::RefCell;
use std::collections::BTreeMap;
use std::time::Duration;

/// A boxed one-shot timer callback.
pub type TimerCallback = Box<dyn FnOnce()>;

/// Something that can run a callback after a delay.
///
/// No `Send` bounds: callbacks run on the thread that scheduled them, which
/// works in both native and WASM (single-threaded) contexts.
pub trait TimerHost {
    /// Run `callback` once, no sooner than `delay` from now.
    fn schedule(&self, delay: Duration, callback: TimerCallback);
}

/// Virtual clock that only moves when told to.
///
/// Callbacks fire in due-time order; ties fire in scheduling order.
///
/// ## Example
///
/// ```rust
/// use std::cell::Cell;
/// use std::rc::Rc;
/// use std::time::Duration;
/// use petting_zoo_view::{ManualTimers, TimerHost};
///
/// let timers = ManualTimers::new();
/// let hits = Rc::new(Cell::new(0));
/// let h = hits.clone();
/// timers.schedule(Duration::from_millis(75), Box::new(move || h.set(h.get() + 1)));
///
/// assert_eq!(timers.advance(Duration::from_millis(74)), 0);
/// assert_eq!(timers.advance(Duration::from_millis(1)), 1);
/// assert_eq!(hits.get(), 1);
/// ```
#[derive(Default)]
pub struct ManualTimers {
    inner: RefCell<ManualInner>,
}

#[derive(Default)]
struct ManualInner {
    now: Duration,
    next_seq: u64,
    queue: BTreeMap<(Duration, u64), TimerCallback>,
}

impl ManualTimers {
    pub fn new() -> Self {
        Self::default()
    }

    /// Time elapsed on the virtual clock.
    pub fn now(&self) -> Duration {
        self.inner.borrow().now
    }

    /// Number of callbacks still waiting.
    pub fn pending(&self) -> usize {
        self.inner.borrow().queue.len()
    }

    /// Move the clock forward, firing everything that becomes due.
    ///
    /// Callbacks may schedule further timers; those fire in the same call if
    /// they fall due before the new time. Returns the number fired.
    pub fn advance(&self, by: Duration) -> usize {
        let target = self.inner.borrow().now + by;
        let mut fired = 0;
        loop {
            // The borrow must end before the callback runs, it may schedule.
            let next = {
                let mut inner = self.inner.borrow_mut();
                let due = inner.queue.first_key_value().map(|(&(due, _), _)| due);
                match due {
                    Some(due) if due <= target => {
                        inner.now = due;
                        inner.queue.pop_first().map(|(_, cb)| cb)
                    }
                    _ => None,
                }
            };
            match next {
                Some(callback) => {
                    callback();
                    fired += 1;
                }
                None => break,
            }
        }
        self.inner.borrow_mut().now = target;
        fired
    }

    /// Fire every pending callback regardless of due time.
    pub fn run_all(&self) -> usize {
        let mut fired = 0;
        loop {
            let last_due = match self.inner.borrow().queue.last_key_value() {
                Some((&(due, _), _)) => due,
                None => return fired,
            };
            let now = self.now();
            fired += self.advance(last_due.saturating_sub(now));
        }
    }
}

impl TimerHost for ManualTimers {
    fn schedule(&self, delay: Duration, callback: TimerCallback) {
        let mut inner = self.inner.borrow_mut();
        let key = (inner.now + delay, inner.next_seq);
        inner.next_seq += 1;
        inner.queue.insert(key, callback);
    }
}

impl<T: TimerHost + ?Sized> TimerHost for std::rc::Rc<T> {
    fn schedule(&self, delay: Duration, callback: TimerCallback) {
        (**self).schedule(delay, callback);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::rc::Rc;

    fn recorder() -> (Rc<RefCell<Vec<u32>>>, impl Fn(u32) -> TimerCallback) {
        let log = Rc::new(RefCell::new(Vec::new()));
        let l = log.clone();
        let make = move |id: u32| -> TimerCallback {
            let l = l.clone();
            Box::new(move || l.borrow_mut().push(id))
        };
        (log, make)
    }

    #[test]
    fn test_fires_in_due_order() {
        let timers = ManualTimers::new();
        let (log, make) = recorder();
        timers.schedule(Duration::from_millis(150), make(3));
        timers.schedule(Duration::from_millis(75), make(2));
        timers.schedule(Duration::ZERO, make(1));

        assert_eq!(timers.advance(Duration::from_millis(200)), 3);
        assert_eq!(*log.borrow(), vec![1, 2, 3]);
        assert_eq!(timers.now(), Duration::from_millis(200));
    }

    #[test]
    fn test_ties_fire_in_schedule_order() {
        let timers = ManualTimers::new();
        let (log, make) = recorder();
        timers.schedule(Duration::from_millis(75), make(1));
        timers.schedule(Duration::from_millis(75), make(2));
        timers.advance(Duration::from_millis(75));
        assert_eq!(*log.borrow(), vec![1, 2]);
    }

    #[test]
    fn test_nested_schedule() {
        let timers = Rc::new(ManualTimers::new());
        let (log, make) = recorder();
        let t = timers.clone();
        let inner = make(2);
        timers.schedule(
            Duration::from_millis(10),
            Box::new(move || t.schedule(Duration::from_millis(10), inner)),
        );
        timers.schedule(Duration::from_millis(30), make(3));

        assert_eq!(timers.advance(Duration::from_millis(25)), 2);
        assert_eq!(*log.borrow(), vec![2]);
        assert_eq!(timers.pending(), 1);
        assert_eq!(timers.run_all(), 1);
        assert_eq!(*log.borrow(), vec![2, 3]);
    }
}
