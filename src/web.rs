//! Browser binding: wires a [`Zoo`] to DOM elements.
//!
//! Only compiled with the `web` feature.

use std::rc::{Rc, Weak};
use std::time::Duration;

use log::{debug, warn};
use thiserror::Error;
use wasm_bindgen::closure::Closure;
use wasm_bindgen::{JsCast, JsValue};
use web_sys::{Event, EventTarget, HtmlElement, KeyboardEvent, MouseEvent};

use crate::config::{ConfigError, ZooConfig};
use crate::controls::{Activation, Key, NavControl};
use crate::pointer::{ContainerGeometry, PointerSample};
use crate::render::SpriteView;
use crate::timer::{TimerCallback, TimerHost};
use crate::{SpriteCatalog, Zoo};

/// Errors raised while mounting the zoo.
#[derive(Debug, Error)]
pub enum WebError {
    #[error("No window available")]
    NoWindow,
    #[error("{context}: {message}")]
    Js { context: &'static str, message: String },
    #[error(transparent)]
    Config(#[from] ConfigError),
}

impl WebError {
    fn js(context: &'static str, value: JsValue) -> Self {
        WebError::Js {
            context,
            message: format!("{value:?}"),
        }
    }
}

/// [`TimerHost`] backed by `window.setTimeout`.
///
/// Timeouts are never cleared; stale steps are neutralised by the zoo's own
/// liveness checks when they fire.
#[derive(Clone, Debug)]
pub struct WindowTimers {
    window: web_sys::Window,
}

impl WindowTimers {
    pub fn new() -> Result<Self, WebError> {
        let window = web_sys::window().ok_or(WebError::NoWindow)?;
        Ok(Self { window })
    }
}

impl TimerHost for WindowTimers {
    fn schedule(&self, delay: Duration, callback: TimerCallback) {
        let function = Closure::once_into_js(move || callback());
        let millis = delay.as_millis().min(i32::MAX as u128) as i32;
        if let Err(err) = self
            .window
            .set_timeout_with_callback_and_timeout_and_arguments_0(function.unchecked_ref::<js_sys::Function>(), millis)
        {
            warn!("setTimeout failed: {err:?}");
        }
    }
}

/// Write a [`SpriteView`] into an element's inline style.
pub fn apply_view(element: &HtmlElement, view: &SpriteView) -> Result<(), WebError> {
    let style = element.style();
    let set = |name: &str, value: &str| {
        style
            .set_property(name, value)
            .map_err(|e| WebError::js("Failed to set style", e))
    };
    set("background-image", &view.background_image())?;
    set("background-position", &view.background_position())?;
    set("width", &format!("{}px", view.width))?;
    set("height", &format!("{}px", view.height))?;
    Ok(())
}

struct Listener {
    target: EventTarget,
    kind: &'static str,
    closure: Closure<dyn FnMut(Event)>,
}

impl Listener {
    fn attach(
        target: &EventTarget,
        kind: &'static str,
        handler: impl FnMut(Event) + 'static,
    ) -> Result<Self, WebError> {
        let closure = Closure::<dyn FnMut(Event)>::new(handler);
        target
            .add_event_listener_with_callback(kind, closure.as_ref().unchecked_ref())
            .map_err(|e| WebError::js("Failed to add listener", e))?;
        Ok(Self {
            target: target.clone(),
            kind,
            closure,
        })
    }
}

impl Drop for Listener {
    fn drop(&mut self) {
        let _ = self
            .target
            .remove_event_listener_with_callback(self.kind, self.closure.as_ref().unchecked_ref());
    }
}

/// A zoo attached to the page. Dropping it detaches every listener and
/// cancels pulse steps that have not fired yet.
pub struct MountedZoo {
    zoo: Rc<Zoo<WindowTimers>>,
    _listeners: Vec<Listener>,
}

impl MountedZoo {
    pub fn zoo(&self) -> &Zoo<WindowTimers> {
        &self.zoo
    }
}

impl Drop for MountedZoo {
    fn drop(&mut self) {
        debug!("unmounting zoo");
        self.zoo.cancel_pending_pulses();
    }
}

/// Mount a zoo onto existing elements.
///
/// * `container` - element the pointer scrubs over
/// * `sprite` - element whose background shows the sprite sheet
/// * `buttons` - previous, pet and next controls, in that order
pub fn mount(
    container: HtmlElement,
    sprite: HtmlElement,
    buttons: [HtmlElement; 3],
    catalog: SpriteCatalog,
    config: ZooConfig,
) -> Result<MountedZoo, WebError> {
    let zoo = Rc::new(Zoo::new(catalog, config, WindowTimers::new()?)?);

    let observed: Weak<Zoo<WindowTimers>> = Rc::downgrade(&zoo);
    let target = sprite.clone();
    zoo.set_observer(move |_| {
        if let Some(zoo) = observed.upgrade() {
            if let Err(err) = apply_view(&target, &zoo.view()) {
                warn!("{err}");
            }
        }
    });
    apply_view(&sprite, &zoo.view())?;

    let mut listeners = Vec::with_capacity(1 + 2 * buttons.len());

    let weak = Rc::downgrade(&zoo);
    let area = container.clone();
    listeners.push(Listener::attach(&container, "mousemove", move |event: Event| {
        let (Some(zoo), Some(mouse)) = (weak.upgrade(), event.dyn_ref::<MouseEvent>()) else {
            return;
        };
        let sample = PointerSample::new(mouse.client_x() as f64, event.is_trusted());
        let geometry = ContainerGeometry::new(
            area.get_bounding_client_rect().left(),
            area.client_width() as f64,
        );
        zoo.handle_pointer(sample, geometry);
    })?);

    for (control, button) in NavControl::ALL.into_iter().zip(buttons.iter()) {
        let weak = Rc::downgrade(&zoo);
        listeners.push(Listener::attach(button, "click", move |_| {
            if let Some(zoo) = weak.upgrade() {
                zoo.activate(control, Activation::Click);
            }
        })?);

        let weak = Rc::downgrade(&zoo);
        listeners.push(Listener::attach(button, "keydown", move |event: Event| {
            let (Some(zoo), Some(keyboard)) = (weak.upgrade(), event.dyn_ref::<KeyboardEvent>()) else {
                return;
            };
            let name = keyboard.key();
            zoo.activate(control, Activation::Key(Key::named(&name)));
        })?);
    }

    debug!("zoo mounted with {} listeners", listeners.len());
    Ok(MountedZoo {
        zoo,
        _listeners: listeners,
    })
}
