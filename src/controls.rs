//! Navigation controls below the sprite.

/// Key name of the confirm key, as reported by `KeyboardEvent.key`.
pub const CONFIRM_KEY: &str = "Enter";
/// Legacy key code of the confirm key.
pub const CONFIRM_KEY_CODE: u32 = 13;

/// The three buttons under the sprite, left to right.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum NavControl {
    Previous,
    Pet,
    Next,
}

impl NavControl {
    /// All controls in display order.
    pub const ALL: [NavControl; 3] = [NavControl::Previous, NavControl::Pet, NavControl::Next];

    /// Glyph shown on the button.
    pub fn label(&self) -> &'static str {
        match self {
            NavControl::Previous => "👈",
            NavControl::Pet => "❤️",
            NavControl::Next => "👉",
        }
    }

    /// Command this control issues when activated.
    pub fn command(&self) -> Command {
        match self {
            NavControl::Previous => Command::RetreatGif,
            NavControl::Pet => Command::Pet,
            NavControl::Next => Command::AdvanceGif,
        }
    }

    /// Translate an activation into a command.
    ///
    /// A confirm key press behaves exactly like a click; other keys do nothing.
    ///
    /// ```rust
    /// use petting_zoo_view::{Activation, Command, Key, NavControl};
    ///
    /// let enter = Activation::Key(Key::named("Enter"));
    /// assert_eq!(NavControl::Pet.activate(enter), Some(Command::Pet));
    /// assert_eq!(NavControl::Pet.activate(Activation::Click), Some(Command::Pet));
    /// assert_eq!(NavControl::Next.activate(Activation::Key(Key::named("a"))), None);
    /// ```
    pub fn activate(&self, activation: Activation) -> Option<Command> {
        match activation {
            Activation::Click => Some(self.command()),
            Activation::Key(key) if key.is_confirm() => Some(self.command()),
            Activation::Key(_) => None,
        }
    }
}

/// A keyboard key, identified by name and/or legacy code.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Key<'a> {
    pub name: &'a str,
    pub code: u32,
}

impl<'a> Key<'a> {
    /// A key known only by its name.
    pub fn named(name: &'a str) -> Self {
        Self { name, code: 0 }
    }

    /// A key known only by its legacy code.
    pub fn code(code: u32) -> Key<'static> {
        Key { name: "", code }
    }

    #[inline]
    pub fn is_confirm(&self) -> bool {
        self.name == CONFIRM_KEY || self.code == CONFIRM_KEY_CODE
    }
}

/// How a control was triggered.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Activation<'a> {
    Click,
    Key(Key<'a>),
}

/// Discrete commands consumed by a [`Zoo`](crate::Zoo).
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Command {
    RetreatGif,
    Pet,
    AdvanceGif,
}
