//! Key-to-direction configuration.

use crate::controller::Direction;
use crate::event::{Key, Modifiers};

/// Which arrow keys move the selection.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum Orientation {
    /// Right moves forward, Left moves backward.
    Horizontal,
    /// Down moves forward, Up moves backward.
    Vertical,
    /// Right/Down forward, Left/Up backward (radio group behavior).
    #[default]
    Both,
}

impl Orientation {
    fn horizontal(self) -> bool {
        matches!(self, Orientation::Horizontal | Orientation::Both)
    }

    fn vertical(self) -> bool {
        matches!(self, Orientation::Vertical | Orientation::Both)
    }
}

/// Translates platform keys into logical directions.
///
/// # Example
///
/// ```
/// use roving::{Direction, Key, KeyMap, Modifiers};
///
/// let keymap = KeyMap::horizontal().vim_keys(true);
/// assert_eq!(keymap.direction(Key::Char('l'), Modifiers::new()), Some(Direction::Forward));
/// assert_eq!(keymap.direction(Key::Down, Modifiers::new()), None);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct KeyMap {
    /// Arrow keys that navigate.
    pub orientation: Orientation,

    /// Home/End jump to the first/last item.
    pub home_end: bool,

    /// h/j/k/l navigate along the configured orientation.
    pub vim_keys: bool,
}

impl Default for KeyMap {
    fn default() -> Self {
        Self {
            orientation: Orientation::Both,
            home_end: true,
            vim_keys: false,
        }
    }
}

impl KeyMap {
    /// Create the default key map (all arrows, Home/End, no vim keys).
    pub fn new() -> Self {
        Self::default()
    }

    /// Left/Right only, as in a toolbar or tab list.
    pub fn horizontal() -> Self {
        Self::new().orientation(Orientation::Horizontal)
    }

    /// Up/Down only, as in a menu or listbox.
    pub fn vertical() -> Self {
        Self::new().orientation(Orientation::Vertical)
    }

    /// Set the orientation.
    pub fn orientation(mut self, orientation: Orientation) -> Self {
        self.orientation = orientation;
        self
    }

    /// Enable or disable Home/End jumps.
    pub fn home_end(mut self, enabled: bool) -> Self {
        self.home_end = enabled;
        self
    }

    /// Enable or disable h/j/k/l navigation.
    pub fn vim_keys(mut self, enabled: bool) -> Self {
        self.vim_keys = enabled;
        self
    }

    /// Map a key press to a direction, or `None` if it does not navigate.
    ///
    /// Keys held with ctrl or alt never navigate; shift is ignored.
    pub fn direction(&self, key: Key, modifiers: Modifiers) -> Option<Direction> {
        if modifiers.ctrl || modifiers.alt {
            return None;
        }

        let horizontal = self.orientation.horizontal();
        let vertical = self.orientation.vertical();

        match key {
            Key::Right if horizontal => Some(Direction::Forward),
            Key::Left if horizontal => Some(Direction::Backward),
            Key::Down if vertical => Some(Direction::Forward),
            Key::Up if vertical => Some(Direction::Backward),
            Key::Home if self.home_end => Some(Direction::First),
            Key::End if self.home_end => Some(Direction::Last),
            Key::Char('l') if self.vim_keys && horizontal => Some(Direction::Forward),
            Key::Char('h') if self.vim_keys && horizontal => Some(Direction::Backward),
            Key::Char('j') if self.vim_keys && vertical => Some(Direction::Forward),
            Key::Char('k') if self.vim_keys && vertical => Some(Direction::Backward),
            _ => None,
        }
    }
}
