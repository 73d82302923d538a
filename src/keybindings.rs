//! Keyboard shortcuts for the labeling page.
//!
//! Unshifted keys click the element tagged with the same `data-key`. Shifted
//! keys trigger one of the [`Shortcut`] actions. Every shortcut is bound to a
//! list of characters so the same physical key works on both the Latin and
//! the Cyrillic layout.

use serde::{Deserialize, Serialize};

/// Action triggered by a Shift-modified key.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Shortcut {
    /// Save the labeling, then close the window
    SaveAndClose,
    /// Save the labeling and confirm with an alert
    SaveWithNotice,
    /// Close the window without saving
    Close,
    /// Clear the labeling of the image (asks first)
    ClearLabeling,
    /// Delete the image (asks first)
    DeleteImage,
}

impl Shortcut {
    /// Get the display name for this shortcut.
    pub fn name(&self) -> &'static str {
        match self {
            Shortcut::SaveAndClose => "Save and close",
            Shortcut::SaveWithNotice => "Save",
            Shortcut::Close => "Close",
            Shortcut::ClearLabeling => "Clear labeling",
            Shortcut::DeleteImage => "Delete image",
        }
    }

    /// All shortcuts in table order.
    pub fn all() -> &'static [Shortcut] {
        &[
            Shortcut::SaveAndClose,
            Shortcut::SaveWithNotice,
            Shortcut::Close,
            Shortcut::ClearLabeling,
            Shortcut::DeleteImage,
        ]
    }
}

/// Keyboard modifiers held during a key press.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Modifiers {
    pub shift: bool,
    pub ctrl: bool,
    pub alt: bool,
    pub meta: bool,
}

/// A key press as reported by the browser.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct KeyPress {
    /// The `key` value of the event: the produced character, or a key name
    /// such as `"Enter"`
    pub key: String,
    pub modifiers: Modifiers,
}

impl KeyPress {
    pub fn new(key: impl Into<String>, modifiers: Modifiers) -> Self {
        Self {
            key: key.into(),
            modifiers,
        }
    }

    /// A press without modifiers.
    pub fn plain(key: impl Into<String>) -> Self {
        Self::new(key, Modifiers::default())
    }

    /// A press with Shift held.
    pub fn shifted(key: impl Into<String>) -> Self {
        Self::new(
            key,
            Modifiers {
                shift: true,
                ..Modifiers::default()
            },
        )
    }

    /// The produced character, if the key produced exactly one.
    pub fn character(&self) -> Option<char> {
        let mut chars = self.key.chars();
        match (chars.next(), chars.next()) {
            (Some(c), None) => Some(c),
            _ => None,
        }
    }
}

/// What a key press should do.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum KeyAction {
    /// Click the element whose `data-key` equals this key
    ClickTagged(String),
    /// Run a shortcut action
    Shortcut(Shortcut),
    /// Nothing to do
    Ignored,
}

/// Shortcut table: for every action, the characters that trigger it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct KeyBindings {
    pub save_and_close: Vec<char>,
    pub save_with_notice: Vec<char>,
    pub close: Vec<char>,
    pub clear_labeling: Vec<char>,
    pub delete_image: Vec<char>,
}

impl Default for KeyBindings {
    fn default() -> Self {
        // Latin letter first, then the Cyrillic letter on the same key
        Self {
            save_and_close: vec!['A', 'Ф'],
            save_with_notice: vec!['S', 'Ы'],
            close: vec!['D', 'В'],
            clear_labeling: vec!['F', 'А'],
            delete_image: vec!['G', 'П'],
        }
    }
}

impl KeyBindings {
    /// Create new keybindings with default values.
    pub fn new() -> Self {
        Self::default()
    }

    /// Resolve a key press against the table.
    pub fn resolve(&self, press: &KeyPress) -> KeyAction {
        let modifiers = press.modifiers;
        if modifiers.ctrl || modifiers.alt || modifiers.meta {
            return KeyAction::Ignored;
        }

        let Some(key) = press.character() else {
            return KeyAction::Ignored;
        };

        if modifiers.shift {
            self.shortcut_for_key(key)
                .map_or(KeyAction::Ignored, KeyAction::Shortcut)
        } else {
            KeyAction::ClickTagged(press.key.clone())
        }
    }

    /// Get the shortcut bound to a character, if any.
    pub fn shortcut_for_key(&self, key: char) -> Option<Shortcut> {
        Shortcut::all()
            .iter()
            .copied()
            .find(|shortcut| self.keys_for(*shortcut).contains(&key))
    }

    /// Get the characters bound to a shortcut.
    pub fn keys_for(&self, shortcut: Shortcut) -> &[char] {
        match shortcut {
            Shortcut::SaveAndClose => &self.save_and_close,
            Shortcut::SaveWithNotice => &self.save_with_notice,
            Shortcut::Close => &self.close,
            Shortcut::ClearLabeling => &self.clear_labeling,
            Shortcut::DeleteImage => &self.delete_image,
        }
    }

    /// Replace the characters bound to a shortcut.
    pub fn set_keys(&mut self, shortcut: Shortcut, keys: Vec<char>) {
        match shortcut {
            Shortcut::SaveAndClose => self.save_and_close = keys,
            Shortcut::SaveWithNotice => self.save_with_notice = keys,
            Shortcut::Close => self.close = keys,
            Shortcut::ClearLabeling => self.clear_labeling = keys,
            Shortcut::DeleteImage => self.delete_image = keys,
        }
    }

    /// Check if a key is already used by a shortcut other than `exclude`.
    /// Returns the name of the shortcut using it, if any.
    pub fn key_conflict(&self, key: char, exclude: Option<Shortcut>) -> Option<&'static str> {
        Shortcut::all()
            .iter()
            .filter(|shortcut| Some(**shortcut) != exclude)
            .find(|shortcut| self.keys_for(**shortcut).contains(&key))
            .map(|shortcut| shortcut.name())
    }

    /// Find the first key bound to more than one shortcut.
    pub fn first_conflict(&self) -> Option<(char, Shortcut, &'static str)> {
        Shortcut::all().iter().find_map(|shortcut| {
            self.keys_for(*shortcut).iter().find_map(|key| {
                self.key_conflict(*key, Some(*shortcut))
                    .map(|other| (*key, *shortcut, other))
            })
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_both_layouts_resolve_to_same_shortcut() {
        let bindings = KeyBindings::default();

        let pairs = [
            ("A", "Ф", Shortcut::SaveAndClose),
            ("S", "Ы", Shortcut::SaveWithNotice),
            ("D", "В", Shortcut::Close),
            ("F", "А", Shortcut::ClearLabeling),
            ("G", "П", Shortcut::DeleteImage),
        ];
        for (latin, cyrillic, expected) in pairs {
            assert_eq!(
                bindings.resolve(&KeyPress::shifted(latin)),
                KeyAction::Shortcut(expected)
            );
            assert_eq!(
                bindings.resolve(&KeyPress::shifted(cyrillic)),
                KeyAction::Shortcut(expected)
            );
        }
    }

    #[test]
    fn test_unshifted_key_clicks_tagged_element() {
        let bindings = KeyBindings::default();
        assert_eq!(
            bindings.resolve(&KeyPress::plain("1")),
            KeyAction::ClickTagged("1".to_string())
        );
        assert_eq!(
            bindings.resolve(&KeyPress::plain("ф")),
            KeyAction::ClickTagged("ф".to_string())
        );
    }

    #[test]
    fn test_unbound_shifted_key_is_ignored() {
        let bindings = KeyBindings::default();
        assert_eq!(bindings.resolve(&KeyPress::shifted("Z")), KeyAction::Ignored);
        // Lowercase does not match: shortcuts use the literal character
        assert_eq!(bindings.resolve(&KeyPress::shifted("a")), KeyAction::Ignored);
    }

    #[test]
    fn test_named_keys_and_modifier_combos_are_ignored() {
        let bindings = KeyBindings::default();
        assert_eq!(bindings.resolve(&KeyPress::plain("Enter")), KeyAction::Ignored);
        assert_eq!(bindings.resolve(&KeyPress::shifted("Shift")), KeyAction::Ignored);

        let ctrl = KeyPress::new(
            "s",
            Modifiers {
                ctrl: true,
                ..Modifiers::default()
            },
        );
        assert_eq!(bindings.resolve(&ctrl), KeyAction::Ignored);
    }

    #[test]
    fn test_set_keys_and_conflicts() {
        let mut bindings = KeyBindings::default();
        assert_eq!(bindings.first_conflict(), None);

        bindings.set_keys(Shortcut::Close, vec!['A']);
        assert_eq!(
            bindings.key_conflict('A', Some(Shortcut::Close)),
            Some("Save and close")
        );
        assert_eq!(
            bindings.first_conflict(),
            Some(('A', Shortcut::SaveAndClose, "Close"))
        );
        assert_eq!(bindings.shortcut_for_key('D'), None);
    }
}
