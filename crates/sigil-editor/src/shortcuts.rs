//! Keyboard shortcut mapping.
//!
//! Maps key + modifier combos to semantic `ShortcutAction`s. On macOS
//! `meta` is ⌘; elsewhere `ctrl` serves the same role.

/// Actions that keyboard shortcuts can trigger.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ShortcutAction {
    /// Remove the live signature.
    DeleteSignature,
    /// Export the composite as PNG.
    Export,
}

/// Resolves key events into shortcut actions.
pub struct ShortcutMap;

impl ShortcutMap {
    /// Resolve a key event to an action.
    ///
    /// `key` is the `KeyboardEvent.key` value (e.g. `"e"`, `"Delete"`).
    /// Returns `None` if the key combo has no binding.
    pub fn resolve(key: &str, ctrl: bool, meta: bool) -> Option<ShortcutAction> {
        let cmd = ctrl || meta;
        match key {
            "Delete" => Some(ShortcutAction::DeleteSignature),
            "e" | "E" if cmd => Some(ShortcutAction::Export),
            _ => None,
        }
    }
}
