//! Keyboard command surface

use serde::{Deserialize, Serialize};

/// Player command bound to a key
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum KeyCommand {
    /// Space or `k`
    TogglePlay,

    /// `f`
    ToggleFullscreen,

    /// `m`
    ToggleMute,

    /// Right arrow
    SeekForward,

    /// Left arrow
    SeekBackward,
}

impl KeyCommand {
    /// Map a host key name onto a command
    ///
    /// Accepts DOM-style names (`" "`, `"ArrowRight"`) and a few spelled-out
    /// aliases; matching ignores case. Unbound keys return `None`.
    pub fn from_key(key: &str) -> Option<Self> {
        if key == " " {
            return Some(KeyCommand::TogglePlay);
        }

        match key.trim().to_ascii_lowercase().as_str() {
            "space" | "spacebar" | "k" => Some(KeyCommand::TogglePlay),
            "f" => Some(KeyCommand::ToggleFullscreen),
            "m" => Some(KeyCommand::ToggleMute),
            "arrowright" | "right" => Some(KeyCommand::SeekForward),
            "arrowleft" | "left" => Some(KeyCommand::SeekBackward),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn bound_keys() {
        assert_eq!(KeyCommand::from_key(" "), Some(KeyCommand::TogglePlay));
        assert_eq!(KeyCommand::from_key("k"), Some(KeyCommand::TogglePlay));
        assert_eq!(KeyCommand::from_key("f"), Some(KeyCommand::ToggleFullscreen));
        assert_eq!(KeyCommand::from_key("m"), Some(KeyCommand::ToggleMute));
        assert_eq!(
            KeyCommand::from_key("ArrowRight"),
            Some(KeyCommand::SeekForward)
        );
        assert_eq!(
            KeyCommand::from_key("ArrowLeft"),
            Some(KeyCommand::SeekBackward)
        );
    }

    #[test]
    fn case_insensitive() {
        assert_eq!(KeyCommand::from_key("K"), Some(KeyCommand::TogglePlay));
        assert_eq!(KeyCommand::from_key("F"), Some(KeyCommand::ToggleFullscreen));
        assert_eq!(KeyCommand::from_key("Space"), Some(KeyCommand::TogglePlay));
    }

    #[test]
    fn unbound_keys() {
        assert_eq!(KeyCommand::from_key("x"), None);
        assert_eq!(KeyCommand::from_key("Escape"), None);
        assert_eq!(KeyCommand::from_key(""), None);
    }
}
