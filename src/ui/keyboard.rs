/// A key as reported by the browser's `KeyboardEvent.key`
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Key {
    Char(char),
    Enter,
    Space,
    Escape,
    Other,
}

impl Key {
    pub fn from_dom(key: &str) -> Self {
        match key {
            "Enter" => Key::Enter,
            " " | "Spacebar" => Key::Space,
            "Escape" | "Esc" => Key::Escape,
            _ => {
                let mut chars = key.chars();
                match (chars.next(), chars.next()) {
                    (Some(c), None) => Key::Char(c),
                    _ => Key::Other,
                }
            }
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct KeyPress {
    pub key: Key,
    pub alt: bool,
    /// Focus is inside a text input or textarea
    pub in_text_field: bool,
}

impl KeyPress {
    pub fn plain(key: Key) -> Self {
        Self {
            key,
            alt: false,
            in_text_field: false,
        }
    }

    pub fn alt(key: Key) -> Self {
        Self {
            key,
            alt: true,
            in_text_field: false,
        }
    }

    pub fn typing(key: Key) -> Self {
        Self {
            key,
            alt: false,
            in_text_field: true,
        }
    }
}

/// What a global key press asks for
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Shortcut {
    /// Alt+V / Alt+M
    Navigate(&'static str),
    /// Digit 1-9 selects option `N-1`
    SelectOption(String),
    /// Enter casts the vote
    SubmitVote,
}

pub const VOTING_PATH: &str = "/";
pub const MANAGE_PATH: &str = "/manage";

/// Map a document-level key press to a shortcut
///
/// Digit and Enter shortcuts only exist on the voting view and are ignored
/// while the user is typing.
pub fn shortcut_for(press: &KeyPress, on_voting_view: bool) -> Option<Shortcut> {
    if press.alt {
        return match press.key {
            Key::Char('v') => Some(Shortcut::Navigate(VOTING_PATH)),
            Key::Char('m') => Some(Shortcut::Navigate(MANAGE_PATH)),
            _ => None,
        };
    }

    if !on_voting_view || press.in_text_field {
        return None;
    }

    match press.key {
        Key::Char(c @ '1'..='9') => {
            let index = c.to_digit(10)? - 1;
            Some(Shortcut::SelectOption(index.to_string()))
        }
        Key::Enter => Some(Shortcut::SubmitVote),
        _ => None,
    }
}

/// Enter or Space on a focused option card activates it
pub fn activates_option(key: Key) -> bool {
    matches!(key, Key::Enter | Key::Space)
}
