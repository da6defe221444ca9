//! Adapter to convert winit key events to our Keystroke type

use winit::keyboard::{Key, ModifiersState, NamedKey};

use super::types::{KeyCode, Keystroke, Modifiers};

pub fn modifiers_from_winit(state: ModifiersState) -> Modifiers {
    Modifiers::new(
        state.control_key(),
        state.shift_key(),
        state.alt_key(),
        state.super_key(),
    )
}

/// Convert a winit logical key to a Keystroke
///
/// Returns None for keys the editor has no use for.
pub fn keystroke_from_winit(logical_key: &Key, mods: Modifiers) -> Option<Keystroke> {
    let key_code = match logical_key {
        Key::Named(named) => match named {
            NamedKey::Enter => KeyCode::Enter,
            NamedKey::Escape => KeyCode::Escape,
            NamedKey::Tab => KeyCode::Tab,
            NamedKey::Backspace => KeyCode::Backspace,
            NamedKey::Delete => KeyCode::Delete,
            NamedKey::Space => KeyCode::Space,
            NamedKey::ArrowUp => KeyCode::Up,
            NamedKey::ArrowDown => KeyCode::Down,
            NamedKey::ArrowLeft => KeyCode::Left,
            NamedKey::ArrowRight => KeyCode::Right,
            NamedKey::Home => KeyCode::Home,
            NamedKey::End => KeyCode::End,
            NamedKey::PageUp => KeyCode::PageUp,
            NamedKey::PageDown => KeyCode::PageDown,
            _ => return None,
        },
        // Character keys - normalize to lowercase
        Key::Character(s) => KeyCode::Char(s.chars().next()?.to_ascii_lowercase()),
        _ => return None,
    };

    Some(Keystroke::new(key_code, mods))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_character_key() {
        let stroke = keystroke_from_winit(&Key::Character("s".into()), Modifiers::CTRL)
            .expect("should map");
        assert_eq!(stroke.key, KeyCode::Char('s'));
        assert!(stroke.mods.ctrl());
    }

    #[test]
    fn test_uppercase_normalized() {
        let stroke = keystroke_from_winit(&Key::Character("S".into()), Modifiers::SHIFT)
            .expect("should map");
        assert_eq!(stroke.key, KeyCode::Char('s'));
        assert!(stroke.mods.shift());
    }

    #[test]
    fn test_named_keys() {
        let stroke = keystroke_from_winit(&Key::Named(NamedKey::ArrowLeft), Modifiers::NONE);
        assert_eq!(stroke.map(|s| s.key), Some(KeyCode::Left));
        assert!(keystroke_from_winit(&Key::Named(NamedKey::F13), Modifiers::NONE).is_none());
    }

    #[test]
    fn test_modifier_state() {
        let mods = modifiers_from_winit(ModifiersState::CONTROL | ModifiersState::SHIFT);
        assert!(mods.ctrl() && mods.shift());
        assert!(!mods.alt() && !mods.meta());
    }
}
