use crossterm::event::{KeyCode, KeyEvent, KeyEventKind, KeyModifiers};
use item_list::{Key, KeyInput, Modifiers};

/// Translates a crossterm key event.
///
/// Returns `None` for key releases and for keys the item-list input model has no use for
/// (function keys, media keys, ...). `BackTab` maps to `Tab` with shift held.
pub fn key_input_from_crossterm(event: &KeyEvent) -> Option<KeyInput> {
    if event.kind == KeyEventKind::Release {
        return None;
    }
    let key = match event.code {
        KeyCode::Char(' ') => Key::Space,
        KeyCode::Char(c) => Key::Char(c),
        KeyCode::Up => Key::ArrowUp,
        KeyCode::Down => Key::ArrowDown,
        KeyCode::Left => Key::ArrowLeft,
        KeyCode::Right => Key::ArrowRight,
        KeyCode::Home => Key::Home,
        KeyCode::End => Key::End,
        KeyCode::PageUp => Key::PageUp,
        KeyCode::PageDown => Key::PageDown,
        KeyCode::Enter => Key::Enter,
        KeyCode::Esc => Key::Escape,
        KeyCode::Tab | KeyCode::BackTab => Key::Tab,
        KeyCode::Backspace => Key::Backspace,
        _ => return None,
    };
    let m = event.modifiers;
    Some(KeyInput::new(
        key,
        Modifiers {
            shift: m.contains(KeyModifiers::SHIFT) || event.code == KeyCode::BackTab,
            ctrl: m.contains(KeyModifiers::CONTROL),
            alt: m.contains(KeyModifiers::ALT),
            meta: m.intersects(KeyModifiers::SUPER | KeyModifiers::META),
        },
    ))
}
