//! Closed key enumeration and the static token lookup table.
//!
//! Shortcut specs name keys symbolically (`"Control"`, `"Tab"`, `"a"`).
//! Each symbolic key maps to an opaque numeric code; code sets, not token
//! strings, are what dispatch compares. The numeric values are the
//! platform key codes canvas hosts deliver, so a pressed modifier key
//! dedupes against its own modifier flag (Control held + Control pressed
//! is the single code 17, not two entries).

use once_cell::sync::Lazy;
use rustc_hash::FxHashMap;
use std::fmt;

/// Every key a shortcut spec may name. The discriminant is the key code.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[repr(u16)]
pub enum Key {
    Backspace = 8,
    Tab = 9,
    Enter = 13,
    Shift = 16,
    Control = 17,
    Alt = 18,
    Pause = 19,
    CapsLock = 20,
    Esc = 27,
    Space = 32,
    PageUp = 33,
    PageDown = 34,
    End = 35,
    Home = 36,
    Left = 37,
    Up = 38,
    Right = 39,
    Down = 40,
    Insert = 45,
    Del = 46,
    Num0 = 48,
    Num1 = 49,
    Num2 = 50,
    Num3 = 51,
    Num4 = 52,
    Num5 = 53,
    Num6 = 54,
    Num7 = 55,
    Num8 = 56,
    Num9 = 57,
    A = 65,
    B = 66,
    C = 67,
    D = 68,
    E = 69,
    F = 70,
    G = 71,
    H = 72,
    I = 73,
    J = 74,
    K = 75,
    L = 76,
    M = 77,
    N = 78,
    O = 79,
    P = 80,
    Q = 81,
    R = 82,
    S = 83,
    T = 84,
    U = 85,
    V = 86,
    W = 87,
    X = 88,
    Y = 89,
    Z = 90,
    F1 = 112,
    F2 = 113,
    F3 = 114,
    F4 = 115,
    F5 = 116,
    F6 = 117,
    F7 = 118,
    F8 = 119,
    F9 = 120,
    F10 = 121,
    F11 = 122,
    F12 = 123,
    Semicolon = 186,
    Equal = 187,
    Comma = 188,
    Minus = 189,
    Period = 190,
    Slash = 191,
    Backquote = 192,
    BracketLeft = 219,
    Backslash = 220,
    BracketRight = 221,
    Quote = 222,
}

/// Token table for multi-character key names. Single characters (letters,
/// digits, punctuation) are resolved directly in [`Key::from_token`].
static KEY_TOKEN_MAP: Lazy<FxHashMap<&'static str, Key>> = Lazy::new(|| {
    let mut map: FxHashMap<&'static str, Key> = FxHashMap::default();

    map.insert("Backspace", Key::Backspace);
    map.insert("Tab", Key::Tab);
    map.insert("Enter", Key::Enter);
    map.insert("Shift", Key::Shift);
    map.insert("Control", Key::Control);
    map.insert("Alt", Key::Alt);
    map.insert("Pause", Key::Pause);
    map.insert("CapsLock", Key::CapsLock);
    map.insert("Esc", Key::Esc);
    map.insert("Escape", Key::Esc);
    map.insert("Space", Key::Space);
    map.insert("Spacebar", Key::Space);
    map.insert("PageUp", Key::PageUp);
    map.insert("PageDown", Key::PageDown);
    map.insert("End", Key::End);
    map.insert("Home", Key::Home);
    map.insert("Left", Key::Left);
    map.insert("Up", Key::Up);
    map.insert("Right", Key::Right);
    map.insert("Down", Key::Down);
    map.insert("Insert", Key::Insert);
    map.insert("Del", Key::Del);
    map.insert("Delete", Key::Del);
    map.insert("F1", Key::F1);
    map.insert("F2", Key::F2);
    map.insert("F3", Key::F3);
    map.insert("F4", Key::F4);
    map.insert("F5", Key::F5);
    map.insert("F6", Key::F6);
    map.insert("F7", Key::F7);
    map.insert("F8", Key::F8);
    map.insert("F9", Key::F9);
    map.insert("F10", Key::F10);
    map.insert("F11", Key::F11);
    map.insert("F12", Key::F12);

    map
});

impl Key {
    /// Opaque numeric code used in canonical code sets.
    #[inline]
    pub fn code(self) -> u16 {
        self as u16
    }

    /// True for the three modifier keys that event modifier flags map to.
    #[inline]
    pub fn is_modifier(self) -> bool {
        matches!(self, Key::Control | Key::Alt | Key::Shift)
    }

    /// Resolve one symbolic token from a shortcut spec.
    ///
    /// Letters are case-insensitive (`"a"` and `"A"` both resolve to
    /// [`Key::A`]); multi-character names are looked up in the static
    /// token table. Returns `None` for tokens naming no known key.
    pub fn from_token(token: &str) -> Option<Key> {
        let mut chars = token.chars();
        if let (Some(c), None) = (chars.next(), chars.next()) {
            return Key::from_char(c);
        }
        KEY_TOKEN_MAP.get(token).copied()
    }

    fn from_char(c: char) -> Option<Key> {
        let key = match c.to_ascii_uppercase() {
            'A' => Key::A,
            'B' => Key::B,
            'C' => Key::C,
            'D' => Key::D,
            'E' => Key::E,
            'F' => Key::F,
            'G' => Key::G,
            'H' => Key::H,
            'I' => Key::I,
            'J' => Key::J,
            'K' => Key::K,
            'L' => Key::L,
            'M' => Key::M,
            'N' => Key::N,
            'O' => Key::O,
            'P' => Key::P,
            'Q' => Key::Q,
            'R' => Key::R,
            'S' => Key::S,
            'T' => Key::T,
            'U' => Key::U,
            'V' => Key::V,
            'W' => Key::W,
            'X' => Key::X,
            'Y' => Key::Y,
            'Z' => Key::Z,
            '0' => Key::Num0,
            '1' => Key::Num1,
            '2' => Key::Num2,
            '3' => Key::Num3,
            '4' => Key::Num4,
            '5' => Key::Num5,
            '6' => Key::Num6,
            '7' => Key::Num7,
            '8' => Key::Num8,
            '9' => Key::Num9,
            ';' => Key::Semicolon,
            '=' => Key::Equal,
            ',' => Key::Comma,
            '-' => Key::Minus,
            '.' => Key::Period,
            '/' => Key::Slash,
            '`' => Key::Backquote,
            '[' => Key::BracketLeft,
            '\\' => Key::Backslash,
            ']' => Key::BracketRight,
            '\'' => Key::Quote,
            _ => return None,
        };
        Some(key)
    }

    /// Canonical token text, the inverse of [`Key::from_token`].
    pub fn token(self) -> &'static str {
        match self {
            Key::Backspace => "Backspace",
            Key::Tab => "Tab",
            Key::Enter => "Enter",
            Key::Shift => "Shift",
            Key::Control => "Control",
            Key::Alt => "Alt",
            Key::Pause => "Pause",
            Key::CapsLock => "CapsLock",
            Key::Esc => "Esc",
            Key::Space => "Space",
            Key::PageUp => "PageUp",
            Key::PageDown => "PageDown",
            Key::End => "End",
            Key::Home => "Home",
            Key::Left => "Left",
            Key::Up => "Up",
            Key::Right => "Right",
            Key::Down => "Down",
            Key::Insert => "Insert",
            Key::Del => "Del",
            Key::Num0 => "0",
            Key::Num1 => "1",
            Key::Num2 => "2",
            Key::Num3 => "3",
            Key::Num4 => "4",
            Key::Num5 => "5",
            Key::Num6 => "6",
            Key::Num7 => "7",
            Key::Num8 => "8",
            Key::Num9 => "9",
            Key::A => "a",
            Key::B => "b",
            Key::C => "c",
            Key::D => "d",
            Key::E => "e",
            Key::F => "f",
            Key::G => "g",
            Key::H => "h",
            Key::I => "i",
            Key::J => "j",
            Key::K => "k",
            Key::L => "l",
            Key::M => "m",
            Key::N => "n",
            Key::O => "o",
            Key::P => "p",
            Key::Q => "q",
            Key::R => "r",
            Key::S => "s",
            Key::T => "t",
            Key::U => "u",
            Key::V => "v",
            Key::W => "w",
            Key::X => "x",
            Key::Y => "y",
            Key::Z => "z",
            Key::F1 => "F1",
            Key::F2 => "F2",
            Key::F3 => "F3",
            Key::F4 => "F4",
            Key::F5 => "F5",
            Key::F6 => "F6",
            Key::F7 => "F7",
            Key::F8 => "F8",
            Key::F9 => "F9",
            Key::F10 => "F10",
            Key::F11 => "F11",
            Key::F12 => "F12",
            Key::Semicolon => ";",
            Key::Equal => "=",
            Key::Comma => ",",
            Key::Minus => "-",
            Key::Period => ".",
            Key::Slash => "/",
            Key::Backquote => "`",
            Key::BracketLeft => "[",
            Key::Backslash => "\\",
            Key::BracketRight => "]",
            Key::Quote => "'",
        }
    }
}

impl fmt::Display for Key {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.token())
    }
}
