use crate::function::{BinaryOp, ControlOp, Function};

/// Modifier keys held during a key press.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Modifiers {
    pub shift: bool,
}

/// A raw key event, already decoded by the UI layer.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Key {
    Char(char),
    Enter,
    Backspace,
    Escape,
}

/// Translates a raw key event into a catalog entry, or `None` when the key
/// is not bound.
///
/// Bindings: digits `0`-`9`, the operator characters `+ - * / % & | ^ < >`,
/// `.` for fraction input, Enter for equals, Backspace (Shift+Backspace
/// clears the entry) and Escape for clear-all.
pub fn key_binding(modifiers: Modifiers, key: Key) -> Option<Function> {
    match key {
        Key::Enter => Some(Function::Control(ControlOp::Equals)),
        Key::Backspace if modifiers.shift => Some(Function::Control(ControlOp::ClearEntry)),
        Key::Backspace => Some(Function::Control(ControlOp::Backspace)),
        Key::Escape => Some(Function::Control(ControlOp::ClearAll)),
        Key::Char(c) => match c {
            '0'..='9' => Some(Function::Digit(c as u8 - b'0')),
            '.' => Some(Function::Control(ControlOp::FractionInput)),
            '+' => Some(Function::Binary(BinaryOp::Add)),
            '-' => Some(Function::Binary(BinaryOp::Subtract)),
            '*' => Some(Function::Binary(BinaryOp::Multiply)),
            '/' => Some(Function::Binary(BinaryOp::Divide)),
            '%' => Some(Function::Binary(BinaryOp::Percent)),
            '&' => Some(Function::Binary(BinaryOp::And)),
            '|' => Some(Function::Binary(BinaryOp::Or)),
            '^' => Some(Function::Binary(BinaryOp::Xor)),
            '<' => Some(Function::Binary(BinaryOp::ShiftLeft)),
            '>' => Some(Function::Binary(BinaryOp::ShiftRight)),
            _ => None,
        },
    }
}
