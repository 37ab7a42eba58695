use crate::{Error, Value};

/// A single-operand function applied directly to the current value.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum UnaryOp {
    /// `1 / x`, rounded like division.
    Invert,
    /// Sign negation. The one operation that toggles in place without
    /// closing the current entry.
    Negate,
    /// `x * x`, exact.
    Square,
    /// Principal non-negative square root.
    SquareRoot,
    /// Bitwise NOT over the integer plane.
    Not,
}

impl UnaryOp {
    pub fn apply(&self, value: &Value) -> Result<Value, Error> {
        match self {
            UnaryOp::Invert => value.invert(),
            UnaryOp::Negate => Ok(-value),
            UnaryOp::Square => Ok(value.square()),
            UnaryOp::SquareRoot => value.sqrt(),
            UnaryOp::Not => value.bit_not(),
        }
    }

    /// Whether applying this function closes the current entry, so the next
    /// digit starts a fresh number. Negation keeps the entry editable.
    pub fn closes_entry(&self) -> bool {
        !matches!(self, UnaryOp::Negate)
    }

    pub fn symbol(&self) -> &'static str {
        match self {
            UnaryOp::Invert => "1/x",
            UnaryOp::Negate => "+/-",
            UnaryOp::Square => "x^2",
            UnaryOp::SquareRoot => "sqrt",
            UnaryOp::Not => "NOT",
        }
    }
}

/// A two-operand function. The left operand is captured on the operation
/// stack when the operator key is pressed; the right operand is whatever has
/// accumulated when the operation finally folds.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum BinaryOp {
    Add,
    Subtract,
    Multiply,
    Divide,
    Modulo,
    /// `(a * b) / 100`, exact.
    Percent,
    And,
    Or,
    Xor,
    ShiftLeft,
    ShiftRight,
}

impl BinaryOp {
    pub fn apply(&self, left: &Value, right: &Value) -> Result<Value, Error> {
        match self {
            BinaryOp::Add => Ok((left + right).normalize()),
            BinaryOp::Subtract => Ok((left - right).normalize()),
            BinaryOp::Multiply => Ok((left * right).normalize()),
            BinaryOp::Divide => left.div(right),
            BinaryOp::Modulo => left.modulo(right),
            BinaryOp::Percent => Ok(left.percent(right)),
            BinaryOp::And => left.bit_and(right),
            BinaryOp::Or => left.bit_or(right),
            BinaryOp::Xor => left.bit_xor(right),
            BinaryOp::ShiftLeft => left.shift_left(right),
            BinaryOp::ShiftRight => left.shift_right(right),
        }
    }

    /// The priority tier that decides when pending operations fold: pushing
    /// a new operator folds every stacked operation of equal or higher
    /// priority, and equals drains everything.
    ///
    /// The standard catalog puts every operator in one tier, so each new
    /// operator folds the whole stack and chains evaluate strictly left to
    /// right, the way a running-total desk calculator behaves.
    pub fn priority(&self) -> u8 {
        1
    }

    pub fn symbol(&self) -> &'static str {
        match self {
            BinaryOp::Add => "+",
            BinaryOp::Subtract => "-",
            BinaryOp::Multiply => "*",
            BinaryOp::Divide => "/",
            BinaryOp::Modulo => "mod",
            BinaryOp::Percent => "%",
            BinaryOp::And => "AND",
            BinaryOp::Or => "OR",
            BinaryOp::Xor => "XOR",
            BinaryOp::ShiftLeft => "<<",
            BinaryOp::ShiftRight => ">>",
        }
    }
}

/// A pairwise transform of `(current value, memory register)`. Both fields
/// are produced together so the update is atomic.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum MemoryOp {
    Exchange,
    Clear,
    Recall,
    Store,
    Add,
    Subtract,
}

impl MemoryOp {
    pub fn apply(&self, value: &Value, memory: &Value) -> (Value, Value) {
        match self {
            MemoryOp::Exchange => (memory.clone(), value.clone()),
            MemoryOp::Clear => (value.clone(), Value::zero()),
            MemoryOp::Recall => (memory.clone(), memory.clone()),
            MemoryOp::Store => (value.clone(), value.clone()),
            MemoryOp::Add => (value.clone(), (memory + value).normalize()),
            MemoryOp::Subtract => (value.clone(), (memory - value).normalize()),
        }
    }

    pub fn symbol(&self) -> &'static str {
        match self {
            MemoryOp::Exchange => "MX",
            MemoryOp::Clear => "MC",
            MemoryOp::Recall => "MR",
            MemoryOp::Store => "MS",
            MemoryOp::Add => "M+",
            MemoryOp::Subtract => "M-",
        }
    }
}

/// Entry and evaluation control actions.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum ControlOp {
    ClearEntry,
    ClearAll,
    Backspace,
    /// Switches digit entry to the fractional part. Idempotent.
    FractionInput,
    Equals,
}

impl ControlOp {
    pub fn symbol(&self) -> &'static str {
        match self {
            ControlOp::ClearEntry => "CE",
            ControlOp::ClearAll => "C",
            ControlOp::Backspace => "<-",
            ControlOp::FractionInput => ".",
            ControlOp::Equals => "=",
        }
    }
}

/// One entry of the calculator's closed function catalog. Entries are
/// stateless constant data; the dispatcher maps user actions to them and
/// invokes them against a [`Calculator`](crate::Calculator).
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Function {
    /// Appends one decimal digit (0..=9) to the current entry.
    Digit(u8),
    Unary(UnaryOp),
    Binary(BinaryOp),
    Memory(MemoryOp),
    Control(ControlOp),
}

static DIGIT_SYMBOLS: [&str; 10] = ["0", "1", "2", "3", "4", "5", "6", "7", "8", "9"];

impl Function {
    /// The display symbol for this entry's key face.
    pub fn symbol(&self) -> &'static str {
        match self {
            Function::Digit(d) => DIGIT_SYMBOLS[usize::from(*d).min(9)],
            Function::Unary(op) => op.symbol(),
            Function::Binary(op) => op.symbol(),
            Function::Memory(op) => op.symbol(),
            Function::Control(op) => op.symbol(),
        }
    }
}

/// The standard keypad layout: every catalog entry, arranged as the rows of
/// function keys a calculator widget lays out top to bottom.
pub static STANDARD_LAYOUT: &[&[Function]] = &[
    &[
        Function::Memory(MemoryOp::Clear),
        Function::Memory(MemoryOp::Recall),
        Function::Memory(MemoryOp::Store),
        Function::Memory(MemoryOp::Add),
        Function::Memory(MemoryOp::Subtract),
    ],
    &[
        Function::Memory(MemoryOp::Exchange),
        Function::Control(ControlOp::ClearEntry),
        Function::Control(ControlOp::ClearAll),
        Function::Control(ControlOp::Backspace),
        Function::Control(ControlOp::Equals),
    ],
    &[
        Function::Digit(7),
        Function::Digit(8),
        Function::Digit(9),
        Function::Binary(BinaryOp::Divide),
        Function::Unary(UnaryOp::SquareRoot),
    ],
    &[
        Function::Digit(4),
        Function::Digit(5),
        Function::Digit(6),
        Function::Binary(BinaryOp::Multiply),
        Function::Unary(UnaryOp::Square),
    ],
    &[
        Function::Digit(1),
        Function::Digit(2),
        Function::Digit(3),
        Function::Binary(BinaryOp::Subtract),
        Function::Unary(UnaryOp::Invert),
    ],
    &[
        Function::Digit(0),
        Function::Control(ControlOp::FractionInput),
        Function::Unary(UnaryOp::Negate),
        Function::Binary(BinaryOp::Add),
        Function::Binary(BinaryOp::Percent),
    ],
    &[
        Function::Unary(UnaryOp::Not),
        Function::Binary(BinaryOp::And),
        Function::Binary(BinaryOp::Or),
        Function::Binary(BinaryOp::Xor),
        Function::Binary(BinaryOp::Modulo),
    ],
    &[
        Function::Binary(BinaryOp::ShiftLeft),
        Function::Binary(BinaryOp::ShiftRight),
    ],
];
