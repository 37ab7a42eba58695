//! An interactive, arbitrary-precision calculator engine.
//!
//! The engine is the algorithmic core of a calculator widget: digit entry,
//! operator-precedence evaluation over a pending-operation stack, a memory
//! register and multi-radix display formatting. It renders nothing itself.
//! The surrounding UI layer maps user actions to [`Function`] catalog
//! entries, invokes them against a [`Calculator`], and re-renders from the
//! [`Update`] snapshots the engine emits.
//!
//! All arithmetic is exact arbitrary-precision decimal ([`Value`]); only
//! division, inversion and square root round, to sixteen fractional digits.
//! A failed operation (for example division by zero) leaves the calculator
//! state untouched.
//!
//! ```
//! use deskcalc::{BinaryOp, Calculator, ControlOp, Function};
//!
//! let mut calc = Calculator::new();
//! calc.apply(Function::Digit(2))?;
//! calc.apply(Function::Binary(BinaryOp::Add))?;
//! calc.apply(Function::Digit(3))?;
//! calc.apply(Function::Control(ControlOp::Equals))?;
//! assert_eq!("5", calc.value().to_string());
//! # Ok::<(), deskcalc::Error>(())
//! ```

mod display;
mod error;
mod function;
mod keymap;
#[cfg(feature = "serde")]
mod serde;
mod state;
mod value;

pub use crate::display::{DisplayMode, MultiFormatDisplay, NumberFormat};
pub use crate::error::Error;
pub use crate::function::{BinaryOp, ControlOp, Function, MemoryOp, UnaryOp, STANDARD_LAYOUT};
pub use crate::keymap::{key_binding, Key, Modifiers};
pub use crate::state::{Calculator, Operation, Update};
pub use crate::value::{Value, DIVISION_SCALE};

/// A convenience module appropriate for glob imports.
pub mod prelude {
    pub use crate::{
        key_binding, BinaryOp, Calculator, ControlOp, DisplayMode, Error, Function, Key,
        MemoryOp, Modifiers, MultiFormatDisplay, NumberFormat, UnaryOp, Update, Value,
    };
}
