use crate::function::{BinaryOp, ControlOp, Function, MemoryOp, UnaryOp};
use crate::{Error, Value};
use core::fmt;

/// A pending binary operation: the operator together with the left operand
/// captured when the operator key was pressed.
#[derive(Clone, Debug)]
pub struct Operation {
    function: BinaryOp,
    left: Value,
}

impl Operation {
    pub fn function(&self) -> BinaryOp {
        self.function
    }

    pub fn left_operand(&self) -> &Value {
        &self.left
    }

    fn priority(&self) -> u8 {
        self.function.priority()
    }

    fn apply(&self, right: &Value) -> Result<Value, Error> {
        self.function.apply(&self.left, right)
    }
}

/// Snapshot handed to update listeners after every successful mutation, so a
/// display collaborator can re-render without reaching into engine state.
#[derive(Clone, Debug)]
pub struct Update {
    pub value: Value,
    pub memory: Value,
    /// Human-readable rendering of the pending operation stack, e.g.
    /// `"2 + 5 *"`. Empty when nothing is stacked.
    pub pending: String,
}

type UpdateListener = Box<dyn FnMut(&Update)>;

/// The calculator state machine. Owns the current value, the memory
/// register, the digit-entry mode flags and the pending operation stack, and
/// exposes the transition functions that catalog entries invoke.
///
/// Every mutation is synchronous and runs to completion; listeners are
/// notified strictly after the state change. A mutation that fails leaves
/// the state exactly as it was before the call.
pub struct Calculator {
    current: Value,
    memory: Value,
    /// Place-value weight of the next typed digit: `1` during integer
    /// entry, divided by ten for each fractional digit.
    input_digit_unit: Value,
    fraction_input: bool,
    enter_new_value: bool,
    operations: Vec<Operation>,
    listeners: Vec<UpdateListener>,
}

impl Calculator {
    pub fn new() -> Calculator {
        Calculator {
            current: Value::zero(),
            memory: Value::zero(),
            input_digit_unit: Value::one(),
            fraction_input: false,
            enter_new_value: true,
            operations: Vec::new(),
            listeners: Vec::new(),
        }
    }

    /// The value currently shown / being edited.
    pub fn value(&self) -> &Value {
        &self.current
    }

    /// The memory register.
    pub fn memory(&self) -> &Value {
        &self.memory
    }

    /// True once the decimal separator has been pressed for the current
    /// entry.
    pub fn fraction_input(&self) -> bool {
        self.fraction_input
    }

    /// True when the next digit starts a fresh number.
    pub fn enter_new_value(&self) -> bool {
        self.enter_new_value
    }

    /// The pending operations, bottom first.
    pub fn pending_operations(&self) -> &[Operation] {
        &self.operations
    }

    /// Programmatic reset of the current value. Closes the entry, as if the
    /// value had been produced by an evaluation.
    pub fn set_value(&mut self, value: Value) {
        self.current = value;
        self.full_reset();
        self.notify();
    }

    /// Registers a listener invoked after every successful mutation.
    pub fn on_update(&mut self, listener: impl FnMut(&Update) + 'static) {
        self.listeners.push(Box::new(listener));
    }

    /// Invokes one catalog entry against the live state.
    pub fn apply(&mut self, function: Function) -> Result<(), Error> {
        match function {
            Function::Digit(d) => self.input(d),
            Function::Unary(op) => self.apply_unary(op)?,
            Function::Binary(op) => self.add_operation(op)?,
            Function::Memory(op) => self.apply_memory(op),
            Function::Control(ControlOp::ClearEntry) => self.clear_entry(),
            Function::Control(ControlOp::ClearAll) => self.clear_all(),
            Function::Control(ControlOp::Backspace) => self.back_one_digit(),
            Function::Control(ControlOp::FractionInput) => self.start_fraction_input(),
            Function::Control(ControlOp::Equals) => self.calculate()?,
        }
        Ok(())
    }

    /// Appends one digit to the current entry.
    ///
    /// # Panics
    ///
    /// Panics if `digit` is greater than 9.
    pub fn input(&mut self, digit: u8) {
        assert!(digit <= 9, "Digit out of range");
        if self.enter_new_value {
            self.current = Value::zero();
            self.enter_new_value = false;
        }
        let digit = Value::from(u32::from(digit));
        if self.fraction_input {
            self.input_digit_unit = self.input_digit_unit.mul_pow10(-1);
            self.current = &self.current + &(&self.input_digit_unit * &digit);
        } else {
            self.current = &(&self.current * &Value::from(10u32)) + &digit;
        }
        self.notify();
    }

    /// Switches the current entry to its fractional part. Pressing the
    /// separator twice is a no-op.
    pub fn start_fraction_input(&mut self) {
        self.fraction_input = true;
        self.notify();
    }

    /// Removes the most recently typed digit. Does nothing when the entry
    /// has been closed.
    pub fn back_one_digit(&mut self) {
        if self.enter_new_value {
            return;
        }
        if self.fraction_input && self.current.scale() > 0 {
            self.input_digit_unit = self.input_digit_unit.mul_pow10(1);
            let scale = self.current.scale();
            self.current = self.current.floor_to_scale(scale - 1);
            if self.current.scale() == 0 {
                self.fraction_input = false;
                self.input_digit_unit = Value::one();
            }
        } else {
            self.current = self.current.mul_pow10(-1).floor_to_scale(0);
        }
        self.notify();
    }

    /// Resets the current entry. The operation stack and memory register are
    /// untouched.
    pub fn clear_entry(&mut self) {
        self.current = Value::zero();
        self.full_reset();
        self.notify();
    }

    /// Empties the operation stack and resets the current entry. Memory is
    /// untouched.
    pub fn clear_all(&mut self) {
        self.operations.clear();
        self.clear_entry();
    }

    /// Applies a unary function to the current value. Every unary function
    /// except negation closes the entry.
    pub fn apply_unary(&mut self, op: UnaryOp) -> Result<(), Error> {
        let result = op.apply(&self.current)?;
        self.current = result;
        if op.closes_entry() {
            self.full_reset();
        }
        self.notify();
        Ok(())
    }

    /// Applies a memory function: current value and memory register update
    /// together, and the entry is closed.
    pub fn apply_memory(&mut self, op: MemoryOp) {
        let (value, memory) = op.apply(&self.current, &self.memory);
        self.current = value;
        self.memory = memory;
        self.full_reset();
        self.notify();
    }

    /// Pushes a binary operator: first folds every pending operation of
    /// equal or higher priority into the accumulated value, then stacks the
    /// operator with that value as its left operand.
    pub fn add_operation(&mut self, function: BinaryOp) -> Result<(), Error> {
        let folded = self.execute_operations(self.current.clone(), function.priority())?;
        self.operations.push(Operation {
            function,
            left: folded.clone(),
        });
        self.current = folded;
        self.full_reset();
        self.notify();
        Ok(())
    }

    /// The equals action: drains the whole operation stack into the current
    /// value and closes the entry.
    pub fn calculate(&mut self) -> Result<(), Error> {
        let result = self.execute_operations(self.current.clone(), 0)?;
        self.current = result;
        self.full_reset();
        self.notify();
        Ok(())
    }

    /// Pops and evaluates stacked operations while the top's priority is at
    /// least `min_priority`, threading the running result in as the right
    /// operand each time. On error nothing is popped.
    fn execute_operations(&mut self, mut right: Value, min_priority: u8) -> Result<Value, Error> {
        let mut depth = self.operations.len();
        while depth > 0 && self.operations[depth - 1].priority() >= min_priority {
            right = self.operations[depth - 1].apply(&right)?;
            depth -= 1;
        }
        self.operations.truncate(depth);
        Ok(right)
    }

    /// Closes the current entry: the next digit starts a fresh number.
    fn full_reset(&mut self) {
        self.input_digit_unit = Value::one();
        self.fraction_input = false;
        self.enter_new_value = true;
    }

    /// Renders the pending operations bottom to top, e.g. `"2 + 5 *"`.
    pub fn pending_description(&self) -> String {
        let mut out = String::new();
        for op in &self.operations {
            if !out.is_empty() {
                out.push(' ');
            }
            out.push_str(&op.left.to_string());
            out.push(' ');
            out.push_str(op.function.symbol());
        }
        out
    }

    fn notify(&mut self) {
        if self.listeners.is_empty() {
            return;
        }
        let update = Update {
            value: self.current.clone(),
            memory: self.memory.clone(),
            pending: self.pending_description(),
        };
        for listener in &mut self.listeners {
            listener(&update);
        }
    }
}

impl Default for Calculator {
    fn default() -> Calculator {
        Calculator::new()
    }
}

impl fmt::Debug for Calculator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Calculator")
            .field("current", &self.current)
            .field("memory", &self.memory)
            .field("input_digit_unit", &self.input_digit_unit)
            .field("fraction_input", &self.fraction_input)
            .field("enter_new_value", &self.enter_new_value)
            .field("operations", &self.operations)
            .finish()
    }
}
