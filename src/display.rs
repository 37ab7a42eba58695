use crate::Value;
use num_bigint::Sign;

/// One of the display engine's numeral renderings.
///
/// The decimal format always renders. The radix formats only render values
/// without fractional digits: they show the integer magnitude in the target
/// base, space-grouped from the least-significant digit for readability,
/// with a leading `-` for negative values.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum NumberFormat {
    Decimal,
    Hexadecimal,
    Octal,
    Binary,
}

impl NumberFormat {
    pub fn label(&self) -> &'static str {
        match self {
            NumberFormat::Decimal => "dec",
            NumberFormat::Hexadecimal => "hex",
            NumberFormat::Octal => "oct",
            NumberFormat::Binary => "bin",
        }
    }

    pub fn radix(&self) -> u32 {
        match self {
            NumberFormat::Decimal => 10,
            NumberFormat::Hexadecimal => 16,
            NumberFormat::Octal => 8,
            NumberFormat::Binary => 2,
        }
    }

    /// Digits per space-separated group.
    fn group_size(&self) -> usize {
        match self {
            NumberFormat::Decimal => 0,
            NumberFormat::Hexadecimal | NumberFormat::Binary => 4,
            NumberFormat::Octal => 3,
        }
    }

    /// Renders `value` in this format, or `None` when the format does not
    /// apply (a radix format and a value with fractional digits).
    pub fn render(&self, value: &Value) -> Option<String> {
        if let NumberFormat::Decimal = self {
            return Some(value.to_string());
        }
        if value.has_fraction() {
            return None;
        }
        let int = value.to_bigint().ok()?;
        let digits = int.magnitude().to_str_radix(self.radix()).to_uppercase();
        let grouped = group_digits(&digits, self.group_size());
        if int.sign() == Sign::Minus {
            Some(format!("-{}", grouped))
        } else {
            Some(grouped)
        }
    }
}

/// Inserts a space every `every` digits, counting from the least-significant
/// digit.
fn group_digits(digits: &str, every: usize) -> String {
    if every == 0 {
        return digits.to_string();
    }
    let len = digits.len();
    let mut out = String::with_capacity(len + len / every);
    for (i, c) in digits.chars().enumerate() {
        if i > 0 && (len - i) % every == 0 {
            out.push(' ');
        }
        out.push(c);
    }
    out
}

/// How the display composite presents the formats to the user.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum DisplayMode {
    /// All applicable formats are shown and selectable.
    Interactive,
    /// Only the active format is shown, selector included.
    ActiveModeOnly,
    /// Only the active format's value is shown; the selector is hidden but
    /// its space is reserved so the layout stays stable.
    ActiveValueOnly,
}

type ActiveChangeListener = Box<dyn FnMut(NumberFormat)>;

/// Converts the current value into each configured representation and tracks
/// which one is active. Purely a string-producing collaborator: rendering to
/// widgets is the caller's job.
pub struct MultiFormatDisplay {
    formats: Vec<NumberFormat>,
    rendered: Vec<Option<String>>,
    active: usize,
    mode: DisplayMode,
    listeners: Vec<ActiveChangeListener>,
}

impl MultiFormatDisplay {
    /// Creates a display over the given ordered formats. The first format is
    /// initially active.
    ///
    /// # Panics
    ///
    /// Panics if `formats` is empty.
    pub fn new(formats: Vec<NumberFormat>) -> MultiFormatDisplay {
        assert!(!formats.is_empty(), "At least one format is required");
        let rendered = formats.iter().map(|f| f.render(&Value::zero())).collect();
        MultiFormatDisplay {
            formats,
            rendered,
            active: 0,
            mode: DisplayMode::Interactive,
            listeners: Vec::new(),
        }
    }

    /// A display with the standard decimal, hexadecimal, octal and binary
    /// formats.
    pub fn standard() -> MultiFormatDisplay {
        MultiFormatDisplay::new(vec![
            NumberFormat::Decimal,
            NumberFormat::Hexadecimal,
            NumberFormat::Octal,
            NumberFormat::Binary,
        ])
    }

    pub fn formats(&self) -> &[NumberFormat] {
        &self.formats
    }

    pub fn mode(&self) -> DisplayMode {
        self.mode
    }

    pub fn set_mode(&mut self, mode: DisplayMode) {
        self.mode = mode;
    }

    pub fn active(&self) -> usize {
        self.active
    }

    pub fn active_format(&self) -> NumberFormat {
        self.formats[self.active]
    }

    /// Registers a listener invoked with the newly active format whenever
    /// [`set_active`](Self::set_active) is called.
    pub fn on_active_change(&mut self, listener: impl FnMut(NumberFormat) + 'static) {
        self.listeners.push(Box::new(listener));
    }

    /// Makes the format at `index` the primary representation and notifies
    /// listeners.
    ///
    /// # Panics
    ///
    /// Panics if `index` is out of bounds.
    pub fn set_active(&mut self, index: usize) {
        assert!(index < self.formats.len(), "Format index out of bounds");
        self.active = index;
        let format = self.formats[index];
        for listener in &mut self.listeners {
            listener(format);
        }
    }

    /// Recomputes every format's rendering for `value`.
    pub fn update(&mut self, value: &Value) {
        for (format, slot) in self.formats.iter().zip(self.rendered.iter_mut()) {
            *slot = format.render(value);
        }
    }

    /// The rendered text of the format at `index`, or `None` when that
    /// format is hidden for the current value.
    pub fn text(&self, index: usize) -> Option<&str> {
        self.rendered.get(index).and_then(|s| s.as_deref())
    }

    /// The rendered text of the active format.
    pub fn active_text(&self) -> Option<&str> {
        self.text(self.active)
    }

    /// Whether the format selector at `index` should be shown under the
    /// current mode.
    pub fn selector_visible(&self, index: usize) -> bool {
        if self.text(index).is_none() {
            return false;
        }
        match self.mode {
            DisplayMode::Interactive => true,
            DisplayMode::ActiveModeOnly => index == self.active,
            DisplayMode::ActiveValueOnly => false,
        }
    }

    /// Whether the value rendering at `index` should be shown under the
    /// current mode.
    pub fn value_visible(&self, index: usize) -> bool {
        if self.text(index).is_none() {
            return false;
        }
        match self.mode {
            DisplayMode::Interactive => true,
            DisplayMode::ActiveModeOnly | DisplayMode::ActiveValueOnly => index == self.active,
        }
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use core::str::FromStr;

    #[test]
    fn groups_from_least_significant_digit() {
        assert_eq!("1 0000", group_digits("10000", 4));
        assert_eq!("F FFFF", group_digits("FFFFF", 4));
        assert_eq!("777", group_digits("777", 3));
        assert_eq!("1 000", group_digits("1000", 3));
    }

    #[test]
    fn renders_hexadecimal_magnitude() {
        let value = Value::from_str("255").unwrap();
        assert_eq!(Some("FF".to_string()), NumberFormat::Hexadecimal.render(&value));
    }

    #[test]
    fn hides_radix_formats_for_fractional_values() {
        let value = Value::from_str("2.5").unwrap();
        assert_eq!(None, NumberFormat::Hexadecimal.render(&value));
        assert_eq!(None, NumberFormat::Octal.render(&value));
        assert_eq!(None, NumberFormat::Binary.render(&value));
        assert_eq!(Some("2.5".to_string()), NumberFormat::Decimal.render(&value));
    }

    #[test]
    fn renders_negative_values_with_grouped_magnitude() {
        let value = Value::from_str("-65535").unwrap();
        assert_eq!(
            Some("-FFFF".to_string()),
            NumberFormat::Hexadecimal.render(&value)
        );
        assert_eq!(
            Some("-1111 1111 1111 1111".to_string()),
            NumberFormat::Binary.render(&value)
        );
    }
}
