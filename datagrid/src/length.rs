use alloc::string::String;
use core::fmt;
use core::str::FromStr;

use crate::error::{DataGridError, Result};

/// How a column width is interpreted.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum DataGridLengthUnit {
    /// A fixed width in pixels.
    Pixel,
    /// Sized to fit both the header and the cells.
    #[default]
    Auto,
    /// Sized to fit the cells only.
    SizeToCells,
    /// Sized to fit the header only.
    SizeToHeader,
}

/// A column width: a value plus the unit it is expressed in.
///
/// Always finite and non-negative. `Auto` lengths normalize their value to `1.0` so that two
/// `Auto` lengths compare equal regardless of how they were constructed.
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct DataGridLength {
    value: f64,
    unit: DataGridLengthUnit,
}

impl DataGridLength {
    pub const AUTO: Self = Self {
        value: 1.0,
        unit: DataGridLengthUnit::Auto,
    };
    pub const SIZE_TO_CELLS: Self = Self {
        value: 1.0,
        unit: DataGridLengthUnit::SizeToCells,
    };
    pub const SIZE_TO_HEADER: Self = Self {
        value: 1.0,
        unit: DataGridLengthUnit::SizeToHeader,
    };

    pub fn new(value: f64, unit: DataGridLengthUnit) -> Result<Self> {
        if value.is_nan() {
            return Err(DataGridError::ValueCannotBeNaN { name: "value" });
        }
        if value.is_infinite() {
            return Err(DataGridError::ValueCannotBeInfinity { name: "value" });
        }
        if value < 0.0 {
            return Err(DataGridError::at_least("value", 0));
        }
        let value = if unit == DataGridLengthUnit::Auto {
            1.0
        } else {
            value
        };
        Ok(Self { value, unit })
    }

    /// A fixed pixel width.
    pub fn pixel(value: f64) -> Result<Self> {
        Self::new(value, DataGridLengthUnit::Pixel)
    }

    pub fn value(&self) -> f64 {
        self.value
    }

    pub fn unit(&self) -> DataGridLengthUnit {
        self.unit
    }

    pub fn is_absolute(&self) -> bool {
        self.unit == DataGridLengthUnit::Pixel
    }

    pub fn is_auto(&self) -> bool {
        self.unit == DataGridLengthUnit::Auto
    }

    pub fn is_size_to_cells(&self) -> bool {
        self.unit == DataGridLengthUnit::SizeToCells
    }

    pub fn is_size_to_header(&self) -> bool {
        self.unit == DataGridLengthUnit::SizeToHeader
    }

    /// Whether cell content can grow the column's desired width.
    pub(crate) fn grows_with_cells(&self) -> bool {
        self.is_auto() || self.is_size_to_cells()
    }

    /// Whether header content can grow the column's desired width.
    pub(crate) fn grows_with_header(&self) -> bool {
        self.is_auto() || self.is_size_to_header()
    }
}

impl Default for DataGridLength {
    fn default() -> Self {
        Self::AUTO
    }
}

impl From<DataGridLength> for f64 {
    fn from(length: DataGridLength) -> Self {
        length.value
    }
}

/// Number formatting conventions used when converting lengths to and from text.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct NumberCulture {
    pub decimal_separator: char,
    /// Digit grouping character accepted (and ignored) when parsing.
    pub group_separator: Option<char>,
}

impl NumberCulture {
    pub const INVARIANT: Self = Self {
        decimal_separator: '.',
        group_separator: Some(','),
    };

    pub const fn new(decimal_separator: char, group_separator: Option<char>) -> Self {
        Self {
            decimal_separator,
            group_separator,
        }
    }

    pub fn parse_f64(&self, s: &str) -> Option<f64> {
        let mut normalized = String::with_capacity(s.len());
        for ch in s.chars() {
            if Some(ch) == self.group_separator {
                continue;
            }
            if ch == self.decimal_separator {
                normalized.push('.');
            } else {
                normalized.push(ch);
            }
        }
        normalized.parse::<f64>().ok()
    }

    pub fn format_f64(&self, value: f64) -> String {
        let mut out = alloc::format!("{value}");
        if self.decimal_separator != '.' {
            out = out.replace('.', self.decimal_separator.encode_utf8(&mut [0; 4]));
        }
        out
    }
}

impl Default for NumberCulture {
    fn default() -> Self {
        Self::INVARIANT
    }
}

const AUTO_NAME: &str = "Auto";
const SIZE_TO_CELLS_NAME: &str = "SizeToCells";
const SIZE_TO_HEADER_NAME: &str = "SizeToHeader";

/// Converts [`DataGridLength`] values to and from strings and numbers.
///
/// Keyword matching is case-insensitive and looks at the end of the trimmed input, so
/// `"  AUTO "` and `"autoAuto"` both parse as `Auto`. Anything else is parsed as a pixel width
/// using the converter's [`NumberCulture`].
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct DataGridLengthConverter {
    culture: NumberCulture,
}

impl DataGridLengthConverter {
    pub fn new(culture: NumberCulture) -> Self {
        Self { culture }
    }

    pub fn culture(&self) -> NumberCulture {
        self.culture
    }

    pub fn convert_from_str(&self, s: &str) -> Result<DataGridLength> {
        let lowered = s.trim().to_ascii_lowercase();
        if lowered.ends_with("auto") {
            return Ok(DataGridLength::AUTO);
        }
        if lowered.ends_with("sizetocells") {
            return Ok(DataGridLength::SIZE_TO_CELLS);
        }
        if lowered.ends_with("sizetoheader") {
            return Ok(DataGridLength::SIZE_TO_HEADER);
        }
        let value = self
            .culture
            .parse_f64(&lowered)
            .ok_or_else(|| DataGridError::InvalidLength(String::from(s)))?;
        self.convert_from_f64(value)
    }

    /// Numbers convert to pixel lengths. NaN converts to `Auto`, matching how the legacy
    /// layout length type treated an unset numeric width.
    pub fn convert_from_f64(&self, value: f64) -> Result<DataGridLength> {
        if value.is_nan() {
            return Ok(DataGridLength::AUTO);
        }
        DataGridLength::pixel(value)
    }

    pub fn convert_to_string(&self, length: &DataGridLength) -> String {
        match length.unit {
            DataGridLengthUnit::Auto => String::from(AUTO_NAME),
            DataGridLengthUnit::SizeToCells => String::from(SIZE_TO_CELLS_NAME),
            DataGridLengthUnit::SizeToHeader => String::from(SIZE_TO_HEADER_NAME),
            DataGridLengthUnit::Pixel => self.culture.format_f64(length.value),
        }
    }
}

impl fmt::Display for DataGridLength {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&DataGridLengthConverter::default().convert_to_string(self))
    }
}

impl FromStr for DataGridLength {
    type Err = DataGridError;

    fn from_str(s: &str) -> Result<Self> {
        DataGridLengthConverter::default().convert_from_str(s)
    }
}
