use derive_more::{Display, Error, From, IsVariant, TryInto};

#[cfg(feature = "dtoa")]
#[derive(Debug, Display, Error, Clone, Copy, PartialEq, Eq)]
#[display("requested {requested} digits, outside of the supported {min} to {max}")]
pub struct DigitCountError {
    pub requested: usize,
    pub min: usize,
    pub max: usize,
}

#[cfg(feature = "dtoa")]
#[derive(Debug, Display, Error, Clone, Copy, PartialEq, Eq)]
#[display("value is too large for fixed notation")]
pub struct ValueOutOfRangeError;

#[cfg(feature = "dtoa")]
#[derive(Debug, Display, Error, Clone, Copy, PartialEq, Eq)]
#[display("no symbol configured for infinity or NaN")]
pub struct SpecialValueError;

/// The reasons a [`DoubleToStringConverter`](super::DoubleToStringConverter) can refuse a
/// conversion. Nothing is written to the builder when it does.
#[cfg(feature = "dtoa")]
#[derive(Debug, Display, Error, Clone, Copy, PartialEq, Eq, From, TryInto, IsVariant)]
pub enum DtoaError {
    DigitCountOutOfRange(DigitCountError),
    ValueOutOfRange(ValueOutOfRangeError),
    SpecialValueUnsupported(SpecialValueError),
}

#[cfg(feature = "strtod")]
#[derive(Debug, Display, Error, Clone, Copy, PartialEq, Eq)]
#[display("input does not start with a number")]
pub struct NoDigitsError;

#[cfg(feature = "strtod")]
#[derive(Debug, Display, Error, Clone, Copy, PartialEq, Eq)]
#[display("unexpected characters after the number")]
pub struct TrailingJunkError;

/// The reasons a [`StringToDoubleConverter`](super::StringToDoubleConverter) can reject its
/// input. The input is left untouched when it does.
#[cfg(feature = "strtod")]
#[derive(Debug, Display, Error, Clone, Copy, PartialEq, Eq, From, TryInto, IsVariant)]
pub enum ParseError {
    NoDigits(NoDigitsError),
    TrailingJunk(TrailingJunkError),
}
