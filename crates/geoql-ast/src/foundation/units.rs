//! Physical unit tables and unit-carrying quantities.
//!
//! The tables here are leaf data: literal suffix text to unit identifier.
//! All suffixes are lower-case; the tokenizer lower-cases identifiers before
//! they reach these lookups.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Unit family of a quantity literal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum UnitKind {
    Percent,
    Distance,
    Speed,
    Pressure,
    Temperature,
    Duration,
}

impl UnitKind {
    /// Whether quantities of this kind may carry a negative magnitude.
    pub fn is_signed(self) -> bool {
        matches!(self, UnitKind::Temperature)
    }
}

impl fmt::Display for UnitKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            UnitKind::Percent => "percent",
            UnitKind::Distance => "distance",
            UnitKind::Speed => "speed",
            UnitKind::Pressure => "pressure",
            UnitKind::Temperature => "temperature",
            UnitKind::Duration => "duration",
        };
        f.write_str(name)
    }
}

macro_rules! unit_table {
    (
        $(#[$meta:meta])*
        $name:ident, $table:ident {
            $($variant:ident => $symbol:literal),+ $(,)?
        }
    ) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
        pub enum $name {
            $($variant),+
        }

        const $table: &[(&str, $name)] = &[
            $(($symbol, $name::$variant)),+
        ];

        impl $name {
            /// Look up a unit by its suffix text.
            pub fn lookup(suffix: &str) -> Option<Self> {
                $table
                    .iter()
                    .find(|(symbol, _)| *symbol == suffix)
                    .map(|(_, unit)| *unit)
            }

            /// Canonical suffix text for this unit.
            pub fn symbol(self) -> &'static str {
                match self {
                    $($name::$variant => $symbol),+
                }
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(self.symbol())
            }
        }
    };
}

unit_table! {
    /// Distance units.
    DistanceUnit, DISTANCE_UNITS {
        Meters => "m",
        Kilometers => "km",
        Miles => "mi",
        Feet => "ft",
        Yards => "yd",
        NauticalMiles => "nmi",
    }
}

unit_table! {
    /// Speed units.
    SpeedUnit, SPEED_UNITS {
        MilesPerHour => "mph",
        Kph => "kph",
        Kmh => "kmh",
        MetersPerSecond => "mps",
        Knots => "kn",
    }
}

unit_table! {
    /// Pressure units.
    PressureUnit, PRESSURE_UNITS {
        Pascal => "pa",
        Hectopascal => "hpa",
        Kilopascal => "kpa",
        Millibar => "mbar",
        Bar => "bar",
        Psi => "psi",
        InchesOfMercury => "inhg",
        Atmosphere => "atm",
    }
}

unit_table! {
    /// Temperature units.
    TemperatureUnit, TEMPERATURE_UNITS {
        Celsius => "c",
        Fahrenheit => "f",
        Kelvin => "k",
    }
}

/// Percent suffix, scanned as its own token.
pub const PERCENT_SUFFIX: &str = "%";

/// Unit membership predicates in classification order.
///
/// A suffix is tested against each predicate in turn; the first hit decides
/// the literal kind. Duration is not listed: it is the fallback for suffixes
/// that start with a duration component letter.
pub fn classify_suffix(suffix: &str) -> Option<UnitKind> {
    if suffix == PERCENT_SUFFIX {
        Some(UnitKind::Percent)
    } else if PressureUnit::lookup(suffix).is_some() {
        Some(UnitKind::Pressure)
    } else if DistanceUnit::lookup(suffix).is_some() {
        Some(UnitKind::Distance)
    } else if SpeedUnit::lookup(suffix).is_some() {
        Some(UnitKind::Speed)
    } else if TemperatureUnit::lookup(suffix).is_some() {
        Some(UnitKind::Temperature)
    } else if looks_like_duration(suffix) {
        Some(UnitKind::Duration)
    } else {
        None
    }
}

/// Duration heuristic: suffix starts with `h`, `m` or `s`.
pub fn looks_like_duration(suffix: &str) -> bool {
    matches!(suffix.chars().next(), Some('h' | 'm' | 's'))
}

/// A magnitude paired with a unit.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Quantity<U> {
    pub value: f64,
    pub unit: U,
}

impl<U> Quantity<U> {
    pub fn new(value: f64, unit: U) -> Self {
        Self { value, unit }
    }
}

impl<U: fmt::Display> fmt::Display for Quantity<U> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", format_magnitude(self.value), self.unit)
    }
}

/// Render a float so that it re-scans as a float literal.
///
/// Float literals always carry a `.` in the mantissa, so `1e-5` is written
/// as `1.0e-5`.
pub fn format_magnitude(value: f64) -> String {
    let text = format!("{:?}", value);
    match text.split_once('e') {
        Some((mantissa, exponent)) if !mantissa.contains('.') => {
            format!("{}.0e{}", mantissa, exponent)
        }
        Some(_) => text,
        None if text.contains('.') || !value.is_finite() => text,
        None => format!("{}.0", text),
    }
}

/// A non-negative duration with second resolution.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default, Serialize, Deserialize)]
pub struct Duration {
    pub seconds: u64,
}

const SECONDS_PER_MINUTE: u64 = 60;
const SECONDS_PER_HOUR: u64 = 60 * SECONDS_PER_MINUTE;

impl Duration {
    pub fn from_seconds(seconds: u64) -> Self {
        Self { seconds }
    }

    /// Parse a concatenated duration literal such as `1h30min15s`.
    ///
    /// Components must be integral, appear at most once, and come in
    /// hour, minute, second order. `m` and `min` both mean minutes.
    pub fn parse(text: &str) -> Result<Self, String> {
        let mut seconds: u64 = 0;
        let mut last_rank = 0u8;
        let mut rest = text;

        if rest.is_empty() {
            return Err("empty duration literal".to_string());
        }

        while !rest.is_empty() {
            let digits_len = rest.chars().take_while(|c| c.is_ascii_digit()).count();
            if digits_len == 0 {
                return Err(format!("expected digits in duration '{}'", text));
            }
            let (digits, tail) = rest.split_at(digits_len);
            let amount: u64 = digits
                .parse()
                .map_err(|_| format!("duration component '{}' is out of range", digits))?;

            let unit_len = tail.chars().take_while(|c| c.is_ascii_alphabetic()).count();
            let (unit, tail) = tail.split_at(unit_len);
            let (rank, scale) = match unit {
                "h" => (1, SECONDS_PER_HOUR),
                "m" | "min" => (2, SECONDS_PER_MINUTE),
                "s" => (3, 1),
                "" => return Err(format!("missing unit after '{}' in duration '{}'", digits, text)),
                other => return Err(format!("unknown duration unit '{}' in '{}'", other, text)),
            };
            if rank <= last_rank {
                return Err(format!("duration components out of order in '{}'", text));
            }
            last_rank = rank;

            seconds = amount
                .checked_mul(scale)
                .and_then(|s| seconds.checked_add(s))
                .ok_or_else(|| format!("duration '{}' is too large", text))?;
            rest = tail;
        }

        Ok(Self { seconds })
    }
}

impl fmt::Display for Duration {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let hours = self.seconds / SECONDS_PER_HOUR;
        let minutes = (self.seconds % SECONDS_PER_HOUR) / SECONDS_PER_MINUTE;
        let seconds = self.seconds % SECONDS_PER_MINUTE;

        if self.seconds == 0 {
            return f.write_str("0s");
        }
        if hours > 0 {
            write!(f, "{}h", hours)?;
        }
        if minutes > 0 {
            write!(f, "{}min", minutes)?;
        }
        if seconds > 0 {
            write!(f, "{}s", seconds)?;
        }
        Ok(())
    }
}
