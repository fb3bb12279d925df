//! Calendar literal values: dates, times of day, weekdays and months.
//!
//! Constructors enforce the domain bounds; anything that reaches the AST is
//! already in range.

use serde::{Deserialize, Serialize};
use std::fmt;

pub const MIN_YEAR: u32 = 2022;
pub const MAX_YEAR: u32 = 2200;
pub const MAX_HOUR: u32 = 24;

/// A calendar date.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct Date {
    pub year: u32,
    pub month: u32,
    pub day: u32,
}

impl Date {
    /// Build a date, checking `year`, `month` and `day` against their bounds.
    pub fn new(year: u32, month: u32, day: u32) -> Result<Self, String> {
        if !(MIN_YEAR..=MAX_YEAR).contains(&year) {
            return Err(format!(
                "year {} out of range ({}-{})",
                year, MIN_YEAR, MAX_YEAR
            ));
        }
        if !(1..=12).contains(&month) {
            return Err(format!("month {} out of range (1-12)", month));
        }
        if !(1..=31).contains(&day) {
            return Err(format!("day {} out of range (1-31)", day));
        }
        Ok(Self { year, month, day })
    }
}

impl fmt::Display for Date {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:04}-{:02}-{:02}", self.year, self.month, self.day)
    }
}

/// A time of day. Seconds are optional in the source and default to zero.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct TimeOfDay {
    pub hour: u32,
    pub minute: u32,
    pub second: Option<u32>,
}

impl TimeOfDay {
    pub fn new(hour: u32, minute: u32, second: Option<u32>) -> Result<Self, String> {
        if hour > MAX_HOUR {
            return Err(format!("hour {} out of range (0-{})", hour, MAX_HOUR));
        }
        if minute > 59 {
            return Err(format!("minute {} out of range (0-59)", minute));
        }
        if let Some(second) = second
            && second > 59
        {
            return Err(format!("second {} out of range (0-59)", second));
        }
        Ok(Self {
            hour,
            minute,
            second,
        })
    }
}

impl fmt::Display for TimeOfDay {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:02}:{:02}", self.hour, self.minute)?;
        if let Some(second) = self.second {
            write!(f, ":{:02}", second)?;
        }
        Ok(())
    }
}

macro_rules! named_calendar_enum {
    (
        $(#[$meta:meta])*
        $name:ident, $table:ident {
            $($variant:ident => $short:literal, $long:literal),+ $(,)?
        }
    ) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
        pub enum $name {
            $($variant),+
        }

        const $table: &[(&str, &str, $name)] = &[
            $(($short, $long, $name::$variant)),+
        ];

        impl $name {
            /// Look up by short (`mon`) or long (`monday`) name.
            pub fn lookup(name: &str) -> Option<Self> {
                $table
                    .iter()
                    .find(|(short, long, _)| *short == name || *long == name)
                    .map(|(_, _, value)| *value)
            }

            /// Short name used when rendering.
            pub fn short_name(self) -> &'static str {
                match self {
                    $($name::$variant => $short),+
                }
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(self.short_name())
            }
        }
    };
}

named_calendar_enum! {
    /// Day of the week.
    Weekday, WEEKDAYS {
        Monday => "mon", "monday",
        Tuesday => "tue", "tuesday",
        Wednesday => "wed", "wednesday",
        Thursday => "thu", "thursday",
        Friday => "fri", "friday",
        Saturday => "sat", "saturday",
        Sunday => "sun", "sunday",
    }
}

named_calendar_enum! {
    /// Month of the year.
    Month, MONTHS {
        January => "jan", "january",
        February => "feb", "february",
        March => "mar", "march",
        April => "apr", "april",
        May => "may", "may",
        June => "jun", "june",
        July => "jul", "july",
        August => "aug", "august",
        September => "sep", "september",
        October => "oct", "october",
        November => "nov", "november",
        December => "dec", "december",
    }
}

impl Month {
    /// Month from its 1-based number.
    pub fn from_number(number: i64) -> Result<Self, String> {
        usize::try_from(number)
            .ok()
            .and_then(|n| n.checked_sub(1))
            .and_then(|idx| MONTHS.get(idx))
            .map(|(_, _, month)| *month)
            .ok_or_else(|| format!("month {} out of range (1-12)", number))
    }
}

/// Body of a calendar literal: either a list of values or one inclusive range.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum CalendarSet<T> {
    List(Vec<T>),
    Range(T, T),
}

impl<T: fmt::Display> fmt::Display for CalendarSet<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CalendarSet::List(values) => {
                for (i, value) in values.iter().enumerate() {
                    if i > 0 {
                        f.write_str(", ")?;
                    }
                    write!(f, "{}", value)?;
                }
                Ok(())
            }
            CalendarSet::Range(low, high) => write!(f, "{}..{}", low, high),
        }
    }
}
