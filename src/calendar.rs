//! Month/year argument parsing and listing URL construction.
//!
//! The wallpaper page for a given month is published near the end of the
//! *preceding* month, so its URL path carries the previous month's year and
//! month while the slug names the target month.

use chrono::NaiveDate;
use thiserror::Error;

/// Earliest year for which the wallpaper archive exists.
pub const MIN_YEAR: i32 = 1999;

const MONTH_NAMES: [&str; 12] = [
    "january",
    "february",
    "march",
    "april",
    "may",
    "june",
    "july",
    "august",
    "september",
    "october",
    "november",
    "december",
];

/// Errors from parsing a `MMYYYY` month/year argument.
#[derive(Debug, Error)]
pub enum CalendarError {
    /// The input is not six digits forming a valid month and year.
    #[error("date must be in MMYYYY format, got {input:?}")]
    Format {
        /// The rejected input.
        input: String,
    },

    /// The year predates the wallpaper archive.
    #[error("minimal year is {MIN_YEAR}, got {year}")]
    YearTooEarly {
        /// The rejected year.
        year: i32,
    },
}

/// A validated month/year pair, parsed from `MMYYYY` (e.g. `102022`).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MonthYear {
    month: u32,
    year: i32,
}

impl MonthYear {
    /// Parses a `MMYYYY` string into a validated month/year.
    ///
    /// # Errors
    ///
    /// Returns [`CalendarError::Format`] for anything that is not six digits
    /// naming a real calendar month, and [`CalendarError::YearTooEarly`] for
    /// years before [`MIN_YEAR`].
    pub fn parse(input: &str) -> Result<Self, CalendarError> {
        let trimmed = input.trim();
        if trimmed.len() != 6 || !trimmed.bytes().all(|b| b.is_ascii_digit()) {
            return Err(CalendarError::Format {
                input: input.to_string(),
            });
        }

        let month: u32 = trimmed[..2].parse().map_err(|_| CalendarError::Format {
            input: input.to_string(),
        })?;
        let year: i32 = trimmed[2..].parse().map_err(|_| CalendarError::Format {
            input: input.to_string(),
        })?;

        if NaiveDate::from_ymd_opt(year, month, 1).is_none() {
            return Err(CalendarError::Format {
                input: input.to_string(),
            });
        }
        if year < MIN_YEAR {
            return Err(CalendarError::YearTooEarly { year });
        }

        Ok(Self { month, year })
    }

    /// Month number, 1 through 12.
    #[must_use]
    pub fn month(&self) -> u32 {
        self.month
    }

    /// Four-digit year.
    #[must_use]
    pub fn year(&self) -> i32 {
        self.year
    }

    /// Lower-cased English month name, as used in the page slug.
    #[must_use]
    pub fn month_name(&self) -> &'static str {
        MONTH_NAMES[self.month as usize - 1]
    }

    /// Builds the listing page URL for this month's wallpapers.
    ///
    /// The path year/month belong to the publication date (previous month);
    /// the slug names the wallpaper month itself.
    #[must_use]
    pub fn listing_url(&self) -> String {
        let (pub_year, pub_month) = if self.month == 1 {
            (self.year - 1, 12)
        } else {
            (self.year, self.month - 1)
        };
        format!(
            "https://www.smashingmagazine.com/{pub_year}/{pub_month:02}/desktop-wallpaper-calendars-{}-{}/",
            self.month_name(),
            self.year
        )
    }
}
