use serde::{Deserialize, Serialize};

use super::YearMonth;

pub const DEFAULT_START_YEAR: i32 = 2026;
pub const DEFAULT_YEARS: u32 = 4;
pub const DEFAULT_MONTH_WIDTH: i32 = 30;

/// Accepted range for the number of years on the roadmap.
pub const YEARS_RANGE: (u32, u32) = (1, 50);
/// Accepted range for the pixel width of one month cell.
pub const MONTH_WIDTH_RANGE: (i32, i32) = (4, 200);

/// The fixed multi-year calendar the roadmap is drawn on, and the one place
/// that converts between month tokens and horizontal pixel offsets.
///
/// All offsets are integer pixels measured from the left edge of January of
/// `start_year`. Every month is exactly `month_width` pixels wide, so the
/// header cells, the bars and the drag snapping all share one grid.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "WindowFields")]
pub struct CalendarWindow {
    start_year: i32,
    years: u32,
    month_width: i32,
}

/// Unchecked serialized form, passed through [`CalendarWindow::new`].
#[derive(Deserialize)]
struct WindowFields {
    start_year: i32,
    years: u32,
    month_width: i32,
}

impl From<WindowFields> for CalendarWindow {
    fn from(f: WindowFields) -> Self {
        Self::new(f.start_year, f.years, f.month_width)
    }
}

impl Default for CalendarWindow {
    fn default() -> Self {
        Self::new(DEFAULT_START_YEAR, DEFAULT_YEARS, DEFAULT_MONTH_WIDTH)
    }
}

impl CalendarWindow {
    /// `years` and `month_width` are clamped into [`YEARS_RANGE`] and
    /// [`MONTH_WIDTH_RANGE`], which keeps every pixel offset inside `i32`.
    pub fn new(start_year: i32, years: u32, month_width: i32) -> Self {
        Self {
            start_year,
            years: years.clamp(YEARS_RANGE.0, YEARS_RANGE.1),
            month_width: month_width.clamp(MONTH_WIDTH_RANGE.0, MONTH_WIDTH_RANGE.1),
        }
    }

    pub fn start_year(&self) -> i32 {
        self.start_year
    }

    pub fn end_year(&self) -> i32 {
        self.start_year + self.years as i32 - 1
    }

    pub fn years(&self) -> u32 {
        self.years
    }

    pub fn month_width(&self) -> i32 {
        self.month_width
    }

    pub fn total_months(&self) -> i64 {
        self.years as i64 * 12
    }

    /// Width of the whole timeline in pixels.
    pub fn total_width(&self) -> i32 {
        self.total_months() as i32 * self.month_width
    }

    pub fn first_month(&self) -> YearMonth {
        YearMonth::from_month_index(self.start_year, 0)
    }

    pub fn last_month(&self) -> YearMonth {
        YearMonth::from_month_index(self.start_year, self.total_months() - 1)
    }

    pub fn contains(&self, token: YearMonth) -> bool {
        (0..self.total_months()).contains(&token.month_index(self.start_year))
    }

    /// Pull an out-of-window token onto the nearest edge month.
    pub fn clamp(&self, token: YearMonth) -> YearMonth {
        token.clamp(self.first_month(), self.last_month())
    }

    /// Left pixel offset of `token`'s month cell. Tokens outside the window
    /// land on the nearest edge cell.
    pub fn to_pixel(&self, token: YearMonth) -> i32 {
        let index = token
            .month_index(self.start_year)
            .clamp(0, self.total_months() - 1);
        index as i32 * self.month_width
    }

    /// Month whose cell boundary is nearest to `offset`; halves round up.
    pub fn to_token(&self, offset: i32) -> YearMonth {
        let index = (self.round_months(offset) as i64).clamp(0, self.total_months() - 1);
        YearMonth::from_month_index(self.start_year, index)
    }

    /// Snap a raw pixel value onto the nearest month boundary.
    pub fn snap(&self, offset: i32) -> i32 {
        self.round_months(offset) * self.month_width
    }

    /// On-screen width of the inclusive range `[start, end]`. The end month
    /// counts as a full cell, so a single-month range is one cell wide.
    pub fn bar_width(&self, start: YearMonth, end: YearMonth) -> i32 {
        (self.to_pixel(end) - self.to_pixel(start) + self.month_width).max(self.month_width)
    }

    /// Every month of the window in order.
    pub fn months(&self) -> impl Iterator<Item = YearMonth> + '_ {
        (0..self.total_months()).map(move |i| YearMonth::from_month_index(self.start_year, i))
    }

    /// `offset / month_width` rounded half-up, in integer arithmetic.
    fn round_months(&self, offset: i32) -> i32 {
        let w = self.month_width as i64;
        (2 * offset as i64 + w).div_euclid(2 * w) as i32
    }
}
