//! 生成日期窗口

use chrono::{Datelike, Days, NaiveDate};
use salesgen_config::WindowConfig;
use salesgen_errors::{AppError, AppResult};

/// 生成覆盖的日期范围
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DateWindow {
    /// 今天及之前的 `days - 1` 天，按从新到旧排列
    Trailing { days: u32 },
    /// 指定年份的 1 月 1 日到 12 月 31 日
    CalendarYear { year: i32 },
}

impl DateWindow {
    pub fn from_config(config: WindowConfig) -> AppResult<Self> {
        match config {
            WindowConfig::Trailing { days: 0 } => {
                Err(AppError::validation("trailing window needs at least one day"))
            }
            WindowConfig::Trailing { days } => Ok(Self::Trailing { days }),
            WindowConfig::CalendarYear { year } => {
                if NaiveDate::from_ymd_opt(year, 1, 1).is_none()
                    || NaiveDate::from_ymd_opt(year, 12, 31).is_none()
                {
                    return Err(AppError::validation(format!(
                        "year {} is not representable",
                        year
                    )));
                }
                Ok(Self::CalendarYear { year })
            }
        }
    }

    /// 窗口内的全部日期，按生成顺序排列
    pub fn dates(&self, today: NaiveDate) -> Vec<NaiveDate> {
        match *self {
            Self::Trailing { days } => (0..u64::from(days))
                .filter_map(|offset| today.checked_sub_days(Days::new(offset)))
                .collect(),
            Self::CalendarYear { year } => NaiveDate::from_ymd_opt(year, 1, 1)
                .into_iter()
                .flat_map(|first| first.iter_days())
                .take_while(|date| date.year() == year)
                .collect(),
        }
    }

    /// 窗口的首尾日期（闭区间）
    pub fn bounds(&self, today: NaiveDate) -> Option<(NaiveDate, NaiveDate)> {
        match *self {
            Self::Trailing { days } => {
                let first = today.checked_sub_days(Days::new(u64::from(days.saturating_sub(1))))?;
                Some((first, today))
            }
            Self::CalendarYear { year } => Some((
                NaiveDate::from_ymd_opt(year, 1, 1)?,
                NaiveDate::from_ymd_opt(year, 12, 31)?,
            )),
        }
    }

    pub fn contains(&self, date: NaiveDate, today: NaiveDate) -> bool {
        self.bounds(today)
            .is_some_and(|(first, last)| first <= date && date <= last)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ymd(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn test_trailing_window_newest_first() {
        let window = DateWindow::Trailing { days: 30 };
        let dates = window.dates(ymd(2024, 3, 10));

        assert_eq!(dates.len(), 30);
        assert_eq!(dates[0], ymd(2024, 3, 10));
        assert_eq!(dates[29], ymd(2024, 2, 10));
        assert_eq!(window.bounds(ymd(2024, 3, 10)), Some((ymd(2024, 2, 10), ymd(2024, 3, 10))));
    }

    #[test]
    fn test_leap_year_has_366_days() {
        let window = DateWindow::CalendarYear { year: 2024 };
        let dates = window.dates(ymd(2030, 6, 1));

        assert_eq!(dates.len(), 366);
        assert_eq!(dates.first(), Some(&ymd(2024, 1, 1)));
        assert_eq!(dates.last(), Some(&ymd(2024, 12, 31)));
        assert!(dates.windows(2).all(|pair| pair[0] < pair[1]));
    }

    #[test]
    fn test_common_year_has_365_days() {
        let window = DateWindow::CalendarYear { year: 2023 };
        assert_eq!(window.dates(ymd(2024, 1, 1)).len(), 365);
    }

    #[test]
    fn test_contains() {
        let window = DateWindow::CalendarYear { year: 2024 };
        let today = ymd(2025, 1, 1);

        assert!(window.contains(ymd(2024, 1, 1), today));
        assert!(window.contains(ymd(2024, 12, 31), today));
        assert!(!window.contains(ymd(2025, 1, 1), today));
    }

    #[test]
    fn test_from_config_rejects_empty_trailing() {
        assert!(DateWindow::from_config(WindowConfig::Trailing { days: 0 }).is_err());
        assert_eq!(
            DateWindow::from_config(WindowConfig::CalendarYear { year: 2024 }).unwrap(),
            DateWindow::CalendarYear { year: 2024 }
        );
    }
}
