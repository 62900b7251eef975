//! 时间工具函数
//!
//! 所有日期→时间戳转换统一在 API handler 层完成，
//! repository 层只接收 `i64` Unix millis。

use chrono::NaiveDate;

use super::{AppError, AppResult};

/// 解析日期字符串 (YYYY-MM-DD)
pub fn parse_date(date: &str) -> AppResult<NaiveDate> {
    NaiveDate::parse_from_str(date, "%Y-%m-%d")
        .map_err(|_| AppError::validation(format!("Invalid date format: {}", date)))
}

/// 日期开始 (00:00:00 UTC) → Unix millis
pub fn day_start_millis(date: NaiveDate) -> i64 {
    date.and_hms_opt(0, 0, 0)
        .unwrap_or_default()
        .and_utc()
        .timestamp_millis()
}

/// 日期结束 → 次日 00:00:00 的 Unix millis
///
/// 返回次日零点时间戳，调用方使用 `< end` (不含) 语义。
pub fn day_end_millis(date: NaiveDate) -> i64 {
    let next_day = date.succ_opt().unwrap_or(date);
    day_start_millis(next_day)
}

/// 解析日期并返回当日 [start, end) millis 区间
pub fn day_range_millis(date: &str) -> AppResult<(i64, i64)> {
    let parsed = parse_date(date)?;
    Ok((day_start_millis(parsed), day_end_millis(parsed)))
}

/// 日期结束 (23:59:59.999) → Unix millis，用于"含当日"的有效期边界
pub fn end_of_day_millis(date: NaiveDate) -> i64 {
    day_end_millis(date) - 1
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_date_valid() {
        let d = parse_date("2025-03-01").unwrap();
        assert_eq!(d.to_string(), "2025-03-01");
    }

    #[test]
    fn test_parse_date_invalid() {
        assert!(parse_date("01/03/2025").is_err());
        assert!(parse_date("not-a-date").is_err());
    }

    #[test]
    fn test_day_range_spans_24_hours() {
        let (start, end) = day_range_millis("2025-03-01").unwrap();
        assert_eq!(end - start, 24 * 60 * 60 * 1000);
    }

    #[test]
    fn test_end_of_day_is_last_milli() {
        let d = parse_date("2025-03-01").unwrap();
        assert_eq!(end_of_day_millis(d), day_end_millis(d) - 1);
        assert_eq!(end_of_day_millis(d) - day_start_millis(d), 24 * 3600 * 1000 - 1);
    }
}
