// ==========================================
// 库存运营看板 - 数据清洗器实现
// ==========================================
// 职责: 文本裁剪 / 数值兜底 / 日期归一化 / 工作表名归一化
// 红线: 解析失败一律降级（日期 → 空，数值 → 默认值），不报错
// ==========================================

use crate::domain::sheet::CellValue;
use chrono::{DateTime, Datelike, NaiveDate, NaiveDateTime, Utc};
use regex::Regex;
use std::sync::OnceLock;

/// 日 / 月 / 年 兜底格式（日在前，两位年份视为 20xx）
fn day_first_regex() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| {
        Regex::new(r"^(\d{1,2})[/.\-](\d{1,2})[/.\-](\d{2,4})$").expect("日期正则必须合法")
    })
}

/// 月 / 日 / 两位年份（分隔符为 / 或 -，前后一致）
fn month_first_short_year_regex() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| {
        Regex::new(r"^(\d{1,2})([/\-])(\d{1,2})([/\-])(\d{2})$").expect("日期正则必须合法")
    })
}

/// 两位年份: 00-49 → 20xx，50-99 → 19xx
fn expand_short_year(year: i32) -> i32 {
    if year < 50 {
        2000 + year
    } else {
        1900 + year
    }
}

// 通用解析器尝试的纯日期格式（按顺序）
const DATE_FORMATS: &[&str] = &[
    "%Y-%m-%d",
    "%Y/%m/%d",
    "%m/%d/%Y",
    "%m-%d-%Y",
    "%b %d %Y",
    "%b %d, %Y",
    "%B %d %Y",
    "%B %d, %Y",
    "%d %b %Y",
    "%d %B %Y",
];

// 通用解析器尝试的日期时间格式
const DATETIME_FORMATS: &[&str] = &[
    "%Y-%m-%dT%H:%M:%S%.f",
    "%Y-%m-%dT%H:%M:%S",
    "%Y-%m-%dT%H:%M",
    "%Y-%m-%d %H:%M:%S%.f",
    "%Y-%m-%d %H:%M:%S",
    "%Y-%m-%d %H:%M",
    "%Y/%m/%d %H:%M:%S",
    "%m/%d/%Y %H:%M:%S",
    "%m/%d/%Y %H:%M",
];

pub struct DataCleaner;

impl DataCleaner {
    /// 单元格文本（去首尾空白）
    pub fn text(value: &CellValue) -> String {
        value.to_string().trim().to_string()
    }

    /// 数值转换
    ///
    /// # 规则
    /// - 数字原样返回（NaN → 默认值）
    /// - 布尔: true → 1，false → 0
    /// - 空文本 → 0；无法解析的文本 → 默认值
    /// - 日期单元格 → 默认值
    pub fn to_number(value: &CellValue, default: f64) -> f64 {
        match value {
            CellValue::Number(n) if n.is_finite() => *n,
            CellValue::Number(_) => default,
            CellValue::Bool(b) => {
                if *b {
                    1.0
                } else {
                    0.0
                }
            }
            CellValue::Date(_) => default,
            CellValue::Text(s) => {
                let trimmed = s.trim();
                if trimmed.is_empty() {
                    return 0.0;
                }
                match trimmed.replace(',', "").parse::<f64>() {
                    Ok(n) if n.is_finite() => n,
                    _ => default,
                }
            }
        }
    }

    /// 日期归一化
    ///
    /// # 规则
    /// - 日期单元格 → 取日期部分
    /// - 文本先走通用解析器，再走日在前的正则兜底
    /// - 数字与布尔不视为日期
    pub fn to_date(value: &CellValue) -> Option<NaiveDate> {
        match value {
            CellValue::Date(dt) => Some(dt.date()),
            CellValue::Text(s) => {
                let trimmed = s.trim();
                if trimmed.is_empty() {
                    return None;
                }
                Self::parse_general(trimmed).or_else(|| Self::parse_day_first(trimmed))
            }
            CellValue::Number(_) | CellValue::Bool(_) => None,
        }
    }

    /// 日期归一化为 `YYYY-MM-DD`，无法解析时返回空串
    pub fn to_date_only(value: &CellValue) -> String {
        Self::to_date(value)
            .map(|d| d.format("%Y-%m-%d").to_string())
            .unwrap_or_default()
    }

    /// 工作表 / 文件名归一化: 小写 + 只保留 [a-z0-9]
    pub fn normalize_sheet_key(name: &str) -> String {
        name.to_lowercase()
            .chars()
            .filter(|c| c.is_ascii_lowercase() || c.is_ascii_digit())
            .collect()
    }

    fn parse_general(s: &str) -> Option<NaiveDate> {
        // 四位年份格式里 %Y 会把 "25" 读成公元 25 年，两位年份单独处理
        let plausible = |d: NaiveDate| {
            if d.year() >= 100 {
                Some(d)
            } else {
                None
            }
        };

        if let Ok(dt) = DateTime::parse_from_rfc3339(s) {
            return plausible(dt.with_timezone(&Utc).date_naive());
        }
        let from_datetime = DATETIME_FORMATS
            .iter()
            .filter_map(|fmt| NaiveDateTime::parse_from_str(s, fmt).ok())
            .find_map(|dt| plausible(dt.date()));
        if from_datetime.is_some() {
            return from_datetime;
        }
        DATE_FORMATS
            .iter()
            .filter_map(|fmt| NaiveDate::parse_from_str(s, fmt).ok())
            .find_map(plausible)
            .or_else(|| Self::parse_month_first_short_year(s))
    }

    fn parse_month_first_short_year(s: &str) -> Option<NaiveDate> {
        let caps = month_first_short_year_regex().captures(s)?;
        if caps.get(2)?.as_str() != caps.get(4)?.as_str() {
            return None;
        }
        let month: u32 = caps.get(1)?.as_str().parse().ok()?;
        let day: u32 = caps.get(3)?.as_str().parse().ok()?;
        let year: i32 = caps.get(5)?.as_str().parse().ok()?;
        NaiveDate::from_ymd_opt(expand_short_year(year), month, day)
    }

    fn parse_day_first(s: &str) -> Option<NaiveDate> {
        let caps = day_first_regex().captures(s)?;
        let day: u32 = caps.get(1)?.as_str().parse().ok()?;
        let month: u32 = caps.get(2)?.as_str().parse().ok()?;
        let year_raw = caps.get(3)?.as_str();
        let mut year: i32 = year_raw.parse().ok()?;
        if year_raw.len() == 2 {
            year += 2000;
        }
        NaiveDate::from_ymd_opt(year, month, day)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn text(s: &str) -> CellValue {
        CellValue::from(s)
    }

    #[test]
    fn test_to_number_rules() {
        assert_eq!(DataCleaner::to_number(&CellValue::Number(76.0), 0.0), 76.0);
        assert_eq!(DataCleaner::to_number(&text(" 12.5 "), 0.0), 12.5);
        assert_eq!(DataCleaner::to_number(&text("1,200"), 0.0), 1200.0);
        assert_eq!(DataCleaner::to_number(&text(""), 7.0), 0.0);
        assert_eq!(DataCleaner::to_number(&text("n/a"), 7.0), 7.0);
        assert_eq!(DataCleaner::to_number(&CellValue::Bool(true), 0.0), 1.0);
    }

    #[test]
    fn test_date_only_iso_round_trip() {
        assert_eq!(DataCleaner::to_date_only(&text("2025-10-20")), "2025-10-20");
        assert_eq!(
            DataCleaner::to_date_only(&text("2025-10-20T08:30:00")),
            "2025-10-20"
        );
        assert_eq!(
            DataCleaner::to_date_only(&text("2025-10-20T23:30:00Z")),
            "2025-10-20"
        );
    }

    #[test]
    fn test_date_only_month_first_general_formats() {
        assert_eq!(DataCleaner::to_date_only(&text("2025/10/05")), "2025-10-05");
        assert_eq!(DataCleaner::to_date_only(&text("10/05/2025")), "2025-10-05");
        assert_eq!(DataCleaner::to_date_only(&text("Oct 5 2025")), "2025-10-05");
    }

    #[test]
    fn test_date_only_day_first_fallback() {
        // 月份 > 12，通用解析失败后走日在前兜底
        assert_eq!(DataCleaner::to_date_only(&text("25/10/2025")), "2025-10-25");
        assert_eq!(DataCleaner::to_date_only(&text("25.10.25")), "2025-10-25");
        assert_eq!(DataCleaner::to_date_only(&text("25/10/25")), "2025-10-25");
    }

    #[test]
    fn test_date_only_short_year_reads_month_first() {
        assert_eq!(DataCleaner::to_date_only(&text("5-11-25")), "2025-05-11");
        assert_eq!(
            DataCleaner::to_date_only(&text("03/04/25")),
            DataCleaner::to_date_only(&text("03/04/2025"))
        );
        assert_eq!(DataCleaner::to_date_only(&text("03/04/25")), "2025-03-04");
        assert_eq!(DataCleaner::to_date_only(&text("12/31/99")), "1999-12-31");
    }

    #[test]
    fn test_date_only_invalid_inputs() {
        assert_eq!(DataCleaner::to_date_only(&text("")), "");
        assert_eq!(DataCleaner::to_date_only(&text("not a date")), "");
        assert_eq!(DataCleaner::to_date_only(&text("31/02/2025")), "");
        assert_eq!(DataCleaner::to_date_only(&CellValue::Number(45000.0)), "");
    }

    #[test]
    fn test_date_only_native_date() {
        let dt = NaiveDate::from_ymd_opt(2025, 10, 14)
            .unwrap()
            .and_hms_opt(0, 0, 0)
            .unwrap();
        assert_eq!(DataCleaner::to_date_only(&CellValue::Date(dt)), "2025-10-14");
    }

    #[test]
    fn test_normalize_sheet_key() {
        assert_eq!(DataCleaner::normalize_sheet_key("PO_Combined"), "pocombined");
        assert_eq!(DataCleaner::normalize_sheet_key("Finished Goods"), "finishedgoods");
        assert_eq!(DataCleaner::normalize_sheet_key(" F-G "), "fg");
    }
}
