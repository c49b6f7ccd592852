//! Классификация дат по периодам и статические ряды для графиков.
//!
//! Даты записей хранятся в виде `DD.MM.YYYY`. Перед разбором компоненты
//! переставляются в порядок `YYYY-MM-DD`, полученный день считается полуночью UTC.

use chrono::{DateTime, Duration, NaiveDate, Utc};

use super::error::DashboardError;

/// Скользящее окно для таблиц кликов, выплат и активности
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum PeriodWindow {
    Last7Days,
    Last30Days,
    #[default]
    AllTime,
}

impl PeriodWindow {
    pub const ALL: [PeriodWindow; 3] = [
        PeriodWindow::Last7Days,
        PeriodWindow::Last30Days,
        PeriodWindow::AllTime,
    ];

    pub fn key(&self) -> &'static str {
        match self {
            PeriodWindow::Last7Days => "7",
            PeriodWindow::Last30Days => "30",
            PeriodWindow::AllTime => "all",
        }
    }

    pub fn from_key(key: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|w| w.key() == key)
    }

    pub fn label(&self) -> &'static str {
        match self {
            PeriodWindow::Last7Days => "Последние 7 дней",
            PeriodWindow::Last30Days => "Последние 30 дней",
            PeriodWindow::AllTime => "Все время",
        }
    }

    pub fn days(&self) -> Option<i64> {
        match self {
            PeriodWindow::Last7Days => Some(7),
            PeriodWindow::Last30Days => Some(30),
            PeriodWindow::AllTime => None,
        }
    }
}

/// Период графика дохода на экране статистики
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum IncomePeriod {
    Day,
    Week,
    #[default]
    Month,
    Year,
}

impl IncomePeriod {
    pub const ALL: [IncomePeriod; 4] = [
        IncomePeriod::Day,
        IncomePeriod::Week,
        IncomePeriod::Month,
        IncomePeriod::Year,
    ];

    pub fn key(&self) -> &'static str {
        match self {
            IncomePeriod::Day => "day",
            IncomePeriod::Week => "week",
            IncomePeriod::Month => "month",
            IncomePeriod::Year => "year",
        }
    }

    pub fn from_key(key: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|p| p.key() == key)
    }

    pub fn label(&self) -> &'static str {
        match self {
            IncomePeriod::Day => "День",
            IncomePeriod::Week => "Неделя",
            IncomePeriod::Month => "Месяц",
            IncomePeriod::Year => "Год",
        }
    }
}

/// Parse `DD.MM.YYYY` into a calendar date
pub fn parse_ru_date(date_str: &str) -> Result<NaiveDate, DashboardError> {
    let parts: Vec<&str> = date_str.trim().split('.').collect();
    if parts.len() != 3 {
        return Err(DashboardError::Parse(date_str.to_string()));
    }
    let iso = parts.iter().rev().copied().collect::<Vec<_>>().join("-");
    NaiveDate::parse_from_str(&iso, "%Y-%m-%d")
        .map_err(|_| DashboardError::Parse(date_str.to_string()))
}

/// Попадает ли дата в окно: строго позже, чем `now` минус N дней.
/// Для `AllTime` дата не разбирается и всегда подходит.
pub fn classify_by_window(
    date_str: &str,
    window: PeriodWindow,
    now: DateTime<Utc>,
) -> Result<bool, DashboardError> {
    let Some(days) = window.days() else {
        return Ok(true);
    };
    let date = parse_ru_date(date_str)?;
    let start_of_day = date.and_hms_opt(0, 0, 0).map(|dt| dt.and_utc());
    let Some(start_of_day) = start_of_day else {
        return Err(DashboardError::Parse(date_str.to_string()));
    };
    Ok(start_of_day > now - Duration::days(days))
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ChartKind {
    Line,
    HorizontalBar,
}

/// Подготовленный ряд для поверхности отрисовки графиков
#[derive(Debug, Clone, PartialEq)]
pub struct ChartSeries {
    pub dataset_label: &'static str,
    pub kind: ChartKind,
    pub labels: Vec<String>,
    pub values: Vec<i64>,
}

impl ChartSeries {
    fn new(dataset_label: &'static str, kind: ChartKind, labels: &[&str], values: &[i64]) -> Self {
        Self {
            dataset_label,
            kind,
            labels: labels.iter().map(|l| l.to_string()).collect(),
            values: values.to_vec(),
        }
    }

    pub fn max_value(&self) -> i64 {
        self.values.iter().copied().max().unwrap_or(0)
    }
}

const INCOME_LABEL: &str = "Доход (₸)";

/// Доход за период; неизвестный ключ даёт помесячный ряд
pub fn income_series(key: &str) -> ChartSeries {
    match key {
        "day" => ChartSeries::new(INCOME_LABEL, ChartKind::Line, &["Пн", "Вт", "Ср"], &[10000, 15000, 12000]),
        "week" => ChartSeries::new(INCOME_LABEL, ChartKind::Line, &["Нед 1", "Нед 2", "Нед 3"], &[30000, 45000, 20000]),
        "year" => ChartSeries::new(INCOME_LABEL, ChartKind::Line, &["2023", "2024", "2025"], &[100000, 120000, 150000]),
        _ => ChartSeries::new(INCOME_LABEL, ChartKind::Line, &["Янв", "Фев", "Мар"], &[30000, 45000, 20000]),
    }
}

/// Клики по реферальной ссылке; неизвестный ключ даёт ряд "за всё время"
pub fn click_series(key: &str) -> ChartSeries {
    match key {
        "7" => ChartSeries::new("Клики", ChartKind::Line, &["День 1", "День 2", "День 7"], &[20, 30, 25]),
        "30" => ChartSeries::new("Клики", ChartKind::Line, &["Нед 1", "Нед 2", "Нед 4"], &[50, 60, 40]),
        _ => ChartSeries::new("Клики", ChartKind::Line, &["Янв", "Фев", "Мар"], &[80, 120, 150]),
    }
}

pub fn finance_series(key: &str) -> ChartSeries {
    match key {
        "7" => ChartSeries::new(INCOME_LABEL, ChartKind::Line, &["День 1", "День 2", "День 7"], &[10000, 15000, 12000]),
        "30" => ChartSeries::new(INCOME_LABEL, ChartKind::Line, &["Нед 1", "Нед 2", "Нед 4"], &[30000, 45000, 20000]),
        _ => ChartSeries::new(INCOME_LABEL, ChartKind::Line, &["Янв", "Фев", "Мар"], &[50000, 75000, 95000]),
    }
}

/// Воронка конверсии клики → регистрации → оплаты
pub fn funnel_series() -> ChartSeries {
    ChartSeries::new(
        "Воронка",
        ChartKind::HorizontalBar,
        &["Клики", "Регистрации", "Оплаты"],
        &[150, 42, 15],
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn now() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2025, 3, 10, 12, 0, 0).unwrap()
    }

    #[test]
    fn test_parse_ru_date() {
        assert_eq!(
            parse_ru_date("05.03.2025").unwrap(),
            NaiveDate::from_ymd_opt(2025, 3, 5).unwrap()
        );
        assert!(matches!(parse_ru_date("2025-03-05"), Err(DashboardError::Parse(_))));
        assert!(parse_ru_date("31.02.2025").is_err());
        assert!(parse_ru_date("").is_err());
    }

    #[test]
    fn test_window_boundaries() {
        // now - 7d = 03.03.2025 12:00, полночь 03.03 раньше границы
        assert!(!classify_by_window("03.03.2025", PeriodWindow::Last7Days, now()).unwrap());
        assert!(classify_by_window("04.03.2025", PeriodWindow::Last7Days, now()).unwrap());
        assert!(classify_by_window("10.02.2025", PeriodWindow::Last30Days, now()).unwrap());
        assert!(!classify_by_window("15.01.2025", PeriodWindow::Last30Days, now()).unwrap());
    }

    #[test]
    fn test_all_time_always_matches() {
        for date in ["01.01.1970", "05.03.2025", "31.12.2099"] {
            assert!(classify_by_window(date, PeriodWindow::AllTime, now()).unwrap());
        }
    }

    #[test]
    fn test_malformed_date_fails_for_rolling_window() {
        let result = classify_by_window("вчера", PeriodWindow::Last7Days, now());
        assert_eq!(result, Err(DashboardError::Parse("вчера".to_string())));
    }

    #[test]
    fn test_series_fallback() {
        assert_eq!(income_series("quarter"), income_series("month"));
        assert_eq!(income_series(""), income_series("month"));
        assert_eq!(click_series("90"), click_series("all"));
        assert_eq!(finance_series(""), finance_series("all"));
        assert_eq!(income_series("year").values, vec![100000, 120000, 150000]);
        assert_eq!(finance_series("all").values, vec![50000, 75000, 95000]);
    }

    #[test]
    fn test_period_keys() {
        assert_eq!(PeriodWindow::from_key("30"), Some(PeriodWindow::Last30Days));
        assert_eq!(PeriodWindow::from_key("90"), None);
        assert_eq!(IncomePeriod::from_key("week"), Some(IncomePeriod::Week));
        assert_eq!(IncomePeriod::default().key(), "month");
    }
}
