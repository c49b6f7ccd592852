//! Сводные показатели разделов. Часть значений считается по живым данным,
//! остальные являются фиксированными ориентирами. Порядок строк важен для отображения.

use contracts::domain::a003_finance_entry::FinanceEntry;
use contracts::domain::a004_promo_code::PROMO_CODE_LIMIT;
use contracts::domain::common::{format_tenge, parse_tenge, strip_currency};

use super::state::{Collections, Section, REFERRAL_LINK};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MetricRow {
    pub label: &'static str,
    pub value: String,
}

fn row(label: &'static str, value: impl Into<String>) -> MetricRow {
    MetricRow {
        label,
        value: value.into(),
    }
}

/// Таблица метрик в разделе "Статистика"
pub fn dashboard_metric_rows() -> Vec<MetricRow> {
    vec![
        row("Кликов по ссылке", "150"),
        row("Регистраций", "42 (28% от кликов)"),
        row("Оплат", "15 (35.7% от регистраций)"),
        row("Общая конверсия (клики → оплаты)", "10%"),
        row("Доход от регистраций", format_tenge(30_000)),
        row("Доход от покупок", format_tenge(120_000)),
        row("Средний доход на оплату", format_tenge(10_000)),
        row("Среднее время до оплаты", "3 дня"),
        row(
            "Доход по месяцам",
            format!("Фев ({}), Янв ({})", format_tenge(120_000), format_tenge(100_000)),
        ),
        row("Прогноз дохода за месяц", format_tenge(180_000)),
        row("Сравнение с прошлым", "+20% к доходу"),
    ]
}

/// Общая статистика в разделе "Реферальная ссылка"
pub fn referral_overview_rows() -> Vec<MetricRow> {
    vec![
        row("Общее количество переходов", "150"),
        row("Количество оплаченных подписок", "15"),
        row("Конверсия в регистрации", "28%"),
        row("Конверсия в оплаты", "10%"),
    ]
}

/// Сумма всех ожидающих выплат. Нераспознанные суммы пропускаются.
pub fn pending_total(entries: &[FinanceEntry]) -> i64 {
    entries
        .iter()
        .filter(|e| e.is_pending())
        .filter_map(|e| parse_tenge(&e.amount))
        .sum()
}

/// Параметры раздела "Финансы"; "В обработке" считается по ожидающим выплатам
pub fn finance_metric_rows(entries: &[FinanceEntry]) -> Vec<MetricRow> {
    vec![
        row("Доступно для вывода", format_tenge(50_000)),
        row("В обработке", format_tenge(pending_total(entries))),
        row("Заблокировано", format_tenge(0)),
        row("Общий доход", format_tenge(200_000)),
        row("Доход за месяц", format_tenge(150_000)),
        row("Прогноз дохода за месяц", format_tenge(180_000)),
        row("Средний доход на реферала", format_tenge(10_000)),
    ]
}

/// Есть ли ожидающий запрос на вывод в отфильтрованной по периоду истории
pub fn has_pending_withdrawal(filtered_finance: &[FinanceEntry]) -> bool {
    filtered_finance.iter().any(FinanceEntry::is_pending)
}

/// Строка списка отмены: значение выбора это сумма без символа валюты
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PendingWithdrawal {
    pub date: String,
    pub amount: String,
    pub value: String,
}

pub fn pending_withdrawals(filtered_finance: &[FinanceEntry]) -> Vec<PendingWithdrawal> {
    filtered_finance
        .iter()
        .filter(|e| e.is_pending())
        .map(|e| PendingWithdrawal {
            date: e.date.clone(),
            amount: e.amount.clone(),
            value: strip_currency(&e.amount).to_string(),
        })
        .collect()
}

pub fn promo_quota_caption(count: usize) -> String {
    format!("Создано {}/{} промокодов", count, PROMO_CODE_LIMIT)
}

/// Карточка на главном экране
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DashboardCard {
    pub section: Section,
    pub icon: &'static str,
    pub lines: Vec<String>,
}

impl DashboardCard {
    pub fn title(&self) -> &'static str {
        self.section.title()
    }
}

fn card(section: Section, icon: &'static str, lines: Vec<String>) -> DashboardCard {
    DashboardCard {
        section,
        icon,
        lines,
    }
}

pub fn dashboard_cards(collections: &Collections) -> Vec<DashboardCard> {
    vec![
        card(
            Section::Statistics,
            "fa-chart-line",
            vec![
                format!("Общий доход: {}", format_tenge(150_000)),
                "Рефералов: 42".to_string(),
            ],
        ),
        card(Section::ReferralLink, "fa-link", vec![REFERRAL_LINK.to_string()]),
        card(
            Section::Finance,
            "fa-wallet",
            vec![format!("Доступно: {}", format_tenge(50_000))],
        ),
        card(Section::Support, "fa-headset", vec!["Свяжитесь с нами".to_string()]),
        card(
            Section::PromoCodes,
            "fa-ticket-alt",
            vec![
                "Управление и статистика".to_string(),
                promo_quota_caption(collections.promo_codes.len()),
            ],
        ),
        card(
            Section::Activity,
            "fa-history",
            vec![format!("Действия рефералов: {}", collections.activity_data.len())],
        ),
        card(Section::Settings, "fa-cog", vec!["Управление профилем".to_string()]),
        card(Section::Training, "fa-book", vec!["Полезные материалы".to_string()]),
    ]
}
