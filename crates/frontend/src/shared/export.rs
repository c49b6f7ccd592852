//! Выгрузка таблиц дашборда в текстовый файл с разделителями
use wasm_bindgen::JsCast;
use web_sys::{Blob, BlobPropertyBag, HtmlAnchorElement, Url};

/// Файлы выгрузки. Имена с расширением таблицы, содержимое при этом CSV.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ExportFile {
    Referrals,
    ReferralStats,
    FinanceStats,
}

impl ExportFile {
    pub fn filename(&self) -> &'static str {
        match self {
            ExportFile::Referrals => "referrals.xlsx",
            ExportFile::ReferralStats => "referral_stats.xlsx",
            ExportFile::FinanceStats => "finance_stats.xlsx",
        }
    }

    pub fn header(&self) -> &'static [&'static str] {
        match self {
            ExportFile::Referrals => &["ID", "Тариф", "Сумма", "Дата", "Статус", "Источник"],
            ExportFile::ReferralStats => &["Дата клика", "Источник", "Уникальный", "Результат"],
            ExportFile::FinanceStats => &["Дата", "Сумма", "Статус"],
        }
    }
}

/// Заголовок и строки через запятую, строки через перевод строки.
/// Значения не экранируются.
pub fn to_delimited_text<T, F>(header: &[&str], records: &[T], mapper: F) -> String
where
    F: Fn(&T) -> Vec<String>,
{
    let mut lines = Vec::with_capacity(records.len() + 1);
    lines.push(header.join(","));
    for record in records {
        lines.push(mapper(record).join(","));
    }
    lines.join("\n")
}

/// Отдаёт текст браузеру как скачиваемый файл
pub fn download_text(content: &str, filename: &str) -> Result<(), String> {
    let blob = create_csv_blob(content)?;
    download_blob(&blob, filename)
}

fn create_csv_blob(content: &str) -> Result<Blob, String> {
    let array = js_sys::Array::new();
    array.push(&wasm_bindgen::JsValue::from_str(content));

    let properties = BlobPropertyBag::new();
    properties.set_type("text/csv;charset=utf-8;");

    Blob::new_with_str_sequence_and_options(&array, &properties)
        .map_err(|e| format!("Failed to create blob: {:?}", e))
}

fn download_blob(blob: &Blob, filename: &str) -> Result<(), String> {
    let window = web_sys::window().ok_or("No window object")?;
    let document = window.document().ok_or("No document object")?;

    let url = Url::create_object_url_with_blob(blob)
        .map_err(|e| format!("Failed to create object URL: {:?}", e))?;

    let anchor = document
        .create_element("a")
        .map_err(|e| format!("Failed to create anchor: {:?}", e))?
        .dyn_into::<HtmlAnchorElement>()
        .map_err(|e| format!("Failed to cast to anchor: {:?}", e))?;

    anchor.set_href(&url);
    anchor.set_download(filename);
    anchor
        .style()
        .set_property("display", "none")
        .map_err(|e| format!("Failed to set style: {:?}", e))?;

    let body = document.body().ok_or("No body element")?;
    body.append_child(&anchor)
        .map_err(|e| format!("Failed to append anchor: {:?}", e))?;
    anchor.click();
    body.remove_child(&anchor)
        .map_err(|e| format!("Failed to remove anchor: {:?}", e))?;

    Url::revoke_object_url(&url).map_err(|e| format!("Failed to revoke URL: {:?}", e))?;

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_lines_match_records() {
        let records = vec![("05.03.2025", "20,000 ₸"), ("03.03.2025", "15,000 ₸")];
        let text = to_delimited_text(&["Дата", "Сумма"], &records, |(d, a)| {
            vec![d.to_string(), a.to_string()]
        });
        let lines: Vec<&str> = text.split('\n').collect();
        assert_eq!(lines.len(), records.len() + 1);
        assert_eq!(lines[0], "Дата,Сумма");
        // Запятая внутри суммы не экранируется
        assert_eq!(lines[1], "05.03.2025,20,000 ₸");
    }

    #[test]
    fn test_empty_records_give_header_only() {
        let records: Vec<String> = Vec::new();
        let text = to_delimited_text(ExportFile::FinanceStats.header(), &records, |r| {
            vec![r.clone()]
        });
        assert_eq!(text, "Дата,Сумма,Статус");
    }

    #[test]
    fn test_filenames_keep_spreadsheet_extension() {
        assert_eq!(ExportFile::Referrals.filename(), "referrals.xlsx");
        assert_eq!(ExportFile::ReferralStats.filename(), "referral_stats.xlsx");
        assert_eq!(ExportFile::FinanceStats.filename(), "finance_stats.xlsx");
        assert_eq!(
            ExportFile::Referrals.header().join(","),
            "ID,Тариф,Сумма,Дата,Статус,Источник"
        );
    }
}
