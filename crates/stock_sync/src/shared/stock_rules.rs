//! Правила расчёта остатков и цен по файлу поставщика.
//!
//! Правила фиксированы и не настраиваются:
//! * количество `">10"` выгружается как 100;
//! * количество `"1"` выгружается как 0 (последний экземпляр не продаётся);
//! * цена берётся до первой точки, все нецифровые символы отбрасываются.

use std::collections::HashSet;

use chrono::{DateTime, Utc};
use contracts::domain::inventory::{InventoryRecord, PriceUpdate, StockUpdate};

use super::error::{SyncError, SyncResult};

const MANY_MARKER: &str = ">10";
const MANY_QUANTITY: i64 = 100;

/// Нормализовать количество из файла остатков
pub fn normalize_quantity(raw: &str) -> SyncResult<i64> {
    let raw = raw.trim();
    match raw {
        MANY_MARKER => Ok(MANY_QUANTITY),
        "1" => Ok(0),
        other => other
            .parse::<i64>()
            .map_err(|_| SyncError::data(format!("invalid quantity '{}'", other))),
    }
}

/// Нормализовать цену вида `5'990.00 руб.` в целые рубли.
/// Дробная часть отсекается, а не округляется.
pub fn normalize_price(raw: &str) -> SyncResult<i64> {
    let integer_part = raw.split('.').next().unwrap_or_default();
    let digits: String = integer_part
        .chars()
        .filter(|c| c.is_ascii_digit())
        .collect();
    digits
        .parse::<i64>()
        .map_err(|_| SyncError::data(format!("invalid price '{}'", raw)))
}

/// Результат расчёта остатков
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StockUpdates {
    pub items: Vec<StockUpdate>,
    /// Сколько предложений найдено в файле; остальные обнулены
    pub matched: usize,
}

impl StockUpdates {
    pub fn zero_filled(&self) -> usize {
        self.items.len() - self.matched
    }

    pub fn in_stock(&self) -> usize {
        self.items.iter().filter(|s| s.is_in_stock()).count()
    }
}

/// Остатки для всех известных маркетплейсу предложений.
///
/// Сначала строки файла, найденные в каталоге (в порядке файла, повтор кода
/// пропускается), затем остальные предложения каталога с нулевым остатком
/// (в порядке каталога). Каждое предложение каталога встречается ровно один раз.
pub fn build_stock_updates(
    records: &[InventoryRecord],
    known_offer_ids: &[String],
    updated_at: DateTime<Utc>,
) -> SyncResult<StockUpdates> {
    let known: HashSet<&str> = known_offer_ids.iter().map(String::as_str).collect();
    let mut emitted: HashSet<&str> = HashSet::with_capacity(known.len());
    let mut items = Vec::with_capacity(known.len());

    for record in records {
        let code = record.code.as_str();
        if !known.contains(code) || !emitted.insert(code) {
            continue;
        }
        items.push(StockUpdate {
            offer_id: code.to_string(),
            quantity: normalize_quantity(&record.quantity_raw)?,
            updated_at,
        });
    }
    let matched = items.len();

    for offer_id in known_offer_ids {
        if emitted.insert(offer_id.as_str()) {
            items.push(StockUpdate {
                offer_id: offer_id.clone(),
                quantity: 0,
                updated_at,
            });
        }
    }

    Ok(StockUpdates { items, matched })
}

/// Цены только для строк файла, найденных в каталоге. Предложения без строки
/// в файле цену не получают.
pub fn build_price_updates(
    records: &[InventoryRecord],
    known_offer_ids: &[String],
) -> SyncResult<Vec<PriceUpdate>> {
    let known: HashSet<&str> = known_offer_ids.iter().map(String::as_str).collect();

    records
        .iter()
        .filter(|record| known.contains(record.code.as_str()))
        .map(|record| {
            Ok(PriceUpdate {
                offer_id: record.code.clone(),
                value: normalize_price(&record.price_raw)?,
            })
        })
        .collect()
}
