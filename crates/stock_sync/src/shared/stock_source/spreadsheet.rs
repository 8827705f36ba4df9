use std::io::Cursor;

use calamine::{open_workbook_auto_from_rs, Data, Reader};
use contracts::domain::inventory::InventoryRecord;

use crate::shared::error::{SyncError, SyncResult};

pub const CODE_COLUMN: &str = "Код";
pub const QUANTITY_COLUMN: &str = "Количество";
pub const PRICE_COLUMN: &str = "Цена";

/// Разобрать первый лист таблицы (xls или xlsx) из памяти
pub fn parse_inventory(bytes: Vec<u8>, header_row: usize) -> SyncResult<Vec<InventoryRecord>> {
    let mut workbook = open_workbook_auto_from_rs(Cursor::new(bytes))?;
    let range = workbook
        .worksheet_range_at(0)
        .ok_or_else(|| SyncError::data("spreadsheet has no sheets"))??;

    // Range начинается с первой непустой ячейки, а номер заголовка задан от начала листа
    let first_row = range.start().map(|(row, _)| row as usize).unwrap_or(0);
    records_from_rows(range.rows(), first_row, header_row)
}

/// Построить записи из строк листа. `first_row` — абсолютный номер первой строки.
pub fn records_from_rows<'a, I>(
    rows: I,
    first_row: usize,
    header_row: usize,
) -> SyncResult<Vec<InventoryRecord>>
where
    I: IntoIterator<Item = &'a [Data]>,
{
    let mut rows = rows
        .into_iter()
        .skip(header_row.saturating_sub(first_row));

    let header = rows
        .next()
        .ok_or_else(|| SyncError::data(format!("header row {} not found", header_row)))?;
    let columns = Columns::locate(header)?;

    let mut records = Vec::new();
    for row in rows {
        let code = cell_text(row.get(columns.code));
        if code.is_empty() {
            continue;
        }
        records.push(InventoryRecord {
            code,
            quantity_raw: cell_text(row.get(columns.quantity)),
            price_raw: cell_text(row.get(columns.price)),
        });
    }
    Ok(records)
}

struct Columns {
    code: usize,
    quantity: usize,
    price: usize,
}

impl Columns {
    fn locate(header: &[Data]) -> SyncResult<Self> {
        let names: Vec<String> = header.iter().map(|cell| cell_text(Some(cell))).collect();
        let find = |wanted: &str| {
            names
                .iter()
                .position(|name| name == wanted)
                .ok_or_else(|| {
                    SyncError::data(format!(
                        "column '{}' not found in header [{}]",
                        wanted,
                        names.join(", ")
                    ))
                })
        };
        Ok(Self {
            code: find(CODE_COLUMN)?,
            quantity: find(QUANTITY_COLUMN)?,
            price: find(PRICE_COLUMN)?,
        })
    }
}

/// Текст ячейки; целые числа без дробной части (`12345.0` -> `12345`)
fn cell_text(cell: Option<&Data>) -> String {
    match cell {
        None | Some(Data::Empty) => String::new(),
        Some(Data::String(s)) => s.trim().to_string(),
        Some(Data::Float(f)) if f.fract() == 0.0 && f.abs() < 1e15 => format!("{}", *f as i64),
        Some(other) => other.to_string().trim().to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn s(value: &str) -> Data {
        Data::String(value.to_string())
    }

    fn sheet(preamble: usize) -> Vec<Vec<Data>> {
        let mut rows: Vec<Vec<Data>> = (0..preamble)
            .map(|i| vec![s(&format!("шапка {}", i))])
            .collect();
        rows.push(vec![
            s("Наименование"),
            s(" Код "),
            s("Количество"),
            s("Цена"),
        ]);
        rows.push(vec![
            s("Часы A"),
            Data::Float(12345.0),
            s(">10"),
            s("5'990.00 руб."),
        ]);
        rows.push(vec![s("Итого"), Data::Empty, Data::Empty, Data::Empty]);
        rows.push(vec![
            s("Часы B"),
            s("B-1"),
            Data::Int(3),
            Data::Float(1200.5),
        ]);
        rows.push(vec![s("Часы C"), s("C-1")]);
        rows
    }

    fn parse(rows: &[Vec<Data>], first_row: usize, header_row: usize) -> SyncResult<Vec<InventoryRecord>> {
        records_from_rows(rows.iter().map(Vec::as_slice), first_row, header_row)
    }

    #[test]
    fn test_rows_after_header_offset() {
        let rows = sheet(17);
        let records = parse(&rows, 0, 17).unwrap();
        assert_eq!(
            records,
            vec![
                InventoryRecord::new("12345", ">10", "5'990.00 руб."),
                InventoryRecord::new("B-1", "3", "1200.5"),
                InventoryRecord::new("C-1", "", ""),
            ]
        );
    }

    #[test]
    fn test_range_not_starting_at_first_row() {
        // Первые 5 строк листа пустые, calamine начинает range с шестой
        let rows = sheet(12);
        let records = parse(&rows, 5, 17).unwrap();
        assert_eq!(records.len(), 3);
        assert_eq!(records[0].code, "12345");
    }

    #[test]
    fn test_missing_column() {
        let rows = vec![vec![s("Код"), s("Количество")], vec![s("A"), s("1")]];
        let err = parse(&rows, 0, 0).unwrap_err();
        assert!(err.to_string().contains("Цена"));
    }

    #[test]
    fn test_header_beyond_sheet() {
        let rows = sheet(2);
        let err = parse(&rows, 0, 40).unwrap_err();
        assert!(matches!(err, SyncError::Data(_)));
    }

    #[test]
    fn test_garbage_bytes_are_data_error() {
        let err = parse_inventory(b"not a workbook".to_vec(), 17).unwrap_err();
        assert!(matches!(err, SyncError::Data(_)));
    }

    #[test]
    fn test_parse_workbook_with_offset_range() {
        // Лист начинается с B3, заголовок в 18-й строке листа
        let bytes = include_bytes!(concat!(
            env!("CARGO_MANIFEST_DIR"),
            "/tests/fixtures/ostatki.xlsx"
        ));
        let records = parse_inventory(bytes.to_vec(), 17).unwrap();
        assert_eq!(
            records,
            vec![
                InventoryRecord::new("12345", ">10", "5 990.00"),
                InventoryRecord::new("B-1", "3", "1200.5"),
                InventoryRecord::new("C-1", "1", "990"),
            ]
        );
    }
}
