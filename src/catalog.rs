//! Catalog loading: spreadsheet/CSV input and header normalization

use anyhow::{anyhow, Context, Result};
use calamine::{open_workbook_auto, Data, Reader};
use std::path::Path;

use crate::types::{Catalog, Wine};

// Localized column headers recognized in the source table. The first
// column is always the category column; the rest are matched by name.
const HEADER_WINE_NAME: &str = "Название";
const HEADER_GRAPE: &str = "Сорт";
const HEADER_PRICE: &str = "Цена";
const HEADER_IMG_URL: &str = "Картинка";
const HEADER_SPECIAL_OFFER: &str = "Акция";

/// Load a catalog file, dispatching on the file extension: `.csv` goes
/// through the CSV reader, everything else through calamine.
pub fn load_catalog(path: &Path) -> Result<Catalog> {
    let ext = path
        .extension()
        .and_then(|e| e.to_str())
        .map(|e| e.to_ascii_lowercase());
    match ext.as_deref() {
        Some("csv") => load_csv(path),
        _ => load_spreadsheet(path),
    }
}

fn load_csv(path: &Path) -> Result<Catalog> {
    let mut reader = csv::Reader::from_path(path)
        .with_context(|| format!("Failed to read catalog: {}", path.display()))?;
    let headers: Vec<String> = reader
        .headers()
        .with_context(|| format!("Failed to read header row of {}", path.display()))?
        .iter()
        .map(str::to_string)
        .collect();

    let mut records = Vec::new();
    for record in reader.records() {
        let record =
            record.with_context(|| format!("Malformed CSV record in {}", path.display()))?;
        records.push(record.iter().map(str::to_string).collect());
    }

    Ok(catalog_from_table(&headers, &records))
}

/// Reads the first worksheet; the first row is the header row.
fn load_spreadsheet(path: &Path) -> Result<Catalog> {
    let mut workbook = open_workbook_auto(path)
        .map_err(|e| anyhow!("Failed to open catalog {}: {}", path.display(), e))?;
    let range = workbook
        .worksheet_range_at(0)
        .ok_or_else(|| anyhow!("{}: workbook has no worksheets", path.display()))?
        .map_err(|e| anyhow!("Failed to read first worksheet of {}: {}", path.display(), e))?;

    let mut rows = range.rows();
    let headers: Vec<String> = match rows.next() {
        Some(row) => row.iter().map(cell_to_string).collect(),
        None => return Ok(Catalog::default()),
    };
    let records: Vec<Vec<String>> = rows
        .map(|row| row.iter().map(cell_to_string).collect())
        .collect();

    Ok(catalog_from_table(&headers, &records))
}

/// Build the typed catalog from a header row plus string records.
///
/// Normalization is total: every wine exposes all contract fields, with
/// absent columns yielding empty values. The category is taken from the
/// first column regardless of its header; distinct labels are collected
/// in order of first appearance, blanks included.
fn catalog_from_table(headers: &[String], records: &[Vec<String>]) -> Catalog {
    let column = |name: &str| headers.iter().position(|h| h.trim() == name);
    let name_col = column(HEADER_WINE_NAME);
    let grape_col = column(HEADER_GRAPE);
    let price_col = column(HEADER_PRICE);
    let img_col = column(HEADER_IMG_URL);
    let offer_col = column(HEADER_SPECIAL_OFFER);

    let field = |record: &[String], col: Option<usize>| -> String {
        col.and_then(|i| record.get(i)).cloned().unwrap_or_default()
    };

    let mut categories: Vec<String> = Vec::new();
    let mut wines = Vec::new();
    for record in records {
        let category = record.first().cloned().unwrap_or_default();
        if !categories.contains(&category) {
            categories.push(category.clone());
        }
        wines.push(Wine {
            wine_name: field(record, name_col),
            grape: field(record, grape_col),
            price: field(record, price_col),
            img_url: field(record, img_col),
            special_offer: is_truthy(&field(record, offer_col)),
            category,
        });
    }

    Catalog { categories, wines }
}

/// Blank cells become empty strings; whole floats drop the decimal point
/// (f64 Display already renders 1000.0 as "1000").
fn cell_to_string(cell: &Data) -> String {
    match cell {
        Data::Empty => String::new(),
        Data::String(s) => s.clone(),
        Data::Float(f) => f.to_string(),
        Data::Int(i) => i.to_string(),
        Data::Bool(b) => b.to_string(),
        other => other.to_string(),
    }
}

/// Empty, "0" and "false" cells mean no special offer; anything else is one.
fn is_truthy(value: &str) -> bool {
    let value = value.trim();
    !(value.is_empty() || value == "0" || value.eq_ignore_ascii_case("false"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use std::path::PathBuf;

    fn write_csv(dir: &tempfile::TempDir, name: &str, content: &str) -> PathBuf {
        let path = dir.path().join(name);
        fs::write(&path, content).unwrap();
        path
    }

    #[test]
    fn loads_csv_with_localized_headers() {
        let dir = tempfile::tempdir().unwrap();
        let path = write_csv(
            &dir,
            "wine.csv",
            "Категория,Название,Сорт,Цена,Картинка,Акция\n\
             Белые вина,Шардоне,Шардоне,399,chardonnay.png,\n\
             Красные вина,Кьянти,Санджовезе,499,chianti.png,Выгодное предложение\n\
             Белые вина,Рислинг,Рислинг,349,riesling.png,\n",
        );

        let catalog = load_catalog(&path).unwrap();
        assert_eq!(catalog.wines.len(), 3);
        assert_eq!(catalog.categories, vec!["Белые вина", "Красные вина"]);

        let chianti = &catalog.wines[1];
        assert_eq!(chianti.wine_name, "Кьянти");
        assert_eq!(chianti.grape, "Санджовезе");
        assert_eq!(chianti.price, "499");
        assert_eq!(chianti.img_url, "chianti.png");
        assert!(chianti.special_offer);
        assert!(!catalog.wines[0].special_offer);
    }

    #[test]
    fn first_column_is_the_category_column_regardless_of_header() {
        let dir = tempfile::tempdir().unwrap();
        let path = write_csv(
            &dir,
            "wine.csv",
            "Группа,Название\nНапитки,Чача\n",
        );

        let catalog = load_catalog(&path).unwrap();
        assert_eq!(catalog.categories, vec!["Напитки"]);
        assert_eq!(catalog.wines[0].category, "Напитки");
    }

    #[test]
    fn missing_columns_yield_empty_fields() {
        let dir = tempfile::tempdir().unwrap();
        let path = write_csv(&dir, "wine.csv", "Категория,Название\nНапитки,Чача\n");

        let catalog = load_catalog(&path).unwrap();
        let chacha = &catalog.wines[0];
        assert_eq!(chacha.grape, "");
        assert_eq!(chacha.price, "");
        assert_eq!(chacha.img_url, "");
        assert!(!chacha.special_offer);
    }

    #[test]
    fn blank_category_cells_form_an_empty_string_label() {
        let dir = tempfile::tempdir().unwrap();
        let path = write_csv(
            &dir,
            "wine.csv",
            "Категория,Название\n,Безымянное\nНапитки,Чача\n,Ещё одно\n",
        );

        let catalog = load_catalog(&path).unwrap();
        assert_eq!(catalog.categories, vec!["", "Напитки"]);
    }

    #[test]
    fn missing_file_is_a_fatal_error() {
        assert!(load_catalog(Path::new("no/such/file.csv")).is_err());
        assert!(load_catalog(Path::new("no/such/file.xlsx")).is_err());
    }

    #[test]
    fn cell_coercion() {
        assert_eq!(cell_to_string(&Data::Empty), "");
        assert_eq!(cell_to_string(&Data::String("Чача".to_string())), "Чача");
        assert_eq!(cell_to_string(&Data::Float(1000.0)), "1000");
        assert_eq!(cell_to_string(&Data::Float(12.5)), "12.5");
        assert_eq!(cell_to_string(&Data::Int(42)), "42");
        assert_eq!(cell_to_string(&Data::Bool(true)), "true");
    }

    #[test]
    fn special_offer_truthiness() {
        assert!(!is_truthy(""));
        assert!(!is_truthy("  "));
        assert!(!is_truthy("0"));
        assert!(!is_truthy("false"));
        assert!(!is_truthy("FALSE"));
        assert!(is_truthy("true"));
        assert!(is_truthy("Выгодное предложение"));
        assert!(is_truthy("1"));
    }
}
