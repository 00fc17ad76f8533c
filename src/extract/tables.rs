use crate::extract::{in_stripped_subtree, visible_text};
use scraper::{Html, Selector};
use serde::Serialize;

/// One `<table>` flattened into headers, rows, and a caption
///
/// `headers` collects every `<th>` in the table regardless of which row it
/// appears in; `rows` keep `<td>` and `<th>` cells mixed in document order.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TableRecord {
    pub headers: Vec<String>,
    pub rows: Vec<Vec<String>>,
    pub caption: String,
}

/// Extracts all table records from the document
pub fn extract_tables(document: &Html) -> Vec<TableRecord> {
    let (Ok(table_selector), Ok(caption_selector), Ok(th_selector), Ok(tr_selector), Ok(cell_selector)) = (
        Selector::parse("table"),
        Selector::parse("caption"),
        Selector::parse("th"),
        Selector::parse("tr"),
        Selector::parse("td, th"),
    ) else {
        return Vec::new();
    };

    document
        .select(&table_selector)
        .filter(|el| !in_stripped_subtree(el))
        .map(|table| {
            let caption = table
                .select(&caption_selector)
                .next()
                .map(|c| visible_text(&c).trim().to_string())
                .unwrap_or_default();

            let headers = table
                .select(&th_selector)
                .map(|th| visible_text(&th).trim().to_string())
                .collect();

            let rows = table
                .select(&tr_selector)
                .filter_map(|row| {
                    let cells: Vec<String> = row
                        .select(&cell_selector)
                        .map(|cell| visible_text(&cell).trim().to_string())
                        .collect();

                    // Rows that produce no cells (e.g. bare <tr></tr>) are
                    // dropped
                    if cells.is_empty() {
                        None
                    } else {
                        Some(cells)
                    }
                })
                .collect();

            TableRecord {
                headers,
                rows,
                caption,
            }
        })
        .collect()
}
