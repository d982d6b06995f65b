//! Pre-filtering of rows whose text value is missing.

use crate::models::Row;

use super::Table;

/// Field values read as missing, in addition to the empty string.
///
/// These are the NA markers common dataframe loaders recognise by default, so
/// an exported `NaN` or `NULL` headline is dropped instead of annotated.
pub const DEFAULT_NA_VALUES: &[&str] = &[
    "#N/A", "#N/A N/A", "#NA", "-1.#IND", "-1.#QNAN", "-NaN", "-nan", "1.#IND", "1.#QNAN", "<NA>",
    "N/A", "NA", "NULL", "NaN", "None", "n/a", "nan", "null",
];

/// Whether a raw field value counts as missing.
pub fn is_missing(value: &str, default_na_values: bool) -> bool {
    value.is_empty() || (default_na_values && DEFAULT_NA_VALUES.contains(&value))
}

/// Keep present values with their original positions, preserving order.
///
/// `None` models a field absent from the record altogether.
pub fn present_values<'a, I>(values: I, default_na_values: bool) -> Vec<(usize, &'a str)>
where
    I: IntoIterator<Item = Option<&'a str>>,
{
    values
        .into_iter()
        .enumerate()
        .filter_map(|(index, value)| match value {
            Some(v) if !is_missing(v, default_na_values) => Some((index, v)),
            _ => None,
        })
        .collect()
}

/// Turn the records of `table` into rows, dropping those whose `column`
/// value is missing. Survivors keep their relative order.
pub fn drop_missing(table: &Table, column: usize, default_na_values: bool) -> Vec<Row> {
    let values = table
        .records()
        .iter()
        .map(|record| record.get(column).map(String::as_str));

    present_values(values, default_na_values)
        .into_iter()
        .map(|(source_index, text)| Row {
            source_index,
            text: text.to_string(),
            record: table.records()[source_index]
                .iter()
                .map(|field| {
                    if is_missing(field, default_na_values) {
                        None
                    } else {
                        Some(field.clone())
                    }
                })
                .collect(),
        })
        .collect()
}
