use crate::scoring::domain::IndicatorId;
use serde::Deserialize;
use std::io::Read;

#[derive(Debug, Deserialize)]
struct OverrideRow {
    #[serde(rename = "indicator_id")]
    indicator_id: IndicatorId,
    #[serde(rename = "value")]
    value: f64,
}

pub(crate) fn parse_rows<R: Read>(reader: R) -> Result<Vec<(IndicatorId, f64)>, csv::Error> {
    let mut csv_reader = csv::ReaderBuilder::new()
        .trim(csv::Trim::All)
        .from_reader(reader);
    let mut rows = Vec::new();

    for record in csv_reader.deserialize::<OverrideRow>() {
        let row = record?;
        rows.push((row.indicator_id, row.value));
    }

    Ok(rows)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    #[test]
    fn parses_trimmed_rows() {
        let data = "indicator_id,value\n7, 320.5\n 14 ,2\n";
        let rows = parse_rows(Cursor::new(data)).expect("rows parse");
        assert_eq!(rows, vec![(7, 320.5), (14, 2.0)]);
    }

    #[test]
    fn rejects_non_numeric_values() {
        let data = "indicator_id,value\n7,not-a-number\n";
        assert!(parse_rows(Cursor::new(data)).is_err());
    }

    #[test]
    fn empty_input_yields_no_rows() {
        let rows = parse_rows(Cursor::new("indicator_id,value\n")).expect("header only parses");
        assert!(rows.is_empty());
    }
}
