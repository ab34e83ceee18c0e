use serde_json::{Map, Value};
use std::io;

/// Write output as CSV to stdout.
pub fn print_csv(value: &Value) -> Result<(), csv::Error> {
    write_csv(io::stdout().lock(), value)
}

/// Calculator envelopes become `field,value` pairs from their `result`;
/// radar rankings and market histories become one row per entry.
pub fn write_csv<W: io::Write>(out: W, value: &Value) -> Result<(), csv::Error> {
    let mut wtr = csv::Writer::from_writer(out);

    match value {
        Value::Object(map) => match (map.get("result"), map.get("history")) {
            (Some(Value::Object(result)), _) => write_pairs(&mut wtr, result)?,
            (Some(Value::Array(rows)), _) | (None, Some(Value::Array(rows))) => {
                write_rows(&mut wtr, rows)?
            }
            _ => write_pairs(&mut wtr, map)?,
        },
        Value::Array(rows) => write_rows(&mut wtr, rows)?,
        scalar => wtr.write_record([cell(scalar)])?,
    }

    wtr.flush()?;
    Ok(())
}

fn write_pairs<W: io::Write>(
    wtr: &mut csv::Writer<W>,
    fields: &Map<String, Value>,
) -> Result<(), csv::Error> {
    wtr.write_record(["field", "value"])?;
    for (name, val) in fields {
        wtr.write_record([name.clone(), cell(val)])?;
    }
    Ok(())
}

fn write_rows<W: io::Write>(wtr: &mut csv::Writer<W>, rows: &[Value]) -> Result<(), csv::Error> {
    let Some(Value::Object(first)) = rows.first() else {
        for row in rows {
            wtr.write_record([cell(row)])?;
        }
        return Ok(());
    };

    let columns: Vec<&String> = first.keys().collect();
    wtr.write_record(&columns)?;
    for row in rows.iter().filter_map(Value::as_object) {
        wtr.write_record(
            columns
                .iter()
                .map(|col| row.get(*col).map(cell).unwrap_or_default()),
        )?;
    }
    Ok(())
}

fn cell(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        Value::Null => String::new(),
        Value::Number(_) | Value::Bool(_) => value.to_string(),
        nested => serde_json::to_string(nested).unwrap_or_default(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn render(value: &Value) -> String {
        let mut buf = Vec::new();
        write_csv(&mut buf, value).unwrap();
        String::from_utf8(buf).unwrap()
    }

    #[test]
    fn test_envelope_result_as_pairs() {
        let out = render(&json!({
            "result": { "tax_amount": "50.00", "regime": "Second-category income tax" },
            "warnings": []
        }));
        assert_eq!(
            out,
            "field,value\nregime,Second-category income tax\ntax_amount,50.00\n"
        );
    }

    #[test]
    fn test_history_as_rows() {
        let out = render(&json!({
            "pair": "USD/PEN",
            "history": [
                { "day": 1, "rate": "3.75" },
                { "day": 2, "rate": "3.76" }
            ]
        }));
        assert_eq!(out, "day,rate\n1,3.75\n2,3.76\n");
    }

    #[test]
    fn test_write_error_is_returned() {
        struct Closed;
        impl io::Write for Closed {
            fn write(&mut self, _: &[u8]) -> io::Result<usize> {
                Err(io::Error::new(io::ErrorKind::BrokenPipe, "closed"))
            }
            fn flush(&mut self) -> io::Result<()> {
                Err(io::Error::new(io::ErrorKind::BrokenPipe, "closed"))
            }
        }
        assert!(write_csv(Closed, &json!({ "result": { "a": 1 } })).is_err());
    }
}
