use super::CatalogReport;

const HEADER: [&str; 5] = ["file", "line", "kind", "fuzzy", "msgid"];

/// Missing entries as CSV, one record each, in report order.
pub fn format_csv(report: &CatalogReport) -> String {
    write_csv(report)
        .map(|bytes| String::from_utf8_lossy(&bytes).into_owned())
        .unwrap_or_default()
}

fn write_csv(report: &CatalogReport) -> csv::Result<Vec<u8>> {
    let mut wtr = csv::Writer::from_writer(Vec::new());
    wtr.write_record(HEADER)?;

    for entry in &report.missing {
        let line = entry.line.to_string();
        let kind = entry.kind.to_string();
        let fuzzy = entry.fuzzy.to_string();
        wtr.write_record([
            entry.file_path.as_deref().unwrap_or(""),
            line.as_str(),
            kind.as_str(),
            fuzzy.as_str(),
            entry.key.as_str(),
        ])?;
    }

    wtr.into_inner().map_err(|e| e.into_error().into())
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;
    use crate::{
        core::data::Catalog,
        report::test_support::{entry, sample_catalog},
    };

    #[test]
    fn test_format_csv() {
        let report = CatalogReport::new("sale", "ar", "i18n/ar.po", true, &sample_catalog());
        let csv = format_csv(&report);
        let lines: Vec<&str> = csv.lines().collect();
        assert_eq!(lines.len(), 5);
        assert_eq!(lines[0], "file,line,kind,fuzzy,msgid");
        assert_eq!(lines[1], "static/src/js/a.js,1,script-call,true,Review 0");
        assert_eq!(lines[4], "views/sale.xml,4,markup-attribute,false,Status");
    }

    #[test]
    fn test_keys_with_quotes_and_newlines_survive() {
        let catalog = Catalog {
            header: None,
            entries: vec![entry("Say \"hi\"\nthen leave", "", "a.py", 3)],
        };
        let report = CatalogReport::new("m", "fr", "fr.po", false, &catalog);
        let csv = format_csv(&report);

        let mut reader = csv::Reader::from_reader(csv.as_bytes());
        let records: Vec<csv::StringRecord> = reader.records().map(|r| r.unwrap()).collect();
        assert_eq!(records.len(), 1);
        assert_eq!(&records[0][0], "a.py");
        assert_eq!(&records[0][2], "imperative-call");
        assert_eq!(&records[0][4], "Say \"hi\"\nthen leave");
    }
}
