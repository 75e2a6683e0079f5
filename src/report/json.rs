use serde_json::{Map, Value, json};

use super::CatalogReport;

/// Pretty JSON with a stable key order.
pub fn format_json(report: &CatalogReport) -> String {
    let mut by_kind = Map::new();
    for (kind, count) in report.missing_by_kind() {
        by_kind.insert(kind.to_string(), json!(count));
    }

    let missing: Vec<Value> = report
        .missing
        .iter()
        .map(|m| {
            json!({
                "key": m.key,
                "kind": m.kind,
                "file": m.file_path,
                "line": m.line,
                "fuzzy": m.fuzzy,
            })
        })
        .collect();

    let value = json!({
        "module": report.module_name,
        "language": report.language,
        "catalog": report.catalog_path,
        "catalogExists": report.catalog_exists,
        "statistics": {
            "totalActive": report.stats.total_active,
            "translated": report.stats.translated,
            "fuzzy": report.stats.fuzzy,
            "empty": report.stats.empty,
            "obsolete": report.stats.obsolete,
            "missing": report.stats.missing(),
            "completionPercent": round2(report.stats.completion_percent),
        },
        "missingByKind": Value::Object(by_kind),
        "missing": missing,
    });

    let mut out = serde_json::to_string_pretty(&value).unwrap_or_default();
    out.push('\n');
    out
}

fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}
