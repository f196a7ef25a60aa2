//! Rendering of record lists.
//!
//! Pure functions from a slice of records to display output: an HTML list
//! fragment, plain text for the terminal, or JSON.

use maud::{html, Markup, PreEscaped};

use crate::config::DisplayConfig;
use crate::escape::escape;
use crate::error::Result;
use crate::record::Record;

/// Value to display for a field, treating empty text as absent.
fn shown<'a>(value: Option<&'a str>, fallback: &'a str) -> &'a str {
    match value {
        Some(v) if !v.is_empty() => v,
        _ => fallback,
    }
}

/// Render records as the `<ul id="dataList">` fragment.
///
/// Each field is escaped before insertion. An empty slice renders a single
/// placeholder item.
#[must_use]
pub fn render_list(records: &[Record], display: &DisplayConfig) -> Markup {
    html! {
        ul id="dataList" {
            @if records.is_empty() {
                li { em { (display.empty_message) } }
            } @else {
                @for record in records {
                    (render_item(record, display))
                }
            }
        }
    }
}

fn render_item(record: &Record, display: &DisplayConfig) -> Markup {
    let field = |value: &str| PreEscaped(escape(value));
    html! {
        li {
            strong { "Nombre:" } " " (field(record.nombre().unwrap_or_default())) br;
            strong { "Email:" } " " (field(record.email().unwrap_or_default())) br;
            strong { "Interés:" } " " (field(shown(record.interes(), &display.unspecified_interest))) br;
            strong { "Mensaje:" } " " (field(shown(record.mensaje(), &display.no_message)))
        }
    }
}

/// Render records as plain text, one block per record.
#[must_use]
pub fn render_plain(records: &[Record], display: &DisplayConfig) -> String {
    if records.is_empty() {
        return format!("{}\n", display.empty_message);
    }

    let mut out = String::new();
    for (i, record) in records.iter().enumerate() {
        if i > 0 {
            out.push('\n');
        }
        out.push_str(&format!(
            "Nombre:  {}\nEmail:   {}\nInterés: {}\nMensaje: {}\n",
            record.nombre().unwrap_or_default(),
            record.email().unwrap_or_default(),
            shown(record.interes(), &display.unspecified_interest),
            shown(record.mensaje(), &display.no_message),
        ));
    }
    out
}

/// Render records as a pretty-printed JSON array, extra fields included.
///
/// # Errors
///
/// Returns an error if serialization fails.
pub fn render_json(records: &[Record]) -> Result<String> {
    Ok(serde_json::to_string_pretty(records)?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::record::{EMAIL, INTERES, MENSAJE, NOMBRE};

    fn display() -> DisplayConfig {
        DisplayConfig::default()
    }

    #[test]
    fn test_empty_list_placeholder() {
        let html = render_list(&[], &display()).into_string();
        assert_eq!(
            html,
            "<ul id=\"dataList\"><li><em>No hay datos disponibles.</em></li></ul>"
        );
    }

    #[test]
    fn test_one_item_per_record() {
        let records = vec![
            Record::new().with(NOMBRE, "Ana"),
            Record::new().with(NOMBRE, "Bob"),
        ];
        let html = render_list(&records, &display()).into_string();
        assert_eq!(html.matches("<li>").count(), 2);
        assert!(html.find("Ana").unwrap() < html.find("Bob").unwrap());
    }

    #[test]
    fn test_fields_are_escaped() {
        let record = Record::new()
            .with(NOMBRE, "<b>x</b>")
            .with(EMAIL, "a&b@example.com")
            .with(INTERES, "<i>misa</i>")
            .with(MENSAJE, "<script>alert(1)</script>");
        let html = render_list(&[record], &display()).into_string();

        assert!(html.contains("&lt;b&gt;x&lt;/b&gt;"));
        assert!(html.contains("a&amp;b@example.com"));
        assert!(html.contains("&lt;i&gt;misa&lt;/i&gt;"));
        assert!(!html.contains("<b>"));
        assert!(!html.contains("<script>"));
    }

    #[test]
    fn test_fallbacks_for_missing_fields() {
        let record = Record::new().with(NOMBRE, "Ana").with(EMAIL, "ana@x.org");
        let html = render_list(&[record], &display()).into_string();
        assert!(html.contains("No especificado"));
        assert!(html.contains("Sin mensaje"));
    }

    #[test]
    fn test_empty_strings_fall_back() {
        let record = Record::new().with(INTERES, "").with(MENSAJE, "");
        let text = render_plain(&[record], &display());
        assert!(text.contains("Interés: No especificado"));
        assert!(text.contains("Mensaje: Sin mensaje"));
    }

    #[test]
    fn test_extra_fields_not_displayed() {
        let record = Record::new().with(NOMBRE, "Ana").with("telefono", "555-0100");
        let html = render_list(&[record.clone()], &display()).into_string();
        assert!(!html.contains("555-0100"));
        assert!(!render_plain(&[record], &display()).contains("555-0100"));
    }

    #[test]
    fn test_custom_display_strings() {
        let custom = DisplayConfig {
            empty_message: "Nothing yet".to_string(),
            unspecified_interest: "n/a".to_string(),
            no_message: "-".to_string(),
        };
        assert_eq!(render_plain(&[], &custom), "Nothing yet\n");
        let text = render_plain(&[Record::new().with(NOMBRE, "Ana")], &custom);
        assert!(text.contains("Interés: n/a"));
        assert!(text.contains("Mensaje: -"));
    }

    #[test]
    fn test_plain_separates_records() {
        let records = vec![
            Record::new().with(NOMBRE, "Ana"),
            Record::new().with(NOMBRE, "Bob"),
        ];
        let text = render_plain(&records, &display());
        assert!(text.contains("Nombre:  Ana\n"));
        assert!(text.contains("\n\nNombre:  Bob\n"));
    }

    #[test]
    fn test_render_json_keeps_extra_fields() {
        let records = vec![Record::new().with(NOMBRE, "Ana").with("telefono", "1")];
        let json = render_json(&records).unwrap();
        let value: serde_json::Value = serde_json::from_str(&json).unwrap();
        assert_eq!(value[0]["telefono"], "1");
    }
}
