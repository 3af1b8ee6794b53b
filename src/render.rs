//! HTML table rendering for weather observations

use std::fmt::Write;

use crate::models::ObservationRecord;

const CELL_STYLE: &str = "padding: 8px; border: 1px solid #ddd;";
const HEADER_STYLE: &str = "padding: 8px; border: 1px solid #ddd; text-align: left;";
const HEADERS: [&str; 5] = [
    "State / City",
    "Temperature",
    "Condition",
    "Humidity",
    "Wind Speed",
];

/// Render observations as an inline-styled HTML table.
///
/// Columns are city, temperature, condition, humidity and wind, one row per
/// record in input order. The output depends only on the input.
#[must_use]
pub fn render_weather_table(records: &[ObservationRecord]) -> String {
    let mut html = String::from("<table style=\"width:100%; border-collapse: collapse;\">\n");

    html.push_str("  <thead>\n    <tr style=\"background-color: #FBC02D;\">\n");
    for header in HEADERS {
        let _ = writeln!(html, "      <th style=\"{HEADER_STYLE}\">{header}</th>");
    }
    html.push_str("    </tr>\n  </thead>\n  <tbody>\n");

    for record in records {
        html.push_str("    <tr>\n");
        for cell in [
            &record.city,
            &record.temperature,
            &record.condition,
            &record.humidity,
            &record.wind_speed,
        ] {
            let _ = writeln!(
                html,
                "      <td style=\"{CELL_STYLE}\">{}</td>",
                escape_html(cell)
            );
        }
        html.push_str("    </tr>\n");
    }

    html.push_str("  </tbody>\n</table>");
    html
}

fn escape_html(text: &str) -> String {
    let mut escaped = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            _ => escaped.push(c),
        }
    }
    escaped
}

#[cfg(test)]
mod tests {
    use super::*;

    fn records() -> Vec<ObservationRecord> {
        vec![
            ObservationRecord::from_measurements("Delhi", 24.6, 48.0, 45, 6.8),
            ObservationRecord::from_measurements("Mumbai", 31.2, 70.0, 2, 14.1),
            ObservationRecord::from_measurements("Chennai", 29.0, 81.0, 61, 18.4),
        ]
    }

    #[test]
    fn test_row_count_matches_records() {
        let html = render_weather_table(&records());
        assert_eq!(html.matches("<tr>").count(), 3);
        assert_eq!(html.matches("<th ").count(), 5);
        assert_eq!(html.matches("<td ").count(), 15);
    }

    #[test]
    fn test_rendering_is_deterministic() {
        assert_eq!(render_weather_table(&records()), render_weather_table(&records()));
    }

    #[test]
    fn test_column_and_row_order() {
        let html = render_weather_table(&records());
        let delhi = html.find("Delhi").unwrap();
        let mumbai = html.find("Mumbai").unwrap();
        let chennai = html.find("Chennai").unwrap();
        assert!(delhi < mumbai && mumbai < chennai);

        let row = &html[delhi..mumbai];
        let temperature = row.find("24.6°C").unwrap();
        let condition = row.find("Fog").unwrap();
        let humidity = row.find("48%").unwrap();
        let wind = row.find("6.8 km/h").unwrap();
        assert!(temperature < condition && condition < humidity && humidity < wind);
    }

    #[test]
    fn test_empty_input_renders_header_only() {
        let html = render_weather_table(&[]);
        assert!(html.contains("State / City"));
        assert!(!html.contains("<tr>"));
    }

    #[test]
    fn test_blank_and_special_cells() {
        let record = ObservationRecord {
            city: "Dadra & Nagar <Haveli>".to_string(),
            temperature: String::new(),
            humidity: String::new(),
            wind_speed: String::new(),
            condition: String::new(),
        };
        let html = render_weather_table(&[record]);
        assert!(html.contains("Dadra &amp; Nagar &lt;Haveli&gt;"));
        assert_eq!(html.matches(&format!("<td style=\"{CELL_STYLE}\"></td>")).count(), 4);
    }
}
