//! SVG summary card written to a well-known path

use std::fmt::Write as _;
use std::path::{Path, PathBuf};

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use tracing::info;

use super::SummaryRenderer;
use crate::errors::{CountryFxError, Result};
use crate::storage::GdpEntry;

pub const SUMMARY_CONTENT_TYPE: &str = "image/svg+xml";

const WIDTH: u32 = 600;
const HEIGHT: u32 = 300;

pub struct SvgSummaryRenderer {
    output_path: PathBuf,
}

impl SvgSummaryRenderer {
    pub fn new(output_path: impl Into<PathBuf>) -> Self {
        Self {
            output_path: output_path.into(),
        }
    }

    pub fn output_path(&self) -> &Path {
        &self.output_path
    }
}

fn escape_xml(value: &str) -> String {
    let mut escaped = String::with_capacity(value.len());
    for ch in value.chars() {
        match ch {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            '\'' => escaped.push_str("&apos;"),
            _ => escaped.push(ch),
        }
    }
    escaped
}

/// 1234567.8 -> "1,234,567.80"
fn format_gdp(value: f64) -> String {
    let formatted = format!("{:.2}", value.abs());
    let (int_part, frac_part) = formatted.split_once('.').unwrap_or((formatted.as_str(), "00"));

    let mut grouped = String::with_capacity(int_part.len() + int_part.len() / 3);
    for (i, digit) in int_part.chars().enumerate() {
        if i > 0 && (int_part.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(digit);
    }

    let sign = if value < 0.0 { "-" } else { "" };
    format!("{}{}.{}", sign, grouped, frac_part)
}

pub(crate) fn render_svg(total: u64, top: &[GdpEntry], timestamp: Option<DateTime<Utc>>) -> String {
    let mut svg = String::new();
    let _ = writeln!(
        svg,
        r#"<svg xmlns="http://www.w3.org/2000/svg" width="{w}" height="{h}" viewBox="0 0 {w} {h}">"#,
        w = WIDTH,
        h = HEIGHT
    );
    svg.push_str(
        r##"<defs><linearGradient id="bg" x1="0" y1="0" x2="1" y2="1"><stop offset="0%" stop-color="#0b132b"/><stop offset="100%" stop-color="#1c2541"/></linearGradient></defs>
"##,
    );
    let _ = writeln!(
        svg,
        r#"<rect width="{}" height="{}" fill="url(#bg)"/>"#,
        WIDTH, HEIGHT
    );
    svg.push_str(
        r##"<g font-family="Arial, sans-serif" fill="#ffffff">
<text x="20" y="45" font-size="26" fill="#00b4d8">Country Summary</text>
"##,
    );
    let _ = writeln!(
        svg,
        r#"<text x="20" y="80" font-size="16">Total Countries: {}</text>"#,
        total
    );
    svg.push_str(
        r#"<text x="20" y="110" font-size="16" font-weight="bold">Top countries by estimated GDP</text>
"#,
    );

    for (i, entry) in top.iter().enumerate() {
        let _ = writeln!(
            svg,
            r#"<text x="30" y="{}" font-size="14">{}. {} - {}</text>"#,
            135 + i * 22,
            i + 1,
            escape_xml(&entry.name),
            format_gdp(entry.estimated_gdp)
        );
    }

    let updated = timestamp
        .map(|t| t.to_rfc3339())
        .unwrap_or_else(|| "never".to_string());
    let _ = writeln!(
        svg,
        r#"<text x="20" y="{}" font-size="12">Last Updated: {}</text>"#,
        HEIGHT - 15,
        escape_xml(&updated)
    );
    svg.push_str("</g>\n</svg>\n");
    svg
}

#[async_trait]
impl SummaryRenderer for SvgSummaryRenderer {
    async fn render(
        &self,
        total: u64,
        top: &[GdpEntry],
        timestamp: Option<DateTime<Utc>>,
    ) -> Result<()> {
        let svg = render_svg(total, top, timestamp);

        if let Some(parent) = self.output_path.parent()
            && !parent.as_os_str().is_empty()
        {
            tokio::fs::create_dir_all(parent).await.map_err(|e| {
                CountryFxError::render(format!("Failed to create {}: {}", parent.display(), e))
            })?;
        }

        // 先写临时文件再 rename，读取方不会看到半截文件
        let tmp_path = self.output_path.with_extension("svg.tmp");
        tokio::fs::write(&tmp_path, svg.as_bytes())
            .await
            .map_err(|e| {
                CountryFxError::render(format!("Failed to write {}: {}", tmp_path.display(), e))
            })?;
        tokio::fs::rename(&tmp_path, &self.output_path)
            .await
            .map_err(|e| {
                CountryFxError::render(format!(
                    "Failed to move summary into {}: {}",
                    self.output_path.display(),
                    e
                ))
            })?;

        info!(
            "Summary image written to {} ({} countries, top {})",
            self.output_path.display(),
            total,
            top.len()
        );
        Ok(())
    }
}
