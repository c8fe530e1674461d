use crate::analyzers::DisposalFrequencies;
use crate::error::Result;
use crate::utils::constants::{
    CHART_X_LABEL, CHART_Y_LABEL, DEFAULT_CHART_HEIGHT, DEFAULT_CHART_SUBTITLE,
    DEFAULT_CHART_WIDTH,
};
use std::path::Path;
use tracing::info;

const MARGIN_LEFT: f64 = 80.0;
const MARGIN_RIGHT: f64 = 30.0;
const MARGIN_TOP: f64 = 50.0;
const MARGIN_BOTTOM: f64 = 200.0;
const BAR_COLOR: &str = "#1f77b4";
/// Bottom of the log axis, below 1 so single-record bars stay visible
const AXIS_FLOOR: f64 = 0.5;

/// Renders disposal-method frequencies as a bar chart with a log10 y axis
pub struct SvgChartWriter {
    width: u32,
    height: u32,
    subtitle: String,
}

impl SvgChartWriter {
    pub fn new() -> Self {
        Self {
            width: DEFAULT_CHART_WIDTH,
            height: DEFAULT_CHART_HEIGHT,
            subtitle: DEFAULT_CHART_SUBTITLE.to_string(),
        }
    }

    pub fn with_size(mut self, width: u32, height: u32) -> Self {
        self.width = width;
        self.height = height;
        self
    }

    pub fn with_subtitle(mut self, subtitle: &str) -> Self {
        self.subtitle = subtitle.to_string();
        self
    }

    pub fn write_chart(&self, frequencies: &DisposalFrequencies, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        std::fs::write(path, self.render(frequencies))?;
        info!("Wrote {} chart to {}", frequencies.kind, path.display());
        Ok(())
    }

    pub fn render(&self, frequencies: &DisposalFrequencies) -> String {
        let width = self.width as f64;
        let height = self.height as f64;
        let plot_width = (width - MARGIN_LEFT - MARGIN_RIGHT).max(1.0);
        let plot_height = (height - MARGIN_TOP - MARGIN_BOTTOM).max(1.0);
        let baseline = MARGIN_TOP + plot_height;

        let decades = log_decades(frequencies.max_count());
        let floor = AXIS_FLOOR.log10();
        let scale_y = |value: f64| {
            let fraction = (value.log10() - floor) / (decades as f64 - floor);
            baseline - fraction * plot_height
        };

        let mut grid = String::new();
        for k in 0..=decades {
            let y = scale_y(10f64.powi(k as i32));
            grid.push_str(&format!(
                r##"  <line x1="{:.1}" y1="{:.1}" x2="{:.1}" y2="{:.1}" stroke="#e5e7eb" stroke-width="1"/>
  <text x="{:.1}" y="{:.1}" text-anchor="end" font-size="11" fill="#374151">{}</text>
"##,
                MARGIN_LEFT,
                y,
                MARGIN_LEFT + plot_width,
                y,
                MARGIN_LEFT - 8.0,
                y + 4.0,
                decade_label(k)
            ));
        }

        let mut bars = String::new();
        if frequencies.is_empty() {
            bars.push_str(&format!(
                r##"  <text x="{:.1}" y="{:.1}" text-anchor="middle" font-size="13" fill="#6b7280">No records</text>
"##,
                MARGIN_LEFT + plot_width / 2.0,
                MARGIN_TOP + plot_height / 2.0
            ));
        }

        let slot = plot_width / frequencies.methods.len().max(1) as f64;
        for (i, method) in frequencies.methods.iter().enumerate() {
            let x = MARGIN_LEFT + i as f64 * slot;
            let y = scale_y(method.count.max(1) as f64);
            let label_x = x + slot / 2.0;
            let label_y = baseline + 12.0;
            bars.push_str(&format!(
                r##"  <rect x="{:.1}" y="{:.1}" width="{:.1}" height="{:.1}" fill="{}"><title>{}: {}</title></rect>
  <text x="{:.1}" y="{:.1}" text-anchor="end" font-size="10" fill="#374151" transform="rotate(-60, {:.1}, {:.1})">{}</text>
"##,
                x + slot * 0.1,
                y,
                slot * 0.8,
                baseline - y,
                BAR_COLOR,
                escape_xml(&method.disposal_method),
                method.count,
                label_x,
                label_y,
                label_x,
                label_y,
                escape_xml(&method.disposal_method)
            ));
        }

        let title = frequencies.kind.chart_title(&self.subtitle);
        let y_label_y = MARGIN_TOP + plot_height / 2.0;

        format!(
            r##"<svg xmlns="http://www.w3.org/2000/svg" width="{w}" height="{h}" viewBox="0 0 {w} {h}" style="background:white">
  <text x="{cx:.1}" y="28" text-anchor="middle" font-size="16" font-weight="600" fill="#111827">{title}</text>
{grid}{bars}  <line x1="{l:.1}" y1="{b:.1}" x2="{r:.1}" y2="{b:.1}" stroke="#111827" stroke-width="1"/>
  <line x1="{l:.1}" y1="{t:.1}" x2="{l:.1}" y2="{b:.1}" stroke="#111827" stroke-width="1"/>
  <text x="{cx:.1}" y="{xl:.1}" text-anchor="middle" font-size="12" fill="#111827">{x_label}</text>
  <text x="20" y="{yl:.1}" text-anchor="middle" font-size="12" fill="#111827" transform="rotate(-90, 20, {yl:.1})">{y_label}</text>
</svg>
"##,
            w = self.width,
            h = self.height,
            cx = MARGIN_LEFT + plot_width / 2.0,
            title = escape_xml(&title),
            grid = grid,
            bars = bars,
            l = MARGIN_LEFT,
            r = MARGIN_LEFT + plot_width,
            t = MARGIN_TOP,
            b = baseline,
            xl = height - 12.0,
            yl = y_label_y,
            x_label = CHART_X_LABEL,
            y_label = CHART_Y_LABEL,
        )
    }
}

impl Default for SvgChartWriter {
    fn default() -> Self {
        Self::new()
    }
}

/// Number of powers of ten spanned by the y axis, at least one
pub fn log_decades(max_count: usize) -> u32 {
    let mut decades = 1;
    while 10f64.powi(decades as i32) < max_count as f64 {
        decades += 1;
    }
    decades
}

fn decade_label(k: u32) -> String {
    if k <= 6 {
        10u64.pow(k).to_string()
    } else {
        format!("1e{}", k)
    }
}

pub fn escape_xml(text: &str) -> String {
    let mut escaped = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            '\'' => escaped.push_str("&apos;"),
            _ => escaped.push(c),
        }
    }
    escaped
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::analyzers::MethodCount;
    use crate::models::WasteKind;
    use tempfile::TempDir;

    fn frequencies(methods: &[(&str, usize)]) -> DisposalFrequencies {
        DisposalFrequencies {
            kind: WasteKind::Liquid,
            methods: methods
                .iter()
                .map(|&(m, c)| MethodCount {
                    disposal_method: m.to_string(),
                    count: c,
                })
                .collect(),
        }
    }

    #[test]
    fn test_log_decades() {
        assert_eq!(log_decades(0), 1);
        assert_eq!(log_decades(1), 1);
        assert_eq!(log_decades(10), 1);
        assert_eq!(log_decades(11), 2);
        assert_eq!(log_decades(12_000), 5);
    }

    #[test]
    fn test_render_labels_and_bars() {
        let svg = SvgChartWriter::new().render(&frequencies(&[
            ("REUSE (AT WELL PAD)", 1200),
            ("INJECTION DISPOSAL WELL", 30),
        ]));

        assert!(svg.starts_with("<svg"));
        assert!(svg.contains("Liquid Waste Disposal Methods - PA 2018"));
        assert!(svg.contains("Frequency (Log Scale)"));
        assert!(svg.contains("Disposal Method"));
        assert_eq!(svg.matches("<rect").count(), 2);
        assert!(svg.find("REUSE (AT WELL PAD)") < svg.find("INJECTION DISPOSAL WELL"));
        // decade gridlines 1..10000
        assert!(svg.contains(">10000</text>"));
    }

    #[test]
    fn test_labels_are_escaped() {
        let svg = SvgChartWriter::new()
            .with_subtitle("PA <2018>")
            .render(&frequencies(&[("OIL & GAS", 2)]));

        assert!(svg.contains("OIL &amp; GAS"));
        assert!(svg.contains("PA &lt;2018&gt;"));
        assert!(!svg.contains("OIL & GAS"));
    }

    #[test]
    fn test_empty_chart() {
        let svg = SvgChartWriter::new().render(&frequencies(&[]));

        assert!(svg.contains("No records"));
        assert_eq!(svg.matches("<rect").count(), 0);
    }

    #[test]
    fn test_write_chart_creates_directories() -> Result<()> {
        let temp_dir = TempDir::new()?;
        let path = temp_dir.path().join("charts").join("liquid.svg");

        SvgChartWriter::new()
            .with_size(640, 480)
            .write_chart(&frequencies(&[("LANDFILL", 3)]), &path)?;

        let content = std::fs::read_to_string(&path)?;
        assert!(content.contains(r#"width="640""#));
        Ok(())
    }
}
