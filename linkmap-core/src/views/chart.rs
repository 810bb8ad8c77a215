use crate::config::ChartStyle;
use crate::error::{LinkMapError, Result};
use crate::model::RankedTarget;
use crate::report::html_escape;
use std::fmt::Write;
use tracing::debug;

const TOP_MARGIN: u32 = 70;
const BOTTOM_MARGIN: u32 = 70;
const RIGHT_MARGIN: u32 = 60;
const AXIS_LABEL_GUTTER: u32 = 40;

/// Horizontal bar chart of the most-linked pages as a standalone SVG
pub fn render_ranking_svg(ranking: &[RankedTarget], style: &ChartStyle) -> Result<String> {
    if ranking.is_empty() {
        return Err(LinkMapError::render("ranking chart", "no targets to plot"));
    }

    let left = style.label_width + AXIS_LABEL_GUTTER;
    if style.width <= left + RIGHT_MARGIN {
        return Err(LinkMapError::render(
            "ranking chart",
            format!("width {} leaves no room for bars", style.width),
        ));
    }

    let plot_width = style.width - left - RIGHT_MARGIN;
    let plot_height = style.bar_height * ranking.len() as u32;
    let height = TOP_MARGIN + plot_height + BOTTOM_MARGIN;
    let max_count = ranking.iter().map(|r| r.count).max().unwrap_or(1).max(1);
    let step = tick_step(max_count);

    debug!("Rendering ranking chart: {} bars, max {}", ranking.len(), max_count);

    let mut svg = String::new();
    // Writing into a String cannot fail
    let _ = writeln!(
        svg,
        r#"<svg xmlns="http://www.w3.org/2000/svg" width="{w}" height="{h}" viewBox="0 0 {w} {h}" font-family="Arial, sans-serif">"#,
        w = style.width,
        h = height
    );
    let _ = writeln!(svg, r#"<rect width="100%" height="100%" fill="white"/>"#);
    let _ = writeln!(
        svg,
        r#"<text x="{}" y="36" font-size="22" text-anchor="middle">Top {} Pages by Incoming Links</text>"#,
        style.width / 2,
        ranking.len()
    );

    // Grid lines and tick labels
    let mut tick = 0;
    while tick <= max_count {
        let x = left as f64 + tick as f64 / max_count as f64 * plot_width as f64;
        let _ = writeln!(
            svg,
            r##"<line x1="{x:.1}" y1="{top}" x2="{x:.1}" y2="{bottom}" stroke="#dddddd"/>"##,
            top = TOP_MARGIN,
            bottom = TOP_MARGIN + plot_height
        );
        let _ = writeln!(
            svg,
            r#"<text x="{x:.1}" y="{y}" font-size="12" text-anchor="middle">{tick}</text>"#,
            y = TOP_MARGIN + plot_height + 18
        );
        tick += step;
    }

    for (idx, ranked) in ranking.iter().enumerate() {
        let y = TOP_MARGIN + idx as u32 * style.bar_height;
        let bar_width = ranked.count as f64 / max_count as f64 * plot_width as f64;
        let color = colorous::VIRIDIS.eval_continuous((idx as f64 + 0.5) / ranking.len() as f64);
        let label = truncate_label(&ranked.target, style.max_label_chars);

        let _ = writeln!(
            svg,
            r##"<rect class="bar" x="{left}" y="{by}" width="{bar_width:.1}" height="{bh}" fill="#{r:02x}{g:02x}{b:02x}"><title>{title}: {count}</title></rect>"##,
            by = y + 3,
            bh = style.bar_height.saturating_sub(6),
            r = color.r,
            g = color.g,
            b = color.b,
            title = html_escape(&ranked.target),
            count = ranked.count
        );
        let _ = writeln!(
            svg,
            r#"<text x="{lx}" y="{ty}" font-size="12" text-anchor="end">{label}</text>"#,
            lx = left - 8,
            ty = y + style.bar_height / 2 + 4,
            label = html_escape(&label)
        );
        let _ = writeln!(
            svg,
            r#"<text x="{vx:.1}" y="{ty}" font-size="12">{count}</text>"#,
            vx = left as f64 + bar_width + 6.0,
            ty = y + style.bar_height / 2 + 4,
            count = ranked.count
        );
    }

    // Axes
    let _ = writeln!(
        svg,
        r#"<line x1="{left}" y1="{top}" x2="{left}" y2="{bottom}" stroke="black"/>"#,
        top = TOP_MARGIN,
        bottom = TOP_MARGIN + plot_height
    );
    let _ = writeln!(
        svg,
        r#"<text x="{x}" y="{y}" font-size="14" text-anchor="middle">Incoming links</text>"#,
        x = left + plot_width / 2,
        y = TOP_MARGIN + plot_height + 48
    );
    let _ = writeln!(
        svg,
        r#"<text x="18" y="{y}" font-size="14" text-anchor="middle" transform="rotate(-90 18 {y})">Target URL</text>"#,
        y = TOP_MARGIN + plot_height / 2
    );
    svg.push_str("</svg>\n");

    Ok(svg)
}

fn tick_step(max: usize) -> usize {
    let raw = max.div_ceil(5).max(1);
    let magnitude = 10usize.pow(raw.ilog10());
    [1, 2, 5, 10]
        .iter()
        .map(|m| m * magnitude)
        .find(|&s| s >= raw)
        .unwrap_or(raw)
}

fn truncate_label(label: &str, max_chars: usize) -> String {
    if label.chars().count() <= max_chars {
        return label.to_string();
    }
    let keep = max_chars.saturating_sub(1);
    let mut truncated: String = label.chars().take(keep).collect();
    truncated.push('…');
    truncated
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tick_step() {
        assert_eq!(tick_step(1), 1);
        assert_eq!(tick_step(4), 1);
        assert_eq!(tick_step(12), 5);
        assert_eq!(tick_step(40), 10);
        assert_eq!(tick_step(230), 50);
    }

    #[test]
    fn test_truncate_label() {
        assert_eq!(truncate_label("short", 10), "short");
        assert_eq!(truncate_label("abcdefghij", 5), "abcd…");
    }
}
