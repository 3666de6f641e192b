//! HTML rendering for the missed-search admin table.
//!
//! Rows come in as [`RankedEntry`] values carrying raw query text; this is
//! the one layer that output-encodes it. Removal links carry the row's rank
//! plus the process nonce.

use misslog_core::RankedEntry;

/// Render the full admin page: optional removal notice, the ranked table
/// (or an explicit "no data" row), and per-row removal links.
pub fn render(view: &[RankedEntry], removed: Option<u64>, nonce: &str) -> String {
    let mut html = String::new();
    html.push_str("<!doctype html>\n<html>\n<head><title>Missed Search Terms</title></head>\n<body>\n");
    html.push_str("<h2>Missed Search Terms</h2>\n");

    if let Some(n) = removed {
        html.push_str(&format!(
            "<div class=\"notice\"><p>Removed {n} search terms</p></div>\n"
        ));
    }

    html.push_str("<table id=\"missed-search-table\">\n<thead>\n<tr>");
    for heading in ["Rank", "Term", "Total Searches", "Last Search", "Remove"] {
        html.push_str(&format!("<th>{heading}</th>"));
    }
    html.push_str("</tr>\n</thead>\n<tbody>\n");

    if view.is_empty() {
        html.push_str("<tr><td colspan=\"5\"><em>No missed searches</em></td></tr>\n");
    } else {
        for entry in view {
            html.push_str(&render_row(entry, nonce));
        }
    }

    html.push_str("</tbody>\n</table>\n</body>\n</html>\n");
    html
}

fn render_row(entry: &RankedEntry, nonce: &str) -> String {
    format!(
        "<tr><td>{rank}</td><td>{term}</td><td>{count}</td><td>{latest}</td>\
         <td><a href=\"/tools/missed-searches/remove?ranks={rank}&nonce={nonce}\">✕</a></td></tr>\n",
        rank = entry.rank,
        term = escape_html(&entry.query),
        count = entry.record.count,
        latest = format_latest(entry.record.latest),
    )
}

/// Format a unix timestamp as `M/D/YYYY` (no zero padding), the format the
/// table has always used.
pub fn format_latest(latest: i64) -> String {
    match chrono::DateTime::from_timestamp(latest, 0) {
        Some(ts) => ts.format("%-m/%-d/%Y").to_string(),
        None => "-".to_string(),
    }
}

fn escape_html(raw: &str) -> String {
    let mut escaped = String::with_capacity(raw.len());
    for ch in raw.chars() {
        match ch {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            '\'' => escaped.push_str("&#39;"),
            other => escaped.push(other),
        }
    }
    escaped
}
