// Server-rendered HTML for the upload form and its result pages.

use chrono::NaiveDate;
use std::fmt::Write;

use crate::domain::{BatchItem, BatchOutcome, Comparison, HistoryEntry, Stats};

const TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

pub struct IndexView<'a> {
    pub languages: &'a [(String, String)],
    pub default_language: &'a str,
    pub stats: &'a Stats,
    pub history: &'a [HistoryEntry],
    pub date_filter: Option<NaiveDate>,
    pub max_batch_bytes: usize,
}

pub fn escape_html(raw: &str) -> String {
    let mut escaped = String::with_capacity(raw.len());
    for c in raw.chars() {
        match c {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            '\'' => escaped.push_str("&#39;"),
            _ => escaped.push(c),
        }
    }
    escaped
}

fn layout(title: &str, body: &str) -> String {
    format!(
        "<!DOCTYPE html>\n<html lang=\"en\">\n<head>\n<meta charset=\"utf-8\">\n<title>{}</title>\n</head>\n<body>\n{body}\n</body>\n</html>\n",
        escape_html(title)
    )
}

pub fn index_page(view: &IndexView<'_>) -> String {
    let mut body = String::new();
    body.push_str("<h1>Text recognition</h1>\n");

    // Upload form.
    body.push_str(
        "<form method=\"post\" action=\"/recognize\" enctype=\"multipart/form-data\">\n\
         <label>Images <input type=\"file\" name=\"images\" accept=\".png,.jpg,.jpeg,.pdf\" multiple required></label>\n\
         <label>Language <select name=\"language\">\n",
    );
    for (code, name) in view.languages {
        let selected = if code == view.default_language {
            " selected"
        } else {
            ""
        };
        let _ = writeln!(
            body,
            "<option value=\"{}\"{selected}>{}</option>",
            escape_html(code),
            escape_html(name)
        );
    }
    let _ = write!(
        body,
        "</select></label>\n\
         <label><input type=\"checkbox\" name=\"optimize\" value=\"on\" checked> Optimize images</label>\n\
         <label><input type=\"checkbox\" name=\"use_cache\" value=\"on\" checked> Use cache</label>\n\
         <p>Up to {:.0} MB per upload.</p>\n\
         <button type=\"submit\">Recognize text</button>\n\
         </form>\n",
        view.max_batch_bytes as f64 / 1024.0 / 1024.0
    );

    body.push_str(&stats_section(view.stats));
    body.push_str(&history_section(view.history, view.date_filter));

    layout("Text recognition", &body)
}

fn stats_section(stats: &Stats) -> String {
    if stats.total_processed == 0 {
        return String::new();
    }

    let mut section = String::from("<section id=\"stats\">\n<h2>Statistics</h2>\n<dl>\n");
    let _ = write!(
        section,
        "<dt>Total processed</dt><dd>{}</dd>\n\
         <dt>Successful</dt><dd>{}</dd>\n\
         <dt>Failed</dt><dd>{}</dd>\n\
         <dt>Total size</dt><dd>{:.1} MB</dd>\n",
        stats.total_processed,
        stats.total_success,
        stats.total_failed,
        stats.total_size_mib()
    );
    if let Some(last) = stats.last_processed {
        let _ = writeln!(
            section,
            "<dt>Last processed</dt><dd>{}</dd>",
            last.format(TIMESTAMP_FORMAT)
        );
    }
    section.push_str("</dl>\n</section>\n");
    section
}

fn history_section(history: &[HistoryEntry], date_filter: Option<NaiveDate>) -> String {
    let mut section = String::from("<section id=\"history\">\n<h2>History</h2>\n");

    let date_value = date_filter
        .map(|date| date.format("%Y-%m-%d").to_string())
        .unwrap_or_default();
    let _ = write!(
        section,
        "<form method=\"get\" action=\"/\">\n\
         <label>Date <input type=\"date\" name=\"date\" value=\"{date_value}\"></label>\n\
         <button type=\"submit\">Filter</button>\n\
         </form>\n\
         <form method=\"post\" action=\"/history/clear\"><button type=\"submit\">Clear history</button></form>\n\
         <p><a href=\"/history/export.csv\">Export table (CSV)</a></p>\n"
    );

    if history.is_empty() {
        section.push_str("<p>No entries.</p>\n</section>\n");
        return section;
    }

    section.push_str(
        "<table>\n<thead><tr><th>Time</th><th>File</th><th>Language</th><th>Processing time</th><th>Text</th><th></th></tr></thead>\n<tbody>\n",
    );
    for entry in history {
        let id = escape_html(&entry.id);
        let _ = write!(
            section,
            "<tr>\
             <td>{}</td>\
             <td><a href=\"/history/{id}/image\">{}</a></td>\
             <td>{}</td>\
             <td>{}</td>\
             <td><textarea readonly rows=\"6\" cols=\"60\">{}</textarea></td>\
             <td><a href=\"/history/{id}/export.txt\">TXT</a>\
             <form method=\"post\" action=\"/history/{id}/delete\"><button type=\"submit\">Delete</button></form></td>\
             </tr>\n",
            entry.timestamp.format(TIMESTAMP_FORMAT),
            escape_html(&entry.file_name),
            escape_html(&entry.language),
            escape_html(&entry.processing_time),
            escape_html(&entry.text),
        );
    }
    section.push_str("</tbody>\n</table>\n");

    if history.len() >= 2 {
        section.push_str(&compare_form(history));
    }

    section.push_str("</section>\n");
    section
}

fn compare_form(history: &[HistoryEntry]) -> String {
    let options: String = history
        .iter()
        .map(|entry| {
            format!(
                "<option value=\"{}\">{} {}</option>",
                escape_html(&entry.id),
                entry.timestamp.format(TIMESTAMP_FORMAT),
                escape_html(&entry.file_name)
            )
        })
        .collect();

    format!(
        "<form method=\"get\" action=\"/compare\">\n\
         <label>Left <select name=\"left\">{options}</select></label>\n\
         <label>Right <select name=\"right\">{options}</select></label>\n\
         <button type=\"submit\">Compare</button>\n\
         </form>\n"
    )
}

pub fn results_page(items: &[BatchItem]) -> String {
    let mut body = String::from("<h1>Recognition results</h1>\n");

    for item in items {
        let _ = writeln!(
            body,
            "<section class=\"result\">\n<h2>{}</h2>",
            escape_html(&item.file_name)
        );
        match &item.outcome {
            BatchOutcome::Recognized {
                result,
                from_cache,
                history_id,
            } => {
                let source = if *from_cache { " (cached)" } else { "" };
                let _ = write!(
                    body,
                    "<p>Language: {} &middot; Processing time: {}{source}</p>\n\
                     <textarea rows=\"12\" cols=\"80\">{}</textarea>\n",
                    escape_html(&result.language_name),
                    escape_html(&result.processing_time),
                    escape_html(&result.text)
                );
                if let Some(id) = history_id {
                    let id = escape_html(id);
                    let _ = writeln!(
                        body,
                        "<p><img src=\"/history/{id}/image\" alt=\"\" width=\"300\"> <a href=\"/history/{id}/export.txt\">Download TXT</a></p>"
                    );
                }
            }
            BatchOutcome::Failed { error } => {
                let _ = writeln!(
                    body,
                    "<p class=\"error\">Error: {}</p>",
                    escape_html(error)
                );
            }
        }
        body.push_str("</section>\n");
    }

    body.push_str("<p><a href=\"/\">Back</a></p>\n");
    layout("Recognition results", &body)
}

pub fn comparison_page(left: &HistoryEntry, right: &HistoryEntry, comparison: &Comparison) -> String {
    let join = |words: &[String]| escape_html(&words.join(" "));
    let body = format!(
        "<h1>Comparison</h1>\n\
         <p>{} vs {}</p>\n\
         <p>Similarity: {:.0}%</p>\n\
         <h2>Common words</h2>\n<p>{}</p>\n\
         <h2>Only in {}</h2>\n<p>{}</p>\n\
         <h2>Only in {}</h2>\n<p>{}</p>\n\
         <p><a href=\"/\">Back</a></p>\n",
        escape_html(&left.file_name),
        escape_html(&right.file_name),
        comparison.similarity * 100.0,
        join(&comparison.common_words),
        escape_html(&left.file_name),
        join(&comparison.only_left),
        escape_html(&right.file_name),
        join(&comparison.only_right),
    );
    layout("Comparison", &body)
}

pub fn error_page(message: &str) -> String {
    let body = format!(
        "<h1>Error</h1>\n<p class=\"error\">{}</p>\n<p><a href=\"/\">Back</a></p>\n",
        escape_html(message)
    );
    layout("Error", &body)
}
