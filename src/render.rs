// src/render.rs
use crate::models::Row;

const RULE: &str =
    "-----------------------------------------------------------------------------------";

pub fn render_table(rows: &[Row]) -> String {
    let mut out = String::new();
    out.push_str("Stock Watchlist:\n");
    out.push_str(RULE);
    out.push('\n');
    out.push_str("| Ticker    | Price      | % Change   | 52W Low/High      | Recommendation |\n");
    out.push_str(RULE);
    out.push('\n');
    if rows.is_empty() {
        out.push_str("[empty]\n");
    }
    for row in rows {
        out.push_str(&render_row(row));
        out.push('\n');
    }
    out.push_str(RULE);
    out.push('\n');
    out
}

pub fn render_row(row: &Row) -> String {
    let range = format!("{}/{}", row.low52, row.high52);
    format!(
        "| {:<9} | {:<10} | {:<10} | {:<17} | {}",
        row.symbol, row.price, row.change, range, row.recommend
    )
}
