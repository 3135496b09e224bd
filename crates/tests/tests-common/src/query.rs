//! Rendering built queries for snapshots and assertions.

use query_engine_sql::sql::string::SQL;

/// Render a query text followed by its numbered parameters.
pub fn render_query(query: &SQL) -> String {
    let params = if query.params.is_empty() {
        "no parameters".to_string()
    } else {
        query
            .params
            .iter()
            .enumerate()
            .map(|(index, param)| format!("${} = {param}", index + 1))
            .collect::<Vec<_>>()
            .join("\n")
    };
    format!("{}\n\n{}", query.sql, params)
}

/// The placeholder numbers a query text mentions, in order of appearance.
pub fn placeholders(sql: &str) -> Vec<usize> {
    let mut found = vec![];
    let mut chars = sql.char_indices().peekable();
    while let Some((_, c)) = chars.next() {
        if c != '$' {
            continue;
        }
        let mut digits = String::new();
        while let Some((_, d)) = chars.peek().copied() {
            if !d.is_ascii_digit() {
                break;
            }
            digits.push(d);
            chars.next();
        }
        if let Ok(number) = digits.parse() {
            found.push(number);
        }
    }
    found
}

/// Initialise logging for a test run. Safe to call more than once.
pub fn init_logging() {
    let _ = env_logger::builder().is_test(true).try_init();
}
