use anyhow::{Context, Result};
use math_query_gateway::models::QueryResponse;
use serde_json::json;
use std::time::Duration;

const DEFAULT_BACKEND_URL: &str = "http://localhost:8000/query";
const DEFAULT_OUTPUT: &str = "demo_results.csv";
const CLIENT_TIMEOUT: Duration = Duration::from_secs(150);

/// (description, question, expected behaviour)
const TEST_CASES: &[(&str, &str, &str)] = &[
    // Math, basic operations
    ("Simple division", "What is 10 divided by 2?", "Should answer: 5 or equivalent math answer"),
    ("Square root", "Calculate the square root of 81", "Should answer: 9 or equivalent math answer"),
    ("Basic addition", "What is 15 + 27?", "Should answer: 42 or equivalent math answer"),
    ("Exponent", "What is 2 to the power of 5?", "Should answer: 32 or equivalent math answer"),
    ("Decimal operations", "What is 3.5 * 2?", "Should answer: 7 or equivalent math answer"),
    (
        "Word problem math",
        "If I have 5 apples and buy 3 more, how many do I have?",
        "Should answer: 8 or equivalent math answer",
    ),
    // Ping, case variations
    ("Ping lower", "ping", "Should answer: pong!!!"),
    ("Ping upper", "PING", "Should answer: pong!!! (case-insensitive)"),
    ("Ping mixed", "PiNg", "Should answer: pong!!! (case-insensitive)"),
    ("Ping title case", "Ping", "Should answer: pong!!! (case-insensitive)"),
    // Refusals
    ("Non-math: geography", "What is the capital of France?", "Should refuse: only math or ping allowed"),
    (
        "Non-math: history",
        "Who was the first president of the United States?",
        "Should refuse: only math or ping allowed",
    ),
    (
        "Non-math: science",
        "What is the chemical formula for water?",
        "Should refuse: only math or ping allowed",
    ),
    ("Non-math: weather", "What's the weather like today?", "Should refuse: only math or ping allowed"),
    ("Non-math: personal", "What is your name?", "Should refuse: only math or ping allowed"),
    (
        "Non-math: numbers in context",
        "What is your phone number?",
        "Should refuse: only math or ping allowed",
    ),
    ("Non-math: measurement", "How tall is the Eiffel Tower?", "Should refuse: only math or ping allowed"),
    ("Non-math: time", "What time is it now?", "Should refuse: only math or ping allowed"),
    ("Non-math: date", "What is today's date?", "Should refuse: only math or ping allowed"),
    // Math edge cases
    ("Math: zero", "What is 0 * 5?", "Should answer: 0 or equivalent math answer"),
    ("Math: negative", "What is -5 + 3?", "Should answer: -2 or equivalent math answer"),
    (
        "Math: implied calculation",
        "If I double 10, what do I get?",
        "Should answer: 20 or equivalent math answer",
    ),
    // Empty and invalid input
    ("Empty input", "", "Should refuse: only math or ping allowed"),
    ("Only spaces", "   ", "Should refuse: only math or ping allowed"),
    ("Only punctuation", "???", "Should refuse: only math or ping allowed"),
];

async fn ask(client: &reqwest::Client, url: &str, question: &str) -> String {
    let response = match client.post(url).json(&json!({ "question": question })).send().await {
        Ok(response) => response,
        Err(e) => return format!("<exception> {}", e),
    };

    let status = response.status();
    let body = match response.text().await {
        Ok(body) => body,
        Err(e) => return format!("<exception> {}", e),
    };

    if !status.is_success() {
        return format!("<error {}> {}", status.as_u16(), body);
    }

    match serde_json::from_str::<QueryResponse>(&body) {
        Ok(parsed) => parsed.response,
        Err(_) => "<no response>".to_string(),
    }
}

/// Quotes a CSV field when it contains a delimiter, quote or line break.
fn csv_field(value: &str) -> String {
    if value.contains([',', '"', '\n', '\r']) {
        format!("\"{}\"", value.replace('"', "\"\""))
    } else {
        value.to_string()
    }
}

fn csv_row(fields: &[&str]) -> String {
    let mut row = fields.iter().map(|f| csv_field(f)).collect::<Vec<_>>().join(",");
    row.push_str("\r\n");
    row
}

#[tokio::main]
async fn main() -> Result<()> {
    println!("🚀 Math Query Gateway Demo");
    println!("{}", "=".repeat(50));

    let backend_url = std::env::var("BACKEND_URL")
        .unwrap_or_else(|_| DEFAULT_BACKEND_URL.to_string())
        .trim_end_matches('/')
        .to_string();
    let output = std::env::var("DEMO_OUTPUT").unwrap_or_else(|_| DEFAULT_OUTPUT.to_string());

    println!("Backend: {}", backend_url);
    println!();

    let client = reqwest::Client::builder().timeout(CLIENT_TIMEOUT).build()?;

    let mut csv = csv_row(&["Description", "Question", "Expected Behaviour", "Current Response"]);
    for (description, question, expected) in TEST_CASES {
        let answer = ask(&client, &backend_url, question).await;
        println!("{}: {}\n  => {}\n", description, question, answer);
        csv.push_str(&csv_row(&[*description, *question, *expected, answer.as_str()]));
    }

    std::fs::write(&output, csv).with_context(|| format!("Failed to write {}", output))?;
    println!("\n✅ Results written to {}", output);

    Ok(())
}
