//! Query Performance Benchmarks
//!
//! Timing for the hot paths of the engine:
//! - Parsing query text
//! - Descendant traversal over a wide, deep document
//! - Filter evaluation with comparisons and function calls

use std::hint::black_box;
use std::time::{Duration, Instant};

use jpt::{Query, Value};
use serde_json::json;

fn main() {
    println!("JSONPath Query Benchmarks\n");

    let doc = catalog(200, 4);

    bench_parse();
    bench_descendant(&doc);
    bench_filters(&doc);
}

/// Nested catalog with `sections` levels of `width` items each
fn catalog(width: usize, sections: usize) -> Value {
    let mut node = json!({"items": []});
    for depth in 0..sections {
        let items: Vec<Value> = (0..width)
            .map(|i| {
                let tags = &["a", "b", "c"][..(i % 3) + 1];
                json!({
                    "id": format!("item-{depth}-{i}"),
                    "price": (i % 50) as f64 + 0.99,
                    "tags": tags,
                })
            })
            .collect();
        node = json!({"items": items, "child": node});
    }
    node
}

fn report(label: &str, iterations: u32, duration: Duration) {
    let average = duration / iterations;
    println!("   {label}: {iterations} runs in {duration:?}");
    println!("   Average: {average:?} per run");
    println!();
}

/// Benchmark parsing query text
fn bench_parse() {
    println!("1. Parsing");

    let iterations = 10_000;
    let start = Instant::now();
    for _ in 0..iterations {
        let query = Query::from_text("$..items[?@.price < 10 && match(@.id, 'item-[0-9]-1.*')].tags[0]");
        black_box(query.is_ok());
    }
    report("filter query", iterations, start.elapsed());
}

/// Benchmark descendant traversal
fn bench_descendant(doc: &Value) {
    println!("2. Descendant traversal");

    let all = Query::from_text("$..*").unwrap_or_else(|error| panic!("{error}"));
    let prices = Query::from_text("$..price").unwrap_or_else(|error| panic!("{error}"));
    let iterations = 100;

    let start = Instant::now();
    for _ in 0..iterations {
        black_box(all.apply(doc).len());
    }
    report("$..*", iterations, start.elapsed());

    let start = Instant::now();
    for _ in 0..iterations {
        black_box(prices.apply(doc).len());
    }
    report("$..price", iterations, start.elapsed());
}

/// Benchmark filter evaluation
fn bench_filters(doc: &Value) {
    println!("3. Filters");

    let iterations = 100;
    for text in [
        "$..items[?@.price < 10]",
        "$..items[?count(@.tags[*]) == 2 || length(@.id) > 10]",
        "$..items[?search(@.id, '-1[0-9]$')]",
    ] {
        let query = Query::from_text(text).unwrap_or_else(|error| panic!("{error}"));
        let start = Instant::now();
        for _ in 0..iterations {
            black_box(query.apply(doc).len());
        }
        report(text, iterations, start.elapsed());
    }
}
