//! Query facade tests
//!
//! Construction from text, AST and tagged form; application to documents;
//! diagnostics; registries; deep clones.

use std::sync::Arc;

use jpt::{
    CompareOp, Diagnostic, FilterExpr, FunctionExtension, FunctionRegistry, FunctionSignature, FunctionType,
    ParserConfig, Query, QueryAst, Scalar, Segment, Typed, Value,
};
use serde_json::json;

fn init_logging() {
    env_logger::builder().is_test(true).try_init().ok();
}

fn bookstore() -> Value {
    json!({
        "store": {
            "book": [
                {"category": "reference", "author": "Rees", "title": "Sayings", "price": 8.95},
                {"category": "fiction", "author": "Waugh", "title": "Sword", "price": 12.99},
                {"category": "fiction", "author": "Melville", "title": "Moby Dick", "isbn": "0-553", "price": 8.99},
                {"category": "fiction", "author": "Tolkien", "title": "The Lord", "isbn": "0-395", "price": 22.99}
            ],
            "bicycle": {"color": "red", "price": 399}
        }
    })
}

fn parse(text: &str) -> Query {
    Query::from_text(text).expect("Failed to parse query")
}

#[test]
fn test_bookstore_queries() {
    init_logging();
    let doc = bookstore();
    assert_eq!(
        parse("$.store.book[*].author").apply(&doc).to_values(),
        vec![json!("Rees"), json!("Waugh"), json!("Melville"), json!("Tolkien")]
    );
    assert_eq!(parse("$..price").apply(&doc).len(), 5);
    assert_eq!(parse("$..book[2].title").apply(&doc).to_values(), vec![json!("Moby Dick")]);
    assert_eq!(parse("$..book[-1:].author").apply(&doc).to_values(), vec![json!("Tolkien")]);
    assert_eq!(
        parse("$..book[?@.isbn].title").apply(&doc).to_values(),
        vec![json!("Moby Dick"), json!("The Lord")]
    );
    assert_eq!(
        parse("$..book[?@.price < 10 && @.category == 'fiction'].author").apply(&doc).to_values(),
        vec![json!("Melville")]
    );
    assert_eq!(
        parse("$.store.book[?match(@.author, 'M.*')].price").apply(&doc).to_values(),
        vec![json!(8.99)]
    );
    assert_eq!(parse("$.store.*").apply(&doc).len(), 2);
}

#[test]
fn test_results_borrow_from_the_document() {
    let doc = bookstore();
    let nodes = parse("$.store.bicycle").apply(&doc);
    let bicycle = nodes.single().expect("Expected exactly one node");
    assert!(std::ptr::eq(bicycle, &doc["store"]["bicycle"]));
}

#[test]
fn test_absent_slots_never_reach_the_result() {
    let doc = json!({"a": [1], "b": {}});
    let union = Query::from_ast(QueryAst::root(vec![Segment::Union(vec![
        Segment::key("a"),
        Segment::key("missing"),
        Segment::key("b"),
    ])]));
    assert_eq!(union.apply(&doc).to_values(), vec![json!([1]), json!({})]);
    assert!(parse("$.a[5]").apply(&doc).is_empty());
}

#[test]
fn test_from_tagged_and_back() {
    let tagged = json!(["$", "store", "book", ["filt", ["<", ["@", "price"], 9]], "title"]);
    let query = Query::from_tagged(&tagged).expect("Failed to build query from tagged form");
    assert_eq!(query.to_tagged(), tagged);
    assert_eq!(query.to_string(), "$['store']['book'][?@['price'] < 9]['title']");
    assert_eq!(
        query.apply(&bookstore()).to_values(),
        vec![json!("Sayings"), json!("Moby Dick")]
    );
    assert_eq!(parse(&query.to_string()), query);
}

#[test]
fn test_from_str() {
    let query: Query = "$.store.bicycle.color".parse().expect("Failed to parse query");
    assert_eq!(query.apply(&bookstore()).to_values(), vec![json!("red")]);
    assert!("$.".parse::<Query>().is_err());
}

#[test]
fn test_deep_clone_is_independent() {
    let doc = bookstore();
    let original = parse("$.store.book[?@.price > 10].title");
    let mut clone = original.deep_clone();
    assert_eq!(clone.apply(&doc).to_values(), original.apply(&doc).to_values());
    assert!(Arc::ptr_eq(clone.registry(), original.registry()));

    if let Some(Segment::Filter(FilterExpr::Compare { op, .. })) = clone.ast_mut().segments.get_mut(2) {
        *op = CompareOp::Lt;
    } else {
        panic!("expected a comparison filter");
    }
    assert_eq!(
        original.apply(&doc).to_values(),
        vec![json!("Sword"), json!("The Lord")]
    );
    assert_eq!(
        clone.apply(&doc).to_values(),
        vec![json!("Sayings"), json!("Moby Dick")]
    );
    assert_ne!(clone, original);
}

#[test]
fn test_apply_collecting_reports_diagnostics() {
    let query = Query::from_ast(QueryAst::root(vec![Segment::Filter(FilterExpr::call(
        "missing",
        vec![],
    ))]));
    let value = json!([1, 2]);
    let (nodes, diagnostics) = query.apply_collecting(&value);
    assert!(nodes.is_empty());
    assert_eq!(
        diagnostics,
        vec![
            Diagnostic::UnknownFunction {
                function: "missing".to_string()
            };
            2
        ]
    );
    assert_eq!(diagnostics[0].to_string(), "unknown function extension missing()");
}

#[test]
fn test_check_reports_declared_type_problems() {
    assert!(parse("$[?length(@.name) > 3]").check().is_empty());
    let diagnostics = parse("$[?length(@.name)]").check();
    assert_eq!(diagnostics.len(), 1);
    assert_eq!(
        diagnostics[0].to_string(),
        "cannot use length(@['name']) with declared type value for required type logical"
    );
    assert_eq!(
        parse("$[?count(@.*) > 0][?count(1) == 1]").check()[0],
        Diagnostic::TypeMismatch {
            expression: "1".to_string(),
            declared: Some(FunctionType::Value),
            required: FunctionType::Nodes,
            context: Some("count(1)".to_string()),
        }
    );
}

#[test]
fn test_registered_function_has_a_type_but_no_evaluator() {
    let mut registry = FunctionRegistry::new();
    registry
        .register_function("double", "vv")
        .expect("Failed to register double");
    let query = Query::from_text_with("$[?double(@) == 4]", Arc::new(registry)).expect("Failed to parse query");
    assert!(query.check().is_empty());
    let value = json!([2]);
    let (nodes, diagnostics) = query.apply_collecting(&value);
    assert!(nodes.is_empty());
    assert_eq!(diagnostics[0].kind(), "unknown_function");
}

struct Double;

impl FunctionExtension for Double {
    fn call<'a>(&self, args: Vec<Typed<'a>>) -> Typed<'a> {
        let doubled = args
            .into_iter()
            .next()
            .map(Typed::into_scalar)
            .and_then(|scalar| scalar.as_value().and_then(Value::as_f64))
            .map(|n| n * 2.0);
        match doubled {
            Some(n) => Typed::Value(Scalar::Owned(json!(n))),
            None => Typed::Value(Scalar::Absent),
        }
    }
}

#[test]
fn test_extension_function_is_evaluated() {
    let mut registry = FunctionRegistry::new();
    registry.register_extension(
        "double",
        FunctionSignature::new(FunctionType::Value, vec![FunctionType::Value]),
        Arc::new(Double),
    );
    let query = Query::from_text_with("$[?double(@) == 4]", Arc::new(registry)).expect("Failed to parse query");
    let value = json!([1, 2, "2", 3]);
    let (nodes, diagnostics) = query.apply_collecting(&value);
    assert_eq!(nodes.to_values(), vec![json!(2)]);
    assert!(diagnostics.is_empty());
}

#[test]
fn test_strict_configuration_rejects_ill_typed_filters() {
    let strict = ParserConfig::strict();
    let error = Query::from_text_with_config("$[?length(@)]", Arc::new(FunctionRegistry::new()), strict.clone())
        .expect_err("Expected a typing failure");
    assert!(matches!(error, jpt::Error::Parse(_)));
    assert!(error.to_string().starts_with("Ill-typed filter: "));

    assert!(
        Query::from_text_with_config("$[?length(@) == 1]", Arc::new(FunctionRegistry::new()), strict).is_ok()
    );

    let invalid = ParserConfig::new().with_max_nesting_depth(0);
    assert!(matches!(
        Query::from_text_with_config("$", Arc::new(FunctionRegistry::new()), invalid),
        Err(jpt::Error::Configuration(_))
    ));
}

#[test]
fn test_query_is_shareable_across_threads() {
    let query = Arc::new(parse("$..price"));
    let handles: Vec<_> = (0..4)
        .map(|_| {
            let query = Arc::clone(&query);
            std::thread::spawn(move || query.apply(&bookstore()).len())
        })
        .collect();
    for handle in handles {
        assert_eq!(handle.join().expect("Worker thread panicked"), 5);
    }
}
