use sentiment_etl::{
    threshold, Dataset, LexiconScorer, SentimentClassifier, SentimentLabel, SentimentResult,
    TextRecord,
};
use serde_json::json;

fn classifier() -> SentimentClassifier<LexiconScorer> {
    SentimentClassifier::new(LexiconScorer::new())
}

#[test]
fn test_threshold_boundary_values() {
    let cases = [
        (-1.0, SentimentLabel::Negative),
        (-0.0001, SentimentLabel::Negative),
        (0.0, SentimentLabel::Neutral),
        (0.0001, SentimentLabel::Positive),
        (1.0, SentimentLabel::Positive),
    ];
    for (polarity, expected) in cases {
        assert_eq!(threshold(polarity), expected, "polarity {}", polarity);
    }
}

#[test]
fn test_float_input_is_scored_not_unknown() {
    let result = classifier().classify(&TextRecord::Number(3.14));
    assert_ne!(result.label, SentimentLabel::Unknown);
    assert!(result.polarity.is_some());
}

#[test]
fn test_non_text_inputs_yield_sentinel() {
    let c = classifier();
    let inputs = [
        TextRecord::from(Option::<String>::None),
        TextRecord::from(true),
        TextRecord::from(json!([1, 2])),
        TextRecord::from(42_i64),
    ];
    for input in &inputs {
        assert_eq!(c.classify(input), SentimentResult::UNKNOWN, "{:?}", input);
    }
}

#[test]
fn test_empty_string_is_neutral_every_time() {
    let c = classifier();
    let first = c.classify(&TextRecord::from(""));
    assert_eq!(first.label, SentimentLabel::Neutral);
    assert_eq!(first.polarity, Some(0.0));
    for _ in 0..5 {
        assert_eq!(c.classify(&TextRecord::from("")), first);
    }
}

#[test]
fn test_batch_matches_single_classification() {
    let c = classifier();
    let rows = vec![
        TextRecord::from("I love this!"),
        TextRecord::from(json!({"nested": true})),
        TextRecord::from("Not good at all."),
        TextRecord::Number(f64::NAN),
        TextRecord::from("very bad service"),
    ];

    let batch = c.classify_batch(&rows);
    assert_eq!(batch.len(), rows.len());
    for (i, row) in rows.iter().enumerate() {
        assert_eq!(batch[i], c.classify(row), "row {}", i);
    }
    assert_eq!(c.classify_batch_parallel(&rows, 3), batch);
}

#[test]
fn test_csv_column_end_to_end_labels() {
    let csv = "text\nI love this!\nI hate this.\nIt is a table.\n42.0\n";
    let dataset = Dataset::from_csv_bytes(csv.as_bytes()).unwrap();
    let rows = dataset.column("text").unwrap();

    let results = classifier().classify_batch(&rows);
    let label_of_42 = classifier().classify(&TextRecord::from("42.0")).label;

    let labels: Vec<SentimentLabel> = results.iter().map(|r| r.label).collect();
    assert_eq!(
        labels,
        vec![
            SentimentLabel::Positive,
            SentimentLabel::Negative,
            SentimentLabel::Neutral,
            label_of_42,
        ]
    );
    assert_eq!(results[2].polarity, Some(0.0));
}

#[test]
fn test_float_column_is_converted_before_scoring() {
    let csv = "value\n42.0\n3.14\n";
    let dataset = Dataset::from_csv_bytes(csv.as_bytes()).unwrap();
    let rows = dataset.column("value").unwrap();
    assert_eq!(rows[0], TextRecord::Number(42.0));

    let c = classifier();
    let results = c.classify_batch(&rows);
    assert_eq!(results[0], c.classify(&TextRecord::from("42.0")));
    assert_eq!(results[1], c.classify(&TextRecord::from("3.14")));
}

#[test]
fn test_reordering_rows_reorders_results() {
    let c = classifier();
    let rows: Vec<TextRecord> = ["great", "awful", "a chair", "not bad"]
        .into_iter()
        .map(TextRecord::from)
        .collect();
    let shuffled = vec![rows[2].clone(), rows[0].clone(), rows[3].clone(), rows[1].clone()];

    let original = c.classify_batch(&rows);
    let reordered = c.classify_batch(&shuffled);
    assert_eq!(
        reordered,
        vec![original[2], original[0], original[3], original[1]]
    );
}
