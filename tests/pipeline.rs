use std::fs;
use std::path::Path;

use qasieve::io::{JsonArrayWriter, WriterTrait};
use qasieve::pipelines::qa::{QaRecord, RejectReason};
use qasieve::pipelines::{Pipeline, QaPipeline};
use qasieve::processing::check_file;
use serde_json::json;

fn long_answer(nb_words: usize) -> String {
    let words = [
        "cats", "are", "small", "carnivorous", "mammals", "that", "people", "keep", "as",
        "companions",
    ];
    let text = words.iter().cycle().take(nb_words).copied().collect::<Vec<_>>();
    format!("{}.", text.join(" "))
}

fn write_lines(path: &Path, lines: &[String]) {
    fs::write(path, lines.join("\n")).unwrap();
}

fn read_dataset(path: &Path) -> Vec<QaRecord> {
    serde_json::from_str(&fs::read_to_string(path).unwrap()).unwrap()
}

#[test_log::test]
fn short_input_long_answer() {
    let dir = tempfile::tempdir().unwrap();
    let src = dir.path().join("src.jsonl");
    let dst = dir.path().join("qa.json");
    let answer = long_answer(250);
    write_lines(
        &src,
        &[json!({"input": "cats", "value": answer}).to_string()],
    );

    let report = QaPipeline::new(src, dst.clone()).run().unwrap();
    assert_eq!(report.accepted, 1);

    let records = read_dataset(&dst);
    assert_eq!(records.len(), 1);
    assert_eq!(
        records[0].question,
        "What is cats cats are small carnivorous mammals?"
    );
    assert_eq!(records[0].answer, answer);
    assert_eq!(records[0].context.split(' ').count(), 6);
}

#[test_log::test]
fn malformed_lines_are_skipped() {
    let dir = tempfile::tempdir().unwrap();
    let src = dir.path().join("src.jsonl");
    let dst = dir.path().join("qa.json");
    let good = json!({
        "input": "what does the word feline mean",
        "target": "Feline refers to cats and other members of their biological family, which are carnivores."
    })
    .to_string();
    write_lines(
        &src,
        &[
            good.clone(),
            "{\"input\": ".to_string(),
            String::new(),
            json!({"input": "no target here"}).to_string(),
            json!({"input": "too short", "value": "Too short."}).to_string(),
            good,
        ],
    );

    let report = QaPipeline::new(src, dst.clone())
        .with_chunk_size(1)
        .run()
        .unwrap();

    assert_eq!(report.skipped_lines, 2);
    assert_eq!(report.records, 3);
    assert_eq!(report.chunks, 3);
    assert_eq!(report.accepted, 2);
    assert_eq!(report.rejections.get(&RejectReason::TooFewWords), Some(&1));
    assert_eq!(read_dataset(&dst).len(), 2);
    assert!(check_file(&dst).unwrap().is_valid());
}

#[test]
fn appends_to_existing_dataset() {
    let dir = tempfile::tempdir().unwrap();
    let src = dir.path().join("src.jsonl");
    let dst = dir.path().join("qa.json");

    let existing = QaRecord {
        question: "what is a cat?".to_string(),
        context: "Here is some information: a cat is a feline.".to_string(),
        answer: "a cat is a feline.".to_string(),
    };
    let mut w = JsonArrayWriter::new(&dst).unwrap();
    w.write_single(&existing).unwrap();
    drop(w);

    write_lines(
        &src,
        &[json!({"input": "cats", "value": long_answer(220)}).to_string()],
    );
    QaPipeline::new(src, dst.clone()).run().unwrap();

    let records = read_dataset(&dst);
    assert_eq!(records.len(), 2);
    assert_eq!(records[0], existing);
}

#[test]
fn corrupt_dataset_is_replaced() {
    let dir = tempfile::tempdir().unwrap();
    let src = dir.path().join("src.jsonl");
    let dst = dir.path().join("qa.json");
    fs::write(&dst, "[{\"question\": ").unwrap();

    write_lines(
        &src,
        &[json!({"input": "cats", "value": long_answer(220)}).to_string()],
    );
    QaPipeline::new(src, dst.clone()).run().unwrap();
    assert_eq!(read_dataset(&dst).len(), 1);
}

#[test]
fn repair_recovers_lines() {
    let dir = tempfile::tempdir().unwrap();
    let src = dir.path().join("src.jsonl");
    let line = format!("{{input: \"cats\", value: \"{}\",}}", long_answer(220));
    write_lines(&src, &[line]);

    let report = QaPipeline::new(src.clone(), dir.path().join("a.json"))
        .run()
        .unwrap();
    assert_eq!(report.skipped_lines, 1);
    assert_eq!(report.accepted, 0);

    let report = QaPipeline::new(src, dir.path().join("b.json"))
        .with_repair(true)
        .run()
        .unwrap();
    assert_eq!(report.skipped_lines, 0);
    assert_eq!(report.accepted, 1);
}
