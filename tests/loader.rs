#![cfg(feature = "io-parquet")]

use anyhow::Result;
use newsloader::testing::*;
use newsloader::*;
use std::fs;

fn sample_corpus() -> Result<TestCorpus> {
    let mut builder = CorpusBuilder::new()?.add_samples(&sample_postings())?;
    for (name, content) in malformed_postings() {
        builder = builder.add_raw("misc.forsale", name, content)?;
    }
    Ok(builder.build())
}

#[test]
fn parses_the_great_game_example_with_positional_category() -> Result<()> {
    let corpus = CorpusBuilder::new()?
        .with_prefix("root")
        .with_prefix("group")
        .with_prefix("20_newsgroups")
        .add_raw(
            "rec.sport",
            "102",
            b"Xref: cantaloupe rec.sport:102\nSubject: Great game\n\nHello there\nbody continues",
        )?
        .build();

    let files = enumerate_files(corpus.root())?;
    assert_eq!(files.len(), 1);
    // Relative to the temp dir, so the positional rule sees `root/group/20_newsgroups/...`.
    let relative = corpus
        .root()
        .strip_prefix(corpus.base())?
        .join(files[0].strip_prefix(corpus.root())?);

    let text = fs::read_to_string(&files[0])?;
    let posting = parse_text(&text, &relative, CategoryRule::PathSegment(2)).unwrap();
    assert_eq!(posting.body, "Hello there\nbody continues");
    assert_eq!(posting.subject, "Great game");
    assert_eq!(posting.category, "20_newsgroups");

    let posting = parse_text(&text, &relative, CategoryRule::ParentDir).unwrap();
    assert_eq!(posting.category, "rec.sport");
    Ok(())
}

#[test]
fn bad_files_are_reported_not_fatal() -> Result<()> {
    let corpus = sample_corpus()?;
    let outcome = load_corpus(corpus.root(), &ParseOptions::default())?;

    let total = sample_postings().len() + malformed_postings().len();
    assert_eq!(outcome.report.files_seen(), total);
    assert_eq!(outcome.dataset.len(), sample_postings().len());
    assert_eq!(outcome.report.rows(), outcome.dataset.len());
    assert_eq!(outcome.report.discard_count(), malformed_postings().len());

    let causes: Vec<_> = outcome
        .report
        .discards()
        .iter()
        .map(|d| {
            let name = d.path.file_name().unwrap().to_string_lossy().into_owned();
            (name, d.failure.clone())
        })
        .collect();
    assert!(causes.contains(&("no_blank_line".into(), ParseFailure::MissingBodySeparator)));
    assert!(causes.contains(&("no_subject".into(), ParseFailure::MissingSubject)));
    assert!(causes.contains(&("latin1".into(), ParseFailure::Undecodable)));
    Ok(())
}

#[test]
fn rows_match_fixture_content() -> Result<()> {
    let corpus = sample_corpus()?;
    let outcome = load_corpus(corpus.root(), &ParseOptions::default())?;

    let mut expected: Vec<DatasetRow> = sample_postings()
        .iter()
        .map(|s| DatasetRow {
            message: s.body.to_string(),
            subject: s.subject.to_string(),
            category: s.category.to_string(),
        })
        .collect();
    expected.sort();
    assert_eq!(outcome.dataset.sorted_rows(), expected);
    Ok(())
}

#[test]
fn lossy_decoding_keeps_latin1_postings() -> Result<()> {
    let corpus = sample_corpus()?;
    let options = ParseOptions {
        decoding: Decoding::Lossy,
        ..ParseOptions::default()
    };
    let outcome = load_corpus(corpus.root(), &options)?;
    assert_eq!(outcome.dataset.len(), sample_postings().len() + 1);
    assert!(
        outcome
            .dataset
            .iter()
            .any(|r| r.subject == "caf\u{fffd}" && r.category == "misc.forsale")
    );
    Ok(())
}

#[test]
fn loading_twice_is_idempotent() -> Result<()> {
    let corpus = sample_corpus()?;
    let first = load_corpus(corpus.root(), &ParseOptions::default())?;
    let second = load_corpus(corpus.root(), &ParseOptions::default())?;
    assert_eq!(first.dataset.sorted_rows(), second.dataset.sorted_rows());
    assert_eq!(first.report, second.report);
    Ok(())
}

#[test]
fn run_writes_parquet_with_three_string_columns() -> Result<()> {
    let corpus = sample_corpus()?;
    let out_dir = tempfile::tempdir()?;
    let output = out_dir.path().join("news.parquet");

    let summary = run(&LoaderConfig::new(corpus.root(), &output))?;
    assert_eq!(summary.format, OutputFormat::Parquet);
    assert_eq!(summary.rows_written, sample_postings().len());

    assert_eq!(
        read_parquet_column_names(&output)?,
        ["Message", "Subject", "Category"]
    );
    let back = read_dataset(&output)?;
    let loaded = load_corpus(corpus.root(), &ParseOptions::default())?;
    assert_eq!(back.len(), summary.rows_written);
    assert_eq!(back.sorted_rows(), loaded.dataset.sorted_rows());
    Ok(())
}

#[test]
fn run_overwrites_existing_output() -> Result<()> {
    let corpus = sample_corpus()?;
    let out_dir = tempfile::tempdir()?;
    let output = out_dir.path().join("news.parquet");
    fs::write(&output, b"stale bytes, not parquet")?;

    run(&LoaderConfig::new(corpus.root(), &output))?;
    assert_eq!(read_dataset(&output)?.len(), sample_postings().len());
    Ok(())
}

#[test]
fn empty_corpus_still_writes_schema() -> Result<()> {
    let corpus = CorpusBuilder::new()?.build();
    let out_dir = tempfile::tempdir()?;
    let output = out_dir.path().join("empty.parquet");

    let summary = run(&LoaderConfig::new(corpus.root(), &output))?;
    assert_eq!(summary.rows_written, 0);
    assert!(summary.report.is_clean());
    assert_eq!(read_parquet_column_names(&output)?.len(), 3);
    Ok(())
}

#[test]
fn run_writes_discard_report() -> Result<()> {
    let corpus = sample_corpus()?;
    let out_dir = tempfile::tempdir()?;
    let report_path = out_dir.path().join("discards.json");

    let config = LoaderConfig::new(corpus.root(), out_dir.path().join("news.parquet"))
        .with_report_path(&report_path);
    let summary = run(&config)?;

    let written: DiscardReport = serde_json::from_str(&fs::read_to_string(&report_path)?)?;
    assert_eq!(written, summary.report);
    assert_eq!(written.discard_count(), malformed_postings().len());
    Ok(())
}

#[test]
fn missing_root_aborts_before_writing() {
    let out_dir = tempfile::tempdir().unwrap();
    let output = out_dir.path().join("news.parquet");
    let err = run(&LoaderConfig::new(out_dir.path().join("absent"), &output)).unwrap_err();
    assert!(format!("{err:#}").contains("not accessible"));
    assert!(!output.exists());
}

#[test]
fn unwritable_destination_is_fatal() -> Result<()> {
    let corpus = sample_corpus()?;
    let out_dir = tempfile::tempdir()?;
    let output = out_dir.path().join("no").join("such").join("dir.parquet");

    let err = run(&LoaderConfig::new(corpus.root(), &output)).unwrap_err();
    assert!(format!("{err:#}").contains("does not exist"));
    assert!(!output.exists());
    Ok(())
}

#[test]
fn positional_rule_fails_short_paths() -> Result<()> {
    let corpus = CorpusBuilder::new()?
        .add_posting("sci.med", "58000", "Vitamin C", "Eat oranges.")?
        .build();
    // Temp paths are a handful of segments deep; this index is far past the end.
    let options = ParseOptions {
        category_rule: CategoryRule::PathSegment(512),
        ..ParseOptions::default()
    };
    let outcome = load_corpus(corpus.root(), &options)?;
    assert!(outcome.dataset.is_empty());
    assert_eq!(
        outcome
            .report
            .count_where(|f| matches!(f, ParseFailure::MissingCategory { .. })),
        1
    );
    Ok(())
}
