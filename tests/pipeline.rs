//! End-to-end runs of the analysis pipeline against files on disk.

use std::io::Write;
use std::path::Path;
use std::sync::Arc;

use flate2::write::GzEncoder;
use flate2::Compression;

use headline_analyzer::models::Row;
use headline_analyzer::services::annotation::AnnotationError;
use headline_analyzer::services::ner::{load_ner_backend, NerBackend};
use headline_analyzer::services::pipeline::PipelineError;
use headline_analyzer::services::sentiment::{LexiconScorer, SentimentError, SentimentScorer};
use headline_analyzer::services::{
    AnalysisOutcome, AnalysisPipeline, AnnotationEvent, BatchAnnotator, PipelineOptions,
};
use headline_analyzer::table::{EntitiesFormat, TableError, WriteOptions, RESULTS_FILENAME};

const HEADLINES: &str = "\
id,headline,source
1,Apple unveils new iPhone in California,wire
2,,wire
3,Stocks crash as Fed raises rates,desk
";

fn pipeline_with(ner: Arc<dyn NerBackend>, options: PipelineOptions) -> AnalysisPipeline {
    AnalysisPipeline::new(
        BatchAnnotator::new(Arc::new(LexiconScorer::new()), ner),
        options,
    )
}

fn full_pipeline(options: PipelineOptions) -> AnalysisPipeline {
    let loaded = load_ner_backend(true, None);
    assert!(loaded.warning.is_none());
    pipeline_with(loaded.backend, options)
}

fn read_output(path: &Path) -> (Vec<String>, Vec<Vec<String>>) {
    let mut reader = csv::Reader::from_path(path).unwrap();
    let headers = reader.headers().unwrap().iter().map(str::to_string).collect();
    let records = reader
        .records()
        .map(|r| r.unwrap().iter().map(str::to_string).collect())
        .collect();
    (headers, records)
}

fn completed(outcome: AnalysisOutcome) -> headline_analyzer::services::AnalysisReport {
    match outcome {
        AnalysisOutcome::Completed(report) => report,
        AnalysisOutcome::ColumnRequired { headers } => {
            panic!("expected completion, column required among {:?}", headers)
        }
    }
}

#[test]
fn test_headline_csv_end_to_end() {
    let dir = tempfile::tempdir().unwrap();
    let input = dir.path().join("news.csv");
    let output = dir.path().join(RESULTS_FILENAME);
    std::fs::write(&input, HEADLINES).unwrap();

    let pipeline = full_pipeline(PipelineOptions::default());
    let mut events = Vec::new();
    let report = completed(
        pipeline
            .run(&input, None, &output, |e| events.push(e))
            .unwrap(),
    );

    assert_eq!(report.column_name, "headline");
    assert_eq!(report.total_records, 3);
    assert_eq!(report.dropped, 1);
    assert_eq!(report.rows.len(), 2);
    assert!(matches!(
        events.first(),
        Some(AnnotationEvent::Started { total_rows: 2 })
    ));

    let (headers, records) = read_output(&output);
    assert_eq!(headers, vec!["id", "headline", "source", "Sentiment", "Entities"]);
    assert_eq!(records.len(), 2);

    assert_eq!(records[0][0], "1");
    assert_eq!(records[0][1], "Apple unveils new iPhone in California");
    assert_eq!(records[0][4], "[('Apple', 'ORG'), ('California', 'GPE')]");

    assert_eq!(records[1][0], "3");
    assert_eq!(records[1][4], "[('Fed', 'ORG')]");
    let sentiment: f64 = records[1][3].parse().unwrap();
    assert!(sentiment < 0.0 && sentiment >= -1.0);
}

#[test]
fn test_gzip_input_with_title_column() {
    let dir = tempfile::tempdir().unwrap();
    let input = dir.path().join("news.CSV.GZ");
    let output = dir.path().join("out.csv");

    let mut encoder = GzEncoder::new(Vec::new(), Compression::default());
    encoder
        .write_all(b"Id,News Title\n1,NASA and SpaceX delay launch\n2,NA\n3,Markets rally\n")
        .unwrap();
    std::fs::write(&input, encoder.finish().unwrap()).unwrap();

    let pipeline = full_pipeline(PipelineOptions::default());
    let report = completed(pipeline.run(&input, None, &output, |_| {}).unwrap());

    assert_eq!(report.column_name, "News Title");
    assert_eq!(report.rows.len(), 2);
    assert_eq!(report.rows[0].entities().len(), 2);
    assert!(report.rows[1].sentiment() > 0.0);

    let (_, records) = read_output(&output);
    assert_eq!(records[0][3], "[('NASA', 'ORG'), ('SpaceX', 'ORG')]");
    assert_eq!(records[1][3], "[]");
}

#[test]
fn test_missing_gazetteer_degrades_to_empty_entities() {
    let dir = tempfile::tempdir().unwrap();
    let input = dir.path().join("news.csv");
    let output = dir.path().join("out.csv");
    std::fs::write(&input, HEADLINES).unwrap();

    let loaded = load_ner_backend(true, Some(&dir.path().join("missing.toml")));
    assert!(loaded.warning.is_some());
    let pipeline = pipeline_with(loaded.backend, PipelineOptions::default());

    let report = completed(pipeline.run(&input, None, &output, |_| {}).unwrap());
    assert!(report.summary.degraded);
    assert!(report.rows.iter().all(|r| r.entities().is_empty()));

    let (_, records) = read_output(&output);
    assert_eq!(records.len(), 2);
    assert!(records.iter().all(|r| r[4] == "[]"));
}

#[test]
fn test_no_headline_column_defers_without_output() {
    let dir = tempfile::tempdir().unwrap();
    let input = dir.path().join("posts.csv");
    let output = dir.path().join("out.csv");
    std::fs::write(&input, "id,text\n1,Cats win big\n").unwrap();

    let pipeline = full_pipeline(PipelineOptions::default());
    let outcome = pipeline.run(&input, None, &output, |_| {}).unwrap();

    match outcome {
        AnalysisOutcome::ColumnRequired { headers } => assert_eq!(headers, vec!["id", "text"]),
        AnalysisOutcome::Completed(_) => panic!("expected deferral"),
    }
    assert!(!output.exists());
}

#[test]
fn test_explicit_column_selected_only_json() {
    let dir = tempfile::tempdir().unwrap();
    let input = dir.path().join("posts.tsv");
    let output = dir.path().join("out.tsv");
    std::fs::write(&input, "id\ttext\n1\tGoogle sues Microsoft\n").unwrap();

    let options = PipelineOptions {
        read: headline_analyzer::table::ReadOptions { delimiter: b'\t' },
        write: WriteOptions {
            delimiter: b'\t',
            entities_format: EntitiesFormat::Json,
            selected_only: true,
        },
        default_na_values: true,
    };
    let pipeline = full_pipeline(options);
    completed(pipeline.run(&input, Some("TEXT"), &output, |_| {}).unwrap());

    let mut reader = csv::ReaderBuilder::new()
        .delimiter(b'\t')
        .from_path(&output)
        .unwrap();
    let headers: Vec<String> = reader.headers().unwrap().iter().map(str::to_string).collect();
    assert_eq!(headers, vec!["text", "Sentiment", "Entities"]);

    let record = reader.records().next().unwrap().unwrap();
    assert_eq!(&record[0], "Google sues Microsoft");
    assert_eq!(&record[2], r#"[["Google","ORG"],["Microsoft","ORG"]]"#);
}

#[test]
fn test_malformed_input_writes_nothing() {
    let dir = tempfile::tempdir().unwrap();
    let input = dir.path().join("broken.csv");
    let output = dir.path().join("out.csv");
    std::fs::write(&input, "id,headline\n1,Markets rally,extra\n").unwrap();

    let pipeline = full_pipeline(PipelineOptions::default());
    let result = pipeline.run(&input, None, &output, |_| {});

    assert!(matches!(
        result,
        Err(PipelineError::Table(TableError::Malformed(_)))
    ));
    assert!(!output.exists());
}

#[test]
fn test_short_rows_are_kept_or_dropped_by_text() {
    let dir = tempfile::tempdir().unwrap();
    let input = dir.path().join("news.csv");
    let output = dir.path().join("out.csv");
    std::fs::write(
        &input,
        "id,headline,source\n1,Markets rally\n2\n3,Cats win big,wire\n",
    )
    .unwrap();

    let pipeline = full_pipeline(PipelineOptions::default());
    let report = completed(pipeline.run(&input, None, &output, |_| {}).unwrap());

    assert_eq!(report.total_records, 3);
    assert_eq!(report.dropped, 1);
    assert_eq!(report.rows.len(), 2);

    let (headers, records) = read_output(&output);
    assert_eq!(headers, vec!["id", "headline", "source", "Sentiment", "Entities"]);
    assert_eq!(records[0][..3], ["1", "Markets rally", ""]);
    assert!(records[0][3].parse::<f64>().unwrap() > 0.0);
    assert_eq!(records[1][..3], ["3", "Cats win big", "wire"]);
}

struct BrokenScorer;

impl SentimentScorer for BrokenScorer {
    fn scorer_id(&self) -> &str {
        "broken"
    }

    fn polarity(&self, _text: &str) -> Result<f64, SentimentError> {
        Err(SentimentError::Scoring("model unavailable".to_string()))
    }
}

#[test]
fn test_sentiment_failure_writes_nothing() {
    let dir = tempfile::tempdir().unwrap();
    let input = dir.path().join("news.csv");
    let output = dir.path().join("out.csv");
    std::fs::write(&input, HEADLINES).unwrap();

    let pipeline = AnalysisPipeline::new(
        BatchAnnotator::new(Arc::new(BrokenScorer), load_ner_backend(true, None).backend),
        PipelineOptions::default(),
    );
    let result = pipeline.run(&input, None, &output, |_| {});

    assert!(matches!(
        result,
        Err(PipelineError::Annotation(AnnotationError::Sentiment { index: 0, .. }))
    ));
    assert!(!output.exists());
}

#[test]
fn test_annotation_is_idempotent() {
    let annotator = BatchAnnotator::new(
        Arc::new(LexiconScorer::new()),
        load_ner_backend(true, None).backend,
    );
    let rows = vec![
        Row::from_text(0, "President Joe Biden visits Ukraine"),
        Row::from_text(1, "Oil prices surge 5% on Monday"),
    ];

    let first = annotator.annotate(&rows).unwrap();
    let second = annotator.annotate(&rows).unwrap();
    assert_eq!(first, second);
    assert_eq!(first[0].entities().len(), 2);
}
