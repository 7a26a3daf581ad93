//! Integration tests for news_keyrank

use news_keyrank::*;
use std::collections::BTreeMap;
use std::fs;
use std::io::Cursor;
use std::path::Path;

/// Sample article for testing
const SAMPLE_TEXT: &str = r#"
The central bank raised interest rates on Thursday, surprising the market.
Analysts said the decision would slow consumer spending and weigh on
economic growth. Shares in London fell sharply after the announcement, while
the pound rose against the dollar.
"#;

/// Tags every whitespace-separated word as a noun
struct NounTagger;

impl Tagger for NounTagger {
    fn tag(&self, text: &str) -> Result<Vec<TaggedToken>> {
        Ok(text
            .split_whitespace()
            .map(|word| TaggedToken::new(word, "NN"))
            .collect())
    }
}

fn doc(name: &str, text: &str) -> Document {
    Document::new(format!("data/{name}"), name, text)
}

#[test]
fn test_full_extraction_pipeline() {
    let config = ClassifierConfig::default();

    // Tag
    let tagged = HeuristicTagger::new().tag(SAMPLE_TEXT).unwrap();
    assert!(!tagged.is_empty());

    let candidates: Vec<String> = tagged
        .iter()
        .filter(|t| t.has_tag_in(&config.include_tags))
        .map(|t| t.text.clone())
        .collect();
    assert!(candidates.iter().any(|c| c == "market"));

    // Build graph
    let builder = PhraseGraph::from_candidates(&candidates);
    let n = builder.node_count();
    assert!(n > 1);
    assert_eq!(builder.edge_count(), n * (n - 1) / 2);

    // Convert to CSR
    let graph = CsrGraph::from_builder(&builder);
    assert_eq!(graph.num_nodes, n);

    // Run PageRank
    let pagerank = StandardPageRank::new()
        .with_damping(config.damping)
        .with_threshold(config.convergence_threshold)
        .run(&graph);
    assert!(pagerank.converged);
    let total: f64 = pagerank.scores.iter().sum();
    assert!((total - 1.0).abs() < 1e-9);

    // Select and rebuild phrases
    let ranker = KeywordRanker::with_config(&config);
    let key_phrases = ranker.select_key_phrases(&graph, &pagerank);
    assert_eq!(key_phrases.len(), n / 3 + 1);

    let sequence: Vec<&str> = tagged.iter().map(|t| t.text.as_str()).collect();
    let phrases = ranker.reconstruct_phrases(&sequence, &key_phrases);
    assert!(!phrases.is_empty());

    // Normalize
    let keywords = TokenNormalizer::new().normalize(&phrases);
    assert!(!keywords.is_empty());
    for keyword in &keywords {
        assert_eq!(keyword, &keyword.to_lowercase());
        assert!(!keyword.contains('-'));
        assert!(!keyword.contains(' '));
    }
}

#[test]
fn test_extractor_matches_manual_pipeline() {
    let extractor = KeywordExtractor::new(HeuristicTagger::new());
    let info = extractor.extract_with_info(SAMPLE_TEXT).unwrap();

    assert!(info.converged);
    assert!(!info.key_phrases.is_empty());
    assert_eq!(
        info.keywords,
        TokenNormalizer::new().normalize(&info.phrases)
    );
    assert_eq!(extractor.extract(SAMPLE_TEXT).unwrap(), info.keywords);
}

#[test]
fn test_six_token_document_selects_three() {
    let extractor = KeywordExtractor::new(NounTagger);
    let info = extractor
        .extract_with_info("market shares bank rates pound dollar")
        .unwrap();
    assert_eq!(info.key_phrases.len(), 3);
}

#[test]
fn test_empty_document_has_no_keywords() {
    let extractor = KeywordExtractor::new(HeuristicTagger::new());
    assert!(extractor.extract("").unwrap().is_empty());
    assert!(extractor.extract("of the and , .").unwrap().is_empty());
}

#[test]
fn test_market_vote_scenario() {
    let mut training = SelfTrainingLoop::new(NounTagger, SimulatedLabelProvider);
    training
        .bootstrap(&[
            (Label::Business, vec![doc("growth.txt", "market")]),
            (Label::Politics, vec![doc("election.txt", "vote")]),
        ])
        .unwrap();

    let expected = [
        ("market".to_string(), Label::Business),
        ("vote".to_string(), Label::Politics),
    ];
    assert_eq!(
        training.knowledge().snapshot(),
        expected.into_iter().collect::<BTreeMap<_, _>>()
    );
    assert_eq!(
        training.predict("market").unwrap(),
        Prediction::new(Label::Business, 1.0)
    );
}

#[test]
fn test_conflicting_keyword_falls_back_to_default() {
    let mut base = KnowledgeBase::new();
    base.add_to_knowledge(["market"], Label::Business);
    base.add_to_knowledge(["market"], Label::Politics);
    base.add_to_knowledge(["film"], Label::Entertainment);

    let scorer = LabelScorer::default();
    assert_eq!(base.get("market"), Some(Label::NoLabel));
    assert_eq!(scorer.score(&base, &["market"], Label::Business), 0.0);
    assert_eq!(scorer.score(&base, &["market"], Label::Politics), 0.0);
    assert_eq!(scorer.score(&base, &["goal"], Label::Politics), 0.2);
    assert_eq!(
        scorer.predict(&base, &["market", "film"]),
        Prediction::new(Label::Entertainment, 0.5)
    );
}

fn write_corpus(root: &Path) {
    let files: [(&str, &str, &str); 9] = [
        ("train/labelled/business", "b1.txt", "The market rallied as shares and profits rose."),
        ("train/labelled/politics", "p1.txt", "The election vote in parliament was close."),
        ("train/labelled/sport", "s1.txt", "The striker scored a goal in the cup match."),
        ("train/unlabelled", "business_2.txt", "Investors watched the market and profit figures."),
        ("train/unlabelled", "politics_2.txt", "Parliament will vote on the election bill."),
        ("train/unlabelled", "tech_2.txt", "The new phone has a faster chip and software."),
        ("test", "business_3.txt", "The market fell as profit warnings spread."),
        ("test", "sport_3.txt", "A late goal won the cup match."),
        ("test", "tech_3.txt", "Software on the phone chip was updated."),
    ];
    for (dir, name, text) in files {
        let dir = root.join(dir);
        fs::create_dir_all(&dir).unwrap();
        fs::write(dir.join(name), text).unwrap();
    }
}

#[test]
fn test_end_to_end_on_disk() {
    let tmp = tempfile::tempdir().unwrap();
    write_corpus(tmp.path());

    let corpus = Corpus::load(tmp.path()).unwrap();
    assert_eq!(corpus.labelled_count(), 3);
    assert_eq!(corpus.unlabelled.len(), 3);
    assert_eq!(corpus.test.len(), 3);

    let run = || {
        let mut training = SelfTrainingLoop::new(HeuristicTagger::new(), SimulatedLabelProvider);
        let report = training.run(&corpus).unwrap();
        assert_eq!(training.phase(), TrainingPhase::Done);
        report
    };

    let report = run();
    assert_eq!(report.bootstrap_documents, 3);
    assert_eq!(report.iterations.len(), 2);
    assert_eq!(report.evaluation.total, 3);
    assert!((0.0..=100.0).contains(&report.evaluation.accuracy));
    assert_eq!(
        report.evaluation.accuracy,
        report.evaluation.true_positives as f64 / 3.0 * 100.0
    );
    assert!(report.knowledge_size > 0);

    // Identical input, identical run
    assert_eq!(run(), report);
}

#[test]
fn test_report_serializes() {
    let corpus = Corpus::new()
        .with_labelled(Label::Sport, vec![doc("s.txt", "goal")])
        .with_test(vec![doc("sport_1.txt", "goal")]);

    let mut training = SelfTrainingLoop::new(NounTagger, SimulatedLabelProvider);
    let report = training.run(&corpus).unwrap();

    let json = serde_json::to_value(&report).unwrap();
    assert_eq!(json["evaluation"]["accuracy"], 100.0);
    assert_eq!(json["evaluation"]["predictions"][0]["predicted"], "sport");
    assert_eq!(json["iterations"].as_array().unwrap().len(), 2);
}

#[test]
fn test_console_labeller_in_loop() {
    let mut console = ConsoleLabelProvider::new(Cursor::new("football\n3\n"), Vec::new());
    {
        let mut training = SelfTrainingLoop::new(NounTagger, &mut console);
        training.bootstrap(&[]).unwrap();
        let summaries = training.run_iterations(&[doc("x.txt", "goal")]).unwrap();

        assert_eq!(summaries[0].provider_requests, 1);
        assert_eq!(summaries[1].human_help, 0);
        assert_eq!(training.working_labels()["data/x.txt"], Label::Sport);
    }

    let (_, output) = console.into_inner();
    let output = String::from_utf8(output).unwrap();
    assert!(output.contains("Enter label for data/x.txt"));
    assert!(output.contains("Invalid Label entered : football"));
}

#[test]
fn test_missing_category_aborts_evaluation() {
    let corpus = Corpus::new()
        .with_labelled(Label::Sport, vec![doc("s.txt", "goal")])
        .with_test(vec![doc("sport_1.txt", "goal"), doc("untitled.txt", "goal")]);

    let mut training = SelfTrainingLoop::new(NounTagger, SimulatedLabelProvider);
    let err = training.run(&corpus).unwrap_err();
    assert_eq!(
        err,
        ClassifierError::UnknownDocumentCategory {
            document: "untitled.txt".to_string()
        }
    );
}

#[test]
fn test_config_file() {
    let tmp = tempfile::tempdir().unwrap();
    let path = tmp.path().join("config.json");
    fs::write(
        &path,
        r#"{"probability_threshold": 0.9, "include_tags": ["NN", "NNP"]}"#,
    )
    .unwrap();

    let config = ClassifierConfig::from_json_file(&path).unwrap();
    assert_eq!(config.probability_threshold, 0.9);
    assert_eq!(config.include_tags, vec!["NN", "NNP"]);
    assert_eq!(config.max_training_iterations, 2);

    let training = SelfTrainingLoop::with_config(NounTagger, SimulatedLabelProvider, config);
    assert!(training.is_ok());

    let err = ClassifierConfig::from_json_file(tmp.path().join("missing.json")).unwrap_err();
    assert!(matches!(err, ClassifierError::Io { .. }));
}
