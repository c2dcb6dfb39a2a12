use dolphin_core::config::LexiconPaths;
use dolphin_core::diagnostics::Diagnostic;
use dolphin_core::scoring::{
    AssessmentSession, LexiconError, LexiconKind, ResponseDocument, Scheme, Score, TraitGroup,
};
use std::fs;
use std::path::Path;

fn write_tables(
    dir: &Path,
    self_table: &str,
    concept_table: &str,
    adjusted_table: &str,
) -> LexiconPaths {
    let paths = LexiconPaths {
        self_words: dir.join("selfWeight.txt"),
        concept_words: dir.join("conceptWeight.txt"),
        adjusted_words: dir.join("adjustedWeight.txt"),
    };
    fs::write(&paths.self_words, self_table).expect("write self table");
    fs::write(&paths.concept_words, concept_table).expect("write concept table");
    fs::write(&paths.adjusted_words, adjusted_table).expect("write adjusted table");
    paths
}

#[test]
fn single_word_scenario_fills_every_scheme() {
    let dir = tempfile::tempdir().expect("temp dir");
    let paths = write_tables(dir.path(), "cat,A 3\n", "dog,B 4\n", "cat,A 1\n");
    let mut sink = Vec::new();

    let session = AssessmentSession::load(&paths, &mut sink).expect("lexicons load");
    let assessment = session.score(&ResponseDocument::parse("-Alice cat $ dog"), &mut sink);
    let persona = &assessment.persona;

    assert_eq!(persona.subject(), Some("Alice"));
    assert_eq!(persona.weights(Scheme::SelfProjection)[TraitGroup::A], 3);
    assert_eq!(persona.weights(Scheme::Adjusted)[TraitGroup::A], 1);
    assert_eq!(persona.weights(Scheme::Task)[TraitGroup::A], 0);
    assert_eq!(persona.weights(Scheme::Concept)[TraitGroup::B], 4);
    assert_eq!(persona.tally(Scheme::SelfProjection, TraitGroup::A).count(), 1);
    assert_eq!(persona.tally(Scheme::Adjusted, TraitGroup::A).count(), 1);
    assert_eq!(persona.tally(Scheme::Concept, TraitGroup::B).count(), 1);
    assert!(sink.is_empty(), "unexpected diagnostics: {sink:?}");

    let ceilings = session.lexicons().ceilings();
    assert_eq!(ceilings.task[TraitGroup::A], 2);

    let record = &assessment.record;
    assert_eq!(record.subject, "Alice");
    assert_eq!(record.self_projection.groups[TraitGroup::A], Score::Defined(1.0));
    assert_eq!(record.self_projection.groups[TraitGroup::B], Score::Undefined);
    assert_eq!(record.concept.groups[TraitGroup::B], Score::Defined(1.0));
    assert_eq!(record.decision_approach, Score::Undefined);
    assert_eq!(
        (record.totals.self_projection, record.totals.concept, record.totals.adjusted),
        (1, 1, 1)
    );
}

#[test]
fn full_lexicons_produce_defined_scores() {
    let dir = tempfile::tempdir().expect("temp dir");
    let paths = write_tables(
        dir.path(),
        concat!(
            "/ self weights\n",
            "kind,A 2\nwarm,A 2\nbold,B 4\nfirm,B 4\n",
            "calm,C 1\nquiet,C 1\nsharp,D 3\nquick,D 3\n",
        ),
        "brave,A 1\nloud,B 1\nsteady,C 1\nfast,D 1\n",
        "kind,A 1\nbold,B 1\ncalm,C 1\nsharp,D 1\n",
    );
    let mut sink = Vec::new();
    let session = AssessmentSession::load(&paths, &mut sink).expect("lexicons load");

    let assessment = session.score(
        &ResponseDocument::parse("-ada Kind, warm; bold calm! quick $ brave fast fast"),
        &mut sink,
    );
    let record = &assessment.record;

    assert_eq!(record.self_projection.groups[TraitGroup::A], Score::Defined(1.0));
    assert_eq!(record.self_projection.groups[TraitGroup::B], Score::Defined(0.5));
    assert_eq!(record.self_projection.groups[TraitGroup::C], Score::Defined(0.5));
    assert_eq!(record.self_projection.groups[TraitGroup::D], Score::Defined(0.5));
    assert_eq!(record.self_projection.average, Score::Defined(0.625));

    // adjusted: kind(A) 1/1, bold(B) 1/1, calm(C) 1/1, none in D
    // task: warm(A) 2/3, none in B or C, quick(D) 3/5
    let self_avg: f64 = 0.625;
    let d_a: f64 = (1.0 + 1.0 + 1.0 + 0.0) / 4.0;
    let d_t: f64 = (2.0 / 3.0 + 0.0 / 7.0 + 0.0 / 1.0 + 3.0 / 5.0) / 4.0;
    let expected = self_avg - (d_t - d_a).abs() * self_avg;
    match record.decision_approach {
        Score::Defined(value) => assert!((value - expected).abs() < 1e-12),
        Score::Undefined => panic!("decision approach should be defined"),
    }

    assert_eq!(record.concept.groups[TraitGroup::A], Score::Defined(1.0));
    assert_eq!(record.concept.groups[TraitGroup::D], Score::Defined(1.0));
    assert_eq!(record.concept.average, Score::Defined(0.5));
    assert_eq!(
        sink,
        vec![Diagnostic::DuplicateWord {
            scheme: Scheme::Concept,
            word: "fast".to_string()
        }]
    );
}

#[test]
fn duplicate_in_any_table_aborts_loading() {
    let dir = tempfile::tempdir().expect("temp dir");
    let paths = write_tables(
        dir.path(),
        "cat,A 3\n",
        "dog,B 4\nDog!,C 1\n",
        "cat,A 1\n",
    );

    match AssessmentSession::load(&paths, &mut Vec::new()) {
        Err(LexiconError::DuplicateWord { kind, word, line }) => {
            assert_eq!(kind, LexiconKind::ConceptWords);
            assert_eq!(word, "dog");
            assert_eq!(line, 2);
        }
        Err(other) => panic!("expected duplicate word error, got {other:?}"),
        Ok(_) => panic!("duplicate lexicon entry must abort loading"),
    }
}

#[test]
fn missing_tables_degrade_to_undefined_scores() {
    let dir = tempfile::tempdir().expect("temp dir");
    let paths = LexiconPaths {
        self_words: dir.path().join("missing-self.txt"),
        concept_words: dir.path().join("missing-concept.txt"),
        adjusted_words: dir.path().join("missing-adjusted.txt"),
    };
    let mut sink = Vec::new();

    let session = AssessmentSession::load(&paths, &mut sink).expect("missing tables are tolerated");
    assert_eq!(sink.len(), 3);
    assert!(sink.iter().all(Diagnostic::is_resource_problem));

    let assessment = session.score(&ResponseDocument::parse("-ada cat $ dog"), &mut sink);
    assert_eq!(assessment.record.self_projection.average, Score::Undefined);
    assert_eq!(assessment.record.concept.average, Score::Undefined);
    assert_eq!(sink.len(), 5);
}

#[test]
fn session_scores_several_responses_independently() {
    let dir = tempfile::tempdir().expect("temp dir");
    let paths = write_tables(dir.path(), "cat,A 3\nowl,A 1\n", "dog,B 4\n", "");
    let session = AssessmentSession::load(&paths, &mut Vec::new()).expect("lexicons load");

    let first = session.score(&ResponseDocument::parse("-one cat owl"), &mut Vec::new());
    let second = session.score(&ResponseDocument::parse("-two owl"), &mut Vec::new());

    assert_eq!(first.record.self_projection.groups[TraitGroup::A], Score::Defined(1.0));
    assert_eq!(second.record.self_projection.groups[TraitGroup::A], Score::Defined(0.25));
    assert_eq!(second.record.totals.self_projection, 1);
}
