//! Plain-text assessment report.
//!
//! The self projection block is read back by repeat mode at fixed character
//! offsets, so its line layout is a compatibility contract.

mod bars;

use crate::scoring::{
    Assessment, AssessmentKind, Persona, ResultRecord, Scheme, Score, SchemeScores, TraitGroup,
    SELF_PROJECTION_HEADER, SELF_TOTAL_PREFIX,
};
use bars::{bar_line, AVERAGE_MARKER, VALUE_MARKER};
use std::fmt::{self, Write};
use std::fs;
use std::path::{Path, PathBuf};

const RULE: &str = "---------------------------------";

/// Display adapter rendering one assessment as the text report.
pub struct Report<'a> {
    record: &'a ResultRecord,
    persona: &'a Persona,
}

impl<'a> Report<'a> {
    pub fn new(assessment: &'a Assessment) -> Self {
        Self {
            record: &assessment.record,
            persona: &assessment.persona,
        }
    }
}

impl fmt::Display for Report<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write_report(f, self.record, self.persona)
    }
}

pub fn render(assessment: &Assessment) -> String {
    Report::new(assessment).to_string()
}

/// File name used for a report: `<subject>_test.txt` or
/// `<subject>_repeat_test.txt`. Path separators in the subject are replaced
/// so the report always lands directly inside the output directory.
pub fn file_name(assessment: &Assessment) -> String {
    let subject = file_stem(&assessment.record.subject);
    match assessment.kind {
        AssessmentKind::Initial => format!("{subject}_test.txt"),
        AssessmentKind::Repeat => format!("{subject}_repeat_test.txt"),
    }
}

fn file_stem(subject: &str) -> String {
    let stem: String = subject
        .chars()
        .map(|c| match c {
            '/' | '\\' => '_',
            c if c.is_control() => '_',
            c => c,
        })
        .collect();
    match stem.trim() {
        "" | "." | ".." => "unnamed".to_string(),
        _ => stem,
    }
}

pub fn write_to_dir<P: AsRef<Path>>(dir: P, assessment: &Assessment) -> std::io::Result<PathBuf> {
    let dir = dir.as_ref();
    fs::create_dir_all(dir)?;
    let path = dir.join(file_name(assessment));
    fs::write(&path, render(assessment))?;
    Ok(path)
}

fn write_report(out: &mut impl Write, record: &ResultRecord, persona: &Persona) -> fmt::Result {
    let name = &record.subject;
    let totals = &record.totals;

    writeln!(out, "-----------------Test Results for {name}------------------")?;
    write!(
        out,
        "\nTest Subject: {name}\n\n{SELF_TOTAL_PREFIX} {}",
        totals.self_projection
    )?;
    write!(
        out,
        "\nConcept Total Words: {}\nAdjusted Total Words: {}",
        totals.concept, totals.adjusted
    )?;
    out.write_str("\n\n################################\n")?;
    out.write_str("####### Weight Results #########\n")?;
    out.write_str("################################\n")?;

    writeln!(out, "\n{SELF_PROJECTION_HEADER}")?;
    write_percentages(out, &record.self_projection)?;
    write!(out, "\nDecision Approach: {}\n\n", record.decision_approach)?;
    write_bars(out, &record.self_projection, Some(record.decision_approach))?;

    out.write_str("\n******* Concept Projection *******\n")?;
    write_percentages(out, &record.concept)?;
    out.write_char('\n')?;
    write_bars(out, &record.concept, None)?;

    write_word_section(out, persona, Scheme::SelfProjection, "Self")?;
    write_word_section(out, persona, Scheme::Concept, "Concept")?;

    write!(out, "\n----------------- End of {name}'s test! ------------------\n\n\n\n")
}

fn write_percentages(out: &mut impl Write, scores: &SchemeScores) -> fmt::Result {
    for (group, score) in scores.groups.iter() {
        write!(out, "\n{group} percent: {score}\n")?;
    }
    write!(out, "\nAverage: {}\n", scores.average)
}

fn write_bars(
    out: &mut impl Write,
    scores: &SchemeScores,
    decision_approach: Option<Score>,
) -> fmt::Result {
    for (group, score) in scores.groups.iter() {
        writeln!(out, "{group} | {}", bar_line(*score, VALUE_MARKER))?;
    }
    if let Some(decision) = decision_approach {
        writeln!(out, "DA| {}", bar_line(decision, VALUE_MARKER))?;
    }
    writeln!(out, "L | {}", bar_line(scores.average, AVERAGE_MARKER))
}

fn write_word_section(
    out: &mut impl Write,
    persona: &Persona,
    scheme: Scheme,
    title: &str,
) -> fmt::Result {
    let banner = format!("### Count for {title} word categories ###");
    let border = "#".repeat(banner.len());
    write!(out, "\n{border}\n{banner}\n{border}\n")?;

    for group in TraitGroup::ordered() {
        writeln!(out, "{group} Count: {}", persona.tally(scheme, group).count())?;
    }

    for group in TraitGroup::ordered() {
        write!(out, "\n---------- {title} {group} words ----------")?;
        for word in &persona.tally(scheme, group).words {
            write!(out, "\n{word}")?;
        }
        write!(out, "\n{RULE}\n")?;
    }
    Ok(())
}
