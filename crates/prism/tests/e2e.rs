//! End-to-end tests for the prism ingest pipeline.
//!
//! Adding a case means adding an entry to `TEST_CASES`: a file name (its
//! extension picks the processor), a builder for its bytes, the expected
//! outcome and strings the extracted text must contain.

mod common;

use common::*;
use prism::Outcome;

struct TestCase {
    /// Unique name for the test case
    name: &'static str,
    /// File name written to the harness input directory
    input_file: &'static str,
    /// Produces the file's bytes
    content: fn() -> Vec<u8>,
    /// Terminal outcome of a single run on a fresh store
    expected_outcome: Outcome,
    /// Strings that should be present in the text the model received
    expected_text_contains: &'static [&'static str],
}

fn resume_txt() -> Vec<u8> {
    JANE_RESUME.as_bytes().to_vec()
}

fn resume_txt_with_bom() -> Vec<u8> {
    let mut bytes = vec![0xEF, 0xBB, 0xBF];
    bytes.extend_from_slice(JANE_RESUME.as_bytes());
    bytes
}

fn cover_letter_txt() -> Vec<u8> {
    COVER_LETTER.as_bytes().to_vec()
}

fn resume_pdf() -> Vec<u8> {
    build_pdf(
        &["Jane Doe", "EXPERIENCE", "Senior Engineer at Acme Corp"],
        &["https://janedoe.dev"],
    )
}

fn cover_letter_pdf() -> Vec<u8> {
    build_pdf(&["Dear Hiring Manager,", "I am writing to apply."], &[])
}

fn resume_docx() -> Vec<u8> {
    build_docx(&["Jane Doe", "EXPERIENCE", "Senior Engineer at Acme Corp"])
}

fn cover_letter_docx() -> Vec<u8> {
    build_docx(&["Dear Hiring Manager,", "I am writing to apply."])
}

fn unicode_resume_txt() -> Vec<u8> {
    "Jürgen Müller\nErfahrung: Softwareentwickler bei Größe GmbH\nSkills: Rust, Go\n"
        .as_bytes()
        .to_vec()
}

const TEST_CASES: &[TestCase] = &[
    TestCase {
        name: "resume_text_file",
        input_file: "jane.txt",
        content: resume_txt,
        expected_outcome: Outcome::Inserted,
        expected_text_contains: &["Jane Doe", "EXPERIENCE", "Go, C++, Kubernetes"],
    },
    TestCase {
        name: "resume_text_file_with_bom",
        input_file: "jane-bom.txt",
        content: resume_txt_with_bom,
        expected_outcome: Outcome::Inserted,
        expected_text_contains: &["Jane Doe"],
    },
    TestCase {
        name: "cover_letter_text_file",
        input_file: "letter.txt",
        content: cover_letter_txt,
        expected_outcome: Outcome::NotAResume,
        expected_text_contains: &["Dear Hiring Manager"],
    },
    TestCase {
        name: "resume_pdf",
        input_file: "jane.pdf",
        content: resume_pdf,
        expected_outcome: Outcome::Inserted,
        expected_text_contains: &["Jane Doe", "https://janedoe.dev"],
    },
    TestCase {
        name: "cover_letter_pdf",
        input_file: "letter.pdf",
        content: cover_letter_pdf,
        expected_outcome: Outcome::NotAResume,
        expected_text_contains: &["Dear Hiring Manager"],
    },
    TestCase {
        name: "resume_docx",
        input_file: "jane.docx",
        content: resume_docx,
        expected_outcome: Outcome::Inserted,
        expected_text_contains: &["Jane Doe\n", "Senior Engineer at Acme Corp"],
    },
    TestCase {
        name: "cover_letter_docx",
        input_file: "letter.docx",
        content: cover_letter_docx,
        expected_outcome: Outcome::NotAResume,
        expected_text_contains: &["Dear Hiring Manager"],
    },
    TestCase {
        name: "uppercase_extension",
        input_file: "JANE.TXT",
        content: resume_txt,
        expected_outcome: Outcome::Inserted,
        expected_text_contains: &["Jane Doe"],
    },
    TestCase {
        name: "unicode_content",
        input_file: "juergen.txt",
        content: unicode_resume_txt,
        expected_outcome: Outcome::Inserted,
        expected_text_contains: &["Jürgen Müller", "Größe"],
    },
];

fn run_case(case: &TestCase) -> Result<(), String> {
    let harness = TestHarness::new(jane_profile());
    let path = harness.write_input(case.input_file, &(case.content)());

    let (result, _) = harness.run_file(&path);
    let state = result.map_err(|e| format!("pipeline failed: {}", e))?;

    if state.outcome() != Some(case.expected_outcome) {
        return Err(format!(
            "expected outcome {:?}, got {:?}",
            case.expected_outcome,
            state.outcome()
        ));
    }

    let seen = harness.inference.classify_inputs();
    let text = match case.expected_outcome {
        Outcome::NotAResume => seen.first().cloned().unwrap_or_default(),
        _ => harness
            .inference
            .extract_inputs()
            .first()
            .cloned()
            .unwrap_or_default(),
    };
    for needle in case.expected_text_contains {
        if !text.contains(needle) {
            return Err(format!("text is missing {:?}", needle));
        }
    }

    let expected_rows = usize::from(case.expected_outcome == Outcome::Inserted);
    if harness.stored_count() != expected_rows {
        return Err(format!(
            "expected {} stored row(s), found {}",
            expected_rows,
            harness.stored_count()
        ));
    }

    Ok(())
}

#[test]
fn test_all_cases() {
    let failures: Vec<String> = TEST_CASES
        .iter()
        .filter_map(|case| run_case(case).err().map(|e| format!("{}: {}", case.name, e)))
        .collect();

    assert!(
        failures.is_empty(),
        "{} of {} cases failed:\n{}",
        failures.len(),
        TEST_CASES.len(),
        failures.join("\n")
    );
}
