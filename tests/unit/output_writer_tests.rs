/*!
 * Tests for Markdown and PDF output writing
 */

use std::fs;

use yaptai::output_writer::{OutputDocument, OutputWriter, PageSection};

use crate::common::create_temp_dir;

fn sample_sections() -> Vec<PageSection> {
    vec![
        PageSection {
            page_number: 3,
            body: "first translated body".to_string(),
        },
        PageSection {
            page_number: 4,
            body: "second translated body".to_string(),
        },
        PageSection {
            page_number: 5,
            body: "third translated body".to_string(),
        },
    ]
}

#[test]
fn test_toMarkdown_withSections_shouldEmitTitleAndPageHeadings() {
    let document = OutputDocument::new("out", "source.pdf", sample_sections(), false);
    let markdown = document.to_markdown();

    assert!(markdown.starts_with("# Translation of source.pdf"));
    assert_eq!(markdown.matches("## Page ").count(), 3);

    let p3 = markdown.find("## Page 3").unwrap();
    let p4 = markdown.find("## Page 4").unwrap();
    let p5 = markdown.find("## Page 5").unwrap();
    assert!(p3 < p4 && p4 < p5);

    assert!(markdown.contains("first translated body"));
    assert!(!markdown.contains("Partial translation"));
}

#[test]
fn test_toMarkdown_withPartialDocument_shouldIncludeMarker() {
    let document = OutputDocument::new("out", "source.pdf", sample_sections(), true);
    let markdown = document.to_markdown();

    assert!(markdown.contains("> Partial translation"));
    // The marker sits before the first section
    assert!(markdown.find("Partial translation").unwrap() < markdown.find("## Page 3").unwrap());
}

#[test]
fn test_write_withDocument_shouldCreateBothArtifacts() {
    let temp_dir = create_temp_dir().unwrap();
    let output_dir = temp_dir.path().join("translated_folder");

    let document = OutputDocument::new("result", "source.pdf", sample_sections(), false);
    let writer = OutputWriter::new(&output_dir);
    let paths = writer.write(&document).unwrap();

    assert_eq!(paths.markdown, output_dir.join("result.md"));
    assert_eq!(paths.pdf, output_dir.join("result.pdf"));

    // Markdown on disk matches the in-memory serialization
    let markdown = fs::read_to_string(&paths.markdown).unwrap();
    assert_eq!(markdown, document.to_markdown());

    // The PDF is a real PDF, not a placeholder
    let pdf_bytes = fs::read(&paths.pdf).unwrap();
    assert!(pdf_bytes.starts_with(b"%PDF"));
    assert!(pdf_bytes.len() > 100);
}

#[test]
fn test_write_withMissingOutputDir_shouldCreateIt() {
    let temp_dir = create_temp_dir().unwrap();
    let output_dir = temp_dir.path().join("deep").join("nested").join("out");

    let document = OutputDocument::new("result", "source.pdf", sample_sections(), false);
    let writer = OutputWriter::new(&output_dir);
    let paths = writer.write(&document).unwrap();

    assert!(paths.markdown.exists());
    assert!(paths.pdf.exists());
}

#[test]
fn test_write_withRepeatedRuns_shouldOverwritePreviousOutput() {
    let temp_dir = create_temp_dir().unwrap();
    let output_dir = temp_dir.path().join("out");
    let writer = OutputWriter::new(&output_dir);

    let first = OutputDocument::new(
        "result",
        "source.pdf",
        vec![PageSection {
            page_number: 1,
            body: "old body".to_string(),
        }],
        false,
    );
    writer.write(&first).unwrap();

    let second = OutputDocument::new(
        "result",
        "source.pdf",
        vec![PageSection {
            page_number: 1,
            body: "new body".to_string(),
        }],
        false,
    );
    let paths = writer.write(&second).unwrap();

    let markdown = fs::read_to_string(&paths.markdown).unwrap();
    assert!(markdown.contains("new body"));
    assert!(!markdown.contains("old body"));
}

#[test]
fn test_write_withEmptySections_shouldStillProduceArtifacts() {
    let temp_dir = create_temp_dir().unwrap();
    let output_dir = temp_dir.path().join("out");

    let document = OutputDocument::new("empty", "source.pdf", Vec::new(), false);
    let writer = OutputWriter::new(&output_dir);
    let paths = writer.write(&document).unwrap();

    let markdown = fs::read_to_string(&paths.markdown).unwrap();
    assert!(markdown.starts_with("# Translation of source.pdf"));
    assert_eq!(markdown.matches("## Page ").count(), 0);
    assert!(fs::read(&paths.pdf).unwrap().starts_with(b"%PDF"));
}
