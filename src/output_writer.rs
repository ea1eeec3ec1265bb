/*!
 * Output serialization for translated documents.
 *
 * Writes the ordered translated sections as a Markdown file and a derived
 * PDF rendering under the configured output directory. Both artifacts are
 * rendered in memory first and staged through temp files, so a failed run
 * never leaves a half-written pair behind.
 */

use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};

use log::info;
use lopdf::content::{Content, Operation};
use lopdf::{Document, Object, Stream, dictionary};
use once_cell::sync::Lazy;
use regex::Regex;
use tempfile::NamedTempFile;

use crate::errors::OutputError;

// A4 in points
const PAGE_WIDTH: f32 = 595.28;
const PAGE_HEIGHT: f32 = 841.89;
const MARGIN: f32 = 54.0;
// Wrap width in characters for the 12pt body font
const WRAP_COLUMNS: usize = 88;

/// A translated section of the output, one per source page
#[derive(Debug, Clone)]
pub struct PageSection {
    /// 1-indexed source page number
    pub page_number: u32,
    /// Translated text for the page
    pub body: String,
}

/// The assembled output of a pipeline run
#[derive(Debug, Clone)]
pub struct OutputDocument {
    /// Base name for the output files (no extension)
    pub base_name: String,
    /// Display title, usually the source file name
    pub title: String,
    /// Ordered translated sections
    pub sections: Vec<PageSection>,
    /// Whether this is a partial result (some pages failed)
    pub partial: bool,
}

impl OutputDocument {
    /// Create an output document from ordered sections
    pub fn new(
        base_name: impl Into<String>,
        title: impl Into<String>,
        sections: Vec<PageSection>,
        partial: bool,
    ) -> Self {
        Self {
            base_name: base_name.into(),
            title: title.into(),
            sections,
            partial,
        }
    }

    /// Serialize the document as Markdown, one `## Page N` section per
    /// source page, in page order. Partial results carry an explicit
    /// marker so they are never mistaken for a complete translation.
    pub fn to_markdown(&self) -> String {
        let mut markdown = format!("# Translation of {}\n", self.title);

        if self.partial {
            markdown.push_str("\n> Partial translation: one or more pages failed to translate.\n");
        }

        for section in &self.sections {
            markdown.push_str(&format!("\n\n## Page {}\n\n", section.page_number));
            markdown.push_str(section.body.trim_end());
        }

        markdown.push('\n');
        markdown
    }
}

/// Paths of the artifacts written by a successful run
#[derive(Debug, Clone)]
pub struct WrittenPaths {
    /// The Markdown file
    pub markdown: PathBuf,
    /// The derived PDF file
    pub pdf: PathBuf,
}

/// Writes Markdown and derived PDF output for a translated document
pub struct OutputWriter {
    output_dir: PathBuf,
}

impl OutputWriter {
    /// Create a writer targeting the given output directory
    pub fn new<P: AsRef<Path>>(output_dir: P) -> Self {
        Self {
            output_dir: output_dir.as_ref().to_path_buf(),
        }
    }

    /// Write both artifacts for the document.
    ///
    /// Renders the Markdown body and the PDF before touching the
    /// filesystem; a rendering or write failure is terminal (`WriteError`
    /// indicates a configuration problem, not a transient condition).
    pub fn write(&self, document: &OutputDocument) -> Result<WrittenPaths, OutputError> {
        fs::create_dir_all(&self.output_dir).map_err(|e| OutputError::Write {
            path: self.output_dir.clone(),
            source: e,
        })?;

        let markdown = document.to_markdown();
        let pdf_bytes = render_pdf(&markdown)?;

        let markdown_path = self.output_dir.join(format!("{}.md", document.base_name));
        let pdf_path = self.output_dir.join(format!("{}.pdf", document.base_name));

        self.persist(markdown.as_bytes(), &markdown_path)?;
        if let Err(e) = self.persist(&pdf_bytes, &pdf_path) {
            // Don't leave a lone .md behind claiming success
            let _ = fs::remove_file(&markdown_path);
            return Err(e);
        }

        info!(
            "Wrote {} section(s) to {:?} and {:?}",
            document.sections.len(),
            markdown_path,
            pdf_path
        );

        Ok(WrittenPaths {
            markdown: markdown_path,
            pdf: pdf_path,
        })
    }

    /// Stage bytes through a temp file in the target directory, then
    /// rename into place.
    fn persist(&self, bytes: &[u8], path: &Path) -> Result<(), OutputError> {
        let mut staged =
            NamedTempFile::new_in(&self.output_dir).map_err(|e| OutputError::Write {
                path: path.to_path_buf(),
                source: e,
            })?;

        staged.write_all(bytes).map_err(|e| OutputError::Write {
            path: path.to_path_buf(),
            source: e,
        })?;

        staged.persist(path).map_err(|e| OutputError::Write {
            path: path.to_path_buf(),
            source: e.error,
        })?;

        Ok(())
    }
}

/// A logical line of the simple Markdown dialect the writer emits
enum MarkdownLine {
    Heading(u8, String),
    Text(String),
    Blank,
}

static BOLD_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"\*\*(.*?)\*\*|__(.*?)__").unwrap());
static ITALIC_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"\*(.*?)\*|_(.*?)_").unwrap());
static CODE_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"`([^`]*)`").unwrap());
static HEADING_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"^(#{1,6})\s+(.*)$").unwrap());

/// Strip inline Markdown markup, keeping the content
fn strip_inline(text: &str) -> String {
    let text = BOLD_RE.replace_all(text, "$1$2");
    let text = ITALIC_RE.replace_all(&text, "$1$2");
    CODE_RE.replace_all(&text, "$1").into_owned()
}

/// Parse the Markdown body into renderable lines
fn parse_markdown(markdown: &str) -> Vec<MarkdownLine> {
    let mut lines = Vec::new();

    for raw in markdown.lines() {
        let trimmed = raw.trim();
        if trimmed.is_empty() {
            lines.push(MarkdownLine::Blank);
        } else if let Some(caps) = HEADING_RE.captures(trimmed) {
            let level = caps[1].len() as u8;
            lines.push(MarkdownLine::Heading(level, strip_inline(&caps[2])));
        } else if let Some(item) = trimmed.strip_prefix("- ").or_else(|| trimmed.strip_prefix("* ")) {
            lines.push(MarkdownLine::Text(format!("  - {}", strip_inline(item))));
        } else if let Some(quoted) = trimmed.strip_prefix("> ") {
            lines.push(MarkdownLine::Text(strip_inline(quoted)));
        } else {
            lines.push(MarkdownLine::Text(strip_inline(trimmed)));
        }
    }

    lines
}

/// Greedy word wrap at `columns` characters
fn wrap_line(text: &str, columns: usize) -> Vec<String> {
    let mut wrapped = Vec::new();
    let mut current = String::new();

    for word in text.split_whitespace() {
        if !current.is_empty() && current.chars().count() + 1 + word.chars().count() > columns {
            wrapped.push(std::mem::take(&mut current));
        }
        if !current.is_empty() {
            current.push(' ');
        }
        current.push_str(word);
    }

    if !current.is_empty() {
        wrapped.push(current);
    }

    if wrapped.is_empty() {
        wrapped.push(String::new());
    }

    wrapped
}

/// Font size and leading for a markdown line kind
fn line_metrics(line: &MarkdownLine) -> (f32, f32) {
    match line {
        MarkdownLine::Heading(1, _) => (20.0, 28.0),
        MarkdownLine::Heading(2, _) => (16.0, 24.0),
        MarkdownLine::Heading(_, _) => (14.0, 20.0),
        MarkdownLine::Text(_) => (12.0, 16.0),
        MarkdownLine::Blank => (12.0, 10.0),
    }
}

/// Render the Markdown body as a simple single-font PDF.
///
/// One flowed column, Helvetica, page breaks when the cursor reaches the
/// bottom margin. Complex-script shaping is out of scope; the Markdown
/// file is the fidelity artifact and this rendering is a convenience.
fn render_pdf(markdown: &str) -> Result<Vec<u8>, OutputError> {
    let mut doc = Document::with_version("1.5");
    let pages_id = doc.new_object_id();

    let font_id = doc.add_object(dictionary! {
        "Type" => "Font",
        "Subtype" => "Type1",
        "BaseFont" => "Helvetica",
    });
    let resources_id = doc.add_object(dictionary! {
        "Font" => dictionary! { "F1" => font_id },
    });

    let mut page_ids: Vec<Object> = Vec::new();
    let mut operations: Vec<Operation> = Vec::new();
    let mut cursor_y = PAGE_HEIGHT - MARGIN;

    let mut flush_page = |doc: &mut Document,
                          page_ids: &mut Vec<Object>,
                          operations: &mut Vec<Operation>|
     -> Result<(), OutputError> {
        if operations.is_empty() {
            return Ok(());
        }

        let content = Content {
            operations: std::mem::take(operations),
        };
        let encoded = content
            .encode()
            .map_err(|e| OutputError::Render(e.to_string()))?;
        let content_id = doc.add_object(Stream::new(dictionary! {}, encoded));
        let page_id = doc.add_object(dictionary! {
            "Type" => "Page",
            "Parent" => pages_id,
            "Contents" => content_id,
        });
        page_ids.push(page_id.into());
        Ok(())
    };

    for line in parse_markdown(markdown) {
        let (font_size, leading) = line_metrics(&line);

        let rendered: Vec<String> = match &line {
            MarkdownLine::Blank => {
                cursor_y -= leading;
                continue;
            }
            MarkdownLine::Heading(_, text) => vec![text.clone()],
            MarkdownLine::Text(text) => wrap_line(text, WRAP_COLUMNS),
        };

        for segment in rendered {
            if cursor_y < MARGIN + leading {
                flush_page(&mut doc, &mut page_ids, &mut operations)?;
                cursor_y = PAGE_HEIGHT - MARGIN;
            }

            cursor_y -= leading;
            operations.push(Operation::new("BT", vec![]));
            operations.push(Operation::new(
                "Tf",
                vec!["F1".into(), font_size.into()],
            ));
            operations.push(Operation::new(
                "Td",
                vec![MARGIN.into(), cursor_y.into()],
            ));
            operations.push(Operation::new(
                "Tj",
                vec![Object::string_literal(segment)],
            ));
            operations.push(Operation::new("ET", vec![]));
        }
    }

    flush_page(&mut doc, &mut page_ids, &mut operations)?;

    // An empty document still gets one blank page
    if page_ids.is_empty() {
        let page_id = doc.add_object(dictionary! {
            "Type" => "Page",
            "Parent" => pages_id,
        });
        page_ids.push(page_id.into());
    }

    let page_count = page_ids.len() as i64;
    doc.objects.insert(
        pages_id,
        Object::Dictionary(dictionary! {
            "Type" => "Pages",
            "Kids" => page_ids,
            "Count" => page_count,
            "Resources" => resources_id,
            "MediaBox" => vec![0.0.into(), 0.0.into(), PAGE_WIDTH.into(), PAGE_HEIGHT.into()],
        }),
    );

    let catalog_id = doc.add_object(dictionary! {
        "Type" => "Catalog",
        "Pages" => pages_id,
    });
    doc.trailer.set("Root", catalog_id);
    doc.compress();

    let mut buffer = Vec::new();
    doc.save_to(&mut buffer)
        .map_err(|e| OutputError::Render(e.to_string()))?;

    Ok(buffer)
}
