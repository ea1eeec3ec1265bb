/*!
 * End-to-end translation pipeline.
 *
 * Drives a run through its stages: extract the requested page range,
 * translate every page concurrently against the `Translator` seam, and
 * write the assembled Markdown and PDF artifacts. Page order in the output
 * always matches source order regardless of completion order.
 */

use std::path::Path;
use std::sync::Arc;
use std::time::{Duration, Instant};

use futures::stream::{self, StreamExt};
use indicatif::{ProgressBar, ProgressStyle};
use log::{error, info, warn};
use tokio::sync::Semaphore;

use crate::app_config::Config;
use crate::errors::AppError;
use crate::output_writer::{OutputDocument, OutputWriter, PageSection, WrittenPaths};
use crate::pdf_extractor::{PageExtractor, PageRange, PageText};
use crate::translation::{Translator, with_retry};

/// Stages of a pipeline run
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PipelineState {
    /// Not started
    Idle,
    /// Reading page text from the source PDF
    Extracting,
    /// Translating pages against the provider
    Translating,
    /// Writing output artifacts
    Writing,
    /// Finished successfully
    Done,
    /// Terminated with an error
    Failed,
}

/// A single page moving through the pipeline
#[derive(Debug, Clone)]
pub struct TranslationUnit {
    /// 1-indexed source page number
    pub page_number: u32,
    /// Extracted source text
    pub source_text: String,
    /// Translated text, populated exactly once on success
    pub translated_text: Option<String>,
}

impl TranslationUnit {
    fn from_page(page: PageText) -> Self {
        Self {
            page_number: page.page_number,
            source_text: page.text,
            translated_text: None,
        }
    }
}

/// Summary of a completed run
#[derive(Debug, Clone)]
pub struct PipelineReport {
    /// Number of pages translated
    pub pages_translated: usize,
    /// Where the artifacts were written
    pub paths: WrittenPaths,
    /// Wall-clock duration of the run
    pub elapsed: Duration,
}

/// Orchestrates extraction, translation, and output writing
pub struct Pipeline {
    config: Config,
    translator: Arc<dyn Translator>,
    state: PipelineState,
    completed_pages: Vec<u32>,
}

impl Pipeline {
    /// Create a pipeline over the given translator
    pub fn new(config: Config, translator: Arc<dyn Translator>) -> Self {
        Self {
            config,
            translator,
            state: PipelineState::Idle,
            completed_pages: Vec::new(),
        }
    }

    /// Current stage of the run
    pub fn state(&self) -> PipelineState {
        self.state
    }

    /// Pages that finished translating during the last run, in page order.
    /// After a failed run this is the set that made it into the partial
    /// output.
    pub fn completed_pages(&self) -> &[u32] {
        &self.completed_pages
    }

    fn set_state(&mut self, state: PipelineState) {
        self.state = state;
    }

    /// Run the pipeline for one input file.
    ///
    /// The page range is validated against the document before any
    /// translation request is made, so an out-of-bounds range costs
    /// nothing remotely. On a terminal page failure the pages that did
    /// complete are written as a marked partial result and the error
    /// names the failing page.
    pub async fn run(
        &mut self,
        input_path: &Path,
        range: PageRange,
        output_name: &str,
    ) -> Result<PipelineReport, AppError> {
        let start_time = Instant::now();
        self.completed_pages.clear();

        // Stage 1: extraction
        self.set_state(PipelineState::Extracting);
        let units = match self.extract(input_path, &range) {
            Ok(units) => units,
            Err(e) => {
                self.set_state(PipelineState::Failed);
                return Err(e);
            }
        };

        info!(
            "Extracted {} page(s) ({}) from {:?}",
            units.len(),
            range,
            input_path
        );

        // Stage 2: translation
        self.set_state(PipelineState::Translating);
        let (units, failure) = self.translate_units(units).await;

        self.completed_pages = units
            .iter()
            .filter(|u| u.translated_text.is_some())
            .map(|u| u.page_number)
            .collect();

        let title = input_path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_else(|| input_path.display().to_string());

        if let Some(failure) = failure {
            self.set_state(PipelineState::Failed);
            error!(
                "Translation failed on page {}; {} of {} page(s) completed",
                failure.page_number().unwrap_or(0),
                self.completed_pages.len(),
                units.len()
            );

            // Save what completed, clearly marked, so the work isn't lost
            if !self.completed_pages.is_empty() {
                let document =
                    OutputDocument::new(output_name, &title, Self::sections_of(&units), true);
                let writer = OutputWriter::new(&self.config.output_dir);
                match writer.write(&document) {
                    Ok(paths) => info!(
                        "Partial translation ({} page(s)) saved to {:?}",
                        self.completed_pages.len(),
                        paths.markdown
                    ),
                    Err(e) => warn!("Could not save partial translation: {}", e),
                }
            }

            return Err(AppError::Translation(failure));
        }

        // Stage 3: output
        self.set_state(PipelineState::Writing);
        let document = OutputDocument::new(output_name, &title, Self::sections_of(&units), false);
        let writer = OutputWriter::new(&self.config.output_dir);
        let paths = match writer.write(&document) {
            Ok(paths) => paths,
            Err(e) => {
                self.set_state(PipelineState::Failed);
                return Err(AppError::Output(e));
            }
        };

        self.set_state(PipelineState::Done);
        let elapsed = start_time.elapsed();
        info!(
            "Translated {} page(s) in {:.1}s",
            units.len(),
            elapsed.as_secs_f64()
        );

        Ok(PipelineReport {
            pages_translated: units.len(),
            paths,
            elapsed,
        })
    }

    /// Open the source PDF and extract the requested range
    fn extract(
        &self,
        input_path: &Path,
        range: &PageRange,
    ) -> Result<Vec<TranslationUnit>, AppError> {
        let extractor = PageExtractor::open(input_path)?;
        let pages = extractor.extract_range(range)?;
        Ok(pages.into_iter().map(TranslationUnit::from_page).collect())
    }

    /// Translate all units concurrently, preserving source order.
    ///
    /// Each page gets its own retry budget; results land in per-index
    /// slots so completion order never affects output order. Returns the
    /// units (successful ones populated) and the first failure by page
    /// number, if any.
    async fn translate_units(
        &self,
        mut units: Vec<TranslationUnit>,
    ) -> (Vec<TranslationUnit>, Option<crate::errors::TranslationError>) {
        let max_concurrent = self.config.translation.optimal_concurrent_requests();
        let semaphore = Arc::new(Semaphore::new(max_concurrent));
        let target_language = self.config.target_language.clone();

        // Total attempts per page: the first try plus the retry budget
        let max_attempts = self.config.translation.common.retry_count + 1;
        let base_delay = Duration::from_millis(self.config.translation.common.retry_backoff_ms);

        let progress_bar = ProgressBar::new(units.len() as u64);
        let style = ProgressStyle::default_bar()
            .template("{spinner:.green} [{elapsed_precise}] [{bar:40.cyan/blue}] {pos}/{len} pages ({percent}%) {msg}")
            .unwrap_or_else(|_| ProgressStyle::default_bar());
        progress_bar.set_style(style.progress_chars("█▓▒░"));
        progress_bar.set_message("Translating");

        let results = stream::iter(units.iter().enumerate())
            .map(|(index, unit)| {
                let semaphore = semaphore.clone();
                let translator = self.translator.clone();
                let target_language = target_language.clone();
                let text = unit.source_text.clone();
                let page_number = unit.page_number;
                let progress_bar = progress_bar.clone();

                async move {
                    let _permit = semaphore.acquire().await;

                    let result = with_retry(
                        || translator.translate(&text, &target_language),
                        max_attempts,
                        base_delay,
                    )
                    .await
                    .map_err(|e| e.into_page_failure(page_number, max_attempts));

                    progress_bar.inc(1);
                    (index, result)
                }
            })
            .buffer_unordered(max_concurrent)
            .collect::<Vec<_>>()
            .await;

        progress_bar.finish_and_clear();

        // Each slot is written exactly once, keyed by source index
        let mut slots: Vec<Option<String>> = vec![None; units.len()];
        let mut failures = Vec::new();

        for (index, result) in results {
            match result {
                Ok(translated) => {
                    debug_assert!(slots[index].is_none());
                    slots[index] = Some(translated);
                }
                Err(e) => failures.push(e),
            }
        }

        for (unit, slot) in units.iter_mut().zip(slots) {
            unit.translated_text = slot;
        }

        // Report the earliest failing page for determinism
        failures.sort_by_key(|e| e.page_number().unwrap_or(u32::MAX));
        (units, failures.into_iter().next())
    }

    /// Sections for the units that have a translation, in page order
    fn sections_of(units: &[TranslationUnit]) -> Vec<PageSection> {
        units
            .iter()
            .filter_map(|unit| {
                unit.translated_text.as_ref().map(|body| PageSection {
                    page_number: unit.page_number,
                    body: body.clone(),
                })
            })
            .collect()
    }
}
