//! Page and document processing using lopdf

use std::path::{Path, PathBuf};
use lopdf::content::Content;
use lopdf::{Dictionary, Document, Object, ObjectId, Stream};
use tracing::{debug, info, warn};
use crate::error::{Error, Result};
use crate::paths::filtered_output_path;
use crate::pdf::filter::{filter_operations, FilterOptions, FilterStats};

/// Totals for one filtered document
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct DocumentSummary {
    /// Pages visited
    pub pages: usize,
    /// Pages left alone because they have no `Contents`
    pub pages_without_content: usize,
    /// Filter counters summed over all pages
    pub stats: FilterStats,
}

/// Result of filtering one PDF file
#[derive(Debug, Clone)]
pub struct FilterReport {
    /// Source PDF
    pub input: PathBuf,
    /// Filtered copy that was written
    pub output: PathBuf,
    /// What was removed
    pub summary: DocumentSummary,
}

/// Filter a PDF into a sibling `_filtered` copy
///
/// `docs/name.pdf` is written to `docs/name_filtered.pdf`; see
/// [`filtered_output_path`].
///
/// # Example
///
/// ```no_run
/// use pdf_deartifact::pdf::{filter_pdf_file, FilterOptions};
/// use std::path::Path;
///
/// let report = filter_pdf_file(Path::new("slides.pdf"), &FilterOptions::default())
///     .expect("Failed to filter");
/// println!("Wrote {}", report.output.display());
/// ```
pub fn filter_pdf_file(input: &Path, options: &FilterOptions) -> Result<FilterReport> {
    let output = filtered_output_path(input)?;
    filter_pdf_file_to(input, &output, options)
}

/// Filter a PDF and save the result to `output`
pub fn filter_pdf_file_to(input: &Path, output: &Path, options: &FilterOptions) -> Result<FilterReport> {
    if !input.exists() {
        return Err(Error::FileNotFound(input.to_path_buf()));
    }

    let mut doc = Document::load(input)?;
    let summary = filter_document(&mut doc, options)?;

    doc.save(output)?;

    info!(
        input = %input.display(),
        output = %output.display(),
        pages = summary.pages,
        regions_removed = summary.stats.regions_removed,
        "saved filtered document"
    );

    Ok(FilterReport {
        input: input.to_path_buf(),
        output: output.to_path_buf(),
        summary,
    })
}

/// Filter every page of an in-memory document, in page order
///
/// Each page's content stream is decoded, filtered and re-encoded into a new
/// stream object; the page's `Contents` then points at that stream and the
/// old streams are left unreferenced.
pub fn filter_document(doc: &mut Document, options: &FilterOptions) -> Result<DocumentSummary> {
    let mut summary = DocumentSummary::default();

    for (page_num, page_id) in doc.get_pages() {
        summary.pages += 1;

        match filter_page(doc, page_num, page_id, options)? {
            Some(stats) => summary.stats.absorb(stats),
            None => summary.pages_without_content += 1,
        }
    }

    Ok(summary)
}

/// Filter a single page. Returns `None` when the page has no content stream.
fn filter_page(
    doc: &mut Document,
    page_num: u32,
    page_id: ObjectId,
    options: &FilterOptions,
) -> Result<Option<FilterStats>> {
    if !doc.get_dictionary(page_id)?.has(b"Contents") {
        debug!(page = page_num, "page has no content stream");
        return Ok(None);
    }

    let content = doc.get_and_decode_page_content(page_id)?;
    let operations_in = content.operations.len();
    let (operations, stats) = filter_operations(content.operations, options);

    if stats.unterminated > 0 {
        if options.strict {
            return Err(Error::MalformedStream {
                page: page_num,
                unterminated: stats.unterminated,
            });
        }
        warn!(
            page = page_num,
            unterminated = stats.unterminated,
            "artifact region runs to end of content stream"
        );
    }

    debug!(
        page = page_num,
        operations_in,
        operations_out = operations.len(),
        regions_removed = stats.regions_removed,
        "filtered page"
    );

    let encoded = Content { operations }.encode()?;
    replace_page_content(doc, page_id, encoded)?;

    Ok(Some(stats))
}

/// Point the page's `Contents` at a new stream holding `content`
fn replace_page_content(doc: &mut Document, page_id: ObjectId, content: Vec<u8>) -> Result<()> {
    let mut stream = Stream::new(Dictionary::new(), content);
    stream.compress()?;
    let stream_id = doc.add_object(stream);

    let page_obj = doc.get_object_mut(page_id)?;
    if let Object::Dictionary(ref mut page_dict) = page_obj {
        page_dict.set("Contents", Object::Reference(stream_id));
    } else {
        return Err(Error::General(format!("Page {:?} is not a dictionary", page_id)));
    }

    Ok(())
}
