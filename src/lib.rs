//! Lottery Slides - build a PowerPoint deck from admission lottery results
//!
//! Reads a CSV export of lottery results and writes a `.pptx` presentation
//! with an "Admitted Students" section followed by a "Waitlist Students"
//! section. Each section opens with a title slide and continues with body
//! slides holding a fixed number of students each.
//!
//! # Features
//!
//! - **Streaming batching**: records are consumed in one pass and flushed
//!   into slides as batches fill up or the admitted section ends
//! - **Pluggable layouts**: a table of eight students per slide, or bulleted
//!   text of six students per slide
//! - **Self-contained output**: the slide master, layouts and theme are
//!   generated, no template file is needed
//! - **All-or-nothing**: the output file is written only once the whole deck
//!   has been built
//!
//! # Example
//!
//! ```rust
//! use lottery_slides::{Config, Layout, build_presentation};
//!
//! let csv = "id,lottery_number,first_name,last_name,Elementary\n\
//!            1,Offered,Ada,Lovelace,Hill\n\
//!            2,WL 0001,Alan,Turing,Park\n";
//!
//! let (deck, summary) = build_presentation(csv.as_bytes(), &Config::new(Layout::Table))?;
//! assert_eq!(deck.slide_count(), 4);
//! assert_eq!(summary.waitlist_records, 1);
//! # Ok::<(), lottery_slides::Error>(())
//! ```

pub mod batcher;
pub mod config;
pub mod error;
pub mod pptx;
pub mod record;
pub mod render;
pub mod xml;

pub use batcher::{BatchSummary, RenderCommand, SectionBatcher, plan};
pub use config::{Config, Layout};
pub use error::{Error, MissingFieldError, Result};
pub use pptx::Presentation;
pub use record::{Record, RecordReader};
pub use render::{DeckSink, SlideRenderer, renderer_for};

use std::io::Read;
use std::path::Path;

/// Document title stored in the package properties.
const DOC_TITLE: &str = "Lottery Results";

/// Build the deck for a CSV stream without touching the filesystem.
pub fn build_presentation<R: Read>(
    reader: R,
    config: &Config,
) -> Result<(Presentation, BatchSummary)> {
    let records = RecordReader::from_reader(reader)?;
    render_records(records, config)
}

/// Read `input`, build the deck and write it to `output`.
///
/// Nothing is written to `output` if any step fails.
pub fn generate<P, Q>(input: P, output: Q, config: &Config) -> Result<BatchSummary>
where
    P: AsRef<Path>,
    Q: AsRef<Path>,
{
    let input = input.as_ref();
    let output = output.as_ref();
    tracing::info!(input = %input.display(), layout = %config.layout, "generating deck");

    let records = RecordReader::from_path(input)?;
    let (deck, summary) = render_records(records, config)?;
    deck.save(output)?;

    tracing::info!(
        output = %output.display(),
        slides = deck.slide_count(),
        admitted = summary.admitted_records,
        waitlisted = summary.waitlist_records,
        "wrote deck"
    );
    Ok(summary)
}

fn render_records<R: Read>(
    records: RecordReader<R>,
    config: &Config,
) -> Result<(Presentation, BatchSummary)> {
    let renderer = renderer_for(config.layout);
    let mut deck = Presentation::new();
    deck.set_doc_title(DOC_TITLE);

    let summary = {
        let mut sink = DeckSink::new(renderer.as_ref(), &mut deck);
        SectionBatcher::new(renderer.capacity())?.run(records, &mut sink)?
    };
    Ok((deck, summary))
}
