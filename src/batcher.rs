//! Section batching: turns an ordered record stream into slide commands.
//!
//! The deck has two sections, admitted students followed by waitlisted
//! students. Records are buffered into batches of at most `capacity`
//! entries; a batch is flushed into a body slide as soon as it is full, and
//! early when the admitted section ends. The first record that is not an
//! offer ends the admitted section for good: later `Offered` rows stay in
//! the waitlist.
//!
//! # Examples
//!
//! ```
//! use lottery_slides::batcher::{plan, RenderCommand};
//! use lottery_slides::record::Record;
//!
//! let records = vec![
//!     Record::from_pairs([("lottery_number", "Offered")]),
//!     Record::from_pairs([("lottery_number", "WL 0001")]),
//! ];
//! let commands = plan(records, 8)?;
//!
//! assert_eq!(commands.len(), 4);
//! assert_eq!(commands[0], RenderCommand::TitleSlide("Admitted Students".to_string()));
//! assert_eq!(commands[2], RenderCommand::TitleSlide("Waitlist Students".to_string()));
//! # Ok::<(), lottery_slides::Error>(())
//! ```
use crate::error::{Error, Result};
use crate::record::Record;

/// Logical grouping of records rendered under one title slide.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Section {
    Admitted,
    Waitlist,
}

impl Section {
    /// Text of the section's title slide.
    pub fn title(self) -> &'static str {
        match self {
            Self::Admitted => "Admitted Students",
            Self::Waitlist => "Waitlist Students",
        }
    }
}

/// Where the batcher is in the stream. Moves forward only.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SectionState {
    InAdmitted,
    InWaitlist,
}

impl SectionState {
    pub fn section(self) -> Section {
        match self {
            Self::InAdmitted => Section::Admitted,
            Self::InWaitlist => Section::Waitlist,
        }
    }
}

/// Records waiting to be flushed into one body slide.
#[derive(Debug, Clone)]
pub struct Batch {
    records: Vec<Record>,
    capacity: usize,
}

impl Batch {
    /// Create an empty batch. `capacity` must be at least 1.
    pub fn new(capacity: usize) -> Result<Self> {
        if capacity == 0 {
            return Err(Error::InvalidCapacity(capacity));
        }
        Ok(Self {
            records: Vec::with_capacity(capacity),
            capacity,
        })
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn is_full(&self) -> bool {
        self.records.len() >= self.capacity
    }

    /// Append a record. Callers flush before the batch overflows.
    pub fn push(&mut self, record: Record) {
        debug_assert!(!self.is_full(), "batch pushed past capacity");
        self.records.push(record);
    }

    /// Take every buffered record, leaving the batch empty.
    pub fn drain(&mut self) -> Vec<Record> {
        std::mem::replace(&mut self.records, Vec::with_capacity(self.capacity))
    }
}

/// One slide to render, in deck order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RenderCommand {
    /// Section title slide
    TitleSlide(String),
    /// Body slide holding between 1 and `capacity` records
    BodySlide(Vec<Record>),
}

/// Consumer of render commands.
pub trait CommandSink {
    fn emit(&mut self, command: RenderCommand) -> Result<()>;
}

impl CommandSink for Vec<RenderCommand> {
    fn emit(&mut self, command: RenderCommand) -> Result<()> {
        self.push(command);
        Ok(())
    }
}

/// Counts gathered over one run.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct BatchSummary {
    pub admitted_records: usize,
    pub waitlist_records: usize,
    pub admitted_slides: usize,
    pub waitlist_slides: usize,
    /// Whether the waitlist title slide was emitted
    pub waitlist_started: bool,
}

impl BatchSummary {
    /// Total slides emitted, title slides included.
    pub fn total_slides(&self) -> usize {
        1 + usize::from(self.waitlist_started) + self.admitted_slides + self.waitlist_slides
    }

    fn record(&mut self, section: Section) {
        match section {
            Section::Admitted => self.admitted_records += 1,
            Section::Waitlist => self.waitlist_records += 1,
        }
    }

    fn slide(&mut self, section: Section) {
        match section {
            Section::Admitted => self.admitted_slides += 1,
            Section::Waitlist => self.waitlist_slides += 1,
        }
    }
}

/// Streaming section/batch state machine for one run.
#[derive(Debug)]
pub struct SectionBatcher {
    state: SectionState,
    batch: Batch,
    summary: BatchSummary,
    begun: bool,
}

impl SectionBatcher {
    /// Create a batcher flushing every `capacity` records.
    pub fn new(capacity: usize) -> Result<Self> {
        Ok(Self {
            state: SectionState::InAdmitted,
            batch: Batch::new(capacity)?,
            summary: BatchSummary::default(),
            begun: false,
        })
    }

    pub fn capacity(&self) -> usize {
        self.batch.capacity()
    }

    pub fn state(&self) -> SectionState {
        self.state
    }

    /// Emit the admitted title slide. Called implicitly by `push` and `finish`.
    pub fn begin<S: CommandSink + ?Sized>(&mut self, sink: &mut S) -> Result<()> {
        if self.begun {
            return Ok(());
        }
        self.begun = true;
        sink.emit(RenderCommand::TitleSlide(Section::Admitted.title().to_string()))
    }

    /// Feed the next record in stream order.
    pub fn push<S: CommandSink + ?Sized>(&mut self, record: Record, sink: &mut S) -> Result<()> {
        self.begin(sink)?;

        if self.state == SectionState::InAdmitted && !record.is_offered()? {
            self.flush(sink)?;
            self.state = SectionState::InWaitlist;
            self.summary.waitlist_started = true;
            tracing::debug!(
                line = record.line(),
                admitted = self.summary.admitted_records,
                "admitted section ended"
            );
            sink.emit(RenderCommand::TitleSlide(Section::Waitlist.title().to_string()))?;
        }

        tracing::trace!(line = record.line(), section = ?self.state.section(), "queued record");
        self.summary.record(self.state.section());
        self.batch.push(record);

        if self.batch.is_full() {
            self.flush(sink)?;
        }
        Ok(())
    }

    /// Flush any trailing partial batch and report what was emitted.
    pub fn finish<S: CommandSink + ?Sized>(mut self, sink: &mut S) -> Result<BatchSummary> {
        self.begin(sink)?;
        self.flush(sink)?;
        Ok(self.summary)
    }

    /// Drive a whole record stream through the batcher.
    pub fn run<I, S>(mut self, records: I, sink: &mut S) -> Result<BatchSummary>
    where
        I: IntoIterator<Item = Result<Record>>,
        S: CommandSink + ?Sized,
    {
        self.begin(sink)?;
        for record in records {
            self.push(record?, sink)?;
        }
        self.finish(sink)
    }

    fn flush<S: CommandSink + ?Sized>(&mut self, sink: &mut S) -> Result<()> {
        if self.batch.is_empty() {
            return Ok(());
        }
        let records = self.batch.drain();
        let section = self.state.section();
        self.summary.slide(section);
        tracing::debug!(?section, records = records.len(), "flushing body slide");
        sink.emit(RenderCommand::BodySlide(records))
    }
}

/// Compute the full command sequence for an in-memory record list.
pub fn plan<I>(records: I, capacity: usize) -> Result<Vec<RenderCommand>>
where
    I: IntoIterator<Item = Record>,
{
    let mut commands = Vec::new();
    SectionBatcher::new(capacity)?.run(records.into_iter().map(Ok), &mut commands)?;
    Ok(commands)
}
