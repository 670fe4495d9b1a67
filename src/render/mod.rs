//! Slide renderers: turn batcher commands into slides.
//!
//! A [`SlideRenderer`] fixes the per-slide capacity and knows how to draw a
//! title slide and a body slide for one batch. [`DeckSink`] plugs a renderer
//! and a [`Presentation`] into the batcher as its command sink, so the same
//! section/flush logic drives every layout.

mod bullets;
mod table;

pub use bullets::BulletRenderer;
pub use table::TableRenderer;

use crate::batcher::{CommandSink, RenderCommand};
use crate::config::Layout;
use crate::error::Result;
use crate::pptx::{Presentation, SlideLayout};
use crate::record::Record;

/// Strategy for drawing slides of one layout variant.
pub trait SlideRenderer {
    /// Maximum number of records on one body slide.
    fn capacity(&self) -> usize;

    /// Append a section title slide.
    fn render_title(&self, deck: &mut Presentation, title: &str) -> Result<()> {
        deck.add_slide(SlideLayout::Title).set_title(title);
        Ok(())
    }

    /// Append a body slide holding `records`.
    ///
    /// A record lacking a field the layout needs fails the whole render.
    fn render_body(&self, deck: &mut Presentation, records: &[Record]) -> Result<()>;
}

/// Pick the renderer for a configured layout.
pub fn renderer_for(layout: Layout) -> Box<dyn SlideRenderer> {
    match layout {
        Layout::Table => Box::new(TableRenderer),
        Layout::Bullets => Box::new(BulletRenderer),
    }
}

/// Command sink that renders straight into a presentation.
pub struct DeckSink<'a> {
    renderer: &'a dyn SlideRenderer,
    deck: &'a mut Presentation,
}

impl<'a> DeckSink<'a> {
    pub fn new(renderer: &'a dyn SlideRenderer, deck: &'a mut Presentation) -> Self {
        Self { renderer, deck }
    }
}

impl CommandSink for DeckSink<'_> {
    fn emit(&mut self, command: RenderCommand) -> Result<()> {
        match command {
            RenderCommand::TitleSlide(title) => self.renderer.render_title(self.deck, &title),
            RenderCommand::BodySlide(records) => self.renderer.render_body(self.deck, &records),
        }
    }
}
