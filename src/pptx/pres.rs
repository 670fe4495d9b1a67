/// Presentation model for PPTX output.
use super::constants::namespace;
use super::package::PackageWriter;
use super::slide::{Slide, SlideLayout};
use crate::error::{Error, Result};
use crate::xml::XML_DECLARATION;
use std::fmt::Write as FmtWrite;
use std::path::Path;

/// First slide ID; PowerPoint requires IDs of at least 256.
const FIRST_SLIDE_ID: u32 = 256;

/// A presentation being assembled in memory.
///
/// Slides are appended in order and the whole package is serialised at
/// once by [`Presentation::save`] or [`Presentation::to_bytes`].
#[derive(Debug)]
pub struct Presentation {
    /// Slides in the presentation
    pub(crate) slides: Vec<Slide>,
    /// Slide width in EMUs (English Metric Units, 914400 EMU = 1 inch)
    slide_width: i64,
    /// Slide height in EMUs
    slide_height: i64,
    /// Document title written to the core properties
    doc_title: Option<String>,
}

impl Presentation {
    /// Create a new empty presentation with default dimensions.
    ///
    /// Default size is 10" x 7.5" (standard 4:3 aspect ratio).
    pub fn new() -> Self {
        Self {
            slides: Vec::new(),
            slide_width: 9144000,  // 10 inches
            slide_height: 6858000, // 7.5 inches
            doc_title: None,
        }
    }

    /// Append a new slide based on `layout`.
    pub fn add_slide(&mut self, layout: SlideLayout) -> &mut Slide {
        let slide_id = FIRST_SLIDE_ID + self.slides.len() as u32;
        self.slides.push(Slide::new(slide_id, layout));
        let last = self.slides.len() - 1;
        &mut self.slides[last]
    }

    /// Get the number of slides.
    pub fn slide_count(&self) -> usize {
        self.slides.len()
    }

    pub fn slides(&self) -> &[Slide] {
        &self.slides
    }

    /// Get the slide width in EMUs.
    pub fn slide_width(&self) -> i64 {
        self.slide_width
    }

    /// Get the slide height in EMUs.
    pub fn slide_height(&self) -> i64 {
        self.slide_height
    }

    pub fn doc_title(&self) -> Option<&str> {
        self.doc_title.as_deref()
    }

    pub fn set_doc_title(&mut self, title: &str) {
        self.doc_title = Some(title.to_string());
    }

    /// Serialise the complete package.
    pub fn to_bytes(&self) -> Result<Vec<u8>> {
        PackageWriter::to_bytes(self)
    }

    /// Serialise the package and write it to `path`.
    ///
    /// Nothing is written unless serialisation succeeds.
    pub fn save<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        PackageWriter::write(path, self)
    }

    /// Generate presentation.xml content with the given slide relationship IDs.
    ///
    /// # Arguments
    /// * `master_rel_id` - Relationship ID of the slide master
    /// * `slide_rel_ids` - Relationship IDs for slides, in slide order
    pub(crate) fn generate_presentation_xml(
        &self,
        master_rel_id: &str,
        slide_rel_ids: &[String],
    ) -> Result<String> {
        if slide_rel_ids.len() != self.slides.len() {
            return Err(Error::Xml(format!(
                "expected {} slide relationship IDs, got {}",
                self.slides.len(),
                slide_rel_ids.len()
            )));
        }

        let mut xml = String::with_capacity(2048);

        xml.push_str(XML_DECLARATION);
        write!(
            xml,
            r#"<p:presentation xmlns:a="{}" xmlns:r="{}" xmlns:p="{}" saveSubsetFonts="1">"#,
            namespace::DML_MAIN,
            namespace::OFC_RELATIONSHIPS,
            namespace::PML_MAIN
        )?;

        xml.push_str("<p:sldMasterIdLst>");
        write!(
            xml,
            r#"<p:sldMasterId id="2147483648" r:id="{}"/>"#,
            master_rel_id
        )?;
        xml.push_str("</p:sldMasterIdLst>");

        if !self.slides.is_empty() {
            xml.push_str("<p:sldIdLst>");
            for (slide, rel_id) in self.slides.iter().zip(slide_rel_ids) {
                write!(
                    xml,
                    r#"<p:sldId id="{}" r:id="{}"/>"#,
                    slide.slide_id(),
                    rel_id
                )?;
            }
            xml.push_str("</p:sldIdLst>");
        }

        write!(
            xml,
            r#"<p:sldSz cx="{}" cy="{}"/>"#,
            self.slide_width, self.slide_height
        )?;
        xml.push_str("<p:notesSz cx=\"6858000\" cy=\"9144000\"/>");
        xml.push_str("</p:presentation>");

        Ok(xml)
    }
}

impl Default for Presentation {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_create_presentation() {
        let pres = Presentation::new();
        assert_eq!(pres.slide_count(), 0);
        assert_eq!(pres.slide_width(), 9144000);
        assert_eq!(pres.slide_height(), 6858000);
    }

    #[test]
    fn test_slide_ids_are_sequential() {
        let mut pres = Presentation::new();
        pres.add_slide(SlideLayout::Title).set_title("Admitted Students");
        pres.add_slide(SlideLayout::TitleOnly);

        let ids: Vec<u32> = pres.slides().iter().map(|s| s.slide_id()).collect();
        assert_eq!(ids, vec![256, 257]);
        assert_eq!(pres.slides()[0].title(), Some("Admitted Students"));
    }

    #[test]
    fn test_presentation_xml() {
        let mut pres = Presentation::new();
        pres.add_slide(SlideLayout::Title);
        pres.add_slide(SlideLayout::TitleOnly);

        let ids = vec!["rId2".to_string(), "rId3".to_string()];
        let xml = pres.generate_presentation_xml("rId1", &ids).unwrap();

        assert!(xml.contains(r#"<p:sldMasterId id="2147483648" r:id="rId1"/>"#));
        assert!(xml.contains(r#"<p:sldId id="256" r:id="rId2"/>"#));
        assert!(xml.contains(r#"<p:sldId id="257" r:id="rId3"/>"#));
        assert!(xml.contains(r#"<p:sldSz cx="9144000" cy="6858000"/>"#));
    }

    #[test]
    fn test_presentation_xml_rejects_mismatched_ids() {
        let mut pres = Presentation::new();
        pres.add_slide(SlideLayout::Title);
        assert!(pres.generate_presentation_xml("rId1", &[]).is_err());
    }

    #[test]
    fn test_empty_presentation_has_no_slide_list() {
        let pres = Presentation::new();
        let xml = pres.generate_presentation_xml("rId1", &[]).unwrap();
        assert!(!xml.contains("<p:sldIdLst>"));
    }
}
