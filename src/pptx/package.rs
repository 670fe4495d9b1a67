//! Package writer for presentations.
//!
//! Serialises a [`Presentation`] into an OPC package: `[Content_Types].xml`,
//! package relationships, every part and its relationships, all zipped with
//! Deflate compression. The archive is assembled in memory so a failed
//! write never leaves a partial file behind.
use super::constants::{content_type as ct, namespace, relationship_type as rt};
use super::pres::Presentation;
use super::shape::DEFAULT_TABLE_STYLE_ID;
use super::slide::SlideLayout;
use super::template;
use crate::error::Result;
use crate::xml::{XML_DECLARATION, escape_xml};
use std::collections::BTreeMap;
use std::fmt::Write as FmtWrite;
use std::io::{Cursor, Write};
use std::path::Path;
use zip::write::SimpleFileOptions;
use zip::{CompressionMethod, ZipWriter};

const CONTENT_TYPES_PART: &str = "[Content_Types].xml";
const PRESENTATION_PART: &str = "ppt/presentation.xml";
const SLIDE_MASTER_PART: &str = "ppt/slideMasters/slideMaster1.xml";
const THEME_PART: &str = "ppt/theme/theme1.xml";

/// Package writer that serialises a presentation to a ZIP container.
pub struct PackageWriter;

impl PackageWriter {
    /// Write a presentation package to a file.
    pub fn write<P: AsRef<Path>>(path: P, pres: &Presentation) -> Result<()> {
        let bytes = Self::to_bytes(pres)?;
        std::fs::write(path, bytes)?;
        Ok(())
    }

    /// Serialise a presentation package to bytes.
    pub fn to_bytes(pres: &Presentation) -> Result<Vec<u8>> {
        let parts = Self::collect_parts(pres)?;

        let mut content_types = ContentTypesItem::new();
        for part in &parts {
            if let Some(content_type) = part.content_type {
                content_types.add_override(&part.name, content_type);
            }
        }

        let mut zip = ZipWriter::new(Cursor::new(Vec::new()));
        let options = SimpleFileOptions::default().compression_method(CompressionMethod::Deflated);

        zip.start_file(CONTENT_TYPES_PART, options)?;
        zip.write_all(content_types.to_xml()?.as_bytes())?;

        for part in &parts {
            zip.start_file(part.name.as_str(), options)?;
            zip.write_all(part.blob.as_bytes())?;
        }

        let cursor = zip.finish()?;
        tracing::debug!(parts = parts.len() + 1, slides = pres.slide_count(), "serialised package");
        Ok(cursor.into_inner())
    }

    /// Build every part of the package, relationship parts included.
    fn collect_parts(pres: &Presentation) -> Result<Vec<Part>> {
        let mut parts = Vec::new();

        // Package-level relationships
        let mut pkg_rels = Relationships::new();
        pkg_rels.add(rt::OFFICE_DOCUMENT, PRESENTATION_PART);
        pkg_rels.add(rt::CORE_PROPERTIES, "docProps/core.xml");
        pkg_rels.add(rt::EXTENDED_PROPERTIES, "docProps/app.xml");
        parts.push(Part::rels("_rels/.rels", &pkg_rels)?);

        parts.push(Part::new(
            "docProps/core.xml",
            ct::OPC_CORE_PROPERTIES,
            template::core_props_xml(pres.doc_title(), chrono::Utc::now())?,
        ));
        parts.push(Part::new(
            "docProps/app.xml",
            ct::OFC_EXTENDED_PROPERTIES,
            template::app_props_xml(pres.slide_count())?,
        ));

        // Presentation part and its relationships
        let mut pres_rels = Relationships::new();
        let master_rel_id = pres_rels.add(rt::SLIDE_MASTER, "slideMasters/slideMaster1.xml");
        let slide_rel_ids: Vec<String> = (1..=pres.slide_count())
            .map(|n| pres_rels.add(rt::SLIDE, &format!("slides/slide{}.xml", n)))
            .collect();
        pres_rels.add(rt::PRES_PROPS, "presProps.xml");
        pres_rels.add(rt::VIEW_PROPS, "viewProps.xml");
        pres_rels.add(rt::THEME, "theme/theme1.xml");
        pres_rels.add(rt::TABLE_STYLES, "tableStyles.xml");

        parts.push(Part::new(
            PRESENTATION_PART,
            ct::PML_PRESENTATION_MAIN,
            pres.generate_presentation_xml(&master_rel_id, &slide_rel_ids)?,
        ));
        parts.push(Part::rels("ppt/_rels/presentation.xml.rels", &pres_rels)?);
        parts.push(Part::new(
            "ppt/presProps.xml",
            ct::PML_PRES_PROPS,
            template::pres_props_xml(),
        ));
        parts.push(Part::new(
            "ppt/viewProps.xml",
            ct::PML_VIEW_PROPS,
            template::view_props_xml(),
        ));
        parts.push(Part::new(
            "ppt/tableStyles.xml",
            ct::PML_TABLE_STYLES,
            template::table_styles_xml(DEFAULT_TABLE_STYLE_ID),
        ));
        parts.push(Part::new(THEME_PART, ct::OFC_THEME, template::theme_xml()?));

        // Slide master, linked to every layout and the theme
        let mut master_rels = Relationships::new();
        let layout_rel_ids: Vec<String> = SlideLayout::ALL
            .iter()
            .map(|layout| master_rels.add(rt::SLIDE_LAYOUT, &layout_target(*layout)))
            .collect();
        master_rels.add(rt::THEME, "../theme/theme1.xml");
        parts.push(Part::new(
            SLIDE_MASTER_PART,
            ct::PML_SLIDE_MASTER,
            template::slide_master_xml(&layout_rel_ids)?,
        ));
        parts.push(Part::rels(
            "ppt/slideMasters/_rels/slideMaster1.xml.rels",
            &master_rels,
        )?);

        for layout in SlideLayout::ALL {
            let index = layout.part_index();
            let mut layout_rels = Relationships::new();
            layout_rels.add(rt::SLIDE_MASTER, "../slideMasters/slideMaster1.xml");
            parts.push(Part::new(
                format!("ppt/slideLayouts/slideLayout{}.xml", index),
                ct::PML_SLIDE_LAYOUT,
                template::slide_layout_xml(layout)?,
            ));
            parts.push(Part::rels(
                &format!("ppt/slideLayouts/_rels/slideLayout{}.xml.rels", index),
                &layout_rels,
            )?);
        }

        for (offset, slide) in pres.slides().iter().enumerate() {
            let n = offset + 1;
            let mut slide_rels = Relationships::new();
            slide_rels.add(rt::SLIDE_LAYOUT, &layout_target(slide.layout()));
            parts.push(Part::new(
                format!("ppt/slides/slide{}.xml", n),
                ct::PML_SLIDE,
                slide.to_xml()?,
            ));
            parts.push(Part::rels(
                &format!("ppt/slides/_rels/slide{}.xml.rels", n),
                &slide_rels,
            )?);
        }

        Ok(parts)
    }
}

/// Relative target of a layout part from a sibling directory.
fn layout_target(layout: SlideLayout) -> String {
    format!("../slideLayouts/slideLayout{}.xml", layout.part_index())
}

/// A serialised package member.
struct Part {
    /// ZIP member name (no leading slash)
    name: String,
    /// Override content type; `None` for parts covered by a default
    content_type: Option<&'static str>,
    blob: String,
}

impl Part {
    fn new(name: impl Into<String>, content_type: &'static str, blob: String) -> Self {
        Self {
            name: name.into(),
            content_type: Some(content_type),
            blob,
        }
    }

    fn rels(name: &str, rels: &Relationships) -> Result<Self> {
        Ok(Self {
            name: name.to_string(),
            content_type: None,
            blob: rels.to_xml()?,
        })
    }
}

/// Relationships of one source part, numbered `rId1`, `rId2`, ...
#[derive(Debug, Default)]
struct Relationships {
    entries: Vec<(String, &'static str, String)>,
}

impl Relationships {
    fn new() -> Self {
        Self::default()
    }

    /// Add a relationship and return its ID.
    fn add(&mut self, reltype: &'static str, target: &str) -> String {
        let r_id = format!("rId{}", self.entries.len() + 1);
        self.entries.push((r_id.clone(), reltype, target.to_string()));
        r_id
    }

    fn to_xml(&self) -> Result<String> {
        let mut xml = String::with_capacity(256 + self.entries.len() * 160);
        xml.push_str(XML_DECLARATION);
        write!(xml, r#"<Relationships xmlns="{}">"#, namespace::OPC_RELATIONSHIPS)?;
        for (r_id, reltype, target) in &self.entries {
            write!(
                xml,
                r#"<Relationship Id="{}" Type="{}" Target="{}"/>"#,
                r_id,
                reltype,
                escape_xml(target)?
            )?;
        }
        xml.push_str("</Relationships>");
        Ok(xml)
    }
}

/// Helper for building [Content_Types].xml content.
///
/// Manages Default and Override elements for content type mapping.
struct ContentTypesItem {
    /// Default content types by extension
    defaults: BTreeMap<String, String>,
    /// Override content types by partname
    overrides: BTreeMap<String, String>,
}

impl ContentTypesItem {
    fn new() -> Self {
        let mut defaults = BTreeMap::new();
        defaults.insert("rels".to_string(), ct::OPC_RELATIONSHIPS.to_string());
        defaults.insert("xml".to_string(), ct::XML.to_string());

        Self {
            defaults,
            overrides: BTreeMap::new(),
        }
    }

    /// Register an override for a member name.
    fn add_override(&mut self, member_name: &str, content_type: &str) {
        self.overrides
            .insert(format!("/{}", member_name), content_type.to_string());
    }

    /// Generate the XML for [Content_Types].xml.
    fn to_xml(&self) -> Result<String> {
        let mut xml = String::with_capacity(4096);

        xml.push_str(XML_DECLARATION);
        write!(xml, r#"<Types xmlns="{}">"#, namespace::OPC_CONTENT_TYPES)?;

        for (ext, content_type) in &self.defaults {
            write!(
                xml,
                r#"<Default Extension="{}" ContentType="{}"/>"#,
                escape_xml(ext)?,
                escape_xml(content_type)?
            )?;
        }

        for (partname, content_type) in &self.overrides {
            write!(
                xml,
                r#"<Override PartName="{}" ContentType="{}"/>"#,
                escape_xml(partname)?,
                escape_xml(content_type)?
            )?;
        }

        xml.push_str("</Types>");
        Ok(xml)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Read;
    use zip::ZipArchive;

    fn read_member(bytes: &[u8], name: &str) -> String {
        let mut archive = ZipArchive::new(Cursor::new(bytes)).unwrap();
        let mut member = archive.by_name(name).unwrap();
        let mut content = String::new();
        member.read_to_string(&mut content).unwrap();
        content
    }

    #[test]
    fn test_content_types_xml() {
        let mut cti = ContentTypesItem::new();
        cti.add_override("ppt/slides/slide1.xml", ct::PML_SLIDE);
        let xml = cti.to_xml().unwrap();

        assert!(xml.contains(r#"<Default Extension="rels""#));
        assert!(xml.contains(r#"<Default Extension="xml" ContentType="application/xml"/>"#));
        assert!(xml.contains(r#"<Override PartName="/ppt/slides/slide1.xml""#));
    }

    #[test]
    fn test_relationship_ids_are_sequential() {
        let mut rels = Relationships::new();
        assert_eq!(rels.add(rt::SLIDE, "slides/slide1.xml"), "rId1");
        assert_eq!(rels.add(rt::SLIDE, "slides/slide2.xml"), "rId2");

        let xml = rels.to_xml().unwrap();
        assert!(xml.contains(r#"<Relationship Id="rId2" Type=""#));
        assert!(xml.contains(r#"Target="slides/slide2.xml"/>"#));
    }

    #[test]
    fn test_package_contains_all_parts() {
        let mut pres = Presentation::new();
        pres.add_slide(SlideLayout::Title).set_title("Admitted Students");
        pres.add_slide(SlideLayout::TitleOnly);

        let bytes = pres.to_bytes().unwrap();
        assert_eq!(&bytes[0..4], &[0x50, 0x4B, 0x03, 0x04]);

        let archive = ZipArchive::new(Cursor::new(bytes.as_slice())).unwrap();
        let names: Vec<&str> = archive.file_names().collect();
        for expected in [
            "[Content_Types].xml",
            "_rels/.rels",
            "docProps/core.xml",
            "docProps/app.xml",
            "ppt/presentation.xml",
            "ppt/_rels/presentation.xml.rels",
            "ppt/theme/theme1.xml",
            "ppt/slideMasters/slideMaster1.xml",
            "ppt/slideLayouts/slideLayout3.xml",
            "ppt/slides/slide1.xml",
            "ppt/slides/_rels/slide2.xml.rels",
        ] {
            assert!(names.contains(&expected), "missing {}", expected);
        }
        assert!(!names.contains(&"ppt/slides/slide3.xml"));
    }

    #[test]
    fn test_presentation_rels_match_slide_list() {
        let mut pres = Presentation::new();
        pres.add_slide(SlideLayout::Title);
        pres.add_slide(SlideLayout::TitleAndContent);
        let bytes = pres.to_bytes().unwrap();

        let pres_xml = read_member(&bytes, "ppt/presentation.xml");
        assert!(pres_xml.contains(r#"<p:sldId id="256" r:id="rId2"/>"#));
        assert!(pres_xml.contains(r#"<p:sldId id="257" r:id="rId3"/>"#));

        let rels = read_member(&bytes, "ppt/_rels/presentation.xml.rels");
        assert!(rels.contains(r#"Id="rId3" Type="http://schemas.openxmlformats.org/officeDocument/2006/relationships/slide" Target="slides/slide2.xml""#));

        let slide_rels = read_member(&bytes, "ppt/slides/_rels/slide2.xml.rels");
        assert!(slide_rels.contains("../slideLayouts/slideLayout3.xml"));

        let content_types = read_member(&bytes, CONTENT_TYPES_PART);
        assert!(content_types.contains(r#"PartName="/ppt/slides/slide2.xml""#));
    }

    #[test]
    fn test_write_to_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("deck.pptx");

        let mut pres = Presentation::new();
        pres.add_slide(SlideLayout::Title).set_title("Admitted Students");
        pres.save(&path).unwrap();

        let bytes = std::fs::read(&path).unwrap();
        let slide = read_member(&bytes, "ppt/slides/slide1.xml");
        assert!(slide.contains("Admitted Students"));
    }
}
