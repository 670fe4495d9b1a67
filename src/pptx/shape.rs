/// Shape types and XML serialisation for generated slides.
use super::constants::namespace;
use crate::error::Result;
use crate::xml::escape_xml;
use std::fmt::Write as FmtWrite;

/// Built-in "Medium Style 2 - Accent 1" table style.
pub const DEFAULT_TABLE_STYLE_ID: &str = "{5C22544A-7EE6-4342-B048-85BDC9FD1C3A}";

/// Text formatting applied to a run.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TextFormat {
    /// Bold text
    pub bold: Option<bool>,
    /// Text color in hex RGB (e.g., "FFFFFF")
    pub color: Option<String>,
}

/// Cell styling for a table's header row.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct HeaderStyle {
    /// Solid fill in hex RGB
    pub fill: Option<String>,
    /// Formatting of the header text
    pub text: TextFormat,
}

/// A shape on a slide.
#[derive(Debug, Clone)]
pub struct Shape {
    /// Shape ID, unique within the slide
    pub(crate) shape_id: u32,
    /// Shape type
    pub(crate) shape_type: ShapeType,
}

/// Position and size in EMUs.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Frame {
    pub x: i64,
    pub y: i64,
    pub width: i64,
    pub height: i64,
}

impl Frame {
    pub fn new(x: i64, y: i64, width: i64, height: i64) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    fn write_xfrm(&self, xml: &mut String) -> Result<()> {
        write!(
            xml,
            r#"<p:xfrm><a:off x="{}" y="{}"/><a:ext cx="{}" cy="{}"/></p:xfrm>"#,
            self.x, self.y, self.width, self.height
        )?;
        Ok(())
    }
}

#[derive(Debug, Clone)]
pub(crate) enum ShapeType {
    Table {
        frame: Frame,
        /// Rows of cell text; the first row is the header
        rows: Vec<Vec<String>>,
        col_widths: Vec<i64>,
        header: HeaderStyle,
    },
    /// Bulleted paragraphs filling the layout's body placeholder
    BulletList { paragraphs: Vec<String> },
}

impl Shape {
    /// Create a new table shape.
    pub(crate) fn new_table(
        shape_id: u32,
        frame: Frame,
        rows: Vec<Vec<String>>,
        col_widths: Vec<i64>,
        header: HeaderStyle,
    ) -> Self {
        Self {
            shape_id,
            shape_type: ShapeType::Table {
                frame,
                rows,
                col_widths,
                header,
            },
        }
    }

    /// Create a body placeholder holding one bullet per paragraph.
    pub(crate) fn new_bullet_list(shape_id: u32, paragraphs: Vec<String>) -> Self {
        Self {
            shape_id,
            shape_type: ShapeType::BulletList { paragraphs },
        }
    }

    pub fn shape_id(&self) -> u32 {
        self.shape_id
    }

    /// Number of table rows including the header, or 0 for non-tables.
    pub fn row_count(&self) -> usize {
        match &self.shape_type {
            ShapeType::Table { rows, .. } => rows.len(),
            _ => 0,
        }
    }

    /// Table cell text by (row, column).
    pub fn cell(&self, row: usize, col: usize) -> Option<&str> {
        match &self.shape_type {
            ShapeType::Table { rows, .. } => rows.get(row)?.get(col).map(String::as_str),
            _ => None,
        }
    }

    /// Paragraph texts of a bullet list.
    pub fn paragraphs(&self) -> Vec<&str> {
        match &self.shape_type {
            ShapeType::BulletList { paragraphs } => {
                paragraphs.iter().map(String::as_str).collect()
            },
            ShapeType::Table { .. } => Vec::new(),
        }
    }

    /// Generate XML for this shape.
    pub(crate) fn to_xml(&self, xml: &mut String) -> Result<()> {
        match &self.shape_type {
            ShapeType::Table {
                frame,
                rows,
                col_widths,
                header,
            } => {
                xml.push_str("<p:graphicFrame>");
                xml.push_str("<p:nvGraphicFramePr>");
                write!(
                    xml,
                    r#"<p:cNvPr id="{}" name="Table {}"/>"#,
                    self.shape_id, self.shape_id
                )?;
                xml.push_str(
                    r#"<p:cNvGraphicFramePr><a:graphicFrameLocks noGrp="1"/></p:cNvGraphicFramePr>"#,
                );
                xml.push_str("<p:nvPr/>");
                xml.push_str("</p:nvGraphicFramePr>");
                frame.write_xfrm(xml)?;

                xml.push_str("<a:graphic>");
                write!(xml, r#"<a:graphicData uri="{}">"#, namespace::DML_TABLE)?;
                xml.push_str("<a:tbl>");
                write!(
                    xml,
                    r#"<a:tblPr firstRow="1" bandRow="1"><a:tableStyleId>{}</a:tableStyleId></a:tblPr>"#,
                    DEFAULT_TABLE_STYLE_ID
                )?;

                xml.push_str("<a:tblGrid>");
                for width in col_widths {
                    write!(xml, r#"<a:gridCol w="{}"/>"#, width)?;
                }
                xml.push_str("</a:tblGrid>");

                // The frame height is a base; rows share it evenly and grow with content
                let row_height = frame.height / rows.len().max(1) as i64;
                for (row_idx, row) in rows.iter().enumerate() {
                    write!(xml, r#"<a:tr h="{}">"#, row_height)?;
                    for col_idx in 0..col_widths.len() {
                        let text = row.get(col_idx).map(String::as_str).unwrap_or("");
                        if row_idx == 0 {
                            write_cell(xml, text, &header.text, header.fill.as_deref())?;
                        } else {
                            write_cell(xml, text, &TextFormat::default(), None)?;
                        }
                    }
                    xml.push_str("</a:tr>");
                }

                xml.push_str("</a:tbl>");
                xml.push_str("</a:graphicData>");
                xml.push_str("</a:graphic>");
                xml.push_str("</p:graphicFrame>");
            },
            ShapeType::BulletList { paragraphs } => {
                xml.push_str("<p:sp>");
                xml.push_str("<p:nvSpPr>");
                write!(
                    xml,
                    r#"<p:cNvPr id="{}" name="Content Placeholder {}"/>"#,
                    self.shape_id, self.shape_id
                )?;
                xml.push_str("<p:cNvSpPr><a:spLocks noGrp=\"1\"/></p:cNvSpPr>");
                xml.push_str(r#"<p:nvPr><p:ph idx="1"/></p:nvPr>"#);
                xml.push_str("</p:nvSpPr>");

                // Geometry and bullet style come from the layout placeholder
                xml.push_str("<p:spPr/>");

                xml.push_str("<p:txBody>");
                xml.push_str("<a:bodyPr><a:normAutofit/></a:bodyPr>");
                xml.push_str("<a:lstStyle/>");
                for paragraph in paragraphs {
                    xml.push_str("<a:p>");
                    xml.push_str(r#"<a:pPr marL="342900" indent="-342900">"#);
                    xml.push_str(r#"<a:buFont typeface="Arial"/><a:buChar char="&#8226;"/>"#);
                    xml.push_str("</a:pPr>");
                    write_run(xml, paragraph, &TextFormat::default())?;
                    xml.push_str("</a:p>");
                }
                xml.push_str("</p:txBody>");

                xml.push_str("</p:sp>");
            },
        }

        Ok(())
    }
}

/// Write a single text run, or an empty paragraph marker for empty text.
fn write_run(xml: &mut String, text: &str, format: &TextFormat) -> Result<()> {
    if text.is_empty() {
        xml.push_str(r#"<a:endParaRPr lang="en-US" dirty="0"/>"#);
        return Ok(());
    }

    xml.push_str("<a:r>");
    xml.push_str("<a:rPr lang=\"en-US\" dirty=\"0\"");
    if let Some(true) = format.bold {
        xml.push_str(" b=\"1\"");
    }
    match format.color {
        Some(ref color) => {
            xml.push('>');
            write!(
                xml,
                "<a:solidFill><a:srgbClr val=\"{}\"/></a:solidFill>",
                escape_xml(color)?
            )?;
            xml.push_str("</a:rPr>");
        },
        None => xml.push_str("/>"),
    }
    write!(xml, "<a:t>{}</a:t>", escape_xml(text)?)?;
    xml.push_str("</a:r>");
    Ok(())
}

fn write_cell(xml: &mut String, text: &str, format: &TextFormat, fill: Option<&str>) -> Result<()> {
    xml.push_str("<a:tc>");
    xml.push_str("<a:txBody><a:bodyPr/><a:lstStyle/><a:p>");
    write_run(xml, text, format)?;
    xml.push_str("</a:p></a:txBody>");
    match fill {
        Some(color) => write!(
            xml,
            "<a:tcPr><a:solidFill><a:srgbClr val=\"{}\"/></a:solidFill></a:tcPr>",
            escape_xml(color)?
        )?,
        None => xml.push_str("<a:tcPr/>"),
    }
    xml.push_str("</a:tc>");
    Ok(())
}
