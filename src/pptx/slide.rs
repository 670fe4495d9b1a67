/// Slide types and XML serialisation.
use super::constants::namespace;
use super::shape::{Frame, HeaderStyle, Shape};
use crate::error::Result;
use crate::xml::{XML_DECLARATION, escape_xml};
use std::fmt::Write as FmtWrite;

/// Built-in slide layouts shipped with the package template.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SlideLayout {
    /// Centred title with subtitle
    Title,
    /// Title only, free body area
    TitleOnly,
    /// Title and bulleted content placeholder
    TitleAndContent,
}

impl SlideLayout {
    /// All layouts in template order.
    pub const ALL: [SlideLayout; 3] = [Self::Title, Self::TitleOnly, Self::TitleAndContent];

    /// 1-based index of the layout part (`slideLayoutN.xml`).
    pub fn part_index(self) -> usize {
        match self {
            Self::Title => 1,
            Self::TitleOnly => 2,
            Self::TitleAndContent => 3,
        }
    }

    /// Layout display name.
    pub fn name(self) -> &'static str {
        match self {
            Self::Title => "Title Slide",
            Self::TitleOnly => "Title Only",
            Self::TitleAndContent => "Title and Content",
        }
    }

    /// Placeholder type of the layout's title shape.
    fn title_placeholder(self) -> &'static str {
        match self {
            Self::Title => "ctrTitle",
            Self::TitleOnly | Self::TitleAndContent => "title",
        }
    }
}

/// A slide under construction.
#[derive(Debug, Clone)]
pub struct Slide {
    /// Slide ID (unique identifier)
    pub(crate) slide_id: u32,
    /// Layout the slide is based on
    pub(crate) layout: SlideLayout,
    /// Slide title (stored in the title placeholder)
    pub(crate) title: Option<String>,
    /// Shapes on the slide
    pub(crate) shapes: Vec<Shape>,
}

impl Slide {
    pub(crate) fn new(slide_id: u32, layout: SlideLayout) -> Self {
        Self {
            slide_id,
            layout,
            title: None,
            shapes: Vec::new(),
        }
    }

    pub fn slide_id(&self) -> u32 {
        self.slide_id
    }

    pub fn layout(&self) -> SlideLayout {
        self.layout
    }

    /// Set the slide title.
    pub fn set_title(&mut self, title: &str) {
        self.title = Some(title.to_string());
    }

    /// Get the slide title.
    pub fn title(&self) -> Option<&str> {
        self.title.as_deref()
    }

    pub fn shapes(&self) -> &[Shape] {
        &self.shapes
    }

    pub fn shape_count(&self) -> usize {
        self.shapes.len()
    }

    // IDs: 1=group, 2=title, 3+=user shapes
    fn next_shape_id(&self) -> u32 {
        (self.shapes.len() + 3) as u32
    }

    /// Add a table; `rows[0]` is rendered as the header row.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use lottery_slides::pptx::{Frame, HeaderStyle, Presentation, SlideLayout};
    ///
    /// let mut pres = Presentation::new();
    /// let slide = pres.add_slide(SlideLayout::TitleOnly);
    /// let rows = vec![
    ///     vec!["Name".to_string(), "Status".to_string()],
    ///     vec!["Lovelace, Ada".to_string(), "Offered".to_string()],
    /// ];
    /// slide.add_table(rows, vec![2743200, 1828800], Frame::new(0, 0, 4572000, 731520), HeaderStyle::default());
    /// assert_eq!(slide.shape_count(), 1);
    /// ```
    pub fn add_table(
        &mut self,
        rows: Vec<Vec<String>>,
        col_widths: Vec<i64>,
        frame: Frame,
        header: HeaderStyle,
    ) -> &mut Shape {
        let shape = Shape::new_table(self.next_shape_id(), frame, rows, col_widths, header);
        self.push_shape(shape)
    }

    /// Fill the layout's body placeholder with one bullet per paragraph.
    pub fn add_bullet_list(&mut self, paragraphs: Vec<String>) -> &mut Shape {
        let shape = Shape::new_bullet_list(self.next_shape_id(), paragraphs);
        self.push_shape(shape)
    }

    fn push_shape(&mut self, shape: Shape) -> &mut Shape {
        self.shapes.push(shape);
        let last = self.shapes.len() - 1;
        &mut self.shapes[last]
    }

    /// Generate slide XML content.
    pub(crate) fn to_xml(&self) -> Result<String> {
        let mut xml = String::with_capacity(4096);

        xml.push_str(XML_DECLARATION);
        write!(
            xml,
            r#"<p:sld xmlns:a="{}" xmlns:r="{}" xmlns:p="{}">"#,
            namespace::DML_MAIN,
            namespace::OFC_RELATIONSHIPS,
            namespace::PML_MAIN
        )?;

        xml.push_str("<p:cSld>");
        xml.push_str("<p:spTree>");

        // Write group shape properties (required)
        xml.push_str("<p:nvGrpSpPr>");
        xml.push_str(r#"<p:cNvPr id="1" name=""/>"#);
        xml.push_str("<p:cNvGrpSpPr/>");
        xml.push_str("<p:nvPr/>");
        xml.push_str("</p:nvGrpSpPr>");
        xml.push_str("<p:grpSpPr>");
        xml.push_str("<a:xfrm>");
        xml.push_str(r#"<a:off x="0" y="0"/>"#);
        xml.push_str(r#"<a:ext cx="0" cy="0"/>"#);
        xml.push_str(r#"<a:chOff x="0" y="0"/>"#);
        xml.push_str(r#"<a:chExt cx="0" cy="0"/>"#);
        xml.push_str("</a:xfrm>");
        xml.push_str("</p:grpSpPr>");

        if let Some(ref title) = self.title {
            self.write_title_shape(&mut xml, title)?;
        }

        for shape in &self.shapes {
            shape.to_xml(&mut xml)?;
        }

        xml.push_str("</p:spTree>");
        xml.push_str("</p:cSld>");
        xml.push_str(r#"<p:clrMapOvr><a:masterClrMapping/></p:clrMapOvr>"#);
        xml.push_str("</p:sld>");

        Ok(xml)
    }

    /// Write the title placeholder shape.
    fn write_title_shape(&self, xml: &mut String, title: &str) -> Result<()> {
        xml.push_str("<p:sp>");
        xml.push_str("<p:nvSpPr>");
        // Group shape uses id=1, so title uses id=2
        xml.push_str(r#"<p:cNvPr id="2" name="Title 1"/>"#);
        xml.push_str("<p:cNvSpPr><a:spLocks noGrp=\"1\"/></p:cNvSpPr>");
        write!(
            xml,
            r#"<p:nvPr><p:ph type="{}"/></p:nvPr>"#,
            self.layout.title_placeholder()
        )?;
        xml.push_str("</p:nvSpPr>");

        xml.push_str("<p:spPr/>");

        xml.push_str("<p:txBody>");
        xml.push_str("<a:bodyPr/>");
        xml.push_str("<a:lstStyle/>");
        xml.push_str("<a:p>");
        xml.push_str("<a:r>");
        xml.push_str("<a:rPr lang=\"en-US\" dirty=\"0\"/>");
        write!(xml, "<a:t>{}</a:t>", escape_xml(title)?)?;
        xml.push_str("</a:r>");
        xml.push_str("</a:p>");
        xml.push_str("</p:txBody>");

        xml.push_str("</p:sp>");

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_title_slide_xml() {
        let mut slide = Slide::new(256, SlideLayout::Title);
        slide.set_title("Admitted Students");
        let xml = slide.to_xml().unwrap();

        assert!(xml.starts_with(XML_DECLARATION));
        assert!(xml.contains("<p:sld "));
        assert!(xml.contains(r#"<p:ph type="ctrTitle"/>"#));
        assert!(xml.contains("<a:t>Admitted Students</a:t>"));
        assert!(xml.ends_with("</p:sld>"));
    }

    #[test]
    fn test_shape_ids_follow_title() {
        let mut slide = Slide::new(257, SlideLayout::TitleOnly);
        let first = slide
            .add_table(
                vec![vec!["Name".to_string()]],
                vec![100],
                Frame::new(0, 0, 100, 100),
                HeaderStyle::default(),
            )
            .shape_id();
        let second = slide.add_bullet_list(vec!["b".to_string()]).shape_id();

        assert_eq!((first, second), (3, 4));
        assert_eq!(slide.shape_count(), 2);
        assert!(slide.title().is_none());
    }

    #[test]
    fn test_untitled_slide_has_no_title_placeholder() {
        let mut slide = Slide::new(258, SlideLayout::TitleOnly);
        slide.add_table(
            vec![vec!["Name".to_string()]],
            vec![100],
            Frame::new(0, 0, 100, 100),
            HeaderStyle::default(),
        );
        let xml = slide.to_xml().unwrap();

        assert!(!xml.contains("<p:ph type="));
        assert!(xml.contains("<a:tbl>"));
    }

    #[test]
    fn test_layout_part_indices_are_distinct() {
        let mut indices: Vec<usize> = SlideLayout::ALL.iter().map(|l| l.part_index()).collect();
        indices.dedup();
        assert_eq!(indices, vec![1, 2, 3]);
    }
}
