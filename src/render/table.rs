use super::SlideRenderer;
use crate::error::Result;
use crate::pptx::constants::inches;
use crate::pptx::{Frame, HeaderStyle, Presentation, SlideLayout, TextFormat};
use crate::record::{ELEMENTARY, FIRST_NAME, LAST_NAME, LOTTERY_NUMBER, Record};

/// Data rows per table slide.
pub const TABLE_CAPACITY: usize = 8;

/// Header fill colour.
const NOBLE_NAVY: &str = "004378";
const HEADER_TEXT: &str = "FFFFFF";

const HEADERS: [&str; 3] = ["Name", "Status", "School"];
const COLUMN_WIDTHS_IN: [f64; 3] = [3.0, 2.0, 5.0];

const LEFT_IN: f64 = 0.0;
const TOP_IN: f64 = 1.7;
const WIDTH_IN: f64 = 10.0;
const BASE_HEIGHT_IN: f64 = 0.8;

/// Renders each batch as a table: `Name | Status | School`.
#[derive(Debug, Clone, Copy, Default)]
pub struct TableRenderer;

impl TableRenderer {
    fn row(record: &Record) -> Result<Vec<String>> {
        Ok(vec![
            format!("{}, {}", record.field(LAST_NAME)?, record.field(FIRST_NAME)?),
            record.field(LOTTERY_NUMBER)?.to_string(),
            record.field(ELEMENTARY)?.to_string(),
        ])
    }

    fn header_style() -> HeaderStyle {
        HeaderStyle {
            fill: Some(NOBLE_NAVY.to_string()),
            text: TextFormat {
                bold: Some(true),
                color: Some(HEADER_TEXT.to_string()),
            },
        }
    }
}

impl SlideRenderer for TableRenderer {
    fn capacity(&self) -> usize {
        TABLE_CAPACITY
    }

    fn render_body(&self, deck: &mut Presentation, records: &[Record]) -> Result<()> {
        // Build every row first so a bad record leaves the deck untouched
        let mut rows = Vec::with_capacity(records.len() + 1);
        rows.push(HEADERS.iter().map(|h| h.to_string()).collect());
        for record in records {
            rows.push(Self::row(record)?);
        }

        let frame = Frame::new(
            inches(LEFT_IN),
            inches(TOP_IN),
            inches(WIDTH_IN),
            inches(BASE_HEIGHT_IN),
        );
        let col_widths = COLUMN_WIDTHS_IN.iter().map(|w| inches(*w)).collect();

        deck.add_slide(SlideLayout::TitleOnly)
            .add_table(rows, col_widths, frame, Self::header_style());
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::Error;
    use crate::record::ID;

    fn student(first: &str, last: &str, status: &str, school: &str) -> Record {
        Record::from_pairs([
            (ID, "1"),
            (LOTTERY_NUMBER, status),
            (FIRST_NAME, first),
            (LAST_NAME, last),
            (ELEMENTARY, school),
        ])
    }

    #[test]
    fn test_table_rows() {
        let mut deck = Presentation::new();
        let records = vec![
            student("Ada", "Lovelace", "Offered", "Hill"),
            student("Alan", "Turing", "WL 0003", "Park"),
        ];
        TableRenderer.render_body(&mut deck, &records).unwrap();

        let slide = &deck.slides()[0];
        assert_eq!(slide.layout(), SlideLayout::TitleOnly);
        assert!(slide.title().is_none());

        let table = &slide.shapes()[0];
        assert_eq!(table.row_count(), 3);
        assert_eq!(table.cell(0, 0), Some("Name"));
        assert_eq!(table.cell(0, 2), Some("School"));
        assert_eq!(table.cell(1, 0), Some("Lovelace, Ada"));
        assert_eq!(table.cell(2, 1), Some("WL 0003"));
        assert_eq!(table.cell(2, 2), Some("Park"));
    }

    #[test]
    fn test_table_geometry_and_header_style() {
        let mut deck = Presentation::new();
        TableRenderer
            .render_body(&mut deck, &[student("Ada", "Lovelace", "Offered", "Hill")])
            .unwrap();

        let xml = deck.slides()[0].to_xml().unwrap();
        assert!(xml.contains(r#"<p:xfrm><a:off x="0" y="1554480"/><a:ext cx="9144000" cy="731520"/></p:xfrm>"#));
        assert!(xml.contains(r#"<a:gridCol w="2743200"/><a:gridCol w="1828800"/><a:gridCol w="4572000"/>"#));
        assert!(xml.contains(r#"<a:srgbClr val="004378"/>"#));
        assert!(xml.contains(r#"b="1""#));
    }

    #[test]
    fn test_missing_field_leaves_deck_untouched() {
        let mut deck = Presentation::new();
        let broken = Record::from_pairs([(FIRST_NAME, "Ada"), (LAST_NAME, "Lovelace")]).with_line(7);

        let err = TableRenderer.render_body(&mut deck, &[broken]).unwrap_err();
        match err {
            Error::MissingField(e) => {
                assert_eq!(e.field, LOTTERY_NUMBER);
                assert_eq!(e.line, Some(7));
            },
            other => panic!("unexpected error: {}", other),
        }
        assert_eq!(deck.slide_count(), 0);
    }
}
