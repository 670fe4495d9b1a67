use super::SlideRenderer;
use crate::error::Result;
use crate::pptx::{Presentation, SlideLayout};
use crate::record::{ELEMENTARY, FIRST_NAME, LAST_NAME, Record};

const BASE_ROWS: usize = 1;
const EXTRA_ROWS: usize = 5;

/// Renders each batch as bulleted body text, one paragraph per student.
#[derive(Debug, Clone, Copy, Default)]
pub struct BulletRenderer;

impl BulletRenderer {
    fn paragraph(record: &Record) -> Result<String> {
        Ok(format!(
            "{} {} - {}",
            record.field(FIRST_NAME)?,
            record.field(LAST_NAME)?,
            record.field(ELEMENTARY)?
        ))
    }
}

impl SlideRenderer for BulletRenderer {
    fn capacity(&self) -> usize {
        BASE_ROWS + EXTRA_ROWS
    }

    fn render_body(&self, deck: &mut Presentation, records: &[Record]) -> Result<()> {
        let paragraphs = records
            .iter()
            .map(Self::paragraph)
            .collect::<Result<Vec<_>>>()?;

        deck.add_slide(SlideLayout::TitleAndContent)
            .add_bullet_list(paragraphs);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::Error;
    use crate::record::LOTTERY_NUMBER;

    #[test]
    fn test_bullet_text() {
        let mut deck = Presentation::new();
        let records = vec![
            Record::from_pairs([
                (LOTTERY_NUMBER, "Offered"),
                (FIRST_NAME, "Ada"),
                (LAST_NAME, "Lovelace"),
                (ELEMENTARY, "Hill"),
            ]),
            Record::from_pairs([
                (LOTTERY_NUMBER, "WL 0001"),
                (FIRST_NAME, "Grace"),
                (LAST_NAME, "Hopper"),
                (ELEMENTARY, "Oak & Elm"),
            ]),
        ];
        BulletRenderer.render_body(&mut deck, &records).unwrap();

        let slide = &deck.slides()[0];
        assert_eq!(slide.layout(), SlideLayout::TitleAndContent);
        assert_eq!(
            slide.shapes()[0].paragraphs(),
            vec!["Ada Lovelace - Hill", "Grace Hopper - Oak & Elm"]
        );

        let xml = slide.to_xml().unwrap();
        assert!(xml.contains("<a:t>Grace Hopper - Oak &amp; Elm</a:t>"));
    }

    #[test]
    fn test_missing_school_is_fatal() {
        let mut deck = Presentation::new();
        let record = Record::from_pairs([(FIRST_NAME, "Ada"), (LAST_NAME, "Lovelace")]);

        let err = BulletRenderer.render_body(&mut deck, &[record]).unwrap_err();
        assert!(matches!(err, Error::MissingField(ref e) if e.field == ELEMENTARY));
        assert_eq!(deck.slide_count(), 0);
    }
}
