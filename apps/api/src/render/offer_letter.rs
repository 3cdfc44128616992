//! Offer letter layout.

use anyhow::Result;

use crate::models::placement::OfferLetter;
use crate::models::student::Student;
use crate::render::document::{Block, Document, Paragraph, Span, Table, INCH, US_LETTER};
use crate::render::pdf;

const BODY_SIZE: f64 = 10.0;

/// Letterhead printed above and below the letter.
#[derive(Debug, Clone)]
pub struct Letterhead<'a> {
    pub company_name: &'a str,
    pub tagline: &'a str,
}

fn body(text: impl Into<String>) -> Block {
    Block::Paragraph(Paragraph::new(vec![Span::plain(text)], BODY_SIZE))
}

fn bold(text: impl Into<String>) -> Block {
    Block::Paragraph(Paragraph::new(vec![Span::bold(text)], BODY_SIZE))
}

pub fn offer_letter_document(
    student: &Student,
    letter: &OfferLetter,
    letterhead: &Letterhead<'_>,
) -> Document {
    let details = Table {
        rows: vec![
            vec![
                "Start Date".to_string(),
                letter.start_date.format("%B %d, %Y").to_string(),
            ],
            vec![
                "Compensation".to_string(),
                format!("₹{:.2}/Month", letter.compensation),
            ],
            vec!["Reporting To".to_string(), letter.reporting_to.clone()],
            vec!["Location".to_string(), letter.location.clone()],
        ],
        column_widths: vec![2.0 * INCH, 3.0 * INCH],
        size: 12.0,
        padding: 4.0,
        header_bottom_padding: 8.0,
        header_fill: 0.83,
    };

    let blocks = vec![
        Block::Paragraph(
            Paragraph::new(vec![Span::bold(letterhead.company_name)], 18.0)
                .centered()
                .space_after(30.0),
        ),
        Block::Paragraph(
            Paragraph::new(vec![Span::plain(letterhead.tagline)], 14.0)
                .centered()
                .space_after(20.0),
        ),
        Block::Spacer(0.5 * INCH),
        body(format!(
            "Date: {}",
            letter.issued_date.format("%B %d, %Y")
        )),
        Block::Spacer(0.5 * INCH),
        bold(format!("Dear {},", student.full_name)),
        Block::Spacer(0.25 * INCH),
        Block::Paragraph(Paragraph::new(
            vec![
                Span::plain("We are delighted to extend this offer of employment for the position of"),
                Span::bold(letter.title.clone()),
                Span::plain(format!(
                    "with {}. We were very impressed with your background and skills, \
                     and we are confident that you will make a significant contribution to our team.",
                    letter.company
                )),
            ],
            BODY_SIZE,
        )),
        Block::Spacer(0.25 * INCH),
        Block::Table(details),
        Block::Spacer(0.25 * INCH),
        body(
            "Please review the attached document for full terms and conditions. \
             By accepting this offer, you agree to the policies and procedures of our company.",
        ),
        Block::Spacer(0.5 * INCH),
        body("Sincerely,"),
        bold(letterhead.company_name),
    ];

    Document {
        page: US_LETTER,
        margin: INCH,
        blocks,
    }
}

/// Renders the offer letter to PDF bytes. Identical inputs give identical bytes.
pub fn render_offer_letter(
    student: &Student,
    letter: &OfferLetter,
    letterhead: &Letterhead<'_>,
) -> Result<Vec<u8>> {
    pdf::render(&offer_letter_document(student, letter, letterhead))
}

/// `offer_letter_{Full_Name}.pdf`, spaces replaced with underscores.
///
/// Quotes, backslashes and control characters are dropped so the name can sit
/// inside a quoted `Content-Disposition` filename.
pub fn offer_letter_filename(full_name: &str) -> String {
    let name: String = full_name
        .chars()
        .filter(|c| !matches!(c, '"' | '\\') && !c.is_control())
        .map(|c| if c == ' ' { '_' } else { c })
        .collect();
    format!("offer_letter_{name}.pdf")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::render::pdf::tests::{decoded_pages, shown_text};
    use chrono::{NaiveDate, Utc};
    use uuid::Uuid;

    const LETTERHEAD: Letterhead<'static> = Letterhead {
        company_name: "Manac Infotech Pvt Ltd",
        tagline: "Excellence in Technology",
    };

    fn student(full_name: &str) -> Student {
        let created = Utc::now();
        Student {
            id: Uuid::new_v4(),
            identity_id: "u-offer".to_string(),
            full_name: full_name.to_string(),
            phone: String::new(),
            date_of_birth: None,
            address: String::new(),
            college: "Default College".to_string(),
            branch: "Computer Science".to_string(),
            year: "1st".to_string(),
            linkedin_profile: String::new(),
            github_profile: String::new(),
            portfolio: String::new(),
            enrollment_date: NaiveDate::from_ymd_opt(2026, 1, 5).unwrap(),
            created_at: created,
            updated_at: created,
        }
    }

    fn letter(student_id: Uuid) -> OfferLetter {
        OfferLetter {
            id: Uuid::new_v4(),
            student_id,
            title: "Full Stack Developer Intern".to_string(),
            company: "Manac Infotech Pvt Ltd".to_string(),
            start_date: NaiveDate::from_ymd_opt(2026, 6, 1).unwrap(),
            compensation: 15000.0,
            reporting_to: "Senior Engineering Manager".to_string(),
            location: "Hyderabad (Hybrid)".to_string(),
            issued_date: NaiveDate::from_ymd_opt(2026, 5, 2).unwrap(),
            is_accepted: false,
            accepted_at: None,
        }
    }

    #[test]
    fn test_render_is_byte_identical() {
        let s = student("Asha Rao");
        let l = letter(s.id);
        let first = render_offer_letter(&s, &l, &LETTERHEAD).unwrap();
        let second = render_offer_letter(&s, &l, &LETTERHEAD).unwrap();
        assert!(first.starts_with(b"%PDF-"));
        assert_eq!(first, second);
    }

    #[test]
    fn test_letter_content() {
        let s = student("Asha Rao");
        let bytes = render_offer_letter(&s, &letter(s.id), &LETTERHEAD).unwrap();
        let shown = shown_text(&bytes);
        for expected in [
            "Dear",
            " Rao,",
            "Rs.15000.00/Month",
            "June 01, 2026",
            "Date:",
            "Hyderabad (Hybrid)",
            "Manac",
        ] {
            assert!(shown.iter().any(|t| t == expected), "missing {expected:?}");
        }
        assert!(!String::from_utf8_lossy(&bytes).contains("CreationDate"));
    }

    #[test]
    fn test_single_page() {
        let s = student("Asha Rao");
        let bytes = render_offer_letter(&s, &letter(s.id), &LETTERHEAD).unwrap();
        assert_eq!(decoded_pages(&bytes).len(), 1);
    }

    #[test]
    fn test_filename_replaces_spaces() {
        assert_eq!(
            offer_letter_filename("Asha Kiran Rao"),
            "offer_letter_Asha_Kiran_Rao.pdf"
        );
    }

    #[test]
    fn test_filename_drops_quotes_and_backslashes() {
        assert_eq!(
            offer_letter_filename("Asha \"AK\" Rao\\"),
            "offer_letter_Asha_AK_Rao.pdf"
        );
        assert_eq!(
            offer_letter_filename("José Rao"),
            "offer_letter_José_Rao.pdf"
        );
    }

    #[test]
    fn test_details_table_rows() {
        let s = student("Asha Rao");
        let doc = offer_letter_document(&s, &letter(s.id), &LETTERHEAD);
        let table = doc
            .blocks
            .iter()
            .find_map(|b| match b {
                Block::Table(t) => Some(t),
                _ => None,
            })
            .unwrap();
        let labels: Vec<&str> = table.rows.iter().map(|r| r[0].as_str()).collect();
        assert_eq!(labels, ["Start Date", "Compensation", "Reporting To", "Location"]);
        assert_eq!(table.rows[1][1], "₹15000.00/Month");
    }
}
