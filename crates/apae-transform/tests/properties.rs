//! Property tests for the text, date and document rules.

use apae_model::{CellValue, FieldWarning, SqlLiteral};
use apae_transform::normalization::{
    DATE_FORMATS, normalize_date, normalize_document, normalize_text, text_literal,
};
use chrono::NaiveDate;
use proptest::prelude::*;

fn calendar_date() -> impl Strategy<Value = NaiveDate> {
    (1900i32..=2100, 1u32..=12, 1u32..=31)
        .prop_filter_map("valid calendar date", |(year, month, day)| {
            NaiveDate::from_ymd_opt(year, month, day)
        })
}

proptest! {
    #[test]
    fn text_normalization_is_idempotent(raw in "[ a-záéíóúãõç]{0,12}'[ a-záéíóúãõç']{0,12}") {
        let once = normalize_text(&CellValue::from(raw.as_str())).unwrap();
        let content = once.as_text().expect("quote keeps the value non-blank");
        let twice = text_literal(content);
        prop_assert_eq!(&twice, &once);
        prop_assert_eq!(
            normalize_text(&CellValue::from(content)).unwrap().to_string(),
            once.to_string()
        );
        prop_assert_eq!(once.to_string(), format!("'{}'", content.replace('\'', "''")));
    }

    #[test]
    fn every_accepted_format_round_trips(date in calendar_date(), format in 0usize..DATE_FORMATS.len()) {
        let text = date.format(DATE_FORMATS[format]).to_string();
        let conversion = normalize_date(&CellValue::from(text.as_str())).unwrap();
        prop_assert!(conversion.warning.is_none());
        prop_assert_eq!(conversion.value.literal(), Some(&SqlLiteral::Date(date)));
    }

    #[test]
    fn short_years_never_parse(date in calendar_date(), separator in "[/.-]") {
        let text = date.format(&format!("%d{separator}%m{separator}%y")).to_string();
        let conversion = normalize_date(&CellValue::from(text.as_str())).unwrap();
        prop_assert!(conversion.value.is_null());
        prop_assert_eq!(
            conversion.warning,
            Some(FieldWarning::UnparsableDate { value: text })
        );
    }

    #[test]
    fn partial_documents_pass_through(text in "[ .a-z-]{0,3}[0-9]{1,10}[ .a-z-]{0,3}") {
        prop_assume!(text.chars().filter(char::is_ascii_digit).count() < 11);
        let field = normalize_document(&CellValue::from(text.as_str())).unwrap();
        prop_assert_eq!(field.as_text(), Some(text.as_str()));
    }

    #[test]
    fn documents_without_digits_are_null(text in "[ .a-zA-Z-]{0,14}") {
        let field = normalize_document(&CellValue::from(text.as_str())).unwrap();
        prop_assert!(field.is_null());
    }

    #[test]
    fn complete_documents_are_grouped(digits in "[0-9]{11}") {
        let field = normalize_document(&CellValue::from(digits.as_str())).unwrap();
        let expected = format!("{}.{}.{}-{}", &digits[..3], &digits[3..6], &digits[6..9], &digits[9..]);
        prop_assert_eq!(field.as_text(), Some(expected.as_str()));
    }
}
