//! Extraction of payment details from bank notification SMS text.
//!
//! The template family looks like `Sent Rs.1,200.00 ... To SOME SHOP On 13/10/25`.
//! The grammar is split into three fragments so a new template variant can swap one
//! without touching how the others match.

use crate::domain::sms::ParsedFields;
use regex::Regex;
use std::sync::LazyLock;

/// `Rs` marker followed by an amount with optional thousands separators and fraction.
pub(crate) const AMOUNT: &str = r"\bRs\.?\s*(?P<amount>\d[\d,]*(?:\.\d+)?)";

/// `To` marker followed by the shortest span that still reaches the date marker.
pub(crate) const PAYEE: &str = r"\bTo\s+(?P<payee>.*?)";

/// A `To` marker repeated inside the payee span.
const INNER_TO: &str = r"(?i)\bTo\s+";

/// `On` marker followed by a `D/M/YY` or `D/M/YYYY` token.
pub(crate) const DATE: &str = r"\s*\bOn\s+(?P<date>\d{1,2}/\d{1,2}/(?:\d{4}|\d{2}))\b";

// Anchored on the first `On <date>` after the first `To`.
static TEMPLATE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(&format!("(?is){AMOUNT}.*?{PAYEE}{DATE}")).expect("SMS template pattern must compile")
});

static INNER_TO_MARKER: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(INNER_TO).expect("inner To pattern must compile"));

/// Extracts amount, payee and date from `text`.
///
/// Returns `None` unless all three markers appear in order. Never returns a partial result.
#[must_use]
pub fn extract(text: &str) -> Option<ParsedFields> {
    let caps = TEMPLATE.captures(text)?;

    let amount = normalize_amount(caps.name("amount")?.as_str())?;
    let payee = last_payee(caps.name("payee")?.as_str());
    if payee.is_empty() {
        return None;
    }
    let date_extracted = caps.name("date")?.as_str();

    Some(ParsedFields { amount, payee: payee.to_string(), date_extracted: date_extracted.to_string() })
}

/// Keeps the text after the last `To` inside the span, so `account. To SHOP` yields `SHOP`.
fn last_payee(span: &str) -> &str {
    INNER_TO_MARKER.find_iter(span).last().map_or(span, |m| &span[m.end()..]).trim()
}

/// Strips grouping commas (`1,234.50`, `1,00,000`) and parses the remaining numeral.
pub(crate) fn normalize_amount(token: &str) -> Option<f64> {
    let digits: String = token.chars().filter(|c| *c != ',').collect();
    digits.parse::<f64>().ok().filter(|v| v.is_finite())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn fragment(pattern: &str) -> Regex {
        Regex::new(&format!("(?is){pattern}")).unwrap()
    }

    fn assert_amount(parsed: &ParsedFields, expected: f64) {
        assert!((parsed.amount - expected).abs() < 1e-9, "amount {} != {expected}", parsed.amount);
    }

    #[test]
    fn test_amount_fragment() {
        let re = fragment(AMOUNT);
        assert_eq!(&re.captures("Rs.1,234,567.00").unwrap()["amount"], "1,234,567.00");
        assert_eq!(&re.captures("rs 250").unwrap()["amount"], "250");
        assert_eq!(&re.captures("RS.15.5").unwrap()["amount"], "15.5");
        assert!(re.captures("INR 250").is_none());
    }

    #[test]
    fn test_payee_fragment_is_lazy() {
        let re = fragment(&format!("{PAYEE}{DATE}"));
        let caps = re.captures("To ACME, Inc. On 1/2/2025").unwrap();
        assert_eq!(&caps["payee"], "ACME, Inc.");
    }

    #[test]
    fn test_date_fragment() {
        let re = fragment(DATE);
        assert_eq!(&re.captures(" On 13/10/25").unwrap()["date"], "13/10/25");
        assert_eq!(&re.captures(" on 3/1/2025.").unwrap()["date"], "3/1/2025");
        assert!(re.captures(" On 13/10/253").is_none());
        assert!(re.captures(" On 13-10-25").is_none());
    }

    #[test]
    fn test_normalize_amount() {
        assert_eq!(normalize_amount("1,200.00"), Some(1200.0));
        assert_eq!(normalize_amount("1,00,000"), Some(100_000.0));
        assert_eq!(normalize_amount("42"), Some(42.0));
    }

    #[test]
    fn test_reference_message() {
        let parsed = extract("Sent Rs.1,200.00 to your account. To NEW PEOPLES MART On 13/10/25").unwrap();
        assert_amount(&parsed, 1200.0);
        assert_eq!(parsed.payee, "NEW PEOPLES MART");
        assert_eq!(parsed.date_extracted, "13/10/25");
    }

    #[test]
    fn test_markers_on_separate_lines() {
        let text = "Sent Rs.15.00\nFrom HDFC Bank A/C *1234\nTo  Corner Store \nOn 01/02/2025\nRef 5123";
        let parsed = extract(text).unwrap();
        assert_amount(&parsed, 15.0);
        assert_eq!(parsed.payee, "Corner Store");
        assert_eq!(parsed.date_extracted, "01/02/2025");
    }

    #[test]
    fn test_case_insensitive_markers() {
        for text in [
            "sent rs.99 to SHOP on 1/1/25",
            "SENT RS.99 TO SHOP ON 1/1/25",
            "Sent Rs.99 To SHOP On 1/1/25",
        ] {
            let parsed = extract(text).unwrap();
            assert_amount(&parsed, 99.0);
            assert_eq!(parsed.payee, "SHOP");
            assert_eq!(parsed.date_extracted, "1/1/25");
        }
    }

    #[test]
    fn test_amount_variants() {
        assert_amount(&extract("Rs.500 To A On 1/1/25").unwrap(), 500.0);
        assert_amount(&extract("Rs 1,234,567.00 To A On 1/1/25").unwrap(), 1_234_567.0);
        assert_amount(&extract("Rs.1,00,000.50 To A On 1/1/25").unwrap(), 100_000.5);
    }

    #[test]
    fn test_payee_with_punctuation() {
        let parsed = extract("Rs.10.00 debited. To M/S. O'BRIEN & SONS-LTD. On 9/12/24").unwrap();
        assert_eq!(parsed.payee, "M/S. O'BRIEN & SONS-LTD.");
    }

    #[test]
    fn test_on_inside_words_is_not_a_marker() {
        let parsed = extract("Rs.10 To MONSOON FASHIONS On 9/12/24").unwrap();
        assert_eq!(parsed.payee, "MONSOON FASHIONS");
        let parsed = extract("Rs.10 To ON TIME STORES On 9/12/24").unwrap();
        assert_eq!(parsed.payee, "ON TIME STORES");
    }

    #[test]
    fn test_missing_markers() {
        assert!(extract("").is_none());
        assert!(extract("Your OTP is 4821").is_none());
        assert!(extract("Sent 1,200.00 To SHOP On 13/10/25").is_none());
        assert!(extract("Sent Rs.1,200.00 SHOP On 13/10/25").is_none());
        assert!(extract("Sent Rs.1,200.00 To SHOP").is_none());
        assert!(extract("Sent Rs.1,200.00 To SHOP On yesterday").is_none());
    }

    #[test]
    fn test_markers_out_of_order() {
        assert!(extract("On 13/10/25 To SHOP Rs.1,200.00").is_none());
        assert!(extract("To SHOP Rs.1,200.00 On 13/10/25").is_none());
        assert!(extract("Rs.1,200.00 On 13/10/25 To SHOP").is_none());
    }

    #[test]
    fn test_first_dated_to_wins() {
        let parsed = extract("Sent Rs.500 To SHOP On 1/1/25. Reply to 5676 on 2/2/25 to dispute").unwrap();
        assert_eq!(parsed.payee, "SHOP");
        assert_eq!(parsed.date_extracted, "1/1/25");
    }

    #[test]
    fn test_payee_containing_to_keeps_only_the_tail() {
        let parsed = extract("Sent Rs.500 To BACK TO BASICS On 1/1/25").unwrap();
        assert_eq!(parsed.payee, "BASICS");
    }

    #[test]
    fn test_last_payee() {
        assert_eq!(last_payee("your account. To NEW PEOPLES MART "), "NEW PEOPLES MART");
        assert_eq!(last_payee("TOTAL STORES"), "TOTAL STORES");
        assert_eq!(last_payee(" SHOP "), "SHOP");
    }

    #[test]
    fn test_empty_payee_is_no_match() {
        assert!(extract("Rs.5 To   On 1/1/25").is_none());
    }

    #[test]
    fn test_amount_reextraction_is_stable() {
        for text in [
            "Rs.1,200.00 To A On 1/1/25",
            "Rs.1,234,567.89 To A On 1/1/25",
            "Rs.7 To A On 1/1/25",
        ] {
            let first = extract(text).unwrap();
            let again = extract(&format!("Rs.{} To A On 1/1/25", first.amount)).unwrap();
            assert_amount(&again, first.amount);
        }
    }
}
