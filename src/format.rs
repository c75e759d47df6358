//! Parsing and presentation of wire-format values.
//!
//! Dates travel as `dd/MM/yyyy` (or bare `ddMMyyyy` digits) on the wire and
//! ISO in the store. CPF and phone are digits-only at rest and formatted
//! (`123.456.789-01`, `(11) 9 8765-4321`) on the way out. The serde adapter
//! modules at the bottom wire both directions into the entity derives.

use chrono::{NaiveDate, NaiveDateTime};
use thiserror::Error;

use crate::validation::normalize_digits;

pub const DATE_FORMAT: &str = "%d/%m/%Y";
pub const DATE_TIME_FORMAT: &str = "%d/%m/%Y %H:%M:%S";

const COMPACT_DATE_FORMAT: &str = "%d%m%Y";
const COMPACT_DATE_TIME_FORMAT: &str = "%d%m%Y%H%M%S";

/// Text did not match any accepted date shape, or named a day that does
/// not exist on the calendar (`31/02/2024`).
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("invalid date format: expected {expected}")]
pub struct InvalidDateFormat {
    pub expected: &'static str,
}

/// Parse `dd/MM/yyyy`, or exactly eight digits `ddMMyyyy`.
pub fn parse_date(text: &str) -> Result<NaiveDate, InvalidDateFormat> {
    const EXPECTED: &str = "dd/MM/yyyy or ddMMyyyy";

    let text = text.trim();
    let parsed = if text.contains('/') {
        NaiveDate::parse_from_str(text, DATE_FORMAT).ok()
    } else if is_digits_of_len(text, 8) {
        NaiveDate::parse_from_str(text, COMPACT_DATE_FORMAT).ok()
    } else {
        None
    };
    parsed.ok_or(InvalidDateFormat { expected: EXPECTED })
}

/// Parse `dd/MM/yyyy HH:mm:ss`, or exactly fourteen digits `ddMMyyyyHHmmss`.
pub fn parse_date_time(text: &str) -> Result<NaiveDateTime, InvalidDateFormat> {
    const EXPECTED: &str = "dd/MM/yyyy HH:mm:ss or ddMMyyyyHHmmss";

    let text = text.trim();
    let parsed = if text.contains('/') {
        NaiveDateTime::parse_from_str(text, DATE_TIME_FORMAT).ok()
    } else if is_digits_of_len(text, 14) {
        NaiveDateTime::parse_from_str(text, COMPACT_DATE_TIME_FORMAT).ok()
    } else {
        None
    };
    parsed.ok_or(InvalidDateFormat { expected: EXPECTED })
}

pub fn format_date(date: NaiveDate) -> String {
    date.format(DATE_FORMAT).to_string()
}

pub fn format_date_time(date_time: NaiveDateTime) -> String {
    date_time.format(DATE_TIME_FORMAT).to_string()
}

/// `XXX.XXX.XXX-XX` for an 11-digit CPF; any other length passes through
/// unchanged.
pub fn format_cpf(cpf: &str) -> String {
    if is_digits_of_len(cpf, 11) {
        format!("{}.{}.{}-{}", &cpf[0..3], &cpf[3..6], &cpf[6..9], &cpf[9..11])
    } else {
        cpf.to_string()
    }
}

/// `(XX) XXXX-XXXX` for 10-digit landlines, `(XX) X XXXX-XXXX` for
/// 11-digit mobiles; any other length passes through unchanged.
pub fn format_phone(phone: &str) -> String {
    if is_digits_of_len(phone, 10) {
        format!("({}) {}-{}", &phone[0..2], &phone[2..6], &phone[6..10])
    } else if is_digits_of_len(phone, 11) {
        format!(
            "({}) {} {}-{}",
            &phone[0..2],
            &phone[2..3],
            &phone[3..7],
            &phone[7..11]
        )
    } else {
        phone.to_string()
    }
}

fn is_digits_of_len(text: &str, len: usize) -> bool {
    text.len() == len && text.bytes().all(|b| b.is_ascii_digit())
}

/// serde adapter: `NaiveDate` out as `dd/MM/yyyy`, in as either accepted
/// text form. Use with `#[serde(with = "format::br_date")]`.
pub mod br_date {
    use chrono::NaiveDate;
    use serde::de::Error;
    use serde::{Deserialize, Deserializer, Serializer};

    pub fn serialize<S>(date: &NaiveDate, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_str(&super::format_date(*date))
    }

    pub fn deserialize<'de, D>(deserializer: D) -> Result<NaiveDate, D::Error>
    where
        D: Deserializer<'de>,
    {
        let text = String::deserialize(deserializer)?;
        super::parse_date(&text).map_err(Error::custom)
    }
}

/// serde adapter: `NaiveDateTime` out as `dd/MM/yyyy HH:mm:ss`.
pub mod br_date_time {
    use chrono::NaiveDateTime;
    use serde::de::Error;
    use serde::{Deserialize, Deserializer, Serializer};

    pub fn serialize<S>(date_time: &NaiveDateTime, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_str(&super::format_date_time(*date_time))
    }

    pub fn deserialize<'de, D>(deserializer: D) -> Result<NaiveDateTime, D::Error>
    where
        D: Deserializer<'de>,
    {
        let text = String::deserialize(deserializer)?;
        super::parse_date_time(&text).map_err(Error::custom)
    }
}

/// serde adapter: CPF formatted out, normalized to bare digits in.
pub mod cpf {
    use serde::{Deserialize, Deserializer, Serializer};

    pub fn serialize<S>(value: &str, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_str(&super::format_cpf(value))
    }

    pub fn deserialize<'de, D>(deserializer: D) -> Result<String, D::Error>
    where
        D: Deserializer<'de>,
    {
        let text = String::deserialize(deserializer)?;
        Ok(super::normalize_digits(&text))
    }
}

/// serde adapter: phone formatted out, normalized to bare digits in.
pub mod phone {
    use serde::{Deserialize, Deserializer, Serializer};

    pub fn serialize<S>(value: &str, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_str(&super::format_phone(value))
    }

    pub fn deserialize<'de, D>(deserializer: D) -> Result<String, D::Error>
    where
        D: Deserializer<'de>,
    {
        let text = String::deserialize(deserializer)?;
        Ok(super::normalize_digits(&text))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_date_both_forms_agree() {
        let slash = parse_date("15/06/1990").unwrap();
        let compact = parse_date("15061990").unwrap();
        assert_eq!(slash, compact);
        assert_eq!(format_date(slash), "15/06/1990");
    }

    #[test]
    fn parse_date_rejects_calendar_invalid() {
        assert!(parse_date("31/02/2024").is_err());
        assert!(parse_date("31022024").is_err());
        assert!(parse_date("00/01/2024").is_err());
    }

    #[test]
    fn parse_date_rejects_other_shapes() {
        assert!(parse_date("1990-06-15").is_err());
        assert!(parse_date("150619").is_err());
        assert!(parse_date("15/06/1990 10:30:00").is_err());
        assert!(parse_date("junho").is_err());
        assert!(parse_date("").is_err());
    }

    #[test]
    fn parse_date_error_names_the_accepted_forms() {
        let err = parse_date("2024").unwrap_err();
        assert!(err.to_string().contains("dd/MM/yyyy or ddMMyyyy"));
    }

    #[test]
    fn parse_date_time_both_forms_agree() {
        let slash = parse_date_time("15/06/2024 10:30:00").unwrap();
        let compact = parse_date_time("15062024103000").unwrap();
        assert_eq!(slash, compact);
        assert_eq!(format_date_time(slash), "15/06/2024 10:30:00");
    }

    #[test]
    fn parse_date_time_rejects_bad_input() {
        assert!(parse_date_time("15/06/2024").is_err());
        assert!(parse_date_time("15062024").is_err());
        assert!(parse_date_time("15/06/2024 25:00:00").is_err());
        assert!(parse_date_time("31/02/2024 10:00:00").is_err());
    }

    #[test]
    fn cpf_formats_eleven_digits() {
        assert_eq!(format_cpf("12345678901"), "123.456.789-01");
    }

    #[test]
    fn cpf_passes_other_lengths_through() {
        assert_eq!(format_cpf("123456"), "123456");
        assert_eq!(format_cpf(""), "");
        assert_eq!(format_cpf("123.456.789-01"), "123.456.789-01");
    }

    #[test]
    fn phone_formats_by_length() {
        assert_eq!(format_phone("1133334444"), "(11) 3333-4444");
        assert_eq!(format_phone("11987654321"), "(11) 9 8765-4321");
        assert_eq!(format_phone("12345"), "12345");
    }

    #[test]
    fn date_adapter_round_trips() {
        #[derive(serde::Serialize, serde::Deserialize)]
        struct Probe {
            #[serde(with = "super::br_date")]
            when: chrono::NaiveDate,
        }

        let probe: Probe = serde_json::from_str(r#"{"when":"15/06/1990"}"#).unwrap();
        assert_eq!(serde_json::to_string(&probe).unwrap(), r#"{"when":"15/06/1990"}"#);

        let compact: Probe = serde_json::from_str(r#"{"when":"15061990"}"#).unwrap();
        assert_eq!(compact.when, probe.when);

        assert!(serde_json::from_str::<Probe>(r#"{"when":"31/02/2024"}"#).is_err());
    }

    #[test]
    fn cpf_adapter_normalizes_in_and_formats_out() {
        #[derive(serde::Serialize, serde::Deserialize)]
        struct Probe {
            #[serde(with = "super::cpf")]
            cpf: String,
        }

        let probe: Probe = serde_json::from_str(r#"{"cpf":"123.456.789-01"}"#).unwrap();
        assert_eq!(probe.cpf, "12345678901");
        assert_eq!(serde_json::to_string(&probe).unwrap(), r#"{"cpf":"123.456.789-01"}"#);
    }
}
