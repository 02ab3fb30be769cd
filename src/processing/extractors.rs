// Fixed-width field extraction for 2-line and 3-line MRZs
use std::collections::BTreeMap;

use chrono::{Local, NaiveDate};
use log::debug;

use super::candidate::MrzCandidate;
use super::field_correction::FieldCorrection;
use crate::config::ScannerConfig;
use crate::models::{
    CheckDigitReport, CountryCodes, DocumentFormat, DocumentType, MrzLayout, MrzRecord, Rejection,
};
use crate::validation::{DateValidator, MrzValidator};

const FILLER: char = '<';

/// Offsets of every field inside one MRZ layout.
struct FieldLayout {
    name_row: usize,
    name_offset: usize,
    id_row: usize,
    id_span: (usize, usize),
    nationality_row: usize,
    nationality_span: (usize, usize),
    data_row: usize,
    dob_offset: usize,
    gender_offset: usize,
    expiry_offset: usize,
}

// Row 1 holds type, issuer and names; row 2 the numeric data.
const TWO_LINE: FieldLayout = FieldLayout {
    name_row: 0,
    name_offset: 5,
    id_row: 1,
    id_span: (0, 9),
    nationality_row: 1,
    nationality_span: (10, 13),
    data_row: 1,
    dob_offset: 13,
    gender_offset: 20,
    expiry_offset: 21,
};

// Rows 1 and 2 hold the numeric data, row 3 the names.
const THREE_LINE: FieldLayout = FieldLayout {
    name_row: 2,
    name_offset: 0,
    id_row: 0,
    id_span: (5, 14),
    nationality_row: 1,
    nationality_span: (15, 18),
    data_row: 1,
    dob_offset: 0,
    gender_offset: 7,
    expiry_offset: 8,
};

/// Surname and given-name tokens read from an MRZ name field.
#[derive(Debug, Default, PartialEq, Eq)]
pub struct NameTokens {
    pub last_names: Vec<String>,
    pub given_names: Vec<String>,
}

/// Turns an MRZ candidate into an [`MrzRecord`]. Fields that fail their
/// lookup or check digit come out as `None`; only an empty document number
/// rejects the whole record.
pub struct FieldExtractor {
    countries: CountryCodes,
    gender_aliases: BTreeMap<char, char>,
    expiry_horizon_years: i32,
    today: Option<NaiveDate>,
}

impl FieldExtractor {
    pub fn new(config: &ScannerConfig) -> Self {
        FieldExtractor {
            countries: CountryCodes::new(),
            gender_aliases: config.gender_aliases.clone(),
            expiry_horizon_years: config.expiry_horizon_years,
            today: None,
        }
    }

    /// Pin the reference date used for century resolution instead of the
    /// local clock.
    pub fn with_today(mut self, today: NaiveDate) -> Self {
        self.today = Some(today);
        self
    }

    pub fn extract(&self, candidate: &MrzCandidate) -> Result<MrzRecord, Rejection> {
        let layout = match candidate.layout {
            MrzLayout::TwoLine => &TWO_LINE,
            MrzLayout::ThreeLine => &THREE_LINE,
        };
        let rows = &candidate.lines;
        if rows.len() != candidate.layout.line_count() {
            return Err(Rejection::NoCandidate);
        }

        let (id_start, id_end) = layout.id_span;
        let (id_number, id_check) = Self::extract_id_number(&rows[layout.id_row], id_start, id_end);
        let id_number = match id_number {
            Some(id_number) => id_number,
            None => {
                debug!("Document number is empty, discarding frame");
                return Err(Rejection::RecordInvalid);
            }
        };

        let doc_code = Self::document_code(&rows[0]);
        let doc_type = DocumentType::from_code(&doc_code);
        let names = Self::extract_names(layout.name_offset, &rows[layout.name_row]);
        let issuing_country = self.extract_country(&rows[0], 2, 5);
        let (nat_start, nat_end) = layout.nationality_span;
        let nationality = self.extract_country(&rows[layout.nationality_row], nat_start, nat_end);

        let data_row = &rows[layout.data_row];
        let today = self.today();
        let (dob, dob_check) = Self::extract_date(data_row, layout.dob_offset, |yymmdd| {
            DateValidator::birth_date(yymmdd, today)
        });
        let horizon = self.expiry_horizon_years;
        let (doc_expiration_date, expiry_check) =
            Self::extract_date(data_row, layout.expiry_offset, |yymmdd| {
                DateValidator::expiry_date(yymmdd, today, horizon)
            });
        let gender = self.extract_gender(char_at(data_row, layout.gender_offset));

        let additional_information = match candidate.layout {
            MrzLayout::TwoLine => None,
            MrzLayout::ThreeLine => Self::extract_additional_information(&rows[0], &rows[1]),
        };

        Ok(MrzRecord {
            doc_mrz: rows.join("\n"),
            layout: candidate.layout,
            document_format: DocumentFormat::infer(candidate.layout, rows[0].chars().count(), &doc_code),
            doc_type,
            issuing_country,
            given_names: join_tokens(&names.given_names),
            last_names: join_tokens(&names.last_names),
            id_number,
            nationality,
            dob,
            gender,
            doc_expiration_date,
            additional_information,
            check_digits: CheckDigitReport {
                id_number: id_check,
                date_of_birth: dob_check,
                date_of_expiry: expiry_check,
            },
        })
    }

    /// Document code: one character, or two when the second is not a filler.
    pub fn document_code(line: &str) -> String {
        let len = if char_at(line, 1) == Some(FILLER) { 1 } else { 2 };
        line.chars().take(len).collect()
    }

    /// Read the document number from `[start, end)` and check it against the
    /// digit at `end`. The check outcome is reported, not enforced.
    fn extract_id_number(line: &str, start: usize, end: usize) -> (Option<String>, Option<bool>) {
        let raw = FieldCorrection::replace_letters_with_numbers(&span(line, start, end));
        let check = MrzValidator::verify(&raw, char_at(line, end));
        if check == Some(false) {
            debug!("Document number {} fails its check digit", raw);
        }

        let id_number: String = raw.chars().filter(|c| *c != FILLER).collect();
        if id_number.is_empty() {
            (None, check)
        } else {
            (Some(id_number), check)
        }
    }

    fn extract_country(&self, line: &str, start: usize, end: usize) -> Option<String> {
        let code = FieldCorrection::replace_numbers_with_corresponding_letters(&span(line, start, end));

        // Germany writes its code as a single letter
        if code == "D<<" {
            return Some("DEU".to_string());
        }

        match self.countries.get(&code) {
            Some(country) => Some(country.alpha3.to_string()),
            None => {
                debug!("Unknown country code {:?}", code);
                None
            }
        }
    }

    /// Read a `YYMMDD` date at `offset` followed by its check digit. The date
    /// is kept only when it is a real calendar date and the check digit
    /// matches.
    fn extract_date<F>(line: &str, offset: usize, resolve: F) -> (Option<NaiveDate>, Option<bool>)
    where
        F: Fn(&str) -> Option<NaiveDate>,
    {
        let yymmdd = FieldCorrection::replace_letters_with_numbers(&span(line, offset, offset + 6));
        let check = MrzValidator::verify(&yymmdd, char_at(line, offset + 6));

        let date = match resolve(&yymmdd) {
            Some(date) if check == Some(true) => Some(date),
            Some(date) => {
                debug!("Date {} fails its check digit", date);
                None
            }
            None => {
                debug!("Invalid date span {:?}", yymmdd);
                None
            }
        };
        (date, check)
    }

    fn extract_gender(&self, letter: Option<char>) -> Option<char> {
        match letter? {
            FILLER => Some('U'),
            c => Some(self.gender_aliases.get(&c).copied().unwrap_or(c)),
        }
    }

    /// Split an MRZ name field into surname and given-name tokens.
    ///
    /// A single filler ends a token. Two fillers in a row end the surnames;
    /// two more in a row end the given names. A filler opening the field
    /// means there is no surname.
    pub fn extract_names(offset: usize, line: &str) -> NameTokens {
        let mut names = NameTokens::default();
        let mut in_given_names = false;
        let mut filler_run = 0;
        let mut token = String::new();
        let mut finished = false;

        for (index, c) in line.chars().skip(offset).enumerate() {
            if c != FILLER {
                filler_run = 0;
                token.push(c);
                continue;
            }

            if index == 0 {
                in_given_names = true;
                continue;
            }

            let list = if in_given_names {
                &mut names.given_names
            } else {
                &mut names.last_names
            };
            list.push(std::mem::take(&mut token));

            if filler_run == 0 {
                filler_run = 1;
            } else if !in_given_names {
                in_given_names = true;
                filler_run = 0;
            } else {
                finished = true;
                break;
            }
        }

        if !finished {
            let list = if in_given_names {
                &mut names.given_names
            } else {
                &mut names.last_names
            };
            list.push(token);
        }

        for list in [&mut names.last_names, &mut names.given_names] {
            list.retain(|name| !name.is_empty());
            for name in list.iter_mut() {
                *name = FieldCorrection::replace_numbers_with_corresponding_letters(name);
            }
        }

        names
    }

    fn extract_additional_information(first: &str, second: &str) -> Option<String> {
        let info = format!("{}{}", span(first, 15, 30), span(second, 18, 29)).replace(FILLER, " ");
        let info = info.trim();
        if info.is_empty() {
            None
        } else {
            Some(info.to_string())
        }
    }

    fn today(&self) -> NaiveDate {
        self.today.unwrap_or_else(|| Local::now().naive_local().date())
    }
}

/// Characters `[start, end)` of `line`, clipped to its length.
fn span(line: &str, start: usize, end: usize) -> String {
    line.chars().skip(start).take(end.saturating_sub(start)).collect()
}

fn char_at(line: &str, index: usize) -> Option<char> {
    line.chars().nth(index)
}

fn join_tokens(tokens: &[String]) -> Option<String> {
    let joined = tokens.join(" ");
    let joined = joined.trim();
    if joined.is_empty() {
        None
    } else {
        Some(joined.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const TD3_LINE1: &str = "P<UTOERIKSSON<<ANNA<MARIA<<<<<<<<<<<<<<<<<<<";
    const TD3_LINE2: &str = "L898902C36UTO6908061F9406236ZE184226B<<<<<10";
    const TD1_LINE1: &str = "I<UTOD231458907<<<<<<<<<<<<<<<";
    const TD1_LINE2: &str = "7408122F1204159UTO<<<<<<<<<<<6";
    const TD1_LINE3: &str = "ERIKSSON<<ANNA<MARIA<<<<<<<<<<";

    fn extractor() -> FieldExtractor {
        FieldExtractor::new(&ScannerConfig::default())
            .with_today(NaiveDate::from_ymd_opt(2024, 5, 1).unwrap())
    }

    fn two_line(first: &str, second: &str) -> MrzCandidate {
        MrzCandidate {
            layout: MrzLayout::TwoLine,
            lines: vec![first.to_string(), second.to_string()],
        }
    }

    fn three_line(first: &str, second: &str, third: &str) -> MrzCandidate {
        MrzCandidate {
            layout: MrzLayout::ThreeLine,
            lines: vec![first.to_string(), second.to_string(), third.to_string()],
        }
    }

    #[test]
    fn test_extract_reference_passport() {
        let record = extractor().extract(&two_line(TD3_LINE1, TD3_LINE2)).unwrap();

        assert_eq!(record.doc_mrz, format!("{}\n{}", TD3_LINE1, TD3_LINE2));
        assert_eq!(record.doc_type, Some(DocumentType::Passport));
        assert_eq!(record.document_format, DocumentFormat::TD3);
        assert_eq!(record.id_number, "L898902C3");
        assert_eq!(record.issuing_country.as_deref(), Some("UTO"));
        assert_eq!(record.nationality.as_deref(), Some("UTO"));
        assert_eq!(record.dob, NaiveDate::from_ymd_opt(1969, 8, 6));
        assert_eq!(record.gender, Some('F'));
        assert_eq!(record.doc_expiration_date, NaiveDate::from_ymd_opt(1994, 6, 23));
        assert_eq!(record.given_names.as_deref(), Some("ANNA MARIA"));
        assert_eq!(record.last_names.as_deref(), Some("ERIKSSON"));
        assert_eq!(record.additional_information, None);
        assert_eq!(
            record.check_digits,
            CheckDigitReport {
                id_number: Some(true),
                date_of_birth: Some(true),
                date_of_expiry: Some(true),
            }
        );
    }

    #[test]
    fn test_extract_reference_id_card() {
        let record = extractor()
            .extract(&three_line(TD1_LINE1, TD1_LINE2, TD1_LINE3))
            .unwrap();

        assert_eq!(record.doc_type, Some(DocumentType::GovernmentIssuedId));
        assert_eq!(record.document_format, DocumentFormat::TD1);
        assert_eq!(record.id_number, "D23145890");
        assert_eq!(record.issuing_country.as_deref(), Some("UTO"));
        assert_eq!(record.nationality.as_deref(), Some("UTO"));
        assert_eq!(record.dob, NaiveDate::from_ymd_opt(1974, 8, 12));
        assert_eq!(record.gender, Some('F'));
        assert_eq!(record.doc_expiration_date, NaiveDate::from_ymd_opt(2012, 4, 15));
        assert_eq!(record.given_names.as_deref(), Some("ANNA MARIA"));
        assert_eq!(record.last_names.as_deref(), Some("ERIKSSON"));
        assert_eq!(record.additional_information, None);
        assert_eq!(record.check_digits.id_number, Some(true));
    }

    #[test]
    fn test_three_line_additional_information() {
        let first = "I<UTOD231458907ABC<DEF<<<<<<<<";
        let second = "7408122F1204159UTO<XYZ<<<<<<<6";
        let record = extractor().extract(&three_line(first, second, TD1_LINE3)).unwrap();
        assert_eq!(record.additional_information.as_deref(), Some("ABC DEF         XYZ"));
    }

    #[test]
    fn test_empty_id_number_rejects_record() {
        let second = "<<<<<<<<<<UTO6908061F9406236ZE184226B<<<<<10";
        assert_eq!(
            extractor().extract(&two_line(TD3_LINE1, second)),
            Err(Rejection::RecordInvalid)
        );
    }

    #[test]
    fn test_id_number_check_is_not_enforced() {
        let second = "L898902C39UTO6908061F9406236ZE184226B<<<<<10";
        let record = extractor().extract(&two_line(TD3_LINE1, second)).unwrap();
        assert_eq!(record.id_number, "L898902C3");
        assert_eq!(record.check_digits.id_number, Some(false));
    }

    #[test]
    fn test_id_number_repairs_letter_o() {
        let second = "L8989O2C36UTO6908061F9406236ZE184226B<<<<<10";
        let record = extractor().extract(&two_line(TD3_LINE1, second)).unwrap();
        assert_eq!(record.id_number, "L898902C3");
    }

    #[test]
    fn test_invalid_month_is_unset() {
        // Month 13 with a check digit computed over the bad span.
        let dob = "691306";
        let check = MrzValidator::check_digit(dob);
        let second = format!("L898902C36UTO{}{}F9406236ZE184226B<<<<<10", dob, check);
        let record = extractor().extract(&two_line(TD3_LINE1, &second)).unwrap();
        assert_eq!(record.check_digits.date_of_birth, Some(true));
        assert_eq!(record.dob, None);
        assert_eq!(record.doc_expiration_date, NaiveDate::from_ymd_opt(1994, 6, 23));
    }

    #[test]
    fn test_bad_date_check_digit_is_unset() {
        let second = "L898902C36UTO6908062F9406231ZE184226B<<<<<10";
        let record = extractor().extract(&two_line(TD3_LINE1, second)).unwrap();
        assert_eq!(record.dob, None);
        assert_eq!(record.doc_expiration_date, None);
        assert_eq!(record.check_digits.date_of_birth, Some(false));
        assert_eq!(record.check_digits.date_of_expiry, Some(false));
        assert_eq!(record.id_number, "L898902C3");
    }

    #[test]
    fn test_date_repairs_letter_o() {
        let second = "L898902C36UTO69O8O61F94O6236ZE184226B<<<<<10";
        let record = extractor().extract(&two_line(TD3_LINE1, second)).unwrap();
        assert_eq!(record.dob, NaiveDate::from_ymd_opt(1969, 8, 6));
        assert_eq!(record.doc_expiration_date, NaiveDate::from_ymd_opt(1994, 6, 23));
    }

    #[test]
    fn test_country_repair_and_germany() {
        let first = "P<D<<MUSTERMANN<<ERIKA<<<<<<<<<<<<<<<<<<<<<<";
        let second = "C01X00T478D<<6408125F2702283<<<<<<<<<<<<<<<4";
        let record = extractor().extract(&two_line(first, second)).unwrap();
        assert_eq!(record.issuing_country.as_deref(), Some("DEU"));
        assert_eq!(record.nationality.as_deref(), Some("DEU"));
        assert_eq!(record.last_names.as_deref(), Some("MUSTERMANN"));
        assert_eq!(record.given_names.as_deref(), Some("ERIKA"));

        let first = "P<6BRSMITH<<JOHN<<<<<<<<<<<<<<<<<<<<<<<<<<<<";
        let record = extractor().extract(&two_line(first, TD3_LINE2)).unwrap();
        assert_eq!(record.issuing_country.as_deref(), Some("GBR"));
    }

    #[test]
    fn test_unknown_country_and_doc_type_unset() {
        let first = "ZZQQQERIKSSON<<ANNA<MARIA<<<<<<<<<<<<<<<<<<<";
        let record = extractor().extract(&two_line(first, TD3_LINE2)).unwrap();
        assert_eq!(record.doc_type, None);
        assert_eq!(record.issuing_country, None);
        assert_eq!(record.nationality.as_deref(), Some("UTO"));
    }

    #[test]
    fn test_gender_mapping() {
        let extractor = extractor();
        assert_eq!(extractor.extract_gender(Some('<')), Some('U'));
        assert_eq!(extractor.extract_gender(Some('H')), Some('M'));
        assert_eq!(extractor.extract_gender(Some('F')), Some('F'));
        assert_eq!(extractor.extract_gender(Some('X')), Some('X'));
        assert_eq!(extractor.extract_gender(None), None);

        let mut config = ScannerConfig::default();
        config.gender_aliases.clear();
        let literal = FieldExtractor::new(&config);
        assert_eq!(literal.extract_gender(Some('H')), Some('H'));
    }

    #[test]
    fn test_document_code() {
        assert_eq!(FieldExtractor::document_code("P<UTO"), "P");
        assert_eq!(FieldExtractor::document_code("POUTO"), "PO");
        assert_eq!(FieldExtractor::document_code("V"), "V");
    }

    #[test]
    fn test_extract_names() {
        let names = FieldExtractor::extract_names(5, TD3_LINE1);
        assert_eq!(names.last_names, vec!["ERIKSSON"]);
        assert_eq!(names.given_names, vec!["ANNA", "MARIA"]);

        let names = FieldExtractor::extract_names(0, "DE<LA<CRUZ<<JUAN<<<<");
        assert_eq!(names.last_names, vec!["DE", "LA", "CRUZ"]);
        assert_eq!(names.given_names, vec!["JUAN"]);
    }

    #[test]
    fn test_extract_names_stops_after_given_names() {
        let names = FieldExtractor::extract_names(0, "SMITH<<JOHN<<NOISE");
        assert_eq!(names.last_names, vec!["SMITH"]);
        assert_eq!(names.given_names, vec!["JOHN"]);
    }

    #[test]
    fn test_extract_names_without_fillers_at_end() {
        let names = FieldExtractor::extract_names(0, "SMITH<<JOHN<PAUL");
        assert_eq!(names.given_names, vec!["JOHN", "PAUL"]);

        let names = FieldExtractor::extract_names(0, "SMITH");
        assert_eq!(names.last_names, vec!["SMITH"]);
        assert!(names.given_names.is_empty());
    }

    #[test]
    fn test_extract_names_leading_double_filler() {
        let names = FieldExtractor::extract_names(0, "<<ANNA<<<<");
        assert!(names.last_names.is_empty());
        assert_eq!(names.given_names, vec!["ANNA"]);
    }

    #[test]
    fn test_extract_names_leading_single_filler() {
        let names = FieldExtractor::extract_names(0, "<ANNA<<<<");
        assert!(names.last_names.is_empty());
        assert_eq!(names.given_names, vec!["ANNA"]);

        let names = FieldExtractor::extract_names(0, "<ANNA<MARIA<<NOISE");
        assert!(names.last_names.is_empty());
        assert_eq!(names.given_names, vec!["ANNA", "MARIA"]);
    }

    #[test]
    fn test_extract_names_repairs_digits() {
        let names = FieldExtractor::extract_names(0, "ER1KSS0N<<6E0R6E<<");
        assert_eq!(names.last_names, vec!["ERIKSSON"]);
        assert_eq!(names.given_names, vec!["GEORGE"]);
    }

    #[test]
    fn test_short_rows_do_not_panic() {
        let record = extractor().extract(&two_line("P<UTO", "L898902C3"));
        let record = record.unwrap();
        assert_eq!(record.id_number, "L898902C3");
        assert_eq!(record.check_digits.id_number, None);
        assert_eq!(record.dob, None);
        assert_eq!(record.gender, None);
        assert_eq!(record.nationality, None);
    }
}
