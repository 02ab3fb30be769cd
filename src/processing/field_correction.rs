/// FieldCorrection repairs the digit/letter confusions the OCR engine makes
/// on MRZ text. Alphabetic fields and numeric fields are repaired in opposite
/// directions.
pub struct FieldCorrection;

impl FieldCorrection {
    /// Normalize one OCR block: drop spaces, uppercase, read `$` as `S`.
    pub fn normalize_block(text: &str) -> String {
        text.replace(' ', "").to_uppercase().replace('$', "S")
    }

    /// Names and country codes never hold digits, so read the usual
    /// look-alikes back as letters.
    pub fn replace_numbers_with_corresponding_letters(word: &str) -> String {
        word.replace('0', "O")
            .replace('6', "G")
            .replace('2', "Z")
            .replace('1', "I")
    }

    /// Numeric spans (dates, document numbers) read `O` as zero.
    pub fn replace_letters_with_numbers(span: &str) -> String {
        span.replace('O', "0")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_normalize_block() {
        assert_eq!(
            FieldCorrection::normalize_block("p<uto eriks$on<<anna"),
            "P<UTOERIKSSON<<ANNA"
        );
        assert_eq!(FieldCorrection::normalize_block("  "), "");
    }

    #[test]
    fn test_name_correction() {
        assert_eq!(
            FieldCorrection::replace_numbers_with_corresponding_letters("J0HN5M1TH62"),
            "JOHN5MITHGZ"
        );
    }

    #[test]
    fn test_name_correction_is_idempotent() {
        for word in ["ER1KSS0N", "6EOR6E", "ANNA", "2", ""] {
            let once = FieldCorrection::replace_numbers_with_corresponding_letters(word);
            let twice = FieldCorrection::replace_numbers_with_corresponding_letters(&once);
            assert_eq!(once, twice);
        }
    }

    #[test]
    fn test_numeric_correction() {
        assert_eq!(FieldCorrection::replace_letters_with_numbers("69O8O6"), "690806");
        assert_eq!(FieldCorrection::replace_letters_with_numbers("L898902C3"), "L898902C3");
    }
}
