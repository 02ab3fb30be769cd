/// ICAO 9303 check digit computation.
pub struct MrzValidator;

const WEIGHTS: [i64; 3] = [7, 3, 1];

impl MrzValidator {
    /// Weighted 7-3-1 check digit over `text`.
    ///
    /// Digits count their value, `<` counts zero and any other character
    /// counts its code point minus 55 (so `A` = 10 ... `Z` = 35). The result
    /// is always in `0..=9`.
    pub fn check_digit(text: &str) -> u8 {
        let sum: i64 = text
            .chars()
            .enumerate()
            .map(|(i, c)| Self::char_value(c) * WEIGHTS[i % 3])
            .sum();

        sum.rem_euclid(10) as u8
    }

    /// Compare `text` against its embedded check character. Returns `None`
    /// when the check character is missing or not a digit.
    pub fn verify(text: &str, check: Option<char>) -> Option<bool> {
        let expected = check?.to_digit(10)?;
        Some(u32::from(Self::check_digit(text)) == expected)
    }

    fn char_value(c: char) -> i64 {
        match c {
            '0'..='9' => i64::from(c as u32 - '0' as u32),
            '<' => 0,
            _ => i64::from(c as u32) - 55,
        }
    }
}
