//! Severity token classification.
//!
//! A token is run through an ordered list of matchers; the first one that
//! recognizes it wins. Anything no matcher claims scores 0.

/// Severity words understood by the word matcher.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum SeverityWord {
    Low,
    Medium,
    High,
    Critical,
}

impl SeverityWord {
    pub fn score(self) -> i32 {
        match self {
            SeverityWord::Low => 3,
            SeverityWord::Medium => 5,
            SeverityWord::High => 8,
            SeverityWord::Critical => 10,
        }
    }

    fn parse(token: &str) -> Option<Self> {
        match token.to_ascii_lowercase().as_str() {
            "low" => Some(Self::Low),
            "medium" | "med" => Some(Self::Medium),
            "high" => Some(Self::High),
            "critical" => Some(Self::Critical),
            _ => None,
        }
    }
}

/// Outcome of classifying a raw severity token.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum SeverityMatch {
    Numeric(i32),
    Word(SeverityWord),
    Unrecognized,
}

impl SeverityMatch {
    pub fn score(self) -> i32 {
        match self {
            SeverityMatch::Numeric(value) => value,
            SeverityMatch::Word(word) => word.score(),
            SeverityMatch::Unrecognized => 0,
        }
    }
}

type Matcher = fn(&str) -> Option<SeverityMatch>;

const MATCHERS: [Matcher; 2] = [match_numeric, match_word];

/// Leading whitespace is tolerated; anything after the digits is not.
fn match_numeric(token: &str) -> Option<SeverityMatch> {
    token
        .trim_start()
        .parse::<i32>()
        .ok()
        .map(SeverityMatch::Numeric)
}

fn match_word(token: &str) -> Option<SeverityMatch> {
    SeverityWord::parse(token).map(SeverityMatch::Word)
}

pub fn classify(raw: &str) -> SeverityMatch {
    MATCHERS
        .iter()
        .find_map(|matcher| matcher(raw))
        .unwrap_or(SeverityMatch::Unrecognized)
}

pub fn severity_score(raw: &str) -> i32 {
    classify(raw).score()
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn mapping_is_total() {
        let scores: Vec<i32> = ["7", "HIGH", "unknownword", "-2"]
            .into_iter()
            .map(severity_score)
            .collect();
        assert_eq!(scores, vec![7, 8, 0, -2]);
    }

    #[test]
    fn words_match_case_insensitively() {
        assert_eq!(classify("low"), SeverityMatch::Word(SeverityWord::Low));
        assert_eq!(classify("Med"), SeverityMatch::Word(SeverityWord::Medium));
        assert_eq!(classify("MEDIUM"), SeverityMatch::Word(SeverityWord::Medium));
        assert_eq!(classify("CriTical").score(), 10);
    }

    #[test]
    fn partial_numbers_fall_through_to_the_word_table() {
        assert_eq!(classify("5abc"), SeverityMatch::Unrecognized);
        assert_eq!(classify("3.5"), SeverityMatch::Unrecognized);
        assert_eq!(classify(""), SeverityMatch::Unrecognized);
    }

    #[test]
    fn out_of_range_numbers_score_zero() {
        assert_eq!(classify("99999999999"), SeverityMatch::Unrecognized);
    }

    #[test]
    fn padded_tokens_are_not_trimmed() {
        assert_eq!(severity_score(" high"), 0);
        assert_eq!(severity_score("high "), 0);
        assert_eq!(severity_score("7 "), 0);
        assert_eq!(severity_score(" 4 "), 0);
    }

    #[test]
    fn leading_whitespace_and_plus_sign_are_numeric() {
        assert_eq!(classify(" 4"), SeverityMatch::Numeric(4));
        assert_eq!(classify("+6"), SeverityMatch::Numeric(6));
    }
}
