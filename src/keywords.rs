use unicode_general_category::{get_general_category, GeneralCategory};

use crate::error::{Result, ScrapeError};

/// Used when the caller passes no keywords at all.
pub const DEFAULT_KEYWORDS: [&str; 3] = ["btc", "eth", "xrp"];

/// A normalized search term: trimmed, lowercase, letters and interior spaces only.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Keyword(String);

impl Keyword {
    /// Normalize and validate a single raw entry.
    pub fn parse(raw: &str) -> Result<Self> {
        let trimmed = raw.trim();
        if trimmed.is_empty() || !trimmed.chars().all(|c| c == ' ' || is_letter(c)) {
            return Err(ScrapeError::Validation {
                keyword: raw.to_string(),
            });
        }
        // Simple per-char mapping, so `İ` becomes a plain `i`
        let normalized = trimmed
            .chars()
            .map(|c| c.to_lowercase().next().unwrap_or(c))
            .collect();
        Ok(Self(normalized))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

/// Unicode general category L*.
fn is_letter(c: char) -> bool {
    matches!(
        get_general_category(c),
        GeneralCategory::UppercaseLetter
            | GeneralCategory::LowercaseLetter
            | GeneralCategory::TitlecaseLetter
            | GeneralCategory::ModifierLetter
            | GeneralCategory::OtherLetter
    )
}

/// Turn the raw `--keywords` value into the ordered keyword list.
///
/// `None` or an empty string selects [`DEFAULT_KEYWORDS`]. Any bad entry
/// rejects the whole list.
pub fn parse_keywords(raw: Option<&str>) -> Result<Vec<Keyword>> {
    match raw {
        None | Some("") => {
            tracing::info!("No keywords given, using the default coin list");
            Ok(default_keywords())
        }
        Some(list) => {
            let keywords = list
                .split(',')
                .map(Keyword::parse)
                .collect::<Result<Vec<_>>>()?;
            tracing::info!("Using {} caller-supplied keywords", keywords.len());
            Ok(keywords)
        }
    }
}

pub fn default_keywords() -> Vec<Keyword> {
    DEFAULT_KEYWORDS
        .iter()
        .map(|k| Keyword((*k).to_string()))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn strs(keywords: &[Keyword]) -> Vec<&str> {
        keywords.iter().map(Keyword::as_str).collect()
    }

    #[test]
    fn test_absent_keywords_use_defaults() {
        let keywords = parse_keywords(None).unwrap();
        assert_eq!(strs(&keywords), vec!["btc", "eth", "xrp"]);
    }

    #[test]
    fn test_empty_keywords_use_defaults() {
        let keywords = parse_keywords(Some("")).unwrap();
        assert_eq!(strs(&keywords), vec!["btc", "eth", "xrp"]);
    }

    #[test]
    fn test_keywords_are_trimmed_and_lowercased() {
        let keywords = parse_keywords(Some(" BTC , Ethereum,bitcoin cash ")).unwrap();
        assert_eq!(strs(&keywords), vec!["btc", "ethereum", "bitcoin cash"]);
    }

    #[test]
    fn test_duplicates_and_order_are_kept() {
        let keywords = parse_keywords(Some("eth,btc,eth")).unwrap();
        assert_eq!(strs(&keywords), vec!["eth", "btc", "eth"]);
    }

    #[test]
    fn test_non_letters_are_rejected() {
        for bad in ["btc,e7h", "btc.", "usd-coin", "x_r_p", "btc,,eth", "  "] {
            let err = parse_keywords(Some(bad)).unwrap_err();
            assert!(
                matches!(err, ScrapeError::Validation { .. }),
                "expected validation error for {bad:?}, got {err}"
            );
        }
    }

    #[test]
    fn test_letter_numbers_are_rejected() {
        // U+216B ROMAN NUMERAL TWELVE is alphabetic but category Nl
        assert!(matches!(
            Keyword::parse("btc\u{216B}"),
            Err(ScrapeError::Validation { .. })
        ));
    }

    #[test]
    fn test_combining_marks_are_rejected() {
        // U+0345 COMBINING GREEK YPOGEGRAMMENI is alphabetic but category Mn
        assert!(matches!(
            Keyword::parse("eth\u{345}"),
            Err(ScrapeError::Validation { .. })
        ));
    }

    #[test]
    fn test_dotted_capital_i_lowercases_to_plain_i() {
        let keyword = Keyword::parse("\u{130}nu").unwrap();
        assert_eq!(keyword.as_str(), "inu");
    }

    #[test]
    fn test_unicode_letters_are_accepted() {
        let keyword = Keyword::parse("Ñandú").unwrap();
        assert_eq!(keyword.as_str(), "ñandú");
    }
}
