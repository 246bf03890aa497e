use crate::shell::error::ParseError;

/// Splits `input` on `delimiter`, skipping empty runs.
///
/// With `keep_delimiter` every delimiter occurrence is also emitted as its own
/// one-character token, interleaved in the order it was met.
pub fn split(input: &str, delimiter: char, keep_delimiter: bool) -> Vec<&str> {
    let mut tokens = Vec::new();
    let mut start = 0;

    for (i, c) in input.char_indices() {
        if c != delimiter {
            continue;
        }
        if i > start {
            tokens.push(&input[start..i]);
        }
        let end = i + c.len_utf8();
        if keep_delimiter {
            tokens.push(&input[i..end]);
        }
        start = end;
    }

    if start < input.len() {
        tokens.push(&input[start..]);
    }
    tokens
}

/// Splits `input` around the last `delimiter` into the text strictly before and
/// strictly after it.
pub fn split_last(input: &str, delimiter: char) -> Result<(&str, &str), ParseError> {
    input
        .rsplit_once(delimiter)
        .ok_or(ParseError::DelimiterNotFound(delimiter))
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_split_on_space() {
        assert_eq!(split("ls -l /tmp", ' ', false), vec!["ls", "-l", "/tmp"]);
    }

    #[test]
    fn test_split_collapses_runs() {
        assert_eq!(split("  a   b  ", ' ', false), vec!["a", "b"]);
        assert!(split("", ' ', false).is_empty());
        assert!(split(";;;", ';', false).is_empty());
    }

    #[test]
    fn test_split_keeps_delimiters() {
        assert_eq!(split("a;b", ';', true), vec!["a", ";", "b"]);
        assert_eq!(split(";a;;", ';', true), vec![";", "a", ";", ";"]);
    }

    #[test]
    fn test_split_multibyte() {
        assert_eq!(split("é→ü→", '→', false), vec!["é", "ü"]);
    }

    #[test]
    fn test_split_last() {
        assert_eq!(split_last("a | b | c", '|'), Ok(("a | b ", " c")));
        assert_eq!(split_last("echo hi >", '>'), Ok(("echo hi ", "")));
        assert_eq!(split_last("> out", '>'), Ok(("", " out")));
    }

    #[test]
    fn test_split_last_missing_delimiter() {
        assert_eq!(split_last("echo hi", '>'), Err(ParseError::DelimiterNotFound('>')));
        assert_eq!(split_last("", '|'), Err(ParseError::DelimiterNotFound('|')));
    }

    proptest! {
        #[test]
        fn prop_tokens_never_empty(input in "[ab; ]{0,40}") {
            for token in split(&input, ';', false) {
                prop_assert!(!token.is_empty());
                prop_assert!(!token.contains(';'));
            }
        }

        #[test]
        fn prop_tokens_are_the_non_empty_runs(input in "[xy ]{0,40}") {
            let expected: Vec<&str> = input.split(' ').filter(|run| !run.is_empty()).collect();
            prop_assert_eq!(split(&input, ' ', false), expected);
        }

        #[test]
        fn prop_kept_delimiters_rebuild_input(input in "[ab|]{0,40}") {
            let tokens = split(&input, '|', true);
            let delimiters = tokens.iter().filter(|t| **t == "|").count();
            prop_assert_eq!(delimiters, input.matches('|').count());
            prop_assert_eq!(tokens.concat(), input);
        }

        #[test]
        fn prop_split_last_rejoins(left in "[a-c ]{0,10}", right in "[a-c ]{0,10}") {
            let input = format!("{}>{}", left, right);
            prop_assert_eq!(split_last(&input, '>'), Ok((left.as_str(), right.as_str())));
        }
    }
}
