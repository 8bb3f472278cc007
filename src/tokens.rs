//! Splits the contents of an input file into tokens, and turns each token into
//! an optional integer. Anything that isn't a plain run of ASCII digits is
//! `None`, and `values` simply drops those.

use bstr::ByteSlice;
use clap::ValueEnum;

/// How the contents of an input file are cut into tokens
#[derive(PartialEq, Eq, Debug, Clone, Copy, Default, ValueEnum)]
pub enum Split {
    /// Every comma- or whitespace-separated field is a token
    #[default]
    Tokens,
    /// Every line, with surrounding whitespace trimmed, is a token
    Lines,
}

/// The `TokenIterator` type is what `tokens` returns: the tokens of a byte
/// slice, borrowed from that slice.
pub type TokenIterator<'a> = Box<dyn Iterator<Item = &'a [u8]> + 'a>;

/// Returns the tokens of `text`. Empty fields and blank lines produce no
/// tokens at all.
#[must_use]
pub fn tokens(text: &[u8], split: Split) -> TokenIterator<'_> {
    match split {
        Split::Tokens => Box::new(text.fields_with(|c| c == ',' || c.is_whitespace())),
        Split::Lines => Box::new(text.lines().map(ByteSlice::trim).filter(|line| !line.is_empty())),
    }
}

/// `Some(n)` if `token` is one or more ASCII digits denoting an `n` that fits
/// in a `u64`, `None` otherwise. Leading zeros are fine; signs are not.
#[must_use]
pub fn parse_token(token: &[u8]) -> Option<u64> {
    if token.is_empty() || !token.iter().all(u8::is_ascii_digit) {
        return None;
    }
    token.to_str().ok()?.parse().ok()
}

/// The integers in `text`, in order of appearance, duplicates included.
pub fn values(text: &[u8], split: Split) -> impl Iterator<Item = u64> + '_ {
    tokens(text, split).filter_map(parse_token)
}

#[allow(clippy::pedantic)]
#[cfg(test)]
mod test {
    use super::*;

    fn all(text: &str, split: Split) -> Vec<u64> {
        values(text.as_bytes(), split).collect()
    }

    #[test]
    fn blank_lines_commas_spaces_and_junk() {
        assert_eq!(all("1\n2\n\nabc\n3,4 5", Split::Tokens), vec![1, 2, 3, 4, 5]);
    }

    #[test]
    fn tabs_and_crlf_are_separators() {
        assert_eq!(all("10\t11\r\n12,,13 ,\r\n", Split::Tokens), vec![10, 11, 12, 13]);
    }

    #[test]
    fn line_mode_wants_a_whole_line_of_digits() {
        assert_eq!(all("1\n  2  \n\nabc\n3,4 5\n6\r\n", Split::Lines), vec![1, 2, 6]);
    }

    #[test]
    fn only_plain_digits_parse() {
        assert_eq!(parse_token(b"0"), Some(0));
        assert_eq!(parse_token(b"007"), Some(7));
        assert_eq!(parse_token(b"5040"), Some(5040));
        for junk in [&b""[..], b"-3", b"+3", b"3.0", b"0x10", b"1e3", b"12a", b"\xff"] {
            assert_eq!(parse_token(junk), None, "for {:?}", junk.as_bstr());
        }
    }

    #[test]
    fn too_big_for_u64_is_junk() {
        assert_eq!(parse_token(b"18446744073709551615"), Some(u64::MAX));
        assert_eq!(parse_token(b"18446744073709551616"), None);
    }

    #[test]
    fn every_token_is_offered_to_the_parser() {
        let text = b"7 x 8";
        let parsed: Vec<Option<u64>> = tokens(text, Split::Tokens).map(parse_token).collect();
        assert_eq!(parsed, vec![Some(7), None, Some(8)]);
    }
}
