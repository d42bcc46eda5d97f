//! Utility to make parsing easier.

use nom::{error::ErrorKind, error_position, Err as NomError, IResult};
use regex::Regex;

/// Turns a regex into a `nom` parser.
///
/// The regexes of this crate are anchored at `^`, so the match starts at
/// the cursor; the input is consumed to the end of the match.
pub fn parse_regex(re: &'static Regex) -> impl Fn(&str) -> IResult<&str, &str> {
    move |i: &str| {
        if let Some(found) = re.find(i) {
            Ok((&i[found.end()..], found.as_str()))
        } else {
            Err(NomError::Error(error_position!(
                i,
                ErrorKind::RegexpCapture
            )))
        }
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use lazy_static::lazy_static;

    lazy_static! {
        static ref AB: Regex = Regex::new(r#"^a+b"#).unwrap();
    }

    #[test]
    fn check_regex() {
        let parser = parse_regex(&AB);

        let (r, f) = parser("aabt").unwrap();
        assert_eq!(f, "aab");
        assert_eq!(r, "t");

        assert!(parser("taab").is_err());
        assert!(parser("tt").is_err());
    }
}
