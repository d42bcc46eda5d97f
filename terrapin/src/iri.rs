//! Resolution of IRI references against a base.
//!
//! Implements the transformation of RFC 3986 section 5.3 (with the RFC's
//! `merge` and `remove_dot_segments` helpers) over components split by the
//! well-known regex from appendix B. Terrapin resolves every IRI reference
//! a document contains, so the result of [`resolve`] is what ends up in
//! emitted triples.

use lazy_static::lazy_static;
use regex::Regex;

lazy_static! {
    /// Component split of RFC 3986 appendix B. Matches any input.
    static ref COMPONENTS: Regex = Regex::new(
        r#"^(?:([^:/?\#]+):)?(?://([^/?\#]*))?([^?\#]*)(?:\?([^\#]*))?(?:\#(.*))?"#
    )
    .unwrap();
}

/// The five components of an IRI reference.
///
/// `None` and empty string are distinct: `<http://a?>` has an empty query,
/// `<http://a>` has none.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct IriRef<'a> {
    /// Scheme without the trailing `:`.
    pub scheme: Option<&'a str>,
    /// Authority without the leading `//`.
    pub authority: Option<&'a str>,
    /// Path, possibly empty.
    pub path: &'a str,
    /// Query without the leading `?`.
    pub query: Option<&'a str>,
    /// Fragment without the leading `#`.
    pub fragment: Option<&'a str>,
}

impl<'a> IriRef<'a> {
    /// Splits a reference into components. Never fails; an unstructured
    /// string is all path.
    pub fn parse(i: &'a str) -> Self {
        // the regex accepts every string, including the empty one
        let caps = COMPONENTS.captures(i).unwrap();
        IriRef {
            scheme: caps.get(1).map(|m| m.as_str()),
            authority: caps.get(2).map(|m| m.as_str()),
            path: caps.get(3).map(|m| m.as_str()).unwrap_or(""),
            query: caps.get(4).map(|m| m.as_str()),
            fragment: caps.get(5).map(|m| m.as_str()),
        }
    }

    /// true if the reference carries a scheme.
    pub fn is_absolute(&self) -> bool {
        self.scheme.is_some()
    }

    fn recompose(&self, path: &str) -> String {
        let mut out = String::new();
        if let Some(scheme) = self.scheme {
            out.push_str(scheme);
            out.push(':');
        }
        if let Some(authority) = self.authority {
            out.push_str("//");
            out.push_str(authority);
        }
        out.push_str(path);
        if let Some(query) = self.query {
            out.push('?');
            out.push_str(query);
        }
        if let Some(fragment) = self.fragment {
            out.push('#');
            out.push_str(fragment);
        }
        out
    }
}

/// Resolves `reference` against `base` per RFC 3986 section 5.3.
///
/// Returns `None` if `base` cannot serve as one, i.e. it has no scheme.
/// An absolute `reference` resolves regardless of the base.
pub fn resolve(base: &str, reference: &str) -> Option<String> {
    let r = IriRef::parse(reference);
    if r.is_absolute() {
        let path = remove_dot_segments(r.path);
        return Some(r.recompose(&path));
    }

    let b = IriRef::parse(base);
    if !b.is_absolute() {
        return None;
    }

    let target;
    let path;
    if r.authority.is_some() {
        path = remove_dot_segments(r.path);
        target = IriRef {
            scheme: b.scheme,
            authority: r.authority,
            path: "",
            query: r.query,
            fragment: r.fragment,
        };
    } else if r.path.is_empty() {
        path = b.path.to_owned();
        target = IriRef {
            scheme: b.scheme,
            authority: b.authority,
            path: "",
            query: r.query.or(b.query),
            fragment: r.fragment,
        };
    } else {
        path = if r.path.starts_with('/') {
            remove_dot_segments(r.path)
        } else {
            remove_dot_segments(&merge(&b, r.path))
        };
        target = IriRef {
            scheme: b.scheme,
            authority: b.authority,
            path: "",
            query: r.query,
            fragment: r.fragment,
        };
    }
    Some(target.recompose(&path))
}

/// Path merge of RFC 3986 section 5.3.3.
fn merge(base: &IriRef, ref_path: &str) -> String {
    if base.authority.is_some() && base.path.is_empty() {
        format!("/{}", ref_path)
    } else if let Some(cut) = base.path.rfind('/') {
        format!("{}{}", &base.path[..=cut], ref_path)
    } else {
        ref_path.to_owned()
    }
}

/// `remove_dot_segments` of RFC 3986 section 5.2.4.
fn remove_dot_segments(path: &str) -> String {
    let mut input = path;
    let mut output = String::with_capacity(path.len());

    while !input.is_empty() {
        if input.starts_with("../") {
            input = &input[3..];
        } else if input.starts_with("./") {
            input = &input[2..];
        } else if input.starts_with("/./") {
            input = &input[2..];
        } else if input == "/." {
            input = "/";
        } else if input.starts_with("/../") {
            input = &input[3..];
            pop_segment(&mut output);
        } else if input == "/.." {
            input = "/";
            pop_segment(&mut output);
        } else if input == "." || input == ".." {
            input = "";
        } else {
            // move the first segment, including its leading slash
            let from = if input.starts_with('/') { 1 } else { 0 };
            let end = input[from..]
                .find('/')
                .map(|p| p + from)
                .unwrap_or_else(|| input.len());
            output.push_str(&input[..end]);
            input = &input[end..];
        }
    }
    output
}

fn pop_segment(output: &mut String) {
    match output.rfind('/') {
        Some(cut) => output.truncate(cut),
        None => output.clear(),
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use test_case::test_case;

    const BASE: &str = "http://a/b/c/d;p?q";

    // normal examples of RFC 3986 section 5.4.1
    #[test_case("g"       => "http://a/b/c/g" ; "plain segment")]
    #[test_case("./g"     => "http://a/b/c/g" ; "dot segment")]
    #[test_case("g/"      => "http://a/b/c/g/" ; "trailing slash")]
    #[test_case("/g"      => "http://a/g" ; "absolute path")]
    #[test_case("//g"     => "http://g" ; "network path")]
    #[test_case("?y"      => "http://a/b/c/d;p?y" ; "query only")]
    #[test_case("g?y"     => "http://a/b/c/g?y" ; "segment and query")]
    #[test_case("#s"      => "http://a/b/c/d;p?q#s" ; "fragment only")]
    #[test_case("g#s"     => "http://a/b/c/g#s" ; "segment and fragment")]
    #[test_case(""        => "http://a/b/c/d;p?q" ; "empty reference")]
    #[test_case("."       => "http://a/b/c/" ; "single dot")]
    #[test_case(".."      => "http://a/b/" ; "double dot")]
    #[test_case("../g"    => "http://a/b/g" ; "up one")]
    #[test_case("../.."   => "http://a/" ; "up twice")]
    #[test_case("../../g" => "http://a/g" ; "up twice segment")]
    // abnormal examples of section 5.4.2
    #[test_case("../../../g"    => "http://a/g" ; "past the root")]
    #[test_case("/./g"          => "http://a/g" ; "rooted dot")]
    #[test_case("/../g"         => "http://a/g" ; "rooted double dot")]
    #[test_case("g."            => "http://a/b/c/g." ; "dot suffix")]
    #[test_case(".g"            => "http://a/b/c/.g" ; "dot prefix")]
    #[test_case("g.."           => "http://a/b/c/g.." ; "double dot suffix")]
    #[test_case("..g"           => "http://a/b/c/..g" ; "double dot prefix")]
    #[test_case("./../g"        => "http://a/b/g" ; "mixed dots")]
    #[test_case("./g/."         => "http://a/b/c/g/" ; "dir dot")]
    #[test_case("g/./h"         => "http://a/b/c/g/h" ; "inner dot")]
    #[test_case("g/../h"        => "http://a/b/c/h" ; "inner double dot")]
    #[test_case("g;x=1/./y"     => "http://a/b/c/g;x=1/y" ; "param inner dot")]
    #[test_case("g;x=1/../y"    => "http://a/b/c/y" ; "param inner double dot")]
    #[test_case("http://x/y"    => "http://x/y" ; "already absolute")]
    fn resolve_against_rfc_base(reference: &str) -> String {
        resolve(BASE, reference).unwrap()
    }

    #[test]
    fn relative_base_is_refused() {
        assert!(resolve("b/c", "g").is_none());
        assert!(resolve("", "g").is_none());
    }

    #[test]
    fn absolute_reference_ignores_missing_base() {
        assert_eq!(
            Some("http://x/y".to_owned()),
            resolve("", "http://x/y")
        );
    }

    #[test]
    fn empty_base_path_merges_to_root() {
        assert_eq!(Some("http://a/g".to_owned()), resolve("http://a", "g"));
    }

    #[test]
    fn components_distinguish_empty_and_absent() {
        let with_query = IriRef::parse("http://a/p?");
        assert_eq!(Some(""), with_query.query);
        let without = IriRef::parse("http://a/p");
        assert_eq!(None, without.query);
    }
}
