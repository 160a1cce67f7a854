use itertools::Itertools;
use regex::{Captures, Regex};

pub fn split_filter_empty<'a>(input: &'a str, separator: &'a str) -> impl Iterator<Item = &'a str> {
    input.split(separator).filter(|v| !v.trim().is_empty())
}

/// Split `input` on `separator`, succeeding only when there are exactly two parts.
///
/// # Example
///
/// ```
/// use tweakforge_util::split::split_exactly_two;
/// assert_eq!(split_exactly_two("6 / 2", '/'), Some(("6 ", " 2")));
/// assert_eq!(split_exactly_two("1 / 2 / 3", '/'), None);
/// assert_eq!(split_exactly_two("12", '/'), None);
/// ```
pub fn split_exactly_two(input: &str, separator: char) -> Option<(&str, &str)> {
    input.split(separator).collect_tuple()
}

// From https://docs.rs/regex/latest/regex/struct.Regex.html#method.replace_all, but with a
// stateful replacer so callers can record what was matched.
pub fn replace_all(
    re: &Regex,
    haystack: &str,
    mut replacement: impl FnMut(&Captures) -> String,
) -> String {
    let mut new = String::with_capacity(haystack.len());
    let mut last_match = 0;
    for caps in re.captures_iter(haystack) {
        let Some(m) = caps.get(0) else { continue };
        new.push_str(&haystack[last_match..m.start()]);
        new.push_str(&replacement(&caps));
        last_match = m.end();
    }
    new.push_str(&haystack[last_match..]);
    new
}

#[cfg(test)]
mod test {
    use crate::split::{replace_all, split_filter_empty};
    use pretty_assertions::assert_eq;
    use regex::Regex;

    #[test]
    fn filter_empty() {
        let parts: Vec<_> = split_filter_empty("A=1,, B=2, ", ",").collect();
        assert_eq!(parts, &["A=1", " B=2"]);
    }

    #[test]
    fn replace_with_state() {
        let re = Regex::new(r"\d").unwrap();
        let mut seen = vec![];
        let out = replace_all(&re, "a1b2c", |caps| {
            let digit = caps[0].to_string();
            seen.push(digit.clone());
            format!("<{digit}>")
        });

        assert_eq!(out, "a<1>b<2>c");
        assert_eq!(seen, &["1", "2"]);
    }

    #[test]
    fn replace_no_match() {
        let re = Regex::new(r"\d").unwrap();
        assert_eq!(replace_all(&re, "abc", |_| unreachable!()), "abc");
    }
}
