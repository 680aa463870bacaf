use std::cmp::Ordering;

/// A maximal run of either ASCII digits or non-digits.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Chunk<'a> {
    Digits(&'a str),
    Text(&'a str),
}

struct Chunks<'a> {
    rest: &'a str,
}

impl<'a> Iterator for Chunks<'a> {
    type Item = Chunk<'a>;

    fn next(&mut self) -> Option<Chunk<'a>> {
        let first = self.rest.chars().next()?;
        let digits = first.is_ascii_digit();
        let end = self
            .rest
            .find(|c: char| c.is_ascii_digit() != digits)
            .unwrap_or(self.rest.len());
        let (head, tail) = self.rest.split_at(end);
        self.rest = tail;
        Some(if digits {
            Chunk::Digits(head)
        } else {
            Chunk::Text(head)
        })
    }
}

fn chunks(s: &str) -> Chunks<'_> {
    Chunks { rest: s }
}

/// Compare two digit runs by value without parsing, so any length works.
/// Equal values order the one with fewer leading zeros first.
fn cmp_digits(a: &str, b: &str) -> Ordering {
    let a_trim = a.trim_start_matches('0');
    let b_trim = b.trim_start_matches('0');
    a_trim
        .len()
        .cmp(&b_trim.len())
        .then_with(|| a_trim.cmp(b_trim))
        .then_with(|| a.len().cmp(&b.len()))
}

fn cmp_text(a: &str, b: &str) -> Ordering {
    let a_lower = a.chars().flat_map(char::to_lowercase);
    let b_lower = b.chars().flat_map(char::to_lowercase);
    a_lower.cmp(b_lower)
}

/// Human ordering for file names: `frame2` sorts before `frame10`.
///
/// Digit runs compare numerically and text runs compare case-insensitively.
/// Names that are still equal fall back to byte order, which keeps the
/// ordering total.
pub fn natural_cmp(a: &str, b: &str) -> Ordering {
    let mut left = chunks(a);
    let mut right = chunks(b);

    loop {
        let ord = match (left.next(), right.next()) {
            (None, None) => return a.cmp(b),
            (None, Some(_)) => return Ordering::Less,
            (Some(_), None) => return Ordering::Greater,
            (Some(Chunk::Digits(x)), Some(Chunk::Digits(y))) => cmp_digits(x, y),
            (Some(Chunk::Text(x)), Some(Chunk::Text(y))) => cmp_text(x, y),
            // Digits sort ahead of letters, same as plain ASCII.
            (Some(Chunk::Digits(_)), Some(Chunk::Text(_))) => Ordering::Less,
            (Some(Chunk::Text(_)), Some(Chunk::Digits(_))) => Ordering::Greater,
        };
        if ord != Ordering::Equal {
            return ord;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sorted(names: &[&str]) -> Vec<String> {
        let mut v: Vec<String> = names.iter().map(|s| s.to_string()).collect();
        v.sort_by(|a, b| natural_cmp(a, b));
        v
    }

    #[test]
    fn numbers_compare_by_value() {
        assert_eq!(
            sorted(&["f10.png", "f2.png", "f1.png"]),
            vec!["f1.png", "f2.png", "f10.png"]
        );
    }

    #[test]
    fn padding_does_not_matter() {
        assert_eq!(
            sorted(&["frame010.png", "frame9.png", "frame0011.png"]),
            vec!["frame9.png", "frame010.png", "frame0011.png"]
        );
    }

    #[test]
    fn equal_values_prefer_shorter_padding() {
        assert_eq!(natural_cmp("f1.png", "f01.png"), Ordering::Less);
        assert_eq!(natural_cmp("f01.png", "f1.png"), Ordering::Greater);
    }

    #[test]
    fn long_digit_runs_do_not_overflow() {
        let big = "shot99999999999999999999999999.png";
        let bigger = "shot100000000000000000000000000.png";
        assert_eq!(natural_cmp(big, bigger), Ordering::Less);
    }

    #[test]
    fn text_is_case_insensitive_with_byte_tiebreak() {
        assert_eq!(natural_cmp("Frame2", "frame10"), Ordering::Less);
        assert_eq!(natural_cmp("A1", "a1"), Ordering::Less);
        assert_eq!(natural_cmp("a1", "a1"), Ordering::Equal);
    }

    #[test]
    fn prefix_sorts_first() {
        assert_eq!(natural_cmp("frame", "frame1"), Ordering::Less);
        assert_eq!(natural_cmp("1", "a"), Ordering::Less);
    }

    #[test]
    fn multiple_numeric_runs() {
        assert_eq!(
            sorted(&["s2_f10", "s10_f1", "s2_f9"]),
            vec!["s2_f9", "s2_f10", "s10_f1"]
        );
    }
}
