/*!
Provides text utility functions shared by the line-oriented feed parsers.
*/

/// Split a feed body into numbered lines (1-based).
///
/// Exactly one trailing empty element produced by the final line terminator is dropped, and a
/// carriage return before each terminator is removed. An empty body yields no lines.
pub(crate) fn split_body_lines(body: &str) -> impl Iterator<Item = (usize, &str)> {
    let body = body.strip_suffix('\n').unwrap_or(body);
    body.split('\n')
        .filter(move |_| !body.is_empty())
        .map(|line| line.strip_suffix('\r').unwrap_or(line))
        .enumerate()
        .map(|(idx, line)| (idx + 1, line))
}

#[cfg(test)]
mod tests {
    use super::*;
    use itertools::Itertools;

    #[test]
    fn test_split_body_lines() {
        assert_eq!(
            split_body_lines("a\nb\n").collect_vec(),
            vec![(1, "a"), (2, "b")]
        );
        assert_eq!(
            split_body_lines("a\r\nb\r\n").collect_vec(),
            vec![(1, "a"), (2, "b")]
        );
        // only the final empty element is dropped
        assert_eq!(
            split_body_lines("a\n\n").collect_vec(),
            vec![(1, "a"), (2, "")]
        );
        assert_eq!(split_body_lines("a").collect_vec(), vec![(1, "a")]);
        assert_eq!(split_body_lines("").count(), 0);
        assert_eq!(split_body_lines("\n").collect_vec(), vec![]);
    }
}
