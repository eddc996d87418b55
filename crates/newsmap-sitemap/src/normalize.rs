/// Split raw `<news:keywords>` values into individual keywords.
///
/// Each value is a comma-separated list. Pieces are trimmed, empty pieces are
/// dropped, and the result keeps feed order across all values.
#[must_use]
pub fn split_keywords<I, S>(values: I) -> Vec<String>
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    values
        .into_iter()
        .flat_map(|value| {
            value
                .as_ref()
                .split(',')
                .map(str::trim)
                .filter(|piece| !piece.is_empty())
                .map(str::to_owned)
                .collect::<Vec<_>>()
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn splits_and_trims() {
        assert_eq!(split_keywords(["a, b ,c"]), vec!["a", "b", "c"]);
    }

    #[test]
    fn empty_string_yields_nothing() {
        assert!(split_keywords([""]).is_empty());
    }

    #[test]
    fn no_values_yields_nothing() {
        assert!(split_keywords(Vec::<String>::new()).is_empty());
    }

    #[test]
    fn drops_blank_pieces() {
        assert_eq!(split_keywords([" ,a,, ,b, "]), vec!["a", "b"]);
    }

    #[test]
    fn flattens_repeated_values_in_order() {
        assert_eq!(
            split_keywords(["politics, india", "elections,  delhi"]),
            vec!["politics", "india", "elections", "delhi"]
        );
    }

    #[test]
    fn keeps_inner_whitespace() {
        assert_eq!(
            split_keywords(["New Delhi , Lok Sabha"]),
            vec!["New Delhi", "Lok Sabha"]
        );
    }
}
