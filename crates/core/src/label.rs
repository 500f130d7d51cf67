/// Splits a tile label at camel-case boundaries: a break goes right before
/// any uppercase letter followed by a non-uppercase character, and the
/// uppercase letter starts the next segment.
///
/// `"BigBudget"` gives `["Big", "Budget"]`, `"Zelda"` gives `["Zelda"]`.
pub fn split_label(name: &str) -> Vec<&str> {
    let chars: Vec<(usize, char)> = name.char_indices().collect();
    let mut out = Vec::new();
    let mut start = 0;
    for w in chars.windows(2) {
        let ((at, c), (_, next)) = (w[0], w[1]);
        if at > start && c.is_uppercase() && !next.is_uppercase() {
            out.push(&name[start..at]);
            start = at;
        }
    }
    if start < name.len() || out.is_empty() {
        out.push(&name[start..]);
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn splits_camel_case() {
        assert_eq!(split_label("BigBudget"), vec!["Big", "Budget"]);
        assert_eq!(split_label("KingdomHearts"), vec!["Kingdom", "Hearts"]);
        assert_eq!(split_label("Zelda"), vec!["Zelda"]);
    }

    #[test]
    fn acronyms_and_spaces() {
        // Only the last capital of a run starts a new segment.
        assert_eq!(split_label("HTMLParser"), vec!["HTML", "Parser"]);
        assert_eq!(split_label("Mario Kart Wii"), vec!["Mario ", "Kart ", "Wii"]);
        assert_eq!(split_label("GTA V"), vec!["GT", "A V"]);
    }

    #[test]
    fn empty_and_single_char() {
        assert_eq!(split_label(""), vec![""]);
        assert_eq!(split_label("x"), vec!["x"]);
    }

    #[test]
    fn rejoining_restores_the_name() {
        for name in ["Pokemon Red/Pokemon Blue", "Wii Fit Plus", "BigBudget", "été"] {
            assert_eq!(split_label(name).concat(), name);
            let again: Vec<&str> = split_label(name).into_iter().flat_map(split_label).collect();
            assert_eq!(again, split_label(name));
        }
    }
}
