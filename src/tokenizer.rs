/// Splits one physical line into cells.
///
/// Commas inside a quoted field are kept literally, and `""` inside a quoted
/// field yields a single `"`. An unterminated quote is not an error: the rest
/// of the line simply lands in the last cell. A line with N unquoted commas
/// always produces N + 1 cells, so an empty line produces one empty cell.
pub fn tokenize(line: &str) -> Vec<String> {
    let mut cells = Vec::new();
    let mut current = String::new();
    let mut in_quotes = false;
    let mut chars = line.chars().peekable();

    while let Some(ch) = chars.next() {
        match ch {
            '"' if in_quotes && chars.peek() == Some(&'"') => {
                current.push('"');
                chars.next();
            }
            '"' => in_quotes = !in_quotes,
            ',' if !in_quotes => cells.push(std::mem::take(&mut current)),
            _ => current.push(ch),
        }
    }
    cells.push(current);
    cells
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_plain_line_rejoins_to_original() {
        for line in [
            "a,b,c",
            "1,,3",
            ",",
            "",
            "  spaced , cells  ",
            "x",
            ",lead",
            "trail,",
            ",,,",
            " , ,\t, ",
            "a,,b,,",
        ] {
            assert_eq!(tokenize(line).join(","), line);
        }
    }

    #[test]
    fn test_generated_lines_rejoin_and_count() {
        let pieces = ["", " ", "1", "-2.5", "abc", "é", "\t x "];
        for a in pieces {
            for b in pieces {
                for c in pieces {
                    let line = format!("{a},{b},{c}");
                    let cells = tokenize(&line);
                    assert_eq!(cells, vec![a, b, c], "{line:?}");
                    assert_eq!(cells.join(","), line);
                }
            }
        }
    }

    #[test]
    fn test_quoted_comma() {
        assert_eq!(tokenize(r#"a,"b,c",d"#), vec!["a", "b,c", "d"]);
    }

    #[test]
    fn test_escaped_quote() {
        assert_eq!(tokenize(r#""he said ""hi""""#), vec![r#"he said "hi""#]);
    }

    #[test]
    fn test_empty_line_is_one_empty_cell() {
        assert_eq!(tokenize(""), vec![""]);
    }

    #[test]
    fn test_cell_count_follows_unquoted_commas() {
        assert_eq!(tokenize(",,").len(), 3);
        assert_eq!(tokenize(r#"",,",x"#), vec![",,", "x"]);
    }

    #[test]
    fn test_unterminated_quote_is_lenient() {
        assert_eq!(tokenize(r#"a,"b,c"#), vec!["a", "b,c"]);
    }

    #[test]
    fn test_quote_mid_cell_toggles() {
        // Quotes may open anywhere in a cell, not only at its start.
        assert_eq!(tokenize(r#"ab"c,d"e,f"#), vec!["abc,de", "f"]);
    }

    #[test]
    fn test_doubled_quote_outside_quotes_toggles_twice() {
        assert_eq!(tokenize(r#"a""b,c"#), vec!["ab", "c"]);
    }

    #[test]
    fn test_non_ascii() {
        assert_eq!(tokenize("é,\"ü,ß\""), vec!["é", "ü,ß"]);
    }
}
