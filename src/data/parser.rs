//! CSV Parser Module
//! Single-pass tokenizer turning delimited text into rows of string fields.

/// One parsed CSV line, fields in column order.
pub type RawRow = Vec<String>;

/// Parse CSV text into rows.
///
/// Fields are separated by commas. A double-quoted field keeps commas and
/// line breaks literally, and `""` inside it stands for one quote. Any run of
/// `\r`/`\n` outside quotes ends the current row, so blank lines and CRLF
/// never produce empty rows. A line that carries only one empty field is
/// dropped as well. A final row without a trailing newline is still emitted.
///
/// Malformed quoting is not rejected: whatever the state machine produces is
/// returned (`"ab"cd` reads as `abcd`, an unterminated quote runs to the end).
pub fn parse(text: &str) -> Vec<RawRow> {
    let mut rows = Vec::new();
    let mut row: RawRow = Vec::new();
    let mut field = String::new();
    let mut in_quotes = false;
    let mut chars = text.chars().peekable();

    while let Some(c) = chars.next() {
        if in_quotes {
            if c == '"' {
                if chars.peek() == Some(&'"') {
                    chars.next();
                    field.push('"');
                } else {
                    in_quotes = false;
                }
            } else {
                field.push(c);
            }
            continue;
        }

        match c {
            '"' => in_quotes = true,
            ',' => row.push(std::mem::take(&mut field)),
            '\n' | '\r' => {
                if !field.is_empty() || !row.is_empty() {
                    row.push(std::mem::take(&mut field));
                    rows.push(std::mem::take(&mut row));
                }
                while matches!(chars.peek(), Some('\n' | '\r')) {
                    chars.next();
                }
            }
            _ => field.push(c),
        }
    }

    if !field.is_empty() || !row.is_empty() {
        row.push(field);
        rows.push(row);
    }

    rows
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    /// Same quoting rule the parser reads: quote only when needed.
    fn quote_field(value: &str) -> String {
        if value.contains([',', '"', '\n', '\r']) {
            format!("\"{}\"", value.replace('"', "\"\""))
        } else {
            value.to_string()
        }
    }

    fn owned(expected: &[&[&str]]) -> Vec<RawRow> {
        expected
            .iter()
            .map(|r| r.iter().map(|s| s.to_string()).collect())
            .collect()
    }

    #[test]
    fn parses_simple_rows() {
        let parsed = parse("name,classification\nPump,Class II\n");
        assert_eq!(
            parsed,
            owned(&[&["name", "classification"], &["Pump", "Class II"]])
        );
    }

    #[test]
    fn emits_trailing_row_without_newline() {
        assert_eq!(parse("a,b\nc,d"), owned(&[&["a", "b"], &["c", "d"]]));
    }

    #[test]
    fn collapses_crlf_and_blank_lines() {
        assert_eq!(
            parse("a,b\r\n\r\n\nc,d\r\n"),
            owned(&[&["a", "b"], &["c", "d"]])
        );
    }

    #[test]
    fn lone_carriage_return_ends_a_row() {
        assert_eq!(parse("a,b\rc,d"), owned(&[&["a", "b"], &["c", "d"]]));
    }

    #[test]
    fn line_with_single_empty_field_is_dropped() {
        assert_eq!(parse("a\n\"\"\nb"), owned(&[&["a"], &["b"]]));
        assert_eq!(parse("\"\""), Vec::<RawRow>::new());
    }

    #[test]
    fn keeps_empty_fields_inside_a_row() {
        assert_eq!(parse("a,,c\n,\n"), owned(&[&["a", "", "c"], &["", ""]]));
    }

    #[test]
    fn quoted_fields_keep_commas_newlines_and_quotes() {
        let parsed = parse("\"Acme, Inc.\",\"line1\nline2\",\"say \"\"hi\"\"\"\n");
        assert_eq!(
            parsed,
            owned(&[&["Acme, Inc.", "line1\nline2", "say \"hi\""]])
        );
    }

    #[test]
    fn malformed_quotes_follow_the_state_machine() {
        assert_eq!(parse("\"ab\"cd,e"), owned(&[&["abcd", "e"]]));
        assert_eq!(parse("\"open,ended\nstill"), owned(&[&["open,ended\nstill"]]));
    }

    #[test]
    fn empty_input_has_no_rows() {
        assert!(parse("").is_empty());
        assert!(parse("\r\n\n").is_empty());
    }

    #[test]
    fn quote_field_only_when_needed() {
        assert_eq!(quote_field("plain"), "plain");
        assert_eq!(quote_field("a,b"), "\"a,b\"");
        assert_eq!(quote_field("say \"x\""), "\"say \"\"x\"\"\"");
        assert_eq!(quote_field("two\nlines"), "\"two\nlines\"");
    }

    fn serialize(rows: &[RawRow]) -> String {
        rows.iter()
            .map(|r| r.iter().map(|f| quote_field(f)).collect::<Vec<_>>().join(","))
            .collect::<Vec<_>>()
            .join("\n")
    }

    proptest! {
        #[test]
        fn quoted_field_round_trips(value in "[a-zA-Z0-9 ,\"\n\r]{1,24}") {
            let line = format!("{},tail", quote_field(&value));
            let parsed = parse(&line);
            prop_assert_eq!(parsed.len(), 1);
            prop_assert_eq!(&parsed[0][0], &value);
            prop_assert_eq!(&parsed[0][1], "tail");
        }

        #[test]
        fn reserialized_rows_parse_to_same_fields(
            table in prop::collection::vec(
                prop::collection::vec("[a-z ,\"\n]{0,8}", 2..5),
                1..6,
            )
        ) {
            let rows: Vec<RawRow> = table;
            let reparsed = parse(&serialize(&rows));
            prop_assert_eq!(&reparsed, &rows);
            prop_assert_eq!(parse(&serialize(&reparsed)), reparsed);
        }
    }
}
