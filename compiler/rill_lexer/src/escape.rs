//! Escape sequence processing for string and character literals.

/// Resolve a single escape character. Recognized: `\n \r \t \\ \" \' \0`.
#[inline]
fn resolve_escape(c: char) -> Option<char> {
    match c {
        'n' => Some('\n'),
        'r' => Some('\r'),
        't' => Some('\t'),
        '\\' => Some('\\'),
        '"' => Some('"'),
        '\'' => Some('\''),
        '0' => Some('\0'),
        _ => None,
    }
}

/// Unescape a literal body. On failure returns the byte offset (within
/// `s`) of the offending backslash and the escape character.
pub(crate) fn unescape(s: &str) -> Result<String, (usize, char)> {
    let mut result = String::with_capacity(s.len());
    let mut chars = s.char_indices();

    while let Some((pos, c)) = chars.next() {
        if c != '\\' {
            result.push(c);
            continue;
        }
        match chars.next() {
            Some((_, 'u')) => {
                let digits: String = chars.by_ref().take(4).map(|(_, d)| d).collect();
                let decoded = (digits.len() == 4)
                    .then(|| u32::from_str_radix(&digits, 16).ok())
                    .flatten()
                    .and_then(char::from_u32);
                match decoded {
                    Some(ch) => result.push(ch),
                    None => return Err((pos, 'u')),
                }
            }
            Some((_, esc)) => match resolve_escape(esc) {
                Some(resolved) => result.push(resolved),
                None => return Err((pos, esc)),
            },
            None => return Err((pos, '\\')),
        }
    }

    Ok(result)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn plain_text_is_unchanged() {
        assert_eq!(unescape("hello"), Ok("hello".to_string()));
    }

    #[test]
    fn simple_escapes() {
        assert_eq!(unescape(r#"a\nb\t\"c\"\\"#), Ok("a\nb\t\"c\"\\".to_string()));
        assert_eq!(unescape(r"\0"), Ok("\0".to_string()));
    }

    #[test]
    fn unicode_escape() {
        assert_eq!(unescape(r"\u0041\u00e9"), Ok("Aé".to_string()));
        assert_eq!(unescape(r"\u00"), Err((0, 'u')));
    }

    #[test]
    fn unknown_escape_reports_position() {
        assert_eq!(unescape(r"ab\q"), Err((2, 'q')));
    }
}
