//! Line and identifier helpers shared by the emitter

/// Tab width for visual column calculations
pub const TABULATOR_WIDTH: usize = 4;

/// Check if a character is a punctuation/symbol boundary (not whitespace)
pub fn is_punctuation(ch: char) -> bool {
    matches!(
        ch,
        '/' | ':'
            | ','
            | '.'
            | '-'
            | '('
            | ')'
            | '{'
            | '}'
            | '['
            | ']'
            | ';'
            | '"'
            | '\''
            | '<'
            | '>'
            | '='
            | '+'
            | '*'
            | '&'
            | '|'
            | '!'
            | '@'
            | '#'
            | '$'
            | '%'
            | '^'
            | '~'
            | '`'
            | '\\'
            | '?'
    )
}

pub fn is_blank(line: &str) -> bool {
    line.trim().is_empty()
}

/// Lines such as `});` or `},` that carry no code of their own
pub fn is_punctuation_only(line: &str) -> bool {
    !is_blank(line)
        && line
            .chars()
            .all(|ch| ch.is_whitespace() || is_punctuation(ch))
}

/// Visual width of the leading whitespace, with tabs expanded
pub fn leading_visual_width(line: &str) -> usize {
    let leading = line.chars().take_while(|ch| ch.is_whitespace()).count();
    char_col_to_visual_col(line, leading)
}

/// Convert a visual column (screen position) to character column.
/// Accounts for tab expansion when converting screen position to character index.
pub fn visual_col_to_char_col(text: &str, visual_col: usize) -> usize {
    let mut current_visual = 0;
    let mut char_col = 0;

    for ch in text.chars() {
        if current_visual >= visual_col {
            return char_col;
        }

        if ch == '\t' {
            let tab_width = TABULATOR_WIDTH - (current_visual % TABULATOR_WIDTH);
            current_visual += tab_width;
        } else {
            current_visual += 1;
        }
        char_col += 1;
    }

    char_col
}

/// Convert a character column to visual column (screen position).
/// Accounts for tab expansion when converting character index to screen position.
pub fn char_col_to_visual_col(text: &str, char_col: usize) -> usize {
    let mut visual_col = 0;

    for (i, ch) in text.chars().enumerate() {
        if i >= char_col {
            break;
        }

        if ch == '\t' {
            let tab_width = TABULATOR_WIDTH - (visual_col % TABULATOR_WIDTH);
            visual_col += tab_width;
        } else {
            visual_col += 1;
        }
    }

    visual_col
}

/// Split an identifier into display tokens.
///
/// Breaks on `_`, `-`, `.`, whitespace and camelCase humps; a run of capitals
/// stays together until the last one starts a new word (`parseHTMLDoc` gives
/// `parse HTML Doc`).
pub fn split_identifier(name: &str) -> Vec<String> {
    let chars: Vec<char> = name.chars().collect();
    let mut tokens = Vec::new();
    let mut current = String::new();

    for (i, &ch) in chars.iter().enumerate() {
        if ch.is_whitespace() || matches!(ch, '_' | '-' | '.' | '$') {
            if !current.is_empty() {
                tokens.push(std::mem::take(&mut current));
            }
            continue;
        }

        if ch.is_uppercase() && !current.is_empty() {
            let prev = chars[i - 1];
            let next_is_lower = chars.get(i + 1).is_some_and(|n| n.is_lowercase());
            if prev.is_lowercase()
                || prev.is_ascii_digit()
                || (prev.is_uppercase() && next_is_lower)
            {
                tokens.push(std::mem::take(&mut current));
            }
        }
        current.push(ch);
    }

    if !current.is_empty() {
        tokens.push(current);
    }
    tokens
}
