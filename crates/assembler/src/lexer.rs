//! Tokenizer for silt assembly text.
//!
//! Produces a flat, ordered token sequence. Whitespace and commas
//! separate tokens; a double-quoted literal is absorbed verbatim (the
//! quotes are retained) so `.string` operands survive intact. Character
//! literals like `'x'` are ordinary tokens and pass through unchanged.

use crate::error::AsmError;

/// A single token, tagged with its 1-based source line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct Token {
    pub text: String,
    pub line: usize,
}

/// Tokenize a full source text.
///
/// Comments (`;` to end of line) are stripped before tokenizing, except
/// where the `;` sits inside a double-quoted literal. An unterminated
/// quote is fatal.
pub(crate) fn tokenize(source: &str) -> Result<Vec<Token>, AsmError> {
    let mut tokens = Vec::new();
    for (idx, line) in source.lines().enumerate() {
        tokenize_line(line, idx + 1, &mut tokens)?;
    }
    Ok(tokens)
}

/// Cut the line at the first `;` that is not inside a string literal.
fn strip_comment(line: &str) -> &str {
    let mut in_string = false;
    let mut prev = '\0';
    for (pos, c) in line.char_indices() {
        match c {
            '"' if prev != '\\' => in_string = !in_string,
            ';' if !in_string => return &line[..pos],
            _ => {}
        }
        prev = c;
    }
    line
}

fn tokenize_line(line: &str, line_num: usize, tokens: &mut Vec<Token>) -> Result<(), AsmError> {
    let line = strip_comment(line).trim();
    if line.is_empty() {
        return Ok(());
    }

    let mut current = String::new();
    let mut in_string = false;
    let mut prev = '\0';

    for c in line.chars() {
        if c == '"' && prev != '\\' {
            if in_string {
                current.push(c);
                tokens.push(Token {
                    text: std::mem::take(&mut current),
                    line: line_num,
                });
                in_string = false;
            } else {
                if !current.is_empty() {
                    tokens.push(Token {
                        text: std::mem::take(&mut current),
                        line: line_num,
                    });
                }
                current.push(c);
                in_string = true;
            }
        } else if (c.is_whitespace() || c == ',') && !in_string {
            if !current.is_empty() {
                tokens.push(Token {
                    text: std::mem::take(&mut current),
                    line: line_num,
                });
            }
        } else {
            current.push(c);
        }
        prev = c;
    }

    if !current.is_empty() {
        if in_string {
            return Err(AsmError::UnterminatedString { line: line_num });
        }
        tokens.push(Token {
            text: current,
            line: line_num,
        });
    }

    Ok(())
}
