//! Utility macros for the front end.
//!
//! - `MK_TOKEN!` - Creates a Token instance
//! - `MK_GREEDY!` - Picks the longest operator spelling at the lexer cursor

/// Creates a Token instance.
///
/// # Arguments
///
/// * `$kind` - The TokenKind
/// * `$lexeme` - The token's source text
/// * `$span` - The source span
///
/// # Example
///
/// ```ignore
/// let token = MK_TOKEN!(TokenKind::Integer, "42".to_string(), span);
/// ```
#[macro_export]
macro_rules! MK_TOKEN {
    ($kind:expr, $lexeme:expr, $span:expr) => {
        Token {
            kind: $kind,
            lexeme: $lexeme,
            span: $span,
        }
    };
}

/// Resolves an operator by greedy longest match.
///
/// The leading character has already been consumed. Each arm lists the
/// remaining characters to match and the kind they produce; arms are tried
/// in order, so longer spellings go first. The last expression is the kind
/// of the bare leading character.
///
/// # Example
///
/// ```ignore
/// let kind = MK_GREEDY!(lexer, ['+'] => TokenKind::PlusPlus, ['='] => TokenKind::PlusAssign; TokenKind::Plus);
/// ```
#[macro_export]
macro_rules! MK_GREEDY {
    ($lexer:expr, $([$($ch:literal),+] => $kind:expr),* ; $default:expr) => {{
        let mut kind = $default;
        'greedy: {
            $(
                if $lexer.lookahead_is(&[$($ch),+]) {
                    $( let _ = $lexer.match_char($ch); )+
                    kind = $kind;
                    break 'greedy;
                }
            )*
        }
        kind
    }};
}
