//! Brace-driven re-indentation of Swift source.
//!
//! Every line is stripped and re-indented by its scope depth. Depth follows
//! the `{`/`(`/`[` and `}`/`)`/`]` delimiters outside string literals and `//`
//! comments; a line starting with closers sits at the depth it closes into.
//! Blank lines stay blank and the output ends with a newline.

/// Indentation unit used for generated clients.
pub const INDENT_UNIT: &str = "    ";

/// Re-indent `source` with [`INDENT_UNIT`].
///
/// # Examples
///
/// ```
/// use trpc_swift_codegen::indent::indent_swift_code;
///
/// let code = indent_swift_code("struct A {\nvar b: [\nInt\n]\n}");
/// assert_eq!(code, "struct A {\n    var b: [\n        Int\n    ]\n}\n");
/// ```
pub fn indent_swift_code(source: &str) -> String {
    indent_with(source, INDENT_UNIT)
}

/// Re-indent `source` with a custom unit.
pub fn indent_with(source: &str, unit: &str) -> String {
    let mut out = String::with_capacity(source.len() + source.len() / 4);
    let mut depth: usize = 0;

    for raw in source.lines() {
        let line = raw.trim();
        if line.is_empty() {
            out.push('\n');
            continue;
        }

        let delimiters = scan(line);
        for _ in 0..depth.saturating_sub(delimiters.leading_closers) {
            out.push_str(unit);
        }
        out.push_str(line);
        out.push('\n');

        depth = (depth + delimiters.opens).saturating_sub(delimiters.closes);
    }

    out
}

#[derive(Debug, Default, PartialEq, Eq)]
struct Delimiters {
    leading_closers: usize,
    opens: usize,
    closes: usize,
}

fn scan(line: &str) -> Delimiters {
    let mut delimiters = Delimiters::default();
    let mut leading = true;
    let mut in_string = false;
    let mut chars = line.chars().peekable();

    while let Some(c) = chars.next() {
        if in_string {
            match c {
                '\\' => {
                    chars.next();
                }
                '"' => in_string = false,
                _ => {}
            }
            continue;
        }

        match c {
            '"' => in_string = true,
            '/' if chars.peek() == Some(&'/') => break,
            '{' | '(' | '[' => delimiters.opens += 1,
            '}' | ')' | ']' => {
                delimiters.closes += 1;
                if leading {
                    delimiters.leading_closers += 1;
                }
                continue;
            }
            _ => {}
        }
        leading = false;
    }

    delimiters
}
