//! `<text:p>` content encoding
//!
//! ODF collapses white space inside paragraphs, so runs of spaces, tabs and
//! line breaks have to be spelled out as elements to survive a round trip.

use quick_xml::escape::escape;

/// Encode a string as the inside of a `<text:p>` element
pub(crate) fn paragraph_content(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    let mut plain = String::new();
    let mut at_start = true;
    let mut chars = s.chars().peekable();

    while let Some(c) = chars.next() {
        match c {
            ' ' => {
                let mut run = 1;
                while chars.peek() == Some(&' ') {
                    chars.next();
                    run += 1;
                }
                flush(&mut out, &mut plain);
                if at_start {
                    push_spaces(&mut out, run);
                } else {
                    out.push(' ');
                    push_spaces(&mut out, run - 1);
                }
                at_start = false;
            }
            '\t' => {
                flush(&mut out, &mut plain);
                out.push_str("<text:tab/>");
                at_start = false;
            }
            '\r' if chars.peek() == Some(&'\n') => {}
            '\n' | '\r' => {
                flush(&mut out, &mut plain);
                out.push_str("<text:line-break/>");
                at_start = true;
            }
            other => {
                plain.push(other);
                at_start = false;
            }
        }
    }
    flush(&mut out, &mut plain);
    out
}

fn flush(out: &mut String, plain: &mut String) {
    if !plain.is_empty() {
        out.push_str(&escape(plain.as_str()));
        plain.clear();
    }
}

fn push_spaces(out: &mut String, count: usize) {
    match count {
        0 => {}
        1 => out.push_str("<text:s/>"),
        n => out.push_str(&format!("<text:s text:c=\"{}\"/>", n)),
    }
}
