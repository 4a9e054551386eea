//! Uniform-name parsing and bounded name copies.

/// A query name split into its array-element form, if it has one.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct ParsedUniformName {
    /// Byte position of the final `[`. Meaningful only when `array_element`.
    pub open_pos: usize,
    /// Parsed element index. Zero when not an array-element request.
    pub index: usize,
    /// True when the name has the shape `base[digits]`.
    pub array_element: bool,
}

/// Splits `name` (possibly of the form `base[index]`) for uniform lookup.
///
/// A trailing `]` with a matching `[` and a non-empty, all-digit,
/// non-overflowing index makes this an array-element request. A trailing `]`
/// without that shape makes the whole name unparseable and the lookup fails.
pub(crate) fn parse_uniform_name(name: &str) -> Option<ParsedUniformName> {
    let bytes = name.as_bytes();
    if bytes.last() != Some(&b']') {
        return Some(ParsedUniformName {
            open_pos: 0,
            index: 0,
            array_element: false,
        });
    }
    if bytes.len() < 3 {
        return None;
    }
    let open_pos = name.rfind('[')?;
    let digits = &name[open_pos + 1..name.len() - 1];
    if digits.is_empty() || !digits.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    let index = digits.parse().ok()?;
    Some(ParsedUniformName {
        open_pos,
        index,
        array_element: true,
    })
}

/// Copies `name` into `out` with the buffer-bounded query contract.
///
/// At most `bufsize - 1` name bytes are copied, followed by a NUL
/// terminator; the copied length (terminator excluded) is reported through
/// `length`. `bufsize == 0` performs no writes and reports length 0. `None`
/// outputs are skipped.
pub(crate) fn copy_bounded_name(
    name: &str,
    bufsize: usize,
    length: Option<&mut usize>,
    out: Option<&mut [u8]>,
) {
    if bufsize == 0 {
        if let Some(length) = length {
            *length = 0;
        }
        return;
    }
    let copied = name.len().min(bufsize - 1);
    if let Some(length) = length {
        *length = copied;
    }
    if let Some(out) = out {
        if out.is_empty() {
            return;
        }
        debug_assert!(out.len() >= bufsize);
        let copied = copied.min(out.len() - 1);
        out[..copied].copy_from_slice(&name.as_bytes()[..copied]);
        out[copied] = 0;
    }
}
