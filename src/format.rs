//! Indentation post-processing

/// Replace each leading four-space indent unit with a tab when `use_tab` is set
///
/// Only the indentation at the start of a line is touched, and a partial unit
/// (fewer than four spaces) is left as is. Formatting already tab-indented
/// text is a no-op.
pub fn format(source: &str, use_tab: bool) -> String {
    if !use_tab {
        return source.to_string();
    }

    let mut out = String::with_capacity(source.len());
    for line in source.split_inclusive('\n') {
        let mut rest = line;
        loop {
            if let Some(stripped) = rest.strip_prefix('\t') {
                out.push('\t');
                rest = stripped;
            } else if let Some(stripped) = rest.strip_prefix("    ") {
                out.push('\t');
                rest = stripped;
            } else {
                break;
            }
        }
        out.push_str(rest);
    }
    out
}
