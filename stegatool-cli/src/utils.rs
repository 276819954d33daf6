//! Common utility functions shared across CLI commands.

use std::ffi::OsString;

/// Long flags that may also be spelled with a single dash (`-inputdir`).
const SINGLE_DASH_FLAGS: [&str; 6] = [
    "inputdir",
    "peoplefile",
    "outputdir",
    "key",
    "font",
    "fontsize",
];

/// Rewrite single-dash long flags into their `--` form.
///
/// Only exact flag names (optionally followed by `=value`) are rewritten,
/// so option values that merely start with a dash pass through unchanged.
pub fn normalize_single_dash_flags<I, T>(args: I) -> Vec<OsString>
where
    I: IntoIterator<Item = T>,
    T: Into<OsString>,
{
    args.into_iter()
        .map(Into::into)
        .map(|arg| {
            let Some(text) = arg.to_str() else {
                return arg;
            };
            let Some(rest) = text.strip_prefix('-') else {
                return arg;
            };
            if rest.starts_with('-') {
                return arg;
            }
            let flag = rest.split_once('=').map_or(rest, |(flag, _)| flag);
            if SINGLE_DASH_FLAGS.contains(&flag) {
                OsString::from(format!("-{text}"))
            } else {
                arg
            }
        })
        .collect()
}

/// clap value parser for `-fontsize`: a finite, positive pixel size.
pub fn parse_font_size(value: &str) -> Result<f32, String> {
    let size: f32 = value
        .trim()
        .parse()
        .map_err(|_| format!("`{value}` is not a number"))?;
    if size.is_finite() && size > 0.0 {
        Ok(size)
    } else {
        Err("font size must be a positive number".to_string())
    }
}
