//! Per-field binding options.

/// Option enabling `heading=<text>`.
pub const HEADING_OPTION: &str = "heading";
/// Option enabling `trim`.
pub const TRIM_OPTION: &str = "trim";
/// Option enabling `default=<text>`.
pub const DEFAULT_OPTION: &str = "default";
/// Option enabling `time=<format>`.
pub const TIME_OPTION: &str = "time";

/// Parsed form of a `"heading=Units,trim,default=1"` option string.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ColumnTag {
    /// Column heading overriding the field name.
    pub heading: Option<String>,
    /// Strip surrounding whitespace before coercion.
    pub trim: bool,
    /// Raw text used when the cell is empty.
    pub default_value: Option<String>,
    /// `strftime` patterns tried in order for text temporal cells.
    pub time_formats: Vec<String>,
}

impl ColumnTag {
    /// Parse a comma-separated option string.
    ///
    /// Keys are case-insensitive, values are kept verbatim and run to the next
    /// comma. Unknown options are ignored and the last repeated option wins.
    /// There is no escaping, so values cannot contain commas.
    #[must_use]
    pub fn parse(options: &str) -> Self {
        let mut tag = Self::default();

        for option in options.split(',') {
            let (key, value) = option.split_once('=').unwrap_or((option, ""));
            let non_empty = (!value.is_empty()).then(|| value.to_string());

            match key.trim().to_lowercase().as_str() {
                HEADING_OPTION => tag.heading = non_empty,
                TRIM_OPTION => tag.trim = true,
                DEFAULT_OPTION => tag.default_value = non_empty,
                TIME_OPTION => tag.time_formats = non_empty.into_iter().collect(),
                _ => {}
            }
        }

        tag
    }
}
