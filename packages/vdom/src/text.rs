/// Remove the indentation shared by all non-blank lines, then trim.
///
/// Lets templates and fixtures keep multi-line text aligned with the
/// surrounding code:
///
/// ```
/// use trellis_vdom::dedent;
///
/// let text = dedent("
///     <p>
///         hi
///     </p>
/// ");
/// assert_eq!(text, "<p>\n    hi\n</p>");
/// ```
pub fn dedent(text: &str) -> String {
    let margin = text
        .lines()
        .filter(|line| !line.trim().is_empty())
        .map(|line| line.len() - line.trim_start_matches([' ', '\t']).len())
        .min()
        .unwrap_or(0);

    text.lines()
        .map(|line| {
            if line.trim().is_empty() {
                ""
            } else {
                &line[margin..]
            }
        })
        .collect::<Vec<_>>()
        .join("\n")
        .trim()
        .to_string()
}
