//! Compiler diagnostic extraction
//!
//! TeX engines report errors as lines starting with `!`. The line itself and
//! the two lines after it (the context line and the offending input) form
//! one block.

/// Number of lines that make up one error block, marker line included
pub const BLOCK_LINES: usize = 3;

/// Collect every `!`-marked block from compiler output.
///
/// Blocks are joined with `\n` internally and concatenated with no separator
/// between blocks. Returns an empty string when no marker line exists.
pub fn extract_error_message(output: &str) -> String {
    let lines: Vec<&str> = output.split('\n').collect();

    lines
        .iter()
        .enumerate()
        .filter(|(_, line)| line.starts_with('!'))
        .map(|(index, _)| {
            let end = (index + BLOCK_LINES).min(lines.len());
            lines[index..end].join("\n")
        })
        .collect()
}
