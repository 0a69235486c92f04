/// Characters that separate tokens on a command line.
pub const SEPARATORS: [char; 6] = ['\t', ',', '\n', ' ', ';', ':'];

/// Splits a line into upper-cased tokens, dropping empty ones.
pub fn tokenize(line: &str) -> Vec<String> {
    line.split(&SEPARATORS[..])
        .filter(|t| !t.is_empty())
        .map(str::to_uppercase)
        .collect()
}
