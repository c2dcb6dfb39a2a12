/// Strips punctuation and folds case so lexicon keys and response tokens
/// compare equal regardless of how they were typed.
pub fn sanitize(word: &str) -> String {
    word.chars()
        .filter(|c| !c.is_ascii_punctuation())
        .flat_map(char::to_lowercase)
        .collect()
}
