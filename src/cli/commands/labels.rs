//! `recipe-allocator labels`

use anyhow::Result;

use crate::cli::router::EXIT_SATISFIED;
use crate::config::AllocatorConfig;
use crate::labels::LabelVocabulary;

/// Print the active label vocabulary, smallest number first
pub fn run_labels_command(config: &AllocatorConfig) -> Result<i32> {
    print!("{}", format_vocabulary(&config.vocabulary()?));
    Ok(EXIT_SATISFIED)
}

fn format_vocabulary(vocabulary: &LabelVocabulary) -> String {
    let mut words: Vec<(&str, u32)> = vocabulary.words().collect();
    words.sort_by_key(|&(word, value)| (value, word));

    let width = words.iter().map(|(word, _)| word.len()).max().unwrap_or(0);
    words
        .into_iter()
        .map(|(word, value)| format!("{word:<width$}  {value}\n"))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_vocabulary_orders_by_value() {
        let vocabulary = LabelVocabulary::default().with_word("six", 6).unwrap();
        assert_eq!(
            format_vocabulary(&vocabulary),
            "two    2\nthree  3\nfour   4\nsix    6\n"
        );
    }
}
