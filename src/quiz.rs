//! Multiple-choice question generation from raw study text.
//!
//! Questions are built heuristically: one sentence becomes one question by
//! blanking a keyword out of it. There is no scoring rubric and no guarantee
//! that options are unique or unambiguous; too little usable text simply
//! yields fewer questions, down to none.

use rand::seq::SliceRandom;
use rand::Rng;
use serde::{Deserialize, Serialize};

/// A generated multiple-choice question.
///
/// `answer` is always present among `options`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Question {
    pub prompt: String,
    pub options: Vec<String>,
    pub answer: String,
}

/// Generate up to `max_questions` questions from `text`.
///
/// Draws randomness from the thread RNG. See [`generate_questions_with`] for
/// the seedable variant.
pub fn generate_questions(text: &str, max_questions: usize) -> Vec<Question> {
    generate_questions_with(text, max_questions, &mut rand::thread_rng())
}

/// Generate questions using the supplied random source.
///
/// Sentences are split on '.' and kept only when they carry more than six
/// words; shorter fragments cannot be blanked meaningfully. Candidates are
/// consumed in original order, at most `max_questions` of them.
pub fn generate_questions_with<R: Rng>(
    text: &str,
    max_questions: usize,
    rng: &mut R,
) -> Vec<Question> {
    let sentences = text
        .split('.')
        .map(str::trim)
        .filter(|s| s.split_whitespace().count() > 6);

    let mut questions = Vec::new();
    for sentence in sentences.take(max_questions) {
        let words: Vec<&str> = sentence.split_whitespace().collect();

        // Keyword from the middle of the sentence: never the first two words,
        // never the final one.
        let keyword = words[rng.gen_range(2..words.len() - 1)];
        let prompt = format!("{}?", sentence.replacen(keyword, "", 1));

        let mut options: Vec<String> = words
            .choose_multiple(rng, 3)
            .map(|w| w.to_string())
            .collect();
        if !options.iter().any(|o| o == keyword) {
            options.push(keyword.to_string());
        }
        options.shuffle(rng);

        questions.push(Question {
            prompt,
            options,
            answer: keyword.to_string(),
        });
    }
    questions
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    const TEXT: &str = "The mitochondria is the powerhouse of the cell. \
        Short sentence here. \
        Photosynthesis converts light energy into chemical energy inside chloroplasts. \
        The nervous system transmits signals between different parts of the body.";

    #[test]
    fn test_empty_text_yields_no_questions() {
        let mut rng = StdRng::seed_from_u64(1);
        assert!(generate_questions_with("", 5, &mut rng).is_empty());
        assert!(generate_questions_with("", 0, &mut rng).is_empty());
    }

    #[test]
    fn test_never_exceeds_candidates_or_max() {
        let mut rng = StdRng::seed_from_u64(2);
        // TEXT has three usable sentences; the short one is discarded.
        let qs = generate_questions_with(TEXT, 10, &mut rng);
        assert_eq!(qs.len(), 3);

        let qs = generate_questions_with(TEXT, 2, &mut rng);
        assert_eq!(qs.len(), 2);
    }

    #[test]
    fn test_short_sentences_are_discarded() {
        let mut rng = StdRng::seed_from_u64(3);
        // Exactly six words is still too short to blank.
        let qs = generate_questions_with("One two three four five six.", 5, &mut rng);
        assert!(qs.is_empty());

        let qs = generate_questions_with("One two three four five six seven.", 5, &mut rng);
        assert_eq!(qs.len(), 1);
    }

    #[test]
    fn test_answer_is_always_an_option() {
        for seed in 0..50 {
            let mut rng = StdRng::seed_from_u64(seed);
            for q in generate_questions_with(TEXT, 5, &mut rng) {
                assert!(
                    q.options.contains(&q.answer),
                    "answer {:?} missing from options {:?}",
                    q.answer,
                    q.options
                );
            }
        }
    }

    #[test]
    fn test_prompt_blanks_keyword_and_ends_with_question_mark() {
        let mut rng = StdRng::seed_from_u64(4);
        let qs = generate_questions_with(TEXT, 5, &mut rng);
        for q in &qs {
            assert!(q.prompt.ends_with('?'));
        }
        // The first sentence's prompt lost one occurrence of its keyword.
        let first = &qs[0];
        let original = "The mitochondria is the powerhouse of the cell";
        let restored_len = first.prompt.len() - 1 + first.answer.len();
        assert_eq!(restored_len, original.len());
    }

    #[test]
    fn test_keyword_never_first_two_or_last_word() {
        for seed in 0..50 {
            let mut rng = StdRng::seed_from_u64(seed);
            let qs = generate_questions_with(TEXT, 1, &mut rng);
            let words: Vec<&str> = "The mitochondria is the powerhouse of the cell"
                .split_whitespace()
                .collect();
            let q = &qs[0];
            assert_ne!(q.answer, words[0]);
            assert_ne!(q.answer, words[1]);
            assert_ne!(q.answer, *words.last().unwrap());
        }
    }

    #[test]
    fn test_options_bounded_at_four() {
        for seed in 0..50 {
            let mut rng = StdRng::seed_from_u64(seed);
            for q in generate_questions_with(TEXT, 5, &mut rng) {
                assert!(q.options.len() == 3 || q.options.len() == 4);
            }
        }
    }
}
