//! Generator tools: UUIDs, passwords and Lorem Ipsum placeholder text.
//!
//! These are the only non-deterministic functions in the crate. Passwords use
//! the operating system's secure random source; UUIDs and Lorem Ipsum use
//! general-purpose generators.

use rand::rngs::OsRng;
use rand::Rng;

/// Characters a generated password is drawn from.
pub const PASSWORD_ALPHABET: &[u8] =
    b"ABCDEFGHIJKLMNOPQRSTUVWXYZabcdefghijklmnopqrstuvwxyz0123456789!@#$%^&*";

pub const DEFAULT_PASSWORD_LENGTH: usize = 16;
pub const MIN_PASSWORD_LENGTH: usize = 8;
pub const MAX_PASSWORD_LENGTH: usize = 64;

pub const LOREM_WORDS: [&str; 23] = [
    "lorem",
    "ipsum",
    "dolor",
    "sit",
    "amet",
    "consectetur",
    "adipiscing",
    "elit",
    "sed",
    "do",
    "eiusmod",
    "tempor",
    "incididunt",
    "ut",
    "labore",
    "et",
    "dolore",
    "magna",
    "aliqua",
    "enim",
    "ad",
    "minim",
    "veniam",
];

pub const DEFAULT_LOREM_PARAGRAPHS: usize = 3;
pub const MIN_LOREM_PARAGRAPHS: usize = 1;
pub const MAX_LOREM_PARAGRAPHS: usize = 5;

/// A random (version 4) UUID in canonical hyphenated form.
pub fn uuid_generate() -> String {
    uuid::Uuid::new_v4().to_string()
}

/// A password of `length` characters drawn uniformly from
/// [`PASSWORD_ALPHABET`] using OS randomness.
///
/// `length` is not range-checked here; callers keep it within
/// [`MIN_PASSWORD_LENGTH`]..=[`MAX_PASSWORD_LENGTH`].
pub fn password_generate(length: usize) -> String {
    let mut rng = OsRng;
    (0..length)
        .map(|_| PASSWORD_ALPHABET[rng.gen_range(0..PASSWORD_ALPHABET.len())] as char)
        .collect()
}

/// `paragraphs` paragraphs of Lorem Ipsum separated by blank lines.
pub fn lorem_ipsum(paragraphs: usize) -> String {
    lorem_generate(&mut rand::thread_rng(), paragraphs)
}

/// Lorem Ipsum from an explicit random source.
pub fn lorem_generate<R: Rng + ?Sized>(rng: &mut R, paragraphs: usize) -> String {
    (0..paragraphs)
        .map(|_| lorem_paragraph(rng))
        .collect::<Vec<_>>()
        .join("\n\n")
}

fn lorem_paragraph<R: Rng + ?Sized>(rng: &mut R) -> String {
    let sentences = rng.gen_range(4..=8);
    (0..sentences)
        .map(|_| lorem_sentence(rng))
        .collect::<Vec<_>>()
        .join(" ")
}

fn lorem_sentence<R: Rng + ?Sized>(rng: &mut R) -> String {
    let length = rng.gen_range(8..=16);
    let words: Vec<&str> = (0..length)
        .map(|_| LOREM_WORDS[rng.gen_range(0..LOREM_WORDS.len())])
        .collect();

    let mut sentence = capitalize(words[0]);
    for word in &words[1..] {
        sentence.push(' ');
        sentence.push_str(word);
    }
    sentence.push('.');
    sentence
}

fn capitalize(word: &str) -> String {
    let mut chars = word.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    // ============================================================================
    // UUID tests
    // ============================================================================

    #[test]
    fn test_uuid_generate_canonical_form() {
        let id = uuid_generate();
        assert_eq!(id.len(), 36);
        let groups: Vec<&str> = id.split('-').collect();
        assert_eq!(
            groups.iter().map(|g| g.len()).collect::<Vec<_>>(),
            vec![8, 4, 4, 4, 12]
        );
        assert!(id.chars().all(|c| c == '-' || c.is_ascii_hexdigit()));
        assert!(!id.chars().any(|c| c.is_ascii_uppercase()));
    }

    #[test]
    fn test_uuid_generate_version_4() {
        let id = uuid_generate();
        assert_eq!(&id[14..15], "4");
    }

    #[test]
    fn test_uuid_generate_unique() {
        assert_ne!(uuid_generate(), uuid_generate());
    }

    // ============================================================================
    // Password tests
    // ============================================================================

    #[test]
    fn test_password_alphabet_composition() {
        assert_eq!(PASSWORD_ALPHABET.len(), 70);
        assert!(PASSWORD_ALPHABET.ends_with(b"!@#$%^&*"));
    }

    #[test]
    fn test_password_generate_length_and_alphabet() {
        let first = password_generate(16);
        let second = password_generate(16);

        assert_eq!(first.chars().count(), 16);
        assert_eq!(second.chars().count(), 16);
        assert_ne!(first, second);
        for c in first.chars().chain(second.chars()) {
            assert!(PASSWORD_ALPHABET.contains(&(c as u8)), "unexpected {c}");
        }
    }

    #[test]
    fn test_password_generate_bounds() {
        assert_eq!(password_generate(MIN_PASSWORD_LENGTH).len(), 8);
        assert_eq!(password_generate(MAX_PASSWORD_LENGTH).len(), 64);
    }

    #[test]
    fn test_password_generate_out_of_range_is_honoured() {
        assert_eq!(password_generate(0), "");
        assert_eq!(password_generate(100).len(), 100);
    }

    // ============================================================================
    // Lorem Ipsum tests
    // ============================================================================

    #[test]
    fn test_lorem_generate_structure() {
        let mut rng = StdRng::seed_from_u64(7);
        let text = lorem_generate(&mut rng, 3);
        let paragraphs: Vec<&str> = text.split("\n\n").collect();
        assert_eq!(paragraphs.len(), 3);

        for paragraph in paragraphs {
            assert!(!paragraph.contains('\n'));
            let sentences: Vec<&str> = paragraph
                .split_inclusive('.')
                .map(str::trim)
                .filter(|s| !s.is_empty())
                .collect();
            assert!((4..=8).contains(&sentences.len()), "{}", sentences.len());

            for sentence in sentences {
                assert!(sentence.ends_with('.'));
                let words: Vec<&str> = sentence.trim_end_matches('.').split(' ').collect();
                assert!((8..=16).contains(&words.len()));
                assert!(words[0].chars().next().unwrap().is_uppercase());
                for word in words {
                    assert!(LOREM_WORDS.contains(&word.to_lowercase().as_str()));
                }
            }
        }
    }

    #[test]
    fn test_lorem_generate_seeded_is_reproducible() {
        let a = lorem_generate(&mut StdRng::seed_from_u64(42), 2);
        let b = lorem_generate(&mut StdRng::seed_from_u64(42), 2);
        assert_eq!(a, b);
    }

    #[test]
    fn test_lorem_ipsum_zero_paragraphs() {
        assert_eq!(lorem_ipsum(0), "");
    }

    #[test]
    fn test_lorem_ipsum_single_paragraph() {
        let text = lorem_ipsum(1);
        assert!(!text.contains("\n\n"));
        assert!(text.ends_with('.'));
    }
}
