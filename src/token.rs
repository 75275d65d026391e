use rand::Rng;

const ALPHABET: &[u8] = b"abcdefghijklmnopqrstuvwxyzABCDEFGHIJKLMNOPQRSTUVWXYZ0123456789";

/// Length of every generated token.
pub const TOKEN_LEN: usize = 9;

/// Produces the short tokens embedded in generated short URLs.
///
/// Tokens are drawn uniformly from a 62-symbol alphanumeric alphabet using
/// the thread-local CSPRNG, so live links cannot be enumerated by guessing.
/// A draw carries no uniqueness guarantee of its own: the store's UNIQUE
/// constraint is the real guard, and callers retry on a duplicate.
#[derive(Debug, Clone, Copy, Default)]
pub struct TokenGenerator;

impl TokenGenerator {
    pub fn new() -> Self {
        Self
    }

    /// Generate one 9-character alphanumeric token.
    pub fn generate(&self) -> String {
        let mut rng = rand::thread_rng();
        (0..TOKEN_LEN)
            .map(|_| ALPHABET[rng.gen_range(0..ALPHABET.len())] as char)
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn tokens_are_nine_chars() {
        let gen = TokenGenerator::new();
        for _ in 0..100 {
            assert_eq!(gen.generate().len(), TOKEN_LEN);
        }
    }

    #[test]
    fn tokens_are_alphanumeric() {
        let gen = TokenGenerator::new();
        for _ in 0..100 {
            assert!(gen.generate().chars().all(|c| c.is_ascii_alphanumeric()));
        }
    }

    #[test]
    fn consecutive_tokens_differ() {
        let gen = TokenGenerator::new();
        assert_ne!(gen.generate(), gen.generate());
    }
}
