use rand::Rng;
use rand::rngs::OsRng;

/// Recovery codes are 6 lowercase alphanumeric characters, matching the
/// format users receive by email. Sourced from the OS CSPRNG.
pub const RECOVERY_CODE_LEN: usize = 6;

const ALPHABET: &[u8] = b"abcdefghijklmnopqrstuvwxyz0123456789";

pub fn generate_recovery_code() -> String {
    let mut rng = OsRng;
    (0..RECOVERY_CODE_LEN)
        .map(|_| ALPHABET[rng.gen_range(0..ALPHABET.len())] as char)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_code_has_expected_format() {
        for _ in 0..100 {
            let code = generate_recovery_code();
            assert_eq!(code.len(), RECOVERY_CODE_LEN);
            assert!(
                code.chars()
                    .all(|c| c.is_ascii_lowercase() || c.is_ascii_digit())
            );
        }
    }

    #[test]
    fn test_codes_vary() {
        let codes: std::collections::HashSet<String> =
            (0..50).map(|_| generate_recovery_code()).collect();
        // 36^6 possibilities; 50 draws colliding down to one value would
        // mean the generator is broken.
        assert!(codes.len() > 1);
    }
}
