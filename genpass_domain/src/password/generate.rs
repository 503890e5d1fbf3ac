use super::PasswordSet;
use crate::profile::Profile;

use itertools::Itertools;
use rand::seq::SliceRandom;
use rand::Rng;
use sha1::Digest;

pub const DEFAULT_PASSWORDS_PER_PROFILE: usize = 5;

pub const MIN_PASSWORD_LEN: usize = 12;
pub const MAX_PASSWORD_LEN: usize = 15;

const MIN_KEYWORD_LEN: usize = 3;
const KEYWORDS_PER_PASSWORD: usize = 2;

const LETTERS: &str = "abcdefghijklmnopqrstuvwxyzABCDEFGHIJKLMNOPQRSTUVWXYZ";
const DIGITS: &str = "0123456789";
const KEYWORD_SYMBOLS: &str = "!@#$%&*?+";
const HASHED_SYMBOLS: &str = "!@#$%^&*";

const HASHED_RANDOM_LEN: usize = 6;
const HASHED_SUFFIX_LEN: usize = 4;
const HASHED_FALLBACK_BASE_LEN: usize = 8;

#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PasswordStrategy {
    /// Three-letter keyword fragments padded with random characters.
    Keyword,
    /// Whole keywords, a random tail and a short digest suffix.
    Hashed,
}

impl std::str::FromStr for PasswordStrategy {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "keyword" => Ok(Self::Keyword),
            "hashed" => Ok(Self::Hashed),
            other => Err(format!(
                "unknown password strategy '{other}', expected keyword or hashed"
            )),
        }
    }
}

impl std::fmt::Display for PasswordStrategy {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Keyword => f.write_str("keyword"),
            Self::Hashed => f.write_str("hashed"),
        }
    }
}

/// Words of at least three characters taken from every string field and every
/// interest, first occurrence first, without duplicates.
pub fn extract_keywords(profile: &Profile) -> Vec<String> {
    let words = profile
        .string_fields()
        .flat_map(|value| value.split(|c: char| c == ',' || c.is_whitespace()))
        .chain(profile.interests.iter().map(String::as_str))
        .filter(|word| word.chars().count() >= MIN_KEYWORD_LEN);

    words.unique().map(str::to_string).collect()
}

pub fn password_valid(password: &str) -> bool {
    let len = password.chars().count();

    (MIN_PASSWORD_LEN..=MAX_PASSWORD_LEN).contains(&len)
        && password.chars().any(|c| c.is_lowercase())
        && password.chars().any(|c| c.is_uppercase())
        && password.chars().any(|c| c.is_ascii_digit())
        && password.chars().any(|c| KEYWORD_SYMBOLS.contains(c))
        && !password.chars().any(char::is_whitespace)
}

pub fn generate_password(
    strategy: PasswordStrategy,
    keywords: &[String],
    rng: &mut impl Rng,
) -> String {
    match strategy {
        PasswordStrategy::Keyword => keyword_password(keywords, rng),
        PasswordStrategy::Hashed => hashed_password(keywords, rng),
    }
}

/// One entry per profile, keyed by student id, in profile order.
pub fn generate_password_set(
    profiles: &[Profile],
    passwords_per_profile: usize,
    strategy: PasswordStrategy,
    rng: &mut impl Rng,
) -> PasswordSet {
    profiles
        .iter()
        .map(|profile| {
            let keywords = extract_keywords(profile);
            let passwords = (0..passwords_per_profile)
                .map(|_| generate_password(strategy, &keywords, rng))
                .collect();

            (profile.student_id.clone(), passwords)
        })
        .collect()
}

fn keyword_password(keywords: &[String], rng: &mut impl Rng) -> String {
    let mut password: String = keywords
        .choose_multiple(rng, KEYWORDS_PER_PASSWORD)
        .map(|word| capitalize(&word.chars().take(3).collect::<String>()))
        .collect();

    let alphabet = [LETTERS, DIGITS, KEYWORD_SYMBOLS].concat();
    while password.chars().count() < MIN_PASSWORD_LEN {
        password.push(random_char(&alphabet, rng));
    }

    password.chars().take(MAX_PASSWORD_LEN).collect()
}

fn hashed_password(keywords: &[String], rng: &mut impl Rng) -> String {
    let base: String = if keywords.is_empty() {
        random_string(LETTERS, HASHED_FALLBACK_BASE_LEN, rng)
    } else {
        keywords
            .choose_multiple(rng, KEYWORDS_PER_PASSWORD)
            .map(String::as_str)
            .collect()
    };

    let alphabet = [LETTERS, DIGITS, HASHED_SYMBOLS].concat();
    let random_part = random_string(&alphabet, HASHED_RANDOM_LEN, rng);

    let digest = sha1::Sha1::digest(format!("{base}{random_part}").as_bytes());
    let suffix = &hex::encode(digest)[..HASHED_SUFFIX_LEN];

    format!("{}{random_part}{suffix}", capitalize(&base))
}

fn random_char(alphabet: &str, rng: &mut impl Rng) -> char {
    let chars = alphabet.as_bytes();
    chars[rng.gen_range(0..chars.len())] as char
}

fn random_string(alphabet: &str, len: usize, rng: &mut impl Rng) -> String {
    (0..len).map(|_| random_char(alphabet, rng)).collect()
}

/// Upper-case the first character and lower-case the rest.
fn capitalize(word: &str) -> String {
    let mut chars = word.chars();
    match chars.next() {
        Some(first) => first
            .to_uppercase()
            .chain(chars.flat_map(char::to_lowercase))
            .collect(),
        None => String::new(),
    }
}
