use serde::{Deserialize, Serialize};

/// Configuration for the `bugs` module
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(deny_unknown_fields)]
pub struct BugsConfig {
    #[serde(default)]
    pub password: PasswordConfig,
    #[serde(default)]
    pub hashing: HashingConfig,
    /// Random bytes per bearer token (hex encoded, so the token is twice as long).
    #[serde(default = "default_token_bytes")]
    pub token_bytes: usize,
}

impl Default for BugsConfig {
    fn default() -> Self {
        Self {
            password: PasswordConfig::default(),
            hashing: HashingConfig::default(),
            token_bytes: default_token_bytes(),
        }
    }
}

/// Password strength policy applied at sign-up.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(deny_unknown_fields)]
pub struct PasswordConfig {
    #[serde(default = "default_min_length")]
    pub min_length: usize,
    #[serde(default = "default_true")]
    pub reject_numeric: bool,
    #[serde(default = "default_true")]
    pub check_similarity: bool,
    #[serde(default = "default_common_passwords")]
    pub common_passwords: Vec<String>,
}

impl Default for PasswordConfig {
    fn default() -> Self {
        Self {
            min_length: default_min_length(),
            reject_numeric: true,
            check_similarity: true,
            common_passwords: default_common_passwords(),
        }
    }
}

/// Argon2id cost parameters.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(deny_unknown_fields)]
pub struct HashingConfig {
    #[serde(default = "default_memory_kib")]
    pub memory_kib: u32,
    #[serde(default = "default_iterations")]
    pub iterations: u32,
    #[serde(default = "default_parallelism")]
    pub parallelism: u32,
}

impl Default for HashingConfig {
    fn default() -> Self {
        Self {
            memory_kib: default_memory_kib(),
            iterations: default_iterations(),
            parallelism: default_parallelism(),
        }
    }
}

fn default_token_bytes() -> usize {
    20
}

fn default_min_length() -> usize {
    8
}

fn default_true() -> bool {
    true
}

fn default_memory_kib() -> u32 {
    19_456
}

fn default_iterations() -> u32 {
    2
}

fn default_parallelism() -> u32 {
    1
}

fn default_common_passwords() -> Vec<String> {
    [
        "password",
        "password1",
        "password123",
        "12345678",
        "123456789",
        "1234567890",
        "qwerty123",
        "qwertyuiop",
        "iloveyou",
        "admin123",
        "letmein1",
        "welcome1",
        "sunshine",
        "football",
        "baseball",
        "princess",
        "trustno1",
        "abc12345",
        "passw0rd",
        "11111111",
    ]
    .into_iter()
    .map(str::to_owned)
    .collect()
}
