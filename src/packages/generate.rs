//! Package generation
//!
//! Turns the question pool into a package config: shuffle the pool with a
//! fresh seed, keep the whole ordering as `pkg-all`, then cut consecutive
//! fixed-size chunks. The chunk layout depends only on (pool, seed, size),
//! so a stored config can always be traced back to its inputs.

use chrono::{SecondsFormat, Utc};
use thiserror::Error;

use super::model::{ALL_PACKAGE_ID, Package, PackageConfig};
use super::shuffle::{generate_seed, seeded_shuffle};
use crate::corpus::Question;

/// Why a requested package size was rejected
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum SizeError {
    /// Not a number, or below 1
    #[error("Please enter a valid number")]
    Invalid,

    /// Larger than the question pool
    #[error("Cannot exceed {max} total questions")]
    ExceedsPool {
        /// Pool size at validation time
        max: usize,
    },
}

/// Validate a requested questions-per-package value against the pool size
///
/// Every input surface (setup form, CLI) runs this before calling
/// [`generate`]; the generator itself assumes a valid size.
pub fn validate_size(input: &str, pool_size: usize) -> Result<usize, SizeError> {
    let count: usize = input.trim().parse().map_err(|_| SizeError::Invalid)?;

    if count < 1 {
        return Err(SizeError::Invalid);
    }
    if count > pool_size {
        return Err(SizeError::ExceedsPool { max: pool_size });
    }

    Ok(count)
}

/// Generate packages with a freshly minted seed
///
/// `questions_per_package` must be at least 1; callers validate user input
/// before reaching this point. A size of at least the pool length yields a
/// single chunk spanning the whole pool.
pub fn generate(pool: &[Question], questions_per_package: usize) -> PackageConfig {
    generate_with_seed(pool, questions_per_package, &generate_seed())
}

/// Generate packages from an explicit seed
///
/// Same (pool, size, seed) always produces the same config apart from the
/// creation timestamp.
pub fn generate_with_seed(
    pool: &[Question],
    questions_per_package: usize,
    seed: &str,
) -> PackageConfig {
    let shuffled = seeded_shuffle(pool, seed);
    let total = shuffled.len();

    let mut packages = vec![Package {
        id: ALL_PACKAGE_ID.to_string(),
        name: format!("All Questions ({})", total),
        questions: shuffled.clone(),
        total_questions: total,
    }];

    for (idx, chunk) in shuffled.chunks(questions_per_package).enumerate() {
        let number = idx + 1;
        let start = idx * questions_per_package + 1;
        let end = idx * questions_per_package + chunk.len();

        packages.push(Package {
            id: format!("pkg-{}", number),
            name: format!("Package {} (Questions {}-{})", number, start, end),
            questions: chunk.to_vec(),
            total_questions: chunk.len(),
        });
    }

    PackageConfig {
        seed: seed.to_string(),
        questions_per_package,
        total_questions: total,
        created_at: Utc::now().to_rfc3339_opts(SecondsFormat::Millis, true),
        packages,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn create_test_pool(count: usize) -> Vec<Question> {
        (0..count)
            .map(|i| Question {
                question: format!("Question {}", i),
                options: vec!["a".into(), "b".into()],
                answer: "a".into(),
                explanation: None,
                topic_name: None,
                topic_category: None,
            })
            .collect()
    }

    #[test]
    fn generates_all_package_plus_five_chunks_for_245_by_50() {
        let config = generate_with_seed(&create_test_pool(245), 50, "test-seed");

        assert_eq!(config.total_questions, 245);
        assert_eq!(config.packages.len(), 6);

        let all = &config.packages[0];
        assert_eq!(all.id, ALL_PACKAGE_ID);
        assert_eq!(all.name, "All Questions (245)");
        assert_eq!(all.total_questions, 245);

        for (i, pkg) in config.packages[1..5].iter().enumerate() {
            assert_eq!(pkg.id, format!("pkg-{}", i + 1));
            assert_eq!(pkg.total_questions, 50);
        }
        assert_eq!(config.packages[1].name, "Package 1 (Questions 1-50)");
        assert_eq!(config.packages[4].name, "Package 4 (Questions 151-200)");

        let last = &config.packages[5];
        assert_eq!(last.id, "pkg-5");
        assert_eq!(last.name, "Package 5 (Questions 201-245)");
        assert_eq!(last.total_questions, 45);
    }

    #[test]
    fn chunk_sizes_sum_to_pool_size() {
        let config = generate_with_seed(&create_test_pool(245), 50, "test-seed");
        let chunk_total: usize =
            config.packages.iter().skip(1).map(|p| p.total_questions).sum();
        assert_eq!(chunk_total, 245);
    }

    #[test]
    fn size_equal_to_pool_gives_one_chunk() {
        let config = generate_with_seed(&create_test_pool(10), 10, "test-seed");

        assert_eq!(config.packages.len(), 2);
        assert_eq!(config.packages[0].name, "All Questions (10)");
        assert_eq!(config.packages[1].id, "pkg-1");
        assert_eq!(config.packages[1].name, "Package 1 (Questions 1-10)");
    }

    #[test]
    fn size_beyond_pool_gives_one_chunk() {
        let config = generate_with_seed(&create_test_pool(7), 50, "test-seed");

        assert_eq!(config.packages.len(), 2);
        assert_eq!(config.packages[1].name, "Package 1 (Questions 1-7)");
        assert_eq!(config.packages[1].total_questions, 7);
    }

    #[test]
    fn empty_pool_gives_only_the_all_package() {
        let config = generate_with_seed(&[], 10, "test-seed");

        assert_eq!(config.total_questions, 0);
        assert_eq!(config.packages.len(), 1);
        assert_eq!(config.packages[0].id, ALL_PACKAGE_ID);
        assert_eq!(config.packages[0].name, "All Questions (0)");
    }

    #[test]
    fn package_ids_are_unique() {
        let config = generate_with_seed(&create_test_pool(45), 10, "test-seed");
        let mut ids: Vec<&str> = config.packages.iter().map(|p| p.id.as_str()).collect();
        let before = ids.len();
        ids.sort_unstable();
        ids.dedup();
        assert_eq!(ids.len(), before);
    }

    #[test]
    fn chunks_partition_the_all_package_in_order() {
        let config = generate_with_seed(&create_test_pool(23), 10, "test-seed");

        let rejoined: Vec<&Question> =
            config.packages.iter().skip(1).flat_map(|p| p.questions.iter()).collect();
        let all: Vec<&Question> = config.packages[0].questions.iter().collect();
        assert_eq!(rejoined, all);
    }

    #[test]
    fn same_seed_reproduces_the_same_order() {
        let pool = create_test_pool(30);
        let a = generate_with_seed(&pool, 10, "test-seed");
        let b = generate_with_seed(&pool, 10, "test-seed");

        let order_a: Vec<&str> =
            a.packages[0].questions.iter().map(|q| q.question.as_str()).collect();
        let order_b: Vec<&str> =
            b.packages[0].questions.iter().map(|q| q.question.as_str()).collect();
        assert_eq!(order_a, order_b);
    }

    #[test]
    fn fresh_generations_use_distinct_seeds() {
        let pool = create_test_pool(30);
        let a = generate(&pool, 10);
        let b = generate(&pool, 10);
        assert_ne!(a.seed, b.seed);
    }

    #[test]
    fn created_at_is_rfc3339_with_millis() {
        let config = generate_with_seed(&create_test_pool(1), 1, "test-seed");
        // e.g. 2024-06-01T12:00:00.000Z
        assert!(config.created_at.ends_with('Z'));
        assert_eq!(config.created_at.len(), 24);
    }

    #[test]
    fn validate_size_accepts_sizes_within_pool() {
        assert_eq!(validate_size("50", 245), Ok(50));
        assert_eq!(validate_size(" 245 ", 245), Ok(245));
        assert_eq!(validate_size("1", 245), Ok(1));
    }

    #[test]
    fn validate_size_rejects_non_numbers() {
        assert_eq!(validate_size("fifty", 245), Err(SizeError::Invalid));
        assert_eq!(validate_size("", 245), Err(SizeError::Invalid));
        assert_eq!(validate_size("-5", 245), Err(SizeError::Invalid));
    }

    #[test]
    fn validate_size_rejects_zero() {
        assert_eq!(validate_size("0", 245), Err(SizeError::Invalid));
    }

    #[test]
    fn validate_size_rejects_sizes_beyond_pool() {
        assert_eq!(validate_size("246", 245), Err(SizeError::ExceedsPool { max: 245 }));
        assert_eq!(validate_size("1", 0), Err(SizeError::ExceedsPool { max: 0 }));
    }

    #[test]
    fn size_error_messages_name_the_limit() {
        assert_eq!(SizeError::Invalid.to_string(), "Please enter a valid number");
        assert_eq!(
            SizeError::ExceedsPool { max: 245 }.to_string(),
            "Cannot exceed 245 total questions"
        );
    }
}
