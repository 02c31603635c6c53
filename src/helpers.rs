use anyhow::{anyhow, Error};

/// Find the most similar ID from a list of candidates
pub fn find_similar_id<S: AsRef<str>>(target: &str, candidates: &[S]) -> Option<String> {
    candidates
        .iter()
        .map(|candidate| (candidate.as_ref(), strsim::levenshtein(target, candidate.as_ref())))
        // Only suggest if distance is small (1-2 character difference)
        .filter(|(_, distance)| *distance <= 2)
        .min_by_key(|(_, distance)| *distance)
        .map(|(id, _)| id.to_string())
}

/// Build a "not found" error, suggesting a close match when there is one.
pub fn not_found<S: AsRef<str>>(kind: &str, id: &str, candidates: &[S]) -> Error {
    match find_similar_id(id, candidates) {
        Some(suggestion) => anyhow!("{kind} not found: {id}\nDid you mean: {suggestion}"),
        None => anyhow!("{kind} not found: {id}"),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_find_similar_id() {
        let candidates = vec![
            "t8zwaROlx".to_string(),
            "txYz9Kp2m".to_string(),
            "tV1StGXR8".to_string(),
        ];

        assert_eq!(
            find_similar_id("t8zwaRO1x", &candidates),
            Some("t8zwaROlx".to_string())
        );

        assert_eq!(
            find_similar_id("txYz9Kp2n", &candidates),
            Some("txYz9Kp2m".to_string())
        );

        // Very different ID should return None
        assert_eq!(find_similar_id("zzzzz", &candidates), None);
    }

    #[test]
    fn test_closest_match_wins() {
        let candidates = ["gabcdexxx", "gabcdefgh"];
        assert_eq!(
            find_similar_id("gabcdefgx", &candidates),
            Some("gabcdefgh".to_string())
        );
    }

    #[test]
    fn test_not_found_message() {
        let err = not_found("Habit", "hseed0007", &["hseed0001", "gseed0001"]);
        assert_eq!(
            err.to_string(),
            "Habit not found: hseed0007\nDid you mean: hseed0001"
        );

        let err = not_found::<&str>("Goal", "gnothing1", &[]);
        assert_eq!(err.to_string(), "Goal not found: gnothing1");
    }
}
