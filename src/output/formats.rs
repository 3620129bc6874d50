//! Output format implementations

use super::EvaluationResponse;

/// Format as a single JSON object
pub fn format_json(response: &EvaluationResponse) -> String {
    serde_json::to_string(response).unwrap_or_else(|e| {
        serde_json::json!({ "error": e.to_string(), "success": false }).to_string()
    })
}

/// Format as a human readable line
pub fn format_text(response: &EvaluationResponse) -> String {
    match response {
        EvaluationResponse::Success(result) => format!(
            "[{}] {} score {:.1} | heard: {} | expected: {}",
            if result.success { "PASS" } else { "FAIL" },
            result.spell,
            result.score,
            display_or_dash(result.user_phonemes.as_str()),
            display_or_dash(result.target_phonemes.as_str()),
        ),
        EvaluationResponse::Failure { error, .. } => format!("[ERROR] {}", error),
    }
}

fn display_or_dash(s: &str) -> &str {
    if s.is_empty() {
        "-"
    } else {
        s
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::evaluator::EvaluationResult;
    use crate::phoneme::PhonemeSequence;

    #[test]
    fn test_format_text_success() {
        let response = EvaluationResponse::Success(EvaluationResult {
            spell: "nox".to_string(),
            score: 75.0,
            user_phonemes: PhonemeSequence::from("n ɒ k"),
            target_phonemes: PhonemeSequence::from("n ɒ k s"),
            success: true,
        });
        assert_eq!(
            format_text(&response),
            "[PASS] nox score 75.0 | heard: n ɒ k | expected: n ɒ k s"
        );
    }

    #[test]
    fn test_format_text_unknown_spell() {
        let response = EvaluationResponse::Success(EvaluationResult {
            spell: "abracadabra".to_string(),
            score: 0.0,
            user_phonemes: PhonemeSequence::from("a b"),
            target_phonemes: PhonemeSequence::empty(),
            success: false,
        });
        assert_eq!(
            format_text(&response),
            "[FAIL] abracadabra score 0.0 | heard: a b | expected: -"
        );
    }

    #[test]
    fn test_format_text_failure() {
        let response = EvaluationResponse::Failure {
            error: "missing spell name".to_string(),
            success: false,
        };
        assert_eq!(format_text(&response), "[ERROR] missing spell name");
    }

    #[test]
    fn test_format_json_failure() {
        let response = EvaluationResponse::Failure {
            error: "boom".to_string(),
            success: false,
        };
        assert_eq!(format_json(&response), r#"{"error":"boom","success":false}"#);
    }
}
