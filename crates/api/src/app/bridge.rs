//! Batch result translation.
//!
//! The engine speaks an at-most-report-failures protocol: an empty result
//! list means every record in the batch succeeded, and a non-empty list
//! names only the failed records by batch index. Absence from the list IS
//! the success signal; nothing here asks for per-record confirmation, and
//! nothing here retries.

use serde_json::{Value as JsonValue, json};

use ledgerbridge_core::result_code;
use ledgerbridge_engine::CreateResult;

/// One translated failure, still in submission order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BatchItemError {
    pub index: u32,
    pub error_code: u32,
    pub error: &'static str,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BatchOutcome {
    /// Empty failure list: the whole batch landed.
    Success,
    PartialFailure(Vec<BatchItemError>),
}

fn classify(results: Vec<CreateResult>, name_of: fn(u32) -> &'static str) -> BatchOutcome {
    if results.is_empty() {
        return BatchOutcome::Success;
    }
    BatchOutcome::PartialFailure(
        results
            .into_iter()
            .map(|r| BatchItemError {
                index: r.index,
                error_code: r.result,
                error: name_of(r.result),
            })
            .collect(),
    )
}

pub fn classify_account_results(results: Vec<CreateResult>) -> BatchOutcome {
    classify(results, result_code::create_account_result_name)
}

pub fn classify_transfer_results(results: Vec<CreateResult>) -> BatchOutcome {
    classify(results, result_code::create_transfer_result_name)
}

/// Envelope `errors` entries for a translated failure list.
pub fn errors_json(errors: &[BatchItemError]) -> Vec<JsonValue> {
    errors
        .iter()
        .map(|e| {
            json!({
                "index": e.index,
                "error_code": e.error_code,
                "error": e.error,
            })
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use ledgerbridge_core::result_code::create_account_code;

    use super::*;

    #[test]
    fn empty_results_classify_as_success() {
        assert_eq!(classify_account_results(vec![]), BatchOutcome::Success);
        assert_eq!(classify_transfer_results(vec![]), BatchOutcome::Success);
    }

    #[test]
    fn failures_keep_submission_order_and_names() {
        let outcome = classify_account_results(vec![
            CreateResult {
                index: 0,
                result: create_account_code::EXISTS,
            },
            CreateResult {
                index: 3,
                result: create_account_code::DEBITS_POSTED_MUST_BE_ZERO,
            },
        ]);

        let BatchOutcome::PartialFailure(errors) = outcome else {
            panic!("expected partial failure");
        };
        assert_eq!(errors[0].index, 0);
        assert_eq!(errors[0].error, "EXISTS");
        assert_eq!(errors[1].index, 3);
        assert_eq!(errors[1].error, "DEBITS_POSTED_MUST_BE_ZERO");
    }

    #[test]
    fn unknown_codes_translate_to_the_sentinel() {
        let outcome = classify_transfer_results(vec![CreateResult {
            index: 0,
            result: 60_000,
        }]);
        let BatchOutcome::PartialFailure(errors) = outcome else {
            panic!("expected partial failure");
        };
        assert_eq!(errors[0].error, "UNKNOWN_ERROR");
        assert_eq!(errors[0].error_code, 60_000);
    }
}
