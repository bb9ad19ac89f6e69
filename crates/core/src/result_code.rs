//! Engine result-code tables.
//!
//! The engine reports batch failures as sparse `(index, code)` pairs; these
//! tables translate the numeric codes into the symbolic names clients see.
//! They are maintained against the engine's published code list. A code we
//! do not recognize (engine ahead of the bridge) translates to the
//! `UNKNOWN_ERROR` sentinel instead of failing the response.

/// Sentinel name for codes missing from the tables.
pub const UNKNOWN_ERROR: &str = "UNKNOWN_ERROR";

/// Account-creation result codes.
pub mod create_account_code {
    pub const OK: u32 = 0;
    pub const LINKED_EVENT_FAILED: u32 = 1;
    pub const LINKED_EVENT_CHAIN_OPEN: u32 = 2;
    pub const IMPORTED_EVENT_EXPECTED: u32 = 3;
    pub const IMPORTED_EVENT_NOT_EXPECTED: u32 = 4;
    pub const TIMESTAMP_MUST_BE_ZERO: u32 = 5;
    pub const IMPORTED_EVENT_TIMESTAMP_OUT_OF_RANGE: u32 = 6;
    pub const IMPORTED_EVENT_TIMESTAMP_MUST_NOT_ADVANCE: u32 = 7;
    pub const RESERVED_FIELD: u32 = 8;
    pub const RESERVED_FLAG: u32 = 9;
    pub const ID_MUST_NOT_BE_ZERO: u32 = 10;
    pub const ID_MUST_NOT_BE_INT_MAX: u32 = 11;
    pub const FLAGS_ARE_MUTUALLY_EXCLUSIVE: u32 = 12;
    pub const DEBITS_PENDING_MUST_BE_ZERO: u32 = 13;
    pub const DEBITS_POSTED_MUST_BE_ZERO: u32 = 14;
    pub const CREDITS_PENDING_MUST_BE_ZERO: u32 = 15;
    pub const CREDITS_POSTED_MUST_BE_ZERO: u32 = 16;
    pub const LEDGER_MUST_NOT_BE_ZERO: u32 = 17;
    pub const CODE_MUST_NOT_BE_ZERO: u32 = 18;
    pub const EXISTS_WITH_DIFFERENT_FLAGS: u32 = 19;
    pub const EXISTS_WITH_DIFFERENT_USER_DATA_128: u32 = 20;
    pub const EXISTS_WITH_DIFFERENT_USER_DATA_64: u32 = 21;
    pub const EXISTS_WITH_DIFFERENT_USER_DATA_32: u32 = 22;
    pub const EXISTS_WITH_DIFFERENT_LEDGER: u32 = 23;
    pub const EXISTS_WITH_DIFFERENT_CODE: u32 = 24;
    pub const EXISTS: u32 = 25;
    pub const IMPORTED_EVENT_TIMESTAMP_MUST_NOT_REGRESS: u32 = 26;
}

/// Transfer-creation result codes.
pub mod create_transfer_code {
    pub const OK: u32 = 0;
    pub const LINKED_EVENT_FAILED: u32 = 1;
    pub const LINKED_EVENT_CHAIN_OPEN: u32 = 2;
    pub const IMPORTED_EVENT_EXPECTED: u32 = 3;
    pub const IMPORTED_EVENT_NOT_EXPECTED: u32 = 4;
    pub const TIMESTAMP_MUST_BE_ZERO: u32 = 5;
    pub const IMPORTED_EVENT_TIMESTAMP_OUT_OF_RANGE: u32 = 6;
    pub const IMPORTED_EVENT_TIMESTAMP_MUST_NOT_ADVANCE: u32 = 7;
    pub const RESERVED_FLAG: u32 = 8;
    pub const ID_MUST_NOT_BE_ZERO: u32 = 9;
    pub const ID_MUST_NOT_BE_INT_MAX: u32 = 10;
    pub const FLAGS_ARE_MUTUALLY_EXCLUSIVE: u32 = 11;
    pub const DEBIT_ACCOUNT_ID_MUST_NOT_BE_ZERO: u32 = 12;
    pub const DEBIT_ACCOUNT_ID_MUST_NOT_BE_INT_MAX: u32 = 13;
    pub const CREDIT_ACCOUNT_ID_MUST_NOT_BE_ZERO: u32 = 14;
    pub const CREDIT_ACCOUNT_ID_MUST_NOT_BE_INT_MAX: u32 = 15;
    pub const ACCOUNTS_MUST_BE_DIFFERENT: u32 = 16;
    pub const PENDING_ID_MUST_BE_ZERO: u32 = 17;
    pub const PENDING_ID_MUST_NOT_BE_ZERO: u32 = 18;
    pub const PENDING_ID_MUST_NOT_BE_INT_MAX: u32 = 19;
    pub const PENDING_ID_MUST_BE_DIFFERENT: u32 = 20;
    pub const TIMEOUT_RESERVED_FOR_PENDING_TRANSFER: u32 = 21;
    pub const AMOUNT_MUST_NOT_BE_ZERO: u32 = 22;
    pub const LEDGER_MUST_NOT_BE_ZERO: u32 = 23;
    pub const CODE_MUST_NOT_BE_ZERO: u32 = 24;
    pub const DEBIT_ACCOUNT_NOT_FOUND: u32 = 25;
    pub const CREDIT_ACCOUNT_NOT_FOUND: u32 = 26;
    pub const ACCOUNTS_MUST_HAVE_THE_SAME_LEDGER: u32 = 27;
    pub const TRANSFER_MUST_HAVE_THE_SAME_LEDGER_AS_ACCOUNTS: u32 = 28;
    pub const PENDING_TRANSFER_NOT_FOUND: u32 = 29;
    pub const PENDING_TRANSFER_NOT_PENDING: u32 = 30;
    pub const PENDING_TRANSFER_HAS_DIFFERENT_DEBIT_ACCOUNT_ID: u32 = 31;
    pub const PENDING_TRANSFER_HAS_DIFFERENT_CREDIT_ACCOUNT_ID: u32 = 32;
    pub const PENDING_TRANSFER_HAS_DIFFERENT_LEDGER: u32 = 33;
    pub const PENDING_TRANSFER_HAS_DIFFERENT_CODE: u32 = 34;
    pub const EXCEEDS_PENDING_TRANSFER_AMOUNT: u32 = 35;
    pub const PENDING_TRANSFER_HAS_DIFFERENT_AMOUNT: u32 = 36;
    pub const PENDING_TRANSFER_ALREADY_POSTED: u32 = 37;
    pub const PENDING_TRANSFER_ALREADY_VOIDED: u32 = 38;
    pub const PENDING_TRANSFER_EXPIRED: u32 = 39;
    pub const EXISTS_WITH_DIFFERENT_FLAGS: u32 = 40;
    pub const EXISTS_WITH_DIFFERENT_DEBIT_ACCOUNT_ID: u32 = 41;
    pub const EXISTS_WITH_DIFFERENT_CREDIT_ACCOUNT_ID: u32 = 42;
    pub const EXISTS_WITH_DIFFERENT_AMOUNT: u32 = 43;
    pub const EXISTS_WITH_DIFFERENT_PENDING_ID: u32 = 44;
    pub const EXISTS_WITH_DIFFERENT_USER_DATA_128: u32 = 45;
    pub const EXISTS_WITH_DIFFERENT_USER_DATA_64: u32 = 46;
    pub const EXISTS_WITH_DIFFERENT_USER_DATA_32: u32 = 47;
    pub const EXISTS_WITH_DIFFERENT_TIMEOUT: u32 = 48;
    pub const EXISTS_WITH_DIFFERENT_CODE: u32 = 49;
    pub const EXISTS: u32 = 50;
    pub const OVERFLOWS_DEBITS_PENDING: u32 = 51;
    pub const OVERFLOWS_CREDITS_PENDING: u32 = 52;
    pub const OVERFLOWS_DEBITS_POSTED: u32 = 53;
    pub const OVERFLOWS_CREDITS_POSTED: u32 = 54;
    pub const OVERFLOWS_DEBITS: u32 = 55;
    pub const OVERFLOWS_CREDITS: u32 = 56;
    pub const OVERFLOWS_TIMEOUT: u32 = 57;
    pub const EXCEEDS_CREDITS: u32 = 58;
    pub const EXCEEDS_DEBITS: u32 = 59;
}

/// Symbolic name for an account-creation result code.
pub fn create_account_result_name(code: u32) -> &'static str {
    use create_account_code as c;
    match code {
        c::OK => "OK",
        c::LINKED_EVENT_FAILED => "LINKED_EVENT_FAILED",
        c::LINKED_EVENT_CHAIN_OPEN => "LINKED_EVENT_CHAIN_OPEN",
        c::IMPORTED_EVENT_EXPECTED => "IMPORTED_EVENT_EXPECTED",
        c::IMPORTED_EVENT_NOT_EXPECTED => "IMPORTED_EVENT_NOT_EXPECTED",
        c::TIMESTAMP_MUST_BE_ZERO => "TIMESTAMP_MUST_BE_ZERO",
        c::IMPORTED_EVENT_TIMESTAMP_OUT_OF_RANGE => "IMPORTED_EVENT_TIMESTAMP_OUT_OF_RANGE",
        c::IMPORTED_EVENT_TIMESTAMP_MUST_NOT_ADVANCE => "IMPORTED_EVENT_TIMESTAMP_MUST_NOT_ADVANCE",
        c::RESERVED_FIELD => "RESERVED_FIELD",
        c::RESERVED_FLAG => "RESERVED_FLAG",
        c::ID_MUST_NOT_BE_ZERO => "ID_MUST_NOT_BE_ZERO",
        c::ID_MUST_NOT_BE_INT_MAX => "ID_MUST_NOT_BE_INT_MAX",
        c::FLAGS_ARE_MUTUALLY_EXCLUSIVE => "FLAGS_ARE_MUTUALLY_EXCLUSIVE",
        c::DEBITS_PENDING_MUST_BE_ZERO => "DEBITS_PENDING_MUST_BE_ZERO",
        c::DEBITS_POSTED_MUST_BE_ZERO => "DEBITS_POSTED_MUST_BE_ZERO",
        c::CREDITS_PENDING_MUST_BE_ZERO => "CREDITS_PENDING_MUST_BE_ZERO",
        c::CREDITS_POSTED_MUST_BE_ZERO => "CREDITS_POSTED_MUST_BE_ZERO",
        c::LEDGER_MUST_NOT_BE_ZERO => "LEDGER_MUST_NOT_BE_ZERO",
        c::CODE_MUST_NOT_BE_ZERO => "CODE_MUST_NOT_BE_ZERO",
        c::EXISTS_WITH_DIFFERENT_FLAGS => "EXISTS_WITH_DIFFERENT_FLAGS",
        c::EXISTS_WITH_DIFFERENT_USER_DATA_128 => "EXISTS_WITH_DIFFERENT_USER_DATA_128",
        c::EXISTS_WITH_DIFFERENT_USER_DATA_64 => "EXISTS_WITH_DIFFERENT_USER_DATA_64",
        c::EXISTS_WITH_DIFFERENT_USER_DATA_32 => "EXISTS_WITH_DIFFERENT_USER_DATA_32",
        c::EXISTS_WITH_DIFFERENT_LEDGER => "EXISTS_WITH_DIFFERENT_LEDGER",
        c::EXISTS_WITH_DIFFERENT_CODE => "EXISTS_WITH_DIFFERENT_CODE",
        c::EXISTS => "EXISTS",
        c::IMPORTED_EVENT_TIMESTAMP_MUST_NOT_REGRESS => "IMPORTED_EVENT_TIMESTAMP_MUST_NOT_REGRESS",
        _ => UNKNOWN_ERROR,
    }
}

/// Symbolic name for a transfer-creation result code.
pub fn create_transfer_result_name(code: u32) -> &'static str {
    use create_transfer_code as c;
    match code {
        c::OK => "OK",
        c::LINKED_EVENT_FAILED => "LINKED_EVENT_FAILED",
        c::LINKED_EVENT_CHAIN_OPEN => "LINKED_EVENT_CHAIN_OPEN",
        c::IMPORTED_EVENT_EXPECTED => "IMPORTED_EVENT_EXPECTED",
        c::IMPORTED_EVENT_NOT_EXPECTED => "IMPORTED_EVENT_NOT_EXPECTED",
        c::TIMESTAMP_MUST_BE_ZERO => "TIMESTAMP_MUST_BE_ZERO",
        c::IMPORTED_EVENT_TIMESTAMP_OUT_OF_RANGE => "IMPORTED_EVENT_TIMESTAMP_OUT_OF_RANGE",
        c::IMPORTED_EVENT_TIMESTAMP_MUST_NOT_ADVANCE => "IMPORTED_EVENT_TIMESTAMP_MUST_NOT_ADVANCE",
        c::RESERVED_FLAG => "RESERVED_FLAG",
        c::ID_MUST_NOT_BE_ZERO => "ID_MUST_NOT_BE_ZERO",
        c::ID_MUST_NOT_BE_INT_MAX => "ID_MUST_NOT_BE_INT_MAX",
        c::FLAGS_ARE_MUTUALLY_EXCLUSIVE => "FLAGS_ARE_MUTUALLY_EXCLUSIVE",
        c::DEBIT_ACCOUNT_ID_MUST_NOT_BE_ZERO => "DEBIT_ACCOUNT_ID_MUST_NOT_BE_ZERO",
        c::DEBIT_ACCOUNT_ID_MUST_NOT_BE_INT_MAX => "DEBIT_ACCOUNT_ID_MUST_NOT_BE_INT_MAX",
        c::CREDIT_ACCOUNT_ID_MUST_NOT_BE_ZERO => "CREDIT_ACCOUNT_ID_MUST_NOT_BE_ZERO",
        c::CREDIT_ACCOUNT_ID_MUST_NOT_BE_INT_MAX => "CREDIT_ACCOUNT_ID_MUST_NOT_BE_INT_MAX",
        c::ACCOUNTS_MUST_BE_DIFFERENT => "ACCOUNTS_MUST_BE_DIFFERENT",
        c::PENDING_ID_MUST_BE_ZERO => "PENDING_ID_MUST_BE_ZERO",
        c::PENDING_ID_MUST_NOT_BE_ZERO => "PENDING_ID_MUST_NOT_BE_ZERO",
        c::PENDING_ID_MUST_NOT_BE_INT_MAX => "PENDING_ID_MUST_NOT_BE_INT_MAX",
        c::PENDING_ID_MUST_BE_DIFFERENT => "PENDING_ID_MUST_BE_DIFFERENT",
        c::TIMEOUT_RESERVED_FOR_PENDING_TRANSFER => "TIMEOUT_RESERVED_FOR_PENDING_TRANSFER",
        c::AMOUNT_MUST_NOT_BE_ZERO => "AMOUNT_MUST_NOT_BE_ZERO",
        c::LEDGER_MUST_NOT_BE_ZERO => "LEDGER_MUST_NOT_BE_ZERO",
        c::CODE_MUST_NOT_BE_ZERO => "CODE_MUST_NOT_BE_ZERO",
        c::DEBIT_ACCOUNT_NOT_FOUND => "DEBIT_ACCOUNT_NOT_FOUND",
        c::CREDIT_ACCOUNT_NOT_FOUND => "CREDIT_ACCOUNT_NOT_FOUND",
        c::ACCOUNTS_MUST_HAVE_THE_SAME_LEDGER => "ACCOUNTS_MUST_HAVE_THE_SAME_LEDGER",
        c::TRANSFER_MUST_HAVE_THE_SAME_LEDGER_AS_ACCOUNTS => {
            "TRANSFER_MUST_HAVE_THE_SAME_LEDGER_AS_ACCOUNTS"
        }
        c::PENDING_TRANSFER_NOT_FOUND => "PENDING_TRANSFER_NOT_FOUND",
        c::PENDING_TRANSFER_NOT_PENDING => "PENDING_TRANSFER_NOT_PENDING",
        c::PENDING_TRANSFER_HAS_DIFFERENT_DEBIT_ACCOUNT_ID => {
            "PENDING_TRANSFER_HAS_DIFFERENT_DEBIT_ACCOUNT_ID"
        }
        c::PENDING_TRANSFER_HAS_DIFFERENT_CREDIT_ACCOUNT_ID => {
            "PENDING_TRANSFER_HAS_DIFFERENT_CREDIT_ACCOUNT_ID"
        }
        c::PENDING_TRANSFER_HAS_DIFFERENT_LEDGER => "PENDING_TRANSFER_HAS_DIFFERENT_LEDGER",
        c::PENDING_TRANSFER_HAS_DIFFERENT_CODE => "PENDING_TRANSFER_HAS_DIFFERENT_CODE",
        c::EXCEEDS_PENDING_TRANSFER_AMOUNT => "EXCEEDS_PENDING_TRANSFER_AMOUNT",
        c::PENDING_TRANSFER_HAS_DIFFERENT_AMOUNT => "PENDING_TRANSFER_HAS_DIFFERENT_AMOUNT",
        c::PENDING_TRANSFER_ALREADY_POSTED => "PENDING_TRANSFER_ALREADY_POSTED",
        c::PENDING_TRANSFER_ALREADY_VOIDED => "PENDING_TRANSFER_ALREADY_VOIDED",
        c::PENDING_TRANSFER_EXPIRED => "PENDING_TRANSFER_EXPIRED",
        c::EXISTS_WITH_DIFFERENT_FLAGS => "EXISTS_WITH_DIFFERENT_FLAGS",
        c::EXISTS_WITH_DIFFERENT_DEBIT_ACCOUNT_ID => "EXISTS_WITH_DIFFERENT_DEBIT_ACCOUNT_ID",
        c::EXISTS_WITH_DIFFERENT_CREDIT_ACCOUNT_ID => "EXISTS_WITH_DIFFERENT_CREDIT_ACCOUNT_ID",
        c::EXISTS_WITH_DIFFERENT_AMOUNT => "EXISTS_WITH_DIFFERENT_AMOUNT",
        c::EXISTS_WITH_DIFFERENT_PENDING_ID => "EXISTS_WITH_DIFFERENT_PENDING_ID",
        c::EXISTS_WITH_DIFFERENT_USER_DATA_128 => "EXISTS_WITH_DIFFERENT_USER_DATA_128",
        c::EXISTS_WITH_DIFFERENT_USER_DATA_64 => "EXISTS_WITH_DIFFERENT_USER_DATA_64",
        c::EXISTS_WITH_DIFFERENT_USER_DATA_32 => "EXISTS_WITH_DIFFERENT_USER_DATA_32",
        c::EXISTS_WITH_DIFFERENT_TIMEOUT => "EXISTS_WITH_DIFFERENT_TIMEOUT",
        c::EXISTS_WITH_DIFFERENT_CODE => "EXISTS_WITH_DIFFERENT_CODE",
        c::EXISTS => "EXISTS",
        c::OVERFLOWS_DEBITS_PENDING => "OVERFLOWS_DEBITS_PENDING",
        c::OVERFLOWS_CREDITS_PENDING => "OVERFLOWS_CREDITS_PENDING",
        c::OVERFLOWS_DEBITS_POSTED => "OVERFLOWS_DEBITS_POSTED",
        c::OVERFLOWS_CREDITS_POSTED => "OVERFLOWS_CREDITS_POSTED",
        c::OVERFLOWS_DEBITS => "OVERFLOWS_DEBITS",
        c::OVERFLOWS_CREDITS => "OVERFLOWS_CREDITS",
        c::OVERFLOWS_TIMEOUT => "OVERFLOWS_TIMEOUT",
        c::EXCEEDS_CREDITS => "EXCEEDS_CREDITS",
        c::EXCEEDS_DEBITS => "EXCEEDS_DEBITS",
        _ => UNKNOWN_ERROR,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn known_codes_translate() {
        assert_eq!(
            create_account_result_name(create_account_code::EXISTS),
            "EXISTS"
        );
        assert_eq!(
            create_transfer_result_name(create_transfer_code::ACCOUNTS_MUST_BE_DIFFERENT),
            "ACCOUNTS_MUST_BE_DIFFERENT"
        );
    }

    #[test]
    fn unknown_codes_fall_back_to_sentinel() {
        assert_eq!(create_account_result_name(9_999), UNKNOWN_ERROR);
        assert_eq!(create_transfer_result_name(9_999), UNKNOWN_ERROR);
    }
}
