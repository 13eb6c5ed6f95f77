// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

//! Errors raised by the ledger and the validation layer.
//!
//! The calculator, aggregator and search modules never fail, so nothing in
//! here is returned from them.

use thiserror::Error;

#[derive(Error, Debug)]
pub enum LedgerError {
    #[error("{kind} #{id} not found")]
    NotFound { kind: &'static str, id: i64 },
    #[error("invalid {kind}: {}", .errors.join("; "))]
    Invalid {
        kind: &'static str,
        errors: Vec<String>,
    },
    #[error("invalid value '{value}' for {field}")]
    InvalidValue { field: &'static str, value: String },
    #[error(transparent)]
    Database(#[from] rusqlite::Error),
}

impl PartialEq for LedgerError {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (
                Self::NotFound { kind: a, id: x },
                Self::NotFound { kind: b, id: y },
            ) => a == b && x == y,
            (
                Self::Invalid { kind: a, errors: x },
                Self::Invalid { kind: b, errors: y },
            ) => a == b && x == y,
            (
                Self::InvalidValue { field: a, value: x },
                Self::InvalidValue { field: b, value: y },
            ) => a == b && x == y,
            (Self::Database(a), Self::Database(b)) => a.to_string() == b.to_string(),
            _ => false,
        }
    }
}
