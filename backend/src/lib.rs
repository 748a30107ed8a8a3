//! School fee ledger backend: student records, fee challans, payments,
//! promotion and batch lifecycle, behind a small REST surface.

pub mod domain;
pub mod rest;
pub mod storage;
