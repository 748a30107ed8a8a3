//! Command objects handed to the domain services. The REST layer builds
//! these from wire requests after parsing dates and month keys.

pub mod batch;
pub mod bulk;
pub mod challan;
pub mod payment;
pub mod promotion;
pub mod student;
