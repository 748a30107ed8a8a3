pub mod batch;
pub mod challan;
pub mod family;
pub mod student;
