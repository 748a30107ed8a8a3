//! Family grouping. Families are derived, never stored: students cluster by
//! an explicit family id or, failing that, by father name.

use serde::Serialize;

use super::student::Student;

#[derive(Debug, Clone, Serialize)]
pub struct FamilyGroup {
    pub key: String,
    pub students: Vec<Student>,
}
