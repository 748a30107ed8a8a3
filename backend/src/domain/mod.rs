//! Domain layer: models, commands and the services that implement the
//! fee-challan lifecycle. Services take data in and hand data back through
//! the storage traits; the only ambient input is the local clock, used for
//! default payment and reconciliation dates.

pub mod batch_service;
pub mod calendar;
pub mod challan_service;
pub mod commands;
pub mod errors;
pub mod fine;
pub mod models;
pub mod payment_service;
pub mod promotion_service;
pub mod student_service;

pub use batch_service::BatchService;
pub use challan_service::ChallanService;
pub use errors::{DomainError, DomainResult};
pub use payment_service::PaymentService;
pub use promotion_service::PromotionService;
pub use student_service::StudentService;
