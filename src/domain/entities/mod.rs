//! Entities mirroring the backend API's response shapes.
//!
//! The backend owns the data model; these types exist to decode its JSON
//! (camelCase on the wire) and to feed templates. No invariants are enforced
//! locally beyond form validation at submission time.

pub mod member;
pub mod meta;
pub mod payment;
pub mod plan;
pub mod trainer;
pub mod user;

pub use member::{Member, MemberStatus, NewMember, UpdateMember};
pub use meta::DashboardStats;
pub use payment::{Payment, PaymentStatus};
pub use plan::{NewPlan, Plan, UpdatePlan};
pub use trainer::Trainer;
pub use user::{Role, User};
