//! HTML page handlers.
//!
//! Handlers stay thin: parse query/form input, call a service, build a
//! [`crate::web::table::TableView`] where the page lists things, and hand a
//! template struct back to Askama.

mod dashboard;
mod home;
mod login;
mod members;
mod payments;
mod plans;
mod profile;
mod trainers;
mod users;

pub use dashboard::dashboard_handler;
pub use home::{home_handler, plans_handler};
pub use login::{login_form, login_submit, logout};
pub use members::{
    create_member, delete_member, edit_member_form, members_page, new_member_form, update_member,
};
pub use payments::payments_page;
pub use plans::{
    create_plan, edit_plan_form, new_plan_form, plan_set_active, plans_admin_page, update_plan,
};
pub use profile::profile_page;
pub use trainers::{my_members_page, trainer_detail_page, trainers_page};
pub use users::{user_set_active, users_page};

use crate::domain::entities::{Role, User};
use crate::error::AppError;
use serde::de::{Deserialize, DeserializeOwned, Deserializer, IntoDeserializer};
use serde_json::json;

/// Role gate used at the top of every restricted handler.
pub(crate) fn require(user: &User, role: Role) -> Result<(), AppError> {
    if user.role >= role {
        Ok(())
    } else {
        Err(AppError::forbidden(
            "Insufficient role",
            json!({ "required": role.as_str(), "actual": user.role.as_str() }),
        ))
    }
}

/// Empty form values become absent fields.
pub(crate) fn none_if_empty(value: &str) -> Option<String> {
    let trimmed = value.trim();
    (!trimmed.is_empty()).then(|| trimmed.to_string())
}

/// Query-string deserializer treating `?status=` the same as an absent
/// parameter. Filter forms always submit their selects, so typed filters
/// (enums, dates) must accept the empty string.
pub(crate) fn empty_as_none<'de, D, T>(deserializer: D) -> Result<Option<T>, D::Error>
where
    D: Deserializer<'de>,
    T: DeserializeOwned,
{
    let opt = Option::<String>::deserialize(deserializer)?;
    match opt.filter(|s| !s.is_empty()) {
        None => Ok(None),
        Some(s) => {
            let result: Result<T, serde::de::value::Error> = T::deserialize(s.into_deserializer());
            result.map(Some).map_err(serde::de::Error::custom)
        }
    }
}
