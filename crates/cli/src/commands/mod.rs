//! Subcommand implementations.
//!
//! Each module owns its clap action enum and a `run` function that calls the
//! matching admin service and hands the result to [`crate::output`].

pub mod content;
pub mod drivers;
pub mod fares;
pub mod rides;
pub mod session;
pub mod tickets;
pub mod users;

pub use content::ContentAction;
pub use drivers::DriversAction;
pub use fares::FaresAction;
pub use rides::RidesAction;
pub use tickets::TicketsAction;
pub use users::UsersAction;

use clap::Args;
use ridextra_admin::{AdminError, AuthenticatedClient};
use ridextra_core::ListQuery;
use serde_json::Value;

/// Shared state for every command.
pub struct Context {
    /// Client bound to the stored session.
    pub client: AuthenticatedClient,
    /// Print raw JSON.
    pub json: bool,
}

/// Paging and filter options for list commands.
#[derive(Debug, Args)]
pub struct ListArgs {
    /// Page number (ignored by top-level lists when a filter is given)
    #[arg(long, default_value_t = 1)]
    pub page: u32,

    /// Page size
    #[arg(long, default_value_t = 10)]
    pub limit: u32,

    /// Filter as `field=value`; repeatable. `true` and `false` are sent as
    /// booleans, everything else as a string.
    #[arg(long = "filter", value_name = "FIELD=VALUE")]
    pub filters: Vec<String>,
}

impl ListArgs {
    /// Build the list query.
    ///
    /// # Errors
    ///
    /// Returns `AdminError::Validation` for a filter without `=`.
    pub fn to_query(&self) -> Result<ListQuery, AdminError> {
        self.filters
            .iter()
            .try_fold(ListQuery::paged(self.page, self.limit), |query, raw| {
                let (field, value) = parse_filter(raw)?;
                Ok(query.filter(field, value))
            })
    }
}

/// Split `field=value`.
fn parse_filter(raw: &str) -> Result<(String, Value), AdminError> {
    let (field, value) = raw
        .split_once('=')
        .filter(|(field, _)| !field.trim().is_empty())
        .ok_or_else(|| {
            AdminError::Validation(format!("filter must look like field=value, got '{raw}'"))
        })?;

    let value = match value.trim() {
        "true" => Value::Bool(true),
        "false" => Value::Bool(false),
        _ => Value::String(value.to_owned()),
    };
    Ok((field.trim().to_owned(), value))
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use serde_json::json;

    use super::*;

    #[test]
    fn test_parse_filter() {
        assert_eq!(
            parse_filter("phone=98765").unwrap(),
            ("phone".to_string(), json!("98765"))
        );
        assert_eq!(
            parse_filter("name=Asha Rao").unwrap(),
            ("name".to_string(), json!("Asha Rao"))
        );
        assert_eq!(
            parse_filter("isBlocked=true").unwrap(),
            ("isBlocked".to_string(), json!(true))
        );
        assert!(parse_filter("nofield").is_err());
        assert!(parse_filter("=x").is_err());
    }

    #[test]
    fn test_list_args_to_query() {
        let args = ListArgs {
            page: 3,
            limit: 25,
            filters: vec!["Status=Pending".to_string()],
        };
        let query = args.to_query().unwrap();
        assert!(query.is_filtered());
        assert_eq!(query.page, Some(3));
        assert_eq!(
            query.to_pairs(),
            vec![("filter".to_string(), r#"{"Status":"Pending"}"#.to_string())]
        );
    }
}
