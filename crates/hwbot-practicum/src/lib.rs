//! hwbot Practicum - polling and interpretation of the homework statuses API.
//!
//! One poll is a call to [`get_api_answer`], a shape check with
//! [`check_response`], and a translation of the first record with
//! [`parse_status`].

pub mod api;
pub mod response;
pub mod status;

pub use api::{build_client, get_api_answer, ApiAnswer};
pub use response::{check_response, current_date};
pub use status::{parse_record, parse_status};
