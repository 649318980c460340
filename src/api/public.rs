//! Public request types sent to the reminder server
use serde::Serialize;

#[derive(Debug, Serialize)]
pub struct SnoozeRequest<'a> {
    pub endpoint: &'a str,
}
