// The infra module contains implementations of core traits.
// Each feature implementation goes in its own submodule.

#[path = "history/gateway_history.rs"]
pub mod history;

#[path = "botlists/topgg_client.rs"]
pub mod botlists;
