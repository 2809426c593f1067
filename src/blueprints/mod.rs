pub mod api;
pub mod config;
pub mod models;

pub use api::{ApiError, BlueprintsApi, BlueprintsClient};
pub use config::{Config, Flags};
pub use models::{
    ListLogsOpts, ListOperationsOpts, LogEntry, Operation, Organization, Project, Resource, Scope,
    Stack,
};
