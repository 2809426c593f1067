use std::sync::mpsc::Sender;
use std::sync::Arc;

use tokio::runtime::Handle;

use crate::blueprints::{
    ApiError, BlueprintsApi, ListLogsOpts, ListOperationsOpts, LogEntry, Operation,
    Organization, Project, Resource, Stack,
};
use crate::tlog;

/// One pending collaborator call. Each command produces exactly one
/// [`Message`] when run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    LoadScopes,
    LoadStacks,
    LoadResources { stack_id: String },
    LoadOperations {
        stack_id: String,
        opts: ListOperationsOpts,
    },
    LoadStackLogs { stack_id: String },
    LoadOperationLogs { operation_id: String },
}

/// Organizations and projects fetched together by the scope picker.
#[derive(Debug, Clone, PartialEq)]
pub struct ScopeCatalog {
    pub organizations: Vec<Organization>,
    pub projects: Vec<Project>,
}

/// Result of a finished [`Command`], one variant per request kind.
#[derive(Debug, Clone, PartialEq)]
pub enum Message {
    ScopesLoaded(Result<ScopeCatalog, ApiError>),
    StacksLoaded(Result<Vec<Stack>, ApiError>),
    ResourcesLoaded(Result<Vec<Resource>, ApiError>),
    OperationsLoaded(Result<Vec<Operation>, ApiError>),
    StackLogsLoaded(Result<Vec<LogEntry>, ApiError>),
    OperationLogsLoaded(Result<Vec<LogEntry>, ApiError>),
}

impl Message {
    pub fn label(&self) -> &'static str {
        match self {
            Self::ScopesLoaded(_) => "scopes",
            Self::StacksLoaded(_) => "stacks",
            Self::ResourcesLoaded(_) => "resources",
            Self::OperationsLoaded(_) => "operations",
            Self::StackLogsLoaded(_) => "stack logs",
            Self::OperationLogsLoaded(_) => "operation logs",
        }
    }

    pub fn is_err(&self) -> bool {
        match self {
            Self::ScopesLoaded(r) => r.is_err(),
            Self::StacksLoaded(r) => r.is_err(),
            Self::ResourcesLoaded(r) => r.is_err(),
            Self::OperationsLoaded(r) => r.is_err(),
            Self::StackLogsLoaded(r) | Self::OperationLogsLoaded(r) => r.is_err(),
        }
    }
}

impl Command {
    /// Performs the blocking round trip(s) and wraps the outcome.
    pub fn run(self, api: &dyn BlueprintsApi) -> Message {
        match self {
            Self::LoadScopes => Message::ScopesLoaded(load_scopes(api)),
            Self::LoadStacks => Message::StacksLoaded(api.list_stacks()),
            Self::LoadResources { stack_id } => {
                Message::ResourcesLoaded(api.list_resources(&stack_id))
            }
            Self::LoadOperations { stack_id, opts } => {
                Message::OperationsLoaded(api.list_operations(&stack_id, &opts))
            }
            Self::LoadStackLogs { stack_id } => {
                Message::StackLogsLoaded(api.list_logs(&ListLogsOpts::for_stack(&stack_id)))
            }
            Self::LoadOperationLogs { operation_id } => Message::OperationLogsLoaded(
                api.list_logs(&ListLogsOpts::for_operation(&operation_id)),
            ),
        }
    }
}

// Projects are only requested once organizations succeeded.
fn load_scopes(api: &dyn BlueprintsApi) -> Result<ScopeCatalog, ApiError> {
    let organizations = api.list_organizations()?;
    let projects = api.list_projects()?;
    Ok(ScopeCatalog {
        organizations,
        projects,
    })
}

/// Runs commands off the event loop and posts their messages back to it.
pub struct Dispatcher {
    api: Arc<dyn BlueprintsApi>,
    runtime: Handle,
    tx: Sender<Message>,
}

impl Dispatcher {
    pub fn new(api: Arc<dyn BlueprintsApi>, runtime: Handle, tx: Sender<Message>) -> Self {
        Self { api, runtime, tx }
    }

    pub fn dispatch(&self, commands: Vec<Command>) {
        for command in commands {
            let api = Arc::clone(&self.api);
            let tx = self.tx.clone();
            tlog!(info, "dispatch {:?}", command);
            self.runtime.spawn_blocking(move || {
                let msg = command.run(api.as_ref());
                if tx.send(msg).is_err() {
                    tlog!(warn, "event loop gone, dropping result");
                }
            });
        }
    }
}


#[cfg(test)]
mod tests {
    use super::testing::*;
    use super::*;

    #[test]
    fn test_scopes_stop_after_organization_failure() {
        let api = FakeApi {
            fail_organizations: true,
            ..FakeApi::default()
        };
        let msg = Command::LoadScopes.run(&api);
        assert!(msg.is_err());
        assert_eq!(api.calls(), vec!["organizations"]);
    }

    #[test]
    fn test_scopes_project_failure_discards_organizations() {
        let api = FakeApi {
            organizations: vec![org("o1", "Acme")],
            fail_projects: true,
            ..FakeApi::default()
        };
        match Command::LoadScopes.run(&api) {
            Message::ScopesLoaded(Err(e)) => {
                assert!(matches!(e, ApiError::Status { status: 403, .. }))
            }
            other => panic!("unexpected {:?}", other),
        }
    }

    #[test]
    fn test_operation_logs_filter_by_operation() {
        let api = FakeApi::default();
        let msg = Command::LoadOperationLogs {
            operation_id: "op7".into(),
        }
        .run(&api);
        assert!(matches!(msg, Message::OperationLogsLoaded(Ok(_))));
        assert_eq!(
            api.calls(),
            vec![r#"logs:[("operationId", "op7")]"#.to_string()]
        );
    }

    #[test]
    fn test_dispatcher_delivers_one_message_per_command() {
        let runtime = tokio::runtime::Runtime::new().unwrap();
        let (tx, rx) = std::sync::mpsc::channel();
        let api: Arc<dyn BlueprintsApi> = Arc::new(FakeApi::default());
        let dispatcher = Dispatcher::new(api, runtime.handle().clone(), tx);

        dispatcher.dispatch(vec![
            Command::LoadStacks,
            Command::LoadResources {
                stack_id: "S1".into(),
            },
        ]);

        let timeout = std::time::Duration::from_secs(5);
        let mut labels = vec![
            rx.recv_timeout(timeout).unwrap().label(),
            rx.recv_timeout(timeout).unwrap().label(),
        ];
        labels.sort();
        assert_eq!(labels, vec!["resources", "stacks"]);
    }
}
