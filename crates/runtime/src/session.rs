//! Session management.

use crate::llm::{ToolCall, Turn};
use crate::providers::anthropic::{
    DEFAULT_MAX_TOKENS, DEFAULT_MODEL, MessagesRequest, MessagesResponse, ResponseBlock,
};
use crate::providers::Backend;
use crate::tools::{BASH_TOOL, BashTool};
use crate::{Error, Result};
use serde_json::Value;
use tracing::debug;

type CommandHook = Box<dyn Fn(&str) + Send + Sync>;

/// A conversation session.
///
/// Owns the conversation history for its whole lifetime. The history is only
/// appended to during [`Session::chat`] and only emptied by [`Session::clear`].
pub struct Session<B> {
    backend: B,
    tool: BashTool,
    history: Vec<Turn>,
    system: Option<String>,
    model: String,
    max_tokens: u32,
    on_command: Option<CommandHook>,
}

impl<B: Backend> Session<B> {
    /// Create a new session talking to `backend`.
    pub fn new(backend: B) -> Self {
        Self {
            backend,
            tool: BashTool::new(),
            history: Vec::new(),
            system: None,
            model: DEFAULT_MODEL.to_string(),
            max_tokens: DEFAULT_MAX_TOKENS,
            on_command: None,
        }
    }

    /// Set the system prompt.
    pub fn with_system(mut self, system: impl Into<String>) -> Self {
        self.system = Some(system.into());
        self
    }

    /// Replace the command executor.
    pub fn with_tool(mut self, tool: BashTool) -> Self {
        self.tool = tool;
        self
    }

    /// Called with each command right before it runs.
    pub fn on_command(mut self, hook: impl Fn(&str) + Send + Sync + 'static) -> Self {
        self.on_command = Some(Box::new(hook));
        self
    }

    pub fn history(&self) -> &[Turn] {
        &self.history
    }

    /// Forget the whole conversation.
    pub fn clear(&mut self) {
        self.history.clear();
    }

    /// Build the request that replays the current history.
    pub fn build_request(&self) -> MessagesRequest {
        MessagesRequest::build(
            &self.model,
            self.max_tokens,
            self.system.as_deref(),
            &[self.tool.spec()],
            &self.history,
        )
    }

    /// Run one chat round and return the text to display.
    ///
    /// The user turn is recorded even when the round fails; the assistant
    /// turn only when it succeeds.
    pub async fn chat(&mut self, user_input: &str) -> Result<String> {
        self.history.push(Turn::user(user_input));

        let request = self.build_request();
        let body = self.backend.send(&request).await?;
        let reply = self.interpret(body).await?;

        if !reply.is_empty() {
            self.history.push(Turn::assistant(reply.clone()));
        }
        Ok(reply)
    }

    /// Walk the response blocks in order, running any shell commands.
    async fn interpret(&mut self, body: Value) -> Result<String> {
        let response = MessagesResponse::from_value(body)?;
        let mut reply = String::new();

        for block in response.content {
            match block {
                ResponseBlock::Text { text } => {
                    reply.push_str(&text);
                    reply.push('\n');
                }
                ResponseBlock::ToolUse { id, name, input } if name == BASH_TOOL => {
                    let command = BashTool::parse_command(&input).map_err(Error::shape)?;
                    if let Some(hook) = &self.on_command {
                        hook(command.as_str());
                    }

                    let outcome = self.tool.run(&command).await;
                    reply.push_str(&outcome.display());

                    let result = outcome.to_tool_result(&id);
                    self.history.push(Turn::ToolCall(ToolCall { id, name, input }));
                    self.history.push(Turn::ToolResult(result));
                }
                ResponseBlock::ToolUse { name, .. } => {
                    debug!(tool = %name, "ignoring call to unknown tool");
                }
                ResponseBlock::Unknown => {}
            }
        }

        Ok(reply.trim().to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::llm::TransportError;
    use serde_json::json;
    use std::collections::VecDeque;
    use std::sync::{Arc, Mutex};
    use std::time::Duration;

    /// Backend that replays canned bodies and records every request.
    #[derive(Clone, Default)]
    struct ScriptedBackend {
        replies: Arc<Mutex<VecDeque<std::result::Result<Value, TransportError>>>>,
        requests: Arc<Mutex<Vec<MessagesRequest>>>,
    }

    impl ScriptedBackend {
        fn reply(self, body: Value) -> Self {
            self.replies.lock().unwrap().push_back(Ok(body));
            self
        }

        fn fail(self, err: TransportError) -> Self {
            self.replies.lock().unwrap().push_back(Err(err));
            self
        }

        fn requests(&self) -> Vec<MessagesRequest> {
            self.requests.lock().unwrap().clone()
        }
    }

    impl Backend for ScriptedBackend {
        async fn send(
            &self,
            request: &MessagesRequest,
        ) -> std::result::Result<Value, TransportError> {
            self.requests.lock().unwrap().push(request.clone());
            self.replies
                .lock()
                .unwrap()
                .pop_front()
                .expect("no scripted reply left")
        }
    }

    fn text(text: &str) -> Value {
        json!({"type": "text", "text": text})
    }

    fn bash(id: &str, command: &str) -> Value {
        json!({"type": "tool_use", "id": id, "name": "bash", "input": {"command": command}})
    }

    fn body(blocks: Vec<Value>) -> Value {
        json!({"id": "msg", "role": "assistant", "content": blocks})
    }

    #[tokio::test]
    async fn text_blocks_are_joined_and_trimmed() {
        let backend = ScriptedBackend::default().reply(body(vec![text("one"), text("two")]));
        let mut session = Session::new(backend);

        let reply = session.chat("hello").await.unwrap();

        assert_eq!(reply, "one\ntwo");
        assert_eq!(
            session.history(),
            [Turn::user("hello"), Turn::assistant("one\ntwo")]
        );
    }

    #[tokio::test]
    async fn tool_use_runs_command_and_records_result() {
        let backend = ScriptedBackend::default().reply(body(vec![
            text("Running it."),
            bash("toolu_42", "echo hi"),
        ]));
        let seen = Arc::new(Mutex::new(Vec::new()));
        let seen_hook = Arc::clone(&seen);
        let mut session = Session::new(backend)
            .on_command(move |cmd| seen_hook.lock().unwrap().push(cmd.to_string()));

        let reply = session.chat("say hi").await.unwrap();

        assert_eq!(reply, "Running it.\n✅ Command successful:\nhi");
        assert_eq!(*seen.lock().unwrap(), ["echo hi"]);

        let results: Vec<_> = session
            .history()
            .iter()
            .filter_map(|turn| match turn {
                Turn::ToolResult(result) => Some(result),
                _ => None,
            })
            .collect();
        assert_eq!(results.len(), 1);
        assert_eq!(results[0].tool_use_id, "toolu_42");
        assert_eq!(results[0].content, "Exit code: 0\nStdout: hi\n\nStderr: ");

        // The call precedes its result so the history replays cleanly.
        let history = session.history();
        assert!(matches!(&history[1], Turn::ToolCall(call) if call.id == "toolu_42"));
        assert!(matches!(&history[2], Turn::ToolResult(_)));
        assert!(matches!(&history[3], Turn::Assistant(_)));
    }

    #[tokio::test]
    async fn timed_out_command_is_reported_inline() {
        let backend = ScriptedBackend::default().reply(body(vec![bash("t1", "sleep 5")]));
        let mut session = Session::new(backend)
            .with_tool(BashTool::new().with_timeout(Duration::from_millis(200)));

        let reply = session.chat("wait").await.unwrap();

        assert_eq!(reply, "⏰ Command timed out");
        let Some(Turn::ToolResult(result)) = session.history().get(2) else {
            panic!("missing tool result: {:?}", session.history());
        };
        assert!(result.is_error);
    }

    #[tokio::test]
    async fn failed_command_still_records_assistant_turn() {
        let backend = ScriptedBackend::default().reply(body(vec![bash("t1", "exit 2")]));
        let mut session = Session::new(backend);

        let reply = session.chat("fail").await.unwrap();

        assert!(reply.starts_with("❌ Command failed (exit 2):"));
        assert!(matches!(session.history().last(), Some(Turn::Assistant(_))));
    }

    #[tokio::test]
    async fn transport_failure_keeps_user_turn_only() {
        let backend =
            ScriptedBackend::default().fail(TransportError::Network("connection refused".into()));
        let mut session = Session::new(backend);

        let err = session.chat("list vms").await.unwrap_err();

        assert!(matches!(err, Error::Transport(_)));
        assert_eq!(
            err.to_string(),
            "Error: API request failed: connection refused"
        );
        assert_eq!(session.history(), [Turn::user("list vms")]);
    }

    #[tokio::test]
    async fn malformed_response_is_processing_error() {
        let backend = ScriptedBackend::default().reply(json!({"content": "not a list"}));
        let mut session = Session::new(backend);

        let err = session.chat("hi").await.unwrap_err();

        assert!(matches!(err, Error::ResponseShape(_)));
        assert!(err.to_string().starts_with("Error processing response:"));
        assert_eq!(session.history().len(), 1);
    }

    #[tokio::test]
    async fn tool_use_without_command_is_processing_error() {
        let backend = ScriptedBackend::default().reply(body(vec![json!({
            "type": "tool_use", "id": "t1", "name": "bash", "input": {}
        })]));
        let mut session = Session::new(backend);

        let err = session.chat("hi").await.unwrap_err();
        assert!(matches!(err, Error::ResponseShape(_)));
    }

    #[tokio::test]
    async fn unknown_blocks_and_tools_are_ignored() {
        let backend = ScriptedBackend::default().reply(body(vec![
            json!({"type": "thinking", "thinking": "..."}),
            json!({"type": "tool_use", "id": "t1", "name": "editor", "input": {"path": "/"}}),
            text("only this"),
        ]));
        let mut session = Session::new(backend);

        let reply = session.chat("hi").await.unwrap();

        assert_eq!(reply, "only this");
        assert_eq!(session.history().len(), 2);
    }

    #[tokio::test]
    async fn clear_resets_history_for_next_request() {
        let backend = ScriptedBackend::default()
            .reply(body(vec![text("first")]))
            .reply(body(vec![text("second")]));
        let mut session = Session::new(backend.clone()).with_system("sys");

        session.chat("one").await.unwrap();
        assert_eq!(session.history().len(), 2);

        session.clear();
        assert!(session.history().is_empty());

        session.chat("two").await.unwrap();
        let requests = backend.requests();
        assert_eq!(requests.len(), 2);
        assert_eq!(requests[1].messages.len(), 1);
        assert_eq!(requests[1].system.as_deref(), Some("sys"));
        assert_eq!(requests[1].tools[0].name, "bash");
    }

    #[tokio::test]
    async fn request_replays_history_in_order() {
        let backend = ScriptedBackend::default()
            .reply(body(vec![text("a")]))
            .reply(body(vec![text("b")]));
        let mut session = Session::new(backend.clone());

        session.chat("first").await.unwrap();
        session.chat("second").await.unwrap();

        let roles: Vec<_> = backend.requests()[1]
            .messages
            .iter()
            .map(|m| m.role)
            .collect();
        assert_eq!(roles, ["user", "assistant", "user"]);
    }
}
