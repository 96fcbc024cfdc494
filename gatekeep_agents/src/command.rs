use std::env;
use std::ffi::OsString;
use std::io::{self, Read, Write};
use std::process::{Child, ChildStdin, Command, Stdio};
use std::thread;
use std::time::Duration;

use gatekeep_agent_api::{
    AgentCapabilities, AgentError, AgentPlugin, AgentResult, DeliveryReceipt,
};
use gatekeep_api::ReviewDecision;
use tracing::{debug, warn};
use wait_timeout::ChildExt;

const DEFAULT_BINARY: &str = "gatekeep-agent";
const DEFAULT_TIMEOUT_SECS: u64 = 60;
const PASSTHROUGH_ENV_PREFIX: &str = "GATEKEEP_AGENT_";

/// Agent that hands each decision to an external hook process.
///
/// The hook is invoked as `<binary> deliver` with the decision serialized as
/// JSON on stdin. A zero exit status accepts the decision and the trimmed
/// stdout becomes the receipt message.
#[derive(Debug, Clone)]
pub struct CommandAgent {
    binary: OsString,
    timeout: Duration,
    path: Option<OsString>,
    home: Option<OsString>,
    passthrough: Vec<(OsString, OsString)>,
}

impl CommandAgent {
    /// Construct an agent configured from the process environment.
    ///
    /// `GATEKEEP_AGENT_BIN` selects the hook binary and
    /// `GATEKEEP_AGENT_TIMEOUT_SECS` its timeout. Every `GATEKEEP_AGENT_*`
    /// variable is forwarded to the hook.
    #[must_use]
    pub fn new() -> Self {
        let binary =
            env::var_os("GATEKEEP_AGENT_BIN").unwrap_or_else(|| OsString::from(DEFAULT_BINARY));
        let timeout_secs = env::var("GATEKEEP_AGENT_TIMEOUT_SECS")
            .ok()
            .and_then(|raw| raw.trim().parse().ok())
            .unwrap_or(DEFAULT_TIMEOUT_SECS);

        let mut passthrough = Vec::new();
        for (key, value) in env::vars_os() {
            if key.to_string_lossy().starts_with(PASSTHROUGH_ENV_PREFIX) {
                passthrough.push((key, value));
            }
        }

        Self {
            binary,
            timeout: Duration::from_secs(timeout_secs),
            path: env::var_os("PATH"),
            home: env::var_os("HOME"),
            passthrough,
        }
    }

    /// Use `binary` as the hook instead of the configured one.
    #[must_use]
    pub fn with_binary(mut self, binary: impl Into<OsString>) -> Self {
        self.binary = binary.into();
        self
    }

    /// Override the hook timeout.
    #[must_use]
    pub const fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Run the hook to completion or until the timeout elapses.
    ///
    /// Stdin is fed from its own thread while stdout and stderr drain, so a
    /// hook that writes before it has read all of its input cannot stall the
    /// pipes. A hook may exit without reading stdin; its exit status decides.
    fn run(&self, payload: String) -> AgentResult<String> {
        let mut command = Command::new(&self.binary);
        command
            .arg("deliver")
            .stdin(Stdio::piped())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped());
        self.configure_environment(&mut command);

        let mut child = command
            .spawn()
            .map_err(|err| AgentError::message(format!("failed to spawn agent hook: {err}")))?;
        let stdout = child.stdout.take().map(drain);
        let stderr = child.stderr.take().map(drain);
        let feeder = child.stdin.take().map(|stdin| feed(stdin, payload));

        let status = match child.wait_timeout(self.timeout) {
            Ok(Some(status)) => status,
            Ok(None) => {
                terminate(&mut child);
                return Err(AgentError::message(format!(
                    "agent hook timed out after {:?}",
                    self.timeout
                )));
            }
            Err(err) => {
                terminate(&mut child);
                return Err(AgentError::message(format!(
                    "failed waiting on agent hook: {err}"
                )));
            }
        };

        let stderr = collect(stderr, "stderr")?;
        if !status.success() {
            let code = status
                .code()
                .map_or_else(|| "terminated".to_owned(), |code| code.to_string());
            return Err(AgentError::message(format!(
                "agent hook failed with status {code}: {}",
                stderr.trim()
            )));
        }

        if let Some(feeder) = feeder {
            feeder
                .join()
                .map_err(|_| AgentError::message("agent hook stdin writer panicked"))?
                .map_err(|err| {
                    AgentError::message(format!("failed to write to agent hook stdin: {err}"))
                })?;
        }
        collect(stdout, "stdout")
    }

    fn configure_environment(&self, command: &mut Command) {
        command.env_clear();
        if let Some(path) = &self.path {
            command.env("PATH", path);
        }
        if let Some(home) = &self.home {
            command.env("HOME", home);
        }
        for (key, value) in &self.passthrough {
            command.env(key, value);
        }
    }
}

impl Default for CommandAgent {
    fn default() -> Self {
        Self::new()
    }
}

impl AgentPlugin for CommandAgent {
    fn id(&self) -> &'static str {
        "command"
    }

    fn label(&self) -> &'static str {
        "External Hook"
    }

    fn capabilities(&self) -> AgentCapabilities {
        AgentCapabilities::new(true, true)
    }

    fn deliver(&self, decision: &ReviewDecision) -> AgentResult<DeliveryReceipt> {
        let payload = serde_json::to_string(decision)
            .map_err(|err| AgentError::message(format!("failed to encode decision: {err}")))?;
        debug!(
            binary = %self.binary.to_string_lossy(),
            file_path = decision.file_path(),
            "invoking agent hook"
        );

        let stdout = self.run(payload)?;
        let message = stdout.trim();
        Ok(DeliveryReceipt {
            accepted: true,
            message: (!message.is_empty()).then(|| message.to_owned()),
        })
    }
}

type Reader = thread::JoinHandle<io::Result<Vec<u8>>>;

fn drain<R: Read + Send + 'static>(mut stream: R) -> Reader {
    thread::spawn(move || {
        let mut buffer = Vec::new();
        stream.read_to_end(&mut buffer).map(|_| buffer)
    })
}

/// Write `payload` and close the pipe. A hook that exits without reading
/// breaks the pipe; that is left to its exit status.
fn feed(mut stdin: ChildStdin, payload: String) -> thread::JoinHandle<io::Result<()>> {
    thread::spawn(move || match stdin.write_all(payload.as_bytes()) {
        Err(err) if err.kind() == io::ErrorKind::BrokenPipe => Ok(()),
        result => result,
    })
}

fn collect(reader: Option<Reader>, stream: &str) -> AgentResult<String> {
    let Some(reader) = reader else {
        return Ok(String::new());
    };
    let bytes = reader
        .join()
        .map_err(|_| AgentError::message(format!("agent hook {stream} reader panicked")))?
        .map_err(|err| AgentError::message(format!("failed to read agent hook {stream}: {err}")))?;
    Ok(String::from_utf8_lossy(&bytes).into_owned())
}

// Readers and the stdin writer are left detached; they finish once the
// killed hook's pipes close.
fn terminate(child: &mut Child) {
    if let Err(err) = child.kill() {
        debug!(%err, "agent hook exited before it could be killed");
    }
    if let Err(err) = child.wait() {
        warn!(%err, "failed to reap agent hook");
    }
}
