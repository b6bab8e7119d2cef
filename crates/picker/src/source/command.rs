use std::process::Stdio;

use tokio::io::{AsyncBufReadExt, BufReader};
use tokio::process::Command;
use tracing::{debug, warn};

use super::{DynamicSource, Fetch, FetchStatus, SourceError};
use crate::types::Candidate;

/// Placeholder substituted with the query in [`CommandSource`] arguments.
pub const QUERY_PLACEHOLDER: &str = "{}";

/// External search program spawned once per query, its stdout lines streamed
/// back as candidates.
///
/// Occurrences of `{}` in the argument list are replaced with the query. The
/// child is killed best-effort when the fetch is cancelled; a non-zero exit
/// reports [`FetchStatus::Failed`] after whatever it already produced.
pub struct CommandSource {
	program: String,
	args: Vec<String>,
}

impl CommandSource {
	pub fn new<I, S>(program: impl Into<String>, args: I) -> Self
	where
		I: IntoIterator<Item = S>,
		S: Into<String>,
	{
		Self {
			program: program.into(),
			args: args.into_iter().map(Into::into).collect(),
		}
	}
}

impl DynamicSource for CommandSource {
	fn fetch(&self, query: &str) -> Result<Fetch, SourceError> {
		let args: Vec<String> = self.args.iter().map(|arg| arg.replace(QUERY_PLACEHOLDER, query)).collect();
		let mut child = Command::new(&self.program)
			.args(&args)
			.stdin(Stdio::null())
			.stdout(Stdio::piped())
			.stderr(Stdio::null())
			.spawn()
			.map_err(|err| SourceError::Unavailable(format!("{}: {err}", self.program)))?;

		let Some(stdout) = child.stdout.take() else {
			return Err(SourceError::Unavailable(format!("{}: stdout not captured", self.program)));
		};

		debug!(program = %self.program, query, "spawned search command");
		let (sender, fetch) = Fetch::channel();

		tokio::spawn(async move {
			let mut lines = BufReader::new(stdout).lines();
			loop {
				tokio::select! {
					_ = sender.cancelled() => {
						if let Err(err) = child.start_kill() {
							warn!(%err, "failed to kill superseded search command");
						}
						return;
					}
					line = lines.next_line() => match line {
						Ok(Some(line)) => {
							if !sender.batch(vec![Candidate::new(line)]) {
								let _ = child.start_kill();
								return;
							}
						}
						Ok(None) => break,
						Err(err) => {
							sender.done(FetchStatus::Failed(err.to_string()));
							let _ = child.start_kill();
							return;
						}
					}
				}
			}

			match child.wait().await {
				Ok(status) if status.success() => {
					sender.done(FetchStatus::Completed);
				}
				Ok(status) => {
					sender.done(FetchStatus::Failed(format!("search command exited with {status}")));
				}
				Err(err) => {
					sender.done(FetchStatus::Failed(err.to_string()));
				}
			}
		});

		Ok(fetch)
	}
}
