use super::cancel::CancellationToken;
use super::config::{EngineConfig, RunParameters};
use super::error::EngineError;
use super::progress::{Progress, ProgressReporter};
use super::signatures;
use std::collections::VecDeque;
use std::ffi::OsString;
use std::fs;
use std::io::{self, BufRead, BufReader, PipeReader};
use std::path::{Path, PathBuf};
use std::process::{Child, Command, Stdio};
use std::sync::mpsc::{self, Receiver, RecvTimeoutError, SyncSender};
use std::thread;
use std::time::{Duration, Instant};
use tracing::{debug, error, info, instrument, warn};

/// Lines buffered between the pipe reader and the classifier.
const LINE_BUFFER: usize = 64;
/// How often cancellation and the deadline are checked while the engine is silent.
const POLL_INTERVAL: Duration = Duration::from_millis(100);
/// Output lines kept for the report of an unclassified nonzero exit.
const TAIL_LINES: usize = 20;

/// `Ok` carries the raw output directory of a clean run.
pub type EngineOutcome = Result<PathBuf, EngineError>;

pub struct EngineRunner<'a> {
    config: &'a EngineConfig,
    reporter: &'a ProgressReporter<'a>,
    cancel: Option<CancellationToken>,
}

impl<'a> EngineRunner<'a> {
    pub fn new(config: &'a EngineConfig, reporter: &'a ProgressReporter<'a>) -> Self {
        Self {
            config,
            reporter,
            cancel: None,
        }
    }

    pub fn with_cancellation(mut self, token: CancellationToken) -> Self {
        self.cancel = Some(token);
        self
    }

    /// Builds the ordered argument list the engine expects.
    pub fn command_args(
        &self,
        request: &Path,
        output_dir: &Path,
        params: &RunParameters,
    ) -> Vec<OsString> {
        let mut args: Vec<OsString> = Vec::with_capacity(16);
        args.push(request.into());
        args.push(output_dir.into());
        if self.config.amber {
            args.push("--amber".into());
            if self.config.gpu_relax {
                args.push("--use-gpu-relax".into());
            }
        }
        args.push("--num-models".into());
        args.push(params.model_count.to_string().into());
        args.push("--num-recycle".into());
        args.push(params.recycle_count.to_string().into());
        args.push("--data".into());
        args.push(self.config.data_dir.as_os_str().into());
        args.push("--host-url".into());
        args.push(self.config.host_url.as_str().into());
        if let Some(template_dir) = &params.template_dir {
            args.push("--templates".into());
            args.push("--custom-template-path".into());
            args.push(template_dir.as_os_str().into());
        }
        args
    }

    /// Runs the engine on a request file written to disk.
    ///
    /// Output is classified line by line while the process runs. The first fatal line, a
    /// cancellation or the timeout terminates the process; it is reaped before returning.
    #[instrument(skip_all, name = "engine_run", fields(run = %params.run_name))]
    pub fn run(&self, request: &Path, output_dir: &Path, params: &RunParameters) -> EngineOutcome {
        fs::create_dir_all(output_dir)?;
        fs::create_dir_all(&self.config.data_dir)?;

        let args = self.command_args(request, output_dir, params);
        if let Some(template_dir) = &params.template_dir {
            let message = format!("Path to templates: {}", template_dir.display());
            info!("{}", message);
            self.reporter.report(Progress::Message(message));
        }
        info!(
            program = %self.config.executable.display(),
            ?args,
            "Launching structure prediction engine."
        );

        let (pipe_reader, pipe_writer) = io::pipe()?;
        let mut command = Command::new(&self.config.executable);
        command
            .args(&args)
            .stdin(Stdio::null())
            .stdout(pipe_writer.try_clone()?)
            .stderr(pipe_writer);
        let spawned = command.spawn();
        // The command still owns the parent's write ends; EOF only arrives once they are gone.
        drop(command);
        let mut child = spawned.map_err(|source| EngineError::Spawn {
            program: self.config.executable.clone(),
            source,
        })?;
        debug!(pid = child.id(), "Engine process started.");

        let (sender, receiver) = mpsc::sync_channel(LINE_BUFFER);
        let reader = match thread::Builder::new()
            .name("engine-output".into())
            .spawn(move || read_lines(pipe_reader, sender))
        {
            Ok(handle) => handle,
            Err(e) => {
                terminate(&mut child);
                return Err(EngineError::Io(e));
            }
        };

        let tail = match self.supervise(&receiver) {
            Ok(tail) => tail,
            Err(e) => {
                // The reader is left detached; it ends once the pipe closes.
                drop(receiver);
                terminate(&mut child);
                return Err(e);
            }
        };

        if reader.join().is_err() {
            warn!("Engine output reader thread panicked.");
        }
        let status = child.wait()?;
        debug!(?status, "Engine process exited.");

        if status.success() {
            info!("Engine finished successfully.");
            Ok(output_dir.to_path_buf())
        } else {
            error!(code = ?status.code(), "Engine exited with a nonzero status.");
            Err(EngineError::ExitedNonZero {
                code: status.code(),
                tail: tail.into(),
            })
        }
    }

    fn supervise(
        &self,
        receiver: &Receiver<io::Result<String>>,
    ) -> Result<VecDeque<String>, EngineError> {
        let started = Instant::now();
        let mut tail = VecDeque::with_capacity(TAIL_LINES);
        loop {
            if self
                .cancel
                .as_ref()
                .is_some_and(CancellationToken::is_cancelled)
            {
                warn!("Cancellation requested, stopping the engine.");
                return Err(EngineError::Cancelled);
            }
            if let Some(limit) = self.config.timeout {
                if started.elapsed() >= limit {
                    warn!(?limit, "Engine exceeded its time limit.");
                    return Err(EngineError::TimedOut { limit });
                }
            }

            match receiver.recv_timeout(POLL_INTERVAL) {
                Ok(Ok(line)) => {
                    if let Some(kind) = signatures::classify(&line) {
                        error!(%kind, %line, "Engine reported a fatal condition.");
                        return Err(EngineError::Failure { kind, line });
                    }
                    debug!(target: "foldrun::engine", "{}", line);
                    if tail.len() == TAIL_LINES {
                        tail.pop_front();
                    }
                    tail.push_back(line.clone());
                    self.reporter.report(Progress::EngineOutput(line));
                }
                Ok(Err(e)) => return Err(EngineError::Io(e)),
                Err(RecvTimeoutError::Timeout) => continue,
                Err(RecvTimeoutError::Disconnected) => return Ok(tail),
            }
        }
    }
}

/// Assembles lines from the merged output pipe until EOF or until the consumer hangs up.
///
/// The `\n` or `\r\n` terminator is dropped and invalid UTF-8 is replaced with U+FFFD; the
/// rest of the line is passed on as written.
fn read_lines(pipe: PipeReader, sender: SyncSender<io::Result<String>>) {
    let mut reader = BufReader::new(pipe);
    let mut buf = Vec::new();
    loop {
        buf.clear();
        match reader.read_until(b'\n', &mut buf) {
            Ok(0) => return,
            Ok(_) => {
                let line = String::from_utf8_lossy(&buf)
                    .trim_end_matches(['\r', '\n'])
                    .to_string();
                if sender.send(Ok(line)).is_err() {
                    return;
                }
            }
            Err(e) => {
                let _ = sender.send(Err(e));
                return;
            }
        }
    }
}

fn terminate(child: &mut Child) {
    if let Err(e) = child.kill() {
        warn!("Failed to kill engine process: {}", e);
    }
    match child.wait() {
        Ok(status) => debug!(?status, "Engine process reaped."),
        Err(e) => warn!("Failed to reap engine process: {}", e),
    }
}
