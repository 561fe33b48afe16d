use super::{CommandOutput, CommandRunner, RunOptions, decode_output};
use crate::error::{DeskError, Result};
use crate::managers::ExecEncoding;
use crate::ui;
use crate::utils::platform::build_shell_command;
use std::io::{BufRead, BufReader, Read};
use std::process::{Child, ExitStatus, Stdio};
use std::thread;
use std::time::{Duration, Instant};

/// Runs commands through the platform shell (PowerShell on Windows, `sh` elsewhere)
#[derive(Debug, Default, Clone, Copy)]
pub struct ShellRunner;

impl CommandRunner for ShellRunner {
    fn run(&self, command: &str, options: &RunOptions) -> Result<CommandOutput> {
        let mut cmd = build_shell_command(command, options.encoding);
        for (key, value) in &options.env {
            cmd.env(key, value);
        }
        cmd.stdin(Stdio::null())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped());

        let mut child = cmd.spawn().map_err(|e| DeskError::SystemCommandFailed {
            command: command.to_string(),
            reason: e.to_string(),
        })?;

        let stdout = child
            .stdout
            .take()
            .ok_or_else(|| DeskError::SystemCommandFailed {
                command: command.to_string(),
                reason: "Failed to capture stdout".to_string(),
            })?;
        let stderr = child
            .stderr
            .take()
            .ok_or_else(|| DeskError::SystemCommandFailed {
                command: command.to_string(),
                reason: "Failed to capture stderr".to_string(),
            })?;

        // UTF-16 output cannot be split on raw newline bytes
        let stream = !options.quiet && options.encoding != ExecEncoding::Utf16le;
        let stdout_thread = thread::spawn(move || collect(stdout, stream, false));
        let stderr_thread = thread::spawn(move || collect(stderr, stream, true));

        let status = match options.timeout {
            Some(timeout) => wait_with_timeout(&mut child, command, timeout),
            None => child.wait().map_err(|e| DeskError::SystemCommandFailed {
                command: command.to_string(),
                reason: e.to_string(),
            }),
        };

        let stdout = stdout_thread.join().unwrap_or_default();
        let stderr = stderr_thread.join().unwrap_or_default();
        let status = status?;

        let output = CommandOutput {
            exit_code: status.code(),
            stdout: decode_output(&stdout, options.encoding),
            stderr: decode_output(&stderr, options.encoding),
        };

        if !options.quiet && options.encoding == ExecEncoding::Utf16le {
            for line in output.stdout.lines().filter(|l| !l.trim().is_empty()) {
                ui::stream_line(line.trim(), false);
            }
            for line in output.stderr.lines().filter(|l| !l.trim().is_empty()) {
                ui::stream_line(line.trim(), true);
            }
        }

        Ok(output)
    }
}

fn collect<R: Read>(reader: R, stream: bool, is_stderr: bool) -> Vec<u8> {
    let mut reader = BufReader::new(reader);
    let mut buf = Vec::new();
    if !stream {
        let _ = reader.read_to_end(&mut buf);
        return buf;
    }

    let mut line = Vec::new();
    loop {
        line.clear();
        match reader.read_until(b'\n', &mut line) {
            Ok(0) | Err(_) => break,
            Ok(_) => {
                buf.extend_from_slice(&line);
                let text = String::from_utf8_lossy(&line);
                let text = text.trim();
                if !text.is_empty() {
                    ui::stream_line(text, is_stderr);
                }
            }
        }
    }
    buf
}

fn wait_with_timeout(child: &mut Child, command: &str, timeout: Duration) -> Result<ExitStatus> {
    let start = Instant::now();
    loop {
        match child.try_wait() {
            Ok(Some(status)) => return Ok(status),
            Ok(None) => {
                if start.elapsed() > timeout {
                    let _ = child.kill();
                    let _ = child.wait();
                    return Err(DeskError::SystemCommandFailed {
                        command: command.to_string(),
                        reason: format!("Command timed out after {} seconds", timeout.as_secs()),
                    });
                }
                thread::sleep(Duration::from_millis(50));
            }
            Err(e) => {
                return Err(DeskError::SystemCommandFailed {
                    command: command.to_string(),
                    reason: e.to_string(),
                });
            }
        }
    }
}
