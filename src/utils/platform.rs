use crate::managers::ExecEncoding;
use std::process::Command;

/// Prefix forcing PowerShell to emit UTF-8 on its pipes.
pub const POWERSHELL_UTF8_PREFIX: &str = "[Console]::OutputEncoding = [System.Text.Encoding]::UTF8; ";

/// Build a shell command in a platform-aware way.
///
/// - Windows: `powershell -NoProfile -ExecutionPolicy Bypass -Command <command>`
/// - Elsewhere: `sh -c <command>`
pub fn build_shell_command(command: &str, encoding: ExecEncoding) -> Command {
    #[cfg(windows)]
    {
        let script = match encoding {
            ExecEncoding::Utf8 => format!("{}{}", POWERSHELL_UTF8_PREFIX, command),
            _ => command.to_string(),
        };
        let mut cmd = Command::new("powershell");
        cmd.args(["-NoProfile", "-ExecutionPolicy", "Bypass", "-Command"])
            .arg(script);
        cmd
    }

    #[cfg(not(windows))]
    {
        let mut cmd = Command::new("sh");
        cmd.arg("-c").arg(command);
        if encoding == ExecEncoding::Utf8 {
            cmd.env("LC_ALL", "C.UTF-8");
        }
        cmd
    }
}
