use std::{io, path::Path, process::ExitStatus, process::Stdio};

use tokio::process::Command;

/// Hands the file to the platform viewer. Output of the viewer is discarded
/// since the terminal belongs to the tui.
pub async fn path(path: &Path) -> Result<ExitStatus, io::Error> {
    let mut command = viewer(path).await;
    command
        .stdin(Stdio::null())
        .stdout(Stdio::null())
        .stderr(Stdio::null());

    command.spawn()?.wait().await
}

#[cfg(all(unix, not(target_os = "macos")))]
async fn viewer(path: &Path) -> Command {
    use std::{ffi::OsString, path::PathBuf};

    use tokio::fs;

    async fn contains_microsoft(file: &str) -> bool {
        fs::read_to_string(file)
            .await
            .map(|content| content.to_lowercase().contains("microsoft"))
            .unwrap_or(false)
    }

    async fn is_docker() -> bool {
        let cgroup = fs::read_to_string("/proc/self/cgroup")
            .await
            .map(|content| content.contains("docker"))
            .unwrap_or(false);

        cgroup || fs::metadata("/.dockerenv").await.is_ok()
    }

    async fn is_wsl() -> bool {
        if std::env::consts::OS != "linux" {
            return false;
        }

        let microsoft = contains_microsoft("/proc/sys/kernel/osrelease").await
            || contains_microsoft("/proc/version").await;

        microsoft && !is_docker().await
    }

    // wslview resolves paths relative to the working directory
    fn wsl_path(path: &Path) -> OsString {
        let relative: Option<PathBuf> = std::env::current_dir()
            .ok()
            .and_then(|base| pathdiff::diff_paths(path, base));

        match relative {
            Some(relative) if path.is_absolute() => relative.into_os_string(),
            _ => path.as_os_str().to_os_string(),
        }
    }

    if is_wsl().await {
        let mut command = Command::new("wslview");
        command.arg(wsl_path(path));
        command
    } else {
        let mut command = Command::new("xdg-open");
        command.arg(path);
        command
    }
}

#[cfg(target_os = "macos")]
async fn viewer(path: &Path) -> Command {
    let mut command = Command::new("/usr/bin/open");
    command.arg(path);
    command
}

#[cfg(windows)]
async fn viewer(path: &Path) -> Command {
    const CREATE_NO_WINDOW: u32 = 0x08000000;

    let mut quoted = std::ffi::OsString::from("\"");
    quoted.push(path);
    quoted.push("\"");

    let mut command = Command::new("cmd");
    command
        .args(["/c", "start", "\"\""])
        .arg(quoted)
        .creation_flags(CREATE_NO_WINDOW);
    command
}

#[cfg(not(any(unix, windows)))]
compile_error!("open is not supported on this platform");
