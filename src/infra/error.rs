use std::path::PathBuf;
use thiserror::Error;

/// Failure talking to the container runtime
#[derive(Debug, Error)]
pub enum RuntimeError {
    #[error("docker not found (searched {}). Install Docker or pass --docker", display_paths(.searched))]
    NotFound { searched: Vec<PathBuf> },

    #[error("docker binary {binary:?} does not exist")]
    MissingBinary { binary: PathBuf },

    #[error("failed to execute {binary:?} ({context})")]
    Spawn {
        binary: PathBuf,
        context: String,
        #[source]
        source: std::io::Error,
    },

    #[error("docker exited with {} ({context}){}", display_code(.code), display_stderr(.stderr))]
    Failed {
        context: String,
        code: Option<i32>,
        stderr: String,
    },
}

impl RuntimeError {
    /// Exit code to hand back to the shell
    pub fn exit_code(&self) -> i32 {
        match self {
            Self::Failed {
                code: Some(code), ..
            } if *code != 0 => *code,
            _ => 1,
        }
    }
}

fn display_paths(paths: &[PathBuf]) -> String {
    paths
        .iter()
        .map(|p| p.display().to_string())
        .collect::<Vec<_>>()
        .join(", ")
}

fn display_code(code: &Option<i32>) -> String {
    match code {
        Some(code) => format!("status {code}"),
        None => "no status (terminated by signal)".to_string(),
    }
}

fn display_stderr(stderr: &str) -> String {
    let stderr = stderr.trim();
    if stderr.is_empty() {
        String::new()
    } else {
        format!(":\n{stderr}")
    }
}
