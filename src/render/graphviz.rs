// src/render/graphviz.rs

use std::io::Write;
use std::path::Path;
use std::process::{Command, Stdio};

use tracing::{debug, info};

use crate::errors::{LineageError, Result};
use crate::fs::FileSystem;
use crate::types::{Layout, OutputFormat};

/// Writes DOT text to disk, converting it with the Graphviz `dot`
/// executable for image formats.
#[derive(Debug, Clone)]
pub struct GraphvizRenderer {
    program: String,
}

impl Default for GraphvizRenderer {
    fn default() -> Self {
        Self::new("dot")
    }
}

impl GraphvizRenderer {
    /// Use `program` instead of `dot` from `PATH`.
    pub fn new(program: impl Into<String>) -> Self {
        Self {
            program: program.into(),
        }
    }

    pub fn render(
        &self,
        fs: &dyn FileSystem,
        dot: &str,
        format: OutputFormat,
        layout: Layout,
        output: &Path,
    ) -> Result<()> {
        info!(path = %output.display(), format = format.as_str(), "rendering diagram");

        let bytes = match format {
            OutputFormat::Dot => dot.as_bytes().to_vec(),
            _ => self.convert(dot, format, layout)?,
        };
        fs.write(output, &bytes)?;
        Ok(())
    }

    fn convert(&self, dot: &str, format: OutputFormat, layout: Layout) -> Result<Vec<u8>> {
        debug!(program = %self.program, layout = layout.as_str(), "invoking graphviz");

        let mut child = Command::new(&self.program)
            .arg(format!("-T{}", format.as_str()))
            .arg(format!("-K{}", layout.as_str()))
            .stdin(Stdio::piped())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .spawn()
            .map_err(|e| {
                LineageError::Render(format!("failed to run '{}': {e}", self.program))
            })?;

        if let Some(mut stdin) = child.stdin.take() {
            stdin.write_all(dot.as_bytes())?;
        }

        let output = child.wait_with_output()?;
        if !output.status.success() {
            return Err(LineageError::Render(format!(
                "'{}' exited with {}: {}",
                self.program,
                output.status,
                String::from_utf8_lossy(&output.stderr).trim()
            )));
        }
        Ok(output.stdout)
    }
}
