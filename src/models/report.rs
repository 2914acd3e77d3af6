/// Outcome of one payroll sync run.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SyncReport {
    /// No candidate file was listed at all.
    pub no_files: bool,
    pub processed: Vec<String>,
    pub errors: Vec<String>,
}

impl SyncReport {
    pub fn empty_intake() -> Self {
        Self {
            no_files: true,
            ..Self::default()
        }
    }

    /// Human-readable, multi-line summary returned to the caller.
    pub fn render(&self) -> String {
        if self.no_files {
            return "No files found to process.".to_string();
        }
        if self.processed.is_empty() && self.errors.is_empty() {
            return "No new files to process.".to_string();
        }

        let mut parts = Vec::new();

        if !self.processed.is_empty() {
            parts.push(format!(
                "Successfully processed {} files: {}",
                self.processed.len(),
                self.processed.join(", ")
            ));
        }

        if !self.errors.is_empty() {
            parts.push(format!(
                "Validation errors found in {} files:",
                self.errors.len()
            ));
            for e in &self.errors {
                parts.push(format!("  - {e}"));
            }
        }

        parts.join("\n")
    }
}
