//! Human-readable validation report and its machine-readable summary.
//!
//! The text report is rebuilt from scratch on every run and carries no
//! timestamps, so identical inputs always render identical bytes.
use serde::Serialize;
use std::fmt;

const HEADER_RULE: &str = "========================================";
const FOOTER_RULE: &str = "====================================";
const RESULTS_RULE: &str = "------------------------------";

pub const TITLE_LINE: &str = "     🛠️  Flutter Asset Validator";
pub const ALL_CLEAR_LINE: &str = "✅ All assets are correctly placed and used. Great job! 🎉";
pub const NO_MISSING_LINE: &str = "✅ No missing assets found.";
pub const ALL_USED_LINE: &str = "✅ All assets are being used.";
pub const MISSING_HEADING: &str = "❌ Missing assets:";
pub const UNUSED_HEADING: &str = "⚠️  Unused assets:";
pub const COMPLETED_LINE: &str = "✔️  Asset validation completed.";

/// Ordered report lines.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Report {
    lines: Vec<String>,
}

impl Report {
    pub fn lines(&self) -> &[String] {
        &self.lines
    }

    fn push(&mut self, line: impl Into<String>) {
        self.lines.push(line.into());
    }

    fn blank(&mut self) {
        self.lines.push(String::new());
    }

    fn header(&mut self) {
        self.push(HEADER_RULE);
        self.push(TITLE_LINE);
        self.push(HEADER_RULE);
        self.blank();
    }
}

impl fmt::Display for Report {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for line in &self.lines {
            writeln!(f, "{line}")?;
        }
        Ok(())
    }
}

/// Warning shown when `manifest` declares no assets.
pub fn no_declaration_line(manifest: &str) -> String {
    format!("⚠️  No assets declared in `{manifest}`.")
}

/// Report for a manifest that declares no assets: banner plus one warning.
pub fn no_declaration_report(manifest: &str) -> Report {
    let mut report = Report::default();
    report.header();
    report.push(no_declaration_line(manifest));
    report
}

/// Build the full report from the declared list and both result sets.
pub fn build_report(declared: &[String], missing: &[String], unused: &[String]) -> Report {
    let mut report = Report::default();
    report.header();
    report.push("🔍 Starting asset validation...");
    report.blank();
    report.push("Declared assets:");
    for asset in declared {
        report.push(format!("  - 📄 {asset}"));
    }
    report.blank();

    report.push("Validation Results:");
    report.push(RESULTS_RULE);
    if missing.is_empty() && unused.is_empty() {
        report.push(ALL_CLEAR_LINE);
    } else {
        if missing.is_empty() {
            report.push(NO_MISSING_LINE);
        } else {
            report.push(MISSING_HEADING);
            for asset in missing {
                report.push(format!("  - 🚫 {asset}"));
            }
        }

        report.blank();
        if unused.is_empty() {
            report.push(ALL_USED_LINE);
        } else {
            report.push(UNUSED_HEADING);
            for asset in unused {
                report.push(format!("  - ⚠️ {asset}"));
            }
        }
    }

    report.blank();
    report.push(FOOTER_RULE);
    report.push(COMPLETED_LINE);
    report.push(FOOTER_RULE);
    report
}

/// Overall result of a run, as exposed by `--json`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum SummaryStatus {
    NoDeclaration,
    Clean,
    Findings,
}

/// Machine-readable summary of a run.
#[derive(Debug, Clone, Serialize)]
pub struct AssetSummary {
    pub project_root: String,
    pub manifest: String,
    pub status: SummaryStatus,
    pub declared: Vec<String>,
    pub missing: Vec<String>,
    pub unused: Vec<String>,
}
