//! Human-readable narration.
//!
//! Findings are the harness's only product: everything it observes becomes a
//! labeled line on the output sink, and the process exit code stays 0 no
//! matter what was found. The sink is generic over [`Write`]; tests capture
//! the narration in a buffer, the binary hands in stdout. Write errors are
//! swallowed: with the sink gone there is nobody left to tell.

use std::io::Write;

/// Classification labels, in summary-line order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Label {
    Success,
    Expected,
    Error,
    Skip,
    Inconclusive,
    Divergence,
}

impl Label {
    fn as_str(self) -> &'static str {
        match self {
            Self::Success => "SUCCESS",
            Self::Expected => "EXPECTED",
            Self::Error => "ERROR",
            Self::Skip => "SKIP",
            Self::Inconclusive => "INCONCLUSIVE",
            Self::Divergence => "DIVERGENCE",
        }
    }
}

/// Counts of labeled lines emitted so far.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct Tally {
    pub success: usize,
    pub expected: usize,
    pub error: usize,
    pub skip: usize,
    pub inconclusive: usize,
    pub divergence: usize,
}

/// Writes the narration and keeps the running tally.
pub struct Reporter<W: Write> {
    out: W,
    tally: Tally,
}

impl<W: Write> Reporter<W> {
    pub fn new(out: W) -> Self {
        Self {
            out,
            tally: Tally::default(),
        }
    }

    /// Suite title block, ending with a blank line.
    pub fn suite_header(&mut self, kernel: Option<&str>) {
        self.raw("SECCOMP_MODE_CORE Test Suite");
        self.raw("============================");
        if let Some(release) = kernel {
            self.raw(&format!("Kernel: {release}"));
        }
        self.raw("");
    }

    /// Starts a new narration block.
    pub fn section(&mut self, title: &str) {
        self.raw("");
        self.raw(title);
    }

    /// An unlabeled line; not counted in the tally.
    pub fn line(&mut self, text: &str) {
        self.raw(text);
    }

    pub fn success(&mut self, msg: &str) {
        self.labeled(Label::Success, msg);
    }

    pub fn expected(&mut self, msg: &str) {
        self.labeled(Label::Expected, msg);
    }

    pub fn error(&mut self, msg: &str) {
        self.labeled(Label::Error, msg);
    }

    pub fn skip(&mut self, msg: &str) {
        self.labeled(Label::Skip, msg);
    }

    pub fn inconclusive(&mut self, msg: &str) {
        self.labeled(Label::Inconclusive, msg);
    }

    pub fn divergence(&mut self, msg: &str) {
        self.labeled(Label::Divergence, msg);
    }

    /// Summary line plus the closing note.
    pub fn footer(&mut self) {
        let t = self.tally;
        self.raw("");
        self.raw(&format!(
            "Summary: {} success, {} expected, {} error, {} skip, {} inconclusive, {} divergence",
            t.success, t.expected, t.error, t.skip, t.inconclusive, t.divergence
        ));
        self.raw("");
        self.raw("Core mode test completed.");
        self.raw("Note: EXPECTED failures indicate the feature is not yet active in this kernel.");
    }

    pub fn tally(&self) -> Tally {
        self.tally
    }

    /// Consumes the reporter, returning the sink.
    pub fn into_inner(self) -> W {
        self.out
    }

    fn labeled(&mut self, label: Label, msg: &str) {
        *self.slot(label) += 1;
        self.raw(&format!("{}: {}", label.as_str(), msg));
    }

    fn slot(&mut self, label: Label) -> &mut usize {
        match label {
            Label::Success => &mut self.tally.success,
            Label::Expected => &mut self.tally.expected,
            Label::Error => &mut self.tally.error,
            Label::Skip => &mut self.tally.skip,
            Label::Inconclusive => &mut self.tally.inconclusive,
            Label::Divergence => &mut self.tally.divergence,
        }
    }

    fn raw(&mut self, line: &str) {
        let _ = writeln!(self.out, "{line}");
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn rendered(report: Reporter<Vec<u8>>) -> String {
        String::from_utf8(report.into_inner()).unwrap()
    }

    #[test]
    fn header_and_footer_shape() {
        let mut report = Reporter::new(Vec::new());
        report.suite_header(Some("6.19.0-rc1"));
        report.footer();
        let out = rendered(report);
        assert_eq!(
            out,
            "SECCOMP_MODE_CORE Test Suite\n\
             ============================\n\
             Kernel: 6.19.0-rc1\n\
             \n\
             \n\
             Summary: 0 success, 0 expected, 0 error, 0 skip, 0 inconclusive, 0 divergence\n\
             \n\
             Core mode test completed.\n\
             Note: EXPECTED failures indicate the feature is not yet active in this kernel.\n"
        );
    }

    #[test]
    fn header_without_kernel_release() {
        let mut report = Reporter::new(Vec::new());
        report.suite_header(None);
        let out = rendered(report);
        assert_eq!(out, "SECCOMP_MODE_CORE Test Suite\n============================\n\n");
    }

    #[test]
    fn labels_render_and_count() {
        let mut report = Reporter::new(Vec::new());
        report.success("Core mode enabled");
        report.expected("Core mode not supported (errno=22)");
        report.error("Expected mode 0, got 3");
        report.skip("Seccomp already enabled");
        report.inconclusive("RWX mapping denied by environment (errno=13)");
        report.divergence("surfaces disagree");

        let tally = report.tally();
        assert_eq!(tally.success, 1);
        assert_eq!(tally.expected, 1);
        assert_eq!(tally.error, 1);
        assert_eq!(tally.skip, 1);
        assert_eq!(tally.inconclusive, 1);
        assert_eq!(tally.divergence, 1);

        let out = rendered(report);
        assert!(out.contains("SUCCESS: Core mode enabled\n"));
        assert!(out.contains("EXPECTED: Core mode not supported (errno=22)\n"));
        assert!(out.contains("ERROR: Expected mode 0, got 3\n"));
        assert!(out.contains("SKIP: Seccomp already enabled\n"));
        assert!(out.contains("INCONCLUSIVE: RWX mapping denied by environment (errno=13)\n"));
        assert!(out.contains("DIVERGENCE: surfaces disagree\n"));
    }

    #[test]
    fn sections_are_blank_separated() {
        let mut report = Reporter::new(Vec::new());
        report.section("Testing SECCOMP_MODE_CORE via prctl...");
        report.line("Current seccomp mode: 0");
        let out = rendered(report);
        assert_eq!(
            out,
            "\nTesting SECCOMP_MODE_CORE via prctl...\nCurrent seccomp mode: 0\n"
        );
    }

    #[test]
    fn unlabeled_lines_do_not_count() {
        let mut report = Reporter::new(Vec::new());
        report.line("no_new_privs raised");
        assert_eq!(report.tally(), Tally::default());
    }
}
