//! Run the reports of a selection, in increasing identifier order
//!
//! Progress is reported through an `Observer`. What happens after a failed
//! report is decided by the `FailurePolicy`.

use crate::lib::{
    catalog::{Catalog, Context, Entry, Outcome},
    error::{Diagnostic, Error, Record},
    select::Selection,
};

/// Behavior after a report fails
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum FailurePolicy {
    /// run the remaining reports anyway
    #[default]
    Continue,
    /// skip the remaining reports
    Abort,
}

/// Notified of every step of a batch
pub trait Observer {
    fn started(&mut self, entry: &Entry);
    fn finished(&mut self, entry: &Entry, outcome: &Outcome);
    fn failed(&mut self, entry: &Entry, err: &Error);
    fn completed(&mut self, report: &BatchReport);
}

/// Result of a whole batch
#[derive(Debug, Default)]
pub struct BatchReport {
    pub succeeded: Vec<u8>,
    pub failed: Vec<(u8, Error)>,
    pub skipped: Vec<u8>,
}

impl BatchReport {
    pub fn is_success(&self) -> bool {
        self.failed.is_empty() && self.skipped.is_empty()
    }

    /// Diagnostics for everything that did not succeed
    pub fn diagnostics(&self, catalog: &Catalog) -> Record {
        let name = |id: u8| catalog.get(id).map(|e| e.name).unwrap_or("Unknown report");
        let mut record = Record::new();
        for (id, err) in &self.failed {
            err.diagnose(name(*id)).register(&mut record);
        }
        for id in &self.skipped {
            Diagnostic::new(name(*id))
                .nonfatal()
                .with_text("not generated after an earlier failure")
                .with_hint("run without --abort-on-failure to keep going")
                .register(&mut record);
        }
        record
    }
}

pub struct Dispatcher<'c> {
    catalog: &'c Catalog,
    policy: FailurePolicy,
}

impl<'c> Dispatcher<'c> {
    pub fn new(catalog: &'c Catalog, policy: FailurePolicy) -> Self {
        Self { catalog, policy }
    }

    /// Invoke each selected report exactly once
    pub fn run(&self, selection: &Selection, ctx: &Context<'_>, obs: &mut dyn Observer) -> BatchReport {
        let mut report = BatchReport::default();
        let mut ids = selection.ids().iter().copied();
        for id in ids.by_ref() {
            let entry = match self.catalog.get(id) {
                Some(entry) => entry,
                None => {
                    log::warn!("no report with identifier {}", id);
                    report.failed.push((id, Error::UnknownReport(id)));
                    if self.policy == FailurePolicy::Abort {
                        break;
                    }
                    continue;
                }
            };
            obs.started(entry);
            match (entry.render)(ctx) {
                Ok(outcome) => {
                    obs.finished(entry, &outcome);
                    report.succeeded.push(id);
                }
                Err(err) => {
                    log::warn!("report {} ({}) failed: {}", id, entry.name, err);
                    obs.failed(entry, &err);
                    report.failed.push((id, err));
                    if self.policy == FailurePolicy::Abort {
                        break;
                    }
                }
            }
        }
        report.skipped.extend(ids);
        obs.completed(&report);
        report
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::lib::{catalog::Section, metrics::Frame, record::Dataset};
    use std::path::Path;

    fn ok(_: &Context<'_>) -> Result<Outcome, Error> {
        Ok(Outcome::Printed("done".to_string()))
    }

    fn broken(_: &Context<'_>) -> Result<Outcome, Error> {
        Err(Error::DivisionByZero { what: "a test" })
    }

    fn catalog() -> Catalog {
        let mk = |id, render: crate::lib::catalog::Render| Entry {
            id,
            name: "report",
            caption: "report",
            section: Section::Summary,
            render,
        };
        Catalog::new(vec![mk(0, ok), mk(1, ok), mk(2, broken), mk(3, ok)])
    }

    #[derive(Default)]
    struct Log(Vec<String>);

    impl Observer for Log {
        fn started(&mut self, entry: &Entry) {
            self.0.push(format!("start {}", entry.id));
        }
        fn finished(&mut self, entry: &Entry, _: &Outcome) {
            self.0.push(format!("done {}", entry.id));
        }
        fn failed(&mut self, entry: &Entry, _: &Error) {
            self.0.push(format!("fail {}", entry.id));
        }
        fn completed(&mut self, _: &BatchReport) {
            self.0.push("complete".to_string());
        }
    }

    macro_rules! run {
        ( $policy:expr, [ $( $id:expr ),* ] ) => {{
            let cat = catalog();
            let frame = Frame::derive(&Dataset::builtin().unwrap());
            let ctx = Context { frame: &frame, out_dir: Path::new(".") };
            let mut log = Log::default();
            let report = Dispatcher::new(&cat, $policy)
                .run(&Selection::new(vec![ $( $id ),* ]), &ctx, &mut log);
            (report, log.0)
        }};
    }

    #[test]
    fn ascending_order() {
        let (report, log) = run!(FailurePolicy::Continue, [3, 1]);
        assert_eq!(log, vec!["start 1", "done 1", "start 3", "done 3", "complete"]);
        assert_eq!(report.succeeded, vec![1, 3]);
        assert!(report.is_success());
    }

    #[test]
    fn continue_after_failure() {
        let (report, log) = run!(FailurePolicy::Continue, [0, 2, 3]);
        assert_eq!(
            log,
            vec!["start 0", "done 0", "start 2", "fail 2", "start 3", "done 3", "complete"]
        );
        assert_eq!(report.succeeded, vec![0, 3]);
        assert_eq!(report.failed.len(), 1);
        assert!(report.skipped.is_empty());
        assert_eq!(report.diagnostics(&catalog()).count_errors(), 1);
    }

    #[test]
    fn abort_after_failure() {
        let (report, log) = run!(FailurePolicy::Abort, [0, 2, 3]);
        assert_eq!(log, vec!["start 0", "done 0", "start 2", "fail 2", "complete"]);
        assert_eq!(report.succeeded, vec![0]);
        assert_eq!(report.skipped, vec![3]);
        let diags = report.diagnostics(&catalog());
        assert_eq!(diags.count_errors(), 1);
        assert_eq!(diags.count_warnings(), 1);
    }

    #[test]
    fn unknown_identifier() {
        let (report, log) = run!(FailurePolicy::Continue, [1, 7]);
        assert_eq!(log, vec!["start 1", "done 1", "complete"]);
        assert!(matches!(report.failed[..], [(7, Error::UnknownReport(7))]));
    }

    #[test]
    fn default_policy_continues() {
        assert_eq!(FailurePolicy::default(), FailurePolicy::Continue);
    }
}
