//! Executes contract cases and classifies their outcome.

use std::any::Any;
use std::collections::HashMap;
use std::future::Future;
use std::time::{Duration, Instant};

use reqres_client::{ClientError, FaultCategory, ReqResClient};
use tokio::task::JoinSet;
use tracing::{info, warn};

use crate::expectation::{verify, Mismatch};
use crate::scenario::Scenario;

/// Result of one case.
#[derive(Debug)]
pub enum Outcome {
    Passed,
    /// The response arrived but did not match the expectation.
    Mismatch(Vec<Mismatch>),
    /// The call itself failed.
    Fault(ClientError),
    /// The case task panicked or was cancelled.
    Aborted(String),
}

impl Outcome {
    pub fn is_passed(&self) -> bool {
        matches!(self, Outcome::Passed)
    }

    pub fn label(&self) -> &'static str {
        match self {
            Outcome::Passed => "passed",
            Outcome::Mismatch(_) => "mismatch",
            Outcome::Fault(_) => "fault",
            Outcome::Aborted(_) => "aborted",
        }
    }

    /// Fault category, for [`Outcome::Fault`] only.
    pub fn fault_category(&self) -> Option<FaultCategory> {
        match self {
            Outcome::Fault(err) => Some(err.category()),
            _ => None,
        }
    }

    /// Panic with the full report unless the case passed.
    #[track_caller]
    pub fn assert_passed(&self, name: &str) {
        if !self.is_passed() {
            panic!("contract case `{name}` failed: {self}");
        }
    }
}

impl std::fmt::Display for Outcome {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Outcome::Passed => f.write_str("passed"),
            Outcome::Mismatch(mismatches) => {
                write!(f, "{} mismatch(es)", mismatches.len())?;
                for m in mismatches {
                    write!(f, "\n{m}")?;
                }
                Ok(())
            }
            Outcome::Fault(err) => write!(f, "{} fault: {err}", err.category()),
            Outcome::Aborted(reason) => write!(f, "aborted: {reason}"),
        }
    }
}

/// Run one case: a single request, then every check of its expectation.
pub async fn run(client: &ReqResClient, scenario: &Scenario) -> Outcome {
    let request = scenario.operation.describe();
    let outcome = match scenario.operation.send(client).await {
        Ok(response) => match verify(&scenario.expect, &response) {
            Ok(()) => Outcome::Passed,
            Err(mismatches) => Outcome::Mismatch(mismatches),
        },
        Err(err) => Outcome::Fault(err),
    };

    match &outcome {
        Outcome::Passed => info!(case = scenario.name, %request, "contract case passed"),
        other => {
            warn!(case = scenario.name, %request, outcome = other.label(), "contract case failed")
        }
    }
    outcome
}

#[derive(Debug)]
pub struct CaseReport {
    pub name: &'static str,
    pub outcome: Outcome,
    pub elapsed: Duration,
}

/// Outcomes of a suite run, in table order.
#[derive(Debug, Default)]
pub struct SuiteReport {
    pub cases: Vec<CaseReport>,
}

impl SuiteReport {
    pub fn passed(&self) -> usize {
        self.count(|o| matches!(o, Outcome::Passed))
    }

    pub fn failed(&self) -> usize {
        self.count(|o| matches!(o, Outcome::Mismatch(_) | Outcome::Aborted(_)))
    }

    pub fn faulted(&self) -> usize {
        self.count(|o| matches!(o, Outcome::Fault(_)))
    }

    pub fn is_success(&self) -> bool {
        self.cases.iter().all(|c| c.outcome.is_passed())
    }

    pub fn get(&self, name: &str) -> Option<&CaseReport> {
        self.cases.iter().find(|c| c.name == name)
    }

    fn count(&self, f: impl Fn(&Outcome) -> bool) -> usize {
        self.cases.iter().filter(|c| f(&c.outcome)).count()
    }
}

impl std::fmt::Display for SuiteReport {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        writeln!(
            f,
            "{} cases: {} passed, {} failed, {} faulted",
            self.cases.len(),
            self.passed(),
            self.failed(),
            self.faulted()
        )?;
        for case in &self.cases {
            writeln!(f, "- {} [{} ms]: {}", case.name, case.elapsed.as_millis(), case.outcome)?;
        }
        Ok(())
    }
}

/// Run every case on its own task. A slow or failing case never holds up
/// its siblings; the report keeps the input order.
pub async fn run_all(client: &ReqResClient, scenarios: Vec<Scenario>) -> SuiteReport {
    let cases = scenarios
        .into_iter()
        .map(|scenario| {
            let client = client.clone();
            (scenario.name, async move { run(&client, &scenario).await })
        })
        .collect();
    run_cases(cases).await
}

/// Spawn each named case and collect the reports in input order. A task that
/// panics or is cancelled is reported as [`Outcome::Aborted`].
async fn run_cases<F>(cases: Vec<(&'static str, F)>) -> SuiteReport
where
    F: Future<Output = Outcome> + Send + 'static,
{
    let suite_started = Instant::now();
    let names: Vec<&'static str> = cases.iter().map(|(name, _)| *name).collect();
    let mut slots: Vec<Option<CaseReport>> = names.iter().map(|_| None).collect();
    let mut task_index = HashMap::new();

    let mut tasks = JoinSet::new();
    for (index, (name, case)) in cases.into_iter().enumerate() {
        let handle = tasks.spawn(async move {
            let started = Instant::now();
            let outcome = case.await;
            CaseReport {
                name,
                outcome,
                elapsed: started.elapsed(),
            }
        });
        task_index.insert(handle.id(), index);
    }

    while let Some(joined) = tasks.join_next_with_id().await {
        match joined {
            Ok((id, report)) => {
                if let Some(&index) = task_index.get(&id) {
                    slots[index] = Some(report);
                }
            }
            Err(e) => {
                let Some(&index) = task_index.get(&e.id()) else {
                    continue;
                };
                warn!(case = names[index], error = %e, "contract case task did not complete");
                let reason = if e.is_panic() {
                    panic_message(e.into_panic())
                } else {
                    "cancelled".to_string()
                };
                slots[index] = Some(CaseReport {
                    name: names[index],
                    outcome: Outcome::Aborted(reason),
                    elapsed: suite_started.elapsed(),
                });
            }
        }
    }

    let cases = slots
        .into_iter()
        .zip(names)
        .map(|(slot, name)| {
            slot.unwrap_or_else(|| CaseReport {
                name,
                outcome: Outcome::Aborted("task did not report".to_string()),
                elapsed: suite_started.elapsed(),
            })
        })
        .collect();
    SuiteReport { cases }
}

fn panic_message(payload: Box<dyn Any + Send>) -> String {
    match payload.downcast::<String>() {
        Ok(message) => format!("panicked: {message}"),
        Err(payload) => match payload.downcast::<&'static str>() {
            Ok(message) => format!("panicked: {message}"),
            Err(_) => "panicked".to_string(),
        },
    }
}

#[cfg(test)]
mod tests {
    use std::pin::Pin;

    use super::*;
    use crate::expectation::Check;

    type Case = Pin<Box<dyn Future<Output = Outcome> + Send>>;

    fn report(outcomes: Vec<Outcome>) -> SuiteReport {
        SuiteReport {
            cases: outcomes
                .into_iter()
                .map(|outcome| CaseReport {
                    name: "case",
                    outcome,
                    elapsed: Duration::from_millis(3),
                })
                .collect(),
        }
    }

    fn mismatch() -> Mismatch {
        Mismatch {
            check: Check::Status,
            expected: "200".into(),
            actual: "404".into(),
            detail: None,
        }
    }

    #[test]
    fn counts_by_outcome() {
        let r = report(vec![
            Outcome::Passed,
            Outcome::Mismatch(vec![mismatch()]),
            Outcome::Fault(ClientError::ServerFault { status: 503, body: String::new() }),
            Outcome::Aborted("boom".into()),
        ]);
        assert_eq!((r.passed(), r.failed(), r.faulted()), (1, 2, 1));
        assert!(!r.is_success());
        assert!(report(vec![Outcome::Passed]).is_success());
        assert!(SuiteReport::default().is_success());
    }

    #[test]
    fn fault_category_only_for_faults() {
        let fault = Outcome::Fault(ClientError::ServerFault { status: 502, body: String::new() });
        assert_eq!(fault.fault_category(), Some(FaultCategory::Server));
        assert_eq!(Outcome::Mismatch(vec![]).fault_category(), None);
    }

    #[test]
    fn display_lists_every_mismatch() {
        let text = Outcome::Mismatch(vec![mismatch(), mismatch()]).to_string();
        assert!(text.starts_with("2 mismatch(es)"));
        assert_eq!(text.matches("status mismatch").count(), 2);
    }

    #[test]
    #[should_panic(expected = "contract case `get_user` failed")]
    fn assert_passed_panics_with_report() {
        Outcome::Mismatch(vec![mismatch()]).assert_passed("get_user");
    }

    #[tokio::test]
    async fn panicking_case_is_aborted_and_order_is_kept() {
        let cases: Vec<(&'static str, Case)> = vec![
            ("first", Box::pin(async { Outcome::Passed })),
            ("explodes", Box::pin(async { panic!("fixture went missing") })),
            ("last", Box::pin(async { Outcome::Passed })),
        ];
        let report = run_cases(cases).await;

        let names: Vec<_> = report.cases.iter().map(|c| c.name).collect();
        assert_eq!(names, vec!["first", "explodes", "last"]);
        match &report.get("explodes").unwrap().outcome {
            Outcome::Aborted(reason) => {
                assert!(reason.contains("fixture went missing"), "{reason}")
            }
            other => panic!("expected an aborted case, got {other}"),
        }
        assert_eq!((report.passed(), report.failed()), (2, 1));
    }

    #[tokio::test]
    async fn slow_case_does_not_delay_its_siblings() {
        let delay = Duration::from_millis(400);
        let cases: Vec<(&'static str, Case)> = vec![
            ("slow", Box::pin(async move {
                tokio::time::sleep(delay).await;
                Outcome::Passed
            })),
            ("quick", Box::pin(async { Outcome::Passed })),
        ];
        let report = run_cases(cases).await;

        assert!(report.is_success(), "{report}");
        assert!(report.get("slow").unwrap().elapsed >= delay);
        assert!(report.get("quick").unwrap().elapsed < delay / 2);
    }
}
