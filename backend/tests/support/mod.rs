#![allow(dead_code)]

use std::collections::HashSet;
use std::sync::Mutex;

use calls_inflection::api::CompanyId;
use calls_inflection::models::CallRecord;

static ENV_LOCK: Mutex<()> = Mutex::new(());

/// A clean two-cycle series: valleys in January and July, peaks in April and
/// October.
pub const SINUSOID: [f64; 12] = [5.0, 7.5, 12.5, 15.0, 12.5, 7.5, 5.0, 7.5, 12.5, 15.0, 12.5, 7.5];

/// Run `f` with `changes` applied to the process environment.
///
/// `Some(v)` sets a variable and `None` removes it. The previous values come
/// back when `f` returns or panics. Calls are serialized on a global lock since
/// config tests run in parallel.
pub fn with_scoped_env<F, R>(changes: &[(&str, Option<&str>)], f: F) -> R
where
    F: FnOnce() -> R,
{
    let _lock = ENV_LOCK.lock().unwrap_or_else(|poisoned| poisoned.into_inner());
    let _guard = ScopedEnv::new(changes);
    f()
}

struct ScopedEnv {
    snapshot: Vec<(String, Option<String>)>,
}

impl ScopedEnv {
    fn new(changes: &[(&str, Option<&str>)]) -> Self {
        let keys: HashSet<&str> = changes.iter().map(|(k, _)| *k).collect();
        let snapshot = keys
            .into_iter()
            .map(|k| (k.to_string(), std::env::var(k).ok()))
            .collect::<Vec<_>>();

        for (k, v) in changes {
            match v {
                Some(val) => std::env::set_var(k, val),
                None => std::env::remove_var(k),
            }
        }

        Self { snapshot }
    }
}

impl Drop for ScopedEnv {
    fn drop(&mut self) {
        for (k, v) in self.snapshot.drain(..) {
            match v {
                Some(val) => std::env::set_var(&k, val),
                None => std::env::remove_var(&k),
            }
        }
    }
}

pub fn call_record(company: i64, year: i32, month: u32, calls: u64) -> CallRecord {
    CallRecord {
        company_id: CompanyId::new(company),
        company_name: format!("Company {}", company),
        state: "TX".to_string(),
        year,
        month,
        calls,
        campaigns: 3,
        customers: calls / 3,
    }
}

/// Twelve rows for one company-year, January first.
pub fn year_of_records(company: i64, year: i32, counts: [u64; 12]) -> Vec<CallRecord> {
    counts
        .iter()
        .enumerate()
        .map(|(idx, &calls)| call_record(company, year, idx as u32 + 1, calls))
        .collect()
}

/// [`SINUSOID`] scaled to integer call counts.
pub fn sinusoid_counts() -> [u64; 12] {
    SINUSOID.map(|v| (v * 10.0) as u64)
}
