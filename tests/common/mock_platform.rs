//! Mock platform service for testing
//!
//! These are test utilities - not all may be used in current tests but are
//! available for future test development.

#![allow(dead_code)]

use async_trait::async_trait;
use gitflow_action::error::{Error, Result};
use gitflow_action::platform::PlatformService;
use gitflow_action::types::{MergeMethod, MergeResult, PrState, PullRequest};
use std::collections::{HashMap, HashSet};
use std::sync::Mutex;
use std::sync::atomic::{AtomicU64, Ordering};

/// Call record for `list_open_prs`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ListPrsCall {
    pub head: String,
    pub base: String,
}

/// Call record for `create_pr`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CreatePrCall {
    pub head: String,
    pub base: String,
    pub title: String,
}

/// Call record for `add_labels`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AddLabelsCall {
    pub pr_number: u64,
    pub labels: Vec<String>,
}

/// Call record for `merge_pr`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MergePrCall {
    pub pr_number: u64,
    pub method: MergeMethod,
}

/// In-memory mock platform service for testing
///
/// This manually implements `PlatformService` rather than using mockall,
/// because mockall has issues with methods returning references.
///
/// Features:
/// - A small PR store, so created PRs are found by later listings
/// - Auto-incrementing PR numbers
/// - Call tracking for verification
/// - Error injection for failure path testing
pub struct MockPlatformService {
    next_pr_number: AtomicU64,
    prs: Mutex<Vec<PullRequest>>,
    // Call tracking
    list_prs_calls: Mutex<Vec<ListPrsCall>>,
    create_pr_calls: Mutex<Vec<CreatePrCall>>,
    add_labels_calls: Mutex<Vec<AddLabelsCall>>,
    get_pr_calls: Mutex<Vec<u64>>,
    merge_pr_calls: Mutex<Vec<MergePrCall>>,
    // Error injection
    error_on_list_prs: Mutex<Option<String>>,
    error_on_create_pr: Mutex<Option<String>>,
    error_on_add_labels: Mutex<Option<String>>,
    error_on_get_pr: Mutex<Option<String>>,
    error_on_merge_pr: Mutex<HashMap<u64, String>>,
    refuse_merge: Mutex<HashSet<u64>>,
}

impl MockPlatformService {
    /// Create a new mock with an empty PR store
    pub fn new() -> Self {
        Self {
            next_pr_number: AtomicU64::new(1),
            prs: Mutex::new(Vec::new()),
            list_prs_calls: Mutex::new(Vec::new()),
            create_pr_calls: Mutex::new(Vec::new()),
            add_labels_calls: Mutex::new(Vec::new()),
            get_pr_calls: Mutex::new(Vec::new()),
            merge_pr_calls: Mutex::new(Vec::new()),
            error_on_list_prs: Mutex::new(None),
            error_on_create_pr: Mutex::new(None),
            error_on_add_labels: Mutex::new(None),
            error_on_get_pr: Mutex::new(None),
            error_on_merge_pr: Mutex::new(HashMap::new()),
            refuse_merge: Mutex::new(HashSet::new()),
        }
    }

    // === State setup ===

    /// Add an existing PR to the store
    pub fn add_pr(&self, pr: PullRequest) {
        let mut next = self.next_pr_number.load(Ordering::SeqCst);
        if pr.number >= next {
            next = pr.number + 1;
            self.next_pr_number.store(next, Ordering::SeqCst);
        }
        self.prs.lock().unwrap().push(pr);
    }

    /// Current state of a PR in the store
    pub fn pr(&self, pr_number: u64) -> Option<PullRequest> {
        self.prs
            .lock()
            .unwrap()
            .iter()
            .find(|pr| pr.number == pr_number)
            .cloned()
    }

    /// Number of PRs in the store
    pub fn pr_count(&self) -> usize {
        self.prs.lock().unwrap().len()
    }

    // === Error injection methods ===

    /// Make `list_open_prs` return an error
    pub fn fail_list_prs(&self, msg: &str) {
        *self.error_on_list_prs.lock().unwrap() = Some(msg.to_string());
    }

    /// Make `create_pr` return an error
    pub fn fail_create_pr(&self, msg: &str) {
        *self.error_on_create_pr.lock().unwrap() = Some(msg.to_string());
    }

    /// Make `add_labels` return an error
    pub fn fail_add_labels(&self, msg: &str) {
        *self.error_on_add_labels.lock().unwrap() = Some(msg.to_string());
    }

    /// Make `get_pr` return an error
    pub fn fail_get_pr(&self, msg: &str) {
        *self.error_on_get_pr.lock().unwrap() = Some(msg.to_string());
    }

    /// Make `merge_pr` return an error for a specific PR
    pub fn fail_merge_pr(&self, pr_number: u64, msg: &str) {
        self.error_on_merge_pr
            .lock()
            .unwrap()
            .insert(pr_number, msg.to_string());
    }

    /// Make `merge_pr` answer `merged: false` for a specific PR
    pub fn refuse_merge(&self, pr_number: u64) {
        self.refuse_merge.lock().unwrap().insert(pr_number);
    }

    // === Call verification methods ===

    /// Get all `list_open_prs` calls
    pub fn get_list_prs_calls(&self) -> Vec<ListPrsCall> {
        self.list_prs_calls.lock().unwrap().clone()
    }

    /// Get all `create_pr` calls
    pub fn get_create_pr_calls(&self) -> Vec<CreatePrCall> {
        self.create_pr_calls.lock().unwrap().clone()
    }

    /// Get all `add_labels` calls
    pub fn get_add_labels_calls(&self) -> Vec<AddLabelsCall> {
        self.add_labels_calls.lock().unwrap().clone()
    }

    /// Get all `get_pr` calls
    pub fn get_pr_calls(&self) -> Vec<u64> {
        self.get_pr_calls.lock().unwrap().clone()
    }

    /// Get all `merge_pr` calls
    pub fn get_merge_pr_calls(&self) -> Vec<MergePrCall> {
        self.merge_pr_calls.lock().unwrap().clone()
    }

    /// Total number of platform calls of any kind
    pub fn total_calls(&self) -> usize {
        self.list_prs_calls.lock().unwrap().len()
            + self.create_pr_calls.lock().unwrap().len()
            + self.add_labels_calls.lock().unwrap().len()
            + self.get_pr_calls.lock().unwrap().len()
            + self.merge_pr_calls.lock().unwrap().len()
    }

    /// Number of calls that change platform state
    pub fn mutation_calls(&self) -> usize {
        self.create_pr_calls.lock().unwrap().len()
            + self.add_labels_calls.lock().unwrap().len()
            + self.merge_pr_calls.lock().unwrap().len()
    }

    /// Assert that `create_pr` was called with specific head and base
    pub fn assert_create_pr_called(&self, head: &str, base: &str) {
        let calls = self.get_create_pr_calls();
        assert!(
            calls.iter().any(|c| c.head == head && c.base == base),
            "Expected create_pr({head}, {base}) but got: {calls:?}"
        );
    }

    /// Assert that `merge_pr` was called for a specific PR
    pub fn assert_merge_called(&self, pr_number: u64) {
        let calls = self.get_merge_pr_calls();
        assert!(
            calls.iter().any(|c| c.pr_number == pr_number),
            "Expected merge_pr({pr_number}) but got: {calls:?}"
        );
    }

    /// Assert that `merge_pr` was NOT called for a specific PR
    pub fn assert_merge_not_called(&self, pr_number: u64) {
        let calls = self.get_merge_pr_calls();
        assert!(
            !calls.iter().any(|c| c.pr_number == pr_number),
            "Expected merge_pr({pr_number}) NOT to be called but it was: {calls:?}"
        );
    }

    /// Get count of merge_pr calls
    pub fn merge_call_count(&self) -> usize {
        self.merge_pr_calls.lock().unwrap().len()
    }
}

impl Default for MockPlatformService {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl PlatformService for MockPlatformService {
    async fn list_open_prs(&self, head: &str, base: &str) -> Result<Vec<PullRequest>> {
        self.list_prs_calls.lock().unwrap().push(ListPrsCall {
            head: head.to_string(),
            base: base.to_string(),
        });

        // Check for injected error
        if let Some(msg) = self.error_on_list_prs.lock().unwrap().as_ref() {
            return Err(Error::Platform(msg.clone()));
        }

        Ok(self
            .prs
            .lock()
            .unwrap()
            .iter()
            .filter(|pr| pr.state == PrState::Open && pr.head_ref == head && pr.base_ref == base)
            .cloned()
            .collect())
    }

    async fn create_pr(&self, head: &str, base: &str, title: &str) -> Result<PullRequest> {
        self.create_pr_calls.lock().unwrap().push(CreatePrCall {
            head: head.to_string(),
            base: base.to_string(),
            title: title.to_string(),
        });

        // Check for injected error
        if let Some(msg) = self.error_on_create_pr.lock().unwrap().as_ref() {
            return Err(Error::Platform(msg.clone()));
        }

        let number = self.next_pr_number.fetch_add(1, Ordering::SeqCst);
        let pr = PullRequest {
            number,
            html_url: format!("https://github.com/test/repo/pull/{number}"),
            base_ref: base.to_string(),
            head_ref: head.to_string(),
            title: title.to_string(),
            state: PrState::Open,
            labels: vec![],
        };
        self.prs.lock().unwrap().push(pr.clone());
        Ok(pr)
    }

    async fn add_labels(&self, pr_number: u64, labels: &[String]) -> Result<Vec<String>> {
        self.add_labels_calls.lock().unwrap().push(AddLabelsCall {
            pr_number,
            labels: labels.to_vec(),
        });

        // Check for injected error
        if let Some(msg) = self.error_on_add_labels.lock().unwrap().as_ref() {
            return Err(Error::Platform(msg.clone()));
        }

        let mut prs = self.prs.lock().unwrap();
        let pr = prs
            .iter_mut()
            .find(|pr| pr.number == pr_number)
            .ok_or_else(|| Error::Platform(format!("add_labels: no PR #{pr_number}")))?;
        for label in labels {
            if !pr.labels.contains(label) {
                pr.labels.push(label.clone());
            }
        }
        Ok(pr.labels.clone())
    }

    async fn get_pr(&self, pr_number: u64) -> Result<PullRequest> {
        self.get_pr_calls.lock().unwrap().push(pr_number);

        // Check for injected error
        if let Some(msg) = self.error_on_get_pr.lock().unwrap().as_ref() {
            return Err(Error::Platform(msg.clone()));
        }

        self.pr(pr_number)
            .ok_or_else(|| Error::Platform(format!("get_pr: no PR #{pr_number}")))
    }

    async fn merge_pr(&self, pr_number: u64, method: MergeMethod) -> Result<MergeResult> {
        self.merge_pr_calls
            .lock()
            .unwrap()
            .push(MergePrCall { pr_number, method });

        // Check for injected error
        if let Some(msg) = self.error_on_merge_pr.lock().unwrap().get(&pr_number) {
            return Err(Error::Platform(msg.clone()));
        }

        if self.refuse_merge.lock().unwrap().contains(&pr_number) {
            return Ok(MergeResult {
                merged: false,
                sha: None,
                message: Some("Pull Request is not mergeable".to_string()),
            });
        }

        let mut prs = self.prs.lock().unwrap();
        let pr = prs
            .iter_mut()
            .find(|pr| pr.number == pr_number)
            .ok_or_else(|| Error::Platform(format!("merge_pr: no PR #{pr_number}")))?;
        if pr.state != PrState::Open {
            return Err(Error::Platform(format!("PR #{pr_number} is {}", pr.state)));
        }
        pr.state = PrState::Merged;
        Ok(MergeResult {
            merged: true,
            sha: Some(format!("merged_sha_{pr_number}")),
            message: None,
        })
    }
}
