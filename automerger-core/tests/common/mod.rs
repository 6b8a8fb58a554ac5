//! In-memory GitHub stand-ins for workflow tests

#![allow(dead_code)]

use async_trait::async_trait;
use automerger_core::{ApiResponse, Error, NewPullRequest, PullRequestApi, Result};
use serde_json::json;
use std::collections::VecDeque;
use std::sync::Mutex;

/// A recorded API call
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Call {
    Create { head: String, base: String, title: String },
    List { base: String, head: String },
    Merge { number: u64, commit_message: String },
    Assign { number: u64, assignee: String },
}

/// A canned reply: an HTTP response, or a transport failure
#[derive(Debug, Clone)]
pub enum Reply {
    Http(u16, String),
    Transport(String),
}

impl Reply {
    pub fn status(code: u16) -> Self {
        Reply::Http(code, "{}".to_string())
    }

    pub fn json(code: u16, body: serde_json::Value) -> Self {
        Reply::Http(code, body.to_string())
    }

    fn into_result(self) -> Result<ApiResponse> {
        match self {
            Reply::Http(code, body) => Ok(ApiResponse::new(code, body)),
            Reply::Transport(msg) => Err(Error::Transport(msg)),
        }
    }
}

pub fn created(number: u64) -> Reply {
    Reply::json(201, json!({ "number": number, "state": "open" }))
}

pub fn unprocessable(message: &str) -> Reply {
    Reply::json(
        422,
        json!({
            "message": "Validation Failed",
            "errors": [{ "resource": "PullRequest", "code": "custom", "message": message }]
        }),
    )
}

pub fn listing(numbers: &[u64]) -> Reply {
    let pulls: Vec<_> = numbers.iter().map(|n| json!({ "number": n })).collect();
    Reply::json(200, json!(pulls))
}

/// API returning scripted replies per endpoint and recording every call
///
/// An endpoint called with an empty script panics, which makes unexpected
/// calls fail the test.
#[derive(Default)]
pub struct ScriptedApi {
    create: Mutex<VecDeque<Reply>>,
    list: Mutex<VecDeque<Reply>>,
    merge: Mutex<VecDeque<Reply>>,
    assign: Mutex<VecDeque<Reply>>,
    calls: Mutex<Vec<Call>>,
}

impl ScriptedApi {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn on_create(self, reply: Reply) -> Self {
        self.create.lock().unwrap().push_back(reply);
        self
    }

    pub fn on_list(self, reply: Reply) -> Self {
        self.list.lock().unwrap().push_back(reply);
        self
    }

    pub fn on_merge(self, reply: Reply) -> Self {
        self.merge.lock().unwrap().push_back(reply);
        self
    }

    pub fn on_assign(self, reply: Reply) -> Self {
        self.assign.lock().unwrap().push_back(reply);
        self
    }

    pub fn calls(&self) -> Vec<Call> {
        self.calls.lock().unwrap().clone()
    }

    pub fn assign_calls(&self) -> usize {
        self.calls()
            .iter()
            .filter(|c| matches!(c, Call::Assign { .. }))
            .count()
    }

    fn next(queue: &Mutex<VecDeque<Reply>>, endpoint: &str) -> Result<ApiResponse> {
        queue
            .lock()
            .unwrap()
            .pop_front()
            .unwrap_or_else(|| panic!("unexpected call to {endpoint}"))
            .into_result()
    }
}

#[async_trait]
impl PullRequestApi for ScriptedApi {
    async fn create_pull(&self, pull: &NewPullRequest) -> Result<ApiResponse> {
        self.calls.lock().unwrap().push(Call::Create {
            head: pull.head.clone(),
            base: pull.base.clone(),
            title: pull.title.clone(),
        });
        Self::next(&self.create, "create_pull")
    }

    async fn list_open_pulls(&self, base: &str, head: &str) -> Result<ApiResponse> {
        self.calls.lock().unwrap().push(Call::List {
            base: base.to_string(),
            head: head.to_string(),
        });
        Self::next(&self.list, "list_open_pulls")
    }

    async fn merge_pull(&self, number: u64, commit_message: &str) -> Result<ApiResponse> {
        self.calls.lock().unwrap().push(Call::Merge {
            number,
            commit_message: commit_message.to_string(),
        });
        Self::next(&self.merge, "merge_pull")
    }

    async fn assign_issue(&self, number: u64, assignee: &str) -> Result<ApiResponse> {
        self.calls.lock().unwrap().push(Call::Assign {
            number,
            assignee: assignee.to_string(),
        });
        Self::next(&self.assign, "assign_issue")
    }
}

#[derive(Debug, Clone)]
struct FakePull {
    number: u64,
    base: String,
    head: String,
    open: bool,
}

/// A tiny stateful repository: pull requests persist between runs
///
/// Branch pairs listed as conflicted refuse to merge with 405; pairs listed
/// as identical have nothing to merge.
pub struct FakeRepo {
    pulls: Mutex<Vec<FakePull>>,
    conflicted: Vec<(String, String)>,
    identical: Vec<(String, String)>,
    pub creates: Mutex<usize>,
}

impl FakeRepo {
    pub fn new() -> Self {
        Self {
            pulls: Mutex::new(Vec::new()),
            conflicted: Vec::new(),
            identical: Vec::new(),
            creates: Mutex::new(0),
        }
    }

    pub fn with_conflict(mut self, base: &str, head: &str) -> Self {
        self.conflicted.push((base.to_string(), head.to_string()));
        self
    }

    pub fn with_identical(mut self, base: &str, head: &str) -> Self {
        self.identical.push((base.to_string(), head.to_string()));
        self
    }

    fn pair(base: &str, head: &str) -> (String, String) {
        (base.to_string(), head.to_string())
    }
}

#[async_trait]
impl PullRequestApi for FakeRepo {
    async fn create_pull(&self, pull: &NewPullRequest) -> Result<ApiResponse> {
        let pair = Self::pair(&pull.base, &pull.head);
        if self.identical.contains(&pair) {
            let msg = format!("No commits between {} and {}", pull.base, pull.head);
            return unprocessable(&msg).into_result();
        }

        let mut pulls = self.pulls.lock().unwrap();
        if pulls
            .iter()
            .any(|p| p.open && p.base == pull.base && p.head == pull.head)
        {
            let msg = format!("A pull request already exists for org:{}.", pull.head);
            return unprocessable(&msg).into_result();
        }

        let number = pulls.len() as u64 + 1;
        pulls.push(FakePull {
            number,
            base: pull.base.clone(),
            head: pull.head.clone(),
            open: true,
        });
        *self.creates.lock().unwrap() += 1;
        created(number).into_result()
    }

    async fn list_open_pulls(&self, base: &str, head: &str) -> Result<ApiResponse> {
        let numbers: Vec<u64> = self
            .pulls
            .lock()
            .unwrap()
            .iter()
            .filter(|p| p.open && p.base == base && p.head == head)
            .map(|p| p.number)
            .collect();
        listing(&numbers).into_result()
    }

    async fn merge_pull(&self, number: u64, _commit_message: &str) -> Result<ApiResponse> {
        let mut pulls = self.pulls.lock().unwrap();
        let Some(pull) = pulls.iter_mut().find(|p| p.number == number && p.open) else {
            return Reply::status(404).into_result();
        };
        if self.conflicted.contains(&Self::pair(&pull.base, &pull.head)) {
            return Reply::status(405).into_result();
        }
        pull.open = false;
        Reply::json(200, json!({ "merged": true })).into_result()
    }

    async fn assign_issue(&self, _number: u64, _assignee: &str) -> Result<ApiResponse> {
        Reply::status(200).into_result()
    }
}
