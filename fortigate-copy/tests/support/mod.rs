//! In-memory appliance used by the driver tests.
#![allow(dead_code)]

use std::cell::RefCell;
use std::collections::HashSet;
use std::rc::Rc;

use fortigate_api::{
    filter_by_vdom, ApiError, ApiResponse, Appliance, Category, Connector, Record, VDOM_KEY_FIELD,
    VDOM_PATH,
};
use serde_json::Value;

#[derive(Debug, Clone, PartialEq)]
pub struct Created {
    pub vdom: String,
    pub path: String,
    pub record: Record,
}

#[derive(Default)]
struct State {
    vdoms: Vec<Record>,
    /// (vdom scope, path, record)
    objects: Vec<(String, String, Record)>,
    created: Vec<Created>,
    failing: HashSet<(String, String)>,
    sessions: Vec<String>,
    logouts: usize,
    broken_listing: Option<Category>,
    refused_vdom: Option<String>,
}

/// A fake appliance; clones share state.
#[derive(Clone)]
pub struct FakeAppliance {
    host: String,
    state: Rc<RefCell<State>>,
}

impl FakeAppliance {
    pub fn new(host: &str) -> Self {
        Self {
            host: host.to_string(),
            state: Rc::new(RefCell::new(State::default())),
        }
    }

    pub fn with_vdoms(self, names: &[&str]) -> Self {
        {
            let mut state = self.state.borrow_mut();
            for name in names {
                state.vdoms.push(record(serde_json::json!({"name": name})));
            }
        }
        self
    }

    /// Seed objects of `category` in `vdom`.
    pub fn with_objects(self, vdom: &str, category: Category, records: Value) -> Self {
        let records: Vec<Record> = serde_json::from_value(records).expect("records");
        {
            let mut state = self.state.borrow_mut();
            for rec in records {
                state
                    .objects
                    .push((vdom.to_string(), category.path().to_string(), rec));
            }
        }
        self
    }

    /// Make creates of `key` at `path` fail with status 500.
    pub fn failing(self, path: &str, key: &str) -> Self {
        self.state
            .borrow_mut()
            .failing
            .insert((path.to_string(), key.to_string()));
        self
    }

    /// Make every listing of `category` fail.
    pub fn broken_listing(self, category: Category) -> Self {
        self.state.borrow_mut().broken_listing = Some(category);
        self
    }

    /// Refuse logins scoped to `vdom`.
    pub fn refusing_login(self, vdom: &str) -> Self {
        self.state.borrow_mut().refused_vdom = Some(vdom.to_string());
        self
    }

    pub fn created(&self) -> Vec<Created> {
        self.state.borrow().created.clone()
    }

    pub fn created_at(&self, vdom: &str, category: Category) -> Vec<Record> {
        self.created()
            .into_iter()
            .filter(|c| c.vdom == vdom && c.path == category.path())
            .map(|c| c.record)
            .collect()
    }

    pub fn sessions(&self) -> Vec<String> {
        self.state.borrow().sessions.clone()
    }

    pub fn logouts(&self) -> usize {
        self.state.borrow().logouts
    }

    pub fn session(&self, vdom: &str) -> FakeSession {
        self.connect(vdom).expect("connect")
    }
}

impl Connector for FakeAppliance {
    type Session = FakeSession;

    fn host(&self) -> &str {
        &self.host
    }

    fn connect(&self, vdom: &str) -> Result<FakeSession, ApiError> {
        let mut state = self.state.borrow_mut();
        if state.refused_vdom.as_deref() == Some(vdom) {
            return Err(ApiError::Login {
                host: self.host.clone(),
            });
        }
        state.sessions.push(vdom.to_string());
        Ok(FakeSession {
            vdom: vdom.to_string(),
            state: Rc::clone(&self.state),
        })
    }
}

pub struct FakeSession {
    vdom: String,
    state: Rc<RefCell<State>>,
}

impl Appliance for FakeSession {
    fn vdom(&self) -> &str {
        &self.vdom
    }

    fn list_vdoms(&self) -> Result<Vec<Record>, ApiError> {
        Ok(self.state.borrow().vdoms.clone())
    }

    fn list(&self, category: Category) -> Result<Vec<Record>, ApiError> {
        let state = self.state.borrow();
        if state.broken_listing == Some(category) {
            return Err(ApiError::Shape {
                path: category.path().to_string(),
                reason: "missing `results` array".to_string(),
            });
        }
        let at_path = state
            .objects
            .iter()
            .filter(|(_, path, _)| path == category.path());
        if category.scoped_by_vdom() {
            // Global table: every vdom's entries come back.
            let all = at_path.map(|(_, _, rec)| rec.clone()).collect();
            return Ok(filter_by_vdom(all, &self.vdom));
        }
        Ok(at_path
            .filter(|(scope, _, _)| *scope == self.vdom)
            .map(|(_, _, rec)| rec.clone())
            .collect())
    }

    fn create(&self, path: &str, record: &Record) -> Result<ApiResponse, ApiError> {
        let mut state = self.state.borrow_mut();
        state.created.push(Created {
            vdom: self.vdom.clone(),
            path: path.to_string(),
            record: record.clone(),
        });

        let key = record
            .key(key_field(path))
            .map(|k| k.to_string())
            .unwrap_or_default();
        if state.failing.contains(&(path.to_string(), key)) {
            return Ok(ApiResponse::new(500, None));
        }

        if path == VDOM_PATH {
            state.vdoms.push(record.clone());
        } else {
            state
                .objects
                .push((self.vdom.clone(), path.to_string(), record.clone()));
        }
        Ok(ApiResponse::new(200, None))
    }

    fn logout(self) -> Result<(), ApiError> {
        self.state.borrow_mut().logouts += 1;
        Ok(())
    }
}

fn key_field(path: &str) -> &'static str {
    Category::ALL
        .into_iter()
        .find(|c| c.path() == path)
        .map(Category::key_field)
        .unwrap_or(VDOM_KEY_FIELD)
}

pub fn record(value: Value) -> Record {
    Record::try_from(value).expect("object")
}
