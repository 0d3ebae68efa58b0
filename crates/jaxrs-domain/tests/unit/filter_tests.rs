//! Tests for client request filter ordering and abort handling

use std::collections::HashMap;
use std::io;
use std::sync::{Arc, Mutex};

use jaxrs_domain::Status;
use jaxrs_domain::constants::{PRIORITY_AUTHENTICATION, PRIORITY_HEADER_DECORATOR};
use jaxrs_domain::ports::{ClientRequestContext, ClientRequestFilter, FilterChain, FilterOutcome};
use url::Url;

struct TestRequest {
    method: String,
    uri: Url,
    headers: HashMap<String, String>,
    properties: HashMap<String, String>,
    aborted: Option<Status>,
}

impl TestRequest {
    fn get(uri: &str) -> Self {
        Self {
            method: "GET".to_string(),
            uri: Url::parse(uri).expect("valid test url"),
            headers: HashMap::new(),
            properties: HashMap::new(),
            aborted: None,
        }
    }
}

impl ClientRequestContext for TestRequest {
    fn method(&self) -> &str {
        &self.method
    }

    fn uri(&self) -> &Url {
        &self.uri
    }

    fn set_uri(&mut self, uri: Url) {
        self.uri = uri;
    }

    fn header(&self, name: &str) -> Option<&str> {
        self.headers.get(&name.to_ascii_lowercase()).map(String::as_str)
    }

    fn set_header(&mut self, name: &str, value: String) {
        self.headers.insert(name.to_ascii_lowercase(), value);
    }

    fn property(&self, name: &str) -> Option<&str> {
        self.properties.get(name).map(String::as_str)
    }

    fn set_property(&mut self, name: &str, value: String) {
        self.properties.insert(name.to_string(), value);
    }

    fn abort_with(&mut self, status: Status) {
        self.aborted = Some(status);
    }

    fn aborted(&self) -> Option<Status> {
        self.aborted
    }
}

struct Recording {
    name: &'static str,
    priority: i32,
    log: Arc<Mutex<Vec<&'static str>>>,
}

impl ClientRequestFilter for Recording {
    fn filter(&self, ctx: &mut dyn ClientRequestContext) -> io::Result<()> {
        self.log.lock().expect("log lock").push(self.name);
        ctx.set_header("x-last-filter", self.name.to_string());
        Ok(())
    }

    fn priority(&self) -> i32 {
        self.priority
    }
}

struct Deny;

impl ClientRequestFilter for Deny {
    fn filter(&self, ctx: &mut dyn ClientRequestContext) -> io::Result<()> {
        if ctx.header("authorization").is_none() {
            ctx.abort_with(Status::UNAUTHORIZED);
        }
        Ok(())
    }

    fn priority(&self) -> i32 {
        PRIORITY_AUTHENTICATION
    }
}

struct Broken;

impl ClientRequestFilter for Broken {
    fn filter(&self, _ctx: &mut dyn ClientRequestContext) -> io::Result<()> {
        Err(io::Error::other("filter failed"))
    }
}

#[test]
fn test_filters_run_in_priority_order() {
    let log = Arc::new(Mutex::new(Vec::new()));
    let mut chain = FilterChain::new();
    chain.register(Arc::new(Recording {
        name: "user",
        priority: 5000,
        log: log.clone(),
    }));
    chain.register(Arc::new(Recording {
        name: "header",
        priority: PRIORITY_HEADER_DECORATOR,
        log: log.clone(),
    }));
    chain.register(Arc::new(Recording {
        name: "user-second",
        priority: 5000,
        log: log.clone(),
    }));

    let mut request = TestRequest::get("https://example.org/items");
    let outcome = chain.apply(&mut request).expect("chain should succeed");

    assert_eq!(outcome, FilterOutcome::Proceed);
    assert_eq!(*log.lock().expect("log lock"), vec!["header", "user", "user-second"]);
    assert_eq!(request.header("X-Last-Filter"), Some("user-second"));
}

#[test]
fn test_abort_stops_the_chain() {
    let log = Arc::new(Mutex::new(Vec::new()));
    let mut chain = FilterChain::new();
    chain.register(Arc::new(Recording {
        name: "user",
        priority: 5000,
        log: log.clone(),
    }));
    chain.register(Arc::new(Deny));

    let mut request = TestRequest::get("https://example.org/private");
    let outcome = chain.apply(&mut request).expect("abort is not an error");

    assert_eq!(outcome, FilterOutcome::Aborted(Status::UNAUTHORIZED));
    assert!(log.lock().expect("log lock").is_empty());
}

#[test]
fn test_filter_error_propagates() {
    let mut chain = FilterChain::new();
    chain.register(Arc::new(Broken));
    assert_eq!(chain.len(), 1);

    let mut request = TestRequest::get("https://example.org/");
    let err = chain.apply(&mut request).expect_err("broken filter should fail");
    assert_eq!(err.to_string(), "filter failed");
    assert_eq!(request.method(), "GET");
}
