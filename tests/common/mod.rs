//! Shared helpers for integration tests: a fluent builder for directory
//! documents and a source whose contents tests can swap between loads.

#![allow(dead_code)]

use dirstore::DirectorySource;
use std::io;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

/// Initialize test logging once; later calls are no-ops.
pub fn init_logging() {
    let _ = env_logger::builder().is_test(true).try_init();
}

/// Fluent builder for directory documents.
#[derive(Debug, Clone)]
pub struct DirectoryDoc {
    realm: String,
    records: Vec<RecordDoc>,
}

impl DirectoryDoc {
    pub fn new(realm: &str) -> Self {
        Self {
            realm: realm.to_string(),
            records: Vec::new(),
        }
    }

    pub fn record(mut self, record: RecordDoc) -> Self {
        self.records.push(record);
        self
    }

    pub fn build(&self) -> String {
        let mut xml = format!(r#"<directory realm="{}">"#, self.realm);
        for record in &self.records {
            record.write_to(&mut xml);
        }
        xml.push_str("</directory>");
        xml
    }
}

/// Fluent builder for one record element.
#[derive(Debug, Clone, Default)]
pub struct RecordDoc {
    record_type: Option<String>,
    elements: Vec<(String, String)>,
}

impl RecordDoc {
    /// A record element with no `type` attribute.
    pub fn new() -> Self {
        Self::default()
    }

    /// A record element with an explicit `type` attribute.
    pub fn typed(record_type: &str) -> Self {
        Self {
            record_type: Some(record_type.to_string()),
            ..Self::default()
        }
    }

    pub fn uid(self, value: &str) -> Self {
        self.element("uid", value)
    }

    pub fn guid(self, value: &str) -> Self {
        self.element("guid", value)
    }

    pub fn short_name(self, value: &str) -> Self {
        self.element("short-name", value)
    }

    pub fn full_name(self, value: &str) -> Self {
        self.element("full-name", value)
    }

    pub fn email(self, value: &str) -> Self {
        self.element("email", value)
    }

    pub fn password(self, value: &str) -> Self {
        self.element("password", value)
    }

    pub fn element(mut self, tag: &str, value: &str) -> Self {
        self.elements.push((tag.to_string(), value.to_string()));
        self
    }

    fn write_to(&self, xml: &mut String) {
        match &self.record_type {
            Some(record_type) => xml.push_str(&format!(r#"<record type="{record_type}">"#)),
            None => xml.push_str("<record>"),
        }
        for (tag, value) in &self.elements {
            xml.push_str(&format!("<{tag}>{value}</{tag}>"));
        }
        xml.push_str("</record>");
    }
}

/// A source whose contents can be replaced between loads, counting reads.
#[derive(Debug, Clone)]
pub struct SwappableSource {
    bytes: Arc<Mutex<Vec<u8>>>,
    reads: Arc<AtomicUsize>,
}

impl SwappableSource {
    pub fn new(document: &str) -> Self {
        Self {
            bytes: Arc::new(Mutex::new(document.as_bytes().to_vec())),
            reads: Arc::new(AtomicUsize::new(0)),
        }
    }

    /// Replace the document the next load will see.
    pub fn swap(&self, document: &str) {
        *self.bytes.lock().unwrap() = document.as_bytes().to_vec();
    }

    /// How many times the store has read this source.
    pub fn reads(&self) -> usize {
        self.reads.load(Ordering::SeqCst)
    }
}

impl DirectorySource for SwappableSource {
    fn read(&self) -> io::Result<Vec<u8>> {
        self.reads.fetch_add(1, Ordering::SeqCst);
        Ok(self.bytes.lock().unwrap().clone())
    }
}
