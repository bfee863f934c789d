//! Shared fakes for export pipeline tests

#![allow(dead_code)]

use async_trait::async_trait;
use gw_rdb::adapters::notify::NotificationTransport;
use gw_rdb::adapters::regions::ConfiguredRegionResolver;
use gw_rdb::adapters::source::{GroundwaterSource, ParameterSource};
use gw_rdb::config::{RegionGroupConfig, RegionsConfig};
use gw_rdb::core::export::{ArtifactHandle, ArtifactStore, ExportOrchestrator};
use gw_rdb::core::notify::Notifier;
use gw_rdb::core::rdb::{FormatterFactory, RdbFormatter, RowSink};
use gw_rdb::domain::{Parameter, ParameterSet, RdbError, RegionCode, Result};
use std::collections::{HashMap, HashSet};
use std::io::Write;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

pub const TIMESTAMP: &str = "20250102_030405";
pub const CHANNEL: &str = "arn:aws:sns:us-west-2:000000000000:aqts-capture-etl-rdb-TEST-topic";

/// Storage key the fake artifact store hands out for `suffix`
pub fn key_for(suffix: &str) -> String {
    format!("tstest.{suffix}.gw_lev_01.06.{TIMESTAMP}.full.rdb.gz")
}

/// Region group whose only region is its own id
pub fn group(id: &str, suffix: &str) -> RegionGroupConfig {
    group_with_regions(id, &[id], suffix)
}

/// Region group spanning several regions
pub fn group_with_regions(id: &str, regions: &[&str], suffix: &str) -> RegionGroupConfig {
    RegionGroupConfig {
        id: id.to_string(),
        regions: regions.iter().map(|r| r.to_string()).collect(),
        suffix: suffix.to_string(),
    }
}

pub fn resolver(groups: Vec<RegionGroupConfig>) -> ConfiguredRegionResolver {
    ConfiguredRegionResolver::from_config(&RegionsConfig { groups }).unwrap()
}

/// Source serving canned rows per region
#[derive(Default)]
pub struct FakeSource {
    rows: HashMap<String, Vec<String>>,
    failing: HashSet<String>,
    calls: AtomicUsize,
}

impl FakeSource {
    pub fn new() -> Self {
        Self::default()
    }

    /// Serves `count` rows for `region`
    pub fn with_rows(mut self, region: &str, count: usize) -> Self {
        let rows = (1..=count)
            .map(|i| format!("USGS\t{region}-{i:03}\t2024-06-{i:02}\t12.5"))
            .collect();
        self.rows.insert(region.to_string(), rows);
        self
    }

    /// Fails the stream when `region` is requested
    pub fn failing_for(mut self, region: &str) -> Self {
        self.failing.insert(region.to_string());
        self
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl GroundwaterSource for FakeSource {
    async fn stream(
        &self,
        regions: &[RegionCode],
        _parameters: &ParameterSet,
        sink: &mut dyn RowSink,
    ) -> Result<()> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        for region in regions {
            if self.failing.contains(region.as_str()) {
                return Err(RdbError::Database("connection reset by peer".to_string()));
            }
            if let Some(rows) = self.rows.get(region.as_str()) {
                for row in rows {
                    sink.write_row(row)?;
                }
            }
        }
        Ok(())
    }
}

/// Parameter source returning a fixed set, or failing
pub struct FakeParameters {
    fail: bool,
}

impl FakeParameters {
    pub fn ok() -> Self {
        Self { fail: false }
    }

    pub fn failing() -> Self {
        Self { fail: true }
    }
}

#[async_trait]
impl ParameterSource for FakeParameters {
    async fn get_parameters(&self) -> Result<ParameterSet> {
        if self.fail {
            return Err(RdbError::Database("parameter lookup timed out".to_string()));
        }
        Ok(ParameterSet::new(vec![
            Parameter::new("72019", true, false),
            Parameter::new("62610", false, true),
        ]))
    }
}

/// Counters and published content shared by a fake store and its handles
#[derive(Default)]
pub struct ArtifactLedger {
    pub opens: AtomicUsize,
    pub commits: AtomicUsize,
    pub releases: AtomicUsize,
    pub published: Mutex<Vec<(String, String)>>,
}

impl ArtifactLedger {
    pub fn opens(&self) -> usize {
        self.opens.load(Ordering::SeqCst)
    }

    pub fn commits(&self) -> usize {
        self.commits.load(Ordering::SeqCst)
    }

    pub fn releases(&self) -> usize {
        self.releases.load(Ordering::SeqCst)
    }

    pub fn published(&self) -> Vec<(String, String)> {
        self.published.lock().unwrap().clone()
    }
}

/// In-memory artifact store
pub struct FakeArtifactStore {
    ledger: Arc<ArtifactLedger>,
    fail_commit: bool,
    fail_open: bool,
}

impl FakeArtifactStore {
    pub fn new(ledger: Arc<ArtifactLedger>) -> Self {
        Self {
            ledger,
            fail_commit: false,
            fail_open: false,
        }
    }

    pub fn failing_commit(mut self) -> Self {
        self.fail_commit = true;
        self
    }

    pub fn failing_open(mut self) -> Self {
        self.fail_open = true;
        self
    }
}

impl ArtifactStore for FakeArtifactStore {
    fn storage_key(&self, suffix: &str) -> String {
        key_for(suffix)
    }

    fn open(&self, storage_key: &str) -> Result<Box<dyn ArtifactHandle>> {
        if self.fail_open {
            return Err(RdbError::Staging("disk full".to_string()));
        }
        self.ledger.opens.fetch_add(1, Ordering::SeqCst);
        Ok(Box::new(FakeHandle {
            key: storage_key.to_string(),
            buffer: Vec::new(),
            ledger: Arc::clone(&self.ledger),
            fail_commit: self.fail_commit,
        }))
    }
}

struct FakeHandle {
    key: String,
    buffer: Vec<u8>,
    ledger: Arc<ArtifactLedger>,
    fail_commit: bool,
}

#[async_trait]
impl ArtifactHandle for FakeHandle {
    fn storage_key(&self) -> &str {
        &self.key
    }

    fn writer(&mut self) -> Result<&mut (dyn Write + Send)> {
        Ok(&mut self.buffer)
    }

    async fn commit(&mut self) -> Result<()> {
        self.ledger.commits.fetch_add(1, Ordering::SeqCst);
        if self.fail_commit {
            return Err(RdbError::Storage("bucket unavailable".to_string()));
        }
        let content = String::from_utf8_lossy(&self.buffer).to_string();
        self.ledger
            .published
            .lock()
            .unwrap()
            .push((self.key.clone(), content));
        Ok(())
    }

    // Counts every call so double releases show up in the ledger
    fn release(&mut self) {
        self.ledger.releases.fetch_add(1, Ordering::SeqCst);
    }
}

/// Transport recording every published message
#[derive(Default)]
pub struct RecordingTransport {
    messages: Mutex<Vec<String>>,
}

impl RecordingTransport {
    pub fn messages(&self) -> Vec<String> {
        self.messages.lock().unwrap().clone()
    }
}

#[async_trait]
impl NotificationTransport for RecordingTransport {
    async fn resolve_channel(&self, _channel_name: &str) -> Result<Option<String>> {
        Ok(Some(CHANNEL.to_string()))
    }

    async fn publish(&self, channel: &str, message: &str) -> Result<()> {
        assert_eq!(channel, CHANNEL);
        self.messages.lock().unwrap().push(message.to_string());
        Ok(())
    }
}

/// Formatter whose header write always fails
pub struct BrokenHeaderFactory;

struct BrokenHeaderFormatter {
    rows: u64,
}

impl RowSink for BrokenHeaderFormatter {
    fn write_row(&mut self, _row: &str) -> Result<()> {
        self.rows += 1;
        Ok(())
    }
}

impl RdbFormatter for BrokenHeaderFormatter {
    fn write_header(&mut self) -> Result<()> {
        Err(RdbError::Format("header rejected".to_string()))
    }

    fn data_row_count(&self) -> u64 {
        self.rows
    }

    fn header_row_count(&self) -> u64 {
        0
    }

    fn as_row_sink(&mut self) -> &mut dyn RowSink {
        self
    }
}

impl FormatterFactory for BrokenHeaderFactory {
    fn create<'a>(&self, _destination: &'a mut (dyn Write + Send)) -> Box<dyn RdbFormatter + 'a> {
        Box::new(BrokenHeaderFormatter { rows: 0 })
    }
}

/// Formatter that accepts `after` rows, then rejects the next one
pub struct FailingRowFactory {
    pub after: u64,
}

struct FailingRowFormatter {
    after: u64,
    rows: u64,
}

impl RowSink for FailingRowFormatter {
    fn write_row(&mut self, _row: &str) -> Result<()> {
        if self.rows >= self.after {
            return Err(RdbError::Format("row rejected".to_string()));
        }
        self.rows += 1;
        Ok(())
    }
}

impl RdbFormatter for FailingRowFormatter {
    fn write_header(&mut self) -> Result<()> {
        Ok(())
    }

    fn data_row_count(&self) -> u64 {
        self.rows
    }

    fn header_row_count(&self) -> u64 {
        4
    }

    fn as_row_sink(&mut self) -> &mut dyn RowSink {
        self
    }
}

impl FormatterFactory for FailingRowFactory {
    fn create<'a>(&self, _destination: &'a mut (dyn Write + Send)) -> Box<dyn RdbFormatter + 'a> {
        Box::new(FailingRowFormatter {
            after: self.after,
            rows: 0,
        })
    }
}

/// Orchestrator wired to fakes, with handles on what they observed
pub struct Harness {
    pub orchestrator: ExportOrchestrator,
    pub ledger: Arc<ArtifactLedger>,
    pub transport: Arc<RecordingTransport>,
    pub source: Arc<FakeSource>,
}

impl Harness {
    pub async fn new(groups: Vec<RegionGroupConfig>, source: FakeSource) -> Self {
        let ledger = Arc::new(ArtifactLedger::default());
        let store = FakeArtifactStore::new(Arc::clone(&ledger));
        Self::with_parts(groups, source, FakeParameters::ok(), store, ledger).await
    }

    pub async fn with_parts(
        groups: Vec<RegionGroupConfig>,
        source: FakeSource,
        parameters: FakeParameters,
        store: FakeArtifactStore,
        ledger: Arc<ArtifactLedger>,
    ) -> Self {
        let transport = Arc::new(RecordingTransport::default());
        let notifier = Notifier::connect(
            transport.clone(),
            "aqts-capture-etl-rdb-TEST-topic",
        )
        .await;
        let source = Arc::new(source);

        let orchestrator = ExportOrchestrator::new(
            Arc::new(resolver(groups)),
            Arc::new(store),
            source.clone(),
            Arc::new(parameters),
            Arc::new(notifier),
        );

        Self {
            orchestrator,
            ledger,
            transport,
            source,
        }
    }

    pub fn messages(&self) -> Vec<String> {
        self.transport.messages()
    }
}
