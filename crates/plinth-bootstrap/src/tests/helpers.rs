//! Test helpers: recording collaborators with failure injection, and a
//! harness wiring them into a bootstrap service over a temp state file.

use crate::*;
use async_trait::async_trait;
use plinth_connectors::{
    AddressStore, AdminPrincipal, ConnectorError, IdentityConnector, IdentityDocument, KeyType,
    LoginConnector, MemoryAddressStore, MemoryIdentityRegistry, MemoryLoginStore,
    MemoryProfileStore, MemoryVault, MemoryWallet, ProfileConnector, Result as ConnectorResult,
    VaultConnector, VaultKey, VerificationMethod, VerificationPurpose, WalletAddress,
    WalletConnector,
};
use serde_json::Value;
use std::path::PathBuf;
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use tempfile::TempDir;

/// External-call counters shared by all recording collaborators.
#[derive(Default)]
pub struct CallCounts {
    pub set_secret: AtomicUsize,
    pub remove_secret: AtomicUsize,
    pub get_secret: AtomicUsize,
    pub create_key: AtomicUsize,
    pub get_key: AtomicUsize,
    pub get_addresses: AtomicUsize,
    pub ensure_balance: AtomicUsize,
    pub create_document: AtomicUsize,
    pub add_verification_method: AtomicUsize,
    pub login_set: AtomicUsize,
    pub login_get: AtomicUsize,
    pub profile_create: AtomicUsize,
    pub address_get: AtomicUsize,
    pub address_set: AtomicUsize,
}

impl CallCounts {
    /// Sum of every collaborator call, for whole-run idempotence checks.
    pub fn total(&self) -> usize {
        [
            &self.set_secret,
            &self.remove_secret,
            &self.get_secret,
            &self.create_key,
            &self.get_key,
            &self.get_addresses,
            &self.ensure_balance,
            &self.create_document,
            &self.add_verification_method,
            &self.login_set,
            &self.login_get,
            &self.profile_create,
            &self.address_get,
            &self.address_set,
        ]
        .iter()
        .map(|counter| counter.load(Ordering::SeqCst))
        .sum()
    }
}

/// Switches that make individual collaborator calls fail.
#[derive(Default)]
pub struct FailureInjection {
    pub ensure_balance: AtomicBool,
    pub create_document: AtomicBool,
    /// Fail `set_secret` for any name outside the bootstrap label space,
    /// breaking the promotion write.
    pub permanent_secret_write: AtomicBool,
    pub login_get: AtomicBool,
    pub create_key: AtomicBool,
}

fn injected(what: &str) -> ConnectorError {
    ConnectorError::Store(format!("injected {what} failure"))
}

pub struct RecordingVault {
    inner: MemoryVault,
    counts: Arc<CallCounts>,
    failures: Arc<FailureInjection>,
    /// Names passed to `set_secret`, in call order
    pub set_secret_names: Mutex<Vec<String>>,
    /// `set:`/`remove:` secret operations, in call order
    pub secret_ops: Mutex<Vec<String>>,
    /// Names passed to `create_key`, in call order
    pub created_key_names: Mutex<Vec<String>>,
}

impl RecordingVault {
    fn new(counts: Arc<CallCounts>, failures: Arc<FailureInjection>) -> Self {
        Self {
            inner: MemoryVault::new(),
            counts,
            failures,
            set_secret_names: Mutex::new(Vec::new()),
            secret_ops: Mutex::new(Vec::new()),
            created_key_names: Mutex::new(Vec::new()),
        }
    }

    /// Read a secret without touching the counters.
    pub async fn peek_secret(&self, name: &str) -> Option<String> {
        self.inner.get_secret(name).await.unwrap()
    }

    pub async fn secret_count(&self) -> usize {
        self.inner.secret_count().await
    }
}

#[async_trait]
impl VaultConnector for RecordingVault {
    async fn set_secret(&self, name: &str, value: &str) -> ConnectorResult<()> {
        self.counts.set_secret.fetch_add(1, Ordering::SeqCst);
        self.set_secret_names.lock().unwrap().push(name.to_string());
        self.secret_ops.lock().unwrap().push(format!("set:{name}"));
        if self.failures.permanent_secret_write.load(Ordering::SeqCst)
            && !name.starts_with("bootstrap-")
        {
            return Err(injected("permanent secret write"));
        }
        self.inner.set_secret(name, value).await
    }

    async fn remove_secret(&self, name: &str) -> ConnectorResult<()> {
        self.counts.remove_secret.fetch_add(1, Ordering::SeqCst);
        self.secret_ops.lock().unwrap().push(format!("remove:{name}"));
        self.inner.remove_secret(name).await
    }

    async fn get_secret(&self, name: &str) -> ConnectorResult<Option<String>> {
        self.counts.get_secret.fetch_add(1, Ordering::SeqCst);
        self.inner.get_secret(name).await
    }

    async fn create_key(&self, name: &str, key_type: KeyType) -> ConnectorResult<VaultKey> {
        self.counts.create_key.fetch_add(1, Ordering::SeqCst);
        self.created_key_names.lock().unwrap().push(name.to_string());
        if self.failures.create_key.load(Ordering::SeqCst) {
            return Err(injected("create_key"));
        }
        self.inner.create_key(name, key_type).await
    }

    async fn get_key(&self, name: &str) -> ConnectorResult<Option<VaultKey>> {
        self.counts.get_key.fetch_add(1, Ordering::SeqCst);
        self.inner.get_key(name).await
    }
}

/// Arguments of one `ensure_balance` call.
pub struct FundingCall {
    pub owner: String,
    pub address: String,
    pub minimum: u64,
}

pub struct RecordingWallet {
    inner: MemoryWallet<RecordingVault>,
    counts: Arc<CallCounts>,
    failures: Arc<FailureInjection>,
    pub funding_calls: Mutex<Vec<FundingCall>>,
}

#[async_trait]
impl WalletConnector for RecordingWallet {
    async fn get_addresses(
        &self,
        owner: &str,
        account: u32,
        start_index: u32,
        count: u32,
    ) -> ConnectorResult<Vec<String>> {
        self.counts.get_addresses.fetch_add(1, Ordering::SeqCst);
        self.inner.get_addresses(owner, account, start_index, count).await
    }

    async fn ensure_balance(&self, owner: &str, address: &str, minimum: u64) -> ConnectorResult<()> {
        self.counts.ensure_balance.fetch_add(1, Ordering::SeqCst);
        self.funding_calls.lock().unwrap().push(FundingCall {
            owner: owner.to_string(),
            address: address.to_string(),
            minimum,
        });
        if self.failures.ensure_balance.load(Ordering::SeqCst) {
            return Err(ConnectorError::FundingFailed(
                "injected faucet failure".to_string(),
            ));
        }
        self.inner.ensure_balance(owner, address, minimum).await
    }
}

pub struct RecordingRegistry {
    inner: MemoryIdentityRegistry,
    counts: Arc<CallCounts>,
    failures: Arc<FailureInjection>,
}

impl RecordingRegistry {
    pub async fn document(&self, identity: &str) -> Option<IdentityDocument> {
        self.inner.document(identity).await
    }

    pub async fn document_count(&self) -> usize {
        self.inner.document_count().await
    }
}

#[async_trait]
impl IdentityConnector for RecordingRegistry {
    async fn create_document(&self, controller: &str) -> ConnectorResult<IdentityDocument> {
        self.counts.create_document.fetch_add(1, Ordering::SeqCst);
        if self.failures.create_document.load(Ordering::SeqCst) {
            return Err(injected("create_document"));
        }
        self.inner.create_document(controller).await
    }

    async fn add_verification_method(
        &self,
        identity: &str,
        controller: &str,
        purpose: VerificationPurpose,
        method_id: &str,
    ) -> ConnectorResult<VerificationMethod> {
        self.counts.add_verification_method.fetch_add(1, Ordering::SeqCst);
        self.inner
            .add_verification_method(identity, controller, purpose, method_id)
            .await
    }
}

pub struct RecordingLogins {
    inner: MemoryLoginStore,
    counts: Arc<CallCounts>,
    failures: Arc<FailureInjection>,
}

impl RecordingLogins {
    /// Read a principal without touching the counters.
    pub async fn peek(&self, username: &str) -> Option<AdminPrincipal> {
        self.inner.get(username).await.unwrap()
    }
}

#[async_trait]
impl LoginConnector for RecordingLogins {
    async fn set(&self, principal: AdminPrincipal) -> ConnectorResult<()> {
        self.counts.login_set.fetch_add(1, Ordering::SeqCst);
        self.inner.set(principal).await
    }

    async fn get(&self, username: &str) -> ConnectorResult<Option<AdminPrincipal>> {
        self.counts.login_get.fetch_add(1, Ordering::SeqCst);
        if self.failures.login_get.load(Ordering::SeqCst) {
            return Err(injected("login lookup"));
        }
        self.inner.get(username).await
    }
}

pub struct RecordingProfiles {
    inner: MemoryProfileStore,
    counts: Arc<CallCounts>,
}

impl RecordingProfiles {
    pub async fn profile(&self, identity: &str) -> Option<(Value, Value)> {
        self.inner.profile(identity).await
    }
}

#[async_trait]
impl ProfileConnector for RecordingProfiles {
    async fn create(&self, identity: &str, public: Value, private: Value) -> ConnectorResult<()> {
        self.counts.profile_create.fetch_add(1, Ordering::SeqCst);
        self.inner.create(identity, public, private).await
    }
}

pub struct RecordingAddressStore {
    inner: Arc<MemoryAddressStore>,
    counts: Arc<CallCounts>,
}

impl RecordingAddressStore {
    /// Read an address record without touching the counters.
    pub async fn peek(&self, address: &str) -> Option<WalletAddress> {
        self.inner.get(address).await.unwrap()
    }
}

#[async_trait]
impl AddressStore for RecordingAddressStore {
    async fn get(&self, address: &str) -> ConnectorResult<Option<WalletAddress>> {
        self.counts.address_get.fetch_add(1, Ordering::SeqCst);
        self.inner.get(address).await
    }

    async fn set(&self, record: WalletAddress) -> ConnectorResult<()> {
        self.counts.address_set.fetch_add(1, Ordering::SeqCst);
        self.inner.set(record).await
    }
}

/// Recording collaborator suite plus a temp directory for the state file.
pub struct TestHarness {
    pub counts: Arc<CallCounts>,
    pub failures: Arc<FailureInjection>,
    pub vault: Arc<RecordingVault>,
    pub wallet: Arc<RecordingWallet>,
    pub registry: Arc<RecordingRegistry>,
    pub logins: Arc<RecordingLogins>,
    pub profiles: Arc<RecordingProfiles>,
    pub addresses: Arc<RecordingAddressStore>,
    state_dir: TempDir,
}

impl TestHarness {
    pub fn new() -> Self {
        let counts = Arc::new(CallCounts::default());
        let failures = Arc::new(FailureInjection::default());

        let vault = Arc::new(RecordingVault::new(
            Arc::clone(&counts),
            Arc::clone(&failures),
        ));
        let shared_addresses = Arc::new(MemoryAddressStore::new());
        let wallet = Arc::new(RecordingWallet {
            inner: MemoryWallet::new(Arc::clone(&vault), Arc::clone(&shared_addresses)),
            counts: Arc::clone(&counts),
            failures: Arc::clone(&failures),
            funding_calls: Mutex::new(Vec::new()),
        });
        let registry = Arc::new(RecordingRegistry {
            inner: MemoryIdentityRegistry::new(),
            counts: Arc::clone(&counts),
            failures: Arc::clone(&failures),
        });
        let logins = Arc::new(RecordingLogins {
            inner: MemoryLoginStore::new(),
            counts: Arc::clone(&counts),
            failures: Arc::clone(&failures),
        });
        let profiles = Arc::new(RecordingProfiles {
            inner: MemoryProfileStore::new(),
            counts: Arc::clone(&counts),
        });
        let addresses = Arc::new(RecordingAddressStore {
            inner: shared_addresses,
            counts: Arc::clone(&counts),
        });

        Self {
            counts,
            failures,
            vault,
            wallet,
            registry,
            logins,
            profiles,
            addresses,
            state_dir: TempDir::new().unwrap(),
        }
    }

    pub fn state_path(&self) -> PathBuf {
        self.state_dir.path().join("node-state.json")
    }

    pub fn state_store(&self) -> NodeStateStore {
        NodeStateStore::new(self.state_path())
    }

    /// Build a service over this harness's collaborators and state path.
    pub fn service(
        &self,
        config: BootstrapConfig,
    ) -> BootstrapService<RecordingVault, RecordingWallet, RecordingRegistry, RecordingLogins> {
        BootstrapService::new(
            Arc::clone(&self.vault),
            Arc::clone(&self.wallet),
            Arc::clone(&self.registry),
            Arc::clone(&self.logins),
            self.state_store(),
            config,
        )
        .unwrap()
        .with_profiles(self.profiles.clone())
        .with_address_store(self.addresses.clone())
    }
}

/// Config with every optional step enabled.
pub fn full_config() -> BootstrapConfig {
    BootstrapConfig {
        enable_blob_encryption: true,
        enable_integrity_encryption: true,
        ..Default::default()
    }
}
