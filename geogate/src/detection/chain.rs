//! Ordered strategy chain with per-attempt timeouts.

use std::fmt;
use std::sync::Arc;
use std::time::Duration;

use tracing::{debug, warn};

use crate::provider::{
    is_local_address, DetectionProvider, LocalNetworkHeuristic, ProviderError,
};
use crate::region::{classify, CapabilityDescriptor};

/// Default time budget for one network attempt.
pub const DEFAULT_ATTEMPT_TIMEOUT: Duration = Duration::from_millis(5000);

/// Which step of the chain produced a detection.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DetectionSource {
    /// Local address; no network strategy was consulted.
    LocalShortcut,
    /// A network strategy answered.
    Provider(String),
    /// Every network strategy failed; the heuristic decided.
    Fallback,
}

impl fmt::Display for DetectionSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DetectionSource::LocalShortcut => write!(f, "local shortcut"),
            DetectionSource::Provider(name) => write!(f, "provider {}", name),
            DetectionSource::Fallback => write!(f, "fallback heuristic"),
        }
    }
}

/// Result of one chain run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Detection {
    pub descriptor: CapabilityDescriptor,
    pub source: DetectionSource,
}

/// Walks the detection strategies in order and commits to the first answer.
///
/// The chain never fails: local addresses short-circuit to the
/// [`LocalNetworkHeuristic`], and if every network strategy fails the same
/// heuristic decides. Attempts run strictly one after another with no delay
/// and no retry.
pub struct DetectionChain {
    providers: Vec<Arc<dyn DetectionProvider>>,
    heuristic: LocalNetworkHeuristic,
}

impl DetectionChain {
    /// Creates a chain over `providers`, consulted in the given order.
    pub fn new(providers: Vec<Arc<dyn DetectionProvider>>) -> Self {
        Self {
            providers,
            heuristic: LocalNetworkHeuristic,
        }
    }

    /// Names of the network strategies, in chain order.
    pub fn provider_names(&self) -> Vec<&str> {
        self.providers.iter().map(|p| p.name()).collect()
    }

    /// Upper bound on the time one run can take with `timeout` per attempt.
    pub fn worst_case_latency(&self, timeout: Duration) -> Duration {
        timeout * self.providers.len() as u32
    }

    /// Resolves `ip` to a descriptor.
    pub async fn resolve(&self, ip: &str, timeout: Duration) -> CapabilityDescriptor {
        self.detect(ip, timeout).await.descriptor
    }

    /// Resolves `ip`, also reporting which step decided.
    pub async fn detect(&self, ip: &str, timeout: Duration) -> Detection {
        let ip = ip.trim();

        if is_local_address(ip) {
            let country = self.heuristic.country_for(ip);
            debug!(ip, country, "Local address, skipping network lookups");
            return Detection {
                descriptor: classify(country),
                source: DetectionSource::LocalShortcut,
            };
        }

        for provider in &self.providers {
            match Self::attempt(provider.as_ref(), ip, timeout).await {
                Ok(country) => {
                    debug!(
                        provider = provider.name(),
                        ip,
                        country = %country,
                        "Country detected"
                    );
                    return Detection {
                        descriptor: classify(&country),
                        source: DetectionSource::Provider(provider.name().to_string()),
                    };
                }
                Err(error) => {
                    warn!(
                        provider = provider.name(),
                        ip,
                        error = %error,
                        "Detection provider failed"
                    );
                }
            }
        }

        let country = self.heuristic.country_for(ip);
        warn!(
            ip,
            country,
            attempts = self.providers.len(),
            "All detection providers failed, using fallback"
        );
        Detection {
            descriptor: classify(country),
            source: DetectionSource::Fallback,
        }
    }

    /// Runs one provider under the attempt timeout.
    async fn attempt(
        provider: &dyn DetectionProvider,
        ip: &str,
        timeout: Duration,
    ) -> Result<String, ProviderError> {
        match tokio::time::timeout(timeout, provider.lookup(ip, timeout)).await {
            Ok(result) => result,
            Err(_) => Err(ProviderError::Timeout(timeout)),
        }
    }
}

impl fmt::Debug for DetectionChain {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("DetectionChain")
            .field("providers", &self.provider_names())
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::provider::{BoxFuture, IpApiProvider, MockAsyncHttpClient};
    use crate::region::Region;
    use std::sync::atomic::{AtomicUsize, Ordering};

    /// Provider with a fixed answer that counts how often it is asked.
    struct FixedProvider {
        name: &'static str,
        answer: Result<String, ProviderError>,
        delay: Option<Duration>,
        calls: AtomicUsize,
    }

    impl FixedProvider {
        fn ok(name: &'static str, country: &str) -> Arc<Self> {
            Arc::new(Self {
                name,
                answer: Ok(country.to_string()),
                delay: None,
                calls: AtomicUsize::new(0),
            })
        }

        fn failing(name: &'static str) -> Arc<Self> {
            Arc::new(Self {
                name,
                answer: Err(ProviderError::HttpError("connection reset".to_string())),
                delay: None,
                calls: AtomicUsize::new(0),
            })
        }

        fn hanging(name: &'static str) -> Arc<Self> {
            Arc::new(Self {
                name,
                answer: Ok("US".to_string()),
                delay: Some(Duration::from_secs(3600)),
                calls: AtomicUsize::new(0),
            })
        }

        fn calls(&self) -> usize {
            self.calls.load(Ordering::SeqCst)
        }
    }

    impl DetectionProvider for FixedProvider {
        fn name(&self) -> &str {
            self.name
        }

        fn lookup<'a>(
            &'a self,
            _ip: &'a str,
            _timeout: Duration,
        ) -> BoxFuture<'a, Result<String, ProviderError>> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            Box::pin(async move {
                if let Some(delay) = self.delay {
                    tokio::time::sleep(delay).await;
                }
                self.answer.clone()
            })
        }
    }

    fn chain_of(providers: &[&Arc<FixedProvider>]) -> DetectionChain {
        DetectionChain::new(
            providers
                .iter()
                .map(|p| Arc::clone(*p) as Arc<dyn DetectionProvider>)
                .collect(),
        )
    }

    #[tokio::test]
    async fn test_first_success_wins() {
        let first = FixedProvider::ok("first", "DE");
        let second = FixedProvider::ok("second", "US");
        let chain = chain_of(&[&first, &second]);

        let detection = chain.detect("203.0.113.5", DEFAULT_ATTEMPT_TIMEOUT).await;

        assert_eq!(detection.descriptor.region(), Region::Europe);
        assert_eq!(detection.source, DetectionSource::Provider("first".to_string()));
        assert_eq!(second.calls(), 0);
    }

    #[tokio::test]
    async fn test_failure_advances_to_next() {
        let first = FixedProvider::failing("first");
        let second = FixedProvider::ok("second", "SG");
        let third = FixedProvider::ok("third", "US");
        let chain = chain_of(&[&first, &second, &third]);

        let detection = chain.detect("8.8.8.8", DEFAULT_ATTEMPT_TIMEOUT).await;

        assert_eq!(detection.descriptor.region(), Region::Singapore);
        assert_eq!(first.calls(), 1);
        assert_eq!(second.calls(), 1);
        assert_eq!(third.calls(), 0);
    }

    #[tokio::test]
    async fn test_local_address_skips_network() {
        let first = FixedProvider::ok("first", "US");
        let chain = chain_of(&[&first]);

        let detection = chain.detect("192.168.1.10", DEFAULT_ATTEMPT_TIMEOUT).await;

        assert_eq!(detection.source, DetectionSource::LocalShortcut);
        assert_eq!(detection.descriptor, classify("CN"));
        assert_eq!(first.calls(), 0);
    }

    #[tokio::test]
    async fn test_all_failures_fall_back_to_public_default() {
        let first = FixedProvider::failing("first");
        let second = FixedProvider::failing("second");
        let chain = chain_of(&[&first, &second]);

        let detection = chain.detect("8.8.8.8", DEFAULT_ATTEMPT_TIMEOUT).await;

        assert_eq!(detection.source, DetectionSource::Fallback);
        assert_eq!(detection.descriptor.region(), Region::Usa);
        assert_ne!(detection.descriptor.region(), Region::China);
    }

    #[tokio::test(start_paused = true)]
    async fn test_hanging_provider_is_timed_out() {
        let slow = FixedProvider::hanging("slow");
        let next = FixedProvider::ok("next", "IN");
        let chain = chain_of(&[&slow, &next]);
        let timeout = Duration::from_millis(200);

        let started = tokio::time::Instant::now();
        let detection = chain.detect("8.8.8.8", timeout).await;

        assert_eq!(detection.descriptor.region(), Region::India);
        assert!(started.elapsed() >= timeout);
        assert!(started.elapsed() < timeout * 2);
    }

    #[tokio::test]
    async fn test_empty_chain_uses_fallback() {
        let chain = DetectionChain::new(Vec::new());
        let descriptor = chain.resolve("8.8.8.8", DEFAULT_ATTEMPT_TIMEOUT).await;
        assert_eq!(descriptor.region(), Region::Usa);
    }

    #[tokio::test]
    async fn test_vendor_error_is_contained() {
        let client = MockAsyncHttpClient::json(r#"{"error":true,"reason":"Reserved IP Address"}"#);
        let provider: Arc<dyn DetectionProvider> = Arc::new(IpApiProvider::new(client));
        let backup = FixedProvider::ok("backup", "DE");
        let chain =
            DetectionChain::new(vec![provider, backup.clone() as Arc<dyn DetectionProvider>]);

        let descriptor = chain.resolve("203.0.113.5", DEFAULT_ATTEMPT_TIMEOUT).await;

        assert_eq!(descriptor.region(), Region::Europe);
        assert_eq!(backup.calls(), 1);
    }

    #[test]
    fn test_worst_case_latency() {
        let chain = chain_of(&[
            &FixedProvider::failing("a"),
            &FixedProvider::failing("b"),
            &FixedProvider::failing("c"),
        ]);
        assert_eq!(
            chain.worst_case_latency(Duration::from_millis(5000)),
            Duration::from_millis(15000)
        );
    }
}
