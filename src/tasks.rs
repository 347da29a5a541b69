//! Async offload for envelope operations
//!
//! Key derivation is deliberately slow, so async callers should not run it on
//! a runtime worker. These helpers move each operation onto tokio's blocking
//! pool. A deadline only stops the caller from waiting; the blocking work
//! still runs to completion and its result is discarded.

use std::future::Future;
use std::time::Duration;

use tracing::debug;
use zeroize::Zeroizing;

use crate::crypto::{import_verification_key, CertificateKeyHandle, CryptoProvider, EnvelopeCipher};
use crate::error::{EnvelopeError, EnvelopeResult};

async fn run_blocking<T, F>(operation: F) -> EnvelopeResult<T>
where
    F: FnOnce() -> EnvelopeResult<T> + Send + 'static,
    T: Send + 'static,
{
    tokio::task::spawn_blocking(operation)
        .await
        .map_err(|_| EnvelopeError::OperationAborted)?
}

/// Wait for `operation` at most `deadline`
///
/// Expiry yields [`EnvelopeError::OperationAborted`] and no partial result.
pub async fn with_deadline<T, F>(deadline: Duration, operation: F) -> EnvelopeResult<T>
where
    F: Future<Output = EnvelopeResult<T>>,
{
    match tokio::time::timeout(deadline, operation).await {
        Ok(result) => result,
        Err(_) => {
            debug!(deadline_ms = deadline.as_millis() as u64, "operation deadline elapsed");
            Err(EnvelopeError::OperationAborted)
        }
    }
}

impl<P: CryptoProvider + Clone + 'static> EnvelopeCipher<P> {
    /// [`encrypt`](EnvelopeCipher::encrypt) on the blocking pool
    pub async fn encrypt_async(
        &self,
        text: String,
        passphrase: Zeroizing<String>,
    ) -> EnvelopeResult<String> {
        let cipher = self.clone();
        run_blocking(move || cipher.encrypt(&text, &passphrase)).await
    }

    /// [`decrypt`](EnvelopeCipher::decrypt) on the blocking pool
    pub async fn decrypt_async(
        &self,
        blob: String,
        passphrase: Zeroizing<String>,
    ) -> EnvelopeResult<String> {
        let cipher = self.clone();
        run_blocking(move || cipher.decrypt(&blob, &passphrase)).await
    }
}

/// [`import_verification_key`] on the blocking pool
pub async fn import_verification_key_async(pem: String) -> EnvelopeResult<CertificateKeyHandle> {
    run_blocking(move || import_verification_key(&pem)).await
}
