/*! Integration tests for Notelock.
 *
 * This test suite is organized as a single integration test binary
 * following the pattern described by matklad in
 * https://matklad.github.io/2021/02/27/delete-cargo-integration-tests.html
 *
 * The module structure mirrors the main library structure:
 * - crypto: Tests for key derivation, the content cipher and password verification
 * - note: Tests for the lock state machine through its public API
 * - store: Tests for the NoteStore trait, run against every implementation
 * - service: Tests for the message API, including concurrency
 */

use tracing_subscriber::EnvFilter;

#[ctor::ctor]
fn init_test_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::from_default_env().add_directive("notelock=info".parse().unwrap()),
        )
        .with_test_writer()
        .try_init();
}

mod crypto;
mod helpers;
mod service;
mod store;
