//! Sleep/shutdown inhibitor leases from systemd-logind.
//!
//! logind's `Inhibit` call returns a file descriptor; the named power
//! transitions stay blocked for as long as the descriptor is open, and
//! closing it releases the hold.

use zbus::proxy;
use zbus::zvariant::OwnedFd;
use zbus::Connection;

use crate::error::Result;

/// org.freedesktop.login1 Manager, inhibitor subset.
#[proxy(
    default_service = "org.freedesktop.login1",
    default_path = "/org/freedesktop/login1",
    interface = "org.freedesktop.login1.Manager"
)]
trait LoginManager {
    /// Takes an inhibitor lock. The lock is held until the returned file
    /// descriptor is closed.
    fn inhibit(&self, what: &str, who: &str, why: &str, mode: &str) -> zbus::Result<OwnedFd>;
}

/// Grants and revokes sleep-inhibiting holds.
///
/// One lease may be outstanding at a time under the daemon's state machine;
/// the trait itself does not enforce that. Acquire is async (a bus call);
/// release is not (closing a descriptor).
#[allow(async_fn_in_trait)]
pub trait PowerLeaseService {
    type Lease;

    async fn acquire(&mut self, what: &str, who: &str, why: &str, mode: &str)
        -> Result<Self::Lease>;

    fn release(&mut self, lease: Self::Lease) -> Result<()>;
}

/// An active sleep/shutdown-inhibiting hold. Dropping it releases the hold.
#[derive(Debug)]
pub struct InhibitorLease {
    _fd: OwnedFd,
}

/// Lease service backed by systemd-logind on the system bus.
pub struct LogindLeaseService {
    proxy: LoginManagerProxy<'static>,
}

impl LogindLeaseService {
    pub async fn connect() -> Result<Self> {
        let connection = Connection::system().await?;
        let proxy = LoginManagerProxy::new(&connection).await?;
        Ok(Self { proxy })
    }
}

impl PowerLeaseService for LogindLeaseService {
    type Lease = InhibitorLease;

    async fn acquire(
        &mut self,
        what: &str,
        who: &str,
        why: &str,
        mode: &str,
    ) -> Result<InhibitorLease> {
        let fd = self.proxy.inhibit(what, who, why, mode).await?;
        Ok(InhibitorLease { _fd: fd })
    }

    fn release(&mut self, lease: InhibitorLease) -> Result<()> {
        // Closing the descriptor is the release; logind has no separate call.
        drop(lease);
        Ok(())
    }
}
