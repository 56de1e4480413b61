//! Router redirect port.

/// The owning router's redirect capability.
///
/// The guard and the controller request redirects through this port;
/// they never render anything themselves.
pub trait Navigator: Send + Sync + std::fmt::Debug + 'static {
    /// Redirect the shell to the given route path.
    fn redirect(&self, path: &str);
}
