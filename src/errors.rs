use thiserror::Error;

/// The one class of error the core is allowed to raise: an internal invariant
/// (I1-I5 in the design notes) has been violated. This always indicates a bug in
/// the engine, never malformed caller input - well-formed requests either succeed
/// quietly or no-op quietly (see `RequestError` for the one rejected-at-construction
/// case). Hosts are expected to treat this as fatal rather than attempt recovery.
#[derive(Error, Debug)]
pub enum EngineError {
    #[error("invariant violation: {0}")]
    InvariantViolation(&'static str),
}
