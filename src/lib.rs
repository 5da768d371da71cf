/*!
An implementation of Secure Remote Password (SRP6a) authentication protocol.

**NOTE**: Please do only use a group size >= 2048 bit in production, e.g.
[`GroupId::N2048`] or larger.

# Usage
See the demos for the full flow: signup creates `(s, v)` once, every
authentication runs client and server sessions against each other.

# Note on groups and hashes
This crate ships the seven modulus/generator pairs from [RFC5054] Appendix A
and takes custom pairs as hex strings. The hash function (SHA-1 up to
SHA-512) and the transcript padding mode are bound at config time; both
sides must agree on all three.

# Further details and domain vocabulary
- You can find the documentation of SRP6 [variables in a dedicated module][`protocol_details`].
- [RFC2945](https://datatracker.ietf.org/doc/html/rfc2945) that describes in detail the Secure remote password protocol (SRP).
- [RFC5054] that describes SRP6 for TLS Authentication

[RFC5054]: (https://datatracker.ietf.org/doc/html/rfc5054)
*/
use derive_more::{Display, Error};

#[cfg(doc)]
pub mod protocol_details;
#[cfg(not(doc))]
mod protocol_details;

pub(crate) mod primitives;

mod api;
mod big_number;
mod config;
mod groups;
mod hash;
pub mod rng;

pub use api::{host::*, user::*};
pub use config::{PadMode, Srp6Config};
pub use groups::{Group, GroupId};
pub use hash::HashKind;
pub use primitives::{
    ClearTextPassword, Generator, MultiplierParameter, PasswordVerifier, PrimeModulus, PrivateKey,
    Proof, PublicKey, Salt, ServerHandshake, SessionKey, StrongProof, StrongSessionKey,
    UserDetails, UserHandshake, Username, UsernameRef,
};

/// encapsulates a [`Srp6Error`]
pub type Result<T> = std::result::Result<T, Srp6Error>;

#[derive(Error, Display, Debug, PartialEq, serde::Serialize)]
pub enum Srp6Error {
    #[display(
        "The provided key length ({given} bytes) does not match the expected ({expected} byte)"
    )]
    KeyLengthMismatch { given: usize, expected: usize },

    #[display("The provided custom group parameters are invalid")]
    InvalidCustomGroup,

    #[display("The provided proof is invalid")]
    InvalidProof(#[error(not(source))] Proof),

    #[display("The provided strong proof is invalid")]
    InvalidStrongProof(#[error(not(source))] StrongProof),

    #[display("The provided public key is invalid")]
    InvalidPublicKey(#[error(not(source))] PublicKey),

    #[display("The scrambling parameter u hashed to zero")]
    ZeroScramblingParameter,

    #[display("The session cannot perform this operation in its current state")]
    InvalidSessionState,
}
