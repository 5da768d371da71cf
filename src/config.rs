//! Binds a hash choice and a group choice into a reusable session prototype.

use serde::{Deserialize, Serialize};

use crate::groups::{Group, GroupId};
use crate::hash::HashKind;
use crate::Result;

/// How integers are encoded inside hash inputs.
///
/// The default matches the csrp lineage: big-endian with leading zeros
/// stripped. RFC 5054 §2.6 instead left-pads N, g, A and B to `byte_len(N)`;
/// peers following the RFC to the letter need [`PadMode::Rfc5054`]. The salt
/// is an octet string and is never padded in either mode. Both sides must
/// agree on the mode or every proof exchange fails.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum PadMode {
    #[default]
    Unpadded,
    Rfc5054,
}

/// The immutable prototype every session starts from: hash kind, group and
/// padding mode. Cloning is cheap; the group is a shared handle.
#[derive(Debug, Clone, PartialEq)]
pub struct Srp6Config {
    hash: HashKind,
    group: Group,
    padding: PadMode,
}

impl Srp6Config {
    pub fn new(hash: HashKind, group_id: GroupId) -> Self {
        Self {
            hash,
            group: Group::standard(group_id),
            padding: PadMode::default(),
        }
    }

    /// like [`Srp6Config::new`] but with caller-supplied group parameters,
    /// validated by [`Group::custom`]
    pub fn with_custom_group(hash: HashKind, n_hex: &str, g_hex: &str) -> Result<Self> {
        Ok(Self {
            hash,
            group: Group::custom(n_hex, g_hex)?,
            padding: PadMode::default(),
        })
    }

    /// opt in to the strict RFC 5054 fixed-width transcript encoding
    pub fn strict_rfc5054_padding(mut self) -> Self {
        self.padding = PadMode::Rfc5054;
        self
    }

    pub fn hash(&self) -> HashKind {
        self.hash
    }

    pub fn group(&self) -> &Group {
        &self.group
    }

    pub fn padding(&self) -> PadMode {
        self.padding
    }

    /// length in bytes of the session key `K` both sides derive
    pub fn session_key_length(&self) -> usize {
        self.hash.digest_length()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_to_unpadded() {
        let config = Srp6Config::new(HashKind::Sha256, GroupId::N2048);
        assert_eq!(config.padding(), PadMode::Unpadded);
        assert_eq!(config.session_key_length(), 32);

        let strict = config.clone().strict_rfc5054_padding();
        assert_eq!(strict.padding(), PadMode::Rfc5054);
        assert_ne!(config, strict);
    }

    #[test]
    fn custom_group_config() {
        let config = Srp6Config::with_custom_group(
            HashKind::Sha1,
            "EEAF0AB9ADB38DD69C33F80AFA8FC5E86072618775FF3C0B9EA2314C9C256576D674DF7496\
             EA81D3383B4813D692C6E0E0D5D8E250B98BE48E495C1D6089DAD15DC7D7B46154D6B6CE8E\
             F4AD69B15D4982559B297BCF1885C529F566660E57EC68EDBC3C05726CC02FD4CBF4976EAA\
             9AFD5138FE8376435B9FC61D2FC0EB06E3",
            "2",
        )
        .unwrap();
        assert_eq!(config.group().modulus_length(), 128);
        assert!(Srp6Config::with_custom_group(HashKind::Sha1, "abc", "2").is_err());
    }
}
